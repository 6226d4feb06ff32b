// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polymorphic value containers.
//!
//! A container stores a value whose concrete type is only known at runtime: three words of
//! inline storage, a pointer to the value's [`TypeDescriptor`], and a pointer to a capability
//! table for the interface the container was formed against. Values too large for the inline
//! buffer conventionally keep a pointer to out-of-line storage in one of the inline words; the
//! decoder copies the words either way and never follows them.

use core::fmt;

use crate::decoder::Decoder;
use crate::descriptor::TypeDescriptor;
use crate::kind::TypeKind;
use crate::layout::INLINE_BUFFER_WORDS;
use crate::memory::Memory;
use crate::word::{Address, WORD_SIZE, Word};

/// A decoded value container.
///
/// Pointer fields are unowned references into memory the caller manages.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ValueContainer {
    /// Inline word 0.
    pub value_a: Word,
    /// Inline word 1.
    pub value_b: Word,
    /// Inline word 2.
    pub value_c: Word,
    /// Header of the stored value's type descriptor.
    pub descriptor: TypeDescriptor,
    /// Opaque capability table pointer.
    pub capability_table: Address,
}

impl ValueContainer {
    /// The inline buffer in memory order.
    #[must_use]
    #[inline]
    pub const fn inline_buffer(&self) -> [Word; INLINE_BUFFER_WORDS] {
        [self.value_a, self.value_b, self.value_c]
    }

    /// Kind of the stored value's type.
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> TypeKind {
        self.descriptor.kind()
    }
}

impl fmt::Display for ValueContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = 2 + 2 * WORD_SIZE;
        writeln!(f, "value container:")?;
        writeln!(f, "  value_a: {:#0width$x}", self.value_a)?;
        writeln!(f, "  value_b: {:#0width$x}", self.value_b)?;
        writeln!(f, "  value_c: {:#0width$x}", self.value_c)?;
        writeln!(f, "  descriptor:")?;
        self.descriptor.write_fields(f, "    ")?;
        writeln!(f)?;
        write!(f, "  capability_table: {}", self.capability_table)
    }
}

/// Decodes the value container at `address` through a checked [`Memory`].
///
/// The inline buffer is read first, then the descriptor pointer (and the descriptor it names),
/// then the capability table.
pub fn decode_value_container_in<M: Memory + ?Sized>(
    memory: &M,
    address: Address,
) -> Result<ValueContainer, M::Error> {
    Decoder::new(memory).value_container(address)
}
