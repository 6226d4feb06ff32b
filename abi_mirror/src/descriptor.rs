// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-descriptor headers.

use core::fmt;

use crate::decoder::Decoder;
use crate::kind::TypeKind;
use crate::memory::Memory;
use crate::word::{Address, WORD_SIZE, Word};

/// The header every type-descriptor record begins with.
///
/// Kind-specific fields after the header are not decoded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// Table of per-type value operations, read from the word before the descriptor.
    pub value_witness_table: Address,
    /// Kind discriminant, read from the descriptor's first word.
    pub raw_kind: Word,
}

impl TypeDescriptor {
    /// Classifies [`TypeDescriptor::raw_kind`].
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> TypeKind {
        TypeKind::from_raw(self.raw_kind)
    }

    /// Cheap sanity check used by strict decoding: the witness table must be a non-null,
    /// word-aligned address.
    ///
    /// This cannot tell a real descriptor from lookalike memory; it only catches the most
    /// obvious layout mismatches.
    #[must_use]
    pub const fn looks_plausible(&self) -> bool {
        !self.value_witness_table.is_null() && self.value_witness_table.is_word_aligned()
    }

    pub(crate) fn write_fields(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        writeln!(f, "{indent}value_witness_table: {}", self.value_witness_table)?;
        write!(
            f,
            "{indent}kind: {} ({:#0width$x})",
            self.kind(),
            self.raw_kind,
            width = 2 + 2 * WORD_SIZE
        )
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "type descriptor:")?;
        self.write_fields(f, "  ")
    }
}

/// Decodes the descriptor header at `address` through a checked [`Memory`].
///
/// Reads the witness table reference at `address - WORD_SIZE`, then the kind at `address`.
pub fn decode_type_descriptor_in<M: Memory + ?Sized>(
    memory: &M,
    address: Address,
) -> Result<TypeDescriptor, M::Error> {
    Decoder::new(memory).type_descriptor(address)
}
