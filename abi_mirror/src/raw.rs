// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unchecked access to live process memory.
//!
//! This is the only module that reads through raw pointers. Nothing here validates addresses:
//! callers that cannot guarantee readability should decode through a
//! [`WordView`](crate::WordView) instead.

#![allow(unsafe_code, reason = "raw process-memory reads are the point of this module")]

use core::convert::Infallible;
use core::ptr;

use crate::container::ValueContainer;
use crate::decoder::Decoder;
use crate::descriptor::TypeDescriptor;
use crate::memory::Memory;
use crate::word::{Address, WORD_SIZE, Word, WordOffset};

/// Reads words straight out of the current process's address space.
#[derive(Copy, Clone, Debug)]
pub struct RawMemory {
    _private: (),
}

impl RawMemory {
    /// Creates a reader over the current process's memory.
    ///
    /// # Safety
    ///
    /// Every word read through the returned value must be mapped, readable, and not concurrently
    /// written for the duration of the read. The reader does not check anything.
    #[must_use]
    pub const unsafe fn assume_readable() -> Self {
        Self { _private: () }
    }

    #[inline]
    fn pointer(base: Address, offset: WordOffset) -> *const Word {
        ptr::with_exposed_provenance(base.wrapping_offset(offset).get())
    }
}

impl Memory for RawMemory {
    type Error = Infallible;

    #[inline]
    fn read_word(&self, base: Address, offset: WordOffset) -> Result<Word, Infallible> {
        let src = Self::pointer(base, offset);
        // SAFETY: `assume_readable` makes the caller vouch for every address reached here.
        Ok(unsafe { src.read_unaligned() })
    }

    #[inline]
    fn read_words(
        &self,
        base: Address,
        offset: WordOffset,
        out: &mut [Word],
    ) -> Result<(), Infallible> {
        let src = Self::pointer(base, offset).cast::<u8>();
        // SAFETY: the source range is vouched for by `assume_readable`; `out` is a distinct,
        // exclusively borrowed buffer of exactly `out.len()` words.
        unsafe {
            ptr::copy_nonoverlapping(src, out.as_mut_ptr().cast::<u8>(), out.len() * WORD_SIZE);
        }
        Ok(())
    }
}

/// Decodes the descriptor header at `address` in the current process.
///
/// # Safety
///
/// `address` must be the start of a descriptor record: the word at `address` and the word
/// before it must both be readable.
#[must_use]
pub unsafe fn decode_type_descriptor(address: Address) -> TypeDescriptor {
    // SAFETY: forwarded to the caller.
    let memory = unsafe { RawMemory::assume_readable() };
    let Ok(descriptor) = Decoder::new(&memory).type_descriptor(address);
    descriptor
}

/// Decodes the value container at `address` in the current process.
///
/// # Safety
///
/// `address` must point to five readable words laid out as a value container, and the word at
/// offset 3 must satisfy the safety contract of [`decode_type_descriptor`].
#[must_use]
pub unsafe fn decode_value_container(address: Address) -> ValueContainer {
    // SAFETY: forwarded to the caller.
    let memory = unsafe { RawMemory::assume_readable() };
    let Ok(container) = Decoder::new(&memory).value_container(address);
    container
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::TypeKind;

    #[test]
    fn decodes_live_buffers() {
        let witness = [0_usize; 4];
        let capability = [0_usize; 2];
        let descriptor = [Address::from_ptr(witness.as_ptr()).get(), 0x200];
        let d = Address::from_ptr(descriptor.as_ptr().wrapping_add(1));
        assert_eq!(
            d.wrapping_offset(WordOffset(-1)),
            Address::from_ptr(descriptor.as_ptr()),
            "witness slot must lie inside the exposed descriptor buffer"
        );
        let container = [
            0xaaaa,
            usize::MAX,
            0,
            d.get(),
            Address::from_ptr(capability.as_ptr()).get(),
        ];

        // SAFETY: all buffers are live locals laid out per the ABI table.
        let c = unsafe { decode_value_container(Address::from_ptr(container.as_ptr())) };
        assert_eq!(c.inline_buffer(), [0xaaaa, usize::MAX, 0]);
        assert_eq!(
            c.descriptor.value_witness_table,
            Address::from_ptr(witness.as_ptr())
        );
        assert_eq!(c.kind(), TypeKind::Struct);
        assert_eq!(c.capability_table, Address::from_ptr(capability.as_ptr()));

        // SAFETY: `d` points at `descriptor[1]`, and `descriptor[0]` precedes it.
        let direct = unsafe { decode_type_descriptor(d) };
        assert_eq!(direct, c.descriptor);
    }

    #[test]
    fn bulk_read_matches_single_reads() {
        let words = [0x1111_usize, 0x2222, 0x3333];
        let base = Address::from_ptr(words.as_ptr());
        // SAFETY: `words` is a live local.
        let memory = unsafe { RawMemory::assume_readable() };
        let mut bulk = [0; 3];
        let Ok(()) = memory.read_words(base, WordOffset::ZERO, &mut bulk);
        let single = [0, 1, 2].map(|i| {
            let Ok(w) = memory.read_word(base, WordOffset(i));
            w
        });
        assert_eq!(bulk, single);
        assert_eq!(bulk, words);
    }
}
