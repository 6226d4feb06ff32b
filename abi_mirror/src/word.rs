// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Word and address model.
//!
//! Every layout offset in this crate is measured in native pointer-sized words. Addresses are
//! plain integers rather than raw pointers so decoded records stay `Send + Sync` and can name
//! locations in an address space that is not the current process (e.g. a snapshot).

use core::fmt;

/// The platform's native pointer-sized unit.
pub type Word = usize;

/// Size of one [`Word`] in bytes.
///
/// This must match the inspected ABI exactly; it is fixed at compile time and never negotiated.
pub const WORD_SIZE: usize = size_of::<Word>();

const _: () = assert!(
    WORD_SIZE == 4 || WORD_SIZE == 8,
    "only 32- and 64-bit word sizes are supported"
);

/// A location in the inspected address space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub usize);

impl Address {
    /// The null address.
    pub const NULL: Self = Self(0);

    /// Returns the address of `ptr`, exposing its provenance so it can be read back later.
    #[must_use]
    #[inline]
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr.expose_provenance())
    }

    /// Returns the raw integer value.
    #[must_use]
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns `true` for the null address.
    #[must_use]
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the address is a multiple of [`WORD_SIZE`].
    #[must_use]
    #[inline]
    pub const fn is_word_aligned(self) -> bool {
        self.0 % WORD_SIZE == 0
    }

    /// Returns `self + offset * WORD_SIZE`, or `None` if the result leaves the address space.
    #[must_use]
    #[inline]
    pub const fn checked_offset(self, offset: WordOffset) -> Option<Self> {
        let Some(bytes) = offset.0.checked_mul(WORD_SIZE as isize) else {
            return None;
        };
        match self.0.checked_add_signed(bytes) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }

    /// Like [`Address::checked_offset`], but wraps around the address space.
    #[must_use]
    #[inline]
    pub const fn wrapping_offset(self, offset: WordOffset) -> Self {
        Self(
            self.0
                .wrapping_add_signed(offset.0.wrapping_mul(WORD_SIZE as isize)),
        )
    }
}

impl From<Word> for Address {
    #[inline]
    fn from(word: Word) -> Self {
        Self(word)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#0width$x}", self.0, width = 2 + 2 * WORD_SIZE)
    }
}

/// A signed offset measured in words.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordOffset(pub isize);

impl WordOffset {
    /// Offset zero.
    pub const ZERO: Self = Self(0);

    /// Returns the offset `n` words further along.
    ///
    /// Layout tables are small; overflow here is a malformed table, so this saturates.
    #[must_use]
    #[inline]
    pub const fn advance(self, n: isize) -> Self {
        Self(self.0.saturating_add(n))
    }
}

impl fmt::Display for WordOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}w", self.0)
    }
}
