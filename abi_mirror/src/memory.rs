// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Word-granular memory access.
//!
//! Decoders never touch memory directly; every read goes through [`Memory`]. Two families of
//! implementations exist:
//!
//! - [`RawMemory`](crate::raw::RawMemory) reads live process memory without checks. Its error
//!   type is uninhabited.
//! - [`WordView`] (and slices of views) serve reads from caller-provided word buffers and report
//!   anything outside them as [`DecodeError::OutOfRange`].

use crate::error::DecodeError;
use crate::word::{Address, WORD_SIZE, Word, WordOffset};

/// A source of word-sized reads addressed as `base + offset` words.
pub trait Memory {
    /// Failure type for reads. Uninhabited for unchecked sources.
    type Error;

    /// Reads the word at `base + offset`.
    fn read_word(&self, base: Address, offset: WordOffset) -> Result<Word, Self::Error>;

    /// Reads `out.len()` consecutive words starting at `base + offset`.
    ///
    /// The result must equal `out.len()` single-word reads. Implementations may override this
    /// with a bulk copy.
    fn read_words(
        &self,
        base: Address,
        offset: WordOffset,
        out: &mut [Word],
    ) -> Result<(), Self::Error> {
        let mut at = offset;
        for slot in out {
            *slot = self.read_word(base, at)?;
            at = at.advance(1);
        }
        Ok(())
    }
}

/// Resolves `base + offset` words, reporting overflow instead of wrapping.
#[inline]
pub(crate) fn resolve(base: Address, offset: WordOffset) -> Result<Address, DecodeError> {
    base.checked_offset(offset)
        .ok_or(DecodeError::AddressOverflow { base, offset })
}

/// A bounds-checked view of caller-owned words anchored at a base address.
///
/// The base is either the slice's own address ([`WordView::new`]), so that pointers stored in
/// the buffer can refer to other live buffers, or a synthetic address ([`WordView::at`]) for
/// fixtures that model a foreign address space.
#[derive(Copy, Clone, Debug)]
pub struct WordView<'a> {
    base: Address,
    words: &'a [Word],
}

impl<'a> WordView<'a> {
    /// Creates a view whose base is the address of `words` itself.
    #[must_use]
    pub fn new(words: &'a [Word]) -> Self {
        Self {
            base: Address::from_ptr(words.as_ptr()),
            words,
        }
    }

    /// Creates a view that pretends `words` live at `base`.
    #[must_use]
    pub const fn at(base: Address, words: &'a [Word]) -> Self {
        Self { base, words }
    }

    /// Address of the first word.
    #[must_use]
    #[inline]
    pub const fn base(&self) -> Address {
        self.base
    }

    /// Number of words in the view.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the view covers no words.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Address of word `index`. `index == len()` yields the one-past-the-end address.
    #[must_use]
    #[inline]
    pub const fn address_of(&self, index: usize) -> Address {
        self.base.wrapping_offset(WordOffset(index.cast_signed()))
    }

    /// Returns `true` if `address` falls inside the view (aligned or not).
    #[must_use]
    pub fn contains(&self, address: Address) -> bool {
        address
            .0
            .checked_sub(self.base.0)
            .is_some_and(|delta| delta / WORD_SIZE < self.words.len())
    }

    fn index_of(&self, address: Address) -> Result<usize, DecodeError> {
        let delta = address
            .0
            .checked_sub(self.base.0)
            .ok_or(DecodeError::OutOfRange { address })?;
        if delta / WORD_SIZE >= self.words.len() {
            return Err(DecodeError::OutOfRange { address });
        }
        if delta % WORD_SIZE != 0 {
            return Err(DecodeError::Misaligned { address });
        }
        Ok(delta / WORD_SIZE)
    }

    fn read_at(&self, address: Address) -> Result<Word, DecodeError> {
        let index = self.index_of(address)?;
        self.words
            .get(index)
            .copied()
            .ok_or(DecodeError::OutOfRange { address })
    }

    fn copy_from(&self, start: Address, out: &mut [Word]) -> Result<(), DecodeError> {
        let first = self.index_of(start)?;
        let available = self.words.len() - first;
        if out.len() > available {
            return Err(DecodeError::OutOfRange {
                address: self.address_of(self.words.len()),
            });
        }
        out.copy_from_slice(&self.words[first..first + out.len()]);
        Ok(())
    }
}

impl Memory for WordView<'_> {
    type Error = DecodeError;

    fn read_word(&self, base: Address, offset: WordOffset) -> Result<Word, DecodeError> {
        self.read_at(resolve(base, offset)?)
    }

    fn read_words(
        &self,
        base: Address,
        offset: WordOffset,
        out: &mut [Word],
    ) -> Result<(), DecodeError> {
        self.copy_from(resolve(base, offset)?, out)
    }
}

/// A set of disjoint views; each read is served by the first view that covers it.
impl Memory for [WordView<'_>] {
    type Error = DecodeError;

    fn read_word(&self, base: Address, offset: WordOffset) -> Result<Word, DecodeError> {
        let address = resolve(base, offset)?;
        self.iter()
            .find(|view| view.contains(address))
            .ok_or(DecodeError::OutOfRange { address })?
            .read_at(address)
    }

    fn read_words(
        &self,
        base: Address,
        offset: WordOffset,
        out: &mut [Word],
    ) -> Result<(), DecodeError> {
        let start = resolve(base, offset)?;
        if let Some(view) = self.iter().find(|view| view.contains(start))
            && view.copy_from(start, out).is_ok()
        {
            return Ok(());
        }
        // Spans more than one view (or none): fall back to word-at-a-time so the error names
        // the first missing word.
        let mut at = offset;
        for slot in out {
            *slot = self.read_word(base, at)?;
            at = at.advance(1);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Address = Address(0x1000);

    #[test]
    fn reads_inside_view() {
        let words = [10, 20, 30];
        let view = WordView::at(BASE, &words);
        assert_eq!(view.read_word(BASE, WordOffset(0)), Ok(10));
        assert_eq!(view.read_word(view.address_of(2), WordOffset(0)), Ok(30));
        assert_eq!(view.read_word(view.address_of(2), WordOffset(-1)), Ok(20));
    }

    #[test]
    fn rejects_reads_outside_view() {
        let words = [10, 20, 30];
        let view = WordView::at(BASE, &words);
        assert_eq!(
            view.read_word(BASE, WordOffset(-1)),
            Err(DecodeError::OutOfRange {
                address: Address(0x1000 - WORD_SIZE)
            })
        );
        assert_eq!(
            view.read_word(BASE, WordOffset(3)),
            Err(DecodeError::OutOfRange {
                address: view.address_of(3)
            })
        );
    }

    #[test]
    fn rejects_misaligned_reads() {
        let words = [10, 20];
        let view = WordView::at(BASE, &words);
        assert_eq!(
            view.read_word(Address(0x1001), WordOffset(0)),
            Err(DecodeError::Misaligned {
                address: Address(0x1001)
            })
        );
    }

    #[test]
    fn reports_overflow() {
        let words = [0];
        let view = WordView::at(Address::NULL, &words);
        assert_eq!(
            view.read_word(Address::NULL, WordOffset(-1)),
            Err(DecodeError::AddressOverflow {
                base: Address::NULL,
                offset: WordOffset(-1),
            })
        );
    }

    #[test]
    fn bulk_read_matches_single_reads() {
        let words = [usize::MAX, 0, 0x55aa];
        let view = WordView::at(BASE, &words);
        let mut bulk = [0; 3];
        view.read_words(BASE, WordOffset(0), &mut bulk).unwrap();
        let single = [0, 1, 2].map(|i| view.read_word(BASE, WordOffset(i)).unwrap());
        assert_eq!(bulk, single);
    }

    #[test]
    fn bulk_read_names_first_missing_word() {
        let words = [1, 2];
        let view = WordView::at(BASE, &words);
        let mut out = [0; 3];
        assert_eq!(
            view.read_words(BASE, WordOffset(0), &mut out),
            Err(DecodeError::OutOfRange {
                address: view.address_of(2)
            })
        );
    }

    #[test]
    fn regions_route_to_covering_view() {
        let a = [1, 2];
        let b = [3, 4];
        let views = [
            WordView::at(BASE, &a),
            WordView::at(Address(0x2000), &b),
        ];
        assert_eq!(views[..].read_word(Address(0x2000), WordOffset(1)), Ok(4));
        assert_eq!(views[..].read_word(BASE, WordOffset(1)), Ok(2));
        assert_eq!(
            views[..].read_word(Address(0x3000), WordOffset(0)),
            Err(DecodeError::OutOfRange {
                address: Address(0x3000)
            })
        );
    }

    #[test]
    fn regions_bulk_read_spans_adjacent_views() {
        let a = [1, 2];
        let b = [3];
        let views = [
            WordView::at(BASE, &a),
            WordView::at(Address(0x1000 + 2 * WORD_SIZE), &b),
        ];
        let mut out = [0; 3];
        views[..]
            .read_words(BASE, WordOffset(0), &mut out)
            .unwrap();
        assert_eq!(out, [1, 2, 3]);
    }
}
