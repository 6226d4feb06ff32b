// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read tracing.
//!
//! A [`ReadSink`] attached to a [`Decoder`](crate::Decoder) observes every word the decoder
//! reads, in read order. The core crate ships no sink that logs; adapters live in separate
//! crates so `abi_mirror` stays dependency-free.

use crate::layout::Field;
use crate::word::{Address, Word, WordOffset};

/// One word read by a decoder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReadEvent {
    /// Slot that was read.
    pub field: Field,
    /// Base address of the record being decoded.
    pub base: Address,
    /// Word offset of the slot from `base`.
    pub offset: WordOffset,
    /// Absolute address of the slot.
    pub address: Address,
    /// Word value that was read.
    pub word: Word,
}

/// Receives [`ReadEvent`]s from a decoder.
pub trait ReadSink {
    /// Called once per word, after it has been read successfully.
    fn read(&mut self, event: ReadEvent);
}

/// Sink that counts reads and remembers the range of word offsets they covered.
///
/// Useful as a cheap guard in tests and debug builds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FootprintSink {
    /// Number of reads observed.
    pub reads: usize,
    /// Lowest offset observed.
    pub min_offset: Option<WordOffset>,
    /// Highest offset observed.
    pub max_offset: Option<WordOffset>,
}

impl ReadSink for FootprintSink {
    fn read(&mut self, event: ReadEvent) {
        self.reads += 1;
        self.min_offset = Some(self.min_offset.map_or(event.offset, |m| m.min(event.offset)));
        self.max_offset = Some(self.max_offset.map_or(event.offset, |m| m.max(event.offset)));
    }
}
