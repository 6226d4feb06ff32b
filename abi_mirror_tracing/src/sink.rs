// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use abi_mirror::{Field, ReadEvent, ReadSink};

/// Optional filter for which slots are forwarded.
///
/// Return `false` to drop the event. Dropped events still count towards
/// [`TracingReadSink::reads`].
pub trait FieldFilter {
    /// Decide whether reads of `field` are emitted.
    fn include(&mut self, _field: Field) -> bool {
        true
    }
}

/// Default filter that forwards every read.
#[derive(Default, Debug)]
pub struct AllFields;

impl FieldFilter for AllFields {}

/// A `ReadSink` that emits one `tracing` event per decoded word.
///
/// Events use the `abi_mirror::read` target at `TRACE` level and carry `field`, `base`,
/// `offset`, `address` and `word` as structured fields.
pub struct TracingReadSink<F = AllFields> {
    filter: F,
    reads: usize,
}

impl TracingReadSink<AllFields> {
    /// Create a sink that forwards every read.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: FieldFilter> TracingReadSink<F> {
    /// Create a sink with a custom field filter.
    #[must_use]
    pub fn with_filter(filter: F) -> Self {
        Self { filter, reads: 0 }
    }

    /// Number of reads observed so far, including filtered ones.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl<F: FieldFilter> ReadSink for TracingReadSink<F> {
    fn read(&mut self, event: ReadEvent) {
        self.reads += 1;
        if !self.filter.include(event.field) {
            return;
        }
        tracing::trace!(
            target: "abi_mirror::read",
            field = event.field.name(),
            base = %event.base,
            offset = %event.offset,
            address = %event.address,
            word = %format_args!("{:#x}", event.word),
            "read word"
        );
    }
}

impl<F> Default for TracingReadSink<F>
where
    F: FieldFilter + Default,
{
    fn default() -> Self {
        Self::with_filter(F::default())
    }
}

impl<F> std::fmt::Debug for TracingReadSink<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TracingReadSink")
            .field("reads", &self.reads)
            .finish_non_exhaustive()
    }
}
