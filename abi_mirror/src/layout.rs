// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Versioned ABI offset table.
//!
//! Both decoders consult an [`AbiLayout`] instead of hard-coding offsets, so an ABI revision only
//! needs a new table. Offsets are in words and relative to the decoded record's address:
//!
//! | Record           | Offset | Field                          |
//! |------------------|--------|--------------------------------|
//! | type descriptor  | -1     | value witness table            |
//! | type descriptor  | 0      | kind                           |
//! | value container  | 0..3   | inline buffer (A, B, C)        |
//! | value container  | 3      | pointer to the type descriptor |
//! | value container  | 4      | capability table               |

use core::fmt;
use core::ops::RangeInclusive;

use crate::word::WordOffset;

/// Number of words in a value container's inline buffer.
pub const INLINE_BUFFER_WORDS: usize = 3;

/// Known ABI revisions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum AbiVersion {
    /// The stable 5.x runtime layout.
    Stable5,
}

/// A single word slot the decoders read.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// Descriptor: value witness table reference.
    ValueWitnessTable,
    /// Descriptor: kind discriminant.
    Kind,
    /// Container: first inline word.
    ValueA,
    /// Container: second inline word.
    ValueB,
    /// Container: third inline word.
    ValueC,
    /// Container: pointer to the type descriptor.
    Descriptor,
    /// Container: capability table pointer.
    CapabilityTable,
}

impl Field {
    /// Inline buffer fields in memory order.
    pub const INLINE: [Self; INLINE_BUFFER_WORDS] = [Self::ValueA, Self::ValueB, Self::ValueC];

    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ValueWitnessTable => "value_witness_table",
            Self::Kind => "kind",
            Self::ValueA => "value_a",
            Self::ValueB => "value_b",
            Self::ValueC => "value_c",
            Self::Descriptor => "descriptor",
            Self::CapabilityTable => "capability_table",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A malformed [`AbiLayout`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The witness table slot does not sit immediately before the kind.
    WitnessNotBeforeKind {
        /// Witness table offset.
        witness: WordOffset,
        /// Kind offset.
        kind: WordOffset,
    },
    /// Container slots overlap or are out of order.
    ContainerOrder {
        /// First slot that broke the ordering.
        field: Field,
        /// Its offset.
        offset: WordOffset,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WitnessNotBeforeKind { witness, kind } => write!(
                f,
                "witness table slot ({witness}) must immediately precede kind ({kind})"
            ),
            Self::ContainerOrder { field, offset } => {
                write!(f, "container slot {field} at {offset} overlaps or is out of order")
            }
        }
    }
}

impl core::error::Error for LayoutError {}

/// Word offsets for one ABI revision.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AbiLayout {
    /// Revision this table describes.
    pub version: AbiVersion,
    /// Descriptor: offset of the value witness table reference.
    pub descriptor_value_witness_table: WordOffset,
    /// Descriptor: offset of the kind discriminant.
    pub descriptor_kind: WordOffset,
    /// Container: offset of the first inline word.
    pub container_inline_buffer: WordOffset,
    /// Container: offset of the descriptor pointer.
    pub container_descriptor: WordOffset,
    /// Container: offset of the capability table pointer.
    pub container_capability_table: WordOffset,
}

impl AbiLayout {
    /// The stable 5.x layout.
    pub const STABLE_5: Self = Self {
        version: AbiVersion::Stable5,
        descriptor_value_witness_table: WordOffset(-1),
        descriptor_kind: WordOffset(0),
        container_inline_buffer: WordOffset(0),
        container_descriptor: WordOffset(3),
        container_capability_table: WordOffset(4),
    };

    /// The layout used when none is specified.
    pub const CURRENT: Self = Self::STABLE_5;

    /// Returns the layout for `version`.
    #[must_use]
    pub const fn for_version(version: AbiVersion) -> Self {
        match version {
            AbiVersion::Stable5 => Self::STABLE_5,
        }
    }

    /// Offset of inline word `index` (0, 1 or 2).
    #[must_use]
    #[inline]
    pub const fn inline_word(&self, index: usize) -> WordOffset {
        debug_assert!(index < INLINE_BUFFER_WORDS, "inline index out of range");
        self.container_inline_buffer.advance(index.cast_signed())
    }

    /// Checks the ordering invariants both decoders rely on.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.descriptor_value_witness_table.advance(1) != self.descriptor_kind {
            return Err(LayoutError::WitnessNotBeforeKind {
                witness: self.descriptor_value_witness_table,
                kind: self.descriptor_kind,
            });
        }
        let inline_end = self
            .container_inline_buffer
            .advance(INLINE_BUFFER_WORDS.cast_signed());
        if self.container_descriptor < inline_end {
            return Err(LayoutError::ContainerOrder {
                field: Field::Descriptor,
                offset: self.container_descriptor,
            });
        }
        if self.container_capability_table <= self.container_descriptor {
            return Err(LayoutError::ContainerOrder {
                field: Field::CapabilityTable,
                offset: self.container_capability_table,
            });
        }
        Ok(())
    }

    /// Inclusive range of word offsets a descriptor decode reads.
    #[must_use]
    pub fn descriptor_footprint(&self) -> RangeInclusive<isize> {
        let a = self.descriptor_value_witness_table.0;
        let b = self.descriptor_kind.0;
        a.min(b)..=a.max(b)
    }

    /// Inclusive range of word offsets a container decode reads (excluding the descriptor it
    /// points to).
    #[must_use]
    pub fn container_footprint(&self) -> RangeInclusive<isize> {
        let first = self.container_inline_buffer.0;
        let last = self.container_capability_table.0;
        first.min(self.container_descriptor.0)..=last.max(self.container_descriptor.0)
    }
}

impl Default for AbiLayout {
    fn default() -> Self {
        Self::CURRENT
    }
}
