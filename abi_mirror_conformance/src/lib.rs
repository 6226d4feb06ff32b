// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conformance fixtures for `abi_mirror`.
//!
//! The tests in this crate build value containers and descriptor headers by hand, exactly as
//! the ABI table lays them out, and check both decode paths against them. Two fixture flavors
//! exist:
//!
//! - [`Fixture`] places its buffers at synthetic addresses and is decoded through
//!   [`WordView`]s only;
//! - [`LiveFixture`] stores real addresses in heap buffers so it can be decoded through the
//!   unchecked path as well.

use abi_mirror::{Address, INLINE_BUFFER_WORDS, WORD_SIZE, Word, WordOffset, WordView};

/// Synthetic base address for fixture containers.
pub const CONTAINER_BASE: Address = Address(0x0010_0000);
/// Synthetic base address for fixture descriptor buffers (the witness slot).
pub const DESCRIPTOR_BUFFER_BASE: Address = Address(0x0020_0000);
/// Synthetic address used as a capability table pointer.
pub const CAPABILITY_TABLE: Address = Address(0x0030_0000);

/// A container and descriptor buffer at synthetic addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fixture {
    /// Container words: A, B, C, descriptor pointer, capability table.
    pub container: [Word; 5],
    /// Descriptor buffer: witness table, kind.
    pub descriptor: [Word; 2],
}

impl Fixture {
    /// Builds a fixture holding `values` and a descriptor of `kind` with `witness` before it.
    #[must_use]
    pub fn new(values: [Word; INLINE_BUFFER_WORDS], witness: Word, kind: Word) -> Self {
        let [a, b, c] = values;
        Self {
            container: [
                a,
                b,
                c,
                Self::descriptor_address().get(),
                CAPABILITY_TABLE.get(),
            ],
            descriptor: [witness, kind],
        }
    }

    /// Address the container's descriptor pointer refers to (one word into the buffer).
    #[must_use]
    pub fn descriptor_address() -> Address {
        DESCRIPTOR_BUFFER_BASE.wrapping_offset(WordOffset(1))
    }

    /// Exact-size views over both buffers; any read outside them fails.
    #[must_use]
    pub fn views(&self) -> [WordView<'_>; 2] {
        [
            WordView::at(CONTAINER_BASE, &self.container),
            WordView::at(DESCRIPTOR_BUFFER_BASE, &self.descriptor),
        ]
    }
}

/// A container and descriptor stored in heap buffers that reference each other by real
/// address.
#[derive(Debug)]
pub struct LiveFixture {
    /// Container words.
    pub container: Box<[Word; 5]>,
    /// Descriptor buffer words.
    pub descriptor: Box<[Word; 2]>,
    /// Stand-in value witness table.
    pub witness: Box<[Word; 4]>,
    /// Stand-in capability table.
    pub capability: Box<[Word; 2]>,
}

impl LiveFixture {
    /// Builds a live fixture holding `values` and a descriptor of `kind`.
    #[must_use]
    pub fn new(values: [Word; INLINE_BUFFER_WORDS], kind: Word) -> Self {
        let witness: Box<[Word; 4]> = Box::new([0; 4]);
        let capability: Box<[Word; 2]> = Box::new([0; 2]);
        let descriptor = Box::new([Address::from_ptr(witness.as_ptr()).get(), kind]);
        let [a, b, c] = values;
        let container = Box::new([
            a,
            b,
            c,
            Address::from_ptr(descriptor.as_ptr().wrapping_add(1)).get(),
            Address::from_ptr(capability.as_ptr()).get(),
        ]);
        Self {
            container,
            descriptor,
            witness,
            capability,
        }
    }

    /// Real address of the container.
    #[must_use]
    pub fn container_address(&self) -> Address {
        Address::from_ptr(self.container.as_ptr())
    }

    /// Real address of the descriptor (the kind word).
    #[must_use]
    pub fn descriptor_address(&self) -> Address {
        Address::from_ptr(self.descriptor.as_ptr().wrapping_add(1))
    }

    /// Real address of the stand-in witness table.
    #[must_use]
    pub fn witness_address(&self) -> Address {
        Address::from_ptr(self.witness.as_ptr())
    }

    /// Real address of the stand-in capability table.
    #[must_use]
    pub fn capability_address(&self) -> Address {
        Address::from_ptr(self.capability.as_ptr())
    }

    /// Views anchored at the buffers' real addresses.
    #[must_use]
    pub fn views(&self) -> [WordView<'_>; 2] {
        [
            WordView::new(&self.container[..]),
            WordView::new(&self.descriptor[..]),
        ]
    }
}

/// Inline word patterns worth checking: zero, all-ones, sign bit, pointer-like, small ints.
pub const INTERESTING_WORDS: [Word; 6] = [
    0,
    Word::MAX,
    1 << (WORD_SIZE * 8 - 1),
    (-2_isize).cast_unsigned(),
    0x1000 * WORD_SIZE,
    7,
];
