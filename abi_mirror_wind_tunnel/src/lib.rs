// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmark fixtures for `abi_mirror`.
//!
//! The benches live under `benches/`; this crate only provides the memory they decode.

use abi_mirror::{Address, Word, WordView};

/// A batch of containers sharing one descriptor, stored at real addresses.
#[derive(Debug)]
pub struct Batch {
    descriptor: Box<[Word; 2]>,
    containers: Vec<[Word; 5]>,
}

impl Batch {
    /// Builds `len` containers whose inline words count up from zero.
    #[must_use]
    pub fn new(len: usize) -> Self {
        let witness_stand_in = 0x1000;
        let descriptor: Box<[Word; 2]> = Box::new([witness_stand_in, 0x200]);
        let descriptor_address = Address::from_ptr(descriptor.as_ptr().wrapping_add(1)).get();
        let containers = (0..len)
            .map(|i| [i, i + 1, i + 2, descriptor_address, 0x2000])
            .collect();
        Self {
            descriptor,
            containers,
        }
    }

    /// Real addresses of every container.
    #[must_use]
    pub fn addresses(&self) -> Vec<Address> {
        self.containers
            .iter()
            .map(|c| Address::from_ptr(c.as_ptr()))
            .collect()
    }

    /// One view per container plus the shared descriptor view.
    #[must_use]
    pub fn views(&self) -> Vec<WordView<'_>> {
        let mut views: Vec<WordView<'_>> =
            self.containers.iter().map(|c| WordView::new(c)).collect();
        views.push(WordView::new(&self.descriptor[..]));
        views
    }
}
