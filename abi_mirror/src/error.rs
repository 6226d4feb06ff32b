// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Checked-decode errors.

use core::fmt;

use crate::word::{Address, WordOffset};

/// A checked decode failure.
///
/// The unchecked path never produces these; its failures are host-level faults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The word at `address` is not covered by any readable view.
    OutOfRange {
        /// First byte of the word that was requested.
        address: Address,
    },
    /// `address` is not on a word boundary of the view that covers it.
    Misaligned {
        /// Requested address.
        address: Address,
    },
    /// `base + offset` does not fit in the address space.
    AddressOverflow {
        /// Record base address.
        base: Address,
        /// Word offset from `base`.
        offset: WordOffset,
    },
    /// Strict decoding rejected a descriptor header.
    ImplausibleDescriptor {
        /// Descriptor address.
        address: Address,
        /// The witness table reference that failed the check.
        value_witness_table: Address,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { address } => write!(f, "word at {address} is out of range"),
            Self::Misaligned { address } => write!(f, "address {address} is not word aligned"),
            Self::AddressOverflow { base, offset } => {
                write!(f, "address overflow: base={base} offset={offset}")
            }
            Self::ImplausibleDescriptor {
                address,
                value_witness_table,
            } => write!(
                f,
                "implausible type descriptor at {address}: value witness table={value_witness_table}"
            ),
        }
    }
}

impl core::error::Error for DecodeError {}
