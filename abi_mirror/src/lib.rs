// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `abi_mirror` decodes two runtime records straight from memory, given only an address and a
//! fixed ABI layout:
//!
//! - a **value container**: three words of inline storage, then a pointer to a type descriptor,
//!   then a pointer to a capability table;
//! - a **type-descriptor header**: a value witness table reference stored one word *before* the
//!   descriptor address, followed by the kind discriminant at the address itself.
//!
//! Offsets come from a versioned [`AbiLayout`] table. All reads go through the [`Memory`] trait,
//! which has two kinds of implementation:
//!
//! - the unchecked path ([`decode_value_container`], [`decode_type_descriptor`], [`RawMemory`])
//!   reads live process memory and is `unsafe` to call;
//! - the checked path ([`decode_value_container_in`], [`decode_type_descriptor_in`],
//!   [`WordView`]) reads caller-provided buffers and reports out-of-range reads as
//!   [`DecodeError`]s.
//!
//! Decoding never allocates, holds no state between calls, and never dereferences the pointers
//! it decodes beyond the descriptor header. Kind-specific descriptor payloads and capability
//! table contents are not interpreted.
//!
//! ## Example
//! ```
//! use abi_mirror::{Address, TypeKind, WordView, decode_value_container_in};
//!
//! let descriptor = [0xdead_0, 0x200];
//! let descriptor_view = WordView::at(Address(0x2000), &descriptor);
//! let container = [0xaaaa, 0xbbbb, 0xcccc, descriptor_view.address_of(1).get(), 0x3000];
//! let views = [WordView::at(Address(0x1000), &container), descriptor_view];
//!
//! let value = decode_value_container_in(&views[..], Address(0x1000))?;
//! assert_eq!(value.inline_buffer(), [0xaaaa, 0xbbbb, 0xcccc]);
//! assert_eq!(value.kind(), TypeKind::Struct);
//! assert_eq!(value.capability_table, Address(0x3000));
//! # Ok::<(), abi_mirror::DecodeError>(())
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

pub mod container;
pub mod decoder;
pub mod descriptor;
pub mod error;
pub mod kind;
pub mod layout;
pub mod memory;
pub mod raw;
pub mod trace;
pub mod word;

pub use container::{ValueContainer, decode_value_container_in};
pub use decoder::Decoder;
pub use descriptor::{TypeDescriptor, decode_type_descriptor_in};
pub use error::DecodeError;
pub use kind::{KindFlags, TypeKind};
pub use layout::{AbiLayout, AbiVersion, Field, INLINE_BUFFER_WORDS, LayoutError};
pub use memory::{Memory, WordView};
pub use raw::{RawMemory, decode_type_descriptor, decode_value_container};
pub use trace::{FootprintSink, ReadEvent, ReadSink};
pub use word::{Address, WORD_SIZE, Word, WordOffset};
