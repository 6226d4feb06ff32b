// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-tracing adapters for `abi_mirror` (currently `tracing`).
//!
//! This crate is `std`-only and keeps `abi_mirror` itself free of logging dependencies. It
//! listens for per-word read callbacks and forwards them as structured events.
//!
//! ## Example
//! ```
//! use abi_mirror::{Address, Decoder, WordView};
//! use abi_mirror_tracing::TracingReadSink;
//!
//! let descriptor = [0x7000, 0x200];
//! let view = WordView::at(Address(0x2000), &descriptor);
//!
//! let mut sink = TracingReadSink::new();
//! Decoder::new(&view)
//!     .with_sink(&mut sink)
//!     .type_descriptor(view.address_of(1))?;
//! assert_eq!(sink.reads(), 2);
//! # Ok::<(), abi_mirror::DecodeError>(())
//! ```

mod sink;

pub use sink::{AllFields, FieldFilter, TracingReadSink};
