// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared decode engine.
//!
//! Both record decoders run through [`Decoder`] so the checked and unchecked paths use the same
//! offset bookkeeping and read order. Reads happen strictly in layout order:
//!
//! 1. container inline buffer (A, B, C), as one bulk read
//! 2. container descriptor pointer
//! 3. descriptor witness table, then descriptor kind
//! 4. container capability table

use core::fmt;

use crate::container::ValueContainer;
use crate::descriptor::TypeDescriptor;
use crate::error::DecodeError;
use crate::layout::{AbiLayout, Field, INLINE_BUFFER_WORDS};
use crate::memory::Memory;
use crate::trace::{ReadEvent, ReadSink};
use crate::word::{Address, Word, WordOffset};

/// Decodes records from a [`Memory`] using an [`AbiLayout`].
///
/// ```
/// use abi_mirror::{Address, Decoder, FootprintSink, WordView};
///
/// let descriptor = [0x7000, 0x200];
/// let desc_view = WordView::at(Address(0x2000), &descriptor);
/// let container = [1, 2, 3, desc_view.address_of(1).get(), 0x9000];
/// let views = [WordView::at(Address(0x1000), &container), desc_view];
///
/// let mut sink = FootprintSink::default();
/// let value = Decoder::new(&views[..])
///     .with_sink(&mut sink)
///     .value_container(Address(0x1000))?;
/// assert_eq!(value.inline_buffer(), [1, 2, 3]);
/// assert_eq!(sink.reads, 7);
/// # Ok::<(), abi_mirror::DecodeError>(())
/// ```
pub struct Decoder<'a, M: ?Sized> {
    memory: &'a M,
    layout: AbiLayout,
    sink: Option<&'a mut dyn ReadSink>,
}

impl<'a, M: Memory + ?Sized> Decoder<'a, M> {
    /// Creates a decoder over `memory` using [`AbiLayout::CURRENT`].
    #[must_use]
    pub fn new(memory: &'a M) -> Self {
        Self {
            memory,
            layout: AbiLayout::CURRENT,
            sink: None,
        }
    }

    /// Uses `layout` instead of the current one.
    #[must_use]
    pub fn with_layout(mut self, layout: AbiLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Reports every read to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: &'a mut dyn ReadSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Layout in use.
    #[must_use]
    pub fn layout(&self) -> &AbiLayout {
        &self.layout
    }

    /// Decodes the descriptor header at `address`.
    pub fn type_descriptor(&mut self, address: Address) -> Result<TypeDescriptor, M::Error> {
        self.descriptor_with(address, &mut accept::<M::Error>)
    }

    /// Decodes the value container at `address`, including the descriptor it points to.
    pub fn value_container(&mut self, address: Address) -> Result<ValueContainer, M::Error> {
        self.container_with(address, &mut accept::<M::Error>)
    }

    fn descriptor_with<E, F>(
        &mut self,
        address: Address,
        check: &mut F,
    ) -> Result<TypeDescriptor, E>
    where
        E: From<M::Error>,
        F: FnMut(Address, &TypeDescriptor) -> Result<(), E>,
    {
        let layout = self.layout;
        let value_witness_table = self.read(
            Field::ValueWitnessTable,
            address,
            layout.descriptor_value_witness_table,
        )?;
        let raw_kind = self.read(Field::Kind, address, layout.descriptor_kind)?;
        let descriptor = TypeDescriptor {
            value_witness_table: Address::from(value_witness_table),
            raw_kind,
        };
        check(address, &descriptor)?;
        Ok(descriptor)
    }

    fn container_with<E, F>(
        &mut self,
        address: Address,
        check: &mut F,
    ) -> Result<ValueContainer, E>
    where
        E: From<M::Error>,
        F: FnMut(Address, &TypeDescriptor) -> Result<(), E>,
    {
        let layout = self.layout;

        let mut inline: [Word; INLINE_BUFFER_WORDS] = [0; INLINE_BUFFER_WORDS];
        self.memory
            .read_words(address, layout.container_inline_buffer, &mut inline)?;
        for (index, (field, word)) in Field::INLINE.into_iter().zip(inline).enumerate() {
            self.emit(field, address, layout.inline_word(index), word);
        }
        let [value_a, value_b, value_c] = inline;

        let descriptor_address =
            self.read(Field::Descriptor, address, layout.container_descriptor)?;
        let descriptor = self.descriptor_with(Address::from(descriptor_address), check)?;

        let capability_table = self.read(
            Field::CapabilityTable,
            address,
            layout.container_capability_table,
        )?;

        Ok(ValueContainer {
            value_a,
            value_b,
            value_c,
            descriptor,
            capability_table: Address::from(capability_table),
        })
    }

    #[inline]
    fn read(&mut self, field: Field, base: Address, offset: WordOffset) -> Result<Word, M::Error> {
        let word = self.memory.read_word(base, offset)?;
        self.emit(field, base, offset, word);
        Ok(word)
    }

    #[inline]
    fn emit(&mut self, field: Field, base: Address, offset: WordOffset, word: Word) {
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.read(ReadEvent {
                field,
                base,
                offset,
                address: base.wrapping_offset(offset),
                word,
            });
        }
    }
}

/// Strict decoding, available on checked memory only.
///
/// Strict mode rejects descriptors that fail [`TypeDescriptor::looks_plausible`]. A rejected
/// descriptor aborts a container decode before its capability table is read.
impl<M: Memory<Error = DecodeError> + ?Sized> Decoder<'_, M> {
    /// Like [`Decoder::type_descriptor`], but rejects implausible headers.
    pub fn type_descriptor_strict(
        &mut self,
        address: Address,
    ) -> Result<TypeDescriptor, DecodeError> {
        self.descriptor_with(address, &mut reject_implausible)
    }

    /// Like [`Decoder::value_container`], but rejects implausible descriptors.
    pub fn value_container_strict(
        &mut self,
        address: Address,
    ) -> Result<ValueContainer, DecodeError> {
        self.container_with(address, &mut reject_implausible)
    }
}

fn accept<E>(_: Address, _: &TypeDescriptor) -> Result<(), E> {
    Ok(())
}

fn reject_implausible(address: Address, descriptor: &TypeDescriptor) -> Result<(), DecodeError> {
    if descriptor.looks_plausible() {
        Ok(())
    } else {
        Err(DecodeError::ImplausibleDescriptor {
            address,
            value_witness_table: descriptor.value_witness_table,
        })
    }
}

impl<M: ?Sized> fmt::Debug for Decoder<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("layout", &self.layout)
            .field("traced", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;
    use crate::layout::AbiVersion;
    use crate::memory::WordView;

    #[derive(Default)]
    struct Recorder(Vec<ReadEvent>);

    impl ReadSink for Recorder {
        fn read(&mut self, event: ReadEvent) {
            self.0.push(event);
        }
    }

    fn fixture() -> ([Word; 5], [Word; 2]) {
        let descriptor = [0xdead0, 0x303];
        let container = [0xaaaa, 0xbbbb, 0xcccc, 0x2000 + crate::WORD_SIZE, 0x9000];
        (container, descriptor)
    }

    #[test]
    fn reads_follow_layout_order() {
        let (container, descriptor) = fixture();
        let views = [
            WordView::at(Address(0x1000), &container),
            WordView::at(Address(0x2000), &descriptor),
        ];
        let mut rec = Recorder::default();
        Decoder::new(&views[..])
            .with_sink(&mut rec)
            .value_container(Address(0x1000))
            .unwrap();
        let fields: Vec<Field> = rec.0.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            [
                Field::ValueA,
                Field::ValueB,
                Field::ValueC,
                Field::Descriptor,
                Field::ValueWitnessTable,
                Field::Kind,
                Field::CapabilityTable,
            ]
        );
        let offsets: Vec<isize> = rec.0.iter().map(|e| e.offset.0).collect();
        assert_eq!(offsets, [0, 1, 2, 3, -1, 0, 4]);
        assert_eq!(rec.0[4].address, Address(0x2000));
        assert_eq!(rec.0[4].word, 0xdead0);
    }

    #[test]
    fn strict_rejects_null_witness_before_capability_read() {
        let descriptor = [0, 0x200];
        let container = [1, 2, 3, 0x2000 + crate::WORD_SIZE, 0x9000];
        let views = [
            WordView::at(Address(0x1000), &container),
            WordView::at(Address(0x2000), &descriptor),
        ];
        let mut rec = Recorder::default();
        let err = Decoder::new(&views[..])
            .with_sink(&mut rec)
            .value_container_strict(Address(0x1000))
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::ImplausibleDescriptor {
                address: Address(0x2000 + crate::WORD_SIZE),
                value_witness_table: Address::NULL,
            }
        );
        assert!(rec.0.iter().all(|e| e.field != Field::CapabilityTable));
    }

    #[test]
    fn fail_open_accepts_what_strict_rejects() {
        let descriptor = [0, 0x200];
        let view = WordView::at(Address(0x2000), &descriptor);
        let at = view.address_of(1);
        assert!(Decoder::new(&view).type_descriptor(at).is_ok());
        assert!(Decoder::new(&view).type_descriptor_strict(at).is_err());
    }

    #[test]
    fn explicit_layout_is_used() {
        let descriptor = [0x8000, 0x200];
        let view = WordView::at(Address(0x2000), &descriptor);
        let decoder = Decoder::new(&view).with_layout(AbiLayout::for_version(AbiVersion::Stable5));
        assert_eq!(decoder.layout(), &AbiLayout::STABLE_5);
    }
}
