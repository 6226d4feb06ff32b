// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout table drives every offset; a custom table must move every read accordingly.

use abi_mirror::{
    AbiLayout, Address, Decoder, LayoutError, TypeDescriptor, WORD_SIZE, WordOffset, WordView,
};

#[test]
fn current_table_matches_documented_offsets() {
    let l = AbiLayout::CURRENT;
    assert_eq!(l.descriptor_value_witness_table, WordOffset(-1));
    assert_eq!(l.descriptor_kind, WordOffset(0));
    assert_eq!(l.container_inline_buffer, WordOffset(0));
    assert_eq!(l.container_descriptor, WordOffset(3));
    assert_eq!(l.container_capability_table, WordOffset(4));
    assert_eq!(l.validate(), Ok(()));
}

#[test]
fn shifted_container_table_moves_every_read() {
    // A hypothetical revision with a header word in front of the inline buffer.
    let shifted = AbiLayout {
        container_inline_buffer: WordOffset(1),
        container_descriptor: WordOffset(4),
        container_capability_table: WordOffset(5),
        ..AbiLayout::CURRENT
    };
    assert_eq!(shifted.validate(), Ok(()));

    let descriptor = [0x7000, 0x200];
    let dview = WordView::at(Address(0x2000), &descriptor);
    let container = [0xffff, 1, 2, 3, dview.address_of(1).get(), 0x9000];
    let views = [WordView::at(Address(0x1000), &container), dview];

    let c = Decoder::new(&views[..])
        .with_layout(shifted)
        .value_container(Address(0x1000))
        .unwrap();
    assert_eq!(c.inline_buffer(), [1, 2, 3]);
    assert_eq!(
        c.descriptor,
        TypeDescriptor {
            value_witness_table: Address(0x7000),
            raw_kind: 0x200,
        }
    );
    assert_eq!(c.capability_table, Address(0x9000));
}

#[test]
fn invalid_tables_are_rejected() {
    let err = AbiLayout {
        descriptor_kind: WordOffset(1),
        ..AbiLayout::CURRENT
    }
    .validate()
    .unwrap_err();
    assert!(matches!(err, LayoutError::WitnessNotBeforeKind { .. }));
    assert!(err.to_string().contains("immediately precede"));
}

#[test]
fn word_size_is_pointer_width() {
    assert_eq!(WORD_SIZE, size_of::<*const ()>());
}
