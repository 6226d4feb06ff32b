// Copyright 2026 the ABI Mirror Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classification of the descriptor kind discriminant.
//!
//! Only the tag is interpreted. Kind-specific payload that follows the header is not decoded;
//! unrecognized tags are kept verbatim in [`TypeKind::Other`].

use core::fmt;

use crate::word::Word;

/// Flag bits carried inside a kind discriminant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct KindFlags(Word);

impl KindFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// Kind is private to the runtime.
    pub const RUNTIME_PRIVATE: Self = Self(0x100);
    /// Kind does not describe a heap object.
    pub const NON_HEAP: Self = Self(0x200);
    /// Kind does not describe a type.
    pub const NON_TYPE: Self = Self(0x400);

    const ALL: Word = Self::RUNTIME_PRIVATE.0 | Self::NON_HEAP.0 | Self::NON_TYPE.0;

    /// Extracts the flag bits from a raw discriminant.
    #[must_use]
    #[inline]
    pub const fn from_raw(raw: Word) -> Self {
        Self(raw & Self::ALL)
    }

    /// Returns the flag bits.
    #[must_use]
    #[inline]
    pub const fn bits(self) -> Word {
        self.0
    }

    /// Returns `true` if this set contains every bit in `other`.
    #[must_use]
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

/// The general shape of a type, decoded from its descriptor's kind tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Class (`0x0`).
    Class,
    /// Struct (`0x200`).
    Struct,
    /// Enum (`0x201`).
    Enum,
    /// Optional (`0x202`).
    Optional,
    /// Foreign class (`0x203`).
    ForeignClass,
    /// Opaque (`0x300`).
    Opaque,
    /// Tuple (`0x301`).
    Tuple,
    /// Function (`0x302`).
    Function,
    /// Polymorphic value container (`0x303`).
    Existential,
    /// Metatype (`0x304`).
    Metatype,
    /// Objective-C class wrapper (`0x305`).
    ObjcClassWrapper,
    /// Existential metatype (`0x306`).
    ExistentialMetatype,
    /// Heap local variable (`0x400`).
    HeapLocalVariable,
    /// Heap generic local variable (`0x500`).
    HeapGenericLocalVariable,
    /// Error object (`0x501`).
    ErrorObject,
    /// Any other tag, kept as read.
    Other(Word),
}

impl TypeKind {
    /// Classifies a raw discriminant.
    #[must_use]
    pub const fn from_raw(raw: Word) -> Self {
        match raw {
            0x000 => Self::Class,
            0x200 => Self::Struct,
            0x201 => Self::Enum,
            0x202 => Self::Optional,
            0x203 => Self::ForeignClass,
            0x300 => Self::Opaque,
            0x301 => Self::Tuple,
            0x302 => Self::Function,
            0x303 => Self::Existential,
            0x304 => Self::Metatype,
            0x305 => Self::ObjcClassWrapper,
            0x306 => Self::ExistentialMetatype,
            0x400 => Self::HeapLocalVariable,
            0x500 => Self::HeapGenericLocalVariable,
            0x501 => Self::ErrorObject,
            other => Self::Other(other),
        }
    }

    /// Returns the raw discriminant.
    #[must_use]
    pub const fn raw(self) -> Word {
        match self {
            Self::Class => 0x000,
            Self::Struct => 0x200,
            Self::Enum => 0x201,
            Self::Optional => 0x202,
            Self::ForeignClass => 0x203,
            Self::Opaque => 0x300,
            Self::Tuple => 0x301,
            Self::Function => 0x302,
            Self::Existential => 0x303,
            Self::Metatype => 0x304,
            Self::ObjcClassWrapper => 0x305,
            Self::ExistentialMetatype => 0x306,
            Self::HeapLocalVariable => 0x400,
            Self::HeapGenericLocalVariable => 0x500,
            Self::ErrorObject => 0x501,
            Self::Other(raw) => raw,
        }
    }

    /// Flag bits of the discriminant.
    #[must_use]
    #[inline]
    pub const fn flags(self) -> KindFlags {
        KindFlags::from_raw(self.raw())
    }

    /// Returns `false` for [`TypeKind::Other`].
    #[must_use]
    #[inline]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Lowercase name, or `"other"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Optional => "optional",
            Self::ForeignClass => "foreign class",
            Self::Opaque => "opaque",
            Self::Tuple => "tuple",
            Self::Function => "function",
            Self::Existential => "existential",
            Self::Metatype => "metatype",
            Self::ObjcClassWrapper => "objc class wrapper",
            Self::ExistentialMetatype => "existential metatype",
            Self::HeapLocalVariable => "heap local variable",
            Self::HeapGenericLocalVariable => "heap generic local variable",
            Self::ErrorObject => "error object",
            Self::Other(_) => "other",
        }
    }
}

impl From<Word> for TypeKind {
    fn from(raw: Word) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(raw) => write!(f, "other({raw:#x})"),
            known => f.write_str(known.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn known_tags_roundtrip_through_raw() {
        for raw in [
            0x000, 0x200, 0x201, 0x202, 0x203, 0x300, 0x301, 0x302, 0x303, 0x304, 0x305, 0x306,
            0x400, 0x500, 0x501,
        ] {
            let kind = TypeKind::from_raw(raw);
            assert!(kind.is_known(), "{raw:#x} should be known");
            assert_eq!(kind.raw(), raw);
        }
    }

    #[test]
    fn unknown_tags_are_preserved() {
        let kind = TypeKind::from_raw(0x7ff);
        assert_eq!(kind, TypeKind::Other(0x7ff));
        assert_eq!(kind.raw(), 0x7ff);
        assert!(!kind.is_known());
    }

    #[test]
    fn flags_follow_the_tag_bits() {
        assert!(TypeKind::Struct.flags().contains(KindFlags::NON_HEAP));
        assert!(!TypeKind::Struct.flags().contains(KindFlags::RUNTIME_PRIVATE));
        let existential = TypeKind::Existential.flags();
        assert!(existential.contains(KindFlags::NON_HEAP));
        assert!(existential.contains(KindFlags::RUNTIME_PRIVATE));
        assert!(TypeKind::ErrorObject.flags().contains(KindFlags::NON_TYPE));
        assert_eq!(TypeKind::Class.flags(), KindFlags::NONE);
    }

    #[test]
    fn display_names_known_kinds_and_hex_for_others() {
        assert_eq!(TypeKind::Struct.to_string(), "struct");
        assert_eq!(TypeKind::Other(0x7ff).to_string(), "other(0x7ff)");
        assert_eq!(TypeKind::from_raw(0x02).to_string(), "other(0x2)");
    }
}
