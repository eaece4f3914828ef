//! Composite values embedded in many records.

use super::{Decode, DecodeContext};
use crate::cursor::Cursor;
use crate::error::Result;

/// A point in board units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Coords {
    /// Horizontal position
    pub x: i32,
    /// Vertical position
    pub y: i32,
}

impl Decode for Coords {
    fn decode(cur: &mut Cursor<'_>, _ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            x: cur.read_i32()?,
            y: cur.read_i32()?,
        })
    }
}

/// An opaque fixed-point pair.
///
/// Used for arc centres and radii. Equality is on the raw words, which are
/// the authoritative value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CadenceFp {
    /// First stored word
    pub a: u32,
    /// Second stored word
    pub b: u32,
}

impl CadenceFp {
    /// Reads the pair as an IEEE-754 double with `a` as the high word.
    ///
    /// This interpretation is unverified against real files. Callers that
    /// need exact values should use `a` and `b`.
    pub fn to_f64(self) -> f64 {
        f64::from_bits((u64::from(self.a) << 32) | u64::from(self.b))
    }
}

impl Decode for CadenceFp {
    fn decode(cur: &mut Cursor<'_>, _ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            a: cur.read_u32()?,
            b: cur.read_u32()?,
        })
    }
}

/// Layer class byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerClass {
    /// Board outline and mechanical geometry (0x01)
    BoardGeometry,
    /// Conductor layers (0x06)
    Etch,
    /// Manufacturing artwork (0x07)
    Manufacturing,
    /// Footprint geometry (0x09)
    PackageGeometry,
    /// Reference designators (0x0D)
    RefDes,
    /// Any other class, kept raw
    Other(u8),
}

impl LayerClass {
    /// Class byte of [`LayerClass::BoardGeometry`]
    pub const BOARD_GEOMETRY: u8 = 0x01;
    /// Class byte of [`LayerClass::Etch`]
    pub const ETCH: u8 = 0x06;
    /// Class byte of [`LayerClass::Manufacturing`]
    pub const MANUFACTURING: u8 = 0x07;
    /// Class byte of [`LayerClass::PackageGeometry`]
    pub const PACKAGE_GEOMETRY: u8 = 0x09;
    /// Class byte of [`LayerClass::RefDes`]
    pub const REF_DES: u8 = 0x0D;

    /// The byte this class was decoded from
    pub fn raw(self) -> u8 {
        match self {
            LayerClass::BoardGeometry => Self::BOARD_GEOMETRY,
            LayerClass::Etch => Self::ETCH,
            LayerClass::Manufacturing => Self::MANUFACTURING,
            LayerClass::PackageGeometry => Self::PACKAGE_GEOMETRY,
            LayerClass::RefDes => Self::REF_DES,
            LayerClass::Other(b) => b,
        }
    }
}

impl From<u8> for LayerClass {
    fn from(value: u8) -> Self {
        match value {
            Self::BOARD_GEOMETRY => LayerClass::BoardGeometry,
            Self::ETCH => LayerClass::Etch,
            Self::MANUFACTURING => LayerClass::Manufacturing,
            Self::PACKAGE_GEOMETRY => LayerClass::PackageGeometry,
            Self::REF_DES => LayerClass::RefDes,
            other => LayerClass::Other(other),
        }
    }
}

/// Named sub-layers shared by the geometry, manufacturing and refdes classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subclass {
    /// 0xF0
    DisplayBottom,
    /// 0xF1
    DisplayTop,
    /// 0xF2
    SilkscreenBottom,
    /// 0xF3
    SilkscreenTop,
    /// 0xF4
    PlaceBoundBottom,
    /// 0xF5
    PlaceBoundTop,
    /// 0xF6
    AssemblyBottom,
    /// 0xF7
    AssemblyTop,
    /// 0xFA
    Dimension,
    /// 0xFD
    Outline,
    /// Any other subclass, kept raw
    Other(u8),
}

impl Subclass {
    const TABLE: [(u8, Subclass); 10] = [
        (0xF0, Subclass::DisplayBottom),
        (0xF1, Subclass::DisplayTop),
        (0xF2, Subclass::SilkscreenBottom),
        (0xF3, Subclass::SilkscreenTop),
        (0xF4, Subclass::PlaceBoundBottom),
        (0xF5, Subclass::PlaceBoundTop),
        (0xF6, Subclass::AssemblyBottom),
        (0xF7, Subclass::AssemblyTop),
        (0xFA, Subclass::Dimension),
        (0xFD, Subclass::Outline),
    ];

    /// The byte this subclass was decoded from
    pub fn raw(self) -> u8 {
        match self {
            Subclass::Other(b) => b,
            named => Self::TABLE
                .iter()
                .find(|(_, s)| *s == named)
                .map(|(b, _)| *b)
                .unwrap_or_default(),
        }
    }
}

impl From<u8> for Subclass {
    fn from(value: u8) -> Self {
        Self::TABLE
            .iter()
            .find(|(b, _)| *b == value)
            .map(|(_, s)| *s)
            .unwrap_or(Subclass::Other(value))
    }
}

/// Subclass, interpreted according to the layer class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerSubclass {
    /// Sub-layer of [`LayerClass::BoardGeometry`]
    BoardGeometry(Subclass),
    /// Conductor layer index
    Etch(u8),
    /// Sub-layer of [`LayerClass::Manufacturing`]
    Manufacturing(Subclass),
    /// Sub-layer of [`LayerClass::PackageGeometry`]
    PackageGeometry(Subclass),
    /// Sub-layer of [`LayerClass::RefDes`]
    RefDes(Subclass),
    /// Subclass of a class without named sub-layers
    Raw(u8),
}

/// A class/subclass layer reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerInfo {
    /// Layer class
    pub class: LayerClass,
    /// Sub-layer within the class
    pub subclass: LayerSubclass,
}

impl LayerInfo {
    /// Interprets a class and subclass byte pair
    pub fn from_bytes(class: u8, subclass: u8) -> Self {
        let class = LayerClass::from(class);
        let subclass = match class {
            LayerClass::BoardGeometry => LayerSubclass::BoardGeometry(subclass.into()),
            LayerClass::Etch => LayerSubclass::Etch(subclass),
            LayerClass::Manufacturing => LayerSubclass::Manufacturing(subclass.into()),
            LayerClass::PackageGeometry => LayerSubclass::PackageGeometry(subclass.into()),
            LayerClass::RefDes => LayerSubclass::RefDes(subclass.into()),
            LayerClass::Other(_) => LayerSubclass::Raw(subclass),
        };
        Self { class, subclass }
    }
}

impl Default for LayerInfo {
    fn default() -> Self {
        Self::from_bytes(0, 0)
    }
}

impl Decode for LayerInfo {
    fn decode(cur: &mut Cursor<'_>, _ctx: &DecodeContext) -> Result<Self> {
        let class = cur.read_u8()?;
        let subclass = cur.read_u8()?;
        Ok(Self::from_bytes(class, subclass))
    }
}

/// Horizontal text justification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    /// 1
    Left,
    /// 2
    Right,
    /// 3
    Center,
    /// Any other value, kept raw
    Other(u8),
}

impl From<u8> for TextAlignment {
    fn from(value: u8) -> Self {
        match value {
            1 => TextAlignment::Left,
            2 => TextAlignment::Right,
            3 => TextAlignment::Center,
            other => TextAlignment::Other(other),
        }
    }
}

/// Reading direction of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextReversal {
    /// 0
    Straight,
    /// 1
    Reversed,
    /// Any other value, kept raw
    Other(u8),
}

impl From<u8> for TextReversal {
    fn from(value: u8) -> Self {
        match value {
            0 => TextReversal::Straight,
            1 => TextReversal::Reversed,
            other => TextReversal::Other(other),
        }
    }
}

/// Font and placement flags of a text wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextProperties {
    /// Index into the font definition table
    pub key: u8,
    /// High seven bits of the flag byte
    pub unknown_flags: u8,
    /// Low bit of the flag byte
    pub mirrored: bool,
    /// Justification
    pub alignment: TextAlignment,
    /// Reading direction
    pub reversal: TextReversal,
}

impl Decode for TextProperties {
    fn decode(cur: &mut Cursor<'_>, _ctx: &DecodeContext) -> Result<Self> {
        let key = cur.read_u8()?;
        let unknown_flags = cur.read_bits(7)? as u8;
        let mirrored = cur.read_bit()?;
        cur.align_to_byte();
        let alignment = cur.read_u8()?.into();
        let reversal = cur.read_u8()?.into();
        Ok(Self {
            key,
            unknown_flags,
            mirrored,
            alignment,
            reversal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_context;
    use pretty_assertions::{assert_eq, assert_ne};

    fn layer(class: u8, subclass: u8) -> LayerInfo {
        let data = [class, subclass];
        let mut cur = Cursor::new(&data);
        LayerInfo::decode(&mut cur, &test_context(1311744)).unwrap()
    }

    #[test]
    fn test_layer_subclass_dispatch() {
        assert_eq!(
            layer(0x01, 0xFD).subclass,
            LayerSubclass::BoardGeometry(Subclass::Outline)
        );
        assert_eq!(
            layer(0x09, 0xF7).subclass,
            LayerSubclass::PackageGeometry(Subclass::AssemblyTop)
        );
        assert_eq!(
            layer(0x07, 0xF3).subclass,
            LayerSubclass::Manufacturing(Subclass::SilkscreenTop)
        );
        assert_eq!(layer(0x06, 0x03).subclass, LayerSubclass::Etch(3));
        assert_eq!(
            layer(0x0D, 0xF2).subclass,
            LayerSubclass::RefDes(Subclass::SilkscreenBottom)
        );
    }

    #[test]
    fn test_layer_raw_fallbacks() {
        let info = layer(0x0D, 0x42);
        assert_eq!(info.class, LayerClass::RefDes);
        assert_eq!(info.subclass, LayerSubclass::RefDes(Subclass::Other(0x42)));

        let info = layer(0x13, 0xF3);
        assert_eq!(info.class, LayerClass::Other(0x13));
        assert_eq!(info.subclass, LayerSubclass::Raw(0xF3));
    }

    #[test]
    fn test_raw_bytes_round_trip_through_names() {
        for b in 0..=u8::MAX {
            assert_eq!(Subclass::from(b).raw(), b);
            assert_eq!(LayerClass::from(b).raw(), b);
        }
    }

    #[test]
    fn test_text_properties_flag_bits() {
        let data = [0x05, 0b1000_0011, 0x03, 0x01];
        let mut cur = Cursor::new(&data);
        let props = TextProperties::decode(&mut cur, &test_context(1311744)).unwrap();
        assert_eq!(props.key, 5);
        assert_eq!(props.unknown_flags, 0b100_0001);
        assert!(props.mirrored);
        assert_eq!(props.alignment, TextAlignment::Center);
        assert_eq!(props.reversal, TextReversal::Reversed);
        assert_eq!(cur.position(), 4);
    }

    #[test]
    fn test_cadence_fp_value() {
        let bits = 2.5f64.to_bits();
        let fp = CadenceFp {
            a: (bits >> 32) as u32,
            b: bits as u32,
        };
        assert_eq!(fp.to_f64(), 2.5);
    }

    #[test]
    fn test_cadence_fp_compares_raw_words() {
        let nan_a = CadenceFp {
            a: 0x7FF8_0000,
            b: 1,
        };
        let nan_b = CadenceFp {
            a: 0x7FF8_0000,
            b: 2,
        };
        assert!(nan_a.to_f64().is_nan());
        assert_eq!(nan_a, nan_a);
        assert_ne!(nan_a, nan_b);
    }
}
