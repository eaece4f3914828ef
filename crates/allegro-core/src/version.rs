//! File version gates.
//!
//! The version is the file magic with its low byte masked off. The thresholds
//! below are raw numeric breakpoints taken from observed files; they do not map
//! cleanly onto product releases and are kept as literals.
//!
//! Every version-dependent field of every record is listed once in the
//! [`Field`] table together with the [`VersionRange`] in which it is present.
//! A [`FieldPlan`] evaluates that table once per decode, so record decoders
//! never compare versions themselves.

use std::fmt;

/// The derived numeric file version (`magic & 0xFFFF_FF00`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionGate(u32);

impl VersionGate {
    /// Creates a gate from an already derived version number
    pub fn new(version: u32) -> Self {
        Self(version)
    }

    /// Derives the version from the file magic
    pub fn from_magic(magic: u32) -> Self {
        Self(magic & 0xFFFF_FF00)
    }

    /// The raw version number
    pub fn value(self) -> u32 {
        self.0
    }

    /// `version >= v`
    pub fn at_least(self, v: u32) -> bool {
        self.0 >= v
    }

    /// `version < v`
    pub fn less_than(self, v: u32) -> bool {
        self.0 < v
    }

    /// `lo <= version < hi`
    pub fn in_range(self, lo: u32, hi: u32) -> bool {
        self.at_least(lo) && self.less_than(hi)
    }
}

impl fmt::Display for VersionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#08x}", self.0)
    }
}

/// The versions in which a field is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionRange {
    /// Present from this version on
    AtLeast(u32),
    /// Present only before this version
    Below(u32),
    /// Present in `lo..hi`
    Between(u32, u32),
}

impl VersionRange {
    /// Whether a file of the given version carries the field
    pub fn admits(self, gate: VersionGate) -> bool {
        match self {
            VersionRange::AtLeast(v) => gate.at_least(v),
            VersionRange::Below(v) => gate.less_than(v),
            VersionRange::Between(lo, hi) => gate.in_range(lo, hi),
        }
    }
}

macro_rules! field_plan {
    ($($(#[$doc:meta])* $name:ident => $range:expr;)+) => {
        /// A version-dependent record field
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(usize)]
        pub enum Field {
            $($(#[$doc])* $name,)+
        }

        impl Field {
            /// Every gated field, in table order
            pub const ALL: &'static [Field] = &[$(Field::$name,)+];

            /// The versions in which this field is present
            pub const fn range(self) -> VersionRange {
                match self {
                    $(Field::$name => $range,)+
                }
            }
        }
    };
}

use VersionRange::{AtLeast, Below, Between};

field_plan! {
    /// 0x01 word before the width
    ArcExtra => AtLeast(1311744);
    /// 0x03 word before the subtype header
    FieldExtra => AtLeast(1311744);
    /// 0x04 trailing word
    NetAssignmentTrailer => AtLeast(1311744);
    /// 0x05 word before the first segment
    TrackExtra => AtLeast(1311744);
    /// 0x06 trailing word
    ComponentTrailer => AtLeast(1311744);
    /// 0x07 word after `next`
    InstanceExtra => AtLeast(1311744);
    /// 0x07 word after the footprint instance
    InstanceLegacy => Below(1311744);
    /// 0x08 name stored before `previous`
    PinNumberNameFirst => Below(1311744);
    /// 0x08 name stored after `previous`
    PinNumberNameLast => AtLeast(1311744);
    /// 0x08 trailing word
    PinNumberTrailer => AtLeast(1311744);
    /// 0x09 word after the opaque block
    X09Extra => AtLeast(1311744);
    /// 0x09 trailing word
    X09Trailer => AtLeast(1313024);
    /// 0x0A word before the bounding box
    DrcExtra => AtLeast(1311744);
    /// 0x0A trailing word
    DrcTrailer => AtLeast(1313024);
    /// 0x0C word before the shape
    PinDefExtra => AtLeast(1311744);
    /// 0x0C trailing word
    PinDefTrailer => AtLeast(1313024);
    /// 0x0D word after `next`
    PadExtra => AtLeast(1311744);
    /// 0x0D word before the flags
    PadFlagsPrefix => AtLeast(1311744);
    /// 0x0E trailing pair
    X0eTrailer => AtLeast(1311744);
    /// 0x0F word after the function pointer
    FunctionSlotExtra => AtLeast(1311744);
    /// 0x0F trailing word
    FunctionSlotTrailer => AtLeast(1313024);
    /// 0x10 word after the key
    FunctionInstanceExtra => AtLeast(1311744);
    /// 0x11 trailing word
    PinNameTrailer => AtLeast(1313024);
    /// 0x12 first trailing word
    XrefExtra => AtLeast(1249280);
    /// 0x12 second trailing word
    XrefTrailer => AtLeast(1313024);
    /// 0x14 word before the first segment
    GraphicExtra => AtLeast(1311744);
    /// 0x15/0x16/0x17 word before the width
    SegmentExtra => AtLeast(1311744);
    /// 0x1B word before the net kind
    NetExtra => AtLeast(1311744);
    /// 0x1C opaque block before the layer count
    PadstackExtra => AtLeast(1311744);
    /// 0x1C per-layer words after the components
    PadstackLayerWords => AtLeast(1311744);
    /// 0x1C wide component table (`21 + layers * 4` entries)
    PadstackWideTable => AtLeast(1311744);
    /// Padstack component word after the flag bytes
    PadstackComponentExtra => AtLeast(1311744);
    /// Padstack component trailing word
    PadstackComponentLegacy => Below(1311744);
    /// 0x1D word pairs per `size_a` entry
    ConstraintSetExtra => AtLeast(1311744);
    /// 0x1F block of `size * 384 + 8` bytes
    DimensionsWide => AtLeast(1316096);
    /// 0x1F block of `size * 280 + 8` bytes
    DimensionsLong => Between(1311744, 1316096);
    /// 0x1F block of `size * 280 + 4` bytes
    DimensionsMedium => Between(1246208, 1311744);
    /// 0x20 trailing words
    X20Trailer => AtLeast(1313024);
    /// 0x22 word after the key
    X22Extra => AtLeast(1311744);
    /// 0x23 opaque block after the bounding box
    RatlineExtra => AtLeast(1248256);
    /// 0x23 trailing word
    RatlineTrailer => AtLeast(1313024);
    /// 0x24 word before the bounding box
    RectExtra => AtLeast(1311744);
    /// 0x26 word after the member
    MatchExtra => AtLeast(1311744);
    /// 0x26 trailing word
    MatchTrailer => AtLeast(1313024);
    /// 0x28 pair before the first segment
    ShapeExtra => AtLeast(1311744);
    /// 0x29 trailing word
    X29Trailer => AtLeast(1310720);
    /// 0x2A word after the entry count
    LayerListExtra => AtLeast(1313024);
    /// 0x2A entries stored as fixed 36-byte names
    LayerListNamed => Below(1249280);
    /// 0x2B first trailing word
    FootprintDefExtra => AtLeast(1248256);
    /// 0x2B second trailing word
    FootprintDefTrailer => AtLeast(1311744);
    /// 0x2C words after `next`
    TableExtra => AtLeast(1311744);
    /// 0x2C word after the name
    TableLegacy => Below(1311744);
    /// 0x2D word after `next`
    FootprintInstanceExtra => AtLeast(1313024);
    /// 0x2D instance reference before the rotation
    FootprintInstanceRefFirst => Below(1311744);
    /// 0x2D instance reference after the position
    FootprintInstanceRefLast => AtLeast(1311744);
    /// 0x2E trailing word
    X2eExtra => AtLeast(1311744);
    /// 0x30 pair after `next`
    StringWrapperExtra => AtLeast(1311744);
    /// 0x30 text properties before the graphic pointer
    StringWrapperFontFirst => Below(1311744);
    /// 0x30 text properties after the graphic pointer
    StringWrapperFontLast => AtLeast(1311744);
    /// 0x31 word before the text
    StringGraphicExtra => AtLeast(1313024);
    /// 0x32 `prev` pointer
    PlacedPadPrev => AtLeast(1311744);
    /// 0x33 words around the first pointer
    ViaExtra => AtLeast(1311744);
    /// 0x34 word before the flags
    KeepoutExtra => AtLeast(1311744);
    /// 0x36 word after `next`
    DefTableExtra => AtLeast(1311744);
    /// 0x36 word after the item header
    DefTableTrailer => AtLeast(1313024);
    /// 0x36 code 0x02 words after the fixed block
    DefItem02Extra => AtLeast(1248256);
    /// 0x36 code 0x02 trailing pair
    DefItem02Trailer => AtLeast(1311744);
    /// 0x36 code 0x03 64-byte name
    DefItem03LongName => AtLeast(1313024);
    /// 0x36 code 0x03 trailing word
    DefItem03Extra => AtLeast(1311744);
    /// 0x36 code 0x05 trailing pointer
    DefItem05Pointer => AtLeast(1313024);
    /// 0x36 code 0x06 opaque block
    DefItem06Legacy => Below(1311744);
    /// 0x36 code 0x08 word after the character size
    DefFontExtra => AtLeast(1313024);
    /// 0x36 code 0x08 trailing words
    DefFontTail => AtLeast(1311744);
    /// 0x36 code 0x0D trailing words
    DefItem0dExtra => AtLeast(1313024);
    /// 0x36 code 0x10 trailing words
    DefItem10Extra => AtLeast(1311744);
    /// 0x37 trailing word
    PointerArrayTrailer => AtLeast(1313024);
    /// 0x38 name stored as a fixed 20-byte string
    FilmFixedName => Below(1250560);
    /// 0x38 trailing word
    FilmTrailer => AtLeast(1313024);
    /// 0x3A trailing word
    FilmLayerNodeTrailer => AtLeast(1313024);
    /// 0x3B word before the value
    PropertyDefExtra => AtLeast(1311744);
    /// 0x3C word before the count
    KeyListExtra => AtLeast(1313024);
}

/// The field table evaluated against one file version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlan {
    gate: VersionGate,
    present: Vec<bool>,
}

impl FieldPlan {
    /// Evaluates every table entry for `gate`
    pub fn resolve(gate: VersionGate) -> Self {
        let present = Field::ALL.iter().map(|f| f.range().admits(gate)).collect();
        Self { gate, present }
    }

    /// The version this plan was resolved for
    pub fn gate(&self) -> VersionGate {
        self.gate
    }

    /// Whether the field is present in this file
    #[inline]
    pub fn has(&self, field: Field) -> bool {
        self.present[field as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_magic_masks_low_byte() {
        let gate = VersionGate::from_magic(0x0014_0407);
        assert_eq!(gate.value(), 0x0014_0400);
        assert_eq!(gate.value(), 1311744);
    }

    #[test]
    fn test_comparisons() {
        let gate = VersionGate::new(1311744);
        assert!(gate.at_least(1311744));
        assert!(!gate.at_least(1313024));
        assert!(gate.less_than(1313024));
        assert!(!gate.less_than(1311744));
        assert!(gate.in_range(1311744, 1316096));
        assert!(!gate.in_range(1246208, 1311744));
    }

    #[test]
    fn test_table_order_matches_discriminants() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(*field as usize, i, "{:?} out of order", field);
        }
    }

    #[test]
    fn test_plan_switches_at_threshold() {
        let before = FieldPlan::resolve(VersionGate::new(1311744 - 0x100));
        let after = FieldPlan::resolve(VersionGate::new(1311744));
        assert!(!before.has(Field::ArcExtra));
        assert!(after.has(Field::ArcExtra));
        assert!(before.has(Field::PinNumberNameFirst));
        assert!(!after.has(Field::PinNumberNameFirst));
        assert!(after.has(Field::PinNumberNameLast));
    }

    #[test]
    fn test_exclusive_pairs_never_overlap() {
        let pairs = [
            (Field::PinNumberNameFirst, Field::PinNumberNameLast),
            (Field::FootprintInstanceRefFirst, Field::FootprintInstanceRefLast),
            (Field::StringWrapperFontFirst, Field::StringWrapperFontLast),
            (Field::DimensionsWide, Field::DimensionsLong),
            (Field::DimensionsLong, Field::DimensionsMedium),
        ];
        for version in [
            0x0013_0000,
            1246208,
            1248256,
            1249280,
            1250560,
            1310720,
            1311744,
            1313024,
            1316096,
        ] {
            let plan = FieldPlan::resolve(VersionGate::new(version));
            for (a, b) in pairs {
                assert!(!(plan.has(a) && plan.has(b)), "{:?}/{:?} at {}", a, b, version);
            }
            assert!(
                plan.has(Field::PinNumberNameFirst) ^ plan.has(Field::PinNumberNameLast),
                "pin number name missing at {}",
                version
            );
        }
    }
}
