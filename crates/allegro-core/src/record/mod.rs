//! Object records.
//!
//! Every object in the stream starts with a type byte that selects a fixed,
//! version-dependent layout. There is no length prefix, so each record decoder
//! must consume exactly the bytes of its own record: a single wrong field
//! shifts every following object.
//!
//! ## Decoding
//!
//! Records implement [`Decode`], a pure function of the cursor and a
//! [`DecodeContext`]. The context replaces any reference back to the file
//! header: it carries the resolved [`FieldPlan`] and the few header values a
//! record layout depends on.
//!
//! ## Keys
//!
//! Most records carry a [`Key`] that other records use as a pointer, and chain
//! members carry a `next` key. [`Record::key`] and [`Record::next`] expose
//! both uniformly; the keyless cases are [`CsTrailer`], [`FileTemplate`] and
//! [`PropertyDef`].

mod common;
mod connectivity;
mod geometry;
mod padstack;
mod tables;

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::version::{Field, FieldPlan, VersionGate};
use std::fmt;

pub use common::{
    CadenceFp, Coords, LayerClass, LayerInfo, LayerSubclass, Subclass, TextAlignment,
    TextProperties, TextReversal,
};
pub use connectivity::{
    Component, ComponentInstance, FootprintDef, FootprintInstance, FunctionInstance,
    FunctionSlot, Match, Net, NetAssignment, Pad, PinDefinition, PinName, PinNumber, PlacedPad,
    Track, Via, Xref,
};
pub use geometry::{
    Arc, DrcMarker, Graphic, Keepout, Ratline, Rect, Segment, Shape, StringGraphic,
    StringWrapper, X0e,
};
pub use padstack::{Padstack, PadstackComponent, PadstackDimensions};
pub use tables::{
    Attribute, AttributeValue, Blob, ConstraintSet, CsTrailer, DefinitionItem, DefinitionTable,
    FileTemplate, Film, FilmLayerList, FilmLayerListNode, FilmName, FontDef, KeyList,
    LayerEntry, LayerList, PointerArray, PropertyDef, SignalModel, Table, X09, X20, X22, X29,
    X2e, X2f,
};

/// An object identifier used in place of a pointer.
///
/// `Key(0)` is the null terminator and never names an object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(pub u32);

impl Key {
    /// The null key
    pub const NULL: Key = Key(0);

    /// Whether this is the null key
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Per-decode state shared by every record decoder
#[derive(Debug, Clone)]
pub struct DecodeContext {
    plan: FieldPlan,
    x27_end_offset: u32,
}

impl DecodeContext {
    /// Resolves the field plan for `gate`
    pub fn new(gate: VersionGate, x27_end_offset: u32) -> Self {
        Self {
            plan: FieldPlan::resolve(gate),
            x27_end_offset,
        }
    }

    /// The file version
    pub fn gate(&self) -> VersionGate {
        self.plan.gate()
    }

    /// Whether this file carries the gated field
    #[inline]
    pub fn has(&self, field: Field) -> bool {
        self.plan.has(field)
    }

    /// End offset of the 0x27 block, from the header
    pub fn x27_end_offset(&self) -> u32 {
        self.x27_end_offset
    }

    /// Decodes `T` only when the gated field is present
    pub fn read_if<T: Decode>(&self, field: Field, cur: &mut Cursor<'_>) -> Result<Option<T>> {
        if self.has(field) {
            T::decode(cur, self).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Completes a field that moved between versions.
    ///
    /// `early` is the value read at the old position, present only in files
    /// gated for it; otherwise the field is read here, at the `late` position.
    pub fn moved<T: Decode>(
        &self,
        early: Option<T>,
        late: Field,
        cur: &mut Cursor<'_>,
    ) -> Result<T> {
        match early {
            Some(value) => Ok(value),
            None => {
                debug_assert!(self.has(late), "{:?} missing at both positions", late);
                T::decode(cur, self)
            }
        }
    }
}

/// Decoding of a value at the cursor
pub trait Decode: Sized {
    /// Decodes one value, consuming exactly its bytes
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self>;
}

impl Decode for u8 {
    fn decode(cur: &mut Cursor<'_>, _ctx: &DecodeContext) -> Result<Self> {
        cur.read_u8()
    }
}

impl Decode for u16 {
    fn decode(cur: &mut Cursor<'_>, _ctx: &DecodeContext) -> Result<Self> {
        cur.read_u16()
    }
}

impl Decode for u32 {
    fn decode(cur: &mut Cursor<'_>, _ctx: &DecodeContext) -> Result<Self> {
        cur.read_u32()
    }
}

impl Decode for i32 {
    fn decode(cur: &mut Cursor<'_>, _ctx: &DecodeContext) -> Result<Self> {
        cur.read_i32()
    }
}

impl Decode for Key {
    fn decode(cur: &mut Cursor<'_>, _ctx: &DecodeContext) -> Result<Self> {
        cur.read_u32().map(Key)
    }
}

impl<T: Decode + Copy + Default, const N: usize> Decode for [T; N] {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let mut out = [T::default(); N];
        for slot in out.iter_mut() {
            *slot = T::decode(cur, ctx)?;
        }
        Ok(out)
    }
}

/// Decodes a count-prefixed array whose count was already read.
pub(crate) fn decode_vec<T: Decode>(
    cur: &mut Cursor<'_>,
    ctx: &DecodeContext,
    count: usize,
) -> Result<Vec<T>> {
    // Counts come from the file; don't trust them for the allocation
    let mut items = Vec::with_capacity(count.min(cur.remaining() / 4 + 1));
    for _ in 0..count {
        items.push(T::decode(cur, ctx)?);
    }
    Ok(items)
}

/// Shorthand for `T::decode`
pub(crate) fn read<T: Decode>(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<T> {
    T::decode(cur, ctx)
}

/// One decoded object of any known type
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Type 0x01
    Arc(Arc),
    /// Type 0x03
    Attribute(Attribute),
    /// Type 0x04
    NetAssignment(NetAssignment),
    /// Type 0x05
    Track(Track),
    /// Type 0x06
    Component(Component),
    /// Type 0x07
    ComponentInstance(ComponentInstance),
    /// Type 0x08
    PinNumber(PinNumber),
    /// Type 0x09
    X09(X09),
    /// Type 0x0A
    DrcMarker(DrcMarker),
    /// Type 0x0C
    PinDefinition(PinDefinition),
    /// Type 0x0D
    Pad(Pad),
    /// Type 0x0E
    X0e(X0e),
    /// Type 0x0F
    FunctionSlot(FunctionSlot),
    /// Type 0x10
    FunctionInstance(FunctionInstance),
    /// Type 0x11
    PinName(PinName),
    /// Type 0x12
    Xref(Xref),
    /// Type 0x14
    Graphic(Graphic),
    /// 0x15, 0x16 and 0x17 share one layout
    Segment(Segment),
    /// Type 0x1B
    Net(Net),
    /// Type 0x1C
    Padstack(Padstack),
    /// Type 0x1D
    ConstraintSet(ConstraintSet),
    /// Type 0x1E
    SignalModel(SignalModel),
    /// Type 0x1F
    PadstackDimensions(PadstackDimensions),
    /// Type 0x20
    X20(X20),
    /// Type 0x21
    Blob(Blob),
    /// Type 0x22
    X22(X22),
    /// Type 0x23
    Ratline(Ratline),
    /// Type 0x24
    Rect(Rect),
    /// Type 0x26
    Match(Match),
    /// Type 0x27
    CsTrailer(CsTrailer),
    /// Type 0x28
    Shape(Shape),
    /// Type 0x29
    X29(X29),
    /// Type 0x2A
    LayerList(LayerList),
    /// Type 0x2B
    FootprintDef(FootprintDef),
    /// Type 0x2C
    Table(Table),
    /// Type 0x2D
    FootprintInstance(FootprintInstance),
    /// Type 0x2E
    X2e(X2e),
    /// Type 0x2F
    X2f(X2f),
    /// Type 0x30
    StringWrapper(StringWrapper),
    /// Type 0x31
    StringGraphic(StringGraphic),
    /// Type 0x32
    PlacedPad(PlacedPad),
    /// Type 0x33
    Via(Via),
    /// Type 0x34
    Keepout(Keepout),
    /// Type 0x35
    FileTemplate(FileTemplate),
    /// Type 0x36
    DefinitionTable(DefinitionTable),
    /// Type 0x37
    PointerArray(PointerArray),
    /// Type 0x38
    Film(Film),
    /// Type 0x39
    FilmLayerList(FilmLayerList),
    /// Type 0x3A
    FilmLayerListNode(FilmLayerListNode),
    /// Type 0x3B
    PropertyDef(PropertyDef),
    /// Type 0x3C
    KeyList(KeyList),
    /// A type byte with no known layout; never passes [`Record::validate`]
    Unknown(u8),
}

impl Record {
    /// Decodes the record selected by `type_tag`, which has already been read.
    ///
    /// `offset` is the position of the type byte, used for error reports.
    pub fn decode(
        type_tag: u8,
        offset: usize,
        cur: &mut Cursor<'_>,
        ctx: &DecodeContext,
    ) -> Result<Self> {
        let record = match type_tag {
            0x01 => Record::Arc(read(cur, ctx)?),
            0x03 => Record::Attribute(read(cur, ctx)?),
            0x04 => Record::NetAssignment(read(cur, ctx)?),
            0x05 => Record::Track(read(cur, ctx)?),
            0x06 => Record::Component(read(cur, ctx)?),
            0x07 => Record::ComponentInstance(read(cur, ctx)?),
            0x08 => Record::PinNumber(read(cur, ctx)?),
            0x09 => Record::X09(read(cur, ctx)?),
            0x0A => Record::DrcMarker(read(cur, ctx)?),
            0x0C => Record::PinDefinition(read(cur, ctx)?),
            0x0D => Record::Pad(read(cur, ctx)?),
            0x0E => Record::X0e(read(cur, ctx)?),
            0x0F => Record::FunctionSlot(read(cur, ctx)?),
            0x10 => Record::FunctionInstance(read(cur, ctx)?),
            0x11 => Record::PinName(read(cur, ctx)?),
            0x12 => Record::Xref(read(cur, ctx)?),
            0x14 => Record::Graphic(read(cur, ctx)?),
            0x15..=0x17 => Record::Segment(read(cur, ctx)?),
            0x1B => Record::Net(read(cur, ctx)?),
            0x1C => Record::Padstack(read(cur, ctx)?),
            0x1D => Record::ConstraintSet(read(cur, ctx)?),
            0x1E => Record::SignalModel(read(cur, ctx)?),
            0x1F => Record::PadstackDimensions(read(cur, ctx)?),
            0x20 => Record::X20(read(cur, ctx)?),
            0x21 => Record::Blob(read(cur, ctx)?),
            0x22 => Record::X22(read(cur, ctx)?),
            0x23 => Record::Ratline(read(cur, ctx)?),
            0x24 => Record::Rect(read(cur, ctx)?),
            0x26 => Record::Match(read(cur, ctx)?),
            0x27 => Record::CsTrailer(read(cur, ctx)?),
            0x28 => Record::Shape(read(cur, ctx)?),
            0x29 => Record::X29(read(cur, ctx)?),
            0x2A => Record::LayerList(read(cur, ctx)?),
            0x2B => Record::FootprintDef(read(cur, ctx)?),
            0x2C => Record::Table(read(cur, ctx)?),
            0x2D => Record::FootprintInstance(read(cur, ctx)?),
            0x2E => Record::X2e(read(cur, ctx)?),
            0x2F => Record::X2f(read(cur, ctx)?),
            0x30 => Record::StringWrapper(read(cur, ctx)?),
            0x31 => Record::StringGraphic(read(cur, ctx)?),
            0x32 => Record::PlacedPad(read(cur, ctx)?),
            0x33 => Record::Via(read(cur, ctx)?),
            0x34 => Record::Keepout(read(cur, ctx)?),
            0x35 => Record::FileTemplate(read(cur, ctx)?),
            0x36 => Record::DefinitionTable(read(cur, ctx)?),
            0x37 => Record::PointerArray(read(cur, ctx)?),
            0x38 => Record::Film(read(cur, ctx)?),
            0x39 => Record::FilmLayerList(read(cur, ctx)?),
            0x3A => Record::FilmLayerListNode(read(cur, ctx)?),
            0x3B => Record::PropertyDef(read(cur, ctx)?),
            0x3C => Record::KeyList(read(cur, ctx)?),
            other => Record::Unknown(other),
        };
        record.validate(offset)?;
        Ok(record)
    }

    /// Rejects the unknown-type sentinel.
    ///
    /// The format has no generic skip: an unknown type byte means the stream
    /// can no longer be followed.
    pub fn validate(&self, offset: usize) -> Result<()> {
        match self {
            Record::Unknown(type_tag) => Err(Error::UnrecognizedObjectType {
                offset,
                type_tag: *type_tag,
            }),
            _ => Ok(()),
        }
    }

    /// The record's own key, if this case has one
    pub fn key(&self) -> Option<Key> {
        let key = match self {
            Record::Arc(r) => r.key,
            Record::Attribute(r) => r.key,
            Record::NetAssignment(r) => r.key,
            Record::Track(r) => r.key,
            Record::Component(r) => r.key,
            Record::ComponentInstance(r) => r.key,
            Record::PinNumber(r) => r.key,
            Record::X09(r) => r.key,
            Record::DrcMarker(r) => r.key,
            Record::PinDefinition(r) => r.key,
            Record::Pad(r) => r.key,
            Record::X0e(r) => r.key,
            Record::FunctionSlot(r) => r.key,
            Record::FunctionInstance(r) => r.key,
            Record::PinName(r) => r.key,
            Record::Xref(r) => r.key,
            Record::Graphic(r) => r.key,
            Record::Segment(r) => r.key,
            Record::Net(r) => r.key,
            Record::Padstack(r) => r.key,
            Record::ConstraintSet(r) => r.key,
            Record::SignalModel(r) => r.key,
            Record::PadstackDimensions(r) => r.key,
            Record::X20(r) => r.key,
            Record::Blob(r) => r.key,
            Record::X22(r) => r.key,
            Record::Ratline(r) => r.key,
            Record::Rect(r) => r.key,
            Record::Match(r) => r.key,
            Record::Shape(r) => r.key,
            Record::X29(r) => r.key,
            Record::LayerList(r) => r.key,
            Record::FootprintDef(r) => r.key,
            Record::Table(r) => r.key,
            Record::FootprintInstance(r) => r.key,
            Record::X2e(r) => r.key,
            Record::X2f(r) => r.key,
            Record::StringWrapper(r) => r.key,
            Record::StringGraphic(r) => r.key,
            Record::PlacedPad(r) => r.key,
            Record::Via(r) => r.key,
            Record::Keepout(r) => r.key,
            Record::DefinitionTable(r) => r.key,
            Record::PointerArray(r) => r.key,
            Record::Film(r) => r.key,
            Record::FilmLayerList(r) => r.key,
            Record::FilmLayerListNode(r) => r.key,
            Record::KeyList(r) => r.key,
            Record::CsTrailer(_)
            | Record::FileTemplate(_)
            | Record::PropertyDef(_)
            | Record::Unknown(_) => return None,
        };
        Some(key)
    }

    /// The chain successor, if this case is a linked-list member
    pub fn next(&self) -> Option<Key> {
        let next = match self {
            Record::Arc(r) => r.next,
            Record::Attribute(r) => r.next,
            Record::NetAssignment(r) => r.next,
            Record::Track(r) => r.next,
            Record::Component(r) => r.next,
            Record::ComponentInstance(r) => r.next,
            Record::PinNumber(r) => r.next,
            Record::DrcMarker(r) => r.next,
            Record::PinDefinition(r) => r.next,
            Record::Pad(r) => r.next,
            Record::X0e(r) => r.next,
            Record::PinName(r) => r.next,
            Record::Graphic(r) => r.next,
            Record::Segment(r) => r.next,
            Record::Net(r) => r.next,
            Record::Padstack(r) => r.next,
            Record::Ratline(r) => r.next,
            Record::Rect(r) => r.next,
            Record::Shape(r) => r.next,
            Record::FootprintDef(r) => r.next,
            Record::Table(r) => r.next,
            Record::FootprintInstance(r) => r.next,
            Record::StringWrapper(r) => r.next,
            Record::PlacedPad(r) => r.next,
            Record::Keepout(r) => r.next,
            Record::DefinitionTable(r) => r.next,
            Record::Film(r) => r.next,
            Record::FilmLayerListNode(r) => r.next,
            _ => return None,
        };
        Some(next)
    }

    /// Name of the record case
    pub fn kind_name(&self) -> &'static str {
        match self {
            Record::Arc(_) => "Arc",
            Record::Attribute(_) => "Attribute",
            Record::NetAssignment(_) => "NetAssignment",
            Record::Track(_) => "Track",
            Record::Component(_) => "Component",
            Record::ComponentInstance(_) => "ComponentInstance",
            Record::PinNumber(_) => "PinNumber",
            Record::X09(_) => "X09",
            Record::DrcMarker(_) => "DrcMarker",
            Record::PinDefinition(_) => "PinDefinition",
            Record::Pad(_) => "Pad",
            Record::X0e(_) => "X0e",
            Record::FunctionSlot(_) => "FunctionSlot",
            Record::FunctionInstance(_) => "FunctionInstance",
            Record::PinName(_) => "PinName",
            Record::Xref(_) => "Xref",
            Record::Graphic(_) => "Graphic",
            Record::Segment(_) => "Segment",
            Record::Net(_) => "Net",
            Record::Padstack(_) => "Padstack",
            Record::ConstraintSet(_) => "ConstraintSet",
            Record::SignalModel(_) => "SignalModel",
            Record::PadstackDimensions(_) => "PadstackDimensions",
            Record::X20(_) => "X20",
            Record::Blob(_) => "Blob",
            Record::X22(_) => "X22",
            Record::Ratline(_) => "Ratline",
            Record::Rect(_) => "Rect",
            Record::Match(_) => "Match",
            Record::CsTrailer(_) => "CsTrailer",
            Record::Shape(_) => "Shape",
            Record::X29(_) => "X29",
            Record::LayerList(_) => "LayerList",
            Record::FootprintDef(_) => "FootprintDef",
            Record::Table(_) => "Table",
            Record::FootprintInstance(_) => "FootprintInstance",
            Record::X2e(_) => "X2e",
            Record::X2f(_) => "X2f",
            Record::StringWrapper(_) => "StringWrapper",
            Record::StringGraphic(_) => "StringGraphic",
            Record::PlacedPad(_) => "PlacedPad",
            Record::Via(_) => "Via",
            Record::Keepout(_) => "Keepout",
            Record::FileTemplate(_) => "FileTemplate",
            Record::DefinitionTable(_) => "DefinitionTable",
            Record::PointerArray(_) => "PointerArray",
            Record::Film(_) => "Film",
            Record::FilmLayerList(_) => "FilmLayerList",
            Record::FilmLayerListNode(_) => "FilmLayerListNode",
            Record::PropertyDef(_) => "PropertyDef",
            Record::KeyList(_) => "KeyList",
            Record::Unknown(_) => "Unknown",
        }
    }

    /// Name of the record case a type byte selects
    pub fn kind_name_for(type_tag: u8) -> &'static str {
        match type_tag {
            0x01 => "Arc",
            0x03 => "Attribute",
            0x04 => "NetAssignment",
            0x05 => "Track",
            0x06 => "Component",
            0x07 => "ComponentInstance",
            0x08 => "PinNumber",
            0x09 => "X09",
            0x0A => "DrcMarker",
            0x0C => "PinDefinition",
            0x0D => "Pad",
            0x0E => "X0e",
            0x0F => "FunctionSlot",
            0x10 => "FunctionInstance",
            0x11 => "PinName",
            0x12 => "Xref",
            0x14 => "Graphic",
            0x15..=0x17 => "Segment",
            0x1B => "Net",
            0x1C => "Padstack",
            0x1D => "ConstraintSet",
            0x1E => "SignalModel",
            0x1F => "PadstackDimensions",
            0x20 => "X20",
            0x21 => "Blob",
            0x22 => "X22",
            0x23 => "Ratline",
            0x24 => "Rect",
            0x26 => "Match",
            0x27 => "CsTrailer",
            0x28 => "Shape",
            0x29 => "X29",
            0x2A => "LayerList",
            0x2B => "FootprintDef",
            0x2C => "Table",
            0x2D => "FootprintInstance",
            0x2E => "X2e",
            0x2F => "X2f",
            0x30 => "StringWrapper",
            0x31 => "StringGraphic",
            0x32 => "PlacedPad",
            0x33 => "Via",
            0x34 => "Keepout",
            0x35 => "FileTemplate",
            0x36 => "DefinitionTable",
            0x37 => "PointerArray",
            0x38 => "Film",
            0x39 => "FilmLayerList",
            0x3A => "FilmLayerListNode",
            0x3B => "PropertyDef",
            0x3C => "KeyList",
            _ => "Unknown",
        }
    }
}

/// A decoded object together with the type byte that introduced it
#[derive(Debug, Clone, PartialEq)]
pub struct BoardObject {
    type_tag: u8,
    record: Record,
}

impl BoardObject {
    /// Pairs a record with its type byte
    pub fn new(type_tag: u8, record: Record) -> Self {
        Self { type_tag, record }
    }

    /// The type byte as stored, which tells 0x15, 0x16 and 0x17 apart
    pub fn type_tag(&self) -> u8 {
        self.type_tag
    }

    /// The decoded record
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Consumes the object, returning the record
    pub fn into_record(self) -> Record {
        self.record
    }

    /// See [`Record::key`]
    pub fn key(&self) -> Option<Key> {
        self.record.key()
    }

    /// See [`Record::next`]
    pub fn next(&self) -> Option<Key> {
        self.record.next()
    }

    /// See [`Record::kind_name`]
    pub fn kind_name(&self) -> &'static str {
        self.record.kind_name()
    }
}

#[cfg(test)]
pub(crate) fn test_context(version: u32) -> DecodeContext {
    DecodeContext::new(VersionGate::new(version), 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::Bytes;

    #[test]
    fn test_unknown_type_fails_validation() {
        let data = [0u8; 16];
        let mut cur = Cursor::new(&data);
        let err = Record::decode(0x02, 0x1200, &mut cur, &test_context(1311744)).unwrap_err();
        match err {
            Error::UnrecognizedObjectType { offset, type_tag } => {
                assert_eq!(offset, 0x1200);
                assert_eq!(type_tag, 0x02);
            }
            other => panic!("expected UnrecognizedObjectType, got {:?}", other),
        }
    }

    #[test]
    fn test_kind_names_agree() {
        let ctx = test_context(1311744);
        // A zero-filled buffer is long enough for every fixed-size record
        let data = vec![0u8; 4096];
        for tag in [0x01u8, 0x04, 0x06, 0x0A, 0x14, 0x15, 0x16, 0x17, 0x1B, 0x2B, 0x33] {
            let mut cur = Cursor::new(&data);
            let record = Record::decode(tag, 0, &mut cur, &ctx).unwrap();
            assert_eq!(record.kind_name(), Record::kind_name_for(tag));
        }
    }

    /// Total bytes of each record decoded from zeros, type byte included, on
    /// either side of the thresholds that change its layout
    const ZERO_RECORD_LENGTHS: &[(u8, &[(u32, usize)])] = &[
        (0x01, &[(1311488, 80), (1311744, 84)]),
        (0x03, &[(1311488, 16), (1311744, 20)]),
        (0x04, &[(1311488, 20), (1311744, 24)]),
        (0x05, &[(1311488, 56), (1311744, 60)]),
        (0x06, &[(1311488, 32), (1311744, 36)]),
        (0x07, &[(1311488, 40), (1311744, 40)]),
        (0x08, &[(1311488, 24), (1311744, 28)]),
        (0x09, &[(1311488, 44), (1311744, 48), (1312768, 48), (1313024, 52)]),
        (0x0A, &[(1311488, 68), (1311744, 72), (1312768, 72), (1313024, 76)]),
        (0x0C, &[(1311488, 56), (1311744, 60), (1312768, 60), (1313024, 64)]),
        (0x0D, &[(1311488, 40), (1311744, 48)]),
        (0x0E, &[(1311488, 52), (1311744, 60)]),
        (0x0F, &[(1311488, 56), (1311744, 60), (1312768, 60), (1313024, 64)]),
        (0x10, &[(1311488, 32), (1311744, 36)]),
        (0x11, &[(1312768, 24), (1313024, 28)]),
        (0x12, &[(1249024, 24), (1249280, 28), (1312768, 28), (1313024, 32)]),
        (0x14, &[(1311488, 32), (1311744, 36)]),
        (0x15, &[(1311488, 40), (1311744, 44)]),
        (0x16, &[(1311744, 44)]),
        (0x17, &[(1311488, 40)]),
        (0x1B, &[(1311488, 56), (1311744, 60)]),
        (0x1C, &[(1311488, 320), (1311744, 660)]),
        (0x1D, &[(1311488, 24), (1311744, 24)]),
        (0x1E, &[(1311744, 24)]),
        (
            0x1F,
            &[
                (1245952, 28),
                (1246208, 28),
                (1311488, 28),
                (1311744, 32),
                (1315840, 32),
                (1316096, 32),
            ],
        ),
        (0x20, &[(1312768, 40), (1313024, 80)]),
        (0x22, &[(1311488, 40), (1311744, 44)]),
        (0x23, &[(1248000, 64), (1248256, 80), (1312768, 80), (1313024, 84)]),
        (0x24, &[(1311488, 52), (1311744, 56)]),
        (0x26, &[(1311488, 20), (1311744, 24), (1312768, 24), (1313024, 28)]),
        (0x28, &[(1311488, 52), (1311744, 60)]),
        (0x29, &[(1310464, 28), (1310720, 32)]),
        (0x2A, &[(1249024, 8), (1249280, 8), (1312768, 8), (1313024, 12)]),
        (0x2B, &[(1248000, 68), (1248256, 72), (1311488, 72), (1311744, 76)]),
        (0x2C, &[(1311488, 36), (1311744, 44)]),
        (0x2D, &[(1311488, 52), (1311744, 52), (1312768, 52), (1313024, 56)]),
        (0x2E, &[(1311488, 36), (1311744, 40)]),
        (0x2F, &[(1311744, 32)]),
        (0x30, &[(1311488, 44), (1311744, 52)]),
        (0x31, &[(1312768, 24), (1313024, 28)]),
        (0x32, &[(1311488, 64), (1311744, 68)]),
        (0x33, &[(1311488, 72), (1311744, 80)]),
        (0x34, &[(1311488, 32), (1311744, 36)]),
        (0x35, &[(1311744, 124)]),
        (0x37, &[(1312768, 28), (1313024, 32)]),
        (0x38, &[(1250304, 64), (1250560, 52), (1312768, 52), (1313024, 56)]),
        (0x39, &[(1311744, 60)]),
        (0x3A, &[(1312768, 16), (1313024, 20)]),
        (0x3B, &[(1311488, 172), (1311744, 176)]),
        (0x3C, &[(1312768, 12), (1313024, 16)]),
    ];

    #[test]
    fn test_record_lengths_at_thresholds() {
        let mut data = vec![0u8; 4096];
        for &(tag, cases) in ZERO_RECORD_LENGTHS {
            data[0] = tag;
            for &(version, expected) in cases {
                let mut cur = Cursor::new(&data);
                cur.read_u8().unwrap();
                let record = Record::decode(tag, 0, &mut cur, &test_context(version)).unwrap();
                assert_eq!(
                    cur.position(),
                    expected,
                    "{} ({:#04x}) at {}",
                    record.kind_name(),
                    tag,
                    version
                );
            }
        }
    }

    #[test]
    fn test_keyless_cases() {
        let ctx = test_context(1311744);
        let data = Bytes::new().zeros(123).into_vec();
        let mut cur = Cursor::new(&data);
        let record = Record::decode(0x35, 0, &mut cur, &ctx).unwrap();
        assert_eq!(record.key(), None);
        assert_eq!(record.next(), None);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key(0x1a2b).to_string(), "0x1a2b");
        assert!(Key::NULL.is_null());
        assert!(!Key(1).is_null());
    }
}
