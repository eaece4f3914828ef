//! Drawn geometry: arcs, segments and the containers that chain them, plus
//! text placement.

use super::{read, CadenceFp, Coords, Decode, DecodeContext, Key, LayerInfo, TextProperties};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::version::Field;

/// 0x01: circular arc segment of a graphic or shape outline
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    /// Subtype byte
    pub subtype: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Owning graphic or shape
    pub parent: Key,
    /// Opaque
    pub unknown_1: u32,
    /// Opaque, version-gated
    pub unknown_2: Option<u32>,
    /// Line width
    pub width: u32,
    /// Start point
    pub start: Coords,
    /// End point
    pub end: Coords,
    /// Centre x as stored
    pub center_x: CadenceFp,
    /// Centre y as stored
    pub center_y: CadenceFp,
    /// Radius as stored
    pub radius: CadenceFp,
    /// Bounding box corners
    pub bbox: [Coords; 2],
}

impl Decode for Arc {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            subtype: read(cur, ctx)?,
            layer: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            parent: read(cur, ctx)?,
            unknown_1: read(cur, ctx)?,
            unknown_2: ctx.read_if(Field::ArcExtra, cur)?,
            width: read(cur, ctx)?,
            start: read(cur, ctx)?,
            end: read(cur, ctx)?,
            center_x: read(cur, ctx)?,
            center_y: read(cur, ctx)?,
            radius: read(cur, ctx)?,
            bbox: read(cur, ctx)?,
        })
    }
}

/// 0x15, 0x16, 0x17: straight line segment
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Subtype byte
    pub subtype: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Owning object
    pub parent: Key,
    /// Flag word, not yet decoded
    pub flags: u32,
    /// Opaque, version-gated
    pub unknown_1: Option<u32>,
    /// Line width
    pub width: u32,
    /// Start point
    pub start: Coords,
    /// End point
    pub end: Coords,
}

impl Decode for Segment {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            subtype: read(cur, ctx)?,
            layer: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            parent: read(cur, ctx)?,
            flags: read(cur, ctx)?,
            unknown_1: ctx.read_if(Field::SegmentExtra, cur)?,
            width: read(cur, ctx)?,
            start: read(cur, ctx)?,
            end: read(cur, ctx)?,
        })
    }
}

/// 0x14: a drawn graphic, owning a chain of segments and arcs
#[derive(Debug, Clone, PartialEq)]
pub struct Graphic {
    /// Subtype byte
    pub subtype: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Owning object
    pub parent: Key,
    /// Opaque
    pub unknown_1: u32,
    /// Opaque, version-gated
    pub unknown_2: Option<u32>,
    /// Head of the segment chain
    pub first_segment: Key,
    /// Opaque
    pub unknown_3: Key,
    /// Opaque
    pub unknown_4: Key,
}

impl Decode for Graphic {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            subtype: read(cur, ctx)?,
            layer: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            parent: read(cur, ctx)?,
            unknown_1: read(cur, ctx)?,
            unknown_2: ctx.read_if(Field::GraphicExtra, cur)?,
            first_segment: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            unknown_4: read(cur, ctx)?,
        })
    }
}

/// 0x24: axis-aligned rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    /// Subtype byte
    pub subtype: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Owning object
    pub parent: Key,
    /// Opaque
    pub unknown_1: u32,
    /// Opaque, version-gated
    pub unknown_2: Option<u32>,
    /// Bounding box corners
    pub bbox: [Coords; 2],
    /// Opaque
    pub unknown_3: Key,
    /// Opaque
    pub unknown_4: [u32; 3],
}

impl Decode for Rect {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            subtype: read(cur, ctx)?,
            layer: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            parent: read(cur, ctx)?,
            unknown_1: read(cur, ctx)?,
            unknown_2: ctx.read_if(Field::RectExtra, cur)?,
            bbox: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            unknown_4: read(cur, ctx)?,
        })
    }
}

/// 0x28: filled shape whose outline is a segment chain
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Subtype byte
    pub subtype: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Owning object
    pub parent: Key,
    /// Opaque
    pub unknown_1: u32,
    /// Opaque, version-gated
    pub unknown_2: Option<[u32; 2]>,
    /// Head of the segment chain
    pub first_segment: Key,
    /// Opaque
    pub unknown_3: Key,
    /// Opaque
    pub unknown_4: Key,
    /// Opaque
    pub unknown_5: u32,
    /// Bounding box corners
    pub bbox: [Coords; 2],
}

impl Decode for Shape {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            subtype: read(cur, ctx)?,
            layer: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            parent: read(cur, ctx)?,
            unknown_1: read(cur, ctx)?,
            unknown_2: ctx.read_if(Field::ShapeExtra, cur)?,
            first_segment: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            unknown_4: read(cur, ctx)?,
            unknown_5: read(cur, ctx)?,
            bbox: read(cur, ctx)?,
        })
    }
}

/// 0x23: unrouted connection between two pins
#[derive(Debug, Clone, PartialEq)]
pub struct Ratline {
    /// Subtype byte
    pub subtype: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Flag words, not yet decoded
    pub flags: [u32; 2],
    /// Unidentified object references
    pub pointers: [Key; 3],
    /// Bounding box corners
    pub bbox: [Coords; 2],
    /// Opaque
    pub unknown_1: [u32; 4],
    /// Opaque, version-gated
    pub unknown_2: Option<[u32; 4]>,
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
}

impl Decode for Ratline {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            subtype: read(cur, ctx)?,
            layer: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            flags: read(cur, ctx)?,
            pointers: read(cur, ctx)?,
            bbox: read(cur, ctx)?,
            unknown_1: read(cur, ctx)?,
            unknown_2: ctx.read_if(Field::RatlineExtra, cur)?,
            unknown_3: ctx.read_if(Field::RatlineTrailer, cur)?,
        })
    }
}

/// 0x34: keepout region
#[derive(Debug, Clone, PartialEq)]
pub struct Keepout {
    /// Subtype byte
    pub subtype: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Owning object
    pub parent: Key,
    /// Opaque, version-gated
    pub unknown_1: Option<u32>,
    /// Flag word, not yet decoded
    pub flags: u32,
    /// Head of the segment chain
    pub first_segment: Key,
    /// Opaque
    pub unknown_2: Key,
    /// Opaque
    pub unknown_3: u32,
}

impl Decode for Keepout {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            subtype: read(cur, ctx)?,
            layer: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            parent: read(cur, ctx)?,
            unknown_1: ctx.read_if(Field::KeepoutExtra, cur)?,
            flags: read(cur, ctx)?,
            first_segment: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
        })
    }
}

/// 0x0A: design rule violation marker
#[derive(Debug, Clone, PartialEq)]
pub struct DrcMarker {
    /// Subtype byte
    pub subtype: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Opaque
    pub unknown_1: u32,
    /// Opaque, version-gated
    pub unknown_2: Option<u32>,
    /// Bounding box corners
    pub bbox: [Coords; 2],
    /// Opaque
    pub unknown_3: [u32; 4],
    /// Opaque
    pub unknown_4: [u32; 5],
    /// Opaque, version-gated
    pub unknown_5: Option<u32>,
}

impl Decode for DrcMarker {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            subtype: read(cur, ctx)?,
            layer: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            unknown_1: read(cur, ctx)?,
            unknown_2: ctx.read_if(Field::DrcExtra, cur)?,
            bbox: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            unknown_4: read(cur, ctx)?,
            unknown_5: ctx.read_if(Field::DrcTrailer, cur)?,
        })
    }
}

/// 0x0E: unidentified layered object with a bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct X0e {
    /// Subtype byte
    pub subtype: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Unidentified object references
    pub pointers: [Key; 3],
    /// Bounding box corners
    pub bbox: [Coords; 2],
    /// Opaque
    pub unknown_1: [u32; 3],
    /// Opaque, version-gated
    pub unknown_2: Option<[u32; 2]>,
}

impl Decode for X0e {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            subtype: read(cur, ctx)?,
            layer: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            pointers: read(cur, ctx)?,
            bbox: read(cur, ctx)?,
            unknown_1: read(cur, ctx)?,
            unknown_2: ctx.read_if(Field::X0eTrailer, cur)?,
        })
    }
}

/// 0x30: placement of a piece of text
#[derive(Debug, Clone, PartialEq)]
pub struct StringWrapper {
    /// Subtype byte
    pub subtype: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Opaque, version-gated
    pub unknown_1: Option<[u32; 2]>,
    /// Font and placement flags
    pub font: TextProperties,
    /// Opaque
    pub unknown_2: Key,
    /// The 0x31 record holding the text itself
    pub string_graphic: Key,
    /// Opaque
    pub unknown_3: u32,
    /// Placement position
    pub position: Coords,
    /// Opaque
    pub unknown_4: u32,
    /// Rotation in thousandths of a degree
    pub rotation: u32,
}

impl Decode for StringWrapper {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let subtype = read(cur, ctx)?;
        let layer = read(cur, ctx)?;
        let key = read(cur, ctx)?;
        let next = read(cur, ctx)?;
        let unknown_1 = ctx.read_if(Field::StringWrapperExtra, cur)?;
        let early_font = ctx.read_if(Field::StringWrapperFontFirst, cur)?;
        let unknown_2 = read(cur, ctx)?;
        let string_graphic = read(cur, ctx)?;
        let unknown_3 = read(cur, ctx)?;
        let font = ctx.moved(early_font, Field::StringWrapperFontLast, cur)?;
        Ok(Self {
            subtype,
            layer,
            key,
            next,
            unknown_1,
            font,
            unknown_2,
            string_graphic,
            unknown_3,
            position: read(cur, ctx)?,
            unknown_4: read(cur, ctx)?,
            rotation: read(cur, ctx)?,
        })
    }
}

/// 0x31: the characters of a text placement
#[derive(Debug, Clone, PartialEq)]
pub struct StringGraphic {
    /// Subtype byte
    pub subtype: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// The owning 0x30 record
    pub wrapper: Key,
    /// Placement position
    pub position: Coords,
    /// Opaque
    pub unknown_1: u16,
    /// Opaque, version-gated
    pub unknown_2: Option<u32>,
    /// The text
    pub value: String,
}

impl Decode for StringGraphic {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let subtype = read(cur, ctx)?;
        let layer = read(cur, ctx)?;
        let key = read(cur, ctx)?;
        let wrapper = read(cur, ctx)?;
        let position = read(cur, ctx)?;
        let unknown_1 = read(cur, ctx)?;
        let len: u16 = read(cur, ctx)?;
        let unknown_2 = ctx.read_if(Field::StringGraphicExtra, cur)?;
        let value = cur.read_string_aligned(usize::from(len))?;
        Ok(Self {
            subtype,
            layer,
            key,
            wrapper,
            position,
            unknown_1,
            unknown_2,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{test_context, LayerClass, LayerSubclass, Subclass};
    use crate::testutil::Bytes;
    use pretty_assertions::assert_eq;

    fn arc_bytes(with_extra: bool) -> Vec<u8> {
        let mut b = Bytes::new()
            .u8(0x00)
            .u8(0x06)
            .u8(0x02)
            .u32(0x10)
            .u32(0x20)
            .u32(0x30)
            .u32(0);
        if with_extra {
            b = b.u32(0xdead);
        }
        b.u32(5)
            .i32(100)
            .i32(-200)
            .i32(300)
            .i32(-400)
            .zeros(24)
            .i32(0)
            .i32(0)
            .i32(10)
            .i32(10)
            .into_vec()
    }

    #[test]
    fn test_arc_gated_word() {
        let data = arc_bytes(true);
        let mut cur = Cursor::new(&data);
        let arc = Arc::decode(&mut cur, &test_context(1311744)).unwrap();
        assert_eq!(cur.position(), data.len());
        assert_eq!(arc.key, Key(0x10));
        assert_eq!(arc.next, Key(0x20));
        assert_eq!(arc.unknown_2, Some(0xdead));
        assert_eq!(arc.width, 5);
        assert_eq!(arc.start, Coords { x: 100, y: -200 });
        assert_eq!(arc.end, Coords { x: 300, y: -400 });
        assert_eq!(arc.layer.class, LayerClass::Etch);
        assert_eq!(arc.layer.subclass, LayerSubclass::Etch(2));

        let data = arc_bytes(false);
        let mut cur = Cursor::new(&data);
        let arc = Arc::decode(&mut cur, &test_context(1311744 - 0x100)).unwrap();
        assert_eq!(cur.position(), data.len());
        assert_eq!(arc.unknown_2, None);
        assert_eq!(arc.width, 5);
    }

    #[test]
    fn test_string_wrapper_font_moves() {
        let font = [0x02, 0x01, 0x01, 0x00];
        let early = Bytes::new()
            .u8(0)
            .u8(0x0D)
            .u8(0xF3)
            .u32(1)
            .u32(2)
            .bytes(&font)
            .u32(3)
            .u32(4)
            .u32(0)
            .i32(7)
            .i32(8)
            .u32(0)
            .u32(90_000)
            .into_vec();
        let late = Bytes::new()
            .u8(0)
            .u8(0x0D)
            .u8(0xF3)
            .u32(1)
            .u32(2)
            .u32(0)
            .u32(0)
            .u32(3)
            .u32(4)
            .u32(0)
            .bytes(&font)
            .i32(7)
            .i32(8)
            .u32(0)
            .u32(90_000)
            .into_vec();

        let mut cur = Cursor::new(&early);
        let a = StringWrapper::decode(&mut cur, &test_context(1250560)).unwrap();
        assert_eq!(cur.position(), early.len());

        let mut cur = Cursor::new(&late);
        let b = StringWrapper::decode(&mut cur, &test_context(1313024)).unwrap();
        assert_eq!(cur.position(), late.len());

        assert_eq!(a.font, b.font);
        assert_eq!(a.font.key, 2);
        assert!(a.font.mirrored);
        assert_eq!(a.string_graphic, Key(4));
        assert_eq!(b.string_graphic, Key(4));
        assert_eq!(a.position, Coords { x: 7, y: 8 });
        assert_eq!(b.rotation, 90_000);
        assert_eq!(
            a.layer.subclass,
            LayerSubclass::RefDes(Subclass::SilkscreenTop)
        );
    }

    #[test]
    fn test_string_graphic_text_is_aligned() {
        // The type byte plus 23 header bytes end on a boundary; "R12" takes one pad byte
        let data = Bytes::new()
            .u8(0x31)
            .u8(0)
            .u8(0x0D)
            .u8(0xF3)
            .u32(0x40)
            .u32(0x41)
            .i32(1)
            .i32(2)
            .u16(0)
            .u16(3)
            .bytes(b"R12")
            .zeros(1)
            .into_vec();
        let mut cur = Cursor::new(&data);
        cur.read_u8().unwrap();
        let g = StringGraphic::decode(&mut cur, &test_context(1311744)).unwrap();
        assert_eq!(g.value, "R12");
        assert_eq!(g.wrapper, Key(0x41));
        assert_eq!(g.unknown_2, None);
        assert_eq!(cur.position(), data.len());
    }
}
