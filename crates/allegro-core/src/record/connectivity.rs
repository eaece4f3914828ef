//! Electrical structure: nets, components, pins and the placed copper that
//! connects them.
//!
//! Name fields holding a `u32` are string table ids, resolved through
//! [`crate::BoardIndex::string`].

use super::{read, Coords, Decode, DecodeContext, Key, LayerInfo};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::version::Field;

/// 0x04: binds a net to one of its connected objects
#[derive(Debug, Clone, PartialEq)]
pub struct NetAssignment {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// The 0x1B net
    pub net: Key,
    /// The connected track, pad or via
    pub connection: Key,
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
}

impl Decode for NetAssignment {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            net: read(cur, ctx)?,
            connection: read(cur, ctx)?,
            unknown_3: ctx.read_if(Field::NetAssignmentTrailer, cur)?,
        })
    }
}

/// 0x05: routed track, a chain of segments on one layer
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Opaque
    pub unknown_1: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// The 0x04 net assignment
    pub net_assignment: Key,
    /// Opaque
    pub unknown_2: [u32; 2],
    /// Unidentified object references
    pub pointers: [Key; 2],
    /// Opaque
    pub unknown_3: u32,
    /// Further unidentified object references
    pub more_pointers: [Key; 2],
    /// Opaque, version-gated
    pub unknown_4: Option<u32>,
    /// Head of the segment chain
    pub first_segment: Key,
    /// Opaque
    pub unknown_5: Key,
    /// Opaque
    pub unknown_6: u32,
}

impl Decode for Track {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            layer: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            net_assignment: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            pointers: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            more_pointers: read(cur, ctx)?,
            unknown_4: ctx.read_if(Field::TrackExtra, cur)?,
            first_segment: read(cur, ctx)?,
            unknown_5: read(cur, ctx)?,
            unknown_6: read(cur, ctx)?,
        })
    }
}

/// 0x06: a logical component (device type)
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Device type name
    pub name: u32,
    /// Opaque
    pub unknown_3: Key,
    /// First 0x07 instance of this component
    pub instance: Key,
    /// The 0x0F function slot
    pub function_slot: Key,
    /// The 0x08 pin number
    pub pin_number: Key,
    /// Opaque, version-gated
    pub unknown_4: Option<u32>,
}

impl Decode for Component {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            name: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            instance: read(cur, ctx)?,
            function_slot: read(cur, ctx)?,
            pin_number: read(cur, ctx)?,
            unknown_4: ctx.read_if(Field::ComponentTrailer, cur)?,
        })
    }
}

/// 0x07: one instance of a component, carrying its reference designator
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInstance {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
    /// The 0x2D footprint instance
    pub footprint_instance: Key,
    /// Opaque, version-gated
    pub unknown_4: Option<u32>,
    /// Reference designator
    pub refdes: u32,
    /// The 0x0F function slot
    pub function_slot: Key,
    /// First 0x03 attribute of this instance
    pub attribute: Key,
    /// Opaque
    pub unknown_5: u32,
    /// First placed pad of the chain
    pub first_pad: Key,
}

impl Decode for ComponentInstance {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            unknown_3: ctx.read_if(Field::InstanceExtra, cur)?,
            footprint_instance: read(cur, ctx)?,
            unknown_4: ctx.read_if(Field::InstanceLegacy, cur)?,
            refdes: read(cur, ctx)?,
            function_slot: read(cur, ctx)?,
            attribute: read(cur, ctx)?,
            unknown_5: read(cur, ctx)?,
            first_pad: read(cur, ctx)?,
        })
    }
}

/// 0x08: pin number of a component pin
#[derive(Debug, Clone, PartialEq)]
pub struct PinNumber {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Pin number text
    pub name: u32,
    /// Previous member of the chain
    pub previous: Key,
    /// Next member of the chain
    pub next: Key,
    /// The 0x11 pin name
    pub pin_name: Key,
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
}

impl Decode for PinNumber {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let unknown_1 = read(cur, ctx)?;
        let unknown_2 = read(cur, ctx)?;
        let key = read(cur, ctx)?;
        let early_name = ctx.read_if(Field::PinNumberNameFirst, cur)?;
        let previous = read(cur, ctx)?;
        let name = ctx.moved(early_name, Field::PinNumberNameLast, cur)?;
        Ok(Self {
            unknown_1,
            unknown_2,
            key,
            name,
            previous,
            next: read(cur, ctx)?,
            pin_name: read(cur, ctx)?,
            unknown_3: ctx.read_if(Field::PinNumberTrailer, cur)?,
        })
    }
}

/// 0x0C: pin definition, tying a pad shape to a drill
#[derive(Debug, Clone, PartialEq)]
pub struct PinDefinition {
    /// Subtype byte
    pub subtype: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Unidentified object references
    pub pointers: [Key; 2],
    /// Opaque, version-gated
    pub unknown_1: Option<u32>,
    /// Pad shape code, not yet decoded
    pub shape: u32,
    /// Drill size
    pub drill: u32,
    /// Bounding box corners
    pub bbox: [Coords; 2],
    /// Opaque
    pub unknown_2: [u32; 3],
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
}

impl Decode for PinDefinition {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            subtype: read(cur, ctx)?,
            layer: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            pointers: read(cur, ctx)?,
            unknown_1: ctx.read_if(Field::PinDefExtra, cur)?,
            shape: read(cur, ctx)?,
            drill: read(cur, ctx)?,
            bbox: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            unknown_3: ctx.read_if(Field::PinDefTrailer, cur)?,
        })
    }
}

/// 0x0D: pad of a footprint definition
#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Pad name
    pub name: u32,
    /// Next member of the chain
    pub next: Key,
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
    /// Placement position
    pub position: Coords,
    /// The 0x1C padstack
    pub padstack: Key,
    /// Opaque
    pub unknown_4: u32,
    /// Opaque, version-gated
    pub unknown_5: Option<u32>,
    /// Flag word, not yet decoded
    pub flags: u32,
    /// Millidegrees
    pub rotation: u32,
}

impl Decode for Pad {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            name: read(cur, ctx)?,
            next: read(cur, ctx)?,
            unknown_3: ctx.read_if(Field::PadExtra, cur)?,
            position: read(cur, ctx)?,
            padstack: read(cur, ctx)?,
            unknown_4: read(cur, ctx)?,
            unknown_5: ctx.read_if(Field::PadFlagsPrefix, cur)?,
            flags: read(cur, ctx)?,
            rotation: read(cur, ctx)?,
        })
    }
}

/// 0x0F: function slot of a component
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSlot {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Function name
    pub name: u32,
    /// Slot label, stored as fixed 32-byte text
    pub slot_name: String,
    /// The 0x06 component
    pub component: Key,
    /// The 0x10 function instance
    pub function: Key,
    /// Opaque
    pub unknown_3: u32,
    /// Opaque, version-gated
    pub unknown_4: Option<u32>,
    /// Opaque, version-gated
    pub unknown_5: Option<u32>,
}

impl Decode for FunctionSlot {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            name: read(cur, ctx)?,
            slot_name: cur.read_fixed_ascii(32)?,
            component: read(cur, ctx)?,
            function: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            unknown_4: ctx.read_if(Field::FunctionSlotExtra, cur)?,
            unknown_5: ctx.read_if(Field::FunctionSlotTrailer, cur)?,
        })
    }
}

/// 0x10: function instance
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionInstance {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
    /// Unidentified object references
    pub pointers: [Key; 2],
    /// Opaque
    pub unknown_4: u32,
    /// Further unidentified object references
    pub more_pointers: [Key; 2],
    /// Schematic path
    pub path: u32,
}

impl Decode for FunctionInstance {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            unknown_3: ctx.read_if(Field::FunctionInstanceExtra, cur)?,
            pointers: read(cur, ctx)?,
            unknown_4: read(cur, ctx)?,
            more_pointers: read(cur, ctx)?,
            path: read(cur, ctx)?,
        })
    }
}

/// 0x11: pin name
#[derive(Debug, Clone, PartialEq)]
pub struct PinName {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Pin name text
    pub name: u32,
    /// Next member of the chain
    pub next: Key,
    /// The 0x08 pin number
    pub pin_number: Key,
    /// Opaque
    pub unknown_3: u32,
    /// Opaque, version-gated
    pub unknown_4: Option<u32>,
}

impl Decode for PinName {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            name: read(cur, ctx)?,
            next: read(cur, ctx)?,
            pin_number: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            unknown_4: ctx.read_if(Field::PinNameTrailer, cur)?,
        })
    }
}

/// 0x12: cross reference
#[derive(Debug, Clone, PartialEq)]
pub struct Xref {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Unidentified object references
    pub pointers: [Key; 3],
    /// Opaque
    pub unknown_3: u32,
    /// Opaque, version-gated
    pub unknown_4: Option<u32>,
    /// Opaque, version-gated
    pub unknown_5: Option<u32>,
}

impl Decode for Xref {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            pointers: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            unknown_4: ctx.read_if(Field::XrefExtra, cur)?,
            unknown_5: ctx.read_if(Field::XrefTrailer, cur)?,
        })
    }
}

/// 0x1B: a net
#[derive(Debug, Clone, PartialEq)]
pub struct Net {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Net name
    pub name: u32,
    /// Opaque
    pub unknown_3: u32,
    /// Opaque, version-gated
    pub unknown_4: Option<u32>,
    /// Net type word, not yet decoded
    pub kind: u32,
    /// First 0x04 assignment of this net
    pub assignment: Key,
    /// Opaque
    pub unknown_5: Key,
    /// Schematic path
    pub path: u32,
    /// Opaque
    pub unknown_6: Key,
    /// The 0x1E signal model
    pub model: Key,
    /// Opaque
    pub unknown_7: [u32; 2],
    /// Opaque
    pub unknown_8: Key,
}

impl Decode for Net {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            name: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            unknown_4: ctx.read_if(Field::NetExtra, cur)?,
            kind: read(cur, ctx)?,
            assignment: read(cur, ctx)?,
            unknown_5: read(cur, ctx)?,
            path: read(cur, ctx)?,
            unknown_6: read(cur, ctx)?,
            model: read(cur, ctx)?,
            unknown_7: read(cur, ctx)?,
            unknown_8: read(cur, ctx)?,
        })
    }
}

/// 0x26: match group membership
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Member of the match group
    pub member: Key,
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
    /// The match group
    pub group: Key,
    /// The 0x1D constraint set
    pub constraint: Key,
    /// Opaque, version-gated
    pub unknown_4: Option<u32>,
}

impl Decode for Match {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            member: read(cur, ctx)?,
            unknown_3: ctx.read_if(Field::MatchExtra, cur)?,
            group: read(cur, ctx)?,
            constraint: read(cur, ctx)?,
            unknown_4: ctx.read_if(Field::MatchTrailer, cur)?,
        })
    }
}

/// 0x2B: footprint definition
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintDef {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Footprint name
    pub name: u32,
    /// Opaque
    pub unknown_3: u32,
    /// Bounding box corners
    pub bbox: [Coords; 2],
    /// Next member of the chain
    pub next: Key,
    /// First 0x2D instance of this footprint
    pub first_instance: Key,
    /// Unidentified object references
    pub pointers: [Key; 3],
    /// Library file path
    pub library_path: u32,
    /// Further unidentified object references
    pub more_pointers: [Key; 3],
    /// Opaque, version-gated
    pub unknown_4: Option<u32>,
    /// Opaque, version-gated
    pub unknown_5: Option<u32>,
}

impl Decode for FootprintDef {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            name: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            bbox: read(cur, ctx)?,
            next: read(cur, ctx)?,
            first_instance: read(cur, ctx)?,
            pointers: read(cur, ctx)?,
            library_path: read(cur, ctx)?,
            more_pointers: read(cur, ctx)?,
            unknown_4: ctx.read_if(Field::FootprintDefExtra, cur)?,
            unknown_5: ctx.read_if(Field::FootprintDefTrailer, cur)?,
        })
    }
}

/// 0x2D: placed footprint
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintInstance {
    /// Opaque
    pub unknown_1: u8,
    /// Placement side byte; nonzero is bottom
    pub side: u8,
    /// Opaque
    pub unknown_2: u8,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
    /// Owning 0x07 component instance
    pub instance: Key,
    /// Millidegrees
    pub rotation: u32,
    /// Placement position
    pub position: Coords,
    /// Head of the outline graphic chain
    pub graphic: Key,
    /// First placed pad of the chain
    pub first_pad: Key,
    /// Head of the text chain
    pub text: Key,
    /// Head of the assembly graphic chain
    pub assembly: Key,
    /// Head of the area chain
    pub areas: Key,
    /// Opaque
    pub unknown_4: u32,
}

impl FootprintInstance {
    /// Whether the footprint is placed on the bottom side
    pub fn is_bottom(&self) -> bool {
        self.side != 0
    }
}

impl Decode for FootprintInstance {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let unknown_1 = read(cur, ctx)?;
        let side = read(cur, ctx)?;
        let unknown_2 = read(cur, ctx)?;
        let key = read(cur, ctx)?;
        let next = read(cur, ctx)?;
        let unknown_3 = ctx.read_if(Field::FootprintInstanceExtra, cur)?;
        let early_instance = ctx.read_if(Field::FootprintInstanceRefFirst, cur)?;
        let rotation = read(cur, ctx)?;
        let position = read(cur, ctx)?;
        let instance = ctx.moved(early_instance, Field::FootprintInstanceRefLast, cur)?;
        Ok(Self {
            unknown_1,
            side,
            unknown_2,
            key,
            next,
            unknown_3,
            instance,
            rotation,
            position,
            graphic: read(cur, ctx)?,
            first_pad: read(cur, ctx)?,
            text: read(cur, ctx)?,
            assembly: read(cur, ctx)?,
            areas: read(cur, ctx)?,
            unknown_4: read(cur, ctx)?,
        })
    }
}

/// 0x32: pad placed on the board as part of a footprint instance
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPad {
    /// Subtype byte
    pub subtype: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// The 0x04 net assignment
    pub net_assignment: Key,
    /// Flag word, not yet decoded
    pub flags: u32,
    /// Previous member of the chain
    pub previous: Option<Key>,
    /// Next member of the chain
    pub next: Key,
    /// The 0x2D footprint instance
    pub footprint_instance: Key,
    /// Opaque
    pub unknown_1: Key,
    /// The 0x0D pad definition
    pub pad: Key,
    /// Unidentified object references
    pub pointers: [Key; 4],
    /// Bounding box corners
    pub bbox: [Coords; 2],
}

impl Decode for PlacedPad {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            subtype: read(cur, ctx)?,
            layer: read(cur, ctx)?,
            key: read(cur, ctx)?,
            net_assignment: read(cur, ctx)?,
            flags: read(cur, ctx)?,
            previous: ctx.read_if(Field::PlacedPadPrev, cur)?,
            next: read(cur, ctx)?,
            footprint_instance: read(cur, ctx)?,
            unknown_1: read(cur, ctx)?,
            pad: read(cur, ctx)?,
            pointers: read(cur, ctx)?,
            bbox: read(cur, ctx)?,
        })
    }
}

/// 0x33: via
#[derive(Debug, Clone, PartialEq)]
pub struct Via {
    /// Subtype byte
    pub subtype: u8,
    /// Layer the object sits on
    pub layer: LayerInfo,
    /// This object's key
    pub key: Key,
    /// Opaque
    pub unknown_1: u32,
    /// The 0x04 net assignment
    pub net_assignment: Key,
    /// Opaque
    pub unknown_2: u32,
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
    /// Opaque
    pub unknown_4: Key,
    /// Opaque, version-gated
    pub unknown_5: Option<u32>,
    /// Placement position
    pub position: Coords,
    /// Opaque
    pub unknown_6: Key,
    /// The 0x1C padstack
    pub padstack: Key,
    /// Unidentified object references
    pub pointers: [Key; 2],
    /// Opaque
    pub unknown_7: [u32; 2],
    /// Bounding box corners
    pub bbox: [Coords; 2],
}

impl Decode for Via {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            subtype: read(cur, ctx)?,
            layer: read(cur, ctx)?,
            key: read(cur, ctx)?,
            unknown_1: read(cur, ctx)?,
            net_assignment: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            unknown_3: ctx.read_if(Field::ViaExtra, cur)?,
            unknown_4: read(cur, ctx)?,
            unknown_5: ctx.read_if(Field::ViaExtra, cur)?,
            position: read(cur, ctx)?,
            unknown_6: read(cur, ctx)?,
            padstack: read(cur, ctx)?,
            pointers: read(cur, ctx)?,
            unknown_7: read(cur, ctx)?,
            bbox: read(cur, ctx)?,
        })
    }
}
