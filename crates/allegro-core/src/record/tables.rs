//! Tables, attributes and the opaque blocks the decoder only needs to step over.

use super::{decode_vec, read, Decode, DecodeContext, Key, LayerInfo};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::version::Field;

/// 0x03: attribute attached to another object
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
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
    /// Selects the shape of [`Attribute::value`]
    pub subtype: u8,
    /// Opaque
    pub unknown_4: u8,
    /// Declared payload size; meaningful for text and raw values
    pub size: u16,
    /// Decoded payload
    pub value: AttributeValue,
}

/// Payload of an [`Attribute`], by subtype
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// 0x65
    Empty,
    /// 0x64, 0x66, 0x67, 0x6A
    Word(u32),
    /// 0x69
    Pair(u32, u32),
    /// 0x68, 0x6B, 0x6D, 0x6E, 0x6F, 0x71, 0x73, 0x78
    Text(String),
    /// 0x6C: counted key list
    Keys(Vec<Key>),
    /// 0xF6
    Block([u32; 20]),
    /// Any other subtype: `size` bytes, padded to a word boundary
    Raw(Vec<u8>),
}

impl AttributeValue {
    fn decode(subtype: u8, size: u16, cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let value = match subtype {
            0x65 => AttributeValue::Empty,
            0x64 | 0x66 | 0x67 | 0x6A => AttributeValue::Word(read(cur, ctx)?),
            0x69 => AttributeValue::Pair(read(cur, ctx)?, read(cur, ctx)?),
            0x68 | 0x6B | 0x6D | 0x6E | 0x6F | 0x71 | 0x73 | 0x78 => {
                AttributeValue::Text(cur.read_string_aligned(usize::from(size))?)
            }
            0x6C => {
                let count: u32 = read(cur, ctx)?;
                AttributeValue::Keys(decode_vec(cur, ctx, count as usize)?)
            }
            0xF6 => AttributeValue::Block(read(cur, ctx)?),
            _ => {
                let bytes = cur.read_bytes(usize::from(size))?.to_vec();
                cur.align_to(4)?;
                AttributeValue::Raw(bytes)
            }
        };
        Ok(value)
    }

    /// The text payload, for string subtypes
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Decode for Attribute {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let unknown_1 = read(cur, ctx)?;
        let unknown_2 = read(cur, ctx)?;
        let key = read(cur, ctx)?;
        let next = read(cur, ctx)?;
        let unknown_3 = ctx.read_if(Field::FieldExtra, cur)?;
        let subtype = read(cur, ctx)?;
        let unknown_4 = read(cur, ctx)?;
        let size = read(cur, ctx)?;
        let value = AttributeValue::decode(subtype, size, cur, ctx)?;
        Ok(Self {
            unknown_1,
            unknown_2,
            key,
            next,
            unknown_3,
            subtype,
            unknown_4,
            size,
            value,
        })
    }
}

/// 0x09
#[derive(Debug, Clone, PartialEq)]
pub struct X09 {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Opaque
    pub unknown_3: [u32; 4],
    /// Opaque, version-gated
    pub unknown_4: Option<u32>,
    /// Unidentified object references
    pub pointers: [Key; 2],
    /// Opaque
    pub unknown_5: u32,
    /// Further unidentified object references
    pub more_pointers: [Key; 2],
    /// Opaque, version-gated
    pub unknown_6: Option<u32>,
}

impl Decode for X09 {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            unknown_4: ctx.read_if(Field::X09Extra, cur)?,
            pointers: read(cur, ctx)?,
            unknown_5: read(cur, ctx)?,
            more_pointers: read(cur, ctx)?,
            unknown_6: ctx.read_if(Field::X09Trailer, cur)?,
        })
    }
}

/// 0x1D: constraint set with two opaque entry tables
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSet {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Opaque
    pub unknown_3: [u32; 3],
    /// Number of 256-byte entries
    pub size_a: u16,
    /// Number of 56-byte entries
    pub size_b: u16,
    /// `size_b` entries of 56 bytes
    pub entries_b: Vec<Vec<u8>>,
    /// `size_a` entries of 256 bytes
    pub entries_a: Vec<Vec<u8>>,
    /// One opaque word pair per `size_a` entry, in files that carry them
    pub extra: Option<Vec<[u32; 2]>>,
}

impl Decode for ConstraintSet {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let unknown_1 = read(cur, ctx)?;
        let unknown_2 = read(cur, ctx)?;
        let key = read(cur, ctx)?;
        let unknown_3 = read(cur, ctx)?;
        let size_a: u16 = read(cur, ctx)?;
        let size_b: u16 = read(cur, ctx)?;
        let entries_b = (0..size_b)
            .map(|_| cur.read_bytes(56).map(<[u8]>::to_vec))
            .collect::<Result<Vec<_>>>()?;
        let entries_a = (0..size_a)
            .map(|_| cur.read_bytes(256).map(<[u8]>::to_vec))
            .collect::<Result<Vec<_>>>()?;
        let extra = if ctx.has(Field::ConstraintSetExtra) {
            Some(decode_vec(cur, ctx, usize::from(size_a))?)
        } else {
            None
        };
        Ok(Self {
            unknown_1,
            unknown_2,
            key,
            unknown_3,
            size_a,
            size_b,
            entries_b,
            entries_a,
            extra,
        })
    }
}

/// 0x1E: signal integrity model text
#[derive(Debug, Clone, PartialEq)]
pub struct SignalModel {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Opaque
    pub unknown_3: u32,
    /// Opaque
    pub unknown_4: u32,
    /// Model name
    pub name: u32,
    /// Model text, sized by a preceding word
    pub value: String,
}

impl Decode for SignalModel {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let unknown_1 = read(cur, ctx)?;
        let unknown_2 = read(cur, ctx)?;
        let key = read(cur, ctx)?;
        let unknown_3 = read(cur, ctx)?;
        let unknown_4 = read(cur, ctx)?;
        let name = read(cur, ctx)?;
        let size: u32 = read(cur, ctx)?;
        let value = cur.read_string_aligned(size as usize)?;
        Ok(Self {
            unknown_1,
            unknown_2,
            key,
            unknown_3,
            unknown_4,
            name,
            value,
        })
    }
}

/// 0x20
#[derive(Debug, Clone, PartialEq)]
pub struct X20 {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Unidentified object reference
    pub pointer: Key,
    /// Opaque
    pub unknown_3: [u32; 7],
    /// Opaque, version-gated
    pub unknown_4: Option<[u32; 10]>,
}

impl Decode for X20 {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            pointer: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            unknown_4: ctx.read_if(Field::X20Trailer, cur)?,
        })
    }
}

/// 0x21: self-sized opaque block
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// Whole record length, type byte included
    pub size: u32,
    /// This object's key
    pub key: Key,
    /// Payload of `size - 12` bytes
    pub data: Vec<u8>,
}

impl Blob {
    /// Bytes before the payload: type byte, two header fields, size, key
    pub const HEADER_LEN: u32 = 12;
}

impl Decode for Blob {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let unknown_1 = read(cur, ctx)?;
        let unknown_2 = read(cur, ctx)?;
        let size_offset = cur.position();
        let size: u32 = read(cur, ctx)?;
        let key = read(cur, ctx)?;
        let payload = size
            .checked_sub(Self::HEADER_LEN)
            .ok_or_else(|| Error::invalid_length(size_offset, size))?;
        let data = cur.read_bytes(payload as usize)?.to_vec();
        Ok(Self {
            unknown_1,
            unknown_2,
            size,
            key,
            data,
        })
    }
}

/// 0x22
#[derive(Debug, Clone, PartialEq)]
pub struct X22 {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
    /// Opaque
    pub unknown_4: [u32; 8],
}

impl Decode for X22 {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            unknown_3: ctx.read_if(Field::X22Extra, cur)?,
            unknown_4: read(cur, ctx)?,
        })
    }
}

/// 0x27: constraint trailer, running up to the header's end offset
#[derive(Debug, Clone, PartialEq)]
pub struct CsTrailer {
    /// Every byte of the block
    pub data: Vec<u8>,
}

impl Decode for CsTrailer {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        // The recorded end offset is one past the last byte of the block
        let end = ctx.x27_end_offset() as usize;
        let target = end
            .checked_sub(1)
            .ok_or_else(|| Error::malformed_predicate_loop(cur.position(), end))?;
        Ok(Self {
            data: cur.read_bytes_until(target)?,
        })
    }
}

/// 0x29
#[derive(Debug, Clone, PartialEq)]
pub struct X29 {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Unidentified object references
    pub pointers: [Key; 3],
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
    /// Opaque
    pub unknown_4: [u32; 2],
}

impl Decode for X29 {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            pointers: read(cur, ctx)?,
            unknown_3: ctx.read_if(Field::X29Trailer, cur)?,
            unknown_4: read(cur, ctx)?,
        })
    }
}

/// 0x2A: conductor layer list
#[derive(Debug, Clone, PartialEq)]
pub struct LayerList {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque, version-gated
    pub unknown_2: Option<u32>,
    /// One entry per conductor layer, top first
    pub entries: Vec<LayerEntry>,
    /// This object's key
    pub key: Key,
}

/// A [`LayerList`] entry
#[derive(Debug, Clone, PartialEq)]
pub enum LayerEntry {
    /// Older files store the name inline
    Named(String),
    /// Newer files refer to the string table
    Reference {
        /// Layer name
        name: u32,
        /// Layer property word, not yet decoded
        properties: u32,
        /// Opaque
        unknown: u32,
    },
}

impl LayerEntry {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        if ctx.has(Field::LayerListNamed) {
            return Ok(LayerEntry::Named(cur.read_fixed_ascii(36)?));
        }
        Ok(LayerEntry::Reference {
            name: read(cur, ctx)?,
            properties: read(cur, ctx)?,
            unknown: read(cur, ctx)?,
        })
    }
}

impl Decode for LayerList {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let unknown_1 = read(cur, ctx)?;
        let count: u16 = read(cur, ctx)?;
        let unknown_2 = ctx.read_if(Field::LayerListExtra, cur)?;
        let entries = (0..count)
            .map(|_| LayerEntry::decode(cur, ctx))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            unknown_1,
            unknown_2,
            entries,
            key: read(cur, ctx)?,
        })
    }
}

/// 0x2C: named table
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Opaque, version-gated
    pub unknown_3: Option<[u32; 3]>,
    /// Table name
    pub name: u32,
    /// Opaque, version-gated
    pub unknown_4: Option<u32>,
    /// Unidentified object references
    pub pointers: [Key; 3],
    /// Flag word, not yet decoded
    pub flags: u32,
}

impl Decode for Table {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            unknown_3: ctx.read_if(Field::TableExtra, cur)?,
            name: read(cur, ctx)?,
            unknown_4: ctx.read_if(Field::TableLegacy, cur)?,
            pointers: read(cur, ctx)?,
            flags: read(cur, ctx)?,
        })
    }
}

/// 0x2E
#[derive(Debug, Clone, PartialEq)]
pub struct X2e {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Opaque
    pub unknown_3: [u32; 7],
    /// Opaque, version-gated
    pub unknown_4: Option<u32>,
}

impl Decode for X2e {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            unknown_4: ctx.read_if(Field::X2eExtra, cur)?,
        })
    }
}

/// 0x2F
#[derive(Debug, Clone, PartialEq)]
pub struct X2f {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Opaque
    pub unknown_3: [u32; 6],
}

impl Decode for X2f {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
        })
    }
}

/// 0x35: fixed template block
#[derive(Debug, Clone, PartialEq)]
pub struct FileTemplate {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// The opaque template block
    pub content: Vec<u8>,
}

impl FileTemplate {
    /// Length of [`FileTemplate::content`]
    pub const CONTENT_LEN: usize = 120;
}

impl Decode for FileTemplate {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            content: cur.read_bytes(Self::CONTENT_LEN)?.to_vec(),
        })
    }
}

/// 0x36: definition table; `code` selects the item layout
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionTable {
    /// Opaque
    pub unknown_1: u8,
    /// Item layout selector
    pub code: u16,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Opaque, version-gated
    pub unknown_2: Option<u32>,
    /// Declared entry count, not always the item count
    pub count: u32,
    /// Index of the last used entry
    pub last_index: u32,
    /// Opaque
    pub unknown_3: u32,
    /// Opaque, version-gated
    pub unknown_4: Option<u32>,
    /// The items, all of the layout `code` selects
    pub items: Vec<DefinitionItem>,
}

/// Font metrics, the items of a code 0x08 table
#[derive(Debug, Clone, PartialEq)]
pub struct FontDef {
    /// Opaque
    pub unknown_1: u32,
    /// Opaque
    pub unknown_2: u32,
    /// Character height
    pub char_height: u32,
    /// Character width
    pub char_width: u32,
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
    /// Opaque
    pub unknown_4: [u32; 4],
    /// Opaque, version-gated
    pub unknown_5: Option<[u32; 8]>,
}

impl Decode for FontDef {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            char_height: read(cur, ctx)?,
            char_width: read(cur, ctx)?,
            unknown_3: ctx.read_if(Field::DefFontExtra, cur)?,
            unknown_4: read(cur, ctx)?,
            unknown_5: ctx.read_if(Field::DefFontTail, cur)?,
        })
    }
}

/// One item of a [`DefinitionTable`]
#[derive(Debug, Clone, PartialEq)]
pub enum DefinitionItem {
    /// Code 0x02
    Entry {
        /// Fixed 32-byte name
        name: String,
        /// Opaque
        words: [u32; 14],
        /// Opaque, version-gated
        extra: Option<[u32; 3]>,
        /// Opaque, version-gated
        trailer: Option<[u32; 2]>,
    },
    /// Code 0x03
    Label {
        /// Fixed 64-byte name in newer files, 32-byte before
        name: String,
        /// Opaque, version-gated
        extra: Option<u32>,
    },
    /// Code 0x05
    Reference {
        /// Opaque 28-byte block
        data: Vec<u8>,
        /// Opaque, version-gated
        pointer: Option<Key>,
    },
    /// Code 0x06
    Small {
        /// Entry number
        number: u16,
        /// Opaque
        r: u8,
        /// Opaque
        s: u8,
        /// Opaque
        unknown: u32,
        /// Opaque 50-word block of older files
        legacy: Option<Vec<u32>>,
    },
    /// Code 0x08
    Font(FontDef),
    /// Code 0x0B
    Raw(Vec<u8>),
    /// Codes 0x0C, 0x0D, 0x0F and 0x10
    Words(Vec<u32>),
}

/// Item layouts of a [`DefinitionTable`], one per known code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemLayout {
    Entry,
    Label,
    Reference,
    Small,
    Font,
    Raw,
    Words8,
    Words0d,
    Words4,
    Words10,
}

impl ItemLayout {
    fn from_code(code: u16) -> Option<Self> {
        let layout = match code {
            0x02 => ItemLayout::Entry,
            0x03 => ItemLayout::Label,
            0x05 => ItemLayout::Reference,
            0x06 => ItemLayout::Small,
            0x08 => ItemLayout::Font,
            0x0B => ItemLayout::Raw,
            0x0C => ItemLayout::Words8,
            0x0D => ItemLayout::Words0d,
            0x0F => ItemLayout::Words4,
            0x10 => ItemLayout::Words10,
            _ => return None,
        };
        Some(layout)
    }
}

impl DefinitionItem {
    /// Whether `code` selects a known item layout
    pub fn is_known_code(code: u16) -> bool {
        ItemLayout::from_code(code).is_some()
    }

    fn decode(layout: ItemLayout, cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let item = match layout {
            ItemLayout::Entry => DefinitionItem::Entry {
                name: cur.read_fixed_ascii(32)?,
                words: read(cur, ctx)?,
                extra: ctx.read_if(Field::DefItem02Extra, cur)?,
                trailer: ctx.read_if(Field::DefItem02Trailer, cur)?,
            },
            ItemLayout::Label => {
                let len = if ctx.has(Field::DefItem03LongName) { 64 } else { 32 };
                DefinitionItem::Label {
                    name: cur.read_fixed_ascii(len)?,
                    extra: ctx.read_if(Field::DefItem03Extra, cur)?,
                }
            }
            ItemLayout::Reference => DefinitionItem::Reference {
                data: cur.read_bytes(28)?.to_vec(),
                pointer: ctx.read_if(Field::DefItem05Pointer, cur)?,
            },
            ItemLayout::Small => DefinitionItem::Small {
                number: read(cur, ctx)?,
                r: read(cur, ctx)?,
                s: read(cur, ctx)?,
                unknown: read(cur, ctx)?,
                legacy: if ctx.has(Field::DefItem06Legacy) {
                    Some(decode_vec(cur, ctx, 50)?)
                } else {
                    None
                },
            },
            ItemLayout::Font => DefinitionItem::Font(read(cur, ctx)?),
            ItemLayout::Raw => DefinitionItem::Raw(cur.read_bytes(1016)?.to_vec()),
            ItemLayout::Words8 => DefinitionItem::Words(decode_vec(cur, ctx, 8)?),
            ItemLayout::Words0d => {
                DefinitionItem::Words(gated_words(cur, ctx, 5, Field::DefItem0dExtra, 2)?)
            }
            ItemLayout::Words4 => DefinitionItem::Words(decode_vec(cur, ctx, 4)?),
            ItemLayout::Words10 => {
                DefinitionItem::Words(gated_words(cur, ctx, 26, Field::DefItem10Extra, 2)?)
            }
        };
        Ok(item)
    }
}

/// `fixed` words, plus `extra` more when `field` is present
fn gated_words(
    cur: &mut Cursor<'_>,
    ctx: &DecodeContext,
    fixed: usize,
    field: Field,
    extra: usize,
) -> Result<Vec<u32>> {
    let n = if ctx.has(field) { fixed + extra } else { fixed };
    decode_vec(cur, ctx, n)
}

impl Decode for DefinitionTable {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let unknown_1 = read(cur, ctx)?;
        let code: u16 = read(cur, ctx)?;
        let code_end = cur.position();
        let key = read(cur, ctx)?;
        let next = read(cur, ctx)?;
        let unknown_2 = ctx.read_if(Field::DefTableExtra, cur)?;
        let num_items: u32 = read(cur, ctx)?;
        let count = read(cur, ctx)?;
        let last_index = read(cur, ctx)?;
        let unknown_3 = read(cur, ctx)?;
        let unknown_4 = ctx.read_if(Field::DefTableTrailer, cur)?;

        let layout = ItemLayout::from_code(code)
            .ok_or_else(|| Error::unrecognized_subtype(code_end, u32::from(code)))?;
        let items = (0..num_items)
            .map(|_| DefinitionItem::decode(layout, cur, ctx))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            unknown_1,
            code,
            key,
            next,
            unknown_2,
            count,
            last_index,
            unknown_3,
            unknown_4,
            items,
        })
    }
}

/// 0x37: fixed-capacity key array
#[derive(Debug, Clone, PartialEq)]
pub struct PointerArray {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Unidentified object reference
    pub pointer: Key,
    /// Opaque
    pub unknown_3: u32,
    /// Number of stored slots
    pub capacity: u32,
    /// Slots in use; the rest are null
    pub count: u32,
    /// Opaque
    pub unknown_4: u32,
    /// Every stored slot, used or not
    pub entries: Vec<Key>,
    /// Opaque, version-gated
    pub unknown_5: Option<u32>,
}

impl PointerArray {
    /// The occupied slots
    pub fn used(&self) -> &[Key] {
        let n = (self.count as usize).min(self.entries.len());
        &self.entries[..n]
    }
}

impl Decode for PointerArray {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let unknown_1 = read(cur, ctx)?;
        let unknown_2 = read(cur, ctx)?;
        let key = read(cur, ctx)?;
        let pointer = read(cur, ctx)?;
        let unknown_3 = read(cur, ctx)?;
        let capacity: u32 = read(cur, ctx)?;
        let count = read(cur, ctx)?;
        let unknown_4 = read(cur, ctx)?;
        let entries = decode_vec(cur, ctx, capacity as usize)?;
        Ok(Self {
            unknown_1,
            unknown_2,
            key,
            pointer,
            unknown_3,
            capacity,
            count,
            unknown_4,
            entries,
            unknown_5: ctx.read_if(Field::PointerArrayTrailer, cur)?,
        })
    }
}

/// Film name, inline in older files
#[derive(Debug, Clone, PartialEq)]
pub enum FilmName {
    /// Fixed 20-byte name
    Fixed(String),
    /// String table reference
    Reference {
        /// Film name
        name: u32,
        /// Opaque
        unknown: u32,
    },
}

/// 0x38: artwork film
#[derive(Debug, Clone, PartialEq)]
pub struct Film {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// The 0x39 film layer list
    pub layer_list: Key,
    /// Film name
    pub name: FilmName,
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
    /// Opaque
    pub unknown_4: [u32; 7],
}

impl Decode for Film {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let unknown_1 = read(cur, ctx)?;
        let unknown_2 = read(cur, ctx)?;
        let key = read(cur, ctx)?;
        let next = read(cur, ctx)?;
        let layer_list = read(cur, ctx)?;
        let name = if ctx.has(Field::FilmFixedName) {
            FilmName::Fixed(cur.read_fixed_ascii(20)?)
        } else {
            FilmName::Reference {
                name: read(cur, ctx)?,
                unknown: read(cur, ctx)?,
            }
        };
        Ok(Self {
            unknown_1,
            unknown_2,
            key,
            next,
            layer_list,
            name,
            unknown_3: ctx.read_if(Field::FilmTrailer, cur)?,
            unknown_4: read(cur, ctx)?,
        })
    }
}

/// 0x39: layer list of a film
#[derive(Debug, Clone, PartialEq)]
pub struct FilmLayerList {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Owning object
    pub parent: Key,
    /// First 0x3A node
    pub head: Key,
    /// Opaque
    pub unknown_3: [u16; 22],
}

impl Decode for FilmLayerList {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            key: read(cur, ctx)?,
            parent: read(cur, ctx)?,
            head: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
        })
    }
}

/// 0x3A: one layer of a film layer list
#[derive(Debug, Clone, PartialEq)]
pub struct FilmLayerListNode {
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
}

impl Decode for FilmLayerListNode {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            subtype: read(cur, ctx)?,
            layer: read(cur, ctx)?,
            key: read(cur, ctx)?,
            next: read(cur, ctx)?,
            unknown_1: read(cur, ctx)?,
            unknown_2: ctx.read_if(Field::FilmLayerNodeTrailer, cur)?,
        })
    }
}

/// 0x3B: property definition
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    /// Subtype byte
    pub subtype: u8,
    /// Property name, fixed 128-byte text
    pub name: String,
    /// Property type, fixed 32-byte text
    pub kind: String,
    /// Opaque
    pub unknown_1: u32,
    /// Opaque
    pub unknown_2: u32,
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
    /// Property value
    pub value: String,
}

impl Decode for PropertyDef {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let subtype = read(cur, ctx)?;
        let len: u16 = read(cur, ctx)?;
        let name = cur.read_fixed_ascii(128)?;
        let kind = cur.read_fixed_ascii(32)?;
        let unknown_1 = read(cur, ctx)?;
        let unknown_2 = read(cur, ctx)?;
        let unknown_3 = ctx.read_if(Field::PropertyDefExtra, cur)?;
        let value = cur.read_string_aligned(usize::from(len))?;
        Ok(Self {
            subtype,
            name,
            kind,
            unknown_1,
            unknown_2,
            unknown_3,
            value,
        })
    }
}

/// 0x3C: counted key list
#[derive(Debug, Clone, PartialEq)]
pub struct KeyList {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Opaque, version-gated
    pub unknown_3: Option<u32>,
    /// The listed keys
    pub entries: Vec<Key>,
}

impl Decode for KeyList {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let unknown_1 = read(cur, ctx)?;
        let unknown_2 = read(cur, ctx)?;
        let key = read(cur, ctx)?;
        let unknown_3 = ctx.read_if(Field::KeyListExtra, cur)?;
        let count: u32 = read(cur, ctx)?;
        Ok(Self {
            unknown_1,
            unknown_2,
            key,
            unknown_3,
            entries: decode_vec(cur, ctx, count as usize)?,
        })
    }
}
