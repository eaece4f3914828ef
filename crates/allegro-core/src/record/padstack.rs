//! Padstacks and their per-layer component tables.

use super::{decode_vec, read, Coords, Decode, DecodeContext, Key};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::version::{Field, VersionGate};

/// 0x1C: padstack definition
#[derive(Debug, Clone, PartialEq)]
pub struct Padstack {
    /// Padstack type byte, not yet decoded
    pub kind: u8,
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u8,
    /// This object's key
    pub key: Key,
    /// Next member of the chain
    pub next: Key,
    /// Padstack name
    pub name: u32,
    /// Drill diameter
    pub drill: u32,
    /// Opaque
    pub unknown_3: u32,
    /// Library file path
    pub path: u32,
    /// Opaque
    pub unknown_4: [u32; 2],
    /// Opaque, version-gated
    pub unknown_5: Option<[u32; 8]>,
    /// Number of conductor layers the stack covers
    pub layer_count: u16,
    /// Opaque
    pub unknown_6: u16,
    /// Fixed entries first, then one group per layer
    pub components: Vec<PadstackComponent>,
    /// One opaque word per layer, in files that carry them
    pub layer_words: Option<Vec<u32>>,
}

impl Padstack {
    /// Number of component entries stored for a stack of `layer_count` layers.
    ///
    /// Older files carry 10 fixed entries and 3 per layer; newer ones 21 fixed
    /// entries and 4 per layer.
    pub fn component_count(version: VersionGate, layer_count: u16) -> usize {
        let layers = usize::from(layer_count);
        if Field::PadstackWideTable.range().admits(version) {
            21 + layers * 4
        } else {
            10 + layers * 3
        }
    }
}

impl Decode for Padstack {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let kind = read(cur, ctx)?;
        let unknown_1 = read(cur, ctx)?;
        let unknown_2 = read(cur, ctx)?;
        let key = read(cur, ctx)?;
        let next = read(cur, ctx)?;
        let name = read(cur, ctx)?;
        let drill = read(cur, ctx)?;
        let unknown_3 = read(cur, ctx)?;
        let path = read(cur, ctx)?;
        let unknown_4 = read(cur, ctx)?;
        let unknown_5 = ctx.read_if(Field::PadstackExtra, cur)?;
        let layer_count: u16 = read(cur, ctx)?;
        let unknown_6 = read(cur, ctx)?;

        let count = Self::component_count(ctx.gate(), layer_count);
        let components = decode_vec(cur, ctx, count)?;
        let layer_words = if ctx.has(Field::PadstackLayerWords) {
            Some(decode_vec(cur, ctx, usize::from(layer_count))?)
        } else {
            None
        };

        Ok(Self {
            kind,
            unknown_1,
            unknown_2,
            key,
            next,
            name,
            drill,
            unknown_3,
            path,
            unknown_4,
            unknown_5,
            layer_count,
            unknown_6,
            components,
            layer_words,
        })
    }
}

/// One pad, antipad or thermal shape of a padstack
#[derive(Debug, Clone, PartialEq)]
pub struct PadstackComponent {
    /// Shape kind; zero marks an unused slot
    pub kind: u8,
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u8,
    /// Opaque
    pub unknown_3: u8,
    /// Opaque, version-gated
    pub unknown_4: Option<u32>,
    /// Shape width
    pub width: i32,
    /// Shape height
    pub height: i32,
    /// Offset from the pad origin
    pub offset: Coords,
    /// Custom shape, for shape-symbol pads
    pub shape: Key,
    /// Opaque, version-gated
    pub unknown_5: Option<u32>,
}

impl PadstackComponent {
    /// Whether this slot holds no shape
    pub fn is_empty(&self) -> bool {
        self.kind == 0
    }
}

impl Decode for PadstackComponent {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        Ok(Self {
            kind: read(cur, ctx)?,
            unknown_1: read(cur, ctx)?,
            unknown_2: read(cur, ctx)?,
            unknown_3: read(cur, ctx)?,
            unknown_4: ctx.read_if(Field::PadstackComponentExtra, cur)?,
            width: read(cur, ctx)?,
            height: read(cur, ctx)?,
            offset: read(cur, ctx)?,
            shape: read(cur, ctx)?,
            unknown_5: ctx.read_if(Field::PadstackComponentLegacy, cur)?,
        })
    }
}

/// 0x1F: padstack dimension block, kept opaque
#[derive(Debug, Clone, PartialEq)]
pub struct PadstackDimensions {
    /// Opaque
    pub unknown_1: u8,
    /// Opaque
    pub unknown_2: u16,
    /// This object's key
    pub key: Key,
    /// Opaque
    pub unknown_3: [u32; 3],
    /// Entry count that sizes `data`
    pub size: u16,
    /// Opaque
    pub unknown_4: u16,
    /// The dimension block, see [`PadstackDimensions::data_len`]
    pub data: Vec<u8>,
}

impl PadstackDimensions {
    /// Length of the opaque block for a given `size` field
    pub fn data_len(ctx: &DecodeContext, size: u16) -> usize {
        let size = usize::from(size);
        if ctx.has(Field::DimensionsWide) {
            size * 384 + 8
        } else if ctx.has(Field::DimensionsLong) {
            size * 280 + 8
        } else if ctx.has(Field::DimensionsMedium) {
            size * 280 + 4
        } else {
            size * 240 + 4
        }
    }
}

impl Decode for PadstackDimensions {
    fn decode(cur: &mut Cursor<'_>, ctx: &DecodeContext) -> Result<Self> {
        let unknown_1 = read(cur, ctx)?;
        let unknown_2 = read(cur, ctx)?;
        let key = read(cur, ctx)?;
        let unknown_3 = read(cur, ctx)?;
        let size = read(cur, ctx)?;
        let unknown_4 = read(cur, ctx)?;
        let data = cur.read_bytes(Self::data_len(ctx, size))?.to_vec();
        Ok(Self {
            unknown_1,
            unknown_2,
            key,
            unknown_3,
            size,
            unknown_4,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_context;
    use crate::testutil::Bytes;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_component_count_table() {
        let cases = [
            (1246208, 0, 10),
            (1250560, 2, 16),
            (1310720, 4, 22),
            (1311744, 0, 21),
            (1311744, 2, 29),
            (1316096, 4, 37),
        ];
        for (version, layers, expected) in cases {
            assert_eq!(
                Padstack::component_count(VersionGate::new(version), layers),
                expected,
                "version {} layers {}",
                version,
                layers
            );
        }
    }

    fn padstack_bytes(layer_count: u16, components: usize, extra: bool) -> Vec<u8> {
        let mut b = Bytes::new()
            .u8(1)
            .u8(0)
            .u8(0)
            .u32(0x200)
            .u32(0)
            .u32(9)
            .u32(300)
            .zeros(16);
        if extra {
            b = b.zeros(32);
        }
        b = b.u16(layer_count).u16(0);
        for i in 0..components {
            b = b.u8(if i == 0 { 2 } else { 0 }).zeros(3);
            if extra {
                b = b.u32(0);
            }
            b = b.i32(1000).i32(500).zeros(12);
            if !extra {
                b = b.u32(0);
            }
        }
        if extra {
            b = b.zeros(4 * usize::from(layer_count));
        }
        b.into_vec()
    }

    #[test]
    fn test_padstack_consumes_component_table() {
        let data = padstack_bytes(2, 16, false);
        let mut cur = Cursor::new(&data);
        let ps = Padstack::decode(&mut cur, &test_context(1250560)).unwrap();
        assert_eq!(cur.position(), data.len());
        assert_eq!(ps.components.len(), 16);
        assert_eq!(ps.layer_words, None);
        assert_eq!(ps.drill, 300);
        assert!(!ps.components[0].is_empty());
        assert!(ps.components[1].is_empty());
        assert_eq!(ps.components[0].width, 1000);

        let data = padstack_bytes(2, 29, true);
        let mut cur = Cursor::new(&data);
        let ps = Padstack::decode(&mut cur, &test_context(1313024)).unwrap();
        assert_eq!(cur.position(), data.len());
        assert_eq!(ps.components.len(), 29);
        assert_eq!(ps.layer_words, Some(vec![0, 0]));
    }

    #[test]
    fn test_dimensions_block_length() {
        let cases = [
            (1245184, 240 + 4),
            (1246208, 280 + 4),
            (1311744, 280 + 8),
            (1316096, 384 + 8),
        ];
        for (version, len) in cases {
            assert_eq!(PadstackDimensions::data_len(&test_context(version), 1), len);
        }
    }
}
