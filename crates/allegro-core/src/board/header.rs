//! The fixed 4608-byte file header.

use crate::cursor::Cursor;
use crate::error::Result;
use crate::record::Key;
use std::fmt;
use std::str::FromStr;

/// Size of the header; the string table starts here
pub const HEADER_SIZE: usize = 4608;

/// Number of linked-list descriptors in the header
pub const LINKED_LIST_COUNT: usize = 22;

/// Number of layer map entries in the header
pub const LAYER_MAP_LEN: usize = 25;

/// Descriptors stored before the x35 offsets; the rest follow them
const LEADING_LISTS: usize = 18;

/// Head and tail keys of one object chain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LinkedList {
    /// First member, or null for an empty list
    pub head: Key,
    /// Last member
    pub tail: Key,
}

impl LinkedList {
    /// Whether the chain has no members
    pub fn is_empty(&self) -> bool {
        self.head.is_null()
    }
}

macro_rules! linked_list_names {
    ($($variant:ident => $name:literal,)+) => {
        /// The header's linked-list descriptors, in file order
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum LinkedListName {
            $(#[doc = concat!("The `", $name, "` list")] $variant,)+
        }

        impl LinkedListName {
            /// Every list, in file order
            pub const ALL: [LinkedListName; LINKED_LIST_COUNT] = [$(LinkedListName::$variant,)+];

            /// Snake-case name, as used in reports
            pub fn as_str(self) -> &'static str {
                match self {
                    $(LinkedListName::$variant => $name,)+
                }
            }
        }
    };
}

linked_list_names! {
    X04 => "x04",
    X06 => "x06",
    X0c => "x0c",
    X0eX28 => "x0e_x28",
    X14 => "x14",
    X1b => "x1b",
    X1c => "x1c",
    X24X28 => "x24_x28",
    Unused1 => "unused_1",
    X2b => "x2b",
    X03X30 => "x03_x30",
    X0a => "x0a",
    X1dX1eX1f => "x1d_x1e_x1f",
    Unused2 => "unused_2",
    X38 => "x38",
    X2c => "x2c",
    X0c2 => "x0c_2",
    Unused3 => "unused_3",
    X36 => "x36",
    Unused5 => "unused_5",
    Unused6 => "unused_6",
    X0a2 => "x0a_2",
}

impl LinkedListName {
    /// Position of this list in the header
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LinkedListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown list name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownListName(pub String);

impl fmt::Display for UnknownListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown linked list '{}'", self.0)
    }
}

impl std::error::Error for UnknownListName {}

impl FromStr for LinkedListName {
    type Err = UnknownListName;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownListName(s.to_string()))
    }
}

/// Unit system of board coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardUnits {
    /// Mils (0x01)
    Imperial,
    /// Millimetres (0x03)
    Metric,
    /// Any other value, kept raw
    Other(u8),
}

impl From<u8> for BoardUnits {
    fn from(value: u8) -> Self {
        match value {
            0x01 => BoardUnits::Imperial,
            0x03 => BoardUnits::Metric,
            other => BoardUnits::Other(other),
        }
    }
}

/// One layer map entry; both words are unidentified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LayerMapEntry {
    /// Opaque
    pub a: u32,
    /// Opaque
    pub b: u32,
}

/// Decoded file header
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// File magic; the low byte is a revision the decoder ignores
    pub magic: u32,
    /// Opaque
    pub unknown_1: [u32; 4],
    /// Advisory; the decoder reads objects until end of data regardless
    pub object_count: u32,
    /// Opaque
    pub unknown_2: [u32; 9],
    /// List descriptors, indexed by [`LinkedListName::index`]
    pub linked_lists: [LinkedList; LINKED_LIST_COUNT],
    /// Start offset of the 0x35 block
    pub x35_start: u32,
    /// End offset of the 0x35 block
    pub x35_end: u32,
    /// Opaque
    pub unknown_3: u32,
    /// Writer version string, e.g. "allegro_16.6"
    pub allegro_version: String,
    /// Opaque
    pub unknown_4: u32,
    /// Highest key in use
    pub max_key: u32,
    /// Opaque
    pub unknown_5: [u32; 17],
    /// Coordinate unit system
    pub units: BoardUnits,
    /// Opaque
    pub unknown_6: [u8; 3],
    /// Opaque
    pub unknown_7: [u32; 2],
    /// One past the last byte of the 0x27 block
    pub x27_end_offset: u32,
    /// Opaque
    pub unknown_8: u32,
    /// Number of string table entries
    pub strings_count: u32,
    /// Opaque
    pub unknown_9: Vec<u32>,
    /// Layer map entries
    pub layer_map: [LayerMapEntry; LAYER_MAP_LEN],
    /// Words between the layer map and the end of the header
    pub trailer: Vec<u32>,
}

fn words<const N: usize>(cur: &mut Cursor<'_>) -> Result<[u32; N]> {
    let mut out = [0u32; N];
    for word in out.iter_mut() {
        *word = cur.read_u32()?;
    }
    Ok(out)
}

fn linked_list(cur: &mut Cursor<'_>) -> Result<LinkedList> {
    Ok(LinkedList {
        head: Key(cur.read_u32()?),
        tail: Key(cur.read_u32()?),
    })
}

impl Header {
    /// Decodes the header from the start of the file.
    ///
    /// Leaves the cursor at [`HEADER_SIZE`].
    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let magic = cur.read_u32()?;
        let unknown_1 = words(cur)?;
        let object_count = cur.read_u32()?;
        let unknown_2 = words(cur)?;

        let mut linked_lists = [LinkedList::default(); LINKED_LIST_COUNT];
        for list in &mut linked_lists[..LEADING_LISTS] {
            *list = linked_list(cur)?;
        }
        let x35_start = cur.read_u32()?;
        let x35_end = cur.read_u32()?;
        for list in &mut linked_lists[LEADING_LISTS..] {
            *list = linked_list(cur)?;
        }

        let unknown_3 = cur.read_u32()?;
        let allegro_version = cur.read_fixed_ascii(60)?;
        let unknown_4 = cur.read_u32()?;
        let max_key = cur.read_u32()?;
        let unknown_5 = words(cur)?;
        let units = BoardUnits::from(cur.read_u8()?);
        let unknown_6 = cur.read_array()?;
        let unknown_7 = words(cur)?;
        let x27_end_offset = cur.read_u32()?;
        let unknown_8 = cur.read_u32()?;
        let strings_count = cur.read_u32()?;
        let unknown_9 = words::<110>(cur)?.to_vec();

        let mut layer_map = [LayerMapEntry::default(); LAYER_MAP_LEN];
        for entry in layer_map.iter_mut() {
            entry.a = cur.read_u32()?;
            entry.b = cur.read_u32()?;
        }
        let trailer = cur.read_u32s_until(HEADER_SIZE)?;

        Ok(Self {
            magic,
            unknown_1,
            object_count,
            unknown_2,
            linked_lists,
            x35_start,
            x35_end,
            unknown_3,
            allegro_version,
            unknown_4,
            max_key,
            unknown_5,
            units,
            unknown_6,
            unknown_7,
            x27_end_offset,
            unknown_8,
            strings_count,
            unknown_9,
            layer_map,
            trailer,
        })
    }

    /// The descriptor of a named list
    pub fn linked_list(&self, name: LinkedListName) -> LinkedList {
        self.linked_lists[name.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testutil::HeaderBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_names_round_trip() {
        for (i, name) in LinkedListName::ALL.iter().enumerate() {
            assert_eq!(name.index(), i);
            assert_eq!(name.as_str().parse::<LinkedListName>(), Ok(*name));
        }
        assert_eq!(LinkedListName::X0eX28.to_string(), "x0e_x28");
        assert_eq!(LinkedListName::X0a2.to_string(), "x0a_2");
        assert!("x99".parse::<LinkedListName>().is_err());
    }

    #[test]
    fn test_header_field_offsets() {
        let mut builder = HeaderBuilder::new(0x0014_0400)
            .objects(7)
            .strings(3)
            .x27_end(0x2000)
            .list(0, 0x11, 0x12)
            .list(17, 0x21, 0x22)
            .list(18, 0x31, 0x32)
            .list(21, 0x41, 0x42);
        builder.units = 0x03;
        builder.version_text = "allegro_16.6".into();
        builder.layer_map = vec![(1, 2); LAYER_MAP_LEN];
        let data = builder.build().into_vec();
        assert_eq!(data.len(), HEADER_SIZE);

        let mut cur = Cursor::new(&data);
        let header = Header::decode(&mut cur).unwrap();
        assert_eq!(cur.position(), HEADER_SIZE);
        assert_eq!(header.magic, 0x0014_0400);
        assert_eq!(header.object_count, 7);
        assert_eq!(header.strings_count, 3);
        assert_eq!(header.x27_end_offset, 0x2000);
        assert_eq!(header.units, BoardUnits::Metric);
        assert_eq!(header.allegro_version, "allegro_16.6");
        assert_eq!(
            header.linked_list(LinkedListName::X04),
            LinkedList {
                head: Key(0x11),
                tail: Key(0x12)
            }
        );
        assert_eq!(header.linked_list(LinkedListName::Unused3).head, Key(0x21));
        assert_eq!(header.linked_list(LinkedListName::X36).head, Key(0x31));
        assert_eq!(header.linked_list(LinkedListName::X0a2).tail, Key(0x42));
        assert!(header.linked_list(LinkedListName::X06).is_empty());
        assert_eq!(header.layer_map[24], LayerMapEntry { a: 1, b: 2 });
        assert_eq!(header.trailer.len(), (HEADER_SIZE - 1048) / 4);
    }

    #[test]
    fn test_truncated_header() {
        let data = HeaderBuilder::new(0x0014_0400).build().into_vec();
        let mut cur = Cursor::new(&data[..300]);
        assert!(matches!(
            Header::decode(&mut cur),
            Err(Error::UnexpectedEof { .. })
        ));
    }
}
