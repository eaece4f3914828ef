//! Whole-file decoding.
//!
//! A file is a fixed [`Header`], a table of `strings_count` string entries,
//! then a flat run of objects until the end of the data. Each object is a
//! type byte followed by the record it selects. Objects carry no length, so
//! the run stops at the first record that cannot be decoded and the whole
//! decode fails with it.
//!
//! ```no_run
//! use allegro_core::{decode_file, LinkedListName};
//!
//! let board = decode_file("board.brd")?;
//! let index = board.index();
//! for object in index.walk_linked_list(LinkedListName::X1b) {
//!     println!("{}", object?.kind_name());
//! }
//! # Ok::<(), allegro_core::Error>(())
//! ```

mod header;

use crate::cursor::Cursor;
use crate::error::{Error, ObjectContext, Result};
use crate::index::{BoardIndex, IndexMaps};
use crate::record::{BoardObject, DecodeContext, Record};
use crate::version::VersionGate;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, trace, warn};

pub use header::{
    BoardUnits, Header, LayerMapEntry, LinkedList, LinkedListName, UnknownListName,
    HEADER_SIZE, LAYER_MAP_LEN, LINKED_LIST_COUNT,
};

/// Magic families (`magic >> 16`) of known Allegro files
const KNOWN_FAMILIES: [u32; 2] = [0x0013, 0x0014];

/// One string table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    /// Id that name fields refer to
    pub string_id: u32,
    /// The text, without its terminator
    pub value: String,
}

impl StringEntry {
    fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let string_id = cur.read_u32()?;
        let value = cur.read_strz()?;
        cur.align_to(4)?;
        Ok(Self { string_id, value })
    }
}

/// Configuration for the decoder
#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    /// Decode files whose magic family is not a known Allegro one
    pub accept_unknown_magic: bool,
    /// Keep the starting offset of every object
    pub record_offsets: bool,
}

impl DecoderConfig {
    /// Creates a new decoder config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether unknown magic families are decoded anyway
    pub fn accept_unknown_magic(mut self, accept: bool) -> Self {
        self.accept_unknown_magic = accept;
        self
    }

    /// Sets whether object offsets are recorded
    pub fn record_offsets(mut self, record: bool) -> Self {
        self.record_offsets = record;
        self
    }
}

/// A fully decoded board or footprint file
#[derive(Debug)]
pub struct Board {
    header: Header,
    version: VersionGate,
    strings: Vec<StringEntry>,
    objects: Vec<BoardObject>,
    offsets: Option<Vec<usize>>,
    index: OnceLock<IndexMaps>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.strings == other.strings
            && self.objects == other.objects
            && self.offsets == other.offsets
    }
}

impl Board {
    /// The raw file magic
    pub fn magic(&self) -> u32 {
        self.header.magic
    }

    /// Format version derived from the magic
    pub fn version(&self) -> VersionGate {
        self.version
    }

    /// Object count claimed by the header; may differ from `objects().len()`
    pub fn object_count(&self) -> u32 {
        self.header.object_count
    }

    /// The decoded file header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// String table entries in file order
    pub fn strings(&self) -> &[StringEntry] {
        &self.strings
    }

    /// Objects in file order
    pub fn objects(&self) -> &[BoardObject] {
        &self.objects
    }

    /// Head and tail of a header list
    pub fn linked_list(&self, name: LinkedListName) -> LinkedList {
        self.header.linked_list(name)
    }

    /// The header's layer map
    pub fn layer_map(&self) -> &[LayerMapEntry; LAYER_MAP_LEN] {
        &self.header.layer_map
    }

    /// Starting offset of each object, parallel to [`Board::objects`].
    ///
    /// Present only when decoded with [`DecoderConfig::record_offsets`].
    pub fn object_offsets(&self) -> Option<&[usize]> {
        self.offsets.as_deref()
    }

    /// Key and string lookup, built on first use
    pub fn index(&self) -> BoardIndex<'_> {
        let maps = self
            .index
            .get_or_init(|| IndexMaps::build(&self.objects, &self.strings));
        BoardIndex::new(self, maps)
    }
}

/// Decoder for Allegro board and footprint files
#[derive(Debug, Clone, Default)]
pub struct BoardDecoder {
    config: DecoderConfig,
}

impl BoardDecoder {
    /// Creates a new decoder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new decoder with custom configuration
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    fn check_magic(&self, magic: u32) -> Result<()> {
        if KNOWN_FAMILIES.contains(&(magic >> 16)) {
            return Ok(());
        }
        if self.config.accept_unknown_magic {
            warn!("Decoding unknown magic family {:#06x}", magic >> 16);
            return Ok(());
        }
        Err(Error::UnsupportedMagic { magic })
    }

    /// Decodes a complete file held in memory
    pub fn decode(&self, data: &[u8]) -> Result<Board> {
        debug!("Starting decode of {} bytes", data.len());

        let magic = Cursor::new(data).read_u32()?;
        self.check_magic(magic)?;

        let mut cur = Cursor::new(data);
        let header = Header::decode(&mut cur)?;
        let version = VersionGate::from_magic(header.magic);
        debug!(
            "Header: magic {:#010x}, version {}, {} objects, {} strings",
            header.magic, version, header.object_count, header.strings_count
        );

        let strings = (0..header.strings_count)
            .map(|_| StringEntry::decode(&mut cur))
            .collect::<Result<Vec<_>>>()?;
        debug!("String table ends at offset {:#x}", cur.position());

        let ctx = DecodeContext::new(version, header.x27_end_offset);
        let capacity = (header.object_count as usize).min(cur.remaining() / 4);
        let mut objects = Vec::with_capacity(capacity);
        let mut offsets = self.config.record_offsets.then(Vec::new);

        while !cur.is_eof() {
            let offset = cur.position();
            let type_tag = cur.read_u8()?;
            let record = Record::decode(type_tag, offset, &mut cur, &ctx)
                .map_err(|e| e.within(ObjectContext::new(type_tag, offset)))?;
            trace!(
                "{} (type {:#04x}) at {:#x}..{:#x}",
                record.kind_name(),
                type_tag,
                offset,
                cur.position()
            );
            objects.push(BoardObject::new(type_tag, record));
            if let Some(offsets) = offsets.as_mut() {
                offsets.push(offset);
            }
        }

        if objects.len() != header.object_count as usize {
            warn!(
                "Decoded {} objects, header claims {}",
                objects.len(),
                header.object_count
            );
        }
        debug!("Decode complete: {} objects", objects.len());

        Ok(Board {
            header,
            version,
            strings,
            objects,
            offsets,
            index: OnceLock::new(),
        })
    }
}

/// Decodes a file held in memory with the default configuration
pub fn decode(data: &[u8]) -> Result<Board> {
    BoardDecoder::new().decode(data)
}

/// Decodes a file held in memory with custom configuration
pub fn decode_with_config(data: &[u8], config: DecoderConfig) -> Result<Board> {
    BoardDecoder::with_config(config).decode(data)
}

/// Reads a source to the end, then decodes it
pub fn decode_reader(mut reader: impl Read) -> Result<Board> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|e| Error::file_read("<reader>", e))?;
    decode(&data)
}

/// Reads a file, then decodes it
pub fn decode_file(path: impl AsRef<Path>) -> Result<Board> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
    decode(&data)
}
