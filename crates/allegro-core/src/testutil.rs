//! Byte builders for unit tests.

use crate::board::{HEADER_SIZE, LINKED_LIST_COUNT};

/// Little-endian byte buffer builder
#[derive(Debug, Default, Clone)]
pub(crate) struct Bytes {
    buf: Vec<u8>,
}

impl Bytes {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn u8(mut self, v: u8) -> Self {
        self.buf.push(v);
        self
    }

    pub(crate) fn u16(mut self, v: u16) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub(crate) fn u32(mut self, v: u32) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub(crate) fn i32(mut self, v: i32) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub(crate) fn zeros(mut self, n: usize) -> Self {
        self.buf.resize(self.buf.len() + n, 0);
        self
    }

    /// Text padded with NULs to exactly `width` bytes
    pub(crate) fn fixed(mut self, s: &str, width: usize) -> Self {
        assert!(s.len() <= width);
        self.buf.extend_from_slice(s.as_bytes());
        self.zeros(width - s.len())
    }

    /// Pad with zeros to a 4-byte boundary
    pub(crate) fn align4(mut self) -> Self {
        while self.buf.len() % 4 != 0 {
            self.buf.push(0);
        }
        self
    }

    pub(crate) fn bytes(mut self, b: &[u8]) -> Self {
        self.buf.extend_from_slice(b);
        self
    }

    pub(crate) fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

/// Header builder producing the fixed 4608-byte file header
#[derive(Debug, Clone)]
pub(crate) struct HeaderBuilder {
    pub(crate) magic: u32,
    pub(crate) object_count: u32,
    pub(crate) strings_count: u32,
    pub(crate) x27_end_offset: u32,
    pub(crate) lists: [(u32, u32); LINKED_LIST_COUNT],
    pub(crate) units: u8,
    pub(crate) version_text: String,
    pub(crate) layer_map: Vec<(u32, u32)>,
}

impl HeaderBuilder {
    pub(crate) fn new(magic: u32) -> Self {
        Self {
            magic,
            object_count: 0,
            strings_count: 0,
            x27_end_offset: 0,
            lists: [(0, 0); LINKED_LIST_COUNT],
            units: 0x01,
            version_text: "allegro_17.2".to_string(),
            layer_map: Vec::new(),
        }
    }

    pub(crate) fn objects(mut self, n: u32) -> Self {
        self.object_count = n;
        self
    }

    pub(crate) fn strings(mut self, n: u32) -> Self {
        self.strings_count = n;
        self
    }

    pub(crate) fn x27_end(mut self, offset: u32) -> Self {
        self.x27_end_offset = offset;
        self
    }

    pub(crate) fn list(mut self, index: usize, head: u32, tail: u32) -> Self {
        self.lists[index] = (head, tail);
        self
    }

    pub(crate) fn build(&self) -> Bytes {
        let mut b = Bytes::new()
            .u32(self.magic)
            .zeros(16)
            .u32(self.object_count)
            .zeros(36);
        for (head, tail) in &self.lists[..18] {
            b = b.u32(*head).u32(*tail);
        }
        b = b.u32(0).u32(0);
        for (head, tail) in &self.lists[18..] {
            b = b.u32(*head).u32(*tail);
        }
        b = b
            .zeros(4)
            .fixed(&self.version_text, 60)
            .zeros(4)
            .u32(0)
            .zeros(68)
            .u8(self.units)
            .zeros(3)
            .zeros(8)
            .u32(self.x27_end_offset)
            .zeros(4)
            .u32(self.strings_count)
            .zeros(440);
        for i in 0..25 {
            let (a, b2) = self.layer_map.get(i).copied().unwrap_or((0, 0));
            b = b.u32(a).u32(b2);
        }
        let fill = HEADER_SIZE - b.len();
        b.zeros(fill)
    }
}

/// An arc record laid out for version 1311744 and later
pub(crate) fn arc(key: u32, next: u32, start: (i32, i32), end: (i32, i32)) -> Bytes {
    Bytes::new()
        .u8(0x01)
        .u8(0x00)
        .u8(0x06)
        .u8(0x01)
        .u32(key)
        .u32(next)
        .u32(0)
        .u32(0)
        .u32(0)
        .u32(10)
        .i32(start.0)
        .i32(start.1)
        .i32(end.0)
        .i32(end.1)
        .zeros(24)
        .zeros(16)
}

/// A complete file: header followed by `body`
pub(crate) fn file(header: HeaderBuilder, body: &[u8]) -> Vec<u8> {
    header.build().bytes(body).into_vec()
}
