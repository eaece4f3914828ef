//! Error types for the allegro-core library.
//!
//! Decode-time errors are fatal: a record whose true length is unknown cannot
//! be skipped, so the decoder aborts and no partial board is returned. Every
//! decode-time variant carries the byte offset where it happened and, when the
//! failure was inside an object, the [`ObjectContext`] of that object.
//!
//! Lookup errors ([`Error::KeyNotFound`], [`Error::StringNotFound`]) come only
//! from [`BoardIndex`](crate::BoardIndex) and are recoverable by the caller.

use crate::board::LinkedListName;
use crate::record::{Key, Record};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for allegro operations
pub type Result<T> = std::result::Result<T, Error>;

/// The object being decoded when an error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectContext {
    /// Type byte of the object
    pub type_tag: u8,
    /// Offset of the type byte
    pub offset: usize,
}

impl ObjectContext {
    /// Creates a new object context
    pub fn new(type_tag: u8, offset: usize) -> Self {
        Self { type_tag, offset }
    }

    /// Name of the record case for this type byte
    pub fn kind_name(&self) -> &'static str {
        Record::kind_name_for(self.type_tag)
    }
}

impl fmt::Display for ObjectContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (type {:#04x}) at offset {:#x}",
            self.kind_name(),
            self.type_tag,
            self.offset
        )
    }
}

/// Optional object context, rendered as a suffix of the error message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Within(pub Option<ObjectContext>);

impl fmt::Display for Within {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(ctx) => write!(f, " while decoding {}", ctx),
            None => Ok(()),
        }
    }
}

/// Comprehensive error type for all allegro operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The magic number does not belong to a known Allegro file family
    #[error("unsupported magic {magic:#010x}: not an Allegro board or footprint file")]
    UnsupportedMagic {
        /// The magic number found at offset 0
        magic: u32,
    },

    /// Attempted to read past the end of the input
    #[error("unexpected end of data at offset {offset:#x} (need {need} bytes, have {have}){within}")]
    UnexpectedEof {
        /// Offset of the failed read
        offset: usize,
        /// Bytes requested
        need: usize,
        /// Bytes remaining
        have: usize,
        /// Object being decoded
        within: Within,
    },

    /// The object type byte has no known record case
    #[error("unrecognized object type {type_tag:#04x} at offset {offset:#x}")]
    UnrecognizedObjectType {
        /// Offset of the type byte
        offset: usize,
        /// The unknown type byte
        type_tag: u8,
    },

    /// A record subtype selects no known layout
    #[error("unrecognized subtype {subtype:#x} at offset {offset:#x}{within}")]
    UnrecognizedSubtype {
        /// Offset just past the subtype field
        offset: usize,
        /// The unknown subtype value
        subtype: u32,
        /// Object being decoded
        within: Within,
    },

    /// A predicate-terminated array never landed on its target offset
    #[error("read loop stopped at offset {offset:#x} without reaching target {target:#x}{within}")]
    MalformedPredicateLoop {
        /// Offset where the loop gave up
        offset: usize,
        /// Offset the loop was meant to stop at
        target: usize,
        /// Object being decoded
        within: Within,
    },

    /// A self-declared record length is impossible
    #[error("invalid length {length} at offset {offset:#x}{within}")]
    InvalidLength {
        /// Offset of the length field
        offset: usize,
        /// The declared length
        length: u32,
        /// Object being decoded
        within: Within,
    },

    /// No object carries the requested key
    #[error("no object with key {0}")]
    KeyNotFound(Key),

    /// No string table entry has the requested id
    #[error("no string with id {0:#x}")]
    StringNotFound(u32),

    /// A guarded linked-list walk visited the same key twice
    #[error("linked list '{list}' revisits key {key}")]
    BrokenLinkedList {
        /// The list being walked
        list: LinkedListName,
        /// The key seen twice
        key: Key,
    },
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new end-of-data error
    pub fn unexpected_eof(offset: usize, need: usize, have: usize) -> Self {
        Self::UnexpectedEof {
            offset,
            need,
            have,
            within: Within::default(),
        }
    }

    /// Creates a new unknown-subtype error
    pub fn unrecognized_subtype(offset: usize, subtype: u32) -> Self {
        Self::UnrecognizedSubtype {
            offset,
            subtype,
            within: Within::default(),
        }
    }

    /// Creates a new predicate loop error
    pub fn malformed_predicate_loop(offset: usize, target: usize) -> Self {
        Self::MalformedPredicateLoop {
            offset,
            target,
            within: Within::default(),
        }
    }

    /// Creates a new invalid length error
    pub fn invalid_length(offset: usize, length: u32) -> Self {
        Self::InvalidLength {
            offset,
            length,
            within: Within::default(),
        }
    }

    /// Attaches the object context to a decode error.
    ///
    /// An already attached context is kept, so the innermost object wins.
    pub fn within(mut self, ctx: ObjectContext) -> Self {
        match &mut self {
            Self::UnexpectedEof { within, .. }
            | Self::UnrecognizedSubtype { within, .. }
            | Self::MalformedPredicateLoop { within, .. }
            | Self::InvalidLength { within, .. } => {
                if within.0.is_none() {
                    within.0 = Some(ctx);
                }
            }
            _ => {}
        }
        self
    }

    /// Returns the object context, if the error happened inside an object
    pub fn object_context(&self) -> Option<ObjectContext> {
        match self {
            Self::UnexpectedEof { within, .. }
            | Self::UnrecognizedSubtype { within, .. }
            | Self::MalformedPredicateLoop { within, .. }
            | Self::InvalidLength { within, .. } => within.0,
            Self::UnrecognizedObjectType { offset, type_tag } => {
                Some(ObjectContext::new(*type_tag, *offset))
            }
            _ => None,
        }
    }

    /// Returns the byte offset of a decode error
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::UnexpectedEof { offset, .. }
            | Self::UnrecognizedObjectType { offset, .. }
            | Self::UnrecognizedSubtype { offset, .. }
            | Self::MalformedPredicateLoop { offset, .. }
            | Self::InvalidLength { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Returns true for lookup errors the caller can recover from
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::KeyNotFound(_) | Self::StringNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::unexpected_eof(0x1200, 4, 1);
        let msg = err.to_string();
        assert!(msg.contains("0x1200"));
        assert!(msg.contains("need 4 bytes"));
        assert!(!msg.contains("while decoding"));
    }

    #[test]
    fn test_context_in_display() {
        let err = Error::unexpected_eof(0x1210, 4, 0).within(ObjectContext::new(0x01, 0x1200));
        let msg = err.to_string();
        assert!(msg.contains("while decoding Arc (type 0x01) at offset 0x1200"));
        assert_eq!(err.offset(), Some(0x1210));
    }

    #[test]
    fn test_innermost_context_wins() {
        let err = Error::malformed_predicate_loop(10, 20)
            .within(ObjectContext::new(0x27, 8))
            .within(ObjectContext::new(0x01, 0));
        assert_eq!(err.object_context(), Some(ObjectContext::new(0x27, 8)));
    }

    #[test]
    fn test_lookup_errors_carry_no_context() {
        let err = Error::KeyNotFound(Key(7)).within(ObjectContext::new(0x01, 0));
        assert!(err.object_context().is_none());
        assert!(err.offset().is_none());
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::KeyNotFound(Key(1)).is_recoverable());
        assert!(Error::StringNotFound(1).is_recoverable());
        assert!(!Error::unexpected_eof(0, 1, 0).is_recoverable());
        assert!(!Error::UnrecognizedObjectType {
            offset: 0,
            type_tag: 0xff
        }
        .is_recoverable());
    }
}
