//! # allegro-core
//!
//! A decoder for Cadence Allegro `.brd` board and `.dra` footprint files.
//!
//! The format is an undocumented binary layout: a fixed header, a string
//! table, and a flat stream of self-typed objects with no length prefixes,
//! chained into lists through integer keys. Record layouts change between
//! writer versions, so every decode is driven by the version in the magic.
//!
//! ## Architecture
//!
//! - [`cursor`]: sequential byte reader with bit fields and alignment
//! - [`version`]: version gates and the per-field presence table
//! - [`record`]: one decoder per object type
//! - [`board`]: header, string table and the object loop
//! - [`index`]: key and string lookup, linked-list walks
//! - [`error`]: error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use allegro_core::{decode_file, Record};
//!
//! let board = decode_file("board.brd")?;
//! println!("{} objects, version {}", board.objects().len(), board.version());
//!
//! let index = board.index();
//! for object in board.objects() {
//!     if let Record::Net(net) = object.record() {
//!         println!("net {}", index.string(net.name)?);
//!     }
//! }
//! # Ok::<(), allegro_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod board;
pub mod cursor;
pub mod error;
pub mod index;
pub mod record;
pub mod version;

#[cfg(test)]
mod testutil;

// Re-export primary types for convenience
pub use board::{
    decode, decode_file, decode_reader, decode_with_config, Board, BoardDecoder, DecoderConfig,
    Header, LinkedList, LinkedListName, StringEntry,
};
pub use error::{Error, ObjectContext, Result};
pub use index::{BoardIndex, LinkedListWalk};
pub use record::{BoardObject, DecodeContext, Key, Record};
pub use version::{Field, FieldPlan, VersionGate};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
