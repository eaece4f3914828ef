//! Key and string lookup over a decoded [`Board`].
//!
//! Objects refer to each other only by [`Key`]. The index maps keys and string
//! ids to positions once, the first time [`Board::index`] is called, and every
//! later call reuses the same maps.

use crate::board::{Board, LinkedListName, StringEntry};
use crate::error::{Error, Result};
use crate::record::{BoardObject, Key};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Position maps backing a [`BoardIndex`]
#[derive(Debug, Default)]
pub(crate) struct IndexMaps {
    objects: HashMap<Key, usize>,
    strings: HashMap<u32, usize>,
}

impl IndexMaps {
    pub(crate) fn build(objects: &[BoardObject], strings: &[StringEntry]) -> Self {
        let mut maps = Self {
            objects: HashMap::with_capacity(objects.len()),
            strings: HashMap::with_capacity(strings.len()),
        };
        for (i, object) in objects.iter().enumerate() {
            let Some(key) = object.key().filter(|k| !k.is_null()) else {
                continue;
            };
            if maps.objects.contains_key(&key) {
                trace!("Duplicate key {} at object {}, keeping the first", key, i);
                continue;
            }
            maps.objects.insert(key, i);
        }
        for (i, entry) in strings.iter().enumerate() {
            maps.strings.entry(entry.string_id).or_insert(i);
        }
        debug!(
            "Built index: {} keys, {} strings",
            maps.objects.len(),
            maps.strings.len()
        );
        maps
    }
}

/// Read-only lookup view of a board
#[derive(Debug, Clone, Copy)]
pub struct BoardIndex<'a> {
    board: &'a Board,
    maps: &'a IndexMaps,
}

impl<'a> BoardIndex<'a> {
    pub(crate) fn new(board: &'a Board, maps: &'a IndexMaps) -> Self {
        Self { board, maps }
    }

    /// The object carrying `key`. `Key(0)` never resolves.
    pub fn object(&self, key: Key) -> Result<&'a BoardObject> {
        self.maps
            .objects
            .get(&key)
            .map(|&i| &self.board.objects()[i])
            .ok_or(Error::KeyNotFound(key))
    }

    /// The string table text with id `id`
    pub fn string(&self, id: u32) -> Result<&'a str> {
        self.maps
            .strings
            .get(&id)
            .map(|&i| self.board.strings()[i].value.as_str())
            .ok_or(Error::StringNotFound(id))
    }

    /// Whether some object carries `key`
    pub fn contains(&self, key: Key) -> bool {
        self.maps.objects.contains_key(&key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.maps.objects.len()
    }

    /// Whether no object carries a key
    pub fn is_empty(&self) -> bool {
        self.maps.objects.is_empty()
    }

    /// Walks a header list from its head, following each object's `next`.
    ///
    /// The walk ends after the list's tail, at a null key, or after an object
    /// that has no `next` field. A missing key yields
    /// [`Error::KeyNotFound`] and ends the walk.
    pub fn walk_linked_list(&self, name: LinkedListName) -> LinkedListWalk<'a> {
        let list = self.board.linked_list(name);
        LinkedListWalk {
            index: *self,
            name,
            next: Some(list.head),
            tail: list.tail,
            visited: None,
        }
    }
}

/// Iterator over the members of one linked list
#[derive(Debug, Clone)]
pub struct LinkedListWalk<'a> {
    index: BoardIndex<'a>,
    name: LinkedListName,
    next: Option<Key>,
    tail: Key,
    visited: Option<HashSet<Key>>,
}

impl<'a> LinkedListWalk<'a> {
    /// Stops with [`Error::BrokenLinkedList`] when a key comes up twice.
    ///
    /// Without this the walk of a cyclic chain never ends.
    pub fn guarded(mut self) -> Self {
        self.visited = Some(HashSet::new());
        self
    }
}

impl<'a> Iterator for LinkedListWalk<'a> {
    type Item = Result<&'a BoardObject>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.next.take().filter(|k| !k.is_null())?;
        if let Some(visited) = self.visited.as_mut() {
            if !visited.insert(key) {
                return Some(Err(Error::BrokenLinkedList {
                    list: self.name,
                    key,
                }));
            }
        }
        let object = match self.index.object(key) {
            Ok(object) => object,
            Err(e) => return Some(Err(e)),
        };
        if key != self.tail {
            self.next = object.next();
        }
        Some(Ok(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::decode;
    use crate::testutil::{arc, file, Bytes, HeaderBuilder};
    use pretty_assertions::assert_eq;

    const MAGIC: u32 = 0x0014_0400;

    fn chain(links: &[(u32, u32)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (i, &(key, next)) in links.iter().enumerate() {
            let x = i as i32;
            body.extend(arc(key, next, (x, x), (x + 1, x + 1)).into_vec());
        }
        body
    }

    fn keys(walk: LinkedListWalk<'_>) -> Vec<Result<Key>> {
        walk.map(|r| r.map(|o| o.key().unwrap_or_default())).collect()
    }

    fn list_board(links: &[(u32, u32)], head: u32, tail: u32) -> Board {
        let header = HeaderBuilder::new(MAGIC)
            .objects(links.len() as u32)
            .list(LinkedListName::X14.index(), head, tail);
        decode(&file(header, &chain(links))).unwrap()
    }

    #[test]
    fn test_walk_follows_next_until_null() {
        let board = list_board(&[(0x10, 0x11), (0x11, 0x12), (0x12, 0)], 0x10, 0x12);
        let walked: Vec<Key> = board
            .index()
            .walk_linked_list(LinkedListName::X14)
            .map(|r| r.unwrap().key().unwrap())
            .collect();
        assert_eq!(walked, vec![Key(0x10), Key(0x11), Key(0x12)]);
    }

    #[test]
    fn test_walk_stops_after_tail() {
        let board = list_board(&[(0x10, 0x11), (0x11, 0x12), (0x12, 0)], 0x10, 0x11);
        let walked = keys(board.index().walk_linked_list(LinkedListName::X14));
        assert_eq!(walked.len(), 2);
    }

    #[test]
    fn test_empty_list() {
        let board = list_board(&[(0x10, 0)], 0, 0);
        assert_eq!(
            board.index().walk_linked_list(LinkedListName::X14).count(),
            0
        );
    }

    #[test]
    fn test_walk_reports_missing_key() {
        let board = list_board(&[(0x10, 0x99)], 0x10, 0x20);
        let walked = keys(board.index().walk_linked_list(LinkedListName::X14));
        assert_eq!(walked.len(), 2);
        assert!(walked[0].is_ok());
        assert!(matches!(walked[1], Err(Error::KeyNotFound(Key(0x99)))));
    }

    #[test]
    fn test_guarded_walk_detects_cycle() {
        let board = list_board(&[(0x10, 0x11), (0x11, 0x10)], 0x10, 0x30);
        let walked = keys(
            board
                .index()
                .walk_linked_list(LinkedListName::X14)
                .guarded(),
        );
        assert_eq!(walked.len(), 3);
        assert!(matches!(
            walked[2],
            Err(Error::BrokenLinkedList {
                list: LinkedListName::X14,
                key: Key(0x10)
            })
        ));

        // Unguarded, the same chain keeps going
        let unguarded = board
            .index()
            .walk_linked_list(LinkedListName::X14)
            .take(10)
            .count();
        assert_eq!(unguarded, 10);
    }

    #[test]
    fn test_null_key_never_resolves() {
        let board = list_board(&[(0x10, 0)], 0x10, 0x10);
        let index = board.index();
        assert!(matches!(
            index.object(Key::NULL),
            Err(Error::KeyNotFound(Key(0)))
        ));
        assert!(!index.contains(Key::NULL));
        assert!(index.contains(Key(0x10)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_duplicate_key_first_wins() {
        let board = list_board(&[(0x10, 0x11), (0x10, 0x12)], 0x10, 0x10);
        let object = board.index().object(Key(0x10)).unwrap();
        assert_eq!(object.next(), Some(Key(0x11)));
        assert_eq!(board.index().len(), 1);
    }

    #[test]
    fn test_string_lookup() {
        let body = Bytes::new()
            .u32(7)
            .bytes(b"NET_A\0")
            .align4()
            .u32(9)
            .bytes(b"R1\0")
            .align4()
            .into_vec();
        let board = decode(&file(HeaderBuilder::new(MAGIC).strings(2), &body)).unwrap();
        let index = board.index();
        assert_eq!(index.string(7).unwrap(), "NET_A");
        assert_eq!(index.string(9).unwrap(), "R1");
        let err = index.string(8).unwrap_err();
        assert!(matches!(err, Error::StringNotFound(8)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_index_is_built_once() {
        let board = list_board(&[(0x10, 0)], 0x10, 0x10);
        let a = board.index();
        let b = board.index();
        assert!(std::ptr::eq(a.maps, b.maps));
    }
}
