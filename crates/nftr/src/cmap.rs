//! Character maps: "PAMC" chunks and their merged lookup
//!
//! A resource carries one or more character maps chained by next-pointers.
//! Three on-disk layouts share the tag; all translate character codes to
//! tile indices. The merger flattens a decoded chain into a single lookup.

use std::collections::HashMap;

use crate::chunks::{chunk_start, MAP_TAG};
use crate::reader::ChunkReader;
use crate::{Error, Result};

/// Wire sentinel in type-1 tables for a code with no glyph.
const NO_TILE: u16 = 0xffff;

/// One decoded "PAMC" chunk.
#[derive(Debug, Clone)]
pub struct CharMap {
    /// First character code of the declared range
    pub first: u16,
    /// Last character code of the declared range, inclusive
    pub last: u16,
    /// Chunk-start offset of the next map, `None` on the final map.
    pub next: Option<u32>,
    pub kind: CharMapKind,
}

/// The three layouts a map chunk can use.
#[derive(Debug, Clone)]
pub enum CharMapKind {
    /// Type 0: the range maps to consecutive tiles from a base index.
    Range { base: u16 },
    /// Type 1: one entry per code in the range; `None` marks a code with
    /// no glyph.
    Table { tiles: Vec<Option<u16>> },
    /// Type 2: explicit (code, tile) pairs. The declared range plays no
    /// part in lookups.
    Pairs { entries: Vec<(u16, u16)> },
}

impl CharMap {
    pub fn decode(reader: &mut ChunkReader) -> Result<Self> {
        let start = reader.pos();
        reader.expect_tag(MAP_TAG)?;
        let size = reader.read_u32()?;
        let first = reader.read_u16()?;
        let last = reader.read_u16()?;
        let map_type = reader.read_u32()?;
        let stored_next = reader.read_u32()?;
        // 0 terminates the chain; anything else carries the pointer bias
        let next = match stored_next {
            0 => None,
            stored => Some(chunk_start(stored)?),
        };

        let kind = match map_type {
            0 => {
                let base = reader.read_u16()?;
                reader.skip(2)?;
                CharMapKind::Range { base }
            }
            1 => {
                let count = if last >= first {
                    usize::from(last - first) + 1
                } else {
                    0
                };
                let mut tiles = Vec::with_capacity(count);
                for _ in 0..count {
                    let tile = reader.read_u16()?;
                    tiles.push(if tile == NO_TILE { None } else { Some(tile) });
                }
                // an odd entry count leaves the payload 2 bytes short of
                // the 4-byte boundary
                if count % 2 == 1 {
                    reader.skip(2)?;
                }
                CharMapKind::Table { tiles }
            }
            2 => {
                let count = usize::from(reader.read_u16()?);
                let mut entries = Vec::with_capacity(count);
                for _ in 0..count {
                    let code = reader.read_u16()?;
                    let tile = reader.read_u16()?;
                    entries.push((code, tile));
                }
                // the 2-byte count plus 4-byte pairs always sit 2 bytes
                // short of the boundary
                reader.skip(2)?;
                CharMapKind::Pairs { entries }
            }
            value => return Err(Error::UnknownMapType { value }),
        };
        reader.expect_chunk_end(MAP_TAG, start, size)?;
        Ok(Self {
            first,
            last,
            next,
            kind,
        })
    }
}

/// Flatten a chain of decoded maps into one lookup.
///
/// Keys are character codes, values are (map index, tile index). Maps are
/// visited in chain order; when two maps assign the same code, the later
/// one wins.
pub fn merge(maps: &[CharMap]) -> HashMap<u16, (usize, u16)> {
    let mut merged = HashMap::new();
    for (index, map) in maps.iter().enumerate() {
        match &map.kind {
            CharMapKind::Range { base } => {
                for code in map.first..=map.last {
                    let tile = base.wrapping_add(code - map.first);
                    merged.insert(code, (index, tile));
                }
            }
            CharMapKind::Table { tiles } => {
                for (i, tile) in tiles.iter().enumerate() {
                    if let Some(tile) = *tile {
                        merged.insert(map.first.wrapping_add(i as u16), (index, tile));
                    }
                }
            }
            CharMapKind::Pairs { entries } => {
                for &(code, tile) in entries {
                    merged.insert(code, (index, tile));
                }
            }
        }
    }
    merged
}
