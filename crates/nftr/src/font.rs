//! Whole-resource decoding and glyph lookup

use std::collections::HashMap;
use std::path::Path;

use crate::chunks::{Encoding, FontInfo, GlyphSet, Header, WidthTable, POINTER_BIAS};
use crate::cmap::{self, CharMap};
use crate::glyph::GlyphBitmap;
use crate::reader::{ByteOrder, ChunkReader};
use crate::{Error, Result};

/// A fully decoded font resource.
///
/// Built in one pass over the raw bytes and immutable afterward; lookups
/// and accessors all borrow. Decoding either completes or fails with the
/// first structural error, never returning a partial resource.
#[derive(Debug, Clone)]
pub struct Font {
    header: Header,
    info: FontInfo,
    glyphs: GlyphSet,
    widths: WidthTable,
    maps: Vec<CharMap>,
    merged: HashMap<u16, (usize, u16)>,
}

impl Font {
    /// Read and decode a resource file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::parse(&data)
    }

    /// Decode a resource already held in memory.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = ChunkReader::new(data);
        let header = Header::decode(&mut reader)?;
        // the header check left the cursor at the font info
        let info = FontInfo::decode(&mut reader)?;

        seek_chunk(&mut reader, info.glyph_offset)?;
        let glyphs = GlyphSet::decode(&mut reader)?;
        tracing::debug!("Decoded {} glyph tiles", glyphs.tiles.len());

        seek_chunk(&mut reader, info.width_offset)?;
        let widths = WidthTable::decode(&mut reader)?;

        let mut maps = Vec::new();
        let mut visited = Vec::new();
        let mut next = Some(info.map_offset);
        while let Some(offset) = next {
            if visited.contains(&offset) {
                return Err(Error::CyclicMapChain { offset });
            }
            visited.push(offset);
            seek_chunk(&mut reader, offset)?;
            let map = CharMap::decode(&mut reader)?;
            next = map.next;
            maps.push(map);
        }
        let merged = cmap::merge(&maps);
        tracing::debug!("Merged {} maps covering {} characters", maps.len(), merged.len());

        Ok(Self {
            header,
            info,
            glyphs,
            widths,
            maps,
            merged,
        })
    }

    /// Resolve a character code to its glyph bitmap.
    ///
    /// A code no map covers is [`Error::GlyphNotFound`]; a covered code
    /// whose tile index falls outside the glyph chunk is
    /// [`Error::TileOutOfRange`].
    pub fn lookup(&self, code: u16) -> Result<&GlyphBitmap> {
        let (_, tile) = *self
            .merged
            .get(&code)
            .ok_or(Error::GlyphNotFound { code })?;
        self.glyphs
            .tiles
            .get(usize::from(tile))
            .ok_or(Error::TileOutOfRange { code, tile })
    }

    /// (map index, tile index) for a code, if any map covers it.
    pub fn tile_for(&self, code: u16) -> Option<(usize, u16)> {
        self.merged.get(&code).copied()
    }

    /// Resource format version
    pub fn version(&self) -> u16 {
        self.header.version
    }

    /// Byte order the resource was written in
    pub fn byte_order(&self) -> ByteOrder {
        self.header.order
    }

    /// Declared decompressed size from the header, unvalidated
    pub fn resource_size(&self) -> u32 {
        self.header.resource_size
    }

    /// Declared chunk count from the header, unvalidated
    pub fn chunk_count(&self) -> u16 {
        self.header.chunk_count
    }

    /// Advertised character encoding
    pub fn encoding(&self) -> Encoding {
        self.info.encoding
    }

    /// Line height hint from the font info
    pub fn line_height(&self) -> u8 {
        self.info.line_height
    }

    /// Width hint from the font info
    pub fn width_hint(&self) -> u8 {
        self.info.width_hint
    }

    /// The decoded font-info chunk
    pub fn info(&self) -> &FontInfo {
        &self.info
    }

    /// Tile width in pixels
    pub fn tile_width(&self) -> u8 {
        self.glyphs.tile_width
    }

    /// Tile height in pixels
    pub fn tile_height(&self) -> u8 {
        self.glyphs.tile_height
    }

    /// Bits per pixel in packed tiles
    pub fn tile_depth(&self) -> u8 {
        self.glyphs.depth
    }

    /// Packed bytes per tile
    pub fn tile_len(&self) -> u16 {
        self.glyphs.tile_len
    }

    /// Stored rotation selector, uninterpreted
    pub fn rotation(&self) -> u8 {
        self.glyphs.rotation
    }

    /// The decoded glyph chunk
    pub fn glyph_set(&self) -> &GlyphSet {
        &self.glyphs
    }

    /// Number of glyph tiles
    pub fn glyph_count(&self) -> usize {
        self.glyphs.tiles.len()
    }

    /// Glyph bitmap by tile index
    pub fn glyph(&self, tile: usize) -> Option<&GlyphBitmap> {
        self.glyphs.tiles.get(tile)
    }

    /// The decoded width chunk
    pub fn width_table(&self) -> &WidthTable {
        &self.widths
    }

    /// Opaque 3-byte width record for a tile
    pub fn width_record(&self, tile: usize) -> Option<[u8; 3]> {
        self.widths.records.get(tile).copied()
    }

    /// Decoded character maps in chain order
    pub fn maps(&self) -> &[CharMap] {
        &self.maps
    }

    /// Number of character codes covered by the merged lookup
    pub fn mapped_chars(&self) -> usize {
        self.merged.len()
    }
}

/// Position the reader on a corrected chunk-start offset.
fn seek_chunk(reader: &mut ChunkReader, start: u32) -> Result<()> {
    let pos = start as usize;
    if pos >= reader.len() {
        // report the offset as it was stored
        return Err(Error::BadOffset {
            stored: start + POINTER_BIAS,
        });
    }
    reader.set_pos(pos);
    Ok(())
}
