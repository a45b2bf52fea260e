//! Typed decoders for the fixed chunks of a font resource
//!
//! A resource opens with an "RTFN" header, followed by "FNIF" font info
//! whose embedded pointers lead to the "PLGC" glyph chunk, the "HDWC"
//! width chunk, and the first "PAMC" character map. Every chunk declares
//! its own size, counted from the tag, and decoding must land exactly on
//! the declared end.

use crate::glyph::GlyphBitmap;
use crate::reader::{ByteOrder, ChunkReader, Tag};
use crate::{Error, Result};

/// Resource header tag
pub const HEADER_TAG: Tag = Tag::new(b"RTFN");
/// Font info tag
pub const INFO_TAG: Tag = Tag::new(b"FNIF");
/// Glyph chunk tag
pub const GLYPH_TAG: Tag = Tag::new(b"PLGC");
/// Width chunk tag
pub const WIDTH_TAG: Tag = Tag::new(b"HDWC");
/// Character map tag
pub const MAP_TAG: Tag = Tag::new(b"PAMC");

/// Stored chunk pointers reference the payload, 8 bytes past the chunk
/// start (the tag and size fields they skip).
pub const POINTER_BIAS: u32 = 8;

/// Correct a stored payload pointer to the chunk-start offset it implies.
pub fn chunk_start(stored: u32) -> Result<u32> {
    stored
        .checked_sub(POINTER_BIAS)
        .ok_or(Error::BadOffset { stored })
}

/// Decoded "RTFN" resource header.
#[derive(Debug, Clone, Copy)]
pub struct Header {
    pub order: ByteOrder,
    pub version: u16,
    /// Declared size of the decompressed resource, kept unvalidated.
    pub resource_size: u32,
    /// Offset of the font-info chunk; doubles as the header's own size.
    pub info_offset: u16,
    /// Declared number of chunks after the header, kept unvalidated.
    pub chunk_count: u16,
}

impl Header {
    /// Decode the header and fix the reader's byte order from its marker.
    pub fn decode(reader: &mut ChunkReader) -> Result<Self> {
        let start = reader.pos();
        reader.expect_tag(HEADER_TAG)?;
        let marker = [reader.read_u8()?, reader.read_u8()?];
        let order = match marker {
            [0xff, 0xfe] => ByteOrder::Little,
            [0xfe, 0xff] => ByteOrder::Big,
            _ => return Err(Error::BadByteOrderMark { marker }),
        };
        reader.set_order(order);
        let version = reader.read_u16()?;
        if !matches!(version, 0x100..=0x102) {
            tracing::warn!("Unrecognized resource version {:#x}, decoding anyway", version);
        }
        let resource_size = reader.read_u32()?;
        let info_offset = reader.read_u16()?;
        let chunk_count = reader.read_u16()?;
        // the font-info offset doubles as the header size
        reader.expect_chunk_end(HEADER_TAG, start, u32::from(info_offset))?;
        Ok(Self {
            order,
            version,
            resource_size,
            info_offset,
            chunk_count,
        })
    }
}

/// Character encoding advertised by the font info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16,
    ShiftJis,
    Cp1252,
}

impl Encoding {
    /// Decode the wire selector. Only four values exist; anything else
    /// means the resource cannot be interpreted.
    pub fn from_wire(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Utf8),
            1 => Ok(Self::Utf16),
            2 => Ok(Self::ShiftJis),
            3 => Ok(Self::Cp1252),
            _ => Err(Error::UnknownEncoding { value }),
        }
    }
}

/// Decoded "FNIF" font-info chunk.
///
/// The three offsets are chunk-start offsets, already corrected for the
/// stored pointer bias.
#[derive(Debug, Clone, Copy)]
pub struct FontInfo {
    pub size: u32,
    pub line_height: u8,
    pub width_hint: u8,
    pub encoding: Encoding,
    pub glyph_offset: u32,
    pub width_offset: u32,
    pub map_offset: u32,
    /// Extra metrics carried only by the 0x20-byte layout.
    pub extra: Option<InfoExtra>,
}

/// Trailing metrics of the extended font-info layout.
#[derive(Debug, Clone, Copy)]
pub struct InfoExtra {
    pub tile_height: u8,
    pub max_width: u8,
    pub underline: u8,
}

impl FontInfo {
    pub fn decode(reader: &mut ChunkReader) -> Result<Self> {
        let start = reader.pos();
        reader.expect_tag(INFO_TAG)?;
        let size = reader.read_u32()?;
        // only the two known layouts; presence of the trailing metrics is
        // determined by this field alone
        if size != 0x1c && size != 0x20 {
            return Err(Error::BadInfoSize { size });
        }
        reader.skip(1)?;
        let line_height = reader.read_u8()?;
        reader.skip(3)?;
        let width_hint = reader.read_u8()?;
        reader.skip(1)?;
        let encoding = Encoding::from_wire(reader.read_u8()?)?;
        let glyph_offset = chunk_start(reader.read_u32()?)?;
        let width_offset = chunk_start(reader.read_u32()?)?;
        let map_offset = chunk_start(reader.read_u32()?)?;
        let extra = if size == 0x20 {
            let tile_height = reader.read_u8()?;
            let max_width = reader.read_u8()?;
            let underline = reader.read_u8()?;
            reader.skip(1)?;
            Some(InfoExtra {
                tile_height,
                max_width,
                underline,
            })
        } else {
            None
        };
        reader.expect_chunk_end(INFO_TAG, start, size)?;
        Ok(Self {
            size,
            line_height,
            width_hint,
            encoding,
            glyph_offset,
            width_offset,
            map_offset,
            extra,
        })
    }
}

/// Decoded "PLGC" glyph chunk: tile geometry plus every tile's bitmap.
///
/// Tiles are indexed by read order, starting at 0.
#[derive(Debug, Clone)]
pub struct GlyphSet {
    pub tile_width: u8,
    pub tile_height: u8,
    /// Packed bytes per tile
    pub tile_len: u16,
    pub underline: u8,
    pub max_width: u8,
    pub depth: u8,
    /// Stored rotation selector; semantics unresolved, kept raw.
    pub rotation: u8,
    pub tiles: Vec<GlyphBitmap>,
}

impl GlyphSet {
    pub fn decode(reader: &mut ChunkReader) -> Result<Self> {
        let start = reader.pos();
        reader.expect_tag(GLYPH_TAG)?;
        let size = reader.read_u32()?;
        let tile_width = reader.read_u8()?;
        let tile_height = reader.read_u8()?;
        let tile_len = reader.read_u16()?;
        let underline = reader.read_u8()?;
        let max_width = reader.read_u8()?;
        let depth = reader.read_u8()?;
        let rotation = reader.read_u8()?;

        let chunk_end = start + size as usize;
        let mut tiles = Vec::new();
        if tile_len > 0 {
            let body = chunk_end.saturating_sub(reader.pos());
            let leftover = body % usize::from(tile_len);
            if leftover != 0 {
                return Err(Error::ShortGlyphChunk {
                    tile: body / usize::from(tile_len),
                    needed: usize::from(tile_len),
                    available: leftover,
                });
            }
            let count = body / usize::from(tile_len);
            tiles.reserve_exact(count);
            for _ in 0..count {
                let data = reader.read_bytes(usize::from(tile_len))?;
                tiles.push(GlyphBitmap::new(data, tile_width, tile_height, depth)?);
            }
        }
        reader.expect_chunk_end(GLYPH_TAG, start, size)?;
        Ok(Self {
            tile_width,
            tile_height,
            tile_len,
            underline,
            max_width,
            depth,
            rotation,
            tiles,
        })
    }
}

/// Decoded "HDWC" width chunk: one opaque 3-byte record per tile.
///
/// Record internals are not interpreted here; renderers read them.
#[derive(Debug, Clone)]
pub struct WidthTable {
    pub first: u16,
    pub last: u16,
    /// Stored pointer to a further width chunk, kept unvalidated.
    pub next: u32,
    pub records: Vec<[u8; 3]>,
}

impl WidthTable {
    pub fn decode(reader: &mut ChunkReader) -> Result<Self> {
        let start = reader.pos();
        reader.expect_tag(WIDTH_TAG)?;
        let size = reader.read_u32()?;
        let first = reader.read_u16()?;
        if first != 0 {
            return Err(Error::BadWidthRange { first });
        }
        let last = reader.read_u16()?;
        let next = reader.read_u32()?;

        let count = usize::from(last) + 1;
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            let b = reader.read_bytes(3)?;
            records.push([b[0], b[1], b[2]]);
        }
        // zero padding up to the next 4-byte boundary; content unvalidated
        reader.skip((4 - (3 * count) % 4) % 4)?;
        reader.expect_chunk_end(WIDTH_TAG, start, size)?;
        Ok(Self {
            first,
            last,
            next,
            records,
        })
    }
}
