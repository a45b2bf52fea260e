//! nftr - Bitmap Font Resource Decoder
//!
//! This crate decodes the chunked binary font containers used on
//! cartridge-era handhelds into glyph bitmaps and character lookup tables:
//! - Chunk walking with in-file byte-order detection ("RTFN", "FNIF",
//!   "PLGC", "HDWC", "PAMC")
//! - Sub-byte pixel unpacking and grayscale expansion
//! - The three character-map layouts, chained and merged into one lookup
//!
//! [`Font::load`] decodes a file in one pass; [`Font::lookup`] then
//! resolves character codes to [`GlyphBitmap`] tiles.

pub mod bits;
pub mod chunks;
pub mod cmap;
pub mod font;
pub mod glyph;
pub mod gray;
pub mod reader;

pub use chunks::{Encoding, FontInfo, GlyphSet, Header, InfoExtra, WidthTable};
pub use cmap::{CharMap, CharMapKind};
pub use font::Font;
pub use glyph::GlyphBitmap;
pub use gray::GrayScaler;
pub use reader::{ByteOrder, ChunkReader, Tag};

/// Decode error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected end of data at offset {offset} (needed {needed} bytes)")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("Expected chunk tag {expected} at offset {offset}, found {found}")]
    BadTag {
        expected: Tag,
        found: Tag,
        offset: usize,
    },

    #[error("Unrecognized byte-order marker {marker:02x?}")]
    BadByteOrderMark { marker: [u8; 2] },

    #[error("Font info declares unsupported size {size:#x}")]
    BadInfoSize { size: u32 },

    #[error("Unrecognized character encoding selector {value}")]
    UnknownEncoding { value: u8 },

    #[error("Stored chunk offset {stored:#x} is not addressable")]
    BadOffset { stored: u32 },

    #[error("Width table starts at tile {first}, expected 0")]
    BadWidthRange { first: u16 },

    #[error("Unrecognized character map type {value}")]
    UnknownMapType { value: u32 },

    #[error("Chunk {tag} declares {declared} bytes but decoding consumed {decoded}")]
    ChunkSizeMismatch {
        tag: Tag,
        declared: u32,
        decoded: usize,
    },

    #[error("Glyph chunk ends mid-tile: tile {tile} needs {needed} bytes, {available} left")]
    ShortGlyphChunk {
        tile: usize,
        needed: usize,
        available: usize,
    },

    #[error("Glyph data unpacks to {got} pixel codes, {needed} required")]
    ShortGlyphData { needed: usize, got: usize },

    #[error("Bit depth {depth} cannot be expanded to 8-bit intensities")]
    UnsupportedBitDepth { depth: u8 },

    #[error("Character map chain revisits offset {offset:#x}")]
    CyclicMapChain { offset: u32 },

    #[error("No glyph mapped for character code {code:#06x}")]
    GlyphNotFound { code: u16 },

    #[error("Character code {code:#06x} maps to tile {tile}, beyond the glyph table")]
    TileOutOfRange { code: u16, tile: u16 },
}

pub type Result<T> = std::result::Result<T, Error>;
