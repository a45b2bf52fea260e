//! Glyph tile bitmaps

use crate::bits;
use crate::gray::GrayScaler;
use crate::{Error, Result};

/// One glyph tile expanded to an 8-bit grayscale grid.
///
/// Pixels are stored row-major, top row first. The packed source bytes are
/// kept alongside the expanded grid.
#[derive(Debug, Clone)]
pub struct GlyphBitmap {
    width: u8,
    height: u8,
    depth: u8,
    raw: Vec<u8>,
    pixels: Vec<u8>,
}

impl GlyphBitmap {
    /// Decode one tile from its packed bytes.
    ///
    /// The bytes must unpack to at least `width * height` codes at the given
    /// depth; the zero-pad tail beyond that is discarded. Anything shorter
    /// is malformed data, never silently filled.
    pub fn new(data: &[u8], width: u8, height: u8, depth: u8) -> Result<Self> {
        let scaler = GrayScaler::new(depth)?;
        let needed = usize::from(width) * usize::from(height);
        let mut codes = bits::unpack(data, depth);
        if codes.len() < needed {
            return Err(Error::ShortGlyphData {
                needed,
                got: codes.len(),
            });
        }
        codes.truncate(needed);
        let pixels = codes.iter().map(|&code| scaler.scale(code)).collect();
        Ok(Self {
            width,
            height,
            depth,
            raw: data.to_vec(),
            pixels,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Source bit depth
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// The packed bytes the tile was decoded from
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Expanded pixels, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Intensity at (x, y), or `None` outside the tile.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= usize::from(self.width) || y >= usize::from(self.height) {
            return None;
        }
        Some(self.pixels[y * usize::from(self.width) + x])
    }

    /// Iterate over pixel rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // zero-width tiles have no pixels, and chunks() rejects a zero size
        self.pixels.chunks(usize::from(self.width).max(1))
    }
}
