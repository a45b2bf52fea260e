//! Grayscale expansion of sub-byte pixel codes

use crate::{Error, Result};

/// Depth-2 resources use fixed intensity steps instead of bit replication.
const DEPTH2_LEVELS: [u8; 4] = [0, 85, 170, 255];

/// Expands `depth`-bit pixel codes to 8-bit intensities.
///
/// Depth 2 maps through a four-level table. Every other supported depth
/// replicates bits positionally: source bit `i` (bit 0 being least
/// significant) becomes the top bit of the `i`-th slice of `8 / depth`
/// output bits, and the rest of each slice stays 0. For a 4-bit code this
/// means `0b1000` expands to 128 and `0b0001` to 2.
#[derive(Debug, Clone, Copy)]
pub struct GrayScaler {
    depth: u8,
}

impl GrayScaler {
    /// Build a scaler, rejecting depths the expansion cannot express.
    ///
    /// Accepted depths are 2 and nonzero multiples of 4 up to 8.
    pub fn new(depth: u8) -> Result<Self> {
        if depth != 2 && (depth == 0 || depth % 4 != 0 || depth > 8) {
            return Err(Error::UnsupportedBitDepth { depth });
        }
        Ok(Self { depth })
    }

    /// The source bit depth this scaler expands from.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Expand one code to an 8-bit intensity. Bits of `code` above the
    /// scaler's depth are ignored.
    pub fn scale(&self, code: u16) -> u8 {
        if self.depth == 2 {
            return DEPTH2_LEVELS[usize::from(code & 0x3)];
        }
        let slice_bits = 8 / u32::from(self.depth);
        let mut out: u8 = 0;
        for i in 0..u32::from(self.depth) {
            let bit = ((code >> i) & 1) as u8;
            out |= bit << (slice_bits * i + slice_bits - 1);
        }
        out
    }
}
