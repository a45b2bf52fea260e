//! Bit-level packing and unpacking of sub-byte pixel codes
//!
//! Glyph tiles store pixels as consecutive `depth`-bit codes in a single
//! bitstream, most-significant bit first, running straight across byte
//! boundaries.

/// Split `bytes` into consecutive `depth`-bit codes.
///
/// A trailing partial code is zero-padded on its low-order side, so the
/// output always has `ceil(bits / depth)` entries. A `depth` of 0 yields no
/// codes. Depths above 16 cannot be represented in the output and are not
/// used by any chunk layout.
pub fn unpack(bytes: &[u8], depth: u8) -> Vec<u16> {
    if depth == 0 {
        return Vec::new();
    }
    let depth = u32::from(depth);
    let mut codes = Vec::with_capacity((bytes.len() * 8).div_ceil(depth as usize));
    let mut acc: u16 = 0;
    let mut filled: u32 = 0;
    for &byte in bytes {
        for shift in (0..8).rev() {
            acc = (acc << 1) | u16::from((byte >> shift) & 1);
            filled += 1;
            if filled == depth {
                codes.push(acc);
                acc = 0;
                filled = 0;
            }
        }
    }
    if filled > 0 {
        codes.push(acc << (depth - filled));
    }
    codes
}

/// Inverse of [`unpack`]: emit each code as `depth` bits, most-significant
/// bit first, zero-padding the final byte on its low-order side.
pub fn pack(codes: &[u16], depth: u8) -> Vec<u8> {
    if depth == 0 {
        return Vec::new();
    }
    let depth = u32::from(depth);
    let mut bytes = Vec::with_capacity((codes.len() * depth as usize).div_ceil(8));
    let mut acc: u8 = 0;
    let mut filled: u32 = 0;
    for &code in codes {
        for shift in (0..depth).rev() {
            acc = (acc << 1) | ((code >> shift) & 1) as u8;
            filled += 1;
            if filled == 8 {
                bytes.push(acc);
                acc = 0;
                filled = 0;
            }
        }
    }
    if filled > 0 {
        bytes.push(acc << (8 - filled));
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_depth_2() {
        assert_eq!(unpack(&[0b0001_1011], 2), vec![0, 1, 2, 3]);
        assert_eq!(unpack(&[0xff, 0x00], 2), vec![3, 3, 3, 3, 0, 0, 0, 0]);
    }

    #[test]
    fn test_unpack_depth_1_is_bits() {
        assert_eq!(unpack(&[0b1010_0001], 1), vec![1, 0, 1, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_unpack_crosses_byte_boundary() {
        // 3-bit codes over 16 bits: 101|101|110|100|000|0 -> last code padded
        assert_eq!(unpack(&[0b1011_0111, 0b0100_0000], 3), vec![5, 5, 6, 4, 0, 0]);
    }

    #[test]
    fn test_unpack_pads_partial_code_low_side() {
        // 8 bits of ones into 3-bit codes: 111|111|11 -> final code 110
        assert_eq!(unpack(&[0xff], 3), vec![7, 7, 6]);
    }

    #[test]
    fn test_unpack_depth_0_yields_nothing() {
        assert_eq!(unpack(&[0xff, 0xff], 0), Vec::<u16>::new());
    }

    #[test]
    fn test_pack_depth_4() {
        assert_eq!(pack(&[0xa, 0xb, 0xc, 0xd], 4), vec![0xab, 0xcd]);
    }

    #[test]
    fn test_pack_pads_final_byte() {
        assert_eq!(pack(&[1], 3), vec![0b0010_0000]);
        assert_eq!(pack(&[7, 7, 7], 3), vec![0b1111_1111, 0b1000_0000]);
    }

    #[test]
    fn test_pack_inverts_unpack() {
        let bytes = [0x12, 0x34, 0x56, 0x78, 0x9a];
        for depth in [1u8, 2, 4, 8] {
            assert_eq!(pack(&unpack(&bytes, depth), depth), bytes);
        }
    }
}
