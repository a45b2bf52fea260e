//! Bounds-checked binary reader for chunked resources

use std::fmt;

use crate::{Error, Result};

/// Byte order of every multi-byte field in a resource.
///
/// Fixed once by the header's order marker; all later reads follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

/// 4-byte ASCII chunk tag, stored in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

/// Binary reader with bounds checking and a switchable byte order.
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> ChunkReader<'a> {
    /// Create a reader over a whole resource.
    ///
    /// The order starts little-endian; the header decoder switches it once
    /// the order marker is known, before any multi-byte field is read.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            order: ByteOrder::Little,
        }
    }

    /// Current position
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Set position
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Total resource length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Remaining bytes
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Active byte order
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Fix the byte order for all subsequent multi-byte reads.
    pub fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    fn check(&self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEof {
                offset: self.pos,
                needed: n,
            });
        }
        Ok(())
    }

    /// Skip bytes
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.check(n)?;
        self.pos += n;
        Ok(())
    }

    /// Read u8
    pub fn read_u8(&mut self) -> Result<u8> {
        self.check(1)?;
        let v = self.data[self.pos];
        self.pos += 1;
        Ok(v)
    }

    /// Read u16 in the active byte order
    pub fn read_u16(&mut self) -> Result<u16> {
        self.check(2)?;
        let raw = [self.data[self.pos], self.data[self.pos + 1]];
        self.pos += 2;
        Ok(match self.order {
            ByteOrder::Little => u16::from_le_bytes(raw),
            ByteOrder::Big => u16::from_be_bytes(raw),
        })
    }

    /// Read u32 in the active byte order
    pub fn read_u32(&mut self) -> Result<u32> {
        self.check(4)?;
        let raw = [
            self.data[self.pos],
            self.data[self.pos + 1],
            self.data[self.pos + 2],
            self.data[self.pos + 3],
        ];
        self.pos += 4;
        Ok(match self.order {
            ByteOrder::Little => u32::from_le_bytes(raw),
            ByteOrder::Big => u32::from_be_bytes(raw),
        })
    }

    /// Read bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.check(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a 4-byte tag. Tags are order-insensitive.
    pub fn read_tag(&mut self) -> Result<Tag> {
        self.check(4)?;
        let tag = Tag([
            self.data[self.pos],
            self.data[self.pos + 1],
            self.data[self.pos + 2],
            self.data[self.pos + 3],
        ]);
        self.pos += 4;
        Ok(tag)
    }

    /// Read a tag and fail unless it matches `expected`.
    pub fn expect_tag(&mut self, expected: Tag) -> Result<()> {
        let offset = self.pos;
        let found = self.read_tag()?;
        if found != expected {
            return Err(Error::BadTag {
                expected,
                found,
                offset,
            });
        }
        Ok(())
    }

    /// Fail unless the cursor sits exactly `size` bytes past `start`.
    ///
    /// Chunk sizes count the 8-byte tag and size fields, so `start` is the
    /// offset the tag was read from.
    pub fn expect_chunk_end(&self, tag: Tag, start: usize, size: u32) -> Result<()> {
        let decoded = self.pos.saturating_sub(start);
        if decoded != size as usize {
            return Err(Error::ChunkSizeMismatch {
                tag,
                declared: size,
                decoded,
            });
        }
        Ok(())
    }
}
