//! Packed-row helpers: DIB row stride and bit-field extraction.
//!
//! Rows are read as a sequence of little-endian 32-bit words. Within a word
//! fields are taken from the least significant bit upwards, and a field may
//! straddle two adjacent words.

/// Bytes per stored row: `ceil(width * bpp / 32) * 4`.
pub fn row_stride(width: u32, bpp: u16) -> usize {
    let bits = (width as usize).saturating_mul(usize::from(bpp));
    bits.div_ceil(32) * 4
}

#[inline]
fn word_at(row: &[u8], word: usize) -> u32 {
    let start = word * 4;
    match row.get(start..start + 4) {
        Some(b) => u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
        // Partial trailing word (only possible on unaligned input slices).
        None => {
            let mut buf = [0u8; 4];
            if let Some(tail) = row.get(start..) {
                buf[..tail.len()].copy_from_slice(tail);
            }
            u32::from_le_bytes(buf)
        }
    }
}

#[inline]
fn low_mask(bits: u32) -> u32 {
    if bits >= 32 {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}

/// Extract a `bits`-wide field (1..=32) starting at `bit_offset`.
///
/// Takes `min(bits, 32 - bit_offset % 32)` low bits from the current word and
/// ORs the remainder from the next word in above them.
pub fn extract_field(row: &[u8], bit_offset: usize, bits: u32) -> u32 {
    debug_assert!((1..=32).contains(&bits));
    let word = bit_offset / 32;
    let shift = (bit_offset % 32) as u32;
    let available = 32 - shift;
    let taken = bits.min(available);

    let low = (word_at(row, word) >> shift) & low_mask(taken);
    if taken == bits {
        return low;
    }
    let high = word_at(row, word + 1) & low_mask(bits - taken);
    low | (high << taken)
}

/// Iterator over consecutive `bpp`-wide fields of one packed row.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    row: &'a [u8],
    bpp: u32,
    pos: usize,
    end: usize,
}

impl<'a> BitCursor<'a> {
    /// Cursor yielding `count` fields of `bpp` bits each.
    pub fn new(row: &'a [u8], bpp: u16, count: usize) -> Self {
        let bpp = u32::from(bpp).clamp(1, 32);
        let end = count
            .saturating_mul(bpp as usize)
            .min(row.len().saturating_mul(8));
        Self {
            row,
            bpp,
            pos: 0,
            end,
        }
    }
}

impl Iterator for BitCursor<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.pos + self.bpp as usize > self.end {
            return None;
        }
        let v = extract_field(self.row, self.pos, self.bpp);
        self.pos += self.bpp as usize;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.end - self.pos) / self.bpp as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitCursor<'_> {}
