//! Bit-packed storage encoding for grids.
//!
//! Layout: row-major, one bit per cell, least significant bit first.
//! Cell `(r, c)` lives at bit index `r * width + c`, which is bit
//! `index % 8` of byte `index / 8`. A set bit is a live cell.

use crate::error::LifeError;
use crate::grid::Grid;

/// Bytes needed to hold `width * height` cells
#[inline]
pub fn packed_len(width: usize, height: usize) -> usize {
    (width * height + 7) / 8
}

/// Pack a grid into its minimal byte form. Trailing bits are zero.
pub fn encode(grid: &Grid) -> Vec<u8> {
    let mut data = vec![0u8; packed_len(grid.width(), grid.height())];

    for (index, _) in grid.cells().iter().enumerate().filter(|(_, &alive)| alive) {
        data[index / 8] |= 1 << (index % 8);
    }

    data
}

/// Unpack `width * height` cells from `data`.
///
/// Bits beyond the end of `data` read as dead, so truncated buffers decode
/// without error. Only zero dimensions are rejected.
pub fn decode(data: &[u8], width: usize, height: usize) -> Result<Grid, LifeError> {
    if width == 0 || height == 0 {
        return Err(LifeError::MalformedState {
            width: width as i64,
            height: height as i64,
        });
    }

    let mut grid = Grid::new(width, height);
    for row in 0..height {
        for col in 0..width {
            let index = row * width + col;
            let alive = data
                .get(index / 8)
                .map_or(false, |byte| (byte >> (index % 8)) & 1 == 1);
            if alive {
                grid.set(row, col, true);
            }
        }
    }

    Ok(grid)
}

/// Decode with dimensions as persisted (signed 32-bit columns).
/// Negative or zero dimensions are malformed.
pub fn decode_stored(data: &[u8], width: i32, height: i32) -> Result<Grid, LifeError> {
    match (usize::try_from(width), usize::try_from(height)) {
        (Ok(w), Ok(h)) => decode(data, w, h),
        _ => Err(LifeError::MalformedState {
            width: width as i64,
            height: height as i64,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_bit_layout() {
        // 3x3 with (0,0), (0,2) and (2,2): bits 0, 2 and 8
        let grid = Grid::with_live_cells(3, 3, &[(0, 0), (0, 2), (2, 2)]);
        let data = encode(&grid);

        assert_eq!(data, vec![0b0000_0101, 0b0000_0001]);
    }

    #[test]
    fn test_encode_minimal_length() {
        assert_eq!(encode(&Grid::new(8, 1)).len(), 1);
        assert_eq!(encode(&Grid::new(3, 3)).len(), 2);
        assert_eq!(encode(&Grid::new(4, 4)).len(), 2);
        assert_eq!(encode(&Grid::new(5, 5)).len(), 4);
    }

    #[test]
    fn test_trailing_bits_zero() {
        let mut grid = Grid::new(3, 3);
        for row in 0..3 {
            for col in 0..3 {
                grid.set(row, col, true);
            }
        }

        let data = encode(&grid);
        assert_eq!(data, vec![0xFF, 0x01]);
    }

    #[test]
    fn test_roundtrip() {
        let patterns: [&[(usize, usize)]; 3] = [
            &[],
            &[(0, 0)],
            &[(1, 2), (2, 3), (3, 1), (3, 2), (3, 3), (4, 6)],
        ];
        for (w, h) in [(1, 1), (7, 5), (8, 8), (13, 3)] {
            for live in patterns {
                let grid = Grid::with_live_cells(w, h, live);
                let decoded = decode(&encode(&grid), w, h).unwrap();
                assert_eq!(decoded, grid, "{}x{} {:?}", w, h, live);
            }
        }
    }

    #[test]
    fn test_decode_truncated_reads_dead() {
        // Only the first byte is present for a 4x4 grid
        let grid = decode(&[0xFF], 4, 4).unwrap();

        assert_eq!(grid.live_count(), 8);
        assert!(grid.get(1, 3));
        assert!(!grid.get(2, 0));
    }

    #[test]
    fn test_decode_empty_buffer() {
        let grid = decode(&[], 5, 5).unwrap();
        assert_eq!(grid, Grid::new(5, 5));
    }

    #[test]
    fn test_decode_rejects_zero_dimensions() {
        assert!(matches!(decode(&[0], 0, 3), Err(LifeError::MalformedState { .. })));
        assert!(matches!(decode(&[0], 3, 0), Err(LifeError::MalformedState { .. })));
    }

    #[test]
    fn test_decode_stored_rejects_negative() {
        let err = decode_stored(&[0], -1, 3).unwrap_err();
        assert_eq!(err, LifeError::MalformedState { width: -1, height: 3 });
    }
}
