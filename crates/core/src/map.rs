//! Tile grids read from binary `.map` files.

use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::types::Pos;

const HEADER_LEN: usize = 9;

/// Row-major grid of tile indices with a fallback tile for out-of-bounds lookups.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileGrid {
    rows: usize,
    columns: usize,
    default_tile: u8,
    tiles: Vec<u8>,
}

impl TileGrid {
    pub fn new(rows: usize, columns: usize, default_tile: u8, tiles: Vec<u8>) -> Option<Self> {
        (tiles.len() == rows * columns).then_some(Self { rows, columns, default_tile, tiles })
    }

    pub fn filled(rows: usize, columns: usize, tile: u8) -> Self {
        Self { rows, columns, default_tile: tile, tiles: vec![tile; rows * columns] }
    }

    /// Layout: little-endian `i32` row count, `i32` column count, one default
    /// tile byte, then `rows * columns` tile bytes.
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> LoadResult<Self> {
        let malformed =
            |reason: String| LoadError::MalformedMap { path: path.to_path_buf(), reason };
        if bytes.len() < HEADER_LEN {
            let found = bytes.len();
            return Err(malformed(format!("header needs {HEADER_LEN} bytes, found {found}")));
        }
        let read_i32 = |at: usize| {
            i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        let (rows, columns) = (read_i32(0), read_i32(4));
        let (Ok(rows), Ok(columns)) = (usize::try_from(rows), usize::try_from(columns)) else {
            return Err(malformed(format!("negative dimensions {rows}x{columns}")));
        };
        let default_tile = bytes[8];
        let body = &bytes[HEADER_LEN..];
        let expected = rows
            .checked_mul(columns)
            .ok_or_else(|| malformed(format!("dimensions {rows}x{columns} overflow")))?;
        if body.len() < expected {
            return Err(malformed(format!("expected {expected} tile bytes, found {}", body.len())));
        }
        if body.len() > expected {
            log::warn!(
                "{}: ignoring {} trailing bytes after the tile data",
                path.display(),
                body.len() - expected
            );
        }
        Ok(Self { rows, columns, default_tile, tiles: body[..expected].to_vec() })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.tiles.len());
        bytes.extend_from_slice(&(self.rows as i32).to_le_bytes());
        bytes.extend_from_slice(&(self.columns as i32).to_le_bytes());
        bytes.push(self.default_tile);
        bytes.extend_from_slice(&self.tiles);
        bytes
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn default_tile(&self) -> u8 {
        self.default_tile
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.columns && (pos.y as usize) < self.rows
    }

    /// Stored tile, or the default tile outside the grid.
    pub fn tile_at(&self, pos: Pos) -> u8 {
        if !self.in_bounds(pos) {
            return self.default_tile;
        }
        self.tiles[pos.y as usize * self.columns + pos.x as usize]
    }

    pub fn set_tile(&mut self, pos: Pos, tile: u8) {
        if self.in_bounds(pos) {
            let index = pos.y as usize * self.columns + pos.x as usize;
            self.tiles[index] = tile;
        }
    }
}
