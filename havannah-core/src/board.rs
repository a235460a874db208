//! Board geometry: a square grid trimmed to a Havannah hexagon
//!
//! Cells are linear indices `row * size + col`. Hex adjacency uses the six
//! axial offsets below; the two diagonal steps keep `row + col` constant, so
//! the playable region is the band `inner - 1 <= row + col <= 2 * size - inner - 1`.

use serde::{Deserialize, Serialize};

/// Largest supported board (cells per side of the bounding square)
pub const MAX_BOARD_SIZE: usize = 19;

/// Corner flags occupy bits 0-5 of a pattern mask
pub const CORNER_MASK: u16 = 0x03f;
/// Edge flags occupy bits 6-11 of a pattern mask
pub const EDGE_MASK: u16 = 0xfc0;

/// Neighbour offsets as (d_row, d_col)
pub const NEIGHBOR_OFFSETS: [(i32, i32); 6] = [
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
];

/// Virtual bridge carried by the queried cell, per direction:
/// [own stone, own stone, empty carrier, empty carrier].
/// The queried cell itself is the first carrier.
pub const ON_BRIDGE_OFFSETS: [[(i32, i32); 4]; 6] = [
    [(-1, 1), (0, -1), (0, 0), (-1, 0)],
    [(-1, 0), (0, 1), (0, 0), (-1, 1)],
    [(-1, 1), (1, 0), (0, 0), (0, 1)],
    [(0, 1), (1, -1), (0, 0), (1, 0)],
    [(1, 0), (0, -1), (0, 0), (1, -1)],
    [(1, -1), (-1, 0), (0, 0), (0, -1)],
];

/// Virtual bridge completed by a stone on the queried cell, per direction:
/// [own stone, empty carrier, empty carrier].
pub const MAKE_BRIDGE_OFFSETS: [[(i32, i32); 3]; 6] = [
    [(-2, 1), (-1, 0), (-1, 1)],
    [(-1, 2), (-1, 1), (0, 1)],
    [(1, 1), (0, 1), (1, 0)],
    [(2, -1), (1, 0), (1, -1)],
    [(1, -2), (1, -1), (0, -1)],
    [(-1, -1), (0, -1), (-1, 0)],
];

/// Static geometry of one board size
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geometry {
    size: usize,
    inner_size: usize,
}

impl Geometry {
    /// Geometry for an odd board size. Validation lives in `GameConfig`.
    pub const fn new(size: usize) -> Self {
        Self {
            size,
            inner_size: (size + 1) / 2,
        }
    }

    /// Side length of the bounding square
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cells per hexagon side
    pub fn inner_size(&self) -> usize {
        self.inner_size
    }

    /// Total cells in the bounding square, playable or not
    pub fn num_cells(&self) -> usize {
        self.size * self.size
    }

    pub fn cell(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    pub fn coords(&self, cell: usize) -> (usize, usize) {
        (cell / self.size, cell % self.size)
    }

    /// Check if (row, col) lies on the hexagon
    pub fn is_playable(&self, row: i32, col: i32) -> bool {
        let n = self.size as i32;
        let inner = self.inner_size as i32;
        if row < 0 || row >= n || col < 0 || col >= n {
            return false;
        }
        let sum = row + col;
        inner - 1 <= sum && sum <= 2 * n - inner - 1
    }

    pub fn is_playable_cell(&self, cell: usize) -> bool {
        if cell >= self.num_cells() {
            return false;
        }
        let (row, col) = self.coords(cell);
        self.is_playable(row as i32, col as i32)
    }

    /// Number of playable cells, `3s^2 - 3s + 1` for `s = inner_size`
    pub fn num_playable(&self) -> usize {
        (0..self.num_cells())
            .filter(|&cell| self.is_playable_cell(cell))
            .count()
    }

    /// Corner/edge flag of a cell (0 for interior and off-board cells).
    ///
    /// Corners are tested before edges so each corner gets only its corner bit.
    pub fn pattern(&self, row: usize, col: usize) -> u16 {
        let n = self.size;
        let inner = self.inner_size;
        if !self.is_playable(row as i32, col as i32) {
            return 0;
        }

        if row == 0 && col == inner - 1 {
            return 0x001;
        }
        if row == 0 && col == n - 1 {
            return 0x002;
        }
        if row == n - inner && col == n - 1 {
            return 0x004;
        }
        if row == n - 1 && col == n - inner {
            return 0x008;
        }
        if row == n - 1 && col == 0 {
            return 0x010;
        }
        if row == inner - 1 && col == 0 {
            return 0x020;
        }

        if row + col == inner - 1 {
            return 0x040;
        }
        if row == 0 {
            return 0x080;
        }
        if col == n - 1 {
            return 0x100;
        }
        if row + col == 2 * n - inner - 1 {
            return 0x200;
        }
        if row == n - 1 {
            return 0x400;
        }
        if col == 0 {
            return 0x800;
        }

        0
    }

    pub fn cell_pattern(&self, cell: usize) -> u16 {
        let (row, col) = self.coords(cell);
        self.pattern(row, col)
    }

    /// Cell reached from `cell` by a (d_row, d_col) step, if it is inside the grid.
    ///
    /// Row wrap-around is impossible since the step is applied in 2D.
    pub fn offset(&self, cell: usize, (dr, dc): (i32, i32)) -> Option<usize> {
        let (row, col) = self.coords(cell);
        let row = row as i32 + dr;
        let col = col as i32 + dc;
        let n = self.size as i32;
        if row < 0 || row >= n || col < 0 || col >= n {
            return None;
        }
        Some(self.cell(row as usize, col as usize))
    }

    /// Playable hex neighbours of a cell, in `NEIGHBOR_OFFSETS` order.
    ///
    /// Cells off the hexagon have none.
    pub fn neighbors(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        let offsets: &[(i32, i32)] = if self.is_playable_cell(cell) {
            &NEIGHBOR_OFFSETS
        } else {
            &[]
        };
        offsets
            .iter()
            .filter_map(move |&delta| self.offset(cell, delta))
            .filter(move |&n| self.is_playable_cell(n))
    }

    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).any(|n| n == b)
    }
}

/// Number of corner flags set in a mask
pub fn corner_count(mask: u16) -> u32 {
    (mask & CORNER_MASK).count_ones()
}

/// Number of edge flags set in a mask
pub fn edge_count(mask: u16) -> u32 {
    (mask & EDGE_MASK).count_ones()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playable_count_matches_hexagon() {
        for size in (3..=MAX_BOARD_SIZE).step_by(2) {
            let geo = Geometry::new(size);
            let s = geo.inner_size();
            assert_eq!(geo.num_playable(), 3 * s * s - 3 * s + 1, "size {}", size);
        }
    }

    #[test]
    fn test_playable_region_small() {
        let geo = Geometry::new(5);
        assert!(!geo.is_playable(0, 0));
        assert!(!geo.is_playable(0, 1));
        assert!(geo.is_playable(0, 2));
        assert!(geo.is_playable(2, 2));
        assert!(!geo.is_playable(4, 4));
        assert!(!geo.is_playable(-1, 3));
        assert!(!geo.is_playable(2, 5));
    }

    #[test]
    fn test_patterns_partition_boundary() {
        for size in [3, 5, 9, 19] {
            let geo = Geometry::new(size);
            let mut seen = 0u16;
            let mut corners = 0;
            for cell in 0..geo.num_cells() {
                if !geo.is_playable_cell(cell) {
                    assert_eq!(geo.cell_pattern(cell), 0);
                    continue;
                }
                let pattern = geo.cell_pattern(cell);
                let on_boundary = geo.neighbors(cell).count() < 6;
                assert_eq!(pattern != 0, on_boundary, "cell {} size {}", cell, size);
                assert!(pattern.count_ones() <= 1);
                if pattern & CORNER_MASK != 0 {
                    corners += 1;
                }
                seen |= pattern;
            }
            assert_eq!(corners, 6);
            if size > 3 {
                assert_eq!(seen, CORNER_MASK | EDGE_MASK);
            }
        }
    }

    #[test]
    fn test_edge_cells_per_side() {
        let geo = Geometry::new(9);
        for bit in 6..12 {
            let flag = 1u16 << bit;
            let count = (0..geo.num_cells())
                .filter(|&c| geo.cell_pattern(c) == flag)
                .count();
            assert_eq!(count, geo.inner_size() - 2);
        }
    }

    #[test]
    fn test_neighbors_interior_and_wrap() {
        let geo = Geometry::new(5);
        let center = geo.cell(2, 2);
        let mut ns: Vec<_> = geo.neighbors(center).collect();
        ns.sort();
        assert_eq!(ns, vec![7, 8, 11, 13, 16, 17]);

        // (2, 4) sits on the right column: (2, 5) and (1, 5) must not wrap to the next row
        let right = geo.cell(2, 4);
        let ns: Vec<_> = geo.neighbors(right).collect();
        assert!(!ns.contains(&geo.cell(3, 0)));
        assert!(!ns.contains(&geo.cell(2, 0)));
        assert!(ns.iter().all(|&n| geo.coords(n).1 >= 3));

        // (2, 0) on the left column: no neighbour in column 4
        let left = geo.cell(2, 0);
        assert!(geo.neighbors(left).all(|n| geo.coords(n).1 <= 1));
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let geo = Geometry::new(7);
        for a in 0..geo.num_cells() {
            for b in geo.neighbors(a) {
                assert!(geo.are_adjacent(b, a));
            }
        }
    }

    #[test]
    fn test_off_board_cells_have_no_neighbors() {
        let geo = Geometry::new(7);
        // (0, 2) lies just outside the hexagon, next to (0, 3) and (1, 2)
        let off = geo.cell(0, 2);
        assert!(!geo.is_playable_cell(off));
        assert_eq!(geo.neighbors(off).count(), 0);
        assert!(!geo.are_adjacent(off, geo.cell(0, 3)));
        assert!(!geo.are_adjacent(geo.cell(0, 3), off));
        for cell in (0..geo.num_cells()).filter(|&c| !geo.is_playable_cell(c)) {
            assert_eq!(geo.neighbors(cell).count(), 0, "cell {}", cell);
        }
    }

    #[test]
    fn test_bridge_tables_are_hex_bridges() {
        let geo = Geometry::new(9);
        let center = geo.cell(4, 4);
        for dir in 0..6 {
            let [own1, own2, empty1, empty2] = ON_BRIDGE_OFFSETS[dir];
            let own1 = geo.offset(center, own1).unwrap();
            let own2 = geo.offset(center, own2).unwrap();
            for carrier in [empty1, empty2] {
                let carrier = geo.offset(center, carrier).unwrap();
                assert!(geo.are_adjacent(own1, carrier));
                assert!(geo.are_adjacent(own2, carrier));
            }
            assert!(!geo.are_adjacent(own1, own2));

            let [partner, c1, c2] = MAKE_BRIDGE_OFFSETS[dir];
            let partner = geo.offset(center, partner).unwrap();
            let c1 = geo.offset(center, c1).unwrap();
            let c2 = geo.offset(center, c2).unwrap();
            assert!(geo.are_adjacent(center, c1) && geo.are_adjacent(center, c2));
            assert!(geo.are_adjacent(partner, c1) && geo.are_adjacent(partner, c2));
            assert!(!geo.are_adjacent(center, partner));
        }
    }

    #[test]
    fn test_offset_guards_bounds() {
        let geo = Geometry::new(5);
        assert_eq!(geo.offset(0, (-1, 0)), None);
        assert_eq!(geo.offset(4, (0, 1)), None);
        assert_eq!(geo.offset(24, (1, 1)), None);
        assert_eq!(geo.offset(12, (1, 1)), Some(18));
    }
}
