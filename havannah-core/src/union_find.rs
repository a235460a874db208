//! Disjoint sets over board cells, carrying the corner/edge mask of each group
//!
//! Arena layout: one slot per cell in each of `parent`, `rank` and `pattern`.
//! Only a root's `pattern` is current; other slots keep whatever they held
//! when they stopped being roots.

use crate::board::{corner_count, edge_count, Geometry};
use crate::game::WinKind;

/// Corners a single group must touch to win
const FORK_CORNERS: u32 = 2;
/// Edges a single group must touch to win
const BRIDGE_EDGES: u32 = 3;

#[derive(Clone, Debug)]
pub struct GroupSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    pattern: Vec<u16>,
}

impl GroupSet {
    pub fn new(geometry: &Geometry) -> Self {
        let mut groups = Self {
            parent: Vec::new(),
            rank: Vec::new(),
            pattern: Vec::new(),
        };
        groups.reset(geometry);
        groups
    }

    /// Every cell becomes a singleton group holding its own corner/edge flag
    pub fn reset(&mut self, geometry: &Geometry) {
        let cells = geometry.num_cells();
        self.parent.clear();
        self.parent.extend(0..cells);
        self.rank.clear();
        self.rank.resize(cells, 0);
        self.pattern.clear();
        self.pattern
            .extend((0..cells).map(|cell| geometry.cell_pattern(cell)));
    }

    /// Root of the group containing `cell`, compressing the path on the way
    pub fn find(&mut self, cell: usize) -> usize {
        let mut root = cell;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = cell;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Merge the groups of `a` and `b`.
    ///
    /// Returns the winning structure if the merged group now touches two
    /// corners or three edges.
    pub fn union(&mut self, a: usize, b: usize) -> Option<WinKind> {
        let mut root_a = self.find(a);
        let mut root_b = self.find(b);

        if root_a != root_b {
            if self.rank[root_a] < self.rank[root_b] {
                std::mem::swap(&mut root_a, &mut root_b);
            } else if self.rank[root_a] == self.rank[root_b] {
                self.rank[root_a] += 1;
            }
            self.parent[root_b] = root_a;
            self.pattern[root_a] |= self.pattern[root_b];
        }

        classify(self.pattern[root_a])
    }

    /// Corner/edge mask of the group containing `cell`
    pub fn pattern_of(&mut self, cell: usize) -> u16 {
        let root = self.find(cell);
        self.pattern[root]
    }

    pub fn same_group(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

fn classify(mask: u16) -> Option<WinKind> {
    if corner_count(mask) >= FORK_CORNERS {
        Some(WinKind::Fork)
    } else if edge_count(mask) >= BRIDGE_EDGES {
        Some(WinKind::Bridge)
    } else {
        None
    }
}
