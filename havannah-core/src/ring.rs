//! Ring detection by degree pruning
//!
//! Starting from the group of the last stone, cells that cannot lie on a
//! cycle are peeled off one by one. A cell goes when it has at most one
//! remaining group neighbour, or exactly two that touch each other (the cell
//! only shortcuts a triangle). Whatever survives is a cycle skeleton; six or
//! more survivors mean the group encloses something.

use std::collections::VecDeque;

use crate::board::Geometry;
use crate::union_find::GroupSet;

/// Smallest possible ring on a hex grid
pub const MIN_RING_SIZE: usize = 6;

/// Does the group containing `cell` form a ring?
pub fn has_ring(geometry: &Geometry, groups: &mut GroupSet, cell: usize) -> bool {
    let group = groups.find(cell);
    let cells = geometry.num_cells();

    let mut present = vec![false; cells];
    let mut num = 0;
    for other in 0..cells {
        if geometry.is_playable_cell(other) && groups.find(other) == group {
            present[other] = true;
            num += 1;
        }
    }
    if num < MIN_RING_SIZE {
        return false;
    }

    let mut queue = VecDeque::new();
    let mut queued = vec![false; cells];
    for other in 0..cells {
        if present[other] && present_neighbors(geometry, &present, other).len() < 3 {
            queue.push_back(other);
            queued[other] = true;
        }
    }

    while num >= MIN_RING_SIZE {
        let Some(target) = queue.pop_front() else {
            break;
        };
        queued[target] = false;

        let neighbors = present_neighbors(geometry, &present, target);
        match neighbors.as_slice() {
            [_, _, _, ..] => continue,
            [a, b] if !geometry.are_adjacent(*a, *b) => continue,
            _ => {}
        }

        num -= 1;
        present[target] = false;
        for neighbor in neighbors {
            if !queued[neighbor] {
                queue.push_back(neighbor);
                queued[neighbor] = true;
            }
        }
    }

    num >= MIN_RING_SIZE
}

/// Neighbours of `cell` still marked present, at most six
fn present_neighbors(geometry: &Geometry, present: &[bool], cell: usize) -> Vec<usize> {
    geometry.neighbors(cell).filter(|&n| present[n]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_of(geo: &Geometry, cells: &[usize]) -> GroupSet {
        let mut groups = GroupSet::new(geo);
        for &a in cells {
            for b in geo.neighbors(a) {
                if cells.contains(&b) {
                    groups.union(a, b);
                }
            }
        }
        groups
    }

    fn hexagon_around(geo: &Geometry, center: usize) -> Vec<usize> {
        geo.neighbors(center).collect()
    }

    #[test]
    fn test_six_ring_around_empty_cell() {
        let geo = Geometry::new(7);
        let ring = hexagon_around(&geo, geo.cell(3, 3));
        assert_eq!(ring.len(), 6);
        let mut groups = group_of(&geo, &ring);
        assert!(has_ring(&geo, &mut groups, ring[0]));
    }

    #[test]
    fn test_open_ring_is_not_ring() {
        let geo = Geometry::new(7);
        let ring = hexagon_around(&geo, geo.cell(3, 3));
        for skip in 0..ring.len() {
            let partial: Vec<_> = ring
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &c)| c)
                .collect();
            let mut groups = group_of(&geo, &partial);
            assert!(!has_ring(&geo, &mut groups, partial[0]), "gap at {}", skip);
        }
    }

    #[test]
    fn test_filled_hexagon_is_ring() {
        // the enclosed cell may hold a stone of the ring's owner
        let geo = Geometry::new(7);
        let center = geo.cell(3, 3);
        let mut blob = hexagon_around(&geo, center);
        blob.push(center);
        let mut groups = group_of(&geo, &blob);
        assert!(has_ring(&geo, &mut groups, center));
    }

    #[test]
    fn test_ring_with_tail_is_ring() {
        let geo = Geometry::new(9);
        let center = geo.cell(4, 4);
        let mut stones = hexagon_around(&geo, center);
        // a tail leaving the ring towards the top edge
        stones.push(geo.cell(2, 4));
        stones.push(geo.cell(1, 4));
        let mut groups = group_of(&geo, &stones);
        assert!(has_ring(&geo, &mut groups, geo.cell(1, 4)));
    }

    #[test]
    fn test_thick_line_is_not_ring() {
        let geo = Geometry::new(9);
        let mut stones = Vec::new();
        for col in 2..7 {
            stones.push(geo.cell(4, col));
            stones.push(geo.cell(5, col - 1));
        }
        let mut groups = group_of(&geo, &stones);
        assert!(!has_ring(&geo, &mut groups, stones[0]));
    }

    #[test]
    fn test_ring_near_edge() {
        let geo = Geometry::new(9);
        let center = geo.cell(1, 5);
        let ring = hexagon_around(&geo, center);
        assert_eq!(ring.len(), 6);
        let mut groups = group_of(&geo, &ring);
        assert!(has_ring(&geo, &mut groups, ring[0]));
    }

    #[test]
    fn test_large_ring() {
        let geo = Geometry::new(9);
        let center = geo.cell(4, 4);
        let inner: Vec<_> = hexagon_around(&geo, center);
        // cells at distance exactly two from the center
        let outer: Vec<_> = (0..geo.num_cells())
            .filter(|&c| geo.is_playable_cell(c) && c != center && !inner.contains(&c))
            .filter(|&c| geo.neighbors(c).any(|n| inner.contains(&n)))
            .collect();
        assert_eq!(outer.len(), 12);
        let mut groups = group_of(&geo, &outer);
        assert!(has_ring(&geo, &mut groups, outer[0]));
    }
}
