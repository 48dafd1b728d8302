//! Axis-aligned bounding box collision detection
//!
//! Stateless. Boxes are closed: touching edges count as overlap, and two
//! boxes only miss when one lies strictly to one side of the other.

use super::entity::{Bounds, Entity};

/// Closed-interval AABB overlap
#[inline]
pub fn overlaps(a: &Bounds, b: &Bounds) -> bool {
    !(a.right < b.left || a.left > b.right || a.bottom < b.top || a.top > b.bottom)
}

/// Pairwise test between two entities (ignores liveness)
#[inline]
pub fn check_collision(a: &Entity, b: &Entity) -> bool {
    overlaps(&a.bounds(), &b.bounds())
}

/// Index of the first live entity in `others` overlapping `subject`
pub fn first_collision(subject: &Entity, others: &[Entity]) -> Option<usize> {
    others
        .iter()
        .position(|other| other.is_alive() && check_collision(subject, other))
}

/// Every overlapping pair of live entities, `(index in a, index in b)`
///
/// An entity may appear in several pairs.
pub fn all_collisions(a: &[Entity], b: &[Entity]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, ea) in a.iter().enumerate().filter(|(_, e)| e.is_alive()) {
        for (j, eb) in b.iter().enumerate().filter(|(_, e)| e.is_alive()) {
            if check_collision(ea, eb) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Overlapping pairs where each entity is consumed by its first match
///
/// `a` is scanned in order; each entry pairs with the first live, not yet
/// consumed entry of `b` (in order) that overlaps it. No index appears twice.
pub fn resolve_collisions(a: &[Entity], b: &[Entity]) -> Vec<(usize, usize)> {
    let mut consumed = vec![false; b.len()];
    let mut pairs = Vec::new();
    for (i, ea) in a.iter().enumerate().filter(|(_, e)| e.is_alive()) {
        let hit = b
            .iter()
            .enumerate()
            .find(|(j, eb)| !consumed[*j] && eb.is_alive() && check_collision(ea, eb));
        if let Some((j, _)) = hit {
            consumed[j] = true;
            pairs.push((i, j));
        }
    }
    pairs
}
