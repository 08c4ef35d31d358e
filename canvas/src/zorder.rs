//! Z-order bookkeeping over the element collection.
//!
//! Paint order is the ascending `z_index`. Among N elements the z-indices are
//! a dense permutation of `1..=N`: creation appends `N + 1`, deletion is
//! followed by [`compact`], and [`move_layer`] only swaps two existing values.

#[cfg(test)]
#[path = "zorder_test.rs"]
mod zorder_test;

use serde::{Deserialize, Serialize};

use crate::doc::{Element, ElementId};

/// Which way to move an element in the layer stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward the viewer (higher z-index).
    Up,
    /// Away from the viewer (lower z-index).
    Down,
}

/// Swap `id` with its immediate neighbour in paint order.
///
/// The neighbour is the element holding the next-greater (`Up`) or
/// next-smaller (`Down`) z-index. Both the z-indices and the collection
/// positions of the pair are swapped. Returns `false` without touching
/// anything when `id` is unknown or already at the extremity.
pub fn move_layer(elements: &mut [Element], id: &ElementId, direction: Direction) -> bool {
    let Some(index) = elements.iter().position(|e| &e.id == id) else {
        return false;
    };
    let z = elements[index].z_index;

    let neighbour = elements
        .iter()
        .enumerate()
        .filter(|(_, e)| match direction {
            Direction::Up => e.z_index > z,
            Direction::Down => e.z_index < z,
        })
        .min_by_key(|(_, e)| match direction {
            Direction::Up => e.z_index - z,
            Direction::Down => z - e.z_index,
        })
        .map(|(i, _)| i);

    let Some(other) = neighbour else {
        return false;
    };

    let other_z = elements[other].z_index;
    elements[other].z_index = z;
    elements[index].z_index = other_z;
    elements.swap(index, other);
    true
}

/// Renumber z-indices to `1..=N`, preserving relative paint order.
///
/// Ties (only possible in hand-edited storage) keep collection order.
pub fn compact(elements: &mut [Element]) {
    let mut order: Vec<usize> = (0..elements.len()).collect();
    order.sort_by_key(|&i| elements[i].z_index);
    for (rank, i) in (1_i64..).zip(order) {
        elements[i].z_index = rank;
    }
}

/// Whether the z-indices form exactly `{1, …, N}`.
#[must_use]
pub fn is_dense(elements: &[Element]) -> bool {
    let mut zs: Vec<i64> = elements.iter().map(|e| e.z_index).collect();
    zs.sort_unstable();
    (1_i64..).zip(zs).all(|(expected, z)| expected == z)
}
