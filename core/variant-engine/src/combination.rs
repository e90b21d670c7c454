//! FILENAME: core/variant-engine/src/combination.rs
//! Combination Generator - Cartesian product of the group value lists.
//!
//! Order is row-major with the first group varying slowest. The row-span
//! calculator and the bulk edit table both rely on this order.

use crate::model::{Combination, VariantGroup};

/// Enumerates every value combination of `groups`.
///
/// Only groups with at least one value contribute. With no contributing group
/// the result is empty (not a single empty combination). There is no cap on
/// the result size; use [`combination_count`] first when the option space may
/// be large.
pub fn combinations(groups: &[VariantGroup]) -> Vec<Combination> {
    let contributing: Vec<&VariantGroup> = groups.iter().filter(|g| g.has_values()).collect();
    if contributing.is_empty() {
        return Vec::new();
    }

    contributing
        .iter()
        .fold(vec![Combination::new()], |partials, group| {
            let mut next = Vec::with_capacity(partials.len() * group.values.len());
            for partial in &partials {
                for value in &group.values {
                    let mut combo = Vec::with_capacity(partial.len() + 1);
                    combo.extend(partial.iter().cloned());
                    combo.push(value.clone());
                    next.push(combo);
                }
            }
            next
        })
}

/// Number of combinations [`combinations`] would produce (0 when no group
/// contributes), or `None` if the product overflows `usize`.
pub fn combination_count(groups: &[VariantGroup]) -> Option<usize> {
    let mut contributing = groups.iter().filter(|g| g.has_values()).peekable();
    if contributing.peek().is_none() {
        return Some(0);
    }
    contributing.try_fold(1usize, |acc, g| acc.checked_mul(g.values.len()))
}
