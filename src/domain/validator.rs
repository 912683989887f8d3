//! Structural validation of parent-pointer records.

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::entities::Record;
use crate::domain::error::{TreeResult, ValidationError};

/// Checks that `records` describe exactly one rooted, acyclic tree.
///
/// Input order does not matter; a sorted copy is validated. Checks run in
/// this order and the first violation is returned:
///
/// 1. duplicate ids (`DuplicateRoot` for id 0, `DuplicateNode` otherwise)
/// 2. ids form the range `0..n` (`NonContiguous`)
/// 3. record 0 exists (`NoRoot`) and is its own parent (`RootHasParent`)
/// 4. no parent id exceeds its child's id (`ParentIdTooHigh`)
/// 5. every parent chain reaches the root (`CycleDetected`)
///
/// An empty collection has no root and fails with `NoRoot`.
#[instrument(level = "debug", skip(records), fields(count = records.len()))]
pub fn validate(records: &[Record]) -> TreeResult<()> {
    let mut sorted = records.to_vec();
    sorted.sort_unstable_by_key(|r| r.id);
    validate_sorted(&sorted)
}

/// Same as [`validate`] for records already sorted by id.
pub(crate) fn validate_sorted(sorted: &[Record]) -> TreeResult<()> {
    check_duplicates(sorted)?;
    check_contiguous(sorted)?;
    check_root(sorted)?;
    check_parent_order(sorted)?;
    check_acyclic(sorted)?;
    debug!(count = sorted.len(), "records form a valid tree");
    Ok(())
}

fn check_duplicates(sorted: &[Record]) -> TreeResult<()> {
    match sorted.iter().tuple_windows().find(|(a, b)| a.id == b.id) {
        Some((dup, _)) if dup.id == 0 => Err(ValidationError::DuplicateRoot),
        Some((dup, _)) => Err(ValidationError::DuplicateNode { id: dup.id }),
        None => Ok(()),
    }
}

fn check_contiguous(sorted: &[Record]) -> TreeResult<()> {
    match sorted.iter().enumerate().find(|(i, r)| r.id != *i) {
        Some((expected, r)) => Err(ValidationError::NonContiguous {
            expected,
            found: r.id,
        }),
        None => Ok(()),
    }
}

fn check_root(sorted: &[Record]) -> TreeResult<()> {
    match sorted.first() {
        Some(root) if root.id == 0 => {
            if root.parent_id != 0 {
                return Err(ValidationError::RootHasParent {
                    parent_id: root.parent_id,
                });
            }
            Ok(())
        }
        _ => Err(ValidationError::NoRoot),
    }
}

fn check_parent_order(sorted: &[Record]) -> TreeResult<()> {
    match sorted.iter().skip(1).find(|r| r.parent_id > r.id) {
        Some(r) => Err(ValidationError::ParentIdTooHigh {
            id: r.id,
            parent_id: r.parent_id,
        }),
        None => Ok(()),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Walk {
    Unvisited,
    OnPath,
    Rooted,
}

/// Walks every parent chain toward the root.
///
/// Nodes already known to reach the root are not walked again, so the whole
/// pass is linear. Relies on contiguity: `sorted[id].id == id`.
fn check_acyclic(sorted: &[Record]) -> TreeResult<()> {
    let mut state = vec![Walk::Unvisited; sorted.len()];
    if let Some(root) = state.first_mut() {
        *root = Walk::Rooted;
    }
    let mut path = Vec::new();

    for start in 0..sorted.len() {
        let mut current = start;
        loop {
            match state.get(current).copied() {
                Some(Walk::Rooted) => break,
                Some(Walk::OnPath) => {
                    return Err(ValidationError::CycleDetected { id: start });
                }
                Some(Walk::Unvisited) => {
                    state[current] = Walk::OnPath;
                    path.push(current);
                    current = sorted[current].parent_id;
                }
                // Parent outside 0..n; ruled out by earlier checks.
                None => return Err(ValidationError::CycleDetected { id: start }),
            }
        }
        for id in path.drain(..) {
            state[id] = Walk::Rooted;
        }
    }
    Ok(())
}
