//! Ordinal planning for ordered child collections.
//!
//! Album tracks, event sets and set performances each carry a 1-based
//! `position` column that must read exactly `1..=N` within its parent. The
//! functions here decide which positions move and by how much; the `db`
//! crate executes the resulting [`PositionShift`]s inside one transaction.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::{DbId, Position};

/// Position of the first child in any scope.
pub const FIRST_POSITION: Position = 1;

// ---------------------------------------------------------------------------
// Shift descriptors
// ---------------------------------------------------------------------------

/// A bulk position update applied to every sibling in one parent scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionShift {
    /// Increment every sibling at or after `from`, making room at `from`.
    OpenGap { from: Position },
    /// Decrement every sibling after `after`, closing the hole at `after`.
    CloseGap { after: Position },
}

impl PositionShift {
    /// The position a sibling currently at `position` ends up at.
    pub fn apply_to(self, position: Position) -> Position {
        match self {
            PositionShift::OpenGap { from } if position >= from => position + 1,
            PositionShift::CloseGap { after } if position > after => position - 1,
            _ => position,
        }
    }
}

// ---------------------------------------------------------------------------
// Insert
// ---------------------------------------------------------------------------

/// Reject positions below [`FIRST_POSITION`].
pub fn validate_position(position: Position) -> Result<(), CoreError> {
    if position < FIRST_POSITION {
        return Err(CoreError::Validation(format!(
            "position must be >= {FIRST_POSITION}, got {position}"
        )));
    }
    Ok(())
}

/// Position just past the current maximum (1 for an empty scope).
pub fn append_position(current_max: Option<Position>) -> Position {
    current_max.map_or(FIRST_POSITION, |max| max + 1)
}

/// Where a new child lands.
///
/// An omitted position appends. A requested position past the end is
/// clamped to the append position so the scope never gains a gap.
pub fn resolve_insert_position(
    requested: Option<Position>,
    current_max: Option<Position>,
) -> Result<Position, CoreError> {
    let append = append_position(current_max);
    match requested {
        None => Ok(append),
        Some(position) => {
            validate_position(position)?;
            Ok(position.min(append))
        }
    }
}

/// The shift needed before inserting at `position`, or `None` when appending.
pub fn plan_insert(position: Position, current_max: Option<Position>) -> Option<PositionShift> {
    match current_max {
        Some(max) if position <= max => Some(PositionShift::OpenGap { from: position }),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// Compaction applied to the remaining siblings after removing `position`.
pub fn plan_removal(position: Position) -> PositionShift {
    PositionShift::CloseGap { after: position }
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// Shifts and final position for moving one child, possibly across parents.
///
/// Both shifts exclude the moved child itself. `source` runs first, then
/// `target`, then the child is written at `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    pub source: PositionShift,
    pub target: Option<PositionShift>,
    pub position: Position,
}

/// Plan a move of the child currently at `source_position`.
///
/// `target_sibling_count` is the number of children in the target scope
/// excluding the moved child (so a same-parent move passes `N - 1`).
pub fn plan_move(
    source_position: Position,
    requested_position: Position,
    target_sibling_count: i64,
) -> Result<MovePlan, CoreError> {
    validate_position(requested_position)?;
    let siblings = count_to_position(target_sibling_count)?;
    let position = requested_position.min(siblings + 1);
    let target = (position <= siblings).then_some(PositionShift::OpenGap { from: position });

    Ok(MovePlan {
        source: plan_removal(source_position),
        target,
        position,
    })
}

fn count_to_position(count: i64) -> Result<Position, CoreError> {
    Position::try_from(count)
        .map_err(|_| CoreError::Internal(format!("sibling count {count} exceeds position range")))
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

/// Check that `requested` is an exact permutation of `current`.
///
/// Duplicates, ids from another scope, and omitted children are all
/// rejected so that a reorder can never leave a gap or a collision.
pub fn validate_reorder(current: &[DbId], requested: &[DbId]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(requested.len());
    let duplicates: Vec<DbId> = requested
        .iter()
        .copied()
        .filter(|id| !seen.insert(*id))
        .collect();
    if !duplicates.is_empty() {
        return Err(CoreError::Validation(format!(
            "reorder lists ids more than once: {duplicates:?}"
        )));
    }

    let live: HashSet<DbId> = current.iter().copied().collect();
    let unknown: Vec<DbId> = requested
        .iter()
        .copied()
        .filter(|id| !live.contains(id))
        .collect();
    let missing: Vec<DbId> = current
        .iter()
        .copied()
        .filter(|id| !seen.contains(id))
        .collect();

    if !unknown.is_empty() || !missing.is_empty() {
        return Err(CoreError::Validation(format!(
            "reorder must list every child exactly once (unknown: {unknown:?}, missing: {missing:?})"
        )));
    }
    Ok(())
}

/// Pair each id with its new position (array index + 1).
pub fn reorder_assignments(ids: &[DbId]) -> Vec<(DbId, Position)> {
    (FIRST_POSITION..).zip(ids.iter().copied()).map(|(pos, id)| (id, pos)).collect()
}

// ---------------------------------------------------------------------------
// Contiguity
// ---------------------------------------------------------------------------

/// Whether `positions` is exactly `{1, ..., N}` in any order.
pub fn is_contiguous(positions: &[Position]) -> bool {
    let mut sorted = positions.to_vec();
    sorted.sort_unstable();
    sorted.iter().copied().eq(FIRST_POSITION..FIRST_POSITION + sorted.len() as Position)
}

/// Fail with an internal error if a scope's positions are not contiguous.
pub fn ensure_contiguous(
    entity: &'static str,
    parent_id: DbId,
    positions: &[Position],
) -> Result<(), CoreError> {
    if is_contiguous(positions) {
        Ok(())
    } else {
        Err(CoreError::Internal(format!(
            "{entity} positions under parent {parent_id} are not contiguous: {positions:?}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    /// In-memory scope driven through the same plans the db layer executes.
    #[derive(Debug, Clone, Default)]
    struct Scope {
        rows: Vec<(DbId, Position)>,
    }

    impl Scope {
        fn with(ids: &[DbId]) -> Self {
            Self {
                rows: reorder_assignments(ids),
            }
        }

        fn max(&self) -> Option<Position> {
            self.rows.iter().map(|(_, p)| *p).max()
        }

        fn shift(&mut self, shift: PositionShift, exclude: Option<DbId>) {
            for (id, pos) in &mut self.rows {
                if Some(*id) != exclude {
                    *pos = shift.apply_to(*pos);
                }
            }
        }

        fn insert(&mut self, id: DbId, requested: Option<Position>) -> Result<Position, CoreError> {
            let position = resolve_insert_position(requested, self.max())?;
            if let Some(shift) = plan_insert(position, self.max()) {
                self.shift(shift, None);
            }
            self.rows.push((id, position));
            Ok(position)
        }

        fn delete(&mut self, id: DbId) {
            let idx = self.rows.iter().position(|(r, _)| *r == id).unwrap();
            let (_, position) = self.rows.remove(idx);
            self.shift(plan_removal(position), None);
        }

        fn reorder(&mut self, ids: &[DbId]) -> Result<(), CoreError> {
            validate_reorder(&self.ids(), ids)?;
            self.rows = reorder_assignments(ids);
            Ok(())
        }

        fn ids(&self) -> Vec<DbId> {
            let mut rows = self.rows.clone();
            rows.sort_by_key(|(_, p)| *p);
            rows.into_iter().map(|(id, _)| id).collect()
        }

        fn position_of(&self, id: DbId) -> Position {
            self.rows.iter().find(|(r, _)| *r == id).unwrap().1
        }

        fn positions(&self) -> Vec<Position> {
            self.rows.iter().map(|(_, p)| *p).collect()
        }
    }

    fn move_between(source: &mut Scope, target: &mut Scope, id: DbId, requested: Position) {
        let old = source.position_of(id);
        let plan = plan_move(old, requested, target.rows.len() as i64).unwrap();
        source.rows.retain(|(r, _)| *r != id);
        source.shift(plan.source, Some(id));
        if let Some(shift) = plan.target {
            target.shift(shift, Some(id));
        }
        target.rows.push((id, plan.position));
    }

    // -- PositionShift -------------------------------------------------------

    #[test]
    fn open_gap_moves_from_and_after() {
        let shift = PositionShift::OpenGap { from: 2 };
        assert_eq!(shift.apply_to(1), 1);
        assert_eq!(shift.apply_to(2), 3);
        assert_eq!(shift.apply_to(5), 6);
    }

    #[test]
    fn close_gap_moves_only_after() {
        let shift = PositionShift::CloseGap { after: 2 };
        assert_eq!(shift.apply_to(1), 1);
        assert_eq!(shift.apply_to(2), 2);
        assert_eq!(shift.apply_to(3), 2);
    }

    // -- insert --------------------------------------------------------------

    #[test]
    fn append_into_empty_scope_is_first() {
        assert_eq!(resolve_insert_position(None, None).unwrap(), 1);
        assert_eq!(plan_insert(1, None), None);
    }

    #[test]
    fn append_after_max() {
        assert_eq!(resolve_insert_position(None, Some(4)).unwrap(), 5);
        assert_eq!(plan_insert(5, Some(4)), None);
    }

    #[test]
    fn requested_position_past_end_is_clamped() {
        assert_eq!(resolve_insert_position(Some(40), Some(3)).unwrap(), 4);
        assert_eq!(resolve_insert_position(Some(7), None).unwrap(), 1);
    }

    #[test]
    fn requested_position_below_one_is_rejected() {
        assert_matches!(
            resolve_insert_position(Some(0), Some(3)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            resolve_insert_position(Some(-2), None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn insert_inside_scope_opens_gap() {
        assert_eq!(
            plan_insert(2, Some(3)),
            Some(PositionShift::OpenGap { from: 2 })
        );
    }

    #[test]
    fn insert_in_middle_shifts_later_siblings() {
        // A@1, B@2, C@3; insert D at 2.
        let mut scope = Scope::with(&[1, 2, 3]);
        assert_eq!(scope.insert(4, Some(2)).unwrap(), 2);
        assert_eq!(scope.ids(), vec![1, 4, 2, 3]);
        assert!(is_contiguous(&scope.positions()));
    }

    // -- delete --------------------------------------------------------------

    #[test]
    fn delete_middle_compacts() {
        let mut scope = Scope::with(&[10, 20, 30]);
        scope.delete(20);
        assert_eq!(scope.ids(), vec![10, 30]);
        assert_eq!(scope.position_of(30), 2);
        assert!(is_contiguous(&scope.positions()));
    }

    #[test]
    fn delete_last_leaves_prefix_untouched() {
        let mut scope = Scope::with(&[10, 20, 30]);
        scope.delete(30);
        assert_eq!(scope.ids(), vec![10, 20]);
        assert!(is_contiguous(&scope.positions()));
    }

    // -- reorder -------------------------------------------------------------

    #[test]
    fn reorder_follows_array_order() {
        let mut scope = Scope::with(&[1, 2, 3]);
        scope.reorder(&[3, 1, 2]).unwrap();
        assert_eq!(scope.position_of(3), 1);
        assert_eq!(scope.position_of(1), 2);
        assert_eq!(scope.position_of(2), 3);
    }

    #[test]
    fn reorder_is_idempotent() {
        let mut once = Scope::with(&[1, 2, 3]);
        once.reorder(&[2, 3, 1]).unwrap();
        let mut twice = once.clone();
        twice.reorder(&[2, 3, 1]).unwrap();
        assert_eq!(once.ids(), twice.ids());
        assert_eq!(once.positions(), twice.positions());
    }

    #[test]
    fn reorder_rejects_duplicates() {
        assert_matches!(
            validate_reorder(&[1, 2, 3], &[1, 1, 2, 3]),
            Err(CoreError::Validation(msg)) if msg.contains("more than once")
        );
    }

    #[test]
    fn reorder_rejects_subset() {
        assert_matches!(
            validate_reorder(&[1, 2, 3], &[3, 1]),
            Err(CoreError::Validation(msg)) if msg.contains("missing: [2]")
        );
    }

    #[test]
    fn reorder_rejects_foreign_ids() {
        assert_matches!(
            validate_reorder(&[1, 2], &[2, 1, 99]),
            Err(CoreError::Validation(msg)) if msg.contains("unknown: [99]")
        );
    }

    #[test]
    fn reorder_of_empty_scope_accepts_empty_array() {
        assert!(validate_reorder(&[], &[]).is_ok());
        assert!(reorder_assignments(&[]).is_empty());
    }

    #[test]
    fn reorder_assignments_are_one_based() {
        assert_eq!(reorder_assignments(&[7, 5]), vec![(7, 1), (5, 2)]);
    }

    // -- move ----------------------------------------------------------------

    #[test]
    fn move_across_parents_keeps_both_scopes_contiguous() {
        // S1 = [1, 2, 3], S2 = [4, 5]; move 2 to S2 position 1.
        let mut s1 = Scope::with(&[1, 2, 3]);
        let mut s2 = Scope::with(&[4, 5]);
        move_between(&mut s1, &mut s2, 2, 1);

        assert_eq!(s1.ids(), vec![1, 3]);
        assert_eq!(s2.ids(), vec![2, 4, 5]);
        assert_eq!(s2.position_of(2), 1);
        assert!(is_contiguous(&s1.positions()));
        assert!(is_contiguous(&s2.positions()));
    }

    #[test]
    fn move_into_middle_of_target() {
        // A has 3 items, B has 2; move A's first into B at 2.
        let mut a = Scope::with(&[1, 2, 3]);
        let mut b = Scope::with(&[4, 5]);
        move_between(&mut a, &mut b, 1, 2);

        assert_eq!(a.rows.len(), 2);
        assert_eq!(b.rows.len(), 3);
        assert_eq!(b.position_of(1), 2);
        assert!(is_contiguous(&a.positions()));
        assert!(is_contiguous(&b.positions()));
    }

    #[test]
    fn move_past_end_appends() {
        let plan = plan_move(1, 50, 2).unwrap();
        assert_eq!(plan.position, 3);
        assert_eq!(plan.target, None);
    }

    #[test]
    fn move_within_same_scope() {
        // [1, 2, 3, 4]; move id 2 (position 2) to position 3.
        let scope = Scope::with(&[1, 2, 3, 4]);
        let plan = plan_move(2, 3, 3).unwrap();
        let mut rows = scope.rows.clone();
        rows.retain(|(id, _)| *id != 2);
        let mut shifted = Scope { rows };
        shifted.shift(plan.source, Some(2));
        if let Some(shift) = plan.target {
            shifted.shift(shift, Some(2));
        }
        shifted.rows.push((2, plan.position));

        assert_eq!(shifted.ids(), vec![1, 3, 2, 4]);
        assert!(is_contiguous(&shifted.positions()));
    }

    #[test]
    fn move_rejects_position_below_one() {
        assert_matches!(plan_move(1, 0, 3), Err(CoreError::Validation(_)));
    }

    // -- contiguity ----------------------------------------------------------

    #[test]
    fn contiguity_accepts_any_order() {
        assert!(is_contiguous(&[]));
        assert!(is_contiguous(&[3, 1, 2]));
    }

    #[test]
    fn contiguity_rejects_gaps_and_duplicates() {
        assert!(!is_contiguous(&[1, 3]));
        assert!(!is_contiguous(&[1, 1, 2]));
        assert!(!is_contiguous(&[2, 3]));
    }

    #[test]
    fn ensure_contiguous_reports_internal_error() {
        assert_matches!(
            ensure_contiguous("Track", 9, &[1, 3]),
            Err(CoreError::Internal(msg)) if msg.contains("parent 9")
        );
    }
}
