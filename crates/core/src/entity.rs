//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Replace the row sharing `updated`'s identity, or append it when absent.
///
/// Returns `true` when an existing row was replaced.
pub fn replace_by_id<T: Entity>(rows: &mut Vec<T>, updated: T) -> bool {
    match rows.iter().position(|row| row.id() == updated.id()) {
        Some(idx) => {
            rows[idx] = updated;
            true
        }
        None => {
            rows.push(updated);
            false
        }
    }
}
