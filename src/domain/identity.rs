//! Lifecycle state shared by every aggregate entity.

use std::fmt;

/// Whether an entity has been persisted yet.
///
/// Entities start out [`Identity::Unsaved`] and move to [`Identity::Saved`]
/// exactly once, when a repository assigns the database identifier. Nothing
/// else in the crate hands out identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Identity {
    #[default]
    Unsaved,
    Saved(i64),
}

impl Identity {
    /// Returns true while no identifier has been assigned.
    pub fn is_new(&self) -> bool {
        matches!(self, Identity::Unsaved)
    }

    /// Returns the identifier once the entity is persisted.
    pub fn id(&self) -> Option<i64> {
        match self {
            Identity::Unsaved => None,
            Identity::Saved(id) => Some(*id),
        }
    }

    /// Moves an unsaved identity to `Saved(id)`.
    ///
    /// Already saved identities keep their original identifier.
    pub(crate) fn assign(&mut self, id: i64) {
        if self.is_new() {
            *self = Identity::Saved(id);
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Unsaved => f.write_str("new"),
            Identity::Saved(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_new() {
        let identity = Identity::default();
        assert!(identity.is_new());
        assert_eq!(identity.id(), None);
    }

    #[test]
    fn test_assign_transitions_once() {
        let mut identity = Identity::Unsaved;
        identity.assign(7);
        assert_eq!(identity, Identity::Saved(7));

        identity.assign(99);
        assert_eq!(identity.id(), Some(7));
        assert!(!identity.is_new());
    }

    #[test]
    fn test_display() {
        assert_eq!(Identity::Unsaved.to_string(), "new");
        assert_eq!(Identity::Saved(3).to_string(), "3");
    }
}
