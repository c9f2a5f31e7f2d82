//! Per-row in-flight tracking

use std::collections::HashSet;

use crate::types::{Action, EntityId};

/// Set of `(action, id)` pairs with an outstanding remote call.
///
/// Keys are independent: marking one pair never touches another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InFlight {
    keys: HashSet<(Action, EntityId)>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a pair as started. Returns `false` if it already was.
    pub fn begin(&mut self, action: Action, id: EntityId) -> bool {
        self.keys.insert((action, id))
    }

    pub fn finish(&mut self, action: Action, id: EntityId) {
        self.keys.remove(&(action, id));
    }

    pub fn contains(&self, action: Action, id: EntityId) -> bool {
        self.keys.contains(&(action, id))
    }

    /// Any action outstanding for this row
    pub fn is_busy(&self, id: EntityId) -> bool {
        self.keys.iter().any(|(_, key)| *key == id)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_independent() {
        let mut flags = InFlight::new();
        assert!(flags.begin(Action::Ban, EntityId(1)));
        assert!(flags.begin(Action::Ban, EntityId(2)));
        assert!(flags.begin(Action::Delete, EntityId(1)));
        assert!(!flags.begin(Action::Ban, EntityId(1)));

        flags.finish(Action::Ban, EntityId(2));
        assert!(flags.contains(Action::Ban, EntityId(1)));
        assert!(!flags.contains(Action::Ban, EntityId(2)));
        assert!(flags.is_busy(EntityId(1)));
        assert!(!flags.is_busy(EntityId(2)));
        assert_eq!(flags.len(), 2);
    }
}
