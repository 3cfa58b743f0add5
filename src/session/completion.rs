use std::collections::HashSet;

/// Concept ids the user marked as studied during this session.
///
/// Append-only: there is no way to un-complete a concept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletionSet {
    ids: HashSet<String>,
}

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the id was not already complete.
    pub fn mark(&mut self, concept_id: &str) -> bool {
        if self.ids.contains(concept_id) {
            return false;
        }
        self.ids.insert(concept_id.to_string())
    }

    pub fn contains(&self, concept_id: &str) -> bool {
        self.ids.contains(concept_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_is_idempotent() {
        let mut once = CompletionSet::new();
        once.mark("concept1");

        let mut twice = CompletionSet::new();
        assert!(twice.mark("concept1"));
        assert!(!twice.mark("concept1"));

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
        assert!(twice.contains("concept1"));
        assert!(!twice.contains("concept2"));
    }
}
