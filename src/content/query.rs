use crate::content::model::{
    Concept, ConceptDetail, ConfigurationOptions, StudyConfiguration, Syllabus,
};
use crate::content::{ContentRepository, QueryService};

impl QueryService for ContentRepository {
    fn configuration_options(&self) -> ConfigurationOptions {
        self.options.clone()
    }

    fn syllabus(&self, config: &StudyConfiguration) -> Option<Syllabus> {
        let key = config.syllabus_key()?;
        let found = self.syllabi.get(&key).cloned();
        log::debug!("syllabus lookup {key}: found={}", found.is_some());
        found
    }

    fn concept_details(&self, concept_id: &str) -> Option<ConceptDetail> {
        if concept_id.is_empty() {
            return None;
        }
        let found = self.details.get(concept_id).cloned();
        log::debug!("concept detail lookup '{concept_id}': found={}", found.is_some());
        found
    }

    // Flattens the stored tree in place; the default clones the syllabus first.
    fn all_concepts(&self, config: &StudyConfiguration) -> Vec<Concept> {
        let Some(key) = config.syllabus_key() else {
            return Vec::new();
        };
        self.syllabi
            .get(&key)
            .map(|s| s.concepts().cloned().collect())
            .unwrap_or_default()
    }
}
