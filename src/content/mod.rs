pub mod model;
pub mod query;
pub mod repository;

use crate::content::model::{
    Concept, ConceptDetail, ConfigurationOptions, StudyConfiguration, Syllabus,
};

pub use repository::{ContentError, ContentRepository};

/// Read-only lookups the screens depend on.
///
/// "Not found" is always `None`, never an error. A remote implementation
/// must keep these signatures and that absent-value contract.
pub trait QueryService {
    fn configuration_options(&self) -> ConfigurationOptions;

    /// `None` if subject, course or textbook is empty, or if nothing is
    /// registered for that exact triple.
    fn syllabus(&self, config: &StudyConfiguration) -> Option<Syllabus>;

    fn concept_details(&self, concept_id: &str) -> Option<ConceptDetail>;

    /// Every concept of the configured syllabus in declaration order;
    /// empty when the syllabus is absent.
    fn all_concepts(&self, config: &StudyConfiguration) -> Vec<Concept> {
        match self.syllabus(config) {
            Some(syllabus) => syllabus.concepts().cloned().collect(),
            None => Vec::new(),
        }
    }
}
