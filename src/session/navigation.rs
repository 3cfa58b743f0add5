use thiserror::Error;

use crate::content::QueryService;
use crate::content::model::{
    Concept, ConceptDetail, ConfigurationOptions, StudyConfiguration, Syllabus,
};
use crate::session::completion::CompletionSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Entry,
    Syllabus,
    Concept,
}

/// Requests the screens send upward. The controller is the only place
/// navigation state and the completion set change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    ConfigSubmitted(StudyConfiguration),
    ConceptSelected(Concept),
    ConceptCompleted(String),
    BackRequested,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no study configuration has been submitted yet")]
    NoConfiguration,
    #[error("a study configuration is already active")]
    AlreadyConfigured,
}

/// Read-only snapshot of what should be on screen. Exactly one variant is
/// produced per state; absent data stays inside the variant as `None`.
#[derive(Debug, PartialEq)]
pub enum ScreenView<'a> {
    /// Startup, before the option lists are loaded.
    Loading,
    Entry {
        options: &'a ConfigurationOptions,
    },
    Syllabus {
        config: &'a StudyConfiguration,
        syllabus: Option<&'a Syllabus>,
        completed: &'a CompletionSet,
    },
    Concept {
        concept: &'a Concept,
        detail: Option<&'a ConceptDetail>,
        completed: bool,
    },
}

/// Entry -> Syllabus -> Concept, with Concept -> Syllabus as the only
/// reverse edge.
pub struct NavigationController<Q> {
    query: Q,
    screen: Screen,
    options: Option<ConfigurationOptions>,
    user_config: Option<StudyConfiguration>,
    syllabus: Option<Syllabus>,
    selected_concept: Option<Concept>,
    concept_detail: Option<ConceptDetail>,
    completed: CompletionSet,
}

impl<Q: QueryService> NavigationController<Q> {
    pub fn new(query: Q) -> Self {
        Self {
            query,
            screen: Screen::Entry,
            options: None,
            user_config: None,
            syllabus: None,
            selected_concept: None,
            concept_detail: None,
            completed: CompletionSet::new(),
        }
    }

    pub fn load_options(&mut self) {
        let options = self.query.configuration_options();
        log::info!(
            "loaded options: {} subjects, {} courses, {} textbooks, {} goals",
            options.subjects.len(),
            options.courses.len(),
            options.textbooks.len(),
            options.preparation_goals.len()
        );
        self.options = Some(options);
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<(), NavigationError> {
        match intent {
            Intent::ConfigSubmitted(config) => self.submit_config(config),
            Intent::ConceptSelected(concept) => self.select_concept(concept),
            Intent::ConceptCompleted(id) => {
                self.complete_concept(&id);
                Ok(())
            }
            Intent::BackRequested => self.back_to_syllabus(),
        }
    }

    /// Store the configuration and resolve its syllabus. An absent syllabus
    /// still moves to the Syllabus screen, which shows "not available".
    /// Only accepted from the Entry screen; the configuration is fixed once
    /// submitted.
    pub fn submit_config(&mut self, config: StudyConfiguration) -> Result<(), NavigationError> {
        if self.screen != Screen::Entry {
            return Err(NavigationError::AlreadyConfigured);
        }
        let syllabus = self.query.syllabus(&config);
        log::info!(
            "config submitted: {} / {} / {} ({}), syllabus found={}",
            config.subject,
            config.course,
            config.textbook,
            config.goal,
            syllabus.is_some()
        );
        self.user_config = Some(config);
        self.syllabus = syllabus;
        self.selected_concept = None;
        self.concept_detail = None;
        self.screen = Screen::Syllabus;
        Ok(())
    }

    pub fn select_concept(&mut self, concept: Concept) -> Result<(), NavigationError> {
        if self.user_config.is_none() {
            return Err(NavigationError::NoConfiguration);
        }
        let detail = self.query.concept_details(&concept.id);
        log::info!(
            "concept selected: {} ({}), details found={}",
            concept.name,
            concept.id,
            detail.is_some()
        );
        self.selected_concept = Some(concept);
        self.concept_detail = detail;
        self.screen = Screen::Concept;
        Ok(())
    }

    /// Configuration and syllabus are kept as they are, not re-fetched.
    pub fn back_to_syllabus(&mut self) -> Result<(), NavigationError> {
        if self.user_config.is_none() {
            return Err(NavigationError::NoConfiguration);
        }
        log::info!("back to syllabus");
        self.selected_concept = None;
        self.concept_detail = None;
        self.screen = Screen::Syllabus;
        Ok(())
    }

    /// Returns `true` if the concept was newly marked. Never changes screen.
    pub fn complete_concept(&mut self, concept_id: &str) -> bool {
        let newly = self.completed.mark(concept_id);
        if newly {
            log::info!("concept completed: {concept_id}");
        }
        newly
    }

    pub fn view(&self) -> ScreenView<'_> {
        match self.screen {
            Screen::Entry => match &self.options {
                Some(options) => ScreenView::Entry { options },
                None => ScreenView::Loading,
            },
            // Transitions never reach Syllabus/Concept without their
            // configuration or concept, so the fallbacks are unreachable.
            Screen::Syllabus => match &self.user_config {
                Some(config) => ScreenView::Syllabus {
                    config,
                    syllabus: self.syllabus.as_ref(),
                    completed: &self.completed,
                },
                None => ScreenView::Loading,
            },
            Screen::Concept => match &self.selected_concept {
                Some(concept) => ScreenView::Concept {
                    concept,
                    detail: self.concept_detail.as_ref(),
                    completed: self.completed.contains(&concept.id),
                },
                None => ScreenView::Loading,
            },
        }
    }

    /// `(completed, total)` over the stored syllabus, so no lookup happens
    /// per frame. Completion ids that are not part of the syllabus do not
    /// count.
    pub fn completion_progress(&self) -> Option<(usize, usize)> {
        self.user_config.as_ref()?;
        let Some(syllabus) = &self.syllabus else {
            return Some((0, 0));
        };
        let (done, total) = syllabus.concepts().fold((0, 0), |(done, total), c| {
            (done + usize::from(self.completed.contains(&c.id)), total + 1)
        });
        Some((done, total))
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn options(&self) -> Option<&ConfigurationOptions> {
        self.options.as_ref()
    }

    pub fn user_config(&self) -> Option<&StudyConfiguration> {
        self.user_config.as_ref()
    }

    pub fn syllabus(&self) -> Option<&Syllabus> {
        self.syllabus.as_ref()
    }

    pub fn selected_concept(&self) -> Option<&Concept> {
        self.selected_concept.as_ref()
    }

    pub fn concept_detail(&self) -> Option<&ConceptDetail> {
        self.concept_detail.as_ref()
    }

    pub fn completed(&self) -> &CompletionSet {
        &self.completed
    }

    pub fn query(&self) -> &Q {
        &self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRepository;

    fn controller() -> NavigationController<ContentRepository> {
        let mut nav = NavigationController::new(ContentRepository::embedded().unwrap());
        nav.load_options();
        nav
    }

    fn halliday() -> StudyConfiguration {
        StudyConfiguration::new(
            "Physics",
            "B.Tech First Year",
            "Halliday & Resnick - Fundamentals of Physics",
            "Revision",
        )
    }

    fn concept(nav: &NavigationController<ContentRepository>, id: &str) -> Concept {
        nav.syllabus().unwrap().find_concept(id).unwrap().clone()
    }

    #[test]
    fn loading_until_options_arrive() {
        let mut nav = NavigationController::new(ContentRepository::embedded().unwrap());
        assert_eq!(nav.view(), ScreenView::Loading);
        nav.load_options();
        assert!(matches!(nav.view(), ScreenView::Entry { .. }));
    }

    #[test]
    fn submit_moves_to_syllabus() {
        let mut nav = controller();
        nav.dispatch(Intent::ConfigSubmitted(halliday())).unwrap();
        assert_eq!(nav.screen(), Screen::Syllabus);
        match nav.view() {
            ScreenView::Syllabus { config, syllabus, .. } => {
                assert_eq!(config, &halliday());
                let units: Vec<&str> = syllabus.unwrap().units.iter().map(|u| u.name.as_str()).collect();
                assert_eq!(units, vec!["Mechanics", "Thermodynamics"]);
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn unknown_configuration_still_shows_syllabus_screen() {
        let mut nav = controller();
        let config = StudyConfiguration::new(
            "Chemistry",
            "B.Sc Physics",
            "Sears & Zemansky - University Physics",
            "Conceptual",
        );
        nav.submit_config(config).unwrap();
        assert_eq!(nav.screen(), Screen::Syllabus);
        assert!(matches!(nav.view(), ScreenView::Syllabus { syllabus: None, .. }));
        assert_eq!(nav.completion_progress(), Some((0, 0)));
    }

    #[test]
    fn select_concept_resolves_detail() {
        let mut nav = controller();
        nav.submit_config(halliday()).unwrap();
        let c1 = concept(&nav, "concept1");
        nav.dispatch(Intent::ConceptSelected(c1.clone())).unwrap();
        assert_eq!(nav.screen(), Screen::Concept);
        match nav.view() {
            ScreenView::Concept { concept, detail, completed } => {
                assert_eq!(concept, &c1);
                assert_eq!(detail.unwrap().id, "concept1");
                assert!(!completed);
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn concept_without_detail_stays_on_concept_screen() {
        let mut nav = controller();
        nav.submit_config(halliday()).unwrap();
        let c5 = concept(&nav, "concept5");
        nav.select_concept(c5).unwrap();
        assert_eq!(nav.screen(), Screen::Concept);
        assert!(matches!(nav.view(), ScreenView::Concept { detail: None, .. }));
    }

    #[test]
    fn back_keeps_configuration_and_syllabus() {
        let mut nav = controller();
        nav.submit_config(halliday()).unwrap();
        let before = nav.syllabus().cloned();
        nav.select_concept(concept(&nav, "concept2")).unwrap();
        nav.dispatch(Intent::BackRequested).unwrap();

        assert_eq!(nav.screen(), Screen::Syllabus);
        assert!(nav.selected_concept().is_none());
        assert!(nav.concept_detail().is_none());
        assert_eq!(nav.user_config(), Some(&halliday()));
        assert_eq!(nav.syllabus().cloned(), before);
    }

    #[test]
    fn reselect_after_back_yields_same_detail() {
        let mut nav = controller();
        nav.submit_config(halliday()).unwrap();
        let c1 = concept(&nav, "concept1");

        nav.select_concept(c1.clone()).unwrap();
        let first = nav.concept_detail().cloned();
        nav.back_to_syllabus().unwrap();
        nav.select_concept(c1).unwrap();

        assert_eq!(nav.screen(), Screen::Concept);
        assert_eq!(nav.concept_detail().cloned(), first);
    }

    #[test]
    fn completing_twice_equals_completing_once() {
        let mut nav = controller();
        nav.submit_config(halliday()).unwrap();
        nav.select_concept(concept(&nav, "concept1")).unwrap();

        assert!(nav.complete_concept("concept1"));
        let once = nav.completed().clone();
        nav.dispatch(Intent::ConceptCompleted("concept1".to_string())).unwrap();

        assert_eq!(nav.completed(), &once);
        assert_eq!(nav.screen(), Screen::Concept);
        assert!(matches!(nav.view(), ScreenView::Concept { completed: true, .. }));
    }

    #[test]
    fn progress_counts_only_syllabus_concepts() {
        let mut nav = controller();
        nav.submit_config(halliday()).unwrap();
        nav.complete_concept("concept1");
        nav.complete_concept("concept4");
        nav.complete_concept("not-in-syllabus");
        assert_eq!(nav.completion_progress(), Some((2, 5)));
    }

    #[test]
    fn transitions_without_configuration_are_rejected() {
        let mut nav = controller();
        let stray = Concept {
            id: "concept1".to_string(),
            name: "Motion in One Dimension".to_string(),
            description: String::new(),
            requires_diagram: true,
            has_numericals: true,
        };
        assert_eq!(nav.select_concept(stray), Err(NavigationError::NoConfiguration));
        assert_eq!(nav.dispatch(Intent::BackRequested), Err(NavigationError::NoConfiguration));
        assert_eq!(nav.screen(), Screen::Entry);
        assert!(nav.selected_concept().is_none());
        assert_eq!(nav.completion_progress(), None);
    }

    #[test]
    fn resubmitting_is_rejected_and_keeps_state() {
        let mut nav = controller();
        nav.submit_config(halliday()).unwrap();
        let c1 = concept(&nav, "concept1");
        nav.select_concept(c1.clone()).unwrap();
        nav.complete_concept("concept1");

        let other = StudyConfiguration::new(
            "Chemistry",
            "B.Sc Physics",
            "Griffiths - Introduction to Electrodynamics",
            "Conceptual",
        );
        assert_eq!(
            nav.dispatch(Intent::ConfigSubmitted(other.clone())),
            Err(NavigationError::AlreadyConfigured)
        );
        assert_eq!(nav.screen(), Screen::Concept);
        assert_eq!(nav.selected_concept(), Some(&c1));
        assert_eq!(nav.user_config(), Some(&halliday()));
        assert!(nav.syllabus().is_some());

        nav.back_to_syllabus().unwrap();
        assert_eq!(nav.submit_config(other), Err(NavigationError::AlreadyConfigured));
        assert_eq!(nav.screen(), Screen::Syllabus);
        assert_eq!(nav.user_config(), Some(&halliday()));
        assert!(nav.completed().contains("concept1"));
    }

    #[test]
    fn progress_reads_do_not_refetch_syllabus() {
        use std::cell::Cell;

        struct Counting {
            inner: ContentRepository,
            syllabus_calls: Cell<usize>,
        }
        impl QueryService for Counting {
            fn configuration_options(&self) -> ConfigurationOptions {
                self.inner.configuration_options()
            }
            fn syllabus(&self, config: &StudyConfiguration) -> Option<Syllabus> {
                self.syllabus_calls.set(self.syllabus_calls.get() + 1);
                self.inner.syllabus(config)
            }
            fn concept_details(&self, concept_id: &str) -> Option<ConceptDetail> {
                self.inner.concept_details(concept_id)
            }
        }

        let mut nav = NavigationController::new(Counting {
            inner: ContentRepository::embedded().unwrap(),
            syllabus_calls: Cell::new(0),
        });
        nav.load_options();
        nav.submit_config(halliday()).unwrap();
        nav.complete_concept("concept2");
        for _ in 0..3 {
            assert_eq!(nav.completion_progress(), Some((1, 5)));
        }
        assert_eq!(nav.query().syllabus_calls.get(), 1);
    }
}
