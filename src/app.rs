use crate::config::Config;
use crate::content::model::ConceptDetail;
use crate::content::{ContentRepository, QueryService};
use crate::session::entry::{EntryField, EntryForm};
use crate::session::navigation::{Intent, NavigationController, Screen};
use crate::session::study::ConceptStudyState;
use crate::session::tree::SyllabusTreeState;
use crate::ui::theme::Theme;

/// Entry-screen selections passed on the command line.
#[derive(Clone, Debug, Default)]
pub struct Preselection {
    pub subject: Option<String>,
    pub course: Option<String>,
    pub textbook: Option<String>,
    pub goal: Option<String>,
}

/// Owns the navigation controller plus the per-screen view state, and turns
/// user actions into intents for the controller.
pub struct App<Q = ContentRepository> {
    pub nav: NavigationController<Q>,
    pub entry: EntryForm,
    pub tree: SyllabusTreeState,
    pub study: ConceptStudyState,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
}

impl<Q: QueryService> App<Q> {
    pub fn new(query: Q, config: Config, theme: &'static Theme) -> Self {
        let mut nav = NavigationController::new(query);
        nav.load_options();
        Self {
            nav,
            entry: EntryForm::new(),
            tree: SyllabusTreeState::new(),
            study: ConceptStudyState::new(),
            theme,
            config,
            should_quit: false,
        }
    }

    pub fn preselect(&mut self, preselection: &Preselection) {
        let Some(options) = self.nav.options() else {
            return;
        };
        let fields = [
            (EntryField::Subject, &preselection.subject),
            (EntryField::Course, &preselection.course),
            (EntryField::Textbook, &preselection.textbook),
            (EntryField::Goal, &preselection.goal),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                if !self.entry.preselect(options, field, value) {
                    log::warn!("ignoring unknown {} '{value}'", field.label());
                }
            }
        }
    }

    /// Validate the entry form. Any unset selector raises the blocking
    /// notice and nothing is submitted.
    pub fn submit_entry(&mut self) {
        let Some(options) = self.nav.options() else {
            return;
        };
        match self.entry.submit(options) {
            Ok(config) => self.dispatch(Intent::ConfigSubmitted(config)),
            Err(err) => {
                log::debug!("entry rejected: {err:?}");
                self.entry.notice = Some(err.to_string());
            }
        }
    }

    pub fn dispatch(&mut self, intent: Intent) {
        let fresh_config = matches!(intent, Intent::ConfigSubmitted(_));
        let opens_concept = matches!(intent, Intent::ConceptSelected(_));

        if let Err(err) = self.nav.dispatch(intent) {
            log::warn!("navigation rejected: {err}");
            return;
        }

        if fresh_config {
            self.tree = SyllabusTreeState::new();
        }
        if opens_concept {
            self.study = ConceptStudyState::new();
        }
    }

    pub fn activate_tree_row(&mut self) {
        let Some(syllabus) = self.nav.syllabus() else {
            return;
        };
        if let Some(intent) = self.tree.activate(syllabus) {
            self.dispatch(intent);
        }
    }

    pub fn study_previewed(&mut self) {
        if let Some(intent) = self.tree.study_previewed() {
            self.dispatch(intent);
        }
    }

    /// Only offered while the concept has details and is not yet complete.
    pub fn mark_complete(&mut self) {
        if self.nav.screen() != Screen::Concept || self.nav.concept_detail().is_none() {
            return;
        }
        let Some(concept) = self.nav.selected_concept() else {
            return;
        };
        if self.nav.completed().contains(&concept.id) {
            return;
        }
        let id = concept.id.clone();
        self.dispatch(Intent::ConceptCompleted(id));
    }

    pub fn back(&mut self) {
        if self.nav.screen() == Screen::Concept {
            self.dispatch(Intent::BackRequested);
        }
    }

    /// Detail of the concept on screen, if any.
    pub fn detail(&self) -> Option<&ConceptDetail> {
        match self.nav.screen() {
            Screen::Concept => self.nav.concept_detail(),
            _ => None,
        }
    }
}
