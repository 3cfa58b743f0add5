use thiserror::Error;

use crate::content::model::{ConfigurationOptions, StudyConfiguration};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryField {
    Subject,
    Course,
    Textbook,
    Goal,
    Continue,
}

impl EntryField {
    pub fn all() -> &'static [EntryField] {
        &[
            EntryField::Subject,
            EntryField::Course,
            EntryField::Textbook,
            EntryField::Goal,
            EntryField::Continue,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryField::Subject => "Subject",
            EntryField::Course => "Course / University Syllabus",
            EntryField::Textbook => "Reference Textbook",
            EntryField::Goal => "Preparation Goal",
            EntryField::Continue => "Continue",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            EntryField::Subject => "Select Subject",
            EntryField::Course => "Select Course",
            EntryField::Textbook => "Select Textbook",
            EntryField::Goal => "Select Goal",
            EntryField::Continue => "",
        }
    }

    fn index(self) -> Option<usize> {
        match self {
            EntryField::Subject => Some(0),
            EntryField::Course => Some(1),
            EntryField::Textbook => Some(2),
            EntryField::Goal => Some(3),
            EntryField::Continue => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("Please select all options before continuing.")]
    Unselected(EntryField),
}

/// Selection state of the entry screen. Each selector is unset until the
/// user cycles it onto an option.
#[derive(Clone, Debug, Default)]
pub struct EntryForm {
    selected: [Option<usize>; 4],
    pub focused: usize,
    /// Blocking notice shown after a rejected submission.
    pub notice: Option<String>,
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_field(&self) -> EntryField {
        EntryField::all()[self.focused.min(EntryField::all().len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % EntryField::all().len();
    }

    pub fn focus_prev(&mut self) {
        if self.focused > 0 {
            self.focused -= 1;
        } else {
            self.focused = EntryField::all().len() - 1;
        }
    }

    /// Move the focused selector to its next option; an unset selector
    /// lands on the first option.
    pub fn cycle_forward(&mut self, options: &ConfigurationOptions) {
        let Some(idx) = self.focused_field().index() else {
            return;
        };
        let len = choices(options, idx).len();
        if len == 0 {
            return;
        }
        self.selected[idx] = Some(match self.selected[idx] {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    pub fn cycle_backward(&mut self, options: &ConfigurationOptions) {
        let Some(idx) = self.focused_field().index() else {
            return;
        };
        let len = choices(options, idx).len();
        if len == 0 {
            return;
        }
        self.selected[idx] = Some(match self.selected[idx] {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    /// Preselect `value` by exact match. Returns `false` if it is not one of
    /// the field's options.
    pub fn preselect(&mut self, options: &ConfigurationOptions, field: EntryField, value: &str) -> bool {
        let Some(idx) = field.index() else {
            return false;
        };
        match choices(options, idx).iter().position(|o| o == value) {
            Some(pos) => {
                self.selected[idx] = Some(pos);
                true
            }
            None => false,
        }
    }

    /// Current value of a selector, if set.
    pub fn value<'a>(&self, options: &'a ConfigurationOptions, field: EntryField) -> Option<&'a str> {
        let idx = field.index()?;
        let pos = self.selected[idx]?;
        choices(options, idx).get(pos).map(|s| s.as_str())
    }

    /// Build the configuration, or report the first unset selector.
    pub fn submit(&self, options: &ConfigurationOptions) -> Result<StudyConfiguration, EntryError> {
        let get = |field| {
            self.value(options, field)
                .ok_or(EntryError::Unselected(field))
        };
        Ok(StudyConfiguration::new(
            get(EntryField::Subject)?,
            get(EntryField::Course)?,
            get(EntryField::Textbook)?,
            get(EntryField::Goal)?,
        ))
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

fn choices(options: &ConfigurationOptions, idx: usize) -> &[String] {
    match idx {
        0 => &options.subjects,
        1 => &options.courses,
        2 => &options.textbooks,
        _ => &options.preparation_goals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ConfigurationOptions {
        ConfigurationOptions {
            subjects: vec!["Physics".to_string(), "Chemistry".to_string()],
            courses: vec!["B.Tech First Year".to_string()],
            textbooks: vec!["Halliday".to_string(), "Griffiths".to_string()],
            preparation_goals: vec!["Revision".to_string(), "Conceptual".to_string()],
        }
    }

    fn select_all(form: &mut EntryForm, options: &ConfigurationOptions) {
        for _ in 0..4 {
            form.cycle_forward(options);
            form.focus_next();
        }
    }

    #[test]
    fn fields_start_unset() {
        let form = EntryForm::new();
        let options = options();
        for &field in EntryField::all() {
            assert_eq!(form.value(&options, field), None);
        }
        assert_eq!(form.focused_field(), EntryField::Subject);
    }

    #[test]
    fn submit_with_all_fields_builds_configuration() {
        let options = options();
        let mut form = EntryForm::new();
        select_all(&mut form, &options);
        assert_eq!(form.focused_field(), EntryField::Continue);
        assert_eq!(
            form.submit(&options),
            Ok(StudyConfiguration::new("Physics", "B.Tech First Year", "Halliday", "Revision"))
        );
    }

    #[test]
    fn each_missing_field_blocks_submission() {
        let options = options();
        for missing in [EntryField::Subject, EntryField::Course, EntryField::Textbook, EntryField::Goal] {
            let mut form = EntryForm::new();
            for &field in &EntryField::all()[..4] {
                if field != missing {
                    assert!(form.preselect(&options, field, choices(&options, field.index().unwrap())[0].as_str()));
                }
            }
            assert_eq!(form.submit(&options), Err(EntryError::Unselected(missing)));
        }
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        let options = options();
        let mut form = EntryForm::new();
        form.cycle_backward(&options);
        assert_eq!(form.value(&options, EntryField::Subject), Some("Chemistry"));
        form.cycle_forward(&options);
        assert_eq!(form.value(&options, EntryField::Subject), Some("Physics"));
        form.cycle_backward(&options);
        assert_eq!(form.value(&options, EntryField::Subject), Some("Chemistry"));
    }

    #[test]
    fn cycling_on_continue_does_nothing() {
        let options = options();
        let mut form = EntryForm::new();
        form.focus_prev();
        assert_eq!(form.focused_field(), EntryField::Continue);
        form.cycle_forward(&options);
        assert!(form.submit(&options).is_err());
    }

    #[test]
    fn preselect_requires_exact_match() {
        let options = options();
        let mut form = EntryForm::new();
        assert!(!form.preselect(&options, EntryField::Subject, "physics"));
        assert!(form.preselect(&options, EntryField::Subject, "Chemistry"));
        assert_eq!(form.value(&options, EntryField::Subject), Some("Chemistry"));
        assert!(!form.preselect(&options, EntryField::Continue, "Chemistry"));
    }

    #[test]
    fn error_message_matches_notice_text() {
        assert_eq!(
            EntryError::Unselected(EntryField::Goal).to_string(),
            "Please select all options before continuing."
        );
    }
}
