use crate::content::model::{AnswerFormat, ConceptDetail};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudyTab {
    Understanding,
    Diagram,
    ExamAnswers,
    Numericals,
    ExaminerAlignment,
    RevisionNotes,
}

impl StudyTab {
    pub fn all() -> &'static [StudyTab] {
        &[
            StudyTab::Understanding,
            StudyTab::Diagram,
            StudyTab::ExamAnswers,
            StudyTab::Numericals,
            StudyTab::ExaminerAlignment,
            StudyTab::RevisionNotes,
        ]
    }

    pub fn title(self) -> &'static str {
        match self {
            StudyTab::Understanding => "Understanding",
            StudyTab::Diagram => "Diagram",
            StudyTab::ExamAnswers => "Exam Answers",
            StudyTab::Numericals => "Numericals",
            StudyTab::ExaminerAlignment => "Examiner Alignment",
            StudyTab::RevisionNotes => "Revision Notes",
        }
    }

    /// Diagram and Numericals only appear when the detail calls for them.
    pub fn is_visible(self, detail: &ConceptDetail) -> bool {
        match self {
            StudyTab::Diagram => detail.requires_diagram(),
            StudyTab::Numericals => detail.has_numericals(),
            _ => true,
        }
    }
}

pub fn visible_tabs(detail: &ConceptDetail) -> Vec<StudyTab> {
    StudyTab::all()
        .iter()
        .copied()
        .filter(|tab| tab.is_visible(detail))
        .collect()
}

/// Per-visit state of the concept study screen. A fresh value is used every
/// time a concept is opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConceptStudyState {
    pub active_tab: StudyTab,
    pub answer_format: Option<AnswerFormat>,
    pub scroll: u16,
}

impl Default for ConceptStudyState {
    fn default() -> Self {
        Self {
            active_tab: StudyTab::Understanding,
            answer_format: None,
            scroll: 0,
        }
    }
}

impl ConceptStudyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_tab(&mut self, detail: &ConceptDetail) {
        let tabs = visible_tabs(detail);
        let idx = tabs.iter().position(|t| *t == self.active_tab).unwrap_or(0);
        self.set_tab(tabs[(idx + 1) % tabs.len()]);
    }

    pub fn prev_tab(&mut self, detail: &ConceptDetail) {
        let tabs = visible_tabs(detail);
        let idx = tabs.iter().position(|t| *t == self.active_tab).unwrap_or(0);
        let prev = if idx == 0 { tabs.len() - 1 } else { idx - 1 };
        self.set_tab(tabs[prev]);
    }

    /// Jump to the n-th visible tab (zero based). Out of range is ignored.
    pub fn select_tab_index(&mut self, detail: &ConceptDetail, index: usize) {
        if let Some(tab) = visible_tabs(detail).get(index) {
            self.set_tab(*tab);
        }
    }

    pub fn set_tab(&mut self, tab: StudyTab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.scroll = 0;
        }
    }

    pub fn select_format(&mut self, format: AnswerFormat) {
        self.answer_format = Some(format);
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

/// Display class of one line of an exam answer or numerical framework.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerLine<'a> {
    Heading(&'a str),
    Bullet(&'a str),
    Blank,
    Text(&'a str),
}

const HEADING_MAX_CHARS: usize = 50;

/// Heading: non-blank, shorter than 50 characters once trimmed, and not
/// starting with a space or '-'. Checked before the bullet rule.
pub fn classify_answer_line(line: &str) -> AnswerLine<'_> {
    let trimmed = line.trim();
    if !trimmed.is_empty()
        && trimmed.chars().count() < HEADING_MAX_CHARS
        && !line.starts_with(' ')
        && !line.starts_with('-')
    {
        AnswerLine::Heading(line)
    } else if trimmed.starts_with('-') {
        AnswerLine::Bullet(line)
    } else if trimmed.is_empty() {
        AnswerLine::Blank
    } else {
        AnswerLine::Text(line)
    }
}

pub fn answer_lines(content: &str) -> Vec<AnswerLine<'_>> {
    content.split('\n').map(classify_answer_line).collect()
}

/// Line breaks only: blank lines stay blank, everything else is text.
pub fn framework_lines(content: &str) -> Vec<AnswerLine<'_>> {
    content
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                AnswerLine::Blank
            } else {
                AnswerLine::Text(line)
            }
        })
        .collect()
}
