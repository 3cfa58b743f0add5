use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// --- Configuration ---

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationOptions {
    pub subjects: Vec<String>,
    pub courses: Vec<String>,
    pub textbooks: Vec<String>,
    pub preparation_goals: Vec<String>,
}

/// The four selections made on the entry screen.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StudyConfiguration {
    pub subject: String,
    pub course: String,
    pub textbook: String,
    pub goal: String,
}

impl StudyConfiguration {
    pub fn new(subject: &str, course: &str, textbook: &str, goal: &str) -> Self {
        Self {
            subject: subject.to_string(),
            course: course.to_string(),
            textbook: textbook.to_string(),
            goal: goal.to_string(),
        }
    }

    /// Lookup key for the syllabus table. `None` when any of the three
    /// scoping fields is empty.
    pub fn syllabus_key(&self) -> Option<SyllabusKey> {
        if self.subject.is_empty() || self.course.is_empty() || self.textbook.is_empty() {
            return None;
        }
        Some(SyllabusKey::new(&self.subject, &self.course, &self.textbook))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SyllabusKey {
    pub subject: String,
    pub course: String,
    pub textbook: String,
}

impl SyllabusKey {
    pub fn new(subject: &str, course: &str, textbook: &str) -> Self {
        Self {
            subject: subject.to_string(),
            course: course.to_string(),
            textbook: textbook.to_string(),
        }
    }
}

impl fmt::Display for SyllabusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.subject, self.course, self.textbook)
    }
}

// --- Syllabus tree ---

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllabus {
    pub units: Vec<Unit>,
}

impl Syllabus {
    /// Concepts in unit, then topic, then concept declaration order.
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.units
            .iter()
            .flat_map(|unit| unit.topics.iter())
            .flat_map(|topic| topic.concepts.iter())
    }

    pub fn find_concept(&self, concept_id: &str) -> Option<&Concept> {
        self.concepts().find(|c| c.id == concept_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub topics: Vec<Topic>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub concepts: Vec<Concept>,
}

/// Summary form of a concept as it appears in the syllabus tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub requires_diagram: bool,
    #[serde(default)]
    pub has_numericals: bool,
}

// --- Concept detail ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerFormat {
    Short,
    Medium,
    Long,
}

impl AnswerFormat {
    pub fn all() -> &'static [AnswerFormat] {
        &[AnswerFormat::Short, AnswerFormat::Medium, AnswerFormat::Long]
    }

    pub fn label(self) -> &'static str {
        match self {
            AnswerFormat::Short => "Short Answer",
            AnswerFormat::Medium => "Medium Answer",
            AnswerFormat::Long => "Long Answer",
        }
    }

    pub fn from_key(ch: char) -> Option<Self> {
        match ch {
            's' => Some(AnswerFormat::Short),
            'm' => Some(AnswerFormat::Medium),
            'l' => Some(AnswerFormat::Long),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptDetail {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub understanding: String,
    #[serde(default)]
    pub diagram: Option<DiagramGuide>,
    #[serde(default)]
    pub exam_answers: BTreeMap<AnswerFormat, AnswerVariant>,
    #[serde(default)]
    pub numericals: Option<NumericalGuide>,
    pub examiner_alignment: ExaminerAlignment,
    pub revision_notes: RevisionNotes,
}

impl ConceptDetail {
    pub fn requires_diagram(&self) -> bool {
        self.diagram.as_ref().is_some_and(|d| d.required)
    }

    pub fn has_numericals(&self) -> bool {
        self.numericals.as_ref().is_some_and(|n| n.has_numericals)
    }

    pub fn answer(&self, format: AnswerFormat) -> Option<&AnswerVariant> {
        self.exam_answers.get(&format)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramGuide {
    pub required: bool,
    pub description: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerVariant {
    pub title: String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericalGuide {
    pub has_numericals: bool,
    pub framework: String,
    #[serde(default)]
    pub common_mistakes: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaminerAlignment {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub notation: String,
    #[serde(default)]
    pub risky_phrasing: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionNotes {
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub formulas: Vec<String>,
    #[serde(default)]
    pub diagram_reminders: Vec<String>,
}
