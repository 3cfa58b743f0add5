use std::collections::HashSet;

use crate::content::model::{Concept, Syllabus, Topic, Unit};
use crate::session::navigation::Intent;

/// One visible line of the syllabus tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeRow<'a> {
    Unit { unit: &'a Unit, expanded: bool },
    Topic { topic: &'a Topic, expanded: bool },
    Concept { concept: &'a Concept },
}

impl TreeRow<'_> {
    pub fn depth(&self) -> usize {
        match self {
            TreeRow::Unit { .. } => 0,
            TreeRow::Topic { .. } => 1,
            TreeRow::Concept { .. } => 2,
        }
    }
}

/// Expand/collapse, cursor and preview state of the syllabus explorer.
///
/// Units and topics track expansion in separate sets, so a unit and a topic
/// sharing an id do not interfere. Everything starts collapsed.
#[derive(Clone, Debug, Default)]
pub struct SyllabusTreeState {
    expanded_units: HashSet<String>,
    expanded_topics: HashSet<String>,
    pub cursor: usize,
    previewed: Option<Concept>,
}

impl SyllabusTreeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unit_expanded(&self, unit_id: &str) -> bool {
        self.expanded_units.contains(unit_id)
    }

    pub fn is_topic_expanded(&self, topic_id: &str) -> bool {
        self.expanded_topics.contains(topic_id)
    }

    pub fn toggle_unit(&mut self, unit_id: &str) {
        if !self.expanded_units.remove(unit_id) {
            self.expanded_units.insert(unit_id.to_string());
        }
    }

    pub fn toggle_topic(&mut self, topic_id: &str) {
        if !self.expanded_topics.remove(topic_id) {
            self.expanded_topics.insert(topic_id.to_string());
        }
    }

    pub fn previewed(&self) -> Option<&Concept> {
        self.previewed.as_ref()
    }

    /// Rows in display order; children of collapsed nodes are skipped.
    pub fn visible_rows<'a>(&self, syllabus: &'a Syllabus) -> Vec<TreeRow<'a>> {
        let mut rows = Vec::new();
        for unit in &syllabus.units {
            let unit_open = self.is_unit_expanded(&unit.id);
            rows.push(TreeRow::Unit {
                unit,
                expanded: unit_open,
            });
            if !unit_open {
                continue;
            }
            for topic in &unit.topics {
                let topic_open = self.is_topic_expanded(&topic.id);
                rows.push(TreeRow::Topic {
                    topic,
                    expanded: topic_open,
                });
                if topic_open {
                    rows.extend(topic.concepts.iter().map(|concept| TreeRow::Concept { concept }));
                }
            }
        }
        rows
    }

    pub fn move_down(&mut self, syllabus: &Syllabus) {
        let len = self.visible_rows(syllabus).len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Enter on the cursor row: toggles units and topics, selects concepts.
    pub fn activate(&mut self, syllabus: &Syllabus) -> Option<Intent> {
        let row = self.visible_rows(syllabus).get(self.cursor).copied()?;
        match row {
            TreeRow::Unit { unit, .. } => {
                self.toggle_unit(&unit.id);
                None
            }
            TreeRow::Topic { topic, .. } => {
                self.toggle_topic(&topic.id);
                None
            }
            TreeRow::Concept { concept } => Some(self.select_concept(concept)),
        }
    }

    /// Preview the concept and ask to study it, in one step.
    pub fn select_concept(&mut self, concept: &Concept) -> Intent {
        self.previewed = Some(concept.clone());
        Intent::ConceptSelected(concept.clone())
    }

    /// Re-issue the selection for the concept already in the preview panel.
    pub fn study_previewed(&self) -> Option<Intent> {
        self.previewed
            .as_ref()
            .map(|concept| Intent::ConceptSelected(concept.clone()))
    }

    pub fn expand(&mut self, syllabus: &Syllabus) {
        match self.visible_rows(syllabus).get(self.cursor).copied() {
            Some(TreeRow::Unit { unit, expanded: false }) => self.toggle_unit(&unit.id),
            Some(TreeRow::Topic { topic, expanded: false }) => self.toggle_topic(&topic.id),
            _ => {}
        }
    }

    /// Collapse the cursor node, or jump to its parent if there is nothing
    /// to collapse.
    pub fn collapse(&mut self, syllabus: &Syllabus) {
        let rows = self.visible_rows(syllabus);
        let Some(row) = rows.get(self.cursor).copied() else {
            return;
        };
        match row {
            TreeRow::Unit { unit, expanded: true } => self.toggle_unit(&unit.id),
            TreeRow::Topic { topic, expanded: true } => self.toggle_topic(&topic.id),
            _ => {
                let depth = row.depth();
                if let Some(parent) = rows[..self.cursor].iter().rposition(|r| r.depth() < depth) {
                    self.cursor = parent;
                }
            }
        }
        self.clamp_cursor(syllabus);
    }

    pub fn clamp_cursor(&mut self, syllabus: &Syllabus) {
        let len = self.visible_rows(syllabus).len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}
