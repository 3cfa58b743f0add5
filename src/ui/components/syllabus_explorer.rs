use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::content::model::{Concept, Syllabus};
use crate::session::completion::CompletionSet;
use crate::session::tree::{SyllabusTreeState, TreeRow};
use crate::ui::layout::ExplorerLayout;
use crate::ui::theme::Theme;

pub const NOT_AVAILABLE: &str = "Syllabus data not available for the selected configuration.";

pub struct SyllabusExplorer<'a> {
    syllabus: Option<&'a Syllabus>,
    tree: &'a SyllabusTreeState,
    completed: &'a CompletionSet,
    theme: &'a Theme,
}

impl<'a> SyllabusExplorer<'a> {
    pub fn new(
        syllabus: Option<&'a Syllabus>,
        tree: &'a SyllabusTreeState,
        completed: &'a CompletionSet,
        theme: &'a Theme,
    ) -> Self {
        Self {
            syllabus,
            tree,
            completed,
            theme,
        }
    }
}

impl Widget for SyllabusExplorer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let Some(syllabus) = self.syllabus else {
            let block = Block::bordered()
                .border_style(Style::default().fg(colors.error()))
                .style(Style::default().bg(colors.bg()));
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(NOT_AVAILABLE, Style::default().fg(colors.error()))),
            ])
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
            return;
        };

        let layout = ExplorerLayout::new(area);
        self.render_tree(syllabus, layout.tree, buf);
        self.render_preview(layout.panel, buf);
    }
}

impl SyllabusExplorer<'_> {
    fn render_tree(&self, syllabus: &Syllabus, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Syllabus ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = self.tree.visible_rows(syllabus);
        let previewed_id = self.tree.previewed().map(|c| c.id.as_str());

        let mut lines: Vec<Line> = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let is_cursor = i == self.tree.cursor;
            let cursor = if is_cursor { "> " } else { "  " };

            let mut line = match row {
                TreeRow::Unit { unit, expanded } => Line::from(vec![
                    Span::raw(cursor),
                    Span::styled(
                        format!("{} {}", fold_icon(*expanded), unit.name),
                        Style::default()
                            .fg(colors.heading())
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                TreeRow::Topic { topic, expanded } => Line::from(vec![
                    Span::raw(cursor),
                    Span::raw("  "),
                    Span::styled(
                        format!("{} {}", fold_icon(*expanded), topic.name),
                        Style::default().fg(colors.accent()),
                    ),
                ]),
                TreeRow::Concept { concept } => {
                    let done = self.completed.contains(&concept.id);
                    let is_previewed = previewed_id == Some(concept.id.as_str());
                    let mut style = Style::default().fg(if done { colors.success() } else { colors.fg() });
                    if is_previewed {
                        style = style.add_modifier(Modifier::UNDERLINED);
                    }
                    let mut spans = vec![
                        Span::raw(cursor),
                        Span::raw("    "),
                        Span::styled(format!("\u{2022} {}", concept.name), style),
                    ];
                    if done {
                        spans.push(Span::styled(" \u{2713}", Style::default().fg(colors.success())));
                    }
                    Line::from(spans)
                }
            };
            if is_cursor {
                line = line.style(Style::default().bg(colors.accent_dim()));
            }
            lines.push(line);
        }

        // Keep the cursor row on screen
        let height = inner.height as usize;
        let offset = if height > 0 && self.tree.cursor >= height {
            self.tree.cursor + 1 - height
        } else {
            0
        };
        Paragraph::new(lines)
            .scroll((offset as u16, 0))
            .render(inner, buf);
    }

    fn render_preview(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Concept ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        let lines = match self.tree.previewed() {
            Some(concept) => self.preview_lines(concept),
            None => vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Select a concept from the syllabus to view details",
                    Style::default().fg(colors.text_muted()),
                )),
            ],
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }

    fn preview_lines<'c>(&self, concept: &'c Concept) -> Vec<Line<'c>> {
        let colors = &self.theme.colors;
        let badge = |active: bool, on: &'static str, off: &'static str| {
            if active {
                Span::styled(
                    format!(" {on} "),
                    Style::default().fg(colors.bg()).bg(colors.accent()),
                )
            } else {
                Span::styled(
                    format!(" {off} "),
                    Style::default().fg(colors.text_muted()).bg(colors.accent_dim()),
                )
            }
        };

        let mut lines = vec![
            Line::from(Span::styled(
                concept.name.as_str(),
                Style::default()
                    .fg(colors.heading())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                concept.description.as_str(),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
            Line::from(vec![
                badge(concept.requires_diagram, "Has Diagram", "No Diagram"),
                Span::raw(" "),
                badge(concept.has_numericals, "Has Numericals", "No Numericals"),
            ]),
            Line::from(""),
        ];
        if self.completed.contains(&concept.id) {
            lines.push(Line::from(Span::styled(
                "\u{2713} Completed",
                Style::default().fg(colors.success()),
            )));
        }
        lines.push(Line::from(Span::styled(
            "[s] Study This Concept",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )));
        lines
    }
}

fn fold_icon(expanded: bool) -> &'static str {
    if expanded { "\u{25bc}" } else { "\u{25b6}" }
}
