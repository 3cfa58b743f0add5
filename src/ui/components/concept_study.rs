use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::content::model::{AnswerFormat, ConceptDetail};
use crate::session::study::{
    AnswerLine, ConceptStudyState, StudyTab, answer_lines, framework_lines, visible_tabs,
};
use crate::ui::theme::Theme;

pub const DETAILS_NOT_AVAILABLE: &str = "Concept details not available.";
pub const NO_DIAGRAM: &str = "This concept does not require a diagram.";
pub const NO_NUMERICALS: &str = "This concept does not have numerical problems.";

pub struct ConceptStudy<'a> {
    detail: Option<&'a ConceptDetail>,
    state: &'a ConceptStudyState,
    theme: &'a Theme,
}

impl<'a> ConceptStudy<'a> {
    pub fn new(
        detail: Option<&'a ConceptDetail>,
        state: &'a ConceptStudyState,
        theme: &'a Theme,
    ) -> Self {
        Self {
            detail,
            state,
            theme,
        }
    }
}

impl Widget for ConceptStudy<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let Some(detail) = self.detail else {
            let block = Block::bordered()
                .border_style(Style::default().fg(colors.error()))
                .style(Style::default().bg(colors.bg()));
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    DETAILS_NOT_AVAILABLE,
                    Style::default().fg(colors.error()),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "[Esc] Back to Syllabus",
                    Style::default().fg(colors.accent()),
                )),
            ])
            .block(block)
            .alignment(Alignment::Center)
            .render(area, buf);
            return;
        };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let mut tab_spans: Vec<Span> = Vec::new();
        for (i, tab) in visible_tabs(detail).into_iter().enumerate() {
            let label = format!(" {} {} ", i + 1, tab.title());
            let style = if tab == self.state.active_tab {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            tab_spans.push(Span::styled(label, style));
            tab_spans.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(tab_spans))
            .block(
                Block::bordered()
                    .border_style(Style::default().fg(colors.border()))
                    .style(Style::default().bg(colors.bg())),
            )
            .render(layout[0], buf);

        let block = Block::bordered()
            .title(format!(" {} ", self.state.active_tab.title()))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        Paragraph::new(content_lines(detail, self.state, self.theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.state.scroll, 0))
            .render(layout[1], buf);
    }
}

/// Body of the active tab.
pub fn content_lines<'d>(
    detail: &'d ConceptDetail,
    state: &ConceptStudyState,
    theme: &Theme,
) -> Vec<Line<'d>> {
    let colors = &theme.colors;
    let title = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(colors.heading())
                .add_modifier(Modifier::BOLD),
        ))
    };
    let section = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ))
    };
    let list = |items: &'d [String], color: Color| -> Vec<Line<'d>> {
        items
            .iter()
            .map(|item| {
                Line::from(vec![
                    Span::styled("  \u{2022} ", Style::default().fg(colors.bullet())),
                    Span::styled(item.as_str(), Style::default().fg(color)),
                ])
            })
            .collect()
    };
    let muted = |text: &'static str| {
        Line::from(Span::styled(text, Style::default().fg(colors.text_muted())))
    };

    let mut lines: Vec<Line<'d>> = Vec::new();
    match state.active_tab {
        StudyTab::Understanding => {
            lines.push(title("Concept Understanding"));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                detail.understanding.as_str(),
                Style::default().fg(colors.fg()),
            )));
        }
        StudyTab::Diagram => match detail.diagram.as_ref().filter(|d| d.required) {
            None => lines.push(muted(NO_DIAGRAM)),
            Some(diagram) => {
                lines.push(title("Diagram Guidance"));
                lines.push(Line::from(""));
                lines.push(section("Diagram Description"));
                lines.push(Line::from(Span::styled(
                    diagram.description.as_str(),
                    Style::default().fg(colors.fg()),
                )));
                lines.push(Line::from(""));
                lines.push(section("Key Labels"));
                lines.extend(list(&diagram.labels, colors.fg()));
            }
        },
        StudyTab::ExamAnswers => {
            lines.push(title("Exam Answer Formats"));
            lines.push(Line::from(""));

            let mut buttons: Vec<Span> = Vec::new();
            for &format in AnswerFormat::all() {
                let key = match format {
                    AnswerFormat::Short => 's',
                    AnswerFormat::Medium => 'm',
                    AnswerFormat::Long => 'l',
                };
                let style = if state.answer_format == Some(format) {
                    Style::default()
                        .fg(colors.bg())
                        .bg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg()).bg(colors.accent_dim())
                };
                buttons.push(Span::styled(format!(" [{key}] {} ", format.label()), style));
                buttons.push(Span::raw(" "));
            }
            lines.push(Line::from(buttons));
            lines.push(Line::from(""));

            match state.answer_format {
                None => lines.push(muted("Choose a format to view the model answer.")),
                Some(format) => {
                    if let Some(answer) = detail.answer(format) {
                        lines.push(section_owned(answer.title.as_str(), theme));
                        lines.push(Line::from(""));
                        lines.extend(
                            answer_lines(&answer.content)
                                .into_iter()
                                .map(|l| styled_line(l, theme)),
                        );
                    }
                }
            }
        }
        StudyTab::Numericals => match detail.numericals.as_ref().filter(|n| n.has_numericals) {
            None => lines.push(muted(NO_NUMERICALS)),
            Some(numericals) => {
                lines.push(title("Numericals"));
                lines.push(Line::from(""));
                lines.push(section("Step-by-Step Framework"));
                lines.extend(
                    framework_lines(&numericals.framework)
                        .into_iter()
                        .map(|l| styled_line(l, theme)),
                );
                lines.push(Line::from(""));
                lines.push(section("Common Mistakes"));
                lines.extend(list(&numericals.common_mistakes, colors.fg()));
            }
        },
        StudyTab::ExaminerAlignment => {
            let alignment = &detail.examiner_alignment;
            lines.push(title("Examiner Alignment"));
            lines.push(Line::from(""));
            lines.push(section("Preferred Keywords"));
            let mut tags: Vec<Span<'d>> = Vec::new();
            for keyword in &alignment.keywords {
                tags.push(Span::styled(
                    format!(" {keyword} "),
                    Style::default().fg(colors.keyword_fg()).bg(colors.keyword_bg()),
                ));
                tags.push(Span::raw(" "));
            }
            lines.push(Line::from(tags));
            lines.push(Line::from(""));
            lines.push(section("Notation"));
            lines.push(Line::from(Span::styled(
                alignment.notation.as_str(),
                Style::default().fg(colors.fg()),
            )));
            lines.push(Line::from(""));
            lines.push(section("Risky Phrasing to Avoid"));
            lines.extend(list(&alignment.risky_phrasing, colors.warning()));
        }
        StudyTab::RevisionNotes => {
            let notes = &detail.revision_notes;
            lines.push(title("Revision Notes"));
            lines.push(Line::from(""));
            lines.push(section("Key Points"));
            lines.extend(list(&notes.bullets, colors.fg()));
            lines.push(Line::from(""));
            lines.push(section("Key Formulas"));
            lines.extend(list(&notes.formulas, colors.formula()));
            lines.push(Line::from(""));
            lines.push(section("Diagram Reminders"));
            lines.extend(list(&notes.diagram_reminders, colors.fg()));
        }
    }
    lines
}

fn section_owned<'d>(text: &'d str, theme: &Theme) -> Line<'d> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme.colors.accent())
            .add_modifier(Modifier::BOLD),
    ))
}

fn styled_line<'d>(line: AnswerLine<'d>, theme: &Theme) -> Line<'d> {
    let colors = &theme.colors;
    match line {
        AnswerLine::Heading(text) => Line::from(Span::styled(
            text,
            Style::default()
                .fg(colors.heading())
                .add_modifier(Modifier::BOLD),
        )),
        AnswerLine::Bullet(text) => {
            Line::from(Span::styled(text, Style::default().fg(colors.bullet())))
        }
        AnswerLine::Blank => Line::from(""),
        AnswerLine::Text(text) => {
            Line::from(Span::styled(text, Style::default().fg(colors.fg())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentRepository, QueryService};

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    fn detail(id: &str) -> ConceptDetail {
        ContentRepository::embedded().unwrap().concept_details(id).unwrap()
    }

    #[test]
    fn diagram_tab_forced_on_non_diagram_concept_shows_fixed_message() {
        let mut d = detail("concept1");
        if let Some(diagram) = d.diagram.as_mut() {
            diagram.required = false;
        }
        let state = ConceptStudyState {
            active_tab: StudyTab::Diagram,
            ..ConceptStudyState::new()
        };
        let theme = Theme::default();
        assert_eq!(text(&content_lines(&d, &state, &theme)), vec![NO_DIAGRAM]);
    }

    #[test]
    fn numericals_tab_without_numericals_shows_fixed_message() {
        let mut d = detail("concept2");
        d.numericals = None;
        let state = ConceptStudyState {
            active_tab: StudyTab::Numericals,
            ..ConceptStudyState::new()
        };
        let theme = Theme::default();
        assert_eq!(text(&content_lines(&d, &state, &theme)), vec![NO_NUMERICALS]);
    }

    #[test]
    fn exam_answer_shows_selected_format_only() {
        let d = detail("concept1");
        let theme = Theme::default();
        let mut state = ConceptStudyState {
            active_tab: StudyTab::ExamAnswers,
            ..ConceptStudyState::new()
        };

        let before = text(&content_lines(&d, &state, &theme));
        assert!(!before.iter().any(|l| l == "Short Answer Format"));

        state.select_format(AnswerFormat::Short);
        let after = text(&content_lines(&d, &state, &theme));
        let title_idx = after.iter().position(|l| l == "Short Answer Format").unwrap();
        assert_eq!(after[title_idx + 2], "Motion in One Dimension");
        assert!(after.iter().any(|l| l == "- Displacement: Δx = x₂ - x₁"));
    }

    #[test]
    fn revision_tab_lists_all_three_sections() {
        let d = detail("concept2");
        let theme = Theme::default();
        let state = ConceptStudyState {
            active_tab: StudyTab::RevisionNotes,
            ..ConceptStudyState::new()
        };
        let lines = text(&content_lines(&d, &state, &theme));
        for heading in ["Key Points", "Key Formulas", "Diagram Reminders"] {
            assert!(lines.iter().any(|l| l == heading), "missing {heading}");
        }
        assert!(lines.iter().any(|l| l.ends_with("R = (v₀²sin2θ)/g")));
    }
}
