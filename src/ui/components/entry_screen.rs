use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::content::model::ConfigurationOptions;
use crate::session::entry::{EntryField, EntryForm};
use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;

pub struct EntryScreen<'a> {
    options: &'a ConfigurationOptions,
    form: &'a EntryForm,
    theme: &'a Theme,
}

impl<'a> EntryScreen<'a> {
    pub fn new(options: &'a ConfigurationOptions, form: &'a EntryForm, theme: &'a Theme) -> Self {
        Self {
            options,
            form,
            theme,
        }
    }
}

impl Widget for EntryScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0)])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "ERAS+",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Exam Representation Alignment System",
                Style::default().fg(colors.fg()),
            )),
            Line::from(Span::styled(
                "Configure your study session to get started",
                Style::default().fg(colors.text_muted()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let field_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                EntryField::all()
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[1]);

        let focused = self.form.focused_field();
        for (i, &field) in EntryField::all().iter().enumerate() {
            if i >= field_layout.len() {
                break;
            }
            let is_focused = field == focused;
            let indicator = if is_focused { ">" } else { " " };
            let label_style = Style::default()
                .fg(if is_focused { colors.accent() } else { colors.fg() })
                .add_modifier(if is_focused { Modifier::BOLD } else { Modifier::empty() });

            let lines = if field == EntryField::Continue {
                vec![Line::from(Span::styled(
                    format!(" {indicator} [ {} ]", field.label()),
                    label_style.add_modifier(if is_focused {
                        Modifier::REVERSED
                    } else {
                        Modifier::empty()
                    }),
                ))]
            } else {
                let (value, value_style) = match self.form.value(self.options, field) {
                    Some(v) => (v, Style::default().fg(if is_focused {
                        colors.formula()
                    } else {
                        colors.fg()
                    })),
                    None => (field.placeholder(), Style::default().fg(colors.text_muted())),
                };
                vec![
                    Line::from(Span::styled(format!(" {indicator} {}", field.label()), label_style)),
                    Line::from(vec![
                        Span::styled("     < ", Style::default().fg(colors.text_muted())),
                        Span::styled(value, value_style),
                        Span::styled(" >", Style::default().fg(colors.text_muted())),
                    ]),
                ]
            };
            Paragraph::new(lines).render(field_layout[i], buf);
        }

        if let Some(ref notice) = self.form.notice {
            render_notice(notice, self.theme, area, buf);
        }
    }
}

/// Modal message; the entry screen ignores other input until dismissed.
fn render_notice(message: &str, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let colors = &theme.colors;
    let popup = centered_rect(40, 20, area);
    Clear.render(popup, buf);

    let block = Block::bordered()
        .title(" Notice ")
        .border_style(Style::default().fg(colors.warning()))
        .style(Style::default().bg(colors.bg()));
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(colors.fg()))),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter/Esc] OK",
            Style::default().fg(colors.text_muted()),
        )),
    ];
    Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(popup, buf);
}
