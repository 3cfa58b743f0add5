use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use eras::app::{App, Preselection};
use eras::config::Config;
use eras::content::ContentRepository;
use eras::content::model::{AnswerFormat, Concept, ConceptDetail, StudyConfiguration};
use eras::event::{AppEvent, EventHandler};
use eras::logging;
use eras::session::entry::EntryField;
use eras::session::navigation::{Screen, ScreenView};
use eras::session::study::StudyTab;
use eras::ui::components::concept_study::ConceptStudy;
use eras::ui::components::entry_screen::EntryScreen;
use eras::ui::components::progress_bar::ProgressBar;
use eras::ui::components::syllabus_explorer::SyllabusExplorer;
use eras::ui::layout::{ScreenLayout, pack_hint_lines};
use eras::ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "eras",
    version,
    about = "Terminal exam-prep explorer: syllabus tree and concept study guides"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Directory holding options.json, syllabi/ and concepts/")]
    content_dir: Option<PathBuf>,

    #[arg(long, help = "Pre-select the subject")]
    subject: Option<String>,

    #[arg(long, help = "Pre-select the course")]
    course: Option<String>,

    #[arg(long, help = "Pre-select the textbook")]
    textbook: Option<String>,

    #[arg(long, help = "Pre-select the preparation goal")]
    goal: Option<String>,

    #[arg(long, help = "Validate the content pack, print a summary and exit")]
    check_content: bool,

    #[arg(long, help = "List the bundled themes and exit")]
    list_themes: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.list_themes {
        for name in Theme::available_themes() {
            println!("{name}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = Config::load()?;
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    if let Some(dir) = &cli.content_dir {
        config.content_dir = Some(dir.to_string_lossy().to_string());
    }

    // Raw mode is not on yet, so stderr is still safe here
    if let Err(err) = logging::init(&config) {
        eprintln!("logging disabled: {err:#}");
    }

    let loaded = match config.content_dir() {
        Some(dir) => ContentRepository::from_dir(&dir),
        None => ContentRepository::embedded(),
    };

    if cli.check_content {
        return Ok(match loaded {
            Ok(repo) => {
                print_summary(&repo);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("content error: {err}");
                ExitCode::FAILURE
            }
        });
    }
    let repo = loaded?;

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        log::warn!("unknown theme '{}', using default", config.theme);
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));

    let mut app = App::new(repo, config, theme);
    app.preselect(&Preselection {
        subject: cli.subject,
        course: cli.course,
        textbook: cli.textbook,
        goal: cli.goal,
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new();
    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("terminal loop failed: {err:?}");
        eprintln!("Error: {err:?}");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(repo: &ContentRepository) {
    println!("{} syllabi, {} concept details", repo.syllabus_count(), repo.detail_count());
    for key in repo.syllabus_keys() {
        println!("  {key}");
    }
    let missing = repo.concepts_without_details();
    if !missing.is_empty() {
        println!("concepts without details: {}", missing.join(", "));
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.nav.screen() {
        Screen::Entry => handle_entry_key(app, key),
        Screen::Syllabus => handle_syllabus_key(app, key),
        Screen::Concept => handle_concept_key(app, key),
    }
}

fn handle_entry_key(app: &mut App, key: KeyEvent) {
    // The notice is modal
    if app.entry.notice.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.entry.dismiss_notice();
        }
        return;
    }

    let Some(options) = app.nav.options() else {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            app.should_quit = true;
        }
        return;
    };

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => app.entry.focus_prev(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => app.entry.focus_next(),
        KeyCode::Right | KeyCode::Char('l') => app.entry.cycle_forward(options),
        KeyCode::Left | KeyCode::Char('h') => app.entry.cycle_backward(options),
        KeyCode::Enter => {
            if app.entry.focused_field() == EntryField::Continue {
                app.submit_entry();
            } else {
                app.entry.focus_next();
            }
        }
        _ => {}
    }
}

fn handle_syllabus_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.activate_tree_row();
            return;
        }
        KeyCode::Char('s') => {
            app.study_previewed();
            return;
        }
        _ => {}
    }

    let Some(syllabus) = app.nav.syllabus() else {
        return;
    };
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.tree.move_down(syllabus),
        KeyCode::Up | KeyCode::Char('k') => app.tree.move_up(),
        KeyCode::Right | KeyCode::Char('l') => app.tree.expand(syllabus),
        KeyCode::Left | KeyCode::Char('h') => app.tree.collapse(syllabus),
        _ => {}
    }
}

fn handle_concept_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => {
            app.back();
            return;
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('c') => {
            app.mark_complete();
            return;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.study.scroll_down();
            return;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.study.scroll_up();
            return;
        }
        _ => {}
    }

    let Some(detail) = app.nav.concept_detail() else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Right => app.study.next_tab(detail),
        KeyCode::BackTab | KeyCode::Left => app.study.prev_tab(detail),
        KeyCode::Char(ch @ '1'..='9') => {
            let index = ch as usize - '1' as usize;
            app.study.select_tab_index(detail, index);
        }
        KeyCode::Char(ch) if app.study.active_tab == StudyTab::ExamAnswers => {
            if let Some(format) = AnswerFormat::from_key(ch) {
                app.study.select_format(format);
            }
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.nav.view() {
        ScreenView::Loading => {}
        ScreenView::Entry { options } => {
            let hints = [
                "[\u{2191}\u{2193}] Field",
                "[\u{2190}\u{2192}] Change",
                "[Enter] Continue",
                "[q] Quit",
            ];
            let (layout, footer) = screen_layout(area, &hints);
            render_header(frame, app, layout.header, "Study Setup", None);
            frame.render_widget(EntryScreen::new(options, &app.entry, app.theme), layout.body);
            render_footer(frame, app, layout.footer, footer);
        }
        ScreenView::Syllabus {
            config,
            syllabus,
            completed,
        } => {
            let hints = [
                "[\u{2191}\u{2193}] Move",
                "[Enter] Open",
                "[\u{2190}\u{2192}] Fold",
                "[s] Study",
                "[q] Quit",
            ];
            let (layout, footer) = screen_layout(area, &hints);
            render_syllabus_header(frame, app, layout.header, config);
            frame.render_widget(
                SyllabusExplorer::new(syllabus, &app.tree, completed, app.theme),
                layout.body,
            );
            render_footer(frame, app, layout.footer, footer);
        }
        ScreenView::Concept {
            concept,
            detail,
            completed,
        } => {
            let hints = concept_hints(detail, completed, app.study.active_tab);
            let (layout, footer) = screen_layout(area, &hints);
            render_concept_header(frame, app, layout.header, concept, completed);
            frame.render_widget(ConceptStudy::new(detail, &app.study, app.theme), layout.body);
            render_footer(frame, app, layout.footer, footer);
        }
    }
}

fn screen_layout(area: Rect, hints: &[&str]) -> (ScreenLayout, Vec<String>) {
    let footer = pack_hint_lines(hints, area.width as usize);
    let layout = ScreenLayout::new(area, footer.len().max(1) as u16);
    (layout, footer)
}

fn concept_hints(
    detail: Option<&ConceptDetail>,
    completed: bool,
    tab: StudyTab,
) -> Vec<&'static str> {
    let mut hints = vec!["[Esc] Back"];
    if detail.is_some() {
        hints.push("[Tab] Next Tab");
        hints.push("[1-6] Jump");
        if tab == StudyTab::ExamAnswers {
            hints.push("[s/m/l] Format");
        }
        hints.push("[\u{2191}\u{2193}] Scroll");
        if !completed {
            hints.push("[c] Mark as Complete");
        }
    }
    hints.push("[q] Quit");
    hints
}

fn render_header(
    frame: &mut ratatui::Frame,
    app: &App,
    area: Rect,
    title: &str,
    info: Option<String>,
) {
    let colors = &app.theme.colors;
    let mut spans = vec![
        Span::styled(
            " ERAS+ ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {title}"),
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        ),
    ];
    if let Some(info) = info {
        spans.push(Span::styled(
            format!("  {info}"),
            Style::default().fg(colors.text_muted()).bg(colors.header_bg()),
        ));
    }
    let header = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_syllabus_header(
    frame: &mut ratatui::Frame,
    app: &App,
    area: Rect,
    config: &StudyConfiguration,
) {
    let Some((done, total)) = app.nav.completion_progress() else {
        render_header(frame, app, area, "Syllabus Explorer", None);
        return;
    };
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(area);
    let info = format!("{} \u{2022} {}", config.subject, config.course);
    render_header(frame, app, parts[0], "Syllabus Explorer", Some(info));
    frame.render_widget(ProgressBar::new("Progress", done, total, app.theme), parts[1]);
}

fn render_concept_header(
    frame: &mut ratatui::Frame,
    app: &App,
    area: Rect,
    concept: &Concept,
    completed: bool,
) {
    let info = if completed {
        "\u{2713} Completed".to_string()
    } else {
        concept.description.clone()
    };
    render_header(frame, app, area, &concept.name, Some(info));
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect, lines: Vec<String>) {
    let colors = &app.theme.colors;
    let footer = Paragraph::new(
        lines
            .into_iter()
            .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.text_muted()))))
            .collect::<Vec<_>>(),
    );
    frame.render_widget(footer, area);
}
