use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥90 cols: tree and detail panel side by side
    Narrow, // <90 cols: tree stacked above the detail panel
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 90 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }
}

/// Header / body / footer split shared by every screen.
pub struct ScreenLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, footer_lines: u16) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(footer_lines),
            ])
            .split(area);

        Self {
            header: vertical[0],
            body: vertical[1],
            footer: vertical[2],
        }
    }
}

/// Body split of the syllabus explorer.
pub struct ExplorerLayout {
    pub tree: Rect,
    pub panel: Rect,
    pub tier: LayoutTier,
}

impl ExplorerLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);
        let direction = match tier {
            LayoutTier::Wide => Direction::Horizontal,
            LayoutTier::Narrow => Direction::Vertical,
        };
        let parts = Layout::default()
            .direction(direction)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        Self {
            tree: parts[0],
            panel: parts[1],
            tier,
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 7;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}
