use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub header_area: Rect,
    pub calendar_area: Rect,
    pub agenda_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions, outer border included.
    /// Width: 7 day columns of 8 plus the agenda's minimum and borders.
    /// Height: header, weekday row, six weeks of 2 lines, status and borders.
    pub const MIN_WIDTH: u16 = 80;
    pub const MIN_HEIGHT: u16 = 20;

    /// Share of the width given to the calendar
    const CALENDAR_PERCENT: u16 = 65;
    const AGENDA_MIN_WIDTH: u16 = 24;

    pub fn calculate(size: Rect) -> Self {
        let width = size.width.max(Self::MIN_WIDTH);
        let height = size.height.max(Self::MIN_HEIGHT);
        let size = Rect::new(size.x, size.y, width, height);

        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(1),    // Calendar + agenda
                Constraint::Length(1), // Status
            ])
            .split(inner_area);

        let calendar_width = ((inner_area.width * Self::CALENDAR_PERCENT) / 100)
            .min(inner_area.width.saturating_sub(Self::AGENDA_MIN_WIDTH));

        let horizontal = RatLayout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(calendar_width), Constraint::Min(1)])
            .split(vertical[1]);

        Self {
            inner_area,
            header_area: vertical[0],
            calendar_area: horizontal[0],
            agenda_area: horizontal[1],
            status_area: vertical[2],
        }
    }
}
