use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::calendar::{Bucket, DayCell, GridCell, MonthGrid, WEEKDAY_LABELS};
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::truncate;

pub fn render_calendar(f: &mut Frame, area: Rect, grid: &MonthGrid, palette: &Palette, focused: bool) {
    let border_style = if focused {
        Style::default().fg(palette.highlight_bg).bg(palette.bg)
    } else {
        palette.base()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", grid.title))
        .title_alignment(ratatui::layout::Alignment::Center)
        .border_style(border_style)
        .style(palette.base());
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 7 || inner.height < 2 {
        return;
    }

    let weeks: Vec<&[GridCell]> = grid.weeks().collect();
    let mut row_constraints = vec![Constraint::Length(1)];
    row_constraints.extend(weeks.iter().map(|_| Constraint::Fill(1)));
    let rows = Layout::vertical(row_constraints).split(inner);
    let columns = Layout::horizontal([Constraint::Fill(1); 7]);

    let header_cells = columns.split(rows[0]);
    for (label, cell_area) in WEEKDAY_LABELS.iter().zip(header_cells.iter()) {
        let header = Paragraph::new(*label)
            .style(palette.muted().add_modifier(Modifier::BOLD))
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(header, *cell_area);
    }

    for (week, row_area) in weeks.iter().zip(rows.iter().skip(1)) {
        let cell_areas = columns.split(*row_area);
        for (cell, cell_area) in week.iter().zip(cell_areas.iter()) {
            if let GridCell::Day(day) = cell {
                render_day(f, *cell_area, day, palette);
            }
        }
    }
}

fn render_day(f: &mut Frame, area: Rect, day: &DayCell, palette: &Palette) {
    let width = area.width.saturating_sub(1) as usize;

    let number_style = if day.selected {
        palette.highlight()
    } else if day.today {
        Style::default().fg(palette.today).bg(palette.bg).add_modifier(Modifier::BOLD)
    } else {
        palette.base()
    };
    let mut lines = vec![Line::from(Span::styled(format!("{:>2}", day.day), number_style))];

    // Everything below the day number
    let room = (area.height as usize).saturating_sub(1);
    let (labels, more) = day.fit(room);
    for (bucket, label) in labels {
        let color = if label.completed {
            palette.completed
        } else {
            match bucket {
                Bucket::Own => palette.own_task,
                Bucket::Family => palette.family_task,
            }
        };
        let mut style = Style::default().fg(color).bg(palette.bg);
        if label.completed {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        lines.push(Line::from(Span::styled(truncate(&label.title, width), style)));
    }

    if more > 0 {
        lines.push(Line::from(Span::styled(overflow_text(more, width), palette.muted())));
    }

    let style = if day.selected {
        Style::default().bg(palette.highlight_bg)
    } else {
        palette.base()
    };
    f.render_widget(Paragraph::new(lines).style(style), area);
}

/// "+N more", or just "+N" when the cell is too narrow for the long form
fn overflow_text(more: usize, width: usize) -> String {
    let long = format!("+{more} more");
    if long.chars().count() <= width {
        long
    } else {
        format!("+{more}")
    }
}
