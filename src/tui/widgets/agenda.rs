use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::agenda::{AgendaRow, count_label, format_time};
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::truncate;

/// Task list for the selected day. Own tasks show a checkbox; family
/// tasks show who they belong to and are drawn read-only.
pub fn render_agenda(
    f: &mut Frame,
    area: Rect,
    heading: &str,
    rows: &[AgendaRow],
    list_state: &mut ListState,
    palette: &Palette,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(palette.highlight_bg).bg(palette.bg)
    } else {
        palette.base()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", heading))
        .title_bottom(Line::from(format!(" {} ", count_label(rows.len()))).right_aligned())
        .border_style(border_style)
        .style(palette.base());

    if rows.is_empty() {
        let empty = Paragraph::new("No tasks scheduled for this day")
            .block(block)
            .style(palette.muted());
        f.render_widget(empty, area);
        return;
    }

    // 2 for borders, 2 for the highlight symbol
    let max_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let task = &row.task;
            let marker = match (row.is_own, task.completed) {
                (_, true) => "✓",
                (true, false) => "○",
                (false, false) => "·",
            };
            let accent = if row.is_own { palette.own_task } else { palette.family_task };
            let mut title_style = Style::default().fg(palette.fg);
            if task.completed {
                title_style = title_style.fg(palette.completed).add_modifier(Modifier::CROSSED_OUT);
            }

            let mut first = vec![
                Span::styled(format!("{} ", marker), Style::default().fg(accent)),
                Span::styled(format!("{:>8}  ", format_time(&task.time)), Style::default().fg(palette.muted)),
                Span::styled(truncate(&task.title, max_width.saturating_sub(12)), title_style),
            ];
            if !row.is_own {
                first.push(Span::styled(format!("  ({})", row.owner_name), Style::default().fg(accent)));
            }

            let mut lines = vec![Line::from(first)];
            if !task.description.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("            {}", truncate(&task.description, max_width.saturating_sub(12))),
                    Style::default().fg(palette.muted),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let highlight_style = if focused {
        palette.highlight()
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, list_state);
}
