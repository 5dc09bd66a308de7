use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{TaskField, TaskForm};
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::fixed_popup_area;

pub fn render_task_form(f: &mut Frame, area: Rect, form: &TaskForm, palette: &Palette) {
    // Four 3-line fields plus borders
    let popup = fixed_popup_area(area, 60, 14);
    f.render_widget(Clear, popup);

    let title = if form.is_editing() { " Edit Task " } else { " Add New Task " };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_alignment(Alignment::Center)
        .style(palette.base());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let highlight_style = palette.highlight();
    let inactive_field_style = Style::default().fg(palette.fg).add_modifier(Modifier::DIM);

    let [title_area, when_area, desc_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(inner);
    let [date_area, time_area] =
        Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).areas(when_area);

    let placements = [
        (TaskField::Title, title_area),
        (TaskField::Date, date_area),
        (TaskField::Time, time_area),
        (TaskField::Description, desc_area),
    ];

    for (field, field_area) in placements {
        let input = form.input(field);
        let active = form.current_field == field;
        let style = if active { highlight_style } else { inactive_field_style };

        let paragraph = Paragraph::new(Span::styled(input.display(), style))
            .block(Block::default().borders(Borders::ALL).title(field.label()));
        f.render_widget(paragraph, field_area);

        if active {
            let x = field_area.x + 1 + (input.cursor() as u16).min(field_area.width.saturating_sub(3));
            f.set_cursor_position((x, field_area.y + 1));
        }
    }
}
