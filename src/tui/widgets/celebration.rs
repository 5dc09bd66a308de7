use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::widgets::color::Palette;
use crate::tui::widgets::fixed_popup_area;

const CONFETTI: &str = "*  .  +  *  .  +  *";

/// Overlay shown for a few seconds after a task is completed
pub fn render_celebration(f: &mut Frame, area: Rect, palette: &Palette) {
    let popup = fixed_popup_area(area, 34, 7);
    f.render_widget(Clear, popup);

    let accent = Style::default().fg(palette.completed).bg(palette.bg);
    let lines = vec![
        Line::from(Span::styled(CONFETTI, accent)),
        Line::from(Span::styled("Great job!", accent.add_modifier(Modifier::BOLD))),
        Line::from(Span::styled("Task completed", palette.base())),
        Line::from(Span::styled(CONFETTI, accent)),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(accent).style(palette.base()))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, popup);
}
