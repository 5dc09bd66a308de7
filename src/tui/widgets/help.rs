use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::popup_area;
use crate::utils::format_key_binding_for_display as display;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config, palette: &Palette) {
    let popup_area = popup_area(area, 60, 70);

    // Clear the background first - this prevents content from showing through
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(palette.base()),
        )
        .style(palette.base())
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Calendar:\n");
    text.push_str("  ←/→ or h/l: Previous/next day\n");
    text.push_str("  ↑/↓ or k/j: Previous/next week\n");
    text.push_str("  Home/End: First/last day of the month\n");
    text.push_str(&format!("  {} / {}: Previous/next month\n", display(&kb.prev_month), display(&kb.next_month)));
    text.push_str(&format!("  {}: Jump to today\n", display(&kb.today)));
    text.push_str("  Tab: Switch between calendar and task list\n");
    text.push('\n');

    text.push_str("Tasks:\n");
    text.push_str(&format!("  {}: Add task on selected day\n", display(&kb.new_task)));
    text.push_str(&format!("  {}: Edit selected task\n", display(&kb.edit)));
    text.push_str(&format!("  {}: Delete selected task\n", display(&kb.delete)));
    text.push_str(&format!("  {}: Mark selected task complete\n", display(&kb.complete)));
    text.push_str("  Only your own tasks can be changed\n");
    text.push('\n');

    text.push_str("Task Form:\n");
    text.push_str("  Tab/Shift+Tab: Next/previous field\n");
    text.push_str(&format!("  Enter or {}: Save\n", display(&kb.save)));
    text.push_str("  Esc: Cancel\n");
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Toggle light/dark theme\n", display(&kb.toggle_theme)));
    text.push_str(&format!("  {}: Log out\n", display(&kb.logout)));
    text.push_str(&format!("  {}: Show/hide help\n", display(&kb.help)));
    text.push_str(&format!("  {}: Quit\n", display(&kb.quit)));

    text
}
