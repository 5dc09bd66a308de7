use ratatui::layout::{Constraint, Flex, Layout, Rect};

pub mod agenda;
pub mod calendar;
pub mod celebration;
pub mod color;
pub mod confirm_delete;
pub mod header;
pub mod help;
pub mod input;
pub mod login;
pub mod status_bar;
pub mod task_form;

/// Centered rect taking the given percentage of `area`.
/// Based on ratatui popup example: https://ratatui.rs/examples/apps/popup/
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Centered rect of a fixed size, shrunk to fit `area`
pub fn fixed_popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width.min(area.width))]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Cut `text` to `max_width` characters, ending in "..." when shortened
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return text.chars().take(max_width).collect();
    }
    text.chars().take(max_width - 3).collect::<String>() + "..."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("Clean room", 20), "Clean room");
        assert_eq!(truncate("Clean room", 8), "Clean...");
        assert_eq!(truncate("Clean room", 2), "Cl");
    }

    #[test]
    fn fixed_popup_fits_inside_area() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = fixed_popup_area(area, 40, 6);
        assert_eq!(popup.width, 20);
        assert_eq!(popup.height, 6);
        assert_eq!(popup.y, 2);
    }
}
