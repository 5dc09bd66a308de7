use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::models::User;
use crate::roster::Roster;
use crate::tui::widgets::color::Palette;

/// One-line header: app name and greeting on the left, family members and
/// the theme indicator on the right.
pub fn render_header(f: &mut Frame, area: Rect, user: &User, roster: &Roster, palette: &Palette, is_dark: bool) {
    let [left, right] = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);

    let greeting = Line::from(vec![
        Span::styled(" Family Task Dashboard ", palette.highlight()),
        Span::styled(format!("  Welcome back, {}!", user.name), palette.base()),
    ]);
    f.render_widget(Paragraph::new(greeting).style(palette.base()), left);

    let mut spans: Vec<Span> = Vec::new();
    for member in roster.others(&user.id) {
        spans.push(Span::styled(
            format!("[{}] ", member.initial()),
            Style::default().fg(palette.family_task).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!("{}  ", member.name), palette.muted()));
    }
    spans.push(Span::styled(if is_dark { "☾ dark " } else { "☀ light " }, palette.base()));

    let members = Paragraph::new(Line::from(spans))
        .style(palette.base())
        .alignment(ratatui::layout::Alignment::Right);
    f.render_widget(members, right);
}
