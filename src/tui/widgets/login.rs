use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{AuthView, LoginField, LoginForm};
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::fixed_popup_area;
use crate::tui::widgets::input::Input;

const DEMO_HINT: &str = "Demo: parent@example.com / password";

pub fn render_login(f: &mut Frame, area: Rect, form: &LoginForm, palette: &Palette) {
    f.render_widget(Block::default().style(palette.base()), area);

    let fields = form.fields();
    // title + subtitle + blank, 3 per field, blank + hint + links, borders
    let height = 3 + fields.len() as u16 * 3 + 3 + 2;
    let popup = fixed_popup_area(area, 50, height);
    f.render_widget(Clear, popup);

    let (title, subtitle) = match form.view {
        AuthView::Login => ("Family Dashboard", "Sign in to your account"),
        AuthView::Register => ("Create Account", "Join your family dashboard"),
        AuthView::ForgotPassword => ("Reset Password", "We'll send you a reset link"),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .style(palette.base());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Min(1));
    let areas = Layout::vertical(constraints).split(inner);

    let subtitle_line = Paragraph::new(Line::from(Span::styled(subtitle, palette.muted())))
        .alignment(Alignment::Center);
    f.render_widget(subtitle_line, areas[0]);

    for (i, field) in fields.iter().enumerate() {
        let (label, input) = match field {
            LoginField::Name => ("Full Name", &form.name),
            LoginField::Email => ("Email", &form.email),
            LoginField::Password => ("Password", &form.password),
        };
        let active = *field == form.current_field;
        render_field(f, areas[i + 1], label, input, active, palette);
    }

    let links = match form.view {
        AuthView::Login => "Enter: Sign in • F2: Sign up • F3: Forgot password",
        AuthView::Register => "Enter: Sign up • Esc: Back to sign in",
        AuthView::ForgotPassword => "Enter: Send reset link • Esc: Back to sign in",
    };
    let mut footer = vec![Line::from(Span::styled(links, palette.muted()))];
    if form.view == AuthView::Login {
        footer.insert(0, Line::from(Span::styled(DEMO_HINT, Style::default().fg(palette.today))));
    }
    let footer_area = areas[areas.len() - 1];
    f.render_widget(
        Paragraph::new(footer).alignment(Alignment::Center).wrap(ratatui::widgets::Wrap { trim: true }),
        footer_area,
    );
}

fn render_field(f: &mut Frame, area: Rect, label: &str, input: &Input, active: bool, palette: &Palette) {
    let style = if active {
        palette.highlight()
    } else {
        Style::default().fg(palette.fg).add_modifier(Modifier::DIM)
    };
    let paragraph = Paragraph::new(Span::styled(input.display(), style))
        .block(Block::default().borders(Borders::ALL).title(label));
    f.render_widget(paragraph, area);

    if active {
        let x = area.x + 1 + (input.cursor() as u16).min(area.width.saturating_sub(3));
        f.set_cursor_position((x, area.y + 1));
    }
}
