use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::widgets::{Block, Borders};

use crate::tui::app::{Focus, Mode, Screen};
use crate::tui::widgets::{
    agenda::render_agenda,
    calendar::render_calendar,
    celebration::render_celebration,
    color::Palette,
    confirm_delete::render_confirm_delete,
    header::render_header,
    help::render_help,
    login::render_login,
    status_bar::render_status_bar,
    task_form::render_task_form,
};
use crate::tui::{App, Layout};
use crate::utils::format_key_binding_for_display as display;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let palette = Palette::for_theme(app.ui.is_dark);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("famboard")
        .title_alignment(Alignment::Center)
        .style(palette.base());
    f.render_widget(outer_block, f.area());

    let user = match (app.ui.screen, app.current_user().cloned()) {
        (Screen::Dashboard, Some(user)) => user,
        _ => {
            render_login(f, layout.inner_area, &app.login, &palette);
            render_status_bar(f, layout.status_area, app.status.message.as_deref(), &login_hints(), &palette);
            return;
        }
    };

    render_header(f, layout.header_area, &user, &app.roster, &palette, app.ui.is_dark);

    let grid = app.calendar_grid();
    render_calendar(f, layout.calendar_area, &grid, &palette, app.ui.focus == Focus::Calendar);

    let rows = app.agenda();
    let heading = app.ui.selected_date.format("%A, %B %-d").to_string();
    let agenda_focused = app.ui.focus == Focus::Agenda;
    render_agenda(f, layout.agenda_area, &heading, &rows, &mut app.ui.agenda_state, &palette, agenda_focused);

    // Overlays go on top of the dashboard
    match app.ui.mode {
        Mode::TaskForm => {
            if let Some(ref form) = app.form {
                render_task_form(f, layout.inner_area, form, &palette);
            }
        }
        Mode::ConfirmDelete => {
            if let Some(task) = app.pending_delete_task() {
                render_confirm_delete(f, layout.inner_area, task, app.ui.delete_modal_selection, &palette);
            }
        }
        Mode::Help => render_help(f, layout.inner_area, &app.config, &palette),
        Mode::View => {}
    }

    if app.celebration.is_visible() {
        render_celebration(f, layout.inner_area, &palette);
    }

    render_status_bar(f, layout.status_area, app.status.message.as_deref(), &get_key_hints(app), &palette);
}

fn login_hints() -> Vec<String> {
    vec![
        "Tab: Next field".to_string(),
        "Enter: Submit".to_string(),
        "Esc: Back/Quit".to_string(),
        "Ctrl+C: Quit".to_string(),
    ]
}

fn get_key_hints(app: &App) -> Vec<String> {
    let kb = &app.config.key_bindings;
    match app.ui.mode {
        Mode::Help => vec![format!("Esc or {}: Exit help", display(&kb.help))],
        Mode::TaskForm => vec![
            "Tab: Next field".to_string(),
            "Shift+Tab: Previous field".to_string(),
            format!("Enter/{}: Save", display(&kb.save)),
            "Esc: Cancel".to_string(),
        ],
        Mode::ConfirmDelete => vec![
            "↑/↓: Choose".to_string(),
            "Enter: Confirm".to_string(),
            "Esc: Cancel".to_string(),
        ],
        Mode::View => vec![
            format!("{}: Quit", display(&kb.quit)),
            format!("{}: New", display(&kb.new_task)),
            format!("{}: Edit", display(&kb.edit)),
            format!("{}: Delete", display(&kb.delete)),
            format!("{}: Complete", display(&kb.complete)),
            format!("{}/{}: Month", display(&kb.prev_month), display(&kb.next_month)),
            "Tab: Focus".to_string(),
            format!("{}: Theme", display(&kb.toggle_theme)),
            format!("{}: Logout", display(&kb.logout)),
            format!("{}: Help", display(&kb.help)),
        ],
    }
}
