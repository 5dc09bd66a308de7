use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size as terminal_size};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::KeyBindings;
use crate::tui::app::{AuthView, Focus, Mode, Screen};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::widgets::confirm_delete::DELETE_OPTIONS;
use crate::tui::widgets::input::Input;
use crate::tui::App;
use crate::utils::{ParsedKeyBinding, has_primary_modifier, parse_key_binding};

const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Guard that ensures terminal state is restored even on panic.
/// If the terminal is left in raw mode or the alternate screen, the
/// user's shell is unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Restore terminal state on normal exit; the guard does nothing on drop afterwards
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors in drop - we're already in a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering the alternate screen so the
    // message lands in the normal terminal
    let (width, height) = terminal_size()?;
    if width < Layout::MIN_WIDTH || height < Layout::MIN_HEIGHT {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width,
            height,
            Layout::MIN_WIDTH,
            Layout::MIN_HEIGHT
        )));
    }

    // Fail on a bad key binding before touching the terminal
    validate_key_bindings(&app.config.key_bindings)?;

    let mut guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    info!("TUI started");

    loop {
        app.tick(Instant::now());

        let size = terminal.size()?;
        let terminal_rect = Rect::new(0, 0, size.width, size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(terminal_rect);
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        // Only process Press events to avoid duplicate processing on Windows
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press && handle_key_event(&mut app, key_event)? {
                    break;
                }
            }
        }
    }

    guard.restore()?;
    info!("TUI stopped");
    Ok(())
}

fn validate_key_bindings(kb: &KeyBindings) -> Result<(), TuiError> {
    for binding in [
        &kb.quit,
        &kb.help,
        &kb.new_task,
        &kb.edit,
        &kb.delete,
        &kb.complete,
        &kb.toggle_theme,
        &kb.logout,
        &kb.prev_month,
        &kb.next_month,
        &kb.today,
        &kb.save,
    ] {
        parse_key_binding(binding).map_err(TuiError::KeyBindingError)?;
    }
    Ok(())
}

/// Handle one key press. Returns `Ok(true)` when the app should quit.
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui.screen {
        Screen::Login => Ok(handle_login_key(app, key_event)),
        Screen::Dashboard => match app.ui.mode {
            Mode::View => handle_view_mode(app, key_event),
            Mode::TaskForm => handle_task_form(app, key_event),
            Mode::ConfirmDelete => {
                handle_delete_confirmation_modal(app, key_event);
                Ok(false)
            }
            Mode::Help => handle_help_mode(app, key_event),
        },
    }
}

fn handle_login_key(app: &mut App, key_event: KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Esc => {
            if app.login.view == AuthView::Login {
                return true;
            }
            app.login.switch_view(AuthView::Login);
        }
        KeyCode::F(2) => app.login.switch_view(AuthView::Register),
        KeyCode::F(3) => app.login.switch_view(AuthView::ForgotPassword),
        KeyCode::Enter => app.submit_login(),
        KeyCode::Tab | KeyCode::Down => app.login.navigate_field(true),
        KeyCode::BackTab | KeyCode::Up => app.login.navigate_field(false),
        _ => edit_input(app.login.current_input(), key_event),
    }
    false
}

fn handle_view_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let kb = app.config.key_bindings.clone();

    if matches(key_event, &kb.quit)? {
        return Ok(true);
    }
    if matches(key_event, &kb.help)? {
        app.enter_help_mode();
    } else if matches(key_event, &kb.new_task)? {
        app.open_new_task_form();
    } else if matches(key_event, &kb.edit)? {
        app.open_edit_form();
    } else if matches(key_event, &kb.delete)? {
        app.request_delete_selected();
    } else if matches(key_event, &kb.complete)? {
        app.complete_selected();
    } else if matches(key_event, &kb.toggle_theme)? {
        app.toggle_theme();
    } else if matches(key_event, &kb.logout)? {
        app.logout();
    } else if matches(key_event, &kb.prev_month)? {
        app.prev_month();
    } else if matches(key_event, &kb.next_month)? {
        app.next_month();
    } else if matches(key_event, &kb.today)? {
        app.go_to_today();
    } else if key_event.code == KeyCode::Tab {
        app.toggle_focus();
    } else if key_event.code == KeyCode::Esc && app.celebration.is_visible() {
        app.celebration.cancel();
    } else {
        match app.ui.focus {
            Focus::Calendar => handle_calendar_navigation(app, key_event),
            Focus::Agenda => handle_agenda_navigation(app, key_event),
        }
    }
    Ok(false)
}

fn handle_calendar_navigation(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Left | KeyCode::Char('h') => app.move_days(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_days(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_days(-7),
        KeyCode::Down | KeyCode::Char('j') => app.move_days(7),
        KeyCode::Home => app.select_day(1),
        KeyCode::End => app.select_day(31),
        KeyCode::Enter => app.toggle_focus(),
        _ => {}
    }
}

fn handle_agenda_navigation(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_agenda_selection(false),
        KeyCode::Down | KeyCode::Char('j') => app.move_agenda_selection(true),
        KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => app.toggle_focus(),
        _ => {}
    }
}

fn handle_task_form(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if matches(key_event, &app.config.key_bindings.save)? {
        app.submit_task_form();
        return Ok(false);
    }
    match key_event.code {
        KeyCode::Esc => app.cancel_task_form(),
        KeyCode::Enter => app.submit_task_form(),
        KeyCode::Tab => {
            if let Some(form) = app.form.as_mut() {
                form.navigate_field(true);
            }
        }
        KeyCode::BackTab => {
            if let Some(form) = app.form.as_mut() {
                form.navigate_field(false);
            }
        }
        _ => {
            if let Some(form) = app.form.as_mut() {
                edit_input(form.current_input(), key_event);
            }
        }
    }
    Ok(false)
}

fn handle_delete_confirmation_modal(app: &mut App, key_event: KeyEvent) {
    let options = DELETE_OPTIONS.len();
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.ui.delete_modal_selection = (app.ui.delete_modal_selection + options - 1) % options;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.ui.delete_modal_selection = (app.ui.delete_modal_selection + 1) % options;
        }
        KeyCode::Enter => {
            if app.ui.delete_modal_selection == 0 {
                app.confirm_delete();
            } else {
                app.cancel_delete();
            }
        }
        KeyCode::Char('y') => app.confirm_delete(),
        KeyCode::Esc | KeyCode::Char('n') => app.cancel_delete(),
        _ => {}
    }
}

fn handle_help_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if key_event.code == KeyCode::Esc || matches(key_event, &app.config.key_bindings.help)? {
        app.exit_help_mode();
    }
    Ok(false)
}

/// Apply a text-editing key to a single-line input
fn edit_input(input: &mut Input, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Char(c) if !has_primary_modifier(key_event.modifiers) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        other => debug!(key = ?other, "Unhandled key in input field"),
    }
}

fn matches(key_event: KeyEvent, binding: &str) -> Result<bool, TuiError> {
    let parsed = parse_key_binding(binding).map_err(TuiError::KeyBindingError)?;
    Ok(matches_key_event(key_event, &parsed))
}

fn matches_key_event(key_event: KeyEvent, binding: &ParsedKeyBinding) -> bool {
    // Ctrl on Windows/Linux, Option/Alt on macOS
    if binding.requires_ctrl != has_primary_modifier(key_event.modifiers) {
        return false;
    }
    binding.key_code == key_event.code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use crate::roster::Roster;
    use crate::store::TaskStore;
    use chrono::NaiveDate;
    use std::rc::Rc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key_event(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    fn logged_in_app() -> App {
        let mut app = App::with_store(Config::default(), Rc::new(Roster::seeded()), TaskStore::with_seed(5));
        app.today_override = NaiveDate::from_ymd_opt(2024, 3, 15);
        app.ui.selected_date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        type_text(&mut app, "parent@example.com");
        handle_key_event(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "password");
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        app
    }

    #[test]
    fn typing_credentials_logs_in() {
        let app = logged_in_app();
        assert_eq!(app.ui.screen, Screen::Dashboard);
    }

    #[test]
    fn q_on_login_screen_is_text_not_quit() {
        let mut app = App::new(Config::default(), Rc::new(Roster::seeded()));
        assert!(!handle_key_event(&mut app, key(KeyCode::Char('q'))).unwrap());
        assert_eq!(app.login.email.value(), "q");
    }

    #[test]
    fn quit_binding_and_ctrl_c() {
        let mut app = logged_in_app();
        assert!(handle_key_event(&mut app, key(KeyCode::Char('q'))).unwrap());
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key_event(&mut app, ctrl_c).unwrap());
    }

    #[test]
    fn new_task_via_keyboard() {
        let mut app = logged_in_app();
        handle_key_event(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.ui.mode, Mode::TaskForm);
        type_text(&mut app, "Clean room");
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ui.mode, Mode::View);
        assert_eq!(app.store.tasks()[0].title, "Clean room");
        assert_eq!(app.store.tasks()[0].date, "2024-03-15");
    }

    #[test]
    fn arrows_move_selected_day() {
        let mut app = logged_in_app();
        handle_key_event(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.ui.selected_date, NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
        handle_key_event(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.ui.selected_date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        handle_key_event(&mut app, key(KeyCode::Char(']'))).unwrap();
        assert_eq!(app.ui.selected_date, NaiveDate::from_ymd_opt(2024, 4, 9).unwrap());
    }

    #[test]
    fn delete_modal_defaults_to_delete() {
        let mut app = logged_in_app();
        handle_key_event(&mut app, key(KeyCode::Char('n'))).unwrap();
        type_text(&mut app, "Trash");
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();

        handle_key_event(&mut app, key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.ui.mode, Mode::ConfirmDelete);
        handle_key_event(&mut app, key(KeyCode::Down)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.store.len(), 1);

        handle_key_event(&mut app, key(KeyCode::Char('d'))).unwrap();
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.store.is_empty());
    }

    #[test]
    fn shifted_logout_binding() {
        let mut app = logged_in_app();
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT)).unwrap();
        assert_eq!(app.ui.screen, Screen::Login);
    }

    #[test]
    fn bad_binding_is_reported() {
        let mut app = logged_in_app();
        app.config.key_bindings.quit = "Hyper+q".to_string();
        let err = handle_key_event(&mut app, key(KeyCode::Char('x'))).unwrap_err();
        assert!(matches!(err, TuiError::KeyBindingError(_)));
    }
}
