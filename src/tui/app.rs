use chrono::{Days, NaiveDate};
use ratatui::widgets::ListState;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::Config;
use crate::agenda::{self, AgendaRow};
use crate::calendar::{self, MonthGrid};
use crate::celebration::Celebration;
use crate::models::{Task, TaskDraft, User};
use crate::roster::Roster;
use crate::session::SessionStore;
use crate::store::{Completion, TaskError, TaskStore};
use crate::tui::widgets::input::Input;
use crate::utils;

pub const DEFAULT_TASK_TIME: &str = "09:00";
const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    TaskForm,
    ConfirmDelete,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Calendar,
    Agenda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthView {
    Login,
    Register,
    ForgotPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Name,
    Email,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub view: AuthView,
    pub current_field: LoginField,
    pub name: Input,
    pub email: Input,
    pub password: Input,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            view: AuthView::Login,
            current_field: LoginField::Email,
            name: Input::new(),
            email: Input::new(),
            password: Input::masked(),
        }
    }
}

impl LoginForm {
    /// Fields shown for the current view, in tab order
    pub fn fields(&self) -> &'static [LoginField] {
        match self.view {
            AuthView::Login => &[LoginField::Email, LoginField::Password],
            AuthView::Register => &[LoginField::Name, LoginField::Email, LoginField::Password],
            AuthView::ForgotPassword => &[LoginField::Email],
        }
    }

    pub fn switch_view(&mut self, view: AuthView) {
        self.view = view;
        self.current_field = LoginField::Email;
    }

    pub fn navigate_field(&mut self, forward: bool) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.current_field).unwrap_or(0);
        let next = if forward {
            (pos + 1) % fields.len()
        } else {
            (pos + fields.len() - 1) % fields.len()
        };
        self.current_field = fields[next];
    }

    pub fn current_input(&mut self) -> &mut Input {
        match self.current_field {
            LoginField::Name => &mut self.name,
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Date,
    Time,
    Description,
}

impl TaskField {
    pub const ALL: [TaskField; 4] = [TaskField::Title, TaskField::Date, TaskField::Time, TaskField::Description];

    pub fn label(self) -> &'static str {
        match self {
            TaskField::Title => "Task Title",
            TaskField::Date => "Date (YYYY-MM-DD)",
            TaskField::Time => "Time (HH:MM)",
            TaskField::Description => "Description",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    pub current_field: TaskField,
    pub title: Input,
    pub date: Input,
    pub time: Input,
    pub description: Input,
    /// The task being edited; `None` when adding
    pub editing: Option<Task>,
}

impl TaskForm {
    pub fn new_for_date(date: NaiveDate) -> Self {
        Self {
            current_field: TaskField::Title,
            title: Input::new(),
            date: Input::from_string(&calendar::date_key(date)),
            time: Input::from_string(DEFAULT_TASK_TIME),
            description: Input::new(),
            editing: None,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            current_field: TaskField::Title,
            title: Input::from_string(&task.title),
            date: Input::from_string(&task.date),
            time: Input::from_string(&task.time),
            description: Input::from_string(&task.description),
            editing: Some(task.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn input(&self, field: TaskField) -> &Input {
        match field {
            TaskField::Title => &self.title,
            TaskField::Date => &self.date,
            TaskField::Time => &self.time,
            TaskField::Description => &self.description,
        }
    }

    pub fn current_input(&mut self) -> &mut Input {
        match self.current_field {
            TaskField::Title => &mut self.title,
            TaskField::Date => &mut self.date,
            TaskField::Time => &mut self.time,
            TaskField::Description => &mut self.description,
        }
    }

    pub fn navigate_field(&mut self, forward: bool) {
        let pos = TaskField::ALL.iter().position(|f| *f == self.current_field).unwrap_or(0);
        let len = TaskField::ALL.len();
        let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
        self.current_field = TaskField::ALL[next];
    }

    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.value().trim().to_string(),
            description: self.description.value().trim().to_string(),
            date: self.date.value().trim().to_string(),
            time: self.time.value().trim().to_string(),
        }
    }
}

/// Check date and time fields. An empty title is not an error here; the
/// caller ignores such submits without a message.
fn validate_draft(draft: &TaskDraft) -> Result<(), String> {
    if draft.date.len() != 10 || utils::parse_date(&draft.date).is_err() {
        return Err("Date must be in YYYY-MM-DD format".to_string());
    }
    if draft.time.len() != 5 || utils::parse_time(&draft.time).is_err() {
        return Err("Time must be in HH:MM format".to_string());
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub screen: Screen,
    pub mode: Mode,
    pub focus: Focus,
    pub selected_date: NaiveDate,
    pub agenda_state: ListState,
    pub pending_delete: Option<String>,
    pub delete_modal_selection: usize,
    pub is_dark: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    pub config: Config,
    pub roster: Rc<Roster>,
    pub session: SessionStore,
    pub store: TaskStore,
    pub ui: UiState,
    pub login: LoginForm,
    pub form: Option<TaskForm>,
    pub celebration: Celebration,
    pub status: StatusState,
    /// Fixed "today" for tests; `None` reads the wall clock
    pub today_override: Option<NaiveDate>,
}

impl App {
    pub fn new(config: Config, roster: Rc<Roster>) -> Self {
        Self::with_store(config, roster, TaskStore::new())
    }

    pub fn with_store(config: Config, roster: Rc<Roster>, store: TaskStore) -> Self {
        let is_dark = config.is_dark();
        Self {
            config,
            session: SessionStore::new(Rc::clone(&roster)),
            roster,
            store,
            ui: UiState {
                screen: Screen::Login,
                mode: Mode::View,
                focus: Focus::Calendar,
                selected_date: utils::today(),
                agenda_state: ListState::default(),
                pending_delete: None,
                delete_modal_selection: 0,
                is_dark,
            },
            login: LoginForm::default(),
            form: None,
            celebration: Celebration::new(),
            status: StatusState::default(),
            today_override: None,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today_override.unwrap_or_else(utils::today)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current()
    }

    // ---- derived views ------------------------------------------------

    pub fn calendar_grid(&self) -> MonthGrid {
        let viewer = self.current_user().map(|u| u.id.as_str()).unwrap_or_default();
        MonthGrid::build(self.store.tasks(), self.ui.selected_date, viewer, self.today())
    }

    pub fn agenda(&self) -> Vec<AgendaRow> {
        let viewer = self.current_user().map(|u| u.id.as_str()).unwrap_or_default();
        agenda::tasks_for_date(self.store.tasks(), self.ui.selected_date, viewer, &self.roster)
    }

    pub fn selected_row(&self) -> Option<AgendaRow> {
        let index = self.ui.agenda_state.selected()?;
        self.agenda().into_iter().nth(index)
    }

    /// Keep the agenda cursor on a real row after the list changes
    pub fn sync_agenda_selection(&mut self) {
        let len = self.agenda().len();
        let selected = match self.ui.agenda_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.ui.agenda_state.select(selected);
    }

    // ---- status line --------------------------------------------------

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status.message = Some(message.into());
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    /// Per-frame housekeeping: expire the status message and the overlay
    pub fn tick(&mut self, now: Instant) {
        if let Some(time) = self.status.message_time {
            if now.saturating_duration_since(time).as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
        self.celebration.tick(now);
    }

    // ---- session ------------------------------------------------------

    pub fn submit_login(&mut self) {
        let email = self.login.email.value().trim().to_string();
        match self.login.view {
            AuthView::Login => {
                let password = self.login.password.value().to_string();
                match self.session.login(&email, &password) {
                    Ok(user) => {
                        self.login = LoginForm::default();
                        self.ui.screen = Screen::Dashboard;
                        self.ui.mode = Mode::View;
                        self.ui.focus = Focus::Calendar;
                        self.sync_agenda_selection();
                        self.set_status_message(format!("Welcome, {}", user.name));
                    }
                    Err(e) => {
                        self.login.password.clear();
                        self.set_status_message(e.to_string());
                    }
                }
            }
            AuthView::Register => {
                let password = self.login.password.value().to_string();
                let name = self.login.name.value().trim().to_string();
                if let Err(e) = self.session.register(&email, &password, &name) {
                    self.set_status_message(e.to_string());
                }
            }
            AuthView::ForgotPassword => {
                if let Err(e) = self.session.request_password_reset(&email) {
                    self.set_status_message(e.to_string());
                }
            }
        }
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.celebration.cancel();
        self.form = None;
        self.ui.pending_delete = None;
        self.ui.mode = Mode::View;
        self.ui.screen = Screen::Login;
        self.login = LoginForm::default();
        self.set_status_message("Logged out");
    }

    // ---- theme --------------------------------------------------------

    pub fn toggle_theme(&mut self) {
        self.ui.is_dark = !self.ui.is_dark;
        if let Err(e) = self.config.set_dark(self.ui.is_dark) {
            warn!(error = %e, "Failed to save theme preference");
            self.set_status_message(format!("Failed to save theme: {}", e));
        }
    }

    // ---- date navigation ----------------------------------------------

    pub fn select_date(&mut self, date: NaiveDate) {
        self.ui.selected_date = date;
        self.ui.agenda_state.select(None);
        self.sync_agenda_selection();
    }

    /// Select a day of the currently shown month; out-of-range days clamp
    pub fn select_day(&mut self, day: u32) {
        self.select_date(calendar::with_day(self.ui.selected_date, day));
    }

    /// Move the selected date by whole days, crossing month edges
    pub fn move_days(&mut self, delta: i64) {
        let current = self.ui.selected_date;
        let moved = if delta >= 0 {
            current.checked_add_days(Days::new(delta as u64))
        } else {
            current.checked_sub_days(Days::new(delta.unsigned_abs()))
        };
        if let Some(date) = moved {
            self.select_date(date);
        }
    }

    pub fn prev_month(&mut self) {
        self.select_date(calendar::prev_month(self.ui.selected_date));
    }

    pub fn next_month(&mut self) {
        self.select_date(calendar::next_month(self.ui.selected_date));
    }

    pub fn go_to_today(&mut self) {
        self.select_date(self.today());
    }

    pub fn toggle_focus(&mut self) {
        self.ui.focus = match self.ui.focus {
            Focus::Calendar => Focus::Agenda,
            Focus::Agenda => Focus::Calendar,
        };
        self.sync_agenda_selection();
    }

    pub fn move_agenda_selection(&mut self, down: bool) {
        let len = self.agenda().len();
        if len == 0 {
            self.ui.agenda_state.select(None);
            return;
        }
        let current = self.ui.agenda_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(len - 1)
        } else {
            current.saturating_sub(1)
        };
        self.ui.agenda_state.select(Some(next));
    }

    // ---- task form ----------------------------------------------------

    pub fn open_new_task_form(&mut self) {
        self.form = Some(TaskForm::new_for_date(self.ui.selected_date));
        self.ui.mode = Mode::TaskForm;
    }

    pub fn open_edit_form(&mut self) {
        let Some(row) = self.selected_row() else {
            self.set_status_message("No task selected");
            return;
        };
        if !row.is_own {
            self.set_status_message(read_only_message(&row.owner_name));
            return;
        }
        self.form = Some(TaskForm::edit(&row.task));
        self.ui.mode = Mode::TaskForm;
    }

    pub fn cancel_task_form(&mut self) {
        self.form = None;
        self.ui.mode = Mode::View;
    }

    pub fn submit_task_form(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let draft = form.draft();
        let editing = form.editing.clone();
        if draft.title.is_empty() {
            debug!("Ignoring task submit with empty title");
            return;
        }
        if let Err(msg) = validate_draft(&draft) {
            self.set_status_message(format!("Validation error: {}", msg));
            return;
        }
        let Some(user) = self.session.current().cloned() else {
            return;
        };

        match editing {
            Some(original) => {
                let updated = Task {
                    title: draft.title,
                    description: draft.description,
                    date: draft.date,
                    time: draft.time,
                    ..original
                };
                match self.store.update_task(&user, updated) {
                    Ok(true) => self.set_status_message("Task updated"),
                    Ok(false) => self.set_status_message("Task no longer exists"),
                    Err(e) => self.set_status_message(e.to_string()),
                }
            }
            None => {
                self.store.add_task(&user, draft);
                self.set_status_message("Task added");
            }
        }

        self.form = None;
        self.ui.mode = Mode::View;
        self.sync_agenda_selection();
    }

    // ---- task actions -------------------------------------------------

    pub fn complete_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let Some(user) = self.session.current().cloned() else {
            return;
        };
        match self.store.complete_task(&user, &row.task.id) {
            Ok(Completion::Completed) => {
                self.celebration.trigger(Instant::now());
                self.set_status_message("Task completed!");
            }
            Ok(Completion::AlreadyCompleted) => self.set_status_message("Task is already completed"),
            Ok(Completion::Missing) => {}
            Err(TaskError::NotOwner { .. }) => self.set_status_message(read_only_message(&row.owner_name)),
        }
    }

    /// Ask for confirmation before deleting the selected task
    pub fn request_delete_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if !row.is_own {
            self.set_status_message(read_only_message(&row.owner_name));
            return;
        }
        self.ui.pending_delete = Some(row.task.id);
        self.ui.delete_modal_selection = 0;
        self.ui.mode = Mode::ConfirmDelete;
    }

    pub fn confirm_delete(&mut self) {
        let pending = self.ui.pending_delete.take();
        self.ui.mode = Mode::View;
        let (Some(id), Some(user)) = (pending, self.session.current().cloned()) else {
            return;
        };
        match self.store.delete_task(&user, &id) {
            Ok(true) => self.set_status_message("Task deleted"),
            Ok(false) => {}
            Err(e) => self.set_status_message(e.to_string()),
        }
        self.sync_agenda_selection();
    }

    pub fn cancel_delete(&mut self) {
        self.ui.pending_delete = None;
        self.ui.mode = Mode::View;
    }

    pub fn pending_delete_task(&self) -> Option<&Task> {
        self.ui.pending_delete.as_deref().and_then(|id| self.store.get(id))
    }

    // ---- overlays -----------------------------------------------------

    pub fn enter_help_mode(&mut self) {
        self.ui.mode = Mode::Help;
    }

    pub fn exit_help_mode(&mut self) {
        self.ui.mode = Mode::View;
    }
}

fn read_only_message(owner_name: &str) -> String {
    format!("Read-only: this is {}'s task", owner_name)
}
