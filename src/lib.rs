pub mod agenda;
pub mod auth;
pub mod calendar;
pub mod celebration;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod roster;
pub mod session;
pub mod store;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use models::{Task, TaskDraft, User};
pub use roster::Roster;
pub use session::SessionStore;
pub use store::TaskStore;
pub use utils::Profile;
