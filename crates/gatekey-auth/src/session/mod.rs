//! Session lifecycle management: signup, login, refresh, logout.

pub mod manager;

pub use manager::{AuthOutcome, SessionManager};
