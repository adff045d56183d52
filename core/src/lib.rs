pub mod bmi;
pub mod chart;
pub mod entry_log;
pub mod error;
pub mod meals;
pub mod models;
pub mod plans;
pub mod service;
pub mod store;
pub mod users;
pub mod view;
pub mod weights;

pub use error::{ValidationError, is_validation};
pub use service::Tracker;
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
