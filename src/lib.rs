pub mod aggregate;
pub mod app;
pub mod codec;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notice;
pub mod state;
pub mod storage;
pub mod store;
pub mod time;
pub mod ui;
pub mod validator;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{LocalStorage, load_week};
pub use store::WeeklyStore;
