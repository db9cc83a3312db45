pub mod app;
pub mod celebration;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod ticker;
pub mod ui;
pub mod widget;

pub use app::router;
pub use celebration::CelebrationState;
pub use config::CardConfig;
pub use state::AppState;
pub use widget::Widget;
