pub mod api;
pub mod app;
pub mod cli;
pub mod constants;
pub mod models;
pub mod session;
pub mod utils;

pub use api::{ApiResult, Gateway};
pub use app::{load_config, AppContext, Config};
pub use session::SessionStore;
pub use utils::ScamwatchError;
