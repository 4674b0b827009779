/// Session management module - Gateway

mod state;
mod storage;
mod store;

pub use state::AuthState;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::SessionStore;
