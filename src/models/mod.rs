// Gateway module for domain models - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod forms;
mod types;

// Public re-exports - the ONLY way to access model types
pub use forms::{
    validate_comment, Credentials, NewWarning, Registration, ValidationError, WarningUpdate,
};
pub use types::{split_warning_signs, Category, Comment, Session, Warning, WarningStatus};
