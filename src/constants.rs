/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

// Timeouts
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const STATUS_CHECK_TIMEOUT_MS: u64 = 1500;

// Local persistence
pub const SESSION_STORAGE_KEY: &str = "user";
pub const LOCAL_CONFIG_DIR: &str = ".scamwatch";
pub const ENV_PREFIX: &str = "SCAMWATCH_";

// Form validation (matches the service's own minimums)
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_TITLE_LEN: usize = 5;
pub const MIN_DESCRIPTION_LEN: usize = 20;
pub const MIN_WARNING_SIGNS_LEN: usize = 5;
pub const MIN_EDITED_WARNING_SIGNS_LEN: usize = 10;
pub const MAX_COMMENT_LEN: usize = 500;

// Listing
pub const HOME_WARNING_LIMIT: usize = 5;
pub const DESCRIPTION_PREVIEW_CHARS: usize = 120;

// Category used when an edited warning's category name cannot be resolved
pub const DEFAULT_CATEGORY_ID: i64 = 1;

// Categories offered by the report form when the service cannot be reached
pub const FALLBACK_CATEGORIES: &[(i64, &str)] = &[
    (1, "Phone"),
    (2, "Email"),
    (3, "Online"),
    (4, "Investment"),
    (5, "Social Media"),
    (6, "Other"),
];
