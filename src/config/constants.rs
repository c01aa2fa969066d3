pub const HELLO_MESSAGE: &str = "Hi, what can I do for you?";

pub const WELCOME_TITLE: &str = "Welcome Chat";

pub const NEW_CHAT_TITLE: &str = "New Chat";

pub const LOG_FILE_PATH: &str = "/tmp/parley.log";

pub const BACKEND_ENDPOINT: &str = "http://localhost:8000";

/// Overrides `[backend] endpoint` when set
pub const BACKEND_URL_ENV: &str = "PARLEY_BACKEND_URL";

pub const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x";

pub const SYSTEM_AVATAR_SEED: &str = "system";

pub const USER_AVATAR_SEED: &str = "chickenattack";

pub const INVALID_FILES_NOTICE: &str = "Please upload valid files!";
