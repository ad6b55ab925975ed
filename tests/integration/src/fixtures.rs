//! Test fixtures and utilities

use uuid::Uuid;

/// Generate a unique todo name for testing
pub fn unique_todo_name() -> String {
    format!("test-todo-{}", &Uuid::new_v4().to_string()[..8])
}

/// Check if the API URL and caller token are configured
pub fn api_configured() -> bool {
    dotenvy::dotenv().ok();
    std::env::var("TODO_API_URL").is_ok() && std::env::var("TODO_API_TOKEN").is_ok()
}

/// Token of a second user, for ownership tests
pub fn other_user_token() -> Option<String> {
    std::env::var("TODO_API_OTHER_TOKEN").ok()
}

/// Skip test if the API is not configured
#[macro_export]
macro_rules! skip_if_no_api {
    () => {
        $crate::skip_if_no_api!(())
    };
    ($ret:expr) => {
        if !$crate::fixtures::api_configured() {
            eprintln!("Skipping test: TODO_API_URL / TODO_API_TOKEN not set");
            return $ret;
        }
    };
}
