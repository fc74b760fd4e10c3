//! Environment/runtime helpers
//!
//! Small lookups shared by the Lambda entrypoints and the local server.

/// Load `.env` from the working directory if one exists.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Read an environment variable, treating blank values as unset.
pub fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Function name injected by the AWS Lambda runtime, if running there.
pub fn lambda_function_name() -> Option<String> {
    non_empty_var("AWS_LAMBDA_FUNCTION_NAME")
}

pub fn is_lambda() -> bool {
    lambda_function_name().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_vars_are_unset() {
        std::env::set_var("TODO_APP_BLANK_VAR", "   ");
        assert_eq!(non_empty_var("TODO_APP_BLANK_VAR"), None);
        std::env::set_var("TODO_APP_SET_VAR", " value ");
        assert_eq!(non_empty_var("TODO_APP_SET_VAR").as_deref(), Some("value"));
    }
}
