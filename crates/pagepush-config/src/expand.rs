//! Environment variable expansion for configuration strings.
//!
//! Supports `${VAR}` (errors if unset) and `${VAR:-default}`.

use crate::ConfigError;

/// Expand environment variable references in a config value.
///
/// Values without `${` are returned unchanged, so tokens containing a bare `$`
/// survive as-is.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar {
            name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.name),
    })
}

/// Lookup failure for a referenced variable.
struct UnsetVar {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_token_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("PAGEPUSH_TEST_TOKEN", "abc123");
        }
        let result = expand_env("${PAGEPUSH_TEST_TOKEN}", "confluence.token").unwrap();
        assert_eq!(result, "abc123");
        unsafe {
            std::env::remove_var("PAGEPUSH_TEST_TOKEN");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("PAGEPUSH_TEST_UNSET_SPACE");
        }
        let result = expand_env("${PAGEPUSH_TEST_UNSET_SPACE:-DOCS}", "confluence.space_key")
            .unwrap();
        assert_eq!(result, "DOCS");
    }

    #[test]
    fn test_expand_inside_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("PAGEPUSH_TEST_HOST", "wiki.example.com");
        }
        let result = expand_env("https://${PAGEPUSH_TEST_HOST}/", "confluence.base_url").unwrap();
        assert_eq!(result, "https://wiki.example.com/");
        unsafe {
            std::env::remove_var("PAGEPUSH_TEST_HOST");
        }
    }

    #[test]
    fn test_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("PAGEPUSH_TEST_MISSING");
        }
        let err = expand_env("${PAGEPUSH_TEST_MISSING}", "confluence.token").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("PAGEPUSH_TEST_MISSING"));
        assert!(message.contains("confluence.token"));
    }

    #[test]
    fn test_value_without_braces_unchanged() {
        let result = expand_env("plain-$token", "confluence.token").unwrap();
        assert_eq!(result, "plain-$token");
    }
}
