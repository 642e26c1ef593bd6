//! Editor configuration.

use onto_history::ReplayFailurePolicy;
use onto_mutation::CascadePolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: &'static str,
    },
}

/// Session-wide editor settings. Every key is optional in JSON.
///
/// ```json
/// { "history_limit": 100, "replay_failure": "retain", "cascade": "compensate" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Maximum number of undoable commands; `None` is unbounded.
    pub history_limit: Option<usize>,
    /// What happens to a command whose undo or redo fails.
    pub replay_failure: ReplayFailurePolicy,
    /// What a failed cascading delete does with relationships it removed.
    pub cascade: CascadePolicy,
}

impl EditorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.history_limit == Some(0) {
            return Err(ConfigError::Invalid {
                field: "history_limit",
                message: "must be at least 1, or absent for no limit",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = EditorConfig::from_json(
            r#"{"history_limit": 50, "replay_failure": "retain", "cascade": "compensate"}"#,
        )
        .unwrap();

        assert_eq!(
            config,
            EditorConfig {
                history_limit: Some(50),
                replay_failure: ReplayFailurePolicy::Retain,
                cascade: CascadePolicy::Compensate,
            }
        );
    }

    #[test]
    fn test_zero_history_limit_rejected() {
        let result = EditorConfig::from_json(r#"{"history_limit": 0}"#);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "history_limit",
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_values_rejected() {
        assert!(matches!(
            EditorConfig::from_json(r#"{"cascade": "rollback"}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"undo_depth": 3}"#),
            Err(ConfigError::Parse(_))
        ));
    }
}
