//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::GraphConfig;

/// Validate configuration
pub fn validate_config(config: &GraphConfig) -> Result<()> {
    debug!("validating configuration");
    if config.project_repo_param_prefix.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "project_repo_param_prefix".to_string(),
            message: "prefix cannot be empty, it would alias the head repository parameters"
                .to_string(),
        }
        .into());
    }
    validate_optimize(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_optimize(config: &GraphConfig) -> Result<()> {
    let optimize = &config.optimize;

    if optimize.full_validation_project.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "optimize.full_validation_project".to_string(),
            message: "project name cannot be empty".to_string(),
        }
        .into());
    }

    for (i, dir) in optimize.suite_dirs.iter().enumerate() {
        if dir.is_empty() || dir.contains('/') {
            return Err(ConfigError::InvalidValue {
                field: format!("optimize.suite_dirs[{}]", i),
                message: "must be a single top-level directory name".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = GraphConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_repo_param_prefix() {
        let mut config = GraphConfig::default();
        config.project_repo_param_prefix = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_nested_suite_dir() {
        let mut config = GraphConfig::default();
        config.optimize.suite_dirs = vec!["suite/base".to_string()];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_full_validation_project() {
        let mut config = GraphConfig::default();
        config.optimize.full_validation_project = String::new();
        assert!(validate_config(&config).is_err());
    }
}
