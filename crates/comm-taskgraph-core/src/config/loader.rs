//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result, TaskgraphError};

use super::defaults::config_file_names;
use super::types::GraphConfig;
use super::validation::validate_config;

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<GraphConfig> {
    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config: GraphConfig = if format == "TOML" {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// Names from [`config_file_names`] are tried in order at each level and the
/// first match wins. Parents are walked until the filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.exists() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration from directory (searching parent directories)
pub fn load_config_from_dir(dir: &Path) -> Result<(GraphConfig, PathBuf)> {
    let config_path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;

    let config = load_config(&config_path)?;
    Ok((config, config_path))
}

/// Load configuration, or use defaults when no config file exists.
///
/// A config file that exists but fails to parse or validate is an error.
pub fn load_config_or_default(dir: &Path) -> Result<(GraphConfig, Option<PathBuf>)> {
    match load_config_from_dir(dir) {
        Ok((config, path)) => Ok((config, Some(path))),
        Err(TaskgraphError::Config(ConfigError::NotFound(_))) => {
            warn!(dir = %dir.display(), "no config found, using defaults");
            Ok((GraphConfig::default(), None))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("comm-taskgraph.toml");
        std::fs::write(&config_path, "project_repo_param_prefix = \"comm_\"").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_taskcluster_dir() {
        let temp = TempDir::new().unwrap();
        let ci_dir = temp.path().join("taskcluster").join("ci");
        std::fs::create_dir_all(&ci_dir).unwrap();
        let config_path = ci_dir.join("config.yml");
        std::fs::write(&config_path, "project_repo_param_prefix: comm_\n").unwrap();

        let nested = temp.path().join("mail").join("base");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_config_prefers_toml_over_yaml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("comm-taskgraph.toml");
        let yaml_path = temp.path().join("comm-taskgraph.yaml");
        std::fs::write(&toml_path, "project_repo_param_prefix = \"comm_\"").unwrap();
        std::fs::write(&yaml_path, "project_repo_param_prefix: other_\n").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, toml_path);
    }

    #[test]
    fn test_load_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("comm-taskgraph.toml");
        std::fs::write(
            &config_path,
            "project_repo_param_prefix = \"comm_\"\n\n[optimize]\nfull_validation_project = \"try-cc\"\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.optimize.full_validation_project, "try-cc");
        assert_eq!(config.optimize.suite_dirs, vec!["editor", "suite"]);
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("comm-taskgraph.yaml");
        std::fs::write(
            &config_path,
            "optimize:\n  cron_pushlog_id: 0\n  suite_dirs: [suite]\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.optimize.cron_pushlog_id, 0);
        assert_eq!(config.optimize.suite_dirs, vec!["suite"]);
    }

    #[test]
    fn test_load_invalid_config_rejected() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("comm-taskgraph.yaml");
        std::fs::write(&config_path, "project_repo_param_prefix: \"\"\n").unwrap();

        assert!(load_config(&config_path).is_err());
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(config.project_repo_param_prefix, "comm_");
    }

    #[test]
    fn test_load_config_or_default_finds_parent_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(".comm-taskgraph.yaml");
        std::fs::write(&config_path, "optimize:\n  full_validation_project: try-cc\n").unwrap();
        let nested = temp.path().join("calendar");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = load_config_or_default(&nested).unwrap();
        assert_eq!(path, Some(config_path));
        assert_eq!(config.optimize.full_validation_project, "try-cc");
    }

    #[test]
    fn test_load_config_or_default_rejects_invalid_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("comm-taskgraph.yaml"),
            "optimize:\n  suite_dirs: [suite/base]\n",
        )
        .unwrap();

        assert!(load_config_or_default(temp.path()).is_err());
    }
}
