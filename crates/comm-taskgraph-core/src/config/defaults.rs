//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "comm-taskgraph.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "comm-taskgraph.yaml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".comm-taskgraph.yaml";

/// Graph configuration shipped inside the source tree
pub const TASKCLUSTER_CONFIG_FILE: &str = "taskcluster/ci/config.yml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ALT_CONFIG_FILE,
        TASKCLUSTER_CONFIG_FILE,
    ]
}
