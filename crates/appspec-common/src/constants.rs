//! Workspace-wide constants and defaults.

/// Binary name for the CLI.
pub const BIN_NAME: &str = "appspec";

/// Default application file read by `generate` when no `-f` is given.
pub const DEFAULT_APP_FILE: &str = "app.yml";

/// Replica count used when an application does not declare one.
pub const DEFAULT_REPLICAS: u32 = 1;

/// Label key that ties a deployment's selector to its pod template.
pub const APP_LABEL: &str = "app";

/// Environment variable overriding the output format.
pub const ENV_FORMAT: &str = "APPSPEC_FORMAT";

/// Environment variable overriding the output path.
pub const ENV_OUTPUT: &str = "APPSPEC_OUTPUT";

/// Log filter applied when neither `RUST_LOG` nor `--log-level` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Separator between documents in a YAML stream.
pub const YAML_DOCUMENT_SEPARATOR: &str = "---\n";
