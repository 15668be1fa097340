//! `appspec generate` — Populate application files and print manifests.

use std::path::{Path, PathBuf};

use anyhow::Context;
use appspec_common::config::{GenerateConfig, OutputFormat};
use appspec_common::constants::{DEFAULT_APP_FILE, ENV_FORMAT, ENV_OUTPUT};
use appspec_common::types::{AppSpec, Container};
use clap::Args;

use crate::{loader, manifest, output};

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Application files to process; repeat for several applications.
    #[arg(short = 'f', long = "file", default_value = DEFAULT_APP_FILE)]
    pub files: Vec<PathBuf>,

    /// Manifest format: yaml or json.
    #[arg(long, env = ENV_FORMAT, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout.
    #[arg(short, long, env = ENV_OUTPUT)]
    pub output: Option<PathBuf>,

    /// Skip structural checks before population.
    #[arg(long)]
    pub skip_validation: bool,
}

impl GenerateArgs {
    fn config(&self) -> GenerateConfig {
        GenerateConfig {
            format: self.format,
            output: self.output.clone(),
            skip_validation: self.skip_validation,
        }
    }
}

/// Executes the `generate` command.
///
/// Every file is loaded and populated before anything is written, so a
/// failure in any file produces no output at all.
///
/// # Errors
///
/// Returns an error if any file cannot be loaded, validated, or populated,
/// or if the output cannot be written.
pub fn execute(args: GenerateArgs) -> anyhow::Result<()> {
    let config = args.config();
    tracing::info!(files = args.files.len(), format = %config.format, "generating manifests");

    let mut manifests = Vec::new();
    for path in &args.files {
        let (app, containers) = populate_file(path, config.skip_validation)?;
        manifests.extend(manifest::render_app(&app, containers));
    }

    let rendered = match config.format {
        OutputFormat::Yaml => manifest::to_yaml(&manifests)?,
        OutputFormat::Json => manifest::to_json(&manifests)?,
    };
    output::emit(&rendered, config.output.as_deref())
}

/// Loads one application file, validates it, and populates its containers.
///
/// # Errors
///
/// Returns an error naming the file if any step fails.
pub fn populate_file(path: &Path, skip_validation: bool) -> anyhow::Result<(AppSpec, Vec<Container>)> {
    let app = loader::load_app(path).with_context(|| format!("failed to load {}", path.display()))?;

    if skip_validation {
        tracing::warn!(path = %path.display(), "skipping validation");
    } else {
        loader::validate(&app).with_context(|| format!("invalid application in {}", path.display()))?;
    }

    let containers = appspec_populate::populate(&app.containers, &app.config_maps, &app.secrets)
        .with_context(|| format!("failed to populate {}", path.display()))?;

    if tracing::enabled!(tracing::Level::DEBUG) {
        let dump = serde_json::to_string_pretty(&containers)?;
        tracing::debug!(app = %app.name, "containers after population: {dump}");
    }

    Ok((app, containers))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const APP: &str = r"
name: shop
containers:
  - name: web
    image: shop:1
    health:
      tcpSocket:
        port: 8080
    envFrom:
      - configMapRef:
          name: shop
    env:
      - name: MODE
        value: prod
configMaps:
  - data:
      MODE: dev
";

    fn write_app(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(content.as_bytes()).expect("write");
        path
    }

    #[test]
    fn populate_file_resolves_defaults_and_env() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_app(dir.path(), "app.yml", APP);

        let (app, containers) = populate_file(&path, false).expect("should populate");
        assert_eq!(app.config_maps[0].name, "shop");
        let env: Vec<&str> = containers[0].env.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(env, vec!["MODE", "MODE"]);
        assert!(containers[0].liveness_probe.is_some());
    }

    #[test]
    fn populate_file_error_names_file_and_container() {
        let dir = tempfile::tempdir().expect("tempdir");
        let broken = APP.replace("          name: shop", "          name: other");
        let path = write_app(dir.path(), "broken.yml", &broken);

        let err = populate_file(&path, false).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("broken.yml"), "got: {msg}");
        assert!(msg.contains("app.containers[0].envFrom[0].configMapRef.name"), "got: {msg}");
    }

    #[test]
    fn skip_validation_still_populates() {
        let dir = tempfile::tempdir().expect("tempdir");
        let unnamed = "containers:\n  - image: busybox\n";
        let path = write_app(dir.path(), "unnamed.yml", unnamed);

        assert!(populate_file(&path, false).is_err());
        let (_, containers) = populate_file(&path, true).expect("should populate");
        assert_eq!(containers[0].image.as_deref(), Some("busybox"));
    }

    #[test]
    fn execute_writes_json_list() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_app(dir.path(), "app.yml", APP);
        let out = dir.path().join("out.json");

        execute(GenerateArgs {
            files: vec![path],
            format: OutputFormat::Json,
            output: Some(out.clone()),
            skip_validation: false,
        })
        .expect("should generate");

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).expect("read")).expect("json");
        let items = value["items"].as_array().expect("items");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["kind"], "ConfigMap");
    }

    #[test]
    fn execute_writes_nothing_when_any_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = write_app(dir.path(), "good.yml", APP);
        let bad = write_app(dir.path(), "bad.yml", "name: bad\ncontainers: []\n");
        let out = dir.path().join("out.yaml");

        let result = execute(GenerateArgs {
            files: vec![good, bad],
            format: OutputFormat::Yaml,
            output: Some(out.clone()),
            skip_validation: false,
        });
        assert!(result.is_err());
        assert!(!out.exists());
    }
}
