//! Loading and static validation of application files.
//!
//! Reads a YAML application file, fills in the defaults the file format
//! allows to be omitted, and checks structural rules before population.

use std::collections::HashSet;
use std::path::Path;

use appspec_common::error::{AppSpecError, Result};
use appspec_common::types::AppSpec;

/// Reads and parses an application file, then applies defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid
/// application document.
pub fn load_app(path: &Path) -> Result<AppSpec> {
    tracing::info!(path = %path.display(), "loading application file");
    let content = std::fs::read_to_string(path).map_err(|source| AppSpecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut app = parse_app(&content)?;
    apply_defaults(&mut app);
    Ok(app)
}

/// Parses application YAML without touching defaults.
///
/// # Errors
///
/// Returns an error if the input is not a valid application document.
pub fn parse_app(input: &str) -> Result<AppSpec> {
    Ok(serde_yaml::from_str(input)?)
}

/// Names unnamed config maps and secrets after the application.
pub fn apply_defaults(app: &mut AppSpec) {
    let name = app.name.clone();
    for cm in app.config_maps.iter_mut().filter(|cm| cm.name.is_empty()) {
        tracing::debug!(app = %name, "config map without name takes the application name");
        cm.name.clone_from(&name);
    }
    for secret in app.secrets.iter_mut().filter(|s| s.name.is_empty()) {
        tracing::debug!(app = %name, "secret without name takes the application name");
        secret.name.clone_from(&name);
    }
}

/// Validates an application for structural correctness.
///
/// # Checks performed
///
/// 1. The application has a name.
/// 2. At least one container is declared, and every container is named.
/// 3. No duplicate container names.
/// 4. No duplicate config map names, and no duplicate secret names.
///
/// Whether `envFrom` references resolve is left to population.
///
/// # Errors
///
/// Returns an error if any check fails.
pub fn validate(app: &AppSpec) -> Result<()> {
    tracing::info!(app = %app.name, "validating application");
    check_app_name(app)?;
    check_containers(app)?;
    check_unique("config map", app.config_maps.iter().map(|cm| cm.name.as_str()))?;
    check_unique("secret", app.secrets.iter().map(|s| s.name.as_str()))?;
    Ok(())
}

fn check_app_name(app: &AppSpec) -> Result<()> {
    if app.name.is_empty() {
        return Err(AppSpecError::config("field 'name' is required"));
    }
    Ok(())
}

fn check_containers(app: &AppSpec) -> Result<()> {
    if app.containers.is_empty() {
        return Err(AppSpecError::config(format!(
            "application \"{}\" declares no containers",
            app.name
        )));
    }
    for (i, c) in app.containers.iter().enumerate() {
        if c.container.name.is_empty() {
            return Err(AppSpecError::config(format!(
                "app.containers[{i}].name is required"
            )));
        }
    }
    check_unique(
        "container",
        app.containers.iter().map(|c| c.container.name.as_str()),
    )
}

fn check_unique<'a>(kind: &str, names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(AppSpecError::config(format!(
                "duplicate {kind} name: \"{name}\""
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use appspec_common::types::{ConfigMap, Secret, ShorthandContainer};

    use super::*;

    fn app_with(names: &[&str]) -> AppSpec {
        AppSpec {
            name: "shop".into(),
            containers: names
                .iter()
                .map(|n| {
                    let mut c = ShorthandContainer::default();
                    c.container.name = (*n).into();
                    c
                })
                .collect(),
            ..AppSpec::default()
        }
    }

    #[test]
    fn load_app_reads_file_and_defaults_names() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            "name: shop\ncontainers:\n  - name: web\n    image: shop:1\nconfigMaps:\n  - data:\n      A: \"1\"\nsecrets:\n  - stringData:\n      B: two\n"
        )
        .expect("write");

        let app = load_app(file.path()).expect("should load");
        assert_eq!(app.containers.len(), 1);
        assert_eq!(app.config_maps[0].name, "shop");
        assert_eq!(app.secrets[0].name, "shop");
    }

    #[test]
    fn load_app_accepts_numeric_resource_quantities() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            "name: shop\ncontainers:\n  - name: web\n    resources:\n      limits:\n        cpu: 1\n        memory: 128Mi\nconfigMaps:\n  - data:\n      PORT: 8080\n"
        )
        .expect("write");

        let app = load_app(file.path()).expect("should load");
        let limits = &app.containers[0].container.resources.limits;
        assert_eq!(limits.get("cpu").map(String::as_str), Some("1"));
        assert_eq!(limits.get("memory").map(String::as_str), Some("128Mi"));
        assert_eq!(
            app.config_maps[0].data.get("PORT").map(String::as_str),
            Some("8080")
        );
    }

    #[test]
    fn load_app_missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.yml");
        let err = load_app(&path).unwrap_err();
        assert!(matches!(err, AppSpecError::Io { .. }));
        assert!(err.to_string().contains("absent.yml"), "got: {err}");
    }

    #[test]
    fn parse_app_rejects_malformed_yaml() {
        let err = parse_app("containers: [ {name: web").unwrap_err();
        assert!(matches!(err, AppSpecError::Yaml { .. }));
    }

    #[test]
    fn named_resources_keep_their_names() {
        let mut app = app_with(&["web"]);
        app.config_maps.push(ConfigMap {
            name: "custom".into(),
            ..ConfigMap::default()
        });
        apply_defaults(&mut app);
        assert_eq!(app.config_maps[0].name, "custom");
    }

    #[test]
    fn validate_valid_app_succeeds() {
        assert!(validate(&app_with(&["web", "worker"])).is_ok());
    }

    #[test]
    fn validate_missing_app_name_fails() {
        let mut app = app_with(&["web"]);
        app.name.clear();
        let msg = validate(&app).unwrap_err().to_string();
        assert!(msg.contains("'name' is required"), "got: {msg}");
    }

    #[test]
    fn validate_no_containers_fails() {
        let msg = validate(&app_with(&[])).unwrap_err().to_string();
        assert!(msg.contains("declares no containers"), "got: {msg}");
    }

    #[test]
    fn validate_unnamed_container_fails() {
        let msg = validate(&app_with(&["web", ""])).unwrap_err().to_string();
        assert!(msg.contains("app.containers[1].name"), "got: {msg}");
    }

    #[test]
    fn validate_duplicate_container_fails() {
        let msg = validate(&app_with(&["web", "web"])).unwrap_err().to_string();
        assert!(msg.contains("duplicate container name"), "got: {msg}");
    }

    #[test]
    fn validate_duplicate_secret_fails() {
        let mut app = app_with(&["web"]);
        app.secrets = vec![
            Secret {
                name: "creds".into(),
                ..Secret::default()
            },
            Secret {
                name: "creds".into(),
                ..Secret::default()
            },
        ];
        let msg = validate(&app).unwrap_err().to_string();
        assert!(msg.contains("duplicate secret name: \"creds\""), "got: {msg}");
    }

    #[test]
    fn validate_allows_config_map_and_secret_with_same_name() {
        let mut app = app_with(&["web"]);
        app.config_maps.push(ConfigMap {
            name: "shop".into(),
            ..ConfigMap::default()
        });
        app.secrets.push(Secret {
            name: "shop".into(),
            ..Secret::default()
        });
        assert!(validate(&app).is_ok());
    }

    #[test]
    fn two_unnamed_config_maps_collide_after_defaults() {
        let mut app = app_with(&["web"]);
        app.config_maps = vec![ConfigMap::default(), ConfigMap::default()];
        apply_defaults(&mut app);
        let msg = validate(&app).unwrap_err().to_string();
        assert!(msg.contains("duplicate config map name: \"shop\""), "got: {msg}");
    }
}
