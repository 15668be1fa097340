//! Output helpers for CLI commands.
//!
//! Writes rendered manifests to a file or stdout and formats the
//! one-line summaries printed by `validate`.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use appspec_common::types::AppSpec;

/// Writes `content` to `path`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error if the destination cannot be written.
pub fn emit(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = path {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = content.len(), "manifests written");
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}

/// Pluralizes `noun` for `count` by appending `s`.
#[must_use]
pub fn count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// One-line description of an application's declarations.
#[must_use]
pub fn summarize(app: &AppSpec) -> String {
    format!(
        "{}: {}, {}, {}",
        app.name,
        count(app.containers.len(), "container"),
        count(app.config_maps.len(), "config map"),
        count(app.secrets.len(), "secret"),
    )
}

#[cfg(test)]
mod tests {
    use appspec_common::types::{Secret, ShorthandContainer};

    use super::*;

    #[test]
    fn count_singular() {
        assert_eq!(count(1, "secret"), "1 secret");
    }

    #[test]
    fn count_plural() {
        assert_eq!(count(0, "container"), "0 containers");
        assert_eq!(count(3, "config map"), "3 config maps");
    }

    #[test]
    fn summarize_lists_all_kinds() {
        let app = AppSpec {
            name: "shop".into(),
            containers: vec![ShorthandContainer::default(), ShorthandContainer::default()],
            secrets: vec![Secret::default()],
            ..AppSpec::default()
        };
        assert_eq!(summarize(&app), "shop: 2 containers, 0 config maps, 1 secret");
    }

    #[test]
    fn emit_writes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.yaml");
        emit("kind: List\n", Some(&path)).expect("emit");
        let written = std::fs::read_to_string(&path).expect("read");
        assert_eq!(written, "kind: List\n");
    }
}
