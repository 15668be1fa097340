//! `envFrom` expansion.
//!
//! Each import directive is replaced by one environment binding per key of
//! the referenced config map or secret. Bindings reference the key rather
//! than copying its value; the platform resolves values at deploy time.
//!
//! Output order is fixed: directive blocks keep their declaration order,
//! a config map block precedes a secret block within one directive, and
//! keys inside a block are sorted.

use std::collections::HashMap;

use appspec_common::types::{ConfigMap, EnvFromSource, EnvVar, ResourceKind, Secret};

use crate::error::EnvFromError;

/// Name-indexed view of the config maps and secrets declared in one batch.
///
/// Built per population run and dropped with it. When a name is declared
/// twice within a kind, the first declaration is used.
#[derive(Debug, Default)]
pub struct AuxSources<'a> {
    config_maps: HashMap<&'a str, &'a ConfigMap>,
    secrets: HashMap<&'a str, &'a Secret>,
}

impl<'a> AuxSources<'a> {
    /// Indexes the given resources by name.
    #[must_use]
    pub fn index(config_maps: &'a [ConfigMap], secrets: &'a [Secret]) -> Self {
        let mut sources = Self::default();
        for cm in config_maps {
            let _ = sources.config_maps.entry(cm.name.as_str()).or_insert(cm);
        }
        for secret in secrets {
            let _ = sources.secrets.entry(secret.name.as_str()).or_insert(secret);
        }
        sources
    }

    /// Looks up a config map by exact name.
    #[must_use]
    pub fn config_map(&self, name: &str) -> Option<&'a ConfigMap> {
        self.config_maps.get(name).copied()
    }

    /// Looks up a secret by exact name.
    #[must_use]
    pub fn secret(&self, name: &str) -> Option<&'a Secret> {
        self.secrets.get(name).copied()
    }
}

/// Expands `directives` into explicit key-reference bindings.
///
/// # Errors
///
/// Returns [`EnvFromError::UnresolvedReference`] for the first directive
/// naming a config map or secret absent from `sources`.
pub fn resolve_env_from(
    directives: &[EnvFromSource],
    sources: &AuxSources<'_>,
) -> Result<Vec<EnvVar>, EnvFromError> {
    let mut envs = Vec::new();

    for (directive, entry) in directives.iter().enumerate() {
        if let Some(cm_ref) = &entry.config_map_ref {
            let cm = sources.config_map(&cm_ref.name).ok_or_else(|| {
                EnvFromError::UnresolvedReference {
                    kind: ResourceKind::ConfigMap,
                    name: cm_ref.name.clone(),
                    directive,
                }
            })?;
            expand_keys(
                &mut envs,
                ResourceKind::ConfigMap,
                &cm.name,
                cm.data.keys().map(String::as_str),
            );
        }

        if let Some(secret_ref) = &entry.secret_ref {
            let secret = sources.secret(&secret_ref.name).ok_or_else(|| {
                EnvFromError::UnresolvedReference {
                    kind: ResourceKind::Secret,
                    name: secret_ref.name.clone(),
                    directive,
                }
            })?;
            expand_keys(&mut envs, ResourceKind::Secret, &secret.name, secret.keys());
        }
    }

    Ok(envs)
}

fn expand_keys<'k>(
    envs: &mut Vec<EnvVar>,
    kind: ResourceKind,
    resource: &str,
    keys: impl Iterator<Item = &'k str>,
) {
    let mut keys: Vec<&str> = keys.collect();
    keys.sort_unstable();
    envs.extend(keys.into_iter().map(|key| EnvVar::key_ref(kind, resource, key)));
}
