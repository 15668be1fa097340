//! Batch population of shorthand containers.
//!
//! Each container goes through probe unification and then `envFrom`
//! expansion. The batch is atomic: the first failing container aborts the
//! run and no native container is returned.

use appspec_common::types::{ConfigMap, Container, Secret, ShorthandContainer};

use crate::env_from::{AuxSources, resolve_env_from};
use crate::error::{EnvFromError, PopulationError};
use crate::probes::unify_probes;

/// Resolves every shorthand container into its native form.
///
/// Inputs are left untouched and may be reused by the caller. The
/// environment of each output container holds the `envFrom`-derived
/// bindings first, then the container's own `env` entries in declared
/// order, so explicit entries override imported ones on the platform.
///
/// # Errors
///
/// Returns the first [`PopulationError`] encountered, tagged with the
/// index of the failing container.
pub fn populate(
    containers: &[ShorthandContainer],
    config_maps: &[ConfigMap],
    secrets: &[Secret],
) -> Result<Vec<Container>, PopulationError> {
    let sources = AuxSources::index(config_maps, secrets);

    containers
        .iter()
        .enumerate()
        .map(|(index, c)| populate_container(index, c.clone(), &sources))
        .collect()
}

fn populate_container(
    index: usize,
    c: ShorthandContainer,
    sources: &AuxSources<'_>,
) -> Result<Container, PopulationError> {
    let c = unify_probes(c).map_err(|source| PopulationError::Probes {
        container: index,
        source,
    })?;

    let c = populate_env_from(c, sources).map_err(|source| PopulationError::EnvFrom {
        container: index,
        source,
    })?;

    Ok(c.container)
}

fn populate_env_from(
    mut c: ShorthandContainer,
    sources: &AuxSources<'_>,
) -> Result<ShorthandContainer, EnvFromError> {
    let mut envs = resolve_env_from(&c.env_from, sources)?;
    c.env_from.clear();
    envs.append(&mut c.container.env);
    c.container.env = envs;
    Ok(c)
}
