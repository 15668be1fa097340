//! Population failures.
//!
//! Stage errors ([`ProbeError`], [`EnvFromError`]) know about one container.
//! [`PopulationError`] adds the container's position in the batch.

use std::fmt;

use appspec_common::types::ResourceKind;
use thiserror::Error;

/// Failure while unifying a container's probes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// `health` was declared together with an explicit probe.
    #[error("cannot define field 'health' and 'livenessProbe' or 'readinessProbe' together")]
    ConflictingProbeDeclaration,
}

/// Failure while expanding a container's `envFrom` directives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvFromError {
    /// A directive names a config map or secret that was not declared.
    #[error("envFrom[{directive}].{}.name: {kind} {name:?} not found", kind.ref_field())]
    UnresolvedReference {
        /// Kind of the missing resource.
        kind: ResourceKind,
        /// Name the directive asked for.
        name: String,
        /// Position of the directive in the container's `envFrom` list.
        directive: usize,
    },
}

/// Population stage that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Probe unification.
    Probes,
    /// `envFrom` expansion.
    EnvFrom,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Probes => write!(f, "health"),
            Self::EnvFrom => write!(f, "envFrom"),
        }
    }
}

/// Failure of a whole population run, tagged with the offending container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PopulationError {
    /// Probe unification failed.
    #[error("error converting 'health' to probes, app.containers[{container}]: {source}")]
    Probes {
        /// Index of the failing container in the batch.
        container: usize,
        /// Underlying cause.
        source: ProbeError,
    },

    /// `envFrom` expansion failed.
    #[error("error converting 'envFrom' to env, app.containers[{container}].{source}")]
    EnvFrom {
        /// Index of the failing container in the batch.
        container: usize,
        /// Underlying cause.
        source: EnvFromError,
    },
}

impl PopulationError {
    /// Index of the failing container in the batch.
    #[must_use]
    pub const fn container(&self) -> usize {
        match self {
            Self::Probes { container, .. } | Self::EnvFrom { container, .. } => *container,
        }
    }

    /// Stage that failed.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Probes { .. } => Stage::Probes,
            Self::EnvFrom { .. } => Stage::EnvFrom,
        }
    }
}
