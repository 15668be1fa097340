//! Health probe unification.
//!
//! A shorthand container either declares one `health` probe, which stands
//! for both liveness and readiness, or declares those two explicitly.
//! Mixing the styles is rejected rather than merged.

use appspec_common::types::ShorthandContainer;

use crate::error::ProbeError;

/// Expands `health` into `livenessProbe` and `readinessProbe`.
///
/// Containers without `health` pass through unchanged.
///
/// # Errors
///
/// Returns [`ProbeError::ConflictingProbeDeclaration`] if `health` is set
/// alongside either explicit probe.
pub fn unify_probes(mut c: ShorthandContainer) -> Result<ShorthandContainer, ProbeError> {
    let explicit = c.container.liveness_probe.is_some() || c.container.readiness_probe.is_some();
    match c.health.take() {
        Some(_) if explicit => Err(ProbeError::ConflictingProbeDeclaration),
        Some(health) => {
            c.container.liveness_probe = Some(health.clone());
            c.container.readiness_probe = Some(health);
            Ok(c)
        }
        None => Ok(c),
    }
}

#[cfg(test)]
mod tests {
    use appspec_common::types::{ExecAction, HttpGetAction, PortRef, Probe};

    use super::*;

    fn http_probe(path: &str) -> Probe {
        Probe {
            http_get: Some(HttpGetAction {
                path: Some(path.into()),
                port: PortRef::Number(8080),
                ..HttpGetAction::default()
            }),
            period_seconds: Some(5),
            ..Probe::default()
        }
    }

    #[test]
    fn health_fills_both_probes() {
        let c = ShorthandContainer {
            health: Some(http_probe("/healthz")),
            ..ShorthandContainer::default()
        };
        let out = unify_probes(c).expect("should unify");
        assert!(out.health.is_none());
        assert_eq!(out.container.liveness_probe, Some(http_probe("/healthz")));
        assert_eq!(out.container.readiness_probe, Some(http_probe("/healthz")));
    }

    #[test]
    fn health_with_liveness_conflicts() {
        let mut c = ShorthandContainer {
            health: Some(http_probe("/healthz")),
            ..ShorthandContainer::default()
        };
        c.container.liveness_probe = Some(http_probe("/live"));
        assert_eq!(unify_probes(c), Err(ProbeError::ConflictingProbeDeclaration));
    }

    #[test]
    fn health_with_readiness_conflicts() {
        let mut c = ShorthandContainer {
            health: Some(http_probe("/healthz")),
            ..ShorthandContainer::default()
        };
        c.container.readiness_probe = Some(Probe {
            exec: Some(ExecAction {
                command: vec!["true".into()],
            }),
            ..Probe::default()
        });
        assert_eq!(unify_probes(c), Err(ProbeError::ConflictingProbeDeclaration));
    }

    #[test]
    fn explicit_probes_pass_through() {
        let mut c = ShorthandContainer::default();
        c.container.liveness_probe = Some(http_probe("/live"));
        c.container.readiness_probe = Some(http_probe("/ready"));
        let out = unify_probes(c.clone()).expect("should pass");
        assert_eq!(out, c);
    }

    #[test]
    fn no_probes_pass_through() {
        let c = ShorthandContainer::default();
        let out = unify_probes(c.clone()).expect("should pass");
        assert_eq!(out, c);
        assert!(out.container.liveness_probe.is_none());
    }
}
