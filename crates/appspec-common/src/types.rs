//! Application and container model.
//!
//! Two families of types live here:
//!
//! - The **shorthand** model read from user files: [`AppSpec`],
//!   [`ShorthandContainer`], [`EnvFromSource`], [`ConfigMap`], [`Secret`].
//! - The **native** model handed to the orchestrator: [`Container`] and
//!   everything it is built from.
//!
//! Field names follow the Kubernetes wire format (`camelCase`), and empty
//! fields are omitted when serialized.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Kind of auxiliary resource an environment binding can point into.
///
/// Config maps and secrets occupy separate namespaces: a config map and a
/// secret may share a name without conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    /// A [`ConfigMap`].
    ConfigMap,
    /// A [`Secret`].
    Secret,
}

impl ResourceKind {
    /// Name of the reference field inside an `envFrom` entry.
    #[must_use]
    pub const fn ref_field(self) -> &'static str {
        match self {
            Self::ConfigMap => "configMapRef",
            Self::Secret => "secretRef",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigMap => write!(f, "configMap"),
            Self::Secret => write!(f, "secret"),
        }
    }
}

// ── Scalars ──────────────────────────────────────────────────────────

/// A YAML scalar accepted where Kubernetes expects a string.
///
/// Quantities such as `cpu: 1` or `cpu: 0.5` and values such as
/// `value: 8080` arrive as numbers; they are kept as their text form.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(s) => s,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn scalar_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = BTreeMap::<String, Scalar>::deserialize(deserializer)?;
    Ok(map.into_iter().map(|(k, v)| (k, v.into())).collect())
}

fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Into::into))
}

// ── Probes ───────────────────────────────────────────────────────────

/// Runs a command inside the container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecAction {
    /// Command line to execute.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
}

/// Issues an HTTP GET against the container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpGetAction {
    /// Request path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Target port, by number or by container port name.
    pub port: PortRef,
    /// Host to connect to; defaults to the pod IP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// `HTTP` or `HTTPS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

/// Opens a TCP connection to the container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcpSocketAction {
    /// Target port, by number or by container port name.
    pub port: PortRef,
    /// Host to connect to; defaults to the pod IP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

/// A port given either as a number or as a named container port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortRef {
    /// Numeric port.
    Number(u16),
    /// Named container port.
    Name(String),
}

impl Default for PortRef {
    fn default() -> Self {
        Self::Number(0)
    }
}

/// A container health check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    /// Command handler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<ExecAction>,
    /// HTTP handler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_get: Option<HttpGetAction>,
    /// TCP handler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_socket: Option<TcpSocketAction>,
    /// Seconds after start before the first check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_delay_seconds: Option<i32>,
    /// Seconds before a check times out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i32>,
    /// Seconds between checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_seconds: Option<i32>,
    /// Consecutive successes needed after a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_threshold: Option<i32>,
    /// Consecutive failures tolerated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<i32>,
}

// ── Environment ──────────────────────────────────────────────────────

/// Selects one key of a named config map or secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeySelector {
    /// Name of the referenced resource.
    pub name: String,
    /// Key within the resource.
    pub key: String,
}

/// Where an [`EnvVar`] takes its value from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSource {
    /// A key of a config map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_key_ref: Option<KeySelector>,
    /// A key of a secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<KeySelector>,
}

/// One environment binding: a literal value or a reference to a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    /// Variable name.
    pub name: String,
    /// Literal value.
    #[serde(
        default,
        deserialize_with = "optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
    /// Reference resolved by the platform at deploy time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<EnvVarSource>,
}

impl EnvVar {
    /// Creates a binding with a literal value.
    #[must_use]
    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            value_from: None,
        }
    }

    /// Creates a binding named `key` that references `key` in the given resource.
    #[must_use]
    pub fn key_ref(kind: ResourceKind, resource: impl Into<String>, key: impl Into<String>) -> Self {
        let key = key.into();
        let selector = KeySelector {
            name: resource.into(),
            key: key.clone(),
        };
        let source = match kind {
            ResourceKind::ConfigMap => EnvVarSource {
                config_map_key_ref: Some(selector),
                secret_key_ref: None,
            },
            ResourceKind::Secret => EnvVarSource {
                config_map_key_ref: None,
                secret_key_ref: Some(selector),
            },
        };
        Self {
            name: key,
            value: None,
            value_from: Some(source),
        }
    }

    /// Returns `(kind, resource name, key)` when this binding is a key reference.
    #[must_use]
    pub fn reference(&self) -> Option<(ResourceKind, &str, &str)> {
        let source = self.value_from.as_ref()?;
        if let Some(sel) = &source.config_map_key_ref {
            return Some((ResourceKind::ConfigMap, sel.name.as_str(), sel.key.as_str()));
        }
        source
            .secret_key_ref
            .as_ref()
            .map(|sel| (ResourceKind::Secret, sel.name.as_str(), sel.key.as_str()))
    }
}

/// Names a resource from an `envFrom` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    /// Name of the referenced config map or secret.
    pub name: String,
}

/// An import directive: expand every key of a config map and/or secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvFromSource {
    /// Config map to import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_ref: Option<ResourceRef>,
    /// Secret to import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<ResourceRef>,
}

impl EnvFromSource {
    /// Directive importing a single config map.
    #[must_use]
    pub fn config_map(name: impl Into<String>) -> Self {
        Self {
            config_map_ref: Some(ResourceRef { name: name.into() }),
            secret_ref: None,
        }
    }

    /// Directive importing a single secret.
    #[must_use]
    pub fn secret(name: impl Into<String>) -> Self {
        Self {
            config_map_ref: None,
            secret_ref: Some(ResourceRef { name: name.into() }),
        }
    }
}

// ── Containers ───────────────────────────────────────────────────────

/// A port exposed by a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    /// Optional port name, usable from probes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Port number inside the container.
    pub container_port: u16,
    /// `TCP`, `UDP` or `SCTP`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// Compute resource requests and limits (quantities kept as strings).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirements {
    /// Upper bounds, e.g. `memory: 128Mi`.
    #[serde(
        default,
        deserialize_with = "scalar_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub limits: BTreeMap<String, String>,
    /// Scheduling requests.
    #[serde(
        default,
        deserialize_with = "scalar_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub requests: BTreeMap<String, String>,
}

impl ResourceRequirements {
    /// Returns `true` when neither limits nor requests are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty() && self.requests.is_empty()
    }
}

/// A volume mounted into a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    /// Volume name.
    pub name: String,
    /// Mount path inside the container.
    pub mount_path: String,
    /// Mount read-only.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
}

/// The native container shape consumed by the orchestrator.
///
/// There is deliberately no `envFrom` field: every binding lives in
/// [`Container::env`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Container name, unique within the pod.
    #[serde(default)]
    pub name: String,
    /// Image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Entrypoint override.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    /// Arguments to the entrypoint.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    /// Exposed ports.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ContainerPort>,
    /// Ordered environment bindings; later entries win on the platform.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    /// Resource requests and limits.
    #[serde(default, skip_serializing_if = "ResourceRequirements::is_empty")]
    pub resources: ResourceRequirements,
    /// Volume mounts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_mounts: Vec<VolumeMount>,
    /// Restart-on-failure check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Probe>,
    /// Traffic-gating check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Probe>,
    /// `Always`, `IfNotPresent` or `Never`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,
}

/// A user-authored container before population.
///
/// Carries every native field plus the shorthand-only `health` probe and
/// `envFrom` import directives. Keys that belong to neither are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShorthandContainer {
    /// Native container fields.
    #[serde(flatten)]
    pub container: Container,
    /// Unified probe, expanded into both liveness and readiness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<Probe>,
    /// Bulk imports, expanded into individual bindings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env_from: Vec<EnvFromSource>,
}

// ── Auxiliary resources ──────────────────────────────────────────────

/// A named bundle of plain configuration values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMap {
    /// Name, unique among config maps of one application.
    #[serde(default)]
    pub name: String,
    /// Key/value pairs. Storage order carries no meaning.
    #[serde(default)]
    pub data: HashMap<String, String>,
}

/// A named bundle of credentials.
///
/// `data` holds base64-encoded values and `string_data` plain ones; both
/// key spaces expand the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    /// Name, unique among secrets of one application.
    #[serde(default)]
    pub name: String,
    /// Base64-encoded values.
    #[serde(default)]
    pub data: HashMap<String, String>,
    /// Plain-text values.
    #[serde(default)]
    pub string_data: HashMap<String, String>,
}

impl Secret {
    /// Iterates over the keys of both key spaces, `data` first.
    ///
    /// A key present in both spaces is yielded twice.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data
            .keys()
            .chain(self.string_data.keys())
            .map(String::as_str)
    }
}

/// One shorthand application file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSpec {
    /// Application name.
    #[serde(default)]
    pub name: String,
    /// Desired pod count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
    /// Extra labels applied to every generated object.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Containers of the pod, in declaration order.
    #[serde(default)]
    pub containers: Vec<ShorthandContainer>,
    /// Config maps available to `envFrom`.
    #[serde(default)]
    pub config_maps: Vec<ConfigMap>,
    /// Secrets available to `envFrom`.
    #[serde(default)]
    pub secrets: Vec<Secret>,
}
