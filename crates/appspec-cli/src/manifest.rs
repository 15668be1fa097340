//! Kubernetes manifest rendering.
//!
//! Wraps populated containers in a `Deployment` and emits one `ConfigMap`
//! and one `Secret` object per declared resource.

use std::collections::BTreeMap;

use appspec_common::constants::{APP_LABEL, DEFAULT_REPLICAS, YAML_DOCUMENT_SEPARATOR};
use appspec_common::error::Result;
use appspec_common::types::{AppSpec, ConfigMap, Container, Secret};
use serde::Serialize;

/// Name and labels of a generated object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Object name.
    pub name: String,
    /// Object labels.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Label selector matching the pod template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    /// Labels a pod must carry.
    pub match_labels: BTreeMap<String, String>,
}

/// Pod contents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    /// Populated containers.
    pub containers: Vec<Container>,
}

/// Pod template of a deployment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplateSpec {
    /// Pod labels.
    pub metadata: ObjectMeta,
    /// Pod contents.
    pub spec: PodSpec,
}

/// Desired state of a deployment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSpec {
    /// Pod count.
    pub replicas: u32,
    /// Pod selector.
    pub selector: LabelSelector,
    /// Pod template.
    pub template: PodTemplateSpec,
}

/// `apps/v1` `Deployment`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Always `apps/v1`.
    pub api_version: &'static str,
    /// Always `Deployment`.
    pub kind: &'static str,
    /// Object metadata.
    pub metadata: ObjectMeta,
    /// Desired state.
    pub spec: DeploymentSpec,
}

/// `v1` `ConfigMap`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapManifest {
    /// Always `v1`.
    pub api_version: &'static str,
    /// Always `ConfigMap`.
    pub kind: &'static str,
    /// Object metadata.
    pub metadata: ObjectMeta,
    /// Values, sorted by key.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

/// `v1` `Secret`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretManifest {
    /// Always `v1`.
    pub api_version: &'static str,
    /// Always `Secret`.
    pub kind: &'static str,
    /// Object metadata.
    pub metadata: ObjectMeta,
    /// Base64 values, sorted by key.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
    /// Plain values, sorted by key.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub string_data: BTreeMap<String, String>,
}

/// Any generated object.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Manifest {
    /// Workload.
    Deployment(Deployment),
    /// Configuration.
    ConfigMap(ConfigMapManifest),
    /// Credentials.
    Secret(SecretManifest),
}

/// `v1` `List` wrapping every object for JSON output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct List<'a> {
    api_version: &'static str,
    kind: &'static str,
    items: &'a [Manifest],
}

/// Builds the manifests for one application from its populated containers.
///
/// The deployment comes first, then config maps and secrets in declared order.
pub fn render_app(app: &AppSpec, containers: Vec<Container>) -> Vec<Manifest> {
    let labels = app_labels(app);
    let meta = |name: &str| ObjectMeta {
        name: name.to_owned(),
        labels: labels.clone(),
    };

    let deployment = Deployment {
        api_version: "apps/v1",
        kind: "Deployment",
        metadata: meta(&app.name),
        spec: DeploymentSpec {
            replicas: app.replicas.unwrap_or(DEFAULT_REPLICAS),
            selector: LabelSelector {
                match_labels: labels.clone(),
            },
            template: PodTemplateSpec {
                metadata: meta(&app.name),
                spec: PodSpec { containers },
            },
        },
    };

    let mut manifests = vec![Manifest::Deployment(deployment)];
    manifests.extend(
        app.config_maps
            .iter()
            .map(|cm| Manifest::ConfigMap(config_map_manifest(cm, meta(&cm.name)))),
    );
    manifests.extend(
        app.secrets
            .iter()
            .map(|s| Manifest::Secret(secret_manifest(s, meta(&s.name)))),
    );
    manifests
}

fn app_labels(app: &AppSpec) -> BTreeMap<String, String> {
    let mut labels = app.labels.clone();
    let _ = labels
        .entry(APP_LABEL.to_owned())
        .or_insert_with(|| app.name.clone());
    labels
}

fn config_map_manifest(cm: &ConfigMap, metadata: ObjectMeta) -> ConfigMapManifest {
    ConfigMapManifest {
        api_version: "v1",
        kind: "ConfigMap",
        metadata,
        data: sorted(&cm.data),
    }
}

fn secret_manifest(secret: &Secret, metadata: ObjectMeta) -> SecretManifest {
    SecretManifest {
        api_version: "v1",
        kind: "Secret",
        metadata,
        data: sorted(&secret.data),
        string_data: sorted(&secret.string_data),
    }
}

fn sorted(map: &std::collections::HashMap<String, String>) -> BTreeMap<String, String> {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

/// Serializes manifests as a multi-document YAML stream.
///
/// # Errors
///
/// Returns an error if a manifest cannot be serialized.
pub fn to_yaml(manifests: &[Manifest]) -> Result<String> {
    let docs = manifests
        .iter()
        .map(serde_yaml::to_string)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(docs.join(YAML_DOCUMENT_SEPARATOR))
}

/// Serializes manifests as a single pretty-printed JSON `List`.
///
/// # Errors
///
/// Returns an error if a manifest cannot be serialized.
pub fn to_json(manifests: &[Manifest]) -> Result<String> {
    let list = List {
        api_version: "v1",
        kind: "List",
        items: manifests,
    };
    let mut out = serde_json::to_string_pretty(&list)?;
    out.push('\n');
    Ok(out)
}
