//! Bundle retrieval from a Kubernetes ConfigMap.
//!
//! The bundle archive is stored as `binaryData` in a ConfigMap. This module
//! builds the cluster client (kubeconfig file when present, in-cluster
//! service account otherwise), fetches the ConfigMap, and hands back the
//! raw archive bytes.

use crate::cli::SourceArgs;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::Api;
use kube::Client;
use kube::Config;
use kube::config::KubeConfigOptions;
use kube::config::Kubeconfig;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// Default kubeconfig location, `~/.kube/config`.
#[must_use]
pub fn default_kubeconfig() -> PathBuf {
    home::home_dir()
        .unwrap_or_default()
        .join(".kube")
        .join("config")
}

/// Builds the client configuration.
///
/// Reads the kubeconfig file when it exists; otherwise falls back to the
/// in-cluster service account, which is the environment this tool normally
/// runs in.
async fn load_config(kubeconfig: Option<&Path>) -> Result<Config> {
    let path = kubeconfig.map_or_else(default_kubeconfig, Path::to_path_buf);

    if path.is_file() {
        let kubeconfig = Kubeconfig::read_from(&path)
            .with_context(|| format!("failed to read kubeconfig {}", path.display()))?;
        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .with_context(|| format!("invalid kubeconfig {}", path.display()))?;
        return Ok(config);
    }

    Config::incluster().with_context(|| {
        format!(
            "no kubeconfig at {} and in-cluster configuration unavailable",
            path.display()
        )
    })
}

/// Fetches the bundle archive bytes from the configured ConfigMap.
///
/// # Errors
///
/// Fails when the cluster is unreachable, the ConfigMap does not exist, or
/// its `binaryData` does not carry a non-empty payload under the key.
pub async fn fetch_bundle(args: &SourceArgs) -> Result<Vec<u8>> {
    let config = load_config(args.kubeconfig.as_deref()).await?;
    let client = Client::try_from(config).context("failed to build Kubernetes client")?;

    let api: Api<ConfigMap> = Api::namespaced(client, &args.namespace);
    let configmap = api.get(&args.configmap).await.with_context(|| {
        format!(
            "could not get ConfigMap {}/{}",
            args.namespace, args.configmap
        )
    })?;

    bundle_payload(&configmap, &args.key)
}

/// Pulls the archive bytes out of a ConfigMap's `binaryData`.
///
/// # Errors
///
/// Fails when `binaryData` is absent, the key is missing, or the payload is
/// empty.
pub fn bundle_payload(configmap: &ConfigMap, key: &str) -> Result<Vec<u8>> {
    let name = configmap.metadata.name.as_deref().unwrap_or("<unnamed>");

    let data = configmap
        .binary_data
        .as_ref()
        .with_context(|| format!("ConfigMap {name} has no binaryData"))?;
    let payload = data
        .get(key)
        .with_context(|| format!("ConfigMap {name} has no binaryData key '{key}'"))?;

    if payload.0.is_empty() {
        bail!("ConfigMap {name} binaryData key '{key}' is empty");
    }

    Ok(payload.0.clone())
}

/// Writes the archive bytes to `path` and returns the byte count.
///
/// # Errors
///
/// Fails when the file cannot be written.
pub fn write_archive(path: &Path, bytes: &[u8]) -> Result<u64> {
    fs::write(path, bytes)
        .with_context(|| format!("failed to write archive {}", path.display()))?;
    Ok(bytes.len() as u64)
}
