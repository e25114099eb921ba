/// This module is responsible for interfacing with Kubernetes.
pub mod configmaps;
pub mod pods;

use std::env;

use anyhow::Context as _;

use crate::sections::SectionData;

pub mod consts {
    pub const ENV_KUBERNETES_SERVICE_HOST: &str = "KUBERNETES_SERVICE_HOST";
    pub const ENV_KUBERNETES_SERVICE_PORT: &str = "KUBERNETES_SERVICE_PORT";
}

/// Whether the standard in-cluster service discovery variables are both set.
pub fn in_cluster_env_present() -> bool {
    [
        consts::ENV_KUBERNETES_SERVICE_HOST,
        consts::ENV_KUBERNETES_SERVICE_PORT,
    ]
    .iter()
    .all(|name| env::var(name).map_or(false, |v| !v.is_empty()))
}

/// Read-only handle on the Kubernetes API, shared by all requests.
#[derive(Clone)]
pub struct ClusterApi {
    client: kube::Client,
}

impl ClusterApi {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    /// Build a client from the service account mounted into the pod.
    /// Must be called from within a tokio runtime.
    pub fn try_in_cluster() -> anyhow::Result<Self> {
        let config =
            kube::Config::incluster().context("Failed loading in-cluster kubernetes config")?;
        let client =
            kube::Client::try_from(config).context("Failed creating kubernetes client")?;
        Ok(Self::new(client))
    }

    /// Returns a client when running inside a cluster, or `None` when the
    /// discovery variables are missing or the client cannot be built.
    pub fn from_env() -> Option<Self> {
        if !in_cluster_env_present() {
            tracing::info!("Not running in a cluster, API lookups are disabled");
            return None;
        }

        match Self::try_in_cluster() {
            Ok(api) => Some(api),
            Err(err) => {
                tracing::warn!("Kubernetes API lookups are disabled: {:?}", err);
                None
            }
        }
    }

    pub fn client(&self) -> kube::Client {
        self.client.clone()
    }

    /// Summary of this pod's own spec and status.
    pub async fn self_pod_info(&self, name: &str, namespace: &str) -> SectionData {
        match pods::get_pod(self.client(), name, namespace).await {
            Ok(pod) => pods::pod_summary(&pod),
            Err(err) => {
                tracing::debug!("Pod lookup {}/{} failed: {:?}", namespace, name, err);
                SectionData::from([("error".to_string(), format!("pods error: {err}"))])
            }
        }
    }

    /// Data of all referenced ConfigMaps, merged into one section.
    pub async fn config_map_data(&self, refs: &[configmaps::ConfigMapRef]) -> SectionData {
        configmaps::get_config_maps(self.client(), refs).await
    }
}
