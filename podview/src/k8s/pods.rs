use chrono::SecondsFormat;
use k8s_openapi::api::core::v1::Pod;

use crate::sections::SectionData;

pub async fn get_pod(
    kube_client: kube::Client,
    name: &str,
    namespace: &str,
) -> anyhow::Result<Pod> {
    let pods: kube::Api<Pod> = kube::Api::namespaced(kube_client, namespace);
    Ok(pods.get(name).await?)
}

/// Project the fields of a pod worth showing on the status page.
/// Only the first container (and its status) is considered.
pub fn pod_summary(pod: &Pod) -> SectionData {
    let mut data = SectionData::new();

    let spec = pod.spec.as_ref();
    if let Some(container) = spec.and_then(|spec| spec.containers.first()) {
        data.insert(
            "spec.image".to_string(),
            container.image.clone().unwrap_or_default(),
        );
    }

    let status = pod.status.as_ref();
    let first_status = status
        .and_then(|status| status.container_statuses.as_ref())
        .and_then(|statuses| statuses.first());
    if let Some(container_status) = first_status {
        data.insert("status.image".to_string(), container_status.image.clone());
        data.insert(
            "status.imageID".to_string(),
            container_status.image_id.clone(),
        );
        data.insert(
            "restartCount".to_string(),
            container_status.restart_count.to_string(),
        );
        let start_time = status
            .and_then(|status| status.start_time.as_ref())
            .map(|time| time.0.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default();
        data.insert("startTime".to_string(), start_time);
    }

    data.insert(
        "node".to_string(),
        spec.and_then(|spec| spec.node_name.clone())
            .unwrap_or_default(),
    );

    data
}
