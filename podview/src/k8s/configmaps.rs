use std::fmt;

use k8s_openapi::api::core::v1::ConfigMap;

use crate::sections::SectionData;

/// A reference to a ConfigMap, written as `namespace/name` or a bare `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigMapRef {
    /// The reference as it was configured.
    pub raw: String,
    pub namespace: String,
    pub name: String,
}

impl ConfigMapRef {
    /// Bare names are resolved against `default_namespace`; an unresolvable
    /// namespace is left empty and reported at lookup time.
    pub fn parse(raw: &str, default_namespace: Option<&str>) -> Self {
        let (namespace, name) = match raw.split_once('/') {
            Some((namespace, name)) => (namespace.to_string(), name.to_string()),
            None => (
                default_namespace.unwrap_or_default().to_string(),
                raw.to_string(),
            ),
        };
        Self {
            raw: raw.to_string(),
            namespace,
            name,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.namespace.is_empty() && !self.name.is_empty()
    }
}

impl fmt::Display for ConfigMapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

pub async fn get_config_map(
    kube_client: kube::Client,
    name: &str,
    namespace: &str,
) -> anyhow::Result<ConfigMap> {
    let config_maps: kube::Api<ConfigMap> = kube::Api::namespaced(kube_client, namespace);
    Ok(config_maps.get(name).await?)
}

/// Fetch every referenced ConfigMap and merge their data into one section.
/// Failures are recorded under `error:<index>` so that one bad reference does
/// not hide the others. Later ConfigMaps win on duplicate keys.
pub async fn get_config_maps(kube_client: kube::Client, refs: &[ConfigMapRef]) -> SectionData {
    let mut data = SectionData::new();

    for (i, reference) in refs.iter().enumerate() {
        if !reference.is_complete() {
            data.insert(
                format!("error:{i}"),
                format!("error: missing namespace or name for {:?}", reference.raw),
            );
            continue;
        }

        match get_config_map(kube_client.clone(), &reference.name, &reference.namespace).await {
            Ok(config_map) => {
                data.extend(config_map.data.unwrap_or_default());
            }
            Err(err) => {
                tracing::debug!("ConfigMap lookup {} failed: {:?}", reference, err);
                data.insert(format!("error:{i}"), err.to_string());
            }
        }
    }

    data
}
