//! Assembly of the sections shown by the data page.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::context::AppContext;
use crate::sources::{basic, build_info, env, podinfo};

/// Key/value pairs of a section. Keys are sorted so that rendering unchanged
/// data twice gives the same output.
pub type SectionData = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub data: SectionData,
}

impl Section {
    pub fn new(title: impl Into<String>, data: SectionData) -> Self {
        Self {
            title: title.into(),
            data,
        }
    }
}

pub const TITLE_BASIC: &str = "Basic";
pub const TITLE_POD_INFO: &str = "Pod Info";
pub const TITLE_CONFIG_MAPS: &str = "ConfigMap Data";
pub const TITLE_API_INFO: &str = "API Info";
pub const TITLE_BUILD_INFO: &str = "Binary Version";
pub const TITLE_ENVIRONMENT: &str = "Environment Variables";

async fn config_map_section(ctx: &AppContext) -> SectionData {
    let refs = ctx.config.configmap_refs();
    match &ctx.cluster {
        Some(cluster) if !refs.is_empty() => cluster.config_map_data(&refs).await,
        _ => SectionData::new(),
    }
}

async fn api_info_section(ctx: &AppContext) -> SectionData {
    match (&ctx.cluster, ctx.config.pod_namespace()) {
        (Some(cluster), Some(namespace)) => cluster.self_pod_info(&ctx.pod_name, namespace).await,
        _ => SectionData::new(),
    }
}

/// Collect every section, in display order. Sections without data are kept.
pub async fn assemble(ctx: &AppContext) -> Vec<Section> {
    vec![
        Section::new(
            TITLE_BASIC,
            basic::basic_info(&ctx.pod_name, ctx.started_at),
        ),
        Section::new(
            TITLE_POD_INFO,
            podinfo::read_podinfo_dir(&ctx.config.podinfo_path()),
        ),
        Section::new(TITLE_CONFIG_MAPS, config_map_section(ctx).await),
        Section::new(TITLE_API_INFO, api_info_section(ctx).await),
        Section::new(TITLE_BUILD_INFO, build_info::build_info()),
        Section::new(TITLE_ENVIRONMENT, env::environment()),
    ]
}
