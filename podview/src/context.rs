use std::{sync::Arc, time::Instant};

use crate::{config::Config, k8s::ClusterApi, render::Renderer};

/// Everything a request handler needs. Built once before the server starts
/// and never mutated afterwards.
pub struct AppContext {
    pub config: Config,
    pub renderer: Renderer,
    pub cluster: Option<ClusterApi>,
    pub pod_name: String,
    pub started_at: Instant,
}

pub type SharedContext = Arc<AppContext>;

impl AppContext {
    pub fn new(config: Config, renderer: Renderer, cluster: Option<ClusterApi>) -> Self {
        let pod_name = config.pod_name();
        Self {
            config,
            renderer,
            cluster,
            pod_name,
            started_at: Instant::now(),
        }
    }

    pub fn into_shared(self) -> SharedContext {
        Arc::new(self)
    }
}
