//! This module defines the runtime configuration.
//!
//! Every option can be given as a flag or through the environment variable of
//! the same meaning, which is how the service is normally configured inside a
//! pod spec.

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use crate::k8s::configmaps::ConfigMapRef;
use crate::sources::podinfo::DEFAULT_PODINFO_PATH;

#[derive(Parser, Debug, Clone)]
#[command(name = "podview")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Config {
    /// The port to listen on. An empty value means 8080.
    #[arg(short, long, env = "PORT", default_value = "8080", value_parser = parse_port)]
    pub port: u16,

    /// CSS background color of the status page.
    #[arg(long, env = "BACKGROUND_COLOR", default_value = "")]
    pub background_color: String,

    /// CSS foreground color of the status page.
    #[arg(long, env = "FOREGROUND_COLOR", default_value = "")]
    pub foreground_color: String,

    /// Directory populated by the downward API volume.
    /// An empty value means /etc/podinfo.
    #[arg(long, env = "PODINFO_PATH", default_value = DEFAULT_PODINFO_PATH)]
    pub podinfo_path: String,

    /// Name of this pod. Falls back to the machine hostname.
    #[arg(long, env = "HOSTNAME")]
    pub hostname: Option<String>,

    /// Namespace this pod runs in, usually injected from metadata.namespace.
    #[arg(short, long, env = "METADATA_NAMESPACE")]
    pub namespace: Option<String>,

    /// ConfigMaps to display, as `namespace/name` or `name`.
    /// Separated by commas or whitespace.
    #[arg(long, env = "CONFIGMAPS", default_value = "")]
    pub configmaps: String,

    /// A single ConfigMap to display, appended to --configmaps.
    #[arg(long, env = "CONFIGMAP_NAME")]
    pub configmap_name: Option<String>,

    /// Namespace used for ConfigMap references without one.
    /// Defaults to the pod namespace.
    #[arg(long, env = "CONFIGMAP_NAMESPACE")]
    pub configmap_namespace: Option<String>,

    /// Title of the index page.
    #[arg(long, env = "PAGE_TITLE", default_value = "k8s-test")]
    pub title: String,

    /// Maximum level of the log output. An empty value means info.
    #[arg(long, env = "LOG_LEVEL", default_value = "info", value_parser = parse_log_level)]
    pub log_level: Level,
}

pub const DEFAULT_PORT: u16 = 8080;

// Pod specs often carry `value: ""`, which clap hands to the parser as is.
fn parse_port(value: &str) -> Result<u16, std::num::ParseIntError> {
    match value.trim() {
        "" => Ok(DEFAULT_PORT),
        port => port.parse(),
    }
}

fn parse_log_level(value: &str) -> Result<Level, <Level as std::str::FromStr>::Err> {
    match value.trim() {
        "" => Ok(Level::INFO),
        level => level.parse(),
    }
}

/// Treat empty environment values the same as unset ones.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Config {
    pub fn pod_name(&self) -> String {
        match non_empty(&self.hostname) {
            Some(name) => name.to_string(),
            None => hostname::get()
                .map(|h| h.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    pub fn pod_namespace(&self) -> Option<&str> {
        non_empty(&self.namespace)
    }

    pub fn podinfo_path(&self) -> PathBuf {
        match self.podinfo_path.trim() {
            "" => PathBuf::from(DEFAULT_PODINFO_PATH),
            path => PathBuf::from(path),
        }
    }

    /// Namespace for bare ConfigMap names: CONFIGMAP_NAMESPACE, then the pod namespace.
    pub fn default_configmap_namespace(&self) -> Option<&str> {
        non_empty(&self.configmap_namespace).or_else(|| self.pod_namespace())
    }

    /// All configured ConfigMap references, in configuration order.
    pub fn configmap_refs(&self) -> Vec<ConfigMapRef> {
        let default_namespace = self.default_configmap_namespace();
        self.configmaps
            .split(|c: char| c == ',' || c.is_whitespace())
            .chain(non_empty(&self.configmap_name))
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| ConfigMapRef::parse(r, default_namespace))
            .collect()
    }
}
