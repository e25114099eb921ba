pub mod config;
pub mod context;
pub mod http;
pub mod k8s;
pub mod render;
pub mod sections;
pub mod sources;
