//! Local data sources. Each one produces the data of a single section.
pub mod basic;
pub mod build_info;
pub mod env;
pub mod podinfo;
