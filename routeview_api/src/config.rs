use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use routeview_datasets::registry::RegistryConfig;
use routeview_geometry::route_geometry::PrecisionPolicy;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_DATASET_BASE: &str = "nextbillion_response";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub registry: RegistryConfig,
    pub precision_policy: PrecisionPolicy,
    pub bind_addr: SocketAddr,
    pub debug: bool,
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_root = PathBuf::from(
            non_empty("ROUTEVIEW_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_owned()),
        );
        let base_name =
            non_empty("ROUTEVIEW_DATASET_BASE").unwrap_or_else(|| DEFAULT_DATASET_BASE.to_owned());
        let default_file = non_empty("ROUTEVIEW_DATASET_FILE");

        let precision_policy = match non_empty("ROUTEVIEW_POLYLINE_PRECISIONS") {
            Some(value) => value
                .parse::<PrecisionPolicy>()
                .with_context(|| format!("invalid ROUTEVIEW_POLYLINE_PRECISIONS: {value}"))?,
            None => PrecisionPolicy::default(),
        };

        let bind_addr = non_empty("ROUTEVIEW_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid ROUTEVIEW_BIND_ADDR: {bind_addr}"))?;

        let debug = lookup("ROUTEVIEW_DEBUG").is_some_and(|value| is_truthy(&value));

        Ok(AppConfig {
            registry: RegistryConfig {
                data_root,
                base_name,
                default_file,
            },
            precision_policy,
            bind_addr,
            debug,
        })
    }
}
