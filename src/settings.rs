use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

/// Deployment settings for wiring up a mapper: which scheme acts as the
/// hub and where the packaged mapping files live. Read from an optional
/// `versemap` config file with `VERSEMAP_*` environment overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub hub: String,
    pub mapping_dir: String,
}

impl Settings {
    pub fn load() -> Result<Settings> {
        let config = Config::builder()
            .set_default("hub", "KJV")?
            .set_default("mapping_dir", "mappings")?
            .add_source(File::with_name("versemap").required(false))
            .add_source(Environment::with_prefix("VERSEMAP"))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
