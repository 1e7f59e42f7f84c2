use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";

    /// Plain environment variables mapped onto nested config keys.
    /// An alias wins over the prefixed form when both are set.
    const ALIASES: &'static [(&'static str, &'static str)] = &[];

    fn load_dotenv() {
        // Load .env from crate root (falls back to current dir if missing)
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let _ = dotenvy::from_filename(manifest_dir.join(".env")).or_else(|_| dotenvy::dotenv());
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        Self::load_dotenv();
        Self::from_vars(std::env::vars().collect())
    }

    /// Builds the config from an explicit variable set instead of the
    /// process environment.
    fn from_vars(vars: config_rs::Map<String, String>) -> Result<Self> {
        let mut builder = config_rs::Config::builder().add_source(
            config_rs::Environment::with_prefix(Self::PREFIX)
                .prefix_separator("_")
                .separator(Self::SEPARATOR)
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

        for (var, key) in Self::ALIASES {
            let value = vars.get(*var).filter(|v| !v.trim().is_empty()).cloned();
            builder = builder
                .set_override_option(*key, value)
                .with_context(|| format!("failed to apply {var} to config key {key}"))?;
        }

        let settings = builder
            .build()
            .context("failed to read environment variables for config")?;

        let cfg = settings
            .try_deserialize::<Self>()
            .context("failed to deserialize environment into config")?;

        cfg.validate()?;
        Ok(cfg)
    }
}
