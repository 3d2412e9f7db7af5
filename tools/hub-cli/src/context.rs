//! CLI execution context.

use std::path::Path;

use anyhow::{Context as _, Result};

use hub_core::{HubConfig, HubSession};

use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Client configuration.
    pub config: HubConfig,
    /// Output handler.
    pub output: Output,
    /// Session against the configured API.
    pub session: HubSession,
}

impl Context {
    /// Load config and open a session.
    ///
    /// Precedence for the API URL: `--api-url`, then `POLICYHUB_API_URL`,
    /// then the config file.
    pub fn load(config_path: Option<&Path>, api_url: Option<String>, output: Output) -> Result<Self> {
        let mut config = HubConfig::discover(config_path)?;
        if let Some(url) = api_url {
            config = config.with_base_url(url);
        }
        output.debug(&format!("API: {}", config.api.base_url));

        let session = HubSession::connect(config.clone())
            .with_context(|| format!("Failed to create API client for {}", config.api.base_url))?;

        Ok(Self {
            config,
            output,
            session,
        })
    }
}
