pub mod command;
pub mod config;
pub mod curl;
pub mod display;
pub mod error;
pub mod http;
pub mod logging;
pub mod repl;
pub mod summarize;

#[cfg(test)]
mod test_util;

use anyhow::Result;
use tracing::info;

use command::{CommandRegistry, Dispatcher};
use config::Config;
use http::ReqwestIssuer;
use summarize::OllamaSummarizer;

pub type BotDispatcher = Dispatcher<ReqwestIssuer, OllamaSummarizer>;

/// Builds the dispatcher with the default commands and real collaborators.
pub fn build_dispatcher(cfg: &Config) -> Result<BotDispatcher> {
    let issuer = ReqwestIssuer::new(cfg)?;
    let summarizer = if cfg.summary_enabled {
        Some(OllamaSummarizer::new(cfg)?)
    } else {
        None
    };
    info!(
        request_timeout_secs = cfg.request_timeout_secs,
        summary_enabled = cfg.summary_enabled,
        summary_threshold = cfg.summary_threshold,
        model = %cfg.model,
        "loaded runtime configuration"
    );
    Ok(Dispatcher::new(
        CommandRegistry::default(),
        issuer,
        summarizer,
        cfg.summary_threshold,
    ))
}
