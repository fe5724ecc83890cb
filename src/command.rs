//! Command registration and dispatch.
//!
//! A [`CommandRegistry`] maps command names to parse handlers. The
//! [`Dispatcher`] looks a line up, issues the parsed request and renders the
//! reply.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::curl::curl_parsers::{
    command_name_parse, curl_cmd_parse, curl_parse_with_default, positional_body_parse,
    request_parse,
};
use crate::curl::{Method, RequestDescriptor};
use crate::display::{self, Reply};
use crate::error::{CommandError, ParseError};
use crate::http::HttpIssuer;
use crate::summarize::Summarizer;

/// Turns the argument string of a command into a request.
pub type ParseHandler = fn(&str) -> Result<RequestDescriptor, ParseError>;

fn get_handler(args: &str) -> Result<RequestDescriptor, ParseError> {
    curl_parse_with_default(args, Method::Get)
}

fn post_handler(args: &str) -> Result<RequestDescriptor, ParseError> {
    positional_body_parse(args, Method::Post)
}

#[derive(Debug, Clone)]
pub struct CommandRegistry {
    handlers: BTreeMap<String, ParseHandler>,
}

impl Default for CommandRegistry {
    /// `get`, `post`, `request`, and the curl-style `请求` with its `curl` alias.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register("get", get_handler)
            .register("post", post_handler)
            .register("request", request_parse)
            .register("请求", curl_cmd_parse)
            .register("curl", curl_cmd_parse);
        registry
    }
}

impl CommandRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Registers `handler` under `name`; a leading `/` is ignored and an
    /// existing handler with the same name is replaced.
    pub fn register(&mut self, name: &str, handler: ParseHandler) -> &mut Self {
        let name = name.trim_start_matches('/').to_lowercase();
        self.handlers.insert(name, handler);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<ParseHandler> {
        let name = name.trim_start_matches('/').to_lowercase();
        self.handlers.get(&name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Parses a full line such as `/get https://example.com`.
    pub fn parse_line(&self, line: &str) -> Result<RequestDescriptor, CommandError> {
        let Ok((args, name)) = command_name_parse(line) else {
            return Err(CommandError::UnknownCommand(line.trim().to_string()));
        };
        let handler = self
            .lookup(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
        let descriptor = handler(args)?;
        debug!(
            command = %name,
            method = %descriptor.method,
            url = %descriptor.url,
            header_count = descriptor.headers.len(),
            "parsed command"
        );
        Ok(descriptor)
    }
}

pub struct Dispatcher<H, S> {
    registry: CommandRegistry,
    issuer: H,
    summarizer: Option<S>,
    summary_threshold: usize,
}

impl<H, S> Dispatcher<H, S>
where
    H: HttpIssuer,
    S: Summarizer,
{
    /// `summarizer: None` shows every body verbatim.
    pub fn new(
        registry: CommandRegistry,
        issuer: H,
        summarizer: Option<S>,
        summary_threshold: usize,
    ) -> Self {
        Self {
            registry,
            issuer,
            summarizer,
            summary_threshold,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub async fn dispatch(&self, line: &str) -> Result<Reply, CommandError> {
        let descriptor = self.registry.parse_line(line)?;
        let response = self.issuer.issue(&descriptor).await?;
        info!(
            method = %descriptor.method,
            url = %descriptor.url,
            status = response.status,
            "request completed"
        );
        Ok(display::present(&response, self.summarizer.as_ref(), self.summary_threshold).await)
    }
}
