use std::env;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const MIN_REQUEST_TIMEOUT_SECS: u64 = 5;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SUMMARY_ENABLED: bool = true;
pub const DEFAULT_SUMMARY_THRESHOLD: usize = 100;
const DEFAULT_MODEL: &str = "qwen2.5:3b";
const DEFAULT_MODEL_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SUMMARY_PROMPT: &str = "You summarize HTTP response bodies for a chat user. \
Reply with a short plain-text summary of what the response contains.";

fn default_user_agent() -> String {
    format!("curlbot/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub summary_enabled: bool,
    pub summary_threshold: usize,
    pub model: String,
    pub model_base_url: String,
    pub model_timeout_secs: u64,
    pub summary_prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env_with(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    pub fn from_env_with(mut get_var: impl FnMut(&str) -> Option<String>) -> Self {
        Self {
            request_timeout_secs: parse_request_timeout_secs(
                get_var("REQUEST_TIMEOUT_SECS").as_deref(),
            ),
            user_agent: get_var("USER_AGENT")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(default_user_agent),
            summary_enabled: parse_bool(
                get_var("SUMMARY_ENABLED").as_deref(),
                DEFAULT_SUMMARY_ENABLED,
            ),
            summary_threshold: parse_positive_usize(
                get_var("SUMMARY_THRESHOLD").as_deref(),
                DEFAULT_SUMMARY_THRESHOLD,
            ),
            model: get_var("MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            model_base_url: get_var("MODEL_BASE_URL")
                .unwrap_or_else(|| DEFAULT_MODEL_BASE_URL.to_string()),
            model_timeout_secs: parse_positive_u64(
                get_var("MODEL_TIMEOUT_SECS").as_deref(),
                DEFAULT_MODEL_TIMEOUT_SECS,
            ),
            summary_prompt: get_var("SUMMARY_PROMPT")
                .unwrap_or_else(|| DEFAULT_SUMMARY_PROMPT.to_string()),
        }
    }
}

fn parse_positive_u64(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn parse_positive_usize(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn parse_request_timeout_secs(raw: Option<&str>) -> u64 {
    parse_positive_u64(raw, DEFAULT_REQUEST_TIMEOUT_SECS)
        .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS)
}

fn parse_bool(raw: Option<&str>, default: bool) -> bool {
    match raw.map(str::trim).map(str::to_ascii_lowercase).as_deref() {
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
