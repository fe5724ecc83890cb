use thiserror::Error;

/// Rejection of a command line before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unterminated {quote} quote starting at byte {offset}")]
    UnterminatedQuote { quote: char, offset: usize },
    #[error("malformed header '{0}': expected 'Name: value'")]
    MalformedHeader(String),
    #[error("unknown HTTP method '{0}'")]
    UnknownMethod(String),
    #[error("unknown flag '{0}'")]
    UnknownFlag(String),
    #[error("unexpected argument '{0}': the url is already set")]
    UnexpectedArgument(String),
    #[error("no target url found")]
    MissingUrl,
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("flag '{flag}' requires a value")]
    MissingValue { flag: String },
    #[error("missing HTTP method, usage: /request <METHOD> <url> [json-body]")]
    MissingMethod,
    #[error("request body is not valid JSON: {0}")]
    InvalidBody(String),
}

/// Failure reported by the HTTP collaborator.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request to '{url}' timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },
    #[error("connection refused by '{url}'")]
    ConnectionRefused { url: String },
    #[error("failed to connect to '{url}'")]
    Connect { url: String },
    #[error("request to '{url}' failed: {message}")]
    Request { url: String, message: String },
}

/// Failure reported by the summarization collaborator.
#[derive(Debug, Error)]
pub enum SummarizationError {
    #[error("failed to call model API at '{url}': {message}")]
    Request { url: String, message: String },
    #[error("model API returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode model response: {0}")]
    Decode(String),
    #[error("model returned an empty summary")]
    Empty,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Network(#[from] NetworkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_render_the_offending_input() {
        let err = ParseError::UnknownFlag("-Z".into());
        assert_eq!(err.to_string(), "unknown flag '-Z'");

        let err = ParseError::UnterminatedQuote {
            quote: '"',
            offset: 3,
        };
        assert_eq!(err.to_string(), "unterminated \" quote starting at byte 3");
    }

    #[test]
    fn command_error_is_transparent_over_parse_error() {
        let err: CommandError = ParseError::MissingUrl.into();
        assert_eq!(err.to_string(), "no target url found");
        assert!(matches!(err, CommandError::Parse(ParseError::MissingUrl)));
    }
}
