use std::fmt;

use tracing::{debug, warn};

use crate::http::HttpResponse;
use crate::summarize::Summarizer;

/// What the user sees for one successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub text: String,
    pub summarized: bool,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if self.summarized {
            write!(f, " (summary)")?;
        }
        if !self.text.is_empty() {
            write!(f, "\n{}", self.text)?;
        }
        Ok(())
    }
}

/// Bodies of at least `threshold` characters go to the summarizer.
pub fn needs_summary(body: &str, threshold: usize) -> bool {
    body.chars().count() >= threshold
}

/// Builds the reply, summarizing long bodies when a summarizer is present.
/// A failed summarization falls back to the raw body.
pub async fn present<S>(response: &HttpResponse, summarizer: Option<&S>, threshold: usize) -> Reply
where
    S: Summarizer + ?Sized,
{
    let verbatim = || Reply {
        status: response.status,
        text: response.body.clone(),
        summarized: false,
    };

    let Some(summarizer) = summarizer else {
        return verbatim();
    };
    if !needs_summary(&response.body, threshold) {
        return verbatim();
    }

    match summarizer.summarize(&response.body).await {
        Ok(summary) => {
            debug!(summary_len = summary.len(), "summarized response body");
            Reply {
                status: response.status,
                text: summary,
                summarized: true,
            }
        }
        Err(err) => {
            warn!(error = %err, "summarization failed, showing raw body");
            verbatim()
        }
    }
}
