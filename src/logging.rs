use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const DEFAULT_LOG_FILTER: &str = "warn,curlbot=info";
const DEFAULT_LOG_FILE_NAME: &str = "curlbot.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where and how the bot logs. Stderr unless `LOG_FILE` names a file, which
/// is then rotated daily.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
struct LogSettings {
    format: LogFormat,
    file: Option<PathBuf>,
}

impl LogSettings {
    fn from_env_with(mut get_var: impl FnMut(&str) -> Option<String>) -> Self {
        let format = match get_var("LOG_FORMAT")
            .map(|raw| raw.trim().to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        let file = get_var("LOG_FILE")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);
        Self { format, file }
    }

    fn writer(&self) -> BoxMakeWriter {
        let Some(path) = &self.file else {
            return BoxMakeWriter::new(std::io::stderr);
        };
        match rolling_file(path) {
            Ok((writer, guard)) => {
                let _ = LOG_GUARD.set(guard);
                BoxMakeWriter::new(writer)
            }
            Err(err) => {
                eprintln!(
                    "curlbot: cannot open log file '{}': {err}; logging to stderr",
                    path.display()
                );
                BoxMakeWriter::new(std::io::stderr)
            }
        }
    }
}

fn rolling_file(
    path: &Path,
) -> std::io::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE_NAME));

    fs::create_dir_all(dir)?;
    Ok(tracing_appender::non_blocking(
        tracing_appender::rolling::daily(dir, file_name),
    ))
}

/// Installs the global subscriber from `LOG_FORMAT`, `LOG_FILE` and
/// `RUST_LOG`. Calling it twice is a no-op.
pub fn init() {
    let settings = LogSettings::from_env_with(|key| env::var(key).ok());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(settings.writer());

    let _ = match settings.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
