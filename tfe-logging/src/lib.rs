use std::{env, path::Path};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::Directive, fmt, prelude::*, registry, EnvFilter, Layer, Registry,
};

const DEFAULT_LOG_FILE: &str = "/tmp/tfe-pool.log";

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Console,
    File,
    Both,
    None,
}

impl LogOutput {
    fn parse(value: &str) -> Self {
        match value {
            "file" => LogOutput::File,
            "both" => LogOutput::Both,
            "none" | "off" => LogOutput::None,
            _ => LogOutput::Console,
        }
    }

    fn console(self) -> bool {
        matches!(self, LogOutput::Console | LogOutput::Both)
    }

    fn file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
    Compact,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Human,
        }
    }
}

/// Logging settings read from the environment.
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
    pub file_path: String,
}

impl LogSettings {
    /// Reads `LOG_LEVEL`, `LOG_FORMAT`, `LOG_OUTPUT` and `LOG_FILE_PATH`.
    pub fn from_env() -> Self {
        Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(&env::var("LOG_FORMAT").unwrap_or_default()),
            output: LogOutput::parse(&env::var("LOG_OUTPUT").unwrap_or_default()),
            file_path: env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string()),
        }
    }

    /// Same as [`from_env`](Self::from_env) but forces `debug` level.
    pub fn debug_from_env() -> Self {
        Self {
            level: "debug".to_string(),
            ..Self::from_env()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        ["reqwest=warn", "hyper=warn", "hyper_util=warn", "rustls=warn"]
            .iter()
            .filter_map(|d| d.parse::<Directive>().ok())
            .fold(filter, |filter, directive| filter.add_directive(directive))
    }
}

fn format_layer<S, W>(format: LogFormat, writer: W, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a> + 'static,
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer).with_ansi(ansi);
    match format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Human => layer.boxed(),
    }
}

/// Initializes the global tracing subscriber.
///
/// Console output goes to stderr. The returned guard must be held for the
/// life of the process when file output is enabled, otherwise buffered
/// lines are lost on exit. Calling this twice is harmless; the second
/// subscriber is ignored.
pub fn init_subscriber(settings: &LogSettings) -> Option<WorkerGuard> {
    let mut guard = None;
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if settings.output.console() {
        layers.push(format_layer(settings.format, std::io::stderr, true));
    }

    if settings.output.file() {
        let log_path = Path::new(&settings.file_path);
        let log_dir = log_path.parent().unwrap_or_else(|| Path::new("/tmp"));
        let log_filename = log_path
            .file_name()
            .unwrap_or_else(|| "tfe-pool.log".as_ref());
        let file_appender = tracing_appender::rolling::daily(log_dir, log_filename);
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);
        layers.push(format_layer(settings.format, non_blocking, false));
    }

    let _ = registry()
        .with(layers)
        .with(settings.env_filter())
        .try_init();

    guard
}
