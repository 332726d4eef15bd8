use std::{path::Path, sync::LazyLock};

use tracing::{level_filters::LevelFilter, warn};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{
    format::FmtSpan,
    writer::{BoxMakeWriter, MakeWriterExt},
};

pub const CLI_PREFIX: &str = "cli";

/// Logs go to a daily rolling file under `logs_dir`. Stdout only receives them when `show_std`
/// is set. If `logs_dir` can't be used the file is skipped and the command still runs.
pub fn enable_logging(
    prefix: &str,
    logs_dir: &Path,
    log_level: Option<LevelFilter>,
    show_std: bool,
) {
    let stdout = std::io::stdout.with_filter(move |_| show_std);
    let (writer, unavailable) = match build_appender(prefix, logs_dir) {
        Ok(appender) => (BoxMakeWriter::new(stdout.and(appender)), None),
        Err(e) => (BoxMakeWriter::new(stdout), Some(e)),
    };

    let directives = filter_directives(log_level, std::env::var("RUST_LOG").ok());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(directives))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(writer)
        .pretty()
        .init();

    if let Some(e) = unavailable {
        warn!("Not writing logs to {logs_dir:?}: {e}");
    }
}

fn build_appender(prefix: &str, logs_dir: &Path) -> Result<RollingFileAppender, InitError> {
    tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix(prefix)
        .build(logs_dir)
}

/// `RUST_LOG` holding full `target=level` directives is used as is. A bare level only applies to
/// this crate.
fn filter_directives(log_level: Option<LevelFilter>, rust_log: Option<String>) -> String {
    let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
    match (log_level, rust_log) {
        (Some(level), _) => format!("{crate_target}={level}"),
        (None, Some(rust_log)) if rust_log.contains('=') => rust_log,
        (None, Some(rust_log)) if !rust_log.trim().is_empty() => {
            format!("{crate_target}={}", rust_log.trim())
        }
        (None, _) => format!("{crate_target}=info"),
    }
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
