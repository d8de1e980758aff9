//! Usage: Tracing setup (console + daily rolling file in the app log dir).

use std::path::Path;
use std::sync::{Once, OnceLock};
use tauri::{AppHandle, Manager, Runtime};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "medimitra";
const LOG_FILE_SUFFIX: &str = "log";
const MAX_LOG_FILES: usize = 7;

static INIT: Once = Once::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn default_directives() -> &'static str {
    if cfg!(debug_assertions) {
        "info,medimitra_shell_lib=debug"
    } else {
        "info"
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives()))
}

fn file_appender(dir: &Path) -> Result<RollingFileAppender, String> {
    std::fs::create_dir_all(dir).map_err(|e| format!("failed to create log dir: {e}"))?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(dir)
        .map_err(|e| format!("failed to create log file appender: {e}"))
}

/// Installs the global subscriber once; later calls are no-ops.
pub fn init<R: Runtime>(app: &AppHandle<R>) {
    INIT.call_once(|| {
        let log_dir = app
            .path()
            .app_log_dir()
            .map_err(|e| format!("failed to resolve app log dir: {e}"));
        let appender = log_dir.and_then(|dir| file_appender(&dir).map(|a| (dir, a)));

        let (file_layer, file_error, dir) = match appender {
            Ok((dir, appender)) => {
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let _ = FILE_GUARD.set(guard);
                let layer = fmt::layer().with_writer(writer).with_ansi(false);
                (Some(layer), None, Some(dir))
            }
            Err(err) => (None, Some(err), None),
        };

        let subscriber = tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt::layer().with_target(true))
            .with(file_layer);

        if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("tracing subscriber already installed: {err}");
            return;
        }
        if let Err(err) = tracing_log::LogTracer::init() {
            tracing::debug!("log bridge not installed: {err}");
        }

        match (dir, file_error) {
            (Some(dir), _) => tracing::info!(dir = %dir.display(), "file logging enabled"),
            (None, Some(err)) => tracing::warn!("file logging disabled: {err}"),
            (None, None) => {}
        }
    });
}
