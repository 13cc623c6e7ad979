pub mod models;
pub mod services;
pub mod api;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn env_truthy(name: &str) -> bool {
    matches!(
        std::env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE")
    )
}

/// Initialize the logging system: env-filtered, one timestamped log file per
/// session, console output in debug builds. Call once from the hosting
/// shell before any action runs.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if env_truthy("INTEGRITYAI_DISABLE_FILE_LOG") {
        init_console_only_logging(env_filter);
        info!("File logging disabled via INTEGRITYAI_DISABLE_FILE_LOG");
        return;
    }

    let logs_dir = match std::env::var("INTEGRITYAI_LOG_DIR") {
        Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => default_logs_dir(),
    };

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Failed to create logs directory: {}", e);
        init_console_only_logging(env_filter);
        info!("Falling back to console-only logging (log dir not writable)");
        return;
    }

    let log_filename = format!(
        "integrityAI_{}.log",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );

    // Dedicated file per session; log writes stay non-blocking.
    let file_appender = rolling::never(&logs_dir, &log_filename);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(file_guard);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let registry = tracing_subscriber::registry().with(env_filter).with(file_layer);

    #[cfg(debug_assertions)]
    registry
        .with(fmt::layer().with_writer(std::io::stdout).with_ansi(true))
        .init();
    #[cfg(not(debug_assertions))]
    registry.init();

    info!("=== IntegrityAI Started ===");
    info!("Log file: {}/{}", logs_dir.display(), log_filename);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if !env_truthy("INTEGRITYAI_DISABLE_LOG_CLEANUP") {
        // Best-effort, off the startup path.
        std::thread::spawn(move || cleanup_old_logs(&logs_dir, 30));
    }
}

fn default_logs_dir() -> PathBuf {
    // Development builds log next to the source tree; release builds use the
    // platform data directory.
    #[cfg(debug_assertions)]
    {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("logs")
    }

    #[cfg(not(debug_assertions))]
    {
        dirs::data_local_dir()
            .map(|d| d.join("integrityAI").join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}

fn cleanup_old_logs(logs_dir: &Path, keep: usize) {
    let mut entries: Vec<_> = match fs::read_dir(logs_dir) {
        Ok(rd) => rd.filter_map(|e| e.ok()).collect(),
        Err(_) => return,
    };

    entries.retain(|e| {
        let name = e.file_name().to_string_lossy().to_string();
        name.starts_with("integrityAI_") && name.ends_with(".log")
    });

    if entries.len() <= keep {
        return;
    }

    // Oldest first, then drop everything past the keep budget.
    entries.sort_by_key(|e| {
        e.metadata()
            .and_then(|m| m.modified())
            .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
    });
    for entry in entries.iter().take(entries.len() - keep) {
        let _ = fs::remove_file(entry.path());
    }
}

fn init_console_only_logging(env_filter: EnvFilter) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cfg!(debug_assertions))
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}
