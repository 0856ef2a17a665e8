use std::process::ExitCode;

use tokio::runtime::{Builder, Runtime};
use tracing::{error, info, warn};
use uuid::Uuid;

/// `server.worker_threads` from config.toml, else `TOKIO_WORKER_THREADS`.
fn worker_threads() -> Option<usize> {
    match configs::AppConfig::load_or_env() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(e) => {
            warn!(error = %e, "config not loadable yet; sizing runtime from env");
            std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse().ok())
        }
    }
}

fn build_runtime(threads: Option<usize>) -> std::io::Result<Runtime> {
    let mut builder = Builder::new_multi_thread();
    builder.enable_all();
    if let Some(n) = threads {
        builder.worker_threads(n);
    }
    builder.build()
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |info| {
        error!(%instance, message = %info, "panic");
    }));

    let threads = worker_threads();
    let rt = match build_runtime(threads) {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(%instance, pid = std::process::id(), version = env!("CARGO_PKG_VERSION"), threads = ?threads, "recall server starting");

    // run 内部监听 Ctrl+C 并优雅停机
    match rt.block_on(server::run()) {
        Ok(()) => {
            info!(%instance, "recall server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(%instance, error = %e, "recall server failed");
            ExitCode::FAILURE
        }
    }
}
