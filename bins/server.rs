use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

/// Resolves when `signal` fires. If the signal handler cannot be installed the
/// server keeps running and this never resolves.
async fn wait_for_shutdown<F>(signal: F, service_id: Uuid, pid: u32)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            info!(service = "server", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
        }
        Err(e) => {
            error!(service = "server", event = "signal_install_failed", error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG and the config overrides below are visible
    dotenv().ok();

    let config = configs::AppConfig::load_and_validate();
    let format = config.as_ref().map(|c| c.logging.format.as_str()).unwrap_or("compact");
    common::utils::logging::init_logging(format);
    info!(service = "server", event = "logger_init", format, "tracing subscriber initialized");

    let config = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "server", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new({
        let service_id = service_id;
        move |info| {
            error!(
                service = "server",
                event = "panic",
                %service_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    let worker_threads = config.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        store = ?config.storage.backend,
        "server service starting"
    );

    rt.block_on(async move {
        let shutdown = wait_for_shutdown(tokio::signal::ctrl_c(), service_id, pid);

        match server::run(config, shutdown).await {
            Ok(()) => {
                info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "server", event = "run_failed", error = %e, "server::run returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn signal_resolves_shutdown() {
        wait_for_shutdown(async { Ok(()) }, Uuid::new_v4(), 1).await;
    }

    #[tokio::test]
    async fn failed_signal_handler_keeps_serving() {
        let failed = async { Err(std::io::Error::new(std::io::ErrorKind::Other, "no handler")) };
        tokio::select! {
            biased;
            _ = wait_for_shutdown(failed, Uuid::new_v4(), 1) => panic!("shutdown resolved on a signal error"),
            _ = tokio::task::yield_now() => {}
        }
    }
}
