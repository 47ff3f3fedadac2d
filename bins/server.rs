use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging(json_logs: bool) {
    let json = json_logs
        || std::env::var("LOG_FORMAT").map(|v| v.eq_ignore_ascii_case("json")).unwrap_or(false);
    common::utils::logging::init_logging(json);
    info!(service = "scheduler", event = "logger_init", json, "tracing subscriber initialized");
}

fn main() -> ExitCode {
    // .env first so RUST_LOG, JWT_SECRET etc. apply
    dotenv().ok();
    let loaded = configs::AppConfig::load_and_validate();
    init_logging(loaded.as_ref().map(|c| c.server.json_logs).unwrap_or(false));

    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "scheduler", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "scheduler",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "scheduler", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "scheduler",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "scheduler service starting"
    );

    // server::run drains on Ctrl+C itself
    rt.block_on(async move {
        match server::run(cfg).await {
            Ok(()) => {
                info!(service = "scheduler", event = "stop", %service_id, pid, "server stopped normally");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "scheduler", event = "run_failed", error = %e, "server::run returned error");
                ExitCode::FAILURE
            }
        }
    })
}
