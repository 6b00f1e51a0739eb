use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use genie_console::app;
use genie_console::config::Config;

/// Logs go to `--log-file` when given; the terminal belongs to the UI.
fn init_tracing(config: &Config) -> std::io::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(path) = &config.log_file else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .try_init();
        return Ok(None);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .try_init();
    Ok(Some(guard))
}

fn main() -> ExitCode {
    let config = Config::parse();

    let _log_guard = match init_tracing(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("cannot open log file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let should_quit = Arc::new(AtomicBool::new(false));
    for signal in [signal_hook::consts::SIGTERM, signal_hook::consts::SIGINT] {
        if let Err(e) = signal_hook::flag::register(signal, Arc::clone(&should_quit)) {
            eprintln!("cannot install signal handler: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        app::restore_terminal();
        default_hook(info);
    }));

    match app::run(&config, should_quit) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            app::restore_terminal();
            tracing::error!(error = %e, "console exited with error");
            eprintln!("genie-console: {}", e);
            ExitCode::FAILURE
        }
    }
}
