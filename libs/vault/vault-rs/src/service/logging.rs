use crate::model::errors::{vault_err_unexpected, VaultResult};
use crate::Config;
use chrono::Local;
use std::backtrace::Backtrace;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::{env, panic};
use tracing::metadata::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{filter, fmt, Layer};

pub static LOG_FILE: &str = "vault.log";

fn is_vault_target(target: &str) -> bool {
    target.starts_with("vault_rs")
        || target.starts_with("vault_shared")
        || target.starts_with("vault_admin")
}

pub fn init(config: &Config) -> VaultResult<()> {
    if config.logs {
        fs::create_dir_all(&config.writeable_path)?;

        let vault_log_level = env::var("LOG_LEVEL")
            .ok()
            .and_then(|s| s.as_str().parse().ok())
            .unwrap_or(LevelFilter::DEBUG);

        let mut layers = Vec::with_capacity(2);

        layers.push(
            fmt::Layer::new()
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .with_ansi(false)
                .with_target(true)
                .with_writer(tracing_appender::rolling::never(&config.writeable_path, LOG_FILE))
                .with_filter(vault_log_level)
                .with_filter(filter::filter_fn(|metadata| is_vault_target(metadata.target())))
                .boxed(),
        );

        if config.stdout_logs {
            layers.push(
                fmt::Layer::new()
                    .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                    .with_ansi(config.colored_logs)
                    .with_target(true)
                    .with_filter(vault_log_level)
                    .with_filter(filter::filter_fn(|metadata| is_vault_target(metadata.target())))
                    .boxed(),
            );
        }

        tracing::subscriber::set_global_default(
            tracing_subscriber::Registry::default().with(layers),
        )
        .map_err(vault_err_unexpected)?;
        panic_capture(config);
    }
    Ok(())
}

fn panic_capture(config: &Config) {
    let path = config.writeable_path.clone();
    panic::set_hook(Box::new(move |panic_info| {
        let bt = Backtrace::force_capture();
        tracing::error!("panic detected: {panic_info} {}", bt);
        eprintln!("panic detected and logged: {panic_info} {bt}");
        let timestamp = Local::now().format("%Y-%m-%d---%H-%M-%S");
        let file_name = format!("{path}/panic---{timestamp}.log");
        let content = format!("INFO: {panic_info}\nBT: {bt}");

        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_name)
            .and_then(|mut file| file.write_all(content.as_bytes()));
        if let Err(err) = written {
            eprintln!("could not write panic log {file_name}: {err}");
        }
    }));
}
