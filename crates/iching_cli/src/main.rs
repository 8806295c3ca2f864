//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `iching_core` linkage and cast one reading for the question given
//!   as command-line arguments.
//! - Optionally enable file logging via `ICHING_LOG_DIR` / `ICHING_LOG_LEVEL`.

use log::warn;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var("ICHING_LOG_DIR") {
        let level = std::env::var("ICHING_LOG_LEVEL")
            .unwrap_or_else(|_| iching_core::default_log_level().as_str().to_string());
        if let Err(err) = iching_core::init_logging(&level, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    println!("iching_core version={}", iching_core::core_version());

    let question = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let reading = match iching_core::ask(&question) {
        Ok(reading) => reading,
        Err(err) => {
            warn!("event=cli_ask module=cli status=error error={err}");
            eprintln!("reading failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let draws = reading
        .draws
        .iter()
        .map(|draw| draw.value().to_string())
        .collect::<Vec<_>>()
        .join(",");
    println!(
        "draws={} hexagram={} {} binary={}",
        draws,
        reading.hexagram.number(),
        reading.hexagram.character(),
        reading.hexagram.binary()
    );
    match &reading.change {
        Some(change) => println!(
            "change={} to={} {}",
            change.binary(),
            change.to().number(),
            change.to().character()
        ),
        None => println!("change=none"),
    }
    ExitCode::SUCCESS
}
