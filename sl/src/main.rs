use std::io::BufRead;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use spincoord::Stopwatch;
use spinlog::cli::{Cli, Command};
use spinlog::config::Config;
use spinlog::LogWriter;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("spinlog starting");

    match cli.command {
        Command::Pipe { output } => {
            let path = output.unwrap_or_else(|| config.log_path.clone());
            let mut writer = LogWriter::new(config.writer.clone());
            writer.activate(&path)?;

            let stdin = std::io::stdin();
            let mut total = 0usize;
            for line in stdin.lock().lines() {
                let line = line.context("Failed to read stdin")?;
                if writer.append(&format!("{line}\n")) {
                    total += 1;
                }
            }
            writer.shutdown()?;

            println!("{} Wrote {} lines to {}", "✓".green(), total, path.display().to_string().cyan());
            if writer.dropped_appends() > 0 {
                println!("{} Dropped {} appends", "!".yellow(), writer.dropped_appends());
            }
        }
        Command::Stress { output, producers, lines } => {
            let path = output.unwrap_or_else(|| config.log_path.clone());
            let mut writer = LogWriter::new(config.writer.clone());
            writer.activate(&path)?;

            let mut watch = Stopwatch::started();
            std::thread::scope(|scope| {
                for producer in 0..producers {
                    let writer = &writer;
                    scope.spawn(move || {
                        for line in 0..lines {
                            writer.append(&format!("producer-{producer}-line-{line}\n"));
                        }
                    });
                }
            });
            watch.stop();

            let dropped = writer.dropped_appends();
            writer.shutdown()?;

            let attempted = producers * lines;
            println!(
                "{} {} producers x {} lines in {:?} -> {}",
                "✓".green(),
                producers,
                lines,
                watch.elapsed(),
                path.display().to_string().cyan()
            );
            if dropped > 0 {
                println!("{} Dropped {} of {} appends", "!".yellow(), dropped, attempted);
            } else {
                println!("{} All {} appends accepted", "✓".green(), attempted);
            }
        }
    }

    Ok(())
}
