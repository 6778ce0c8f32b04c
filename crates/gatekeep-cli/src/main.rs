//! Console host for the gatekeep access controller.
//!
//! Runs the controller on a fixed tick from a tokio interval, with the LCD
//! printed to stdout whenever it changes and commands read from stdin:
//!
//! ```text
//! gatekeep [--config config.json] [--log-level debug]
//!
//! k 1805        press keys on the keypad
//! r 1805        send a line on the remote command channel
//! :code 4321    replace the stored code
//! status        log the controller state
//! q             quit
//! ```
//!
//! Logging goes through `tracing`; pass `--log-level debug` (or set
//! `RUST_LOG`) to see phase transitions.

mod console;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gatekeep_emulator::{ControllerBuilder, ControllerConfig, Peripherals, VirtualDisplay};
use gatekeep_hardware::mock::{MockGate, MockIndicators, MockKeypad};

use console::{Command, ConsoleRemote, render_screen};

/// Commands buffered between the stdin reader and the tick loop.
const COMMAND_QUEUE_CAPACITY: usize = 16;

/// Gatekeep console host
#[derive(Debug, Parser)]
#[command(name = "gatekeep")]
#[command(about = "Gated entryway access controller on a console", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path (JSON)
    #[arg(short, long, env = "GATEKEEP_CONFIG")]
    config: Option<PathBuf>,

    /// Log level, used when RUST_LOG is unset
    #[arg(long, env = "GATEKEEP_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ControllerConfig::default(),
    };

    let (keypad, keys) = MockKeypad::with_name("console-keypad".to_string());
    let mut controller = ControllerBuilder::new()
        .with_config(config.clone())
        .build(Peripherals {
            keypad,
            remote: ConsoleRemote::default(),
            display: VirtualDisplay::default(),
            gate: MockGate::new(),
            indicators: MockIndicators::new(),
        })
        .context("failed to start the access controller")?;

    let (tx, mut rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
    tokio::spawn(read_commands(tx));

    let mut interval = tokio::time::interval(config.tick());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_screen = Vec::new();

    info!(
        "Gatekeep {} running with {} ms ticks",
        gatekeep_core::VERSION,
        config.tick_ms
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                controller.tick().context("controller tick failed")?;

                let screen = controller.display().get_all_lines();
                if screen != last_screen {
                    println!("{}", render_screen(&screen));
                    last_screen = screen;
                }
            }
            command = rx.recv() => {
                let Some(command) = command else {
                    info!("Console closed");
                    break;
                };
                match command {
                    Command::Keypad(line) => match keys.press_sequence(&line) {
                        Ok(()) => {}
                        Err(e) if e.is_transient() => warn!("Dropped key presses: {}", e),
                        Err(e) => return Err(e).context("keypad unavailable"),
                    },
                    Command::Remote(line) => controller.remote_mut().submit(&line),
                    Command::ReplaceCode(code) => controller.replace_code(code),
                    Command::Status => info!(
                        "phase={} lock={} policy={:?} failures={}/{} tries_left={} uptime_ms={}",
                        controller.phase(),
                        controller.lock_state(),
                        controller.guard().policy(),
                        controller.guard().failures(),
                        controller.guard().max_attempts(),
                        controller.guard().tries_remaining(),
                        controller.uptime_ms(),
                    ),
                    Command::Quit => break,
                }
            }
        }
    }

    let events = serde_json::to_string(&controller.events().iter().collect::<Vec<_>>())
        .context("failed to serialize access events")?;
    info!("Access events: {}", events);
    Ok(())
}

/// Load a JSON configuration file.
fn load_config(path: &Path) -> Result<ControllerConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

/// Forward parsed stdin lines to the tick loop until stdin closes.
async fn read_commands(tx: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Ok(command) => {
                let quit = command == Command::Quit;
                if tx.send(command).await.is_err() || quit {
                    break;
                }
            }
            Err(e) => warn!("{:#}", e),
        }
    }
}
