use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use soulbet_table::{
    describe_numbers, parse_line, Command, Config, ConsoleDisplay, Input, SessionDriver, HELP,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(
    name = "soulbet",
    about = "Win back your soul at the roulette table before the clock runs out."
)]
struct Args {
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Master seed (overrides the file).
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (overrides the file).
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(level: Level, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load config
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }
    let config = config.validate().context("invalid configuration")?;

    init_tracing(config.log_level, config.log_json);
    info!(seed = config.seed, "starting soulbet");

    println!("{HELP}");
    let (commands, receiver) = mpsc::channel(64);
    let driver = SessionDriver::from_config(&config, ConsoleDisplay::new(std::io::stdout()));
    let session = driver.run(receiver);
    tokio::pin!(session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    loop {
        tokio::select! {
            _ = &mut session => break,
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line.context("failed to read stdin")? else {
                    stdin_open = false;
                    if commands.try_send(Command::Quit).is_err() {
                        break;
                    }
                    continue;
                };
                match parse_line(&line) {
                    Ok(Some(Input::Command(command))) => {
                        if let Err(err) = commands.try_send(command) {
                            warn!(%err, "command dropped");
                        }
                    }
                    Ok(Some(Input::Numbers(color))) => println!("{}", describe_numbers(color)),
                    Ok(Some(Input::Help)) => println!("{HELP}"),
                    Ok(None) => {}
                    Err(err) => println!("! {err}"),
                }
            }
        }
    }
    info!("session closed");
    Ok(())
}
