use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::player::RunnerCommand;

/// Browse a shelf of games in the terminal and launch them
#[derive(Parser, Debug)]
#[command(name = "gameshelf", version, about)]
pub struct Cli {
    /// JSON catalog to use instead of the built-in shelf
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Build the catalog from game folders (with main.py or game.py) under DIR
    #[arg(long, value_name = "DIR", conflicts_with = "catalog")]
    pub games_dir: Option<PathBuf>,

    /// Program that runs a game; it receives the game's play URL
    #[arg(long, value_name = "PROGRAM")]
    pub runner: Option<String>,

    /// Extra runner argument; `{url}` is replaced with the play URL
    #[arg(long = "runner-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub runner_args: Vec<String>,

    /// Open and start the game with this id right away
    #[arg(long, value_name = "ID")]
    pub launch: Option<String>,

    /// Stay in the player when the runner process exits
    #[arg(long)]
    pub no_auto_return: bool,

    /// Input poll interval in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 100)]
    pub tick_rate: u64,

    /// Directory for log files [default: logs/ next to the executable]
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub catalog: Option<PathBuf>,
    pub games_dir: Option<PathBuf>,
    pub runner: Option<RunnerCommand>,
    pub launch: Option<String>,
    pub auto_return: bool,
    pub tick_rate: Duration,
    pub log_dir: PathBuf,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let runner = cli.runner.map(|program| RunnerCommand {
            program,
            args: cli.runner_args,
        });
        Self {
            catalog: cli.catalog,
            games_dir: cli.games_dir,
            runner,
            launch: cli.launch,
            auto_return: !cli.no_auto_return,
            tick_rate: Duration::from_millis(cli.tick_rate.max(1)),
            log_dir: cli.log_dir.unwrap_or_else(default_log_dir),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: None,
            games_dir: None,
            runner: None,
            launch: None,
            auto_return: true,
            tick_rate: Duration::from_millis(100),
            log_dir: default_log_dir(),
        }
    }
}

fn default_log_dir() -> PathBuf {
    // Next to the executable
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.join("logs");
        }
    }
    PathBuf::from("logs")
}
