use std::env;
use std::fs::OpenOptions;
use std::io;
use std::io::BufRead;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use uthelp_core::bootstrap::create_sample_root;
use uthelp_core::bootstrap::is_affirmative;
use uthelp_core::bootstrap::missing_root_message;
use uthelp_core::bootstrap::setup_instructions;
use uthelp_core::config::MenuConfig;
use uthelp_core::controller::MenuController;
use uthelp_exec::executor::ProcessScriptExecutor;

mod signals;
mod ui;

const LOG_ENV: &str = "UTHELP_LOG";
const LOG_FILE: &str = "uthelp.log";

#[derive(Parser, Debug)]
#[command(
    name = "uthelp",
    about = "Browse a directory of utility scripts and run them from a terminal menu",
    disable_version_flag = true
)]
struct Cli {
    /// Print the version and exit
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Scripts directory (defaults to ./uthelp)
    #[arg(long, env = "UTHELP_ROOT", value_name = "PATH")]
    root: Option<PathBuf>,
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();
    if cli.version {
        println!("uthelp version {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    init_logging()?;

    let cwd = env::current_dir().context("cannot determine the current directory")?;
    let config = MenuConfig::resolve(cli.root, &cwd);
    info!(root = %config.root.display(), "starting menu");

    if !config.root.is_dir() {
        return offer_bootstrap(&config.root);
    }

    let controller = MenuController::open(config).context("failed to open the scripts directory")?;
    ui::run(controller, ProcessScriptExecutor).context("terminal session failed")?;
    Ok(0)
}

/// Logs go to a file so they never tear the menu; nothing is written
/// unless `UTHELP_LOG` is set.
fn init_logging() -> anyhow::Result<()> {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return Ok(());
    };
    let path = env::temp_dir().join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn offer_bootstrap(root: &Path) -> anyhow::Result<i32> {
    eprintln!("{}", missing_root_message(root));
    println!("{}", setup_instructions(root));
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    if !is_affirmative(&answer) {
        return Ok(1);
    }

    match create_sample_root(root) {
        Ok(_) => {
            println!("uthelp directory and example script created successfully.");
            println!();
            println!("please run the command \"uthelp\" again to start the utility menu.");
            Ok(0)
        }
        Err(err) => {
            eprintln!("Error creating directory and script: {err}");
            Ok(1)
        }
    }
}
