use clap::{Arg, ArgAction, Command};
use quizboard::app::App;
use quizboard::config::GameConfig;
use quizboard::{error, QuizError, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{}: {}", error::title(&err), error::user_friendly_message(&err));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let matches = Command::new("quizboard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build and play a Jeopardy-style trivia board in the terminal")
        .arg(
            Arg::new("questions")
                .long("questions")
                .short('q')
                .value_name("FILE")
                .help("Load a JSON question set and go straight to team setup"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Read settings from this TOML file instead of the default location"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Write logs here (level from RUST_LOG, default info)"),
        )
        .arg(
            Arg::new("write-config")
                .long("write-config")
                .action(ArgAction::SetTrue)
                .help("Write the current settings to the config file and exit"),
        )
        .get_matches();

    let log_path = matches
        .get_one::<String>("log-file")
        .map(PathBuf::from)
        .unwrap_or_else(GameConfig::log_file_path);
    init_logging(&log_path)?;

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let write_config = matches.get_flag("write-config");
    let config = match &config_path {
        Some(path) if write_config && !path.exists() => GameConfig::default(),
        Some(path) => GameConfig::load_from(path)?,
        None => GameConfig::load()?,
    };

    if write_config {
        let written = match &config_path {
            Some(path) => {
                config.save_to(path)?;
                path.clone()
            }
            None => {
                config.save()?;
                GameConfig::config_file_path()?
            }
        };
        log::info!("Wrote settings to {}", written.display());
        println!("Wrote settings to {}", written.display());
        return Ok(());
    }
    log::info!("Starting quizboard with {:?}", config);

    let mut app = App::new(config);
    if let Some(path) = matches.get_one::<String>("questions") {
        app.open_question_file(Path::new(path)).await;
    }
    app.run().await
}

/// The terminal belongs to the TUI, so logs go to a file
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            QuizError::ConfigError(format!("Cannot open log file {}: {}", path.display(), e))
        })?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
    Ok(())
}
