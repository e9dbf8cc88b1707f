//! qabot: entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Resolve effective log level (CLI `-v` flags > env > config)
//!   4. Init logger once
//!   5. Load the knowledge base
//!   6. Build the translation backend
//!   7. One-shot (`-q`) → answer and exit
//!   8. Probe the translation service
//!   9. Spawn Ctrl-C → shutdown signal watcher
//!  10. Run the console until shutdown, `/quit` or EOF

use std::sync::Arc;

use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::info;

use qabot::chat::ChatService;
use qabot::comms::Console;
use qabot::error::AppError;
use qabot::knowledge::KnowledgeBase;
use qabot::lang::Lang;
use qabot::translate::{self, RetryPolicy, TranslationService};
use qabot::{config, logger};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present: ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level, args.log_level.is_some(), config.log_file.as_deref())?;

    info!(
        bot_name = %config.bot_name,
        kb_path = %config.knowledge.path.display(),
        translation_provider = %config.translation.provider,
        effective_log_level = %effective_log_level,
        "config loaded"
    );

    let knowledge = Arc::new(KnowledgeBase::load(&config.knowledge.path));

    let translator =
        translate::providers::build(&config.translation, config.translation_api_key.clone())?;
    let translation = TranslationService::new(translator, RetryPolicy::from_config(&config.translation));
    let service = ChatService::new(knowledge, translation);

    if let Some(query) = args.query {
        let outcome = service.handle_query(&query).await;
        println!("{}", outcome.english_response);
        if outcome.lang == Lang::Arabic {
            println!("(Arabic): {}", outcome.reply);
        }
        return Ok(());
    }

    let translation_available = service.translation().check_connection().await;
    info!(translation_available, "translation service probed");

    // Shared shutdown token: Ctrl-C cancels it.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    let mut console =
        Console::new(config.bot_name.as_str(), service, config.console.history_cap, translation_available);
    let stdin = BufReader::new(tokio::io::stdin());
    console.run(stdin, &mut std::io::stdout(), shutdown).await?;

    info!("shutdown complete");
    Ok(())
}

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
    query: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;
    let mut query = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: qabot [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -q, --query <TEXT>         Answer one question and exit");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                std::process::exit(0);
            }
            "-f" | "--config" => match iter.next() {
                Some(path) => config_path = Some(path),
                None => {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            },
            "-q" | "--query" => match iter.next() {
                Some(text) => query = Some(text),
                None => {
                    eprintln!("error: -q/--query requires a text argument");
                    std::process::exit(1);
                }
            },
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    // Each -v raises verbosity one tier:
    //   -v      → warn
    //   -vv     → info
    //   -vvv    → debug  (match scores, translation attempts)
    //   -vvvv+  → trace
    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { log_level, config_path, query }
}
