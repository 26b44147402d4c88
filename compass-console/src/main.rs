//! compass-console - Interview analysis operator console
//!
//! Thin terminal front-end over the session core: resolves configuration,
//! initializes the session from the remote config store, then drives the
//! core's operations from a line-oriented prompt. All business logic lives
//! in the library; this binary only renders plain data.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use compass_common::ConsoleConfig;
use compass_console::{AnalysisClient, ConfigClient, OperatorSession, VideoAsset};

#[derive(Parser)]
#[command(name = "compass-console", about = "Operator console for the interview analysis backend")]
struct Args {
    /// Backend base URL (overrides COMPASS_BASE_URL and the TOML config)
    #[arg(long)]
    base_url: Option<String>,

    /// Export directory (overrides COMPASS_EXPORT_DIR and the TOML config)
    #[arg(long)]
    export_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = ConsoleConfig::resolve(args.base_url.as_deref(), args.export_dir.as_deref());

    info!("Starting compass-console (operator console)");
    info!("Backend: {}", config.base_url);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config_client = ConfigClient::new(&config.base_url)?;
    let analysis_client = AnalysisClient::new(&config.base_url)?;

    let mut session = OperatorSession::new();
    session.initialize(&config_client).await;
    println!("status | {}", session.status());

    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("compass> ");
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => continue,
            "load" => match tokio::fs::read(rest).await {
                Ok(bytes) => {
                    let file_name = Path::new(rest)
                        .file_name()
                        .and_then(|name| name.to_str())
                        .unwrap_or(rest)
                        .to_string();
                    session.select_video(VideoAsset::from_bytes(file_name, bytes));
                    println!("source | {}", session.session_line(Local::now().date_naive()));
                }
                Err(error) => println!("error  | cannot read {}: {}", rest, error),
            },
            "clear" => {
                session.clear_video();
                println!("source | cleared");
            }
            "add" => {
                session.add_rubric_label(&config_client, rest).await;
                print_rubric(&session);
            }
            "rm" => {
                session.remove_rubric_label(&config_client, rest).await;
                print_rubric(&session);
            }
            "rubric" => print_rubric(&session),
            "model" => {
                if rest.is_empty() {
                    println!("model  | current: {}", session.models().current());
                    for model in session.models().available() {
                        println!("       |   {}", model);
                    }
                } else {
                    session.select_model(&config_client, rest).await;
                    println!("model  | current: {}", session.models().current());
                }
            }
            "run" => {
                session.run_analysis(&analysis_client).await;
                print_result(&session);
            }
            "show" => print_result(&session),
            "export" => match session.export(&config.export_dir, &config.export_prefix)? {
                Some(path) => println!("export | {}", path.display()),
                None => println!("export | disabled: no analysis result"),
            },
            "status" => {}
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("error  | unknown command: {}", other),
        }

        println!("status | {}", session.status());
    }

    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  load <path>    select the source video");
    println!("  clear          drop the selected video");
    println!("  rubric         show the working rubric");
    println!("  add <label>    add a rubric dimension (commits)");
    println!("  rm <label>     remove a rubric dimension (commits)");
    println!("  model [name]   show or select the model");
    println!("  run            submit the video for analysis");
    println!("  show           show the last result");
    println!("  export         write the result as JSON");
    println!("  status         show the status line");
    println!("  quit           leave the console");
}

fn print_rubric(session: &OperatorSession) {
    let draft = session.rubric().draft();
    if draft.is_empty() {
        println!("rubric | (empty)");
        return;
    }
    for label in draft {
        println!("rubric | {}", label);
    }
}

fn print_result(session: &OperatorSession) {
    println!("head   | {}", session.headline());
    println!("meta   | {}", session.session_line(Local::now().date_naive()));
    if let Some(result) = session.controller().result() {
        for score in &result.rubric {
            println!("score  | {} {}/5: {}", score.label, score.score, score.rationale);
        }
        println!("summary| {}", result.overall_summary);
    }
}
