#![forbid(unsafe_code)]

mod config;
mod logging;
mod render;
mod repl;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use quiz_core::Clock;
use services::{QuizLoopService, QuizShell};
use storage::{AttemptLog, FileAttemptLog, JsonQuizFile, QuizSource, SqliteSession};
use tracing::debug;

use crate::config::{AppConfig, Args};

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let quiz_file = Arc::new(JsonQuizFile::new(config.quiz_file.clone()));

    if config.list {
        let names = quiz_file
            .quiz_names()
            .await
            .with_context(|| format!("cannot read {}", config.quiz_file.display()))?;
        for name in names {
            println!("{name}");
        }
        return Ok(());
    }

    let name = config.quiz_name.as_deref().context("missing quiz name")?;

    config::prepare_sqlite_file(&config.db_url)?;
    let db = SqliteSession::connect(&config.db_url)
        .await
        .with_context(|| format!("cannot open database {}", config.db_url))?;
    debug!(db = %config.db_url, "database connected");

    let attempts = config
        .attempt_log
        .map(|path| Arc::new(FileAttemptLog::new(path)) as Arc<dyn AttemptLog>);
    let service = QuizLoopService::new(
        Clock::default(),
        quiz_file.clone(),
        quiz_file,
        Arc::new(db.clone()),
    )
    .with_attempt_log(attempts);

    let mut shell = QuizShell::start(service, name)
        .await
        .with_context(|| format!("cannot start quiz {name:?}"))?;

    let stdin = io::stdin();
    let result = repl::run_repl(
        &mut shell,
        &mut stdin.lock(),
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await;
    db.close().await;
    result.context("terminal i/o failed")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let outcome = match AppConfig::from_args(args) {
        Ok(config) => run(config).await,
        Err(e) => Err(e),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
