use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;

pub const DEFAULT_DB_URL: &str = "sqlite::memory:";

/// Take SQL quizzes against a live database.
#[derive(Debug, Parser)]
#[command(name = "sql-quiz", version)]
pub struct Args {
    /// Quiz document (JSON) to read.
    #[arg(value_name = "QUIZ_FILE", env = "SQL_QUIZ_FILE")]
    pub quiz_file: PathBuf,

    /// Name of the quiz inside the document.
    #[arg(value_name = "QUIZ_NAME", required_unless_present = "list")]
    pub quiz_name: Option<String>,

    /// Database to run statements against.
    #[arg(long, value_name = "URL", env = "SQL_QUIZ_DB_URL", default_value = DEFAULT_DB_URL)]
    pub db: String,

    /// Where correct answers are appended [default: <QUIZ_FILE>.log].
    #[arg(long, value_name = "PATH", conflicts_with = "no_attempt_log")]
    pub attempt_log: Option<PathBuf>,

    /// Don't record correct answers.
    #[arg(long)]
    pub no_attempt_log: bool,

    /// List the quizzes in QUIZ_FILE and exit.
    #[arg(long)]
    pub list: bool,

    /// Log debug output to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Settings resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub quiz_file: PathBuf,
    pub quiz_name: Option<String>,
    pub db_url: String,
    pub attempt_log: Option<PathBuf>,
    pub list: bool,
}

impl AppConfig {
    /// # Errors
    ///
    /// Fails if `--db` is blank.
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        if args.db.trim().is_empty() {
            bail!("invalid --db value: {:?}", args.db);
        }
        let attempt_log = if args.no_attempt_log {
            None
        } else {
            Some(
                args.attempt_log
                    .unwrap_or_else(|| default_attempt_log(&args.quiz_file)),
            )
        };

        Ok(Self {
            db_url: normalize_sqlite_url(&args.db),
            quiz_file: args.quiz_file,
            quiz_name: args.quiz_name,
            attempt_log,
            list: args.list,
        })
    }
}

fn default_attempt_log(quiz_file: &Path) -> PathBuf {
    storage::FileAttemptLog::beside(quiz_file).path().to_path_buf()
}

/// Turns a bare path or `sqlite:` URL into an absolute `sqlite://` URL.
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == DEFAULT_DB_URL || trimmed.starts_with("sqlite://") {
        return trimmed.to_owned();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Creates the database file (and its directory) so sqlx can open it.
///
/// # Errors
///
/// Fails if the URL has no path or the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> anyhow::Result<()> {
    if db_url == DEFAULT_DB_URL {
        return Ok(());
    }

    let Some(path) = db_url.strip_prefix("sqlite://") else {
        bail!("invalid --db value: {db_url}");
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        bail!("invalid --db value: {db_url}");
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("sql-quiz").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn memory_and_full_urls_pass_through() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/quiz.db"),
            "sqlite:///tmp/quiz.db"
        );
    }

    #[test]
    fn bare_paths_become_absolute_urls() {
        assert_eq!(normalize_sqlite_url("/tmp/quiz.db"), "sqlite:///tmp/quiz.db");
        assert_eq!(normalize_sqlite_url("sqlite:/tmp/quiz.db"), "sqlite:///tmp/quiz.db");
        assert!(normalize_sqlite_url("quiz.db").starts_with("sqlite:///"));
    }

    #[test]
    fn attempt_log_defaults_beside_quiz_file() {
        let config = AppConfig::from_args(parse(&["quizzes.json", "movies"])).unwrap();
        assert_eq!(config.quiz_name.as_deref(), Some("movies"));
        assert_eq!(config.attempt_log, Some(PathBuf::from("quizzes.json.log")));

        let config =
            AppConfig::from_args(parse(&["quizzes.json", "movies", "--no-attempt-log"])).unwrap();
        assert_eq!(config.attempt_log, None);
    }

    #[test]
    fn quiz_name_is_optional_only_when_listing() {
        let argv = ["sql-quiz", "quizzes.json"];
        assert!(Args::try_parse_from(argv).is_err());

        let config = AppConfig::from_args(parse(&["quizzes.json", "--list"])).unwrap();
        assert!(config.list);
        assert_eq!(config.quiz_name, None);
    }

    #[test]
    fn prepare_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("quiz.db");
        let url = format!("sqlite://{}", db.display());
        prepare_sqlite_file(&url).unwrap();
        assert!(db.exists());
        prepare_sqlite_file(DEFAULT_DB_URL).unwrap();
    }
}
