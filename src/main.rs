//! 命令行入口

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use dict_translator::env::{self, EnvVar};
use dict_translator::extract::{HtmlTextSource, PlainTextSource, TextSource};
use dict_translator::translation::{
    ConfigManager, TranslationError, TranslationResult, TranslatorConfig, TranslatorService,
};

#[derive(Parser, Debug)]
#[command(name = "dict-translator", version)]
#[command(about = "Dictionary-substitution English to Chinese translator")]
struct Cli {
    /// Input file (.html/.htm parsed as HTML, otherwise plain text) or '-' for stdin
    input: Option<PathBuf>,

    /// Translate the given text as-is
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Configuration file (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip network sources
    #[arg(long)]
    offline: bool,

    /// Disable the persistent dictionary cache
    #[arg(long)]
    no_cache: bool,

    /// Per-source fetch timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Dictionary source URL, repeatable; replaces configured sources
    #[arg(long = "source", value_name = "URL")]
    sources: Vec<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Print environment variable documentation and exit
    #[arg(long)]
    env_docs: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Do not print the dictionary status line
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| env::core::LogLevel::get_or_default("warn".to_string()));
    let level = level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::WARN);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_ansi(!env::core::NoColor::get_or_default(false))
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> TranslationResult<TranslatorConfig> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::from_file(path)?,
        None => ConfigManager::new()?,
    };
    let mut config = manager.into_config();

    if cli.offline {
        config.offline = true;
    }
    if cli.no_cache {
        config.cache_enabled = false;
    }
    if let Some(timeout) = cli.timeout {
        config.fetch_timeout_ms = timeout;
    }
    if !cli.sources.is_empty() {
        config.sources = cli.sources.clone();
    }

    config.validate()?;
    Ok(config)
}

fn read_input(path: &Path) -> TranslationResult<Box<dyn TextSource>> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(Box::new(PlainTextSource::new(text)));
    }

    let data = std::fs::read(path)
        .map_err(|e| TranslationError::IoError(format!("{}: {}", path.display(), e)))?;

    let is_html = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));

    if is_html {
        Ok(Box::new(HtmlTextSource::from_bytes(&data)?))
    } else {
        Ok(Box::new(PlainTextSource::new(
            String::from_utf8_lossy(&data).into_owned(),
        )))
    }
}

async fn run(cli: Cli) -> TranslationResult<()> {
    let config = load_config(&cli)?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let source: Box<dyn TextSource> = match (&cli.text, &cli.input) {
        (Some(text), _) => Box::new(PlainTextSource::verbatim(text.clone())),
        (None, Some(path)) => read_input(path)?,
        (None, None) => read_input(Path::new("-"))?,
    };

    let mut service = TranslatorService::from_config(config).await?;
    if !cli.quiet {
        eprintln!("{}", service.status().summary());
    }

    let page = service.translate_source(&*source)?;
    println!("{}", page.translated);

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.env_docs {
        print!("{}", env::generate_env_docs());
        return ExitCode::SUCCESS;
    }

    init_logging(&cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("错误: {}", e);
            ExitCode::FAILURE
        }
    }
}
