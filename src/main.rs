// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use panel_translate::app_config::{self, Backend, Config};
use panel_translate::text_block::TextBlock;
use panel_translate::translation::{TranslationRequest, TranslationRouter};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

// @parses: Backend display name such as "GPT-4o"
fn parse_backend(name: &str) -> Result<Backend, String> {
    name.parse::<Backend>().map_err(|_| {
        let names: Vec<&str> = Backend::ALL.iter().map(|b| b.display_name()).collect();
        format!("unknown backend '{}', expected one of: {}", name, names.join(", "))
    })
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate the text blocks of a page (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for panel-translate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args, Debug)]
struct TranslateArgs {
    /// JSON array of text blocks detected on the page
    #[arg(long, value_name = "BLOCKS_JSON")]
    blocks: Option<PathBuf>,

    /// Page image
    #[arg(long, value_name = "IMAGE")]
    image: Option<PathBuf>,

    /// Page image with the original text removed (defaults to --image)
    #[arg(long, value_name = "IMAGE")]
    inpainted: Option<PathBuf>,

    /// Backend to use, e.g. "Google Translate" or "GPT-4o"
    #[arg(short, long, value_parser = parse_backend)]
    backend: Option<Backend>,

    /// Source language (e.g., 'Japanese', 'Korean')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language (e.g., 'English', 'French')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Extra context about the comic for chat models
    #[arg(short = 'x', long)]
    extra_context: Option<String>,

    /// Output file for the translated blocks (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// panel-translate - comic page translation
///
/// Translates the text blocks detected on a comic page using machine
/// translation services or multimodal chat models.
#[derive(Parser, Debug)]
#[command(name = "panel-translate")]
#[command(version)]
#[command(about = "Translate the text blocks of a comic page")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "panel-translate sends the text blocks of a comic page to a translation backend and writes the translations back.

EXAMPLES:
    panel-translate --blocks page.json --image page.png                     # Translate using default config
    panel-translate --blocks page.json --image page.png -b DeepL -o out.json
    panel-translate --blocks page.json --image page.png --inpainted clean.png -b GPT-4o -s Korean
    panel-translate completions bash > panel-translate.bash                 # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED BACKENDS:
    Google Translate, DeepL, Yandex, Azure AI Translator,
    GPT-4o, GPT-3.5, Claude-3-Opus, Claude-3.5-Sonnet, Claude-3-Haiku,
    Gemini-1.5-Flash, Gemini-1.5-Pro")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger itself lets everything through; the max level filters
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "panel-translate", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    }
}

// @loads: Config from file, or writes a default one when missing
fn load_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        return Config::from_file(config_path);
    }

    warn!("Config file not found at '{}', creating default config.", config_path);
    let config = Config::default();
    config.save(config_path)
        .context(format!("Failed to write default config to file: {}", config_path))?;
    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let blocks_path = options.blocks.as_ref()
        .ok_or_else(|| anyhow!("--blocks is required"))?;
    let image_path = options.image.as_ref()
        .ok_or_else(|| anyhow!("--image is required"))?;

    let mut config = load_config(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(backend) = options.backend {
        config.translation.backend = backend;
    }
    if let Some(source_language) = &options.source_language {
        config.source_language = source_language.clone();
    }
    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(extra_context) = &options.extra_context {
        config.translation.extra_context = extra_context.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(level_filter(&config.log_level));
    }

    config.validate()
        .context("Configuration validation failed")?;

    let blocks_json = std::fs::read_to_string(blocks_path)
        .context(format!("Failed to read blocks file: {}", blocks_path.display()))?;
    let mut blocks: Vec<TextBlock> = serde_json::from_str(&blocks_json)
        .context(format!("Failed to parse blocks file: {}", blocks_path.display()))?;

    let image = image::open(image_path)
        .context(format!("Failed to open image: {}", image_path.display()))?;
    let inpainted = match &options.inpainted {
        Some(path) => Some(image::open(path)
            .context(format!("Failed to open inpainted image: {}", path.display()))?),
        None => None,
    };

    let router = TranslationRouter::from_config(&config.translation);
    let request = TranslationRequest::new(
        config.translation.backend,
        &config.source_language,
        &config.target_language,
        &image,
    )
    .with_inpainted_image(inpainted.as_ref().unwrap_or(&image))
    .with_extra_context(&config.translation.extra_context);

    router.translate(&mut blocks, request).await
        .context("Translation failed")?;

    let translated = blocks.iter().filter(|b| b.is_translated()).count();
    let output = serde_json::to_string_pretty(&blocks)?;
    match &options.output {
        Some(path) => {
            std::fs::write(path, output)
                .context(format!("Failed to write output file: {}", path.display()))?;
            info!("Success: {}/{} blocks translated into {:?}", translated, blocks.len(), path);
        }
        None => {
            println!("{}", output);
            info!("Success: {}/{} blocks translated", translated, blocks.len());
        }
    }

    Ok(())
}
