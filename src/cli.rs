use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::api::{self, Extractor};
use crate::error::Result;
use crate::log::ActivityLogger;
use crate::runtime::block_on;
use crate::store::{unique_slug, StaticDir};
use crate::tools::render::wrap_document;
use crate::types::{ApiResponse, Config, ExtractedRecipe, RendererKind};

#[derive(Parser)]
#[command(
    name = "recipe-porter",
    version,
    about = "Convert recipe pages into clean HTML (JSON output)"
)]
pub struct Cli {
    /// Config file (JSON). Defaults to the user config file when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a recipe URL and convert it
    Convert(ConvertArgs),
    /// Convert markup from a file, or stdin with `-`
    Parse(ParseArgs),
    /// Convert several URLs with bounded concurrency
    Batch(BatchArgs),
    /// Show the activity log, most recent first
    Logs(LogsArgs),
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Skip the allow-list sanitizer
    #[arg(long)]
    raw: bool,
    /// Wrap the fragment in a standalone HTML document
    #[arg(long)]
    document: bool,
    /// Split narrative instructions into steps at boundary phrases
    #[arg(long = "split-steps")]
    split_steps: bool,
    /// Also write `<slug>.html` into this directory
    #[arg(long, value_name = "DIR")]
    save: Option<PathBuf>,
}

#[derive(Args)]
struct ConvertArgs {
    url: String,
    /// Plain HTTP fetch instead of rendering the page (no scripts run)
    #[arg(long)]
    http: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct ParseArgs {
    /// Path to an HTML file, or `-` for stdin
    input: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct BatchArgs {
    #[arg(required = true)]
    urls: Vec<String>,
    #[arg(long, default_value_t = 4)]
    concurrency: usize,
    /// Plain HTTP fetch instead of rendering the page (no scripts run)
    #[arg(long)]
    http: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct LogsArgs {
    /// Only failed operations
    #[arg(long)]
    errors: bool,
    /// Only lines mentioning this domain
    #[arg(long)]
    domain: Option<String>,
    #[arg(long, default_value_t = 50)]
    limit: usize,
}

#[derive(Serialize)]
struct Converted {
    name: String,
    slug: String,
    html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved: Option<PathBuf>,
}

#[derive(Serialize)]
struct BatchItem {
    url: String,
    #[serde(flatten)]
    result: ApiResponse<Converted>,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.cmd {
        Command::Convert(args) => {
            let config = with_overrides(config, &args.output, args.http);
            finish(convert(config, &args.url, &args.output));
        }
        Command::Parse(args) => {
            let config = with_overrides(config, &args.output, false);
            finish(parse(&config, &args.input, &args.output));
        }
        Command::Batch(args) => {
            let config = with_overrides(config, &args.output, args.http);
            finish(batch(config, args.urls, args.concurrency, &args.output));
        }
        Command::Logs(args) => finish(logs(&args)),
    }
    Ok(())
}

fn with_overrides(mut config: Config, output: &OutputArgs, http: bool) -> Config {
    if output.raw {
        config.sanitize = false;
    }
    if output.split_steps {
        config.normalize.split_narrative = true;
    }
    if http {
        config.fetch.renderer = RendererKind::Http;
    }
    config
}

fn convert(config: Config, url: &str, output: &OutputArgs) -> Result<Converted> {
    let extractor = Extractor::from_config(config)?;
    let extracted = block_on(extractor.extract_recipe(url))?;
    finalize(extracted, output)
}

fn parse(config: &Config, input: &str, output: &OutputArgs) -> Result<Converted> {
    let markup = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };
    finalize(api::convert_markup(&markup, config)?, output)
}

fn batch(
    config: Config,
    urls: Vec<String>,
    concurrency: usize,
    output: &OutputArgs,
) -> Result<Vec<BatchItem>> {
    let extractor = Extractor::from_config(config)?;
    let results = block_on(extractor.extract_many(urls.clone(), concurrency));

    Ok(urls
        .into_iter()
        .zip(results)
        .map(|(url, result)| BatchItem {
            url,
            result: envelope(result.and_then(|r| finalize(r, output))),
        })
        .collect())
}

fn logs(args: &LogsArgs) -> Result<Vec<String>> {
    let logger = ActivityLogger::new()?;
    let mut lines = logger.read_logs(args.domain.as_deref(), args.errors)?;
    lines.truncate(args.limit);
    Ok(lines)
}

fn finalize(extracted: ExtractedRecipe, output: &OutputArgs) -> Result<Converted> {
    let ExtractedRecipe { html, name } = extracted;
    let html = if output.document {
        wrap_document(&name, &html)
    } else {
        html
    };

    let saved = match &output.save {
        Some(dir) => Some(StaticDir::new(dir)?.save(&name, &html)?),
        None => None,
    };

    Ok(Converted {
        slug: unique_slug(&name),
        name,
        html,
        saved,
    })
}

fn envelope<T>(res: Result<T>) -> ApiResponse<T> {
    match res {
        Ok(v) => ApiResponse::ok(v),
        Err(e) => ApiResponse::err(e.to_string()),
    }
}

fn finish<T: Serialize>(res: Result<T>) {
    print_json(&envelope(res));
}

fn print_json<T: Serialize>(val: &T) {
    match serde_json::to_string_pretty(val) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("failed to serialize output: {e}"),
    }
}
