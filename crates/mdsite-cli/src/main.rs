//! mdsite - build static HTML sites from Markdown
//!
//! Usage:
//!   mdsite [-v] <COMMAND>
//!
//! Commands:
//!   build    Generate the whole site (default paths come from mdsite.toml)
//!   render   Convert one file and print the HTML
//!   inspect  Show how a file is split into blocks and spans
//!   stats    Show document statistics
//!   config   Print the effective site configuration

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context};
use clap::{ArgAction, Args, Parser, Subcommand};
use mdsite_cli::site;
use mdsite_cli::SiteConfig;
use mdsite_core::lexer::{self, Block};
use mdsite_core::parser::inline_units;
use mdsite_core::{inline, BlockType, SpanKind};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "mdsite", version)]
#[command(about = "Build a static HTML site from a directory of Markdown files")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the site into the output directory
    Build(BuildArgs),
    /// Convert one Markdown file and print the HTML
    Render {
        file: PathBuf,
        /// Wrap the output in this template
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// Base path for root-relative links (only with --template)
        #[arg(long, default_value = "/")]
        base_path: String,
    },
    /// Show the blocks and inline spans of a Markdown file
    Inspect {
        file: PathBuf,
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },
    /// Show block counts and size of a Markdown file
    Stats { file: PathBuf },
    /// Print the effective configuration as TOML
    Config(BuildArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// Config file (defaults to ./mdsite.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory of Markdown sources
    #[arg(long)]
    content: Option<PathBuf>,
    /// Directory copied verbatim into the output
    #[arg(long = "static")]
    static_dir: Option<PathBuf>,
    /// Page template with {{ Title }} and {{ Content }}
    #[arg(short, long)]
    template: Option<PathBuf>,
    /// Output directory (removed and recreated)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Prefix for root-relative href/src links
    #[arg(long)]
    base_path: Option<String>,
}

impl BuildArgs {
    fn resolve(self) -> anyhow::Result<SiteConfig> {
        let mut config = SiteConfig::load(self.config.as_deref())?;
        if let Some(dir) = self.content {
            config.content_dir = dir;
        }
        if let Some(dir) = self.static_dir {
            config.static_dir = dir;
        }
        if let Some(path) = self.template {
            config.template = path;
        }
        if let Some(dir) = self.output {
            config.output_dir = dir;
        }
        if let Some(base) = self.base_path {
            config.base_path = base;
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Build(args) => cmd_build(args.resolve()?),
        Command::Render {
            file,
            template,
            base_path,
        } => cmd_render(&file, template.as_deref(), &base_path),
        Command::Inspect { file, json } => cmd_inspect(&file, json),
        Command::Stats { file } => cmd_stats(&file),
        Command::Config(args) => {
            let config = args.resolve()?;
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn read_markdown(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

// =============================================================================
// Build Command
// =============================================================================

fn cmd_build(config: SiteConfig) -> anyhow::Result<()> {
    log::info!(
        "building {} -> {} (base path {})",
        config.content_dir.display(),
        config.output_dir.display(),
        site::normalize_base_path(&config.base_path)
    );

    let report = site::build_site(&config)?;

    log::info!(
        "{} page(s) generated, {} file(s) copied",
        report.pages,
        report.assets
    );

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("  - {}: {}", failure.path.display(), failure.message);
        }
        bail!(
            "{} of {} page(s) failed",
            report.failures.len(),
            report.failures.len() + report.pages
        );
    }

    Ok(())
}

// =============================================================================
// Render Command
// =============================================================================

fn cmd_render(file: &Path, template: Option<&Path>, base_path: &str) -> anyhow::Result<()> {
    let markdown = read_markdown(file)?;

    let html = match template {
        Some(template_path) => {
            let template = fs::read_to_string(template_path).with_context(|| {
                format!("failed to read template '{}'", template_path.display())
            })?;
            site::generate_page(&markdown, &template, base_path)
        }
        None => mdsite_core::markdown_to_html(&markdown),
    }
    .with_context(|| format!("failed to convert '{}'", file.display()))?;

    println!("{html}");
    Ok(())
}

// =============================================================================
// Inspect Command
// =============================================================================

fn cmd_inspect(file: &Path, json: bool) -> anyhow::Result<()> {
    let markdown = read_markdown(file)?;
    let source = lexer::normalize_newlines(&markdown);
    let blocks = lexer::segment(&source);

    if json {
        let doc = JsonDocument {
            title: mdsite_core::extract_title(&source).ok(),
            blocks: blocks.iter().enumerate().map(json_block).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    for (index, block) in blocks.iter().enumerate() {
        let first_line = block.lines().next().unwrap_or_default();
        println!(
            "{:>4}  {:<15} {:>6}..{:<6} {}",
            index,
            block.block_type().as_str(),
            block.span.start,
            block.span.end,
            first_line
        );
    }

    Ok(())
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    title: Option<&'a str>,
    blocks: Vec<JsonBlock<'a>>,
}

#[derive(Serialize)]
struct JsonBlock<'a> {
    index: usize,
    #[serde(rename = "type")]
    block_type: &'static str,
    start: u32,
    end: u32,
    text: &'a str,
    units: Vec<Vec<JsonSpan>>,
}

#[derive(Serialize)]
struct JsonSpan {
    kind: &'static str,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
}

fn json_block<'a>((index, block): (usize, &Block<'a>)) -> JsonBlock<'a> {
    let block_type = block.block_type();
    let units = inline_units(block, block_type)
        .iter()
        .map(|unit| {
            inline::split_spans(unit)
                .into_iter()
                .map(|span| JsonSpan {
                    kind: span.kind.as_str(),
                    text: span.text.to_string(),
                    target: span.target.map(str::to_string),
                })
                .collect()
        })
        .collect();

    JsonBlock {
        index,
        block_type: block_type.as_str(),
        start: block.span.start,
        end: block.span.end,
        text: block.text,
        units,
    }
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(file: &Path) -> anyhow::Result<()> {
    let markdown = read_markdown(file)?;
    let stats = DocumentStats::from_markdown(&markdown);

    println!("Document Statistics");
    println!("-------------------");
    println!(
        "Title:        {}",
        mdsite_core::extract_title(&markdown).unwrap_or("(none)")
    );
    println!();
    println!("Content:");
    println!("  Total blocks:   {}", stats.total_blocks);
    println!("  Headings:       {}", stats.headings);
    println!("  Paragraphs:     {}", stats.paragraphs);
    println!("  Code blocks:    {}", stats.code_blocks);
    println!("  Quotes:         {}", stats.quotes);
    println!("  Lists:          {}", stats.lists);
    println!();
    println!("Inline:");
    println!("  Links:          {}", stats.links);
    println!("  Images:         {}", stats.images);
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);

    Ok(())
}

#[derive(Default)]
struct DocumentStats {
    total_blocks: usize,
    headings: usize,
    paragraphs: usize,
    code_blocks: usize,
    quotes: usize,
    lists: usize,
    links: usize,
    images: usize,
    chars: usize,
    words: usize,
    lines: usize,
}

impl DocumentStats {
    fn from_markdown(markdown: &str) -> Self {
        let source = lexer::normalize_newlines(markdown);
        let mut stats = Self {
            chars: markdown.chars().count(),
            words: markdown.split_whitespace().count(),
            lines: markdown.lines().count(),
            ..Self::default()
        };

        for block in lexer::segment(&source) {
            stats.total_blocks += 1;
            let block_type = block.block_type();
            match block_type {
                BlockType::Heading => stats.headings += 1,
                BlockType::Paragraph => stats.paragraphs += 1,
                BlockType::Code => stats.code_blocks += 1,
                BlockType::Quote => stats.quotes += 1,
                BlockType::UnorderedList | BlockType::OrderedList => stats.lists += 1,
            }

            for unit in inline_units(&block, block_type) {
                for span in inline::split_spans(&unit) {
                    match span.kind {
                        SpanKind::Link => stats.links += 1,
                        SpanKind::Image => stats.images += 1,
                        _ => {}
                    }
                }
            }
        }

        stats
    }
}
