use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use omnimark::{Config, Error, Platform, Target};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "omnimark.toml";

#[derive(Parser)]
#[command(name = "omnimark")]
#[command(about = "Render studio markup to HTML, Typst, PDF, JSON, social previews or repurpose prompts")]
struct Cli {
    /// Input markup file (reads stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Platform used by the preview format
    #[arg(short, long, default_value = "x")]
    platform: Platform,

    /// Target format used by the repurpose format
    #[arg(short, long, default_value = "social_post")]
    target: Target,

    /// Output file (defaults to stdout; PDF defaults to the input name with .pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Name the output file after this prompt, e.g. "Spring Sale" -> export-spring-sale.html
    #[arg(short, long, conflicts_with = "output")]
    export: Option<String>,

    /// File name prefix used with --export
    #[arg(long, default_value = "export")]
    export_prefix: String,

    /// Config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Typst,
    Pdf,
    Json,
    Preview,
    Repurpose,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Typst => "typ",
            Format::Pdf => "pdf",
            Format::Json => "json",
            Format::Preview | Format::Repurpose => "txt",
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = load_config(cli.config.as_deref())?;
    let markup = read_input(cli.input.as_deref())?;

    let bytes = match cli.format {
        Format::Html => omnimark::markup_to_html(&markup, &config).into_bytes(),
        Format::Typst => omnimark::markup_to_typst(&markup, &config).into_bytes(),
        Format::Pdf => omnimark::markup_to_pdf(&markup, &config)?,
        Format::Json => omnimark::document_to_json(&omnimark::render(&markup))?.into_bytes(),
        Format::Preview => {
            let mut text = omnimark::preview(&markup, cli.platform, &config.preview);
            text.push('\n');
            text.into_bytes()
        }
        Format::Repurpose => {
            let mut text = omnimark::repurpose_prompt(&markup, cli.target, &config.repurpose);
            text.push('\n');
            text.into_bytes()
        }
    };

    match output_path(&cli) {
        Some(path) => {
            fs::write(&path, &bytes).map_err(|e| io_error(&path, e))?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote output");
            println!("Created {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|_| stdout.flush())
                .map_err(|e| io_error(Path::new("<stdout>"), e))?;
        }
    }

    Ok(())
}

/// Where to write the rendered bytes; `None` means stdout.
fn output_path(cli: &Cli) -> Option<PathBuf> {
    if let Some(output) = &cli.output {
        return Some(output.clone());
    }
    if let Some(prompt) = &cli.export {
        let name = omnimark::export_file_name(prompt, &cli.export_prefix, cli.format.extension());
        return Some(PathBuf::from(name));
    }
    match (cli.format, &cli.input) {
        (Format::Pdf, Some(input)) if !is_stdio(input) => Some(input.with_extension("pdf")),
        _ => None,
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config, Error> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                tracing::warn!(path = %path.display(), "config file not found, using defaults");
            }
            Config::load(path)
        }
        None => Config::load(Path::new(DEFAULT_CONFIG_PATH)),
    }
}

fn read_input(input: Option<&Path>) -> Result<String, Error> {
    match input {
        Some(path) if !is_stdio(path) => {
            fs::read_to_string(path).map_err(|e| io_error(path, e))
        }
        _ => {
            let mut markup = String::new();
            io::stdin()
                .read_to_string(&mut markup)
                .map_err(|e| io_error(Path::new("<stdin>"), e))?;
            Ok(markup)
        }
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn io_error(path: &Path, source: io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}
