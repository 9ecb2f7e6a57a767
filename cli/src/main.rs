//! reportkit CLI - styled report generation tool

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use reportkit::{
    DocumentPipeline, DocumentRequest, JsonFormat, JsonRenderer, MarkdownOptions,
    MarkdownRenderer, PipelineOptions, Preset, Renderer, RequestValidator, Style,
};

#[derive(Parser)]
#[command(name = "reportkit")]
#[command(version)]
#[command(about = "Generate styled report documents from JSON requests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documents from request files
    Build {
        /// Request JSON files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (stdout for a single request if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "markdown")]
        format: Format,

        /// Base style preset, overriding the one named in the request
        #[arg(long, value_enum)]
        preset: Option<PresetArg>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Omit YAML frontmatter from Markdown output
        #[arg(long)]
        no_frontmatter: bool,

        /// Pad or truncate table rows instead of rejecting them
        #[arg(long)]
        lenient: bool,

        /// Author used when a request names none
        #[arg(long, env = "REPORTKIT_AUTHOR")]
        author: Option<String>,
    },

    /// Check request files without generating anything
    Validate {
        /// Request JSON files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Accept table rows whose length differs from the header count
        #[arg(long)]
        lenient: bool,
    },

    /// List the built-in style presets
    Presets,

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Markdown preview
    #[value(alias = "md")]
    Markdown,
    /// Document and style as JSON
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    /// Blue accents, Helvetica, one-inch margins
    Default,
    /// Black and grey, compact sizes
    Minimal,
    /// Dark slate, Times, wider side margins
    Professional,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Default => Preset::Default,
            PresetArg::Minimal => Preset::Minimal,
            PresetArg::Professional => Preset::Professional,
        }
    }
}

struct BuildArgs {
    output: Option<PathBuf>,
    format: Format,
    preset: Option<Preset>,
    compact: bool,
    frontmatter: bool,
    lenient: bool,
    author: Option<String>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            inputs,
            output,
            format,
            preset,
            compact,
            no_frontmatter,
            lenient,
            author,
        } => cmd_build(
            &inputs,
            BuildArgs {
                output,
                format,
                preset: preset.map(Preset::from),
                compact,
                frontmatter: !no_frontmatter,
                lenient,
                author,
            },
        ),
        Commands::Validate { inputs, lenient } => cmd_validate(&inputs, lenient),
        Commands::Presets => {
            cmd_presets();
            Ok(())
        }
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        eprintln!("{}", error_payload(&e));
        std::process::exit(1);
    }
}

fn error_payload(e: &reportkit::Error) -> String {
    serde_json::to_string_pretty(&e.to_json()).unwrap_or_else(|_| e.to_string())
}

fn load_request(path: &Path) -> reportkit::Result<DocumentRequest> {
    debug!("Reading request {}", path.display());
    let file = fs::File::open(path)?;
    DocumentRequest::from_reader(io::BufReader::new(file))
}

fn make_renderer(args: &BuildArgs) -> Box<dyn Renderer> {
    match args.format {
        Format::Markdown => Box::new(MarkdownRenderer::new(
            MarkdownOptions::new().with_frontmatter(args.frontmatter),
        )),
        Format::Json if args.compact => Box::new(JsonRenderer::with_format(JsonFormat::Compact)),
        Format::Json => Box::new(JsonRenderer::new()),
    }
}

fn make_options(args: &BuildArgs) -> reportkit::Result<PipelineOptions> {
    let mut options = PipelineOptions::from_env()?;
    if let Some(ref author) = args.author {
        options = options.with_default_author(author.as_str());
    }
    if args.lenient {
        options = options.lenient_rows();
    }
    if let Some(ref dir) = args.output {
        options = options.with_output_dir(dir);
    }
    Ok(options)
}

fn cmd_build(inputs: &[PathBuf], args: BuildArgs) -> reportkit::Result<()> {
    let options = make_options(&args)?;
    let pipeline = DocumentPipeline::with_options(make_renderer(&args), options);
    let base: Option<&'static Style> = args.preset.map(|p| p.style());

    // A single request without an output directory goes to stdout.
    if inputs.len() == 1 && args.output.is_none() {
        let request = load_request(&inputs[0])?;
        let output = pipeline.execute_with_style(&request, base)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(&output.content)?;
        stdout.flush()?;
        return Ok(());
    }

    let output_dir = pipeline.options().output_dir.clone();
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut written = Vec::new();
    let mut first_error = None;
    for input in inputs {
        pb.set_message(input.display().to_string());
        let result = load_request(input).and_then(|request| {
            let output = pipeline.execute_with_style(&request, base)?;
            let path = output_dir.join(&output.filename);
            fs::write(&path, &output.content)?;
            Ok(path)
        });
        match result {
            Ok(path) => written.push(path),
            Err(e) => {
                pb.println(format!(
                    "{} {}: {}",
                    "Failed".red(),
                    input.display(),
                    error_payload(&e)
                ));
                first_error.get_or_insert(e);
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, path) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), path.display());
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn cmd_validate(inputs: &[PathBuf], lenient: bool) -> reportkit::Result<()> {
    let validator = if lenient {
        RequestValidator::new().with_row_policy(reportkit::RowLengthPolicy::Lenient)
    } else {
        RequestValidator::new()
    };

    let mut first_error = None;
    for input in inputs {
        match load_request(input).and_then(|r| validator.validate(&r).map(|_| r)) {
            Ok(request) => println!(
                "{} {} ({} sections)",
                "OK".green().bold(),
                input.display(),
                request.sections.len()
            ),
            Err(e) => {
                println!("{} {}", "INVALID".red().bold(), input.display());
                println!("{}", error_payload(&e));
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn cmd_presets() {
    println!("{}", "Style Presets".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for preset in Preset::ALL {
        println!("{}", describe_preset(preset));
    }
}

fn describe_preset(preset: Preset) -> String {
    let style = preset.style();
    let fonts = style.fonts();
    let margins = style.margins();
    format!(
        "{}: primary {}, text {}, {} {}pt/{}pt, margins {}/{}/{}/{} pt",
        preset.name().bold(),
        style.colors().primary(),
        style.colors().text(),
        fonts.family(),
        fonts.size_body(),
        fonts.size_heading(),
        margins.top(),
        margins.right(),
        margins.bottom(),
        margins.left(),
    )
}

fn cmd_version() {
    println!("{} {}", "reportkit".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Styled report generation tool");
    println!();
    println!("License: MIT");
}
