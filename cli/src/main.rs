//! pdfoutline CLI - PDF title and outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{find_pdfs, BatchOutcome, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use pdfoutline::render::{self, JsonFormat};
use pdfoutline::{
    analyze_fonts, extract_structure_with_options, BatchProcessor, ExtractOptions, HeadingLevel,
    PdfParser,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Infer a PDF's title and heading outline from its font sizes", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract title and outline as JSON
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Process every PDF in a directory, writing one JSON file per PDF
    Batch {
        /// Directory containing PDF files
        #[arg(
            value_name = "INPUT_DIR",
            env = "PDFOUTLINE_INPUT_DIR",
            default_value = DEFAULT_INPUT_DIR
        )]
        input_dir: PathBuf,

        /// Directory for JSON results
        #[arg(
            value_name = "OUTPUT_DIR",
            env = "PDFOUTLINE_OUTPUT_DIR",
            default_value = DEFAULT_OUTPUT_DIR
        )]
        output_dir: PathBuf,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Show the font size histogram and derived roles
    Fonts {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Print the outline as an indented tree
    Tree {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct TuningArgs {
    /// Body text must occur more than this many times the average size count
    #[arg(long, value_name = "X", default_value_t = 2.0)]
    threshold: f64,

    /// Reject documents with more pages than this
    #[arg(long, value_name = "N", default_value_t = 50)]
    max_pages: u32,

    /// Treat unreadable pages as empty instead of failing
    #[arg(long)]
    lenient: bool,
}

impl TuningArgs {
    fn options(&self) -> ExtractOptions {
        let options = ExtractOptions::new()
            .with_threshold_multiplier(self.threshold)
            .with_max_pages(self.max_pages);
        if self.lenient {
            options.lenient()
        } else {
            options
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            compact,
            tuning,
        }) => cmd_extract(&input, output.as_deref(), compact, &tuning.options()),
        Some(Commands::Batch {
            input_dir,
            output_dir,
            tuning,
        }) => cmd_batch(&input_dir, &output_dir, &tuning.options()),
        Some(Commands::Fonts {
            input,
            json,
            tuning,
        }) => cmd_fonts(&input, json, &tuning.options()),
        Some(Commands::Tree { input, tuning }) => cmd_tree(&input, &tuning.options()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: print JSON if input is provided
            if let Some(input) = cli.input {
                cmd_extract(&input, None, false, &ExtractOptions::default())
            } else {
                println!("{}", "Usage: pdfoutline <FILE>".yellow());
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: &ExtractOptions,
) -> CliResult {
    log::debug!("Extracting {} with {:?}", input.display(), options);
    let structure = extract_structure_with_options(input, options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = render::to_json(&structure, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(input_dir: &Path, output_dir: &Path, options: &ExtractOptions) -> CliResult {
    println!("{} {}", "Input directory:".bold(), input_dir.display());
    println!("{} {}", "Output directory:".bold(), output_dir.display());

    let total = find_pdfs(input_dir)?.len();
    if total == 0 {
        println!("{}", "No PDF files found in the input directory.".yellow());
        return Ok(());
    }
    println!("Found {} PDF file(s) to process.", total);

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let processor = BatchProcessor::new(options.clone());
    let report = processor.run_with_progress(input_dir, output_dir, |entry| {
        let name = entry
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(name);
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    for entry in &report.entries {
        let name = entry.input.display();
        match &entry.outcome {
            BatchOutcome::Extracted { headings } => println!(
                "  {} {} ({} headings)",
                "✓".green(),
                name,
                headings
            ),
            BatchOutcome::Failed(error) => {
                println!("  {} {}: {}", "✗".red(), name, error.dimmed())
            }
            BatchOutcome::WriteFailed(error) => println!(
                "  {} {}: {} {}",
                "✗".red(),
                name,
                "could not save JSON:".red(),
                error
            ),
        }
    }

    println!(
        "\n{} {} succeeded, {} failed",
        "Done!".green().bold(),
        report.succeeded(),
        report.failed()
    );

    Ok(())
}

fn cmd_fonts(input: &Path, json: bool, options: &ExtractOptions) -> CliResult {
    let parser = PdfParser::open_with_mode(input, options.error_mode)?;
    let analysis = analyze_fonts(&parser, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    let roles = &analysis.roles;

    println!("{}", "Font Sizes".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), analysis.pages);
    println!("{}: {}", "Blocks".bold(), analysis.blocks);
    println!();

    for size in analysis.histogram.sizes_descending() {
        let role = if size == roles.title_size {
            "title".green().to_string()
        } else if size == roles.body_size {
            "body".normal().to_string()
        } else if roles.is_heading_size(size) {
            "heading".yellow().to_string()
        } else {
            "-".dimmed().to_string()
        };
        println!(
            "  {:>4}pt  {:>7}  {}",
            size,
            analysis.histogram.count(size),
            role
        );
    }

    println!();
    println!("{}", "Roles".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Title size".bold(), roles.title_size);
    if roles.has_body() {
        println!("{}: {}", "Body size".bold(), roles.body_size);
    } else {
        println!("{}: {}", "Body size".bold(), "none dominant".dimmed());
    }
    println!("{}: {:?}", "Heading sizes".bold(), roles.heading_sizes);

    Ok(())
}

fn cmd_tree(input: &Path, options: &ExtractOptions) -> CliResult {
    let structure = extract_structure_with_options(input, options)?;
    println!("{}", render::to_text(&structure));

    let counts: Vec<String> = HeadingLevel::ALL
        .iter()
        .map(|&level| (level, structure.count_at(level)))
        .filter(|&(_, n)| n > 0)
        .map(|(level, n)| format!("{} {}", n, level))
        .collect();
    if !counts.is_empty() {
        println!();
        println!("{}: {}", "Headings".bold(), counts.join(", ").dimmed());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and outline extraction tool");
    println!();
    println!("License: MIT");
}
