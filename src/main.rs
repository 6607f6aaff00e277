//! Crossword Layout
//!
//! Generates crossword-style layouts for a word list: every word crosses
//! exactly one earlier word at a single shared letter. Layouts can be
//! printed, saved to disk, reloaded, or exported as JSON.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};

use crossword_layout::generator::DEFAULT_MAX_ATTEMPTS;
use crossword_layout::words::{parse_word_list, WORD_LIST};
use crossword_layout::{
    generate_with, persistence, GenerationError, GeneratorConfig, Layout, WordGraph,
};

/// Lays words out on a grid, crossword style.
#[derive(Parser)]
#[command(name = "crossword-layout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a layout and print it.
    Generate(GenerateArgs),
    /// Generate a layout and save it to disk.
    Save {
        #[command(flatten)]
        args: GenerateArgs,
        /// Directory receiving layout.txt and layout.json.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Display a saved layout.
    Show {
        /// Path to a layout.json file.
        path: PathBuf,
    },
    /// Print which words share letters, and where.
    Graph {
        /// Words to inspect (defaults to the built-in list).
        words: Vec<String>,
    },
    /// Generate a layout and print it as JSON.
    ExportJson(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Words to lay out (defaults to the built-in list).
    words: Vec<String>,

    /// Seed for a reproducible layout.
    #[arg(long)]
    seed: Option<u64>,

    /// Attempts before giving up.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,
}

impl GenerateArgs {
    fn generate(&self) -> Result<Layout, GenerationError> {
        let config = GeneratorConfig::default().with_max_attempts(self.max_attempts);
        generate_with(&words_or_default(&self.words), config, self.seed)
    }
}

fn words_or_default(words: &[String]) -> Vec<String> {
    if words.is_empty() {
        WORD_LIST.iter().map(|word| word.to_string()).collect()
    } else {
        words.to_vec()
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Generate(args)) => run_generate(&args),
        Some(Command::Save { args, dir }) => run_save(&args, &dir),
        Some(Command::Show { path }) => run_show(&path),
        Some(Command::Graph { words }) => run_graph(&words),
        Some(Command::ExportJson(args)) => run_export_json(&args),
        None => run_generate(&GenerateArgs {
            words: Vec::new(),
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }),
    }
}

/// Generates a layout, exiting with status 1 on failure.
fn generate_or_exit(args: &GenerateArgs) -> Layout {
    match args.generate() {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Failed to generate a layout: {e}");
            process::exit(1);
        }
    }
}

fn print_layout(layout: &Layout) {
    println!("Seed: {}", layout.seed);
    println!("Attempts: {}", layout.attempts);
    println!();
    print!("{layout}");
}

fn run_generate(args: &GenerateArgs) {
    let layout = generate_or_exit(args);
    print_layout(&layout);
}

fn run_save(args: &GenerateArgs, dir: &Path) {
    let layout = generate_or_exit(args);
    if let Err(e) = persistence::save(&layout, dir) {
        eprintln!("Failed to save layout: {e}");
        process::exit(1);
    }
    print_layout(&layout);
    println!();
    println!(
        "Wrote {} and {} to {}",
        persistence::LAYOUT_TXT,
        persistence::LAYOUT_JSON,
        dir.display()
    );
}

fn run_show(path: &Path) {
    match persistence::load(path) {
        Some(layout) => print_layout(&layout),
        None => {
            eprintln!(
                "Could not read a layout from {}. Run 'crossword-layout save' first.",
                path.display()
            );
            process::exit(1);
        }
    }
}

fn run_graph(words: &[String]) {
    match parse_word_list(&words_or_default(words)) {
        Ok(words) => print!("{}", WordGraph::build(&words).format()),
        Err(e) => {
            eprintln!("Invalid word list: {e}");
            process::exit(1);
        }
    }
}

fn run_export_json(args: &GenerateArgs) {
    let layout = generate_or_exit(args);
    match serde_json::to_string_pretty(&layout) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize layout: {e}");
            process::exit(1);
        }
    }
}
