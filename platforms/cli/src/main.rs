mod jobs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ntm::{
    render, render_json, simulate, DefinitionLoader, Explorer, MachineCatalog, MachineDefinition,
    DEFAULT_MAX_DEPTH,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Explores every branch of a nondeterministic Turing machine and prints its trace.
#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  ntm run machines/a_plus.csv --input aaa
  ntm builtin palindrome_dtm --input abba --output trace.txt
  ntm batch jobs.json")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a machine definition file
    Run {
        /// The machine definition file (.csv)
        definition: PathBuf,
        #[clap(flatten)]
        options: RunOptions,
    },
    /// Run one of the built-in machines
    Builtin {
        /// Key or name of the built-in machine (see `list`)
        name: String,
        #[clap(flatten)]
        options: RunOptions,
    },
    /// Run every (definition, input, output) job of a JSON file
    Batch {
        /// The jobs file
        jobs: PathBuf,
    },
    /// List the built-in machines
    List,
}

#[derive(clap::Args)]
struct RunOptions {
    /// The input string, written to the tape right of the head
    #[clap(short, long)]
    input: Option<String>,

    /// Number of levels to explore before giving up
    #[clap(short = 'd', long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Also write the trace to this file
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Trace format
    #[clap(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match execute(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn execute(command: Command) -> Result<ExitCode> {
    match command {
        Command::Run {
            definition,
            options,
        } => {
            let machine = DefinitionLoader::load_definition(&definition)
                .with_context(|| format!("loading {}", definition.display()))?;
            let input = options.input.clone().unwrap_or_default();
            run(machine, &input, &options)?;
        }
        Command::Builtin { name, options } => {
            let builtin = MachineCatalog::get_by_name(&name)?;
            let input = options
                .input
                .clone()
                .unwrap_or_else(|| builtin.sample_input.to_string());
            run(builtin.definition.clone(), &input, &options)?;
        }
        Command::Batch { jobs } => {
            let failed = jobs::run_jobs(&jobs)?;
            if failed > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::List => {
            for (i, key) in MachineCatalog::keys().into_iter().enumerate() {
                let machine = MachineCatalog::get_by_index(i)?;
                println!(
                    "{key:<16} {} (sample input: {})",
                    machine.definition.name, machine.sample_input
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Runs one machine and emits its trace to stdout and, if requested, to the output file.
fn run(definition: MachineDefinition, input: &str, options: &RunOptions) -> Result<()> {
    match (options.format, &options.output) {
        (Format::Text, Some(path)) => {
            let mut file = create_output(path)?;
            simulate(definition, input, options.max_depth, &mut file)?;
        }
        (Format::Text, None) => {
            let name = definition.name.clone();
            let simulation = Explorer::new(definition, options.max_depth).explore(input);
            print!("{}", render(&name, input, &simulation));
        }
        (Format::Json, output) => {
            let name = definition.name.clone();
            let simulation = Explorer::new(definition, options.max_depth).explore(input);
            let json = render_json(&name, input, &simulation)?;
            if let Some(path) = output {
                writeln!(create_output(path)?, "{json}")?;
            }
            println!("{json}");
        }
    }

    Ok(())
}

fn create_output(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("creating {}", path.display()))
}
