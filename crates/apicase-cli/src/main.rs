//! apicase CLI - OpenAPI document to a spreadsheet of API test cases

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use apicase_core::{BodyFault, Config, dump, write_workbook};
use apicase_engine::{CaseGenerator, load_document};

const CONFIG_FILE: &str = ".apicase.toml";
const DEFAULT_DUMP_DIR: &str = ".apicase/dumps";

#[derive(Parser)]
#[command(name = "apicase")]
#[command(about = "Generate API test cases from an OpenAPI document")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive test cases and write the workbook
    Run {
        /// OpenAPI document (YAML or JSON)
        input: PathBuf,

        /// Workbook to write (default: api_test_cases.xlsx)
        output: Option<PathBuf>,

        /// Config file (default: .apicase.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for the 400 body-fault coin flip
        #[arg(long)]
        seed: Option<u64>,

        /// How required body properties are broken for 400 cases
        #[arg(long)]
        body_fault: Option<BodyFaultArg>,

        /// Nested $ref levels to expand beneath a schema root
        #[arg(long)]
        ref_depth: Option<usize>,

        /// Show the derivation plan without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Dump all records to JSONL files
        #[arg(long)]
        dump: bool,

        /// Directory for dump files (default: .apicase/dumps)
        #[arg(long)]
        dump_dir: Option<PathBuf>,
    },

    /// Initialize config file
    Init,

    /// Export JSON Schema for the record interchange format
    Schema,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BodyFaultArg {
    Random,
    Omit,
    Corrupt,
}

impl From<BodyFaultArg> for BodyFault {
    fn from(arg: BodyFaultArg) -> Self {
        match arg {
            BodyFaultArg::Random => BodyFault::Random,
            BodyFaultArg::Omit => BodyFault::Omit,
            BodyFaultArg::Corrupt => BodyFault::Corrupt,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` selects debug.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<u8> {
    match cli.command {
        Commands::Run {
            input,
            output,
            config,
            seed,
            body_fault,
            ref_depth,
            dry_run,
            dump,
            dump_dir,
        } => {
            let mut cfg = if let Some(path) = config {
                Config::load(&path)?
            } else {
                Config::load_default()?
            };
            log::debug!("loaded config: {cfg:?}");

            // CLI flags win over the config file
            if let Some(output) = output {
                cfg.output = output;
            }
            if seed.is_some() {
                cfg.seed = seed;
            }
            if let Some(fault) = body_fault {
                cfg.body_fault = fault.into();
            }
            if let Some(depth) = ref_depth {
                cfg.ref_depth = depth;
            }
            cfg.dump |= dump;
            if dump_dir.is_some() {
                cfg.dump_dir = dump_dir;
            }

            let document = load_document(&input)
                .with_context(|| format!("failed to load {}", input.display()))?;
            eprintln!("Loaded {}", input.display());

            let generator = CaseGenerator::from_config(&cfg);

            if dry_run {
                let plan = generator.plan(&document, &cfg.output);
                println!("{}", plan.to_terminal());
                return Ok(u8::from(plan.has_errors()));
            }

            if cli.verbose {
                eprintln!("  body_fault: {}", cfg.body_fault);
                eprintln!("  ref_depth:  {}", cfg.ref_depth);
                if let Some(seed) = cfg.seed {
                    eprintln!("  seed:       {seed}");
                }
            }

            let records = generator.generate(&document);
            eprintln!("Derived {} test cases", records.len());
            log::debug!("writing workbook to {}", cfg.output.display());

            write_workbook(&records, &cfg.output)
                .with_context(|| format!("failed to write {}", cfg.output.display()))?;

            if cfg.dump {
                let dump_path = cfg
                    .dump_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DUMP_DIR));
                match dump::write_dump(&records, &dump_path) {
                    Ok(index) => eprintln!(
                        "Dump: {} records → {} ({})",
                        index.total,
                        dump_path.display(),
                        index
                            .operations
                            .iter()
                            .map(|e| e.file.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    ),
                    Err(e) => eprintln!("Warning: failed to write dump: {e}"),
                }
            }

            println!(
                "Generated {} test cases in {}",
                records.len(),
                cfg.output.display()
            );
            Ok(0)
        }

        Commands::Init => {
            if Path::new(CONFIG_FILE).exists() {
                eprintln!("{CONFIG_FILE} already exists");
                return Ok(1);
            }

            std::fs::write(CONFIG_FILE, Config::example())?;
            println!("Created {CONFIG_FILE}");
            println!("\nEdit the file to configure:");
            println!("  - output: workbook path");
            println!("  - body_fault: random, omit or corrupt");
            println!("  - seed: fixed seed for reproducible 400 bodies");
            Ok(0)
        }

        Commands::Schema => {
            let schema = apicase_core::schema::generate_schema();
            println!("{schema}");
            Ok(0)
        }
    }
}
