//! swrlb - SWRL built-in evaluator
//!
//! Command-line interface for evaluating built-in atoms over binding tables.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use swrl_builtins::parser::atom_xml::ATOM_ELEMENT;
use swrl_builtins::{
    AtomCodec, AtomFormatter, BuiltinAtom, BuiltinRegistry, EvaluationMode, Evaluator, LogLevel,
    NotationParser, OutputFormat, Relation, SwrlConfig, SwrlError,
};

#[derive(Parser)]
#[command(name = "swrlb")]
#[command(version = env!("SWRLB_VERSION"))]
#[command(long_version = concat!(env!("SWRLB_VERSION"), " (", env!("SWRLB_TARGET"), ")"))]
#[command(about = "Evaluate SWRL built-in atoms over binding tables", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the standard search path)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate an atom over a relation
    Eval {
        /// Atom as notation, or a file holding notation or XML
        #[arg(long, value_name = "FILE|NOTATION")]
        atom: String,

        /// Relation JSON file ("-" for stdin)
        #[arg(long, value_name = "FILE")]
        relation: PathBuf,

        /// Evaluation mode
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Render an atom as notation or XML
    Show {
        /// Atom as notation, or a file holding notation or XML
        #[arg(value_name = "FILE|NOTATION")]
        atom: String,

        /// Write the XML encoding instead of notation
        #[arg(long)]
        xml: bool,
    },

    /// List the registered built-ins
    List,

    /// Print the effective configuration
    Config {
        /// Print the commented default configuration instead
        #[arg(long)]
        default: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Filter,
    Bind,
}

impl From<ModeArg> for EvaluationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Filter => EvaluationMode::Filter,
            ModeArg::Bind => EvaluationMode::Bind,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Aligned text table
    Table,
    Json,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let code = err
                .downcast_ref::<SwrlError>()
                .map_or(1, |e| e.code.exit_code());
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = SwrlConfig::load_from_file(path).map_err(SwrlError::from)?;
            config.apply_env_overrides();
            config
        }
        None => SwrlConfig::load().map_err(SwrlError::from)?,
    };
    if cli.verbose {
        config.general.log_level = LogLevel::Verbose;
    }
    if cli.quiet {
        config.general.log_level = LogLevel::Quiet;
    }
    init_logging(config.general.log_level);

    match cli.command {
        Command::Eval {
            atom,
            relation,
            mode,
            format,
        } => {
            if let Some(mode) = mode {
                config.evaluation.mode = mode.into();
            }
            if let Some(format) = format {
                config.general.format = format.into();
            }
            eval(&config, &atom, &relation)
        }
        Command::Show { atom, xml } => show(&config, &atom, xml),
        Command::List => {
            list();
            Ok(())
        }
        Command::Config { default } => {
            if default {
                print!("{}", SwrlConfig::default_config_content());
            } else {
                print!("{}", config.to_toml().map_err(SwrlError::from)?);
            }
            Ok(())
        }
    }
}

/// Level from config unless RUST_LOG is set
fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn eval(config: &SwrlConfig, atom: &str, relation: &Path) -> Result<()> {
    let atom = load_atom(config, atom)?;
    let table = load_relation(relation)?;
    info!(
        atom = %atom,
        rows = table.len(),
        mode = config.evaluation.mode.as_str(),
        "evaluating"
    );

    let result = Evaluator::new()
        .with_mode(config.evaluation.mode)
        .run(&atom, &table)?;

    match config.general.format {
        OutputFormat::Table => println!("{}", result),
        OutputFormat::Json => println!("{}", result.to_json()?),
        OutputFormat::Csv => print!("{}", result.to_csv()),
    }
    Ok(())
}

fn show(config: &SwrlConfig, atom: &str, xml: bool) -> Result<()> {
    let atom = load_atom(config, atom)?;
    if xml {
        let codec = AtomCodec::new(config.codec.variable_namespace.as_str());
        println!("{}", codec.to_xml(&atom)?);
    } else {
        println!("{}", AtomFormatter::new(config.prefix_map()).render(&atom));
    }
    Ok(())
}

fn list() {
    for spec in BuiltinRegistry::standard().iter() {
        println!("{:<28} {:<18} {}", spec.builtin.to_string(), spec.arity.to_string(), spec.description);
    }
}

/// Read an atom from a file or take the argument as notation
fn load_atom(config: &SwrlConfig, source: &str) -> Result<BuiltinAtom> {
    let path = Path::new(source);
    let text = if path.is_file() {
        fs::read_to_string(path).with_context(|| format!("Failed to read atom file: {}", path.display()))?
    } else {
        source.to_string()
    };

    let trimmed = text.trim_start();
    if trimmed.starts_with("<?") || trimmed.starts_with("<!--") || trimmed.starts_with(&format!("<{}", ATOM_ELEMENT)) {
        let codec = AtomCodec::new(config.codec.variable_namespace.as_str());
        Ok(codec.from_xml(&text).context("Failed to decode atom XML")?)
    } else {
        let parser = NotationParser::new(config.prefix_map());
        Ok(parser
            .parse(&text)
            .map_err(SwrlError::from)
            .context("Failed to parse atom notation")?)
    }
}

fn load_relation(path: &Path) -> Result<Relation> {
    let content = if path.as_os_str() == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read relation from stdin")?;
        content
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read relation file: {}", path.display()))?
    };
    Ok(Relation::from_json(&content).with_context(|| format!("Invalid relation in {}", path.display()))?)
}
