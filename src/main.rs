use clap::Parser;
use hina::{diagnostics::report_program_error, language, load_tree, run_expression, runtime::Options};
use std::{io, path::PathBuf, process::ExitCode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Evaluates programs given as JSON syntax trees", long_about = None)]
struct Cli {
    /// Path to the JSON syntax tree
    file: PathBuf,

    /// Build the expression tree without evaluating it
    #[arg(long)]
    check: bool,

    /// Print the built expression tree to stderr
    #[arg(long)]
    dump_ast: bool,

    /// Abort once calls nest deeper than this
    #[arg(long, env = "HINA_MAX_DEPTH")]
    max_depth: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("HINA_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn execute(cli: &Cli) -> Result<(), hina::Error> {
    let tree = load_tree(&cli.file)?;
    let expression = language::build_program(&tree)?;
    if cli.dump_ast {
        eprintln!("{expression:#?}");
    }
    if cli.check {
        debug!(file = %cli.file.display(), "tree is well formed");
        return Ok(());
    }

    let options = Options {
        max_call_depth: cli.max_depth,
    };
    let stdout = io::stdout();
    let value = run_expression(&expression, stdout.lock(), options)?;
    debug!(result = %value, "finished");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_program_error(&cli.file, error);
            ExitCode::FAILURE
        }
    }
}
