use clap::{Parser, ValueEnum};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod error;
mod expr;
mod output;
mod search;

use error::{NumbersError, Result};
use expr::{PrintStyle, Target, parse_number};
use output::SolutionPrinter;
use search::draws::{DRAW_SIZE, standard_draws};
use search::{Job, ParallelConfig, Scheduler, SearchConfig, SearchStatistics, ThreadCount};

// --- Command Line Arguments ---

#[derive(Parser, Debug)]
#[command(name = "numbers")]
#[command(about = "numbers - Countdown numbers game solver")]
#[command(
    long_about = "Print every canonical arithmetic expression over a subset of NUMBER... \
                  whose value is TARGET (or lies in the range START..END). \
                  Expressions use + - * / with positive integer intermediates only."
)]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Target value, or an inclusive START..END range
    #[arg(value_name = "TARGET")]
    target: Option<String>,

    /// Source numbers, each usable at most once
    #[arg(value_name = "NUMBER")]
    numbers: Vec<String>,

    /// Solve every standard six-tile draw against a target range (default 100..999)
    #[arg(long, value_name = "START..END", num_args = 0..=1)]
    generate: Option<Option<String>>,

    /// Worker threads: a count, "cpus" or "numbers"
    #[arg(long, short, default_value = "cpus")]
    threads: ThreadCount,

    /// Output style for solutions
    #[arg(long, short, value_enum)]
    style: Option<CliStyle>,

    /// Print solutions in reverse Polish notation (same as --style rpn)
    #[arg(long, short, conflicts_with_all = ["style", "expr"])]
    rpn: bool,

    /// Print solutions in usual notation (same as --style expr)
    #[arg(long, short, conflicts_with = "style")]
    expr: bool,

    /// Workers fork only while at least this many more numbers remain unplaced
    #[arg(long, default_value_t = search::parallel::config::DEFAULT_FORK_MARGIN)]
    fork_margin: usize,

    /// Enable debug logging and print run statistics to stderr
    #[arg(long, short)]
    verbose: bool,
}

/// CLI output style selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliStyle {
    /// Reverse Polish notation
    Rpn,
    /// Usual notation with minimal parentheses
    Expr,
    /// Usual notation with every compound operand parenthesized
    Paren,
}

impl From<CliStyle> for PrintStyle {
    fn from(cli: CliStyle) -> Self {
        match cli {
            CliStyle::Rpn => PrintStyle::Rpn,
            CliStyle::Expr => PrintStyle::Expr,
            CliStyle::Paren => PrintStyle::Paren,
        }
    }
}

impl Args {
    fn print_style(&self) -> PrintStyle {
        if self.rpn {
            PrintStyle::Rpn
        } else if self.expr {
            PrintStyle::Expr
        } else {
            self.style.map(PrintStyle::from).unwrap_or_default()
        }
    }

    fn search_config(&self) -> Result<SearchConfig> {
        let mut config = SearchConfig::default()
            .with_style(self.print_style())
            .with_threads(self.threads)
            .with_fork_margin(self.fork_margin)
            .with_verbose(self.verbose);

        if let Some(Some(range)) = &self.generate {
            config = config.with_generate_range(range.parse::<Target>()?);
        }
        Ok(config)
    }
}

/// What the command line asked for, fully validated
#[derive(Debug)]
enum Command {
    Solve(Job),
    Generate,
}

fn parse_command(args: &Args) -> Result<Command> {
    if args.generate.is_some() {
        if args.target.is_some() {
            return Err(NumbersError::Usage(
                "--generate takes no TARGET or NUMBER arguments".to_string(),
            ));
        }
        return Ok(Command::Generate);
    }

    let target = args
        .target
        .as_deref()
        .ok_or_else(|| NumbersError::Usage("missing TARGET".to_string()))?
        .parse::<Target>()?;
    let numbers = args
        .numbers
        .iter()
        .map(|n| parse_number(n))
        .collect::<Result<Vec<_>>>()?;

    Ok(Command::Solve(Job::new(target, numbers)?))
}

// --- Logging ---

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("numbers: failed to initialize logging: {}", e);
    }
}

fn print_search_statistics(stats: &SearchStatistics) {
    for line in stats.format_summary().lines() {
        tracing::info!("{}", line);
    }
}

// --- Solving ---

fn run(args: &Args) -> Result<()> {
    let config = args.search_config()?;
    let command = parse_command(args)?;

    let number_count = match &command {
        Command::Solve(job) => job.len(),
        Command::Generate => DRAW_SIZE,
    };
    let workers = config.threads.resolve(number_count)?;
    let parallel = ParallelConfig::default()
        .with_workers(workers)
        .with_fork_margin(config.fork_margin);

    let printer = Arc::new(SolutionPrinter::stdout(config.style));
    let scheduler = Scheduler::new(&parallel, printer)?;

    match command {
        Command::Solve(job) => scheduler.solve(job),
        Command::Generate => {
            let draws = standard_draws();
            tracing::debug!(
                draws = draws.len(),
                range = %config.generate_range,
                "generating"
            );
            search::run_generate(&scheduler, config.generate_range, draws)?;
        }
    }

    let stats = scheduler.shutdown()?;
    if config.verbose {
        print_search_statistics(&stats);
    }
    Ok(())
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("numbers: {}", e);
        if e.is_usage() {
            eprintln!("Try 'numbers --help' for more information.");
        }
        std::process::exit(1);
    }
}
