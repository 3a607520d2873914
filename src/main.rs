use std::sync::Arc;

use clap::{Parser, Subcommand};

use taskbench::config::Config;
use taskbench::reporter::{LogReporter, Reporter, StdoutReporter};
use taskbench::scenario::{strategy_cases, Scenario};
use taskbench::{tlog_error, Benchmark, Orchestrator, Result, Strategy};

/// taskbench - compare sequential and concurrent scheduling of delayed tasks
#[derive(Parser, Debug)]
#[command(name = "taskbench")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    TASKBENCH_DEBUG=1     Enable debug logging (alternative to --debug)")]
pub struct Cli {
    /// Enable debug logging (writes to ~/.taskbench/taskbench.log)
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run one batch of delayed tasks with the given strategy
    Run {
        /// sequential, concurrent or detached
        strategy: Strategy,

        /// Number of tasks in the batch
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Delay of each task in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Benchmark every strategy back-to-back without awaiting each in turn
    Bench {
        /// Number of tasks per batch
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Delay of each task in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Print results as JSON instead of progress lines
        #[arg(long)]
        json: bool,
    },

    /// Replay a canned scenario
    Scenario {
        /// blocking-await, non-blocking, non-blocking-await, fire-and-forget or fast-promise
        name: Scenario,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    taskbench::log::init_with_debug(cli.debug);

    let config = Config::load()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let outcome = runtime.block_on(dispatch(cli.command, config));
    if let Err(ref e) = outcome {
        tlog_error!("taskbench failed: {}", e);
        if let Some(path) = taskbench::log::log_path() {
            eprintln!("See {} for details", path.display());
        }
    }
    outcome
}

async fn dispatch(command: Command, config: Config) -> Result<()> {
    match command {
        Command::Run {
            strategy,
            count,
            delay_ms,
        } => {
            let config = config.with_overrides(count, delay_ms);
            run_batch(strategy, &config).await
        }
        Command::Bench {
            count,
            delay_ms,
            json,
        } => {
            let mut config = config.with_overrides(count, None);
            if let Some(delay) = delay_ms {
                config.bench_delay_ms = delay;
            }
            run_bench(&config, json).await
        }
        Command::Scenario { name } => {
            let orchestrator = Orchestrator::with_reporter(Arc::new(StdoutReporter));
            name.play(&orchestrator, &config).await?;
            Ok(())
        }
    }
}

async fn run_batch(strategy: Strategy, config: &Config) -> Result<()> {
    let orchestrator = Orchestrator::with_reporter(Arc::new(StdoutReporter));

    let run = orchestrator.run(strategy, config.batch()).await?;
    println!(
        "{} strategy: {} tasks in {}ms",
        run.strategy,
        run.completions.len(),
        run.elapsed.as_millis()
    );
    Ok(())
}

async fn run_bench(config: &Config, json: bool) -> Result<()> {
    // JSON output must not be interleaved with progress lines.
    let reporter: Arc<dyn Reporter> = if json {
        Arc::new(LogReporter)
    } else {
        Arc::new(StdoutReporter)
    };
    let orchestrator = Orchestrator::with_reporter(reporter.clone());
    let benchmark = Benchmark::new(orchestrator.clock().clone(), reporter);

    let cases = strategy_cases(&orchestrator, config, &Strategy::ALL);
    let results = benchmark.run_all(cases).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    Ok(())
}
