//! Numbo CLI binary (component I, §4.8): parses a target + bricks, drives the solver, and
//! prints the outcome.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use numbo::animation::{AnimationSink, JsonlSink, NullSink};
use numbo::driver;
use numbo::input::{Input, RawInput};

#[derive(Parser)]
#[command(author, version, about = "A stochastic agent-based arithmetic solver", long_about = None)]
struct Cli {
    /// the target integer to reach
    target: Option<String>,

    /// the bricks available to combine (each used at most once)
    bricks: Vec<String>,

    /// read target + bricks from a JSON file instead of positional arguments
    #[arg(long)]
    input: Option<std::path::PathBuf>,

    /// maximum number of codelets to run before giving up
    #[arg(long, default_value_t = driver::DEFAULT_STEP_CAP)]
    steps: usize,

    /// pin the RNG for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// write a JSON Lines animation log of every workspace mutation to this path
    #[arg(long)]
    animate: Option<std::path::PathBuf>,

    /// emit the outcome as a single JSON object instead of human-readable text
    #[arg(long)]
    json: bool,

    /// raise log verbosity to Debug on the terminal
    #[arg(short, long)]
    verbose: bool,
}

fn read_input(cli: &Cli) -> anyhow::Result<Input> {
    if let Some(path) = &cli.input {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading input file {}", path.display()))?;
        let raw: RawInput = serde_json::from_str(&text).context("parsing input JSON")?;
        Input::try_from(&raw)
    } else {
        let target = cli
            .target
            .as_deref()
            .context("target is required: pass it positionally or via --input")?;
        Input::from_strings(target, &cli.bricks)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    numbo::init_logging(cli.verbose);

    let input = read_input(&cli)?;

    let mut animated_sink;
    let mut null_sink;
    let sink: &mut dyn AnimationSink = match &cli.animate {
        Some(path) => {
            animated_sink = JsonlSink::create(path)
                .with_context(|| format!("creating animation sink at {}", path.display()))?;
            &mut animated_sink
        }
        None => {
            null_sink = NullSink;
            &mut null_sink
        }
    };

    let outcome = driver::run(input, cli.steps, cli.seed, sink);

    if cli.json {
        let report = serde_json::json!({
            "solved": outcome.solved,
            "tree": outcome.tree,
            "steps": outcome.steps,
        });
        println!("{report}");
    } else if outcome.solved {
        let tree = outcome.tree.as_deref().unwrap_or("?");
        println!(
            "{} in {} steps: {}",
            "solved".green(),
            outcome.steps,
            tree.cyan()
        );
    } else {
        println!("{} after {} steps", "unsolved".red(), outcome.steps);
    }

    Ok(())
}
