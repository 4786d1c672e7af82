//! Robot stacking simulator CLI

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use u_stacking_core::{OrderingPolicy, Room, MAX_LIFT_WEIGHT};
use u_stacking_sim::{BoxGenerator, Scenario, SessionRunner, SimulationReport};

#[derive(Parser)]
#[command(name = "stack-sim")]
#[command(about = "Simulates a robot stacking boxes into a room")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stack a random batch of boxes
    Run {
        /// Number of boxes to draw
        #[arg(short, long, default_value = "25")]
        count: usize,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Room size as WIDTHxDEPTHxHEIGHT
        #[arg(short, long, default_value = "10x10x10")]
        room: Room,

        /// Heaviest box the robot can lift
        #[arg(short = 'w', long, default_value_t = MAX_LIFT_WEIGHT)]
        max_weight: f64,

        /// Order in which boxes are fed to the robot
        #[arg(long, value_enum, default_value = "accessible-first")]
        ordering: OrderingArg,

        /// Output file for the report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Re-check the final room state and fail on any violation
        #[arg(long)]
        verify: bool,
    },

    /// Run a scenario file (TOML or JSON)
    RunFile {
        /// Path to the scenario file
        file: PathBuf,

        /// Output file for the report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Re-check the final room state and fail on any violation
        #[arg(long)]
        verify: bool,
    },

    /// Write a scenario file with a random batch of boxes
    Generate {
        /// Number of boxes to draw
        #[arg(short, long, default_value = "25")]
        count: usize,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Room size as WIDTHxDEPTHxHEIGHT
        #[arg(short, long, default_value = "10x10x10")]
        room: Room,

        /// Output file (TOML, stdout if absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderingArg {
    /// Keep the given order
    AsGiven,
    /// Accessible boxes first, heaviest first within each group
    AccessibleFirst,
}

impl From<OrderingArg> for OrderingPolicy {
    fn from(arg: OrderingArg) -> Self {
        match arg {
            OrderingArg::AsGiven => OrderingPolicy::AsGiven,
            OrderingArg::AccessibleFirst => OrderingPolicy::AccessibleThenHeaviest,
        }
    }
}

fn finish(report: &SimulationReport, output: Option<PathBuf>) -> anyhow::Result<()> {
    report.print_outcomes();
    report.print_summary();

    if let Some(path) = output {
        report.save_json(&path)?;
        println!("\nReport saved to: {}", path.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            count,
            seed,
            room,
            max_weight,
            ordering,
            output,
            verify,
        } => {
            let scenario = Scenario::new("random", room)
                .with_max_lift_weight(max_weight)
                .with_ordering(ordering.into())
                .with_generated(count, seed);

            let report = SessionRunner::new().with_verify(verify).run(&scenario)?;
            finish(&report, output)?;
        }

        Commands::RunFile {
            file,
            output,
            verify,
        } => {
            let scenario = Scenario::from_file(&file)?;
            println!("Scenario: {}", scenario.name);
            if let Some(description) = &scenario.description {
                println!("  {}", description);
            }

            let report = SessionRunner::new().with_verify(verify).run(&scenario)?;
            finish(&report, output)?;
        }

        Commands::Generate {
            count,
            seed,
            room,
            output,
        } => {
            let mut generator = match seed {
                Some(seed) => BoxGenerator::with_seed(seed),
                None => BoxGenerator::new(),
            };
            let scenario = Scenario::new("generated", room).with_boxes(generator.generate(count));

            match output {
                Some(path) => {
                    scenario.save_toml(&path)?;
                    println!("{} boxes saved to: {}", count, path.display());
                }
                None => println!("{}", scenario.to_toml_string()?),
            }
        }
    }

    Ok(())
}
