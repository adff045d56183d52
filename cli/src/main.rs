mod charts;
mod commands;
mod config;
mod reminder;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;
use tracing_subscriber::EnvFilter;

use crate::charts::TerminalCharts;
use crate::commands::{
    CliTracker, NotFound, cmd_bmi, cmd_dashboard, cmd_meal_delete, cmd_meal_list, cmd_meal_log,
    cmd_plan_diet, cmd_plan_workout, cmd_user_login, cmd_user_register, cmd_weight_log,
    cmd_weight_reset, cmd_weight_trend,
};
use crate::config::Config;
use crate::reminder::{Chime, TerminalBell};
use fitplan_core::SqliteStore;

const LOG_ENV: &str = "FITPLAN_LOG";

#[derive(Parser)]
#[command(
    name = "fitplan",
    version,
    about = "Track meals, weight and BMI from the terminal"
)]
struct Cli {
    /// Do not ring the terminal bell before confirmations
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log, list and delete meals
    Meal {
        #[command(subcommand)]
        command: MealCommands,
    },
    /// Track body weight
    Weight {
        #[command(subcommand)]
        command: WeightCommands,
    },
    /// Calculate BMI (defaults to your latest logged weight)
    Bmi {
        /// Height in centimetres
        #[arg(long)]
        height: f64,
        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show meals, the calorie chart and the weight trend
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a diet or workout plan
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Register or log in a local user
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
enum MealCommands {
    /// Log a meal
    Log {
        /// What you ate
        food: String,
        /// Calories (whole number)
        #[arg(allow_hyphen_values = true)]
        calories: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List logged meals with the calorie chart
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a meal by its number in `meal list`
    Delete {
        /// Meal number as listed (starting at 1)
        number: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum WeightCommands {
    /// Log a weight in kilograms
    Log {
        /// Weight in kg
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the weight trend
    Trend {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget every logged weight
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum PlanCommands {
    /// Diet plan: vegan, keto, gluten-free
    Diet {
        /// Plan id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Workout plan: cardio, strength, yoga
    Workout {
        /// Plan id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create an account
    Register {
        name: String,
        email: String,
        password: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check credentials
    Login {
        email: String,
        password: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => {}
        Err(e) if e.is::<NotFound>() => process::exit(2),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let store = SqliteStore::open(&config.db_path)?;
    let charts = TerminalCharts::default();
    let canvas = charts.canvas();
    let mut tracker: CliTracker<'_> = CliTracker::new(&store, charts);

    let bell = TerminalBell;
    let chime: Option<&dyn Chime> = if cli.quiet { None } else { Some(&bell) };

    let result = match cli.command {
        Commands::Meal { command } => match command {
            MealCommands::Log {
                food,
                calories,
                json,
            } => cmd_meal_log(&mut tracker, &canvas, chime, &food, &calories, json).await,
            MealCommands::List { json } => cmd_meal_list(&mut tracker, &canvas, json),
            MealCommands::Delete { number, json } => {
                cmd_meal_delete(&mut tracker, &canvas, number, json)
            }
        },
        Commands::Weight { command } => match command {
            WeightCommands::Log { value, json } => {
                cmd_weight_log(&mut tracker, &canvas, &value, json)
            }
            WeightCommands::Trend { json } => cmd_weight_trend(&mut tracker, &canvas, json),
            WeightCommands::Reset { yes, json } => {
                cmd_weight_reset(&mut tracker, &canvas, chime, yes, json).await
            }
        },
        Commands::Bmi {
            height,
            weight,
            json,
        } => cmd_bmi(&tracker, height, weight, json),
        Commands::Dashboard { json } => cmd_dashboard(&mut tracker, &canvas, json),
        Commands::Plan { command } => match command {
            PlanCommands::Diet { id, json } => cmd_plan_diet(&id, json),
            PlanCommands::Workout { id, json } => cmd_plan_workout(&id, json),
        },
        Commands::User { command } => match command {
            UserCommands::Register {
                name,
                email,
                password,
                json,
            } => cmd_user_register(&tracker, &name, &email, &password, json),
            UserCommands::Login {
                email,
                password,
                json,
            } => cmd_user_login(&tracker, &email, &password, json),
        },
    };

    tracker.close();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_meal_delete() {
        let cli = Cli::try_parse_from(["fitplan", "meal", "delete", "2", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Meal {
                command: MealCommands::Delete {
                    number: 2,
                    json: true
                }
            }
        ));
    }

    #[test]
    fn test_global_quiet_after_subcommand() {
        let cli = Cli::try_parse_from(["fitplan", "weight", "reset", "--yes", "--quiet"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_negative_weight_reaches_validation() {
        let cli = Cli::try_parse_from(["fitplan", "weight", "log", "-5"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Weight {
                command: WeightCommands::Log { ref value, .. }
            } if value == "-5"
        ));
    }

    #[test]
    fn test_bmi_requires_height() {
        assert!(Cli::try_parse_from(["fitplan", "bmi", "--weight", "70"]).is_err());
    }
}
