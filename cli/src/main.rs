mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;

use crate::commands::{
    cmd_add, cmd_history, cmd_onboard, cmd_options, cmd_progress, cmd_remove, cmd_reset,
    cmd_settings_reminders, cmd_settings_reset_time, cmd_settings_show, cmd_target_recalc,
    cmd_target_set, cmd_target_show, cmd_today, cmd_weight_delete, cmd_weight_history,
    cmd_weight_log, cmd_weight_show,
};
use crate::config::Config;
use portions_core::service::PortionService;

#[derive(Parser)]
#[command(
    name = "portions",
    version,
    about = "A food-group portion diary",
    long_about = "\nTrack daily portions of each food group against targets\nderived from your goal. No calorie counting, no cloud.\n"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up your profile and derive daily portion targets
    Onboard {
        /// Goal: lose, maintain, gain, health
        #[arg(long)]
        goal: String,
        /// Diet style: omnivore, vegetarian, vegan
        #[arg(long, default_value = "omnivore")]
        diet: String,
        /// Sex: male, female, unspecified (refines the portion plan)
        #[arg(long)]
        sex: Option<String>,
        /// Current body weight in lbs (enables the size-based plan)
        #[arg(long)]
        weight: Option<f64>,
        /// Goal body weight in lbs
        #[arg(long)]
        target_weight: Option<f64>,
        /// Daily reset time (HH:MM, default 04:00)
        #[arg(long)]
        reset_time: Option<String>,
        /// Enable daily reminders
        #[arg(long)]
        reminders: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log portions of a food group for today
    Add {
        /// Food group (e.g. protein, veggies, whole-grains, water)
        group: String,
        /// Number of portions
        #[arg(default_value = "1")]
        count: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove portions of a food group from today
    Remove {
        /// Food group (e.g. protein, veggies, whole-grains, water)
        group: String,
        /// Number of portions
        #[arg(default_value = "1")]
        count: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show today's portions against targets
    Today {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show past daily logs
    History {
        /// Number of days to show (default: all)
        #[arg(short, long)]
        days: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show adherence and streak statistics
    Progress {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage daily portion targets
    Target {
        #[command(subcommand)]
        command: TargetCommands,
    },
    /// Track body weight
    Weight {
        #[command(subcommand)]
        command: WeightCommands,
    },
    /// List healthy options for a food group
    Options {
        /// Food group (e.g. protein, veggies, fats)
        group: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// View and change profile settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Erase all data (profile, targets, logs, weights)
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum TargetCommands {
    /// Show current targets
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the target for one food group
    Set {
        /// Food group
        group: String,
        /// Daily portion target
        value: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-derive targets from the stored profile
    Recalc {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum WeightCommands {
    /// Log a weight measurement (one per date, later entries overwrite)
    Log {
        /// Weight value in lbs
        value: f64,
        /// Date (YYYY-MM-DD or today/yesterday, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the weight for a specific date (default: today)
    Show {
        /// Date (YYYY-MM-DD or today/yesterday, default: today)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show weight history
    History {
        /// Number of entries to show (default: all)
        #[arg(short, long)]
        days: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete the weight entry for a date
    Delete {
        /// Date (YYYY-MM-DD or today/yesterday)
        date: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show the stored profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change the daily reset time
    ResetTime {
        /// Time of day (HH:MM) at which a new logging day begins
        time: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Turn reminders on or off
    Reminders {
        /// on or off
        state: String,
        /// Reminder time(s) (HH:MM, repeatable)
        #[arg(long = "at")]
        times: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let service = PortionService::new(&config.db_path)?;

    match cli.command {
        Commands::Onboard {
            goal,
            diet,
            sex,
            weight,
            target_weight,
            reset_time,
            reminders,
            json,
        } => cmd_onboard(
            &service,
            &goal,
            &diet,
            sex.as_deref(),
            weight,
            target_weight,
            reset_time,
            reminders,
            json,
        ),
        Commands::Add { group, count, json } => cmd_add(&service, &group, count, json),
        Commands::Remove { group, count, json } => cmd_remove(&service, &group, count, json),
        Commands::Today { json } => cmd_today(&service, json),
        Commands::History { days, json } => cmd_history(&service, days, json),
        Commands::Progress { json } => cmd_progress(&service, json),
        Commands::Target { command } => match command {
            TargetCommands::Show { json } => cmd_target_show(&service, json),
            TargetCommands::Set { group, value, json } => {
                cmd_target_set(&service, &group, value, json)
            }
            TargetCommands::Recalc { json } => cmd_target_recalc(&service, json),
        },
        Commands::Weight { command } => match command {
            WeightCommands::Log { value, date, json } => {
                cmd_weight_log(&service, value, date, json)
            }
            WeightCommands::Show { date, json } => cmd_weight_show(&service, date, json),
            WeightCommands::History { days, json } => cmd_weight_history(&service, days, json),
            WeightCommands::Delete { date, json } => cmd_weight_delete(&service, &date, json),
        },
        Commands::Options { group, json } => cmd_options(&service, &group, json),
        Commands::Settings { command } => match command {
            SettingsCommands::Show { json } => cmd_settings_show(&service, json),
            SettingsCommands::ResetTime { time, json } => {
                cmd_settings_reset_time(&service, &time, json)
            }
            SettingsCommands::Reminders { state, times, json } => {
                cmd_settings_reminders(&service, &state, times, json)
            }
        },
        Commands::Reset { yes, json } => cmd_reset(&service, yes, json),
    }
}
