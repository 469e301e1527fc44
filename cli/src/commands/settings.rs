use anyhow::{Result, bail};
use std::process;

use portions_core::models::UserProfile;
use portions_core::service::PortionService;

fn print_profile(profile: &UserProfile) {
    println!("Goal:        {}", profile.goal.as_str());
    println!("Diet:        {}", profile.diet_style.as_str());
    println!("Reset time:  {}", profile.reset_time);
    let reminders = if profile.reminders_on { "on" } else { "off" };
    println!("Reminders:   {reminders}");
    if !profile.reminder_times.is_empty() {
        println!("Reminder at: {}", profile.reminder_times.join(", "));
    }
    if let Some(sex) = profile.sex {
        println!("Sex:         {sex}");
    }
    if let Some(w) = profile.current_weight {
        println!("Weight:      {w:.1} lbs");
    }
    if let Some(w) = profile.target_weight {
        println!("Goal weight: {w:.1} lbs");
    }
}

pub(crate) fn cmd_settings_show(service: &PortionService, json: bool) -> Result<()> {
    match service.profile()? {
        Some(profile) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                print_profile(&profile);
            }
        }
        None => {
            eprintln!("No profile found. Run `portions onboard` first.");
            process::exit(2);
        }
    }

    Ok(())
}

pub(crate) fn cmd_settings_reset_time(
    service: &PortionService,
    time: &str,
    json: bool,
) -> Result<()> {
    let profile = service.set_reset_time(time)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!("Daily reset time set to {time}");
    }

    Ok(())
}

fn parse_reminder_state(state: &str, has_times: bool) -> Result<bool> {
    let on = match state {
        "on" => true,
        "off" => false,
        _ => bail!("Invalid reminder state '{state}'. Use 'on' or 'off'"),
    };
    if !on && has_times {
        bail!("--at only makes sense with 'on'");
    }
    Ok(on)
}

pub(crate) fn cmd_settings_reminders(
    service: &PortionService,
    state: &str,
    times: Vec<String>,
    json: bool,
) -> Result<()> {
    let on = parse_reminder_state(state, !times.is_empty())?;

    let mut profile = service.set_reminders(on)?;
    if on && !times.is_empty() {
        profile = service.set_reminder_times(times)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else if on {
        if profile.reminder_times.is_empty() {
            println!("Reminders on");
        } else {
            println!("Reminders on at {}", profile.reminder_times.join(", "));
        }
    } else {
        println!("Reminders off");
    }

    Ok(())
}

pub(crate) fn cmd_reset(service: &PortionService, yes: bool, json: bool) -> Result<()> {
    if !yes {
        bail!("This erases your profile, targets, logs, and weight history. Re-run with --yes to confirm");
    }

    service.reset_all()?;

    if json {
        println!("{}", serde_json::json!({ "reset": true }));
    } else {
        println!("All data erased. Run `portions onboard` to start again.");
    }

    Ok(())
}
