use anyhow::Result;
use std::process;

use portions_core::models::{DailyLog, DailyTargets, FoodGroup};
use portions_core::service::PortionService;

use super::helpers::{parse_group, progress_bar};

pub(crate) fn cmd_add(
    service: &PortionService,
    group: &str,
    count: u32,
    json: bool,
) -> Result<()> {
    let group = parse_group(group)?;
    let log = service.add_portions(group, count)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&log)?);
    } else {
        let total = log.get(group);
        let label = group.label();
        println!("{label}: {total} today");
    }

    Ok(())
}

pub(crate) fn cmd_remove(
    service: &PortionService,
    group: &str,
    count: u32,
    json: bool,
) -> Result<()> {
    let group = parse_group(group)?;
    let log = service.remove_portions(group, count)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&log)?);
    } else {
        let total = log.get(group);
        let label = group.label();
        println!("{label}: {total} today");
    }

    Ok(())
}

pub(crate) fn cmd_today(service: &PortionService, json: bool) -> Result<()> {
    let snapshot = service.today()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let date = &snapshot.log.date;
    println!("=== {date} ===\n");

    match &snapshot.targets {
        Some(targets) => print_with_targets(&snapshot.log, targets),
        None => {
            print_counts_only(&snapshot.log);
            eprintln!("\nNo targets set. Run `portions onboard` to derive them.");
        }
    }

    Ok(())
}

fn print_with_targets(log: &DailyLog, targets: &DailyTargets) {
    let mut met = 0;
    for group in FoodGroup::ALL {
        let current = log.get(group);
        let target = targets.get(group);
        if target > 0 && current >= target {
            met += 1;
        }
        let bar = progress_bar(current, target, 10);
        let label = group.label();
        println!("  {label:<14} {bar} {current}/{target}");
    }
    let total = FoodGroup::ALL.len();
    println!("\n  {met}/{total} targets met");
}

fn print_counts_only(log: &DailyLog) {
    let mut any = false;
    for group in FoodGroup::ALL {
        let current = log.get(group);
        if current > 0 {
            any = true;
            let label = group.label();
            println!("  {label:<14} {current}");
        }
    }
    if !any {
        eprintln!("Nothing logged yet today");
        process::exit(2);
    }
}
