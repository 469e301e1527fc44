use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use portions_core::models::{DailyTargets, FoodGroup};
use portions_core::service::PortionService;

use super::helpers::parse_group;

fn print_targets_table(targets: &DailyTargets) {
    #[derive(Tabled)]
    struct TargetRow {
        #[tabled(rename = "Group")]
        group: &'static str,
        #[tabled(rename = "Daily target")]
        target: u32,
    }

    let rows: Vec<TargetRow> = FoodGroup::ALL
        .into_iter()
        .map(|g| TargetRow {
            group: g.label(),
            target: targets.get(g),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn cmd_target_show(service: &PortionService, json: bool) -> Result<()> {
    let targets = service.targets()?;

    match targets {
        Some(t) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&t)?);
            } else {
                let date = &t.date;
                println!("Targets (derived {date}):");
                print_targets_table(&t);
            }
        }
        None => {
            eprintln!("No targets set. Run `portions onboard` to derive them.");
            process::exit(2);
        }
    }

    Ok(())
}

pub(crate) fn cmd_target_set(
    service: &PortionService,
    group: &str,
    value: u32,
    json: bool,
) -> Result<()> {
    let group = parse_group(group)?;
    let targets = service.set_target(group, value)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
    } else {
        let label = group.label();
        println!("Target for {label} set to {value}");
    }

    Ok(())
}

pub(crate) fn cmd_target_recalc(service: &PortionService, json: bool) -> Result<()> {
    let targets = service.recalculate_targets()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
    } else {
        println!("Targets re-derived from your profile:");
        print_targets_table(&targets);
    }

    Ok(())
}
