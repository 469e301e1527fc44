use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use portions_core::service::PortionService;

use super::helpers::{json_error, parse_date};

pub(crate) fn cmd_weight_log(
    service: &PortionService,
    value: f64,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let entry = service.log_weight(date, value)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        let v = entry.value;
        let d = &entry.date;
        println!("Logged {v:.1} lbs for {d}");
    }

    Ok(())
}

pub(crate) fn cmd_weight_show(
    service: &PortionService,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let entry = service.weight_for(date)?;

    if let Some(e) = entry {
        if json {
            println!("{}", serde_json::to_string_pretty(&e)?);
        } else {
            let v = e.value;
            let d = &e.date;
            println!("{d}: {v:.1} lbs");
        }
    } else {
        let date_str = date.format("%Y-%m-%d");
        if json {
            println!("{}", json_error(&format!("No weight entry for {date_str}")));
        } else {
            eprintln!("No weight entry for {date_str}");
        }
    }

    Ok(())
}

pub(crate) fn cmd_weight_history(
    service: &PortionService,
    days: Option<usize>,
    json: bool,
) -> Result<()> {
    let entries = service.weight_history(days)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        eprintln!("No weight entries found. Use `portions weight log` to record your weight.");
    } else {
        #[derive(Tabled)]
        struct WeightRow {
            #[tabled(rename = "Date")]
            date: String,
            #[tabled(rename = "Weight (lbs)")]
            value: String,
        }

        let rows: Vec<WeightRow> = entries
            .iter()
            .map(|e| WeightRow {
                date: e.date.clone(),
                value: format!("{:.1}", e.value),
            })
            .collect();

        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{table}");
    }

    Ok(())
}

pub(crate) fn cmd_weight_delete(service: &PortionService, date: &str, json: bool) -> Result<()> {
    let date = parse_date(Some(date.to_string()))?;
    let deleted = service.delete_weight(date)?;
    let date_str = date.format("%Y-%m-%d").to_string();

    if json {
        println!(
            "{}",
            serde_json::json!({ "date": date_str, "deleted": deleted })
        );
    } else if deleted {
        println!("Deleted weight entry for {date_str}");
    } else {
        eprintln!("No weight entry for {date_str}");
    }

    Ok(())
}
