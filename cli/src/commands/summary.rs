use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use portions_core::service::PortionService;

pub(crate) fn cmd_history(
    service: &PortionService,
    days: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut logs = service.history()?;
    if let Some(n) = days {
        logs.truncate(n);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&logs)?);
        return Ok(());
    }

    if logs.is_empty() {
        eprintln!("No logs yet. Use `portions add` to start tracking.");
        process::exit(2);
    }

    #[derive(Tabled)]
    struct HistoryRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Food")]
        food: u32,
        #[tabled(rename = "Water")]
        water: u32,
        #[tabled(rename = "Alcohol")]
        alcohol: u32,
    }

    let rows: Vec<HistoryRow> = logs
        .iter()
        .map(|l| HistoryRow {
            date: l.date.clone(),
            food: l.food_portions(),
            water: l.water,
            alcohol: l.alcohol,
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    Ok(())
}

pub(crate) fn cmd_progress(service: &PortionService, json: bool) -> Result<()> {
    let stats = service.progress()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    if stats.total_days == 0 {
        eprintln!("No logs yet. Use `portions add` to start tracking.");
        process::exit(2);
    }

    let days = stats.total_days;
    let streak = stats.streak;
    let protein = stats.protein_adherence;
    let veggies = stats.veggies_adherence;
    println!("Days tracked:      {days}");
    println!("Current streak:    {streak}");
    println!("Protein adherence: {protein}%");
    println!("Veggies adherence: {veggies}%");

    Ok(())
}
