use anyhow::Result;

use portions_core::models::DietStyle;
use portions_core::reference::{group_reference, options_for};
use portions_core::service::PortionService;

use super::helpers::parse_group;

pub(crate) fn cmd_options(service: &PortionService, group: &str, json: bool) -> Result<()> {
    let group = parse_group(group)?;
    let diet = service
        .profile()?
        .map_or(DietStyle::Omnivore, |p| p.diet_style);

    let reference = group_reference(group);
    let options = options_for(group, diet);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "group": group.as_key(),
                "diet": diet.as_str(),
                "tip": reference.tip,
                "options": options,
            }))?
        );
        return Ok(());
    }

    println!("{}", reference.title);
    println!("{}\n", reference.tip);
    for option in &options {
        println!("  - {}", option.name);
    }

    Ok(())
}
