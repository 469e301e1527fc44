use anyhow::Result;

use portions_core::models::{DietStyle, FoodGroup, Goal, Sex};
use portions_core::service::{OnboardingInput, PortionService};

#[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
pub(crate) fn cmd_onboard(
    service: &PortionService,
    goal: &str,
    diet: &str,
    sex: Option<&str>,
    weight: Option<f64>,
    target_weight: Option<f64>,
    reset_time: Option<String>,
    reminders: bool,
    json: bool,
) -> Result<()> {
    let goal: Goal = goal.parse()?;
    let diet_style: DietStyle = diet.parse()?;
    let sex: Option<Sex> = sex.map(str::parse).transpose()?;

    if service.onboarding_complete()? {
        eprintln!("Re-running onboarding replaces your profile and targets.");
    }

    let outcome = service.complete_onboarding(OnboardingInput {
        goal,
        diet_style,
        sex,
        current_weight: weight,
        target_weight,
        reset_time,
        reminders_on: reminders,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("Profile saved: {} ({})", goal.as_str(), diet_style.as_str());
    if let Some(size) = outcome.size {
        println!("Plan size: {size}");
    }
    println!("\nDaily targets:");
    for group in FoodGroup::ALL {
        let target = outcome.targets.get(group);
        println!("  {:<14} {target}", group.label());
    }
    println!("\nLog your first portion with `portions add <group>`.");

    Ok(())
}
