use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Hard daily ceiling on logged alcohol portions. Incrementing past this is
/// rejected, not clamped.
pub const ALCOHOL_DAILY_LIMIT: u32 = 2;

/// Maximum value a user may set the alcohol *target* to.
pub const ALCOHOL_MAX_TARGET: u32 = 2;

/// Dairy target used when converting a nine-group portion plan into a full
/// targets record (the composite derivation does not produce dairy).
pub const DEFAULT_DAIRY_TARGET: u32 = 2;

/// Rollover time used when no profile exists yet.
pub const DEFAULT_RESET_TIME: &str = "04:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FoodGroup {
    Protein,
    Veggies,
    Fruit,
    WholeGrains,
    Fats,
    NutsSeeds,
    Legumes,
    Water,
    Alcohol,
    Dairy,
}

impl FoodGroup {
    pub const ALL: [FoodGroup; 10] = [
        FoodGroup::Protein,
        FoodGroup::Veggies,
        FoodGroup::Fruit,
        FoodGroup::WholeGrains,
        FoodGroup::Fats,
        FoodGroup::NutsSeeds,
        FoodGroup::Legumes,
        FoodGroup::Water,
        FoodGroup::Alcohol,
        FoodGroup::Dairy,
    ];

    /// Storage key for this group, matching the camelCase name used in
    /// persisted records.
    #[must_use]
    pub fn as_key(self) -> &'static str {
        match self {
            FoodGroup::Protein => "protein",
            FoodGroup::Veggies => "veggies",
            FoodGroup::Fruit => "fruit",
            FoodGroup::WholeGrains => "wholeGrains",
            FoodGroup::Fats => "fats",
            FoodGroup::NutsSeeds => "nutsSeeds",
            FoodGroup::Legumes => "legumes",
            FoodGroup::Water => "water",
            FoodGroup::Alcohol => "alcohol",
            FoodGroup::Dairy => "dairy",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FoodGroup::Protein => "Protein",
            FoodGroup::Veggies => "Veggies",
            FoodGroup::Fruit => "Fruit",
            FoodGroup::WholeGrains => "Whole Grains",
            FoodGroup::Fats => "Fats",
            FoodGroup::NutsSeeds => "Nuts & Seeds",
            FoodGroup::Legumes => "Legumes",
            FoodGroup::Water => "Water",
            FoodGroup::Alcohol => "Alcohol",
            FoodGroup::Dairy => "Dairy",
        }
    }
}

impl FromStr for FoodGroup {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        let group = match lower.as_str() {
            "protein" => FoodGroup::Protein,
            "veggies" | "vegetables" => FoodGroup::Veggies,
            "fruit" => FoodGroup::Fruit,
            "wholegrains" | "whole-grains" | "grains" => FoodGroup::WholeGrains,
            "fats" => FoodGroup::Fats,
            "nutsseeds" | "nuts-seeds" | "nuts" => FoodGroup::NutsSeeds,
            "legumes" => FoodGroup::Legumes,
            "water" => FoodGroup::Water,
            "alcohol" => FoodGroup::Alcohol,
            "dairy" => FoodGroup::Dairy,
            _ => bail!(
                "Invalid food group '{s}'. Must be one of: {}",
                FoodGroup::ALL
                    .iter()
                    .map(|g| g.as_key())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };
        Ok(group)
    }
}

impl fmt::Display for FoodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "Lose weight")]
    LoseWeight,
    #[serde(rename = "Maintain")]
    Maintain,
    #[serde(rename = "Gain muscle")]
    GainMuscle,
    #[serde(rename = "Eat healthier")]
    EatHealthier,
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Goal::LoseWeight,
        Goal::Maintain,
        Goal::GainMuscle,
        Goal::EatHealthier,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Goal::LoseWeight => "Lose weight",
            Goal::Maintain => "Maintain",
            Goal::GainMuscle => "Gain muscle",
            Goal::EatHealthier => "Eat healthier",
        }
    }
}

impl FromStr for Goal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lose" | "lose-weight" | "lose weight" => Ok(Goal::LoseWeight),
            "maintain" => Ok(Goal::Maintain),
            "gain" | "gain-muscle" | "gain muscle" => Ok(Goal::GainMuscle),
            "health" | "eat-healthier" | "eat healthier" => Ok(Goal::EatHealthier),
            _ => bail!("Invalid goal '{s}'. Use lose, maintain, gain, or health"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietStyle {
    Omnivore,
    Vegetarian,
    Vegan,
}

impl DietStyle {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DietStyle::Omnivore => "omnivore",
            DietStyle::Vegetarian => "vegetarian",
            DietStyle::Vegan => "vegan",
        }
    }
}

impl FromStr for DietStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "omnivore" => Ok(DietStyle::Omnivore),
            "vegetarian" => Ok(DietStyle::Vegetarian),
            "vegan" => Ok(DietStyle::Vegan),
            _ => bail!("Invalid diet style '{s}'. Use omnivore, vegetarian, or vegan"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    #[serde(rename = "Prefer not to say")]
    Unspecified,
}

impl FromStr for Sex {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            "unspecified" | "none" | "prefer not to say" => Ok(Sex::Unspecified),
            _ => bail!("Invalid sex '{s}'. Use male, female, or unspecified"),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unspecified => "unspecified",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SizeCategory::Small => "Small",
            SizeCategory::Medium => "Medium",
            SizeCategory::Large => "Large",
        };
        f.write_str(s)
    }
}

/// Nine-group daily portion plan produced by the composite derivation.
/// Dairy is added separately when converting to [`DailyTargets`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortionPlan {
    pub protein: u32,
    pub veggies: u32,
    pub fruit: u32,
    pub whole_grains: u32,
    pub legumes: u32,
    pub fats: u32,
    pub nuts_seeds: u32,
    pub alcohol: u32,
    pub water: u32,
}

impl PortionPlan {
    #[must_use]
    pub fn into_daily_targets(self, date: String) -> DailyTargets {
        DailyTargets {
            date,
            protein: self.protein,
            veggies: self.veggies,
            fruit: self.fruit,
            whole_grains: self.whole_grains,
            fats: self.fats,
            nuts_seeds: self.nuts_seeds,
            legumes: self.legumes,
            water: self.water,
            alcohol: self.alcohol,
            dairy: DEFAULT_DAIRY_TARGET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTargets {
    pub date: String,
    pub protein: u32,
    pub veggies: u32,
    pub fruit: u32,
    pub whole_grains: u32,
    pub fats: u32,
    pub nuts_seeds: u32,
    pub legumes: u32,
    pub water: u32,
    pub alcohol: u32,
    pub dairy: u32,
}

impl DailyTargets {
    #[must_use]
    pub fn get(&self, group: FoodGroup) -> u32 {
        match group {
            FoodGroup::Protein => self.protein,
            FoodGroup::Veggies => self.veggies,
            FoodGroup::Fruit => self.fruit,
            FoodGroup::WholeGrains => self.whole_grains,
            FoodGroup::Fats => self.fats,
            FoodGroup::NutsSeeds => self.nuts_seeds,
            FoodGroup::Legumes => self.legumes,
            FoodGroup::Water => self.water,
            FoodGroup::Alcohol => self.alcohol,
            FoodGroup::Dairy => self.dairy,
        }
    }

    pub fn set(&mut self, group: FoodGroup, value: u32) {
        match group {
            FoodGroup::Protein => self.protein = value,
            FoodGroup::Veggies => self.veggies = value,
            FoodGroup::Fruit => self.fruit = value,
            FoodGroup::WholeGrains => self.whole_grains = value,
            FoodGroup::Fats => self.fats = value,
            FoodGroup::NutsSeeds => self.nuts_seeds = value,
            FoodGroup::Legumes => self.legumes = value,
            FoodGroup::Water => self.water = value,
            FoodGroup::Alcohol => self.alcohol = value,
            FoodGroup::Dairy => self.dairy = value,
        }
    }
}

/// One record per calendar date. The date string is the natural key; the
/// reconciler enforces at most one record per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub date: String,
    pub protein: u32,
    pub veggies: u32,
    pub fruit: u32,
    pub whole_grains: u32,
    pub fats: u32,
    pub nuts_seeds: u32,
    pub legumes: u32,
    pub water: u32,
    pub alcohol: u32,
    pub dairy: u32,
}

impl DailyLog {
    #[must_use]
    pub fn new(date: String) -> Self {
        DailyLog {
            date,
            protein: 0,
            veggies: 0,
            fruit: 0,
            whole_grains: 0,
            fats: 0,
            nuts_seeds: 0,
            legumes: 0,
            water: 0,
            alcohol: 0,
            dairy: 0,
        }
    }

    #[must_use]
    pub fn get(&self, group: FoodGroup) -> u32 {
        match group {
            FoodGroup::Protein => self.protein,
            FoodGroup::Veggies => self.veggies,
            FoodGroup::Fruit => self.fruit,
            FoodGroup::WholeGrains => self.whole_grains,
            FoodGroup::Fats => self.fats,
            FoodGroup::NutsSeeds => self.nuts_seeds,
            FoodGroup::Legumes => self.legumes,
            FoodGroup::Water => self.water,
            FoodGroup::Alcohol => self.alcohol,
            FoodGroup::Dairy => self.dairy,
        }
    }

    pub fn set(&mut self, group: FoodGroup, value: u32) {
        match group {
            FoodGroup::Protein => self.protein = value,
            FoodGroup::Veggies => self.veggies = value,
            FoodGroup::Fruit => self.fruit = value,
            FoodGroup::WholeGrains => self.whole_grains = value,
            FoodGroup::Fats => self.fats = value,
            FoodGroup::NutsSeeds => self.nuts_seeds = value,
            FoodGroup::Legumes => self.legumes = value,
            FoodGroup::Water => self.water = value,
            FoodGroup::Alcohol => self.alcohol = value,
            FoodGroup::Dairy => self.dairy = value,
        }
    }

    /// Sum of all tracked food portions, water excluded. Used by the
    /// logging-streak computation.
    #[must_use]
    pub fn food_portions(&self) -> u32 {
        self.protein
            + self.veggies
            + self.fruit
            + self.whole_grains
            + self.fats
            + self.nuts_seeds
            + self.legumes
            + self.dairy
    }
}

/// One weight measurement per calendar date, upserted by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricWeight {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub goal: Goal,
    pub diet_style: DietStyle,
    pub reset_time: String,
    pub reminders_on: bool,
    #[serde(default)]
    pub reminder_times: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sex: Option<Sex>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub current_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub portion_plan: Option<PortionPlan>,
}

pub fn validate_reset_time(s: &str) -> Result<()> {
    if chrono::NaiveTime::parse_from_str(s, "%H:%M").is_err() {
        bail!("Invalid reset time '{s}'. Must be HH:MM (e.g. 04:00)");
    }
    Ok(())
}

pub fn validate_weight_input(value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        bail!("Weight must be a number greater than 0");
    }
    Ok(())
}

/// Edit-time validation for a target value. The alcohol target is user
/// editable but capped at [`ALCOHOL_MAX_TARGET`].
pub fn validate_target_value(group: FoodGroup, value: u32) -> Result<()> {
    if group == FoodGroup::Alcohol && value > ALCOHOL_MAX_TARGET {
        bail!("Alcohol target cannot exceed {ALCOHOL_MAX_TARGET} portions per day");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_group_from_str() {
        assert_eq!("protein".parse::<FoodGroup>().unwrap(), FoodGroup::Protein);
        assert_eq!(
            "wholeGrains".parse::<FoodGroup>().unwrap(),
            FoodGroup::WholeGrains
        );
        assert_eq!(
            "grains".parse::<FoodGroup>().unwrap(),
            FoodGroup::WholeGrains
        );
        assert_eq!("Nuts".parse::<FoodGroup>().unwrap(), FoodGroup::NutsSeeds);
        assert_eq!(
            "vegetables".parse::<FoodGroup>().unwrap(),
            FoodGroup::Veggies
        );
    }

    #[test]
    fn test_food_group_from_str_invalid() {
        assert!("candy".parse::<FoodGroup>().is_err());
        assert!("".parse::<FoodGroup>().is_err());
    }

    #[test]
    fn test_food_group_key_round_trip() {
        for group in FoodGroup::ALL {
            assert_eq!(group.as_key().parse::<FoodGroup>().unwrap(), group);
        }
    }

    #[test]
    fn test_goal_from_str() {
        assert_eq!("lose".parse::<Goal>().unwrap(), Goal::LoseWeight);
        assert_eq!("Maintain".parse::<Goal>().unwrap(), Goal::Maintain);
        assert_eq!("gain-muscle".parse::<Goal>().unwrap(), Goal::GainMuscle);
        assert_eq!("health".parse::<Goal>().unwrap(), Goal::EatHealthier);
        assert!("shred".parse::<Goal>().is_err());
    }

    #[test]
    fn test_daily_log_new_is_zeroed() {
        let log = DailyLog::new("2024-01-05".to_string());
        for group in FoodGroup::ALL {
            assert_eq!(log.get(group), 0);
        }
        assert_eq!(log.date, "2024-01-05");
    }

    #[test]
    fn test_daily_log_get_set() {
        let mut log = DailyLog::new("2024-01-05".to_string());
        log.set(FoodGroup::Veggies, 3);
        assert_eq!(log.get(FoodGroup::Veggies), 3);
        assert_eq!(log.get(FoodGroup::Protein), 0);
    }

    #[test]
    fn test_food_portions_excludes_water() {
        let mut log = DailyLog::new("2024-01-05".to_string());
        log.water = 8;
        assert_eq!(log.food_portions(), 0);
        log.protein = 2;
        log.dairy = 1;
        assert_eq!(log.food_portions(), 3);
    }

    #[test]
    fn test_validate_reset_time() {
        assert!(validate_reset_time("04:00").is_ok());
        assert!(validate_reset_time("23:59").is_ok());
        assert!(validate_reset_time("24:00").is_err());
        assert!(validate_reset_time("4am").is_err());
        assert!(validate_reset_time("").is_err());
    }

    #[test]
    fn test_validate_weight_input() {
        assert!(validate_weight_input(150.0).is_ok());
        assert!(validate_weight_input(0.0).is_err());
        assert!(validate_weight_input(-10.0).is_err());
        assert!(validate_weight_input(f64::NAN).is_err());
        assert!(validate_weight_input(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_target_value_alcohol_cap() {
        assert!(validate_target_value(FoodGroup::Alcohol, 2).is_ok());
        assert!(validate_target_value(FoodGroup::Alcohol, 3).is_err());
        // No cap on anything else
        assert!(validate_target_value(FoodGroup::Water, 15).is_ok());
    }

    #[test]
    fn test_persisted_field_names_are_camel_case() {
        let log = DailyLog::new("2024-01-05".to_string());
        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("\"wholeGrains\""));
        assert!(json.contains("\"nutsSeeds\""));
        assert!(!json.contains("whole_grains"));
    }

    #[test]
    fn test_profile_serde_shape() {
        let profile = UserProfile {
            goal: Goal::LoseWeight,
            diet_style: DietStyle::Vegan,
            reset_time: "04:00".to_string(),
            reminders_on: true,
            reminder_times: vec!["09:00".to_string()],
            sex: Some(Sex::Female),
            current_weight: Some(160.0),
            target_weight: None,
            portion_plan: None,
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"goal\":\"Lose weight\""));
        assert!(json.contains("\"dietStyle\":\"vegan\""));
        assert!(json.contains("\"resetTime\":\"04:00\""));
        assert!(!json.contains("targetWeight"));

        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
