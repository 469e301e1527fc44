//! Static reference data: healthy options and a one-line tip per food
//! group, each option tagged with the most restrictive diet style that can
//! eat it (vegan options suit everyone, omnivore options suit omnivores
//! only).

use serde::Serialize;

use crate::models::DietStyle::{Omnivore, Vegan, Vegetarian};
use crate::models::{DietStyle, FoodGroup};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FoodOption {
    pub name: &'static str,
    pub diet: DietStyle,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GroupReference {
    pub title: &'static str,
    pub tip: &'static str,
    pub options: &'static [FoodOption],
}

const fn opt(name: &'static str, diet: DietStyle) -> FoodOption {
    FoodOption { name, diet }
}

const PROTEIN_OPTIONS: &[FoodOption] = &[
    opt("Chicken breast", Omnivore),
    opt("Salmon", Omnivore),
    opt("Lean beef", Omnivore),
    opt("Eggs", Vegetarian),
    opt("Tofu", Vegan),
    opt("Lentils", Vegan),
    opt("Black beans", Vegan),
];

const VEGGIE_OPTIONS: &[FoodOption] = &[
    opt("Broccoli", Vegan),
    opt("Spinach", Vegan),
    opt("Kale", Vegan),
    opt("Carrots", Vegan),
    opt("Bell peppers", Vegan),
    opt("Tomatoes", Vegan),
    opt("Cauliflower", Vegan),
    opt("Mushrooms", Vegan),
];

const FRUIT_OPTIONS: &[FoodOption] = &[
    opt("Berries", Vegan),
    opt("Apple", Vegan),
    opt("Orange", Vegan),
    opt("Banana", Vegan),
    opt("Grapes", Vegan),
];

const WHOLE_GRAIN_OPTIONS: &[FoodOption] = &[
    opt("Brown rice", Vegan),
    opt("Quinoa", Vegan),
    opt("Oats", Vegan),
    opt("Whole-wheat pasta", Vegan),
    opt("Corn tortillas", Vegan),
];

const FAT_OPTIONS: &[FoodOption] = &[
    opt("Olive oil", Vegan),
    opt("Avocado", Vegan),
    opt("Olives", Vegan),
    opt("Tahini", Vegan),
    opt("Nut butter", Vegetarian),
];

const NUTS_SEEDS_OPTIONS: &[FoodOption] = &[
    opt("Almonds", Vegan),
    opt("Walnuts", Vegan),
    opt("Pistachios", Vegan),
    opt("Chia seeds", Vegan),
    opt("Flax seeds", Vegan),
];

const LEGUME_OPTIONS: &[FoodOption] = &[
    opt("Lentils", Vegan),
    opt("Chickpeas", Vegan),
    opt("Black beans", Vegan),
    opt("Kidney beans", Vegan),
    opt("Hummus", Vegan),
];

const WATER_OPTIONS: &[FoodOption] = &[
    opt("Water", Vegan),
    opt("Herbal tea", Vegan),
    opt("Sparkling water", Vegan),
];

const ALCOHOL_OPTIONS: &[FoodOption] = &[
    opt("Wine (5 oz)", Vegan),
    opt("Beer (12 oz)", Vegan),
    opt("Spirits (1.5 oz)", Vegan),
];

const DAIRY_OPTIONS: &[FoodOption] = &[
    opt("Greek yogurt", Vegetarian),
    opt("Cottage cheese", Vegetarian),
    opt("Milk", Vegetarian),
    opt("Cheese", Vegetarian),
    opt("Fortified soy milk", Vegan),
];

#[must_use]
pub fn group_reference(group: FoodGroup) -> GroupReference {
    match group {
        FoodGroup::Protein => GroupReference {
            title: "Protein Options",
            tip: "Aim for lean proteins to support muscle health and satiety.",
            options: PROTEIN_OPTIONS,
        },
        FoodGroup::Veggies => GroupReference {
            title: "Vegetable Options",
            tip: "Fill half your plate with colorful vegetables for vitamins and fiber.",
            options: VEGGIE_OPTIONS,
        },
        FoodGroup::Fruit => GroupReference {
            title: "Fruit Options",
            tip: "Choose whole fruits for natural sweetness and fiber.",
            options: FRUIT_OPTIONS,
        },
        FoodGroup::WholeGrains => GroupReference {
            title: "Whole Grain Options",
            tip: "Choose whole grains over refined grains for sustained energy.",
            options: WHOLE_GRAIN_OPTIONS,
        },
        FoodGroup::Fats => GroupReference {
            title: "Healthy Fat Options",
            tip: "Include healthy fats for heart health and nutrient absorption.",
            options: FAT_OPTIONS,
        },
        FoodGroup::NutsSeeds => GroupReference {
            title: "Nuts & Seeds Options",
            tip: "A small handful provides protein, healthy fats, and minerals.",
            options: NUTS_SEEDS_OPTIONS,
        },
        FoodGroup::Legumes => GroupReference {
            title: "Legume Options",
            tip: "Legumes are excellent sources of plant-based protein and fiber.",
            options: LEGUME_OPTIONS,
        },
        FoodGroup::Water => GroupReference {
            title: "Hydration",
            tip: "Stay hydrated throughout the day. Each glass is about 8 oz.",
            options: WATER_OPTIONS,
        },
        FoodGroup::Alcohol => GroupReference {
            title: "Alcohol",
            tip: "Limit alcohol for better health outcomes. Maximum 2 servings per day.",
            options: ALCOHOL_OPTIONS,
        },
        FoodGroup::Dairy => GroupReference {
            title: "Dairy Options",
            tip: "Choose dairy or plant-based alternatives for calcium and protein.",
            options: DAIRY_OPTIONS,
        },
    }
}

/// Options a user with the given diet style can eat. Vegan ⊂ vegetarian ⊂
/// omnivore.
#[must_use]
pub fn options_for(group: FoodGroup, diet: DietStyle) -> Vec<FoodOption> {
    let allowed = |option_diet: DietStyle| match diet {
        DietStyle::Omnivore => true,
        DietStyle::Vegetarian => {
            matches!(option_diet, DietStyle::Vegetarian | DietStyle::Vegan)
        }
        DietStyle::Vegan => option_diet == DietStyle::Vegan,
    };

    group_reference(group)
        .options
        .iter()
        .copied()
        .filter(|o| allowed(o.diet))
        .collect()
}
