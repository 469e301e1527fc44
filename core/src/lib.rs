//! Domain logic and persistence for a single-user food-group portion diary:
//! daily logs measured against derived targets, weight tracking, and the
//! onboarding questionnaire that seeds the targets.

pub mod dates;
pub mod models;
pub mod plan;
pub mod reconcile;
pub mod reference;
pub mod service;
pub mod store;
