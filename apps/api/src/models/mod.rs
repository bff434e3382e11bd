// Stage record types. Every field is optional on the wire; read through the
// accessor methods, which substitute defaults.

pub mod lenient;
pub mod plan;
pub mod profile;
pub mod recommendations;

pub use plan::ActionPlan;
pub use profile::{Grade, StudentProfile};
pub use recommendations::{UniversityPick, UniversityRecommendationSet};
