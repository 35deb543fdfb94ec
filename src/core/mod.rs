pub mod error;
pub mod types;

pub use types::{weapon_names_match, ParsedOption, UnitContext, WeaponCounts};
