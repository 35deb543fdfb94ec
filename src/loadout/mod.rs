pub mod counts;
pub mod parser;

pub use counts::project_base_counts;
pub use parser::{parse_loadout, LoadoutLine};
