pub mod normalize;
pub mod split;

pub use normalize::normalize;
pub use split::split_items;
