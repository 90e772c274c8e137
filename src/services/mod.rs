pub mod catalog;
pub mod recommendations;

pub use recommendations::{match_preferences, recommend, Recommendation};
