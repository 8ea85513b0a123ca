pub mod entries;
pub mod health;
pub mod plans;
pub mod unified;
