pub mod diet;
pub mod exercise;
pub mod plans;
pub mod sleep;
