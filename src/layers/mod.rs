pub mod rules;
pub mod style;
