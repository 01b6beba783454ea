pub mod builder;
pub mod plan_model;
