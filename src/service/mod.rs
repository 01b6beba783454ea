pub mod autofill_classifier;
pub mod autofill_service;
