//! Core data model types: staged input, classification results, sample emails.

pub mod input;
pub mod result;
pub mod sample;
