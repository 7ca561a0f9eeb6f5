//! PM Advisor - AI-assisted project management assessments.
//!
//! This crate turns a free-text project description into a narrative
//! recommendation, a structured RAID register, and a slide deck that can be
//! stepped through interactively or exported as a presentation file.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
