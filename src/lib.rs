//! Healthcare Bot - Rule-based diagnostic chat assistant
//!
//! This crate implements a guided conversation that collects a user's name,
//! age, main symptom and its duration, asks about related symptoms, and
//! concludes with a preliminary and a reconciled disease prediction.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
