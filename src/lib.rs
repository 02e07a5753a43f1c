//! Calorie Balance - Metabolic and energy-balance computation engine
//!
//! This crate turns physiological attributes and calorie events into
//! metabolic baselines, goal targets, a per-day energy ledger, progress
//! and trajectory analysis, and multi-resolution rollups.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
