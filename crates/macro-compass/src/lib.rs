//! Macroeconomic indicator grading over World Bank open data.
//!
//! The [`grading`] engine classifies observations against the threshold bands
//! held by the [`catalog`], and the [`views`] module assembles explorer,
//! scorecard, and comparison payloads from series supplied by a
//! [`series::SeriesFetcher`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod grading;
pub mod series;
pub mod telemetry;
pub mod views;
