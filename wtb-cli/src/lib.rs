//! Command-line front end for the work-to-buy estimator.
//!
//! [`app::run`] ties the pieces together: [`config`] supplies policies,
//! rate table location and link settings, [`cli`] builds the input,
//! `wtb-core` evaluates it and [`report`] renders the outcome.

pub mod app;
pub mod cli;
pub mod config;
pub mod links;
pub mod logging;
pub mod report;
pub mod utils;
