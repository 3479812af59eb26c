//! yelist: drill into the Yelp business category taxonomy and plan activities.
//!
//! Layers, innermost first: `domain` (category registry, materialized view,
//! traversal, activity list), `application` (catalog loading, services),
//! `infrastructure` (I/O traits, wiring), `cli`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
