//! Jersey Studio
//!
//! Configuration model, preview projection, team rosters and cart aggregation
//! for the 8TWO custom jersey designer and storefront.

pub mod cart;
pub mod config;
pub mod domain;
pub mod engine;
pub mod storefront;
