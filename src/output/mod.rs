//! Output module for harvest results
//!
//! This module handles:
//! - Merging per-page listings and ranking them by price
//! - Rendering the ranked lists for the console

mod aggregate;
mod report;

pub use aggregate::{aggregate, ResultSet};
pub use report::{format_results, print_results};
