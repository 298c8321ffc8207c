//! ScenarioFlow Core
//!
//! Scenario data model, scenario file loading, and the output comparison
//! used to decide whether a step passed.

pub mod compare;
pub mod error;
pub mod loader;
pub mod model;
pub mod similarity;

pub use compare::{Comparison, Expectation, Strategy, compare};
pub use error::{CompareError, Result, ScenarioError, Side};
pub use loader::{ScenarioFormat, load_scenario, parse_scenario};
pub use model::*;
