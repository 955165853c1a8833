//! Command implementations.

mod plan;
mod tree;

pub use plan::PlanCommand;
pub use tree::{select_gateway, TreeCommand};
