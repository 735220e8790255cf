//! Command handlers for the Chunkwise CLI.

mod explain;
mod review;

pub use explain::ExplainCommand;
pub use review::ReviewCommand;
