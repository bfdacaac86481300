//! CLI commands

pub mod context;
pub mod health;
pub mod inspect;
pub mod merge;
pub mod observer;
pub mod style;

pub use context::CommandContext;
pub use health::run_health;
pub use inspect::run_inspect;
pub use merge::{MergeCommandOptions, run_merge};
