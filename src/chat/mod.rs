//! Chat about a repository's structure.
//!
//! [`context::serialize`] turns the graph and selection into the grounding
//! text, [`assistant::Assistant`] sends one question with it to the
//! language model, and [`mention`] and [`reveal`] support the interactive
//! terminal loop.

pub mod assistant;
pub mod context;
pub mod mention;
pub mod reveal;

pub use assistant::Assistant;
pub use context::serialize;
