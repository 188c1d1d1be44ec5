//! Repository modules implementing the tech-stack operations.
//!
//! Each module adds methods to `TechStackService` via `impl TechStackService` blocks.

pub mod catalog;
pub mod identity;
pub mod proposal;
pub mod roster;
pub mod selection;
pub mod team;
pub mod vote;
