//! # voyage-core
//!
//! Core types, ID prefixes, and error taxonomy for voyage team tech-stack voting.
//!
//! This crate provides the foundational types shared across all voyage crates:
//! - Entity structs for users, teams, members, categories, tech items, and votes
//! - The `AuthenticatedCaller` identity handed in from the boundary
//! - Selection payload types accepted by the selection engine
//! - Read-model and operation result types
//! - The `ErrorKind` taxonomy and its status-code mapping

pub mod entities;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod requests;
pub mod responses;

/// Maximum number of tech items a team may mark selected within one category.
pub const MAX_SELECTED_PER_CATEGORY: usize = 3;
