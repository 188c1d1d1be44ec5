pub mod catalog;
pub mod dispatch;
pub mod roster;
pub mod schema;
pub mod selection;
pub mod tech;
pub mod vote;
