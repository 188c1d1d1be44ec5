pub mod roster;
pub mod selection;
pub mod tech;
pub mod vote;

pub use roster::RosterCommands;
pub use selection::SelectionCommands;
pub use tech::TechCommands;
pub use vote::VoteCommands;
