//! Entity structs for all voyage domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `voyage-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema`.

mod category;
mod member;
mod team;
mod tech_item;
mod user;
mod vote;

pub use category::TechCategory;
pub use member::VoyageTeamMember;
pub use team::VoyageTeam;
pub use tech_item::TeamTechStackItem;
pub use user::User;
pub use vote::TeamTechStackItemVote;
