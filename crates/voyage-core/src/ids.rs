//! ID prefix constants.
//!
//! IDs are generated by the database as `{prefix}-{8 hex chars}`, e.g. `tch-a3f8b2c1`.

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_TEAM: &str = "vtm";
pub const PREFIX_MEMBER: &str = "mbr";
pub const PREFIX_CATEGORY: &str = "cat";
pub const PREFIX_TECH_ITEM: &str = "tch";
pub const PREFIX_VOTE: &str = "vot";

/// Every prefix in use, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_USER,
    PREFIX_TEAM,
    PREFIX_MEMBER,
    PREFIX_CATEGORY,
    PREFIX_TECH_ITEM,
    PREFIX_VOTE,
];

/// Check whether `id` looks like `{prefix}-{hex}` for the given prefix.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
