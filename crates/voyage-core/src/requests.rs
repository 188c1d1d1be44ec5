//! Request payloads accepted by the selection engine and proposal service.
//!
//! The selection payload is an external wire shape, so its fields use
//! `camelCase` (`categoryId`, `techId`, `isSelected`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Bulk selection update for one team.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SelectionUpdate {
    pub categories: Vec<CategorySelection>,
}

/// Requested `isSelected` state for tech items of one category.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySelection {
    pub category_id: String,
    pub techs: Vec<TechSelection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TechSelection {
    pub tech_id: String,
    pub is_selected: bool,
}

impl CategorySelection {
    /// Number of entries requesting `isSelected = true`.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.techs.iter().filter(|t| t.is_selected).count()
    }
}

/// Reject the whole batch if any category requests more than `cap` selected items.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming the first offending category.
pub fn validate_selection_cap(categories: &[CategorySelection], cap: usize) -> Result<(), CoreError> {
    for category in categories {
        let selected = category.selected_count();
        if selected > cap {
            return Err(CoreError::Validation(format!(
                "Category {} has {selected} selected tech items; at most {cap} may be selected",
                category.category_id
            )));
        }
    }
    Ok(())
}

/// Trim a proposed tech name and reject empty names.
///
/// # Errors
///
/// Returns `CoreError::Validation` if nothing but whitespace was given.
pub fn normalize_tech_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Tech name must not be empty".into()));
    }
    Ok(trimmed.to_string())
}
