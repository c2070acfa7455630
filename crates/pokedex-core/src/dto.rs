//! Input shapes accepted at the service boundary, with their validation rules.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Input for creating an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewEntry {
    /// Catalog number (must be at least 1).
    pub no: u32,
    /// Name, in any casing.
    pub name: String,
}

impl NewEntry {
    /// Create a new entry input.
    pub fn new(no: u32, name: impl Into<String>) -> Self {
        Self {
            no,
            name: name.into(),
        }
    }

    /// Check the field rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_no(self.no)?;
        validate_name(&self.name)
    }
}

/// Partial update of an entry. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryPatch {
    /// New catalog number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<u32>,
    /// New name, in any casing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EntryPatch {
    /// Patch that only renames.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            no: None,
            name: Some(name.into()),
        }
    }

    /// Patch that only renumbers.
    pub fn no(no: u32) -> Self {
        Self {
            no: Some(no),
            name: None,
        }
    }

    /// Check the rules for each present field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(no) = self.no {
            validate_no(no)?;
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        Ok(())
    }
}

/// Page selection for listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pagination {
    /// Maximum entries to return. Falls back to the configured default.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Entries to skip. Defaults to 0.
    #[serde(default)]
    pub offset: Option<usize>,
}

impl Pagination {
    /// Create a pagination with both fields set.
    pub fn new(limit: usize, offset: usize) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// Check the field rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.limit {
            Some(0) => Err(ValidationError::new("limit must not be less than 1")),
            _ => Ok(()),
        }
    }
}

fn validate_no(no: u32) -> Result<(), ValidationError> {
    if no == 0 {
        return Err(ValidationError::new("no must be a positive number"));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new(
            "name must be longer than or equal to 1 characters",
        ));
    }
    Ok(())
}
