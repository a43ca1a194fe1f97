//! Name normalization.

use std::collections::BTreeMap;

use regex_lite::Regex;

use crate::config::NameRules;
use crate::error::{Result, RosterError};

/// Maps names as printed to names as displayed on the lanes.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    middle_initial: Option<Regex>,
    overrides: BTreeMap<String, String>,
}

impl NameNormalizer {
    pub fn new(rules: &NameRules) -> Result<Self> {
        let middle_initial = if rules.collapse_middle_initial {
            let re = Regex::new(r"\s+[A-Z]\.\s+")
                .map_err(|e| RosterError::InvalidConfig(format!("middle initial pattern: {e}")))?;
            Some(re)
        } else {
            None
        };
        Ok(Self {
            middle_initial,
            overrides: rules.overrides.clone(),
        })
    }

    /// Normalize one trimmed name.
    ///
    /// An override entry wins outright; otherwise middle initials are
    /// collapsed when enabled.
    pub fn normalize(&self, name: &str) -> String {
        if let Some(display) = self.overrides.get(name) {
            return display.clone();
        }
        match &self.middle_initial {
            Some(re) => re.replace_all(name, " ").into_owned(),
            None => name.to_string(),
        }
    }
}
