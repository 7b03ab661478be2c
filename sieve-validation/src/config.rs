//! Declarative rule sets loaded from TOML or JSON
//!
//! A rule set lists, per field, the filter descriptors and rule descriptors
//! to attach to a [`Validator`]. The `"*"` field holds wildcard filters and
//! the wildcard pseudo-field rules.
//!
//! ```toml
//! [fields."*"]
//! filters = ["trim"]
//!
//! [fields.email]
//! filters = ["lowerCase"]
//! rules = ["email:required", { rule = "text:max=64", error = "EMAIL_TOO_LONG" }]
//! ```

use crate::{Error, Registry, Result, Validator};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Supported rule set file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }

    /// Detect the format from a file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::ConfigLoad("No file extension found".to_string()))?;

        Self::from_extension(ext)
            .ok_or_else(|| Error::ConfigLoad(format!("Unsupported format: {}", ext)))
    }
}

/// One rule entry: a bare descriptor, or a descriptor with an error override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleEntry {
    Descriptor(String),
    Detailed {
        rule: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl RuleEntry {
    pub fn descriptor(&self) -> &str {
        match self {
            RuleEntry::Descriptor(descriptor) => descriptor,
            RuleEntry::Detailed { rule, .. } => rule,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RuleEntry::Descriptor(_) => None,
            RuleEntry::Detailed { error, .. } => error.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(default)]
    pub filters: Vec<String>,
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

/// Filters and rules for a set of fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetConfig {
    #[serde(default)]
    pub fields: IndexMap<String, FieldConfig>,
}

impl RuleSetConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(format!("TOML parse error: {}", e)))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::ConfigParse(format!("JSON parse error: {}", e)))
    }

    /// Parse a rule set in the given format
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        match format {
            FileFormat::Json => Self::from_json_str(content),
            FileFormat::Toml => Self::from_toml_str(content),
        }
    }

    /// Load a rule set, detecting the format from the file extension
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = FileFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;

        debug!("Loading rule set from {}", path.display());
        Self::parse(&content, format)
    }

    /// Attach every configured filter and rule to `validator`.
    ///
    /// Stops at the first descriptor that cannot be built.
    pub fn apply(&self, validator: &mut Validator) -> Result<()> {
        for (field, config) in &self.fields {
            for descriptor in &config.filters {
                validator.add_filter_descriptor(Some(field), descriptor)?;
            }
            for entry in &config.rules {
                validator.add_rule_descriptor(Some(field), entry.descriptor(), entry.error())?;
            }
        }

        Ok(())
    }

    /// Build a validator for `data` with this rule set attached
    pub fn validator(&self, data: crate::Data) -> Result<Validator> {
        self.validator_with_registry(data, Registry::shared())
    }

    /// Build a validator resolving descriptors against `registry`
    pub fn validator_with_registry(
        &self,
        data: crate::Data,
        registry: Arc<Registry>,
    ) -> Result<Validator> {
        let mut validator = Validator::with_registry(data, registry);
        self.apply(&mut validator)?;
        Ok(validator)
    }
}
