use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Free-form document body: field name to arbitrary JSON value
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// BulkCommand selects what a bulk line pair does to its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BulkCommand {
    #[default]
    Index,
    Create,
    Delete,
}

impl BulkCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkCommand::Index => "index",
            BulkCommand::Create => "create",
            BulkCommand::Delete => "delete",
        }
    }

    /// Delete lines carry only addressing metadata, never a source line
    pub fn has_source(&self) -> bool {
        !matches!(self, BulkCommand::Delete)
    }
}

impl fmt::Display for BulkCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BulkCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index" => Ok(BulkCommand::Index),
            "create" => Ok(BulkCommand::Create),
            "delete" => Ok(BulkCommand::Delete),
            other => Err(format!("unknown bulk command: {}", other)),
        }
    }
}

/// Document is the unit of single-document and bulk mutations.
///
/// An absent `id` lets the engine assign one. An absent `index` is only
/// meaningful inside a bulk request, where the document inherits the index
/// the request is addressed to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub bulk_command: BulkCommand,
    #[serde(default)]
    pub fields: Fields,
}

impl Document {
    pub fn new(index: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            index: Some(index.into()),
            doc_type: doc_type.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_command(mut self, command: BulkCommand) -> Self {
        self.bulk_command = command;
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Drop the index so a bulk request supplies it
    pub fn without_index(mut self) -> Self {
        self.index = None;
        self
    }
}
