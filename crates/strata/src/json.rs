//! JSON interchange for positioned graphs.
//!
//! The document mirrors [`PositionedGraph`] field for field. Numbers are written in their
//! shortest round-trippable form and parsed back exactly, so `from_json_str(to_json())` yields
//! bit-identical coordinates and re-serializing yields the same text.

use crate::error::Result;
use crate::positioned::PositionedGraph;
use serde_json::Value;
use std::fmt;

/// A positioned graph as a JSON document. `Display` prints the compact form.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphJson {
    value: Value,
}

impl GraphJson {
    pub fn to_string_pretty(&self) -> String {
        format!("{:#}", self.value)
    }

    /// The document as an in-memory JSON value.
    pub fn to_value(&self) -> Value {
        self.value.clone()
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

impl fmt::Display for GraphJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl PositionedGraph {
    pub fn to_json(&self) -> GraphJson {
        GraphJson {
            value: serde_json::to_value(self).unwrap_or(Value::Null),
        }
    }

    /// Parses a document produced by [`Self::to_json`].
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
