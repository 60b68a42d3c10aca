//! Wire types for the SCB statistical database API.
//!
//! The catalog endpoint answers a GET with one of two shapes: an array of
//! child descriptors for an interior node, or an object carrying a
//! `variables` list for a table (leaf) node. The data endpoint answers a
//! POST with ordered column descriptors and coded key/value rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScbError;

/// One child descriptor inside an interior catalog node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Path segment identifying the child (e.g., "BE" or "BE0101").
    pub id: String,

    /// Node kind as reported by the API: "l" for a level, "t" for a table.
    #[serde(rename = "type")]
    pub kind: String,

    /// Display text of the child.
    pub text: String,
}

impl CatalogEntry {
    /// Whether this entry points at a table rather than a further level.
    #[must_use]
    pub fn is_table(&self) -> bool {
        self.kind == "t"
    }
}

/// A selectable dimension of a statistical table.
///
/// `values` and `value_texts` are parallel arrays: the label at position `i`
/// names the raw value at position `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Machine code used in queries (e.g., "Region").
    pub code: String,

    /// Human-readable display text (e.g., "region").
    pub text: String,

    /// Raw selectable values (e.g., "01", "02").
    pub values: Vec<String>,

    /// Human-readable labels, parallel to `values`.
    #[serde(rename = "valueTexts")]
    pub value_texts: Vec<String>,

    /// Whether the API may aggregate this dimension away when unselected.
    #[serde(default)]
    pub elimination: bool,

    /// Whether this dimension is the table's time axis.
    #[serde(default)]
    pub time: bool,
}

impl Variable {
    /// Resolve a human-readable label to its raw value by parallel position.
    ///
    /// Returns `None` when the label is unknown, or when the label exists but
    /// has no value at the same position.
    #[must_use]
    pub fn value_for_label(&self, label: &str) -> Option<&str> {
        let position = self.value_texts.iter().position(|text| text == label)?;
        self.values.get(position).map(String::as_str)
    }
}

/// Metadata payload of a table (leaf) node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    /// Table title.
    #[serde(default)]
    pub title: String,

    /// Selectable dimensions, in API order.
    pub variables: Vec<Variable>,
}

/// True if a raw catalog payload describes a table (leaf) node.
///
/// The API marks tables solely by the presence of a `variables` field;
/// interior nodes are arrays and never carry one.
#[must_use]
pub fn is_leaf_payload(payload: &serde_json::Value) -> bool {
    payload.get("variables").is_some()
}

/// A catalog node, classified by payload shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogNode {
    /// Interior node: children to navigate into.
    Branch(Vec<CatalogEntry>),

    /// Table (leaf) node: metadata with selectable variables.
    Table(TableMeta),
}

impl CatalogNode {
    /// Classify and decode a raw catalog payload.
    ///
    /// # Arguments
    /// * `payload` - The JSON body returned by a GET on a catalog path
    pub fn from_value(payload: serde_json::Value) -> serde_json::Result<Self> {
        if is_leaf_payload(&payload) {
            Ok(Self::Table(serde_json::from_value(payload)?))
        } else {
            Ok(Self::Branch(serde_json::from_value(payload)?))
        }
    }

    /// Whether this node is a table.
    #[must_use]
    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table(_))
    }

    /// Table metadata, if this node is a table.
    #[must_use]
    pub fn as_table(&self) -> Option<&TableMeta> {
        match self {
            Self::Table(meta) => Some(meta),
            Self::Branch(_) => None,
        }
    }

    /// Child descriptors, if this node is interior.
    #[must_use]
    pub fn children(&self) -> Option<&[CatalogEntry]> {
        match self {
            Self::Branch(entries) => Some(entries),
            Self::Table(_) => None,
        }
    }
}

/// One ordered column descriptor in a data response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Variable code backing the column.
    #[serde(default)]
    pub code: String,

    /// Display text, matching the variable's `text`.
    pub text: String,

    /// Column kind as reported by the API: "d" dimension, "t" time, "c" content.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// One data row: a coded key tuple plus the cell values it addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRow {
    /// Coded key, one entry per dimension column, in column order.
    pub key: Vec<String>,

    /// Cell values for the content columns.
    pub values: Vec<String>,
}

/// Tabular data payload of the default `json` response format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// Ordered column descriptors.
    pub columns: Vec<Column>,

    /// Data rows with coded keys.
    pub data: Vec<DataRow>,

    /// Table comments, passed through untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<serde_json::Value>,

    /// Source and update metadata, passed through untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<serde_json::Value>,
}

/// Response formats accepted by the data endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseFormat {
    /// PC-Axis file.
    #[serde(rename = "px")]
    Px,

    /// Comma-separated values.
    #[serde(rename = "csv")]
    Csv,

    /// SCB's tabular JSON (the only format this client parses).
    #[serde(rename = "json")]
    Json,

    /// Excel workbook.
    #[serde(rename = "xlsx")]
    Xlsx,

    /// JSON-stat version 1.
    #[serde(rename = "json-stat")]
    JsonStat,

    /// JSON-stat version 2.
    #[serde(rename = "json-stat2")]
    JsonStat2,

    /// SDMX-ML.
    #[serde(rename = "sdmx")]
    Sdmx,
}

impl ResponseFormat {
    /// Every format the API accepts.
    pub const ALL: [ResponseFormat; 7] = [
        ResponseFormat::Px,
        ResponseFormat::Csv,
        ResponseFormat::Json,
        ResponseFormat::Xlsx,
        ResponseFormat::JsonStat,
        ResponseFormat::JsonStat2,
        ResponseFormat::Sdmx,
    ];

    /// Get the wire name of the format.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xlsx => "xlsx",
            Self::JsonStat => "json-stat",
            Self::JsonStat2 => "json-stat2",
            Self::Sdmx => "sdmx",
        }
    }
}

impl Default for ResponseFormat {
    fn default() -> Self {
        Self::Json
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = ScbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "px" => Ok(Self::Px),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "xlsx" => Ok(Self::Xlsx),
            "json-stat" => Ok(Self::JsonStat),
            "json-stat2" => Ok(Self::JsonStat2),
            "sdmx" => Ok(Self::Sdmx),
            other => Err(ScbError::InvalidFormat(other.to_string())),
        }
    }
}
