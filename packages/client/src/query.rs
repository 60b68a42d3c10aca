//! Query construction and label translation.
//!
//! Selections name variables and values by their human-readable texts; the
//! wire query wants machine codes. Resolution walks a table's variables,
//! translates labels to raw values by parallel position, and remembers the
//! reverse mapping so that response rows can be translated back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScbError};
use crate::types::{ResponseFormat, TableData, Variable};

/// An ordered selection of variables by display text and chosen value labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<(String, Vec<String>)>,
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable (by display text) with the value labels to select.
    #[must_use]
    pub fn with(
        mut self,
        variable: impl Into<String>,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.entries
            .push((variable.into(), labels.into_iter().map(Into::into).collect()));
        self
    }

    /// Whether the selection names no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of variables named by the selection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over `(variable text, labels)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(text, labels)| (text.as_str(), labels.as_slice()))
    }
}

/// The `{"filter": "item", "values": [...]}` clause of a query entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSelection {
    /// Filter kind; always "item" for explicit value selections.
    pub filter: String,

    /// Raw values to select.
    pub values: Vec<String>,
}

impl ItemSelection {
    /// Item-filter selection over explicit raw values.
    #[must_use]
    pub fn items(values: Vec<String>) -> Self {
        Self {
            filter: "item".to_string(),
            values,
        }
    }
}

/// One `{"code": ..., "selection": ...}` entry of the wire query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryEntry {
    /// Variable code the entry filters on.
    pub code: String,

    /// Values selected for that variable.
    pub selection: ItemSelection,
}

/// The `{"format": ...}` response clause of the wire query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// Format the API should answer in.
    pub format: ResponseFormat,
}

/// A wire-ready data query: `{"query": [...], "response": {"format": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQuery {
    /// Per-variable filter entries.
    pub query: Vec<QueryEntry>,

    /// Response format clause.
    pub response: ResponseSpec,
}

impl DataQuery {
    /// An entry-less query with the given response format.
    #[must_use]
    pub fn empty(format: ResponseFormat) -> Self {
        Self {
            query: Vec::new(),
            response: ResponseSpec { format },
        }
    }
}

/// Raw-value to label mappings captured during resolution, keyed by variable
/// display text.
pub type LabelMap = HashMap<String, HashMap<String, String>>;

/// Outcome of resolving a [`Selection`] against a table's variables.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSelection {
    /// Wire entries, one per matched variable, in selection order.
    pub entries: Vec<QueryEntry>,

    /// Reverse mappings for translating response keys back to labels.
    pub labels: LabelMap,

    /// Display texts in the selection that matched no variable.
    pub skipped: Vec<String>,
}

/// Resolve a selection against the variables of a table.
///
/// Selection entries naming a variable the table does not have are skipped
/// and reported through [`ResolvedSelection::skipped`]. An unknown label
/// fails the whole resolution instead, so callers can commit the outcome
/// atomically.
///
/// # Arguments
/// * `variables` - The table's variables, as fetched from its metadata
/// * `selection` - Variables and value labels to select
pub fn resolve_selection(
    variables: &[Variable],
    selection: &Selection,
) -> Result<ResolvedSelection> {
    let mut resolved = ResolvedSelection::default();

    for (text, labels) in selection.iter() {
        let variable = match variables.iter().find(|v| v.text == text) {
            Some(variable) => variable,
            None => {
                tracing::warn!(variable = text, "Selection names no variable of this table");
                resolved.skipped.push(text.to_string());
                continue;
            }
        };

        let mut values = Vec::with_capacity(labels.len());
        let mut mapping = HashMap::with_capacity(labels.len());
        for label in labels {
            let value =
                variable
                    .value_for_label(label)
                    .ok_or_else(|| ScbError::UnknownLabel {
                        variable: text.to_string(),
                        label: label.clone(),
                    })?;
            mapping.insert(value.to_string(), label.clone());
            values.push(value.to_string());
        }

        resolved.labels.insert(variable.text.clone(), mapping);
        resolved.entries.push(QueryEntry {
            code: variable.code.clone(),
            selection: ItemSelection::items(values),
        });
    }

    Ok(resolved)
}

/// Translate coded row keys back into human-readable labels, in place.
///
/// Key positions are matched against the response's own column order, which
/// may differ from the order the selection was built in. Positions without a
/// captured mapping keep their coded value.
pub fn relabel_rows(data: &mut TableData, labels: &LabelMap) {
    let TableData { columns, data: rows, .. } = data;

    for row in rows.iter_mut() {
        for (position, key) in row.key.iter_mut().enumerate() {
            let mapping = columns
                .get(position)
                .and_then(|column| labels.get(&column.text));
            if let Some(mapping) = mapping {
                if let Some(label) = mapping.get(key.as_str()) {
                    *key = label.clone();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Column, DataRow};
    use serde_json::json;

    fn population_variables() -> Vec<Variable> {
        vec![
            Variable {
                code: "Region".to_string(),
                text: "region".to_string(),
                values: vec!["01".to_string(), "02".to_string()],
                value_texts: vec!["Stockholm county".to_string(), "Uppsala county".to_string()],
                elimination: false,
                time: false,
            },
            Variable {
                code: "Tid".to_string(),
                text: "year".to_string(),
                values: vec!["2021".to_string(), "2022".to_string()],
                value_texts: vec!["2021".to_string(), "2022".to_string()],
                elimination: false,
                time: true,
            },
        ]
    }

    #[test]
    fn test_data_query_wire_shape() {
        let query = DataQuery {
            query: vec![QueryEntry {
                code: "Region".to_string(),
                selection: ItemSelection::items(vec!["02".to_string()]),
            }],
            response: ResponseSpec {
                format: ResponseFormat::Json,
            },
        };

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "query": [
                    {"code": "Region", "selection": {"filter": "item", "values": ["02"]}}
                ],
                "response": {"format": "json"}
            })
        );
    }

    #[test]
    fn test_resolve_selection_translates_labels() {
        let selection = Selection::new()
            .with("region", ["Uppsala county"])
            .with("year", ["2022"]);

        let resolved = resolve_selection(&population_variables(), &selection).unwrap();

        assert!(resolved.skipped.is_empty());
        assert_eq!(resolved.entries.len(), 2);
        assert_eq!(resolved.entries[0].code, "Region");
        assert_eq!(resolved.entries[0].selection.filter, "item");
        assert_eq!(resolved.entries[0].selection.values, vec!["02"]);
        assert_eq!(resolved.entries[1].code, "Tid");
        assert_eq!(resolved.entries[1].selection.values, vec!["2022"]);
    }

    #[test]
    fn test_resolve_selection_captures_reverse_mapping() {
        let selection = Selection::new().with("region", ["Uppsala county", "Stockholm county"]);

        let resolved = resolve_selection(&population_variables(), &selection).unwrap();

        let region = &resolved.labels["region"];
        assert_eq!(region["02"], "Uppsala county");
        assert_eq!(region["01"], "Stockholm county");
    }

    #[test]
    fn test_resolve_selection_skips_unknown_variables() {
        let selection = Selection::new()
            .with("marital status", ["married"])
            .with("region", ["Uppsala county"]);

        let resolved = resolve_selection(&population_variables(), &selection).unwrap();

        assert_eq!(resolved.skipped, vec!["marital status"]);
        assert_eq!(resolved.entries.len(), 1);
        assert_eq!(resolved.entries[0].code, "Region");
    }

    #[test]
    fn test_resolve_selection_fails_on_unknown_label() {
        let selection = Selection::new().with("region", ["Uppsala county", "Atlantis"]);

        let result = resolve_selection(&population_variables(), &selection);

        match result {
            Err(ScbError::UnknownLabel { variable, label }) => {
                assert_eq!(variable, "region");
                assert_eq!(label, "Atlantis");
            }
            other => panic!("expected UnknownLabel, got {other:?}"),
        }
    }

    #[test]
    fn test_relabel_rows_matches_response_column_order() {
        // Response puts the time column first, unlike the selection order
        let mut data = TableData {
            columns: vec![
                Column {
                    code: "Tid".to_string(),
                    text: "year".to_string(),
                    kind: Some("t".to_string()),
                },
                Column {
                    code: "Region".to_string(),
                    text: "region".to_string(),
                    kind: Some("d".to_string()),
                },
                Column {
                    code: "BE0101N1".to_string(),
                    text: "Population".to_string(),
                    kind: Some("c".to_string()),
                },
            ],
            data: vec![DataRow {
                key: vec!["2022".to_string(), "02".to_string()],
                values: vec!["395026".to_string()],
            }],
            comments: Vec::new(),
            metadata: Vec::new(),
        };

        let selection = Selection::new()
            .with("region", ["Uppsala county"])
            .with("year", ["2022"]);
        let resolved = resolve_selection(&population_variables(), &selection).unwrap();

        relabel_rows(&mut data, &resolved.labels);

        assert_eq!(data.data[0].key, vec!["2022", "Uppsala county"]);
        assert_eq!(data.data[0].values, vec!["395026"]);
    }

    #[test]
    fn test_relabel_rows_keeps_unmapped_keys_coded() {
        let mut data = TableData {
            columns: vec![Column {
                code: "Alder".to_string(),
                text: "age".to_string(),
                kind: None,
            }],
            data: vec![DataRow {
                key: vec!["tot".to_string()],
                values: vec!["10452326".to_string()],
            }],
            comments: Vec::new(),
            metadata: Vec::new(),
        };

        // No mapping was captured for "age"
        let labels = LabelMap::new();
        relabel_rows(&mut data, &labels);

        assert_eq!(data.data[0].key, vec!["tot"]);
    }
}
