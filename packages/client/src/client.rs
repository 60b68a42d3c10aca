//! The SCB catalog client: navigation, metadata inspection, and data
//! retrieval against Statistics Sweden's statistical database.

use std::collections::HashMap;

use reqwest::Client;

use crate::config::{endpoint_url, endpoint_url_at, node_url, validate_language};
use crate::error::{Result, ScbError};
use crate::http::{create_client, get_json, post_bytes, post_json};
use crate::query::{relabel_rows, resolve_selection, DataQuery, Selection};
use crate::types::{CatalogNode, ResponseFormat, TableData, Variable};

/// Options for [`ScbClient::fetch_data_for`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    /// Translate coded row keys back into value labels.
    pub readable: bool,

    /// Response format to select before the request.
    pub format: Option<ResponseFormat>,
}

/// Client for Statistics Sweden's statistical database (SSD) API.
///
/// The client tracks a current position in the remote catalog tree. Fetching
/// operations inspect the node at that position; data operations submit the
/// pending query against it. A built query references the variables of the
/// table it was built at, so rebuild it after navigating elsewhere.
#[derive(Debug, Clone)]
pub struct ScbClient {
    http: Client,
    endpoint: String,
    path: Vec<String>,
    query: DataQuery,
}

impl ScbClient {
    /// Create a client positioned at the catalog root.
    ///
    /// # Arguments
    /// * `language` - Language subtree to use ("sv" or "en")
    ///
    /// # Examples
    /// ```
    /// use scb_client::ScbClient;
    ///
    /// assert!(ScbClient::new("en").is_ok());
    /// assert!(ScbClient::new("").is_err());
    /// ```
    pub fn new(language: &str) -> Result<Self> {
        Self::with_path(language, Vec::<String>::new())
    }

    /// Create a client positioned at an initial catalog path.
    ///
    /// # Arguments
    /// * `language` - Language subtree to use ("sv" or "en")
    /// * `segments` - Initial path segments, outermost first
    ///
    /// # Examples
    /// ```
    /// use scb_client::ScbClient;
    ///
    /// let client = ScbClient::with_path("en", ["BE", "BE0101"]).unwrap();
    /// assert_eq!(
    ///     client.current_path(),
    ///     "https://api.scb.se/OV0104/v1/doris/en/ssd/BE/BE0101"
    /// );
    /// ```
    pub fn with_path<I, S>(language: &str, segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        validate_language(language)?;
        Self::from_endpoint(endpoint_url(language), segments)
    }

    /// Create a client against a custom endpoint base instead of the public
    /// SCB one. Mainly for tests and proxies.
    pub fn with_base_url<I, S>(base: &str, language: &str, segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        validate_language(language)?;
        Self::from_endpoint(endpoint_url_at(base, language), segments)
    }

    fn from_endpoint<I, S>(endpoint: String, segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            http: create_client()?,
            endpoint,
            path: segments.into_iter().map(Into::into).collect(),
            query: DataQuery::empty(ResponseFormat::default()),
        })
    }

    /// Append segments to the current path, in order.
    ///
    /// Navigation is speculative: segments are not validated against the
    /// remote catalog, so a wrong path surfaces on the next fetch.
    pub fn move_down<I, S>(&mut self, segments: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path.extend(segments.into_iter().map(Into::into));
    }

    /// Remove the last path segment; at the root this is a no-op.
    pub fn move_up(&mut self) {
        self.move_up_by(1);
    }

    /// Remove the last `steps` path segments, clamping at the root.
    pub fn move_up_by(&mut self, steps: usize) {
        let keep = self.path.len().saturating_sub(steps);
        self.path.truncate(keep);
    }

    /// Reset the path to the catalog root.
    pub fn move_to_top(&mut self) {
        self.path.clear();
    }

    /// Get the fully composed URL for the current path.
    #[must_use]
    pub fn current_path(&self) -> String {
        node_url(&self.endpoint, &self.path)
    }

    /// Fetch and classify the catalog node at the current path.
    pub async fn fetch_node(&self) -> Result<CatalogNode> {
        let url = self.current_path();
        let payload: serde_json::Value = get_json(&self.http, &url).await?;
        CatalogNode::from_value(payload).map_err(|e| ScbError::Decode {
            url,
            message: e.to_string(),
        })
    }

    /// Fetch the variables of the table at the current path.
    ///
    /// # Returns
    /// The table's variables in API order, or [`ScbError::NotATable`] when
    /// the current path points at an interior node.
    pub async fn fetch_variables(&self) -> Result<Vec<Variable>> {
        match self.fetch_node().await? {
            CatalogNode::Table(meta) => Ok(meta.variables),
            CatalogNode::Branch(_) => Err(ScbError::NotATable {
                path: self.current_path(),
            }),
        }
    }

    /// List the display texts of the current table's variables, in API order.
    pub async fn variable_names(&self) -> Result<Vec<String>> {
        let variables = self.fetch_variables().await?;
        Ok(variables.into_iter().map(|v| v.text).collect())
    }

    /// List the raw selectable values of one variable of the current table.
    ///
    /// # Arguments
    /// * `variable` - The variable's display text (e.g., "region")
    ///
    /// # Returns
    /// `Ok(None)` when the table has no variable with that text.
    pub async fn variable_values(&self, variable: &str) -> Result<Option<Vec<String>>> {
        let variables = self.fetch_variables().await?;
        Ok(variables
            .into_iter()
            .find(|v| v.text == variable)
            .map(|v| v.values))
    }

    /// Map each variable's display text to its value labels, in API order.
    ///
    /// Labels, not raw values: the result pairs directly with [`Selection`],
    /// which speaks labels throughout.
    pub async fn variables_with_labels(&self) -> Result<HashMap<String, Vec<String>>> {
        let variables = self.fetch_variables().await?;
        Ok(variables
            .into_iter()
            .map(|v| (v.text, v.value_texts))
            .collect())
    }

    /// Rebuild the pending query from a selection against the current table.
    ///
    /// Selection entries naming a variable the table does not have are
    /// skipped; their names are returned for diagnostics. An unknown label
    /// fails the whole build and leaves the previously committed query
    /// unchanged.
    pub async fn build_query(&mut self, selection: &Selection) -> Result<Vec<String>> {
        let variables = self.fetch_variables().await?;
        let resolved = resolve_selection(&variables, selection)?;
        self.query = DataQuery {
            query: resolved.entries,
            response: self.query.response,
        };
        Ok(resolved.skipped)
    }

    /// Get the pending wire-ready query.
    #[must_use]
    pub fn query(&self) -> &DataQuery {
        &self.query
    }

    /// Reset the pending query, keeping the selected response format.
    pub fn clear_query(&mut self) {
        self.query = DataQuery::empty(self.query.response.format);
    }

    /// Set the response format for subsequent data requests.
    pub fn set_format(&mut self, format: ResponseFormat) {
        self.query.response.format = format;
    }

    /// Get the response format currently in effect.
    #[must_use]
    pub fn format(&self) -> ResponseFormat {
        self.query.response.format
    }

    /// POST the pending query to the current path and parse the response.
    ///
    /// The response is expected in the default `json` format shape; use
    /// [`Self::fetch_data_raw`] for the other formats.
    pub async fn fetch_data(&self) -> Result<TableData> {
        let url = self.current_path();
        post_json(&self.http, &url, &self.query).await
    }

    /// POST the pending query and return the raw response body.
    ///
    /// Suits the formats this client does not parse (px, csv, xlsx, ...).
    pub async fn fetch_data_raw(&self) -> Result<Vec<u8>> {
        let url = self.current_path();
        post_bytes(&self.http, &url, &self.query).await
    }

    /// Build a query from `selection`, submit it, and return the table data.
    ///
    /// Sets the response format first when `options.format` is given; the
    /// response is still parsed as the `json` format shape, so the other
    /// formats belong with [`Self::fetch_data_raw`]. With `options.readable`,
    /// coded row keys are translated back into value labels, matched against
    /// the response's own column order. The pending query is replaced by the
    /// rebuilt one even when the request itself fails.
    ///
    /// A non-empty selection matching none of the table's variables fails
    /// with [`ScbError::UnknownVariable`] rather than posting an empty query,
    /// which the API would answer with the entire table.
    pub async fn fetch_data_for(
        &mut self,
        selection: &Selection,
        options: FetchOptions,
    ) -> Result<TableData> {
        if let Some(format) = options.format {
            self.set_format(format);
        }

        let variables = self.fetch_variables().await?;
        let resolved = resolve_selection(&variables, selection)?;
        if resolved.entries.is_empty() && !selection.is_empty() {
            let name = resolved.skipped.first().cloned().unwrap_or_default();
            return Err(ScbError::UnknownVariable(name));
        }

        self.query = DataQuery {
            query: resolved.entries,
            response: self.query.response,
        };

        let url = self.current_path();
        let mut data: TableData = post_json(&self.http, &url, &self.query).await?;
        if options.readable {
            relabel_rows(&mut data, &resolved.labels);
        }
        Ok(data)
    }
}
