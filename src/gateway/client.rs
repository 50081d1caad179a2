//! Table-store REST client.
//!
//! Thin query layer over the hosted backend's row API. Reads dominate:
//! equality/range filters, ordering, limit and count-only queries, plus
//! the two writes the app needs (insert a setoran, update organization
//! membership and points initialization).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::GatewayError;

/// Client for the hosted table store.
#[derive(Debug, Clone)]
pub struct TableClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TableClient {
    /// Create a new client for the given backend.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_timeout(base_url, api_key, Duration::from_secs(15))
    }

    /// Create a new client with an explicit request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Base URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a read query against a table.
    pub fn from(&self, table: &str) -> Query<'_> {
        Query {
            client: self,
            table: table.to_string(),
            select: "*".to_string(),
            params: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Insert a row into a table.
    pub async fn insert<T: Serialize>(&self, table: &str, row: &T) -> Result<(), GatewayError> {
        let url = self.row_url(table);
        tracing::debug!("Inserting into {}", table);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Self::check_status(response).await.map(|_| ())
    }

    /// Update rows matching an equality filter with a JSON patch.
    pub async fn update<T: Serialize>(
        &self,
        table: &str,
        filter_column: &str,
        filter_value: &str,
        patch: &T,
    ) -> Result<(), GatewayError> {
        let url = self.row_url(table);
        tracing::debug!("Updating {} where {} = {}", table, filter_column, filter_value);

        let response = self
            .http
            .patch(&url)
            .query(&[(filter_column, format!("eq.{}", filter_value))])
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Self::check_status(response).await.map(|_| ())
    }

    fn row_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        tracing::warn!("Backend error {}: {}", status.as_u16(), message);
        Err(GatewayError::Status {
            code: status.as_u16(),
            message,
        })
    }
}

/// A read query under construction.
///
/// Filters accumulate as query parameters in the backend's `column=op.value`
/// form; the parameter list is inspectable for tests.
pub struct Query<'a> {
    client: &'a TableClient,
    table: String,
    select: String,
    params: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl<'a> Query<'a> {
    /// Restrict the selected columns (defaults to `*`). Embedded resources
    /// use the backend's `alias:fk_column(columns)` syntax.
    pub fn select(mut self, columns: &str) -> Self {
        self.select = columns.to_string();
        self
    }

    /// Equality filter.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Greater-or-equal filter (inclusive range start).
    pub fn gte(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("gte.{}", value.to_string())));
        self
    }

    /// Less-or-equal filter (inclusive range end).
    pub fn lte(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("lte.{}", value.to_string())));
        self
    }

    /// Order by a column.
    pub fn order(mut self, column: &str, descending: bool) -> Self {
        let direction = if descending { "desc" } else { "asc" };
        self.order = Some(format!("{}.{}", column, direction));
        self
    }

    /// Limit the number of returned rows.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The assembled query parameters, in request order.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select.clone())];
        params.extend(self.params.iter().cloned());
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    /// Fetch all matching rows.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, GatewayError> {
        let url = self.client.row_url(&self.table);
        let params = self.params();
        tracing::debug!("GET {} {:?}", self.table, params);

        let response = self
            .client
            .http
            .get(&url)
            .query(&params)
            .header("apikey", &self.client.api_key)
            .header("Authorization", format!("Bearer {}", self.client.api_key))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let response = TableClient::check_status(response).await?;

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// Fetch a single row.
    ///
    /// An empty result is a valid default state, not an error.
    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<Option<T>, GatewayError> {
        let rows = self.limit(1).fetch::<T>().await?;
        Ok(rows.into_iter().next())
    }

    /// Count matching rows without transferring them.
    pub async fn count(self) -> Result<u64, GatewayError> {
        let url = self.client.row_url(&self.table);
        let params = self.params();

        let response = self
            .client
            .http
            .head(&url)
            .query(&params)
            .header("apikey", &self.client.api_key)
            .header("Authorization", format!("Bearer {}", self.client.api_key))
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let response = TableClient::check_status(response).await?;

        let content_range = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| GatewayError::Decode("missing content-range header".to_string()))?;

        parse_count(content_range)
            .ok_or_else(|| GatewayError::Decode(format!("bad content-range: {}", content_range)))
    }
}

/// Parse the total from a `content-range` header value such as `0-9/57`
/// or `*/0`.
fn parse_count(content_range: &str) -> Option<u64> {
    content_range.rsplit('/').next()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TableClient {
        TableClient::new("https://backend.test/", "anon-key")
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(client().base_url(), "https://backend.test");
    }

    #[test]
    fn test_query_params_order() {
        let client = client();
        let query = client
            .from("attendance")
            .eq("student_id", "abc")
            .gte("date", "2025-01-01")
            .lte("date", "2025-01-31")
            .order("date", true)
            .limit(30);

        assert_eq!(
            query.params(),
            vec![
                ("select".to_string(), "*".to_string()),
                ("student_id".to_string(), "eq.abc".to_string()),
                ("date".to_string(), "gte.2025-01-01".to_string()),
                ("date".to_string(), "lte.2025-01-31".to_string()),
                ("order".to_string(), "date.desc".to_string()),
                ("limit".to_string(), "30".to_string()),
            ]
        );
    }

    #[test]
    fn test_select_embedded_resource() {
        let client = client();
        let query = client
            .from("attendance")
            .select("date,status,note,student:student_id(name)");
        assert_eq!(
            query.params()[0],
            (
                "select".to_string(),
                "date,status,note,student:student_id(name)".to_string()
            )
        );
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("0-9/57"), Some(57));
        assert_eq!(parse_count("*/0"), Some(0));
        assert_eq!(parse_count("garbage"), None);
    }
}
