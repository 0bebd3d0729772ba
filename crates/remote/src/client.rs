use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::{load_auth, ServiceCredentials};

/// Hosted table service client (blocking).
#[derive(Clone)]
pub struct TableClient {
    http: reqwest::blocking::Client,
    api_base: String,
    api_key: String,
}

/// Error type for remote table operations.
#[derive(Debug)]
pub enum RemoteError {
    /// No saved credentials configured
    NotConfigured,
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// Server returned a validation error (4xx with message)
    Validation(String),
    /// JSON parsing error
    Parse(String),
    /// A phase of the two-phase table replace failed
    Replace { phase: ReplacePhase, message: String },
}

/// Which half of the delete-then-insert replace failed. The service has no
/// transaction spanning the two calls, so an Insert failure means the table
/// was already cleared: the caller must re-read before trusting any view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacePhase {
    Clear,
    Insert,
}

impl std::fmt::Display for ReplacePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clear => write!(f, "clear"),
            Self::Insert => write!(f, "insert"),
        }
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConfigured => {
                write!(f, "Service not configured — run `adesk remote login` first")
            }
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            Self::Validation(msg) => write!(f, "{}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Replace { phase, message } => {
                write!(f, "Replace failed during {} phase: {}", phase, message)
            }
        }
    }
}

impl std::error::Error for RemoteError {}

/// Row-filter operator for delete-matching. `Neq` against an impossible
/// value is how full-table clears are expressed upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Neq,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
        }
    }
}

impl TableClient {
    /// Create a client from saved credentials.
    pub fn from_saved_auth() -> Result<Self, RemoteError> {
        let creds = load_auth().ok_or(RemoteError::NotConfigured)?;
        Ok(Self::new(creds))
    }

    /// Create a client with explicit credentials.
    pub fn new(creds: ServiceCredentials) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("adesk/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base: creds.api_base,
            api_key: creds.api_key,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetch every row of a table.
    pub fn select_all<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, RemoteError> {
        let url = format!("{}/api/tables/{}/rows", self.api_base, table);
        let resp = self.send(self.http.get(&url))?;
        resp.json::<Vec<T>>().map_err(|e| RemoteError::Parse(e.to_string()))
    }

    /// Insert rows into a table. One call, no partial acknowledgement.
    pub fn insert_rows<T: Serialize>(&self, table: &str, rows: &[T]) -> Result<(), RemoteError> {
        let url = format!("{}/api/tables/{}/rows", self.api_base, table);
        self.send(self.http.post(&url).json(rows))?;
        Ok(())
    }

    /// Delete rows matching a column predicate.
    pub fn delete_matching(
        &self,
        table: &str,
        column: &str,
        op: FilterOp,
        value: &str,
    ) -> Result<(), RemoteError> {
        let url = format!("{}/api/tables/{}/rows", self.api_base, table);
        self.send(
            self.http
                .delete(&url)
                .query(&[("column", column), ("op", op.as_str()), ("value", value)]),
        )?;
        Ok(())
    }

    /// Replace a table's full contents: clear, then insert.
    ///
    /// The two calls are independent network operations; there is no
    /// transaction across them. A clear-phase failure leaves the old table
    /// intact. An insert-phase failure leaves the table cleared — the
    /// error says so and the caller must re-read rather than assume
    /// either the old or the new contents survived.
    pub fn replace_all<T: Serialize>(&self, table: &str, rows: &[T]) -> Result<(), RemoteError> {
        self.delete_matching(table, "id", FilterOp::Neq, "0")
            .map_err(|e| RemoteError::Replace {
                phase: ReplacePhase::Clear,
                message: e.to_string(),
            })?;

        self.insert_rows(table, rows).map_err(|e| RemoteError::Replace {
            phase: ReplacePhase::Insert,
            message: format!("{e}; table was cleared — re-read before retrying"),
        })
    }

    /// Re-read a table on a fixed interval, invoking the callback with each
    /// snapshot. This is the refresh loop behind `adesk watch`: a periodic
    /// full read-and-redisplay, not an incremental update.
    pub fn poll<T, F>(
        &self,
        table: &str,
        interval: Duration,
        ticks: usize,
        mut on_snapshot: F,
    ) -> Result<(), RemoteError>
    where
        T: DeserializeOwned,
        F: FnMut(&[T]),
    {
        for tick in 0..ticks {
            let rows = self.select_all::<T>(table)?;
            on_snapshot(&rows);
            if tick + 1 < ticks {
                std::thread::sleep(interval);
            }
        }
        Ok(())
    }

    // ── Internal helpers ────────────────────────────────────────────

    pub(crate) fn http_put(&self, url: &str) -> reqwest::blocking::RequestBuilder {
        self.http.put(url)
    }

    pub(crate) fn send(
        &self,
        req: reqwest::blocking::RequestBuilder,
    ) -> Result<reqwest::blocking::Response, RemoteError> {
        let response = req
            .bearer_auth(&self.api_key)
            .send()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            if status == 422 || status == 400 {
                return Err(RemoteError::Validation(body));
            }
            return Err(RemoteError::Http(status, body));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> TableClient {
        TableClient::new(ServiceCredentials::new(base.into(), "test-key".into()))
    }

    #[test]
    fn select_all_parses_rows() {
        let server = httpmock::MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/api/tables/documentos_sgc/rows")
                .header("authorization", "Bearer test-key");
            then.status(200).json_body(serde_json::json!([
                {"codigo": "SGC-001", "estado": "Vigente"}
            ]));
        });

        let rows: Vec<serde_json::Value> =
            client(&server.base_url()).select_all("documentos_sgc").unwrap();
        mock.assert();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["codigo"], "SGC-001");
    }

    #[test]
    fn insert_rows_posts_json() {
        let server = httpmock::MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/api/tables/documentos_sgc/rows")
                .json_body(serde_json::json!([{"codigo": "SGC-001"}]));
            then.status(201);
        });

        client(&server.base_url())
            .insert_rows("documentos_sgc", &[serde_json::json!({"codigo": "SGC-001"})])
            .unwrap();
        mock.assert();
    }

    #[test]
    fn delete_matching_sends_predicate() {
        let server = httpmock::MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::DELETE)
                .path("/api/tables/documentos_sgc/rows")
                .query_param("column", "id")
                .query_param("op", "neq")
                .query_param("value", "0");
            then.status(200);
        });

        client(&server.base_url())
            .delete_matching("documentos_sgc", "id", FilterOp::Neq, "0")
            .unwrap();
        mock.assert();
    }

    #[test]
    fn replace_surfaces_insert_phase_failure() {
        let server = httpmock::MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::DELETE)
                .path("/api/tables/documentos_sgc/rows");
            then.status(200);
        });
        server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/api/tables/documentos_sgc/rows");
            then.status(500).body("disk full");
        });

        let err = client(&server.base_url())
            .replace_all("documentos_sgc", &[serde_json::json!({"codigo": "SGC-001"})])
            .unwrap_err();

        match err {
            RemoteError::Replace { phase, message } => {
                assert_eq!(phase, ReplacePhase::Insert);
                assert!(message.contains("re-read"), "message: {message}");
            }
            other => panic!("expected Replace error, got: {other}"),
        }
    }

    #[test]
    fn replace_clear_failure_keeps_old_table() {
        let server = httpmock::MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::DELETE)
                .path("/api/tables/documentos_sgc/rows");
            then.status(503).body("maintenance");
        });
        let insert = server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/api/tables/documentos_sgc/rows");
            then.status(201);
        });

        let err = client(&server.base_url())
            .replace_all("documentos_sgc", &[serde_json::json!({"codigo": "X"})])
            .unwrap_err();

        assert!(matches!(
            err,
            RemoteError::Replace { phase: ReplacePhase::Clear, .. }
        ));
        // Insert must never run if the clear failed.
        insert.assert_hits(0);
    }

    #[test]
    fn validation_status_maps_to_validation_error() {
        let server = httpmock::MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/api/tables/roster/rows");
            then.status(422).body("unknown table");
        });

        let err = client(&server.base_url())
            .select_all::<serde_json::Value>("roster")
            .unwrap_err();
        assert!(matches!(err, RemoteError::Validation(_)));
    }

    #[test]
    fn poll_reads_requested_ticks() {
        let server = httpmock::MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/api/tables/roster/rows");
            then.status(200).json_body(serde_json::json!([]));
        });

        let mut snapshots = 0;
        client(&server.base_url())
            .poll::<serde_json::Value, _>(
                "roster",
                Duration::from_millis(1),
                3,
                |_| snapshots += 1,
            )
            .unwrap();
        assert_eq!(snapshots, 3);
        mock.assert_hits(3);
    }
}
