//! GraphQL client for the remote listing service.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::event::Event;
use crate::listing::query::FetchTicket;
use crate::listing::request::QueryVariables;
use crate::listing::rows::ListingPage;

/// Query document sent with every listing request.
pub const LIST_ENTRIES_QUERY: &str = r#"query ListEntries($path: String!, $page: Int, $where: ListEntriesWhere) {
  listEntries(path: $path, page: $page, where: $where) {
    entries {
      __typename
      id
      path
      name
      size
    }
    pagination {
      pageCount
      totalRows
    }
  }
}"#;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a> {
    query: &'static str,
    operation_name: &'static str,
    variables: &'a QueryVariables,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ListEntriesData {
    #[serde(rename = "listEntries")]
    list_entries: Option<ListingPage>,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ListEntriesData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

impl GraphqlResponse {
    fn into_page(self) -> Result<ListingPage> {
        if !self.errors.is_empty() {
            let messages: Vec<String> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(AppError::Query(messages.join("; ")));
        }
        self.data
            .and_then(|d| d.list_entries)
            .ok_or_else(|| AppError::Query("response contained no listEntries".into()))
    }
}

/// HTTP client bound to one listing endpoint.
#[derive(Debug, Clone)]
pub struct ListingClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ListingClient {
    /// Build a client for `endpoint` (must be an http or https URL).
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let invalid = || AppError::InvalidEndpoint(endpoint.to_string());
        let url = Url::parse(endpoint.trim()).map_err(|_| invalid())?;
        let has_host = url.host_str().is_some_and(|h| !h.is_empty());
        if !matches!(url.scheme(), "http" | "https") || !has_host {
            return Err(invalid());
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: url,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Run one listing query.
    pub async fn list_entries(&self, variables: &QueryVariables) -> Result<ListingPage> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&GraphqlRequest {
                query: LIST_ENTRIES_QUERY,
                operation_name: "ListEntries",
                variables,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AppError::Query(format!("server returned {}", status)));
        }

        let envelope: GraphqlResponse = serde_json::from_str(&body)?;
        envelope.into_page()
    }
}

/// Run `ticket` in the background and post the outcome to the event loop.
pub fn spawn_fetch(
    client: Arc<ListingClient>,
    ticket: FetchTicket,
    event_tx: mpsc::UnboundedSender<Event>,
) {
    tokio::spawn(async move {
        let FetchTicket {
            generation,
            variables,
        } = ticket;
        let result = match client.list_entries(&variables).await {
            Ok(page) => {
                debug!(
                    generation,
                    entries = page.entries.len(),
                    total_rows = page.pagination.total_rows,
                    "listing query succeeded"
                );
                Ok(page)
            }
            Err(e) => {
                warn!(generation, path = %variables.path, error = %e, "listing query failed");
                Err(e.to_string())
            }
        };
        let _ = event_tx.send(Event::ListingLoaded { generation, result });
    });
}
