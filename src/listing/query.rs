use tracing::debug;

use crate::listing::request::QueryVariables;
use crate::listing::rows::ListingPage;

/// A fetch the event loop should start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub variables: QueryVariables,
}

/// Observable phase of the outstanding listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPhase {
    /// Nothing issued yet.
    Idle,
    Pending,
    Success,
    Failure(String),
}

/// Tracks the single outstanding listing request.
///
/// `sync` is fed the freshly derived variables after every state change and
/// only issues a new fetch when they differ from the last issued ones.
/// Responses carry the generation they were issued with; anything but the
/// latest generation is dropped.
#[derive(Debug)]
pub struct ListingQuery {
    generation: u64,
    last_issued: Option<QueryVariables>,
    phase: QueryPhase,
    data: Option<ListingPage>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingQuery {
    pub fn new() -> Self {
        Self {
            generation: 0,
            last_issued: None,
            phase: QueryPhase::Idle,
            data: None,
        }
    }

    /// Issue a fetch for `variables` unless it is already the latest request.
    pub fn sync(&mut self, variables: QueryVariables) -> Option<FetchTicket> {
        if self.last_issued.as_ref() == Some(&variables) {
            return None;
        }
        self.generation += 1;
        self.last_issued = Some(variables.clone());
        self.phase = QueryPhase::Pending;
        debug!(generation = self.generation, path = %variables.path, page = variables.page, "issuing listing query");
        Some(FetchTicket {
            generation: self.generation,
            variables,
        })
    }

    /// Forget the last issued request so the next `sync` re-issues it.
    pub fn invalidate(&mut self) {
        self.last_issued = None;
    }

    /// Apply a response. Returns `false` if it was stale and ignored.
    pub fn resolve(&mut self, generation: u64, result: Result<ListingPage, String>) -> bool {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "discarding stale listing response"
            );
            return false;
        }
        match result {
            Ok(page) => {
                self.data = Some(page);
                self.phase = QueryPhase::Success;
            }
            Err(message) => {
                self.data = None;
                self.phase = QueryPhase::Failure(message);
            }
        }
        true
    }

    /// Latest successful page. Kept while a newer request is pending.
    pub fn data(&self) -> Option<&ListingPage> {
        self.data.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.phase == QueryPhase::Pending
    }

    pub fn error(&self) -> bool {
        matches!(self.phase, QueryPhase::Failure(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            QueryPhase::Failure(msg) => Some(msg),
            _ => None,
        }
    }
}
