//! Stale-safe fetch hook.
//!
//! A [`Resource`] tracks one section's data, in-flight flag and error. Every
//! request gets a [`Ticket`] stamped with the resource's generation; a
//! completion is applied only when its ticket still carries the current
//! generation. Issuing a new request or unmounting bumps the generation, so
//! a superseded response can never overwrite newer state.
//!
//! The resource is single-threaded: state sits in a `RefCell` and no borrow
//! is held across an `await`.

use std::cell::RefCell;

use serde::de::DeserializeOwned;

use crate::client::{ApiClient, FetchError};
use crate::endpoints::Endpoint;
use crate::transport::Transport;

/// Proof that a request was issued, required to apply its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a ticket must be settled for its result to apply"]
pub struct Ticket {
    generation: u64,
    key: String,
}

impl Ticket {
    /// Generation this request was issued under.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Dependency key (request path) of this request.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// What happened to a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Data replaced.
    Applied,
    /// Error recorded.
    Failed,
    /// Superseded or unmounted; state untouched.
    Stale,
}

/// Point-in-time copy of a resource for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<FetchError>,
}

#[derive(Debug)]
struct State<T> {
    generation: u64,
    key: Option<String>,
    data: Option<T>,
    loading: bool,
    error: Option<FetchError>,
}

/// Data, loading flag and error for one independently fetched section.
#[derive(Debug)]
pub struct Resource<T> {
    state: RefCell<State<T>>,
}

impl<T> Resource<T> {
    /// A fresh resource: no data, loading, no error.
    pub fn new() -> Self {
        Self {
            state: RefCell::new(State {
                generation: 0,
                key: None,
                data: None,
                loading: true,
                error: None,
            }),
        }
    }

    /// Issue a request for `key`, superseding any in-flight one.
    ///
    /// Previous data is kept until the new request settles; the error is
    /// cleared because it described the superseded request.
    pub fn begin(&self, key: impl Into<String>) -> Ticket {
        let mut state = self.state.borrow_mut();
        state.generation += 1;
        state.key = Some(key.into());
        state.loading = true;
        state.error = None;

        Ticket {
            generation: state.generation,
            key: state.key.clone().unwrap_or_default(),
        }
    }

    /// Issue a request only if `key` differs from the current dependency key.
    pub fn watch(&self, key: &str) -> Option<Ticket> {
        if self.state.borrow().key.as_deref() == Some(key) {
            return None;
        }
        Some(self.begin(key))
    }

    /// Apply a completed request if it is still the latest one.
    pub fn settle(&self, ticket: Ticket, result: Result<T, FetchError>) -> Settle {
        let mut state = self.state.borrow_mut();
        if ticket.generation != state.generation {
            tracing::debug!(
                key = %ticket.key,
                issued = ticket.generation,
                current = state.generation,
                "discarding stale completion"
            );
            return Settle::Stale;
        }

        state.loading = false;
        match result {
            Ok(data) => {
                state.data = Some(data);
                state.error = None;
                Settle::Applied
            }
            Err(error) => {
                tracing::debug!(key = %ticket.key, error = %error, "request failed");
                state.error = Some(error);
                Settle::Failed
            }
        }
    }

    /// Discard every in-flight request. Outstanding tickets become stale.
    pub fn unmount(&self) {
        let mut state = self.state.borrow_mut();
        state.generation += 1;
        state.key = None;
        state.loading = false;
    }

    /// Whether the latest request is still in flight.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Error of the latest settled request, if it failed.
    pub fn error(&self) -> Option<FetchError> {
        self.state.borrow().error.clone()
    }

    /// Current dependency key.
    pub fn key(&self) -> Option<String> {
        self.state.borrow().key.clone()
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.state.borrow().generation
    }

    /// Borrow the current data.
    pub fn with_data<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        f(self.state.borrow().data.as_ref())
    }
}

impl<T: Clone> Resource<T> {
    /// Clone the current data.
    pub fn data(&self) -> Option<T> {
        self.state.borrow().data.clone()
    }

    /// Copy data, loading flag and error together.
    pub fn snapshot(&self) -> Snapshot<T> {
        let state = self.state.borrow();
        Snapshot {
            data: state.data.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }
}

impl<T: DeserializeOwned> Resource<T> {
    /// Fetch the ticket's path and settle the result.
    pub async fn complete<Tr: Transport>(&self, client: &ApiClient<Tr>, ticket: Ticket) -> Settle {
        let result = client.fetch_path(ticket.key()).await;
        self.settle(ticket, result)
    }

    /// Fetch `endpoint` and settle the result.
    ///
    /// Errors are captured in the resource, never returned.
    pub async fn load<Tr: Transport>(&self, client: &ApiClient<Tr>, endpoint: &Endpoint) -> Settle {
        let ticket = self.begin(endpoint.path());
        self.complete(client, ticket).await
    }

    /// Fetch `endpoint` only if its path differs from the current key.
    pub async fn load_if_changed<Tr: Transport>(
        &self,
        client: &ApiClient<Tr>,
        endpoint: &Endpoint,
    ) -> Option<Settle> {
        let ticket = self.watch(&endpoint.path())?;
        Some(self.complete(client, ticket).await)
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::new()
    }
}
