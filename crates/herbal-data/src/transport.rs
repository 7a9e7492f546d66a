//! Outbound HTTP transports.

use async_trait::async_trait;

use crate::client::FetchError;

/// Origin Spin resolves to the component's own application.
pub const SELF_ORIGIN: &str = "http://self";

/// Performs a single GET and returns the response body.
///
/// Statuses of 400 and above are reported as [`FetchError::Http`]. The
/// futures are not `Send`: a Spin component runs on one thread.
#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Transport backed by Spin's outbound HTTP.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinTransport;

impl SpinTransport {
    /// Resolve same-origin paths against [`SELF_ORIGIN`].
    pub fn absolute_url(url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", SELF_ORIGIN, url)
        } else {
            url.to_string()
        }
    }
}

#[async_trait(?Send)]
impl Transport for SpinTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let absolute = Self::absolute_url(url);
        let req = spin_sdk::http::Request::get(absolute.as_str()).build();
        let resp: spin_sdk::http::Response = spin_sdk::http::send(req)
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?;

        let status = *resp.status();
        if status >= 400 {
            return Err(FetchError::Http {
                status,
                url: url.to_string(),
            });
        }

        Ok(resp.into_body())
    }
}

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;

#[cfg(any(test, feature = "mock"))]
mod mock {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use async_trait::async_trait;

    use super::Transport;
    use crate::client::FetchError;

    #[derive(Debug, Clone)]
    struct Route {
        response: Result<Vec<u8>, FetchError>,
        yields: usize,
    }

    /// In-memory transport serving canned responses per URL.
    ///
    /// Unknown URLs answer with HTTP 404. Every request is recorded.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        routes: RefCell<HashMap<String, Route>>,
        requests: RefCell<Vec<String>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serve `body` for `url`.
        pub fn with_json(self, url: &str, body: &str) -> Self {
            self.insert(url, Ok(body.as_bytes().to_vec()), 0);
            self
        }

        /// Serve `body` for `url` after yielding to the executor `yields` times.
        pub fn with_delayed_json(self, url: &str, body: &str, yields: usize) -> Self {
            self.insert(url, Ok(body.as_bytes().to_vec()), yields);
            self
        }

        /// Fail requests for `url`.
        pub fn with_error(self, url: &str, error: FetchError) -> Self {
            self.insert(url, Err(error), 0);
            self
        }

        /// URLs requested so far, in order.
        pub fn requests(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }

        fn insert(&self, url: &str, response: Result<Vec<u8>, FetchError>, yields: usize) {
            self.routes
                .borrow_mut()
                .insert(url.to_string(), Route { response, yields });
        }
    }

    #[async_trait(?Send)]
    impl Transport for MockTransport {
        async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.requests.borrow_mut().push(url.to_string());
            let route = self.routes.borrow().get(url).cloned();

            match route {
                Some(route) => {
                    for _ in 0..route.yields {
                        YieldNow(false).await;
                    }
                    route.response
                }
                None => Err(FetchError::Http {
                    status: 404,
                    url: url.to_string(),
                }),
            }
        }
    }

    struct YieldNow(bool);

    impl Future for YieldNow {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }
}
