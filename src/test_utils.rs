//! Shared helpers for unit tests.
#![cfg(test)]

use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

use crate::menu::{
    FetchError,
    HttpResponse,
    HttpTransport,
};

/// Write a translation file under `dir`, creating parent directories.
pub(crate) fn write_locale(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create {parent:?}: {e}"));
    }
    fs::write(&path, content).unwrap_or_else(|e| panic!("write {path:?}: {e}"));
}

/// Assert `price` looks like `\d+\.\d{2}` and lies in [50000, 100000).
pub(crate) fn assert_price_in_range(price: &str) {
    let Some((units, cents)) = price.split_once('.') else {
        panic!("price without decimals: {price}");
    };
    assert!(!units.is_empty() && units.bytes().all(|b| b.is_ascii_digit()), "{price}");
    assert!(cents.len() == 2 && cents.bytes().all(|b| b.is_ascii_digit()), "{price}");
    let units: u64 = units.parse().unwrap_or_else(|e| panic!("{price}: {e}"));
    assert!((50_000..100_000).contains(&units), "{price}");
}

/// Canned outcome of [`MockTransport::get`].
#[derive(Debug, Clone)]
enum MockReply {
    /// Completed request
    Response(HttpResponse),
    /// Connection-level failure with this message
    Fail(String),
}

/// [`HttpTransport`] returning the same reply every time and counting calls.
#[derive(Debug)]
pub(crate) struct MockTransport {
    /// Returned by every call
    reply: MockReply,
    /// Number of `get` calls
    calls: AtomicUsize,
    /// URL of the latest call
    last_url: Mutex<Option<String>>,
}

impl MockTransport {
    /// Transport answering `reply` forever.
    fn new(reply: MockReply) -> Self {
        Self { reply, calls: AtomicUsize::new(0), last_url: Mutex::new(None) }
    }

    /// 200 with `body`.
    pub(crate) fn ok(body: &str) -> Self {
        Self::new(MockReply::Response(HttpResponse::new(200, body)))
    }

    /// Any canned response.
    pub(crate) fn respond(response: HttpResponse) -> Self {
        Self::new(MockReply::Response(response))
    }

    /// Connection-level failure.
    pub(crate) fn fail(message: &str) -> Self {
        Self::new(MockReply::Fail(message.to_string()))
    }

    /// Requests made so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// URL of the latest request.
    pub(crate) fn last_url(&self) -> Option<String> {
        self.last_url.lock().ok().and_then(|url| url.clone())
    }
}

impl HttpTransport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last_url) = self.last_url.lock() {
            *last_url = Some(url.to_string());
        }

        match &self.reply {
            MockReply::Response(response) => Ok(response.clone()),
            MockReply::Fail(message) => Err(FetchError::Transport(message.clone())),
        }
    }
}
