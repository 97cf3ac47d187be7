//! Provides the geoid height lookup, ジオイド高.
//!
//! The geoid height comes from an external service (e.g. GSI) injected
//! by the caller as a [`GeoidSource`];
//! this crate owns no HTTP client.
//! [`GeoidBatch`] runs the lookups over points one by one,
//! with the delay the service requires between requests,
//! and is cancellable at every delay.
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;

use tokio::sync::watch;

pub use batch::{GeoidBatch, GeoidBatchBuilder, GeoidItem, GeoidMode, GeoidReport, GeoidValue};

mod batch;
#[cfg(feature = "serde")]
pub mod gsi;

/// The geoid height lookup.
///
/// This is implemented for the closure which returns a future,
/// so that a stub works as a source.
///
/// # Example
///
/// ```
/// # use sokuryo::geoid::{GeoidError, GeoidSource};
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = |_latitude: f64, _longitude: f64| async { Ok::<_, GeoidError>(36.7) };
/// assert_eq!(source.geoid_height(36.0, 140.0).await, Ok(36.7));
/// # }
/// ```
pub trait GeoidSource {
    /// Returns the geoid height \[m\] at the position.
    fn geoid_height(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> impl Future<Output = Result<f64, GeoidError>>;
}

impl<F, Fut> GeoidSource for F
where
    F: Fn(f64, f64) -> Fut,
    Fut: Future<Output = Result<f64, GeoidError>>,
{
    #[inline]
    fn geoid_height(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> impl Future<Output = Result<f64, GeoidError>> {
        self(latitude, longitude)
    }
}

/// Returns a pair of [`Canceller`] and [`CancelSignal`].
///
/// # Example
///
/// ```
/// # use sokuryo::geoid::cancellation;
/// let (canceller, signal) = cancellation();
/// assert!(!signal.is_cancelled());
///
/// canceller.cancel();
/// assert!(signal.is_cancelled());
/// ```
pub fn cancellation() -> (Canceller, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (Canceller { tx }, CancelSignal { rx })
}

/// The sender side of the cancellation.
#[derive(Debug)]
pub struct Canceller {
    tx: watch::Sender<bool>,
}

impl Canceller {
    /// Cancels, every [`CancelSignal`] paired observes it.
    #[inline]
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// The receiver side of the cancellation.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// Makes a [`CancelSignal`] which is never cancelled.
    pub fn never() -> Self {
        let (_, rx) = watch::channel(false);
        Self { rx }
    }

    /// Returns `true` if cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Waits for the cancellation.
    ///
    /// This never completes if the [`Canceller`] is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        let result = rx.wait_for(|cancelled| *cancelled).await.map(|_| ());
        if result.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

//
// Error
//

/// An error which can be returned by the geoid height service.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct GeoidError {
    kind: GeoidErrorKind,
    detail: String,
}

/// An error kind of [`GeoidError`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GeoidErrorKind {
    /// The request failed, e.g. the network is down
    Request,
    /// The service responded with a non-success status
    Status,
    /// The service rejected the position, e.g. out of the geoid model
    Rejected,
    /// The response is broken
    Malformed,
}

impl GeoidError {
    /// Makes an error of the failed request.
    #[cold]
    pub fn request(detail: impl Into<String>) -> Self {
        Self {
            kind: GeoidErrorKind::Request,
            detail: detail.into(),
        }
    }

    /// Makes an error of the non-success status.
    #[cold]
    pub fn status(code: u16) -> Self {
        Self {
            kind: GeoidErrorKind::Status,
            detail: code.to_string(),
        }
    }

    /// Makes an error of the rejected position.
    #[cold]
    pub fn rejected() -> Self {
        Self {
            kind: GeoidErrorKind::Rejected,
            detail: String::new(),
        }
    }

    /// Makes an error of the broken response.
    #[cold]
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self {
            kind: GeoidErrorKind::Malformed,
            detail: detail.into(),
        }
    }

    /// Returns the detailed cause.
    pub const fn kind(&self) -> &GeoidErrorKind {
        &self.kind
    }

    /// Returns the detail message, may be empty.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl Error for GeoidError {}

impl Display for GeoidError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let s = match self.kind {
            GeoidErrorKind::Request => "geoid request failed",
            GeoidErrorKind::Status => "geoid service responded error status",
            GeoidErrorKind::Rejected => "geoid service rejected the position",
            GeoidErrorKind::Malformed => "geoid service responded malformed data",
        };

        if self.detail.is_empty() {
            f.write_str(s)
        } else {
            write!(f, "{s}: {}", self.detail)
        }
    }
}
