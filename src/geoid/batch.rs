use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{CancelSignal, GeoidSource};
use crate::{Error, Point};

/// Represents what the geoid height does to the elevation `z`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GeoidMode {
    /// Looks up the geoid height only, `z` stays.
    #[default]
    HeightOnly,
    /// The ellipsoidal height to the orthometric height, `z − N`.
    ToOrthometric,
    /// The orthometric height to the ellipsoidal height, `z + N`.
    ToEllipsoidal,
}

impl GeoidMode {
    /// Returns the elevation `z` \[m\] converted by the geoid height `n` \[m\].
    ///
    /// # Example
    ///
    /// ```
    /// # use sokuryo::geoid::GeoidMode;
    /// assert_eq!(GeoidMode::HeightOnly.apply(100.0, 40.0), 100.0);
    /// assert_eq!(GeoidMode::ToOrthometric.apply(100.0, 40.0), 60.0);
    /// assert_eq!(GeoidMode::ToEllipsoidal.apply(100.0, 40.0), 140.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn apply(&self, z: f64, n: f64) -> f64 {
        match self {
            Self::HeightOnly => z,
            Self::ToOrthometric => z - n,
            Self::ToEllipsoidal => z + n,
        }
    }
}

/// The geoid height of a point and its new elevation.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoidValue {
    /// The geoid height \[m\]
    pub geoid_height: f64,
    /// The new elevation \[m\] by [`GeoidMode`]
    pub z: f64,
}

/// The result of a point.
#[derive(Debug)]
pub struct GeoidItem {
    /// The index of the point in the input
    pub index: usize,
    /// The geoid height and the converted altitude,
    /// or the error of the point
    pub result: Result<GeoidValue, Error>,
}

/// The result of a batch, in the input order.
///
/// `items` lacks the points after the cancellation.
#[derive(Debug, Default)]
pub struct GeoidReport {
    /// The results of the processed points
    pub items: Vec<GeoidItem>,
    /// `true` if the batch has been cancelled
    pub cancelled: bool,
}

impl GeoidReport {
    /// Returns the number of the succeeded points.
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.result.is_ok()).count()
    }

    /// Returns the number of the failed points.
    pub fn failed(&self) -> usize {
        self.items.iter().filter(|item| item.result.is_err()).count()
    }
}

/// The sequential geoid height lookup over points.
///
/// The lookups run one by one, waiting [`delay`](GeoidBatchBuilder::delay)
/// between two requests to the service;
/// a failure of a point does not stop the batch.
///
/// # Example
///
/// ```
/// # use std::time::Duration;
/// # use sokuryo::Point;
/// # use sokuryo::geoid::*;
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let batch = GeoidBatch::builder()
///     .mode(GeoidMode::ToOrthometric)
///     .delay(Duration::from_secs(1))
///     .build();
///
/// let points = [
///     Point::new(0.0, 0.0, 100.0).with_geographic(36.0, 140.0),
///     // no latitude and longitude
///     Point::new(0.0, 0.0, 100.0),
/// ];
///
/// let source = |_: f64, _: f64| async { Ok::<_, GeoidError>(40.0) };
/// let report = batch.run(&points, &source, &CancelSignal::never()).await;
///
/// assert_eq!(report.succeeded(), 1);
/// assert_eq!(report.failed(), 1);
/// assert_eq!(report.items[0].result.as_ref().unwrap().z, 60.0);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GeoidBatch {
    mode: GeoidMode,
    delay: Duration,
    retries: u32,
}

impl Default for GeoidBatch {
    fn default() -> Self {
        GeoidBatchBuilder::new().build()
    }
}

impl GeoidBatch {
    /// The default delay between requests, the rate limit of the GSI service.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

    /// Makes a [`GeoidBatchBuilder`].
    #[inline]
    pub fn builder() -> GeoidBatchBuilder {
        GeoidBatchBuilder::new()
    }

    /// Returns the [`GeoidMode`].
    #[inline]
    pub const fn mode(&self) -> &GeoidMode {
        &self.mode
    }

    /// Returns the delay between requests.
    #[inline]
    pub const fn delay(&self) -> &Duration {
        &self.delay
    }

    /// Returns the max number of the retries of a point.
    #[inline]
    pub const fn retries(&self) -> &u32 {
        &self.retries
    }

    /// Looks up the geoid height of each point, in order.
    ///
    /// A point without latitude or longitude fails
    /// without a request and without a delay.
    /// `signal` is observed before each point and during each delay,
    /// the remaining points are abandoned on the cancellation.
    pub async fn run<G>(&self, points: &[Point], source: &G, signal: &CancelSignal) -> GeoidReport
    where
        G: GeoidSource + ?Sized,
    {
        let mut report = GeoidReport {
            items: Vec::with_capacity(points.len()),
            cancelled: false,
        };

        // whether the next request must wait
        let mut requested = false;

        'points: for (index, point) in points.iter().enumerate() {
            if signal.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let geo = match point.try_geographic() {
                Ok(geo) => geo,
                Err(e) => {
                    tracing::warn!(index, "skip geoid lookup, {e}");
                    report.items.push(GeoidItem {
                        index,
                        result: Err(e),
                    });
                    continue;
                }
            };

            let mut attempt = 0;
            let result = loop {
                if requested && self.wait(signal).await {
                    report.cancelled = true;
                    break 'points;
                }

                requested = true;
                tracing::debug!(
                    index,
                    attempt,
                    latitude = geo.latitude,
                    longitude = geo.longitude,
                    "geoid lookup"
                );

                match source.geoid_height(geo.latitude, geo.longitude).await {
                    Ok(n) => break Ok(n),
                    Err(e) if attempt < self.retries => {
                        tracing::debug!(index, attempt, "retry geoid lookup, {e}");
                        attempt += 1;
                    }
                    Err(e) => break Err(e),
                }
            };

            let result = match result {
                Ok(n) => Ok(GeoidValue {
                    geoid_height: n,
                    z: self.mode.apply(point.z, n),
                }),
                Err(e) => {
                    tracing::warn!(index, "geoid lookup failed, {e}");
                    Err(Error::from(e))
                }
            };

            report.items.push(GeoidItem { index, result });
        }

        if report.cancelled {
            tracing::debug!(done = report.items.len(), "geoid batch cancelled");
        }

        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            cancelled = report.cancelled,
            "geoid batch finished"
        );

        report
    }

    /// Waits the delay, returns `true` if cancelled meanwhile.
    async fn wait(&self, signal: &CancelSignal) -> bool {
        tokio::select! {
            biased;
            _ = signal.cancelled() => true,
            _ = tokio::time::sleep(self.delay) => false,
        }
    }
}

/// The builder of [`GeoidBatch`].
///
/// # Example
///
/// ```
/// # use std::time::Duration;
/// # use sokuryo::geoid::*;
/// let batch = GeoidBatchBuilder::new().build();
/// assert_eq!(batch.mode(), &GeoidMode::HeightOnly);
/// assert_eq!(batch.delay(), &Duration::from_secs(1));
/// assert_eq!(batch.retries(), &0);
///
/// let batch = GeoidBatchBuilder::new()
///     .mode(GeoidMode::ToEllipsoidal)
///     .delay(Duration::from_millis(1500))
///     .retries(2)
///     .build();
/// assert_eq!(batch.retries(), &2);
/// ```
#[derive(Debug, Clone)]
pub struct GeoidBatchBuilder {
    mode: GeoidMode,
    delay: Duration,
    retries: u32,
}

impl Default for GeoidBatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoidBatchBuilder {
    /// Makes a [`GeoidBatchBuilder`],
    /// [`GeoidMode::HeightOnly`], 1 s delay and no retry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            mode: GeoidMode::HeightOnly,
            delay: GeoidBatch::DEFAULT_DELAY,
            retries: 0,
        }
    }

    /// Updates the [`GeoidMode`].
    #[inline]
    pub const fn mode(mut self, mode: GeoidMode) -> Self {
        self.mode = mode;
        self
    }

    /// Updates the delay between requests.
    #[inline]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Updates the max number of the retries of a point.
    #[inline]
    pub const fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Builds [`GeoidBatch`].
    #[inline]
    pub const fn build(self) -> GeoidBatch {
        GeoidBatch {
            mode: self.mode,
            delay: self.delay,
            retries: self.retries,
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use tokio::time::Instant;

    use super::*;
    use crate::error::ErrorKind;
    use crate::geoid::{cancellation, GeoidError, GeoidErrorKind};

    fn point(latitude: f64, longitude: f64, z: f64) -> Point {
        Point::new(0.0, 0.0, z).with_geographic(latitude, longitude)
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_and_delay() {
        let calls = RefCell::new(Vec::new());
        let source = |latitude: f64, longitude: f64| {
            calls.borrow_mut().push((Instant::now(), latitude, longitude));
            async move { Ok::<_, GeoidError>(latitude + longitude) }
        };

        let points = [
            point(1.0, 10.0, 100.0),
            point(2.0, 20.0, 100.0),
            point(3.0, 30.0, 100.0),
        ];

        let start = Instant::now();
        let report = GeoidBatch::default()
            .run(&points, &source, &CancelSignal::never())
            .await;

        assert!(!report.cancelled);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failed(), 0);

        for (i, item) in report.items.iter().enumerate() {
            assert_eq!(item.index, i);
            let value = item.result.as_ref().unwrap();
            assert_eq!(value.geoid_height, 11.0 * (i + 1) as f64);
            assert_eq!(value.z, 100.0);
        }

        let calls = calls.into_inner();
        assert_eq!(calls.len(), 3);
        assert_eq!((calls[1].1, calls[1].2), (2.0, 20.0));
        // no delay before the first request nor after the last
        assert_eq!(calls[0].0, start);
        for pair in calls.windows(2) {
            assert!(pair[1].0 - pair[0].0 >= Duration::from_secs(1));
        }
        assert!(Instant::now() - start < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_failure() {
        let source = |latitude: f64, _: f64| async move {
            if latitude < 0.0 {
                Err(GeoidError::rejected())
            } else {
                Ok(30.0)
            }
        };

        let points = [
            point(36.0, 140.0, 50.0),
            point(-1.0, 140.0, 50.0),
            Point::new(0.0, 0.0, 50.0),
            point(35.0, 139.0, 50.0),
        ];

        let batch = GeoidBatch::builder().mode(GeoidMode::ToEllipsoidal).build();
        let report = batch.run(&points, &source, &CancelSignal::never()).await;

        assert_eq!(report.items.len(), 4);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 2);

        assert_eq!(report.items[0].result.as_ref().unwrap().z, 80.0);
        assert!(matches!(
            report.items[1].result.as_ref().unwrap_err().kind(),
            ErrorKind::Geoid(e) if e.kind() == &GeoidErrorKind::Rejected
        ));
        assert!(matches!(
            report.items[2].result.as_ref().unwrap_err().kind(),
            ErrorKind::MissingCoordinates
        ));
        assert_eq!(report.items[3].result.as_ref().unwrap().z, 80.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_without_coordinates() {
        let source = |_: f64, _: f64| async { Ok::<_, GeoidError>(30.0) };
        let points = [
            Point::new(0.0, 0.0, 0.0),
            point(36.0, 140.0, 0.0),
            Point::new(0.0, 0.0, 0.0),
        ];

        let start = Instant::now();
        let report = GeoidBatch::default()
            .run(&points, &source, &CancelSignal::never())
            .await;

        assert_eq!(report.succeeded(), 1);
        assert_eq!(Instant::now(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_delay() {
        let (canceller, signal) = cancellation();
        let calls = RefCell::new(0);
        let source = |_: f64, _: f64| {
            *calls.borrow_mut() += 1;
            canceller.cancel();
            async { Ok::<_, GeoidError>(30.0) }
        };

        let points = [point(36.0, 140.0, 0.0), point(36.1, 140.1, 0.0)];

        let start = Instant::now();
        let report = GeoidBatch::default().run(&points, &source, &signal).await;

        assert!(report.cancelled);
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(*calls.borrow(), 1);
        // the delay has not run out
        assert!(Instant::now() - start < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_run() {
        let (canceller, signal) = cancellation();
        canceller.cancel();

        let source = |_: f64, _: f64| async { Ok::<_, GeoidError>(30.0) };
        let report = GeoidBatch::default()
            .run(&[point(36.0, 140.0, 0.0)], &source, &signal)
            .await;

        assert!(report.cancelled);
        assert!(report.items.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry() {
        let calls = RefCell::new(Vec::new());
        let source = |_: f64, _: f64| {
            let mut calls = calls.borrow_mut();
            calls.push(Instant::now());
            let result = if calls.len() == 1 {
                Err(GeoidError::request("timeout"))
            } else {
                Ok(30.0)
            };
            async move { result }
        };

        let points = [point(36.0, 140.0, 0.0)];

        // no retry by default
        let report = GeoidBatch::default()
            .run(&points, &source, &CancelSignal::never())
            .await;
        assert_eq!(report.failed(), 1);

        calls.borrow_mut().clear();
        let report = GeoidBatch::builder()
            .retries(1)
            .build()
            .run(&points, &source, &CancelSignal::never())
            .await;
        assert_eq!(report.succeeded(), 1);

        let calls = calls.borrow();
        assert_eq!(calls.len(), 2);
        assert!(calls[1] - calls[0] >= Duration::from_secs(1));
    }
}
