//! # sokuryo
//!
//! Surveying numerics on the Japanese Geodetic Datum 2011 (JGD2011):
//! the plane rectangular coordinate system, the meridian convergence,
//! the inverse calculation, the Helmert transformation
//! and the altitude correction by the gridded parameter of GSI [^1].
//!
//! 測量計算（平面直角座標と緯度経度の相互変換、子午線収差角、逆計算、
//! ヘルマート変換、標高補正、ジオイド高）を提供します。
//!
//! ```
//! use sokuryo::{projection, north, inverse, Point};
//!
//! fn main() -> sokuryo::Result<()> {
//!     // The plane rectangular coordinate of the zone IX (第9系)
//!     let plane = projection::geographic_to_plane(36.10377479, 140.087855041, 9)?;
//!     assert!((plane.x - 11543.6883).abs() < 1e-3);
//!     assert!((plane.y - 22916.2436).abs() < 1e-3);
//!
//!     // and back
//!     let geo = projection::plane_to_geographic(plane.x, plane.y, 9)?;
//!     assert!((geo.latitude - 36.10377479).abs() < 1e-9);
//!
//!     // The meridian convergence [deg]
//!     let conv = north::meridian_convergence(geo.latitude, geo.longitude, 9)?;
//!     assert!(conv > 0.0);
//!
//!     // The distance and the azimuth between two points
//!     let result = inverse::inverse(&Point::new(0.0, 0.0, 0.0), &Point::new(100.0, 100.0, 0.0));
//!     assert!((result.azimuth - 45.0).abs() < 1e-12);
//!
//!     Ok(())
//! }
//! ```
//!
//! Features:
//!
//! - All 19 zones of the plane rectangular coordinate system ([EPSG:6669] to [EPSG:6687]),
//!   by the Krüger series of the 6th order
//! - The least squares Helmert transformation of 4 or 3 parameters
//! - The altitude correction by par-formatted parameters, e.g. [PatchJGD(H)] and [HyokoRev]
//! - The rate-limited and cancellable geoid height lookup over points;
//!   the HTTP client is the caller's, see [`geoid::GeoidSource`]
//! - The construction survey calculations and the leveling field book
//!
//! Cargo features:
//!
//! - `fma`: uses the fused multiply-add
//! - `serde`: supports (de)serialization by [`serde`][serde],
//!   and provides the decoder of the GSI geoid height service, [`geoid::gsi`]
//!
//! [PatchJGD(H)]: https://vldb.gsi.go.jp/sokuchi/surveycalc/patchjgd_h/index.html
//! [HyokoRev]: https://vldb.gsi.go.jp/sokuchi/surveycalc/hyokorev/hyokorev.html
//!
//! [EPSG:6669]: https://epsg.io/6669
//! [EPSG:6687]: https://epsg.io/6687
//!
//! [serde]: https://crates.io/crates/serde
//!
//! This package does not contain parameter files, download it from GSI [^2].
//!
//! このパッケージはパラメータファイルを提供しません。公式サイトよりダウンロードしてください [^2]。
//!
//! # Altitude Correction
//!
//! ```no_run
//! use std::fs;
//! # use std::error::Error;
//! use sokuryo::{batch, AltitudeCorrectionGrid, Format, Point};
//!
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let s = fs::read_to_string("Hyokorev2024.par")?;
//! let grid = AltitudeCorrectionGrid::from_str(&s, Format::HyokoRev)?;
//!
//! let points = [Point::new(0.0, 0.0, 12.3).with_geographic(36.1, 140.1)];
//! for result in batch::correct_altitude(&points, &grid) {
//!     match result {
//!         Ok(corrected) => println!("{:.4} ({:+.4})", corrected.point.z, corrected.correction),
//!         Err(e) => println!("{e}"),
//!     }
//! }
//! # Ok(())}
//! ```
//!
//! # Geoid Height
//!
//! ```no_run
//! use sokuryo::geoid::{cancellation, GeoidBatch, GeoidError, GeoidMode};
//! use sokuryo::Point;
//!
//! // Requests the service by any HTTP client,
//! // see `sokuryo::geoid::gsi` for the GSI service
//! async fn fetch_geoid_height(latitude: f64, longitude: f64) -> Result<f64, GeoidError> {
//!     # unimplemented!()
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let source = |latitude: f64, longitude: f64| fetch_geoid_height(latitude, longitude);
//!
//! let (_canceller, signal) = cancellation();
//! let batch = GeoidBatch::builder().mode(GeoidMode::ToOrthometric).build();
//!
//! let points = [Point::new(0.0, 0.0, 80.0).with_geographic(36.1, 140.1)];
//! let report = batch.run(&points, &source, &signal).await;
//! println!("succeeded: {}, failed: {}", report.succeeded(), report.failed());
//! # }
//! ```
//!
//! # Serialization and Deserialization
//!
//! All value types support (de)serialization
//! only if the feature `serde` is enabled.
//!
//! ```
//! # #[cfg(feature = "serde")]
//! # fn main() -> serde_json::Result<()> {
//! use sokuryo::Point;
//!
//! let point = Point::new(1.0, 2.0, 3.0).with_geographic(36.0, 140.0);
//!
//! let json = serde_json::to_string(&point)?;
//! assert_eq!(
//!     json,
//!     r#"{"x":1.0,"y":2.0,"z":3.0,"latitude":36.0,"longitude":140.0}"#
//! );
//!
//! let result: Point = serde_json::from_str(&json)?;
//! assert_eq!(result, point);
//! # Ok(())}
//! # #[cfg(not(feature = "serde"))]
//! # fn main() {}
//! ```
//!
//! [^1]: Geospatial Information Authority of Japan (GSI, 国土地理院): <https://www.gsi.go.jp/>
//!       (English) <https://www.gsi.go.jp/ENGLISH/>.
//!
//! [^2]: PatchJGD(H) and HyokoRev: <https://www.gsi.go.jp/sokuchikijun/sokuchikijun41012.html>.

#[doc(inline)]
pub use altitude::{AltitudeCorrectionGrid, AltitudeCorrectionGridBuilder};
#[doc(inline)]
pub use error::{Error, ErrorKind, Result};
#[doc(inline)]
pub use helmert::{ControlPointPair, HelmertParams, ScaleMode};
#[doc(inline)]
pub use par::Format;
#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use zone::Zone;

pub mod altitude;
pub mod batch;
pub mod construction;
pub mod dms;
pub mod error;
pub mod geoid;
pub mod helmert;
mod internal;
pub mod inverse;
pub mod leveling;
pub mod mesh;
pub mod north;
pub mod par;
pub mod point;
pub mod projection;
pub mod utils;
pub mod zone;
