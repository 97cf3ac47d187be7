//! Provides the request and the response of the geoid height service of GSI,
//! 国土地理院 ジオイド高計算.
//!
//! This makes the URL and decodes the JSON body only,
//! the caller sends the request by any HTTP client.
//! The service allows a request per second at most,
//! see [`GeoidBatch::DEFAULT_DELAY`](super::GeoidBatch::DEFAULT_DELAY).
//!
//! # Example
//!
//! ```
//! # use sokuryo::geoid::gsi;
//! let url = gsi::request_url(36.10377479, 140.087855041);
//! assert!(url.ends_with("?latitude=36.10377479&longitude=140.087855041&outputType=json"));
//!
//! let body = r#"{"OutputData":{"latitude":"36.10377479","longitude":"140.087855041","geoidHeight":"40.6424"},"ReturnFlag":"1"}"#;
//! assert_eq!(gsi::decode(body), Ok(40.6424));
//! ```
use serde::Deserialize;

use super::GeoidError;

/// The endpoint of the service.
pub const ENDPOINT: &str = "https://vldb.gsi.go.jp/sokuchi/surveycalc/geoid/calcgh/cgi/geoidcalc.pl";

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(rename = "OutputData", default)]
    output: Option<OutputData>,
    #[serde(rename = "ReturnFlag", default)]
    flag: Option<Scalar>,
}

#[derive(Debug, Deserialize)]
struct OutputData {
    #[serde(rename = "geoidHeight", default)]
    geoid_height: Option<Scalar>,
}

/// The service puts numbers in strings, sometimes not.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Returns the request URL of the geoid height at the position.
///
/// # Example
///
/// ```
/// # use sokuryo::geoid::gsi::request_url;
/// assert_eq!(
///     request_url(35.0, 135.5),
///     "https://vldb.gsi.go.jp/sokuchi/surveycalc/geoid/calcgh/cgi/geoidcalc.pl?latitude=35&longitude=135.5&outputType=json"
/// );
/// ```
pub fn request_url(latitude: f64, longitude: f64) -> String {
    format!("{ENDPOINT}?latitude={latitude}&longitude={longitude}&outputType=json")
}

/// Returns the geoid height \[m\] in the response body.
///
/// # Errors
///
/// Returns [`GeoidError`] of [`Rejected`](super::GeoidErrorKind::Rejected)
/// if `ReturnFlag` is not `1`,
/// and of [`Malformed`](super::GeoidErrorKind::Malformed)
/// if the body is not JSON or the geoid height is missing.
pub fn decode(body: &str) -> Result<f64, GeoidError> {
    let response: Response =
        serde_json::from_str(body).map_err(|e| GeoidError::malformed(e.to_string()))?;

    let accepted = response
        .flag
        .as_ref()
        .and_then(Scalar::to_f64)
        .is_some_and(|flag| flag == 1.0);
    if !accepted {
        return Err(GeoidError::rejected());
    }

    response
        .output
        .as_ref()
        .and_then(|output| output.geoid_height.as_ref())
        .and_then(Scalar::to_f64)
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeoidError::malformed("geoidHeight not found"))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geoid::GeoidErrorKind;

    #[test]
    fn test_decode() {
        let body = r#"{"OutputData":{"latitude":"35","longitude":"135.5","geoidHeight":"37.1234"},"ReturnFlag":"1"}"#;
        assert_eq!(decode(body), Ok(37.1234));

        // numbers
        let body = r#"{"OutputData":{"geoidHeight":37.1234},"ReturnFlag":1}"#;
        assert_eq!(decode(body), Ok(37.1234));
    }

    #[test]
    fn test_decode_rejected() {
        let body = r#"{"OutputData":{"geoidHeight":"0"},"ReturnFlag":"0"}"#;
        assert_eq!(decode(body).unwrap_err().kind(), &GeoidErrorKind::Rejected);

        let body = r#"{"OutputData":{"geoidHeight":"37.1"}}"#;
        assert_eq!(decode(body).unwrap_err().kind(), &GeoidErrorKind::Rejected);
    }

    #[test]
    fn test_decode_malformed() {
        for body in [
            "",
            "<html></html>",
            r#"{"ReturnFlag":"1"}"#,
            r#"{"OutputData":{},"ReturnFlag":"1"}"#,
            r#"{"OutputData":{"geoidHeight":""},"ReturnFlag":"1"}"#,
            r#"{"OutputData":{"geoidHeight":"abc"},"ReturnFlag":"1"}"#,
        ] {
            assert_eq!(
                decode(body).unwrap_err().kind(),
                &GeoidErrorKind::Malformed,
                "{body}"
            );
        }
    }

    #[test]
    fn test_request_url() {
        assert!(request_url(-0.5, 139.25).contains("latitude=-0.5&longitude=139.25"));
    }
}
