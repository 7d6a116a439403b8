//! Request signatures expected by BRI.
//!
//! Every call carries a `BRI-Signature` header: an HMAC-SHA256, keyed with the client
//! secret, over the canonical string
//!
//! ```text
//! path=<path>&verb=<METHOD>&token=Bearer <token>&timestamp=<timestamp>&body=<body>
//! ```
//!
//! encoded as standard base64. The same timestamp is sent in `BRI-Timestamp`.

use crate::{
    common::{
        AUTHORIZATION_HEADER, BRI_SIGNATURE_HEADER, BRI_TIMESTAMP_HEADER, CONTENT_TYPE_HEADER,
        JSON_CONTENT_TYPE,
    },
    Error, Token,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::Sha256;
use std::fmt::{Debug, Formatter};

type HmacSha256 = Hmac<Sha256>;

/// `chrono` format of the `BRI-Timestamp` header, always rendered in UTC.
pub static BRI_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Builds the string the signature is computed over.
pub fn canonical_string(path: &str, method: &Method, token: &str, timestamp: &str, body: &str) -> String {
    format!(
        "path={}&verb={}&token={}&timestamp={}&body={}",
        path,
        method.as_str(),
        token,
        timestamp,
        body
    )
}

/// Computes the `BRI-Signature` of a request.
///
/// `path` is the endpoint path only (no scheme, host or query), `token` must already
/// carry the `Bearer ` prefix and `body` is the exact serialized body sent on the wire
/// (empty when there is none).
pub fn sign(
    path: &str,
    method: &Method,
    token: &str,
    timestamp: &str,
    body: &str,
    secret: &str,
) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(canonical_string(path, method, token, timestamp, body).as_bytes());

    STANDARD.encode(mac.finalize().into_bytes())
}

/// Source of the `BRI-Timestamp` values.
pub trait Clock: Send + Sync {
    fn timestamp(&self) -> String;
}

/// Wall clock formatted with [`BRI_TIME_FORMAT`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        Utc::now().format(BRI_TIME_FORMAT).to_string()
    }
}

/// Clock always returning the same timestamp. Makes signatures reproducible.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}

/// A request body together with the four headers BRI requires on every call.
pub struct SignedRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    authorization: String,
    timestamp: String,
    signature: String,
    pub(crate) body: Vec<u8>,
}

impl SignedRequest {
    /// Timestamps and signs `body` for a call to `path`.
    ///
    /// Fails if the clock produced an empty timestamp or the body is not valid UTF-8.
    pub fn new(
        method: Method,
        path: &str,
        access_token: &Token,
        clock: &dyn Clock,
        body: Vec<u8>,
        client_secret: &Token,
    ) -> Result<Self, Error> {
        let authorization = access_token.bearer();
        let timestamp = clock.timestamp();
        if timestamp.is_empty() {
            return Err(Error::RequestBuild(anyhow::anyhow!(
                "Cannot sign a request with an empty timestamp"
            )));
        }

        let body_str = std::str::from_utf8(&body)
            .map_err(|e| Error::RequestBuild(anyhow::anyhow!("Request body is not UTF-8: {}", e)))?;
        let signature = sign(
            path,
            &method,
            &authorization,
            &timestamp,
            body_str,
            client_secret.expose_secret(),
        );

        Ok(Self {
            method,
            path: path.to_string(),
            authorization,
            timestamp,
            signature,
            body,
        })
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Standard headers, in the order they are attached.
    pub fn headers(&self) -> [(&'static str, &str); 4] {
        [
            (AUTHORIZATION_HEADER, self.authorization.as_str()),
            (BRI_TIMESTAMP_HEADER, self.timestamp.as_str()),
            (BRI_SIGNATURE_HEADER, self.signature.as_str()),
            (CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE),
        ]
    }
}

impl Debug for SignedRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}
