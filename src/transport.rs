//! HTTP transport shared by all the API clients.
//!
//! [`Transport::execute`] sends a request through the middleware stack, drains the
//! response body and classifies the status code. Decoding is left to
//! [`TransportResponse`], so each operation decides which record it expects.

use crate::{
    common::AUTHORIZATION_HEADER,
    error::{ApiError, ErrorResponse},
    logging::Logger,
    Error,
};
use reqwest::{
    header::{HeaderName, HeaderValue},
    Method, Request, StatusCode, Url,
};
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use std::{
    fmt::{Debug, Formatter},
    time::{Duration, Instant},
};

pub use crate::middlewares::retry_transport_errors::ConstantBackoff;

/// Sends requests and classifies responses, logging according to the configured level.
#[derive(Clone)]
pub struct Transport {
    client: ClientWithMiddleware,
    timeout: Duration,
    logger: Logger,
}

impl Transport {
    /// `timeout` bounds each call as a whole, retries included.
    pub fn new(client: ClientWithMiddleware, timeout: Duration, logger: Logger) -> Self {
        Self {
            client,
            timeout,
            logger,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds a request to `full_path`, attaching `headers` and `body`.
    pub fn new_request<'a>(
        &self,
        method: Method,
        full_path: &str,
        headers: impl IntoIterator<Item = (&'a str, &'a str)>,
        body: Vec<u8>,
    ) -> Result<Request, Error> {
        self.build_request(method, full_path, headers, body)
            .map_err(|e| {
                self.logger
                    .error(|| format!("Request creation failed: {}", e));
                Error::RequestBuild(e)
            })
    }

    fn build_request<'a>(
        &self,
        method: Method,
        full_path: &str,
        headers: impl IntoIterator<Item = (&'a str, &'a str)>,
        body: Vec<u8>,
    ) -> anyhow::Result<Request> {
        let url = Url::parse(full_path)?;
        let mut req = Request::new(method, url);

        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())?;
            let mut value = HeaderValue::from_str(value)?;
            if name.as_str().eq_ignore_ascii_case(AUTHORIZATION_HEADER) {
                value.set_sensitive(true);
            }
            req.headers_mut().insert(name, value);
        }

        if !body.is_empty() {
            *req.body_mut() = Some(body.into());
        }
        *req.timeout_mut() = Some(self.timeout);

        Ok(req)
    }

    /// Sends `request` and reads the whole response body.
    ///
    /// Fails with [`Error::InvalidUrl`] on `404` and [`Error::EmptyResponse`] on `204`.
    /// Any other status is handed back for decoding.
    pub async fn execute(&self, request: Request) -> Result<TransportResponse, Error> {
        self.logger.info(|| {
            format!(
                "Request {}: {}{}",
                request.method(),
                request.url().host_str().unwrap_or_default(),
                request.url().path()
            )
        });

        let start = Instant::now();
        let res = self
            .client
            .execute(request)
            .await
            .map_err(|e| self.fail(Error::from(e)))?;

        self.logger
            .debug(|| format!("Completed in {:?}", start.elapsed()));

        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|e| self.fail(Error::Read(e)))?
            .to_vec();

        self.logger
            .debug(|| format!("BRI HTTP status response: {}", status.as_u16()));
        self.logger
            .debug(|| format!("BRI body response: {}", String::from_utf8_lossy(&body)));

        match status {
            StatusCode::NOT_FOUND => Err(self.fail(Error::InvalidUrl)),
            StatusCode::NO_CONTENT => Err(self.fail(Error::EmptyResponse)),
            _ => Ok(TransportResponse {
                status,
                body,
                logger: self.logger.clone(),
            }),
        }
    }

    /// Shortcut for [`new_request`](Transport::new_request) followed by [`execute`](Transport::execute).
    pub async fn call<'a>(
        &self,
        method: Method,
        full_path: &str,
        headers: impl IntoIterator<Item = (&'a str, &'a str)>,
        body: Vec<u8>,
    ) -> Result<TransportResponse, Error> {
        let request = self.new_request(method, full_path, headers, body)?;
        self.execute(request).await
    }

    /// Logs `e` at error level and hands it back.
    pub(crate) fn fail(&self, e: Error) -> Error {
        self.logger.error(|| e.to_string());
        e
    }
}

impl Debug for Transport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("timeout", &self.timeout)
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}

/// Fully buffered response, ready to be decoded.
#[derive(Debug)]
pub struct TransportResponse {
    status: StatusCode,
    body: Vec<u8>,
    logger: Logger,
}

impl TransportResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the body as `T`, falling back to the BRI error payload.
    ///
    /// When the body is not a `T`:
    /// - a `200 OK` is reported as [`Error::PendingTransaction`], carrying the error
    ///   payload when the body is one;
    /// - otherwise, a body that is a valid error payload becomes [`Error::Api`];
    /// - otherwise the error payload decoding failure is returned as [`Error::Decode`].
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Error> {
        self.decode_with(true)
    }

    /// Decodes the body as `T` without looking for an error payload.
    pub fn decode_success_only<T: DeserializeOwned>(&self) -> Result<T, Error> {
        self.decode_with(false)
    }

    fn decode_with<T: DeserializeOwned>(&self, with_error_payload: bool) -> Result<T, Error> {
        let success_error = match serde_json::from_slice::<T>(&self.body) {
            Ok(res) => return Ok(res),
            Err(e) => e,
        };

        let error_payload = with_error_payload
            .then(|| serde_json::from_slice::<ErrorResponse>(&self.body));

        let err = if self.status == StatusCode::OK {
            Error::PendingTransaction(error_payload.and_then(Result::ok))
        } else {
            match error_payload {
                Some(Ok(payload)) => Error::Api(ApiError {
                    status: self.status.as_u16(),
                    payload,
                }),
                Some(Err(e)) => Error::Decode(e),
                None => Error::Decode(success_error),
            }
        };

        self.logger.error(|| err.to_string());
        Err(err)
    }
}
