//! Rust client for BRI's [Direct Debit](https://developers.bri.co.id) API.
//!
//! The client takes care of the request signing dance required by BRI: every call is
//! timestamped, signed with an HMAC of the canonical request string keyed with your
//! client secret, and sent with the `BRI-Timestamp` and `BRI-Signature` headers.
//! Transient network failures are retried a bounded number of times; HTTP responses
//! are never retried.
//!
//! # Usage
//!
//! ## Prerequisites
//!
//! Register an application on the BRI developer portal to obtain a client ID and
//! secret, and acquire an OAuth access token. Token acquisition is not handled by
//! this crate: every operation takes the access token as a parameter.
//!
//! ## Initialize a new `BriClient`
//!
//! ```rust,no_run
//! # use bri_rust::{BriClient, client::ClientConfig};
//! let config = ClientConfig::new(
//!     "https://sandbox.partner.api.bri.co.id",
//!     "some-client-id",
//!     "some-client-secret",
//! );
//!
//! let bri = BriClient::builder(config)
//!     .with_sandbox_prefix(true)
//!     .build();
//! ```
//!
//! By default a `BriClient` targets the sandbox paths unless
//! [`ClientConfig::is_production`](crate::client::ClientConfig::is_production) is set.
//!
//! ## Bind a card
//!
//! ```rust,no_run
//! # use bri_rust::{BriClient, Error, Token, apis::direct_debit::*};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let bri: BriClient = unreachable!();
//! let access_token = Token::new("access-token-from-oauth");
//!
//! let req = CardTokenOtpRequest {
//!     body: CardTokenOtpBodyBuilder::default()
//!         .card_pan("5221843000021224")
//!         .phone_number("081234567890")
//!         .email("someone@example.com")
//!         .build()
//!         .unwrap(),
//! };
//!
//! let res = bri
//!     .direct_debit
//!     .create_card_token_otp(&access_token, req)
//!     .await?;
//!
//! println!("Card token: {}", res.card_token);
//! # Ok(())
//! # }
//! ```
//!
//! ## Handling errors
//!
//! A response that the bank sent with a non-success body surfaces as
//! [`Error::Api`](crate::Error::Api) carrying the decoded error payload.
//! A `200 OK` whose body does not match the expected record means the transaction
//! is not finalized yet and is reported as
//! [`Error::PendingTransaction`](crate::Error::PendingTransaction), which keeps the
//! bank's error payload when the body is one.
//!
//! ## Logging
//!
//! Log lines go through [`tracing`](https://docs.rs/tracing) by default, at the level set in
//! [`ClientConfig::log_level`](crate::client::ClientConfig::log_level). Install a subscriber
//! to see them:
//!
//! ```rust,no_run
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Use [`BriClientBuilder::with_logger`](crate::client::BriClientBuilder::with_logger) to send
//! them somewhere else.
//!
//! To run the demo, use `cargo run` like this:
//!
//! ```shell
//! cargo run --example direct_debit
//! ```

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod apis;
pub mod client;
mod common;
pub mod endpoints;
pub mod error;
pub mod logging;
mod middlewares;
pub mod signing;
mod token;
pub mod transport;

pub use client::BriClient;
pub use error::Error;
pub use token::Token;
