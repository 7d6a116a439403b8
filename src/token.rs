use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Wrapper for a secret string that makes it harder to accidentally expose secrets
/// and ensures the backing memory is wiped on drop.
///
/// Used for client secrets, API keys and the caller-supplied access tokens.
///
/// ```rust
/// # use bri_rust::Token;
/// let token = Token::new("supersecret");
///
/// // The secret is redacted when printed with Debug
/// assert!(!format!("{:?}", token).contains("supersecret"));
///
/// // But can be manually exposed calling `expose_secret()`
/// assert_eq!(token.expose_secret(), "supersecret");
/// ```
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Token(#[serde(serialize_with = "serialize_secret")] Secret<String>);

impl Token {
    /// Wraps a secret string in a new `Token`.
    pub fn new<T: Into<String>>(s: T) -> Self {
        Self(Secret::new(s.into()))
    }

    /// Exposes a reference to the underlying secret string.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// Value of the `Authorization` header carrying this token.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.expose_secret())
    }
}

impl<T> From<T> for Token
where
    T: Into<String>,
{
    fn from(s: T) -> Self {
        Token::new(s)
    }
}

fn serialize_secret<S>(secret: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::ser::Serializer,
{
    secret.expose_secret().serialize(serializer)
}
