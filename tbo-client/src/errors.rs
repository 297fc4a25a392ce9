//! Error types for tbo-client.

use std::{fmt, io};

use tbo_types::deserialize;

// ─── ApiError ─────────────────────────────────────────────────────────────────

/// A request the Bot API answered with `"ok": false`.
///
/// # Example
/// `{"ok":false,"error_code":429,"description":"Too Many Requests: retry after 5","parameters":{"retry_after":5}}`
/// → `ApiError { code: 429, retry_after: Some(5), .. }`
#[derive(Clone, Debug, PartialEq)]
pub struct ApiError {
    /// The Bot API method that failed, e.g. `sendMessage`.
    pub method: String,
    /// HTTP-like status code (`error_code`).
    pub code: i32,
    pub description: String,
    /// Seconds to wait before repeating the request (flood control).
    pub retry_after: Option<u64>,
    /// The group was upgraded to a supergroup with this id.
    pub migrate_to_chat_id: Option<i64>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] [{}] {}", self.method, self.code, self.description)?;
        if let Some(secs) = self.retry_after {
            write!(f, " (retry after {secs}s)")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Returns `true` for flood-control rejections.
    pub fn is_flood(&self) -> bool {
        self.code == 429
    }
}

// ─── InvocationError ──────────────────────────────────────────────────────────

/// The error type returned from any `Client` method that talks to the Bot API.
#[derive(Debug)]
pub enum InvocationError {
    /// The Bot API rejected the request.
    Api(ApiError),
    /// The HTTP request itself failed (connect, TLS, timeout, ...).
    Http(reqwest::Error),
    /// Local I/O failure, e.g. reading a file to upload.
    Io(io::Error),
    /// The `result` did not have the expected shape.
    Decode(deserialize::Error),
    /// The body was not a Bot API response envelope.
    MalformedResponse { method: String, reason: String },
    /// `getMe` did not return a usable answer: the token is probably wrong.
    BotNotFound,
}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e)     => write!(f, "{e}"),
            Self::Http(e)    => write!(f, "HTTP error: {e}"),
            Self::Io(e)      => write!(f, "I/O error: {e}"),
            Self::Decode(e)  => write!(f, "decode error: {e}"),
            Self::MalformedResponse { method, reason } => {
                write!(f, "'{method}' returned a malformed response: {reason}")
            }
            Self::BotNotFound => write!(f, "bot not found (check the token)"),
        }
    }
}

impl std::error::Error for InvocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e)    => Some(e),
            Self::Http(e)   => Some(e),
            Self::Io(e)     => Some(e),
            Self::Decode(e) => Some(e),
            _               => None,
        }
    }
}

impl From<ApiError> for InvocationError {
    fn from(e: ApiError) -> Self { Self::Api(e) }
}

impl From<reqwest::Error> for InvocationError {
    fn from(e: reqwest::Error) -> Self { Self::Http(e) }
}

impl From<io::Error> for InvocationError {
    fn from(e: io::Error) -> Self { Self::Io(e) }
}

impl From<deserialize::Error> for InvocationError {
    fn from(e: deserialize::Error) -> Self { Self::Decode(e) }
}

impl InvocationError {
    /// The API error code, if this is an API error.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Api(e) => Some(e.code),
            _            => None,
        }
    }

    /// If this is a flood-control error, how many seconds to wait.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Api(e) if e.is_flood() => e.retry_after,
            _                            => None,
        }
    }

    /// Network-level failures that may succeed when repeated.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Io(_))
    }
}
