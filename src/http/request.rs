use thiserror::Error;

/// HTTP request methods.
///
/// Only `GET` is served. Every other token, known method or not, is answered
/// with 405 Method Not Allowed; the rejection log records which it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
}

impl Method {
    /// Parses an HTTP method token.
    ///
    /// Matching is case-sensitive, as HTTP method tokens are.
    ///
    /// ```
    /// # use webroot::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_token("get"), None);
    /// ```
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }
}

/// Raised for any method token other than `GET`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("method not allowed: {0:?}")]
pub struct MethodNotAllowed(pub String);

/// Accepts only the retrieval method.
pub fn validate_method(token: &str) -> Result<Method, MethodNotAllowed> {
    match Method::from_token(token) {
        Some(Method::GET) => Ok(Method::GET),
        _ => Err(MethodNotAllowed(token.to_string())),
    }
}

/// A parsed request line.
///
/// Only the first line of what the client sent is kept; headers and body
/// are never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Method token exactly as sent, validated separately
    pub method: String,
    /// Request target as sent, including any query string
    pub target: String,
    /// Protocol version token, empty if the client omitted it
    pub version: String,
}

impl Request {
    pub fn new(
        method: impl Into<String>,
        target: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
            version: version.into(),
        }
    }

    /// Runs the method validator over this request's method token.
    pub fn validate(&self) -> Result<Method, MethodNotAllowed> {
        validate_method(&self.method)
    }
}
