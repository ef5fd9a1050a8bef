use crate::resource::Resource;

/// HTTP status codes the server produces.
///
/// - `Ok` (200): file contents or a directory listing
/// - `NotFound` (404): the target names nothing servable
/// - `MethodNotAllowed` (405): any method other than GET
/// - `InternalServerError` (500): the target exists but could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not found
    NotFound,
    /// 405 Method not allowed
    MethodNotAllowed,
    /// 500 Internal error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// ```
    /// # use webroot::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the status phrase placed after `HTTP/1.1 ` on the status
    /// line. Error responses reuse it as their body.
    ///
    /// ```
    /// # use webroot::http::response::StatusCode;
    /// assert_eq!(StatusCode::NotFound.phrase(), "404 Not found");
    /// ```
    pub fn phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "200 OK",
            StatusCode::NotFound => "404 Not found",
            StatusCode::MethodNotAllowed => "405 Method not allowed",
            StatusCode::InternalServerError => "500 Internal error",
        }
    }
}

/// A complete response ready to be serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    /// Value of the single Content-Type header, if any
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Builder for constructing responses in a fluent style.
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type("text/plain")
///     .body(b"hello".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            content_type: self.content_type,
            body: self.body,
        }
    }
}

impl Response {
    /// 200 OK carrying a resolved resource, or 404 when it is missing.
    pub fn from_resource(resource: Resource) -> Self {
        let Some(content_type) = resource.content_type().map(str::to_string) else {
            return Self::not_found();
        };
        let body = resource.into_body().unwrap_or_default();

        ResponseBuilder::new(StatusCode::Ok)
            .content_type(content_type)
            .body(body)
            .build()
    }

    /// An error response: no Content-Type, the status phrase as body.
    pub fn error(status: StatusCode) -> Self {
        ResponseBuilder::new(status)
            .body(status.phrase().as_bytes())
            .build()
    }

    pub fn not_found() -> Self {
        Self::error(StatusCode::NotFound)
    }

    pub fn method_not_allowed() -> Self {
        Self::error(StatusCode::MethodNotAllowed)
    }

    pub fn internal_error() -> Self {
        Self::error(StatusCode::InternalServerError)
    }
}
