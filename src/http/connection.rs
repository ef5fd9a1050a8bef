use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::parser::{ParseError, parse_line, parse_request_line};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::resource::{Resource, Resolver};

const READ_CHUNK: usize = 1024;
const CRLF_LEN: usize = 2;

/// Serves exactly one request over `stream`, then closes it.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    resolver: Arc<Resolver>,
    max_request_line: usize,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, resolver: Arc<Resolver>, max_request_line: usize) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
            resolver,
            max_request_line,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    if let Some(req) = self.read_request().await? {
                        self.state = ConnectionState::Processing(req);
                    }
                }

                ConnectionState::Processing(req) => {
                    let response = handle_request(&self.resolver, &req).await;
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after response failed");
                    }
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    /// Reads until the request line is complete.
    ///
    /// Returns `Ok(None)` when there is nothing to answer: the peer sent
    /// nothing, or sent something that is not a request line.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        loop {
            match parse_request_line(&self.buffer) {
                Ok((request, consumed)) => {
                    let line_len = consumed - CRLF_LEN;
                    if line_len > self.max_request_line {
                        tracing::warn!(
                            line_len,
                            limit = self.max_request_line,
                            "Request line too long, dropping connection"
                        );
                        return Ok(None);
                    }

                    self.buffer.advance(consumed);
                    return Ok(Some(request));
                }

                Err(ParseError::Incomplete) => {
                    // At most one buffered byte can be the pending '\r'.
                    if self.buffer.len() > self.max_request_line + 1 {
                        tracing::warn!(
                            buffered = self.buffer.len(),
                            limit = self.max_request_line,
                            "Request line too long, dropping connection"
                        );
                        return Ok(None);
                    }
                }

                Err(e) => {
                    tracing::warn!(error = %e, "Malformed request, dropping connection");
                    return Ok(None);
                }
            }

            let mut temp = [0u8; READ_CHUNK];
            let n = self.stream.read(&mut temp).await?;

            if n == 0 {
                return Ok(self.finish_partial_line());
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }

    // The peer closed before sending CRLF; whatever arrived is the request line.
    fn finish_partial_line(&mut self) -> Option<Request> {
        if self.buffer.is_empty() {
            return None;
        }
        if self.buffer.len() > self.max_request_line {
            tracing::warn!(
                line_len = self.buffer.len(),
                limit = self.max_request_line,
                "Request line too long, dropping connection"
            );
            return None;
        }

        let line = self.buffer.split();
        match parse_line(&line) {
            Ok(request) => Some(request),
            Err(e) => {
                tracing::warn!(error = %e, "Malformed request, dropping connection");
                None
            }
        }
    }
}

/// Validates the method, resolves the target, and picks the response.
pub async fn handle_request(resolver: &Resolver, req: &Request) -> Response {
    let response = match req.validate() {
        Err(e) => {
            let known = Method::from_token(&req.method).is_some();
            tracing::debug!(error = %e, known, "Rejecting method");
            Response::method_not_allowed()
        }
        Ok(_) => match resolver.resolve(&req.target).await {
            Ok(Resource::Missing) => Response::not_found(),
            Ok(resource) => Response::from_resource(resource),
            Err(e) => {
                tracing::error!(target = %req.target, error = ?e, "Failed to resolve request target");
                Response::internal_error()
            }
        },
    };

    tracing::info!(
        method = %req.method,
        target = %req.target,
        status = response.status.as_u16(),
        bytes = response.body.len(),
        "Request served"
    );

    response
}
