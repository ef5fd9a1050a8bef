use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Assembles a response from its raw parts.
///
/// `content_type_header` is spliced in verbatim: it must be empty or carry
/// its own leading CRLF and header name, e.g. `"\r\nContent-Type: text/plain"`.
pub fn build_response(status: &str, content_type_header: &str, body: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(
        HTTP_VERSION.len() + 1 + status.len() + content_type_header.len() + 4 + body.len(),
    );

    buf.extend_from_slice(HTTP_VERSION.as_bytes());
    buf.push(b' ');
    buf.extend_from_slice(status.as_bytes());
    buf.extend_from_slice(content_type_header.as_bytes());
    buf.extend_from_slice(b"\r\n\r\n");
    buf.extend_from_slice(body);

    buf
}

/// Renders the optional Content-Type in the form `build_response` expects.
pub fn content_type_header(content_type: Option<&str>) -> String {
    content_type
        .map(|ct| format!("\r\nContent-Type: {ct}"))
        .unwrap_or_default()
}

pub fn serialize_response(resp: &Response) -> Vec<u8> {
    build_response(
        resp.status.phrase(),
        &content_type_header(resp.content_type.as_deref()),
        &resp.body,
    )
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
