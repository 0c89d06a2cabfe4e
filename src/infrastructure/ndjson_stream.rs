// Chunked NDJSON streaming utilities
use crate::domain::series::StreamEvent;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;

/// Create a chunked NDJSON streaming response: one JSON object per
/// line, flushed as each event arrives.
pub fn chunked_ndjson_stream<S>(stream: S) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = StreamEvent> + Send + 'static,
{
    let byte_stream = stream.map(serialize_line);

    let body = Body::from_stream(byte_stream);

    // NOTE: Response compression stays off this route (see router
    // setup) so each line reaches the client as soon as it is emitted
    // instead of sitting in an encoder buffer.
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .header(header::TRANSFER_ENCODING, "chunked");

    response
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single event to one newline-terminated JSON line
fn serialize_line(event: StreamEvent) -> Result<Bytes, std::io::Error> {
    let payload = serde_json::to_vec(&event)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let mut line = BytesMut::with_capacity(payload.len() + 1);
    line.put_slice(&payload);
    line.put_u8(b'\n');

    Ok(line.freeze())
}

/// Helper to create a streaming response from a receiver
pub async fn stream_from_receiver(
    mut rx: tokio::sync::mpsc::Receiver<StreamEvent>,
) -> impl IntoResponse {
    let stream = async_stream::stream! {
        while let Some(event) = rx.recv().await {
            yield event;
        }
    };

    match chunked_ndjson_stream(stream) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_line_is_newline_terminated_json() {
        let line = serialize_line(StreamEvent::Complete {
            widgets: 3,
            duration_ms: 42,
        })
        .unwrap();

        let text = std::str::from_utf8(&line).unwrap();
        assert!(text.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["type"], "complete");
        assert_eq!(value["widgets"], 3);
        assert_eq!(value["durationMs"], 42);
    }
}
