// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
Serving any [`Invocable`] over HTTP with its own protocol.

| Request                      | Response                              |
| ---------------------------- | ------------------------------------- |
| `POST` predict path          | 200 with the encoded outputs          |
| `GET` status path            | 200 when ready, 503 otherwise         |
| undecodable body             | 400 with `{"error": ...}`             |
| body over the size limit     | 413 with `{"error": ...}`             |
| failed prediction            | 500 with `{"error": ...}`             |
| anything else                | 404                                   |
 */

use log::{info, warn};
use serde_json::{json, Value as JsonValue};
use std::{
    io::{self, Read},
    net::SocketAddr,
    sync::Arc,
};
use tempo_core::ProtocolError;
use tiny_http::{Header, Method, Request, Response, Server};

use crate::{
    context::RequestContext,
    error::TempoError,
    invocable::Invocable,
    remote::REQUEST_ID_HEADER,
};

/// Request bodies larger than this are refused unless the server is
/// configured otherwise.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// An HTTP server bound to one model.
pub struct ModelServer {
    server: Arc<Server>,
    model: Arc<dyn Invocable>,
    max_body_bytes: usize,
}

impl ModelServer {
    pub fn bind(model: Arc<dyn Invocable>, host: &str, port: u16) -> Result<Self, TempoError> {
        let addr = format!("{}:{}", host, port);
        let server = Server::http(&addr).map_err(|e| {
            TempoError::Internal(anyhow::anyhow!("failed to bind {}: {}", addr, e))
        })?;

        Ok(Self {
            server: Arc::new(server),
            model,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        })
    }

    /// Refuse request bodies larger than `limit` bytes with a 413.
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// The address actually bound, useful when binding port 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serve requests on `threads` threads, including the calling one.
    pub fn run(self, threads: usize) {
        let details = self.model.details();
        info!(
            "serving {} ({}) on {:?} with {} thread(s)",
            details.name,
            details.protocol,
            self.local_addr(),
            threads.max(1)
        );

        for _ in 1..threads {
            let server = self.server.clone();
            let model = self.model.clone();
            let limit = self.max_body_bytes;
            std::thread::spawn(move || run_worker(&server, model.as_ref(), limit));
        }

        run_worker(&self.server, self.model.as_ref(), self.max_body_bytes);
    }

    /// Stop one blocked worker; call once per thread to shut down.
    pub fn unblock(&self) {
        self.server.unblock();
    }
}

/// Bind `model` and serve it until the server stops.
pub fn serve(
    model: Arc<dyn Invocable>,
    host: &str,
    port: u16,
    threads: usize,
) -> Result<(), TempoError> {
    ModelServer::bind(model, host, port)?.run(threads);
    Ok(())
}

fn run_worker(server: &Server, model: &dyn Invocable, max_body_bytes: usize) {
    loop {
        match server.recv() {
            Ok(request) => {
                if let Err(e) = respond(model, request, max_body_bytes) {
                    warn!("failed to respond: {}", e);
                }
            }
            Err(e) => {
                info!("stopping worker: {}", e);
                break;
            }
        }
    }
}

fn respond(model: &dyn Invocable, mut request: Request, max_body_bytes: usize) -> io::Result<()> {
    let body = match request.body_length() {
        Some(len) if len > max_body_bytes => None,
        _ => read_body(request.as_reader(), max_body_bytes)?,
    };

    let body = match body {
        Some(body) => body,
        None => {
            warn!("refused a body over {} bytes on {}", max_body_bytes, request.url());
            let reply = json!({
                "error": format!("request body exceeds {} bytes", max_body_bytes)
            });
            return send(request, 413, &reply);
        }
    };

    let request_id = request
        .headers()
        .iter()
        .find(|header| header.field.equiv(REQUEST_ID_HEADER))
        .map(|header| header.value.as_str().to_owned());

    let (status, reply) = route(model, request.method(), request.url(), &body, request_id);
    send(request, status, &reply)
}

fn send(request: Request, status: u16, reply: &JsonValue) -> io::Result<()> {
    let mut response = Response::from_string(reply.to_string()).with_status_code(status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        response.add_header(header);
    }

    request.respond(response)
}

/// Read at most `limit` bytes; `None` if the body is longer.
fn read_body(reader: impl Read, limit: usize) -> io::Result<Option<Vec<u8>>> {
    let mut body = Vec::new();
    reader
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut body)?;

    Ok(if body.len() > limit { None } else { Some(body) })
}

/// Answer one request; returns the status code and JSON body.
pub(crate) fn route(
    model: &dyn Invocable,
    method: &Method,
    url: &str,
    body: &[u8],
    request_id: Option<String>,
) -> (u16, JsonValue) {
    let details = model.details();
    let protocol = details.protocol.protocol();
    let path = url.split('?').next().unwrap_or(url);

    if *method == Method::Post && path == protocol.predict_path(&details.name) {
        let ctx = match request_id {
            Some(id) => RequestContext::with_request_id(&details.name, id),
            None => RequestContext::new(&details.name),
        };

        predict(model, &ctx, body)
    } else if *method == Method::Get && path == protocol.status_path(&details.name) {
        match model.ready() {
            Ok(true) => (200, json!({ "name": details.name, "ready": true })),
            Ok(false) => (503, json!({ "name": details.name, "ready": false })),
            Err(e) => (500, error_body(&e)),
        }
    } else {
        (404, json!({ "error": format!("no route for {} {}", method, path) }))
    }
}

fn predict(model: &dyn Invocable, ctx: &RequestContext, body: &[u8]) -> (u16, JsonValue) {
    let args = match serde_json::from_slice::<JsonValue>(body)
        .map_err(|e| {
            TempoError::from(ProtocolError::MalformedEnvelope(format!(
                "body is not JSON: {}",
                e
            )))
        })
        .and_then(|json| model.decode_request(&json))
    {
        Ok(args) => args,
        Err(e) => {
            warn!("rejected request {}: {}", ctx.request_id(), e);
            return (400, error_body(&e));
        }
    };

    match model
        .invoke(ctx, args)
        .and_then(|outputs| model.encode_response(&outputs))
    {
        Ok(reply) => (200, reply),
        Err(e) => {
            warn!("request {} failed: {}", ctx.request_id(), e);
            (500, error_body(&e))
        }
    }
}

fn error_body(error: &TempoError) -> JsonValue {
    json!({ "error": error.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{details::ModelDetails, model::ModelBuilder};
    use tempo_core::prelude::{Arguments, DeclaredType, Kind, ProtocolKind};

    fn echo(protocol: ProtocolKind) -> Arc<dyn Invocable> {
        let details = ModelDetails::new("echo")
            .with_protocol(protocol)
            .with_inputs(DeclaredType::new().with(Kind::Str))
            .with_outputs(DeclaredType::new().with(Kind::Str));

        Arc::new(
            ModelBuilder::new(details)
                .with_fn(|_ctx: &RequestContext, args: Arguments| Ok(args))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn predicts() {
        let model = echo(ProtocolKind::Seldon);
        let (status, reply) = route(
            model.as_ref(),
            &Method::Post,
            "/api/v1.0/predictions",
            br#"{"strData": "hi"}"#,
            None,
        );

        assert_eq!(status, 200);
        assert_eq!(reply["strData"], json!("hi"));
    }

    #[test]
    fn status() {
        let model = echo(ProtocolKind::V2);
        let (status, _) = route(model.as_ref(), &Method::Get, "/v2/models/echo/ready", b"", None);
        assert_eq!(status, 200);
    }

    #[test]
    fn bad_requests() {
        let model = echo(ProtocolKind::V2);

        let (status, reply) = route(model.as_ref(), &Method::Post, "/v2/models/echo/infer", b"{", None);
        assert_eq!(status, 400);
        assert!(reply["error"].is_string());

        let (status, reply) = route(
            model.as_ref(),
            &Method::Post,
            "/v2/models/echo/infer",
            &[0xff, 0xfe, b'{'],
            None,
        );
        assert_eq!(status, 400);
        assert!(reply["error"].as_str().unwrap().contains("not JSON"));

        let (status, _) = route(
            model.as_ref(),
            &Method::Post,
            "/v2/models/echo/infer",
            br#"{"outputs": []}"#,
            None,
        );
        assert_eq!(status, 400);
    }

    #[test]
    fn failing_prediction() {
        let model: Arc<dyn Invocable> = Arc::new(
            ModelBuilder::new(ModelDetails::new("broken"))
                .with_fn(|_ctx: &RequestContext, _args: Arguments| Err(anyhow::anyhow!("boom")))
                .build()
                .unwrap(),
        );

        let body = br#"{"inputs": [{"name": "x", "datatype": "FP32", "shape": [1], "data": [1.0]}]}"#;
        let (status, reply) = route(model.as_ref(), &Method::Post, "/v2/models/broken/infer", body, None);
        assert_eq!(status, 500);
        assert!(reply["error"].as_str().unwrap().contains("boom"));
    }

    #[test]
    fn unknown_route() {
        let model = echo(ProtocolKind::V2);
        let (status, _) = route(model.as_ref(), &Method::Get, "/nope", b"", None);
        assert_eq!(status, 404);

        let (status, _) = route(model.as_ref(), &Method::Get, "/v2/models/echo/infer", b"", None);
        assert_eq!(status, 404);
    }

    #[test]
    fn body_limit() {
        let body = read_body(&b"0123456789"[..], 10).unwrap();
        assert_eq!(body.as_deref(), Some(&b"0123456789"[..]));

        assert_eq!(read_body(&b"0123456789!"[..], 10).unwrap(), None);
        assert_eq!(read_body(&b""[..], 0).unwrap(), Some(vec![]));
    }
}
