//! The WebSocket endpoint.
//!
//! One socket, one job at a time: each text frame is a job request,
//! each reply is a plain-text status message. Jobs run on the blocking
//! pool so a long inference never stalls the accept loop.

use crate::config::ServerConfig;
use crate::job::JobRequest;
use crate::orchestrator::Orchestrator;
use crate::runner::ProcessRunner;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use ortho_model::DeviceInventory;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Reply message when a frame is not valid JSON.
pub const INVALID_JSON: &str = "Invalid JSON format.";
/// Reply message when the job fails input validation.
pub const INVALID_INPUT: &str = "Invalid input or output directory.";
/// Reply message when every side of the job succeeded.
pub const SUCCESS: &str = "Inference completed successfully.";

/// The reply envelope sent for every job frame.
#[derive(Debug, Serialize)]
struct JobReply<'a> {
    status: &'static str,
    message: &'a str,
}

fn reply(status: &'static str, message: &str) -> String {
    serde_json::to_string(&JobReply { status, message })
        .unwrap_or_else(|_| format!("{{\"status\":\"{status}\"}}"))
}

/// Serve the WebSocket endpoint until the process is signalled.
///
/// # Errors
///
/// Binding or serving failures from the runtime.
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let addr = config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening for segmentation jobs");
    axum::serve(listener, router(Arc::new(config)))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// The route table: a single WebSocket upgrade at the root.
pub fn router(config: Arc<ServerConfig>) -> Router {
    Router::new()
        .route("/", any(ws_upgrade))
        .with_state(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "cannot listen for shutdown signal");
    } else {
        info!("shutdown signal received");
    }
}

async fn ws_upgrade(ws: WebSocketUpgrade, State(config): State<Arc<ServerConfig>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, config))
}

async fn handle_socket(mut socket: WebSocket, config: Arc<ServerConfig>) {
    while let Some(Ok(message)) = socket.recv().await {
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let job_config = Arc::clone(&config);
        let reply = match tokio::task::spawn_blocking(move || {
            handle_message(&job_config, text.as_str())
        })
        .await
        {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "job task aborted");
                reply("error", &format!("job aborted: {e}"))
            }
        };

        if socket.send(Message::Text(reply.into())).await.is_err() {
            break;
        }
    }
}

/// Handle one job frame and produce the JSON reply envelope
/// (`{"status": "success"|"error", "message": ...}`).
///
/// Runs the whole job synchronously; callers put it on a blocking
/// thread.
#[must_use]
pub fn handle_message(config: &ServerConfig, text: &str) -> String {
    let request: JobRequest = match serde_json::from_str(text) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "rejected frame");
            return reply("error", INVALID_JSON);
        }
    };

    let devices = config
        .devices
        .map_or_else(DeviceInventory::detect, DeviceInventory::with_count);
    let runner = ProcessRunner::new(config.model.clone(), config.worker_binary.clone());
    let orchestrator = Orchestrator::new(runner, devices);

    match orchestrator.run(request) {
        Ok(()) => reply("success", SUCCESS),
        Err(e) if e.is_invalid_input() => {
            warn!(error = %e, "rejected job");
            reply("error", INVALID_INPUT)
        }
        Err(e) => {
            error!(error = %e, "job failed");
            reply("error", &e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_reply(text: &str) -> (String, String) {
        let value: serde_json::Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => panic!("reply was not JSON: {e}"),
        };
        (
            value["status"].as_str().unwrap_or_default().to_owned(),
            value["message"].as_str().unwrap_or_default().to_owned(),
        )
    }

    #[test]
    fn malformed_frame_is_invalid_json() {
        let config = ServerConfig::default();
        for frame in ["{not json", "[1, 2]"] {
            let (status, message) = parse_reply(&handle_message(&config, frame));
            assert_eq!(status, "error");
            assert_eq!(message, INVALID_JSON);
        }
    }

    #[test]
    fn empty_job_is_invalid_input() {
        let config = ServerConfig::default();
        let (status, message) = parse_reply(&handle_message(
            &config,
            r#"{"lower_scan": "null", "upper_scan": "null", "output_dir": "/tmp/out"}"#,
        ));
        assert_eq!(status, "error");
        assert_eq!(message, INVALID_INPUT);
    }

    #[test]
    fn nonexistent_scan_is_invalid_input() {
        let config = ServerConfig::default();
        let (status, message) = parse_reply(&handle_message(
            &config,
            r#"{"lower_scan": "/nonexistent/scan.obj", "output_dir": "/tmp/out"}"#,
        ));
        assert_eq!(status, "error");
        assert_eq!(message, INVALID_INPUT);
    }

    #[test]
    fn missing_checkpoints_surface_their_own_message() {
        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("tempdir: {e}"),
        };
        let scan = dir.path().join("014_lower.obj");
        if let Err(e) = std::fs::write(&scan, "v 0 0 0\n") {
            panic!("write: {e}");
        }
        let config = ServerConfig::default();
        let frame = format!(
            r#"{{"lower_scan": "{}", "output_dir": "{}"}}"#,
            scan.display(),
            dir.path().join("out").display()
        );
        let (status, message) = parse_reply(&handle_message(&config, &frame));
        assert_eq!(status, "error");
        assert!(message.contains("checkpoint"), "got: {message}");
    }
}
