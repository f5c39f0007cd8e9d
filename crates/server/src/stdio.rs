//! Newline-delimited JSON-RPC transport over stdin/stdout.

use std::sync::Arc;

use protocol::{JsonRpcError, JsonRpcResponse, RequestId};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::error::Result;
use crate::server::Server;

/// Default maximum accepted request line (1 MiB).
/// Sized for large argument payloads.
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Serve requests from stdin until EOF, writing responses to stdout.
///
/// Each request runs on its own task; response lines serialize through a
/// shared writer, so responses may interleave out of request order (the
/// request id pairs them back up). Logging goes to stderr; stdout
/// carries nothing but protocol frames.
pub async fn serve(server: Arc<Server>, max_request_bytes: usize) -> Result<()> {
    let stdin = BufReader::new(io::stdin());
    let stdout = Arc::new(Mutex::new(io::stdout()));

    info!(name = %server.name(), "serving on stdio");

    let mut tasks = JoinSet::new();
    let mut lines = stdin.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if line.len() > max_request_bytes {
            let rpc_error = JsonRpcError::invalid_request(format!(
                "request of {} bytes exceeds limit of {max_request_bytes}",
                line.len()
            ));
            let response = JsonRpcResponse::error(RequestId::Null, rpc_error);
            write_line(&stdout, &serde_json::to_string(&response)?).await;
            continue;
        }

        let server = Arc::clone(&server);
        let stdout = Arc::clone(&stdout);
        tasks.spawn(async move {
            match server.handle_line(&line).await {
                Ok(Some(response)) => write_line(&stdout, &response).await,
                Ok(None) => {}
                Err(e) => error!(error = %e, "failed to handle request"),
            }
        });
    }

    // EOF: let in-flight invocations finish before shutting down.
    while tasks.join_next().await.is_some() {}
    info!("stdin closed, shutting down");
    Ok(())
}

async fn write_line(stdout: &Mutex<Stdout>, line: &str) {
    let mut stdout = stdout.lock().await;
    let write = async {
        stdout.write_all(line.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await
    };
    if let Err(e) = write.await {
        error!(error = %e, "failed to write response");
    }
}
