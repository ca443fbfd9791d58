// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request loop over a framed byte stream.

use std::time::Duration;

use pp_wire::{ProtocolError, Request, Response};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::analyzer::Analyzer;

/// Serve requests until the peer closes the stream.
///
/// Reads wait indefinitely since the engine host may idle between calls;
/// `timeout` bounds each response write. A frame that does not parse as a
/// request is answered with [`Response::Error`] and the loop continues.
pub async fn serve<R, W>(
    analyzer: &Analyzer,
    mut reader: R,
    mut writer: W,
    timeout: Duration,
) -> Result<(), ProtocolError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        let bytes = match pp_wire::read_message(&mut reader).await {
            Ok(bytes) => bytes,
            Err(ProtocolError::ConnectionClosed) => {
                tracing::debug!("engine host disconnected");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let response = match pp_wire::decode::<Request>(&bytes) {
            Ok(request) => {
                // Properties may hold secrets; log the kind only
                tracing::debug!(request = request_kind(&request), "received request");
                analyzer.handle(request).await
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejecting malformed request");
                Response::Error { message: e.to_string() }
            }
        };

        pp_wire::write_response(&mut writer, &response, timeout).await?;
    }
}

fn request_kind(request: &Request) -> &'static str {
    match request {
        Request::Analyze { .. } => "Analyze",
        Request::AnalyzeStack { .. } => "AnalyzeStack",
        Request::Remediate { .. } => "Remediate",
        Request::GetAnalyzerInfo => "GetAnalyzerInfo",
        Request::GetPluginInfo => "GetPluginInfo",
        Request::Configure { .. } => "Configure",
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
