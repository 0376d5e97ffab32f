//! Browser native messaging: u32 little-endian length prefix + JSON body.
//!
//! stdout carries frames only, so nothing else may write to it while the
//! loop runs.

use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::host::DownloadHost;
use super::message::{RelayRequest, RelayResponse};
use super::queue::{BatchHandle, Pacer};
use super::Relay;

/// Largest frame accepted from the browser.
pub const MAX_INCOMING_FRAME: u32 = 64 * 1024 * 1024;
/// Largest frame browsers accept from a native host.
pub const MAX_OUTGOING_FRAME: usize = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("native messaging I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("frame of {len} bytes exceeds limit of {max}")]
    TooLarge { len: usize, max: usize },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads one frame body. `Ok(None)` on end of input.
pub async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Option<Vec<u8>>, CodecError> {
    let len = match reader.read_u32_le().await {
        Ok(len) => len,
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if len > MAX_INCOMING_FRAME {
        return Err(CodecError::TooLarge {
            len: len as usize,
            max: MAX_INCOMING_FRAME as usize,
        });
    }
    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body).await?;
    Ok(Some(body))
}

/// Serializes `message` and writes it as one frame.
pub async fn write_frame<W: AsyncWrite + Unpin, T: Serialize>(
    writer: &mut W,
    message: &T,
) -> Result<(), CodecError> {
    let body = serde_json::to_vec(message)?;
    if body.len() > MAX_OUTGOING_FRAME {
        return Err(CodecError::TooLarge {
            len: body.len(),
            max: MAX_OUTGOING_FRAME,
        });
    }
    writer.write_u32_le(body.len() as u32).await?;
    writer.write_all(&body).await?;
    writer.flush().await?;
    Ok(())
}

/// Answers frames until the browser closes the pipe, then waits for any
/// batches still running so they are not cut short.
pub async fn serve<H, P, R, W>(relay: &Relay<H, P>, mut reader: R, mut writer: W) -> Result<(), CodecError>
where
    H: DownloadHost,
    P: Pacer,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut batches: Vec<BatchHandle> = Vec::new();

    while let Some(body) = read_frame(&mut reader).await? {
        let response = match serde_json::from_slice::<RelayRequest>(&body) {
            Ok(request) => {
                let (response, batch) = relay.dispatch(request).await;
                batches.extend(batch);
                response
            }
            Err(e) => {
                tracing::warn!("rejecting malformed message: {}", e);
                RelayResponse::failed(format!("malformed message: {e}"))
            }
        };
        write_frame(&mut writer, &response).await?;
        batches.retain(|b| !b.is_finished());
    }

    tracing::info!(pending = batches.len(), "native messaging input closed");
    for batch in batches {
        batch.wait().await;
    }
    Ok(())
}
