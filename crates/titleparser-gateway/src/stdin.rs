//! One-shot mode: read a single record, resolve it, write it back.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use titleparser_resolver::Dispatcher;
use tracing::debug;

use crate::error::Result;
use crate::model::TitleRecord;

/// Reads one JSON [`TitleRecord`] from `input` and writes the populated
/// record to `output` as a single line.
///
/// Fails only when the input cannot be read or parsed, or the output cannot
/// be written; a failed resolution is reported inside the record.
pub async fn run<R, W>(
    dispatcher: &Dispatcher,
    mut input: R,
    mut output: W,
) -> Result<TitleRecord>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut raw = Vec::new();
    input.read_to_end(&mut raw).await?;
    let record: TitleRecord = serde_json::from_slice(&raw)?;
    debug!(url = %record.url, "Read query from stdin");

    let response = TitleRecord::from(dispatcher.handle(record.query()).await);

    let mut line = serde_json::to_vec(&response)?;
    line.push(b'\n');
    output.write_all(&line).await?;
    output.flush().await?;

    Ok(response)
}
