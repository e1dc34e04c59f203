//! 分块拉流：把响应体按不超过 `buffer_size` 的块写入临时文件。

use std::path::Path;

use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::Response;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::internal::transfer::structs::download_state::DownloadState;
use crate::internal::transfer::structs::{CancelFlag, DownloadError};
use crate::internal::transfer::traits::ProgressSink;

/// 网络层给出的数据块大小不固定，这里再切成不超过 `buffer_size` 的小块，
/// 每一小块之前检查取消、之后上报进度。
pub(super) async fn stream_to_temp(
    response: Response,
    temp: &Path,
    buffer_size: usize,
    state: &mut DownloadState,
    sink: &mut dyn ProgressSink,
    cancel: &CancelFlag,
) -> Result<(), DownloadError> {
    let mut file = File::create(temp)
        .await
        .map_err(DownloadError::CreateFile)?;
    let mut stream = response.bytes_stream();

    while let Some(chunk_result) = stream.next().await {
        let mut chunk: Bytes = chunk_result.map_err(DownloadError::Stream)?;

        while !chunk.is_empty() {
            if cancel.is_cancelled() {
                return Err(DownloadError::Cancelled);
            }

            let piece = chunk.split_to(chunk.len().min(buffer_size));
            file.write_all(&piece)
                .await
                .map_err(DownloadError::WriteFile)?;

            sink.on_progress(state.advance(piece.len() as u64));
        }
    }

    file.flush().await.map_err(DownloadError::WriteFile)?;
    file.sync_all().await.map_err(DownloadError::WriteFile)?;
    Ok(())
}
