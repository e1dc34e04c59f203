use super::download_progress::DownloadProgress;

/// 单次传输的内部状态，只由拉流循环修改，下载结束即丢弃。
#[derive(Debug)]
pub(crate) struct DownloadState {
    pub(crate) bytes_transferred: u64,
    /// 服务器声明的总大小；未声明或为 0 时为 `None`
    pub(crate) total_bytes: Option<u64>,
    pub(crate) last_reported_percent: Option<u8>,
}

impl DownloadState {
    pub(crate) fn new(content_length: Option<u64>) -> Self {
        Self {
            bytes_transferred: 0,
            total_bytes: content_length.filter(|&n| n > 0),
            last_reported_percent: None,
        }
    }

    /// 累加一块数据并返回最新进度。
    pub(crate) fn advance(&mut self, len: u64) -> DownloadProgress {
        self.bytes_transferred += len;
        let progress = DownloadProgress {
            bytes_done: self.bytes_transferred,
            total: self.total_bytes,
        };
        if let Some(pct) = progress.percent() {
            self.last_reported_percent = Some(pct);
        }
        progress
    }
}
