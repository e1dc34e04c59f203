use crate::internal::transfer::structs::{DownloadOutcome, DownloadProgress};

/// 下载任务推给调用方的事件（通过 EventQueue 传递，FIFO 保证顺序）
#[derive(Debug)]
pub(crate) enum DownloadEvent {
    Progress(DownloadProgress),
    /// 最后一条事件，之后队列关闭
    Finished(DownloadOutcome),
}
