use crate::internal::transfer::structs::DownloadOutcome;

/// 下载状态（由下载任务维护，外部只读监听）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DownloadStatus {
    #[default]
    Idle,
    Running,
    Finished,
    Failed,
    Canceled,
}

impl From<&DownloadOutcome> for DownloadStatus {
    fn from(outcome: &DownloadOutcome) -> Self {
        match outcome {
            DownloadOutcome::Succeeded { .. } => Self::Finished,
            DownloadOutcome::Failed { .. } => Self::Failed,
            DownloadOutcome::Cancelled { .. } => Self::Canceled,
        }
    }
}
