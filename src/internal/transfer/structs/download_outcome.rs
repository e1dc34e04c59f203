use std::path::{Path, PathBuf};

use super::download_error::DownloadError;

/// 一次下载的最终结果，每次 `start` 恰好产生一个。
///
/// 区分“失败”和“被取消”；只关心成败时用 [`DownloadOutcome::succeeded`]。
#[derive(Debug)]
pub enum DownloadOutcome {
    /// 文件已完整保存到目标路径
    Succeeded { destination: PathBuf },
    /// 连接、TLS、读写或转正失败
    Failed {
        destination: PathBuf,
        error: DownloadError,
    },
    /// 调用方取消，目标文件不会被创建
    Cancelled { destination: PathBuf },
}

impl DownloadOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    pub fn destination(&self) -> &Path {
        match self {
            Self::Succeeded { destination }
            | Self::Failed { destination, .. }
            | Self::Cancelled { destination } => destination,
        }
    }

    /// 失败原因；成功或取消时为 `None`。
    pub fn error(&self) -> Option<&DownloadError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
