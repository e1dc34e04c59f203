//! 目标文件与临时文件路径。

use std::path::{Path, PathBuf};

use crate::internal::transfer::structs::DownloadError;

/// 一次下载涉及的两个路径：目标文件，以及与它同目录的临时文件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TransferPaths {
    pub(crate) destination: PathBuf,
    pub(crate) temp: PathBuf,
}

impl TransferPaths {
    /// 目标路径没有文件名（如 `/`、`..`）时返回 `InvalidDestination`。
    /// 没有父目录的相对路径，临时文件放在当前目录。
    pub(crate) fn resolve(
        destination: &Path,
        temp_file_name: &str,
    ) -> Result<Self, DownloadError> {
        if destination.file_name().is_none() || temp_file_name.is_empty() {
            return Err(DownloadError::InvalidDestination(destination.to_path_buf()));
        }

        let parent = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let temp = parent.join(temp_file_name);

        if temp == destination {
            return Err(DownloadError::InvalidDestination(destination.to_path_buf()));
        }

        Ok(Self {
            destination: destination.to_path_buf(),
            temp,
        })
    }
}
