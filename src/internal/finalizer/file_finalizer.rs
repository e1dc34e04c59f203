//! 临时文件转正：优先原子重命名，失败时分块复制再删除临时文件。
//!
//! 目标文件只会由这里产生：
//! - 重命名成功：目标文件一步到位出现；
//! - 复制成功：目标文件内容与临时文件逐字节一致，临时文件随后被删除；
//! - 复制失败：已写出的半截目标文件会被删除，不留下残缺产物。

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs::{self, File};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

use crate::internal::transfer::structs::{
    DownloadError, FinalizeError, PromoteStrategy, TransferConfig,
};

/// 转正实际走的路径。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoteMethod {
    Renamed,
    Copied,
}

#[derive(Debug, Clone)]
pub struct FileFinalizer {
    /// 复制时每块的字节数
    buffer_size: usize,
    strategy: PromoteStrategy,
}

impl FileFinalizer {
    pub fn new(buffer_size: usize, strategy: PromoteStrategy) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
            strategy,
        }
    }

    pub fn from_config(config: &TransferConfig) -> Self {
        Self::new(config.effective_buffer_size(), config.promote_strategy)
    }

    /// 下载前准备：创建目标目录，删除残留的临时文件与旧目标文件。
    ///
    /// 目录创建失败返回错误；删除失败只记日志，不中止下载。
    pub async fn prepare(
        &self,
        temp: &Path,
        destination: &Path,
    ) -> Result<(), DownloadError> {
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(DownloadError::CreateDir)?;
        }
        remove_stale(temp).await;
        remove_stale(destination).await;
        Ok(())
    }

    /// 把临时文件提升为目标文件。`Ok` 即转正成功。
    pub async fn promote(
        &self,
        temp: &Path,
        destination: &Path,
    ) -> Result<PromoteMethod, FinalizeError> {
        if self.strategy == PromoteStrategy::CopyOnly {
            return self
                .copy_then_remove(temp, destination)
                .await
                .map(|()| PromoteMethod::Copied)
                .map_err(FinalizeError::Copy);
        }

        let rename = match fs::rename(temp, destination).await {
            Ok(()) => return Ok(PromoteMethod::Renamed),
            Err(e) => e,
        };
        log::debug!(
            "重命名失败，改为复制: {} -> {}, {}",
            temp.display(),
            destination.display(),
            rename
        );

        self.copy_then_remove(temp, destination)
            .await
            .map(|()| PromoteMethod::Copied)
            .map_err(|copy| FinalizeError::RenameAndCopy { rename, copy })
    }

    /// 下载失败或取消后尽力删除临时文件。
    pub async fn discard(&self, temp: &Path) {
        remove_stale(temp).await;
    }

    async fn copy_then_remove(
        &self,
        temp: &Path,
        destination: &Path,
    ) -> std::io::Result<()> {
        let source = File::open(temp).await?;
        self.copy_from(source, destination).await?;

        if let Err(e) = fs::remove_file(temp).await {
            log::warn!("复制完成但删除临时文件失败: {}, {}", temp.display(), e);
        }
        Ok(())
    }

    /// 从任意数据源分块复制到目标文件；出错时删除半截的目标文件。
    pub(crate) async fn copy_from<R>(
        &self,
        mut source: R,
        destination: &Path,
    ) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
    {
        let result = self.copy_chunks(&mut source, destination).await;
        if result.is_err() {
            remove_stale(destination).await;
        }
        result.map(|_| ())
    }

    async fn copy_chunks<R>(
        &self,
        source: &mut R,
        destination: &Path,
    ) -> std::io::Result<u64>
    where
        R: AsyncRead + Unpin,
    {
        let mut out = File::create(destination).await?;
        let mut buffer = vec![0u8; self.buffer_size];
        let mut copied: u64 = 0;

        loop {
            let n = source.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            out.write_all(&buffer[..n]).await?;
            copied += n as u64;
        }

        out.flush().await?;
        out.sync_all().await?;
        Ok(copied)
    }
}

async fn remove_stale(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => log::debug!("已删除旧文件: {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => log::warn!("删除文件失败（忽略）: {}, {}", path.display(), e),
    }
}
