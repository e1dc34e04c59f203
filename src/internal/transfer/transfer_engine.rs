//! 传输引擎
//!
//! 负责一次下载的完整传输过程：
//!
//! 1. 解析（已补全协议头的）URL，按配置与信任策略建立连接；
//! 2. 解析目标路径与同目录下的临时文件，清理残留文件；
//! 3. 按块拉取响应体写入临时文件，每块之间检查取消标志并上报进度；
//! 4. 正常读完后交给 [`FileFinalizer`] 转正。
//!
//! 任何错误都在引擎边界被记录并折叠成 [`DownloadOutcome::Failed`]，不会向调用方抛出。
//! 连接、响应流、文件句柄都是局部所有权，任何退出路径上都会随 drop 释放。
//!
//! ## 内部实现说明
//!
//! - `connection` 子模块：构建客户端并发起请求
//! - `paths` 子模块：目标路径与临时文件路径
//! - `stream_to_temp` 子模块：分块拉流写临时文件

mod connection;
mod paths;
mod stream_to_temp;

use std::sync::Arc;

use url::Url;

use crate::internal::finalizer::{FileFinalizer, PromoteMethod};
use crate::internal::trust::structs::TrustAll;
use crate::internal::trust::traits::TrustPolicy;

use super::structs::download_state::DownloadState;
use super::structs::{
    CancelFlag, DownloadError, DownloadOutcome, DownloadRequest, TransferConfig,
};
use super::traits::ProgressSink;
use paths::TransferPaths;

/// 传输引擎：配置 + 信任策略 + 转正器，可被多次 `run`，彼此之间不共享状态。
#[derive(Debug, Clone)]
pub struct TransferEngine {
    config: TransferConfig,
    trust_policy: Arc<dyn TrustPolicy>,
    finalizer: FileFinalizer,
}

impl Default for TransferEngine {
    fn default() -> Self {
        Self::new(TransferConfig::default(), Arc::new(TrustAll))
    }
}

impl TransferEngine {
    pub fn new(config: TransferConfig, trust_policy: Arc<dyn TrustPolicy>) -> Self {
        let finalizer = FileFinalizer::from_config(&config);
        Self {
            config,
            trust_policy,
            finalizer,
        }
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// 执行一次下载，返回最终结果。
    ///
    /// 每写完一块数据调用一次 `sink`；`cancel` 在每块数据之前检查。
    pub async fn run(
        &self,
        request: &DownloadRequest,
        sink: &mut dyn ProgressSink,
        cancel: &CancelFlag,
    ) -> DownloadOutcome {
        let destination = request.destination().to_path_buf();
        log::debug!(
            "开始下载: url={}, dest={}",
            request.source_url(),
            destination.display()
        );

        match self.transfer(request, sink, cancel).await {
            Ok(method) => {
                log::debug!(
                    "下载完成: url={}, dest={}, 转正方式={:?}",
                    request.source_url(),
                    destination.display(),
                    method
                );
                DownloadOutcome::Succeeded { destination }
            }
            Err(DownloadError::Cancelled) => {
                log::info!(
                    "下载已取消: url={}, dest={}",
                    request.source_url(),
                    destination.display()
                );
                DownloadOutcome::Cancelled { destination }
            }
            Err(error) => {
                log::warn!(
                    "下载失败: {}, url={}, dest={}",
                    error,
                    request.source_url(),
                    destination.display()
                );
                DownloadOutcome::Failed { destination, error }
            }
        }
    }

    async fn transfer(
        &self,
        request: &DownloadRequest,
        sink: &mut dyn ProgressSink,
        cancel: &CancelFlag,
    ) -> Result<PromoteMethod, DownloadError> {
        let url = Url::parse(request.source_url())?;
        let paths = TransferPaths::resolve(request.destination(), &self.config.temp_file_name)?;

        let client = connection::build_client(&self.config, Arc::clone(&self.trust_policy))?;
        let response = connection::open(&client, url).await?;

        self.finalizer
            .prepare(&paths.temp, &paths.destination)
            .await?;

        let mut state = DownloadState::new(response.content_length());
        let streamed = stream_to_temp::stream_to_temp(
            response,
            &paths.temp,
            self.config.effective_buffer_size(),
            &mut state,
            sink,
            cancel,
        )
        .await;

        if let Err(e) = streamed {
            self.finalizer.discard(&paths.temp).await;
            return Err(e);
        }

        log::debug!(
            "数据接收完毕: {} 字节, 总大小 {:?}, 最后进度 {:?}",
            state.bytes_transferred,
            state.total_bytes,
            state.last_reported_percent
        );

        let promoted = self
            .finalizer
            .promote(&paths.temp, &paths.destination)
            .await;
        if promoted.is_err() {
            self.finalizer.discard(&paths.temp).await;
        }
        Ok(promoted?)
    }
}
