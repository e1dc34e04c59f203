//! 下载控制器
//!
//! 一个控制器同一时间只跑一个下载：
//!
//! - `start` 在当前 tokio 运行时上派生后台任务执行 [`TransferEngine::run`]，返回 [`DownloadTask`]；
//! - 后台任务把进度（已节流）与结束结果推进事件队列，调用方 `wait()` 时在自己的任务里回调监听器；
//! - `cancel` 只设置原子取消标志，下载在下一块数据之前停下；
//! - 已有下载在进行中时再次 `start` 返回 [`DownloadError::AlreadyRunning`]。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::runtime::Handle;

use crate::internal::controller::traits::DownloadListener;
use crate::internal::states::event_queue::EventQueue;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;
use crate::internal::transfer::structs::{
    CancelFlag, DownloadError, DownloadOutcome, DownloadProgress, DownloadRequest,
    TransferConfig,
};
use crate::internal::transfer::traits::ProgressSink;
use crate::internal::transfer::transfer_engine::TransferEngine;
use crate::internal::trust::structs::TrustAll;
use crate::internal::trust::traits::TrustPolicy;

use super::download_event::DownloadEvent;
use super::download_status::DownloadStatus;
use super::download_task::DownloadTask;

#[derive(Debug)]
pub struct DownloadController {
    config: TransferConfig,
    trust_policy: Arc<dyn TrustPolicy>,
    cancel: CancelFlag,
    /// 是否有下载在进行中，由后台任务结束时清除
    in_flight: Arc<AtomicBool>,
    progress_state: UnlockReactiveProperty<DownloadProgress>,
    status: UnlockReactiveProperty<DownloadStatus>,
}

impl Default for DownloadController {
    fn default() -> Self {
        Self::new()
    }
}

/// 构建与配置
impl DownloadController {
    /// 默认配置 + [`TrustAll`] 信任策略。
    pub fn new() -> Self {
        Self {
            config: TransferConfig::default(),
            trust_policy: Arc::new(TrustAll),
            cancel: CancelFlag::new(),
            in_flight: Arc::new(AtomicBool::new(false)),
            progress_state: UnlockReactiveProperty::new(DownloadProgress::default()),
            status: UnlockReactiveProperty::new(DownloadStatus::Idle),
        }
    }

    /// 替换传输配置；对之后的 `start` 生效。
    pub fn with_config(mut self, config: TransferConfig) -> Self {
        self.config = config;
        self
    }

    /// 替换 HTTPS 信任策略；对之后的 `start` 生效。
    pub fn with_trust_policy(mut self, trust_policy: Arc<dyn TrustPolicy>) -> Self {
        self.trust_policy = trust_policy;
        self
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }
}

/// 外部接口
impl DownloadController {
    /// 开始一次下载，必须在 tokio 运行时内调用。
    pub fn start<L>(
        &self,
        request: DownloadRequest,
        listener: L,
    ) -> Result<DownloadTask<L>, DownloadError>
    where
        L: DownloadListener,
    {
        let runtime = Handle::try_current().map_err(|_| DownloadError::NoRuntime)?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!(
                "已有下载在进行中，拒绝新的请求: url={}, dest={}",
                request.source_url(),
                request.destination().display()
            );
            return Err(DownloadError::AlreadyRunning);
        }
        let flight = FlightGuard(Arc::clone(&self.in_flight));

        self.cancel.reset();
        self.progress_state.update(DownloadProgress::default());
        self.status.update(DownloadStatus::Running);

        let (events, consumer) = EventQueue::new();
        let engine = TransferEngine::new(self.config.clone(), Arc::clone(&self.trust_policy));
        let mut sink = QueueSink::new(
            events.clone(),
            self.progress_state.clone(),
            self.config.indeterminate_report_step,
        );
        let cancel = self.cancel.clone();
        let status = self.status.clone();
        let destination = request.destination().to_path_buf();

        let worker = runtime.spawn(async move {
            let outcome = engine.run(&request, &mut sink, &cancel).await;
            status.update(DownloadStatus::from(&outcome));
            // 先清除进行中标志再发结束事件
            drop(flight);
            let _ = events.send(DownloadEvent::Finished(outcome));
        });

        Ok(DownloadTask::new(
            consumer,
            listener,
            self.cancel.clone(),
            worker,
            destination,
            self.status.clone(),
            Arc::clone(&self.in_flight),
        ))
    }

    /// 开始下载并等待结束，返回最终结果。
    pub async fn download<L>(
        &self,
        request: DownloadRequest,
        listener: L,
    ) -> Result<DownloadOutcome, DownloadError>
    where
        L: DownloadListener,
    {
        Ok(self.start(request, listener)?.wait().await)
    }

    /// 请求取消当前下载。没有下载在进行时无效果（下一次 `start` 会清除标志）。
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// 取消句柄，可交给别的任务或监听器使用。
    pub fn cancel_handle(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// 下载进度；返回可共享句柄，`.watch()` 后 `changed().await` 监听。
    pub fn progress(&self) -> UnlockReactiveProperty<DownloadProgress> {
        self.progress_state.clone()
    }

    /// 下载状态；返回可共享句柄。
    pub fn status(&self) -> UnlockReactiveProperty<DownloadStatus> {
        self.status.clone()
    }
}

/// 后台任务结束（含 panic 展开）时清除进行中标志。
struct FlightGuard(Arc<AtomicBool>);

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 后台任务一侧的进度接收端：每块都刷新响应式进度，
/// 但只在百分比变化（或不确定进度累计满一步）时往事件队列里推。
struct QueueSink {
    events: EventQueue<DownloadEvent>,
    progress_state: UnlockReactiveProperty<DownloadProgress>,
    last_percent: Option<u8>,
    indeterminate_step: u64,
    next_indeterminate_report: u64,
}

impl QueueSink {
    fn new(
        events: EventQueue<DownloadEvent>,
        progress_state: UnlockReactiveProperty<DownloadProgress>,
        indeterminate_step: u64,
    ) -> Self {
        Self {
            events,
            progress_state,
            last_percent: None,
            indeterminate_step: indeterminate_step.max(1),
            next_indeterminate_report: 0,
        }
    }
}

impl ProgressSink for QueueSink {
    fn on_progress(&mut self, progress: DownloadProgress) {
        self.progress_state.update(progress);

        let forward = match progress.percent() {
            Some(percent) => {
                let changed = self.last_percent != Some(percent);
                self.last_percent = Some(percent);
                changed
            }
            None if progress.bytes_done >= self.next_indeterminate_report => {
                self.next_indeterminate_report =
                    progress.bytes_done.saturating_add(self.indeterminate_step);
                true
            }
            None => false,
        };

        if forward {
            let _ = self.events.send(DownloadEvent::Progress(progress));
        }
    }
}
