use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;

use crate::internal::controller::traits::DownloadListener;
use crate::internal::states::event_queue::EventConsumer;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;
use crate::internal::transfer::structs::{
    CancelFlag, DownloadError, DownloadOutcome, DownloadProgress,
};

use super::download_event::DownloadEvent;
use super::download_status::DownloadStatus;
use super::progress_gate::ProgressGate;

/// 一次进行中的下载，由 [`DownloadController::start`](super::DownloadController::start) 返回。
///
/// 监听器的回调全部发生在 [`DownloadTask::wait`] 里，也就是调用方自己的任务上。
/// 不调用 `wait` 直接丢弃时，下载仍会在后台跑完，但监听器不会收到任何回调。
pub struct DownloadTask<L: DownloadListener> {
    events: EventConsumer<DownloadEvent>,
    listener: L,
    cancel: CancelFlag,
    worker: JoinHandle<()>,
    gate: ProgressGate,
    destination: PathBuf,
    status: UnlockReactiveProperty<DownloadStatus>,
    /// 控制器的进行中标志，用来判断状态属性是否已归下一次下载
    in_flight: Arc<AtomicBool>,
}

impl<L: DownloadListener> DownloadTask<L> {
    pub(crate) fn new(
        events: EventConsumer<DownloadEvent>,
        listener: L,
        cancel: CancelFlag,
        worker: JoinHandle<()>,
        destination: PathBuf,
        status: UnlockReactiveProperty<DownloadStatus>,
        in_flight: Arc<AtomicBool>,
    ) -> Self {
        Self {
            events,
            listener,
            cancel,
            worker,
            gate: ProgressGate::default(),
            destination,
            status,
            in_flight,
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// 请求取消，与 [`DownloadController::cancel`](super::DownloadController::cancel) 等价。
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// 消费事件直到下载结束：进度去重后回调监听器，最后恰好回调一次结束，并返回结果。
    pub async fn wait(mut self) -> DownloadOutcome {
        while let Some(event) = self.events.recv().await {
            match event {
                DownloadEvent::Progress(progress) => self.forward_progress(progress),
                DownloadEvent::Finished(outcome) => return self.finish(outcome),
            }
        }

        // 队列关闭却没有结束事件：后台任务 panic 或被中止
        let error = match (&mut self.worker).await {
            Err(e) => DownloadError::TaskJoin(e),
            Ok(()) => DownloadError::WorkerExited,
        };
        log::warn!("下载任务异常结束: {}, dest={}", error, self.destination.display());
        // 新的下载已经开始时不覆盖它的状态
        if !self.in_flight.load(Ordering::Acquire) {
            self.status.update(DownloadStatus::Failed);
        }

        let outcome = DownloadOutcome::Failed {
            destination: self.destination.clone(),
            error,
        };
        self.finish(outcome)
    }

    fn forward_progress(&mut self, progress: DownloadProgress) {
        // 取消之后不再回调进度
        if self.cancel.is_cancelled() {
            return;
        }
        match progress.percent() {
            Some(percent) => {
                if self.gate.admit(percent) {
                    self.listener.on_downloading(percent);
                }
            }
            None => self.listener.on_progress_indeterminate(progress.bytes_done),
        }
    }

    fn finish(&mut self, outcome: DownloadOutcome) -> DownloadOutcome {
        self.listener.on_outcome(&outcome);
        outcome
    }
}
