//! 下载监听器：进度与结束回调。

use std::path::Path;

use crate::internal::transfer::structs::DownloadOutcome;

/// 下载监听器，由调用方实现。
///
/// 回调都在调用 [`DownloadTask::wait`](crate::DownloadTask::wait) 的任务上执行，
/// 不会跨线程，所以不要求 `Send`/`Sync`，UI 侧可以直接改状态。
pub trait DownloadListener {
    /// 下载进度（0～100），只在比上一次更大时回调。
    fn on_downloading(&mut self, percent: u8);

    /// 服务器没有给出文件大小时，改为回调已下载字节数。
    fn on_progress_indeterminate(&mut self, _bytes_done: u64) {}

    /// 下载结束（成功 / 失败 / 取消都会回调，取消视为失败）。
    fn on_download_finish(&mut self, succeeded: bool, destination: &Path);

    /// 结束回调的完整版本，可以区分失败原因与取消；默认转给 [`on_download_finish`](Self::on_download_finish)。
    /// 每次下载只会调用一次。
    fn on_outcome(&mut self, outcome: &DownloadOutcome) {
        self.on_download_finish(outcome.succeeded(), outcome.destination());
    }
}
