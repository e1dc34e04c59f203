use crate::internal::transfer::structs::DownloadProgress;

/// 进度接收端：传输引擎每写完一块数据调用一次。
///
/// 闭包 `FnMut(DownloadProgress)` 自动实现本 trait。
pub trait ProgressSink: Send {
    fn on_progress(&mut self, progress: DownloadProgress);
}

impl<F> ProgressSink for F
where
    F: FnMut(DownloadProgress) + Send,
{
    fn on_progress(&mut self, progress: DownloadProgress) {
        self(progress)
    }
}
