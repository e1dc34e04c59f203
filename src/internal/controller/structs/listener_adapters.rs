//! 闭包适配器：把两个闭包包装成 [`DownloadListener`]。

use std::path::Path;

use crate::internal::controller::traits::DownloadListener;

/// 由「进度」「结束」两个闭包组成的监听器。
pub struct CallbackListener<P, F> {
    on_progress: P,
    on_finish: F,
}

impl<P, F> CallbackListener<P, F>
where
    P: FnMut(u8),
    F: FnMut(bool, &Path),
{
    pub fn new(on_progress: P, on_finish: F) -> Self {
        Self {
            on_progress,
            on_finish,
        }
    }
}

impl<P, F> DownloadListener for CallbackListener<P, F>
where
    P: FnMut(u8),
    F: FnMut(bool, &Path),
{
    fn on_downloading(&mut self, percent: u8) {
        (self.on_progress)(percent);
    }

    fn on_download_finish(&mut self, succeeded: bool, destination: &Path) {
        (self.on_finish)(succeeded, destination);
    }
}
