use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 协作式取消标志：控制器写、下载任务在每块数据之间读。
///
/// Clone 得到的是同一个标志。
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消；正在进行的读写不会被打断，下一块数据前生效。
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// 新一轮下载开始前清除上一轮的取消请求。
    pub(crate) fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}
