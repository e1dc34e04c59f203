//! 传输领域模块：建立连接、分块拉流、计算进度、检查取消、写临时文件。
//!
//! 入口为 [`TransferEngine::run`](transfer_engine::TransferEngine::run)，一般由
//! [`DownloadController`](crate::DownloadController) 在后台任务中调用。

pub mod structs;
pub mod traits;
pub mod transfer_engine;
