//! 下载控制领域模块：编排一次下载的生命周期。
//!
//! 使用方式：`controller.start(request, listener)?.wait().await`，
//! 或一步到位的 `controller.download(request, listener).await`。

pub mod structs;
pub mod traits;
