//! TLS 信任策略领域模块：决定 HTTPS 连接时如何判定证书链与主机名。
//!
//! 使用方式：`DownloadController::new().with_trust_policy(Arc::new(PinnedRootsTrust::new(roots)?))`，
//! 不设置时默认 [`TrustAll`](structs::TrustAll)。

pub mod structs;
pub mod traits;
