pub mod cancel_flag;
pub mod download_error;
pub mod download_outcome;
pub mod download_progress;
pub mod download_request;
pub mod download_state;
pub mod transfer_config;

// 重导出公共类型
pub use cancel_flag::CancelFlag;
pub use download_error::{DownloadError, FinalizeError};
pub use download_outcome::DownloadOutcome;
pub use download_progress::DownloadProgress;
pub use download_request::DownloadRequest;
pub use transfer_config::{PromoteStrategy, TransferConfig};
