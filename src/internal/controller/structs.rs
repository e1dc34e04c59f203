pub mod download_controller;
pub mod download_event;
pub mod download_status;
pub mod download_task;
pub mod listener_adapters;
pub mod progress_gate;

// 重导出公共类型
pub use download_controller::DownloadController;
pub use download_status::DownloadStatus;
pub use download_task::DownloadTask;
pub use listener_adapters::CallbackListener;
