//! 下载相关错误类型。

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("URL 格式错误: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("保存路径无效: {}", .0.display())]
    InvalidDestination(PathBuf),

    #[error("TLS 初始化失败: {0}")]
    TlsSetup(String),

    #[error("HTTP 请求失败: {0}")]
    Connection(reqwest::Error),

    #[error("服务器返回错误状态: {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("读取响应流失败: {0}")]
    Stream(reqwest::Error),

    #[error("创建目录失败: {0}")]
    CreateDir(std::io::Error),

    #[error("创建文件失败: {0}")]
    CreateFile(std::io::Error),

    #[error("写入文件失败: {0}")]
    WriteFile(std::io::Error),

    #[error("临时文件转正失败: {0}")]
    Finalize(#[from] FinalizeError),

    #[error("下载被取消")]
    Cancelled,

    #[error("已有下载任务在进行中")]
    AlreadyRunning,

    #[error("当前上下文没有 tokio 运行时")]
    NoRuntime,

    #[error("下载任务异常退出: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("下载任务未发送结束事件就退出了")]
    WorkerExited,
}

/// 临时文件转正（重命名 / 复制）失败。
#[derive(Debug, Error)]
pub enum FinalizeError {
    #[error("复制失败: {0}")]
    Copy(std::io::Error),

    #[error("重命名失败: {rename}；复制也失败: {copy}")]
    RenameAndCopy {
        rename: std::io::Error,
        copy: std::io::Error,
    },
}
