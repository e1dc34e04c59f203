use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// 一次下载请求：来源 URL + 本地保存路径，创建后不可变。
///
/// 反序列化同样经过 [`DownloadRequest::new`]，从配置读入的 URL 也会补全协议头。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDownloadRequest")]
pub struct DownloadRequest {
    source_url: String,
    destination: PathBuf,
}

impl DownloadRequest {
    /// 没有 `http://` 或 `https://` 前缀的 URL 会补上 `http://`。
    pub fn new(source_url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source_url: normalize_scheme(source_url.into()),
            destination: destination.into(),
        }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// 反序列化的原始形态，字段与 [`DownloadRequest`] 一致。
#[derive(Deserialize)]
struct RawDownloadRequest {
    source_url: String,
    destination: PathBuf,
}

impl From<RawDownloadRequest> for DownloadRequest {
    fn from(raw: RawDownloadRequest) -> Self {
        Self::new(raw.source_url, raw.destination)
    }
}

fn normalize_scheme(url: String) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url
    } else {
        format!("http://{url}")
    }
}
