/// 下载进度：已写入字节数与服务器声明的总大小。
///
/// 总大小未知（没有 Content-Length 或为 0）时 `total` 为 `None`，此时进度为“不确定”，
/// [`DownloadProgress::percent`] 返回 `None`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadProgress {
    /// 已下载的字节数
    pub bytes_done: u64,
    /// 文件总大小（字节），未知时为 `None`
    pub total: Option<u64>,
}

impl DownloadProgress {
    /// 进度百分比 `floor(100 * bytes_done / total)`，上限 100；总大小未知时返回 `None`。
    pub fn percent(&self) -> Option<u8> {
        self.total.filter(|&t| t > 0).map(|t| {
            let pct = (self.bytes_done as u128 * 100) / t as u128;
            pct.min(100) as u8
        })
    }

    pub fn is_indeterminate(&self) -> bool {
        self.percent().is_none()
    }
}
