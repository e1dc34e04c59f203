use std::time::Duration;

use serde::{Deserialize, Serialize};

/// 默认连接超时（毫秒）
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 12_000;

/// 默认读超时（毫秒）
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 12_000;

/// 每次读写的块大小：1KB
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// 临时文件名，位于目标文件同目录下
pub const DEFAULT_TEMP_FILE_NAME: &str = "apk_temp";

/// 默认最多跟随的重定向次数
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// 总大小未知时，每累计多少字节上报一次不确定进度：64KB
pub const DEFAULT_INDETERMINATE_REPORT_STEP: u64 = 64 * 1024;

/// 临时文件转正方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoteStrategy {
    /// 先原子重命名，失败再复制
    #[default]
    RenameThenCopy,
    /// 直接复制（已知临时目录与目标不在同一卷时使用）
    CopyOnly,
}

/// 传输配置，可由宿主应用从配置文件反序列化，缺省字段取默认值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    /// 每块读写的最大字节数
    pub buffer_size: usize,
    pub temp_file_name: String,
    /// 是否发送 `Connection: Keep-Alive`
    pub keep_alive: bool,
    pub max_redirects: usize,
    pub indeterminate_report_step: u64,
    pub promote_strategy: PromoteStrategy,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            buffer_size: DEFAULT_BUFFER_SIZE,
            temp_file_name: DEFAULT_TEMP_FILE_NAME.to_string(),
            keep_alive: true,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            indeterminate_report_step: DEFAULT_INDETERMINATE_REPORT_STEP,
            promote_strategy: PromoteStrategy::default(),
        }
    }
}

impl TransferConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// 块大小，至少为 1。
    pub(crate) fn effective_buffer_size(&self) -> usize {
        self.buffer_size.max(1)
    }
}
