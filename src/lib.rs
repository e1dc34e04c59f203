/// 内部实现模块
mod internal;


/// 导出核心入口
pub use internal::controller::structs::{DownloadController, DownloadStatus, DownloadTask};
pub use internal::controller::traits::DownloadListener;
pub use internal::transfer::structs::{DownloadOutcome, DownloadRequest};

/// HTTPS 信任策略，默认 [`TrustAll`](trust::TrustAll)
pub mod trust {
    use crate::internal;
    pub use internal::trust::structs::*;
    pub use internal::trust::traits::*;
}

/// 传输引擎及其数据类型，可脱离控制器单独使用
pub mod transfer {
    use crate::internal;
    pub use internal::transfer::structs::transfer_config::{
        DEFAULT_BUFFER_SIZE, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_INDETERMINATE_REPORT_STEP,
        DEFAULT_MAX_REDIRECTS, DEFAULT_READ_TIMEOUT_MS, DEFAULT_TEMP_FILE_NAME,
    };
    pub use internal::transfer::structs::*;
    pub use internal::transfer::traits::*;
    pub use internal::transfer::transfer_engine::TransferEngine;
}

pub mod finalizer {
    use crate::internal;
    pub use internal::finalizer::*;
}

pub mod controller {
    use crate::internal;
    pub use internal::controller::structs::*;
    pub use internal::controller::traits::*;
}

pub mod states {
    pub mod unlock_reactive {
        use crate::internal;
        pub use internal::states::unlock_reactive::*;
    }
}
