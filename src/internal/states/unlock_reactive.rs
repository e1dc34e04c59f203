//! # UnlockReactiveProperty
//!
//! 基于 [`tokio::sync::watch`] 的轻量响应式属性，读写都不阻塞，
//! 适合下载进度这种高频更新的场景。
//!
//! ## 使用示例
//! ```rust,no_run
//! use update_downloader::states::unlock_reactive::UnlockReactiveProperty;
//!
//! let prop = UnlockReactiveProperty::new(0u64);
//! prop.update(1024);
//! assert_eq!(prop.get_current(), Some(1024));
//! ```

pub use super::reactive_core::{PropertyWatcher, ReactivePropertyError as UnlockReactivePropertyError};

/// 轻量级响应式属性容器（无条件等待能力）。
pub type UnlockReactiveProperty<T> = super::reactive_core::ReactiveProperty<T>;
