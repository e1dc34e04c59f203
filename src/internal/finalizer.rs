//! 文件转正领域模块：下载前清理旧文件，下载完成后把临时文件提升为目标文件。

pub mod file_finalizer;

pub use file_finalizer::{FileFinalizer, PromoteMethod};
