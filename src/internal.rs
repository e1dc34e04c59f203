//! 内部实现模块，对外导出以 crate 根下的各模块为准。

pub mod controller;
pub mod finalizer;
pub mod states;
pub mod transfer;
pub mod trust;
