//! # 内核组合层
//!
//! 这个 crate 将容器、启动模块管理器、配置和日志组合成一个可运行的内核。
//!
//! ## 主要功能
//!
//! - **内核构建器**: 使用构建者模式注册启动模块和钩子
//! - **内核配置**: 通过配置文件和 `LORN__` 环境变量加载
//! - **日志初始化**: 基于 `tracing-subscriber`
//!
//! ## 基本使用
//!
//! ```rust
//! use bootload::BootloaderDefinition;
//! use di_abstractions::TypeDescriptor;
//! use infrastructure_composition::Kernel;
//!
//! struct HttpBootloader;
//!
//! let kernel = Kernel::builder()
//!     .register(BootloaderDefinition::new(
//!         TypeDescriptor::builder::<HttpBootloader>().build(|_| Ok(HttpBootloader)),
//!     ))
//!     .load_type::<HttpBootloader>()
//!     .build()?;
//!
//! assert_eq!(kernel.bootloader().classes().len(), 1);
//! assert!(kernel.settings().validate_bootloaders);
//! # Ok::<(), infrastructure_common::InfrastructureError>(())
//! ```

pub mod builder;
pub mod kernel;
pub mod settings;

#[cfg(test)]
mod tests;

// 重新导出主要类型
pub use builder::KernelBuilder;
pub use kernel::Kernel;
pub use settings::{KernelSettings, LoggingConfig};

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
