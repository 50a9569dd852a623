//! # Bootload
//!
//! 启动模块管理：按依赖顺序初始化模块，再统一执行启动阶段。
//!
//! ## 核心类型
//!
//! - [`BootloaderDefinition`] - 模块定义（依赖、绑定、阶段方法）
//! - [`Phases`] / [`PhaseMethod`] - 模块实现的可选阶段
//! - [`BootloadManager`] - 两阶段加载管理器
//!
//! ## 加载顺序
//!
//! 1. 按请求顺序深度优先初始化模块，依赖先于被依赖者
//! 2. 执行 pre-boot 钩子
//! 3. 按初始化顺序执行各模块的启动阶段
//! 4. 执行 post-boot 钩子

pub mod definition;
mod graph;
pub mod manager;

pub use definition::{BootloaderDefinition, DependsFn, PhaseFn, PhaseMethod, Phases};
pub use manager::BootloadManager;
