//! # Infrastructure Common
//!
//! 这个 crate 提供了依赖注入容器与启动模块管理共用的基础类型。
//!
//! ## 核心类型
//!
//! - [`Identifier`] - 绑定与解析使用的标识符
//! - [`Lifetime`] - 绑定生命周期（单例 / 瞬时）
//! - [`ModuleState`] - 启动模块状态机
//! - [`Scope`] / [`ScopeGuard`] - 作用域与作用域守卫
//! - [`ContainerConfig`] - 容器配置
//! - [`DependencyError`] / [`BootError`] - 错误类型
//!
//! ## 设计原则
//!
//! - 显式注册替代运行时反射
//! - 错误原样向上传播，不做静默恢复

pub mod configuration;
pub mod errors;
pub mod identifier;
pub mod lifecycle;

pub use configuration::*;
pub use errors::*;
pub use identifier::*;
pub use lifecycle::*;
