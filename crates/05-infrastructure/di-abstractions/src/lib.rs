//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义绑定注册和依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`Binding`] - 标识符的解析策略（具体类型 / 工厂 / 共享实例 / 别名）
//! - [`Callable`] / [`Parameter`] - 显式声明的可注入调用签名
//! - [`TypeDescriptor`] / [`Injectable`] - 可构造类型的描述符，替代运行时反射
//! - [`BindingRegistry`] - 绑定注册表接口
//! - [`Resolver`] - 依赖解析器接口
//! - [`DiContainer`] - 容器外观接口

pub mod binding;
pub mod callable;
pub mod container;
pub mod descriptor;
pub mod registry;
pub mod resolver;

pub use binding::*;
pub use callable::*;
pub use container::*;
pub use descriptor::*;
pub use registry::*;
pub use resolver::*;
