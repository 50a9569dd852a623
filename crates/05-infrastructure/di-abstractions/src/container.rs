//! 依赖注入容器抽象接口
//!
//! 提供依赖注入容器的核心抽象

use crate::binding::{downcast, Binding, Instance};
use crate::callable::{Arguments, Callable};
use crate::descriptor::{Injectable, TypeDescriptor};
use infrastructure_common::{DependencyResult, Identifier};
use std::sync::Arc;

/// 依赖注入容器 trait
///
/// 对象安全，构造函数、工厂和启动钩子都通过 `&dyn DiContainer` 访问容器。
pub trait DiContainer: Send + Sync {
    /// 注册或覆盖绑定
    fn bind(&self, id: Identifier, binding: Binding);

    /// 注册单例绑定：首次解析成功后缓存为共享实例
    fn bind_singleton(&self, id: Identifier, binding: Binding);

    /// 移除绑定
    fn remove_binding(&self, id: &str) -> Option<Binding>;

    /// 注册可构造类型
    fn define(&self, descriptor: TypeDescriptor);

    /// 是否已注册可构造类型
    fn is_defined(&self, id: &str) -> bool;

    /// 解析标识符
    fn get(&self, id: &str) -> DependencyResult<Instance>;

    /// 使用显式参数解析标识符
    fn make(&self, id: &str, arguments: Arguments) -> DependencyResult<Instance>;

    /// 补齐参数并执行调用
    fn invoke(&self, callable: &Callable, arguments: Arguments) -> DependencyResult<Instance>;

    /// 是否存在绑定（包括别名链）
    fn has(&self, id: &str) -> bool;

    /// 是否已有构造完成的共享实例
    fn has_instance(&self, id: &str) -> bool;
}

/// 容器的类型化便捷方法
pub trait DiContainerExt: DiContainer {
    /// 解析并向下转型
    fn get_as<T: Send + Sync + 'static>(&self, id: &str) -> DependencyResult<Arc<T>> {
        downcast(self.get(id)?, id)
    }

    /// 以类型 `T` 自身为标识符解析
    fn resolve<T: Send + Sync + 'static>(&self) -> DependencyResult<Arc<T>> {
        self.get_as::<T>(&Identifier::of::<T>())
    }

    /// 使用显式参数解析并向下转型
    fn make_as<T: Send + Sync + 'static>(
        &self,
        id: &str,
        arguments: Arguments,
    ) -> DependencyResult<Arc<T>> {
        downcast(self.make(id, arguments)?, id)
    }

    /// 绑定共享实例
    fn bind_instance<T: Send + Sync + 'static>(&self, id: impl Into<Identifier>, value: T) {
        self.bind(id.into(), Binding::shared(value));
    }

    /// 注册可注入类型
    fn define_type<T: Injectable>(&self) {
        self.define(T::descriptor());
    }
}

impl<C: DiContainer + ?Sized> DiContainerExt for C {}
