//! 绑定策略定义

use crate::callable::Callable;
use infrastructure_common::{DependencyError, DependencyResult, Identifier, Lifetime};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 容器中的实例
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 将实例向下转型为具体类型
pub fn downcast<T>(instance: Instance, id: &str) -> DependencyResult<Arc<T>>
where
    T: Send + Sync + 'static,
{
    instance
        .downcast::<T>()
        .map_err(|_| DependencyError::type_mismatch(id, std::any::type_name::<T>()))
}

/// 标识符的解析策略
///
/// 每个标识符同一时刻只有一个有效绑定，后注册的覆盖先注册的。
#[derive(Clone)]
pub enum Binding {
    /// 指向另一个可构造类型
    Concrete {
        target: Identifier,
        lifetime: Lifetime,
    },
    /// 通过可注入的工厂调用创建
    Factory {
        factory: Callable,
        lifetime: Lifetime,
    },
    /// 已构造的共享实例
    Shared(Instance),
    /// 指向另一个标识符的别名
    Alias(Identifier),
}

impl Binding {
    /// 创建瞬时的具体类型绑定
    pub fn concrete(target: impl Into<Identifier>) -> Self {
        Self::Concrete {
            target: target.into(),
            lifetime: Lifetime::Transient,
        }
    }

    /// 创建指向类型 `T` 的具体类型绑定
    pub fn concrete_of<T: ?Sized + 'static>() -> Self {
        Self::concrete(Identifier::of::<T>())
    }

    /// 创建瞬时的工厂绑定
    pub fn factory(factory: Callable) -> Self {
        Self::Factory {
            factory,
            lifetime: Lifetime::Transient,
        }
    }

    /// 创建共享实例绑定
    pub fn shared<T: Send + Sync + 'static>(value: T) -> Self {
        Self::Shared(Arc::new(value))
    }

    /// 使用已有的 `Arc` 创建共享实例绑定
    pub fn shared_arc<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self::Shared(value)
    }

    /// 创建别名绑定
    pub fn alias(target: impl Into<Identifier>) -> Self {
        Self::Alias(target.into())
    }

    /// 转换为单例生命周期（仅影响具体类型和工厂绑定）
    pub fn into_singleton(self) -> Self {
        match self {
            Self::Concrete { target, .. } => Self::Concrete {
                target,
                lifetime: Lifetime::Singleton,
            },
            Self::Factory { factory, .. } => Self::Factory {
                factory,
                lifetime: Lifetime::Singleton,
            },
            other => other,
        }
    }

    /// 是否为共享实例
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared(_))
    }

    /// 绑定类型名称
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Concrete { .. } => "concrete",
            Self::Factory { .. } => "factory",
            Self::Shared(_) => "shared",
            Self::Alias(_) => "alias",
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete { target, lifetime } => f
                .debug_struct("Concrete")
                .field("target", target)
                .field("lifetime", lifetime)
                .finish(),
            Self::Factory { factory, lifetime } => f
                .debug_struct("Factory")
                .field("factory", &factory.name())
                .field("lifetime", lifetime)
                .finish(),
            Self::Shared(_) => f.write_str("Shared(<instance>)"),
            Self::Alias(target) => f.debug_tuple("Alias").field(target).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_singleton_keeps_shared_and_alias() {
        assert!(Binding::shared(1_u32).into_singleton().is_shared());
        assert!(matches!(
            Binding::alias("abc").into_singleton(),
            Binding::Alias(_)
        ));
        assert!(matches!(
            Binding::concrete("abc").into_singleton(),
            Binding::Concrete {
                lifetime: Lifetime::Singleton,
                ..
            }
        ));
    }

    #[test]
    fn test_downcast_mismatch() {
        let instance: Instance = Arc::new(42_u32);
        let error = downcast::<String>(instance, "answer").unwrap_err();
        assert!(matches!(error, DependencyError::TypeMismatch { .. }));
    }
}
