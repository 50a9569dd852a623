//! 类型描述符
//!
//! 可构造类型在注册时提供描述符：标识符、构造参数列表和是否可单例缓存。

use crate::binding::Instance;
use crate::callable::{Callable, Parameter, ResolvedArguments};
use crate::container::DiContainer;
use infrastructure_common::{DependencyResult, Identifier, Lifetime};
use std::marker::PhantomData;
use std::sync::Arc;

/// 可注入类型 trait
///
/// 通常由 `#[derive(Injectable)]` 生成。
pub trait Injectable: Send + Sync + Sized + 'static {
    /// 获取类型描述符
    fn descriptor() -> TypeDescriptor;
}

/// 类型描述符
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    id: Identifier,
    type_name: &'static str,
    constructor: Callable,
    lifetime: Lifetime,
}

impl TypeDescriptor {
    /// 创建类型 `T` 的描述符构建器
    pub fn builder<T: Send + Sync + 'static>() -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder {
            id: Identifier::of::<T>(),
            parameters: Vec::new(),
            lifetime: Lifetime::Transient,
            marker: PhantomData,
        }
    }

    /// 类型标识符
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// 实际的 Rust 类型名
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 构造函数
    pub fn constructor(&self) -> &Callable {
        &self.constructor
    }

    /// 生命周期
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// 是否可单例缓存
    pub fn is_singleton(&self) -> bool {
        self.lifetime.is_singleton()
    }
}

/// 类型描述符构建器
pub struct TypeDescriptorBuilder<T> {
    id: Identifier,
    parameters: Vec<Parameter>,
    lifetime: Lifetime,
    marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> TypeDescriptorBuilder<T> {
    /// 使用自定义标识符（默认使用类型路径）
    pub fn with_identifier(mut self, id: impl Into<Identifier>) -> Self {
        self.id = id.into();
        self
    }

    /// 追加构造参数
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// 标记为单例：首次构造成功后缓存
    pub fn singleton(mut self) -> Self {
        self.lifetime = Lifetime::Singleton;
        self
    }

    /// 使用构造函数完成构建
    pub fn build<F>(self, construct: F) -> TypeDescriptor
    where
        F: Fn(&ResolvedArguments) -> DependencyResult<T> + Send + Sync + 'static,
    {
        self.build_with_container(move |_, arguments| construct(arguments))
    }

    /// 使用需要访问容器的构造函数完成构建
    pub fn build_with_container<F>(self, construct: F) -> TypeDescriptor
    where
        F: Fn(&dyn DiContainer, &ResolvedArguments) -> DependencyResult<T> + Send + Sync + 'static,
    {
        let constructor = Callable::new(self.id.to_string(), move |container, arguments| {
            construct(container, arguments).map(|value| Arc::new(value) as Instance)
        })
        .with_parameters(self.parameters);

        TypeDescriptor {
            id: self.id,
            type_name: std::any::type_name::<T>(),
            constructor,
            lifetime: self.lifetime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Mailer {
        sender: String,
    }

    #[test]
    fn test_builder_defaults_to_type_identifier() {
        let descriptor = TypeDescriptor::builder::<Mailer>()
            .parameter(Parameter::named("sender").with_default(String::from("noreply")))
            .build(|arguments| {
                Ok(Mailer {
                    sender: arguments.value("sender")?,
                })
            });

        assert_eq!(descriptor.id(), &Identifier::of::<Mailer>());
        assert_eq!(descriptor.constructor().parameters().len(), 1);
        assert!(!descriptor.is_singleton());
    }

    #[test]
    fn test_builder_custom_identifier_and_singleton() {
        let descriptor = TypeDescriptor::builder::<Mailer>()
            .with_identifier("mailer")
            .singleton()
            .build(|_| {
                Ok(Mailer {
                    sender: String::new(),
                })
            });

        assert_eq!(descriptor.id().as_str(), "mailer");
        assert!(descriptor.is_singleton());
        assert!(descriptor.type_name().ends_with("Mailer"));
    }
}
