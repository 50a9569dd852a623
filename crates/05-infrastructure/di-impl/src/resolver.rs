//! 依赖解析器实现
//!
//! 解析过程中不持有注册表锁：构造函数、工厂可以重入容器。

use crate::container::Container;
use di_abstractions::{
    Arguments, Binding, BindingRegistry, Callable, Instance, Parameter, ResolveContext,
    ResolvedArguments, Resolver, TypeDescriptor,
};
use infrastructure_common::{DependencyError, DependencyResult, Identifier, Lifetime};
use tracing::debug;

/// 解析时从注册表取出的快照，别名已跟随到链尾
enum Plan {
    Shared(Instance),
    Factory {
        factory: Callable,
        lifetime: Lifetime,
    },
    Concrete {
        target: Identifier,
        lifetime: Lifetime,
    },
    Defined(TypeDescriptor),
}

/// 基于 [`Container`] 的解析器
#[derive(Debug, Clone, Copy)]
pub struct ContainerResolver<'c> {
    container: &'c Container,
}

impl<'c> ContainerResolver<'c> {
    /// 创建解析器
    pub fn new(container: &'c Container) -> Self {
        Self { container }
    }

    /// 补齐参数并执行调用
    pub fn invoke(
        &self,
        callable: &Callable,
        arguments: &Arguments,
        context: &mut ResolveContext,
    ) -> DependencyResult<Instance> {
        let resolved = self.resolve_arguments(callable, arguments, context)?;
        callable.call(self.container, &resolved)
    }

    fn plan(&self, id: &str) -> DependencyResult<(Identifier, Plan)> {
        let registry = self.container.registry().read();
        let target = registry.resolve_alias(id)?;
        let plan = match registry.binding(&target) {
            Some(Binding::Shared(instance)) => Plan::Shared(instance.clone()),
            Some(Binding::Factory { factory, lifetime }) => Plan::Factory {
                factory: factory.clone(),
                lifetime: *lifetime,
            },
            Some(Binding::Concrete { target, lifetime }) => Plan::Concrete {
                target: target.clone(),
                lifetime: *lifetime,
            },
            // resolve_alias 返回的标识符不会再绑定到别名
            Some(Binding::Alias(next)) => {
                return Err(DependencyError::CircularAlias {
                    chain: format!("{target} -> {next}"),
                });
            }
            None => match registry.definition(&target) {
                Some(descriptor) => Plan::Defined(descriptor.clone()),
                None => return Err(DependencyError::not_found(id)),
            },
        };
        Ok((target, plan))
    }

    fn construct(
        &self,
        descriptor: &TypeDescriptor,
        arguments: &Arguments,
        context: &mut ResolveContext,
    ) -> DependencyResult<Instance> {
        debug!("构造实例: {}", descriptor.id());
        let instance = self.invoke(descriptor.constructor(), arguments, context)?;
        if descriptor.is_singleton() {
            self.memoize(descriptor.id(), &instance);
        }
        Ok(instance)
    }

    fn construct_defined(
        &self,
        id: &Identifier,
        arguments: &Arguments,
        context: &mut ResolveContext,
    ) -> DependencyResult<Instance> {
        let descriptor = self
            .container
            .registry()
            .read()
            .definition(id)
            .cloned()
            .ok_or_else(|| DependencyError::not_found(id.as_str()))?;
        self.construct(&descriptor, arguments, context)
    }

    fn memoize(&self, id: &Identifier, instance: &Instance) {
        debug!("缓存单例实例: {}", id);
        self.container
            .registry()
            .write()
            .bind(id.clone(), Binding::Shared(instance.clone()));
    }

    fn with_frame<T>(
        context: &mut ResolveContext,
        id: &Identifier,
        step: impl FnOnce(&mut ResolveContext) -> DependencyResult<T>,
    ) -> DependencyResult<T> {
        context.push(id)?;
        let result = step(context);
        context.pop();
        result
    }

    fn resolve_parameter(
        &self,
        callable: &Callable,
        parameter: &Parameter,
        arguments: &Arguments,
        context: &mut ResolveContext,
    ) -> DependencyResult<Option<Instance>> {
        if let Some(explicit) = arguments.lookup(parameter) {
            return Ok(Some(explicit));
        }

        if let Some(declared) = parameter.declared_type() {
            let resolvable = self.container.registry().read().is_resolvable(declared)?;
            if resolvable {
                return self
                    .resolve(declared, &Arguments::new(), context)
                    .map(Some);
            }
        }

        if let Some(default) = parameter.default_value() {
            return Ok(Some(default.clone()));
        }
        if parameter.is_nullable() {
            return Ok(None);
        }

        let reason = match parameter.declared_type() {
            Some(declared) => format!("类型 `{declared}` 无法解析且没有默认值"),
            None => String::from("没有显式参数也没有默认值"),
        };
        Err(DependencyError::argument(
            callable.name(),
            parameter.name(),
            reason,
        ))
    }
}

impl Resolver for ContainerResolver<'_> {
    fn resolve(
        &self,
        id: &str,
        arguments: &Arguments,
        context: &mut ResolveContext,
    ) -> DependencyResult<Instance> {
        let (target, plan) = self.plan(id)?;

        match plan {
            Plan::Shared(instance) => Ok(instance),
            Plan::Factory { factory, lifetime } => {
                let instance = Self::with_frame(context, &target, |context| {
                    self.invoke(&factory, arguments, context)
                })?;
                if lifetime == Lifetime::Singleton {
                    self.memoize(&target, &instance);
                }
                Ok(instance)
            }
            Plan::Concrete {
                target: concrete,
                lifetime,
            } => {
                let instance = Self::with_frame(context, &target, |context| {
                    if concrete == target {
                        self.construct_defined(&concrete, arguments, context)
                    } else {
                        self.resolve(&concrete, arguments, context)
                    }
                })?;
                if lifetime == Lifetime::Singleton {
                    self.memoize(&target, &instance);
                }
                Ok(instance)
            }
            Plan::Defined(descriptor) => Self::with_frame(context, &target, |context| {
                self.construct(&descriptor, arguments, context)
            }),
        }
    }

    fn resolve_arguments(
        &self,
        callable: &Callable,
        arguments: &Arguments,
        context: &mut ResolveContext,
    ) -> DependencyResult<ResolvedArguments> {
        let mut resolved = ResolvedArguments::new(callable.name());
        for parameter in callable.parameters() {
            let value = self.resolve_parameter(callable, parameter, arguments, context)?;
            resolved.push(parameter.name(), value);
        }
        Ok(resolved)
    }
}
