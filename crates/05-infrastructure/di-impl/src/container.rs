//! 依赖注入容器实现

use crate::registry::BindingRegistryImpl;
use crate::resolver::ContainerResolver;
use di_abstractions::{
    Arguments, Binding, BindingRegistry, Callable, DiContainer, Instance, ResolveContext,
    ResolveOptions, Resolver, TypeDescriptor,
};
use infrastructure_common::{
    ContainerConfig, DependencyResult, Identifier, Scope, ScopeGuard,
};
use parking_lot::RwLock;
use std::fmt;
use tracing::debug;

/// 具体的依赖注入容器实现
///
/// 通常放在 `Arc` 中共享。注册表由读写锁保护，解析期间不持有锁。
pub struct Container {
    /// 容器配置
    config: ContainerConfig,
    /// 绑定注册表
    registry: RwLock<BindingRegistryImpl>,
}

impl Container {
    /// 使用默认配置创建容器
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// 使用指定配置创建容器
    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            config,
            registry: RwLock::new(BindingRegistryImpl::new()),
        }
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    pub(crate) fn registry(&self) -> &RwLock<BindingRegistryImpl> {
        &self.registry
    }

    /// 获取标识符自身的绑定（不跟随别名）
    pub fn binding(&self, id: &str) -> Option<Binding> {
        self.registry.read().binding(id).cloned()
    }

    /// 所有已绑定的标识符
    pub fn identifiers(&self) -> Vec<Identifier> {
        self.registry.read().identifiers()
    }

    /// 创建解析器
    pub fn resolver(&self) -> ContainerResolver<'_> {
        ContainerResolver::new(self)
    }

    fn context(&self) -> ResolveContext {
        ResolveContext::with_options(ResolveOptions::from(&self.config))
    }

    /// 在临时绑定作用域内执行回调
    ///
    /// 进入时压入 `bindings`，退出时（正常返回、错误或 panic）恢复原有绑定。
    /// 作用域可以嵌套。
    pub fn run_scope<R>(
        &self,
        bindings: impl IntoIterator<Item = (Identifier, Binding)>,
        callback: impl FnOnce(&Self) -> R,
    ) -> R {
        let scope = Scope::new("container");
        let previous: Vec<(Identifier, Option<Binding>)> = {
            let mut registry = self.registry.write();
            bindings
                .into_iter()
                .map(|(id, binding)| {
                    let old = registry.bind(id.clone(), binding);
                    (id, old)
                })
                .collect()
        };
        debug!(scope_id = %scope.id, bindings = previous.len(), "进入绑定作用域");

        let _guard = ScopeGuard::new(scope, move |scope| {
            let mut registry = self.registry.write();
            for (id, old) in previous.into_iter().rev() {
                match old {
                    Some(binding) => {
                        registry.bind(id, binding);
                    }
                    None => {
                        registry.remove(&id);
                    }
                }
            }
            debug!(scope_id = %scope.id, "退出绑定作用域，已恢复原有绑定");
        });

        callback(self)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("config", &self.config)
            .field("bindings", &self.identifiers())
            .finish()
    }
}

impl DiContainer for Container {
    fn bind(&self, id: Identifier, binding: Binding) {
        debug!("注册绑定: {} ({})", id, binding.kind());
        self.registry.write().bind(id, binding);
    }

    fn bind_singleton(&self, id: Identifier, binding: Binding) {
        self.bind(id, binding.into_singleton());
    }

    fn remove_binding(&self, id: &str) -> Option<Binding> {
        debug!("移除绑定: {}", id);
        self.registry.write().remove(id)
    }

    fn define(&self, descriptor: TypeDescriptor) {
        debug!("注册类型描述符: {}", descriptor.id());
        self.registry.write().define(descriptor);
    }

    fn is_defined(&self, id: &str) -> bool {
        self.registry.read().definition(id).is_some()
    }

    fn get(&self, id: &str) -> DependencyResult<Instance> {
        self.make(id, Arguments::new())
    }

    fn make(&self, id: &str, arguments: Arguments) -> DependencyResult<Instance> {
        let mut context = self.context();
        self.resolver().resolve(id, &arguments, &mut context)
    }

    fn invoke(&self, callable: &Callable, arguments: Arguments) -> DependencyResult<Instance> {
        let mut context = self.context();
        self.resolver().invoke(callable, &arguments, &mut context)
    }

    fn has(&self, id: &str) -> bool {
        self.registry.read().has(id)
    }

    fn has_instance(&self, id: &str) -> bool {
        self.registry.read().has_instance(id)
    }
}
