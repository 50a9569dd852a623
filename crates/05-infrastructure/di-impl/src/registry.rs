//! 绑定注册表实现

use di_abstractions::{Binding, BindingRegistry, TypeDescriptor};
use infrastructure_common::{DependencyError, DependencyResult, Identifier};
use std::collections::HashMap;

/// 绑定注册表实现
///
/// 本身不加锁，由 [`crate::Container`] 统一保护。
#[derive(Debug, Clone, Default)]
pub struct BindingRegistryImpl {
    /// 标识符到绑定的映射
    bindings: HashMap<Identifier, Binding>,
    /// 可构造类型目录
    definitions: HashMap<Identifier, TypeDescriptor>,
}

impl BindingRegistryImpl {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 标识符在别名解析后是否可构造（已绑定或已定义）
    pub fn is_resolvable(&self, id: &str) -> DependencyResult<bool> {
        let target = self.resolve_alias(id)?;
        Ok(self.bindings.contains_key(target.as_str())
            || self.definitions.contains_key(target.as_str()))
    }
}

impl BindingRegistry for BindingRegistryImpl {
    fn bind(&mut self, id: Identifier, binding: Binding) -> Option<Binding> {
        self.bindings.insert(id, binding)
    }

    fn remove(&mut self, id: &str) -> Option<Binding> {
        self.bindings.remove(id)
    }

    fn binding(&self, id: &str) -> Option<&Binding> {
        self.bindings.get(id)
    }

    fn define(&mut self, descriptor: TypeDescriptor) -> Option<TypeDescriptor> {
        self.definitions.insert(descriptor.id().clone(), descriptor)
    }

    fn definition(&self, id: &str) -> Option<&TypeDescriptor> {
        self.definitions.get(id)
    }

    fn resolve_alias(&self, id: &str) -> DependencyResult<Identifier> {
        let mut visited = vec![id];
        let mut current = id;

        while let Some(Binding::Alias(target)) = self.bindings.get(current) {
            let repeated = visited.contains(&target.as_str());
            visited.push(target.as_str());
            if repeated {
                return Err(DependencyError::CircularAlias {
                    chain: visited.join(" -> "),
                });
            }
            current = target.as_str();
        }

        Ok(Identifier::from(current.to_owned()))
    }

    fn has(&self, id: &str) -> bool {
        match self.resolve_alias(id) {
            Ok(target) => {
                self.bindings.contains_key(target.as_str())
                    || (target.as_str() != id && self.definitions.contains_key(target.as_str()))
            }
            Err(_) => false,
        }
    }

    fn has_instance(&self, id: &str) -> bool {
        self.resolve_alias(id)
            .ok()
            .and_then(|target| self.bindings.get(target.as_str()))
            .is_some_and(Binding::is_shared)
    }

    fn identifiers(&self) -> Vec<Identifier> {
        let mut identifiers: Vec<Identifier> = self.bindings.keys().cloned().collect();
        identifiers.sort();
        identifiers
    }
}
