//! 生命周期与作用域管理

use std::fmt;

/// 绑定生命周期类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifetime {
    /// 单例模式 - 首次构造成功后缓存为共享实例
    Singleton,
    /// 瞬时模式 - 每次解析都创建新实例
    #[default]
    Transient,
}

impl Lifetime {
    /// 是否为单例
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::Singleton)
    }
}

/// 启动模块状态
///
/// `Unprocessed → Initializing → Initialized → Booted`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModuleState {
    /// 未处理
    #[default]
    Unprocessed,
    /// 初始化中（依赖尚在处理）
    Initializing,
    /// 初始化阶段已完成，等待启动阶段
    Initialized,
    /// 启动阶段已完成
    Booted,
}

impl ModuleState {
    /// 初始化阶段是否已经完成
    pub fn is_initialized(self) -> bool {
        matches!(self, Self::Initialized | Self::Booted)
    }
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unprocessed => "unprocessed",
            Self::Initializing => "initializing",
            Self::Initialized => "initialized",
            Self::Booted => "booted",
        };
        f.write_str(name)
    }
}

/// 绑定作用域
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: uuid::Uuid,
    pub name: String,
}

impl Scope {
    /// 创建新作用域
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// 创建子作用域
    pub fn child(&self, name: impl Into<String>) -> Self {
        Self::new(format!("{}.{}", self.name, name.into()))
    }
}

/// 作用域守卫
///
/// 守卫被释放时执行清理函数，正常返回、错误返回和 panic 展开都会触发。
pub struct ScopeGuard<'a> {
    scope: Scope,
    cleanup: Option<Box<dyn FnOnce(&Scope) + 'a>>,
}

impl<'a> ScopeGuard<'a> {
    /// 创建新的作用域守卫
    pub fn new(scope: Scope, cleanup: impl FnOnce(&Scope) + 'a) -> Self {
        Self {
            scope,
            cleanup: Some(Box::new(cleanup)),
        }
    }

    /// 获取作用域
    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup(&self.scope);
        }
    }
}

impl fmt::Debug for ScopeGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("scope", &self.scope)
            .field("armed", &self.cleanup.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_scope_guard_runs_cleanup_once() {
        let calls = Cell::new(0);
        {
            let guard = ScopeGuard::new(Scope::new("test"), |_| calls.set(calls.get() + 1));
            assert_eq!(guard.scope().name, "test");
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_child_scope_name() {
        let root = Scope::new("root");
        let child = root.child("request");
        assert_eq!(child.name, "root.request");
        assert_ne!(child.id, root.id);
    }

    #[test]
    fn test_module_state_initialized() {
        assert!(!ModuleState::Unprocessed.is_initialized());
        assert!(!ModuleState::Initializing.is_initialized());
        assert!(ModuleState::Initialized.is_initialized());
        assert!(ModuleState::Booted.is_initialized());
    }
}
