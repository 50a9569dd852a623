//! 可注入调用签名
//!
//! 以显式的参数描述符代替运行时反射：每个构造函数、工厂和钩子都声明
//! 自己的参数列表（名称、声明类型、默认值、是否可空），由解析器按同一
//! 规则补齐参数。

use crate::binding::{downcast, Instance};
use crate::container::DiContainer;
use infrastructure_common::{DependencyError, DependencyResult, Identifier};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 参数描述符
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    declared_type: Option<Identifier>,
    default: Option<Instance>,
    nullable: bool,
}

impl Parameter {
    /// 创建只有名称、没有声明类型的参数
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            default: None,
            nullable: false,
        }
    }

    /// 创建声明类型为 `T` 的参数
    pub fn typed<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::of(name, Identifier::of::<T>())
    }

    /// 创建声明类型为任意标识符的参数
    pub fn of(name: impl Into<String>, declared_type: impl Into<Identifier>) -> Self {
        Self {
            declared_type: Some(declared_type.into()),
            ..Self::named(name)
        }
    }

    /// 设置默认值
    pub fn with_default<T: Send + Sync + 'static>(self, value: T) -> Self {
        self.with_default_instance(Arc::new(value))
    }

    /// 使用已有实例设置默认值
    pub fn with_default_instance(mut self, value: Instance) -> Self {
        self.default = Some(value);
        self
    }

    /// 标记为可空
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// 参数名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 声明类型
    pub fn declared_type(&self) -> Option<&Identifier> {
        self.declared_type.as_ref()
    }

    /// 默认值
    pub fn default_value(&self) -> Option<&Instance> {
        self.default.as_ref()
    }

    /// 是否可空
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// 调用方显式提供的参数
///
/// 键既可以是参数名，也可以是参数的声明类型标识符；按名称匹配优先。
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    values: HashMap<String, Instance>,
}

impl Arguments {
    /// 创建空参数集
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加参数值
    pub fn with<T: Send + Sync + 'static>(self, key: impl Into<String>, value: T) -> Self {
        self.with_instance(key, Arc::new(value))
    }

    /// 添加已有的共享值
    pub fn with_arc<T: Send + Sync + 'static>(self, key: impl Into<String>, value: Arc<T>) -> Self {
        self.with_instance(key, value)
    }

    /// 添加实例
    pub fn with_instance(mut self, key: impl Into<String>, value: Instance) -> Self {
        self.insert(key, value);
        self
    }

    /// 插入实例
    pub fn insert(&mut self, key: impl Into<String>, value: Instance) {
        self.values.insert(key.into(), value);
    }

    /// 获取指定键的实例
    pub fn get(&self, key: &str) -> Option<&Instance> {
        self.values.get(key)
    }

    /// 按参数名、再按声明类型查找显式参数
    pub fn lookup(&self, parameter: &Parameter) -> Option<Instance> {
        self.values
            .get(parameter.name())
            .or_else(|| {
                parameter
                    .declared_type()
                    .and_then(|declared| self.values.get(declared.as_str()))
            })
            .cloned()
    }

    /// 参数数量
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 解析完成的参数列表，按声明顺序排列
#[derive(Debug, Clone, Default)]
pub struct ResolvedArguments {
    target: String,
    values: Vec<(String, Option<Instance>)>,
}

impl ResolvedArguments {
    /// 创建空列表
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            values: Vec::new(),
        }
    }

    /// 追加参数值（`None` 表示可空参数未能解析）
    pub fn push(&mut self, name: impl Into<String>, value: Option<Instance>) {
        self.values.push((name.into(), value));
    }

    fn slot(&self, name: &str) -> DependencyResult<&Option<Instance>> {
        self.values
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value)
            .ok_or_else(|| DependencyError::argument(&self.target, name, "参数未声明"))
    }

    /// 获取可空参数的实例
    pub fn optional_instance(&self, name: &str) -> DependencyResult<Option<Instance>> {
        self.slot(name).map(Clone::clone)
    }

    /// 获取参数实例
    pub fn instance(&self, name: &str) -> DependencyResult<Instance> {
        self.optional_instance(name)?
            .ok_or_else(|| DependencyError::argument(&self.target, name, "参数值为空"))
    }

    /// 获取并向下转型参数
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> DependencyResult<Arc<T>> {
        downcast(self.instance(name)?, name)
    }

    /// 获取并向下转型可空参数
    pub fn optional<T: Send + Sync + 'static>(&self, name: &str) -> DependencyResult<Option<Arc<T>>> {
        self.optional_instance(name)?
            .map(|instance| downcast(instance, name))
            .transpose()
    }

    /// 获取参数值的克隆
    pub fn value<T: Clone + Send + Sync + 'static>(&self, name: &str) -> DependencyResult<T> {
        self.get::<T>(name).map(|value| T::clone(&value))
    }

    /// 参数名称列表
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }

    /// 参数数量
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 调用体类型
pub type CallableFn =
    Arc<dyn Fn(&dyn DiContainer, &ResolvedArguments) -> DependencyResult<Instance> + Send + Sync>;

/// 可注入调用
///
/// 构造函数、工厂、启动钩子共用同一种表示。
#[derive(Clone)]
pub struct Callable {
    name: String,
    parameters: Vec<Parameter>,
    body: CallableFn,
}

impl Callable {
    /// 创建返回实例的调用
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&dyn DiContainer, &ResolvedArguments) -> DependencyResult<Instance>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            body: Arc::new(body),
        }
    }

    /// 创建无返回值的调用（用于启动钩子）
    pub fn hook<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&dyn DiContainer, &ResolvedArguments) -> DependencyResult<()> + Send + Sync + 'static,
    {
        Self::new(name, move |container, arguments| {
            body(container, arguments).map(|()| Arc::new(()) as Instance)
        })
    }

    /// 追加参数
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// 追加多个参数
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// 调用名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 参数描述符
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// 使用已解析的参数执行调用
    pub fn call(
        &self,
        container: &dyn DiContainer,
        arguments: &ResolvedArguments,
    ) -> DependencyResult<Instance> {
        (self.body)(container, arguments)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("body", &"<function>")
            .finish()
    }
}
