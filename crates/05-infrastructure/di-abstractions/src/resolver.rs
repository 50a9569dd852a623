//! 依赖解析器抽象接口
//!
//! 提供依赖解析和组件实例化的能力

use crate::binding::Instance;
use crate::callable::{Arguments, Callable, ResolvedArguments};
use infrastructure_common::{ContainerConfig, DependencyError, DependencyResult, Identifier};
use tracing::warn;

/// 依赖解析器 trait
///
/// 负责解析标识符并创建实例
pub trait Resolver {
    /// 解析标识符，显式参数优先于自动解析
    fn resolve(
        &self,
        id: &str,
        arguments: &Arguments,
        context: &mut ResolveContext,
    ) -> DependencyResult<Instance>;

    /// 为调用补齐参数
    fn resolve_arguments(
        &self,
        callable: &Callable,
        arguments: &Arguments,
        context: &mut ResolveContext,
    ) -> DependencyResult<ResolvedArguments>;
}

/// 解析上下文
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// 当前解析链，用于检测循环依赖
    pub resolution_chain: Vec<Identifier>,
    /// 解析选项
    pub options: ResolveOptions,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new() -> Self {
        Self::with_options(ResolveOptions::default())
    }

    /// 使用指定选项创建解析上下文
    pub fn with_options(options: ResolveOptions) -> Self {
        Self {
            resolution_chain: Vec::new(),
            options,
        }
    }

    /// 添加标识符到解析链
    pub fn push(&mut self, id: &Identifier) -> DependencyResult<()> {
        if self.options.detect_cycles && self.resolution_chain.contains(id) {
            let dependency_chain = format!("{} -> {}", self.chain(), id);
            warn!(chain = %dependency_chain, "检测到循环依赖");
            return Err(DependencyError::CircularDependency { dependency_chain });
        }
        if self.resolution_chain.len() >= self.options.max_depth {
            let chain = format!("{} -> {}", self.chain(), id);
            warn!(max_depth = self.options.max_depth, chain = %chain, "超过最大解析深度");
            return Err(DependencyError::ResolutionDepthExceeded {
                max_depth: self.options.max_depth,
                chain,
            });
        }
        self.resolution_chain.push(id.clone());
        Ok(())
    }

    /// 从解析链中移除最后一个标识符
    pub fn pop(&mut self) {
        self.resolution_chain.pop();
    }

    /// 当前解析深度
    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }

    fn chain(&self) -> String {
        self.resolution_chain
            .iter()
            .map(Identifier::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 解析选项
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// 是否检测循环依赖
    pub detect_cycles: bool,
    /// 最大递归深度
    pub max_depth: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::from(&ContainerConfig::default())
    }
}

impl From<&ContainerConfig> for ResolveOptions {
    fn from(config: &ContainerConfig) -> Self {
        Self {
            detect_cycles: config.enable_circular_dependency_detection,
            max_depth: config.max_resolution_depth,
        }
    }
}
