//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("标识符未注册且不是可实例化的类型: {id}")]
    NotFound { id: String },

    #[error("无法解析参数 `{parameter}` ({target}): {reason}")]
    ArgumentResolving {
        target: String,
        parameter: String,
        reason: String,
    },

    #[error("检测到循环别名: {chain}")]
    CircularAlias { chain: String },

    #[error("循环依赖检测到: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("解析深度超过上限 {max_depth}: {chain}")]
    ResolutionDepthExceeded { max_depth: usize, chain: String },

    #[error("类型不匹配: {id}, 期望 {expected}")]
    TypeMismatch { id: String, expected: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl DependencyError {
    /// 创建未找到错误
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// 创建参数解析错误
    pub fn argument(
        target: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ArgumentResolving {
            target: target.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// 创建类型不匹配错误
    pub fn type_mismatch(id: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::TypeMismatch {
            id: id.into(),
            expected: expected.into(),
        }
    }

    /// 包装构造函数返回的业务错误
    pub fn creation_failed(
        type_name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ComponentCreationFailed {
            type_name: type_name.into(),
            source: source.into(),
        }
    }
}

/// 启动模块错误类型
#[derive(Error, Debug)]
pub enum BootError {
    #[error("启动模块类 `{class}` 不存在")]
    ClassNotFound { class: String },

    #[error("启动模块循环依赖: {chain}")]
    CircularDependency { chain: String },

    #[error(transparent)]
    Dependency(#[from] DependencyError),
}

impl BootError {
    /// 创建类不存在错误
    pub fn class_not_found(class: impl Into<String>) -> Self {
        Self::ClassNotFound {
            class: class.into(),
        }
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("启动模块错误: {source}")]
    BootError {
        #[from]
        source: BootError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type BootResult<T> = Result<T, BootError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
