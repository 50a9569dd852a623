//! 内核配置

use infrastructure_common::{ConfigError, ConfigResult, ContainerConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志过滤指令，例如 `info` 或 `bootload=debug,info`
    pub level: String,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: String::from("debug"),
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: String::from("info"),
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 解析日志过滤指令
    pub fn filter(&self) -> ConfigResult<EnvFilter> {
        EnvFilter::try_new(&self.level).map_err(|e| ConfigError::ValidationError {
            message: format!("无效的日志级别 `{}`: {}", self.level, e),
        })
    }
}

/// 内核配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelSettings {
    /// 容器配置
    pub container: ContainerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 加载前是否静态检查启动模块依赖图
    pub validate_bootloaders: bool,
}

impl Default for KernelSettings {
    fn default() -> Self {
        Self {
            container: ContainerConfig::default(),
            logging: LoggingConfig::default(),
            validate_bootloaders: true,
        }
    }
}

impl KernelSettings {
    /// 环境变量前缀，例如 `LORN__CONTAINER__MAX_RESOLUTION_DEPTH`
    pub const ENV_PREFIX: &'static str = "LORN";

    /// 从可选的配置文件和环境变量加载配置
    ///
    /// 环境变量优先于文件。文件格式由扩展名决定（toml / json / yaml）。
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载内核配置文件: {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(Self::ENV_PREFIX).separator("__"))
            .build()
            .map_err(|e| {
                error!("配置构建失败: {}", e);
                ConfigError::ParseError {
                    source: Box::new(e),
                }
            })?;

        let settings: Self = settings.try_deserialize().map_err(|e| {
            error!("配置绑定失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.container.max_resolution_depth == 0 {
            return Err(ConfigError::ValidationError {
                message: String::from("container.max_resolution_depth 必须大于 0"),
            });
        }
        self.logging.filter().map(drop)
    }
}
