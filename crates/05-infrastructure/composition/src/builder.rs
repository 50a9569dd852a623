//! 内核构建器

use crate::kernel::Kernel;
use crate::settings::{KernelSettings, LoggingConfig};
use bootload::{BootloadManager, BootloaderDefinition};
use di_abstractions::{Callable, DiContainerExt};
use di_impl::Container;
use infrastructure_common::{Identifier, InfrastructureError, InfrastructureResult};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// 内核构建器
///
/// 使用建造者模式注册启动模块、钩子和配置，然后一次性完成加载
pub struct KernelBuilder {
    /// 内核配置
    settings: KernelSettings,
    /// 启动模块定义
    definitions: Vec<BootloaderDefinition>,
    /// 请求加载的模块
    modules: Vec<Identifier>,
    /// 启动阶段之前执行的回调
    booting: Vec<Callable>,
    /// 启动阶段之后执行的回调
    booted: Vec<Callable>,
    /// 是否启用日志初始化
    logging_enabled: bool,
}

impl KernelBuilder {
    /// 创建新的内核构建器
    pub fn new() -> Self {
        Self {
            settings: KernelSettings::default(),
            definitions: Vec::new(),
            modules: Vec::new(),
            booting: Vec::new(),
            booted: Vec::new(),
            logging_enabled: false,
        }
    }

    /// 使用指定配置
    pub fn with_settings(mut self, settings: KernelSettings) -> Self {
        self.settings = settings;
        self
    }

    /// 从配置文件和环境变量加载配置
    pub fn load_settings<P: AsRef<Path>>(mut self, path: P) -> InfrastructureResult<Self> {
        let path = path.as_ref();
        info!("加载内核配置: {}", path.display());
        self.settings = KernelSettings::load(Some(path))?;
        Ok(self)
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.settings.logging = config;
        self.logging_enabled = true;
        self
    }

    /// 注册启动模块定义
    pub fn register(mut self, definition: BootloaderDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// 请求加载模块
    pub fn load(mut self, id: impl Into<Identifier>) -> Self {
        self.modules.push(id.into());
        self
    }

    /// 按类型请求加载模块
    pub fn load_type<M: ?Sized + 'static>(self) -> Self {
        self.load(Identifier::of::<M>())
    }

    /// 添加启动阶段之前执行的回调
    pub fn booting(mut self, callback: Callable) -> Self {
        self.booting.push(callback);
        self
    }

    /// 添加启动阶段之后执行的回调
    pub fn booted(mut self, callback: Callable) -> Self {
        self.booted.push(callback);
        self
    }

    /// 构建内核并加载请求的模块
    pub fn build(self) -> InfrastructureResult<Kernel> {
        if self.logging_enabled {
            initialize_logging(&self.settings.logging)?;
        }

        info!("开始构建内核");
        self.settings.validate()?;

        let container = Arc::new(Container::with_config(self.settings.container.clone()));
        container.bind_instance(Identifier::of::<KernelSettings>(), self.settings.clone());

        let mut manager = BootloadManager::new(container.clone());
        for definition in self.definitions {
            manager.register(definition);
        }

        if self.settings.validate_bootloaders {
            debug!("检查启动模块依赖图");
            manager.validate()?;
        }

        manager.bootload(&self.modules, &self.booting, &self.booted)?;

        info!("内核构建完成，已加载 {} 个启动模块", manager.classes().len());
        Ok(Kernel::new(container, manager, self.settings))
    }
}

impl Default for KernelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 初始化日志系统
fn initialize_logging(config: &LoggingConfig) -> InfrastructureResult<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(config.filter()?)
        .with_target(config.show_target)
        .with_thread_ids(config.show_thread_ids)
        .with_file(config.show_file)
        .with_line_number(config.show_line_number);

    if config.json_format {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    }
    .map_err(|e| InfrastructureError::BootstrapFailed {
        message: format!("日志初始化失败: {}", e),
    })?;

    info!("日志系统初始化完成");
    Ok(())
}
