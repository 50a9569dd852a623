//! 内核实例

use crate::builder::KernelBuilder;
use crate::settings::KernelSettings;
use bootload::BootloadManager;
use di_abstractions::Callable;
use di_impl::Container;
use infrastructure_common::{Identifier, InfrastructureResult};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// 已完成启动的内核
///
/// 持有容器和启动模块管理器，可以继续加载新的模块批次。
pub struct Kernel {
    container: Arc<Container>,
    manager: BootloadManager,
    settings: KernelSettings,
}

impl Kernel {
    /// 创建内核构建器
    pub fn builder() -> KernelBuilder {
        KernelBuilder::new()
    }

    pub(crate) fn new(
        container: Arc<Container>,
        manager: BootloadManager,
        settings: KernelSettings,
    ) -> Self {
        Self {
            container,
            manager,
            settings,
        }
    }

    /// 依赖注入容器
    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    /// 启动模块管理器
    pub fn bootloader(&self) -> &BootloadManager {
        &self.manager
    }

    /// 内核配置
    pub fn settings(&self) -> &KernelSettings {
        &self.settings
    }

    /// 加载新的模块批次，已处理的模块不会重复执行
    pub fn bootload(&mut self, ids: &[Identifier]) -> InfrastructureResult<()> {
        self.bootload_with_hooks(ids, &[], &[])
    }

    /// 加载新的模块批次并执行钩子
    pub fn bootload_with_hooks(
        &mut self,
        ids: &[Identifier],
        pre_boot: &[Callable],
        post_boot: &[Callable],
    ) -> InfrastructureResult<()> {
        info!("内核加载新的模块批次: {:?}", ids);
        self.manager.bootload(ids, pre_boot, post_boot)?;
        Ok(())
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("settings", &self.settings)
            .field("bootloader", &self.manager)
            .finish_non_exhaustive()
    }
}
