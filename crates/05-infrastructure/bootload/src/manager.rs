//! 启动模块管理器

use crate::definition::BootloaderDefinition;
use crate::graph;
use di_abstractions::{Arguments, Callable, DiContainer, Instance};
use infrastructure_common::{BootError, BootResult, Identifier, ModuleState};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// 已完成初始化、等待启动阶段的模块
struct Pending {
    id: Identifier,
    instance: Instance,
}

/// 启动模块管理器
///
/// 按依赖顺序初始化模块，所有请求的模块初始化完成后再统一执行启动阶段。
/// 已处理的模块再次请求时不会重复执行。调用中途出错时，已初始化但尚未
/// 启动的模块留在队列中，由下一次调用启动。
pub struct BootloadManager {
    container: Arc<dyn DiContainer>,
    definitions: HashMap<Identifier, BootloaderDefinition>,
    states: HashMap<Identifier, ModuleState>,
    classes: Vec<Identifier>,
    pending: VecDeque<Pending>,
}

impl BootloadManager {
    /// 创建管理器
    pub fn new(container: Arc<dyn DiContainer>) -> Self {
        Self {
            container,
            definitions: HashMap::new(),
            states: HashMap::new(),
            classes: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// 关联的容器
    pub fn container(&self) -> &Arc<dyn DiContainer> {
        &self.container
    }

    /// 注册启动模块定义，同时把模块类型注册到容器
    pub fn register(&mut self, definition: BootloaderDefinition) -> &mut Self {
        debug!("注册启动模块: {}", definition.id());
        self.container.define(definition.descriptor().clone());
        self.definitions.insert(definition.id().clone(), definition);
        self
    }

    /// 模块是否已注册
    pub fn is_registered(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    /// 已处理的模块，按首次完成初始化的顺序排列
    pub fn classes(&self) -> &[Identifier] {
        &self.classes
    }

    /// 模块当前状态
    pub fn state_of(&self, id: &str) -> ModuleState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// 模块启动阶段是否已完成
    pub fn is_booted(&self, id: &str) -> bool {
        self.state_of(id) == ModuleState::Booted
    }

    /// 等待启动阶段的模块，按初始化完成的顺序排列
    pub fn pending(&self) -> impl Iterator<Item = &Identifier> {
        self.pending.iter().map(|module| &module.id)
    }

    /// 静态检查所有已注册模块的依赖图
    pub fn validate(&self) -> BootResult<()> {
        graph::validate(&self.definitions)
    }

    /// 加载启动模块
    ///
    /// 依次初始化 `ids` 及其依赖，然后执行 `pre_boot` 钩子、各模块的启动阶段
    /// 和 `post_boot` 钩子。出错时立即返回，已初始化的模块保持初始化状态，
    /// 之前调用遗留的待启动模块排在本次新模块之前启动。
    /// 启动阶段失败的模块不会再次执行启动阶段。
    pub fn bootload(
        &mut self,
        ids: &[Identifier],
        pre_boot: &[Callable],
        post_boot: &[Callable],
    ) -> BootResult<()> {
        info!("开始加载启动模块: {:?}", ids);

        let mut chain = Vec::new();
        for id in ids {
            self.initialize(id, &mut chain)?;
        }

        self.run_hooks(pre_boot)?;

        while let Some(module) = self.pending.pop_front() {
            self.boot(&module)?;
        }

        self.run_hooks(post_boot)?;

        info!("启动模块加载完成，共 {} 个", self.classes.len());
        Ok(())
    }

    fn initialize(&mut self, id: &str, chain: &mut Vec<Identifier>) -> BootResult<()> {
        match self.state_of(id) {
            ModuleState::Initialized | ModuleState::Booted => return Ok(()),
            ModuleState::Initializing => {
                let chain = chain
                    .iter()
                    .skip_while(|visited| visited.as_str() != id)
                    .map(Identifier::as_str)
                    .chain(std::iter::once(id))
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(BootError::CircularDependency { chain });
            }
            ModuleState::Unprocessed => {}
        }

        let definition = self
            .definitions
            .get(id)
            .cloned()
            .ok_or_else(|| BootError::class_not_found(id))?;
        let id = definition.id().clone();

        debug!("初始化启动模块: {}", id);
        self.states.insert(id.clone(), ModuleState::Initializing);
        chain.push(id.clone());
        let result = self.initialize_module(&definition, chain);
        chain.pop();

        match result {
            Ok(instance) => {
                self.states.insert(id.clone(), ModuleState::Initialized);
                self.classes.push(id.clone());
                self.pending.push_back(Pending { id, instance });
                Ok(())
            }
            Err(error) => {
                self.states.remove(&id);
                Err(error)
            }
        }
    }

    fn initialize_module(
        &mut self,
        definition: &BootloaderDefinition,
        chain: &mut Vec<Identifier>,
    ) -> BootResult<Instance> {
        for dependency in definition.dependencies() {
            self.initialize(dependency, chain)?;
        }

        let instance = self.container.get(definition.id())?;

        for dependency in self.module_dependencies(definition, &instance)? {
            self.initialize(&dependency, chain)?;
        }

        for (id, binding) in definition.bindings() {
            self.container.bind(id.clone(), binding.clone());
        }
        for (id, binding) in definition.singletons() {
            self.container.bind_singleton(id.clone(), binding.clone());
        }

        if let Some(init) = definition.phases().init() {
            let callable = init.bind(definition.id(), instance.clone());
            self.container.invoke(&callable, Arguments::new())?;
        }

        Ok(instance)
    }

    /// 静态依赖、运行时依赖，以及阶段方法参数中引用的已注册模块
    fn module_dependencies(
        &self,
        definition: &BootloaderDefinition,
        instance: &Instance,
    ) -> BootResult<Vec<Identifier>> {
        let mut dependencies = definition.collect_dependencies(instance)?;
        for declared in definition
            .phase_parameters()
            .filter_map(|parameter| parameter.declared_type())
        {
            if self.is_registered(declared) && !dependencies.contains(declared) {
                dependencies.push(declared.clone());
            }
        }
        Ok(dependencies)
    }

    fn boot(&mut self, module: &Pending) -> BootResult<()> {
        if let Some(boot) = self
            .definitions
            .get(&module.id)
            .and_then(|definition| definition.phases().boot())
        {
            debug!("启动模块: {}", module.id);
            let callable = boot.bind(&module.id, module.instance.clone());
            self.container.invoke(&callable, Arguments::new())?;
        }
        self.states.insert(module.id.clone(), ModuleState::Booted);
        Ok(())
    }

    fn run_hooks(&self, hooks: &[Callable]) -> BootResult<()> {
        for hook in hooks {
            debug!("执行启动钩子: {}", hook.name());
            self.container.invoke(hook, Arguments::new())?;
        }
        Ok(())
    }
}

impl fmt::Debug for BootloadManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootloadManager")
            .field("definitions", &self.definitions.len())
            .field("states", &self.states)
            .field("classes", &self.classes)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}
