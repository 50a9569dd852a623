//! 启动模块定义

use di_abstractions::{
    Binding, Callable, DiContainer, Injectable, Instance, Parameter, ResolvedArguments,
    TypeDescriptor,
};
use infrastructure_common::{DependencyError, DependencyResult, Identifier};
use std::fmt;
use std::sync::Arc;

/// 阶段方法的函数体
pub type PhaseFn = Arc<
    dyn Fn(&Instance, &dyn DiContainer, &ResolvedArguments) -> DependencyResult<()> + Send + Sync,
>;

/// 运行时依赖声明函数
pub type DependsFn = Arc<dyn Fn(&Instance) -> DependencyResult<Vec<Identifier>> + Send + Sync>;

fn module_ref<'i, M: Send + Sync + 'static>(
    instance: &'i Instance,
    id: &str,
) -> DependencyResult<&'i M> {
    instance
        .downcast_ref::<M>()
        .ok_or_else(|| DependencyError::type_mismatch(id, std::any::type_name::<M>()))
}

/// 启动模块的阶段方法（init 或 boot）
///
/// 参数与构造函数参数一样由容器解析。
#[derive(Clone)]
pub struct PhaseMethod {
    name: &'static str,
    parameters: Vec<Parameter>,
    body: PhaseFn,
}

impl PhaseMethod {
    fn new<M, F>(name: &'static str, parameters: Vec<Parameter>, body: F) -> Self
    where
        M: Send + Sync + 'static,
        F: Fn(&M, &dyn DiContainer, &ResolvedArguments) -> DependencyResult<()>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name,
            parameters,
            body: Arc::new(
                move |instance: &Instance,
                      container: &dyn DiContainer,
                      arguments: &ResolvedArguments| {
                    let module = module_ref::<M>(instance, name)?;
                    body(module, container, arguments)
                },
            ),
        }
    }

    /// 方法名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 方法参数
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// 绑定到模块实例，生成可由容器调用的 [`Callable`]
    pub fn bind(&self, module: &Identifier, instance: Instance) -> Callable {
        let body = self.body.clone();
        Callable::hook(format!("{module}::{}", self.name), move |container, arguments| {
            body(&instance, container, arguments)
        })
        .with_parameters(self.parameters.iter().cloned())
    }
}

impl fmt::Debug for PhaseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseMethod")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// 模块实现的可选阶段
#[derive(Debug, Clone, Default)]
pub enum Phases {
    /// 无阶段方法
    #[default]
    None,
    /// 仅初始化阶段
    Init(PhaseMethod),
    /// 仅启动阶段
    Boot(PhaseMethod),
    /// 初始化阶段和启动阶段
    InitAndBoot {
        init: PhaseMethod,
        boot: PhaseMethod,
    },
}

impl Phases {
    /// 初始化阶段方法
    pub fn init(&self) -> Option<&PhaseMethod> {
        match self {
            Self::Init(init) | Self::InitAndBoot { init, .. } => Some(init),
            Self::None | Self::Boot(_) => None,
        }
    }

    /// 启动阶段方法
    pub fn boot(&self) -> Option<&PhaseMethod> {
        match self {
            Self::Boot(boot) | Self::InitAndBoot { boot, .. } => Some(boot),
            Self::None | Self::Init(_) => None,
        }
    }

    fn with_init(self, init: PhaseMethod) -> Self {
        match self {
            Self::None | Self::Init(_) => Self::Init(init),
            Self::Boot(boot) | Self::InitAndBoot { boot, .. } => Self::InitAndBoot { init, boot },
        }
    }

    fn with_boot(self, boot: PhaseMethod) -> Self {
        match self {
            Self::None | Self::Boot(_) => Self::Boot(boot),
            Self::Init(init) | Self::InitAndBoot { init, .. } => Self::InitAndBoot { init, boot },
        }
    }
}

/// 启动模块定义
///
/// 描述模块如何构造、依赖哪些模块、注册哪些绑定，以及实现了哪些阶段方法。
///
/// ```rust
/// use bootload::BootloaderDefinition;
/// use di_abstractions::TypeDescriptor;
///
/// struct Database;
/// struct Http;
///
/// let definition = BootloaderDefinition::new(
///     TypeDescriptor::builder::<Http>().build(|_| Ok(Http)),
/// )
/// .depends_on_type::<Database>()
/// .on_boot::<Http, _>([], |_http, _container, _args| Ok(()));
///
/// assert_eq!(definition.dependencies().len(), 1);
/// assert!(definition.phases().boot().is_some());
/// ```
#[derive(Clone)]
pub struct BootloaderDefinition {
    descriptor: TypeDescriptor,
    dependencies: Vec<Identifier>,
    depends: Option<DependsFn>,
    bindings: Vec<(Identifier, Binding)>,
    singletons: Vec<(Identifier, Binding)>,
    phases: Phases,
}

impl BootloaderDefinition {
    /// 使用类型描述符创建定义，模块标识符取自描述符
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            dependencies: Vec::new(),
            depends: None,
            bindings: Vec::new(),
            singletons: Vec::new(),
            phases: Phases::None,
        }
    }

    /// 为可注入类型创建定义
    pub fn of<M: Injectable>() -> Self {
        Self::new(M::descriptor())
    }

    /// 声明静态依赖模块
    pub fn depends_on(mut self, dependency: impl Into<Identifier>) -> Self {
        let dependency = dependency.into();
        if !self.dependencies.contains(&dependency) {
            self.dependencies.push(dependency);
        }
        self
    }

    /// 按类型声明静态依赖模块
    pub fn depends_on_type<D: ?Sized + 'static>(self) -> Self {
        self.depends_on(Identifier::of::<D>())
    }

    /// 声明运行时依赖，模块实例化之后调用
    pub fn with_dependencies_from<M, F>(mut self, depends: F) -> Self
    where
        M: Send + Sync + 'static,
        F: Fn(&M) -> Vec<Identifier> + Send + Sync + 'static,
    {
        self.depends = Some(Arc::new(move |instance: &Instance| {
            module_ref::<M>(instance, "depends").map(&depends)
        }));
        self
    }

    /// 声明初始化前注册的绑定
    pub fn binding(mut self, id: impl Into<Identifier>, binding: Binding) -> Self {
        self.bindings.push((id.into(), binding));
        self
    }

    /// 声明初始化前注册的单例绑定
    pub fn singleton(mut self, id: impl Into<Identifier>, binding: Binding) -> Self {
        self.singletons.push((id.into(), binding));
        self
    }

    /// 设置初始化阶段方法
    pub fn on_init<M, F>(mut self, parameters: impl IntoIterator<Item = Parameter>, init: F) -> Self
    where
        M: Send + Sync + 'static,
        F: Fn(&M, &dyn DiContainer, &ResolvedArguments) -> DependencyResult<()>
            + Send
            + Sync
            + 'static,
    {
        let method = PhaseMethod::new::<M, F>("init", parameters.into_iter().collect(), init);
        self.phases = std::mem::take(&mut self.phases).with_init(method);
        self
    }

    /// 设置启动阶段方法
    pub fn on_boot<M, F>(mut self, parameters: impl IntoIterator<Item = Parameter>, boot: F) -> Self
    where
        M: Send + Sync + 'static,
        F: Fn(&M, &dyn DiContainer, &ResolvedArguments) -> DependencyResult<()>
            + Send
            + Sync
            + 'static,
    {
        let method = PhaseMethod::new::<M, F>("boot", parameters.into_iter().collect(), boot);
        self.phases = std::mem::take(&mut self.phases).with_boot(method);
        self
    }

    /// 模块标识符
    pub fn id(&self) -> &Identifier {
        self.descriptor.id()
    }

    /// 模块类型描述符
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// 静态依赖列表
    pub fn dependencies(&self) -> &[Identifier] {
        &self.dependencies
    }

    /// 声明的绑定
    pub fn bindings(&self) -> &[(Identifier, Binding)] {
        &self.bindings
    }

    /// 声明的单例绑定
    pub fn singletons(&self) -> &[(Identifier, Binding)] {
        &self.singletons
    }

    /// 模块实现的阶段
    pub fn phases(&self) -> &Phases {
        &self.phases
    }

    /// 阶段方法声明的参数（先 init 后 boot）
    pub fn phase_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.phases
            .init()
            .into_iter()
            .chain(self.phases.boot())
            .flat_map(PhaseMethod::parameters)
    }

    /// 合并静态依赖与运行时依赖，重复项保留首次出现的位置
    pub fn collect_dependencies(&self, instance: &Instance) -> DependencyResult<Vec<Identifier>> {
        let mut dependencies = self.dependencies.clone();
        if let Some(depends) = &self.depends {
            for dependency in depends(instance)? {
                if !dependencies.contains(&dependency) {
                    dependencies.push(dependency);
                }
            }
        }
        Ok(dependencies)
    }
}

impl fmt::Debug for BootloaderDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootloaderDefinition")
            .field("id", self.id())
            .field("dependencies", &self.dependencies)
            .field("depends", &self.depends.is_some())
            .field("bindings", &self.bindings)
            .field("singletons", &self.singletons)
            .field("phases", &self.phases)
            .finish()
    }
}
