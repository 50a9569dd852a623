//! 绑定注册表抽象接口

use crate::binding::Binding;
use crate::descriptor::TypeDescriptor;
use infrastructure_common::{DependencyResult, Identifier};

/// 绑定注册表 trait
///
/// 保存标识符到解析策略的映射，以及可构造类型的描述符目录。
pub trait BindingRegistry: Send + Sync {
    /// 注册或覆盖绑定，返回被覆盖的旧绑定
    fn bind(&mut self, id: Identifier, binding: Binding) -> Option<Binding>;

    /// 移除绑定
    fn remove(&mut self, id: &str) -> Option<Binding>;

    /// 获取标识符自身的绑定（不跟随别名）
    fn binding(&self, id: &str) -> Option<&Binding>;

    /// 注册类型描述符
    fn define(&mut self, descriptor: TypeDescriptor) -> Option<TypeDescriptor>;

    /// 获取类型描述符
    fn definition(&self, id: &str) -> Option<&TypeDescriptor>;

    /// 沿别名链找到最终标识符；别名成环时返回错误
    fn resolve_alias(&self, id: &str) -> DependencyResult<Identifier>;

    /// 别名链的终点是否已注册
    fn has(&self, id: &str) -> bool;

    /// 别名链的终点是否为已构造的共享实例
    fn has_instance(&self, id: &str) -> bool;

    /// 所有已绑定的标识符
    fn identifiers(&self) -> Vec<Identifier>;
}
