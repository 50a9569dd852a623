//! # Injectable Macros
//!
//! 这个 crate 提供 `#[derive(Injectable)]`，根据结构体字段生成构造参数列表和
//! `di_abstractions::Injectable` 实现。
//!
//! ## 使用示例
//!
//! ```ignore
//! use injectable_macros::Injectable;
//! use std::sync::Arc;
//!
//! #[derive(Injectable)]
//! #[injectable(singleton)]
//! pub struct OrderService {
//!     repository: Arc<OrderRepository>,
//!     #[inject(default = 3)]
//!     retries: u32,
//!     audit: Option<Arc<AuditLog>>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod utils;

/// 可注入类型派生宏
///
/// 为结构体实现 `Injectable`，每个字段对应一个同名构造参数。
///
/// # 结构体参数
///
/// - `singleton` - 首次构造后缓存实例
/// - `id = "custom.id"` - 自定义标识符（默认使用类型路径）
///
/// # 字段参数
///
/// - `default` - 使用 `Default::default()` 作为参数默认值
/// - `default = expr` - 使用表达式作为参数默认值
/// - `id = "service.id"` - 从指定标识符解析，而不是字段类型
/// - `skip` - 不作为构造参数，直接使用 `Default::default()`
///
/// # 字段类型
///
/// - `Arc<T>` - 按 `T` 的类型标识符解析
/// - `Arc<dyn Trait>` - 按 `dyn Trait` 的类型标识符解析，实例以 `Arc<dyn Trait>` 存放
/// - `Option<...>` - 可空参数，无法解析时为 `None`
/// - 其他类型 `V` - 按 `V` 的类型标识符解析并克隆取值
#[proc_macro_derive(Injectable, attributes(injectable, inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    injectable::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
