//! 类型分析工具函数

use syn::{GenericArgument, PathArguments, Type};

/// 提取单参数泛型的内部类型，例如 `Arc<T>` 中的 `T`
pub fn extract_generic_type<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }

    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

/// 检查类型是否为 Option<T>，返回内部类型
pub fn option_inner(ty: &Type) -> Option<&Type> {
    extract_generic_type(ty, "Option")
}

/// 检查类型是否为 Arc<T>，返回内部类型
pub fn arc_inner(ty: &Type) -> Option<&Type> {
    extract_generic_type(ty, "Arc")
}

/// 检查类型是否为 trait 对象（`dyn Trait`）
pub fn is_trait_object(ty: &Type) -> bool {
    match ty {
        Type::TraitObject(_) => true,
        Type::Paren(paren) => is_trait_object(&paren.elem),
        Type::Group(group) => is_trait_object(&group.elem),
        _ => false,
    }
}
