//! `#[derive(Injectable)]` 的实现

use crate::utils::{arc_inner, is_trait_object, option_inner};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Expr, Field, Fields, Ident, LitStr, Token, Type};

/// 结构体级参数 `#[injectable(...)]`
#[derive(Default)]
struct InjectableArgs {
    singleton: bool,
    id: Option<LitStr>,
}

impl InjectableArgs {
    fn from_attributes(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut args = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("injectable")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("singleton") {
                    args.singleton = true;
                    Ok(())
                } else if meta.path.is_ident("id") {
                    args.id = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("未知的 injectable 参数，可用参数: singleton, id"))
                }
            })?;
        }

        Ok(args)
    }
}

/// 参数默认值
enum DefaultValue {
    None,
    Derived,
    Expr(Expr),
}

/// 字段级参数 `#[inject(...)]`
struct InjectArgs {
    default: DefaultValue,
    id: Option<LitStr>,
    skip: bool,
}

impl InjectArgs {
    fn from_attributes(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut args = Self {
            default: DefaultValue::None,
            id: None,
            skip: false,
        };

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("inject")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    args.default = if meta.input.peek(Token![=]) {
                        DefaultValue::Expr(meta.value()?.parse()?)
                    } else {
                        DefaultValue::Derived
                    };
                    Ok(())
                } else if meta.path.is_ident("id") {
                    args.id = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    args.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("未知的 inject 参数，可用参数: default, id, skip"))
                }
            })?;
        }

        Ok(args)
    }
}

/// 字段取值方式
enum Shape {
    /// `Arc<T>`：实例直接就是 `T`
    Shared(Type),
    /// `Arc<dyn Trait>`：实例是包装后的 `Arc<dyn Trait>`
    Interface(Type),
    /// 其他类型：克隆取值
    Value(Type),
}

impl Shape {
    fn of(ty: &Type) -> Self {
        match arc_inner(ty) {
            Some(inner) if is_trait_object(inner) => Self::Interface(inner.clone()),
            Some(inner) => Self::Shared(inner.clone()),
            None => Self::Value(ty.clone()),
        }
    }

    fn declared(&self) -> &Type {
        match self {
            Self::Shared(ty) | Self::Interface(ty) | Self::Value(ty) => ty,
        }
    }
}

struct InjectField {
    ident: Ident,
    name: String,
    shape: Shape,
    optional: bool,
    args: InjectArgs,
}

impl InjectField {
    fn parse(field: &Field) -> syn::Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "字段缺少名称"))?;
        let args = InjectArgs::from_attributes(&field.attrs)?;

        let (ty, optional) = match option_inner(&field.ty) {
            Some(inner) => (inner, true),
            None => (&field.ty, false),
        };

        Ok(Self {
            name: ident.unraw().to_string(),
            ident,
            shape: Shape::of(ty),
            optional,
            args,
        })
    }

    /// 构造参数声明
    fn parameter(&self) -> syn::Result<Option<TokenStream2>> {
        if self.args.skip {
            return Ok(None);
        }

        let name = &self.name;
        let mut tokens = match &self.args.id {
            Some(id) => quote!(::di_abstractions::Parameter::of(#name, #id)),
            None => {
                let declared = self.shape.declared();
                quote!(::di_abstractions::Parameter::typed::<#declared>(#name))
            }
        };

        if self.optional {
            tokens.extend(quote!(.nullable()));
        }

        match (&self.args.default, &self.shape) {
            (DefaultValue::None, _) => {}
            (DefaultValue::Derived, Shape::Interface(_)) => {
                return Err(syn::Error::new_spanned(
                    &self.ident,
                    "trait 对象字段不支持 `default`，请使用 `default = 表达式`",
                ));
            }
            (DefaultValue::Derived, Shape::Shared(ty) | Shape::Value(ty)) => {
                tokens.extend(quote!(.with_default(<#ty as ::std::default::Default>::default())));
            }
            (DefaultValue::Expr(expr), Shape::Shared(ty)) => {
                tokens.extend(quote! {
                    .with_default_instance({
                        let value: ::std::sync::Arc<#ty> = #expr;
                        value as ::di_abstractions::Instance
                    })
                });
            }
            (DefaultValue::Expr(expr), Shape::Interface(ty)) => {
                tokens.extend(quote!(.with_default::<::std::sync::Arc<#ty>>(#expr)));
            }
            (DefaultValue::Expr(expr), Shape::Value(ty)) => {
                tokens.extend(quote!(.with_default::<#ty>(#expr)));
            }
        }

        Ok(Some(tokens))
    }

    /// 从解析结果中取出字段值
    fn initializer(&self, arguments: &Ident) -> TokenStream2 {
        let ident = &self.ident;
        let name = &self.name;

        if self.args.skip {
            return quote!(#ident: ::std::default::Default::default());
        }

        let value = match (&self.shape, self.optional) {
            (Shape::Shared(ty), false) => quote!(#arguments.get::<#ty>(#name)?),
            (Shape::Shared(ty), true) => quote!(#arguments.optional::<#ty>(#name)?),
            (Shape::Interface(ty), false) => {
                quote!(#arguments.value::<::std::sync::Arc<#ty>>(#name)?)
            }
            (Shape::Interface(ty), true) => quote! {
                #arguments
                    .optional::<::std::sync::Arc<#ty>>(#name)?
                    .map(|value| ::std::sync::Arc::clone(&*value))
            },
            (Shape::Value(ty), false) => quote!(#arguments.value::<#ty>(#name)?),
            (Shape::Value(ty), true) => quote! {
                #arguments
                    .optional::<#ty>(#name)?
                    .map(|value| <#ty as ::std::clone::Clone>::clone(&value))
            },
        };

        quote!(#ident: #value)
    }
}

/// 展开 `#[derive(Injectable)]`
pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let args = InjectableArgs::from_attributes(&input.attrs)?;

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "`Injectable` 只能用于结构体",
        ));
    };

    let fields = match &data.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(InjectField::parse)
            .collect::<syn::Result<Vec<_>>>()?,
        Fields::Unit => Vec::new(),
        Fields::Unnamed(unnamed) => {
            return Err(syn::Error::new_spanned(
                unnamed,
                "`Injectable` 不支持元组结构体，请使用具名字段",
            ));
        }
    };

    let parameters = fields
        .iter()
        .map(InjectField::parameter)
        .collect::<syn::Result<Vec<_>>>()?
        .into_iter()
        .flatten();

    let arguments = Ident::new("__arguments", proc_macro2::Span::call_site());
    let construct = match &data.fields {
        Fields::Named(_) => {
            let initializers = fields.iter().map(|field| field.initializer(&arguments));
            quote!(Self { #(#initializers,)* })
        }
        _ => quote!(Self),
    };

    let identifier = args.id.as_ref().map(|id| quote!(.with_identifier(#id)));
    let singleton = args.singleton.then(|| quote!(.singleton()));

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::di_abstractions::Injectable for #name #ty_generics #where_clause {
            fn descriptor() -> ::di_abstractions::TypeDescriptor {
                ::di_abstractions::TypeDescriptor::builder::<Self>()
                    #identifier
                    #singleton
                    #(.parameter(#parameters))*
                    .build(|#arguments: &::di_abstractions::ResolvedArguments| {
                        ::std::result::Result::Ok(#construct)
                    })
            }
        }
    })
}
