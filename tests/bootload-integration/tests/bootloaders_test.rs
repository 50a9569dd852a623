//! Centralized integration tests for the bootload crate

use bootload::{BootloadManager, BootloaderDefinition};
use di_abstractions::{
    Binding, Callable, DiContainer, DiContainerExt, Injectable, Parameter, TypeDescriptor,
};
use di_impl::Container;
use infrastructure_common::{BootError, DependencyError, Identifier};
use std::sync::Arc;

mod fixtures {
    use super::*;

    #[derive(Debug)]
    pub struct BootloaderA;

    #[derive(Debug)]
    pub struct BootloaderB;

    #[derive(Debug)]
    pub struct BootloaderC;

    #[derive(Debug)]
    pub struct SampleClass;

    #[derive(Debug)]
    pub struct SampleBoot;

    #[derive(Debug)]
    pub struct SampleBootWithMethodBoot;

    macro_rules! unit_injectable {
        ($($module:ident),*) => {
            $(
                impl Injectable for $module {
                    fn descriptor() -> TypeDescriptor {
                        TypeDescriptor::builder::<Self>().build(|_| Ok(Self))
                    }
                }
            )*
        };
    }

    unit_injectable!(
        BootloaderA,
        BootloaderB,
        BootloaderC,
        SampleClass,
        SampleBoot,
        SampleBootWithMethodBoot
    );

    pub fn register_all(manager: &mut BootloadManager) {
        manager
            .register(BootloaderDefinition::of::<BootloaderA>())
            .register(
                BootloaderDefinition::of::<BootloaderB>().with_dependencies_from::<BootloaderB, _>(
                    |_| vec![Identifier::of::<BootloaderA>()],
                ),
            )
            .register(
                BootloaderDefinition::of::<BootloaderC>()
                    .on_init::<BootloaderC, _>(
                        [Parameter::typed::<BootloaderA>("a")],
                        |_, _, args| args.get::<BootloaderA>("a").map(drop),
                    )
                    .on_boot::<BootloaderC, _>(
                        [Parameter::typed::<BootloaderB>("b")],
                        |_, _, args| args.get::<BootloaderB>("b").map(drop),
                    ),
            )
            .register(BootloaderDefinition::of::<SampleClass>())
            .register(
                BootloaderDefinition::of::<SampleBoot>()
                    .depends_on_type::<BootloaderA>()
                    .depends_on_type::<BootloaderB>()
                    .binding("abc", Binding::concrete_of::<SampleClass>())
                    .singleton("cde", Binding::shared(String::from("cde")))
                    .singleton("single", Binding::concrete_of::<SampleClass>()),
            )
            .register(
                BootloaderDefinition::of::<SampleBootWithMethodBoot>()
                    .on_init::<SampleBootWithMethodBoot, _>([], |_, container, _| {
                        container.bind_instance("def", String::from("def"));
                        Ok(())
                    })
                    .on_boot::<SampleBootWithMethodBoot, _>([], |_, container, _| {
                        container.bind_instance("efg", String::from("efg"));
                        Ok(())
                    }),
            );
    }
}

use fixtures::*;

fn manager() -> (Arc<Container>, BootloadManager) {
    let container = Arc::new(Container::new());
    let mut manager = BootloadManager::new(container.clone());
    register_all(&mut manager);
    (container, manager)
}

fn ids_of(manager: &BootloadManager) -> Vec<Identifier> {
    manager.classes().to_vec()
}

#[test]
fn test_schema_loading() -> anyhow::Result<()> {
    let (container, mut manager) = manager();

    let pre = Callable::hook("pre", |container, args| {
        assert!(container.has_instance("def"));
        assert!(!container.has("efg"));
        container.bind("efg".into(), Binding::shared_arc(args.get::<SampleBoot>("boot")?));
        Ok(())
    })
    .with_parameter(Parameter::typed::<SampleBoot>("boot"));
    let post = Callable::hook("post", |container, args| {
        assert!(container.has_instance("efg"));
        container.bind("ghi".into(), Binding::shared_arc(args.get::<SampleBoot>("boot")?));
        Ok(())
    })
    .with_parameter(Parameter::typed::<SampleBoot>("boot"));

    manager.bootload(
        &[
            Identifier::of::<SampleClass>(),
            Identifier::of::<SampleBootWithMethodBoot>(),
            Identifier::of::<SampleBoot>(),
        ],
        &[pre],
        &[post],
    )?;

    assert!(container.has("abc"));
    assert!(container.has_instance("cde"));
    assert!(container.has_instance("def"));
    assert!(container.has_instance("efg"));
    assert!(container.has("single"));
    assert!(container.has("ghi"));
    // 启动阶段覆盖了 pre 钩子绑定的 efg
    assert_eq!(*container.get_as::<String>("efg")?, "efg");
    assert!(matches!(
        container.get_as::<SampleBoot>("efg"),
        Err(DependencyError::TypeMismatch { .. })
    ));
    assert!(container.get_as::<SampleBoot>("ghi").is_ok());

    assert_eq!(
        ids_of(&manager),
        vec![
            Identifier::of::<SampleClass>(),
            Identifier::of::<SampleBootWithMethodBoot>(),
            Identifier::of::<BootloaderA>(),
            Identifier::of::<BootloaderB>(),
            Identifier::of::<SampleBoot>(),
        ]
    );
    Ok(())
}

#[test]
fn test_exception() {
    let (_, mut manager) = manager();

    let error = manager
        .bootload(&[Identifier::from(r"Foo\Bar\Invalid")], &[], &[])
        .unwrap_err();

    assert!(matches!(error, BootError::ClassNotFound { .. }));
    assert_eq!(error.to_string(), r"启动模块类 `Foo\Bar\Invalid` 不存在");
}

#[test]
fn test_dependencies_from_static_list() -> anyhow::Result<()> {
    let (_, mut manager) = manager();

    manager.bootload(&[Identifier::of::<SampleBoot>()], &[], &[])?;

    assert_eq!(
        ids_of(&manager),
        vec![
            Identifier::of::<BootloaderA>(),
            Identifier::of::<BootloaderB>(),
            Identifier::of::<SampleBoot>(),
        ]
    );
    Ok(())
}

#[test]
fn test_dependencies_from_depends_method() -> anyhow::Result<()> {
    let (_, mut manager) = manager();

    manager.bootload(&[Identifier::of::<BootloaderB>()], &[], &[])?;

    assert_eq!(
        ids_of(&manager),
        vec![Identifier::of::<BootloaderA>(), Identifier::of::<BootloaderB>()]
    );
    Ok(())
}

#[test]
fn test_dependencies_from_init_and_boot_methods() -> anyhow::Result<()> {
    let (_, mut manager) = manager();

    manager.bootload(&[Identifier::of::<BootloaderC>()], &[], &[])?;

    assert_eq!(
        ids_of(&manager),
        vec![
            Identifier::of::<BootloaderA>(),
            Identifier::of::<BootloaderB>(),
            Identifier::of::<BootloaderC>(),
        ]
    );
    assert!(manager.is_booted(&Identifier::of::<BootloaderC>()));
    Ok(())
}

#[test]
fn test_registered_graph_is_valid() {
    let (_, manager) = manager();
    assert!(manager.validate().is_ok());
}
