//! Centralized integration tests for di-impl crate

use di_abstractions::{
    Arguments, Binding, Callable, DiContainer, DiContainerExt, Injectable, Parameter,
    TypeDescriptor,
};
use di_impl::Container;
use infrastructure_common::{ContainerConfig, DependencyError, Identifier};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// 测试接口
trait Logger: Send + Sync {
    fn prefix(&self) -> String;
}

#[derive(Debug)]
struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn prefix(&self) -> String {
        String::from("console")
    }
}

/// 依赖接口的组件
struct OrderService {
    logger: Arc<dyn Logger>,
    region: String,
}

impl Injectable for OrderService {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::builder::<Self>()
            .parameter(Parameter::typed::<dyn Logger>("logger"))
            .parameter(Parameter::named("region").with_default(String::from("eu")))
            .build(|args| {
                Ok(Self {
                    logger: args.value::<Arc<dyn Logger>>("logger")?,
                    region: args.value("region")?,
                })
            })
    }
}

fn bind_logger(container: &dyn DiContainer, created: Arc<AtomicUsize>) {
    container.bind_singleton(
        Identifier::of::<dyn Logger>(),
        Binding::factory(Callable::new("logger", move |_, _| {
            created.fetch_add(1, Ordering::SeqCst);
            let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger);
            Ok(Arc::new(logger) as _)
        })),
    );
}

#[test]
fn test_interface_binding_resolves_singleton() -> anyhow::Result<()> {
    let container = Container::new();
    let created = Arc::new(AtomicUsize::new(0));
    bind_logger(&container, created.clone());
    container.define_type::<OrderService>();

    let first = container.resolve::<OrderService>()?;
    let second = container.resolve::<OrderService>()?;

    assert_eq!(first.logger.prefix(), "console");
    assert_eq!(first.region, "eu");
    assert!(Arc::ptr_eq(&first.logger, &second.logger));
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(created.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_explicit_region_overrides_default() -> anyhow::Result<()> {
    let container = Container::new();
    bind_logger(&container, Arc::new(AtomicUsize::new(0)));
    container.define_type::<OrderService>();

    let service = container.make_as::<OrderService>(
        &Identifier::of::<OrderService>(),
        Arguments::new().with("region", String::from("apac")),
    )?;

    assert_eq!(service.region, "apac");
    Ok(())
}

#[test]
fn test_missing_interface_binding_is_argument_error() {
    let container = Container::new();
    container.define_type::<OrderService>();

    match container.resolve::<OrderService>() {
        Err(DependencyError::ArgumentResolving { parameter, .. }) => assert_eq!(parameter, "logger"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("resolution should fail"),
    }
}

#[test]
fn test_container_is_shared_between_threads() {
    let container = Arc::new(Container::new());
    container.bind_instance("counter", AtomicUsize::new(0));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let container = container.clone();
            thread::spawn(move || {
                let counter = container.get_as::<AtomicUsize>("counter").unwrap();
                counter.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let counter = container.get_as::<AtomicUsize>("counter").unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 4);
}

#[test]
fn test_resolution_depth_is_limited() {
    struct First;
    struct Second;
    struct Third;

    let container = Container::with_config(ContainerConfig {
        max_resolution_depth: 2,
        ..ContainerConfig::default()
    });
    container.define(
        TypeDescriptor::builder::<First>()
            .parameter(Parameter::typed::<Second>("second"))
            .build(|_| Ok(First)),
    );
    container.define(
        TypeDescriptor::builder::<Second>()
            .parameter(Parameter::typed::<Third>("third"))
            .build(|_| Ok(Second)),
    );
    container.define(TypeDescriptor::builder::<Third>().build(|_| Ok(Third)));

    assert!(container.resolve::<Second>().is_ok());
    assert!(matches!(
        container.resolve::<First>(),
        Err(DependencyError::ResolutionDepthExceeded { max_depth: 2, .. })
    ));
}

#[test]
fn test_removed_binding_is_no_longer_resolvable() {
    let container = Container::new();
    container.bind_instance("token", String::from("secret"));

    assert!(container.remove_binding("token").is_some());
    assert!(!container.has("token"));
    assert!(container.remove_binding("token").is_none());
}
