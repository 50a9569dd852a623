//! `#[derive(Injectable)]` 与容器协作的集成测试

use di_abstractions::{Arguments, DiContainer, DiContainerExt, Injectable};
use di_impl::Container;
use infrastructure_common::{DependencyError, Identifier};
use injectable_macros::Injectable;
use std::sync::Arc;

trait Notifier: Send + Sync {
    fn channel(&self) -> &'static str;
}

struct MailNotifier;

impl Notifier for MailNotifier {
    fn channel(&self) -> &'static str {
        "mail"
    }
}

#[derive(Debug, Default)]
struct Clock {
    offset: i64,
}

#[derive(Injectable)]
struct Repository {
    #[inject(default = String::from("memory://"))]
    dsn: String,
}

#[derive(Injectable)]
#[injectable(singleton)]
struct OrderService {
    repository: Arc<Repository>,
    #[inject(default)]
    clock: Arc<Clock>,
    notifier: Option<Arc<dyn Notifier>>,
    #[inject(default = 3)]
    retries: u32,
    #[inject(skip)]
    processed: Vec<u64>,
}

#[derive(Injectable)]
#[injectable(id = "reports")]
struct ReportService {
    #[inject(id = "reports.title")]
    title: Arc<String>,
    notifier: Arc<dyn Notifier>,
}

#[derive(Injectable)]
struct Heartbeat;

fn bind_notifier(container: &Container) {
    let notifier: Arc<dyn Notifier> = Arc::new(MailNotifier);
    container.bind_instance(Identifier::of::<dyn Notifier>(), notifier);
}

#[test]
fn test_descriptor_parameters_follow_fields() {
    let descriptor = OrderService::descriptor();
    let names: Vec<_> = descriptor
        .constructor()
        .parameters()
        .iter()
        .map(|parameter| parameter.name().to_owned())
        .collect();

    assert_eq!(names, vec!["repository", "clock", "notifier", "retries"]);
    assert!(descriptor.is_singleton());
    assert_eq!(descriptor.id(), &Identifier::of::<OrderService>());

    let notifier = &descriptor.constructor().parameters()[2];
    assert!(notifier.is_nullable());
    assert_eq!(notifier.declared_type(), Some(&Identifier::of::<dyn Notifier>()));
}

#[test]
fn test_defaults_and_nested_resolution() -> anyhow::Result<()> {
    let container = Container::new();
    container.define_type::<Repository>();
    container.define_type::<OrderService>();

    let service = container.resolve::<OrderService>()?;

    assert_eq!(service.repository.dsn, "memory://");
    assert_eq!(service.clock.offset, 0);
    assert!(service.notifier.is_none());
    assert_eq!(service.retries, 3);
    assert!(service.processed.is_empty());
    Ok(())
}

#[test]
fn test_singleton_descriptor_is_memoized() -> anyhow::Result<()> {
    let container = Container::new();
    container.define_type::<Repository>();
    container.define_type::<OrderService>();
    bind_notifier(&container);

    let first = container.resolve::<OrderService>()?;
    let second = container.resolve::<OrderService>()?;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        first.notifier.as_ref().map(|notifier| notifier.channel()),
        Some("mail")
    );
    Ok(())
}

#[test]
fn test_explicit_arguments_override_fields() -> anyhow::Result<()> {
    let container = Container::new();
    container.define_type::<Repository>();
    container.define_type::<OrderService>();

    let service = container.make_as::<OrderService>(
        &Identifier::of::<OrderService>(),
        Arguments::new()
            .with("retries", 7_u32)
            .with_arc("clock", Arc::new(Clock { offset: 60 })),
    )?;

    assert_eq!(service.retries, 7);
    assert_eq!(service.clock.offset, 60);
    Ok(())
}

#[test]
fn test_custom_identifiers() -> anyhow::Result<()> {
    let container = Container::new();
    container.define_type::<ReportService>();
    container.bind_instance("reports.title", String::from("weekly"));
    bind_notifier(&container);

    assert!(container.is_defined("reports"));
    let report = container.get_as::<ReportService>("reports")?;

    assert_eq!(report.title.as_str(), "weekly");
    assert_eq!(report.notifier.channel(), "mail");
    Ok(())
}

#[test]
fn test_missing_interface_fails() {
    let container = Container::new();
    container.define_type::<ReportService>();
    container.bind_instance("reports.title", String::from("weekly"));

    let error = container.get("reports").unwrap_err();

    assert!(matches!(
        error,
        DependencyError::ArgumentResolving { ref parameter, .. } if parameter == "notifier"
    ));
}

#[test]
fn test_unit_struct_has_no_parameters() -> anyhow::Result<()> {
    let container = Container::new();
    container.define_type::<Heartbeat>();

    assert!(Heartbeat::descriptor().constructor().parameters().is_empty());
    container.resolve::<Heartbeat>()?;
    Ok(())
}
