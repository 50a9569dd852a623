//! # 依赖注入具体实现
//!
//! 提供具体的绑定注册表、解析器和容器实现。
//!
//! ```rust
//! use di_abstractions::{Binding, DiContainer, DiContainerExt, Parameter, TypeDescriptor};
//! use di_impl::Container;
//!
//! #[derive(Debug)]
//! struct Greeter {
//!     greeting: String,
//! }
//!
//! let container = Container::new();
//! container.define(
//!     TypeDescriptor::builder::<Greeter>()
//!         .parameter(Parameter::named("greeting").with_default(String::from("hello")))
//!         .build(|args| Ok(Greeter { greeting: args.value("greeting")? })),
//! );
//! container.bind_singleton("greeter".into(), Binding::concrete_of::<Greeter>());
//!
//! let greeter = container.get_as::<Greeter>("greeter").unwrap();
//! assert_eq!(greeter.greeting, "hello");
//! assert!(container.has_instance("greeter"));
//! ```

pub mod container;
pub mod registry;
pub mod resolver;

pub use container::Container;
pub use registry::BindingRegistryImpl;
pub use resolver::ContainerResolver;
