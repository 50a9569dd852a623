use di_abstractions::{Injectable, TypeDescriptor};
use injectable_macros::Injectable;
use std::sync::Arc;

trait Clock: Send + Sync {}

#[derive(Default)]
struct Settings;

#[derive(Injectable)]
#[injectable(singleton, id = "scheduler")]
struct Scheduler {
    settings: Arc<Settings>,
    clock: Option<Arc<dyn Clock>>,
    #[inject(default = 30)]
    interval: u64,
    #[inject(skip)]
    ticks: Vec<u64>,
}

#[derive(Injectable)]
struct Marker;

fn main() {
    let descriptor: TypeDescriptor = Scheduler::descriptor();
    assert_eq!(descriptor.id().as_str(), "scheduler");
    assert!(descriptor.is_singleton());
    assert_eq!(descriptor.constructor().parameters().len(), 3);

    assert!(Marker::descriptor().constructor().parameters().is_empty());
}
