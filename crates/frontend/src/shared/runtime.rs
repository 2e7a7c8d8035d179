//! Spawning and timers behind a seam, so request lifecycles can be driven
//! deterministically off the browser.

use futures::future::LocalBoxFuture;

pub trait Runtime {
    /// Run a task on the single-threaded event loop.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);

    /// A timer that starts counting when this is called, not when first polled.
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;
}

/// Leptos task queue plus `setTimeout`-backed timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserRuntime;

impl Runtime for BrowserRuntime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }

    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        Box::pin(gloo_timers::future::TimeoutFuture::new(ms))
    }
}
