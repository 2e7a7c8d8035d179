//! Deterministic runtime and transport for lifecycle tests.

use std::cell::RefCell;
use std::rc::Rc;

use any_spawner::Executor;
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use leptos::prelude::Owner;

use super::http::{ApiError, ApiRequest, ApiResponse, HttpTransport};
use super::runtime::Runtime;

/// Run a test body inside a reactive owner.
pub fn with_owner<T>(f: impl FnOnce() -> T) -> T {
    let owner = Owner::new();
    owner.with(f)
}

/// Like [`with_owner`], but `Effect`s get an executor. They only make
/// progress when [`run_effects`] is called.
pub fn with_effects<T>(f: impl FnOnce() -> T) -> T {
    // Already set by another test on a different thread: the pool is per thread anyway.
    let _ = Executor::init_futures_executor();
    with_owner(f)
}

/// Run every effect that is due on this thread.
pub fn run_effects() {
    Executor::poll_local();
}

struct TestTimer {
    ms: u32,
    sender: Option<oneshot::Sender<()>>,
}

/// Timers only fire when the test says so.
pub struct TestRuntime {
    spawner: LocalSpawner,
    timers: RefCell<Vec<TestTimer>>,
}

impl TestRuntime {
    pub fn new(pool: &LocalPool) -> Rc<Self> {
        Rc::new(Self {
            spawner: pool.spawner(),
            timers: RefCell::new(Vec::new()),
        })
    }

    pub fn timer_count(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn timer_ms(&self, index: usize) -> u32 {
        self.timers.borrow()[index].ms
    }

    /// Fire a timer; `false` when nobody is waiting on it anymore.
    pub fn fire_timer(&self, index: usize) -> bool {
        let sender = self.timers.borrow_mut()[index].sender.take();
        match sender {
            Some(sender) => sender.send(()).is_ok(),
            None => false,
        }
    }

    /// The waiting side of the timer was dropped.
    pub fn timer_cancelled(&self, index: usize) -> bool {
        self.timers.borrow()[index]
            .sender
            .as_ref()
            .map(|sender| sender.is_canceled())
            .unwrap_or(true)
    }
}

impl Runtime for TestRuntime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner.spawn_local(task).expect("local pool is alive");
    }

    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        let (sender, receiver) = oneshot::channel();
        self.timers.borrow_mut().push(TestTimer {
            ms,
            sender: Some(sender),
        });
        Box::pin(async move {
            let _ = receiver.await;
        })
    }
}

type Reply = Result<ApiResponse, ApiError>;

/// Records requests and resolves them whenever (and in whatever order) the test chooses.
#[derive(Default)]
pub struct ScriptedTransport {
    requests: RefCell<Vec<ApiRequest>>,
    replies: RefCell<Vec<Option<oneshot::Sender<Reply>>>>,
}

impl ScriptedTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn request(&self, index: usize) -> ApiRequest {
        self.requests.borrow()[index].clone()
    }

    /// Reply with a status and body; `false` when the request was already dropped.
    pub fn respond(&self, index: usize, status: u16, body: &str) -> bool {
        self.reply(
            index,
            Ok(ApiResponse {
                status,
                body: body.to_string(),
            }),
        )
    }

    pub fn fail(&self, index: usize, error: ApiError) -> bool {
        self.reply(index, Err(error))
    }

    /// The caller stopped waiting for this request (it was aborted).
    pub fn is_aborted(&self, index: usize) -> bool {
        self.replies.borrow()[index]
            .as_ref()
            .map(|sender| sender.is_canceled())
            .unwrap_or(false)
    }

    fn reply(&self, index: usize, reply: Reply) -> bool {
        let sender = self.replies.borrow_mut()[index].take();
        match sender {
            Some(sender) => sender.send(reply).is_ok(),
            None => false,
        }
    }
}

impl HttpTransport for ScriptedTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'static, Result<ApiResponse, ApiError>> {
        let (sender, receiver) = oneshot::channel();
        self.requests.borrow_mut().push(request);
        self.replies.borrow_mut().push(Some(sender));
        Box::pin(async move {
            receiver
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("transport dropped".into())))
        })
    }
}
