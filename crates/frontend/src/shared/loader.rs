//! Data synchronization hook shared by every remote resource.
//!
//! A [`Loader`] owns the lifecycle of one resource key: it issues a request
//! when the key changes or on `refetch`, cancels whatever it had in flight,
//! keeps `loading` visible for a minimum time and turns failures into a
//! message. Only the most recently issued request may touch the state; that
//! is decided by request generation, never by arrival order.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use contracts::domain::a001_station::StationId;
use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use leptos::prelude::*;

use super::http::ApiError;
use super::request_state::RequestState;
use super::runtime::Runtime;

/// Parameters that select a remote entity.
pub trait ResourceKey: Clone + PartialEq + std::fmt::Debug + 'static {
    /// `false` while the key is not usable yet (e.g. no id resolved).
    fn is_resolved(&self) -> bool;
}

impl ResourceKey for () {
    fn is_resolved(&self) -> bool {
        true
    }
}

impl ResourceKey for StationId {
    fn is_resolved(&self) -> bool {
        true
    }
}

impl ResourceKey for String {
    fn is_resolved(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl<K: ResourceKey> ResourceKey for Option<K> {
    fn is_resolved(&self) -> bool {
        self.as_ref().map(ResourceKey::is_resolved).unwrap_or(false)
    }
}

impl<A: ResourceKey, B: ResourceKey> ResourceKey for (A, B) {
    fn is_resolved(&self) -> bool {
        self.0.is_resolved() && self.1.is_resolved()
    }
}

pub type Fetcher<K, T> = Rc<dyn Fn(&K) -> LocalBoxFuture<'static, Result<T, ApiError>>>;

struct InFlight {
    generation: u64,
    abort: AbortHandle,
}

struct LoaderInner<K> {
    key: Option<K>,
    generation: u64,
    in_flight: Option<InFlight>,
    disposed: bool,
}

impl<K> LoaderInner<K> {
    fn cancel_in_flight(&mut self) -> Option<u64> {
        self.in_flight.take().map(|in_flight| {
            in_flight.abort.abort();
            in_flight.generation
        })
    }

    fn is_current(&self, generation: u64) -> bool {
        !self.disposed
            && self
                .in_flight
                .as_ref()
                .map(|in_flight| in_flight.generation == generation)
                .unwrap_or(false)
    }
}

impl<K> Drop for LoaderInner<K> {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

pub struct Loader<K, T>
where
    K: ResourceKey,
    T: Clone + Default + Send + Sync + 'static,
{
    label: &'static str,
    state: RwSignal<RequestState<T>>,
    inner: Rc<RefCell<LoaderInner<K>>>,
    fetcher: Fetcher<K, T>,
    runtime: Rc<dyn Runtime>,
    min_visible_ms: u32,
}

impl<K, T> Clone for Loader<K, T>
where
    K: ResourceKey,
    T: Clone + Default + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            state: self.state,
            inner: Rc::clone(&self.inner),
            fetcher: Rc::clone(&self.fetcher),
            runtime: Rc::clone(&self.runtime),
            min_visible_ms: self.min_visible_ms,
        }
    }
}

impl<K, T> Loader<K, T>
where
    K: ResourceKey,
    T: Clone + Default + Send + Sync + 'static,
{
    pub fn new<F>(label: &'static str, runtime: Rc<dyn Runtime>, min_visible_ms: u32, fetcher: F) -> Self
    where
        F: Fn(&K) -> LocalBoxFuture<'static, Result<T, ApiError>> + 'static,
    {
        Self {
            label,
            state: RwSignal::new(RequestState::default()),
            inner: Rc::new(RefCell::new(LoaderInner {
                key: None,
                generation: 0,
                in_flight: None,
                disposed: false,
            })),
            fetcher: Rc::new(fetcher),
            runtime,
            min_visible_ms,
        }
    }

    /// Reactive state for rendering code.
    pub fn state(&self) -> RwSignal<RequestState<T>> {
        self.state
    }

    /// Untracked copy of the current state.
    pub fn snapshot(&self) -> RequestState<T> {
        self.state.get_untracked()
    }

    pub fn key(&self) -> Option<K> {
        self.inner.borrow().key.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.inner.borrow().in_flight.is_some()
    }

    /// Point the hook at `key`. Issues a request only when the key differs
    /// from the previous one; returns whether it did.
    pub fn set_key(&self, key: K) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed || inner.key.as_ref() == Some(&key) {
                return false;
            }
            inner.key = Some(key);
        }
        self.start();
        true
    }

    /// Re-issue the request for the current key.
    pub fn refetch(&self) {
        self.start();
    }

    /// Local edit of the loaded data (e.g. append a freshly created row).
    pub fn update_data(&self, f: impl FnOnce(&mut T)) {
        self.state.update(|state| f(&mut state.data));
    }

    /// Follow a reactive key; every change goes through [`Loader::set_key`].
    pub fn watch_key(&self, key: Signal<K>)
    where
        K: Send + Sync,
    {
        let this = self.clone();
        Effect::new(move |_| {
            this.set_key(key.get());
        });
    }

    /// Cancel outstanding work; no state is written afterwards.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.disposed = true;
        if let Some(generation) = inner.cancel_in_flight() {
            log::debug!("[{}] request #{} cancelled on teardown", self.label, generation);
        }
    }

    fn start(&self) {
        let (key, generation, registration) = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            if let Some(previous) = inner.cancel_in_flight() {
                log::debug!("[{}] request #{} superseded", self.label, previous);
            }
            let resolved = inner.key.clone().filter(ResourceKey::is_resolved);
            match resolved {
                Some(key) => {
                    inner.generation += 1;
                    let (abort, registration) = AbortHandle::new_pair();
                    inner.in_flight = Some(InFlight {
                        generation: inner.generation,
                        abort,
                    });
                    (key, inner.generation, registration)
                }
                None => {
                    drop(inner);
                    log::debug!("[{}] key not resolved, skipping fetch", self.label);
                    self.state.set(RequestState::default());
                    return;
                }
            }
        };

        log::debug!("[{}] request #{} for {:?}", self.label, generation, key);
        self.state.update(|state| {
            state.loading = true;
            state.error = None;
        });

        let min_visible = self.runtime.sleep(self.min_visible_ms);
        let request = (self.fetcher)(&key);
        let task = settle(
            self.label,
            Rc::downgrade(&self.inner),
            self.state,
            generation,
            request,
            min_visible,
        );
        self.runtime.spawn(Box::pin(async move {
            let _ = Abortable::new(task, registration).await;
        }));
    }
}

/// Commit the outcome of request `generation`, provided it is still the current one.
async fn settle<K, T>(
    label: &'static str,
    inner: Weak<RefCell<LoaderInner<K>>>,
    state: RwSignal<RequestState<T>>,
    generation: u64,
    request: LocalBoxFuture<'static, Result<T, ApiError>>,
    min_visible: LocalBoxFuture<'static, ()>,
) where
    T: Clone + Default + Send + Sync + 'static,
{
    let is_current = |inner: &Weak<RefCell<LoaderInner<K>>>| {
        inner
            .upgrade()
            .map(|inner| {
                let current = inner.borrow().is_current(generation);
                current
            })
            .unwrap_or(false)
    };

    let result = request.await;
    if !is_current(&inner) {
        return;
    }

    match result {
        Ok(data) => state.update(|s| {
            s.data = data;
            s.error = None;
        }),
        Err(err) if err.is_cancelled() => {
            // Aborted underneath us without a successor.
            log::debug!("[{}] request #{} aborted", label, generation);
            if let Some(inner) = inner.upgrade() {
                inner.borrow_mut().in_flight = None;
            }
            state.update(|s| s.loading = false);
            return;
        }
        Err(err) => {
            log::warn!("[{}] request #{} failed: {}", label, generation, err);
            state.update(|s| {
                s.data = T::default();
                s.error = Some(err.to_string());
            });
        }
    }

    min_visible.await;
    if !is_current(&inner) {
        return;
    }
    if let Some(inner) = inner.upgrade() {
        inner.borrow_mut().in_flight = None;
    }
    state.update(|s| s.loading = false);
}
