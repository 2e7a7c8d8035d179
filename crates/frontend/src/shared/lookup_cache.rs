//! Lazily populated id → display value cache with per-id request dedupe.

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use leptos::prelude::*;

use super::config::LookupSection;
use super::http::ApiError;
use super::runtime::Runtime;

#[derive(Debug, Clone, PartialEq)]
pub enum LookupEntry<V> {
    Pending,
    Resolved(V),
    /// Resolution failed; kept so the id is not requested again.
    Unavailable,
}

pub type Resolver<Id, V> = Rc<dyn Fn(&Id) -> LocalBoxFuture<'static, Result<V, ApiError>>>;

struct CacheInner<Id, V> {
    entries: HashMap<Id, LookupEntry<V>>,
    pending: HashMap<Id, AbortHandle>,
    disposed: bool,
}

impl<Id, V> CacheInner<Id, V> {
    fn abort_pending(&mut self) -> usize {
        let count = self.pending.len();
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
        count
    }
}

impl<Id, V> Drop for CacheInner<Id, V> {
    fn drop(&mut self) {
        self.abort_pending();
    }
}

pub struct LookupCache<Id, V>
where
    Id: Eq + Hash + Clone + std::fmt::Debug + 'static,
    V: Clone + 'static,
{
    label: &'static str,
    inner: Rc<RefCell<CacheInner<Id, V>>>,
    resolver: Resolver<Id, V>,
    runtime: Rc<dyn Runtime>,
    revision: RwSignal<u64>,
}

impl<Id, V> Clone for LookupCache<Id, V>
where
    Id: Eq + Hash + Clone + std::fmt::Debug + 'static,
    V: Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            inner: Rc::clone(&self.inner),
            resolver: Rc::clone(&self.resolver),
            runtime: Rc::clone(&self.runtime),
            revision: self.revision,
        }
    }
}

impl<Id, V> LookupCache<Id, V>
where
    Id: Eq + Hash + Clone + std::fmt::Debug + 'static,
    V: Clone + 'static,
{
    pub fn new<F>(label: &'static str, runtime: Rc<dyn Runtime>, resolver: F) -> Self
    where
        F: Fn(&Id) -> LocalBoxFuture<'static, Result<V, ApiError>> + 'static,
    {
        Self {
            label,
            inner: Rc::new(RefCell::new(CacheInner {
                entries: HashMap::new(),
                pending: HashMap::new(),
                disposed: false,
            })),
            resolver: Rc::new(resolver),
            runtime,
            revision: RwSignal::new(0),
        }
    }

    /// Bumped whenever an entry settles; reading [`LookupCache::lookup`]
    /// inside a reactive scope subscribes to it.
    pub fn revision(&self) -> RwSignal<u64> {
        self.revision
    }

    /// Current entry for `id`, starting a fetch on the first miss.
    pub fn lookup(&self, id: &Id) -> LookupEntry<V> {
        self.revision.track();
        if let Some(entry) = self.inner.borrow().entries.get(id) {
            return entry.clone();
        }
        self.start(id);
        LookupEntry::Pending
    }

    /// Already-known values (e.g. stations that are loaded anyway).
    pub fn seed(&self, id: Id, value: V) {
        let mut inner = self.inner.borrow_mut();
        if let Some(handle) = inner.pending.remove(&id) {
            handle.abort();
        }
        inner.entries.insert(id, LookupEntry::Resolved(value));
        drop(inner);
        self.revision.update(|r| *r += 1);
    }

    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Abort every pending lookup; nothing is written afterwards.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.disposed = true;
        let aborted = inner.abort_pending();
        if aborted > 0 {
            log::debug!("[{}] aborted {} pending lookup(s)", self.label, aborted);
        }
    }

    fn start(&self, id: &Id) {
        let registration = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed || inner.pending.contains_key(id) {
                return;
            }
            let (handle, registration) = AbortHandle::new_pair();
            inner.pending.insert(id.clone(), handle);
            inner.entries.insert(id.clone(), LookupEntry::Pending);
            registration
        };
        log::debug!("[{}] miss for {:?}, resolving", self.label, id);

        let request = (self.resolver)(id);
        let task = settle(
            self.label,
            Rc::downgrade(&self.inner),
            self.revision,
            id.clone(),
            request,
        );
        self.runtime.spawn(Box::pin(async move {
            let _ = Abortable::new(task, registration).await;
        }));
    }
}

impl<Id> LookupCache<Id, String>
where
    Id: Eq + Hash + Clone + std::fmt::Debug + 'static,
{
    /// Text to render for `id`, with the configured placeholders.
    pub fn display(&self, id: &Id, labels: &LookupSection) -> String {
        match self.lookup(id) {
            LookupEntry::Resolved(value) => value,
            LookupEntry::Pending => labels.pending_label.clone(),
            LookupEntry::Unavailable => labels.unavailable_label.clone(),
        }
    }
}

async fn settle<Id, V>(
    label: &'static str,
    inner: Weak<RefCell<CacheInner<Id, V>>>,
    revision: RwSignal<u64>,
    id: Id,
    request: LocalBoxFuture<'static, Result<V, ApiError>>,
) where
    Id: Eq + Hash + std::fmt::Debug,
{
    let result = request.await;
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let entry = match result {
        Ok(value) => LookupEntry::Resolved(value),
        Err(err) if err.is_cancelled() => {
            // Forget the id so the next lookup asks again.
            {
                let mut state = inner.borrow_mut();
                if state.disposed || state.pending.remove(&id).is_none() {
                    return;
                }
                state.entries.remove(&id);
            }
            log::debug!("[{}] lookup for {:?} was cancelled", label, id);
            revision.update(|r| *r += 1);
            return;
        }
        Err(err) => {
            log::warn!("[{}] could not resolve {:?}: {}", label, id, err);
            LookupEntry::Unavailable
        }
    };
    {
        let mut state = inner.borrow_mut();
        if state.disposed || state.pending.remove(&id).is_none() {
            return;
        }
        state.entries.insert(id, entry);
    }
    revision.update(|r| *r += 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::{path_segment, ApiClient};
    use crate::shared::test_support::{with_owner, ScriptedTransport, TestRuntime};
    use crate::system::auth::context::SessionContext;
    use futures::executor::LocalPool;

    fn name_cache(
        runtime: Rc<TestRuntime>,
        transport: Rc<ScriptedTransport>,
    ) -> LookupCache<i64, String> {
        let client = ApiClient::new("http://api", transport, SessionContext::new());
        LookupCache::new("names", runtime, move |id: &i64| {
            let client = client.clone();
            let path = format!("/stations/{}/export", path_segment(&id.to_string()));
            Box::pin(async move {
                let value: serde_json::Value = client.get_json(&path).await?;
                Ok(value["name"].as_str().unwrap_or_default().to_string())
            })
        })
    }

    #[test]
    fn test_concurrent_lookups_are_deduplicated() {
        with_owner(|| {
            let mut pool = LocalPool::new();
            let runtime = TestRuntime::new(&pool);
            let transport = ScriptedTransport::new();
            let cache = name_cache(runtime, transport.clone());
            let labels = LookupSection::default();

            assert_eq!(cache.display(&1, &labels), "Loading...");
            assert_eq!(cache.display(&1, &labels), "Loading...");
            pool.run_until_stalled();
            assert_eq!(transport.request_count(), 1);
            assert_eq!(transport.request(0).url, "http://api/stations/1/export");

            transport.respond(0, 200, r#"{"id":1,"name":"Peace FM"}"#);
            pool.run_until_stalled();
            assert_eq!(cache.display(&1, &labels), "Peace FM");
            assert_eq!(cache.revision().get_untracked(), 1);
            assert_eq!(transport.request_count(), 1);
        });
    }

    #[test]
    fn test_failure_is_cached_as_unavailable() {
        with_owner(|| {
            let mut pool = LocalPool::new();
            let runtime = TestRuntime::new(&pool);
            let transport = ScriptedTransport::new();
            let cache = name_cache(runtime, transport.clone());
            let labels = LookupSection::default();

            cache.lookup(&7);
            pool.run_until_stalled();
            transport.respond(0, 404, r#"{"detail":"Station not found"}"#);
            pool.run_until_stalled();

            assert_eq!(cache.lookup(&7), LookupEntry::Unavailable);
            assert_eq!(cache.display(&7, &labels), "N/A");
            pool.run_until_stalled();
            assert_eq!(transport.request_count(), 1);
        });
    }

    #[test]
    fn test_seeded_values_skip_the_network() {
        with_owner(|| {
            let mut pool = LocalPool::new();
            let runtime = TestRuntime::new(&pool);
            let transport = ScriptedTransport::new();
            let cache = name_cache(runtime, transport.clone());

            cache.seed(3, "Joy FM".to_string());
            assert_eq!(cache.lookup(&3), LookupEntry::Resolved("Joy FM".to_string()));
            pool.run_until_stalled();
            assert_eq!(transport.request_count(), 0);
        });
    }

    #[test]
    fn test_dispose_aborts_pending_lookups() {
        with_owner(|| {
            let mut pool = LocalPool::new();
            let runtime = TestRuntime::new(&pool);
            let transport = ScriptedTransport::new();
            let cache = name_cache(runtime, transport.clone());

            cache.lookup(&1);
            cache.lookup(&2);
            pool.run_until_stalled();
            assert_eq!(cache.pending_count(), 2);

            cache.dispose();
            pool.run_until_stalled();
            assert_eq!(cache.pending_count(), 0);
            assert!(transport.is_aborted(0));
            assert!(transport.is_aborted(1));
            assert_eq!(cache.lookup(&1), LookupEntry::Pending);
            pool.run_until_stalled();
            assert_eq!(transport.request_count(), 2);
        });
    }

    #[test]
    fn test_cancelled_lookup_is_retried() {
        with_owner(|| {
            let mut pool = LocalPool::new();
            let runtime = TestRuntime::new(&pool);
            let transport = ScriptedTransport::new();
            let cache = name_cache(runtime, transport.clone());
            let labels = LookupSection::default();

            cache.lookup(&4);
            pool.run_until_stalled();
            transport.fail(0, ApiError::Cancelled);
            pool.run_until_stalled();
            assert_eq!(cache.pending_count(), 0);

            assert_eq!(cache.display(&4, &labels), "Loading...");
            pool.run_until_stalled();
            assert_eq!(transport.request_count(), 2);
            transport.respond(1, 200, r#"{"id":4,"name":"Adom FM"}"#);
            pool.run_until_stalled();
            assert_eq!(cache.display(&4, &labels), "Adom FM");
        });
    }
}
