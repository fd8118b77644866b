//! Optimistic removal of entities from cached list pages.
//!
//! Wraps a remote delete so UI-bound list state updates before the
//! network round-trip settles: snapshot the cached page, patch the
//! target row out, await the delete, then either keep the patched page
//! and flag related keys stale (success) or restore the snapshot
//! (failure). The coordinator only touches the cache; surfacing errors
//! to the operator stays with the caller.
//!
//! Overlapping deletes against the same key each capture their own
//! snapshot and patch the then-current page; the last applied patch
//! wins on the shared slot and each failure rolls back to its own
//! snapshot. No merging of concurrent optimistic edits is attempted.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use metrics::counter;
use tracing::{debug, warn};
use uuid::Uuid;

use crewdeck_api_types::ListPage;

use super::keys::{ListKey, QueryKey};
use super::store::ListStore;

const METRIC_ROLLBACK: &str = "crewdeck_optimistic_rollback_total";

/// Rollback state captured by [`OptimisticListDelete::on_mutate`].
///
/// Holds at most one snapshot per in-flight mutation. A context without
/// a snapshot means nothing was cached when the mutation started, so
/// rollback is a no-op.
#[derive(Debug)]
pub struct MutationContext<T> {
    target_id: Uuid,
    snapshot: Option<ListPage<T>>,
}

impl<T> MutationContext<T> {
    pub fn target_id(&self) -> Uuid {
        self.target_id
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }
}

/// Coordinates one optimistic list deletion against an injected store.
///
/// `item_id` extracts an entity's identifier for removal matching;
/// `delete_id` extracts the target identifier from the caller's
/// mutation input, which need not be the bare id.
pub struct OptimisticListDelete<S, T, In> {
    store: Arc<S>,
    query_key: ListKey,
    invalidate_keys: Vec<QueryKey>,
    item_id: fn(&T) -> Uuid,
    delete_id: fn(&In) -> Uuid,
    success_hook: Option<Box<dyn Fn(&In) + Send + Sync>>,
    _entity: PhantomData<fn() -> T>,
}

impl<S, T, In> OptimisticListDelete<S, T, In>
where
    S: ListStore<T>,
    T: Clone,
{
    pub fn new(
        store: Arc<S>,
        query_key: ListKey,
        item_id: fn(&T) -> Uuid,
        delete_id: fn(&In) -> Uuid,
    ) -> Self {
        Self {
            store,
            query_key,
            invalidate_keys: Vec::new(),
            item_id,
            delete_id,
            success_hook: None,
            _entity: PhantomData,
        }
    }

    /// Also flag `key` stale after a confirmed delete, e.g. an
    /// aggregate snapshot the removed entity contributed to.
    pub fn invalidate(mut self, key: QueryKey) -> Self {
        self.invalidate_keys.push(key);
        self
    }

    /// Side-effect to run after server confirmation, before stale
    /// marking callers observe on the next read.
    pub fn with_success_hook(mut self, hook: impl Fn(&In) + Send + Sync + 'static) -> Self {
        self.success_hook = Some(Box::new(hook));
        self
    }

    /// Patch the cached page before the delete is dispatched.
    ///
    /// Removes the target entity from the cached items and decrements
    /// the total count only when the entity was present. Returns the
    /// rollback context; when nothing is cached under the key this is a
    /// no-op and the context carries no snapshot.
    pub fn on_mutate(&self, input: &In) -> MutationContext<T> {
        let target_id = (self.delete_id)(input);

        let Some(current) = self.store.get_page(&self.query_key) else {
            debug!(%target_id, key = ?self.query_key, "No cached page to patch");
            return MutationContext {
                target_id,
                snapshot: None,
            };
        };

        let snapshot = current.clone();
        let mut patched = current;
        let before = patched.items.len();
        patched.items.retain(|item| (self.item_id)(item) != target_id);
        let removed = before - patched.items.len();
        if removed > 0 {
            patched.total = patched.total.saturating_sub(removed as u64);
        }
        self.store.put_page(self.query_key, patched);

        debug!(%target_id, removed, key = ?self.query_key, "Applied optimistic removal");
        MutationContext {
            target_id,
            snapshot: Some(snapshot),
        }
    }

    /// Restore the pre-mutation snapshot after a failed delete.
    ///
    /// The delete error itself is left to the caller's reporting path;
    /// this only guarantees the cache matches its pre-mutation state.
    pub fn on_error(&self, context: MutationContext<T>) {
        if let Some(snapshot) = context.snapshot {
            self.store.put_page(self.query_key, snapshot);
            counter!(METRIC_ROLLBACK).increment(1);
            warn!(
                target_id = %context.target_id,
                key = ?self.query_key,
                "Rolled back optimistic removal"
            );
        }
    }

    /// Reconcile after a confirmed delete.
    ///
    /// The patched page already reflects the end state, so the cache is
    /// not re-patched; instead the list key and every registered
    /// invalidation key are flagged stale so the next read refetches
    /// against the server's authoritative state.
    pub fn on_success(&self, input: &In, _context: &MutationContext<T>) {
        if let Some(hook) = &self.success_hook {
            hook(input);
        }
        self.store.mark_stale(&QueryKey::List(self.query_key));
        for key in &self.invalidate_keys {
            self.store.mark_stale(key);
        }
    }

    /// Extension point invoked after either outcome. No cache action at
    /// this layer; callers hang UI cleanup (e.g. a "deleting" flag) here.
    pub fn on_settled(&self) {}

    /// Drive one delete end to end: snapshot and patch synchronously,
    /// await the remote call, then reconcile on the outcome. The
    /// delegate's error is passed through untouched.
    pub async fn run<F, Fut, E>(&self, input: In, delete: F) -> Result<(), E>
    where
        In: Clone,
        F: FnOnce(In) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let context = self.on_mutate(&input);
        match delete(input.clone()).await {
            Ok(()) => {
                self.on_success(&input, &context);
                self.on_settled();
                Ok(())
            }
            Err(error) => {
                self.on_error(context);
                self.on_settled();
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use crate::cache::keys::ResourceKind;
    use crate::cache::store::StaleMarker;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: Uuid,
    }

    fn row(id: Uuid) -> Row {
        Row { id }
    }

    /// Minimal store standing in for the query cache.
    #[derive(Default)]
    struct MemoryStore {
        pages: Mutex<HashMap<ListKey, ListPage<Row>>>,
        stale: Mutex<HashSet<QueryKey>>,
    }

    impl StaleMarker for MemoryStore {
        fn mark_stale(&self, key: &QueryKey) {
            self.stale.lock().expect("stale lock").insert(*key);
        }

        fn is_stale(&self, key: &QueryKey) -> bool {
            self.stale.lock().expect("stale lock").contains(key)
        }

        fn clear_stale(&self, key: &QueryKey) {
            self.stale.lock().expect("stale lock").remove(key);
        }
    }

    impl ListStore<Row> for MemoryStore {
        fn get_page(&self, key: &ListKey) -> Option<ListPage<Row>> {
            self.pages.lock().expect("pages lock").get(key).cloned()
        }

        fn put_page(&self, key: ListKey, page: ListPage<Row>) {
            self.pages.lock().expect("pages lock").insert(key, page);
        }
    }

    fn key() -> ListKey {
        ListKey::new(ResourceKind::Agents, 0, 0)
    }

    fn coordinator(store: &Arc<MemoryStore>) -> OptimisticListDelete<MemoryStore, Row, Uuid> {
        OptimisticListDelete::new(Arc::clone(store), key(), |item| item.id, |id| *id)
    }

    fn seeded(ids: &[Uuid]) -> (Arc<MemoryStore>, ListPage<Row>) {
        let store = Arc::new(MemoryStore::default());
        let page = ListPage {
            items: ids.iter().copied().map(row).collect(),
            total: ids.len() as u64,
            limit: 25,
            offset: 0,
        };
        store.put_page(key(), page.clone());
        (store, page)
    }

    #[test]
    fn on_mutate_removes_target_and_decrements_total() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let (store, _) = seeded(&[a, b, c]);

        let context = coordinator(&store).on_mutate(&b);

        assert!(context.has_snapshot());
        assert_eq!(context.target_id(), b);
        let patched = store.get_page(&key()).expect("patched page");
        assert_eq!(patched.items, vec![row(a), row(c)]);
        assert_eq!(patched.total, 2);
    }

    #[test]
    fn on_error_restores_exact_snapshot() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let (store, original) = seeded(&[a, b, c]);
        let coordinator = coordinator(&store);

        let context = coordinator.on_mutate(&b);
        coordinator.on_error(context);

        assert_eq!(store.get_page(&key()).expect("restored page"), original);
    }

    #[test]
    fn on_success_keeps_patch_and_marks_related_keys_stale() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let (store, _) = seeded(&[a, b]);
        let coordinator = coordinator(&store).invalidate(QueryKey::DashboardMetrics);

        let context = coordinator.on_mutate(&b);
        coordinator.on_success(&b, &context);

        let patched = store.get_page(&key()).expect("patched page");
        assert_eq!(patched.items, vec![row(a)]);
        assert!(store.is_stale(&QueryKey::List(key())));
        assert!(store.is_stale(&QueryKey::DashboardMetrics));
    }

    #[test]
    fn absent_target_leaves_page_unchanged() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let (store, original) = seeded(&[a, b]);
        let coordinator = coordinator(&store);

        let context = coordinator.on_mutate(&Uuid::new_v4());

        assert_eq!(store.get_page(&key()).expect("page"), original);

        // Rollback still restores exactly the original.
        coordinator.on_error(context);
        assert_eq!(store.get_page(&key()).expect("page"), original);
    }

    #[test]
    fn missing_cache_entry_is_a_noop() {
        let store = Arc::new(MemoryStore::default());
        let coordinator = coordinator(&store);

        let context = coordinator.on_mutate(&Uuid::new_v4());
        assert!(!context.has_snapshot());

        coordinator.on_error(context);
        assert!(store.get_page(&key()).is_none());
    }

    #[test]
    fn overlapping_deletes_roll_back_to_their_own_snapshots() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let (store, _) = seeded(&[a, b, c]);
        let coordinator = coordinator(&store);

        // First delete (b) patches the original page.
        let first = coordinator.on_mutate(&b);
        // Second delete (c) patches the then-current, b-less page.
        let second = coordinator.on_mutate(&c);

        let patched = store.get_page(&key()).expect("patched page");
        assert_eq!(patched.items, vec![row(a)]);
        assert_eq!(patched.total, 1);

        // Second delete fails: restore its snapshot, which still has c
        // but not b.
        coordinator.on_error(second);
        let restored = store.get_page(&key()).expect("restored page");
        assert_eq!(restored.items, vec![row(a), row(c)]);
        assert_eq!(restored.total, 2);

        // First delete succeeds afterwards; the patched state stands.
        coordinator.on_success(&b, &first);
        assert!(store.is_stale(&QueryKey::List(key())));
    }

    #[tokio::test]
    async fn run_reconciles_on_success() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let (store, _) = seeded(&[a, b]);
        let coordinator = coordinator(&store);

        let result: Result<(), &str> = coordinator.run(b, |_| async { Ok(()) }).await;

        assert!(result.is_ok());
        let page = store.get_page(&key()).expect("page");
        assert_eq!(page.items, vec![row(a)]);
        assert!(store.is_stale(&QueryKey::List(key())));
    }

    #[tokio::test]
    async fn run_rolls_back_and_passes_error_through() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let (store, original) = seeded(&[a, b]);
        let coordinator = coordinator(&store);

        let result: Result<(), &str> =
            coordinator.run(b, |_| async { Err("delete rejected") }).await;

        assert_eq!(result, Err("delete rejected"));
        assert_eq!(store.get_page(&key()).expect("page"), original);
        assert!(!store.is_stale(&QueryKey::List(key())));
    }

    #[tokio::test]
    async fn success_hook_runs_before_stale_marking_is_observed() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let (store, _) = seeded(&[a, b]);
        let observed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&observed);
        let coordinator = coordinator(&store).with_success_hook(move |input: &Uuid| {
            sink.lock().expect("sink lock").push(*input);
        });

        let result: Result<(), &str> = coordinator.run(b, |_| async { Ok(()) }).await;

        assert!(result.is_ok());
        assert_eq!(*observed.lock().expect("sink lock"), vec![b]);
    }
}
