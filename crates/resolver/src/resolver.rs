use shared_types::{
    AppConfig, AppError, EntitlementSnapshot, Identity, ProfileUpdate, UserProfile,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;
use tokio::time::Instant;

use crate::api::ProfileApi;
use crate::coalesce::KeyedCoalescer;

/// Resolves the signed-in identity into an [`EntitlementSnapshot`].
///
/// One instance is shared by every consumer; clones share state. The
/// resolver is the only writer of the published snapshot.
pub struct RoleResolver<A> {
    inner: Arc<Inner<A>>,
}

impl<A> Clone for RoleResolver<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> PartialEq for RoleResolver<A> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

struct Inner<A> {
    api: A,
    timeout: Duration,
    cache_ttl: Option<Duration>,
    marketplace: bool,
    cache: Mutex<ProfileCache>,
    coalescer: KeyedCoalescer,
    published: RwLock<Published>,
}

struct CachedProfile {
    profile: UserProfile,
    fetched_at: Instant,
}

/// Generation of a cache key: the sign-out epoch and the per-email counter.
type Generation = (u64, u64);

#[derive(Default)]
struct ProfileCache {
    entries: HashMap<String, CachedProfile>,
    /// Bumped by every invalidation of the email. A fetch may only fill the
    /// cache if the generation it started under is still current.
    generations: HashMap<String, u64>,
    /// Bumped by sign-out, which forgets every email at once.
    epoch: u64,
}

impl ProfileCache {
    fn generation(&self, key: &str) -> Generation {
        (self.epoch, self.generations.get(key).copied().unwrap_or(0))
    }

    fn invalidate(&mut self, key: &str) -> bool {
        *self.generations.entry(key.to_string()).or_default() += 1;
        self.entries.remove(key).is_some()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.generations.clear();
        self.epoch += 1;
    }

    fn insert_if_current(
        &mut self,
        key: &str,
        generation: Generation,
        profile: UserProfile,
    ) -> bool {
        if self.generation(key) != generation {
            return false;
        }
        self.entries.insert(
            key.to_string(),
            CachedProfile {
                profile,
                fetched_at: Instant::now(),
            },
        );
        true
    }
}

struct Published {
    /// Most recently requested lookup key; only its result may be published.
    latest: Option<String>,
    snapshot: EntitlementSnapshot,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<A: ProfileApi> RoleResolver<A> {
    pub fn new(api: A, config: &AppConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                timeout: config.api.profile_timeout(),
                cache_ttl: config.api.cache_ttl(),
                marketplace: config.features.marketplace,
                cache: Mutex::new(ProfileCache::default()),
                coalescer: KeyedCoalescer::new(),
                published: RwLock::new(Published {
                    latest: None,
                    snapshot: EntitlementSnapshot::loading(),
                }),
            }),
        }
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> EntitlementSnapshot {
        let published = self
            .inner
            .published
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        published.snapshot.clone()
    }

    /// Resolve `identity` and return the snapshot published afterwards.
    ///
    /// Without an identity nothing is fetched and the snapshot stays loading.
    /// If another identity is requested while this lookup is in flight, this
    /// lookup's result is discarded and the newer one is returned.
    pub async fn resolve(&self, identity: Option<&Identity>) -> EntitlementSnapshot {
        let Some(email) = identity.and_then(Identity::lookup_key) else {
            self.publish_signed_out();
            return self.snapshot();
        };

        self.begin(&email);
        let snapshot = self.lookup(&email).await;
        self.publish_if_latest(&email, snapshot);
        self.snapshot()
    }

    /// Drop the cached profile so the next `resolve` refetches it.
    pub fn invalidate(&self, email: &str) {
        let key = email.trim().to_lowercase();
        if lock(&self.inner.cache).invalidate(&key) {
            tracing::debug!(email = %key, "profile cache invalidated");
        }
    }

    /// Invalidate and resolve again.
    pub async fn refresh(&self, identity: Option<&Identity>) -> EntitlementSnapshot {
        if let Some(email) = identity.and_then(Identity::lookup_key) {
            self.invalidate(&email);
        }
        self.resolve(identity).await
    }

    /// Forget the session. Lookups still in flight are discarded when they land.
    pub fn sign_out(&self) {
        lock(&self.inner.cache).clear();
        self.publish_signed_out();
        tracing::info!("signed out, entitlements cleared");
    }

    /// Send a profile edit, then refetch so every consumer sees the change.
    pub async fn update_profile(
        &self,
        identity: Option<&Identity>,
        update: &ProfileUpdate,
    ) -> Result<EntitlementSnapshot, AppError> {
        let email = identity
            .and_then(Identity::lookup_key)
            .ok_or_else(|| AppError::not_authenticated("sign in to edit your profile"))?;
        update.check()?;

        match tokio::time::timeout(
            self.inner.timeout,
            self.inner.api.update_profile(&email, update),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(AppError::timeout(format!(
                    "profile update exceeded {}ms",
                    self.inner.timeout.as_millis()
                )))
            }
        }

        Ok(self.refresh(identity).await)
    }

    async fn lookup(&self, email: &str) -> EntitlementSnapshot {
        if let Some(profile) = self.cached(email) {
            tracing::debug!(email = %email, "profile cache hit");
            return EntitlementSnapshot::from_profile(profile);
        }

        // Read before waiting: an invalidation while queued means whatever the
        // lookup ahead of us cached may predate the change.
        let queued = lock(&self.inner.cache).generation(email);
        let _guard = self.inner.coalescer.acquire(email).await;
        let generation = lock(&self.inner.cache).generation(email);
        if generation == queued {
            if let Some(profile) = self.cached(email) {
                tracing::debug!(email = %email, "profile filled by concurrent lookup");
                return EntitlementSnapshot::from_profile(profile);
            }
        }

        let fetched =
            tokio::time::timeout(self.inner.timeout, self.inner.api.fetch_profile(email)).await;
        let snapshot = match fetched {
            Ok(Ok(profile)) => {
                self.check_taxonomy(&profile);
                let cached =
                    lock(&self.inner.cache).insert_if_current(email, generation, profile.clone());
                if !cached {
                    tracing::debug!(email = %email, "discarding profile fetched before invalidation");
                }
                let snapshot = EntitlementSnapshot::from_profile(profile);
                match &snapshot.error {
                    None => tracing::info!(
                        email = %email,
                        role = snapshot.display_role.label(),
                        status = snapshot.status.as_str(),
                        "entitlements resolved"
                    ),
                    Some(err) => tracing::warn!(
                        email = %email,
                        error = %err,
                        "profile has no usable role"
                    ),
                }
                snapshot
            }
            Ok(Err(err)) => {
                tracing::warn!(email = %email, error = %err, "profile lookup failed");
                EntitlementSnapshot::unresolved(email, err)
            }
            Err(_) => {
                let err = AppError::timeout(format!(
                    "profile lookup exceeded {}ms",
                    self.inner.timeout.as_millis()
                ));
                tracing::warn!(email = %email, error = %err, "profile lookup timed out");
                EntitlementSnapshot::unresolved(email, err)
            }
        };
        drop(_guard);
        self.inner.coalescer.prune().await;
        snapshot
    }

    fn cached(&self, email: &str) -> Option<UserProfile> {
        let mut cache = lock(&self.inner.cache);
        let entries = &mut cache.entries;
        let expired = match (entries.get(email), self.inner.cache_ttl) {
            (None, _) => return None,
            (Some(entry), Some(ttl)) => entry.fetched_at.elapsed() >= ttl,
            (Some(_), None) => false,
        };
        if expired {
            entries.remove(email);
            return None;
        }
        entries.get(email).map(|entry| entry.profile.clone())
    }

    fn check_taxonomy(&self, profile: &UserProfile) {
        if profile.is_ventech != self.inner.marketplace {
            tracing::warn!(
                email = %profile.email,
                profile_ventech = profile.is_ventech,
                deployment_marketplace = self.inner.marketplace,
                "profile taxonomy differs from deployment"
            );
        }
    }

    fn begin(&self, email: &str) {
        let mut published = self
            .inner
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if published.latest.as_deref() != Some(email) {
            published.latest = Some(email.to_string());
            published.snapshot = EntitlementSnapshot::pending(email);
        }
    }

    fn publish_if_latest(&self, email: &str, snapshot: EntitlementSnapshot) {
        let mut published = self
            .inner
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if published.latest.as_deref() == Some(email) {
            published.snapshot = snapshot;
        } else {
            tracing::debug!(
                email = %email,
                latest = ?published.latest,
                "discarding stale profile response"
            );
        }
    }

    fn publish_signed_out(&self) {
        let mut published = self
            .inner
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        published.latest = None;
        published.snapshot = EntitlementSnapshot::loading();
    }
}
