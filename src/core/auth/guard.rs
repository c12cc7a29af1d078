//! Navigation guard.
//!
//! Runs before every navigation. Provider initialization happens exactly once
//! per application lifetime; concurrent navigation attempts queue on the
//! in-flight initialization instead of racing a checked-then-set flag. A
//! failed initialization is logged and treated as "not authenticated" — it is
//! never retried and never fatal.

use std::sync::{Arc, Mutex};

use futures::channel::oneshot;

use super::keycloak::{InitOutcome, LoadPolicy, PendingRedirect};
use super::AuthError;
use crate::core::routes::RouteMeta;

/// Realm role that grants access to the portal (coaches only).
pub const COACH_ROLE: &str = "coach";

/// Landing-route target for authenticated users without the coach role.
pub const FORBIDDEN_REDIRECT: &str = "/?forbidden=1";

/// Seam between the guard and the identity provider, mockable in tests.
pub trait IdentityProvider {
    fn is_authenticated(&self) -> bool;
    fn has_role(&self, role: &str) -> bool;
    fn login(&self) -> PendingRedirect;
    fn init(
        &self,
        policy: LoadPolicy,
    ) -> impl Future<Output = Result<InitOutcome, AuthError>>;
}

/// What a navigation attempt resolves to. Every attempt resolves to exactly
/// one of these; there is no fatal path.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Render the target route.
    Allow,
    /// Cancel the navigation and follow the login redirect; the returning
    /// leg re-enters the guard.
    Login(PendingRedirect),
    /// Authenticated but missing the coach role; send the user to the
    /// flagged landing route.
    Forbidden { redirect_to: String },
}

enum InitPhase {
    Uninitialized,
    /// Waiters to wake once the in-flight initialization settles.
    Initializing(Vec<oneshot::Sender<()>>),
    Ready,
}

pub struct RouteGuard<P> {
    provider: Arc<P>,
    phase: Mutex<InitPhase>,
}

impl<P: IdentityProvider> RouteGuard<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            phase: Mutex::new(InitPhase::Uninitialized),
        }
    }

    /// Decide a navigation attempt against the target route's metadata.
    pub async fn check(&self, meta: RouteMeta) -> GuardOutcome {
        self.ensure_initialized().await;

        if !meta.requires_auth {
            return GuardOutcome::Allow;
        }
        if !self.provider.is_authenticated() {
            return GuardOutcome::Login(self.provider.login());
        }
        if !self.provider.has_role(COACH_ROLE) {
            return GuardOutcome::Forbidden {
                redirect_to: FORBIDDEN_REDIRECT.to_string(),
            };
        }
        GuardOutcome::Allow
    }

    /// Run provider initialization once; later callers either pass straight
    /// through or wait for the in-flight run to settle.
    async fn ensure_initialized(&self) {
        let waiter = {
            let mut phase = self.lock_phase();
            match &mut *phase {
                InitPhase::Ready => return,
                InitPhase::Initializing(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
                InitPhase::Uninitialized => {
                    *phase = InitPhase::Initializing(Vec::new());
                    None
                }
            }
        };

        match waiter {
            Some(rx) => {
                // Sender dropping also means the run settled.
                let _ = rx.await;
            }
            None => {
                if let Err(e) = self.provider.init(LoadPolicy::CheckSso).await {
                    leptos::logging::error!("identity provider initialization failed: {e}");
                }
                let waiters =
                    match std::mem::replace(&mut *self.lock_phase(), InitPhase::Ready) {
                        InitPhase::Initializing(waiters) => waiters,
                        _ => Vec::new(),
                    };
                for tx in waiters {
                    let _ = tx.send(());
                }
            }
        }
    }

    fn lock_phase(&self) -> std::sync::MutexGuard<'_, InitPhase> {
        // Single-threaded event loop; a poisoned lock can only mean a
        // panicked init run, whose state is still usable.
        self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::routes;
    use futures::executor::block_on;
    use futures::join;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeProvider {
        authenticated: bool,
        roles: Vec<&'static str>,
        fail_init: bool,
        init_calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(authenticated: bool, roles: Vec<&'static str>) -> Self {
            Self {
                authenticated,
                roles,
                fail_init: false,
                init_calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail_init: true,
                ..Self::new(false, Vec::new())
            }
        }

        fn init_count(&self) -> usize {
            self.init_calls.load(Ordering::SeqCst)
        }
    }

    impl IdentityProvider for FakeProvider {
        fn is_authenticated(&self) -> bool {
            self.authenticated
        }

        fn has_role(&self, role: &str) -> bool {
            self.authenticated && self.roles.contains(&role)
        }

        fn login(&self) -> PendingRedirect {
            PendingRedirect::new("https://sso.example.org/login")
        }

        async fn init(&self, _policy: LoadPolicy) -> Result<InitOutcome, AuthError> {
            self.init_calls.fetch_add(1, Ordering::SeqCst);
            // Suspend once so overlapping navigations can observe the
            // in-flight state; wake ourselves so `block_on` re-polls.
            let mut yielded = false;
            futures::future::poll_fn(|cx| {
                if yielded {
                    std::task::Poll::Ready(())
                } else {
                    yielded = true;
                    cx.waker().wake_by_ref();
                    std::task::Poll::Pending
                }
            })
            .await;
            if self.fail_init {
                return Err(AuthError::Network("sso unreachable".to_string()));
            }
            Ok(if self.authenticated {
                InitOutcome::Authenticated
            } else {
                InitOutcome::Anonymous
            })
        }
    }

    fn guard_with(provider: FakeProvider) -> (RouteGuard<FakeProvider>, Arc<FakeProvider>) {
        let provider = Arc::new(provider);
        (RouteGuard::new(provider.clone()), provider)
    }

    #[test]
    fn public_route_allows_unauthenticated_sessions() {
        let (guard, _) = guard_with(FakeProvider::new(false, vec![]));
        let outcome = block_on(guard.check(routes::HOME));
        assert_eq!(outcome, GuardOutcome::Allow);
    }

    #[test]
    fn protected_route_sends_unauthenticated_sessions_to_login() {
        let (guard, _) = guard_with(FakeProvider::new(false, vec![]));
        match block_on(guard.check(routes::DASHBOARD)) {
            GuardOutcome::Login(redirect) => {
                assert_eq!(redirect.url(), "https://sso.example.org/login");
            }
            other => panic!("expected login redirect, got {other:?}"),
        }
    }

    #[test]
    fn protected_route_without_coach_role_is_forbidden() {
        let (guard, _) = guard_with(FakeProvider::new(true, vec!["offline_access"]));
        assert_eq!(
            block_on(guard.check(routes::DASHBOARD)),
            GuardOutcome::Forbidden {
                redirect_to: FORBIDDEN_REDIRECT.to_string()
            }
        );
    }

    #[test]
    fn coach_passes_the_guard() {
        let (guard, _) = guard_with(FakeProvider::new(true, vec!["coach"]));
        assert_eq!(block_on(guard.check(routes::ENROLL_TEAM)), GuardOutcome::Allow);
    }

    #[test]
    fn init_runs_once_across_navigations() {
        let (guard, provider) = guard_with(FakeProvider::new(true, vec!["coach"]));
        block_on(async {
            guard.check(routes::HOME).await;
            guard.check(routes::DASHBOARD).await;
            guard.check(routes::TEAM_DETAIL).await;
        });
        assert_eq!(provider.init_count(), 1);
    }

    #[test]
    fn concurrent_navigations_share_one_initialization() {
        let (guard, provider) = guard_with(FakeProvider::new(true, vec!["coach"]));
        let (a, b) = block_on(async {
            join!(guard.check(routes::DASHBOARD), guard.check(routes::ENROLL_CLASS))
        });
        assert_eq!(a, GuardOutcome::Allow);
        assert_eq!(b, GuardOutcome::Allow);
        assert_eq!(provider.init_count(), 1);
    }

    #[test]
    fn failed_init_is_unauthenticated_and_never_retried() {
        let (guard, provider) = guard_with(FakeProvider::failing());
        let first = block_on(guard.check(routes::DASHBOARD));
        assert!(matches!(first, GuardOutcome::Login(_)));
        // Subsequent navigations do not re-run init.
        let second = block_on(guard.check(routes::DASHBOARD));
        assert!(matches!(second, GuardOutcome::Login(_)));
        assert_eq!(provider.init_count(), 1);

        // Public routes still resolve after a failed init.
        assert_eq!(block_on(guard.check(routes::HOME)), GuardOutcome::Allow);
    }
}
