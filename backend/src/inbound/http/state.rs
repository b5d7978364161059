//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountRemovalService, LoginService, SignupService};

/// Dependency bundle for account handlers.
#[derive(Clone)]
pub struct HttpState {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub removal: Arc<dyn AccountRemovalService>,
}

impl HttpState {
    /// Construct state from individual port implementations.
    pub fn new(
        signup: Arc<dyn SignupService>,
        login: Arc<dyn LoginService>,
        removal: Arc<dyn AccountRemovalService>,
    ) -> Self {
        Self {
            signup,
            login,
            removal,
        }
    }

    /// Serve every port from one service instance.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::AccountService;
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::persistence::InMemoryAccountStore;
    /// use backend::outbound::security::{BcryptCost, BcryptPasswordHasher};
    ///
    /// let service = AccountService::new(
    ///     Arc::new(InMemoryAccountStore::default()),
    ///     Arc::new(BcryptPasswordHasher::new(BcryptCost::default())),
    /// );
    /// let state = HttpState::from_service(Arc::new(service));
    /// let _login = state.login.clone();
    /// ```
    pub fn from_service<T>(service: Arc<T>) -> Self
    where
        T: SignupService + LoginService + AccountRemovalService + 'static,
    {
        Self {
            signup: service.clone(),
            login: service.clone(),
            removal: service,
        }
    }
}
