//! Upload credit balance shared across the client
//!
//! The dashboard only needs a way to say "credits may have changed"; that is
//! the [`CreditsRefresher`] capability it is constructed with. [`CreditsContext`]
//! is the process-wide implementation that keeps the latest balance.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use cloudshare_common::protocol::UserCredits;

use crate::auth::TokenSource;
use crate::transport::{FileTransport, RequestError};

/// Refresh hook invoked after a successful upload
#[async_trait]
pub trait CreditsRefresher: Send + Sync {
    /// Re-read the credit balance; failures are handled by the implementation
    async fn refresh(&self);
}

/// Credit balance fetched from the API and shared by clones
#[derive(Clone)]
pub struct CreditsContext {
    transport: Arc<dyn FileTransport>,
    tokens: Arc<dyn TokenSource>,
    current: Arc<RwLock<Option<UserCredits>>>,
}

impl CreditsContext {
    pub fn new(transport: Arc<dyn FileTransport>, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            transport,
            tokens,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Latest known balance, if any fetch has succeeded
    pub fn current(&self) -> Option<UserCredits> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    /// Fetch the balance and store it
    pub async fn fetch(&self) -> Result<UserCredits, RequestError> {
        let token = self.tokens.token().await?;
        let credits = self.transport.user_credits(&token).await?;
        if let Ok(mut guard) = self.current.write() {
            *guard = Some(credits.clone());
        }
        Ok(credits)
    }
}

#[async_trait]
impl CreditsRefresher for CreditsContext {
    async fn refresh(&self) {
        match self.fetch().await {
            Ok(credits) => tracing::debug!(credits = credits.credits, "refreshed user credits"),
            Err(e) => tracing::error!("Error fetching user credits: {e}"),
        }
    }
}
