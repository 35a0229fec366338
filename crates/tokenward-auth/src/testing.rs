//! Shared fixtures for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::DateTime;
use uuid::Uuid;

use tokenward_cache::CacheManager;
use tokenward_cache::memory::MemoryCacheProvider;
use tokenward_core::config::{MemoryCacheConfig, TokenConfig};
use tokenward_core::result::AppResult;
use tokenward_entity::identity::Identity;

use crate::directory::{CredentialVerifier, IdentityProvider};
use crate::expiry::ManualClock;

pub fn token_config() -> TokenConfig {
    TokenConfig {
        secret_key: "unit-test-secret".to_string(),
        ..TokenConfig::default()
    }
}

pub fn fixed_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
    ))
}

pub fn alice() -> Identity {
    Identity {
        id: Uuid::from_u128(0xa11ce),
        username: "alice".to_string(),
        email: Some("alice@example.com".to_string()),
        display_name: None,
    }
}

pub fn memory_cache() -> CacheManager {
    CacheManager::from_provider(Arc::new(MemoryCacheProvider::new(&MemoryCacheConfig {
        max_capacity: 1000,
    })))
}

/// Identities keyed by id, with plaintext passwords.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    users: Mutex<HashMap<Uuid, (Identity, String)>>,
}

impl StaticDirectory {
    pub fn with(identity: Identity, password: &str) -> Arc<Self> {
        let directory = Self::default();
        directory.insert(identity, password);
        Arc::new(directory)
    }

    pub fn insert(&self, identity: Identity, password: &str) {
        self.users
            .lock()
            .unwrap()
            .insert(identity.id, (identity, password.to_string()));
    }

    pub fn remove(&self, id: Uuid) {
        self.users.lock().unwrap().remove(&id);
    }
}

#[async_trait]
impl IdentityProvider for StaticDirectory {
    async fn find_identity(&self, subject_id: Uuid) -> AppResult<Option<Identity>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(&subject_id)
            .map(|(identity, _)| identity.clone()))
    }
}

#[async_trait]
impl CredentialVerifier for StaticDirectory {
    async fn verify_credentials(&self, username: &str, password: &str) -> AppResult<Option<Identity>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|(identity, secret)| identity.username == username && secret == password)
            .map(|(identity, _)| identity.clone()))
    }
}
