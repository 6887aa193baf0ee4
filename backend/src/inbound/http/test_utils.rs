//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::{BlogService, CredentialService, IdentityService, UserDirectoryService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::MemoryStore;
use crate::outbound::security::{Argon2PasswordHasher, HmacTokenCodec};

/// Secret used to sign tokens in handler tests.
pub const TEST_SECRET: &[u8] = b"handler-test-secret";

/// Build handler state over a fresh in-memory store.
///
/// Argon2 runs with minimal cost so tests stay fast. The store is returned
/// so tests can inspect what was persisted.
pub fn memory_state() -> (web::Data<HttpState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let hasher = Arc::new(Argon2PasswordHasher::new(8, 1).expect("cheap argon2 params"));
    let tokens = Arc::new(HmacTokenCodec::new(TEST_SECRET, None).expect("token codec"));
    let credentials = Arc::new(CredentialService::new(store.clone(), hasher, tokens.clone()));
    let blogs = Arc::new(BlogService::new(store.clone(), store.clone()));
    let state = HttpState::new(HttpStatePorts {
        login: credentials.clone(),
        registration: credentials,
        users: Arc::new(UserDirectoryService::new(store.clone(), store.clone())),
        identity: Arc::new(IdentityService::new(store.clone(), tokens)),
        blogs_query: blogs.clone(),
        blogs_command: blogs,
    });
    (web::Data::new(state), store)
}
