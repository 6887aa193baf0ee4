//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BlogsCommand, BlogsQuery, IdentityResolver, LoginService, UserRegistration, UsersQuery,
};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub users: Arc<dyn UsersQuery>,
    pub identity: Arc<dyn IdentityResolver>,
    pub blogs_query: Arc<dyn BlogsQuery>,
    pub blogs_command: Arc<dyn BlogsCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub users: Arc<dyn UsersQuery>,
    pub identity: Arc<dyn IdentityResolver>,
    pub blogs_query: Arc<dyn BlogsQuery>,
    pub blogs_command: Arc<dyn BlogsCommand>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            users,
            identity,
            blogs_query,
            blogs_command,
        } = ports;
        Self {
            login,
            registration,
            users,
            identity,
            blogs_query,
            blogs_command,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
