//! PushFlow backend REST client.
//!
//! Typed access to the public user endpoints: registration of a
//! user/device pair and preference updates.

mod request;
mod users;

pub mod models;

pub use models::RegisterUserRequest;

/// Backend client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    pub(super) http: reqwest::Client,
    pub(super) base_url: String,
}
