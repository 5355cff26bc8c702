//! HTTP client utilities
//!
//! Provides a reqwest::Client configured with a timeout and our user agent.
//! reqwest already honors HTTP_PROXY / HTTPS_PROXY / NO_PROXY from the
//! environment.

use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a reqwest Client with the given timeout
pub fn client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("recipebox/", env!("CARGO_PKG_VERSION")))
        .build()
}
