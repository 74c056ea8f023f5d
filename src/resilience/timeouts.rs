//! HTTP clients with deadlines.
//!
//! Every probe request carries a connect and a total timeout so a hung
//! endpoint costs one attempt, not the whole run.

use std::time::Duration;

const USER_AGENT: &str = concat!("tunnel-bootstrap/", env!("CARGO_PKG_VERSION"));

/// Client for endpoints on this machine; ignores system proxy settings.
pub fn local_client(request: Duration, connect: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(request)
        .connect_timeout(connect)
        .no_proxy()
        .build()
}

/// Client for the public tunnel endpoint; `system_proxy` keeps proxy settings from the environment.
pub fn public_client(
    request: Duration,
    connect: Duration,
    system_proxy: bool,
) -> reqwest::Result<reqwest::Client> {
    let builder = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(request)
        .connect_timeout(connect);

    if system_proxy {
        builder.build()
    } else {
        builder.no_proxy().build()
    }
}
