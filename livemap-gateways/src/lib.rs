pub mod lingvanex;
pub mod overpass;
pub mod unconfigured;

#[cfg(not(test))]
use std::time::Duration;

/// Upper bound for a single request to an external provider.
#[cfg(not(test))]
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[cfg(not(test))]
fn blocking_client() -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
}
