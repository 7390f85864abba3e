use anyhow::{Context, Result};
use rquest::Client;
use rquest_util::Emulation;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy)]
pub enum ClientType {
    Standard,
    /// Browser impersonation for hosts that reject plain clients.
    HeavyEmulation,
}

/// Build the HTTP client used for resource checks.
pub fn create_client(client_type: ClientType, timeout: Duration) -> Result<Client> {
    let builder = Client::builder().timeout(timeout);

    match client_type {
        ClientType::HeavyEmulation => builder
            .emulation(Emulation::Firefox136)
            .build()
            .context("Failed to build impersonated rquest client"),
        ClientType::Standard => builder
            .build()
            .context("Failed to build standard rquest client"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_both_client_types() {
        assert!(create_client(ClientType::Standard, DEFAULT_TIMEOUT).is_ok());
        assert!(create_client(ClientType::HeavyEmulation, Duration::from_secs(5)).is_ok());
    }
}
