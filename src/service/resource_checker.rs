//! Existence check for `/robots.txt`, the only network request the checker
//! makes.

use rquest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

use crate::config::AnalyzerSettings;
use crate::domain::models::ResourceStatus;
use crate::error::Result;
use crate::service::http::{create_client, ClientType};

pub struct ResourceChecker {
    client: Client,
}

impl ResourceChecker {
    pub fn new(settings: &AnalyzerSettings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.http_timeout_secs);
        Ok(Self {
            client: create_client(ClientType::HeavyEmulation, timeout)?,
        })
    }

    /// Check robots.txt at the origin of `page_url`, whatever its path.
    pub async fn check_robots_txt(&self, page_url: &Url) -> Result<ResourceStatus> {
        log::debug!("[RESOURCE] Checking robots.txt for {}", page_url);
        self.check_resource(page_url, "/robots.txt").await
    }

    async fn check_resource(&self, page_url: &Url, path: &str) -> Result<ResourceStatus> {
        let resource_url = page_url.join(path)?;
        log::trace!("[RESOURCE] Fetching: {}", resource_url);
        let response = self.client.get(resource_url.as_str()).send().await?;

        let status = match response.status() {
            StatusCode::OK => {
                log::debug!("[RESOURCE] Found: {}", resource_url);
                ResourceStatus::Found(resource_url.to_string())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                log::debug!("[RESOURCE] Unauthorized: {}", resource_url);
                ResourceStatus::Unauthorized(resource_url.to_string())
            }
            StatusCode::NOT_FOUND => {
                log::debug!("[RESOURCE] Not found: {}", resource_url);
                ResourceStatus::NotFound
            }
            status => {
                log::debug!("[RESOURCE] Unexpected status {} for: {}", status, resource_url);
                ResourceStatus::NotFound
            }
        };

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn checker() -> ResourceChecker {
        ResourceChecker::new(&AnalyzerSettings::default()).unwrap()
    }

    #[tokio::test]
    async fn test_check_robots_txt_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/robots.txt")
            .with_status(200)
            .with_body("User-agent: *\nDisallow:")
            .create_async()
            .await;

        let page_url = Url::parse(&server.url()).unwrap();
        let status = checker().check_robots_txt(&page_url).await.unwrap();
        assert!(status.exists(), "robots.txt should be detected as found");
        assert!(matches!(status, ResourceStatus::Found(_)));
    }

    #[tokio::test]
    async fn test_check_robots_txt_from_nested_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/robots.txt")
            .with_status(200)
            .create_async()
            .await;

        let page_url = Url::parse(&format!("{}/blog/2024/post?ref=home", server.url())).unwrap();
        let status = checker().check_robots_txt(&page_url).await.unwrap();
        assert!(status.exists());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_check_robots_txt_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/robots.txt")
            .with_status(404)
            .create_async()
            .await;

        let page_url = Url::parse(&server.url()).unwrap();
        let status = checker().check_robots_txt(&page_url).await.unwrap();
        assert!(!status.exists(), "robots.txt should be detected as not found");
        assert!(matches!(status, ResourceStatus::NotFound));
    }

    #[tokio::test]
    async fn test_check_robots_txt_forbidden_still_exists() {
        for code in [401, 403] {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("GET", "/robots.txt")
                .with_status(code)
                .create_async()
                .await;

            let page_url = Url::parse(&server.url()).unwrap();
            let status = checker().check_robots_txt(&page_url).await.unwrap();
            assert!(status.exists(), "{} should still count as exists", code);
            assert!(matches!(status, ResourceStatus::Unauthorized(_)));
        }
    }

    #[tokio::test]
    async fn test_server_error_counts_as_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/robots.txt")
            .with_status(500)
            .create_async()
            .await;

        let page_url = Url::parse(&server.url()).unwrap();
        let status = checker().check_robots_txt(&page_url).await.unwrap();
        assert_eq!(status, ResourceStatus::NotFound);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let page_url = Url::parse("http://127.0.0.1:1/").unwrap();
        let err = checker().check_robots_txt(&page_url).await.unwrap_err();
        assert!(matches!(err, AppError::NetworkError(_)));
    }
}
