use crate::error::FetchError;
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Anything that can turn a URL into raw HTML.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<F: PageFetcher + ?Sized> PageFetcher for &F {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    /// `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Blocking HTTP fetcher. One request at a time, no retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(options: &FetchOptions) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(options.user_agent.clone());
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|source| FetchError::Request {
            url: "<client setup>".to_string(),
            source,
        })?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let request_failed = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(parsed).send().map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(request_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_malformed_url_is_distinguishable() {
        let fetcher = HttpFetcher::new(&FetchOptions::default()).unwrap();
        let err = fetcher.fetch("www.car.gr/classifieds/bikes").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn test_slow_page_hits_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200)
                .body("<html></html>")
                .delay(Duration::from_secs(3));
        });

        let fetcher = HttpFetcher::new(&FetchOptions {
            timeout: Some(Duration::from_millis(200)),
            ..FetchOptions::default()
        })
        .unwrap();
        let err = fetcher.fetch(&server.url("/slow")).unwrap_err();

        match err {
            FetchError::Request { source, .. } => assert!(source.is_timeout()),
            other => panic!("expected a timed out request, got {other}"),
        }
    }
}
