use log::debug;
use reqwest::{Client, Response, StatusCode};
use url::Url;

/// Status and body of a GET. A non-success status is not an error, callers
/// check [`Fetched::is_success`] before using the body.
#[derive(Debug)]
pub struct Fetched<B = Vec<u8>> {
    pub status: StatusCode,
    pub body: B,
}

impl<B> Fetched<B> {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Plain HTTP GET with the client's default redirect policy, no timeout and
/// no retry.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Self {
        Fetcher {
            client: Client::new(),
        }
    }

    /// Raw body, for images.
    pub async fn fetch(&self, url: &Url) -> reqwest::Result<Fetched> {
        let res = self.get(url).await?;
        let status = res.status();
        let body = res.bytes().await?.to_vec();
        debug!("{} {} ({} bytes)", status, url, body.len());
        Ok(Fetched { status, body })
    }

    /// Body decoded with the `Content-Type` charset, UTF-8 when none is given.
    pub async fn fetch_text(&self, url: &Url) -> reqwest::Result<Fetched<String>> {
        let res = self.get(url).await?;
        let status = res.status();
        let body = res.text().await?;
        debug!("{} {} ({} chars)", status, url, body.len());
        Ok(Fetched { status, body })
    }

    async fn get(&self, url: &Url) -> reqwest::Result<Response> {
        debug!("GET {}", url);
        self.client.get(url.clone()).send().await
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}
