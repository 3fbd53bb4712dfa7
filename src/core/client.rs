use crate::error::Result;
use crate::settings::Settings;
use reqwest::{header, multipart, redirect};
use tokio::sync::OnceCell;
use tracing::{debug, info};
use url::Url;

pub struct Client<'a> {
    http_client: reqwest::Client,
    // Never follows redirects, so the endpoint probe can see the `Location`.
    probe_client: reqwest::Client,
    endpoint: OnceCell<Url>,
    settings: &'a Settings,
}

impl<'a> Client<'a> {
    pub fn new(settings: &'a Settings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .build()?;

        let probe_client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            http_client,
            probe_client,
            endpoint: OnceCell::new(),
            settings,
        })
    }

    fn default_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        headers
    }

    /// Base url of the service. `copr_url` is probed once per client and a
    /// redirect, if any, is followed; later calls reuse the first answer.
    pub async fn endpoint(&self) -> Result<&Url> {
        self.endpoint
            .get_or_try_init(|| self.resolve_endpoint())
            .await
    }

    async fn resolve_endpoint(&self) -> Result<Url> {
        let copr_url = Url::parse(self.settings.require("copr_url")?)?;

        info!("HEAD {copr_url}");

        let response = self.probe_client.head(copr_url.clone()).send().await?;

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok());

        let endpoint = match location {
            Some(location) if response.status().is_redirection() => copr_url.join(location)?,
            _ => copr_url,
        };

        debug!("COPR endpoint: {endpoint}");

        Ok(endpoint)
    }

    pub async fn url(&self, path: &str) -> Result<Url> {
        Ok(self.endpoint().await?.join(path)?)
    }

    pub async fn get<R>(&self, url: Url) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        info!("GET {url}");

        self.http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(Into::into)
    }

    /// Posts `form` with the `login`/`token` credentials. The status is left
    /// to the caller.
    pub async fn post_multipart(&self, url: Url, form: multipart::Form) -> Result<reqwest::Response> {
        let login = self.settings.require("login")?;
        let token = self.settings.require("token")?;

        info!("POST {url}");

        Ok(self
            .http_client
            .post(url)
            .basic_auth(login, Some(token))
            .multipart(form)
            .send()
            .await?)
    }
}
