use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::services::profile::{ProfileApi, ProfileClientError, ProfileError, UserProfile};

const ME_PATH: &str = "auth/users/me";

/// reqwest-backed profile client.
#[derive(Clone, Debug)]
pub struct HttpProfileApi {
    http: reqwest::Client,
    me_url: Url,
}

impl HttpProfileApi {
    pub fn new(api_base_url: &Url, timeout: Duration) -> Result<Self, ProfileClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProfileClientError::Client(e.to_string()))?;

        Ok(Self {
            http,
            me_url: me_url(api_base_url)?,
        })
    }
}

// `Url::join` replaces the last segment unless the base ends with '/'.
fn me_url(base: &Url) -> Result<Url, url::ParseError> {
    if base.cannot_be_a_base() {
        return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
    }
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(ME_PATH)
}

#[async_trait]
impl ProfileApi for HttpProfileApi {
    async fn fetch_me(&self, access_token: Option<&str>) -> Result<UserProfile, ProfileError> {
        let mut req = self.http.get(self.me_url.clone());
        if let Some(token) = access_token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ProfileError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProfileError::Status(status.as_u16()));
        }

        resp.json::<UserProfile>()
            .await
            .map_err(|e| ProfileError::Decode(e.to_string()))
    }
}
