use crate::core::parser::parse_account_name;
use crate::domain::model::Handle;
use crate::utils::error::{CompareError, Result};
use reqwest::Client;
use serde::Deserialize;

const ACCT_PREFIX: &str = "acct:";

#[derive(Debug, Deserialize)]
struct WebFingerResponse {
    #[serde(default)]
    subject: Option<String>,
}

/// Resolves a loosely-formatted account name to its canonical handle via
/// WebFinger. The canonical host may differ from the queried one when the
/// discovery response points at the authoritative server.
pub struct AccountResolver {
    client: Client,
    scheme: String,
    route: Option<String>,
}

impl AccountResolver {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            scheme: "https".to_string(),
            route: None,
        }
    }

    /// Routes every request to a fixed authority over the given scheme,
    /// regardless of the logical host. Lets tests point any host at a
    /// plain-HTTP mock server.
    pub fn with_route(client: Client, scheme: &str, authority: &str) -> Self {
        Self {
            client,
            scheme: scheme.to_string(),
            route: Some(authority.to_string()),
        }
    }

    /// Single attempt, no retries. Network failures, 404s, unexpected
    /// statuses and malformed discovery documents all surface as
    /// [`CompareError::Resolution`].
    pub async fn resolve(&self, raw: &str) -> Result<Handle> {
        let Handle { user, host } = parse_account_name(raw)?;

        let authority = self.route.as_deref().unwrap_or(&host);
        let url = format!(
            "{}://{authority}/.well-known/webfinger?resource=acct:{user}@{host}",
            self.scheme
        );
        tracing::debug!("GET {url}");

        let response = self.client.get(&url).send().await.map_err(|err| {
            tracing::error!("webfinger request for {raw} failed: {err:?}");
            CompareError::Resolution {
                account: raw.to_string(),
                reason: "maybe not a compatible server".to_string(),
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CompareError::Resolution {
                account: raw.to_string(),
                reason: "account does not exist".to_string(),
            });
        }
        if status != reqwest::StatusCode::OK {
            return Err(CompareError::Resolution {
                account: raw.to_string(),
                reason: format!("unexpected status {}", status.as_u16()),
            });
        }

        let body: WebFingerResponse = response.json().await.map_err(|err| {
            tracing::debug!("webfinger body for {raw} not readable: {err:?}");
            CompareError::Resolution {
                account: raw.to_string(),
                reason: "unexpected response".to_string(),
            }
        })?;

        let subject = body
            .subject
            .as_deref()
            .and_then(|subject| subject.strip_prefix(ACCT_PREFIX))
            .ok_or_else(|| CompareError::Resolution {
                account: raw.to_string(),
                reason: "unexpected response".to_string(),
            })?;

        parse_account_name(subject)
    }
}
