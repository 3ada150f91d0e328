use crate::utils::error::{CompareError, Result};
use regex::Regex;
use reqwest::Client;
use serde_json::Value;
use std::sync::OnceLock;
use url::Url;

/// Treats a scheme-less URL as a bare host/path and prefixes `https://`.
/// URLs that already carry `http:`/`https:` pass through unchanged.
pub fn make_valid_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => url.to_string(),
        _ => format!("https://{url}"),
    }
}

fn next_link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^<(.+?)>;\s*rel="next""#).expect("valid regex literal"))
}

/// Extracts the `rel="next"` target from a `Link` response header. Entries
/// are separated by `", "`; other relations (`prev` etc.) are ignored.
fn parse_next_link(header: &str) -> Option<String> {
    header
        .split(", ")
        .filter_map(|entry| next_link_regex().captures(entry.trim()))
        .filter_map(|captures| captures.get(1))
        .map(|target| make_valid_url(target.as_str()))
        .next()
}

/// Client for the `/api/v1/` REST surface. Array responses are accumulated
/// across all pages linked via `Link: <...>; rel="next"`; any other JSON
/// body is returned from the first page as-is.
///
/// Precondition: an endpoint either always returns an array (and may
/// paginate) or always returns a single object (and never paginates). The
/// shape of the first page decides which mode applies.
pub struct PaginatedFetcher {
    client: Client,
    scheme: String,
    route: Option<String>,
}

impl PaginatedFetcher {
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

    pub async fn fetch_all(&self, host: &str, path: &str) -> Result<Value> {
        let authority = self.route.as_deref().unwrap_or(host);
        let mut url = format!("{}://{authority}/api/v1/{path}", self.scheme);
        let mut accumulated: Option<Value> = None;

        loop {
            tracing::debug!("GET {url}");
            let response = self.client.get(&url).send().await.map_err(|err| {
                tracing::debug!("request to {url} failed: {err:?}");
                CompareError::Fetch {
                    url: url.clone(),
                    reason: err.to_string(),
                }
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(CompareError::Fetch {
                    url,
                    reason: format!("status {}", status.as_u16()),
                });
            }

            // The Link header has to be read before the body consumes the
            // response.
            let next = response
                .headers()
                .get(reqwest::header::LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_next_link);

            let page: Value = response.json().await.map_err(|err| CompareError::Fetch {
                url: url.clone(),
                reason: err.to_string(),
            })?;

            accumulated = Some(match accumulated {
                None => page,
                Some(Value::Array(mut items)) => {
                    let Value::Array(more) = page else {
                        return Err(CompareError::UnexpectedResponse {
                            message: format!("{url} returned a non-array page while paginating"),
                        });
                    };
                    items.extend(more);
                    Value::Array(items)
                }
                // Non-array results stop after the first page, so this arm
                // never runs; kept total for the match.
                Some(single) => single,
            });

            match (&accumulated, next) {
                (Some(Value::Array(_)), Some(next_url)) => url = next_url,
                _ => break,
            }
        }

        Ok(accumulated.unwrap_or(Value::Null))
    }
}
