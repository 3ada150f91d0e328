use crate::core::fetcher::PaginatedFetcher;
use crate::core::resolver::AccountResolver;
use crate::core::scorer::score_overlap;
use crate::domain::model::{CompareOutcome, Handle, RemoteAccount};
use crate::domain::ports::ProgressSink;
use crate::utils::error::{CompareError, Result};
use reqwest::Client;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Releases the in-flight flag on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Sequences one comparison: resolve both accounts, look up their numeric
/// ids, fetch the four follow lists and hand them to the scorer. Progress
/// and errors go through the [`ProgressSink`]; results come back to the
/// caller. At most one comparison runs at a time per `Comparer`.
pub struct Comparer {
    resolver: AccountResolver,
    fetcher: PaginatedFetcher,
    comparing: AtomicBool,
}

impl Comparer {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            resolver: AccountResolver::new(client.clone()),
            fetcher: PaginatedFetcher::new(client),
            comparing: AtomicBool::new(false),
        })
    }

    /// Routes every request to a fixed authority over the given scheme.
    /// Lets tests point any host at a plain-HTTP mock server.
    pub fn with_route(scheme: &str, authority: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            resolver: AccountResolver::with_route(client.clone(), scheme, authority),
            fetcher: PaginatedFetcher::with_route(client, scheme, authority),
            comparing: AtomicBool::new(false),
        })
    }

    /// Runs one comparison. Returns `Ok(None)` without doing anything when
    /// another comparison is already in flight (not queued, not an error).
    /// Fails fast: the first component failure aborts the whole run with no
    /// partial result, after reporting the message through the sink.
    pub async fn compare(
        &self,
        raw_a: &str,
        raw_b: &str,
        sink: &impl ProgressSink,
    ) -> Result<Option<CompareOutcome>> {
        if self
            .comparing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("comparison already in flight, ignoring request");
            return Ok(None);
        }
        let _guard = InFlightGuard(&self.comparing);

        match self.run(raw_a, raw_b, sink).await {
            Ok(outcome) => Ok(Some(outcome)),
            Err(err) => {
                if !err.is_expected() {
                    tracing::error!(error = ?err, "comparison failed unexpectedly");
                }
                sink.error(&err.to_string());
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        raw_a: &str,
        raw_b: &str,
        sink: &impl ProgressSink,
    ) -> Result<CompareOutcome> {
        if raw_a == raw_b {
            return Err(CompareError::Input("enter two different accounts"));
        }

        sink.progress(&format!("Resolving account {raw_a}."));
        let handle_a = self.resolver.resolve(raw_a).await?;
        let id_a = self.lookup_id(&handle_a).await?;

        sink.progress(&format!("Resolving account {raw_b}."));
        let handle_b = self.resolver.resolve(raw_b).await?;
        let id_b = self.lookup_id(&handle_b).await?;

        if handle_a.host == handle_b.host && id_a == id_b {
            return Err(CompareError::Input("both resolve to the same account"));
        }

        sink.progress(&format!("Fetching {raw_a} followees."));
        let followees_a = self.fetch_accounts(&handle_a.host, &id_a, "following").await?;

        sink.progress(&format!("Fetching {raw_a} followers."));
        let followers_a = self.fetch_accounts(&handle_a.host, &id_a, "followers").await?;

        sink.progress(&format!("Fetching {raw_b} followees."));
        let followees_b = self.fetch_accounts(&handle_b.host, &id_b, "following").await?;

        sink.progress(&format!("Fetching {raw_b} followers."));
        let followers_b = self.fetch_accounts(&handle_b.host, &id_b, "followers").await?;

        Ok(score_overlap(
            &followees_a,
            &followers_a,
            &followees_b,
            &followers_b,
            raw_a,
            raw_b,
        ))
    }

    /// Mastodon serialises account ids as JSON strings, some forks as
    /// numbers. Both are accepted and carried as a string.
    async fn lookup_id(&self, handle: &Handle) -> Result<String> {
        let path = format!(
            "accounts/lookup?acct={}",
            urlencoding::encode(&handle.user)
        );
        let body = self.fetcher.fetch_all(&handle.host, &path).await?;
        match body.get("id") {
            Some(Value::String(id)) => Ok(id.clone()),
            Some(Value::Number(id)) => Ok(id.to_string()),
            _ => Err(CompareError::UnexpectedResponse {
                message: format!("account lookup for {handle} returned no id"),
            }),
        }
    }

    async fn fetch_accounts(
        &self,
        host: &str,
        id: &str,
        relation: &str,
    ) -> Result<Vec<RemoteAccount>> {
        let path = format!("accounts/{}/{relation}?limit=100", urlencoding::encode(id));
        let body = self.fetcher.fetch_all(host, &path).await?;
        let accounts = serde_json::from_value(body)?;
        Ok(accounts)
    }
}
