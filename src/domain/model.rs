use serde::{Deserialize, Serialize};

/// A parsed `user@host` account name. Ephemeral, only lives through
/// parsing and resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handle {
    pub user: String,
    pub host: String,
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.user, self.host)
    }
}

/// An account record as returned by the follow-list endpoints. The `url`
/// field is the identity key; two records with the same `url` are the same
/// account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteAccount {
    pub url: String,
    pub acct: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub avatar: String,
}

/// One overlap record: an account present in both compared graphs, with its
/// accumulated weight and the human-readable explanation of the match.
#[derive(Debug, Clone)]
pub struct ScoredAccount {
    pub score: u8,
    pub sort_key: String,
    pub note: String,
    pub account: RemoteAccount,
}

/// Terminal output of one comparison. An empty overlap is its own variant so
/// the presentation layer can tell "nothing in common" apart from "nothing
/// computed yet".
#[derive(Debug)]
pub enum CompareOutcome {
    Matches(Vec<ScoredAccount>),
    Empty,
}
