use crate::domain::model::Handle;
use crate::utils::error::{CompareError, Result};

/// Parses a human-typed account name (`user@host` or `@user@host`) into a
/// [`Handle`]. Both parts are trimmed; the host part must look like a bare
/// hostname.
pub fn parse_account_name(raw: &str) -> Result<Handle> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix('@').unwrap_or(trimmed);

    let mut parts = stripped.split('@');
    let (user, host) = match (parts.next(), parts.next(), parts.next()) {
        (Some(user), Some(host), None) => (user.trim(), host.trim()),
        _ => {
            return Err(CompareError::Format {
                input: raw.to_string(),
                reason: "expected two parts separated by @",
            })
        }
    };

    if user.is_empty() || host.is_empty() {
        return Err(CompareError::Format {
            input: raw.to_string(),
            reason: "expected two parts separated by @",
        });
    }

    if host.contains(['/', '\\', ':']) {
        return Err(CompareError::Format {
            input: raw.to_string(),
            reason: "host cannot contain slashes or colons",
        });
    }

    Ok(Handle {
        user: user.to_string(),
        host: host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_prefixed_forms() {
        for raw in ["alice@mastodon.example", "@alice@mastodon.example"] {
            let handle = parse_account_name(raw).unwrap();
            assert_eq!(handle.user, "alice");
            assert_eq!(handle.host, "mastodon.example");
        }
    }

    #[test]
    fn trims_whitespace_around_input_and_parts() {
        let handle = parse_account_name("  @ alice @ mastodon.example ").unwrap();
        assert_eq!(handle.user, "alice");
        assert_eq!(handle.host, "mastodon.example");
    }

    #[test]
    fn parsing_is_idempotent_on_canonical_form() {
        let first = parse_account_name("@Alice@social.example").unwrap();
        let second = parse_account_name(&first.to_string()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_malformed_names() {
        for raw in ["noatsign", "a@b@c", "@onlyuser", "a@", "@b.example", ""] {
            let err = parse_account_name(raw).unwrap_err();
            assert!(
                matches!(
                    err,
                    CompareError::Format {
                        reason: "expected two parts separated by @",
                        ..
                    }
                ),
                "wrong error for {raw:?}: {err}"
            );
        }
    }

    #[test]
    fn rejects_hosts_with_slashes_or_colons() {
        for raw in ["user@ho/st", "user@ho:st", "user@ho\\st"] {
            let err = parse_account_name(raw).unwrap_err();
            assert!(matches!(
                err,
                CompareError::Format {
                    reason: "host cannot contain slashes or colons",
                    ..
                }
            ));
        }
    }
}
