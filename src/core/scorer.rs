use crate::domain::model::{CompareOutcome, RemoteAccount, ScoredAccount};
use std::collections::HashSet;

// Weights: a shared follow target is a weaker signal than a shared follower.
const BOTH_FOLLOWED: u8 = 3;
const ONE_FOLLOWED: u8 = 1;
const BOTH_FOLLOWING: u8 = 5;
const ONE_FOLLOWING: u8 = 2;

fn url_set(list: &[RemoteAccount]) -> HashSet<&str> {
    list.iter().map(|account| account.url.as_str()).collect()
}

fn sort_key(account: &RemoteAccount) -> String {
    if account.display_name.is_empty() {
        account.acct.to_lowercase()
    } else {
        account.display_name.to_lowercase()
    }
}

/// Computes the scored overlap between the graphs of accounts A and B.
///
/// Candidates are the union of A's followees and followers, deduplicated by
/// `url` keeping the first-seen record, and only kept when they also appear
/// somewhere in B's combined graph. Each surviving candidate scores the
/// followee and follower dimensions independently and the notes explain
/// which side matched; `label_a`/`label_b` are the account names as the
/// user entered them.
pub fn score_overlap(
    followees_a: &[RemoteAccount],
    followers_a: &[RemoteAccount],
    followees_b: &[RemoteAccount],
    followers_b: &[RemoteAccount],
    label_a: &str,
    label_b: &str,
) -> CompareOutcome {
    let followees_a_urls = url_set(followees_a);
    let followers_a_urls = url_set(followers_a);
    let followees_b_urls = url_set(followees_b);
    let followers_b_urls = url_set(followers_b);

    let mut seen = HashSet::new();
    let mut accepted = Vec::new();

    for account in followees_a.iter().chain(followers_a) {
        let url = account.url.as_str();
        if !seen.insert(url) {
            continue;
        }
        if !followees_b_urls.contains(url) && !followers_b_urls.contains(url) {
            continue;
        }

        let mut score = 0u8;
        let mut note = Vec::new();

        if followees_a_urls.contains(url) && followees_b_urls.contains(url) {
            score += BOTH_FOLLOWED;
            note.push("followed by both".to_string());
        } else if followees_a_urls.contains(url) {
            score += ONE_FOLLOWED;
            note.push(format!("followed by {label_a}"));
        } else if followees_b_urls.contains(url) {
            score += ONE_FOLLOWED;
            note.push(format!("followed by {label_b}"));
        }

        if followers_a_urls.contains(url) && followers_b_urls.contains(url) {
            score += BOTH_FOLLOWING;
            note.push("following both".to_string());
        } else if followers_a_urls.contains(url) {
            score += ONE_FOLLOWING;
            note.push(format!("following {label_a}"));
        } else if followers_b_urls.contains(url) {
            score += ONE_FOLLOWING;
            note.push(format!("following {label_b}"));
        }

        accepted.push(ScoredAccount {
            score,
            sort_key: sort_key(account),
            note: note.join(", "),
            account: account.clone(),
        });
    }

    // Stable sort: equal score and key keep first-seen order.
    accepted.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.sort_key.cmp(&b.sort_key))
    });

    if accepted.is_empty() {
        CompareOutcome::Empty
    } else {
        CompareOutcome::Matches(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(url: &str, acct: &str, display_name: &str) -> RemoteAccount {
        RemoteAccount {
            url: url.to_string(),
            acct: acct.to_string(),
            display_name: display_name.to_string(),
            avatar: String::new(),
        }
    }

    fn matches(outcome: CompareOutcome) -> Vec<ScoredAccount> {
        match outcome {
            CompareOutcome::Matches(records) => records,
            CompareOutcome::Empty => panic!("expected a populated overlap"),
        }
    }

    #[test]
    fn shared_followee_scores_three() {
        let x = account("https://h/x", "x@h", "X");
        let records = matches(score_overlap(
            &[x.clone()],
            &[],
            &[x],
            &[],
            "a@one",
            "b@two",
        ));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score, 3);
        assert_eq!(records[0].note, "followed by both");
    }

    #[test]
    fn shared_follower_scores_five() {
        let x = account("https://h/x", "x@h", "X");
        let records = matches(score_overlap(
            &[],
            &[x.clone()],
            &[],
            &[x],
            "a@one",
            "b@two",
        ));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score, 5);
        assert_eq!(records[0].note, "following both");
    }

    #[test]
    fn account_in_every_list_scores_eight() {
        let x = account("https://h/x", "x@h", "X");
        let records = matches(score_overlap(
            &[x.clone()],
            &[x.clone()],
            &[x.clone()],
            &[x],
            "a@one",
            "b@two",
        ));
        assert_eq!(records[0].score, 8);
        assert_eq!(records[0].note, "followed by both, following both");
    }

    #[test]
    fn single_sided_matches_name_the_entered_account() {
        // In A's followees and B's followers only: 1 + 2 across dimensions.
        let x = account("https://h/x", "x@h", "X");
        let records = matches(score_overlap(
            &[x.clone()],
            &[],
            &[],
            &[x],
            "a@one",
            "b@two",
        ));
        assert_eq!(records[0].score, 3);
        assert_eq!(records[0].note, "followed by a@one, following b@two");
    }

    #[test]
    fn account_absent_from_b_is_excluded() {
        let x = account("https://h/x", "x@h", "X");
        let y = account("https://h/y", "y@h", "Y");
        let outcome = score_overlap(&[x.clone()], &[x], &[y.clone()], &[y], "a@one", "b@two");
        assert!(matches!(outcome, CompareOutcome::Empty));
    }

    #[test]
    fn accounts_only_in_b_never_become_candidates() {
        let x = account("https://h/x", "x@h", "X");
        let outcome = score_overlap(&[], &[], &[x.clone()], &[x], "a@one", "b@two");
        assert!(matches!(outcome, CompareOutcome::Empty));
    }

    #[test]
    fn higher_score_sorts_first_regardless_of_name() {
        let followee = account("https://h/aaa", "aaa@h", "Aaa");
        let follower = account("https://h/zzz", "zzz@h", "Zzz");
        let records = matches(score_overlap(
            &[followee.clone()],
            &[follower.clone()],
            &[followee],
            &[follower],
            "a@one",
            "b@two",
        ));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].score, 5);
        assert_eq!(records[0].account.url, "https://h/zzz");
        assert_eq!(records[1].score, 3);
    }

    #[test]
    fn equal_scores_sort_case_insensitively_by_name() {
        let bob = account("https://h/bob", "bob@h", "Bob");
        let alice = account("https://h/alice", "alice@h", "alice");
        let records = matches(score_overlap(
            &[bob.clone(), alice.clone()],
            &[],
            &[bob, alice],
            &[],
            "a@one",
            "b@two",
        ));
        assert_eq!(records[0].account.acct, "alice@h");
        assert_eq!(records[1].account.acct, "bob@h");
    }

    #[test]
    fn sort_key_falls_back_to_acct_without_display_name() {
        let anon = account("https://h/anon", "Anon@h", "");
        assert_eq!(sort_key(&anon), "anon@h");
    }

    #[test]
    fn duplicate_urls_collapse_to_the_first_record() {
        let first = account("https://h/x", "x@h", "First");
        let second = account("https://h/x", "x@h", "Second");
        let records = matches(score_overlap(
            &[first, second.clone()],
            &[],
            &[second],
            &[],
            "a@one",
            "b@two",
        ));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].account.display_name, "First");
        assert_eq!(records[0].score, 3);
    }
}
