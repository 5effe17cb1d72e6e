//! Roast prompt construction.
//!
//! Pure string mapping from a [`UserAggregate`] to the prompt. The
//! formatting contract lives in the prompt text itself: the model is
//! told to emit plain sentences ending in `.`/`!`/`?` and stage
//! directions wrapped in asterisks, because the script converter splits
//! on exactly those markers. Missing profile fields degrade to literal
//! placeholders; this function never fails.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::types::{Language, UserAggregate};

/// System message framing the comedian persona.
pub const SYSTEM_PROMPT: &str = "You are a stand-up comedian hosting \"The Git Roast Show\", \
a late-night show that roasts GitHub developers. You are sharp, playful, and never cruel \
about anything a person cannot change. You roast the code, the commits, and the repos.";

const MAX_REPO_LINES: usize = 5;
const MAX_COMMIT_LINES: usize = 8;
const MAX_LANGUAGE_LINES: usize = 5;

/// Build the user prompt for one roast.
pub fn build_prompt(aggregate: &UserAggregate, language: Language) -> String {
    let profile = &aggregate.profile;
    let mut prompt = String::with_capacity(2048);

    let _ = writeln!(prompt, "Roast the GitHub user \"{}\".", profile.login);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Profile:");
    let _ = writeln!(
        prompt,
        "- Name: {}",
        profile.name.as_deref().unwrap_or("Unknown")
    );
    let _ = writeln!(
        prompt,
        "- Bio: {}",
        profile.bio.as_deref().unwrap_or("None")
    );
    let _ = writeln!(
        prompt,
        "- Location: {}",
        profile.location.as_deref().unwrap_or("Unknown")
    );
    let _ = writeln!(
        prompt,
        "- Public repos: {}, followers: {}, following: {}",
        profile.public_repos, profile.followers, profile.following
    );
    let _ = writeln!(
        prompt,
        "- Account created: {}",
        profile.created_at.as_deref().unwrap_or("Unknown")
    );

    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Top repositories:");
    if aggregate.repositories.is_empty() {
        let _ = writeln!(prompt, "- None");
    }
    for repo in aggregate.repositories.iter().take(MAX_REPO_LINES) {
        let _ = writeln!(
            prompt,
            "- {} ({}, {} stars, {} forks): {}",
            repo.name,
            repo.language.as_deref().unwrap_or("Unknown"),
            repo.stargazers_count,
            repo.forks_count,
            repo.description.as_deref().unwrap_or("no description")
        );
    }

    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Languages by bytes written:");
    if aggregate.language_stats.is_empty() {
        let _ = writeln!(prompt, "- None");
    }
    let mut langs: Vec<_> = aggregate.language_stats.iter().collect();
    langs.sort_by(|a, b| b.1.cmp(a.1));
    for (lang, bytes) in langs.into_iter().take(MAX_LANGUAGE_LINES) {
        let _ = writeln!(prompt, "- {lang}: {bytes} bytes");
    }

    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Recent commit messages:");
    let mut commit_lines = 0;
    'outer: for repo_commits in &aggregate.commits {
        for commit in &repo_commits.commits {
            if commit_lines == MAX_COMMIT_LINES {
                break 'outer;
            }
            let first_line = commit.message.lines().next().unwrap_or("");
            let _ = writeln!(prompt, "- [{}] {}", repo_commits.repo, first_line);
            commit_lines += 1;
        }
    }
    if commit_lines == 0 {
        let _ = writeln!(prompt, "- None");
    }

    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Recent activity:");
    if aggregate.events.is_empty() {
        let _ = writeln!(prompt, "- None");
    } else {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for event in &aggregate.events {
            *counts.entry(event.event_type.as_str()).or_insert(0) += 1;
        }
        for (event_type, count) in counts {
            let _ = writeln!(prompt, "- {event_type}: {count}");
        }
    }

    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Rules:");
    let _ = writeln!(prompt, "- Write the roast in {}.", language.name());
    let _ = writeln!(
        prompt,
        "- 6 to 10 short sentences, each ending with '.', '!' or '?'."
    );
    let _ = writeln!(
        prompt,
        "- Sprinkle in stage directions wrapped in asterisks, chosen from: \
*crowd laughs*, *rimshot*, *crickets chirp*, *audience gasps*, *air horn*, *crowd boos*."
    );
    let _ = writeln!(
        prompt,
        "- No markdown, no emoji, no numbered lists. Plain sentences only."
    );
    let _ = writeln!(
        prompt,
        "- Open by greeting the audience, close with a one-line mic-drop."
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RepoSummary, UserAggregate, UserProfile};

    fn bare_aggregate() -> UserAggregate {
        UserAggregate::from_profile(UserProfile {
            login: "octocat".into(),
            name: None,
            bio: None,
            company: None,
            location: None,
            blog: None,
            avatar_url: None,
            public_repos: 8,
            followers: 100,
            following: 5,
            created_at: None,
        })
    }

    #[test]
    fn missing_fields_become_placeholders() {
        let prompt = build_prompt(&bare_aggregate(), Language::En);
        assert!(prompt.contains("Name: Unknown"));
        assert!(prompt.contains("Bio: None"));
        assert!(prompt.contains("octocat"));
    }

    #[test]
    fn target_language_is_named() {
        let prompt = build_prompt(&bare_aggregate(), Language::Es);
        assert!(prompt.contains("in Spanish"));
    }

    #[test]
    fn stage_direction_vocabulary_is_spelled_out() {
        let prompt = build_prompt(&bare_aggregate(), Language::En);
        for cue in ["*crowd laughs*", "*rimshot*", "*crickets chirp*"] {
            assert!(prompt.contains(cue), "prompt should mention {cue}");
        }
    }

    #[test]
    fn repos_are_listed_with_stats() {
        let mut agg = bare_aggregate();
        agg.repositories.push(RepoSummary {
            name: "linked-list-adventures".into(),
            description: Some("yet another linked list".into()),
            language: Some("Rust".into()),
            stargazers_count: 2,
            forks_count: 0,
            fork: false,
            updated_at: None,
        });
        let prompt = build_prompt(&agg, Language::En);
        assert!(prompt.contains("linked-list-adventures (Rust, 2 stars"));
    }
}
