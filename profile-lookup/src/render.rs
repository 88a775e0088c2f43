//! Projection of API models into page view state.
//!
//! Both functions are pure: the same inputs always produce the same view.

use crate::models::{Profile, RepositorySummary};
use crate::page::{Image, Link, ProfileView, RepositoryCard, RepositoryPanel};
use chrono::DateTime;

const NO_NAME: &str = "No name provided";
const NO_BIO: &str = "No bio provided.";
const NOT_AVAILABLE: &str = "Not available";
const NO_DESCRIPTION: &str = "No description provided.";
const NO_LANGUAGE: &str = "-";
const INVALID_DATE: &str = "Invalid Date";

/// Placeholder shown when a user has no repositories to list.
pub const NO_REPOSITORIES: &str = "No repositories to show.";

/// Builds the profile card for `profile`.
#[must_use]
pub fn render_profile(profile: &Profile) -> ProfileView {
    let blog = match non_empty(&profile.blog) {
        Some(blog) => {
            let normalized = normalize_blog_url(blog);
            Link {
                text: normalized.clone(),
                href: Some(normalized),
            }
        }
        None => Link {
            text: NOT_AVAILABLE.to_string(),
            href: None,
        },
    };

    ProfileView {
        avatar: Image {
            src: profile.avatar_url.clone(),
            alt: profile.login.clone(),
        },
        name: or_fallback(&profile.name, NO_NAME),
        username: format!("@{}", profile.login),
        bio: or_fallback(&profile.bio, NO_BIO),
        followers: profile.followers.to_string(),
        following: profile.following.to_string(),
        public_repos: profile.public_repos.to_string(),
        location: or_fallback(&profile.location, NOT_AVAILABLE),
        blog,
        created: format_created(&profile.created_at),
        profile_link: profile.html_url.clone(),
    }
}

/// Builds the repository section, preserving input order.
#[must_use]
pub fn render_repositories(repositories: &[RepositorySummary]) -> RepositoryPanel {
    if repositories.is_empty() {
        return RepositoryPanel {
            cards: Vec::new(),
            placeholder: Some(NO_REPOSITORIES.to_string()),
            total_stars: 0,
        };
    }

    let cards = repositories
        .iter()
        .map(|repo| RepositoryCard {
            name: repo.name.clone(),
            url: repo.html_url.clone(),
            description: or_fallback(&repo.description, NO_DESCRIPTION),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            language: or_fallback(&repo.language, NO_LANGUAGE),
        })
        .collect();

    RepositoryPanel {
        cards,
        placeholder: None,
        total_stars: repositories.iter().map(|repo| repo.stargazers_count).sum(),
    }
}

/// Formats an ISO-8601 timestamp as "Mon D, YYYY".
#[must_use]
pub fn format_created(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => INVALID_DATE.to_string(),
    }
}

/// Prefixes `https://` onto URLs that do not already start with `http`.
#[must_use]
pub fn normalize_blog_url(blog: &str) -> String {
    if blog.starts_with("http") {
        blog.to_string()
    } else {
        format!("https://{blog}")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn or_fallback(value: &Option<String>, fallback: &str) -> String {
    non_empty(value).unwrap_or(fallback).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            bio: None,
            followers: 20,
            following: 9,
            public_repos: 8,
            location: None,
            blog: Some("github.blog".to_string()),
            created_at: "2011-01-25T18:44:36Z".to_string(),
            html_url: "https://github.com/octocat".to_string(),
            avatar_url: "https://avatars.githubusercontent.com/u/583231".to_string(),
        }
    }

    fn repo(name: &str, stars: u64) -> RepositorySummary {
        RepositorySummary {
            name: name.to_string(),
            description: None,
            html_url: format!("https://github.com/octocat/{name}"),
            stargazers_count: stars,
            forks_count: 1,
            language: None,
        }
    }

    #[test]
    fn profile_uses_fallbacks() {
        let view = render_profile(&sample_profile());

        assert_eq!(view.name, "The Octocat");
        assert_eq!(view.username, "@octocat");
        assert_eq!(view.bio, "No bio provided.");
        assert_eq!(view.location, "Not available");
        assert_eq!(view.followers, "20");
        assert_eq!(view.avatar.alt, "octocat");
        assert_eq!(view.created, "Jan 25, 2011");
    }

    #[test]
    fn missing_name_falls_back() {
        let mut profile = sample_profile();
        profile.name = None;

        assert_eq!(render_profile(&profile).name, "No name provided");
    }

    #[test]
    fn blog_without_scheme_gets_https() {
        let view = render_profile(&sample_profile());

        assert_eq!(view.blog.text, "https://github.blog");
        assert_eq!(view.blog.href.as_deref(), Some("https://github.blog"));
    }

    #[test]
    fn blog_with_scheme_is_kept() {
        assert_eq!(normalize_blog_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_blog_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn empty_blog_has_no_link() {
        let mut profile = sample_profile();
        profile.blog = Some(String::new());

        let view = render_profile(&profile);

        assert_eq!(view.blog.text, "Not available");
        assert_eq!(view.blog.href, None);
    }

    #[test]
    fn invalid_timestamp_is_reported() {
        assert_eq!(format_created("yesterday"), "Invalid Date");
    }

    #[test]
    fn rendering_is_idempotent() {
        let profile = sample_profile();
        let repos = vec![repo("a", 1), repo("b", 2)];

        assert_eq!(render_profile(&profile), render_profile(&profile));
        assert_eq!(render_repositories(&repos), render_repositories(&repos));
    }

    #[test]
    fn total_stars_is_summed() {
        let panel = render_repositories(&[repo("a", 3), repo("b", 0), repo("c", 7)]);

        assert_eq!(panel.total_stars, 10);
        assert_eq!(panel.placeholder, None);
        assert_eq!(panel.cards.len(), 3);
        assert_eq!(panel.cards[0].name, "a");
        assert_eq!(panel.cards[2].name, "c");
    }

    #[test]
    fn cards_use_fallbacks() {
        let panel = render_repositories(&[repo("a", 3)]);

        assert_eq!(panel.cards[0].description, "No description provided.");
        assert_eq!(panel.cards[0].language, "-");
    }

    #[test]
    fn empty_repositories_show_placeholder() {
        let panel = render_repositories(&[]);

        assert_eq!(panel.total_stars, 0);
        assert!(panel.cards.is_empty());
        assert_eq!(panel.placeholder.as_deref(), Some("No repositories to show."));
    }
}
