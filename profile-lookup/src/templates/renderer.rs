//! Page renderer.

use super::{TemplateError, PAGE_TEMPLATE};
use crate::page::Page;
use handlebars::{handlebars_helper, no_escape, Handlebars};

// Turns a zero-based `@index` into a one-based shortcut number.
handlebars_helper!(inc: |index: u64| index + 1);

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (output goes to a terminal)
/// - Strict mode (catches missing variables)
/// - `inc` helper for one-based numbering
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs.register_helper("inc", Box::new(inc));

    hbs
}

/// Paints pages as plain text.
pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer {
    /// Creates a new page renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Paints `page` using [`PAGE_TEMPLATE`].
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn paint(&self, page: &Page) -> Result<String, TemplateError> {
        Ok(self.handlebars.render_template(PAGE_TEMPLATE, page)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history;
    use crate::models::{Profile, RepositorySummary};
    use crate::render::{render_profile, render_repositories};
    use crate::theme::Theme;

    fn sample_page() -> Page {
        let profile = Profile {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            bio: Some("<b>bold</b> & proud".to_string()),
            followers: 20,
            following: 9,
            public_repos: 8,
            location: Some("San Francisco".to_string()),
            blog: Some("github.blog".to_string()),
            created_at: "2011-01-25T18:44:36Z".to_string(),
            html_url: "https://github.com/octocat".to_string(),
            avatar_url: "https://avatars.githubusercontent.com/u/583231".to_string(),
        };
        let repos = vec![RepositorySummary {
            name: "hello-world".to_string(),
            description: None,
            html_url: "https://github.com/octocat/hello-world".to_string(),
            stargazers_count: 3,
            forks_count: 2,
            language: Some("Rust".to_string()),
        }];

        let mut page = Page {
            theme: Theme::Dark,
            profile: Some(render_profile(&profile)),
            repositories: render_repositories(&repos),
            history: history::render(&["octocat".to_string(), "torvalds".to_string()]),
            ..Page::default()
        };
        page.toggle.label = "Dark".to_string();
        page
    }

    #[test]
    fn paints_empty_page() {
        let renderer = PageRenderer::new();

        let text = renderer.paint(&Page::default()).unwrap();

        assert!(text.starts_with("== GitHub profile lookup =="));
        assert!(!text.contains("Latest repositories"));
        assert!(!text.contains("History:"));
    }

    #[test]
    fn paints_profile_and_repositories() {
        let renderer = PageRenderer::new();

        let text = renderer.paint(&sample_page()).unwrap();

        assert!(text.contains("[theme: Dark]"));
        assert!(text.contains("The Octocat (@octocat)"));
        assert!(text.contains("Blog: https://github.blog"));
        assert!(text.contains("Joined: Jan 25, 2011"));
        assert!(text.contains("Latest repositories (total stars: 3)"));
        assert!(text.contains("hello-world <https://github.com/octocat/hello-world>"));
        assert!(text.contains("No description provided."));
        assert!(text.contains("Stars: 3  Forks: 2  Lang: Rust"));
        assert!(text.contains("History: [1] octocat [2] torvalds"));
    }

    #[test]
    fn paints_placeholder_and_status() {
        let renderer = PageRenderer::new();
        let mut page = sample_page();
        page.repositories = render_repositories(&[]);
        page.status = "User not found. Please check the username.".to_string();
        page.loading = true;

        let text = renderer.paint(&page).unwrap();

        assert!(text.contains("Loading..."));
        assert!(text.contains("! User not found. Please check the username."));
        assert!(text.contains("No repositories to show."));
        assert!(text.contains("(total stars: 0)"));
    }

    #[test]
    fn no_html_escaping() {
        let renderer = PageRenderer::new();

        let text = renderer.paint(&sample_page()).unwrap();

        assert!(text.contains("<b>bold</b> & proud"));
    }

    #[test]
    fn painting_is_idempotent() {
        let renderer = PageRenderer::new();
        let page = sample_page();

        assert_eq!(renderer.paint(&page).unwrap(), renderer.paint(&page).unwrap());
    }
}
