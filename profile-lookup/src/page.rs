//! The document model painted by a front end.
//!
//! A [`Page`] is everything the user can see: the theme, the status line,
//! the profile card, the repository list and the history shortcuts. The
//! controllers mutate it through a shared [`Document`]; front ends subscribe
//! and repaint whenever it changes.

use crate::theme::Theme;
use serde::Serialize;
use std::rc::Rc;
use tokio::sync::watch;

/// Visible state of the whole page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Theme applied to the document.
    pub theme: Theme,

    /// State of the theme toggle control.
    pub toggle: ThemeToggle,

    /// Single status region for user-facing errors. Empty when clear.
    pub status: String,

    /// Whether a search is in flight.
    pub loading: bool,

    /// The most recently rendered profile.
    pub profile: Option<ProfileView>,

    pub repositories: RepositoryPanel,

    /// One shortcut per history entry, most recent first.
    pub history: Vec<HistoryShortcut>,
}

/// Pressed state and label of the theme toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThemeToggle {
    pub pressed: bool,
    pub label: String,
}

/// A rendered profile card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub avatar: Image,
    pub name: String,
    /// Login prefixed with `@`.
    pub username: String,
    pub bio: String,
    pub followers: String,
    pub following: String,
    pub public_repos: String,
    pub location: String,
    pub blog: Link,
    pub created: String,
    pub profile_link: String,
}

/// An image reference with alternate text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

/// Link text with an optional target. A link without a target is shown as
/// plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub href: Option<String>,
}

/// The repository section: either cards or a placeholder, plus the
/// aggregate star count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryPanel {
    pub cards: Vec<RepositoryCard>,
    pub placeholder: Option<String>,
    pub total_stars: u64,
}

/// A single repository card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryCard {
    pub name: String,
    pub url: String,
    pub description: String,
    pub stars: u64,
    pub forks: u64,
    pub language: String,
}

/// A clickable history entry that re-runs a search for `identifier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryShortcut {
    pub identifier: String,
}

/// Shared handle to the observable page.
///
/// Clones refer to the same page. All mutation happens on one thread.
#[derive(Debug, Clone)]
pub struct Document {
    sender: Rc<watch::Sender<Page>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding an empty page.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Page::default());
        Self {
            sender: Rc::new(sender),
        }
    }

    /// Applies `f` to the page and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut Page)) {
        self.sender.send_modify(f);
    }

    /// Returns a copy of the current page.
    #[must_use]
    pub fn snapshot(&self) -> Page {
        self.sender.borrow().clone()
    }

    /// Subscribes to page changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Page> {
        self.sender.subscribe()
    }
}
