//! Announcing published articles.
//!
//! An [`Article`] moves `Draft -> Published -> Announced`. [`Publisher`]
//! guards the `Published -> Announced` edge so the API is called at most once
//! per article, and only records the transition when the post succeeded.

use chrono::Utc;
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::PublishConfig;
use crate::error::PublishError;
use crate::template::{self, Placeholders, EXCERPT_WORDS, MAX_POST_CHARS};
use crate::transport::Transport;
use crate::types::{Account, CreatedPost, Envelope};
use crate::v1::client::OAuthV1Client;

const TEST_POST_PREFIX: &str = "Auto-post connectivity test ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArticleState {
    Draft,
    Published,
    Announced,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArticleKind {
    Post,
    Page,
}

/// Per-article override of the global auto-post switch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AutoPost {
    #[default]
    Default,
    Enabled,
    Disabled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Article {
    pub id: u64,
    pub kind: ArticleKind,
    pub title: String,
    pub permalink: String,
    pub content: String,
    pub state: ArticleState,
    pub is_revision: bool,
    pub is_autosave: bool,
    pub auto_post: AutoPost,
}

impl Article {
    /// A draft post with no content.
    pub fn new(id: u64, title: impl Into<String>, permalink: impl Into<String>) -> Self {
        Article {
            id,
            kind: ArticleKind::Post,
            title: title.into(),
            permalink: permalink.into(),
            content: String::new(),
            state: ArticleState::Draft,
            is_revision: false,
            is_autosave: false,
            auto_post: AutoPost::Default,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// `Draft -> Published`. Returns `false` if the article was not a draft.
    pub fn publish(&mut self) -> bool {
        if self.state != ArticleState::Draft {
            return false;
        }
        self.state = ArticleState::Published;
        true
    }

    pub fn placeholders(&self) -> Placeholders {
        Placeholders {
            title: self.title.clone(),
            url: self.permalink.clone(),
            excerpt: template::excerpt(&self.content, EXCERPT_WORDS),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    RevisionOrAutosave,
    AlreadyAnnounced,
    OptedOut,
    NotPublished,
    NotAPost,
    Filtered,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::Disabled => "auto-post is disabled",
            SkipReason::RevisionOrAutosave => "revision or autosave",
            SkipReason::AlreadyAnnounced => "already announced",
            SkipReason::OptedOut => "opted out for this article",
            SkipReason::NotPublished => "not published",
            SkipReason::NotAPost => "not a post",
            SkipReason::Filtered => "rejected by filter",
        };
        f.write_str(reason)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Announcement {
    /// `id` is `None` when the accepted response carried no post id.
    Posted { id: Option<String> },
    Skipped(SkipReason),
}

type ShouldPost = Box<dyn Fn(&Article) -> bool + Send + Sync>;
type ContentFilter = Box<dyn Fn(String, &Article) -> String + Send + Sync>;

pub struct Publisher<T> {
    client: OAuthV1Client<T>,
    settings: PublishConfig,
    should_post: Option<ShouldPost>,
    content_filter: Option<ContentFilter>,
}

impl<T: Transport> Publisher<T> {
    pub fn new(client: OAuthV1Client<T>, settings: PublishConfig) -> Self {
        Publisher {
            client,
            settings,
            should_post: None,
            content_filter: None,
        }
    }

    /// Last-chance veto evaluated after the built-in guards.
    pub fn with_should_post<F>(mut self, should_post: F) -> Self
    where
        F: Fn(&Article) -> bool + Send + Sync + 'static,
    {
        self.should_post = Some(Box::new(should_post));
        self
    }

    /// Rewrites composed text before it is posted.
    pub fn with_content_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(String, &Article) -> String + Send + Sync + 'static,
    {
        self.content_filter = Some(Box::new(filter));
        self
    }

    pub fn client(&self) -> &OAuthV1Client<T> {
        &self.client
    }

    /// Text that would be posted for `article`.
    pub fn compose(&self, article: &Article) -> String {
        let text = template::compose(&self.settings.format, &article.placeholders());
        match &self.content_filter {
            Some(filter) => filter(text, article),
            None => text,
        }
    }

    fn skip_reason(&self, article: &Article) -> Option<SkipReason> {
        if !self.settings.enabled {
            return Some(SkipReason::Disabled);
        }
        if article.is_revision || article.is_autosave {
            return Some(SkipReason::RevisionOrAutosave);
        }
        if article.state == ArticleState::Announced {
            return Some(SkipReason::AlreadyAnnounced);
        }
        if article.auto_post == AutoPost::Disabled {
            return Some(SkipReason::OptedOut);
        }
        if article.state != ArticleState::Published {
            return Some(SkipReason::NotPublished);
        }
        if article.kind != ArticleKind::Post {
            return Some(SkipReason::NotAPost);
        }
        match &self.should_post {
            Some(should_post) if !should_post(article) => Some(SkipReason::Filtered),
            _ => None,
        }
    }

    /// Post `article` once and move it to `Announced`.
    ///
    /// Guards that fail produce [`Announcement::Skipped`] without touching
    /// the network. On error the article state is left unchanged.
    pub fn announce(&self, article: &mut Article) -> Result<Announcement, PublishError> {
        if let Some(reason) = self.skip_reason(article) {
            debug!(article_id = article.id, %reason, "Skipping announcement");
            return Ok(Announcement::Skipped(reason));
        }

        let text = template::truncate(&self.compose(article), MAX_POST_CHARS);
        let response = match self.client.post(&text) {
            Ok(response) => response,
            Err(e) => {
                warn!(article_id = article.id, error = %e, "Failed to announce article");
                return Err(e.into());
            }
        };

        // Accepted by the API: never post this article again.
        article.state = ArticleState::Announced;
        let id = match response.json::<Envelope<CreatedPost>>() {
            Ok(envelope) => Some(envelope.data.id),
            Err(e) => {
                warn!(article_id = article.id, error = %e, "Post accepted without a readable id");
                None
            }
        };
        info!(article_id = article.id, post_id = ?id, "Announced article");
        Ok(Announcement::Posted { id })
    }

    /// Post text as-is, clamped to the platform length limit.
    pub fn post_text(&self, text: &str) -> Result<CreatedPost, PublishError> {
        let text = template::truncate(text, MAX_POST_CHARS);
        let response = self.client.post(&text)?;
        let envelope: Envelope<CreatedPost> = response.json()?;
        Ok(envelope.data)
    }

    /// Validate the credentials and return the account's username.
    pub fn test_connection(&self) -> Result<String, PublishError> {
        let response = self.client.verify_credentials()?;
        let envelope: Envelope<Account> =
            response.json().map_err(|_| PublishError::Unverified)?;
        let username = envelope.data.username.ok_or(PublishError::Unverified)?;
        info!(%username, "Credentials verified");
        Ok(username)
    }

    /// Send a timestamped test post.
    pub fn send_test_post(&self) -> Result<CreatedPost, PublishError> {
        let text = format!(
            "{}{}",
            TEST_POST_PREFIX,
            Utc::now().format("%Y-%m-%d %H:%M:%S")
        );
        self.post_text(&text)
    }
}
