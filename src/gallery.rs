//! State behind the picture list: the displayed pictures, the liked set and
//! the paging cursor.
//!
//! Fetching is left to the caller. [`Gallery::mount`] and
//! [`Gallery::load_more`] hand out a [`Query`]; its result comes back through
//! [`Gallery::apply`], which ignores anything but the most recently issued
//! query so overlapping requests cannot clobber newer content.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::{
    apod::{self, Picture},
    clipboard::Clipboard,
    dates::DateRange,
    likes::{LikeStore, LikedSet},
    notify::Notifications,
    storage::KeyValueStore,
};

pub const INITIAL_DAYS: u32 = 10;
pub const PAGE_DAYS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub id: QueryId,
    pub range: DateRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Media<'a> {
    Image { url: &'a str, alt: &'a str },
    Video { url: &'a str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card<'a> {
    pub media: Media<'a>,
    pub title: &'a str,
    pub byline: String,
    pub explanation: &'a str,
    pub liked: bool,
}

impl Card<'_> {
    pub fn like_label(&self) -> &'static str {
        if self.liked { "Unlike" } else { "Like" }
    }
}

pub struct Gallery<S> {
    pictures: Vec<Picture>,
    liked: LikedSet,
    likes: LikeStore<S>,
    days_ago: u32,
    page_days: u32,
    latest: u64,
    notifications: Notifications,
}

impl<S: KeyValueStore> Gallery<S> {
    pub fn new(store: S) -> Self {
        Self::with_paging(store, INITIAL_DAYS, PAGE_DAYS)
    }

    pub fn with_paging(store: S, initial_days: u32, page_days: u32) -> Self {
        Self {
            pictures: Vec::new(),
            liked: LikedSet::new(),
            likes: LikeStore::new(store),
            days_ago: initial_days,
            page_days,
            latest: 0,
            notifications: Notifications::default(),
        }
    }

    /// Restores the liked set and returns the query for the first window.
    ///
    /// Unreadable storage starts from an empty set; the stored value is
    /// left alone until the next like or unlike overwrites it.
    pub fn mount(&mut self, today: NaiveDate) -> Query {
        match self.likes.load() {
            Ok(liked) => self.liked = liked,
            Err(err) => {
                warn!(%err, "could not restore liked pictures");
                self.liked = LikedSet::new();
                self.notifications
                    .error(format!("Could not restore liked pictures: {err}"));
            }
        }

        self.query(DateRange::ending_at(today, self.days_ago))
    }

    /// Widens the window by one page. The result replaces the list.
    pub fn load_more(&mut self, today: NaiveDate) -> Query {
        self.days_ago = self.days_ago.saturating_add(self.page_days);

        self.query(DateRange::ending_at(today, self.days_ago))
    }

    fn query(&mut self, range: DateRange) -> Query {
        self.latest += 1;

        let query = Query {
            id: QueryId(self.latest),
            range,
        };
        debug!(id = self.latest, start = %range.start_param(), end = %range.end_param(), "issued query");

        query
    }

    /// Applies a fetch result. Returns `false` when the query has been
    /// superseded by a newer one and the result was dropped.
    pub fn apply(&mut self, id: QueryId, result: apod::Result<Vec<Picture>>) -> bool {
        if id.0 != self.latest {
            debug!(id = id.0, latest = self.latest, "dropping superseded result");
            return false;
        }

        match result {
            Ok(mut pictures) => {
                pictures.reverse();
                info!(count = pictures.len(), "loaded pictures");
                self.pictures = pictures;
            }
            Err(err) => {
                warn!(%err, "could not load pictures");
                self.notifications
                    .error(format!("Could not load pictures: {err}"));
            }
        }

        true
    }

    pub fn like(&mut self, date: &str) -> bool {
        if !self.liked.insert(date) {
            return false;
        }

        debug!(date, "liked");
        self.persist_likes();
        true
    }

    pub fn unlike(&mut self, date: &str) -> bool {
        if !self.liked.remove(date) {
            return false;
        }

        debug!(date, "unliked");
        self.persist_likes();
        true
    }

    /// Flips the like on the picture at `index`, returning whether it is
    /// now liked.
    pub fn toggle_like(&mut self, index: usize) -> Option<bool> {
        let date = self.pictures.get(index)?.date.clone();

        if self.liked.contains(&date) {
            self.unlike(&date);
            Some(false)
        } else {
            self.like(&date);
            Some(true)
        }
    }

    fn persist_likes(&mut self) {
        if let Err(err) = self.likes.save(&self.liked) {
            warn!(%err, "could not save liked pictures");
            self.notifications
                .error(format!("Could not save liked pictures: {err}"));
        }
    }

    /// Copies the link of the picture at `index`. When the clipboard is
    /// unavailable the link is shown as a notification instead.
    pub fn share<C: Clipboard>(&mut self, index: usize, clipboard: &mut C) -> Option<String> {
        let url = self.pictures.get(index)?.share_url().to_owned();

        match clipboard.set_text(&url) {
            Ok(()) => self.notifications.info("Copied link to clipboard"),
            Err(err) => {
                warn!(%err, "clipboard write failed");
                self.notifications.error(format!("Could not copy link: {url}"));
            }
        }

        Some(url)
    }

    pub fn is_liked(&self, date: &str) -> bool {
        self.liked.contains(date)
    }

    pub fn pictures(&self) -> &[Picture] {
        &self.pictures
    }

    pub fn liked(&self) -> &LikedSet {
        &self.liked
    }

    pub fn days_ago(&self) -> u32 {
        self.days_ago
    }

    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn like_store(&self) -> &LikeStore<S> {
        &self.likes
    }

    pub fn cards(&self) -> impl Iterator<Item = Card<'_>> {
        self.pictures.iter().map(|picture| Card {
            media: if picture.is_video() {
                Media::Video { url: &picture.url }
            } else {
                Media::Image {
                    url: &picture.url,
                    alt: &picture.title,
                }
            },
            title: &picture.title,
            byline: picture.byline(),
            explanation: &picture.explanation,
            liked: self.liked.contains(&picture.date),
        })
    }
}
