pub mod apod;
pub mod clipboard;
pub mod config;
pub mod dates;
pub mod gallery;
pub mod likes;
pub mod notify;
pub mod storage;
pub mod tracker;
pub mod view;

pub use apod::{Client, Feed, MediaType, Picture};
pub use config::Config;
pub use dates::DateRange;
pub use gallery::{Gallery, Query, QueryId};
pub use tracker::Tracker;
