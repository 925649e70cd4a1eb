use crate::{
    gallery::{Card, Gallery, Media},
    notify::{Level, Toast},
    storage::KeyValueStore,
    tracker::{LoadingIndicator, Tracker},
};

pub const TITLE: &str = "Spacestagram";
pub const PROJECT_LINK: &str = "https://github.com/somtooriaku/spacestagram";

pub fn render_header() -> String {
    format!("{TITLE}  <{PROJECT_LINK}>\n")
}

pub fn render_card(index: usize, card: &Card<'_>) -> String {
    let media = match card.media {
        Media::Video { url } => format!("video: {url}"),
        Media::Image { url, .. } => format!("image: {url}"),
    };

    let mut out = format!("[{}] {}\n    {media}\n    {}\n", index + 1, card.title, card.byline);
    for line in card.explanation.lines() {
        out.push_str(&format!("    {line}\n"));
    }

    let like = if card.liked { "[Unlike] ♥" } else { "[Like]" };
    out.push_str(&format!("    [Share] {like}\n"));

    out
}

pub fn render_toast(toast: &Toast) -> String {
    match toast.level {
        Level::Info => format!("» {}", toast.message),
        Level::Error => format!("! {}", toast.message),
    }
}

/// Renders the whole gallery and drains pending notifications into it.
pub fn render<S: KeyValueStore>(gallery: &mut Gallery<S>, tracker: &Tracker) -> String {
    let mut out = render_header();
    out.push('\n');

    for (index, card) in gallery.cards().enumerate() {
        out.push_str(&render_card(index, &card));
        out.push('\n');
    }

    out.push_str("[Load More]\n");

    if let Some(spinner) = LoadingIndicator::render(tracker) {
        out.push_str(&format!("{spinner}\n"));
    }

    for toast in gallery.notifications().drain() {
        out.push_str(&render_toast(&toast));
        out.push('\n');
    }

    out
}
