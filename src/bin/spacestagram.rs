use std::{env, io};

use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use spacestagram::{
    Client, Feed, Gallery, Picture, Query, QueryId, Tracker,
    apod::{self, API_KEY_VAR, ENDPOINT_VAR},
    clipboard::SystemClipboard,
    config, dates,
    storage::{JsonFileStore, KeyValueStore},
    view,
};

#[derive(Debug, Error)]
enum Error {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Apod(#[from] apod::Error),

    #[error("Could not locate a configuration folder")]
    NoConfigFolder,
}

type Result<T> = core::result::Result<T, Error>;

type FetchResult = (QueryId, apod::Result<Vec<Picture>>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    More,
    Like(usize),
    Unlike(usize),
    Toggle(usize),
    Share(usize),
    List,
    Help,
    Quit,
}

impl Command {
    /// Card numbers are 1-based as displayed.
    fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let name = words.next()?.to_ascii_lowercase();
        let arg = words.next();

        if words.next().is_some() {
            return None;
        }

        let index = match arg {
            Some(word) => Some(word.parse::<usize>().ok()?.checked_sub(1)?),
            None => None,
        };

        match (name.as_str(), index) {
            ("more" | "m", None) => Some(Self::More),
            ("like" | "l", Some(i)) => Some(Self::Like(i)),
            ("unlike" | "u", Some(i)) => Some(Self::Unlike(i)),
            ("toggle" | "t", Some(i)) => Some(Self::Toggle(i)),
            ("share" | "s", Some(i)) => Some(Self::Share(i)),
            ("list" | "ls", None) => Some(Self::List),
            ("help" | "?", None) => Some(Self::Help),
            ("quit" | "q" | "exit", None) => Some(Self::Quit),
            _ => None,
        }
    }
}

const HELP: &str = "\
commands:
  more          load a wider window of days
  like N        like card N
  unlike N      unlike card N
  toggle N      like or unlike card N
  share N       copy the link of card N
  list          show the gallery again
  quit          exit";

fn spawn_fetch<F: Feed + Clone + 'static>(
    feed: &F,
    tracker: &Tracker,
    query: Query,
    results: mpsc::UnboundedSender<FetchResult>,
) {
    let feed = feed.clone();
    // Counted here so the spinner shows before the task is first polled.
    let pending = tracker.begin();

    tokio::spawn(async move {
        let result = feed.fetch_range(query.range).await;
        drop(pending);

        if results.send((query.id, result)).is_err() {
            debug!("gallery closed before the fetch finished");
        }
    });
}

fn show<S: KeyValueStore>(gallery: &mut Gallery<S>, tracker: &Tracker) {
    println!("{}", view::render(gallery, tracker));
}

fn missing_card(index: usize) {
    println!("! No card {}", index + 1);
}

async fn run() -> Result<()> {
    let folder = config::default_folder().ok_or(Error::NoConfigFolder)?;
    let config = config::configure(&folder)?;

    // APOD_ENDPOINT in the environment wins over the configured endpoint.
    let client = match env::var(ENDPOINT_VAR) {
        Ok(_) => Client::new_from_env()?,
        Err(_) => {
            let api_key = env::var(API_KEY_VAR).map_err(|_| apod::Error::MissingApiKey)?;
            Client::with_endpoint(api_key, config.endpoint.clone())?
        }
    };

    let store = JsonFileStore::new(config.storage_path(&folder));
    let mut gallery = Gallery::with_paging(store, config.initial_days, config.page_days);
    let tracker = Tracker::new();
    let mut clipboard = SystemClipboard::new();
    let (results_tx, mut results) = mpsc::unbounded_channel::<FetchResult>();

    info!(folder = %folder.display(), "starting");

    let query = gallery.mount(dates::local_today());
    spawn_fetch(&client, &tracker, query, results_tx.clone());
    show(&mut gallery, &tracker);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some((id, result)) = results.recv() => {
                if gallery.apply(id, result) {
                    show(&mut gallery, &tracker);
                }
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                if line.trim().is_empty() {
                    continue;
                }

                match Command::parse(&line) {
                    Some(Command::Quit) => break,
                    Some(Command::Help) => println!("{HELP}"),
                    Some(Command::List) => show(&mut gallery, &tracker),
                    Some(Command::More) => {
                        let query = gallery.load_more(dates::local_today());
                        spawn_fetch(&client, &tracker, query, results_tx.clone());
                        show(&mut gallery, &tracker);
                    }
                    Some(Command::Like(index)) => match gallery.pictures().get(index) {
                        Some(picture) => {
                            let date = picture.date.clone();
                            gallery.like(&date);
                            show(&mut gallery, &tracker);
                        }
                        None => missing_card(index),
                    },
                    Some(Command::Unlike(index)) => match gallery.pictures().get(index) {
                        Some(picture) => {
                            let date = picture.date.clone();
                            gallery.unlike(&date);
                            show(&mut gallery, &tracker);
                        }
                        None => missing_card(index),
                    },
                    Some(Command::Toggle(index)) => match gallery.toggle_like(index) {
                        Some(_) => show(&mut gallery, &tracker),
                        None => missing_card(index),
                    },
                    Some(Command::Share(index)) => match gallery.share(index, &mut clipboard) {
                        Some(_) => {
                            for toast in gallery.notifications().drain() {
                                println!("{}", view::render_toast(&toast));
                            }
                        }
                        None => missing_card(index),
                    },
                    None => println!("! Unknown command, type `help`"),
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("{}", e);
    }
}
