use thiserror::Error;

#[derive(Debug, Error)]
#[error("Clipboard unavailable: {0}")]
pub struct Error(pub String);

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), Error>;
}

/// The desktop clipboard, opened on first use so that a headless session
/// only fails when something is actually shared.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), Error> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(|e| Error(e.to_string()))?,
        };
        let clipboard = self.inner.insert(clipboard);

        clipboard
            .set_text(text)
            .map_err(|e| Error(e.to_string()))
    }
}
