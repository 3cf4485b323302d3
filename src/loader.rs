use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

use crate::menu::MenuDocument;

/// Failure modes of the one-shot menu retrieval.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read menu file: {0}")]
    Io(#[from] std::io::Error),

    #[error("menu request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("menu request returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("menu document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LoadError {
    /// Operator-facing description rendered in place of the menu.
    pub fn user_message(&self) -> String {
        match self {
            LoadError::Io(e) => format!("Could not read the menu file: {e}"),
            LoadError::Http(e) => format!("Could not reach the menu server: {e}"),
            LoadError::Status(status) => {
                format!("The menu server answered with HTTP {status}")
            }
            LoadError::Parse(e) => format!("The menu document is malformed: {e}"),
        }
    }
}

/// Where the menu document comes from.
#[derive(Debug, Clone)]
pub enum MenuSource {
    File(PathBuf),
    Url(String),
}

impl MenuSource {
    /// Interpret a CLI argument as either an HTTP(S) URL or a local path.
    pub fn parse(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            Self::Url(arg.to_string())
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Directory item image references are resolved against, when known.
    pub fn base_dir(&self) -> Option<PathBuf> {
        match self {
            Self::File(path) => path.parent().map(Path::to_path_buf),
            Self::Url(_) => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
        }
    }
}

/// Retrieve and decode the menu document. Always fetches fresh: remote
/// requests opt out of caches and no local copy is consulted or written.
pub async fn load_menu(source: &MenuSource) -> Result<MenuDocument, LoadError> {
    let bytes = match source {
        MenuSource::File(path) => std::fs::read(path)?,
        MenuSource::Url(url) => download_fresh(url).await?,
    };
    Ok(serde_json::from_slice(&bytes)?)
}

async fn download_fresh(url: &str) -> Result<Vec<u8>, LoadError> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "no-store")
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(LoadError::Status(response.status()));
    }

    let pb = match response.content_length() {
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        }
        None => ProgressBar::new_spinner(),
    };

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        bytes.extend_from_slice(&chunk);
        pb.set_position(bytes.len() as u64);
    }
    pb.finish_and_clear();

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_parse_distinguishes_urls_from_paths() {
        assert!(matches!(
            MenuSource::parse("https://example.com/menu.json"),
            MenuSource::Url(_)
        ));
        assert!(matches!(
            MenuSource::parse("data/menu.json"),
            MenuSource::File(_)
        ));
    }

    #[test]
    fn base_dir_is_the_menu_files_parent() {
        let source = MenuSource::parse("data/menu.json");
        assert_eq!(source.base_dir(), Some(PathBuf::from("data")));

        let remote = MenuSource::parse("https://example.com/menu.json");
        assert_eq!(remote.base_dir(), None);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let source = MenuSource::File(PathBuf::from("does/not/exist.json"));
        let err = load_menu(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
        assert!(err.user_message().contains("menu file"));
    }

    #[tokio::test]
    async fn malformed_document_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = load_menu(&MenuSource::File(path)).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[tokio::test]
    async fn well_formed_document_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");
        std::fs::write(
            &path,
            br#"{"sections":[{"title":"Tacos","items":[{"name":"Al Pastor","price":85}]}]}"#,
        )
        .unwrap();

        let doc = load_menu(&MenuSource::File(path)).await.unwrap();
        assert_eq!(doc.currency, "MXN");
        assert_eq!(doc.sections[0].items[0].name, "Al Pastor");
    }
}
