use crate::error::CatalogError;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::path::Path;

/// A single movie record from the catalog document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub genre: Vec<String>,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

/// The immutable set of movies for the session.
///
/// Built once from the catalog source and never mutated afterwards; filtering
/// always borrows it and derives a new sequence.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON array of movie objects.
    pub fn from_json(bytes: &[u8]) -> Result<Self, CatalogError> {
        let movies: Vec<Movie> = serde_json::from_slice(bytes)?;
        Ok(Self::new(movies))
    }

    /// Load the catalog from an `http(s)://` URL or a local file path.
    pub async fn load(source: &str) -> Result<Self, CatalogError> {
        let bytes = if is_remote(source) {
            fetch(source).await?
        } else {
            tokio::fs::read(Path::new(source)).await?
        };
        let catalog = Self::from_json(&bytes)?;
        tracing::info!(source, movies = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Download the catalog document, showing progress on stderr.
async fn fetch(url: &str) -> Result<Vec<u8>, CatalogError> {
    tracing::debug!(url, "fetching catalog");
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status {
            status: status.as_u16(),
        });
    }

    let pb = match response.content_length() {
        Some(total_size) => {
            let pb = ProgressBar::new(total_size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        }
        None => ProgressBar::new_spinner(),
    };

    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(item) = stream.next().await {
        let chunk = item?;
        body.extend_from_slice(&chunk);
        pb.set_position(body.len() as u64);
    }

    pb.finish_and_clear();
    Ok(body)
}
