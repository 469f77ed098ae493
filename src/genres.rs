use crate::catalog::Movie;
use std::collections::BTreeSet;

/// Collect every distinct genre label in the catalog, sorted ascending.
///
/// Labels are compared exactly, so `"Drama"` and `"drama"` are two entries.
pub fn build_genre_index(catalog: &[Movie]) -> Vec<String> {
    let genres: BTreeSet<&str> = catalog
        .iter()
        .flat_map(|movie| movie.genre.iter().map(String::as_str))
        .collect();

    let index: Vec<String> = genres.into_iter().map(str::to_string).collect();
    tracing::debug!(genres = index.len(), "genre index built");
    index
}
