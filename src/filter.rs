//! Filter and sort pipeline over the in-memory catalog.
//!
//! The pipeline is a pure function of `(catalog, criteria)`: every stage
//! narrows the output of the previous one, and the sort runs last. Nothing
//! here knows about the terminal or about how criteria were typed in.

use crate::catalog::Movie;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Inclusive range with optional ends. A missing end never rejects a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    /// Both ends missing: the stage using these bounds is skipped.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: T) -> bool {
        self.min.is_none_or(|min| min <= value) && self.max.is_none_or(|max| value <= max)
    }
}

/// Genre selection: everything, or one exact label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Only(String),
}

/// Sort order applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Keep catalog order.
    #[default]
    None,
    /// Alphabetical, ascending.
    Title,
    /// Newest first.
    Year,
    /// Highest first.
    Rating,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [Self::None, Self::Title, Self::Year, Self::Rating];

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Title => "title",
            Self::Year => "year",
            Self::Rating => "rating",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::None => Self::Title,
            Self::Title => Self::Year,
            Self::Year => Self::Rating,
            Self::Rating => Self::None,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::None => Self::Rating,
            Self::Title => Self::None,
            Self::Year => Self::Title,
            Self::Rating => Self::Year,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "title" => Ok(Self::Title),
            "year" => Ok(Self::Year),
            "rating" => Ok(Self::Rating),
            other => {
                let choices: Vec<&str> = Self::ALL.iter().map(|k| k.label()).collect();
                Err(format!(
                    "unknown sort key '{}' (expected one of: {})",
                    other,
                    choices.join(", ")
                ))
            }
        }
    }
}

/// Everything the pipeline needs for one invocation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Criteria {
    pub search_text: String,
    pub genre: GenreFilter,
    pub years: Bounds<i32>,
    pub ratings: Bounds<f64>,
    pub sort: SortKey,
}

/// Filter and sort `catalog`, returning catalog positions in result order.
pub fn apply_indices(catalog: &[Movie], criteria: &Criteria) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..catalog.len()).collect();
    tracing::debug!(
        search = %criteria.search_text,
        genre = ?criteria.genre,
        years = ?criteria.years,
        ratings = ?criteria.ratings,
        sort = %criteria.sort,
        movies = indices.len(),
        "filtering catalog"
    );

    if !criteria.search_text.is_empty() {
        let needle = criteria.search_text.to_lowercase();
        indices.retain(|&i| catalog[i].title.to_lowercase().contains(&needle));
        tracing::debug!(remaining = indices.len(), "after title search");
    }

    if let GenreFilter::Only(label) = &criteria.genre {
        indices.retain(|&i| catalog[i].genre.iter().any(|g| g == label));
        tracing::debug!(remaining = indices.len(), "after genre filter");
    }

    if !criteria.years.is_unbounded() {
        indices.retain(|&i| criteria.years.contains(catalog[i].year));
        tracing::debug!(remaining = indices.len(), "after year filter");
    }

    if !criteria.ratings.is_unbounded() {
        indices.retain(|&i| criteria.ratings.contains(catalog[i].rating));
        tracing::debug!(remaining = indices.len(), "after rating filter");
    }

    sort_indices(catalog, &mut indices, criteria.sort);
    tracing::debug!(results = indices.len(), "filtering done");
    indices
}

/// Filter and sort `catalog`, returning the matching movies in result order.
pub fn apply<'a>(catalog: &'a [Movie], criteria: &Criteria) -> Vec<&'a Movie> {
    apply_indices(catalog, criteria)
        .into_iter()
        .map(|i| &catalog[i])
        .collect()
}

// `sort_by` is stable, so ties keep their filtered order.
fn sort_indices(catalog: &[Movie], indices: &mut [usize], key: SortKey) {
    match key {
        SortKey::None => {}
        SortKey::Title => {
            indices.sort_by(|&a, &b| compare_titles(&catalog[a].title, &catalog[b].title))
        }
        SortKey::Year => indices.sort_by(|&a, &b| catalog[b].year.cmp(&catalog[a].year)),
        SortKey::Rating => indices.sort_by(|&a, &b| {
            catalog[b]
                .rating
                .partial_cmp(&catalog[a].rating)
                .unwrap_or(Ordering::Equal)
        }),
    }
}

/// Dictionary-style title order.
///
/// Accents and case are ignored first (`Émile` sorts with `E`), then the
/// lower-cased title decides, then the exact string.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn base_letters(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
