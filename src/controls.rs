//! Filter inputs as the user typed them, and the conversion to [`Criteria`].

use crate::filter::{Bounds, Criteria, GenreFilter, SortKey};

/// One editable input on the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlField {
    Search,
    Genre,
    Sort,
    YearFrom,
    YearTo,
    RatingFrom,
    RatingTo,
}

impl ControlField {
    pub const ALL: [ControlField; 7] = [
        Self::Search,
        Self::Genre,
        Self::Sort,
        Self::YearFrom,
        Self::YearTo,
        Self::RatingFrom,
        Self::RatingTo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Genre => "Genre",
            Self::Sort => "Sort",
            Self::YearFrom => "Year from",
            Self::YearTo => "Year to",
            Self::RatingFrom => "Rating from",
            Self::RatingTo => "Rating to",
        }
    }

    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let pos = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Selector fields cycle through fixed choices instead of taking text.
    pub fn is_selector(self) -> bool {
        matches!(self, Self::Genre | Self::Sort)
    }
}

/// Current contents of every filter input.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub search: String,
    /// 0 is "All genres", `n` is the `n - 1`th entry of the genre index.
    pub genre: usize,
    pub sort: SortKey,
    pub year_from: String,
    pub year_to: String,
    pub rating_from: String,
    pub rating_to: String,
    pub focus: ControlField,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

impl Controls {
    pub fn new() -> Self {
        Self {
            search: String::new(),
            genre: 0,
            sort: SortKey::None,
            year_from: String::new(),
            year_to: String::new(),
            rating_from: String::new(),
            rating_to: String::new(),
            focus: ControlField::Search,
        }
    }

    /// Reset every input to its unconstrained value. Focus is kept.
    pub fn clear(&mut self) {
        let focus = self.focus;
        *self = Self::new();
        self.focus = focus;
    }

    /// Build criteria from the inputs, substituting defaults for blanks and
    /// anything that does not parse as a number.
    pub fn criteria(&self, genres: &[String]) -> Criteria {
        Criteria {
            search_text: self.search.clone(),
            genre: match self.selected_genre(genres) {
                Some(label) => GenreFilter::Only(label.to_string()),
                None => GenreFilter::All,
            },
            years: Bounds::new(
                parse_year_bound(&self.year_from),
                parse_year_bound(&self.year_to),
            ),
            ratings: Bounds::new(
                parse_rating_bound(&self.rating_from),
                parse_rating_bound(&self.rating_to),
            ),
            sort: self.sort,
        }
    }

    /// The selected genre label, or `None` for "All genres" or a stale index.
    pub fn selected_genre<'a>(&self, genres: &'a [String]) -> Option<&'a str> {
        self.genre
            .checked_sub(1)
            .and_then(|i| genres.get(i))
            .map(String::as_str)
    }

    pub fn genre_label<'a>(&self, genres: &'a [String]) -> &'a str {
        self.selected_genre(genres).unwrap_or("All genres")
    }

    /// Display text of a field.
    pub fn value(&self, field: ControlField, genres: &[String]) -> String {
        match field {
            ControlField::Search => self.search.clone(),
            ControlField::Genre => self.genre_label(genres).to_string(),
            ControlField::Sort => self.sort.label().to_string(),
            ControlField::YearFrom => self.year_from.clone(),
            ControlField::YearTo => self.year_to.clone(),
            ControlField::RatingFrom => self.rating_from.clone(),
            ControlField::RatingTo => self.rating_to.clone(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            ControlField::Search => Some(&mut self.search),
            ControlField::YearFrom => Some(&mut self.year_from),
            ControlField::YearTo => Some(&mut self.year_to),
            ControlField::RatingFrom => Some(&mut self.rating_from),
            ControlField::RatingTo => Some(&mut self.rating_to),
            ControlField::Genre | ControlField::Sort => None,
        }
    }

    /// Type a character into the focused text field. Returns whether
    /// anything changed.
    pub fn push_char(&mut self, c: char) -> bool {
        match self.text_mut() {
            Some(text) => {
                text.push(c);
                true
            }
            None => false,
        }
    }

    pub fn pop_char(&mut self) -> bool {
        self.text_mut().and_then(String::pop).is_some()
    }

    /// Advance the focused selector. `genre_count` excludes "All genres".
    pub fn select_next(&mut self, genre_count: usize) -> bool {
        match self.focus {
            ControlField::Genre => {
                self.genre = (self.genre + 1) % (genre_count + 1);
                true
            }
            ControlField::Sort => {
                self.sort = self.sort.next();
                true
            }
            _ => false,
        }
    }

    pub fn select_prev(&mut self, genre_count: usize) -> bool {
        match self.focus {
            ControlField::Genre => {
                let choices = genre_count + 1;
                self.genre = (self.genre.min(genre_count) + choices - 1) % choices;
                true
            }
            ControlField::Sort => {
                self.sort = self.sort.prev();
                true
            }
            _ => false,
        }
    }
}

/// Year bound from user text. Blank or non-integer input means unbounded.
pub fn parse_year_bound(input: &str) -> Option<i32> {
    input.trim().parse::<i32>().ok()
}

/// Rating bound from user text. Blank, non-numeric, NaN or infinite input
/// means unbounded.
pub fn parse_rating_bound(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::movie;
    use crate::filter::apply_indices;
    use proptest::prelude::*;

    fn genres() -> Vec<String> {
        vec!["Comedy".to_string(), "Drama".to_string()]
    }

    #[test]
    fn test_new_controls_are_unconstrained() {
        let controls = Controls::new();
        assert_eq!(controls.criteria(&genres()), Criteria::default());
    }

    #[test]
    fn test_parse_year_bound() {
        assert_eq!(parse_year_bound("2001"), Some(2001));
        assert_eq!(parse_year_bound(" 1999 "), Some(1999));
        assert_eq!(parse_year_bound(""), None);
        assert_eq!(parse_year_bound("abc"), None);
        assert_eq!(parse_year_bound("19x9"), None);
    }

    #[test]
    fn test_parse_rating_bound() {
        assert_eq!(parse_rating_bound("7.5"), Some(7.5));
        assert_eq!(parse_rating_bound("8"), Some(8.0));
        assert_eq!(parse_rating_bound("   "), None);
        assert_eq!(parse_rating_bound("NaN"), None);
        assert_eq!(parse_rating_bound("inf"), None);
        assert_eq!(parse_rating_bound("good"), None);
    }

    #[test]
    fn test_criteria_from_inputs() {
        let mut controls = Controls::new();
        controls.search = "alp".to_string();
        controls.genre = 2;
        controls.sort = SortKey::Rating;
        controls.year_from = "2000".to_string();
        controls.rating_to = "9.5".to_string();

        let criteria = controls.criteria(&genres());
        assert_eq!(criteria.search_text, "alp");
        assert_eq!(criteria.genre, GenreFilter::Only("Drama".to_string()));
        assert_eq!(criteria.years, Bounds::new(Some(2000), None));
        assert_eq!(criteria.ratings, Bounds::new(None, Some(9.5)));
        assert_eq!(criteria.sort, SortKey::Rating);
    }

    #[test]
    fn test_stale_genre_index_means_all() {
        let mut controls = Controls::new();
        controls.genre = 7;
        assert_eq!(controls.criteria(&genres()).genre, GenreFilter::All);
        assert_eq!(controls.genre_label(&genres()), "All genres");
    }

    #[test]
    fn test_clear_resets_everything_but_focus() {
        let mut controls = Controls::new();
        controls.search = "x".to_string();
        controls.genre = 1;
        controls.sort = SortKey::Year;
        controls.year_to = "1990".to_string();
        controls.rating_from = "3".to_string();
        controls.focus = ControlField::YearTo;

        controls.clear();
        assert_eq!(controls.criteria(&genres()), Criteria::default());
        assert_eq!(controls.focus, ControlField::YearTo);
    }

    #[test]
    fn test_typing_into_fields() {
        let mut controls = Controls::new();
        assert!(controls.push_char('a'));
        assert_eq!(controls.search, "a");
        assert!(controls.pop_char());
        assert!(!controls.pop_char());

        controls.focus = ControlField::Genre;
        assert!(!controls.push_char('x'));

        controls.focus = ControlField::RatingFrom;
        controls.push_char('7');
        assert_eq!(controls.rating_from, "7");
    }

    #[test]
    fn test_genre_selector_wraps() {
        let mut controls = Controls::new();
        controls.focus = ControlField::Genre;

        assert!(controls.select_next(2));
        assert_eq!(controls.genre_label(&genres()), "Comedy");
        controls.select_next(2);
        controls.select_next(2);
        assert_eq!(controls.genre, 0);

        controls.select_prev(2);
        assert_eq!(controls.genre_label(&genres()), "Drama");
    }

    #[test]
    fn test_sort_selector_cycles() {
        let mut controls = Controls::new();
        controls.focus = ControlField::Sort;
        controls.select_next(0);
        assert_eq!(controls.sort, SortKey::Title);
        controls.select_prev(0);
        controls.select_prev(0);
        assert_eq!(controls.sort, SortKey::Rating);

        controls.focus = ControlField::Search;
        assert!(!controls.select_next(0));
    }

    #[test]
    fn test_focus_cycle() {
        let mut field = ControlField::Search;
        for _ in 0..ControlField::ALL.len() {
            field = field.next();
        }
        assert_eq!(field, ControlField::Search);
        assert_eq!(ControlField::Search.prev(), ControlField::RatingTo);
    }

    proptest! {
        #[test]
        fn prop_garbage_bounds_act_as_unset(junk in "[a-z ]{0,5}") {
            let catalog = vec![
                movie("Alpha", 2001, 7.0, &["Drama"]),
                movie("Beta", 1999, 8.5, &["Comedy"]),
            ];
            let mut controls = Controls::new();
            controls.year_from = junk.clone();
            controls.year_to = junk.clone();
            controls.rating_from = junk.clone();
            controls.rating_to = junk;

            let criteria = controls.criteria(&genres());
            prop_assert_eq!(
                apply_indices(&catalog, &criteria),
                apply_indices(&catalog, &Criteria::default())
            );
        }
    }
}
