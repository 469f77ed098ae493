use crate::catalog::{Catalog, Movie};
use crate::controls::Controls;
use crate::filter;
use crate::genres::build_genre_index;

/// Which view is currently active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    List,
    Detail,
}

/// Input mode for the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub const LIST_OVERHEAD: u16 = 10;

/// Main application state.
pub struct App {
    pub catalog: Catalog,
    pub genres: Vec<String>,
    pub should_quit: bool,
    pub view: View,
    pub show_help: bool,

    // Filter result, as positions into the catalog
    pub filtered_indices: Vec<usize>,

    // List view state
    pub list_selected: usize, // Index within visible page
    pub list_offset: usize,   // Offset into filtered_indices
    pub page_size: usize,

    pub controls: Controls,
    pub input_mode: InputMode,

    // Detail view state
    pub detail: Option<usize>,
    pub detail_scroll: u16,

    // Status message
    pub status_msg: String,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        let genres = build_genre_index(catalog.movies());
        let mut app = Self {
            catalog,
            genres,
            should_quit: false,
            view: View::List,
            show_help: false,

            filtered_indices: Vec::new(),

            list_selected: 0,
            list_offset: 0,
            page_size: 20, // Initial default, will be updated on first render/resize

            controls: Controls::new(),
            input_mode: InputMode::Normal,

            detail: None,
            detail_scroll: 0,

            status_msg: String::new(),
        };
        app.apply_filter();
        app.status_msg = if app.catalog.is_empty() {
            "Catalog is empty".to_string()
        } else {
            format!(
                "{} movies loaded, {} genres",
                app.catalog.len(),
                app.genres.len()
            )
        };
        app
    }

    /// Movies on the current page, in display order.
    pub fn visible_movies(&self) -> Vec<&Movie> {
        let end = (self.list_offset + self.page_size).min(self.filtered_indices.len());
        self.filtered_indices
            .get(self.list_offset..end)
            .unwrap_or_default()
            .iter()
            .filter_map(|&i| self.catalog.get(i))
            .collect()
    }

    fn visible_len(&self) -> usize {
        let end = (self.list_offset + self.page_size).min(self.filtered_indices.len());
        end.saturating_sub(self.list_offset)
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        self.filtered_indices
            .get(self.list_offset + self.list_selected)
            .and_then(|&i| self.catalog.get(i))
    }

    pub fn detail_movie(&self) -> Option<&Movie> {
        self.detail.and_then(|i| self.catalog.get(i))
    }

    /// Update page size based on terminal height.
    pub fn update_page_size(&mut self, terminal_height: u16) {
        let new_size = terminal_height.saturating_sub(LIST_OVERHEAD) as usize;
        self.page_size = new_size.max(1);
        // Keep the selected movie on screen after a resize
        let absolute = self.list_offset + self.list_selected;
        self.list_offset = (absolute / self.page_size) * self.page_size;
        self.list_selected = absolute - self.list_offset;
    }

    /// Move selection down in the list.
    pub fn list_next(&mut self) {
        if self.filtered_indices.is_empty() {
            return;
        }
        if self.list_selected + 1 < self.visible_len() {
            self.list_selected += 1;
        } else {
            // Next page
            let new_offset = self.list_offset + self.page_size;
            if new_offset < self.filtered_indices.len() {
                self.list_offset = new_offset;
                self.list_selected = 0;
            }
        }
    }

    /// Move selection up in the list.
    pub fn list_prev(&mut self) {
        if self.list_selected > 0 {
            self.list_selected -= 1;
        } else if self.list_offset > 0 {
            // Prev page
            self.list_offset = self.list_offset.saturating_sub(self.page_size);
            self.list_selected = self.visible_len().saturating_sub(1);
        }
    }

    pub fn list_page_down(&mut self) {
        let new_offset = self.list_offset + self.page_size;
        if new_offset < self.filtered_indices.len() {
            self.list_offset = new_offset;
            self.list_selected = 0;
        } else {
            self.list_last();
        }
    }

    pub fn list_page_up(&mut self) {
        if self.list_offset > 0 {
            self.list_offset = self.list_offset.saturating_sub(self.page_size);
        }
        self.list_selected = 0;
    }

    pub fn list_first(&mut self) {
        self.list_offset = 0;
        self.list_selected = 0;
    }

    pub fn list_last(&mut self) {
        if self.filtered_indices.is_empty() {
            return;
        }
        let last_page_start =
            (self.filtered_indices.len().saturating_sub(1) / self.page_size) * self.page_size;
        self.list_offset = last_page_start;
        self.list_selected = self.visible_len().saturating_sub(1);
    }

    /// Open the detail overlay for the currently selected movie.
    pub fn open_detail(&mut self) {
        let index = self
            .filtered_indices
            .get(self.list_offset + self.list_selected)
            .copied();
        if let Some(movie) = self.selected_movie() {
            tracing::debug!(title = %movie.title, "opening detail");
            self.detail = index;
            self.detail_scroll = 0;
            self.view = View::Detail;
        }
    }

    pub fn close_detail(&mut self) {
        self.view = View::List;
        self.detail = None;
    }

    /// Re-run the filter pipeline from the current controls and reset the list.
    pub fn apply_filter(&mut self) {
        let criteria = self.controls.criteria(&self.genres);
        self.filtered_indices = filter::apply_indices(self.catalog.movies(), &criteria);

        self.list_offset = 0;
        self.list_selected = 0;

        self.status_msg = if self.filtered_indices.is_empty() {
            "No movies matched your filters".to_string()
        } else {
            format!(
                "{} of {} movies shown",
                self.filtered_indices.len(),
                self.catalog.len()
            )
        };
    }

    /// Reset every filter input and show the catalog again.
    pub fn clear_filters(&mut self) {
        tracing::info!("clearing all filters");
        self.controls.clear();
        self.apply_filter();
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn scroll_page_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(20);
    }

    pub fn scroll_page_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(20);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::movie;
    use crate::controls::ControlField;
    use crate::filter::SortKey;

    fn sample_app() -> App {
        App::new(Catalog::new(vec![
            movie("Alpha", 2001, 7.0, &["Drama"]),
            movie("Beta", 1999, 8.5, &["Comedy"]),
            movie("Gamma", 2010, 6.0, &["Drama", "Sci-Fi"]),
        ]))
    }

    fn shown_titles(app: &App) -> Vec<String> {
        app.filtered_indices
            .iter()
            .map(|&i| app.catalog.movies()[i].title.clone())
            .collect()
    }

    #[test]
    fn test_new_app_shows_whole_catalog() {
        let app = sample_app();
        assert_eq!(shown_titles(&app), vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(app.genres, vec!["Comedy", "Drama", "Sci-Fi"]);
        assert!(app.status_msg.contains("3 movies loaded"));
    }

    #[test]
    fn test_empty_catalog_app() {
        let app = App::new(Catalog::empty());
        assert!(app.filtered_indices.is_empty());
        assert!(app.genres.is_empty());
        assert!(app.selected_movie().is_none());
        assert_eq!(app.status_msg, "Catalog is empty");
    }

    #[test]
    fn test_apply_filter_reads_controls() {
        let mut app = sample_app();
        app.controls.genre = 2; // Drama
        app.controls.sort = SortKey::Year;
        app.apply_filter();
        assert_eq!(shown_titles(&app), vec!["Gamma", "Alpha"]);
    }

    #[test]
    fn test_no_match_status() {
        let mut app = sample_app();
        app.controls.search = "zzz".to_string();
        app.apply_filter();
        assert!(app.filtered_indices.is_empty());
        assert_eq!(app.status_msg, "No movies matched your filters");
    }

    #[test]
    fn test_clear_filters_restores_catalog_order() {
        let mut app = sample_app();
        app.controls.search = "a".to_string();
        app.controls.sort = SortKey::Rating;
        app.controls.rating_from = "6.5".to_string();
        app.controls.focus = ControlField::RatingFrom;
        app.apply_filter();
        assert_eq!(shown_titles(&app), vec!["Beta", "Alpha"]);

        app.clear_filters();
        assert_eq!(shown_titles(&app), vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(app.controls.sort, SortKey::None);
    }

    #[test]
    fn test_open_and_close_detail() {
        let mut app = sample_app();
        app.list_next();
        app.open_detail();
        assert_eq!(app.view, View::Detail);
        assert_eq!(app.detail_movie().map(|m| m.title.as_str()), Some("Beta"));

        app.close_detail();
        assert_eq!(app.view, View::List);
        assert!(app.detail_movie().is_none());
    }

    #[test]
    fn test_open_detail_on_empty_result_is_noop() {
        let mut app = sample_app();
        app.controls.search = "zzz".to_string();
        app.apply_filter();
        app.open_detail();
        assert_eq!(app.view, View::List);
    }

    #[test]
    fn test_paging() {
        let mut app = sample_app();
        app.page_size = 2;

        assert_eq!(app.visible_movies().len(), 2);
        app.list_next();
        app.list_next();
        assert_eq!(app.list_offset, 2);
        assert_eq!(app.selected_movie().map(|m| m.title.as_str()), Some("Gamma"));

        app.list_next();
        assert_eq!(app.list_offset, 2);
        assert_eq!(app.list_selected, 0);

        app.list_prev();
        assert_eq!(app.list_offset, 0);
        assert_eq!(app.selected_movie().map(|m| m.title.as_str()), Some("Beta"));

        app.list_last();
        assert_eq!(app.selected_movie().map(|m| m.title.as_str()), Some("Gamma"));
        app.list_first();
        assert_eq!(app.selected_movie().map(|m| m.title.as_str()), Some("Alpha"));

        app.list_page_down();
        assert_eq!(app.list_offset, 2);
        app.list_page_up();
        assert_eq!(app.list_offset, 0);
    }

    #[test]
    fn test_update_page_size_keeps_selection() {
        let mut app = sample_app();
        app.page_size = 1;
        app.list_last();
        assert_eq!(app.list_offset, 2);

        app.update_page_size(LIST_OVERHEAD + 2);
        assert_eq!(app.page_size, 2);
        assert_eq!(app.selected_movie().map(|m| m.title.as_str()), Some("Gamma"));
    }

    #[test]
    fn test_detail_scroll_saturates() {
        let mut app = sample_app();
        app.scroll_up();
        assert_eq!(app.detail_scroll, 0);
        app.scroll_page_down();
        app.scroll_down();
        assert_eq!(app.detail_scroll, 21);
        app.scroll_page_up();
        assert_eq!(app.detail_scroll, 1);
    }
}
