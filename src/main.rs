mod app;
mod catalog;
mod config;
mod controls;
mod error;
mod filter;
mod genres;
mod logging;
mod ui;

use app::{App, InputMode, View};
use catalog::Catalog;
use clap::{Args, Parser, Subcommand};
use config::Config;
use controls::{parse_rating_bound, parse_year_bound};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use filter::{Bounds, Criteria, GenreFilter, SortKey};
use std::path::PathBuf;

/// TUI browser for a movie catalog
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Catalog URL or local JSON file (overrides the config file)
    #[arg(short, long, global = true)]
    source: Option<String>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of the default cache location
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI browser (default)
    Run,
    /// Print every genre in the catalog
    Genres,
    /// Print the titles matching the given filters
    List(FilterArgs),
}

#[derive(Args)]
struct FilterArgs {
    /// Case-insensitive title substring
    #[arg(long, default_value = "")]
    search: String,
    /// Exact genre label, or "all"
    #[arg(long, default_value = "all")]
    genre: String,
    #[arg(long, default_value = "")]
    year_from: String,
    #[arg(long, default_value = "")]
    year_to: String,
    #[arg(long, default_value = "")]
    rating_from: String,
    #[arg(long, default_value = "")]
    rating_to: String,
    /// none, title, year or rating
    #[arg(long, default_value = "none")]
    sort: SortKey,
}

impl FilterArgs {
    fn criteria(&self) -> Criteria {
        Criteria {
            search_text: self.search.clone(),
            genre: if self.genre == "all" {
                GenreFilter::All
            } else {
                GenreFilter::Only(self.genre.clone())
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
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        config.source = source;
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = Some(log_file);
    }
    logging::init(config.log_path().as_deref(), &config.log_level, cli.verbose);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Genres => {
            let catalog = Catalog::load(&config.source).await?;
            for genre in genres::build_genre_index(catalog.movies()) {
                println!("{}", genre);
            }
        }
        Commands::List(args) => {
            let catalog = Catalog::load(&config.source).await?;
            let results = filter::apply(catalog.movies(), &args.criteria());
            if results.is_empty() {
                eprintln!("No movies matched your filters");
            }
            for movie in results {
                println!(
                    "{} ({})  {}  {}",
                    movie.title,
                    movie.year,
                    movie.rating,
                    movie.genre.join(", ")
                );
            }
        }
        Commands::Run => {
            let (catalog, load_error) = match Catalog::load(&config.source).await {
                Ok(catalog) => (catalog, None),
                Err(e) => {
                    tracing::error!(source = %config.source, error = %e, "catalog load failed");
                    (Catalog::empty(), Some(e))
                }
            };

            // Create app
            let mut app = App::new(catalog);
            if let Some(e) = load_error {
                app.status_msg = format!("Failed to load catalog: {}", e.user_message());
            }

            // Init terminal
            let mut terminal = ratatui::init();

            // Initial page size setup
            let size = terminal.size()?;
            app.update_page_size(size.height);

            // Main loop
            let result = run_app(&mut terminal, &mut app);

            // Restore terminal
            ratatui::restore();

            if let Err(e) = result {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if crossterm::event::poll(std::time::Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Resize(_, height) => {
                    app.update_page_size(height);
                }
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') && app.input_mode == InputMode::Normal {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.input_mode == InputMode::Editing {
        handle_filter_input(app, key);
        return;
    }
    match app.view {
        View::List => handle_list_key(app, key),
        View::Detail => handle_detail_key(app, key),
    }
}

fn handle_filter_input(app: &mut App, key: KeyEvent) {
    let genre_count = app.genres.len();
    let changed = match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            false
        }
        KeyCode::Tab => {
            app.controls.focus_next();
            false
        }
        KeyCode::BackTab => {
            app.controls.focus_prev();
            false
        }
        KeyCode::Right => app.controls.select_next(genre_count),
        KeyCode::Left => app.controls.select_prev(genre_count),
        KeyCode::Backspace => app.controls.pop_char(),
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filters();
            false
        }
        KeyCode::Char(c) => app.controls.push_char(c),
        _ => false,
    };

    if changed {
        app.apply_filter();
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.list_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.list_prev();
        }
        KeyCode::PageDown => {
            app.list_page_down();
        }
        KeyCode::PageUp => {
            app.list_page_up();
        }
        KeyCode::Char('g') => {
            app.list_first();
        }
        KeyCode::Char('G') => {
            app.list_last();
        }
        KeyCode::Enter => {
            app.open_detail();
        }
        KeyCode::Char('c') => {
            app.clear_filters();
        }
        KeyCode::Esc => {
            // Clear filters
            if app.controls.criteria(&app.genres) != Criteria::default() {
                app.clear_filters();
            }
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.close_detail();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_down();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_up();
        }
        KeyCode::PageDown => {
            app.scroll_page_down();
        }
        KeyCode::PageUp => {
            app.scroll_page_up();
        }
        _ => {}
    }
}
