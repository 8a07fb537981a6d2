use std::path::{Path, PathBuf};

use crate::color::GenreColors;
use crate::data::analysis::{self, Summary, TOP_N};
use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::loader;
use crate::data::model::Dataset;
use crate::error::ExportError;
use crate::export::{self, ChartFormat, ChartInput, ChartKind};
use crate::theme::ThemeMode;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Dashboard,
    YearTrends,
    GenreAnalysis,
    TopRated,
    Export,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Dashboard,
        Page::YearTrends,
        Page::GenreAnalysis,
        Page::TopRated,
        Page::Export,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Dashboard => "Dashboard",
            Page::YearTrends => "Year-wise Trends",
            Page::GenreAnalysis => "Genre Analysis",
            Page::TopRated => "Top 10 Movies",
            Page::Export => "Export",
        }
    }

    pub fn requires_dataset(self) -> bool {
        self != Page::Home
    }
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Warning,
    Error,
}

/// A message waiting to be shown in a modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DialogKind::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DialogKind::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DialogKind::Error, title, message)
    }

    fn new(kind: DialogKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Dialog {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// Indices of movies passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Per-genre bar colours, rebuilt on load.
    pub genre_colors: Option<GenreColors>,

    pub page: Page,

    pub theme: ThemeMode,

    /// Dataset index of the movie shown in the details modal.
    pub selected: Option<usize>,

    /// Pending message for the user.
    pub dialog: Option<Dialog>,

    /// Whether the "clear dataset" confirmation is open.
    pub confirm_clear: bool,

    /// Format used by chart export buttons.
    pub chart_format: ChartFormat,
}

impl AppState {
    /// Load a CSV. On failure the previous dataset stays in place.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_csv(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} movies ({} genres) from {}",
                    dataset.len(),
                    dataset.genres.len(),
                    path.display()
                );
                let count = dataset.len();
                self.set_dataset(dataset);
                self.source = Some(path.to_path_buf());
                self.dialog = Some(Dialog::info(
                    "Success",
                    format!("Dataset uploaded successfully! {count} movies loaded."),
                ));
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.dialog = Some(Dialog::error("Could not load dataset", e.to_string()));
            }
        }
    }

    /// Ingest a newly loaded dataset and reset filters to show everything.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.criteria = FilterCriteria::for_dataset(&dataset);
        self.visible_indices = (0..dataset.len()).collect();
        self.genre_colors = Some(GenreColors::new(&dataset.genres));
        self.selected = None;
        self.dataset = Some(dataset);
    }

    pub fn clear_dataset(&mut self) {
        *self = AppState {
            theme: self.theme,
            chart_format: self.chart_format,
            ..AppState::default()
        };
        log::info!("Dataset cleared");
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.criteria);
        }
    }

    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria = FilterCriteria::for_dataset(ds);
            self.refilter();
        }
    }

    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.criteria.genres.remove(genre) {
            self.criteria.genres.insert(genre.to_string());
        }
        self.refilter();
    }

    /// Switch page. Pages that need data refuse until a dataset is loaded.
    pub fn navigate(&mut self, page: Page) {
        if page.requires_dataset() && self.dataset.is_none() {
            self.dialog = Some(Dialog::warning(
                "No Dataset",
                format!("Please upload a dataset first to access {}.", page.label()),
            ));
            return;
        }
        self.page = page;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        log::info!("Theme switched to {:?}", self.theme);
    }

    pub fn summary(&self) -> Summary {
        match &self.dataset {
            Some(ds) => analysis::summary(ds, &self.visible_indices),
            None => Summary::default(),
        }
    }

    pub fn top_movies(&self) -> Vec<usize> {
        match &self.dataset {
            Some(ds) => analysis::top_rated(ds, &self.visible_indices, TOP_N),
            None => Vec::new(),
        }
    }

    fn chart_input(&self) -> Option<ChartInput<'_>> {
        Some(ChartInput {
            dataset: self.dataset.as_ref()?,
            view: &self.visible_indices,
            palette: self.theme.palette(),
            genre_colors: self.genre_colors.as_ref()?,
        })
    }

    // -- Export actions: errors become dialogs, never panics --

    pub fn export_filtered_csv(&mut self, path: &Path) {
        let result = match &self.dataset {
            Some(ds) => export::export_csv(ds, &self.visible_indices, path),
            None => Err(ExportError::NothingToExport),
        };
        self.report_export(result, format!("Exported {} movies to CSV.", self.visible_indices.len()));
    }

    pub fn export_top_csv(&mut self, path: &Path) {
        let result = match &self.dataset {
            Some(ds) => export::export_top_csv(ds, &self.visible_indices, path),
            None => Err(ExportError::NothingToExport),
        };
        self.report_export(result, "Top 10 movies exported successfully.".to_string());
    }

    pub fn export_chart(&mut self, kind: ChartKind, path: &Path) {
        let format = self.chart_format;
        let result = match self.chart_input() {
            Some(input) => export::export_chart(kind, &input, format, path),
            None => Err(ExportError::NothingToExport),
        };
        self.report_export(
            result,
            format!("{} exported as {}.", kind.title(), format.label()),
        );
    }

    pub fn export_all_charts(&mut self, dir: &Path) {
        let format = self.chart_format;
        let result = match self.chart_input() {
            Some(input) => export::export_all_charts(&input, format, dir),
            None => Err(ExportError::NothingToExport),
        };
        let message = format!("All charts exported to {}.", dir.display());
        self.report_export(result.map(|_| ()), message);
    }

    pub fn export_summary_report(&mut self, path: &Path) {
        let format = self.chart_format;
        let result = match self.chart_input() {
            Some(input) => export::export_summary_report(&input, format, path),
            None => Err(ExportError::NothingToExport),
        };
        self.report_export(
            result,
            format!("Summary report with all charts exported as {}.", format.label()),
        );
    }

    fn report_export(&mut self, result: Result<(), ExportError>, success: String) {
        self.dialog = Some(match result {
            Ok(()) => Dialog::info("Export", success),
            Err(e) => {
                log::error!("Export failed: {e}");
                Dialog::error("Export failed", e.to_string())
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::Movie;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(Dataset::from_movies(vec![
            Movie::new("Inception", 2010, &["Sci-Fi"], 8.8),
            Movie::new("Titanic", 1997, &["Romance"], 7.8),
        ]));
        state
    }

    #[test]
    fn starts_empty_on_home_in_dark_mode() {
        let state = AppState::default();
        assert!(state.dataset.is_none());
        assert_eq!(state.page, Page::Home);
        assert_eq!(state.theme, ThemeMode::Dark);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = loaded();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"title,year\nHeat,1995\n").unwrap();

        state.load_path(file.path());

        assert_eq!(state.dataset.as_ref().unwrap().len(), 2);
        assert_eq!(state.dialog.as_ref().unwrap().kind, DialogKind::Error);
    }

    #[test]
    fn failed_first_load_leaves_no_dataset() {
        let mut state = AppState::default();
        let dir = tempfile::tempdir().unwrap();
        state.load_path(&dir.path().join("absent.csv"));

        assert!(state.dataset.is_none());
        assert!(state.source.is_none());
        assert_eq!(state.dialog.unwrap().kind, DialogKind::Error);
    }

    #[test]
    fn successful_load_installs_dataset() {
        let mut state = AppState::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"title,year,genre,rating\nHeat,1995,Crime,8.3\n")
            .unwrap();

        state.load_path(file.path());

        assert_eq!(state.visible_indices, [0]);
        assert_eq!(state.criteria.min_year, Some(1995));
        assert_eq!(state.dialog.unwrap().kind, DialogKind::Info);
    }

    #[test]
    fn analysis_pages_need_a_dataset() {
        let mut state = AppState::default();
        state.navigate(Page::TopRated);
        assert_eq!(state.page, Page::Home);
        assert_eq!(state.dialog.unwrap().kind, DialogKind::Warning);

        let mut state = loaded();
        state.navigate(Page::TopRated);
        assert_eq!(state.page, Page::TopRated);
    }

    #[test]
    fn filters_drive_the_visible_rows_and_aggregates() {
        let mut state = loaded();
        state.criteria.min_rating = 8.0;
        state.refilter();

        assert_eq!(state.visible_indices, [0]);
        assert_eq!(state.top_movies(), [0]);
        assert_eq!(state.summary().total, 1);

        state.reset_filters();
        assert_eq!(state.visible_indices, [0, 1]);
    }

    #[test]
    fn toggling_a_genre_twice_restores_the_view() {
        let mut state = loaded();
        state.toggle_genre("Romance");
        assert_eq!(state.visible_indices, [1]);
        state.toggle_genre("Romance");
        assert_eq!(state.visible_indices, [0, 1]);
    }

    #[test]
    fn clear_keeps_theme() {
        let mut state = loaded();
        state.toggle_theme();
        state.page = Page::Dashboard;
        state.clear_dataset();

        assert!(state.dataset.is_none());
        assert_eq!(state.page, Page::Home);
        assert_eq!(state.theme, ThemeMode::Light);
    }

    #[test]
    fn export_failure_becomes_a_dialog() {
        let mut state = loaded();
        let dir = tempfile::tempdir().unwrap();
        state.export_filtered_csv(&dir.path().join("no").join("such.csv"));

        let dialog = state.dialog.unwrap();
        assert_eq!(dialog.kind, DialogKind::Error);
        assert!(dialog.message.contains("such.csv"));
    }

    #[test]
    fn chart_export_reports_success() {
        let mut state = loaded();
        state.chart_format = ChartFormat::Svg;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genre_analysis.svg");
        state.export_chart(ChartKind::GenreAverage, &path);

        let dialog = state.dialog.unwrap();
        assert_eq!(dialog.kind, DialogKind::Info);
        assert!(dialog.message.contains("SVG"));
        assert!(path.exists());
    }

    #[test]
    fn summary_report_export_reports_success() {
        let mut state = loaded();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary_report.png");
        state.export_summary_report(&path);

        assert_eq!(state.dialog.unwrap().kind, DialogKind::Info);
        assert!(path.exists());
    }

    #[test]
    fn summary_report_without_dataset_is_an_error_dialog() {
        let mut state = AppState::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary_report.png");
        state.export_summary_report(&path);

        assert_eq!(state.dialog.unwrap().kind, DialogKind::Error);
        assert!(!path.exists());
    }

    #[test]
    fn export_success_becomes_an_info_dialog() {
        let mut state = loaded();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.csv");
        state.export_top_csv(&path);

        assert_eq!(state.dialog.unwrap().kind, DialogKind::Info);
        assert!(path.exists());
    }
}
