use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// Movie – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single movie, typed at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    /// Genre tokens in first-seen order, no duplicates.
    pub genres: Vec<String>,
    /// IMDb rating, always within `0.0..=10.0`.
    pub rating: f64,
    /// Poster URL or path, if the dataset has one for this row.
    pub poster: Option<String>,
    /// Any other CSV columns, keyed by header name.
    pub extra: BTreeMap<String, String>,
}

impl Movie {
    #[cfg(test)]
    pub fn new(title: impl Into<String>, year: i32, genres: &[&str], rating: f64) -> Self {
        Movie {
            title: title.into(),
            year,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            rating,
            poster: None,
            extra: BTreeMap::new(),
        }
    }

    /// Genres joined the way the IMDb dataset writes them (`"Crime, Drama"`).
    pub fn genre_text(&self) -> String {
        self.genres.join(", ")
    }
}

/// Render a rating with at least one decimal so `9` round-trips as `9.0`.
pub fn format_rating(rating: f64) -> String {
    if rating.fract() == 0.0 {
        format!("{rating:.1}")
    } else {
        format!("{rating}")
    }
}

// ---------------------------------------------------------------------------
// Column layout – where the typed fields live in the header
// ---------------------------------------------------------------------------

/// Positions of the typed columns within [`Dataset::headers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub title: usize,
    pub year: usize,
    pub genre: usize,
    pub rating: usize,
    pub poster: Option<usize>,
}

/// Header names used when a dataset is built in code rather than loaded.
#[cfg(test)]
pub const CANONICAL_HEADERS: [&str; 5] = [
    "Poster_Link",
    "Series_Title",
    "Released_Year",
    "Genre",
    "IMDB_Rating",
];

#[cfg(test)]
impl ColumnLayout {
    fn canonical() -> Self {
        ColumnLayout {
            poster: Some(0),
            title: 1,
            year: 2,
            genre: 3,
            rating: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed genre and year indices.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All movies, in CSV row order.
    pub movies: Vec<Movie>,
    /// Header row as it appeared in the file.
    pub headers: Vec<String>,
    pub layout: ColumnLayout,
    /// Sorted unique genre tokens.
    pub genres: Vec<String>,
    /// Smallest and largest release year, `None` when empty.
    pub year_bounds: Option<(i32, i32)>,
}

impl Dataset {
    /// Build a dataset with the canonical IMDb headers plus any extra columns
    /// the movies carry.
    #[cfg(test)]
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let extra: BTreeSet<String> = movies
            .iter()
            .flat_map(|m| m.extra.keys().cloned())
            .collect();
        let headers = CANONICAL_HEADERS
            .iter()
            .map(|h| h.to_string())
            .chain(extra)
            .collect();
        Self::with_columns(movies, headers, ColumnLayout::canonical())
    }

    pub fn with_columns(movies: Vec<Movie>, headers: Vec<String>, layout: ColumnLayout) -> Self {
        let genres: BTreeSet<&str> = movies
            .iter()
            .flat_map(|m| m.genres.iter().map(String::as_str))
            .collect();
        let genres = genres.into_iter().map(str::to_string).collect();

        let year_bounds = movies.iter().fold(None, |acc, m| match acc {
            None => Some((m.year, m.year)),
            Some((lo, hi)) => Some((m.year.min(lo), m.year.max(hi))),
        });

        Dataset {
            movies,
            headers,
            layout,
            genres,
            year_bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn title_header(&self) -> &str {
        &self.headers[self.layout.title]
    }

    pub fn year_header(&self) -> &str {
        &self.headers[self.layout.year]
    }

    pub fn genre_header(&self) -> &str {
        &self.headers[self.layout.genre]
    }

    pub fn rating_header(&self) -> &str {
        &self.headers[self.layout.rating]
    }

    /// Headers that are not one of the typed columns, in file order.
    pub fn extra_headers(&self) -> impl Iterator<Item = &str> {
        let layout = self.layout;
        self.headers.iter().enumerate().filter_map(move |(i, h)| {
            let typed = i == layout.title
                || i == layout.year
                || i == layout.genre
                || i == layout.rating
                || Some(i) == layout.poster;
            (!typed).then_some(h.as_str())
        })
    }

    /// The movie's cells in header order, as they would appear in a CSV row.
    pub fn row_fields(&self, movie: &Movie) -> Vec<String> {
        let layout = &self.layout;
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                if i == layout.title {
                    movie.title.clone()
                } else if i == layout.year {
                    movie.year.to_string()
                } else if i == layout.genre {
                    movie.genre_text()
                } else if i == layout.rating {
                    format_rating(movie.rating)
                } else if Some(i) == layout.poster {
                    movie.poster.clone().unwrap_or_default()
                } else {
                    movie.extra.get(header).cloned().unwrap_or_default()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_movies_indexes_genres_and_years() {
        let ds = Dataset::from_movies(vec![
            Movie::new("Inception", 2010, &["Sci-Fi", "Action"], 8.8),
            Movie::new("Titanic", 1997, &["Romance", "Drama"], 7.8),
            Movie::new("Heat", 1995, &["Crime", "Drama"], 8.3),
        ]);

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.genres, ["Action", "Crime", "Drama", "Romance", "Sci-Fi"]);
        assert_eq!(ds.year_bounds, Some((1995, 2010)));
        assert_eq!(ds.title_header(), "Series_Title");
    }

    #[test]
    fn empty_dataset_has_no_year_bounds() {
        let ds = Dataset::from_movies(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.year_bounds, None);
        assert!(ds.genres.is_empty());
    }

    #[test]
    fn row_fields_follow_header_order() {
        let mut movie = Movie::new("Se7en", 1995, &["Crime", "Mystery"], 8.6);
        movie.extra.insert("Director".into(), "David Fincher".into());
        let ds = Dataset::from_movies(vec![movie.clone()]);

        assert_eq!(
            ds.row_fields(&movie),
            ["", "Se7en", "1995", "Crime, Mystery", "8.6", "David Fincher"]
        );
        assert_eq!(ds.extra_headers().collect::<Vec<_>>(), ["Director"]);
    }

    #[test]
    fn whole_ratings_keep_a_decimal() {
        assert_eq!(format_rating(9.0), "9.0");
        assert_eq!(format_rating(8.75), "8.75");
    }
}
