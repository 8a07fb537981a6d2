use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use super::model::{ColumnLayout, Dataset, Movie};
use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a movie dataset from a CSV file.
///
/// Expected columns (header match ignores case):
/// * `Series_Title` / `title`
/// * `Released_Year` / `year`
/// * `Genre` / `genre` / `genres` – comma separated tokens inside one cell
/// * `IMDB_Rating` / `rating`
/// * `Poster_Link` / `poster` – optional
///
/// Any other column is kept verbatim as an extra field.
pub fn load_csv(path: &Path) -> Result<Dataset, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_csv_reader(file)
}

/// Same as [`load_csv`] but reads from any byte source.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let layout = resolve_columns(&headers)?;

    let mut movies = Vec::new();
    let mut seen: HashSet<(String, i32)> = HashSet::new();

    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        // 1-based data row, header excluded
        let row = i + 1;
        let movie = parse_movie(&record, &headers, &layout, row)?;

        if !seen.insert((movie.title.clone(), movie.year)) {
            return Err(DatasetError::DuplicateMovie {
                row,
                title: movie.title,
                year: movie.year,
            });
        }
        movies.push(movie);
    }

    Ok(Dataset::with_columns(movies, headers, layout))
}

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

const TITLE_ALIASES: &[&str] = &["series_title", "title"];
const YEAR_ALIASES: &[&str] = &["released_year", "year"];
const GENRE_ALIASES: &[&str] = &["genre", "genres"];
const RATING_ALIASES: &[&str] = &["imdb_rating", "rating"];
const POSTER_ALIASES: &[&str] = &["poster_link", "poster"];

fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(alias))
    })
}

fn resolve_columns(headers: &[String]) -> Result<ColumnLayout, DatasetError> {
    // Same case folding as `find_column`, so `Title` and `title` collide.
    let mut seen = HashSet::new();
    for h in headers {
        if !seen.insert(h.to_ascii_lowercase()) {
            return Err(DatasetError::DuplicateColumn(h.clone()));
        }
    }

    let title = find_column(headers, TITLE_ALIASES);
    let year = find_column(headers, YEAR_ALIASES);
    let genre = find_column(headers, GENRE_ALIASES);
    let rating = find_column(headers, RATING_ALIASES);

    match (title, year, genre, rating) {
        (Some(title), Some(year), Some(genre), Some(rating)) => Ok(ColumnLayout {
            title,
            year,
            genre,
            rating,
            poster: find_column(headers, POSTER_ALIASES),
        }),
        _ => {
            let missing = [
                (title, "Series_Title"),
                (year, "Released_Year"),
                (genre, "Genre"),
                (rating, "IMDB_Rating"),
            ]
            .into_iter()
            .filter(|(found, _)| found.is_none())
            .map(|(_, name)| name.to_string())
            .collect();
            Err(DatasetError::MissingColumns(missing))
        }
    }
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn parse_movie(
    record: &StringRecord,
    headers: &[String],
    layout: &ColumnLayout,
    row: usize,
) -> Result<Movie, DatasetError> {
    let field = |idx: usize| record.get(idx).unwrap_or("").trim();
    let invalid = |idx: usize, reason: &'static str| DatasetError::InvalidField {
        row,
        column: headers[idx].clone(),
        value: field(idx).to_string(),
        reason,
    };

    let title = field(layout.title);
    if title.is_empty() {
        return Err(invalid(layout.title, "title is empty"));
    }

    let year: i32 = field(layout.year)
        .parse()
        .map_err(|_| invalid(layout.year, "year is not an integer"))?;

    let rating: f64 = field(layout.rating)
        .parse()
        .map_err(|_| invalid(layout.rating, "rating is not a number"))?;
    if !rating.is_finite() || !(0.0..=10.0).contains(&rating) {
        return Err(invalid(layout.rating, "rating must be between 0 and 10"));
    }

    let poster = layout
        .poster
        .map(field)
        .filter(|p| !p.is_empty())
        .map(str::to_string);

    let extra: BTreeMap<String, String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| {
            ![layout.title, layout.year, layout.genre, layout.rating].contains(i)
                && Some(*i) != layout.poster
        })
        .map(|(i, h)| (h.clone(), record.get(i).unwrap_or("").to_string()))
        .collect();

    Ok(Movie {
        title: title.to_string(),
        year,
        genres: split_genres(field(layout.genre)),
        rating,
        poster,
        extra,
    })
}

/// Split `"Crime, Drama,  Drama"` into `["Crime", "Drama"]`.
pub fn split_genres(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !out.iter().any(|g| g == token) {
            out.push(token.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const IMDB_SAMPLE: &str = "\
Poster_Link,Series_Title,Released_Year,Genre,IMDB_Rating,Director
https://example.com/a.jpg,Inception,2010,\"Action, Adventure, Sci-Fi\",8.8,Christopher Nolan
,Titanic,1997,\"Drama, Romance\",7.8,James Cameron
https://example.com/c.jpg,Heat,1995,\"Action, Crime, Drama\",8.3,Michael Mann
";

    #[test]
    fn loads_every_row_with_typed_fields() {
        let ds = load_csv_reader(IMDB_SAMPLE.as_bytes()).unwrap();

        assert_eq!(ds.len(), 3);
        let inception = &ds.movies[0];
        assert_eq!(inception.title, "Inception");
        assert_eq!(inception.year, 2010);
        assert_eq!(inception.genres, ["Action", "Adventure", "Sci-Fi"]);
        assert_eq!(inception.rating, 8.8);
        assert_eq!(inception.poster.as_deref(), Some("https://example.com/a.jpg"));
        assert_eq!(inception.extra["Director"], "Christopher Nolan");

        assert_eq!(ds.movies[1].poster, None);
        assert_eq!(ds.year_bounds, Some((1995, 2010)));
        assert_eq!(ds.extra_headers().collect::<Vec<_>>(), ["Director"]);
    }

    #[test]
    fn accepts_short_lowercase_headers() {
        let csv = "title,year,genre,rating\nInception,2010,Sci-Fi,8.8\nTitanic,1997,Romance,7.8\n";
        let ds = load_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.title_header(), "title");
        assert_eq!(ds.layout.poster, None);
        assert_eq!(ds.movies[1].genres, ["Romance"]);
    }

    #[test]
    fn header_only_file_is_an_empty_dataset() {
        let ds = load_csv_reader("title,year,genre,rating\n".as_bytes()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let csv = "Series_Title,Released_Year,Genre\nInception,2010,Sci-Fi\n";
        match load_csv_reader(csv.as_bytes()) {
            Err(DatasetError::MissingColumns(cols)) => assert_eq!(cols, ["IMDB_Rating"]),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_reports_all_required_columns() {
        match load_csv_reader("".as_bytes()) {
            Err(DatasetError::MissingColumns(cols)) => assert_eq!(cols.len(), 4),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_rating_is_rejected() {
        let csv = "title,year,genre,rating\nInception,2010,Sci-Fi,great\n";
        match load_csv_reader(csv.as_bytes()) {
            Err(DatasetError::InvalidField { row, column, value, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "rating");
                assert_eq!(value, "great");
            }
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let csv = "title,year,genre,rating\nInception,2010,Sci-Fi,11.5\n";
        assert!(matches!(
            load_csv_reader(csv.as_bytes()),
            Err(DatasetError::InvalidField { .. })
        ));
    }

    #[test]
    fn non_integer_year_is_rejected() {
        let csv = "title,year,genre,rating\nApollo 13,PG,Drama,7.6\n";
        match load_csv_reader(csv.as_bytes()) {
            Err(DatasetError::InvalidField { column, .. }) => assert_eq!(column, "year"),
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_title_and_year_is_rejected() {
        let csv = "title,year,genre,rating\nHeat,1995,Crime,8.3\nHeat,1986,Action,5.9\nHeat,1995,Crime,8.2\n";
        match load_csv_reader(csv.as_bytes()) {
            Err(DatasetError::DuplicateMovie { row, title, year }) => {
                assert_eq!((row, title.as_str(), year), (3, "Heat", 1995));
            }
            other => panic!("expected DuplicateMovie, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_header_is_rejected() {
        let csv = "title,year,genre,rating,title\nHeat,1995,Crime,8.3,Heat\n";
        assert!(matches!(
            load_csv_reader(csv.as_bytes()),
            Err(DatasetError::DuplicateColumn(c)) if c == "title"
        ));
    }

    #[test]
    fn headers_differing_only_in_case_are_duplicates() {
        let csv = "Title,title,Released_Year,Genre,IMDB_Rating\nHeat,Heat,1995,Crime,8.3\n";
        assert!(matches!(
            load_csv_reader(csv.as_bytes()),
            Err(DatasetError::DuplicateColumn(c)) if c == "title"
        ));
    }

    #[test]
    fn ragged_row_is_a_csv_error() {
        let csv = "title,year,genre,rating\nHeat,1995,Crime\n";
        assert!(matches!(
            load_csv_reader(csv.as_bytes()),
            Err(DatasetError::Csv(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(IMDB_SAMPLE.as_bytes()).unwrap();
        let ds = load_csv(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn genre_tokens_are_trimmed_and_deduplicated() {
        assert_eq!(split_genres(" Crime,Drama ,, Drama"), ["Crime", "Drama"]);
        assert!(split_genres("").is_empty());
    }
}
