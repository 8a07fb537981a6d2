use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::model::{Dataset, Movie};

/// How many movies the top-N view shows.
pub const TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Aggregates over the filtered view
//
// Every function takes the dataset plus the filtered indices, so the
// results always respect the active filters.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearPoint {
    pub year: i32,
    pub mean_rating: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreAverage {
    pub genre: String,
    pub mean_rating: f64,
    pub count: usize,
}

/// Dataset overview shown on the home page and in exports.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub total: usize,
    pub mean_rating: Option<f64>,
    pub year_range: Option<(i32, i32)>,
    pub top_genre: Option<String>,
}

impl Summary {
    /// Labelled display values, `-` where the view is empty.
    pub fn fields(&self) -> [(&'static str, String); 4] {
        let avg = self
            .mean_rating
            .map(|r| format!("{r:.2}"))
            .unwrap_or_else(|| "-".into());
        let years = self
            .year_range
            .map(|(lo, hi)| format!("{lo} - {hi}"))
            .unwrap_or_else(|| "-".into());
        let genre = self.top_genre.clone().unwrap_or_else(|| "-".into());
        [
            ("Total Movies", self.total.to_string()),
            ("Average Rating", avg),
            ("Year Range", years),
            ("Top Genre", genre),
        ]
    }
}

fn movies<'a>(dataset: &'a Dataset, view: &'a [usize]) -> impl Iterator<Item = &'a Movie> + 'a {
    view.iter().map(move |&i| &dataset.movies[i])
}

/// Mean rating per release year, ascending by year.
pub fn year_trend(dataset: &Dataset, view: &[usize]) -> Vec<YearPoint> {
    let mut groups: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for movie in movies(dataset, view) {
        let entry = groups.entry(movie.year).or_default();
        entry.0 += movie.rating;
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(year, (sum, count))| YearPoint {
            year,
            mean_rating: sum / count as f64,
            count,
        })
        .collect()
}

/// Mean rating per genre token, highest first. Ties are broken by genre name.
///
/// A movie with several genres contributes to each of them.
pub fn genre_averages(dataset: &Dataset, view: &[usize]) -> Vec<GenreAverage> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for movie in movies(dataset, view) {
        for genre in &movie.genres {
            let entry = groups.entry(genre.as_str()).or_default();
            entry.0 += movie.rating;
            entry.1 += 1;
        }
    }
    let mut out: Vec<GenreAverage> = groups
        .into_iter()
        .map(|(genre, (sum, count))| GenreAverage {
            genre: genre.to_string(),
            mean_rating: sum / count as f64,
            count,
        })
        .collect();
    out.sort_by(|a, b| {
        b.mean_rating
            .total_cmp(&a.mean_rating)
            .then_with(|| a.genre.cmp(&b.genre))
    });
    out
}

fn rank_order(a: &Movie, b: &Movie) -> Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.year.cmp(&b.year))
}

/// Indices of the `n` highest-rated movies: rating descending, then title
/// ascending, then year ascending. Remaining ties keep dataset order.
pub fn top_rated(dataset: &Dataset, view: &[usize], n: usize) -> Vec<usize> {
    let mut ranked = view.to_vec();
    ranked.sort_by(|&a, &b| rank_order(&dataset.movies[a], &dataset.movies[b]));
    ranked.truncate(n);
    ranked
}

pub fn summary(dataset: &Dataset, view: &[usize]) -> Summary {
    if view.is_empty() {
        return Summary::default();
    }

    let mut sum = 0.0;
    let mut year_range: Option<(i32, i32)> = None;
    let mut genre_counts: BTreeMap<&str, usize> = BTreeMap::new();

    for movie in movies(dataset, view) {
        sum += movie.rating;
        year_range = Some(match year_range {
            None => (movie.year, movie.year),
            Some((lo, hi)) => (lo.min(movie.year), hi.max(movie.year)),
        });
        for genre in &movie.genres {
            *genre_counts.entry(genre.as_str()).or_default() += 1;
        }
    }

    // BTreeMap iterates alphabetically, so on equal counts the first name wins.
    let top_genre = genre_counts
        .into_iter()
        .fold(None::<(&str, usize)>, |best, (genre, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((genre, count)),
        })
        .map(|(genre, _)| genre.to_string());

    Summary {
        total: view.len(),
        mean_rating: Some(sum / view.len() as f64),
        year_range,
        top_genre,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_movies(vec![
            Movie::new("Inception", 2010, &["Action", "Sci-Fi"], 8.8),
            Movie::new("Titanic", 1997, &["Drama", "Romance"], 7.8),
            Movie::new("Heat", 1995, &["Crime", "Drama"], 8.3),
            Movie::new("Toy Story", 1995, &["Animation", "Comedy"], 8.3),
            Movie::new("Avatar", 2009, &["Adventure", "Fantasy"], 7.8),
            Movie::new("Casino", 1995, &["Crime", "Drama"], 8.2),
        ])
    }

    fn all(ds: &Dataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn year_trend_is_ascending_mean_per_year() {
        let ds = sample();
        let trend = year_trend(&ds, &all(&ds));

        let years: Vec<i32> = trend.iter().map(|p| p.year).collect();
        assert_eq!(years, [1995, 1997, 2009, 2010]);

        let y1995 = trend[0];
        assert_eq!(y1995.count, 3);
        assert!((y1995.mean_rating - (8.3 + 8.3 + 8.2) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn year_trend_respects_the_view() {
        let ds = sample();
        let trend = year_trend(&ds, &[0, 1]);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].year, 1997);
    }

    #[test]
    fn genre_averages_sorted_descending_with_name_tiebreak() {
        let ds = sample();
        let genres = genre_averages(&ds, &all(&ds));

        let names: Vec<&str> = genres.iter().map(|g| g.genre.as_str()).collect();
        // Equal means fall back to alphabetical order.
        assert_eq!(
            names,
            [
                "Action", "Sci-Fi", "Animation", "Comedy", "Crime", "Drama", "Adventure",
                "Fantasy", "Romance"
            ]
        );
        let drama = genres.iter().find(|g| g.genre == "Drama").unwrap();
        assert_eq!(drama.count, 3);
    }

    #[test]
    fn top_rated_breaks_ties_by_title() {
        let ds = sample();
        let top = top_rated(&ds, &all(&ds), TOP_N);

        let titles: Vec<&str> = top.iter().map(|&i| ds.movies[i].title.as_str()).collect();
        assert_eq!(
            titles,
            ["Inception", "Heat", "Toy Story", "Casino", "Avatar", "Titanic"]
        );
    }

    #[test]
    fn top_rated_never_exceeds_n() {
        let movies = (0..25)
            .map(|i| Movie::new(format!("Movie {i:02}"), 2000 + i, &["Drama"], (i % 10) as f64))
            .collect();
        let ds = Dataset::from_movies(movies);
        let top = top_rated(&ds, &all(&ds), TOP_N);

        assert_eq!(top.len(), TOP_N);
        for pair in top.windows(2) {
            let (a, b) = (&ds.movies[pair[0]], &ds.movies[pair[1]]);
            assert!(a.rating > b.rating || (a.rating == b.rating && a.title < b.title));
        }
        assert!(top_rated(&ds, &[3, 4], TOP_N).len() == 2);
        assert!(top_rated(&ds, &[], TOP_N).is_empty());
    }

    #[test]
    fn top_rated_example() {
        let ds = Dataset::from_movies(vec![
            Movie::new("Inception", 2010, &["Sci-Fi"], 8.8),
            Movie::new("Titanic", 1997, &["Romance"], 7.8),
        ]);
        assert_eq!(top_rated(&ds, &[0], TOP_N), [0]);
    }

    #[test]
    fn summary_of_view() {
        let ds = sample();
        let s = summary(&ds, &all(&ds));

        assert_eq!(s.total, 6);
        assert_eq!(s.year_range, Some((1995, 2010)));
        assert_eq!(s.top_genre.as_deref(), Some("Drama"));
        assert!((s.mean_rating.unwrap() - 49.2 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn summary_fields_are_display_ready() {
        let ds = sample();
        let fields = summary(&ds, &all(&ds)).fields();
        assert_eq!(fields[0], ("Total Movies", "6".to_string()));
        assert_eq!(fields[1], ("Average Rating", "8.20".to_string()));
        assert_eq!(fields[2], ("Year Range", "1995 - 2010".to_string()));
        assert_eq!(fields[3], ("Top Genre", "Drama".to_string()));

        let empty = Summary::default().fields();
        assert_eq!(empty[1].1, "-");
        assert_eq!(empty[3].1, "-");
    }

    #[test]
    fn summary_genre_tie_goes_to_first_name() {
        let ds = sample();
        // Action x1, Sci-Fi x1, Drama x1, Romance x1
        let s = summary(&ds, &[0, 1]);
        assert_eq!(s.top_genre.as_deref(), Some("Action"));
    }

    #[test]
    fn empty_view_has_empty_aggregates() {
        let ds = sample();
        assert!(year_trend(&ds, &[]).is_empty());
        assert!(genre_averages(&ds, &[]).is_empty());
        assert_eq!(summary(&ds, &[]), Summary::default());
    }
}
