use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// One row in the IMDb top-1000 layout.
#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Poster_Link")]
    poster_link: String,
    #[serde(rename = "Series_Title")]
    series_title: String,
    #[serde(rename = "Released_Year")]
    released_year: i32,
    #[serde(rename = "Genre")]
    genre: String,
    #[serde(rename = "IMDB_Rating")]
    imdb_rating: f64,
    #[serde(rename = "Overview")]
    overview: String,
    #[serde(rename = "Director")]
    director: String,
    #[serde(rename = "Meta_score")]
    meta_score: String,
}

const GENRES: &[&str] = &[
    "Action", "Adventure", "Animation", "Biography", "Comedy", "Crime", "Drama", "Family",
    "Fantasy", "History", "Horror", "Music", "Mystery", "Romance", "Sci-Fi", "Thriller", "War",
    "Western",
];

const ADJECTIVES: &[&str] = &[
    "Silent", "Crimson", "Last", "Hidden", "Electric", "Broken", "Golden", "Endless", "Lonely",
    "Savage", "Distant", "Midnight",
];

const NOUNS: &[&str] = &[
    "River", "Empire", "Promise", "Signal", "Harbor", "Machine", "Garden", "Frontier", "Witness",
    "Horizon", "Kingdom", "Echo",
];

const DIRECTORS: &[&str] = &[
    "Ava Lindqvist", "Marco Ferrante", "Kenji Mori", "Sofia Almeida", "Daniel Osei",
    "Claire Dubois", "Ivan Petrov", "Maya Rosen",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

fn make_row(rng: &mut SimpleRng, index: usize) -> Row {
    // Suffix keeps (title, year) unique even when words repeat.
    let title = format!("The {} {} {}", rng.pick(ADJECTIVES), rng.pick(NOUNS), index + 1);
    let year = 1930 + rng.below(95) as i32;

    let n_genres = 1 + rng.below(3);
    let mut genres: Vec<&str> = Vec::with_capacity(n_genres);
    while genres.len() < n_genres {
        let g = rng.pick(GENRES);
        if !genres.contains(&g) {
            genres.push(g);
        }
    }

    // Ratings cluster around 7.9 like the real top-1000 list.
    let rating = (7.6 + rng.next_f64() * 1.7).min(9.3);
    let rating = (rating * 10.0).round() / 10.0;

    let meta_score = if rng.below(5) == 0 {
        String::new()
    } else {
        (55 + rng.below(45)).to_string()
    };

    Row {
        poster_link: String::new(),
        series_title: title.clone(),
        released_year: year,
        genre: genres.join(", "),
        imdb_rating: rating,
        overview: format!("A story about {}.", title.to_lowercase()),
        director: rng.pick(DIRECTORS).to_string(),
        meta_score,
    }
}

/// Row count from the command line, 250 when omitted.
///
/// Zero is refused: the csv writer only emits the header along with the first
/// serialized row, so an empty run would produce a file without columns.
fn parse_rows(arg: Option<String>) -> Result<usize> {
    let rows: usize = match arg {
        Some(n) => n.parse().with_context(|| format!("invalid row count '{n}'"))?,
        None => 250,
    };
    anyhow::ensure!(rows > 0, "row count must be at least 1");
    Ok(rows)
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_movies.csv"));
    let rows = parse_rows(args.next())?;

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;

    for i in 0..rows {
        writer
            .serialize(make_row(&mut rng, i))
            .context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} movies to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_count_defaults_to_250() {
        assert_eq!(parse_rows(None).unwrap(), 250);
        assert_eq!(parse_rows(Some("12".into())).unwrap(), 12);
    }

    #[test]
    fn zero_or_garbage_row_count_is_refused() {
        assert!(parse_rows(Some("0".into())).is_err());
        assert!(parse_rows(Some("many".into())).is_err());
    }

    #[test]
    fn generated_rows_carry_unique_titles_and_valid_ratings() {
        let mut rng = SimpleRng::new(42);
        let rows: Vec<Row> = (0..50).map(|i| make_row(&mut rng, i)).collect();

        for row in &rows {
            assert!((0.0..=10.0).contains(&row.imdb_rating));
            assert!(!row.genre.is_empty());
        }
        let titles: std::collections::HashSet<&str> =
            rows.iter().map(|r| r.series_title.as_str()).collect();
        assert_eq!(titles.len(), rows.len());
    }
}
