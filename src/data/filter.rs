use std::collections::BTreeSet;

use super::model::{Dataset, Movie};

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// User-selected predicates. All active predicates must hold (logical AND).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against the title. Blank = no constraint.
    pub search: String,
    /// A movie passes when it has at least one of these genres. Empty = no constraint.
    pub genres: BTreeSet<String>,
    /// Inclusive lower year bound.
    pub min_year: Option<i32>,
    /// Inclusive upper year bound.
    pub max_year: Option<i32>,
    /// Ratings strictly below this are hidden.
    pub min_rating: f64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            genres: BTreeSet::new(),
            min_year: None,
            max_year: None,
            min_rating: 0.0,
        }
    }
}

impl FilterCriteria {
    /// Criteria that show every movie, with the year range spanning the dataset.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        let (min_year, max_year) = match dataset.year_bounds {
            Some((lo, hi)) => (Some(lo), Some(hi)),
            None => (None, None),
        };
        Self {
            min_year,
            max_year,
            ..Self::default()
        }
    }

    /// `false` when both bounds are set and the start is after the end.
    pub fn year_range_is_valid(&self) -> bool {
        match (self.min_year, self.max_year) {
            (Some(lo), Some(hi)) => lo <= hi,
            _ => true,
        }
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        let query = self.search.trim();
        if !query.is_empty() && !movie.title.to_lowercase().contains(&query.to_lowercase()) {
            return false;
        }
        if !self.genres.is_empty() && !movie.genres.iter().any(|g| self.genres.contains(g)) {
            return false;
        }
        if self.min_year.is_some_and(|lo| movie.year < lo) {
            return false;
        }
        if self.max_year.is_some_and(|hi| movie.year > hi) {
            return false;
        }
        movie.rating >= self.min_rating
    }
}

/// Return indices of movies that pass the criteria, in dataset order.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .movies
        .iter()
        .enumerate()
        .filter(|(_, movie)| criteria.matches(movie))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_movies(vec![
            Movie::new("Inception", 2010, &["Action", "Sci-Fi"], 8.8),
            Movie::new("Titanic", 1997, &["Drama", "Romance"], 7.8),
            Movie::new("Heat", 1995, &["Crime", "Drama"], 8.3),
            Movie::new("Interstellar", 2014, &["Adventure", "Sci-Fi"], 8.6),
            Movie::new("The Room", 2003, &["Drama"], 3.6),
        ])
    }

    #[test]
    fn default_criteria_keep_everything() {
        let ds = sample();
        assert_eq!(filtered_indices(&ds, &FilterCriteria::default()), [0, 1, 2, 3, 4]);
        assert_eq!(
            filtered_indices(&ds, &FilterCriteria::for_dataset(&ds)),
            [0, 1, 2, 3, 4]
        );
    }

    #[test]
    fn min_rating_example() {
        let ds = Dataset::from_movies(vec![
            Movie::new("Inception", 2010, &["Sci-Fi"], 8.8),
            Movie::new("Titanic", 1997, &["Romance"], 7.8),
        ]);
        let criteria = FilterCriteria {
            min_rating: 8.0,
            ..FilterCriteria::default()
        };
        assert_eq!(filtered_indices(&ds, &criteria), [0]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let ds = sample();
        let criteria = FilterCriteria {
            search: "  in ".into(),
            ..FilterCriteria::default()
        };
        assert_eq!(filtered_indices(&ds, &criteria), [0, 3]);
    }

    #[test]
    fn genre_selection_matches_any_selected_genre() {
        let ds = sample();
        let criteria = FilterCriteria {
            genres: ["Crime".to_string(), "Romance".to_string()].into(),
            ..FilterCriteria::default()
        };
        assert_eq!(filtered_indices(&ds, &criteria), [1, 2]);
    }

    #[test]
    fn predicates_combine_with_and() {
        let ds = sample();
        let criteria = FilterCriteria {
            genres: ["Drama".to_string()].into(),
            min_year: Some(1996),
            max_year: Some(2005),
            min_rating: 5.0,
            ..FilterCriteria::default()
        };
        assert_eq!(filtered_indices(&ds, &criteria), [1]);
    }

    #[test]
    fn year_bounds_are_inclusive() {
        let ds = sample();
        let criteria = FilterCriteria {
            min_year: Some(1997),
            max_year: Some(2010),
            ..FilterCriteria::default()
        };
        assert_eq!(filtered_indices(&ds, &criteria), [0, 1, 4]);
    }

    #[test]
    fn inverted_year_range_matches_nothing() {
        let ds = sample();
        let criteria = FilterCriteria {
            min_year: Some(2010),
            max_year: Some(1990),
            ..FilterCriteria::default()
        };
        assert!(!criteria.year_range_is_valid());
        assert!(filtered_indices(&ds, &criteria).is_empty());
    }

    #[test]
    fn result_is_a_stable_subset() {
        let ds = sample();
        let criteria = FilterCriteria {
            search: "e".into(),
            min_rating: 8.0,
            ..FilterCriteria::default()
        };
        let first = filtered_indices(&ds, &criteria);
        let second = filtered_indices(&ds, &criteria);

        assert_eq!(first, second);
        assert!(first.iter().all(|&i| i < ds.len()));
        assert!(first.windows(2).all(|w| w[0] < w[1]));
    }
}
