//! Tests for the rating model and match processor

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::config::{ModelParams, RatingConfig};
    use crate::error::PuckedgeError;
    use crate::types::{DrawPolicy, Match};
    use chrono::NaiveDate;

    const FACTOR: f64 = 461.3357857391371;
    const K: f64 = 49.0;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, n).unwrap()
    }

    fn game(n: u32, home: &str, visitor: &str, hg: u32, vg: u32) -> Match {
        Match::new(day(n), home, visitor, hg, vg)
    }

    fn params() -> ModelParams {
        ModelParams {
            factor: FACTOR,
            k: K,
            ..ModelParams::default()
        }
    }

    fn config() -> RatingConfig {
        RatingConfig::default()
    }

    #[test]
    fn test_expected_win_sums_to_one() {
        for (a, b) in [(1000.0, 1000.0), (1200.0, 800.0), (950.0, 1837.5), (0.0, 4000.0)] {
            let (p_a, p_b) = expected_win(a, b, FACTOR);
            assert!((p_a + p_b - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_expected_win_equal_ratings() {
        let (p_a, p_b) = expected_win(1000.0, 1000.0, FACTOR);
        assert_eq!(p_a, 0.5);
        assert_eq!(p_b, 0.5);

        let (p_a, p_b) = expected_win(-250.0, -250.0, 99.0);
        assert_eq!(p_a, 0.5);
        assert_eq!(p_b, 0.5);
    }

    #[test]
    fn test_expected_win_known_value() {
        let (p_a, p_b) = expected_win(1100.0, 900.0, FACTOR);
        assert!((p_a - 0.6067147824609774).abs() < 1e-9);
        assert!((p_b - 0.3932852175390226).abs() < 1e-9);
    }

    #[test]
    fn test_expected_win_monotonic_in_first_rating() {
        let (low, _) = expected_win(990.0, 1000.0, FACTOR);
        let (mid, _) = expected_win(1000.0, 1000.0, FACTOR);
        let (high, _) = expected_win(1010.0, 1000.0, FACTOR);
        assert!(low < mid && mid < high);
    }

    #[test]
    fn test_expected_win_extreme_gap_saturates() {
        let (p_a, p_b) = expected_win(1e9, 0.0, FACTOR);
        assert!(p_a.is_finite() && p_b.is_finite());
        assert_eq!(p_a, 1.0);
        assert_eq!(p_b, 0.0);

        let (p_a, p_b) = expected_win(0.0, 1e9, FACTOR);
        assert_eq!(p_a, 0.0);
        assert_eq!(p_b, 1.0);
    }

    #[test]
    fn test_update_elo_monotonic() {
        let rating = 1000.0;
        assert!(update_elo(rating, 0.5, 1.0, K) > rating);
        assert!(update_elo(rating, 0.5, 0.0, K) < rating);
        assert_eq!(update_elo(rating, 0.5, 0.5, K), rating);
    }

    #[test]
    fn test_process_single_match_updates_both_teams() {
        let matches = vec![game(1, "A", "B", 4, 2)];
        let book = process_matches(&matches, &params(), &config()).unwrap();

        // equal starting ratings, expected 0.5 each way
        assert!((book.rating("A").unwrap() - 1024.5).abs() < 1e-12);
        assert!((book.rating("B").unwrap() - 975.5).abs() < 1e-12);
    }

    #[test]
    fn test_processing_is_not_commutative() {
        let forward = vec![game(1, "A", "B", 3, 1), game(2, "B", "A", 2, 1)];
        let reversed = vec![game(1, "B", "A", 2, 1), game(2, "A", "B", 3, 1)];

        let book_f = process_matches(&forward, &params(), &config()).unwrap();
        let book_r = process_matches(&reversed, &params(), &config()).unwrap();

        assert!((book_f.rating("A").unwrap() - 998.7001087796714).abs() < 1e-9);
        assert!((book_f.rating("B").unwrap() - 1001.2998912203286).abs() < 1e-9);

        assert_ne!(book_f.rating("A").unwrap(), book_r.rating("A").unwrap());
        assert_ne!(book_f.rating("B").unwrap(), book_r.rating("B").unwrap());
    }

    #[test]
    fn test_disjoint_pairs_are_order_independent() {
        let one = vec![
            game(1, "A", "B", 3, 0),
            game(2, "C", "D", 1, 2),
            game(3, "B", "A", 2, 4),
            game(4, "D", "C", 5, 1),
        ];
        let other = vec![
            game(2, "C", "D", 1, 2),
            game(1, "A", "B", 3, 0),
            game(4, "D", "C", 5, 1),
            game(3, "B", "A", 2, 4),
        ];

        let book_one = process_matches(&one, &params(), &config()).unwrap();
        let book_other = process_matches(&other, &params(), &config()).unwrap();

        for team in ["A", "B", "C", "D"] {
            assert_eq!(
                book_one.rating(team).unwrap(),
                book_other.rating(team).unwrap()
            );
        }
    }

    #[test]
    fn test_history_appends_one_entry_per_match() {
        let matches = vec![
            game(1, "A", "B", 2, 1),
            game(2, "A", "C", 0, 3),
            game(3, "B", "C", 2, 2),
        ];
        let book = process_matches(&matches, &params(), &config()).unwrap();

        assert_eq!(book.history("A").unwrap().len(), 2);
        assert_eq!(book.history("B").unwrap().len(), 2);
        assert_eq!(book.history("C").unwrap().len(), 2);
        // first entry is the rating right after the first match played
        assert!((book.history("A").unwrap()[0] - 1024.5).abs() < 1e-12);
        assert_eq!(
            *book.history("C").unwrap().last().unwrap(),
            book.rating("C").unwrap()
        );
    }

    #[test]
    fn test_rating_for_unknown_team_is_an_error() {
        let book = process_matches(&[game(1, "A", "B", 1, 0)], &params(), &config()).unwrap();
        assert!(book.contains("A"));
        assert_eq!(
            book.rating("ghost"),
            Err(PuckedgeError::UnknownTeam {
                team: "ghost".into()
            })
        );
    }

    #[test]
    fn test_draw_scored_as_half_leaves_equal_ratings_unchanged() {
        let book = process_matches(&[game(1, "A", "B", 2, 2)], &params(), &config()).unwrap();
        assert_eq!(book.rating("A").unwrap(), 1000.0);
        assert_eq!(book.rating("B").unwrap(), 1000.0);
        assert_eq!(book.history("A").unwrap().len(), 1);
    }

    #[test]
    fn test_draw_rejected_when_not_modeled() {
        let config = RatingConfig {
            draw_policy: DrawPolicy::Reject,
            ..RatingConfig::default()
        };
        let matches = vec![game(1, "A", "B", 3, 1), game(2, "A", "B", 2, 2)];
        let err = process_matches(&matches, &params(), &config).unwrap_err();
        assert_eq!(
            err,
            PuckedgeError::AmbiguousResult {
                home: "A".into(),
                visitor: "B".into(),
                date: day(2),
            }
        );
    }

    #[test]
    fn test_fold_over_prefix_matches_stepwise_application() {
        let matches = vec![
            game(1, "A", "B", 2, 0),
            game(2, "B", "C", 1, 4),
            game(3, "C", "A", 3, 2),
            game(4, "A", "B", 0, 1),
        ];
        let as_of_day_2 = process_matches(&matches[..2], &params(), &config()).unwrap();

        let mut stepwise = RatingBook::new(config().default_rating);
        for m in &matches[..2] {
            stepwise.apply(m, &params(), DrawPolicy::ScoreAsHalf).unwrap();
        }
        assert_eq!(as_of_day_2, stepwise);

        // point-in-time query: C has not appeared in the first match yet
        let as_of_day_1 = process_matches(&matches[..1], &params(), &config()).unwrap();
        assert!(as_of_day_1.contains("A"));
        assert!(!as_of_day_1.contains("C"));
    }

    #[test]
    fn test_evaluate_predictions_grades_favourite() {
        let mut book = RatingBook::new(1000.0);
        book.insert("A", 1100.0);
        book.insert("B", 900.0);

        let holdout = vec![
            game(10, "A", "B", 3, 1), // favourite A wins at home
            game(11, "A", "B", 0, 2), // favourite A loses at home
            game(12, "B", "A", 1, 1), // draw, skipped
        ];
        let stats = evaluate_predictions(&book, &holdout, FACTOR).unwrap();
        assert_eq!(stats.correct, 1);
        assert_eq!(stats.incorrect, 1);
        assert_eq!(stats.skipped_draws, 1);
        assert!((stats.accuracy() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_predictions_unknown_team_aborts() {
        let mut book = RatingBook::new(1000.0);
        book.insert("A", 1100.0);
        let err = evaluate_predictions(&book, &[game(10, "A", "Z", 1, 0)], FACTOR).unwrap_err();
        assert_eq!(err, PuckedgeError::UnknownTeam { team: "Z".into() });
    }
}
