//! Bet/no-bet decision rule over ratings and bookmaker odds


use crate::config::ModelParams;
use crate::error::Result;
use crate::rating::{expected_win, RatingBook};
use crate::types::{OddsQuote, Side};

/// Outcome of the decision rule for one fixture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    /// Expected return per unit stake of the chosen side
    pub expected_return: f64,
    /// Modeled win probability of the chosen side
    pub win_probability: f64,
    pub chose_home: bool,
    /// Whether the chosen side's win probability clears the win-rate floor.
    /// The floor/ceil band on the return itself is the caller's filter.
    pub bet_eligible: bool,
}

/// Compare both sides' expected returns and pick the better one
///
/// Expected return per unit stake is `p * odds - 1`: the probability-weighted
/// payout minus the unit cost. The home side is chosen only on a strictly
/// greater return.
pub fn pick_team(
    rating_home: f64,
    rating_visitor: f64,
    odds_home: f64,
    odds_visitor: f64,
    win_rate_floor: f64,
    factor: f64,
) -> Pick {
    let (p_home, p_visitor) = expected_win(rating_home, rating_visitor, factor);
    let return_home = p_home * odds_home - 1.0;
    let return_visitor = p_visitor * odds_visitor - 1.0;

    let chose_home = return_home > return_visitor;
    let (expected_return, win_probability) = if chose_home {
        (return_home, p_home)
    } else {
        (return_visitor, p_visitor)
    };

    Pick {
        expected_return,
        win_probability,
        chose_home,
        bet_eligible: win_probability > win_rate_floor,
    }
}

/// Betting advice for one upcoming fixture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation {
    /// `None` when no bet clears every filter
    pub side: Option<Side>,
    pub expected_return: f64,
    pub win_probability: f64,
}

/// Point-in-time advice for a fixture against a ratings snapshot
///
/// Applies the full acceptance rule (win-rate floor plus the floor/ceil band
/// on the return) since no simulator sits above this call. Fails with
/// `UnknownTeam` rather than silently defaulting a missing rating.
pub fn recommend(
    book: &RatingBook,
    quote: &OddsQuote,
    params: &ModelParams,
) -> Result<Recommendation> {
    let rating_home = book.rating(&quote.home)?;
    let rating_visitor = book.rating(&quote.visitor)?;

    let pick = pick_team(
        rating_home,
        rating_visitor,
        quote.home_odds,
        quote.visitor_odds,
        params.win_rate_floor,
        params.factor,
    );

    let in_band = pick.expected_return > params.floor && pick.expected_return < params.ceil;
    let side = (pick.bet_eligible && in_band).then(|| {
        if pick.chose_home {
            Side::Home
        } else {
            Side::Visitor
        }
    });

    Ok(Recommendation {
        side,
        expected_return: pick.expected_return,
        win_probability: pick.win_probability,
    })
}
