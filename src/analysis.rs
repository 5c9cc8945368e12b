use crate::pile::robot_take;
use crate::subtraction::Subtraction;
use crate::Evaluator;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

/// Largest pile the analysis accepts; evaluation recurses once per match.
pub const MAX_ANALYSED_PILE: u32 = 1000;

const WARM_STEP: usize = 32;

/// Result for the side about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Winning,
    Losing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionReport {
    pub matches: u32,
    pub nimber: usize,
    pub outcome: Outcome,
    /// What the robot would take here, `None` on an empty pile.
    pub robot_take: Option<u32>,
}

impl Display for PositionReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let take = self
            .robot_take
            .map_or_else(|| "-".to_string(), |t| t.to_string());
        write!(
            f,
            "{:>6} {:>6} {:>8} {:>6}",
            self.matches,
            self.nimber,
            format!("{:?}", self.outcome),
            take
        )
    }
}

/// Evaluates every pile size in `range`, spread over the rayon pool.
///
/// Returns `None` if an evaluation was cancelled.
pub fn analyse(range: RangeInclusive<u32>) -> Option<Vec<PositionReport>> {
    let reports = range
        .into_par_iter()
        .map_init(Evaluator::new, |eval, matches| report(eval, matches))
        .collect::<Option<Vec<_>>>()?;
    log::debug!("analysed {} positions", reports.len());
    Some(reports)
}

fn report(eval: &mut Evaluator<Subtraction>, matches: u32) -> Option<PositionReport> {
    // climb in steps so a cold cache never recurses through the whole pile
    for smaller in (0..matches).step_by(WARM_STEP) {
        eval.get_nimber(&Subtraction::new(smaller as usize))?;
    }
    let nimber = eval.get_nimber(&Subtraction::new(matches as usize))?;
    Some(PositionReport {
        matches,
        nimber,
        outcome: match nimber {
            0 => Outcome::Losing,
            _ => Outcome::Winning,
        },
        robot_take: (matches > 0).then(|| robot_take(matches)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_follow_pile_order() {
        let reports = analyse(0..=24).unwrap();
        assert_eq!(reports.len(), 25);
        for (i, r) in reports.iter().enumerate() {
            assert_eq!(r.matches, i as u32);
            assert_eq!(r.nimber, i % 5);
        }
    }

    #[test]
    fn multiples_of_five_are_losing() {
        let reports = analyse(0..=10).unwrap();
        let losing: Vec<u32> = reports
            .iter()
            .filter(|r| r.outcome == Outcome::Losing)
            .map(|r| r.matches)
            .collect();
        assert_eq!(losing, vec![0, 5, 10]);
        assert_eq!(reports[0].robot_take, None);
        assert_eq!(reports[7].robot_take, Some(2));
    }

    #[test]
    fn largest_pile_is_evaluated() {
        let top = MAX_ANALYSED_PILE;
        let reports = analyse(top..=top).unwrap();
        assert_eq!(reports[0].nimber, (top % 5) as usize);
    }

    #[test]
    fn report_serializes_to_json() {
        let reports = analyse(3..=3).unwrap();
        let json = serde_json::to_string(&reports[0]).unwrap();
        assert_eq!(
            json,
            r#"{"matches":3,"nimber":3,"outcome":"Winning","robot_take":3}"#
        );
    }
}
