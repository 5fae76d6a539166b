use super::scorecard::Scorecard;
use crate::grading::Grade;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// One indicator graded for both countries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub indicator: String,
    pub left_value: Option<f64>,
    pub left_grade: Grade,
    pub right_value: Option<f64>,
    pub right_grade: Grade,
    /// Country with the better letter; `None` on ties or missing data.
    pub advantage: Option<Side>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub left: Scorecard,
    pub right: Scorecard,
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    /// Both cards are built from the same catalog, so indicators line up.
    pub(crate) fn from_scorecards(left: Scorecard, right: Scorecard) -> Self {
        let rows = left
            .indicators
            .iter()
            .zip(&right.indicators)
            .map(|(l, r)| ComparisonRow {
                indicator: l.indicator.clone(),
                left_value: l.value,
                left_grade: l.grade,
                right_value: r.value,
                right_grade: r.grade,
                advantage: advantage(l.grade, r.grade),
            })
            .collect();

        Self { left, right, rows }
    }

    /// Overall grades are shown only when neither side is unavailable.
    pub fn overall_available(&self) -> bool {
        self.left.overall.is_available() && self.right.overall.is_available()
    }
}

fn advantage(left: Grade, right: Grade) -> Option<Side> {
    let (left, right) = (left.letter()?, right.letter()?);
    match left.ordinal().cmp(&right.ordinal()) {
        std::cmp::Ordering::Less => Some(Side::Left),
        std::cmp::Ordering::Greater => Some(Side::Right),
        std::cmp::Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::Letter;

    #[test]
    fn better_letter_takes_the_advantage() {
        assert_eq!(
            advantage(Letter::A.into(), Letter::C.into()),
            Some(Side::Left)
        );
        assert_eq!(
            advantage(Letter::D.into(), Letter::B.into()),
            Some(Side::Right)
        );
        assert_eq!(advantage(Letter::B.into(), Letter::B.into()), None);
        assert_eq!(advantage(Grade::Unavailable, Letter::A.into()), None);
    }
}
