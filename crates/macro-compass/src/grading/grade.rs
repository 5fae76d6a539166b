use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Letter grades ordered from best (`A`) to worst (`E`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
}

impl Letter {
    pub const fn ordered() -> [Self; 5] {
        [Self::A, Self::B, Self::C, Self::D, Self::E]
    }

    /// Position in the `A..=E` sequence, `A` being 0.
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
            Self::E => 4,
        }
    }

    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::A),
            1 => Some(Self::B),
            2 => Some(Self::C),
            3 => Some(Self::D),
            4 => Some(Self::E),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }

    pub const fn is_strength(self) -> bool {
        matches!(self, Self::A | Self::B)
    }

    pub const fn is_risk(self) -> bool {
        matches!(self, Self::D | Self::E)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of grading: a letter, or `Unavailable` when no data backs it.
///
/// `Unavailable` is a data state rather than an error and never contributes
/// to an aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    Graded(Letter),
    Unavailable,
}

impl Grade {
    pub const UNAVAILABLE_LABEL: &'static str = "N/A";

    pub const fn letter(self) -> Option<Letter> {
        match self {
            Self::Graded(letter) => Some(letter),
            Self::Unavailable => None,
        }
    }

    pub const fn is_available(self) -> bool {
        matches!(self, Self::Graded(_))
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Graded(letter) => letter.label(),
            Self::Unavailable => Self::UNAVAILABLE_LABEL,
        }
    }
}

impl From<Letter> for Grade {
    fn from(letter: Letter) -> Self {
        Self::Graded(letter)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a grade (expected A-E or N/A)")]
pub struct ParseGradeError(pub String);

impl FromStr for Letter {
    type Err = ParseGradeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "E" => Ok(Self::E),
            _ => Err(ParseGradeError(raw.to_string())),
        }
    }
}

impl FromStr for Grade {
    type Err = ParseGradeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(Self::UNAVAILABLE_LABEL)
            || trimmed.eq_ignore_ascii_case("unavailable")
        {
            return Ok(Self::Unavailable);
        }
        trimmed.parse::<Letter>().map(Self::Graded)
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            Some(value) => value.parse().map_err(serde::de::Error::custom),
            None => Ok(Self::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_round_trip_through_letters() {
        for letter in Letter::ordered() {
            assert_eq!(Letter::from_ordinal(letter.ordinal()), Some(letter));
        }
        assert_eq!(Letter::from_ordinal(5), None);
    }

    #[test]
    fn grade_parses_letters_and_unavailable() {
        assert_eq!("b".parse::<Grade>(), Ok(Grade::Graded(Letter::B)));
        assert_eq!("N/A".parse::<Grade>(), Ok(Grade::Unavailable));
        assert!("F".parse::<Grade>().is_err());
    }

    #[test]
    fn grade_serializes_as_label() {
        let json = serde_json::to_string(&[Grade::from(Letter::C), Grade::Unavailable])
            .expect("grades serialize");
        assert_eq!(json, r#"["C","N/A"]"#);

        let parsed: Vec<Grade> =
            serde_json::from_str(r#"["A", null, "n/a"]"#).expect("grades deserialize");
        assert_eq!(
            parsed,
            vec![Grade::from(Letter::A), Grade::Unavailable, Grade::Unavailable]
        );
    }
}
