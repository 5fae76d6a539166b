use super::grade::Grade;
use serde::Serialize;

/// Indicators graded A/B and D/E. C and unavailable grades land in neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StrengthsAndRisks {
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
}

pub fn strengths_and_risks<'a, I>(results: I) -> StrengthsAndRisks
where
    I: IntoIterator<Item = (&'a str, Grade)>,
{
    let mut partition = StrengthsAndRisks::default();
    for (indicator, grade) in results {
        match grade.letter() {
            Some(letter) if letter.is_strength() => partition.strengths.push(indicator.to_string()),
            Some(letter) if letter.is_risk() => partition.risks.push(indicator.to_string()),
            _ => {}
        }
    }
    partition
}

impl StrengthsAndRisks {
    /// One-sentence narrative for a country. Callers only build it when every
    /// indicator was graded.
    pub fn summary(&self, country: &str) -> String {
        let mut summary = format!(
            "{country} shows macroeconomic strength in: {}",
            self.strengths.join(", ")
        );
        if self.risks.is_empty() {
            summary.push('.');
        } else {
            summary.push_str(&format!(
                "; and potential risk areas in: {}.",
                self.risks.join(", ")
            ));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::Letter;

    #[test]
    fn partitions_letters_into_strengths_and_risks() {
        let results = [
            ("GDP", Grade::from(Letter::A)),
            ("Inflation", Grade::from(Letter::C)),
            ("Unemployment", Grade::from(Letter::E)),
            ("Debt", Grade::Unavailable),
        ];

        let partition = strengths_and_risks(results);
        assert_eq!(partition.strengths, ["GDP"]);
        assert_eq!(partition.risks, ["Unemployment"]);
    }

    #[test]
    fn summary_omits_risk_clause_when_there_are_none() {
        let partition = StrengthsAndRisks {
            strengths: vec!["GDP Growth (%)".to_string()],
            risks: Vec::new(),
        };
        assert_eq!(
            partition.summary("Vietnam"),
            "Vietnam shows macroeconomic strength in: GDP Growth (%)."
        );
    }

    #[test]
    fn summary_lists_risk_areas() {
        let partition = StrengthsAndRisks {
            strengths: vec!["GDP Growth (%)".to_string(), "Inflation (%)".to_string()],
            risks: vec!["Gov Debt (% of GDP)".to_string()],
        };
        assert_eq!(
            partition.summary("Malaysia"),
            "Malaysia shows macroeconomic strength in: GDP Growth (%), Inflation (%); and potential risk areas in: Gov Debt (% of GDP)."
        );
    }
}
