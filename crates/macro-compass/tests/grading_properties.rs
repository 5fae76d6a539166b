use std::sync::Arc;

use macro_compass::catalog::{
    IndicatorCatalog, ScoreVariant, GDP_GROWTH, GOVERNMENT_DEBT, INFLATION, INTEREST_RATE,
    UNEMPLOYMENT,
};
use macro_compass::grading::{aggregate, strengths_and_risks, Grade, GradingEngine, GradingError, Letter};

fn engine(variant: ScoreVariant) -> GradingEngine {
    let catalog = IndicatorCatalog::standard(variant).expect("standard catalog validates");
    GradingEngine::new(Arc::new(catalog))
}

fn letter(engine: &GradingEngine, indicator: &str, value: f64) -> Grade {
    engine
        .classify(indicator, value)
        .expect("indicator is registered")
}

#[test]
fn growth_bands_are_walked_in_declared_order() {
    let engine = engine(ScoreVariant::GovernmentDebt);

    assert_eq!(letter(&engine, GDP_GROWTH, 6.0), Letter::A.into());
    assert_eq!(letter(&engine, GDP_GROWTH, 5.999), Letter::B.into());
    assert_eq!(letter(&engine, GDP_GROWTH, 0.0), Letter::D.into());
    assert_eq!(letter(&engine, GDP_GROWTH, -50.0), Letter::E.into());
    assert_eq!(
        letter(&engine, GDP_GROWTH, -1000.0),
        Letter::E.into(),
        "values below the last threshold fall into the catch-all"
    );
}

#[test]
fn lower_is_better_indicators_compare_with_at_most() {
    let engine = engine(ScoreVariant::GovernmentDebt);

    assert_eq!(letter(&engine, INFLATION, -1.0), Letter::E.into());
    assert_eq!(letter(&engine, INFLATION, 1.0), Letter::D.into());
    assert_eq!(letter(&engine, INFLATION, 50.0), Letter::A.into());

}

#[test]
fn only_inflation_inverts_the_comparison() {
    let engine = engine(ScoreVariant::GovernmentDebt);

    assert_eq!(letter(&engine, UNEMPLOYMENT, 2.5), Letter::A.into());
    assert_eq!(letter(&engine, UNEMPLOYMENT, 4.0), Letter::A.into());
    assert_eq!(
        letter(&engine, UNEMPLOYMENT, -0.5),
        Letter::E.into(),
        "negative values fall through to the catch-all"
    );
    assert_eq!(letter(&engine, GOVERNMENT_DEBT, 40.0), Letter::A.into());
    assert_eq!(letter(&engine, GOVERNMENT_DEBT, 95.0), Letter::A.into());
    assert_eq!(letter(&engine, GOVERNMENT_DEBT, 12.0), Letter::E.into());
}

#[test]
fn interest_rate_variant_swaps_the_fourth_indicator() {
    let engine = engine(ScoreVariant::InterestRate);
    let names: Vec<_> = engine.catalog().names().collect();

    assert_eq!(names, vec![GDP_GROWTH, INFLATION, UNEMPLOYMENT, INTEREST_RATE]);
    assert_eq!(letter(&engine, INTEREST_RATE, 3.5), Letter::D.into());
    assert_eq!(letter(&engine, INTEREST_RATE, 9.0), Letter::A.into());
    assert!(matches!(
        engine.classify(GOVERNMENT_DEBT, 40.0),
        Err(GradingError::UnknownIndicator(_))
    ));
}

#[test]
fn unknown_indicator_is_an_error_not_a_grade() {
    let engine = engine(ScoreVariant::GovernmentDebt);
    assert_eq!(
        engine.classify("Nonexistent", 5.0),
        Err(GradingError::UnknownIndicator("Nonexistent".to_string()))
    );
}

#[test]
fn missing_and_non_finite_values_are_unavailable() {
    let engine = engine(ScoreVariant::GovernmentDebt);
    assert_eq!(letter(&engine, GDP_GROWTH, f64::NAN), Grade::Unavailable);
    assert_eq!(
        engine.classify_observation(INFLATION, None),
        Ok(Grade::Unavailable)
    );
}

#[test]
fn classification_is_pure() {
    let engine = engine(ScoreVariant::GovernmentDebt);
    let first = letter(&engine, GDP_GROWTH, 3.3);
    let second = letter(&engine, GDP_GROWTH, 3.3);
    assert_eq!(first, second);
    assert_eq!(first, Letter::C.into());
}

#[test]
fn aggregation_ignores_unavailable_grades() {
    assert_eq!(aggregate([]), Grade::Unavailable);
    assert_eq!(
        aggregate([Grade::Unavailable, Grade::Unavailable]),
        Grade::Unavailable
    );
    assert_eq!(aggregate([Letter::A.into(), Letter::C.into()]), Letter::B.into());
    assert_eq!(
        aggregate([Letter::A.into(), Letter::B.into(), Letter::D.into()]),
        Letter::B.into()
    );
    assert_eq!(
        aggregate([Letter::E.into(), Grade::Unavailable]),
        Letter::E.into()
    );
}

#[test]
fn strengths_and_risks_skip_middle_grades() {
    let partition = strengths_and_risks([
        ("GDP", Grade::from(Letter::A)),
        ("Inflation", Grade::from(Letter::C)),
        ("Unemployment", Grade::from(Letter::E)),
    ]);
    assert_eq!(partition.strengths, vec!["GDP"]);
    assert_eq!(partition.risks, vec!["Unemployment"]);
}
