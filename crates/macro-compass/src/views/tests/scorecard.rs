use super::common::*;
use crate::catalog::{CatalogError, GDP_GROWTH, GOVERNMENT_DEBT, INFLATION, UNEMPLOYMENT};
use crate::grading::{Grade, Letter};
use crate::views::{SelectionPolicy, ViewError, SUMMARY_UNAVAILABLE};

#[tokio::test]
async fn latest_scorecard_grades_every_indicator() {
    let service = build_service();
    let card = service
        .scorecard("Vietnam", SelectionPolicy::Latest)
        .await
        .expect("scorecard builds");

    assert_eq!(card.country.provider_code, "VN");
    let grades: Vec<_> = card.indicators.iter().map(|s| s.grade).collect();
    assert_eq!(
        grades,
        vec![
            Grade::from(Letter::B),
            Grade::from(Letter::C),
            Grade::from(Letter::A),
            Grade::from(Letter::A),
        ]
    );

    let debt = card.score(GOVERNMENT_DEBT).expect("debt score");
    assert_eq!(debt.year, Some(2020));
    assert_eq!(debt.value, Some(40.9));

    assert_eq!(card.overall, Grade::from(Letter::B));
    assert_eq!(card.strengths, vec![GDP_GROWTH, UNEMPLOYMENT, GOVERNMENT_DEBT]);
    assert!(card.risks.is_empty());
    assert_eq!(
        card.summary_text(),
        "Vietnam shows macroeconomic strength in: GDP Growth (%), Unemployment (%), Gov Debt (% of GDP)."
    );
    assert_eq!(service.fetcher().calls(), 4);
}

#[tokio::test]
async fn fixed_year_marks_gaps_unavailable_without_failing() {
    let service = build_service();
    let card = service
        .scorecard("vn", SelectionPolicy::Year(2022))
        .await
        .expect("scorecard builds");

    assert_eq!(card.score(GDP_GROWTH).map(|s| s.grade), Some(Letter::A.into()));
    assert_eq!(card.score(INFLATION).map(|s| s.grade), Some(Letter::C.into()));
    assert_eq!(card.score(UNEMPLOYMENT).map(|s| s.grade), Some(Letter::A.into()));
    assert_eq!(
        card.score(GOVERNMENT_DEBT).map(|s| s.grade),
        Some(Grade::Unavailable)
    );

    // Unavailable is excluded: mean of A, C, A.
    assert_eq!(card.overall, Grade::from(Letter::B));
    assert!(card.summary.is_none());
    assert_eq!(card.summary_text(), SUMMARY_UNAVAILABLE);
}

#[tokio::test]
async fn country_without_data_is_entirely_unavailable() {
    let service = build_service();
    let card = service
        .scorecard("Malaysia", SelectionPolicy::Latest)
        .await
        .expect("scorecard builds");

    assert!(card.indicators.iter().all(|s| s.grade == Grade::Unavailable));
    assert_eq!(card.overall, Grade::Unavailable);
    assert!(card.strengths.is_empty() && card.risks.is_empty());
}

#[tokio::test]
async fn thailand_risks_are_reported() {
    let service = build_service();
    let card = service
        .scorecard("Thailand", SelectionPolicy::Latest)
        .await
        .expect("scorecard builds");

    assert_eq!(card.risks, vec![GDP_GROWTH, INFLATION]);
    assert_eq!(card.overall, Grade::from(Letter::C));
    assert_eq!(
        card.summary.as_deref(),
        Some("Thailand shows macroeconomic strength in: Unemployment (%), Gov Debt (% of GDP); and potential risk areas in: GDP Growth (%), Inflation (%).")
    );
}

#[tokio::test]
async fn unknown_country_is_rejected() {
    let service = build_service();
    let result = service.scorecard("Atlantis", SelectionPolicy::Latest).await;
    assert!(matches!(
        result,
        Err(ViewError::Catalog(CatalogError::UnknownCountry(name))) if name == "Atlantis"
    ));
    assert_eq!(service.fetcher().calls(), 0);
}
