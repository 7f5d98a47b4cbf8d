use silhouette_core::{
    Candidate, Collar, ConstraintSet, ForbiddenCombo, Length, Shoulder, Sleeve, Waist,
};
use silhouette_eval::{DoughnutChart, RunStats, StatsDisplay, render_report};
use silhouette_generate::{GenerateOptions, GenerationEngine};

#[test]
fn stats_follow_the_generation_counters() {
    let engine = GenerationEngine::new(GenerateOptions::default()).expect("engine");
    let result = engine.run(&Candidate::default(), 11);
    let stats = RunStats::from_report(&result.report);

    let counters = result.report.counters;
    assert_eq!(stats.summary.valid, counters.valid);
    assert_eq!(stats.summary.rejected, counters.rejected);
    assert_eq!(
        stats.summary.remaining,
        u64::from(result.report.max_attempts).saturating_sub(counters.attempts)
    );

    let json = serde_json::to_value(&stats).expect("stats json");
    assert_eq!(json["summary"]["valid"], counters.valid);
}

#[test]
fn forbidden_base_run_is_reported() {
    let base = Candidate {
        shoulder: Shoulder::Fluid,
        collar: Collar::VNeck,
        waist: Waist::Low,
        length: Length::Maxi,
        sleeve: Sleeve::Sleeveless,
    };
    let engine = GenerationEngine::with_constraints(
        GenerateOptions::default(),
        ConstraintSet::default(),
    )
    .expect("engine");
    let result = engine.run(&base, 4);
    let stats = RunStats::from_report(&result.report);
    let text = render_report(&result.report, &result.candidates, &stats);

    assert!(text.contains("matches a forbidden combination"));
    assert!(text.contains("(shoulder=fluid, waist=low, sleeve=none)"));
    assert!(text.contains("- ..."));

    let chart = DoughnutChart.display(&stats).expect("chart");
    assert!(chart.svg.contains(&stats.caption()));
}

#[test]
fn partial_run_chart_and_report() {
    let constraints = ConstraintSet::new(vec![
        ForbiddenCombo::new().shoulder(Shoulder::Sharp),
        ForbiddenCombo::new().shoulder(Shoulder::Volume),
        ForbiddenCombo::new().collar(Collar::Asym),
        ForbiddenCombo::new().collar(Collar::VNeck),
        ForbiddenCombo::new().waist(Waist::High),
        ForbiddenCombo::new().waist(Waist::Low),
    ]);
    let engine =
        GenerationEngine::with_constraints(GenerateOptions::default(), constraints).expect("engine");
    let result = engine.run(&Candidate::default(), 99);
    let stats = RunStats::from_report(&result.report);

    assert_eq!(stats.summary.valid, 9);
    assert_eq!(stats.summary.remaining, 0);
    let text = render_report(&result.report, &result.candidates, &stats);
    assert!(text.contains("only 9 of 10 silhouettes"));
    assert!(stats.title().starts_with("Analysis: 9/10 valid"));
}
