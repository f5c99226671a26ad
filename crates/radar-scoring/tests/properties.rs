//! Range, monotonicity and purity properties of the component formulas.

use radar_scoring::components::{
    DissatisfactionInputs, LongevityInputs, MisalignmentInputs, OpportunityInputs,
    SaturationInputs,
};
use radar_scoring::confidence::ConfidenceInputs;
use radar_scoring::{
    calculate_confidence_score, calculate_dissatisfaction_score, calculate_longevity_score,
    calculate_misalignment_score, calculate_opportunity_score, calculate_saturation_score,
};

const RATIOS: [f64; 6] = [-0.5, 0.0, 0.25, 0.5, 1.0, 1.5];
const COUNTS: [u32; 5] = [0, 1, 10, 250, 100_000];
const AMOUNTS: [f64; 6] = [-10.0, 0.0, 1.0, 30.0, 500.0, 1e9];

fn in_score_range(v: f64) -> bool {
    (0.0..=100.0).contains(&v)
}

#[test]
fn saturation_stays_in_range() {
    for a in COUNTS {
        for c in COUNTS {
            for r in RATIOS {
                let s = calculate_saturation_score(&SaturationInputs {
                    unique_advertisers: a,
                    total_creatives: c,
                    repetition_index: r,
                });
                assert!(in_score_range(s), "saturation({a}, {c}, {r}) = {s}");
            }
        }
    }
}

#[test]
fn saturation_strictly_increases_per_input() {
    let at = |a: u32, c: u32, r: f64| {
        calculate_saturation_score(&SaturationInputs {
            unique_advertisers: a,
            total_creatives: c,
            repetition_index: r,
        })
    };
    for w in [0_u32, 1, 3, 8].windows(2) {
        assert!(at(w[1], 2, 0.1) > at(w[0], 2, 0.1), "advertisers {w:?}");
        assert!(at(1, w[1], 0.1) > at(1, w[0], 0.1), "creatives {w:?}");
    }
    for w in [0.0, 0.3, 0.6, 1.0].windows(2) {
        assert!(at(1, 2, w[1]) > at(1, 2, w[0]), "repetition {w:?}");
    }
}

#[test]
fn longevity_stays_in_range() {
    for days in AMOUNTS {
        let s = calculate_longevity_score(&LongevityInputs { days_running: days });
        assert!(in_score_range(s), "longevity({days}) = {s}");
    }
}

#[test]
fn dissatisfaction_stays_in_range_and_rises() {
    for f in AMOUNTS {
        for i in RATIOS {
            let s = calculate_dissatisfaction_score(&DissatisfactionInputs {
                frequency: f,
                intensity: i,
                sentiment_neg_ratio: i,
                weighted_score: f,
            });
            assert!(in_score_range(s), "dissatisfaction({f}, {i}) = {s}");
        }
    }

    let at = |i: f64, s: f64| {
        calculate_dissatisfaction_score(&DissatisfactionInputs {
            frequency: 2.0,
            intensity: i,
            sentiment_neg_ratio: s,
            weighted_score: 5.0,
        })
    };
    for w in [0.0, 0.3, 0.6, 1.0].windows(2) {
        assert!(at(w[1], 0.2) > at(w[0], 0.2), "intensity {w:?}");
        assert!(at(0.2, w[1]) > at(0.2, w[0]), "sentiment {w:?}");
    }
}

#[test]
fn misalignment_stays_in_range_and_falls_with_coverage() {
    for p in RATIOS {
        for m in RATIOS {
            for t in RATIOS {
                let s = calculate_misalignment_score(&MisalignmentInputs {
                    promise_coverage: p,
                    missing_feature_rate: m,
                    trust_gap: t,
                });
                assert!(in_score_range(s), "misalignment({p}, {m}, {t}) = {s}");
            }
        }
    }

    let at = |p: f64| {
        calculate_misalignment_score(&MisalignmentInputs {
            promise_coverage: p,
            missing_feature_rate: 0.5,
            trust_gap: 0.5,
        })
    };
    for w in [0.0, 0.25, 0.5, 0.75, 1.0].windows(2) {
        assert!(at(w[1]) < at(w[0]), "coverage {w:?}");
    }
}

#[test]
fn opportunity_stays_in_range() {
    let components = [0.0, 25.0, 50.0, 100.0];
    for l in components {
        for d in components {
            for m in components {
                for s in components {
                    let o = calculate_opportunity_score(&OpportunityInputs {
                        longevity: l,
                        dissatisfaction: d,
                        misalignment: m,
                        saturation: s,
                    });
                    assert!(in_score_range(o), "opportunity({l}, {d}, {m}, {s}) = {o}");
                }
            }
        }
    }
}

#[test]
fn confidence_stays_in_unit_range() {
    for ds in RATIOS {
        for csa in RATIOS {
            for rec in RATIOS {
                let c = calculate_confidence_score(&ConfidenceInputs {
                    data_sufficiency: ds,
                    cross_source_alignment: csa,
                    recency: rec,
                });
                assert!((0.0..=1.0).contains(&c), "confidence({ds}, {csa}, {rec}) = {c}");
            }
        }
    }
}

#[test]
fn formulas_are_idempotent() {
    let sat = SaturationInputs {
        unique_advertisers: 12,
        total_creatives: 40,
        repetition_index: 0.35,
    };
    let dis = DissatisfactionInputs {
        frequency: 14.0,
        intensity: 0.55,
        sentiment_neg_ratio: 0.6,
        weighted_score: 321.0,
    };
    assert_eq!(
        calculate_saturation_score(&sat).to_bits(),
        calculate_saturation_score(&sat).to_bits()
    );
    assert_eq!(
        calculate_dissatisfaction_score(&dis).to_bits(),
        calculate_dissatisfaction_score(&dis).to_bits()
    );
}
