//! Property-based tests for mhdash using proptest
//!
//! Header normalization and the KPI aggregation are exercised with
//! generated inputs; the CLI is fuzzed with random selections against the
//! bundled demo data.

use assert_cmd::prelude::*;
use mhdash::analysis::Selection;
use mhdash::analysis::metrics::rate_kpis;
use mhdash::data::DisorderRecord;
use mhdash::data::normalize::{is_normalized, normalize_column};
use proptest::prelude::*;
use std::process::Command;

const NAME: &str = "mhdash";

/// Header-like strings with mixed case, padding and separators
fn header_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        r"[A-Za-z]{1,10}( [A-Za-z0-9]{1,8}){0,3}",
        r" {0,3}[A-Za-z]{1,6}[ /-]{1,3}[a-z0-9]{1,6} {0,3}",
        Just("Nb of users per 100000".to_string()),
        Just("\u{feff}Country".to_string()),
    ]
}

fn disorder_row(sex: &str, prevalence: f64) -> DisorderRecord {
    DisorderRecord {
        country: "Lebanon".to_string(),
        cause: "Anxiety disorders".to_string(),
        sex: sex.to_string(),
        age: "All ages".to_string(),
        year: 2021,
        prevalence_rate: prevalence,
        incidence_rate: prevalence / 10.0,
        ylds_rate: prevalence / 8.0,
    }
}

proptest! {
    #[test]
    fn test_normalized_headers_are_canonical(header in header_strategy()) {
        let normalized = normalize_column(&header);
        prop_assert!(is_normalized(&normalized), "{normalized:?} from {header:?}");
    }

    #[test]
    fn test_normalize_is_idempotent(header in header_strategy()) {
        let once = normalize_column(&header);
        prop_assert_eq!(normalize_column(&once), once);
    }

    #[test]
    fn test_mean_lies_between_extremes(
        values in prop::collection::vec(0.0f64..100_000.0, 2..20)
    ) {
        let sexes: Vec<String> = (0..values.len()).map(|i| format!("group-{i}")).collect();
        let rows: Vec<DisorderRecord> = sexes
            .iter()
            .zip(&values)
            .map(|(sex, &v)| disorder_row(sex, v))
            .collect();
        let selection = Selection {
            sexes,
            ..Default::default()
        };

        let kpis = rate_kpis(&rows, "Lebanon", 2021, &selection);
        prop_assert_eq!(kpis.matched_rows, values.len());

        let prevalence = kpis.prevalence.unwrap_or(f64::NAN);
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(prevalence >= min - 1e-6 && prevalence <= max + 1e-6);
    }

    #[test]
    fn test_single_row_is_exact(value in 0.0f64..100_000.0) {
        let rows = vec![disorder_row("Female", value)];
        let selection = Selection {
            sexes: vec!["Female".to_string()],
            ..Default::default()
        };

        let kpis = rate_kpis(&rows, "Lebanon", 2021, &selection);
        prop_assert_eq!(kpis.prevalence, Some(value));
        prop_assert_eq!(kpis.ylds, Some(value / 8.0));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_cli_handles_random_selection(
        disorder in r"[A-Za-z ]{1,20}",
        from in 1990i32..2030,
        span in 0i32..10,
    ) {
        let mut cmd = Command::cargo_bin(NAME).unwrap();
        cmd.arg("--no-config")
            .arg("--data-dir")
            .arg(format!("{}/demos/data", env!("CARGO_MANIFEST_DIR")))
            .arg("--format")
            .arg("minimal")
            .arg("--disorder")
            .arg(&disorder)
            .arg("--year-from")
            .arg(from.to_string())
            .arg("--year-to")
            .arg((from + span).to_string());

        // Unknown values match no rows but never fail the render
        cmd.assert().success();
    }
}
