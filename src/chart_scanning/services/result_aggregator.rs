use crate::chart_scanning::domain::{
    ImageFailure, ImageRef, ReportRow, ScanOutcome, ScanReport, SeverityLevel,
};
use std::collections::{BTreeMap, HashMap, HashSet};

/// ResultAggregator - Turns per-image scan outcomes into the final report
///
/// - Failed outcomes contribute no rows; they are listed in `failures`.
/// - Findings below the minimum severity are discarded.
/// - Findings whose vulnerability id is on the ignore list are discarded.
/// - Duplicate `(image, component, vulnerability)` tuples collapse into the
///   first occurrence, carrying the highest severity seen for the tuple.
/// - Rows are ordered by image (asc), severity (desc), vulnerability (asc),
///   then component (asc).
#[derive(Debug, Default, Clone)]
pub struct ResultAggregator {
    ignored_vulnerabilities: HashSet<String>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignored_vulnerabilities<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            ignored_vulnerabilities: ids.into_iter().map(|id| id.trim().to_string()).collect(),
        }
    }

    pub fn aggregate(
        &self,
        outcomes: BTreeMap<ImageRef, ScanOutcome>,
        min_severity: SeverityLevel,
    ) -> ScanReport {
        let mut report = ScanReport::default();
        let mut seen: HashMap<(ImageRef, String, String), usize> = HashMap::new();

        for (image, outcome) in outcomes {
            let findings = match outcome {
                ScanOutcome::Failed(reason) => {
                    report.failures.push(ImageFailure { image, reason });
                    continue;
                }
                ScanOutcome::Findings(findings) => findings,
            };

            for finding in findings {
                if finding.severity < min_severity {
                    continue;
                }
                if self.ignored_vulnerabilities.contains(&finding.vulnerability_id) {
                    report.ignored_count += 1;
                    continue;
                }

                let key = (
                    finding.image.clone(),
                    finding.component.clone(),
                    finding.vulnerability_id.clone(),
                );
                match seen.get(&key) {
                    Some(&index) => {
                        let existing = &mut report.rows[index];
                        if finding.severity > existing.severity {
                            existing.severity = finding.severity;
                        }
                    }
                    None => {
                        seen.insert(key, report.rows.len());
                        report.rows.push(ReportRow::from(finding));
                    }
                }
            }
        }

        report.rows.sort_by(|a, b| {
            a.image
                .cmp(&b.image)
                .then_with(|| b.severity.cmp(&a.severity))
                .then_with(|| a.vulnerability.cmp(&b.vulnerability))
                .then_with(|| a.component.cmp(&b.component))
        });

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart_scanning::domain::{Finding, RawFinding};
    use crate::shared::error::ScanFailure;
    use std::time::Duration;

    fn image(name: &str) -> ImageRef {
        ImageRef::new(name).unwrap()
    }

    fn finding(image_name: &str, component: &str, id: &str, severity: &str) -> Finding {
        Finding::from_raw(image(image_name), RawFinding::new(component, id, severity))
    }

    fn findings(image_name: &str, items: &[(&str, &str, &str)]) -> (ImageRef, ScanOutcome) {
        (
            image(image_name),
            ScanOutcome::Findings(
                items
                    .iter()
                    .map(|(c, id, s)| finding(image_name, c, id, s))
                    .collect(),
            ),
        )
    }

    fn is_sorted(rows: &[ReportRow]) -> bool {
        rows.windows(2).all(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            a.image < b.image
                || (a.image == b.image && a.severity > b.severity)
                || (a.image == b.image
                    && a.severity == b.severity
                    && a.vulnerability <= b.vulnerability)
        })
    }

    #[test]
    fn test_aggregate_filters_below_threshold() {
        let outcomes = BTreeMap::from([findings(
            "app:1.0",
            &[("lib-a", "CVE-1", "HIGH"), ("lib-b", "CVE-2", "LOW")],
        )]);

        let report = ResultAggregator::new().aggregate(outcomes, SeverityLevel::Medium);

        assert_eq!(report.rows.len(), 1);
        let row = &report.rows[0];
        assert_eq!(row.image.as_str(), "app:1.0");
        assert_eq!(row.component, "lib-a");
        assert_eq!(row.vulnerability, "CVE-1");
        assert_eq!(row.severity, SeverityLevel::High);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_aggregate_no_row_below_any_threshold() {
        let outcomes = BTreeMap::from([findings(
            "app:1.0",
            &[
                ("a", "CVE-1", "UNKNOWN"),
                ("b", "CVE-2", "LOW"),
                ("c", "CVE-3", "MEDIUM"),
                ("d", "CVE-4", "HIGH"),
                ("e", "CVE-5", "CRITICAL"),
            ],
        )]);

        for (threshold, expected) in [
            (SeverityLevel::Unknown, 5),
            (SeverityLevel::Low, 4),
            (SeverityLevel::Medium, 3),
            (SeverityLevel::High, 2),
            (SeverityLevel::Critical, 1),
        ] {
            let report = ResultAggregator::new().aggregate(outcomes.clone(), threshold);
            assert_eq!(report.rows.len(), expected);
            assert!(report.rows.iter().all(|r| r.severity >= threshold));
        }
    }

    #[test]
    fn test_aggregate_deduplicates_highest_severity_wins() {
        let outcomes = BTreeMap::from([findings(
            "app:1.0",
            &[
                ("openssl", "CVE-9", "MEDIUM"),
                ("openssl", "CVE-9", "CRITICAL"),
                ("openssl", "CVE-9", "LOW"),
                ("zlib", "CVE-9", "MEDIUM"),
            ],
        )]);

        let report = ResultAggregator::new().aggregate(outcomes, SeverityLevel::Unknown);

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].component, "openssl");
        assert_eq!(report.rows[0].severity, SeverityLevel::Critical);
        assert_eq!(report.rows[1].component, "zlib");
        assert_eq!(report.rows[1].severity, SeverityLevel::Medium);
    }

    #[test]
    fn test_aggregate_orders_rows() {
        let outcomes = BTreeMap::from([
            findings(
                "zeta:1",
                &[("a", "CVE-2", "LOW"), ("a", "CVE-1", "LOW")],
            ),
            findings(
                "alpha:1",
                &[
                    ("x", "CVE-7", "MEDIUM"),
                    ("x", "CVE-3", "CRITICAL"),
                    ("y", "CVE-5", "MEDIUM"),
                ],
            ),
        ]);

        let report = ResultAggregator::new().aggregate(outcomes, SeverityLevel::Low);
        let order: Vec<(&str, &str)> = report
            .rows
            .iter()
            .map(|r| (r.image.as_str(), r.vulnerability.as_str()))
            .collect();

        assert_eq!(
            order,
            vec![
                ("alpha:1", "CVE-3"),
                ("alpha:1", "CVE-5"),
                ("alpha:1", "CVE-7"),
                ("zeta:1", "CVE-1"),
                ("zeta:1", "CVE-2"),
            ]
        );
        assert!(is_sorted(&report.rows));
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let outcomes = BTreeMap::from([
            findings("b:1", &[("x", "CVE-1", "HIGH"), ("x", "CVE-1", "HIGH")]),
            findings("a:1", &[("y", "CVE-2", "CRITICAL"), ("z", "CVE-0", "MEDIUM")]),
        ]);

        let aggregator = ResultAggregator::new();
        let first = aggregator.aggregate(outcomes.clone(), SeverityLevel::Medium);
        let second = aggregator.aggregate(outcomes, SeverityLevel::Medium);
        assert_eq!(first, second);

        let mut tuples: Vec<_> = first
            .rows
            .iter()
            .map(|r| (&r.image, &r.component, &r.vulnerability))
            .collect();
        let before = tuples.len();
        tuples.sort();
        tuples.dedup();
        assert_eq!(tuples.len(), before);
    }

    #[test]
    fn test_aggregate_records_failures_without_rows() {
        let outcomes = BTreeMap::from([
            findings("app:1.0", &[("lib-a", "CVE-1", "HIGH")]),
            (
                image("broken:2.0"),
                ScanOutcome::Failed(ScanFailure::timeout(Duration::from_secs(5))),
            ),
        ]);

        let report = ResultAggregator::new().aggregate(outcomes, SeverityLevel::Medium);

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].image.as_str(), "broken:2.0");
        assert!(report.is_partial());
        assert!(report.rows.iter().all(|r| r.image.as_str() != "broken:2.0"));
    }

    #[test]
    fn test_aggregate_drops_ignored_vulnerabilities() {
        let outcomes = BTreeMap::from([findings(
            "app:1.0",
            &[("lib-a", "CVE-1", "HIGH"), ("lib-b", "CVE-2", "HIGH")],
        )]);

        let aggregator = ResultAggregator::with_ignored_vulnerabilities(vec!["CVE-2".to_string()]);
        let report = aggregator.aggregate(outcomes, SeverityLevel::Medium);

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].vulnerability, "CVE-1");
        assert_eq!(report.ignored_count, 1);
    }

    #[test]
    fn test_aggregate_empty_outcomes() {
        let report = ResultAggregator::new().aggregate(BTreeMap::new(), SeverityLevel::Medium);
        assert!(report.rows.is_empty());
        assert!(report.failures.is_empty());
    }
}
