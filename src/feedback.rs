// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Rule-based feedback classification.
//!
//! The thresholds live in const band tables, not branching code, so they can
//! be tuned and golden-tested independently of the logic that reads them.
//! Classification is a pure function of a [`GaitMetrics`](crate::metrics::GaitMetrics)
//! value: same input, byte-identical output, any number of times.

use std::fmt;

use serde::Serialize;

use crate::metrics::GaitMetrics;

/// Per-dimension status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Within the recommended range.
    Good,
    /// Outside the recommended range but not concerning.
    Warning,
    /// Likely form problem.
    Alert,
}

impl Status {
    /// Icon used in rendered reports.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Good => "✅",
            Self::Warning => "📊",
            Self::Alert => "⚠️",
        }
    }

    /// Lowercase string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Alert => "alert",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The assessed gait dimensions, in declaration order.
///
/// Declaration order is load-bearing: report entries and the issue list are
/// emitted in this order, never reordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Steps per minute.
    Cadence,
    /// Mean knee angle at contact.
    KneeAngle,
    /// Pelvic drop.
    HipDrop,
    /// Trunk angle from vertical.
    ForwardLean,
    /// Vertical bounce as a percentage of estimated height.
    VerticalOscillation,
}

impl Dimension {
    /// All dimensions, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Cadence,
        Self::KneeAngle,
        Self::HipDrop,
        Self::ForwardLean,
        Self::VerticalOscillation,
    ];

    /// Display title for reports.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Cadence => "Cadence",
            Self::KneeAngle => "Knee Angle",
            Self::HipDrop => "Hip Stability",
            Self::ForwardLean => "Forward Lean",
            Self::VerticalOscillation => "Vertical Bounce",
        }
    }

    /// Unit suffix for the dimension's value.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Cadence => "spm",
            Self::KneeAngle | Self::HipDrop | Self::ForwardLean => "°",
            Self::VerticalOscillation => "%",
        }
    }

    /// Pull this dimension's value out of a summary.
    #[must_use]
    pub fn value(&self, metrics: &GaitMetrics) -> f64 {
        match self {
            Self::Cadence => metrics.cadence,
            Self::KneeAngle => metrics.mean_knee_angle,
            Self::HipDrop => metrics.mean_hip_drop,
            Self::ForwardLean => metrics.mean_forward_lean,
            Self::VerticalOscillation => metrics.vertical_oscillation_pct,
        }
    }
}

/// One classification band: `status` applies when the value falls in
/// `[min, max]`, bounds inclusive. Bands are checked in order; the first
/// match wins, which is how half-open ranges like "[160, 170)" are encoded
/// without exclusive bounds.
#[derive(Debug, Clone, Copy)]
pub struct Band {
    /// Status assigned when this band matches.
    pub status: Status,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// Explanation attached to the report entry.
    pub note: &'static str,
}

impl Band {
    const fn new(status: Status, min: f64, max: f64, note: &'static str) -> Self {
        Self {
            status,
            min,
            max,
            note,
        }
    }

    fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Summary-level issue rule: the dimension is flagged when its value falls
/// outside `[min, max]`. These bands deliberately differ from the per-entry
/// status bands.
#[derive(Debug, Clone, Copy)]
pub struct IssueRule {
    /// Label emitted into the issue list.
    pub label: &'static str,
    /// Inclusive lower bound of the non-issue range.
    pub min: f64,
    /// Inclusive upper bound of the non-issue range.
    pub max: f64,
}

/// Classification rules for one dimension.
#[derive(Debug, Clone, Copy)]
pub struct DimensionRule {
    /// The dimension being assessed.
    pub dimension: Dimension,
    /// Status bands, first match wins; the last band must be a catch-all.
    pub bands: &'static [Band],
    /// Summary-level issue rule, if this dimension contributes to the list.
    pub issue: Option<IssueRule>,
}

const INF: f64 = f64::INFINITY;
const NEG_INF: f64 = f64::NEG_INFINITY;

/// The full rule table, in dimension-declaration order.
pub const RULES: [DimensionRule; 5] = [
    DimensionRule {
        dimension: Dimension::Cadence,
        bands: &[
            Band::new(
                Status::Good,
                170.0,
                185.0,
                "Your cadence is in the optimal range for efficient running.",
            ),
            Band::new(
                Status::Warning,
                160.0,
                170.0,
                "Slightly below optimal. Consider increasing by 5-10 spm.",
            ),
            Band::new(
                Status::Warning,
                185.0,
                INF,
                "High cadence - make sure you're not shuffling.",
            ),
            Band::new(
                Status::Alert,
                NEG_INF,
                INF,
                "Low cadence often indicates overstriding. Target 175-180 spm.",
            ),
        ],
        issue: Some(IssueRule {
            label: "cadence",
            min: 165.0,
            max: INF,
        }),
    },
    DimensionRule {
        dimension: Dimension::KneeAngle,
        bands: &[
            Band::new(
                Status::Good,
                150.0,
                175.0,
                "Knee angle at contact looks reasonable.",
            ),
            Band::new(
                Status::Alert,
                175.0,
                INF,
                "Very straight knee at contact - may indicate overstriding.",
            ),
            Band::new(
                Status::Alert,
                NEG_INF,
                INF,
                "Knee appears quite bent - excessive knee drive or camera angle.",
            ),
        ],
        issue: None,
    },
    DimensionRule {
        dimension: Dimension::HipDrop,
        bands: &[
            Band::new(
                Status::Good,
                NEG_INF,
                5.0,
                "Excellent hip stability - strong glutes!",
            ),
            Band::new(
                Status::Warning,
                NEG_INF,
                10.0,
                "Mild hip drop - some room for improvement.",
            ),
            Band::new(
                Status::Alert,
                NEG_INF,
                INF,
                "Significant hip drop - indicates weak glutes/hip abductors.",
            ),
        ],
        issue: Some(IssueRule {
            label: "hip stability",
            min: NEG_INF,
            max: 8.0,
        }),
    },
    DimensionRule {
        dimension: Dimension::ForwardLean,
        bands: &[
            Band::new(Status::Good, 5.0, 12.0, "Good forward lean for running."),
            Band::new(
                Status::Warning,
                0.0,
                15.0,
                "Slight lean - generally acceptable.",
            ),
            Band::new(
                Status::Alert,
                NEG_INF,
                0.0,
                "Leaning backward - increases braking forces.",
            ),
            Band::new(
                Status::Alert,
                NEG_INF,
                INF,
                "Excessive forward lean - may strain lower back and hamstrings.",
            ),
        ],
        issue: Some(IssueRule {
            label: "posture",
            min: 0.0,
            max: 15.0,
        }),
    },
    DimensionRule {
        dimension: Dimension::VerticalOscillation,
        bands: &[
            Band::new(
                Status::Good,
                NEG_INF,
                8.0,
                "Vertical oscillation looks efficient.",
            ),
            Band::new(
                Status::Alert,
                NEG_INF,
                INF,
                "High bounce - wasted energy going up and down.",
            ),
        ],
        issue: Some(IssueRule {
            label: "vertical bounce",
            min: NEG_INF,
            max: 8.0,
        }),
    },
];

/// One classified dimension in the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeedbackEntry {
    /// The dimension assessed.
    pub dimension: Dimension,
    /// Its status label.
    pub status: Status,
    /// Icon matching the status.
    pub icon: &'static str,
    /// The value the classification was made on.
    pub value: f64,
    /// Human-readable explanation.
    pub explanation: &'static str,
}

/// The classified session: per-dimension entries, prioritized issues, and an
/// overall verdict. Stateless and recomputable from the same summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackReport {
    /// Entries in dimension-declaration order.
    pub entries: Vec<FeedbackEntry>,
    /// Flagged issue labels, declaration order (never severity order).
    pub issues: Vec<&'static str>,
    /// One-line overall verdict.
    pub verdict: String,
}

fn classify_value(bands: &[Band], value: f64) -> &Band {
    bands
        .iter()
        .find(|b| b.contains(value))
        .unwrap_or(&bands[bands.len() - 1])
}

/// Map a session summary to its feedback report.
///
/// Deterministic: calling this twice on the same [`GaitMetrics`] yields
/// identical output.
#[must_use]
pub fn classify(metrics: &GaitMetrics) -> FeedbackReport {
    let mut entries = Vec::with_capacity(RULES.len());
    let mut issues = Vec::new();

    for rule in &RULES {
        let value = rule.dimension.value(metrics);
        let band = classify_value(rule.bands, value);
        entries.push(FeedbackEntry {
            dimension: rule.dimension,
            status: band.status,
            icon: band.status.icon(),
            value,
            explanation: band.note,
        });

        if let Some(issue) = rule.issue {
            if value < issue.min || value > issue.max {
                issues.push(issue.label);
            }
        }
    }

    let verdict = if issues.is_empty() {
        "Great form! Keep up the good work.".to_string()
    } else {
        format!("Areas to focus on: {}", issues.join(", "))
    };

    FeedbackReport {
        entries,
        issues,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(
        cadence: f64,
        knee: f64,
        hip_drop: f64,
        lean: f64,
        oscillation: f64,
    ) -> GaitMetrics {
        GaitMetrics {
            cadence,
            mean_knee_angle: knee,
            mean_hip_drop: hip_drop,
            mean_forward_lean: lean,
            vertical_oscillation_pct: oscillation,
            ..GaitMetrics::default()
        }
    }

    fn status_of(report: &FeedbackReport, dimension: Dimension) -> Status {
        report
            .entries
            .iter()
            .find(|e| e.dimension == dimension)
            .unwrap()
            .status
    }

    #[test]
    fn test_rule_table_covers_every_dimension_in_order() {
        let covered: Vec<Dimension> = RULES.iter().map(|r| r.dimension).collect();
        assert_eq!(covered, Dimension::ALL);
        // Entries come out in the same declaration order.
        let report = classify(&GaitMetrics::default());
        let emitted: Vec<Dimension> = report.entries.iter().map(|e| e.dimension).collect();
        assert_eq!(emitted, Dimension::ALL);
    }

    #[test]
    fn test_all_good_session() {
        let report = classify(&metrics(178.0, 165.0, 3.0, 8.0, 5.0));
        assert!(report.entries.iter().all(|e| e.status == Status::Good));
        assert!(report.issues.is_empty());
        assert_eq!(report.verdict, "Great form! Keep up the good work.");
    }

    #[test]
    fn test_all_alert_session_issue_order() {
        let report = classify(&metrics(150.0, 165.0, 12.0, -2.0, 9.0));
        assert_eq!(
            report.issues,
            vec!["cadence", "hip stability", "posture", "vertical bounce"]
        );
        assert_eq!(status_of(&report, Dimension::Cadence), Status::Alert);
        assert_eq!(status_of(&report, Dimension::HipDrop), Status::Alert);
        assert_eq!(status_of(&report, Dimension::ForwardLean), Status::Alert);
        assert_eq!(
            status_of(&report, Dimension::VerticalOscillation),
            Status::Alert
        );
    }

    #[test]
    fn test_cadence_boundaries() {
        let cases = [
            (159.9, Status::Alert),
            (160.0, Status::Warning),
            (169.9, Status::Warning),
            (170.0, Status::Good),
            (185.0, Status::Good),
            (185.1, Status::Warning),
        ];
        for (value, expected) in cases {
            let report = classify(&metrics(value, 165.0, 3.0, 8.0, 5.0));
            assert_eq!(
                status_of(&report, Dimension::Cadence),
                expected,
                "cadence {value}"
            );
        }
    }

    #[test]
    fn test_knee_boundaries() {
        let cases = [
            (149.9, Status::Alert),
            (150.0, Status::Good),
            (175.0, Status::Good),
            (175.1, Status::Alert),
        ];
        for (value, expected) in cases {
            let report = classify(&metrics(178.0, value, 3.0, 8.0, 5.0));
            assert_eq!(
                status_of(&report, Dimension::KneeAngle),
                expected,
                "knee {value}"
            );
        }
    }

    #[test]
    fn test_hip_drop_boundaries() {
        let cases = [
            (5.0, Status::Good),
            (5.1, Status::Warning),
            (10.0, Status::Warning),
            (10.1, Status::Alert),
        ];
        for (value, expected) in cases {
            let report = classify(&metrics(178.0, 165.0, value, 8.0, 5.0));
            assert_eq!(
                status_of(&report, Dimension::HipDrop),
                expected,
                "hip drop {value}"
            );
        }
    }

    #[test]
    fn test_lean_boundaries() {
        let cases = [
            (-0.1, Status::Alert),
            (0.0, Status::Warning),
            (4.9, Status::Warning),
            (5.0, Status::Good),
            (12.0, Status::Good),
            (12.1, Status::Warning),
            (15.0, Status::Warning),
            (15.1, Status::Alert),
        ];
        for (value, expected) in cases {
            let report = classify(&metrics(178.0, 165.0, 3.0, value, 5.0));
            assert_eq!(
                status_of(&report, Dimension::ForwardLean),
                expected,
                "lean {value}"
            );
        }
    }

    #[test]
    fn test_oscillation_boundaries() {
        let good = classify(&metrics(178.0, 165.0, 3.0, 8.0, 8.0));
        assert_eq!(status_of(&good, Dimension::VerticalOscillation), Status::Good);
        let alert = classify(&metrics(178.0, 165.0, 3.0, 8.0, 8.1));
        assert_eq!(
            status_of(&alert, Dimension::VerticalOscillation),
            Status::Alert
        );
    }

    #[test]
    fn test_issue_bands_differ_from_status_bands() {
        // Cadence 162 is warning at the entry level but still an issue.
        let report = classify(&metrics(162.0, 165.0, 3.0, 8.0, 5.0));
        assert_eq!(status_of(&report, Dimension::Cadence), Status::Warning);
        assert_eq!(report.issues, vec!["cadence"]);

        // Hip drop 9 is warning at the entry level but already an issue.
        let report = classify(&metrics(178.0, 165.0, 9.0, 8.0, 5.0));
        assert_eq!(status_of(&report, Dimension::HipDrop), Status::Warning);
        assert_eq!(report.issues, vec!["hip stability"]);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let m = metrics(162.7, 151.2, 9.4, 13.9, 7.9);
        let a = classify(&m);
        let b = classify(&m);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_last_band_is_catch_all() {
        for rule in &RULES {
            let last = rule.bands[rule.bands.len() - 1];
            assert!(last.min == f64::NEG_INFINITY && last.max == f64::INFINITY);
        }
    }
}
