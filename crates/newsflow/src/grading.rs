use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Coarse significance classification. Variant order gives `C < B < A` so a
/// minimum-grade threshold is a plain comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    C,
    B,
    A,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
        }
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Grade::A),
            "B" | "b" => Ok(Grade::B),
            "C" | "c" => Ok(Grade::C),
            other => Err(format!("unknown grade {other:?}")),
        }
    }
}

/// Percentage-delta policy thresholds, in percent (0.5 = 0.5%).
#[derive(Debug, Clone)]
pub struct DeltaThresholds {
    pub a_pct: f64,
    pub b_pct: f64,
}

impl Default for DeltaThresholds {
    fn default() -> Self {
        Self { a_pct: 0.5, b_pct: 0.2 }
    }
}

/// Grades a fractional price change (+0.006 = +0.6%) by absolute magnitude.
pub fn grade_delta(change: f64, thresholds: &DeltaThresholds) -> Grade {
    let pct = change.abs() * 100.0;
    if pct >= thresholds.a_pct {
        Grade::A
    } else if pct >= thresholds.b_pct {
        Grade::B
    } else {
        Grade::C
    }
}

/// Sentiment-and-keyword policy. `strong_max`/`mild_max` are score ceilings
/// (more negative is stronger); a keyword hit alone is worth a B.
#[derive(Debug, Clone)]
pub struct SentimentThresholds {
    pub strong_max: f64,
    pub mild_max: f64,
    pub keywords: Vec<String>,
}

impl Default for SentimentThresholds {
    fn default() -> Self {
        Self {
            strong_max: -0.3,
            mild_max: -0.1,
            keywords: [
                "lawsuit",
                "fraud",
                "recall",
                "bankruptcy",
                "downgrade",
                "investigation",
                "plunge",
                "layoff",
                "halt",
                "default",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// `None` is the no-signal ("-") outcome. This is an OR of a numeric
/// threshold and a keyword match, not a weighted score.
pub fn grade_sentiment(
    score: Option<f64>,
    text: &str,
    thresholds: &SentimentThresholds,
) -> Option<Grade> {
    let lowered = text.to_lowercase();
    let keyword_hit = thresholds
        .keywords
        .iter()
        .any(|k| !k.is_empty() && lowered.contains(&k.to_lowercase()));

    match score {
        Some(s) if s <= thresholds.strong_max => Some(Grade::A),
        Some(s) if s <= thresholds.mild_max || keyword_hit => Some(Grade::B),
        Some(_) => None,
        None if keyword_hit => Some(Grade::B),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_grades_at_default_thresholds() {
        let t = DeltaThresholds::default();
        assert_eq!(grade_delta(0.006, &t), Grade::A);
        assert_eq!(grade_delta(0.003, &t), Grade::B);
        assert_eq!(grade_delta(0.001, &t), Grade::C);
    }

    #[test]
    fn delta_uses_absolute_magnitude() {
        let t = DeltaThresholds::default();
        assert_eq!(grade_delta(-0.006, &t), Grade::A);
    }

    #[test]
    fn delta_thresholds_are_configuration() {
        let t = DeltaThresholds { a_pct: 1.0, b_pct: 0.3 };
        assert_eq!(grade_delta(0.006, &t), Grade::B);
        assert_eq!(grade_delta(0.002, &t), Grade::C);
    }

    #[test]
    fn strong_negative_score_is_a() {
        let t = SentimentThresholds::default();
        assert_eq!(grade_sentiment(Some(-0.5), "quarterly results", &t), Some(Grade::A));
    }

    #[test]
    fn mild_negative_score_or_keyword_is_b() {
        let t = SentimentThresholds::default();
        assert_eq!(grade_sentiment(Some(-0.15), "quarterly results", &t), Some(Grade::B));
        assert_eq!(
            grade_sentiment(Some(-0.05), "faces a shareholder LAWSUIT", &t),
            Some(Grade::B)
        );
        assert_eq!(grade_sentiment(None, "production halt announced", &t), Some(Grade::B));
    }

    #[test]
    fn neutral_text_is_no_signal() {
        let t = SentimentThresholds::default();
        assert_eq!(grade_sentiment(Some(0.2), "record profits", &t), None);
        assert_eq!(grade_sentiment(None, "record profits", &t), None);
    }

    #[test]
    fn grade_ordering_supports_minimums() {
        assert!(Grade::A > Grade::B);
        assert!(Grade::B > Grade::C);
        assert_eq!("a".parse::<Grade>().unwrap(), Grade::A);
        assert!("x".parse::<Grade>().is_err());
    }
}
