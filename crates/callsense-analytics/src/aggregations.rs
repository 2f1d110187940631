//! Emotion aggregation over a participant's sample sequence.
//!
//! Pure computation from a snapshot of recorded samples; no side effects.

use callsense_core::types::EmotionSample;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregated statistics for one participant's call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallReport {
    /// Share of samples per observed emotion label, in percent. Covers every
    /// label seen at least once and sums to 100 for a non-empty sequence.
    pub emotion_percentages: HashMap<String, f64>,
    /// Share of samples with the eye-contact flag set, in percent.
    pub eye_contact_percentage: f64,
    /// Duration proxy: the number of samples, floored at 1.
    pub total_duration: u64,
    pub generated_at: DateTime<Utc>,
}

impl CallReport {
    /// Aggregate a sample sequence into a report.
    ///
    /// An empty sequence yields the synthetic default — 100% "neutral", no
    /// eye contact, duration 1 — so the report view always has data to show.
    pub fn from_samples(samples: &[EmotionSample]) -> Self {
        let total = samples.len();
        if total == 0 {
            tracing::debug!("No samples recorded, falling back to neutral report");
            return Self::empty();
        }

        let mut counts: HashMap<String, u32> = HashMap::new();
        let mut eye_contact_count = 0u32;
        for sample in samples {
            *counts.entry(sample.emotion.clone()).or_insert(0) += 1;
            if sample.eye_contact {
                eye_contact_count += 1;
            }
        }

        let emotion_percentages = counts
            .into_iter()
            .map(|(emotion, count)| (emotion, count as f64 / total as f64 * 100.0))
            .collect();

        Self {
            emotion_percentages,
            eye_contact_percentage: eye_contact_count as f64 / total as f64 * 100.0,
            total_duration: total as u64,
            generated_at: Utc::now(),
        }
    }

    fn empty() -> Self {
        Self {
            emotion_percentages: HashMap::from([("neutral".to_string(), 100.0)]),
            eye_contact_percentage: 0.0,
            total_duration: 1,
            generated_at: Utc::now(),
        }
    }

    /// Emotion labels with their percentages, highest share first.
    /// Ties break alphabetically so rendering is stable.
    pub fn ranked_emotions(&self) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = self
            .emotion_percentages
            .iter()
            .map(|(emotion, pct)| (emotion.clone(), *pct))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked
    }

    /// The most frequently observed emotion label.
    pub fn dominant_emotion(&self) -> Option<String> {
        self.ranked_emotions().into_iter().next().map(|(e, _)| e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(entries: &[(&str, bool)]) -> Vec<EmotionSample> {
        entries
            .iter()
            .map(|(emotion, eye_contact)| EmotionSample::new(*emotion, *eye_contact))
            .collect()
    }

    #[test]
    fn test_empty_sequence_uses_neutral_default() {
        let report = CallReport::from_samples(&[]);
        assert_eq!(report.emotion_percentages.len(), 1);
        assert_eq!(report.emotion_percentages["neutral"], 100.0);
        assert_eq!(report.eye_contact_percentage, 0.0);
        assert_eq!(report.total_duration, 1);
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let cases: Vec<Vec<EmotionSample>> = vec![
            samples(&[("happy", true)]),
            samples(&[("happy", true), ("sad", false)]),
            samples(&[("happy", true), ("happy", false), ("sad", true)]),
            samples(&[
                ("neutral", true),
                ("happy", true),
                ("sad", false),
                ("angry", false),
                ("surprised", true),
                ("happy", true),
                ("neutral", false),
            ]),
        ];

        for case in cases {
            let report = CallReport::from_samples(&case);
            let sum: f64 = report.emotion_percentages.values().sum();
            assert!((sum - 100.0).abs() < 1e-9, "sum was {}", sum);
        }
    }

    #[test]
    fn test_every_observed_label_is_covered() {
        let report = CallReport::from_samples(&samples(&[
            ("happy", true),
            ("sad", false),
            ("angry", true),
        ]));
        assert_eq!(report.emotion_percentages.len(), 3);
        for label in ["happy", "sad", "angry"] {
            assert!(report.emotion_percentages.contains_key(label));
        }
    }

    #[test]
    fn test_two_thirds_happy_scenario() {
        let report = CallReport::from_samples(&samples(&[
            ("happy", true),
            ("happy", false),
            ("sad", true),
        ]));

        assert!((report.emotion_percentages["happy"] - 200.0 / 3.0).abs() < 1e-9);
        assert!((report.emotion_percentages["sad"] - 100.0 / 3.0).abs() < 1e-9);
        assert!((report.eye_contact_percentage - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.total_duration, 3);
    }

    #[test]
    fn test_eye_contact_ratio() {
        let report = CallReport::from_samples(&samples(&[
            ("neutral", true),
            ("neutral", false),
            ("neutral", false),
            ("neutral", false),
        ]));
        assert!((report.eye_contact_percentage - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_eye_contact() {
        let report = CallReport::from_samples(&samples(&[("sad", false), ("sad", false)]));
        assert_eq!(report.eye_contact_percentage, 0.0);
    }

    #[test]
    fn test_single_sample() {
        let report = CallReport::from_samples(&samples(&[("surprised", true)]));
        assert_eq!(report.emotion_percentages["surprised"], 100.0);
        assert_eq!(report.eye_contact_percentage, 100.0);
        assert_eq!(report.total_duration, 1);
    }

    #[test]
    fn test_duration_tracks_sample_count() {
        let many = samples(&[("happy", true); 12]);
        let report = CallReport::from_samples(&many);
        assert_eq!(report.total_duration, 12);
    }

    #[test]
    fn test_ranked_emotions_order() {
        let report = CallReport::from_samples(&samples(&[
            ("happy", true),
            ("happy", true),
            ("sad", false),
            ("angry", false),
        ]));

        let ranked = report.ranked_emotions();
        assert_eq!(ranked[0].0, "happy");
        // Equal shares fall back to alphabetical order.
        assert_eq!(ranked[1].0, "angry");
        assert_eq!(ranked[2].0, "sad");
    }

    #[test]
    fn test_dominant_emotion() {
        let report = CallReport::from_samples(&samples(&[
            ("sad", false),
            ("happy", true),
            ("sad", true),
        ]));
        assert_eq!(report.dominant_emotion().as_deref(), Some("sad"));
    }

    #[test]
    fn test_free_form_labels_are_kept_verbatim() {
        let report = CallReport::from_samples(&samples(&[("slightly confused", false)]));
        assert_eq!(report.emotion_percentages["slightly confused"], 100.0);
    }
}
