//! Emotional pattern tracking over the analysis history.
//!
//! [`analyze`] is a pure function of the history slice (newest first): mood frequency,
//! average confidence, the ten most recent readings, and a four-way trend.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::mood::HistoryEntry;

/// Confidence assumed for entries recorded without one.
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

const POSITIVE_MOODS: [&str; 6] = ["happy", "joyful", "excited", "calm", "relaxed", "content"];
const NEGATIVE_MOODS: [&str; 6] = ["sad", "depressed", "anxious", "worried", "angry", "frustrated"];

const MIN_ENTRIES_FOR_TREND: usize = 3;
const WINDOW: usize = 5;
const RECENT_LIMIT: usize = 10;
const TREND_THRESHOLD: f64 = 0.2;
const FLUCTUATION_DISTINCT_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    Fluctuating,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
            Self::Fluctuating => "fluctuating",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentMood {
    pub mood: String,
    pub timestamp: i64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalPattern {
    pub trend: Trend,
    pub most_common_mood: String,
    pub mood_frequency: BTreeMap<String, u32>,
    pub average_confidence: f64,
    pub recent_moods: Vec<RecentMood>,
}

impl EmotionalPattern {
    /// The `n` most frequent moods, highest count first.
    pub fn top_moods(&self, n: usize) -> Vec<(&str, u32)> {
        let mut moods: Vec<(&str, u32)> = self
            .mood_frequency
            .iter()
            .map(|(m, c)| (m.as_str(), *c))
            .collect();
        moods.sort_by(|a, b| b.1.cmp(&a.1));
        moods.truncate(n);
        moods
    }

    /// One-sentence reading of the pattern for display.
    pub fn insight(&self) -> String {
        let mood = &self.most_common_mood;
        match self.trend {
            Trend::Improving => format!(
                "Great news! Your emotional state shows an improving trend. You've been feeling \
                 {mood} most often. Keep up the positive momentum!"
            ),
            Trend::Declining => format!(
                "Your recent mood shows a declining trend. The most common mood is {mood}. \
                 Consider reaching out to someone you trust or trying the recommended activities."
            ),
            Trend::Stable => format!(
                "Your emotional state has been relatively stable, with {mood} being most common. \
                 Consistency can be positive - keep monitoring how you feel."
            ),
            Trend::Fluctuating => "Your moods have been quite varied recently. This is normal, \
                 but if it feels overwhelming, consider establishing a routine or talking to a \
                 professional."
                .to_string(),
        }
    }
}

fn confidence_of(entry: &HistoryEntry) -> f64 {
    entry.result.confidence.unwrap_or(DEFAULT_CONFIDENCE)
}

/// Compute the pattern for a newest-first history.
pub fn analyze(history: &[HistoryEntry]) -> EmotionalPattern {
    if history.is_empty() {
        return EmotionalPattern {
            trend: Trend::Stable,
            most_common_mood: "neutral".into(),
            mood_frequency: BTreeMap::new(),
            average_confidence: 0.0,
            recent_moods: Vec::new(),
        };
    }

    let mut mood_frequency: BTreeMap<String, u32> = BTreeMap::new();
    // first-seen order decides ties
    let mut first_seen: Vec<&str> = Vec::new();
    for entry in history {
        let mood = entry.result.mood_detected.as_str();
        let count = mood_frequency.entry(mood.to_string()).or_insert(0);
        if *count == 0 {
            first_seen.push(mood);
        }
        *count += 1;
    }

    // a later-seen mood with an equal count displaces the current leader
    let mut most_common = first_seen[0];
    for &mood in &first_seen[1..] {
        if mood_frequency[mood] >= mood_frequency[most_common] {
            most_common = mood;
        }
    }

    let total: f64 = history.iter().map(confidence_of).sum();
    let recent_moods = history
        .iter()
        .take(RECENT_LIMIT)
        .map(|e| RecentMood {
            mood: e.result.mood_detected.clone(),
            timestamp: e.timestamp,
            confidence: confidence_of(e),
        })
        .collect();

    EmotionalPattern {
        trend: trend(history),
        most_common_mood: most_common.to_string(),
        mood_frequency,
        average_confidence: total / history.len() as f64,
        recent_moods,
    }
}

/// Share of positive readings among the entries that are positive or negative at all.
fn positive_ratio(entries: &[HistoryEntry]) -> f64 {
    let mut positive = 0u32;
    let mut negative = 0u32;
    for entry in entries {
        let mood = entry.result.mood_detected.to_lowercase();
        if POSITIVE_MOODS.iter().any(|m| mood.contains(m)) {
            positive += 1;
        } else if NEGATIVE_MOODS.iter().any(|m| mood.contains(m)) {
            negative += 1;
        }
    }
    f64::from(positive) / f64::from((positive + negative).max(1))
}

/// Classify the direction of the newest-first history.
///
/// Fewer than three entries is always stable. A recent window where at least 80% of
/// labels are distinct is fluctuating. Otherwise the positive ratio of the five newest
/// entries is compared with the five before them; with no older entries there is no
/// baseline and the trend is stable.
pub fn trend(history: &[HistoryEntry]) -> Trend {
    if history.len() < MIN_ENTRIES_FOR_TREND {
        return Trend::Stable;
    }

    let split = history.len().min(WINDOW);
    let recent = &history[..split];
    let older = &history[split..history.len().min(WINDOW * 2)];

    let distinct: HashSet<&str> = recent
        .iter()
        .map(|e| e.result.mood_detected.as_str())
        .collect();
    if distinct.len() as f64 >= recent.len() as f64 * FLUCTUATION_DISTINCT_RATIO {
        return Trend::Fluctuating;
    }

    if older.is_empty() {
        return Trend::Stable;
    }

    let difference = positive_ratio(recent) - positive_ratio(older);
    if difference > TREND_THRESHOLD {
        Trend::Improving
    } else if difference < -TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}
