//! Multi-modal combination of a text mood with optional voice and face readings.
//!
//! Confidence starts at the text baseline and is re-weighted by each extra source in
//! turn. A confident reading that contradicts the running mood replaces it with a
//! blended label from the [`BlendTable`], or with the heavier side when no blend exists.

use std::collections::{HashMap, HashSet};

use super::{ImageAnalysis, VoiceAnalysis};
use crate::mood::{AnalysisDetails, TextSignal};

pub const TEXT_BASE_CONFIDENCE: f64 = 0.7;

/// Readings at or below this confidence never override the mood.
const OVERRIDE_THRESHOLD: f64 = 0.8;

const VOICE_KEEP: f64 = 0.7;
const VOICE_WEIGHT: f64 = 0.3;
const VOICE_BLEND: (f64, f64) = (0.6, 0.4);

const IMAGE_KEEP: f64 = 0.8;
const IMAGE_WEIGHT: f64 = 0.2;
const IMAGE_BLEND: (f64, f64) = (0.7, 0.3);

const STANDARD_CONFLICTS: [(&str, &[&str]); 6] = [
    ("happy", &["sad", "angry", "anxious"]),
    ("sad", &["happy", "excited"]),
    ("angry", &["happy", "calm"]),
    ("anxious", &["happy", "calm"]),
    ("calm", &["angry", "anxious", "excited"]),
    ("excited", &["sad", "calm"]),
];

/// Which emotions contradict which. Lookups are case-insensitive and directional.
#[derive(Debug, Clone, Default)]
pub struct ConflictTable {
    pairs: HashMap<String, HashSet<String>>,
}

impl ConflictTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        STANDARD_CONFLICTS
            .iter()
            .flat_map(|(from, against)| against.iter().map(move |other| (*from, *other)))
            .fold(Self::empty(), |table, (from, other)| {
                table.with_conflict(from, other)
            })
    }

    /// Register `current` as contradicted by `incoming`.
    pub fn with_conflict(mut self, current: &str, incoming: &str) -> Self {
        self.pairs
            .entry(current.to_lowercase())
            .or_default()
            .insert(incoming.to_lowercase());
        self
    }

    pub fn conflicts(&self, current: &str, incoming: &str) -> bool {
        self.pairs
            .get(&current.to_lowercase())
            .is_some_and(|set| set.contains(&incoming.to_lowercase()))
    }
}

/// Labels for mixed emotional states, keyed by (current, incoming).
#[derive(Debug, Clone, Default)]
pub struct BlendTable {
    labels: HashMap<(String, String), String>,
}

impl BlendTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        Self::empty()
            .with_blend("happy", "sad", "bittersweet")
            .with_blend("happy", "angry", "frustrated")
            .with_blend("happy", "anxious", "nervous excitement")
            .with_blend("sad", "happy", "melancholic")
            .with_blend("sad", "angry", "bitter")
            .with_blend("sad", "anxious", "distressed")
            .with_blend("angry", "happy", "irritated")
            .with_blend("angry", "sad", "resentful")
            .with_blend("angry", "anxious", "agitated")
    }

    pub fn with_blend(mut self, current: &str, incoming: &str, label: &str) -> Self {
        self.labels.insert(
            (current.to_lowercase(), incoming.to_lowercase()),
            label.to_string(),
        );
        self
    }

    /// The blended label, or whichever side carries more weight when none is defined.
    pub fn blend(&self, current: &str, incoming: &str, weights: (f64, f64)) -> String {
        let key = (current.to_lowercase(), incoming.to_lowercase());
        match self.labels.get(&key) {
            Some(label) => label.clone(),
            None if weights.0 > weights.1 => current.to_string(),
            None => incoming.to_string(),
        }
    }
}

/// Outcome of combining the available signals.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedMood {
    pub mood: String,
    /// Always within `[0.0, 1.0]`.
    pub confidence: f64,
    pub sources: Vec<String>,
    pub details: AnalysisDetails,
}

#[derive(Debug, Clone)]
pub struct Combiner {
    conflicts: ConflictTable,
    blends: BlendTable,
}

impl Default for Combiner {
    fn default() -> Self {
        Self::new(ConflictTable::standard(), BlendTable::standard())
    }
}

impl Combiner {
    pub fn new(conflicts: ConflictTable, blends: BlendTable) -> Self {
        Self { conflicts, blends }
    }

    pub fn combine(
        &self,
        text_mood: &str,
        voice: Option<&VoiceAnalysis>,
        image: Option<&ImageAnalysis>,
    ) -> CombinedMood {
        let mut mood = text_mood.to_string();
        let mut confidence = TEXT_BASE_CONFIDENCE;
        let mut sources = vec!["text".to_string()];
        let mut details = AnalysisDetails {
            text: Some(TextSignal {
                mood: text_mood.to_string(),
                confidence: TEXT_BASE_CONFIDENCE,
            }),
            ..Default::default()
        };

        if let Some(v) = voice {
            sources.push("voice".into());
            details.voice = Some(v.clone());
            confidence = confidence * VOICE_KEEP + v.confidence * VOICE_WEIGHT;
            mood = self.reconcile(mood, &v.emotion, v.confidence, VOICE_BLEND);
        }

        if let Some(i) = image {
            sources.push("image".into());
            details.image = Some(i.clone());
            confidence = confidence * IMAGE_KEEP + i.confidence * IMAGE_WEIGHT;
            mood = self.reconcile(mood, &i.dominant_emotion, i.confidence, IMAGE_BLEND);
        }

        CombinedMood {
            mood,
            confidence: confidence.clamp(0.0, 1.0),
            sources,
            details,
        }
    }

    fn reconcile(
        &self,
        current: String,
        incoming: &str,
        incoming_confidence: f64,
        weights: (f64, f64),
    ) -> String {
        if incoming_confidence > OVERRIDE_THRESHOLD && self.conflicts.conflicts(&current, incoming)
        {
            let blended = self.blends.blend(&current, incoming, weights);
            tracing::debug!(from = %current, signal = %incoming, to = %blended, "mood reconciled");
            blended
        } else {
            current
        }
    }
}
