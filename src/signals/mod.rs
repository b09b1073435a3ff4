//! Voice and image emotion signals.
//!
//! Real audio and face inference are outside this crate; [`VoiceAnalyzer`] and
//! [`ImageAnalyzer`] are the seams where they plug in. The bundled simulated analyzers
//! only honor the output shape and confidence ranges.

pub mod combine;
pub mod simulated;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

pub use combine::{BlendTable, CombinedMood, Combiner, ConflictTable};
pub use simulated::{ImageAnalyzer, SimulatedImageAnalyzer, SimulatedVoiceAnalyzer, VoiceAnalyzer};

/// Emotion read from a voice recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceAnalysis {
    pub emotion: String,
    /// `[0.0, 1.0]`
    pub confidence: f64,
    /// `"positive"`, `"negative"` or `"neutral"`.
    pub tone: String,
    pub energy: f64,
    pub speech_rate: f64,
}

impl VoiceAnalysis {
    /// Fallback when a recording cannot be analyzed.
    pub fn neutral() -> Self {
        Self {
            emotion: "neutral".into(),
            confidence: 0.5,
            tone: "neutral".into(),
            energy: 0.5,
            speech_rate: 0.5,
        }
    }

    /// Short description used to enrich the LLM prompt.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();

        if self.energy > 0.7 {
            parts.push("high energy".to_string());
        } else if self.energy < 0.3 {
            parts.push("low energy".to_string());
        }

        if self.speech_rate > 0.7 {
            parts.push("fast speech".to_string());
        } else if self.speech_rate < 0.3 {
            parts.push("slow speech".to_string());
        }

        parts.push(format!("{} tone", self.tone));
        parts.push(format!("{} emotion", self.emotion));
        parts.join(", ")
    }
}

/// Per-expression scores from a face reading.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionScores {
    pub happy: f64,
    pub sad: f64,
    pub angry: f64,
    pub surprised: f64,
    pub fearful: f64,
    pub disgusted: f64,
    pub neutral: f64,
}

impl EmotionScores {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("happy", self.happy),
            ("sad", self.sad),
            ("angry", self.angry),
            ("surprised", self.surprised),
            ("fearful", self.fearful),
            ("disgusted", self.disgusted),
            ("neutral", self.neutral),
        ]
        .into_iter()
    }
}

/// Emotion read from a face image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub dominant_emotion: String,
    pub emotions: EmotionScores,
    /// `[0.0, 1.0]`
    pub confidence: f64,
}

impl ImageAnalysis {
    /// Derive the dominant expression and a separation-based confidence from raw scores.
    ///
    /// Dominant is the strictly highest score (`neutral` if every score is zero).
    /// Confidence is `0.5 + 0.45 * (dominant - others / 6)`, clamped to `[0.5, 0.95]`.
    pub fn from_scores(emotions: EmotionScores) -> Self {
        let mut dominant = "neutral";
        let mut max = 0.0;
        for (name, score) in emotions.iter() {
            if score > max {
                max = score;
                dominant = name;
            }
        }

        let others: f64 = emotions
            .iter()
            .filter(|(name, _)| *name != dominant)
            .map(|(_, s)| s)
            .sum();
        let dominant_score = emotions
            .iter()
            .find(|(name, _)| *name == dominant)
            .map(|(_, s)| s)
            .unwrap_or(0.0);
        let separation = dominant_score - others / 6.0;
        let confidence = (0.5 + separation * 0.45).clamp(0.5, 0.95);

        Self {
            dominant_emotion: dominant.to_string(),
            emotions,
            confidence,
        }
    }

    /// Fallback when an image cannot be analyzed.
    pub fn neutral() -> Self {
        Self {
            dominant_emotion: "neutral".into(),
            emotions: EmotionScores {
                happy: 0.1,
                sad: 0.1,
                angry: 0.1,
                surprised: 0.1,
                fearful: 0.1,
                disgusted: 0.1,
                neutral: 0.4,
            },
            confidence: 0.5,
        }
    }

    pub fn describe(&self) -> String {
        let strength = if self.confidence > 0.8 {
            "strong"
        } else if self.confidence > 0.6 {
            "moderate"
        } else {
            "subtle"
        };
        format!("{strength} {} expression", self.dominant_emotion)
    }
}

/// Decode a base64 payload, accepting an optional `data:<mime>;base64,` prefix.
pub fn decode_payload(payload: &str) -> Option<Vec<u8>> {
    let body = match payload.split_once(',') {
        Some((_, rest)) => rest,
        None => payload,
    };
    STANDARD.decode(body.trim()).ok()
}

/// Append voice and face context to the user's text before it goes to the LLM.
pub fn enhance_text(
    text: &str,
    voice: Option<&VoiceAnalysis>,
    image: Option<&ImageAnalysis>,
) -> String {
    let mut enhanced = text.to_string();
    if let Some(v) = voice {
        enhanced.push_str(&format!(" Voice analysis indicates: {}", v.describe()));
    }
    if let Some(i) = image {
        enhanced.push_str(&format!(" Facial expression shows: {}", i.describe()));
    }
    enhanced
}
