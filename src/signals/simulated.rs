//! Analyzer traits and the random stand-ins used until real inference is wired in.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use super::{EmotionScores, ImageAnalysis, VoiceAnalysis};
use crate::mood::MoodCategory;

/// Reads an emotion from decoded audio bytes.
pub trait VoiceAnalyzer: Send + Sync {
    fn analyze(&self, audio: &[u8]) -> VoiceAnalysis;
}

/// Reads facial expression scores from decoded image bytes.
pub trait ImageAnalyzer: Send + Sync {
    fn analyze(&self, image: &[u8]) -> ImageAnalysis;
}

/// Random voice readings: any of the six categories, confidence in `[0.75, 0.95)`.
pub struct SimulatedVoiceAnalyzer {
    rng: Mutex<StdRng>,
}

impl SimulatedVoiceAnalyzer {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Default for SimulatedVoiceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceAnalyzer for SimulatedVoiceAnalyzer {
    fn analyze(&self, _audio: &[u8]) -> VoiceAnalysis {
        let Ok(mut rng) = self.rng.lock() else {
            tracing::warn!("voice analyzer rng poisoned, returning neutral reading");
            return VoiceAnalysis::neutral();
        };
        let emotion = MoodCategory::ALL[rng.gen_range(0..MoodCategory::ALL.len())];
        VoiceAnalysis {
            emotion: emotion.as_str().to_string(),
            confidence: 0.75 + rng.gen::<f64>() * 0.2,
            tone: if rng.gen_bool(0.5) { "positive" } else { "negative" }.to_string(),
            energy: rng.gen::<f64>(),
            speech_rate: 0.5 + rng.gen::<f64>() * 0.5,
        }
    }
}

/// Random face readings with confidence in `[0.7, 0.95)`.
pub struct SimulatedImageAnalyzer {
    rng: Mutex<StdRng>,
}

impl SimulatedImageAnalyzer {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Default for SimulatedImageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageAnalyzer for SimulatedImageAnalyzer {
    fn analyze(&self, _image: &[u8]) -> ImageAnalysis {
        let Ok(mut rng) = self.rng.lock() else {
            tracing::warn!("image analyzer rng poisoned, returning neutral reading");
            return ImageAnalysis::neutral();
        };
        let emotions = EmotionScores {
            happy: rng.gen::<f64>() * 0.3,
            sad: rng.gen::<f64>() * 0.3,
            angry: rng.gen::<f64>() * 0.2,
            surprised: rng.gen::<f64>() * 0.2,
            fearful: rng.gen::<f64>() * 0.1,
            disgusted: rng.gen::<f64>() * 0.1,
            neutral: rng.gen::<f64>() * 0.4,
        };
        let mut analysis = ImageAnalysis::from_scores(emotions);
        analysis.confidence = 0.7 + rng.gen::<f64>() * 0.25;
        analysis
    }
}
