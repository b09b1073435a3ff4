//! The per-request mood analysis pipeline.
//!
//! validate → voice/image signals → enriched text → LLM assessment → combine →
//! categorize → select song, book and place. Each step awaits the previous one; the only
//! state shared between requests is the read-only catalog and the selection RNG.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::catalog::{self, Catalog};
use crate::config::AnalysisConfig;
use crate::error::AnalyzeError;
use crate::llm::MoodModel;
use crate::mood::{categorize, AnalysisResult};
use crate::signals::{
    decode_payload, enhance_text, Combiner, ImageAnalysis, ImageAnalyzer, SimulatedImageAnalyzer,
    SimulatedVoiceAnalyzer, VoiceAnalysis, VoiceAnalyzer,
};

/// Which inputs a request wants analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Text,
    Voice,
    Image,
    #[default]
    Multimodal,
}

impl AnalysisMode {
    fn wants_voice(self) -> bool {
        matches!(self, Self::Voice | Self::Multimodal)
    }

    fn wants_image(self) -> bool {
        matches!(self, Self::Image | Self::Multimodal)
    }
}

/// Body of an analysis request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoodInput {
    #[serde(default)]
    pub text_input: String,
    /// Base64 audio, optionally as a `data:` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_data: Option<String>,
    /// Base64 image, optionally as a `data:` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_mode: Option<AnalysisMode>,
}

impl MoodInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text_input: text.into(),
            ..Default::default()
        }
    }
}

pub struct MoodAnalyzer {
    model: Arc<dyn MoodModel>,
    catalog: Arc<Catalog>,
    voice: Arc<dyn VoiceAnalyzer>,
    image: Arc<dyn ImageAnalyzer>,
    combiner: Combiner,
    enhance_recommendations: bool,
    rng: Mutex<StdRng>,
}

impl MoodAnalyzer {
    /// Pipeline with the simulated voice/image analyzers and the standard combiner.
    pub fn new(model: Arc<dyn MoodModel>, catalog: Arc<Catalog>, config: &AnalysisConfig) -> Self {
        Self {
            model,
            catalog,
            voice: Arc::new(SimulatedVoiceAnalyzer::new()),
            image: Arc::new(SimulatedImageAnalyzer::new()),
            combiner: Combiner::default(),
            enhance_recommendations: config.enhance_recommendations,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_voice_analyzer(mut self, analyzer: Arc<dyn VoiceAnalyzer>) -> Self {
        self.voice = analyzer;
        self
    }

    pub fn with_image_analyzer(mut self, analyzer: Arc<dyn ImageAnalyzer>) -> Self {
        self.image = analyzer;
        self
    }

    pub fn with_combiner(mut self, combiner: Combiner) -> Self {
        self.combiner = combiner;
        self
    }

    /// Fix the selection RNG, e.g. to make zero-score picks reproducible.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn analyze(&self, input: &MoodInput) -> Result<AnalysisResult, AnalyzeError> {
        let text = input.text_input.trim();
        if text.is_empty() {
            return Err(AnalyzeError::MissingInput);
        }

        let mode = input.analysis_mode.unwrap_or_default();
        let voice = present(&input.voice_data)
            .filter(|_| mode.wants_voice())
            .map(|payload| self.read_voice(payload));
        let image = present(&input.image_data)
            .filter(|_| mode.wants_image())
            .map(|payload| self.read_image(payload));

        let prompt_text = enhance_text(text, voice.as_ref(), image.as_ref());
        let assessment = self.model.assess(&prompt_text).await?;

        let mut mood = assessment.mood_detected.clone();
        let mut confidence = None;
        let mut sources = None;
        let mut analysis_details = None;
        if voice.is_some() || image.is_some() {
            let combined = self
                .combiner
                .combine(&assessment.mood_detected, voice.as_ref(), image.as_ref());
            mood = combined.mood;
            confidence = Some(combined.confidence);
            sources = Some(combined.sources);
            analysis_details = Some(combined.details);
        }

        let category = categorize(&mood);
        let context = self.selection_context(text, &mood).await;
        debug!(mood = %mood, category = %category, "selecting recommendations");

        let (song, book, place) = {
            let mut rng = self
                .rng
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            (
                catalog::select_song(self.catalog.music(category), &mut *rng).cloned(),
                catalog::select_book(self.catalog.books(category), &context, &mut *rng).cloned(),
                catalog::select_place(self.catalog.places(category), &context, &mut *rng)
                    .cloned(),
            )
        };
        let (Some(song), Some(book), Some(place)) = (song, book, place) else {
            return Err(AnalyzeError::NoRecommendation { category });
        };

        info!(mood = %mood, category = %category, sources = ?sources, "mood analyzed");

        Ok(AnalysisResult {
            mood_detected: mood,
            empathy_response: assessment.empathy_response,
            recommendation: assessment.recommendation,
            motivational_quote: assessment.motivational_quote,
            music_recommendation: song,
            book_recommendation: book,
            place_recommendation: place,
            confidence,
            sources,
            analysis_details,
        })
    }

    /// User text, extended with model-suggested themes when enabled and available.
    async fn selection_context(&self, text: &str, mood: &str) -> String {
        if !self.enhance_recommendations {
            return text.to_string();
        }
        match self.model.themes(text, mood).await {
            Ok(themes) if !themes.trim().is_empty() => format!("{text} {themes}"),
            Ok(_) => text.to_string(),
            Err(e) => {
                warn!(error = %e, "theme extraction failed, selecting from raw input");
                text.to_string()
            }
        }
    }

    fn read_voice(&self, payload: &str) -> VoiceAnalysis {
        match decode_payload(payload) {
            Some(audio) => self.voice.analyze(&audio),
            None => {
                warn!("voice payload is not valid base64, using neutral reading");
                VoiceAnalysis::neutral()
            }
        }
    }

    fn read_image(&self, payload: &str) -> ImageAnalysis {
        match decode_payload(payload) {
            Some(image) => self.image.analyze(&image),
            None => {
                warn!("image payload is not valid base64, using neutral reading");
                ImageAnalysis::neutral()
            }
        }
    }
}

fn present(payload: &Option<String>) -> Option<&str> {
    payload.as_deref().filter(|p| !p.trim().is_empty())
}
