#![allow(dead_code)]

use async_trait::async_trait;
use mindful::analyze::MoodAnalyzer;
use mindful::catalog::Catalog;
use mindful::config::AnalysisConfig;
use mindful::error::{LlmError, LlmResult};
use mindful::history::HistoryStore;
use mindful::llm::{MoodAssessment, MoodModel};
use mindful::mood::{AnalysisResult, HistoryEntry, MoodCategory};
use mindful::signals::{ImageAnalysis, ImageAnalyzer, VoiceAnalysis, VoiceAnalyzer};
use mindful::web::AppState;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type ErrorFactory = Box<dyn Fn() -> LlmError + Send + Sync>;

/// Scripted stand-in for the chat model.
pub struct FakeModel {
    mood: String,
    themes: String,
    assess_error: Option<ErrorFactory>,
    themes_error: Option<ErrorFactory>,
    pub assess_calls: AtomicUsize,
    pub themes_calls: AtomicUsize,
    pub last_prompt: Mutex<Option<String>>,
}

impl FakeModel {
    pub fn new(mood: &str) -> Self {
        Self {
            mood: mood.to_string(),
            themes: String::new(),
            assess_error: None,
            themes_error: None,
            assess_calls: AtomicUsize::new(0),
            themes_calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn with_themes(mut self, themes: &str) -> Self {
        self.themes = themes.to_string();
        self
    }

    pub fn failing_assess(mut self, error: impl Fn() -> LlmError + Send + Sync + 'static) -> Self {
        self.assess_error = Some(Box::new(error));
        self
    }

    pub fn failing_themes(mut self) -> Self {
        self.themes_error = Some(Box::new(|| LlmError::Timeout { timeout_ms: 1 }));
        self
    }

    pub fn assess_count(&self) -> usize {
        self.assess_calls.load(Ordering::SeqCst)
    }

    pub fn themes_count(&self) -> usize {
        self.themes_calls.load(Ordering::SeqCst)
    }

    pub fn prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl MoodModel for FakeModel {
    async fn assess(&self, text: &str) -> LlmResult<MoodAssessment> {
        self.assess_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(text.to_string());
        if let Some(error) = &self.assess_error {
            return Err(error());
        }
        Ok(MoodAssessment {
            mood_detected: self.mood.clone(),
            empathy_response: "That sounds like a lot.".into(),
            recommendation: "Take a short walk.".into(),
            motivational_quote: "This too shall pass.".into(),
        })
    }

    async fn themes(&self, _text: &str, _mood: &str) -> LlmResult<String> {
        self.themes_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.themes_error {
            return Err(error());
        }
        Ok(self.themes.clone())
    }
}

/// Voice analyzer that always reports the same reading.
pub struct FixedVoice(pub VoiceAnalysis);

impl VoiceAnalyzer for FixedVoice {
    fn analyze(&self, _audio: &[u8]) -> VoiceAnalysis {
        self.0.clone()
    }
}

/// Image analyzer that always reports the same reading.
pub struct FixedImage(pub ImageAnalysis);

impl ImageAnalyzer for FixedImage {
    fn analyze(&self, _image: &[u8]) -> ImageAnalysis {
        self.0.clone()
    }
}

pub fn voice(emotion: &str, confidence: f64) -> VoiceAnalysis {
    VoiceAnalysis {
        emotion: emotion.into(),
        confidence,
        tone: "negative".into(),
        energy: 0.5,
        speech_rate: 0.5,
    }
}

pub fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::bundled().unwrap())
}

/// Analyzer over `model` with a seeded RNG and theme enhancement on.
pub fn test_analyzer(model: Arc<FakeModel>) -> MoodAnalyzer {
    MoodAnalyzer::new(model, catalog(), &AnalysisConfig::default())
        .with_rng(StdRng::seed_from_u64(7))
}

/// App state with its history file inside `dir`.
pub fn test_state(dir: &Path, model: Arc<FakeModel>) -> AppState {
    let history = HistoryStore::load(dir.join("history.json"), 10).unwrap();
    AppState::new(Arc::new(test_analyzer(model)), history)
}

/// A finished result for `mood`, built from the first entry of each happy table.
pub fn sample_result(mood: &str, confidence: Option<f64>) -> AnalysisResult {
    let catalog = catalog();
    AnalysisResult {
        mood_detected: mood.into(),
        empathy_response: "I hear you.".into(),
        recommendation: "Breathe.".into(),
        motivational_quote: "Keep going.".into(),
        music_recommendation: catalog.music(MoodCategory::Happy)[0].clone(),
        book_recommendation: catalog.books(MoodCategory::Happy)[0].clone(),
        place_recommendation: catalog.places(MoodCategory::Happy)[0].clone(),
        confidence,
        sources: None,
        analysis_details: None,
    }
}

pub fn sample_entry(mood: &str, confidence: Option<f64>) -> HistoryEntry {
    HistoryEntry::new(sample_result(mood, confidence))
}
