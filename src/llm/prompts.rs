//! Prompt text sent to the chat model.

/// System prompt for mood assessment. The response must be one JSON object.
pub const MOOD_ANALYSIS_PROMPT: &str = r#"You analyze a person's emotional state from what they write and respond with warmth.

Respond with a single JSON object containing exactly these string fields:
- "mood_detected": a short mood label such as "Happy", "Sad", "Anxious", "Angry", "Calm" or "Excited"
- "empathy_response": an empathetic message addressed to the person
- "recommendation": one helpful, concrete suggestion
- "motivational_quote": a motivational quote with its author

Song examples by mood, for tone:
- For happy mood: "Happy" by Pharrell Williams
- For sad mood: "Someone Like You" by Adele
- For anxious mood: "Breathe Me" by Sia
- For angry mood: "Break Stuff" by Limp Bizkit
- For calm mood: "Weightless" by Marconi Union
- For excited mood: "Uptown Funk" by Mark Ronson ft. Bruno Mars"#;

pub fn mood_analysis_user_prompt(text: &str) -> String {
    format!("Analyze the user's emotional state from the following text input: \"{text}\"")
}

pub fn themes_prompt(text: &str, mood: &str) -> String {
    format!(
        "Based on the user's input: \"{text}\" and detected mood: \"{mood}\", help me understand \
         what specific themes, activities, or preferences they might have.\n\n\
         Extract key themes, interests, or specific needs that could help in recommending:\n\
         1. A book that would be most helpful or appealing\n\
         2. A place or activity that would be most beneficial\n\n\
         Respond with just the key themes/interests separated by commas."
    )
}
