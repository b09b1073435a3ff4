use anyhow::Result;

use mindful::config::MindfulConfig;
use mindful::history::HistoryStore;
use mindful::pattern;

/// Display the emotional pattern over the stored history.
pub fn pattern(config: &MindfulConfig) -> Result<()> {
    let store = HistoryStore::load(config.resolved_history_path(), config.history.capacity)?;
    let pattern = pattern::analyze(&store.entries());

    println!("Emotional Pattern");
    println!("{}", "=".repeat(40));
    println!("  Trend:               {}", pattern.trend);
    println!("  Most common mood:    {}", pattern.most_common_mood);
    println!(
        "  Average confidence:  {:.0}%",
        pattern.average_confidence * 100.0
    );
    println!();

    if !pattern.mood_frequency.is_empty() {
        println!("Mood Distribution:");
        for (mood, count) in pattern.top_moods(5) {
            println!("  {:<12} {}", mood, count);
        }
        println!();
    }

    println!("{}", pattern.insight());
    Ok(())
}
