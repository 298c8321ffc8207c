use colored::Colorize;
use regex::Regex;

pub fn handle(
    actual: &str,
    expected: &str,
    similarity: f64,
    pattern: Option<&str>,
    language: &str,
) -> anyhow::Result<()> {
    let pattern = pattern.map(Regex::new).transpose()?;

    let comparison =
        scenarioflow_core::compare(actual, expected, similarity, pattern.as_ref(), language)?;

    println!(
        "{} ({:?}, score {:.4})",
        "✓ Output matches".green().bold(),
        comparison.strategy,
        comparison.score
    );
    Ok(())
}
