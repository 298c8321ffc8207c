use colored::Colorize;
use scenarioflow_core::Strategy;
use std::path::Path;

pub fn handle(file: &Path) -> anyhow::Result<()> {
    println!("{}", "Validating scenario...".blue());
    println!("File: {}", file.display().to_string().cyan());

    let scenario = match scenarioflow_core::load_scenario(file) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ Invalid scenario".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", "✓ Scenario is valid".green().bold());
    println!();
    println!("Title: {}", scenario.title.bold());
    if let Some(environment) = &scenario.environment {
        println!("Environment: {}", environment);
    }
    if !scenario.variables.is_empty() {
        let mut names: Vec<_> = scenario.variables.keys().collect();
        names.sort();
        println!(
            "Variables: {}",
            names
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    println!(
        "Steps: {} ({} code blocks)",
        scenario.steps.len(),
        scenario.code_block_count()
    );
    for (number, step) in scenario.steps.iter().enumerate() {
        println!("  {}. {}", number + 1, step.name.cyan());
        for block in &step.code_blocks {
            let check = match block.expectation().map(|e| e.strategy()) {
                Some(Strategy::Pattern) => "pattern".yellow(),
                Some(Strategy::Structural) => "json".yellow(),
                Some(Strategy::Lexical) => "text".yellow(),
                None => "unchecked".dimmed(),
            };
            let first_line = block.content.lines().next().unwrap_or_default();
            println!("     - {} [{}]", first_line, check);
        }
    }

    Ok(())
}
