//! Line-oriented renderer for non-interactive runs

use colored::Colorize;
use scenarioflow_engine::{Phase, Renderer, ScenarioView, StepState};

/// Prints new transcript lines as they arrive
pub struct PlainRenderer {
    printed: usize,
    verbose: bool,
}

impl PlainRenderer {
    pub fn new(verbose: bool) -> Self {
        Self {
            printed: 0,
            verbose,
        }
    }
}

impl Renderer for PlainRenderer {
    fn render(&mut self, view: &ScenarioView) -> scenarioflow_engine::Result<()> {
        if self.printed == 0 && !view.command_lines.is_empty() {
            println!("{} {}", "▶".cyan(), view.title.bold());
        }

        // Prompts and outputs alternate, starting with a prompt
        for (index, line) in view.command_lines.iter().enumerate().skip(self.printed) {
            if index % 2 == 0 {
                println!(
                    "{} {}",
                    format!("[{}/{}]", index / 2 + 1, view.total_blocks).dimmed(),
                    line.cyan()
                );
            } else if view.phase == Phase::Aborted && index + 1 == view.command_lines.len() {
                eprintln!("{}", line.trim_end().red());
            } else if !line.trim().is_empty() {
                println!("{}", line.trim_end());
            }
        }
        self.printed = view.command_lines.len();
        Ok(())
    }

    fn finish(&mut self, view: &ScenarioView) -> scenarioflow_engine::Result<()> {
        println!();
        for step in &view.steps {
            let marker = match step.state {
                StepState::Succeeded => "✓".green(),
                StepState::Failed => "✗".red(),
                StepState::Running => "…".yellow(),
                StepState::Pending => "·".dimmed(),
            };
            if self.verbose {
                println!(
                    "{} {} ({}/{})",
                    marker, step.name, step.completed_blocks, step.blocks
                );
            } else {
                println!("{} {}", marker, step.name);
            }
        }
        if let Some(group) = &view.resource_group {
            println!("Resource group: {}", group.cyan());
        }
        if let Some(error) = &view.error {
            eprintln!();
            eprintln!("{}", "✗ Scenario failed".red().bold());
            eprintln!("{}", error);
        }
        Ok(())
    }
}
