//! Console output for scenario runs

use colored::Colorize;

use super::{Outcome, ScenarioResult, Summary};

/// Print the banner for a group of scenarios
pub fn print_header(title: &str, target: &str) {
    println!("\n{} {}", "Running:".blue().bold(), title.white().bold());
    println!("  {}", target.dimmed());
}

/// Print one verdict line
pub fn print_result(result: &ScenarioResult) {
    let elapsed = format!("({} ms)", result.elapsed.as_millis());
    match &result.outcome {
        Outcome::Passed => println!(
            "  {} {} {}",
            "✓".green(),
            result.name,
            elapsed.dimmed()
        ),
        Outcome::Skipped { reason } => println!(
            "  {} {} {}",
            "○".yellow(),
            result.name,
            format!("skipped: {}", reason).dimmed()
        ),
        Outcome::Failed { error } => {
            println!("  {} {} {}", "✗".red(), result.name, elapsed.dimmed());
            for line in error.lines() {
                println!("      {}", line.red());
            }
        }
    }
}

/// Print totals and return them
pub fn print_summary(results: &[ScenarioResult]) -> Summary {
    let summary = Summary::of(results);
    let counts = format!(
        "{} scenarios: {} passed, {} skipped, {} failed",
        summary.total(),
        summary.passed,
        summary.skipped,
        summary.failed
    );

    if summary.success() {
        println!("\n{} {}\n", "✓".green().bold(), counts.green().bold());
    } else {
        println!("\n{} {}\n", "✗".red().bold(), counts.red().bold());
    }

    summary
}
