//! Run summary printed after polling

use colored::*;
use simrun_core::domain::run::RunSnapshot;
use simrun_core::domain::verdict::Verdict;

/// Print the final snapshot and verdict
pub fn print_summary(snapshot: &RunSnapshot, verdict: &Verdict) {
    println!();
    println!("{}", format!("Simulation run {}", snapshot.run_id).bold());

    let status = snapshot.status_text.as_str();
    let status = if snapshot.status.is_success() {
        status.green()
    } else {
        status.red()
    };
    println!("  {}  {}", "Status:".bold(), status);

    for line in summary_lines(snapshot) {
        println!("  {}", line);
    }

    if !snapshot.summary.is_empty() {
        println!();
        println!("{}", snapshot.summary.dimmed());
    }

    println!();
    if verdict.is_success() {
        println!("{}", verdict.message().green().bold());
    } else {
        println!("{}", verdict.message().red().bold());
    }
}

fn summary_lines(snapshot: &RunSnapshot) -> Vec<String> {
    vec![
        format!("Score:       {:.2}%", snapshot.score()),
        format!("Total:       {}", snapshot.total_tests),
        format!("Passed:      {}", snapshot.passed_tests),
        format!("Failed:      {}", snapshot.failed_tests),
        format!("Completed:   {}", snapshot.completed_tests),
        format!("Incompleted: {}", snapshot.incompleted_tests),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::snapshot;

    #[test]
    fn test_summary_lines() {
        let lines = summary_lines(&snapshot("completed", 7, 8));
        assert_eq!(lines[0], "Score:       87.50%");
        assert_eq!(lines[1], "Total:       8");
        assert_eq!(lines[2], "Passed:      7");
        assert_eq!(lines[3], "Failed:      1");
    }
}
