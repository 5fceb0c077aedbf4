//! Text output formatter

use soplint_core::LintReport;

pub fn output_text(report: &LintReport) {
    for (path, findings) in report.iter() {
        if findings.is_empty() {
            continue;
        }

        println!("\n{}:", path);
        for message in &findings.errors {
            println!("  error: {}", message);
        }
        for message in &findings.warnings {
            println!("  warning: {}", message);
        }
    }

    println!();
    println!(
        "Checked {} files, found {} errors and {} warnings",
        report.len(),
        report.error_count(),
        report.warning_count()
    );
}
