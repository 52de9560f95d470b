use colored::*;
use datapact_core::ValidationResult;
use serde_json::json;

pub fn print_validation_result(result: &ValidationResult, format: &str) {
    match format {
        "json" => print_json_report(result),
        _ => print_text_report(result),
    }
}

fn print_text_report(result: &ValidationResult) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if result.passed() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    let failures = result.failures();
    if !failures.is_empty() {
        println!("\n{}", "Failed checks:".red().bold());
        for (i, outcome) in failures.iter().enumerate() {
            println!(
                "  {}. {}",
                i + 1,
                format!("{}: {}", outcome.check, outcome.message).red()
            );
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Total checks: {}", result.total_checks());
    println!("  Passed:       {}", result.passed_checks());
    println!("  Failed:       {}", result.failed_checks());
    println!("{}", "═".repeat(60));
}

fn print_json_report(result: &ValidationResult) {
    let output = json!({
        "passed": result.passed(),
        "type_outcomes": result.type_outcomes(),
        "constraint_outcomes": result.constraint_outcomes(),
        "summary": {
            "total_checks": result.total_checks(),
            "passed_checks": result.passed_checks(),
            "failed_checks": result.failed_checks(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

#[allow(dead_code)]
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
