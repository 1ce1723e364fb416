//! Basic nextdate API walkthrough: parse, evaluate, iterate, display.

use jiff::civil::Date;
use nextdate::{Completion, Rule, SentinelPolicy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse a repeat rule
    let rule: Rule = "m 1,-1".parse()?;
    println!("Parsed: {rule}");

    // Compute the next date
    let now: Date = "2024-04-30".parse()?;
    let next = rule.next_after(now, now)?;
    println!("Next date after {now}: {next}");

    // Sentinels under the other policy
    let anchored = rule.next_after_with(now, now, SentinelPolicy::Anchored)?;
    println!("With anchored sentinels: {anchored}");

    // Compute the next 5 dates
    println!("\nNext 5 dates:");
    for date in rule.next_n(now, now, 5)? {
        println!("  {date}");
    }

    // The storage format used by schedulers
    let next = nextdate::next_date_compact("20250101", "20240229", "y")?;
    println!("\nLeap day anniversary: {next}");

    // Completing a repeating task moves it forward
    match nextdate::complete_task(now, "w 1,5", now)? {
        Completion::Delete => println!("task deleted"),
        Completion::Reschedule(date) => println!("task moved to {date}"),
    }

    // Errors point at the offending token
    if let Err(e) = Rule::parse("w 1,9") {
        println!("\n{}", e.display_rich());
    }

    // Display roundtrips through parsing
    let roundtripped: Rule = rule.to_string().parse()?;
    assert_eq!(rule, roundtripped);
    println!("\nRoundtrip: {roundtripped}");

    Ok(())
}
