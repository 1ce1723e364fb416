use clap::Parser;
use jiff::civil::Date;
use jiff::Zoned;
use nextdate::{Rule, SentinelPolicy};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const MAX_DATES: usize = 1000;

#[derive(Parser)]
#[command(name = "nextdate", about = "Next date of a repeating task", version)]
struct Cli {
    /// Repeat rule (e.g., "d 7", "y", "w 1,5", "m 1,-1 1,6")
    rule: Option<String>,

    /// Task date the rule counts from (YYYYMMDD or YYYY-MM-DD). Defaults to --now.
    #[arg(short, long)]
    date: Option<String>,

    /// Reference date (YYYYMMDD or YYYY-MM-DD). Defaults to today.
    #[arg(long, env = "NEXTDATE_NOW")]
    now: Option<String>,

    /// Number of dates to show
    #[arg(short, long, default_value = "1")]
    n: usize,

    /// Resolve -1 / -2 once against the start month instead of per month
    #[arg(long)]
    anchored_sentinels: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Validate the rule without computing
    #[arg(long)]
    check: bool,

    /// Show the parsed rule as JSON
    #[arg(long)]
    parse: bool,

    /// Log evaluation details to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn parse_date(flag: &str, value: &str) -> Date {
    let parsed = nextdate::date::parse_compact(value)
        .ok()
        .or_else(|| value.parse::<Date>().ok());
    match parsed {
        Some(d) => d,
        None => {
            eprintln!("error: invalid --{flag} date '{value}', expected YYYYMMDD or YYYY-MM-DD");
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let input = match cli.rule {
        Some(ref rule) => rule.as_str(),
        None => {
            eprintln!("error: no rule provided");
            process::exit(2);
        }
    };

    let rule = match Rule::parse(input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e.display_rich());
            process::exit(1);
        }
    };
    debug!(input, rule = %rule, "parsed rule");

    if cli.check {
        println!("\u{2713} valid");
        process::exit(0);
    }

    if cli.parse {
        match serde_json::to_string_pretty(&rule) {
            Ok(json) => {
                println!("{json}");
                process::exit(0);
            }
            Err(e) => {
                eprintln!("error: failed to serialize: {e}");
                process::exit(1);
            }
        }
    }

    let now = match cli.now {
        Some(ref s) => parse_date("now", s),
        None => Zoned::now().date(),
    };
    let anchor = match cli.date {
        Some(ref s) => parse_date("date", s),
        None => now,
    };

    let policy = if cli.anchored_sentinels {
        SentinelPolicy::Anchored
    } else {
        SentinelPolicy::PerMonth
    };

    let mut n = cli.n;
    if n > MAX_DATES {
        eprintln!("warning: capped at {MAX_DATES} dates");
        n = MAX_DATES;
    }

    debug!(%now, %anchor, ?policy, n, "evaluating");
    let results = match nextdate::eval::next_n(&rule, now, anchor, n, policy) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e.display_rich());
            process::exit(1);
        }
    };

    let compact: Vec<String> = results
        .iter()
        .map(|d| nextdate::date::format_compact(*d))
        .collect();

    if cli.json {
        match serde_json::to_string(&compact) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize: {e}");
                process::exit(1);
            }
        }
    } else {
        for d in &compact {
            println!("{d}");
        }
    }
}
