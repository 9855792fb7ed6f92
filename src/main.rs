//! RSM-0 CLI
//!
//! Usage:
//!   rsm0 --symbols "tarot=Death,astrology=Scorpio"   # Single evaluation
//!   rsm0 --request '{"tarot": "Death"}'              # JSON request literal
//!   rsm0 --interactive                               # Interactive session
//!   rsm0 --symbols "tarot=Death" --json              # JSON output

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;

use rsm0::core::{RsmPipeline, StderrSink, TrajectorySentinel, VectorSynthesizer};
use rsm0::types::{AlertLevel, Reading, ResonanceRequest, SymbolLibrary};
use rsm0::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "rsm0",
    version = VERSION,
    about = "RSM-0 - Map symbolic inputs to meaning-energy vectors and track resonance",
    long_about = "RSM-0 is the reference implementation of the RSM ontology.\n\n\
                  It blends symbol vectors from three symbolic systems (tarot,\n\
                  saju, astrology) into a normalized meaning-energy vector,\n\
                  derives a resonance index in [0,1], and tracks the resonance\n\
                  trajectory across evaluations.\n\n\
                  Alert levels:\n  \
                  STABLE   - drift and resonance inside their comfortable bands\n  \
                  WARNING  - drift elevated or resonance sagging\n  \
                  CRITICAL - drift past threshold or resonance collapsed"
)]
struct Args {
    /// Symbols to evaluate, e.g. "tarot=Death,astrology=Scorpio"
    #[arg(short, long)]
    symbols: Option<String>,

    /// Raw JSON request literal, e.g. '{"tarot": "Death"}'
    #[arg(short, long)]
    request: Option<String>,

    /// Interactive mode - read symbol lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Drift magnitude to feed the sentinel (default: single-shot constant)
    #[arg(long)]
    drift: Option<f64>,

    /// Directory holding the symbol stores (default: ./data)
    #[arg(long, default_value = "./data")]
    data_dir: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show the synthesis breakdown
    #[arg(long)]
    verbose: bool,

    /// Emit diagnostic events to stderr
    #[arg(long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    let library = match SymbolLibrary::load(&args.data_dir) {
        Ok(library) => library,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let mut synthesizer = VectorSynthesizer::new(library);
    if args.debug {
        synthesizer = synthesizer.with_sink(Arc::new(StderrSink));
    }
    let mut pipeline = RsmPipeline::with_parts(synthesizer, TrajectorySentinel::new());

    if args.interactive {
        run_interactive(&mut pipeline, &args);
    } else if let Some(ref spec) = args.symbols {
        match parse_symbol_spec(spec) {
            Ok(request) => run_single(&mut pipeline, &request, &args),
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                std::process::exit(1);
            }
        }
    } else if let Some(ref literal) = args.request {
        match parse_request_literal(literal) {
            Ok(request) => run_single(&mut pipeline, &request, &args),
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                std::process::exit(1);
            }
        }
    } else {
        // Default to interactive if no mode specified
        run_interactive(&mut pipeline, &args);
    }
}

/// Parse "system=symbol,system=symbol" into a request
fn parse_symbol_spec(spec: &str) -> Result<ResonanceRequest, String> {
    let mut request = ResonanceRequest::new();
    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| format!("expected system=symbol, got '{}'", part))?;
        request.insert(key.trim(), value.trim());
    }
    Ok(request)
}

/// Parse a JSON object literal into a request
fn parse_request_literal(literal: &str) -> Result<ResonanceRequest, String> {
    let value: serde_json::Value =
        serde_json::from_str(literal).map_err(|e| format!("invalid JSON request: {}", e))?;
    ResonanceRequest::from_json(&value).map_err(|e| e.to_string())
}

/// Run single request evaluation
fn run_single(pipeline: &mut RsmPipeline, request: &ResonanceRequest, args: &Args) {
    let result = if let Some(di2) = args.drift {
        pipeline.process_with_drift(request, di2)
    } else if args.verbose {
        pipeline.process_audited(request)
    } else {
        pipeline.process(request)
    };

    match result {
        Ok(reading) => print_reading(&reading, args),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Run interactive mode: one sentinel across the session, so the trajectory
/// window builds up as readings accumulate
fn run_interactive(pipeline: &mut RsmPipeline, args: &Args) {
    print_header(args.no_color);
    let info = pipeline.system_info();
    println!(
        "Loaded {} tarot cards, {} saju pillars, {} astrology signs.",
        info.tarot_cards, info.saju_pillars, info.astrology_signs
    );
    println!("Enter symbols as system=symbol[,system=symbol...]. Type 'quit' to exit.");
    println!("Example: tarot=Death,astrology=Scorpio");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let prompt = format_prompt(pipeline, args.no_color);
        print!("{}", prompt);
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!(
                "\nSession ended. Readings: {}",
                pipeline.sentinel().window().len()
            );
            break;
        }
        if line.is_empty() {
            continue;
        }

        let request = match parse_symbol_spec(line) {
            Ok(request) => request,
            Err(e) => {
                println!("{} {}", "⚠".yellow(), e);
                continue;
            }
        };

        let result = if args.verbose {
            pipeline.process_audited(&request)
        } else {
            pipeline.process(&request)
        };

        match result {
            Ok(reading) => print_reading(&reading, args),
            Err(e) => println!("{} {}", "⚠".yellow(), e),
        }
    }
}

/// Print header
fn print_header(no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  RSM-0 v{} - Interactive", VERSION);
        println!("========================================");
    } else {
        let title = format!("  RSM-0 v{} - Interactive", VERSION);
        println!("{}", "========================================".bold());
        println!("{}", title.as_str().bold());
        println!("{}", "========================================".bold());
    }
    println!();
}

/// Format interactive prompt with the last alert level
fn format_prompt(pipeline: &RsmPipeline, no_color: bool) -> String {
    match pipeline.sentinel().window().last() {
        Some(sample) => {
            if no_color {
                format!("[{}] > ", sample.alert)
            } else {
                format!(
                    "{}{} [{}]{} > ",
                    sample.alert.color_code(),
                    sample.alert.emoji(),
                    sample.alert,
                    AlertLevel::color_reset()
                )
            }
        }
        None => "> ".to_string(),
    }
}

/// Print a reading in the selected format
fn print_reading(reading: &Reading, args: &Args) {
    if args.json {
        match serde_json::to_string_pretty(reading) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
        }
    } else if args.verbose {
        print_verbose(reading, args.no_color);
    } else if args.no_color {
        println!("{}", reading.to_parseable_string());
    } else {
        println!("{}", reading.to_terminal_string());
        print_alert_message(reading.alert);
    }
}

/// Print alert transition messages
fn print_alert_message(alert: AlertLevel) {
    match alert {
        AlertLevel::Critical => {
            println!("{}", "  ⚠ CRITICAL - resonance collapsed or drift spiked".red());
        }
        AlertLevel::Warning => {
            println!("{}", "  ⚠ drifting - resonance under pressure".yellow());
        }
        AlertLevel::Stable => {}
    }
}

/// Print verbose breakdown of one reading
fn print_verbose(reading: &Reading, no_color: bool) {
    let color = if no_color { "" } else { reading.alert.color_code() };
    let reset = if no_color { "" } else { AlertLevel::color_reset() };

    println!("{}┌─────────────────────────────────────────┐{}", color, reset);
    println!(
        "{}│ vme = {} | ri = {:.4}{}",
        color, reading.vme, reading.resonance_index, reset
    );
    if let Some(ref audit) = reading.audit {
        println!("{}├─────────────────────────────────────────┤{}", color, reset);
        println!("{}│ Contributions:{}", color, reset);
        for c in &audit.contributions {
            println!(
                "{}│   {:<10} {} {} (confidence {:.2}){}",
                color, c.system, c.symbol, c.vector, c.confidence, reset
            );
        }
        println!(
            "{}│ Raw mean: {} | overall confidence {:.2}{}",
            color, audit.raw_mean, audit.overall_confidence, reset
        );
        for warning in &audit.warnings {
            println!("{}│   ⚠ {}{}", color, warning, reset);
        }
    }
    println!("{}├─────────────────────────────────────────┤{}", color, reset);
    println!(
        "{}│ Alert: {} | di2: {:.3} | window: {}{}",
        color, reading.alert, reading.di2, reading.drift.history_length, reset
    );
    let trajectory = &reading.drift.trajectory;
    if trajectory.is_known() {
        println!(
            "{}│ Trend: di2 {:?}, ri {:?} | stability {:?}{}",
            color, trajectory.di2_trend, trajectory.ri_trend, trajectory.stability, reset
        );
    }
    println!("{}└─────────────────────────────────────────┘{}", color, reset);
}
