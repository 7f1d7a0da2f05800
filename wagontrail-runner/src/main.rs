mod logic;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use logic::{RunOptions, Strategy, resolve_seed_inputs, run_batch, split_csv, summarize};
use wagontrail_game::JourneyConfig;

#[derive(Debug, Parser)]
#[command(name = "wagontrail-runner", version = "0.1.0")]
#[command(about = "Headless autopilot that plays Wagontrail journeys and reports how they end")]
struct Args {
    /// Strategies to play (comma-separated, or `all`)
    #[arg(long, alias = "strategy", default_value = "balanced")]
    strategies: String,

    /// List all available strategies and exit
    #[arg(long)]
    list_strategies: bool,

    /// Seeds to run (comma-separated; ranges like 1..10 and `random` allowed)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Consecutive seeds played per listed seed
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Journey configuration JSON; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds of game time fed per tick
    #[arg(long, default_value_t = 0.5)]
    dt: f32,

    /// Tick ceiling per journey
    #[arg(long, default_value_t = 200_000)]
    max_ticks: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_strategies {
        let mut out = OutputTarget::new(args.output.clone())?;
        writeln!(&mut out, "Available strategies:")?;
        for strategy in Strategy::ALL {
            writeln!(&mut out, "  {:<10} {}", strategy.key(), strategy.describe())?;
        }
        out.flush_inner()?;
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let strategies = parse_strategies(&args.strategies)?;
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let cfg = load_config(args.config.as_deref())?;
    if !(args.dt > 0.0 && args.dt.is_finite()) {
        bail!("--dt must be a positive number of seconds (got {})", args.dt);
    }
    if args.iterations == 0 {
        bail!("--iterations must be at least 1");
    }
    let opts = RunOptions {
        dt: args.dt,
        max_ticks: args.max_ticks,
    };

    if args.verbose {
        eprintln!(
            "Playing {} seed(s) x {} iteration(s) with {}",
            seeds.len(),
            args.iterations,
            strategies
                .iter()
                .map(|s| s.key())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let records = run_batch(&seeds, &strategies, args.iterations, &cfg, &opts)?;
    if args.verbose {
        for record in &records {
            eprintln!(
                "  {} seed {}: {} on day {} ({:?})",
                record.strategy,
                record.seed,
                record.outcome_label(),
                record.days,
                record.duration
            );
        }
    }
    let summaries = summarize(&records);
    write_reports(&args, &records, &summaries, start_time)
}

fn announce_banner() {
    eprintln!("{}", "🐂 Wagontrail Autopilot".bright_cyan().bold());
    eprintln!("{}", "=".repeat(40).cyan());
}

fn parse_strategies(raw: &str) -> Result<Vec<Strategy>> {
    let mut strategies = Vec::new();
    for token in split_csv(raw) {
        if token.eq_ignore_ascii_case("all") {
            return Ok(Strategy::ALL.to_vec());
        }
        let Some(strategy) = Strategy::from_key(&token) else {
            bail!("unknown strategy {token:?} (try --list-strategies)");
        };
        if !strategies.contains(&strategy) {
            strategies.push(strategy);
        }
    }
    if strategies.is_empty() {
        bail!("no strategies given");
    }
    Ok(strategies)
}

fn load_config(path: Option<&Path>) -> Result<JourneyConfig> {
    let Some(path) = path else {
        return Ok(JourneyConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    JourneyConfig::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn write_reports(
    args: &Args,
    records: &[logic::RunRecord],
    summaries: &[logic::StrategySummary],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, records, summaries)?,
        "markdown" => {
            logic::reports::generate_markdown_report(&mut output_target, records, summaries)?;
        }
        "csv" => logic::reports::generate_csv_report(&mut output_target, records)?,
        _ => {
            logic::reports::generate_console_report(
                &mut output_target,
                records,
                summaries,
                start_time.elapsed(),
            )?;
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        self.writer().flush()
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_parse_dedupe_and_expand() {
        assert_eq!(
            parse_strategies("reckless, cautious,reckless").unwrap(),
            vec![Strategy::Reckless, Strategy::Cautious]
        );
        assert_eq!(parse_strategies("all").unwrap(), Strategy::ALL.to_vec());
        assert!(parse_strategies("timid").is_err());
        assert!(parse_strategies(" , ").is_err());
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), JourneyConfig::default());
        assert!(load_config(Some(Path::new("/definitely/not/here.json"))).is_err());
    }

    #[test]
    fn output_target_writes_files() {
        let path = std::env::temp_dir().join(format!("wagontrail-out-{}", std::process::id()));
        let mut target = OutputTarget::new(Some(path.clone())).unwrap();
        writeln!(&mut target, "hello").unwrap();
        target.flush_inner().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
        let _ = std::fs::remove_file(path);
    }
}
