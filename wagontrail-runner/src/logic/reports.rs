use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::simulation::{RunRecord, StrategySummary};

#[derive(Serialize)]
struct JsonReport<'a> {
    runs: &'a [RunRecord],
    summaries: &'a [StrategySummary],
}

pub fn generate_console_report<W: Write>(
    out: &mut W,
    records: &[RunRecord],
    summaries: &[StrategySummary],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Journey Results".bright_cyan().bold())?;
    writeln!(out, "{}", "==================".cyan())?;
    writeln!(out, "Journeys played: {}", records.len())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for summary in summaries {
        let rate = summary.arrival_rate * 100.0;
        let rate_text = format!("{rate:.1}%");
        let rate_text = if rate >= 50.0 {
            rate_text.green()
        } else {
            rate_text.red()
        };
        writeln!(out, "{}", summary.strategy.bold())?;
        writeln!(
            out,
            "   Reached Oregon: {}/{} ({rate_text})",
            summary.arrivals, summary.runs
        )?;
        writeln!(
            out,
            "   Died: {}   Timed out: {}",
            summary.deaths.to_string().red(),
            summary.timeouts.to_string().yellow()
        )?;
        writeln!(
            out,
            "   Mean days: {:.1}   Mean survivors: {:.2}",
            summary.mean_days, summary.mean_survivors
        )?;
        writeln!(
            out,
            "   Mean score: {:.0}   Best: {}",
            summary.mean_score, summary.best_score
        )?;
        writeln!(out)?;
    }

    writeln!(out, "{}", "🧭 Individual Journeys".bright_yellow().bold())?;
    writeln!(out, "{}", "======================".yellow())?;
    for record in records {
        let status = match record.outcome_label() {
            "reached" => "✅ REACHED".green(),
            "death" => "💀 DIED".red(),
            other => other.to_uppercase().yellow(),
        };
        writeln!(
            out,
            "{status} [{} seed {}] day {} at mile {}, {} alive, score {}",
            record.strategy,
            record.seed,
            record.days,
            record.miles,
            record.survivors,
            record
                .score
                .map_or_else(|| "-".to_string(), |s| s.to_string())
        )?;
    }
    Ok(())
}

pub fn generate_json_report<W: Write>(
    out: &mut W,
    records: &[RunRecord],
    summaries: &[StrategySummary],
) -> Result<()> {
    let report = JsonReport {
        runs: records,
        summaries,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report<W: Write>(
    out: &mut W,
    records: &[RunRecord],
    summaries: &[StrategySummary],
) -> Result<()> {
    writeln!(out, "# Wagontrail Journey Results\n")?;
    writeln!(out, "## Strategies\n")?;
    writeln!(
        out,
        "| Strategy | Runs | Reached | Died | Timed out | Mean days | Mean score |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|")?;
    for s in summaries {
        writeln!(
            out,
            "| {} | {} | {} ({:.1}%) | {} | {} | {:.1} | {:.0} |",
            s.strategy,
            s.runs,
            s.arrivals,
            s.arrival_rate * 100.0,
            s.deaths,
            s.timeouts,
            s.mean_days,
            s.mean_score
        )?;
    }

    writeln!(out, "\n## Journeys\n")?;
    writeln!(
        out,
        "| Strategy | Seed | Outcome | Days | Miles | Survivors | Score | Rating |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|---|")?;
    for r in records {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} | {} | {} |",
            r.strategy,
            r.seed,
            r.outcome_label(),
            r.days,
            r.miles,
            r.survivors,
            r.score.map_or_else(|| "-".to_string(), |s| s.to_string()),
            r.rating.as_deref().unwrap_or("-")
        )?;
    }
    Ok(())
}

pub fn generate_csv_report<W: Write>(out: &mut W, records: &[RunRecord]) -> Result<()> {
    writeln!(
        out,
        "strategy,seed,profession,outcome,days,miles,survivors,landmarks,crossings,hunts,deaths,score,ticks,rng_draws"
    )?;
    for r in records {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            r.strategy,
            r.seed,
            r.profession,
            r.outcome_label(),
            r.days,
            r.miles,
            r.survivors,
            r.landmarks,
            r.crossings,
            r.hunts,
            r.deaths,
            r.score.unwrap_or(0),
            r.ticks,
            r.rng_draws
        )?;
    }
    Ok(())
}
