use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use super::simulation::{DraftAggregate, DraftRecord};

#[derive(Serialize)]
struct JsonReport<'a> {
    runs: usize,
    failures: usize,
    aggregates: &'a [DraftAggregate],
    records: &'a [DraftRecord],
}

fn failed_count(records: &[DraftRecord]) -> usize {
    records.iter().filter(|r| !r.passed()).count()
}

#[allow(clippy::cast_precision_loss)]
fn pass_rate(records: &[DraftRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let passed = records.len() - failed_count(records);
    (passed as f64 / records.len() as f64) * 100.0
}

fn top_synergies(aggregate: &DraftAggregate, limit: usize) -> String {
    let mut counts: Vec<(&String, &usize)> = aggregate.synergy_counts.iter().collect();
    counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    let parts: Vec<String> = counts
        .into_iter()
        .take(limit)
        .map(|(name, _)| format!("{name} {:.0}%", aggregate.synergy_rate(name) * 100.0))
        .collect();
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}

pub fn generate_console_report<W: Write>(
    out: &mut W,
    records: &[DraftRecord],
    aggregates: &[DraftAggregate],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Draft Sweep Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;

    let failed = failed_count(records);
    writeln!(out, "Total drafts: {}", records.len())?;
    writeln!(out, "Passed: {}", (records.len() - failed).to_string().green())?;
    writeln!(out, "Failed: {}", failed.to_string().red())?;
    writeln!(out, "Pass rate: {:.1}%", pass_rate(records))?;
    writeln!(out, "Sweep time: {total_duration:?}")?;
    writeln!(out)?;

    for aggregate in aggregates {
        let status = if aggregate.failures == 0 {
            "✅".green()
        } else {
            "❌".red()
        };
        writeln!(
            out,
            "{} {} + {}",
            status,
            aggregate.strategy.label().bold(),
            aggregate.gadget_id
        )?;
        writeln!(
            out,
            "   Score: mean {:.1} ± {:.1} (min {} max {})",
            aggregate.mean_score, aggregate.std_score, aggregate.min_score, aggregate.max_score
        )?;
        writeln!(
            out,
            "   Grand total: {:.0} ({:.2} pts per 10k)",
            aggregate.mean_grand_total, aggregate.score_per_10k
        )?;
        writeln!(out, "   Apprentices per team: {:.2}", aggregate.mean_apprentices)?;
        writeln!(out, "   Synergies: {}", top_synergies(aggregate, 3))?;
        writeln!(out)?;
    }

    let failures: Vec<&DraftRecord> = records.iter().filter(|r| !r.passed()).collect();
    if !failures.is_empty() {
        writeln!(out, "{}", "🚨 Invariant Failures".bright_red().bold())?;
        for record in failures {
            for violation in &record.violations {
                writeln!(
                    out,
                    "   • [{} + {} seed {} iter {}] {}",
                    record.strategy.label(),
                    record.gadget_id,
                    record.seed,
                    record.iteration,
                    violation.red()
                )?;
            }
        }
        writeln!(out)?;
    }

    if let Some(best) = aggregates
        .iter()
        .max_by(|a, b| a.score_per_10k.total_cmp(&b.score_per_10k))
    {
        writeln!(out, "{}", "⚡ Best Value".bright_yellow().bold())?;
        writeln!(out, "{}", "============".yellow())?;
        writeln!(
            out,
            "{} + {} ({:.2} pts per 10k)",
            best.strategy.label().green(),
            best.gadget_id,
            best.score_per_10k
        )?;
    }
    Ok(())
}

pub fn generate_json_report<W: Write>(
    out: &mut W,
    records: &[DraftRecord],
    aggregates: &[DraftAggregate],
) -> Result<()> {
    let report = JsonReport {
        runs: records.len(),
        failures: failed_count(records),
        aggregates,
        records,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report<W: Write>(
    out: &mut W,
    records: &[DraftRecord],
    aggregates: &[DraftAggregate],
) -> Result<()> {
    writeln!(out, "# CHW Team Draft Sweep\n")?;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total drafts**: {}", records.len())?;
    writeln!(out, "- **Failed**: {}", failed_count(records))?;
    writeln!(out, "- **Pass rate**: {:.1}%\n", pass_rate(records))?;

    writeln!(out, "## Strategies\n")?;
    writeln!(
        out,
        "| Strategy | Gadget | Runs | Mean score | Std | Min | Max | Mean grand total | Pts per 10k | Top synergies |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|---|---|---|")?;
    for aggregate in aggregates {
        writeln!(
            out,
            "| {} | {} | {} | {:.1} | {:.1} | {} | {} | {:.0} | {:.2} | {} |",
            aggregate.strategy.label(),
            aggregate.gadget_id,
            aggregate.runs,
            aggregate.mean_score,
            aggregate.std_score,
            aggregate.min_score,
            aggregate.max_score,
            aggregate.mean_grand_total,
            aggregate.score_per_10k,
            top_synergies(aggregate, 3)
        )?;
    }

    let failures: Vec<&DraftRecord> = records.iter().filter(|r| !r.passed()).collect();
    if !failures.is_empty() {
        writeln!(out, "\n## Failures\n")?;
        for record in failures {
            for violation in &record.violations {
                writeln!(
                    out,
                    "- {} + {} seed {} iteration {}: {violation}",
                    record.strategy.label(),
                    record.gadget_id,
                    record.seed,
                    record.iteration
                )?;
            }
        }
    }
    Ok(())
}

pub fn generate_csv_report<W: Write>(out: &mut W, records: &[DraftRecord]) -> Result<()> {
    writeln!(
        out,
        "strategy,gadget,seed,iteration,score,personnel_cost,grand_total,apprentices,leader,synergies,violations"
    )?;
    for record in records {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{}",
            record.strategy.key(),
            record.gadget_id,
            record.seed,
            record.iteration,
            record.efficiency_score,
            record.total_personnel_cost,
            record.grand_total_cost,
            record.apprentices,
            record.leader.as_deref().unwrap_or(""),
            record.synergies.join(";"),
            record.violations.len()
        )?;
    }
    Ok(())
}
