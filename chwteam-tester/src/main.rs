mod logic;
mod util;

use anyhow::{Context, Result, bail, ensure};
use chwteam_game::{GenerationConfig, find_gadget, gadget_catalog};
use clap::Parser;
use colored::Colorize;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use logic::{
    DraftAggregate, DraftRecord, DraftStrategy, SweepPlan, aggregate_records,
    resolve_seed_inputs, run_sweep,
};
use util::{expand_keys, split_csv};

#[derive(Debug, Parser)]
#[command(name = "chwteam-tester", version)]
#[command(about = "Seeded QA and balance sweeps for the CHW team builder")]
struct Args {
    /// Draft strategies to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    strategies: String,

    /// List all available draft strategies and exit
    #[arg(long)]
    list_strategies: bool,

    /// Gadget ids to equip (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    gadgets: String,

    /// Seeds to run (comma-separated, decimal or 0x hex)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per strategy, gadget and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON generation config overriding the default tables
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_strategies(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let plan = build_plan(&args)?;
    info!(
        "sweeping {} strategies x {} gadgets x {} seeds x {} iterations",
        plan.strategies.len(),
        plan.gadget_ids.len(),
        plan.seeds.len(),
        plan.iterations
    );

    let records = run_sweep(&plan, args.verbose)?;
    let aggregates = aggregate_records(&records);

    write_reports(&args, &records, &aggregates, start_time)?;

    if records.iter().any(|r| !r.passed()) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_strategies(args: &Args) -> Result<bool> {
    if !args.list_strategies {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available strategies:")?;
    for strategy in DraftStrategy::ALL {
        writeln!(
            output_target.writer(),
            "  {:15} - {}",
            strategy.key(),
            strategy.description()
        )?;
    }
    writeln!(output_target.writer(), "Available gadgets:")?;
    for gadget in gadget_catalog() {
        writeln!(
            output_target.writer(),
            "  {:15} - {} ({})",
            gadget.id,
            gadget.name,
            gadget.cost
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🩺 CHW Team Draft Tester".bright_cyan().bold());
    println!("{}", "========================".cyan());
}

fn expand_strategies(list: &str) -> Result<Vec<DraftStrategy>> {
    let known: Vec<&str> = DraftStrategy::ALL.iter().map(|s| s.key()).collect();
    let mut strategies = Vec::new();
    for key in expand_keys(list, &known) {
        let strategy: DraftStrategy = key.parse()?;
        if !strategies.contains(&strategy) {
            strategies.push(strategy);
        }
    }
    ensure!(!strategies.is_empty(), "No strategies selected");
    Ok(strategies)
}

fn expand_gadgets(list: &str) -> Result<Vec<String>> {
    let known: Vec<&str> = gadget_catalog().iter().map(|g| g.id.as_str()).collect();
    let mut gadgets: Vec<String> = Vec::new();
    for id in expand_keys(list, &known) {
        if find_gadget(&id).is_none() {
            bail!("Unknown gadget: {id}");
        }
        if !gadgets.contains(&id) {
            gadgets.push(id);
        }
    }
    ensure!(!gadgets.is_empty(), "No gadgets selected");
    Ok(gadgets)
}

fn load_config(path: Option<&Path>) -> Result<GenerationConfig> {
    let Some(path) = path else {
        return Ok(GenerationConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    GenerationConfig::from_json(&text)
        .with_context(|| format!("invalid generation config {}", path.display()))
}

fn build_plan(args: &Args) -> Result<SweepPlan> {
    ensure!(args.iterations > 0, "--iterations must be at least 1");
    Ok(SweepPlan {
        strategies: expand_strategies(&args.strategies)?,
        gadget_ids: expand_gadgets(&args.gadgets)?,
        seeds: resolve_seed_inputs(&split_csv(&args.seeds))?,
        iterations: args.iterations,
        config: load_config(args.config.as_deref())?,
    })
}

fn write_reports(
    args: &Args,
    records: &[DraftRecord],
    aggregates: &[DraftAggregate],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, records, aggregates)?,
        "markdown" => {
            logic::reports::generate_markdown_report(&mut output_target, records, aggregates)?;
        }
        "csv" => logic::reports::generate_csv_report(&mut output_target, records)?,
        _ => {
            let duration = start_time.elapsed();
            if records.is_empty() {
                writeln!(&mut output_target, "No drafts executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    records,
                    aggregates,
                    duration,
                )?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
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
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
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

    fn base_args() -> Args {
        Args {
            strategies: "all".to_string(),
            list_strategies: false,
            gadgets: "all".to_string(),
            seeds: "1337".to_string(),
            iterations: 1,
            report: "json".to_string(),
            verbose: false,
            output: None,
            config: None,
        }
    }

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("chwteam-{}-{name}", std::process::id()))
    }

    fn sweep(args: &Args) -> (Vec<DraftRecord>, Vec<DraftAggregate>) {
        let plan = build_plan(args).unwrap();
        let records = run_sweep(&plan, false).unwrap();
        let aggregates = aggregate_records(&records);
        (records, aggregates)
    }

    #[test]
    fn expands_all_strategies_keyword() {
        let expanded = expand_strategies("random,all").unwrap();
        assert_eq!(expanded.len(), DraftStrategy::ALL.len());
        assert_eq!(expanded[0], DraftStrategy::Random);
    }

    #[test]
    fn expand_strategies_rejects_unknown() {
        assert!(expand_strategies("greedy,chaos").is_err());
        assert!(expand_strategies(" , ").is_err());
        assert_eq!(
            expand_strategies("budget,budget").unwrap(),
            vec![DraftStrategy::Budget]
        );
    }

    #[test]
    fn expand_gadgets_validates_catalog() {
        assert_eq!(expand_gadgets("all").unwrap(), vec!["g1", "g2", "g3"]);
        assert_eq!(expand_gadgets("g3,g1").unwrap(), vec!["g3", "g1"]);
        let err = expand_gadgets("g4").unwrap_err();
        assert!(err.to_string().contains("g4"));
    }

    #[test]
    fn build_plan_rejects_zero_iterations() {
        let args = Args {
            iterations: 0,
            ..base_args()
        };
        assert!(build_plan(&args).is_err());
    }

    #[test]
    fn load_config_reads_and_validates_json() {
        let path = temp_file("config.json");
        std::fs::write(&path, r#"{ "cost": { "min": 3000, "max": 3500, "step": 50 } }"#).unwrap();
        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.cost.step, 50);
        assert_eq!(config.pool_size(), 20);

        std::fs::write(&path, r#"{ "cost": { "step": 0 } }"#).unwrap();
        let err = load_config(Some(path.as_path())).unwrap_err();
        assert!(format!("{err:#}").contains("invalid generation config"));

        assert_eq!(load_config(None).unwrap(), GenerationConfig::default());
    }

    #[test]
    fn custom_config_flows_into_sweep() {
        let path = temp_file("sweep-config.json");
        std::fs::write(&path, r#"{ "cost": { "min": 3000, "max": 3500, "step": 50 } }"#).unwrap();
        let args = Args {
            strategies: "budget".to_string(),
            gadgets: "g1".to_string(),
            config: Some(path),
            ..base_args()
        };
        let (records, _) = sweep(&args);
        assert_eq!(records.len(), 1);
        assert!(records[0].passed(), "{:?}", records[0].violations);
        assert!(records[0].total_personnel_cost >= 5 * 3_000);
    }

    #[test]
    fn maybe_list_strategies_writes_output() {
        let path = temp_file("strategies.txt");
        let args = Args {
            list_strategies: true,
            output: Some(path.clone()),
            ..base_args()
        };
        assert!(maybe_list_strategies(&args).unwrap());
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("Available strategies"));
        assert!(content.contains("communicator"));
        assert!(content.contains("Mobile Health Hub"));
    }

    #[test]
    fn maybe_list_strategies_returns_false_when_disabled() {
        assert!(!maybe_list_strategies(&base_args()).unwrap());
    }

    #[test]
    fn write_reports_emits_each_format() {
        let args = Args {
            strategies: "greedy,random".to_string(),
            gadgets: "g2".to_string(),
            iterations: 2,
            ..base_args()
        };
        let (records, aggregates) = sweep(&args);

        for (format, needle) in [
            ("json", "\"aggregates\""),
            ("markdown", "# CHW Team Draft Sweep"),
            ("csv", "strategy,gadget,seed"),
            ("console", "Total time"),
        ] {
            let path = temp_file(&format!("report.{format}"));
            let args = Args {
                report: format.to_string(),
                output: Some(path.clone()),
                ..base_args()
            };
            write_reports(&args, &records, &aggregates, Instant::now()).unwrap();
            let content = std::fs::read_to_string(path).unwrap();
            assert!(content.contains(needle), "{format} report missing {needle}");
        }
    }

    #[test]
    fn write_reports_console_without_records() {
        let path = temp_file("empty.txt");
        let args = Args {
            report: "console".to_string(),
            output: Some(path.clone()),
            ..base_args()
        };
        write_reports(&args, &[], &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("No drafts executed"));
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
    }
}
