//! dash-runner: headless runner for the Federal vs Non-Federal sales dashboard.
//!
//! Usage:
//!   dash-runner --seed 12345 --records 500 --variant federal --sector Federal
//!   dash-runner --variant lob --year 2021 --lob Enterprise,Client --json
//!   dash-runner --config data/domains/line_of_business.json --export sales.csv
//!   dash-runner --seed 12345 --ipc-mode

use anyhow::{bail, Result};
use salesdash_core::{
    chart::DashboardView,
    config::DomainConfig,
    export,
    filter::{DashboardSelection, SectorChoice},
    session::{DashboardSession, DEFAULT_RECORD_COUNT},
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetView,
    SetSelection {
        #[serde(default)]
        sector: SectorChoice,
        #[serde(default)]
        year: Option<i32>,
        #[serde(default)]
        lines_of_business: Option<Vec<String>>,
    },
    Export {
        path: String,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct ExportAck<'a> {
    exported: usize,
    path: &'a str,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let records = parse_arg(&args, "--records", DEFAULT_RECORD_COUNT);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json = args.iter().any(|a| a == "--json");
    let variant = str_arg(&args, "--variant").unwrap_or("federal");
    let config_path = str_arg(&args, "--config");
    let export_path = str_arg(&args, "--export");

    let domains = match config_path {
        Some(path) => DomainConfig::load(path)?,
        None => match variant {
            "federal" => DomainConfig::federal_sales(),
            "lob" | "line_of_business" => DomainConfig::line_of_business(),
            other => bail!("unknown variant '{other}' (expected federal or lob)"),
        },
    };

    let selection = DashboardSelection {
        sector: match str_arg(&args, "--sector") {
            Some(s) => s.parse()?,
            None => SectorChoice::Both,
        },
        year: str_arg(&args, "--year").map(str::parse).transpose()?,
        lines_of_business: str_arg(&args, "--lob")
            .map(|s| s.split(',').map(|v| v.trim().to_string()).collect()),
    };

    let today = chrono::Local::now().date_naive();
    let session_id = format!("session-{seed}-{}", unix_secs());
    let mut session = DashboardSession::new(session_id, seed, records, domains, today)?;
    session.set_selection(selection)?;

    if ipc_mode {
        return run_ipc_loop(&mut session);
    }

    if !json {
        println!("dash-runner: Federal vs Non-Federal Sales Analysis");
        println!("  seed:      {seed}");
        println!("  records:   {records}");
        println!("  domain:    {}", session.domains().name);
        println!("  today:     {}", session.today());
        print_selection(session.selection());
        println!();
    }

    if let Some(path) = export_path {
        let exported = export::write_csv_file(session.records()?, path)?;
        if !json {
            println!("  exported {exported} records to {path}");
            println!();
        }
    }

    let view = session.view()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_summary(&view);
    }
    Ok(())
}

fn run_ipc_loop(session: &mut DashboardSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Unparseable IPC command: {e}");
                write_error(&mut stdout, e)?;
                continue;
            }
        };

        let reply = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetView => session.view().map(|v| serde_json::to_value(&v)),
            IpcCommand::SetSelection { sector, year, lines_of_business } => session
                .set_selection(DashboardSelection { sector, year, lines_of_business })
                .and_then(|_| session.view())
                .map(|v| serde_json::to_value(&v)),
            IpcCommand::Export { path } => session
                .records()
                .and_then(|records| export::write_csv_file(records, &path))
                .map(|exported| serde_json::to_value(ExportAck { exported, path: &path })),
        };

        match reply {
            Ok(value) => writeln!(stdout, "{}", value?)?,
            Err(e) => write_error(&mut stdout, e)?,
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(out: &mut impl Write, e: impl std::fmt::Display) -> Result<()> {
    let err_json = serde_json::json!({ "error": e.to_string() });
    writeln!(out, "{}", err_json)?;
    out.flush()?;
    Ok(())
}

fn print_selection(selection: &DashboardSelection) {
    let sector = match selection.sector.sector() {
        Some(s) => s.label(),
        None => "Both",
    };
    let year = selection.year.map_or_else(|| "all".to_string(), |y| y.to_string());
    let lob = selection
        .lines_of_business
        .as_ref()
        .map_or_else(|| "all".to_string(), |l| l.join(","));
    println!("  sector:    {sector}");
    println!("  year:      {year}");
    println!("  lob:       {lob}");
}

fn print_summary(view: &DashboardView) {
    let h = &view.headline;
    println!("=== HEADLINE ===");
    println!("  records:           {}", h.record_count);
    println!("  total sales:       ${:.2}", h.total_sales);
    println!("  federal sales:     ${:.2}", h.federal_total);
    println!("  non-federal sales: ${:.2}", h.non_federal_total);

    for series in [&view.sales_by_category, &view.sales_over_time] {
        println!();
        println!("=== {} ===", series.title.to_uppercase());
        if series.points.is_empty() {
            println!("  (no matching sales)");
        }
        for p in &series.points {
            println!("  {:<28} ${:.2}", p.category, p.metric);
        }
    }

    println!();
    println!("=== TOP STATES ===");
    let mut states = view.sales_by_state.points.clone();
    states.sort_by(|a, b| b.metric.total_cmp(&a.metric));
    for p in states.iter().take(5) {
        println!("  {:<4} ${:.2}", p.category, p.metric);
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn unix_secs() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
