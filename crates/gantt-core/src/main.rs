//! `gantt-chart` command line: print slot grids and render charts from JSON

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use gantt_calendar::{CalendarGrid, FixedClock, ViewMode};
use gantt_core::{render_chart, render_header, ChartScope, GanttChart, GanttConfig, JsonFileService};
use gantt_model::{ProjectId, ResourceId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn view_arg() -> Arg {
    Arg::new("view")
        .long("view")
        .value_parser(value_parser!(ViewMode))
        .help("View option value, e.g. 1/14, 7/10, 30/12, 90/4")
}

fn date_arg() -> Arg {
    Arg::new("date")
        .long("date")
        .value_parser(value_parser!(NaiveDate))
        .help("Date shown in the window and treated as today (YYYY-MM-DD)")
}

fn init_logging(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Command::new("gantt-chart")
        .version(gantt_core::VERSION)
        .about("Resource allocation Gantt chart")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("slots")
                .about("Print the slot grid for a view")
                .arg(view_arg())
                .arg(date_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render resources from a JSON document")
                .arg(
                    Arg::new("data")
                        .long("data")
                        .required(true)
                        .help("Path to a chart response JSON document"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to a TOML configuration file"),
                )
                .arg(view_arg())
                .arg(date_arg())
                .arg(
                    Arg::new("resource")
                        .long("resource")
                        .conflicts_with("project")
                        .help("Show a single resource"),
                )
                .arg(
                    Arg::new("project")
                        .long("project")
                        .help("Show a single project"),
                ),
        );

    let matches = cli.get_matches();
    init_logging(matches.get_flag("json-logs"));

    match matches.subcommand() {
        Some(("slots", args)) => slots(args),
        Some(("render", args)) => render(args).await,
        _ => Ok(()),
    }
}

fn today(args: &ArgMatches) -> NaiveDate {
    args.get_one::<NaiveDate>("date")
        .copied()
        .unwrap_or_else(|| chrono::Local::now().date_naive())
}

fn slots(args: &ArgMatches) -> Result<()> {
    let mode = args.get_one::<ViewMode>("view").cloned().unwrap_or_default();
    let today = today(args);
    let grid = CalendarGrid::generate(today, &mode, today)?;

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&grid)?);
        return Ok(());
    }

    println!("{}  ({})", grid.date_range().title(), mode);
    println!("{}", render_header(&grid));
    println!();
    for (index, slot) in grid.slots().iter().enumerate() {
        println!(
            "{:>3}  {} .. {}  {:<8}{}{}",
            index,
            slot.start,
            slot.end,
            slot.label,
            slot.day_name.as_deref().unwrap_or(""),
            if slot.is_today { "  today" } else { "" }
        );
    }
    Ok(())
}

async fn render(args: &ArgMatches) -> Result<()> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => GanttConfig::load(path).with_context(|| format!("loading {path}"))?,
        None => GanttConfig::default(),
    };
    if let Some(mode) = args.get_one::<ViewMode>("view") {
        config = config.with_default_view(mode.clone());
    }
    if let Some(id) = args.get_one::<String>("resource") {
        config = config.with_scope(ChartScope::Resource(ResourceId::new(id.as_str())));
    }
    if let Some(id) = args.get_one::<String>("project") {
        config = config.with_scope(ChartScope::Project(ProjectId::new(id.as_str())));
    }

    let data = args
        .get_one::<String>("data")
        .context("missing --data")?;
    let service = JsonFileService::new(data);

    let mut chart = GanttChart::new(config, FixedClock(today(args)))?;
    chart.refresh(&service).await?;

    println!("{}", render_chart(&chart));
    Ok(())
}
