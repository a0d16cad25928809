// Command-line front end.
//
// Loads a CSV of districts, runs the allocator and reports the result:
// - per-party seat lines and a party summary table on stdout,
// - a markdown preview of the annotated table with its totals row,
// - optional CSV/JSON exports.
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dhondt::error::AppResult;
use dhondt::{loader, output, reports, simulate_election, util, AllocationConfig};

#[derive(Parser, Debug)]
#[command(name = "dhondt", about = "Allocate seats with the D'Hondt method")]
struct Opts {
    /// Input CSV, one row per district.
    input: PathBuf,
    /// Column holding the district name.
    #[arg(long)]
    district_col: String,
    /// Column holding the number of seats in each district.
    #[arg(long)]
    seats_col: String,
    /// Party vote column; repeat or comma-separate. Order breaks ties.
    #[arg(long = "party", required = true, value_delimiter = ',')]
    parties: Vec<String>,
    /// Minimum nationwide vote share (0 to 1) a party needs to win seats.
    #[arg(long, default_value_t = 0.0)]
    threshold: f64,
    /// Write the annotated table here as CSV.
    #[arg(long)]
    output_csv: Option<String>,
    /// Write a JSON summary here.
    #[arg(long)]
    output_json: Option<String>,
    /// Rows of the annotated table to preview.
    #[arg(long, default_value_t = 10)]
    preview_rows: usize,
    /// Leave the totals row out of the CSV export.
    #[arg(long)]
    no_totals_row: bool,
}

fn run(opts: &Opts) -> AppResult<()> {
    let (table, load_report) = loader::load_table(&opts.input)?;
    info!(
        path = %opts.input.display(),
        rows = load_report.total_rows,
        "loaded input"
    );
    println!(
        "Processing dataset... ({} districts loaded, {} empty cells)",
        util::format_int(load_report.total_rows),
        util::format_int(load_report.missing_cells)
    );
    if load_report.ragged_rows > 0 {
        println!(
            "Note: {} rows had a different number of fields than the header.",
            util::format_int(load_report.ragged_rows)
        );
    }
    println!();

    let config = AllocationConfig::new(&opts.district_col, &opts.seats_col, &opts.parties)
        .with_threshold(opts.threshold);
    let result = simulate_election(&table, &config)?;

    for (party, seats) in result.totals.iter() {
        println!("{} seats: {}", party, util::format_int(seats));
    }
    println!();

    output::print_rows(
        &format!("Party Results (threshold {})", util::format_share(config.threshold)),
        &reports::generate_party_table(&result),
    );

    println!("Seats by District\n");
    output::preview_table(
        &result.annotated_table,
        Some(result.totals_row.as_slice()),
        opts.preview_rows,
    );

    if let Some(path) = &opts.output_csv {
        let totals = (!opts.no_totals_row).then_some(result.totals_row.as_slice());
        output::write_csv(path, &result.annotated_table, totals)?;
        println!("(Full table exported to {})", path);
    }
    if let Some(path) = &opts.output_json {
        output::write_json(path, &reports::generate_summary(&result, &config))?;
        println!("(Summary exported to {})", path);
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dhondt=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    if let Err(e) = run(&opts) {
        error!(error = %e, "run failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
