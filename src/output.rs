use crate::error::AppResult;
use crate::types::{Cell, ElectionTable};
use serde::Serialize;
use std::io::Write;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

/// Write the table (and the totals row, if given) as CSV to any writer.
pub fn write_table<W: Write>(
    writer: W,
    table: &ElectionTable,
    totals_row: Option<&[Cell]>,
) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.columns())?;
    for row in table.rows().iter().map(Vec::as_slice).chain(totals_row) {
        wtr.write_record(row.iter().map(|c| c.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv(path: &str, table: &ElectionTable, totals_row: Option<&[Cell]>) -> AppResult<()> {
    let file = std::fs::File::create(path)?;
    write_table(file, table, totals_row)
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> AppResult<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut file, value)?;
    file.flush()?;
    Ok(())
}

/// Markdown rendering of the first `max_rows` rows, followed by the totals
/// row when given. `None` when there is nothing to show.
pub fn render_table(
    table: &ElectionTable,
    totals_row: Option<&[Cell]>,
    max_rows: usize,
) -> Option<String> {
    if table.is_empty() && totals_row.is_none() {
        return None;
    }
    let mut builder = Builder::default();
    builder.push_record(table.columns().iter().cloned());
    for row in table.rows().iter().take(max_rows) {
        builder.push_record(row.iter().map(|c| c.to_string()));
    }
    if let Some(totals) = totals_row {
        builder.push_record(totals.iter().map(|c| c.to_string()));
    }
    Some(builder.build().with(Style::markdown()).to_string())
}

pub fn preview_table(table: &ElectionTable, totals_row: Option<&[Cell]>, max_rows: usize) {
    match render_table(table, totals_row, max_rows) {
        Some(s) => println!("{}\n", s),
        None => println!("(no rows)\n"),
    }
    if table.len() > max_rows {
        println!("({} more rows not shown)\n", table.len() - max_rows);
    }
}

/// Print a heading and a markdown table of fixed-schema rows.
pub fn print_rows<T: Tabled>(heading: &str, rows: &[T]) {
    println!("{}\n", heading);
    if rows.is_empty() {
        println!("(no rows)\n");
        return;
    }
    println!("{}\n", Table::new(rows).with(Style::markdown()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ElectionTable {
        ElectionTable::new(["District", "Seats", "A", "A_seats"])
            .with_row(vec!["North".into(), 2.0.into(), Cell::Missing, 2.0.into()])
    }

    #[test]
    fn csv_includes_totals_row() {
        let t = table();
        let totals: Vec<Cell> = vec!["Total".into(), 2.0.into(), 0.0.into(), 2.0.into()];
        let mut buf = Vec::new();
        write_table(&mut buf, &t, Some(totals.as_slice())).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "District,Seats,A,A_seats\nNorth,2,,2\nTotal,2,0,2\n");
    }

    #[test]
    fn csv_without_totals_row() {
        let mut buf = Vec::new();
        write_table(&mut buf, &table(), None).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 2);
    }

    #[test]
    fn markdown_render_limits_rows() {
        let t = table().with_row(vec!["South".into(), 1.0.into(), 5.0.into(), 1.0.into()]);
        let s = render_table(&t, None, 1).unwrap();
        assert!(s.contains("North"));
        assert!(!s.contains("South"));
        assert!(render_table(&ElectionTable::new(["D"]), None, 5).is_none());
    }
}
