#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rust_xlsxwriter::Workbook;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const HEADER: [&str; 6] = [
    "Name",
    "Month",
    "Year",
    "Contract Name",
    "Project Manager",
    "Totals",
];

pub fn tcv() -> Command {
    cargo_bin_cmd!("timecard-vault")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timecard-vault.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// One spreadsheet cell of a fixture.
#[derive(Clone, Copy)]
pub enum Fx<'a> {
    Text(&'a str),
    Num(f64),
    Blank,
}

/// A timecard row: name, month, year, contract, manager, totals.
pub fn card<'a>(
    name: Fx<'a>,
    month: Fx<'a>,
    year: Fx<'a>,
    contract: Fx<'a>,
    manager: Fx<'a>,
    totals: Fx<'a>,
) -> Vec<Fx<'a>> {
    vec![name, month, year, contract, manager, totals]
}

/// Write a workbook with the standard timecard header on every sheet.
/// Returns the path (under the temp dir, any old file removed).
pub fn write_workbook(file_name: &str, sheets: &[(&str, Vec<Vec<Fx<'_>>>)]) -> PathBuf {
    let path = env::temp_dir().join(file_name);
    fs::remove_file(&path).ok();

    let mut workbook = Workbook::new();
    for (sheet_name, rows) in sheets {
        let ws = workbook.add_worksheet();
        ws.set_name(*sheet_name).expect("sheet name");

        for (c, h) in HEADER.iter().enumerate() {
            ws.write_string(0, c as u16, *h).expect("header");
        }

        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = ((r + 1) as u32, c as u16);
                match cell {
                    Fx::Text(s) => {
                        ws.write_string(r, c, *s).expect("text cell");
                    }
                    Fx::Num(n) => {
                        ws.write_number(r, c, *n).expect("number cell");
                    }
                    Fx::Blank => {}
                }
            }
        }
    }

    workbook.save(&path).expect("save workbook");
    path
}

/// March and April sheets for Dana, plus an example sheet.
pub fn standard_workbook(file_name: &str) -> PathBuf {
    use Fx::*;
    write_workbook(
        file_name,
        &[
            (
                "Example",
                vec![card(Text("Sample"), Text("Jan"), Num(2020.0), Text("DEMO"), Blank, Num(1.0))],
            ),
            (
                "March",
                vec![
                    card(Text("Dana"), Text("March"), Num(2024.0), Text("ALPHA"), Text("Lee"), Num(10.0)),
                    card(Blank, Blank, Blank, Text("BETA"), Text("Kim"), Num(5.5)),
                    card(Blank, Blank, Blank, Text("ALPHA"), Blank, Num(2.0)),
                ],
            ),
            (
                "April",
                vec![
                    card(Text("Dana"), Text("April"), Num(2024.0), Text("ALPHA"), Text("Lee"), Num(4.0)),
                    card(Blank, Blank, Blank, Text("BETA"), Text("Kim"), Num(3.0)),
                ],
            ),
        ],
    )
}

/// Initialize a test DB through the CLI.
pub fn init_db(db_path: &str) {
    tcv()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}
