use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use fs_err::File;
use indexmap::IndexSet;
use itertools::Itertools;
use log::{debug, warn};

use crate::schema::{MoleculeId, Row};

pub const OUTPUT_SUFFIX: &str = "_results.csv";

/// Reads the first column of every record after the header.
pub fn read_identifiers(path: &Path) -> anyhow::Result<Vec<MoleculeId>> {
    parse_identifiers(File::open(path)?).with_context(|| format!("While reading {path:?}"))
}

pub fn parse_identifiers(reader: impl Read) -> anyhow::Result<Vec<MoleculeId>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let mut ids = vec![];
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        match record.get(0).map(str::trim) {
            Some(id) if !id.is_empty() => ids.push(id.to_owned().into()),
            _ => warn!("Record #{} has no identifier; skipping", i + 1),
        }
    }
    Ok(ids)
}

/// Creates `output_dir` if needed and returns the output path inside it, so that a
/// bad output location fails the run before any page is loaded.
pub fn prepare_output(input: &Path, output_dir: &Path) -> anyhow::Result<PathBuf> {
    let output = output_path(input, output_dir)?;
    fs_err::create_dir_all(output_dir)
        .with_context(|| format!("Cannot use {output_dir:?} as the output directory"))?;
    Ok(output)
}

/// `<input file name>_results.csv` inside `output_dir`.
pub fn output_path(input: &Path, output_dir: &Path) -> anyhow::Result<PathBuf> {
    let name = input
        .file_name()
        .with_context(|| format!("{input:?} does not name a file"))?;
    let mut name = name.to_os_string();
    name.push(OUTPUT_SUFFIX);
    Ok(output_dir.join(name))
}

/// Rows laid out under a common header: `molecule_id`, then every vendor in the
/// order it was first seen.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ResultTable {
    columns: Vec<String>,
    records: Vec<Vec<String>>,
}
impl ResultTable {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a Row> + Clone) -> Self {
        let columns = rows
            .clone()
            .into_iter()
            .flat_map(|row| row.keys())
            .map(str::to_owned)
            .collect::<IndexSet<_>>();
        let records: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| row.get(column).unwrap_or_default())
                    .collect()
            })
            .collect();
        Self {
            columns: if columns.is_empty() {
                vec![Row::ID_COLUMN.to_owned()]
            } else {
                columns.into_iter().collect()
            },
            records,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }

    /// Drops records equal to an earlier one.
    pub fn deduplicated(self) -> Self {
        let before = self.records.len();
        let records = self.records.into_iter().unique().collect_vec();
        debug!("Removed {} duplicate row(s)", before - records.len());
        Self {
            columns: self.columns,
            records,
        }
    }

    pub fn write(&self, writer: impl Write) -> anyhow::Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.columns)?;
        for record in &self.records {
            writer.write_record(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_csv(&self, path: &Path) -> anyhow::Result<()> {
        self.write(File::create(path)?)
            .with_context(|| format!("While writing {path:?}"))
    }
}
