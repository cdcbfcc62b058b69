use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::{InferenceError, Result};
use crate::inheritance::Gender;

use super::Pedigree;

/// One row of a tabular pedigree: individual, phenotype symbol, and
/// optional father and mother identifiers.
pub type PedigreeRecord = (String, char, Option<String>, Option<String>);

impl Pedigree {
    /// Build a pedigree from (id, phenotype symbol, father, mother) records.
    ///
    /// Parents may be listed before or after their children. Every listed
    /// (mother, father) pair becomes a couple before any child is linked.
    ///
    /// # Errors
    /// Returns an error for duplicate or unknown IDs, invalid symbols,
    /// parents of the wrong gender, an individual listed with two
    /// different partners, or a record naming a single parent who has a
    /// partner elsewhere in the table.
    pub fn from_records(records: &[PedigreeRecord]) -> Result<Self> {
        let mut ped = Self::new();

        // First pass: register all individuals so parent lookups can
        // succeed regardless of input order.
        let indices = records
            .iter()
            .map(|(id, symbol, _, _)| ped.add_observation(id, *symbol))
            .collect::<Result<Vec<usize>>>()?;

        let mut links = Vec::with_capacity(records.len());
        for (&child, (id, _, father, mother)) in indices.iter().zip(records) {
            let father = ped.resolve_parent(id, father.as_deref(), Gender::Male)?;
            let mother = ped.resolve_parent(id, mother.as_deref(), Gender::Female)?;
            links.push((child, mother, father));
        }

        // Second pass: couples.
        for &(_, mother, father) in &links {
            if let (Some(mother), Some(father)) = (mother, father) {
                ped.set_partners(mother, father)?;
            }
        }

        // Third pass: children. A single named parent must be unpartnered,
        // otherwise linking would attribute the child to the partner too.
        for (&(child, mother, father), (id, _, _, _)) in links.iter().zip(records) {
            let parent = match (mother, father) {
                (Some(mother), Some(_)) => mother,
                (Some(parent), None) | (None, Some(parent)) => {
                    if let Some(partner) = ped.individual(parent).partner() {
                        return Err(InferenceError::Pedigree(format!(
                            "'{}' lists only one parent, '{}', who is partnered with '{}'; \
                             both parents must be given",
                            id,
                            ped.individual(parent).id(),
                            ped.individual(partner).id()
                        )));
                    }
                    parent
                }
                (None, None) => continue,
            };
            ped.link_parent_child(parent, child)?;
        }

        ped.validate()?;
        Ok(ped)
    }

    fn resolve_parent(
        &self,
        child: &str,
        parent: Option<&str>,
        gender: Gender,
    ) -> Result<Option<usize>> {
        let Some(parent) = parent else {
            return Ok(None);
        };
        let index = self.index_of(parent).ok_or_else(|| {
            InferenceError::Pedigree(format!(
                "'{}' references unknown parent '{}'",
                child, parent
            ))
        })?;
        if self.individual(index).gender() != gender {
            return Err(InferenceError::Pedigree(format!(
                "'{}' is listed as a {} parent of '{}' but is {}",
                parent,
                gender,
                child,
                self.individual(index).gender()
            )));
        }
        Ok(Some(index))
    }

    /// Read a pedigree from a CSV file.
    ///
    /// Expected columns (header required, case-insensitive): `id`,
    /// `phenotype` (one of `f`, `F`, `m`, `M`), `father` (or `sire`) and
    /// `mother` (or `dam`). Unknown parents are coded as `"0"`, `""`, or
    /// `"NA"`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, columns are missing, or
    /// the records do not form a valid pedigree.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    /// Read a CSV pedigree from any reader. See [`Pedigree::from_csv`].
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.to_lowercase())
            .collect();

        let id_col = find_column(&headers, &["id"])?;
        let phenotype_col = find_column(&headers, &["phenotype"])?;
        let father_col = find_column(&headers, &["father", "sire"])?;
        let mother_col = find_column(&headers, &["mother", "dam"])?;

        let mut records = Vec::new();

        for result in reader.records() {
            let record = result?;

            let id = field(&record, id_col, "id")?.to_string();
            let phenotype = field(&record, phenotype_col, "phenotype")?;
            let mut symbols = phenotype.chars();
            let symbol = match (symbols.next(), symbols.next()) {
                (Some(symbol), None) => symbol,
                _ => {
                    return Err(InferenceError::Pedigree(format!(
                        "Invalid phenotype '{}' for '{}'",
                        phenotype, id
                    )))
                }
            };
            let father = parse_parent(field(&record, father_col, "father")?);
            let mother = parse_parent(field(&record, mother_col, "mother")?);

            records.push((id, symbol, father, mother));
        }

        debug!("Read {} pedigree records from CSV", records.len());
        Self::from_records(&records)
    }
}

/// Position of the first header matching any of `names`.
fn find_column(headers: &[String], names: &[&str]) -> Result<usize> {
    headers
        .iter()
        .position(|h| names.contains(&h.as_str()))
        .ok_or_else(|| InferenceError::Pedigree(format!("CSV missing '{}' column", names[0])))
}

fn field<'r>(record: &'r csv::StringRecord, col: usize, name: &str) -> Result<&'r str> {
    record
        .get(col)
        .ok_or_else(|| InferenceError::Pedigree(format!("Missing {} field in row", name)))
}

/// Parse a parent string, returning `None` for unknown parents.
///
/// Unknown parents are coded as `"0"`, `""`, `"NA"`, or `"na"`.
fn parse_parent(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "0" || trimmed.eq_ignore_ascii_case("na") {
        None
    } else {
        Some(trimmed.to_string())
    }
}
