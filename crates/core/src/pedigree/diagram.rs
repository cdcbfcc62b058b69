//! ASCII pedigree diagrams.
//!
//! ```text
//! m-f
//!   |
//!   M f-m
//!       |
//!       F
//! ```
//!
//! `f`/`F`/`m`/`M` are individuals, `-` joins the two individuals either
//! side of it as partners, and `|` below an individual starts the row of
//! that individual's children. Children extend from the column of the `|`
//! to the end of the row below, skipping partners and cells already taken
//! by a family further right.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use log::debug;

use crate::error::{InferenceError, Result};
use crate::inheritance::Phenotype;

use super::Pedigree;

const PARTNER_LINK: char = '-';
const CHILD_LINK: char = '|';

fn diagram_error(row: usize, column: usize, message: impl Into<String>) -> InferenceError {
    InferenceError::Diagram {
        line: row + 1,
        column: column + 1,
        message: message.into(),
    }
}

impl Pedigree {
    /// Parse an ASCII pedigree diagram.
    ///
    /// Individuals receive generation coordinates (row and column indices
    /// counted over the rows and columns that hold individuals) and the
    /// identifier `"<row>.<column>"`.
    ///
    /// # Errors
    /// Returns [`InferenceError::Diagram`] for unknown characters or links
    /// that do not connect individuals, and a pedigree error for links that
    /// break the pedigree's invariants.
    pub fn from_diagram(text: &str) -> Result<Self> {
        let mut grid: Vec<Vec<char>> = text.lines().map(|l| l.chars().collect()).collect();
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut grid {
            row.resize(width, ' ');
        }

        let mut observations = Vec::new();
        let mut partner_links = Vec::new();
        let mut child_links = Vec::new();
        for (r, row) in grid.iter().enumerate() {
            for (c, &ch) in row.iter().enumerate() {
                match ch {
                    'f' | 'F' | 'm' | 'M' => observations.push((r, c, ch)),
                    PARTNER_LINK => partner_links.push((r, c)),
                    CHILD_LINK => child_links.push((r, c)),
                    ch if ch.is_whitespace() => {}
                    other => {
                        return Err(diagram_error(
                            r,
                            c,
                            format!("unexpected character '{}'", other),
                        ))
                    }
                }
            }
        }

        // Generation coordinates compress away rows and columns that only
        // hold links or padding.
        let rows: BTreeSet<usize> = observations.iter().map(|&(r, _, _)| r).collect();
        let columns: BTreeSet<usize> = observations.iter().map(|&(_, c, _)| c).collect();
        let row_index: HashMap<usize, usize> =
            rows.iter().enumerate().map(|(i, &r)| (r, i)).collect();
        let column_index: HashMap<usize, usize> =
            columns.iter().enumerate().map(|(i, &c)| (c, i)).collect();

        let mut pedigree = Pedigree::new();
        let mut cells: HashMap<(usize, usize), usize> = HashMap::new();
        for &(r, c, symbol) in &observations {
            let generation = (row_index[&r], column_index[&c]);
            let id = format!("{}.{}", generation.0, generation.1);
            let index = pedigree.add_individual(&id, Phenotype::from_symbol(symbol)?)?;
            pedigree.set_generation(index, generation);
            cells.insert((r, c), index);
        }

        // Cells that must not be taken as children.
        let mut claimed: HashSet<(usize, usize)> = HashSet::new();

        for &(r, c) in partner_links.iter().rev() {
            let left = c.checked_sub(1).and_then(|lc| cells.get(&(r, lc)));
            let right = cells.get(&(r, c + 1));
            let (&left, &right) = match (left, right) {
                (Some(left), Some(right)) => (left, right),
                _ => {
                    return Err(diagram_error(
                        r,
                        c,
                        "a partner link must join two individuals",
                    ))
                }
            };
            pedigree
                .set_partners(left, right)
                .map_err(|e| diagram_error(r, c, e.to_string()))?;
            claimed.insert((r, c + 1));
        }

        for &(r, c) in child_links.iter().rev() {
            let parent = match r.checked_sub(1).and_then(|pr| cells.get(&(pr, c))) {
                Some(&parent) => parent,
                None => {
                    return Err(diagram_error(
                        r,
                        c,
                        "a child link must sit directly below an individual",
                    ))
                }
            };
            let child_row = r + 1;
            if child_row >= grid.len() {
                return Err(diagram_error(r, c, "a child link needs a row of children below it"));
            }
            for cc in c..width {
                if claimed.contains(&(child_row, cc)) && cc != c {
                    continue;
                }
                claimed.insert((child_row, cc));
                if let Some(&child) = cells.get(&(child_row, cc)) {
                    pedigree
                        .link_parent_child(parent, child)
                        .map_err(|e| diagram_error(r, c, e.to_string()))?;
                }
            }
        }

        pedigree.validate()?;
        debug!(
            "Parsed pedigree diagram: {} individuals, {} roots",
            pedigree.n_individuals(),
            pedigree.roots().len()
        );
        Ok(pedigree)
    }

    /// Read and parse a pedigree diagram file.
    pub fn from_diagram_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_diagram(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(ped: &Pedigree, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&i| ped.individual(i).id().to_string())
            .collect()
    }

    #[test]
    fn test_two_generation_family() {
        let ped = Pedigree::from_diagram("m-f\n  |\n  M f").unwrap();
        assert_eq!(ped.n_individuals(), 4);

        let father = ped.index_of("0.0").unwrap();
        let mother = ped.index_of("0.1").unwrap();
        assert_eq!(ped.individual(father).partner(), Some(mother));
        assert_eq!(ids(&ped, ped.children(mother)), vec!["1.1", "1.2"]);
        assert_eq!(ids(&ped, ped.children(father)), vec!["1.1", "1.2"]);

        let son = ped.index_of("1.1").unwrap();
        assert!(ped.individual(son).affected());
        assert_eq!(ped.parents(son), (Some(mother), Some(father)));
    }

    #[test]
    fn test_partner_of_child_is_not_a_sibling() {
        let text = "\
m-f
  |
  M f-m
      |
      F";
        let ped = Pedigree::from_diagram(text).unwrap();
        let daughter = ped.index_of("1.2").unwrap();
        let son_in_law = ped.index_of("1.3").unwrap();
        let grandchild = ped.index_of("2.3").unwrap();

        assert!(ped.is_root(son_in_law));
        assert_eq!(ids(&ped, ped.siblings(daughter)), vec!["1.1", "1.2"]);
        assert_eq!(ped.parents(grandchild), (Some(daughter), Some(son_in_law)));
    }

    #[test]
    fn test_rightmost_family_claims_first() {
        let text = "\
m-f m-f
  |   |
  f m F m";
        let ped = Pedigree::from_diagram(text).unwrap();
        let left_mother = ped.index_of("0.1").unwrap();
        let right_mother = ped.index_of("0.3").unwrap();
        assert_eq!(ids(&ped, ped.children(left_mother)), vec!["1.1", "1.2"]);
        assert_eq!(ids(&ped, ped.children(right_mother)), vec!["1.3", "1.4"]);
    }

    #[test]
    fn test_generation_coordinates() {
        let ped = Pedigree::from_diagram("m-f\n  |\n  F").unwrap();
        let child = ped.at_generation(1, 1).unwrap();
        assert_eq!(ped.individual(child).generation(), Some((1, 1)));
        assert_eq!(ped.individual(child).id(), "1.1");
    }

    #[test]
    fn test_unexpected_character() {
        let err = Pedigree::from_diagram("m-f\n  x").unwrap_err();
        match err {
            InferenceError::Diagram { line, column, .. } => {
                assert_eq!((line, column), (2, 3));
            }
            other => panic!("expected diagram error, got {:?}", other),
        }
    }

    #[test]
    fn test_dangling_partner_link() {
        assert!(matches!(
            Pedigree::from_diagram("m- f"),
            Err(InferenceError::Diagram { .. })
        ));
    }

    #[test]
    fn test_child_link_without_parent() {
        assert!(matches!(
            Pedigree::from_diagram("m-f\n |\n f"),
            Err(InferenceError::Diagram { .. })
        ));
    }

    #[test]
    fn test_child_link_on_last_row() {
        assert!(matches!(
            Pedigree::from_diagram("f\n|"),
            Err(InferenceError::Diagram { .. })
        ));
    }

    #[test]
    fn test_same_gender_partners() {
        assert!(matches!(
            Pedigree::from_diagram("f-F"),
            Err(InferenceError::Diagram { .. })
        ));
    }
}
