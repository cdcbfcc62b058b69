use log::debug;

use crate::error::Result;
use crate::inheritance::Mode;
use crate::pedigree::Pedigree;

use super::genotype_distribution;

/// Modes of inheritance under which every individual in the pedigree has
/// a well-defined genotype distribution, in [`Mode::ALL`] order.
///
/// # Errors
/// Only errors unrelated to Mendelian consistency (for example a malformed
/// pedigree) are returned; inconsistency just excludes the mode.
pub fn compatible_modes(pedigree: &Pedigree) -> Result<Vec<Mode>> {
    let mut compatible = Vec::new();
    'modes: for mode in Mode::ALL {
        for index in 0..pedigree.n_individuals() {
            match genotype_distribution(pedigree, mode, index) {
                Ok(_) => {}
                Err(e) if e.is_non_mendelian() => {
                    debug!("{} ruled out: {}", mode, e);
                    continue 'modes;
                }
                Err(e) => return Err(e),
            }
        }
        compatible.push(mode);
    }
    Ok(compatible)
}
