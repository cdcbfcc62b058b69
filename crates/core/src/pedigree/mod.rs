mod diagram;
mod table;

pub use table::PedigreeRecord;

use std::collections::HashMap;

use crate::error::{InferenceError, Result};
use crate::inheritance::{Gender, Phenotype};

/// One person in a pedigree.
///
/// Relations are indices into the owning [`Pedigree`]. They can only be
/// changed through [`Pedigree::set_partners`] and
/// [`Pedigree::link_parent_child`], which keep both sides of every link in
/// step.
#[derive(Debug, Clone)]
pub struct Individual {
    /// Identifier, unique within the pedigree.
    id: String,
    /// Observed gender and affected status.
    phenotype: Phenotype,
    /// (row, column) generation coordinate, for display only.
    generation: Option<(usize, usize)>,
    mother: Option<usize>,
    father: Option<usize>,
    partner: Option<usize>,
    /// Children in the order they were linked.
    children: Vec<usize>,
}

impl Individual {
    fn new(id: &str, phenotype: Phenotype) -> Self {
        Self {
            id: id.to_string(),
            phenotype,
            generation: None,
            mother: None,
            father: None,
            partner: None,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phenotype(&self) -> Phenotype {
        self.phenotype
    }

    pub fn gender(&self) -> Gender {
        self.phenotype.gender
    }

    pub fn affected(&self) -> bool {
        self.phenotype.affected
    }

    pub fn generation(&self) -> Option<(usize, usize)> {
        self.generation
    }

    pub fn mother(&self) -> Option<usize> {
        self.mother
    }

    pub fn father(&self) -> Option<usize> {
        self.father
    }

    pub fn partner(&self) -> Option<usize> {
        self.partner
    }

    pub fn children(&self) -> &[usize] {
        &self.children
    }
}

/// A family tree of observed individuals.
///
/// Individuals are stored contiguously and referred to by their 0-based
/// index. The inference engine only reads a pedigree; all mutation goes
/// through the two relationship entry points so that partner links stay
/// mutual and a child's mother and father are always set together.
#[derive(Debug, Clone)]
pub struct Pedigree {
    individuals: Vec<Individual>,
    /// Mapping from identifier to 0-based index.
    id_to_index: HashMap<String, usize>,
}

impl Pedigree {
    /// Create an empty pedigree.
    pub fn new() -> Self {
        Self {
            individuals: Vec::new(),
            id_to_index: HashMap::new(),
        }
    }

    /// Number of individuals in the pedigree.
    pub fn n_individuals(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Look up the 0-based index of an individual by identifier.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.id_to_index.get(id).copied()
    }

    /// The individual at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn individual(&self, index: usize) -> &Individual {
        &self.individuals[index]
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    /// Find the individual drawn at a generation coordinate.
    pub fn at_generation(&self, row: usize, column: usize) -> Option<usize> {
        self.individuals
            .iter()
            .position(|ind| ind.generation == Some((row, column)))
    }

    /// Human-readable label used in diagnostics, e.g. `2.1 (F)`.
    pub fn label(&self, index: usize) -> String {
        let ind = &self.individuals[index];
        format!("{} ({})", ind.id, ind.phenotype)
    }

    /// Add an individual with no relations.
    ///
    /// # Errors
    /// Returns an error if the identifier already exists.
    pub fn add_individual(&mut self, id: &str, phenotype: Phenotype) -> Result<usize> {
        if self.id_to_index.contains_key(id) {
            return Err(InferenceError::Pedigree(format!(
                "Duplicate individual ID: '{}'",
                id
            )));
        }
        let index = self.individuals.len();
        self.individuals.push(Individual::new(id, phenotype));
        self.id_to_index.insert(id.to_string(), index);
        Ok(index)
    }

    /// Add an individual from its pedigree symbol (`f`, `F`, `m`, `M`).
    pub fn add_observation(&mut self, id: &str, symbol: char) -> Result<usize> {
        self.add_individual(id, Phenotype::from_symbol(symbol)?)
    }

    pub(crate) fn set_generation(&mut self, index: usize, generation: (usize, usize)) {
        self.individuals[index].generation = Some(generation);
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.individuals.len() {
            return Err(InferenceError::Pedigree(format!(
                "Individual index {} is out of range ({} individuals)",
                index,
                self.individuals.len()
            )));
        }
        Ok(())
    }

    /// Make `a` and `b` partners of each other.
    ///
    /// Children already linked to only one of the two are given the other
    /// as their second parent.
    ///
    /// # Errors
    /// Returns an error if the two have the same gender or either already
    /// has a different partner.
    pub fn set_partners(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_index(a)?;
        self.check_index(b)?;
        if self.individuals[a].partner == Some(b) {
            return Ok(());
        }
        if self.individuals[a].gender() == self.individuals[b].gender() {
            return Err(InferenceError::Pedigree(format!(
                "Partners '{}' and '{}' must be of opposite gender",
                self.individuals[a].id, self.individuals[b].id
            )));
        }
        if self.is_ancestor(a, b) || self.is_ancestor(b, a) {
            return Err(InferenceError::Pedigree(format!(
                "'{}' and '{}' are related by descent and can not be partners",
                self.individuals[a].id, self.individuals[b].id
            )));
        }
        for &(this, other) in &[(a, b), (b, a)] {
            if let Some(existing) = self.individuals[this].partner {
                return Err(InferenceError::Pedigree(format!(
                    "'{}' is already partnered with '{}', can not partner with '{}'",
                    self.individuals[this].id,
                    self.individuals[existing].id,
                    self.individuals[other].id
                )));
            }
        }

        self.individuals[a].partner = Some(b);
        self.individuals[b].partner = Some(a);

        let (mother, father) = self.mother_father(a);
        let mut children = self.individuals[a].children.clone();
        for &child in &self.individuals[b].children {
            if !children.contains(&child) {
                children.push(child);
            }
        }
        for &child in &children {
            self.individuals[child].mother = mother;
            self.individuals[child].father = father;
        }
        self.individuals[a].children = children.clone();
        self.individuals[b].children = children;
        Ok(())
    }

    /// Register `child` as a child of `parent` and of the parent's partner.
    ///
    /// The child's mother and father are both set from the parent's couple
    /// (see [`Pedigree::mother_father`]); an unpartnered parent leaves the
    /// other slot empty.
    ///
    /// # Errors
    /// Returns an error if the child already has a different pair of parents
    /// or if the link would make an individual its own ancestor.
    pub fn link_parent_child(&mut self, parent: usize, child: usize) -> Result<()> {
        self.check_index(parent)?;
        self.check_index(child)?;
        let (mother, father) = self.mother_father(parent);

        if mother == Some(child) || father == Some(child) {
            return Err(InferenceError::Pedigree(format!(
                "'{}' can not be a child of their own couple",
                self.individuals[child].id
            )));
        }

        let current = (self.individuals[child].mother, self.individuals[child].father);
        if current == (mother, father) {
            return Ok(());
        }
        if current != (None, None) {
            return Err(InferenceError::Pedigree(format!(
                "'{}' already has parents; can not also be a child of '{}'",
                self.individuals[child].id, self.individuals[parent].id
            )));
        }

        let couple = [mother, father];
        if couple.iter().flatten().any(|&p| self.is_ancestor(child, p)) {
            return Err(InferenceError::Pedigree(format!(
                "Linking '{}' as a child of '{}' would create a cycle",
                self.individuals[child].id, self.individuals[parent].id
            )));
        }

        self.individuals[child].mother = mother;
        self.individuals[child].father = father;
        for p in couple.into_iter().flatten() {
            if !self.individuals[p].children.contains(&child) {
                self.individuals[p].children.push(child);
            }
        }
        Ok(())
    }

    /// The gender-ordered couple `(mother, father)` that `index` belongs
    /// to. The individual occupies the slot matching their gender and their
    /// partner (if any) the other.
    pub fn mother_father(&self, index: usize) -> (Option<usize>, Option<usize>) {
        let ind = &self.individuals[index];
        match ind.gender() {
            Gender::Female => (Some(index), ind.partner),
            Gender::Male => (ind.partner, Some(index)),
        }
    }

    /// The individual's own parents.
    pub fn parents(&self, index: usize) -> (Option<usize>, Option<usize>) {
        let ind = &self.individuals[index];
        (ind.mother, ind.father)
    }

    pub fn children(&self, index: usize) -> &[usize] {
        &self.individuals[index].children
    }

    /// All children of the individual's parents, the individual included.
    /// Empty for a root.
    pub fn siblings(&self, index: usize) -> &[usize] {
        let ind = &self.individuals[index];
        match (ind.mother, ind.father) {
            (Some(mother), _) => &self.individuals[mother].children,
            (None, Some(father)) => &self.individuals[father].children,
            (None, None) => &[],
        }
    }

    /// A root has neither mother nor father.
    pub fn is_root(&self, index: usize) -> bool {
        let ind = &self.individuals[index];
        ind.mother.is_none() && ind.father.is_none()
    }

    pub fn roots(&self) -> Vec<usize> {
        (0..self.individuals.len())
            .filter(|&i| self.is_root(i))
            .collect()
    }

    /// Whether `ancestor` is `index` itself or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: usize, index: usize) -> bool {
        let mut stack = vec![index];
        let mut seen = vec![false; self.individuals.len()];
        while let Some(node) = stack.pop() {
            if node == ancestor {
                return true;
            }
            if std::mem::replace(&mut seen[node], true) {
                continue;
            }
            let ind = &self.individuals[node];
            stack.extend(ind.mother.iter().chain(ind.father.iter()));
        }
        false
    }

    /// Validate the pedigree for consistency.
    ///
    /// Checks:
    /// - Partner links are mutual and join opposite genders.
    /// - Mothers are female and fathers are male.
    /// - Every child appears in its parents' children lists and vice versa.
    /// - No individual is its own ancestor (cycle detection).
    ///
    /// # Errors
    /// Returns an error describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let n = self.individuals.len();

        for (i, ind) in self.individuals.iter().enumerate() {
            if let Some(p) = ind.partner {
                if p >= n || self.individuals[p].partner != Some(i) {
                    return Err(InferenceError::Pedigree(format!(
                        "Partner link of '{}' is not mutual",
                        ind.id
                    )));
                }
            }
            if let Some(m) = ind.mother {
                if m >= n || self.individuals[m].gender() != Gender::Female {
                    return Err(InferenceError::Pedigree(format!(
                        "Mother of '{}' is not a female in the pedigree",
                        ind.id
                    )));
                }
            }
            if let Some(f) = ind.father {
                if f >= n || self.individuals[f].gender() != Gender::Male {
                    return Err(InferenceError::Pedigree(format!(
                        "Father of '{}' is not a male in the pedigree",
                        ind.id
                    )));
                }
            }
            for parent in ind.mother.iter().chain(ind.father.iter()) {
                if !self.individuals[*parent].children.contains(&i) {
                    return Err(InferenceError::Pedigree(format!(
                        "'{}' is missing from the children of '{}'",
                        ind.id, self.individuals[*parent].id
                    )));
                }
            }
            for &child in &ind.children {
                let c = &self.individuals[child];
                if c.mother != Some(i) && c.father != Some(i) {
                    return Err(InferenceError::Pedigree(format!(
                        "'{}' lists '{}' as a child but is not their parent",
                        ind.id, c.id
                    )));
                }
            }
        }

        // Kahn's algorithm over parent -> child edges. If not every node
        // can be processed, there is a cycle.
        let mut in_degree: Vec<u32> = self
            .individuals
            .iter()
            .map(|ind| ind.mother.iter().chain(ind.father.iter()).count() as u32)
            .collect();

        let mut queue: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut visited = 0usize;

        while let Some(node) = queue.pop() {
            visited += 1;
            for &child in &self.individuals[node].children {
                in_degree[child] -= 1;
                if in_degree[child] == 0 {
                    queue.push(child);
                }
            }
        }

        if visited != n {
            return Err(InferenceError::Pedigree(
                "Pedigree contains a cycle".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Pedigree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// mother (f) and father (M) with a daughter (F) and a son (m).
    fn nuclear_family() -> (Pedigree, [usize; 4]) {
        let mut ped = Pedigree::new();
        let mother = ped.add_observation("mother", 'f').unwrap();
        let father = ped.add_observation("father", 'M').unwrap();
        let daughter = ped.add_observation("daughter", 'F').unwrap();
        let son = ped.add_observation("son", 'm').unwrap();
        ped.set_partners(mother, father).unwrap();
        ped.link_parent_child(mother, daughter).unwrap();
        ped.link_parent_child(father, son).unwrap();
        (ped, [mother, father, daughter, son])
    }

    #[test]
    fn test_add_and_lookup() {
        let (ped, [mother, father, _, son]) = nuclear_family();
        assert_eq!(ped.n_individuals(), 4);
        assert_eq!(ped.index_of("mother"), Some(mother));
        assert_eq!(ped.index_of("nobody"), None);
        assert_eq!(ped.individual(son).id(), "son");
        assert!(ped.individual(father).affected());
        assert_eq!(ped.label(father), "father (M)");
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut ped = Pedigree::new();
        ped.add_observation("a", 'f').unwrap();
        assert!(ped.add_observation("a", 'm').is_err());
    }

    #[test]
    fn test_invalid_symbol_is_rejected() {
        let mut ped = Pedigree::new();
        assert!(matches!(
            ped.add_observation("a", 'q'),
            Err(InferenceError::InvalidObservation('q'))
        ));
    }

    #[test]
    fn test_partners_are_mutual() {
        let (ped, [mother, father, _, _]) = nuclear_family();
        assert_eq!(ped.individual(mother).partner(), Some(father));
        assert_eq!(ped.individual(father).partner(), Some(mother));
    }

    #[test]
    fn test_link_sets_both_parents() {
        let (ped, [mother, father, daughter, son]) = nuclear_family();
        for child in [daughter, son] {
            assert_eq!(ped.parents(child), (Some(mother), Some(father)));
        }
        assert_eq!(ped.children(mother), &[daughter, son]);
        assert_eq!(ped.children(father), &[daughter, son]);
        assert_eq!(ped.siblings(son), &[daughter, son]);
        assert!(ped.validate().is_ok());
    }

    #[test]
    fn test_mother_father_places_self_by_gender() {
        let (ped, [mother, father, daughter, _]) = nuclear_family();
        assert_eq!(ped.mother_father(mother), (Some(mother), Some(father)));
        assert_eq!(ped.mother_father(father), (Some(mother), Some(father)));
        assert_eq!(ped.mother_father(daughter), (Some(daughter), None));
    }

    #[test]
    fn test_roots() {
        let (ped, [mother, father, daughter, _]) = nuclear_family();
        assert_eq!(ped.roots(), vec![mother, father]);
        assert!(!ped.is_root(daughter));
        assert!(ped.siblings(mother).is_empty());
    }

    #[test]
    fn test_single_parent_then_partner() {
        let mut ped = Pedigree::new();
        let mother = ped.add_observation("mother", 'f').unwrap();
        let child = ped.add_observation("child", 'm').unwrap();
        ped.link_parent_child(mother, child).unwrap();
        assert_eq!(ped.parents(child), (Some(mother), None));

        let father = ped.add_observation("father", 'm').unwrap();
        ped.set_partners(father, mother).unwrap();
        assert_eq!(ped.parents(child), (Some(mother), Some(father)));
        assert_eq!(ped.children(father), &[child]);
        assert!(ped.validate().is_ok());
    }

    #[test]
    fn test_same_gender_partners_rejected() {
        let mut ped = Pedigree::new();
        let a = ped.add_observation("a", 'f').unwrap();
        let b = ped.add_observation("b", 'F').unwrap();
        assert!(ped.set_partners(a, b).is_err());
    }

    #[test]
    fn test_second_partner_rejected() {
        let (mut ped, [mother, _, _, _]) = nuclear_family();
        let other = ped.add_observation("other", 'm').unwrap();
        assert!(ped.set_partners(mother, other).is_err());
    }

    #[test]
    fn test_child_with_other_parents_rejected() {
        let (mut ped, [_, _, daughter, _]) = nuclear_family();
        let stranger = ped.add_observation("stranger", 'f').unwrap();
        assert!(ped.link_parent_child(stranger, daughter).is_err());
    }

    #[test]
    fn test_cycle_rejected() {
        let mut ped = Pedigree::new();
        let a = ped.add_observation("a", 'f').unwrap();
        let b = ped.add_observation("b", 'm').unwrap();
        let c = ped.add_observation("c", 'f').unwrap();
        ped.link_parent_child(a, b).unwrap();
        ped.link_parent_child(b, c).unwrap();
        assert!(ped.is_ancestor(a, c));
        assert!(!ped.is_ancestor(c, a));
        assert!(ped.link_parent_child(c, a).is_err());
    }
}
