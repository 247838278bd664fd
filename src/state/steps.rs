//! Derived two-step pagination of the field list

use super::field::Field;
use super::observer::FieldObserver;

/// Number of slices in every partition
pub const STEP_SLICES: usize = 2;

/// The field list split into two contiguous, order-preserving slices:
/// `ceil(n/2)` fields first, the remainder second.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepPartition {
    steps: [Vec<Field>; STEP_SLICES],
}

impl StepPartition {
    pub fn split(fields: &[Field]) -> Self {
        let mid = fields.len().div_ceil(2);
        Self {
            steps: [fields[..mid].to_vec(), fields[mid..].to_vec()],
        }
    }

    /// Both slices, including an empty trailing one
    pub fn slices(&self) -> &[Vec<Field>] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&[Field]> {
        self.steps.get(index).map(Vec::as_slice)
    }

    /// Slices that hold at least one field
    pub fn step_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.is_empty()).count()
    }

    pub fn field_count(&self) -> usize {
        self.steps.iter().map(Vec::len).sum()
    }

    /// Concatenation of both slices
    pub fn flatten(&self) -> Vec<Field> {
        self.steps.iter().flatten().cloned().collect()
    }
}

/// Keeps the published partition and the current step index in sync
/// with the field list.
#[derive(Debug, Clone, Default)]
pub struct StepDeriver {
    published: StepPartition,
    current: usize,
    revision: u64,
}

impl StepDeriver {
    pub fn new(fields: &[Field]) -> Self {
        let mut deriver = Self::default();
        deriver.derive(fields);
        deriver.revision = 0;
        deriver
    }

    /// Recompute from `fields`. Returns true when a new partition was
    /// published; structurally equal candidates are discarded.
    pub fn derive(&mut self, fields: &[Field]) -> bool {
        let candidate = StepPartition::split(fields);
        if candidate == self.published {
            return false;
        }
        let previous_count = self.published.step_count();
        self.published = candidate;
        self.revision += 1;
        if self.published.step_count() != previous_count {
            self.current = 0;
        } else {
            self.current = self.current.min(self.last_index());
        }
        tracing::debug!(
            steps = self.published.step_count(),
            current = self.current,
            "steps republished"
        );
        true
    }

    pub fn partition(&self) -> &StepPartition {
        &self.published
    }

    pub fn step_count(&self) -> usize {
        self.published.step_count()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Fields on the current step
    pub fn current_fields(&self) -> &[Field] {
        self.published.step(self.current).unwrap_or_default()
    }

    /// Index of the first field of the current step in the whole list
    pub fn current_offset(&self) -> usize {
        self.published.slices()[..self.current]
            .iter()
            .map(Vec::len)
            .sum()
    }

    /// Number of partitions published so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn has_next(&self) -> bool {
        self.current < self.last_index()
    }

    pub fn has_prev(&self) -> bool {
        self.current > 0
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.current += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.has_prev() {
            self.current -= 1;
        }
    }

    fn last_index(&self) -> usize {
        self.step_count().max(1) - 1
    }
}

impl FieldObserver for StepDeriver {
    fn fields_changed(&mut self, fields: &[Field]) {
        self.derive(fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::field::FieldType;
    use pretty_assertions::assert_eq;

    fn list(n: usize) -> Vec<Field> {
        (0..n)
            .map(|i| Field::new(format!("f{i}"), FieldType::Text))
            .collect()
    }

    fn ids(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|f| f.id.as_str()).collect()
    }

    mod partition {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_split_law_holds_for_small_lists() {
            for n in 0..12 {
                let fields = list(n);
                let partition = StepPartition::split(&fields);
                let first = partition.step(0).unwrap();
                let second = partition.step(1).unwrap();
                assert_eq!(first.len(), n.div_ceil(2));
                assert_eq!(second.len(), n - first.len());
                assert_eq!(partition.flatten(), fields);
            }
        }

        #[test]
        fn test_step_count() {
            assert_eq!(StepPartition::split(&list(0)).step_count(), 0);
            assert_eq!(StepPartition::split(&list(1)).step_count(), 1);
            assert_eq!(StepPartition::split(&list(2)).step_count(), 2);
            assert_eq!(StepPartition::split(&list(7)).step_count(), 2);
        }

        #[test]
        fn test_always_two_slices() {
            assert_eq!(StepPartition::split(&list(0)).slices().len(), 2);
            assert_eq!(StepPartition::split(&list(5)).slices().len(), 2);
        }
    }

    mod deriver {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_scenario_two_then_three_fields() {
            let mut fields = list(2);
            let mut steps = StepDeriver::new(&[]);
            steps.derive(&fields);
            assert_eq!(ids(steps.partition().step(0).unwrap()), vec!["f0"]);
            assert_eq!(ids(steps.partition().step(1).unwrap()), vec!["f1"]);

            fields.push(Field::new("f2", FieldType::Text));
            steps.derive(&fields);
            assert_eq!(ids(steps.partition().step(0).unwrap()), vec!["f0", "f1"]);
            assert_eq!(ids(steps.partition().step(1).unwrap()), vec!["f2"]);
        }

        #[test]
        fn test_equal_candidate_is_discarded() {
            let fields = list(4);
            let mut steps = StepDeriver::new(&fields);
            assert!(!steps.derive(&fields.clone()));
            assert_eq!(steps.revision(), 0);
        }

        #[test]
        fn test_attribute_edit_republishes() {
            let mut fields = list(4);
            let mut steps = StepDeriver::new(&fields);
            fields[3].required = true;
            assert!(steps.derive(&fields));
            assert!(steps.partition().step(1).unwrap()[1].required);
        }

        #[test]
        fn test_current_kept_when_step_count_unchanged() {
            let mut fields = list(4);
            let mut steps = StepDeriver::new(&fields);
            steps.next();
            fields[0].label = "renamed".to_string();
            steps.derive(&fields);
            assert_eq!(steps.current(), 1);
        }

        #[test]
        fn test_current_reset_when_step_count_changes() {
            let mut fields = list(2);
            let mut steps = StepDeriver::new(&fields);
            steps.next();
            assert_eq!(steps.current(), 1);
            fields.pop();
            steps.derive(&fields);
            assert_eq!(steps.step_count(), 1);
            assert_eq!(steps.current(), 0);
        }

        #[test]
        fn test_navigation_is_clamped() {
            let mut steps = StepDeriver::new(&list(3));
            steps.prev();
            assert_eq!(steps.current(), 0);
            steps.next();
            steps.next();
            assert_eq!(steps.current(), 1);
            assert!(!steps.has_next());
            assert_eq!(ids(steps.current_fields()), vec!["f2"]);
            assert_eq!(steps.current_offset(), 2);
        }

        #[test]
        fn test_empty_list_has_no_navigation() {
            let mut steps = StepDeriver::new(&[]);
            steps.next();
            assert_eq!(steps.current(), 0);
            assert!(steps.current_fields().is_empty());
        }
    }
}
