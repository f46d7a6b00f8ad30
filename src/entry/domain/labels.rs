//! Label resolution for tracker entries.

use crate::connect::domain::LabelId;

/// Parent labels stripped before resolving an entry's task mapping.
///
/// The tracker reports these alongside their children; only the child label
/// identifies the task type.
pub const EXCLUDED_LABEL_IDS: [LabelId; 2] = [LabelId::new(1111), LabelId::new(2222)];

/// Picks the authoritative label from an entry's label list.
///
/// Excluded parent labels are dropped and the first survivor wins. Returns
/// `None` when no usable label remains, which callers report as a
/// data-quality condition rather than a system error.
#[must_use]
pub fn authoritative_label(labels: &[LabelId]) -> Option<LabelId> {
    labels
        .iter()
        .copied()
        .find(|label| !EXCLUDED_LABEL_IDS.contains(label))
}

#[cfg(test)]
mod tests {
    use super::authoritative_label;
    use crate::connect::domain::LabelId;

    #[test]
    fn first_non_excluded_label_wins() {
        let labels = [LabelId::new(1111), LabelId::new(2222), LabelId::new(4444)];
        assert_eq!(authoritative_label(&labels), Some(LabelId::new(4444)));
    }

    #[test]
    fn exclusively_parent_labels_resolve_to_none() {
        let labels = [LabelId::new(1111), LabelId::new(2222)];
        assert_eq!(authoritative_label(&labels), None);
    }

    #[test]
    fn empty_label_list_resolves_to_none() {
        assert_eq!(authoritative_label(&[]), None);
    }
}
