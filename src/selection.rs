use std::collections::BTreeSet;

/// The set of page offsets (0-based) chosen for export, bounded by the page
/// count of the document it was created for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    total_pages: u32,
    offsets: BTreeSet<u32>,
}

impl Selection {
    pub fn new(total_pages: u32) -> Self {
        Selection {
            total_pages,
            offsets: BTreeSet::new(),
        }
    }

    /// Replace the selection with the given 1-based page numbers.
    /// Pages outside `1..=total_pages` are ignored.
    pub fn select(&mut self, pages: &[u32]) {
        self.offsets.clear();
        self.offsets.extend(
            pages
                .iter()
                .filter(|&&page| page >= 1 && page <= self.total_pages)
                .map(|&page| page - 1),
        );
    }

    /// Selected offsets in ascending order.
    pub fn selected_offsets(&self) -> Vec<u32> {
        self.offsets.iter().copied().collect()
    }
}
