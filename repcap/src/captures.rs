//! Capture lists produced by matching an expanded pattern
//!
//! After expansion every repetition of a group owns a capture slot, and
//! optional copies that did not take part in the match leave empty slots.
//! [`CaptureList`] offers the selections that make such lists usable.

/// The captures of one match attempt
///
/// Slot 0 is the whole match; the rest are group captures in pattern order,
/// `None` for groups that did not participate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureList<'t> {
    slots: Option<Vec<Option<&'t str>>>,
}

impl<'t> CaptureList<'t> {
    /// A capture list for a successful match
    pub fn new(slots: Vec<Option<&'t str>>) -> Self {
        CaptureList { slots: Some(slots) }
    }

    /// A capture list for a failed match
    pub fn no_match() -> Self {
        CaptureList { slots: None }
    }

    /// Build from host-engine captures
    pub fn from_captures(captures: Option<fancy_regex::Captures<'t>>) -> Self {
        match captures {
            Some(caps) => CaptureList::new(caps.iter().map(|m| m.map(|m| m.as_str())).collect()),
            None => CaptureList::no_match(),
        }
    }

    /// Whether the pattern matched
    pub fn is_match(&self) -> bool {
        self.slots.is_some()
    }

    /// Number of slots, including the whole match
    pub fn len(&self) -> usize {
        self.slots.as_ref().map_or(0, Vec::len)
    }

    /// Whether there are no slots at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A single slot; 0 is the whole match
    pub fn get(&self, index: usize) -> Option<&'t str> {
        self.slots.as_ref()?.get(index).copied().flatten()
    }

    /// The whole match, or `None` if there was no match
    pub fn full_match(&self) -> Option<&'t str> {
        self.get(0)
    }

    /// The group captures, without the whole match
    ///
    /// Returns `None` if there was no match. With `compact`, slots of groups
    /// that did not participate are dropped.
    pub fn filter(&self, compact: bool) -> Option<Vec<Option<&'t str>>> {
        self.filter_with(compact, |_| false)
    }

    /// Like [`filter`](Self::filter), additionally dropping every slot for
    /// which `reject` returns true
    pub fn filter_with<F>(&self, compact: bool, mut reject: F) -> Option<Vec<Option<&'t str>>>
    where
        F: FnMut(Option<&'t str>) -> bool,
    {
        let slots = self.slots.as_ref()?;
        let groups = slots.get(1..).unwrap_or_default();
        Some(
            groups
                .iter()
                .copied()
                .filter(|slot| !(compact && slot.is_none()))
                .filter(|slot| !reject(*slot))
                .collect(),
        )
    }

    /// Pick one capture out of every run of `before + 1 + after` group slots
    ///
    /// Useful for patterns like `(\w+)(,)` repeated, where only every other
    /// group is interesting. Picks from empty slots, and runs too short to
    /// contain the pick, are dropped.
    pub fn skip(&self, before: usize, after: usize) -> Vec<&'t str> {
        let Some(groups) = self.filter(false) else {
            return Vec::new();
        };
        groups
            .chunks(before + 1 + after)
            .filter_map(|chunk| chunk.get(before).copied().flatten())
            .collect()
    }

    /// Iterate over all slots, including the whole match
    pub fn iter(&self) -> impl Iterator<Item = Option<&'t str>> + '_ {
        self.slots.iter().flatten().copied()
    }
}
