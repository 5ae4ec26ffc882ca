//! Link graph lookups: who links here, and where a note links to.

use std::collections::HashSet;

use quill_core::{Note, normalize_title};

use crate::index::DerivedIndex;
use crate::models::{Backlink, OutgoingLink};
use crate::parser::extract_links;

/// Notes whose bodies link to `note`'s title, in collection order.
///
/// Untitled notes have no backlinks, and a note never lists itself.
pub fn backlinks_for(index: &DerivedIndex, note: &Note) -> Vec<Backlink> {
    let Some(key) = note.title_key() else {
        return Vec::new();
    };
    index
        .backlinks(&key)
        .iter()
        .filter(|backlink| backlink.source_id != note.id)
        .cloned()
        .collect()
}

/// Distinct link targets of `note` in order of first appearance.
pub fn outgoing_links(index: &DerivedIndex, note: &Note) -> Vec<OutgoingLink> {
    let mut seen = HashSet::new();
    extract_links(&note.content)
        .into_iter()
        .filter(|link| seen.insert(normalize_title(&link.target)))
        .map(|link| OutgoingLink {
            exists: index.contains_title(&link.target),
            label: link.target,
        })
        .collect()
}
