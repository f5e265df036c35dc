//! Pure derivations over a complaint sequence.
//!
//! Nothing here touches storage. Callers that own a store persist the
//! result of [`change_status`] themselves (see
//! [`ComplaintStore::change_status`](crate::complaint_store::ComplaintStore::change_status)).

use crate::complaint_model::{Complaint, ComplaintStatus, ALL_CATEGORIES};

/// Returns the records matching both `search_term` and `category`, in their
/// original relative order.
///
/// - `search_term` is matched case-insensitively as a substring of the
///   description, location or category. An empty term matches everything.
/// - `category` is either [`ALL_CATEGORIES`] or an exact, case-sensitive
///   category name.
///
/// ```rust
/// use community_complaint_core::complaint_model::seed_complaints;
/// use community_complaint_core::complaint_query::filter_complaints;
///
/// let store = seed_complaints();
/// let hits = filter_complaints(&store, "park", "all");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].location, "Central Park");
/// ```
pub fn filter_complaints(records: &[Complaint], search_term: &str, category: &str) -> Vec<Complaint> {
    let needle = search_term.to_lowercase();

    records
        .iter()
        .filter(|complaint| matches_search(complaint, &needle) && matches_category(complaint, category))
        .cloned()
        .collect()
}

fn matches_search(complaint: &Complaint, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    [&complaint.description, &complaint.location, &complaint.category]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn matches_category(complaint: &Complaint, category: &str) -> bool {
    category == ALL_CATEGORIES || complaint.category == category
}

/// Returns a copy of `records` with the status of the record `id` replaced.
///
/// An unknown `id` yields an unchanged copy. Positions and all other fields
/// are preserved. No authorization is checked here.
pub fn change_status(records: &[Complaint], id: &str, status: ComplaintStatus) -> Vec<Complaint> {
    records
        .iter()
        .map(|complaint| {
            if complaint.id == id {
                Complaint { status, ..complaint.clone() }
            } else {
                complaint.clone()
            }
        })
        .collect()
}

/// Looks up a record by id.
pub fn find_complaint<'a>(records: &'a [Complaint], id: &str) -> Option<&'a Complaint> {
    records.iter().find(|complaint| complaint.id == id)
}

/// First id that appears more than once, if any.
pub fn duplicate_id(records: &[Complaint]) -> Option<&str> {
    let mut seen = std::collections::HashSet::with_capacity(records.len());
    records
        .iter()
        .map(|complaint| complaint.id.as_str())
        .find(|id| !seen.insert(*id))
}
