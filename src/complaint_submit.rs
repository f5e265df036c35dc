//! Construction of new complaint records from submitted form state.

use chrono::{DateTime, Utc};
use log::debug;

use crate::complaint_model::{Complaint, ComplaintForm, ComplaintStatus};
use crate::complaint_query::find_complaint;

/// Builds a new `Pending` complaint dated `now`.
///
/// The id is the millisecond timestamp of `now`, bumped by one until it no
/// longer collides with an id in `existing`. Fields are copied verbatim; no
/// validation happens here.
pub fn new_complaint(existing: &[Complaint], form: ComplaintForm, now: DateTime<Utc>) -> Complaint {
    let id = next_complaint_id(existing, now.timestamp_millis());
    debug!("Assigning id {} to new complaint in category {:?}", id, form.category);

    Complaint {
        id,
        name: form.name,
        email: form.email,
        category: form.category,
        description: form.description,
        location: form.location,
        status: ComplaintStatus::Pending,
        date: now.date_naive(),
        photo: form.photo,
    }
}

fn next_complaint_id(existing: &[Complaint], millis: i64) -> String {
    let mut candidate = millis;
    loop {
        let id = candidate.to_string();
        if find_complaint(existing, &id).is_none() {
            return id;
        }
        candidate += 1;
    }
}
