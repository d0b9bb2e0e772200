//! Built-in seed dataset.
//!
//! # Responsibility
//! - Provide a minimal starter tree for first launch, written through the
//!   normal create path so spouse propagation is exercised, not hand-wired.

use crate::model::member::{Gender, MemberDraft};
use crate::store::GraphStore;
use chrono::NaiveDate;

/// Seeds the founder couple into an empty store.
///
/// The second create names the first as spouse, which makes the store link
/// both directions.
pub fn seed_sample(store: &mut GraphStore) {
    let mut founder = MemberDraft::new("Arthur Hale", Gender::Male);
    founder.birth_date = NaiveDate::from_ymd_opt(1948, 3, 1);
    founder.generation = Some(1);
    founder.description = "Family founder".to_string();
    let founder = store.create(founder);

    let mut partner = MemberDraft::new("Margaret Hale", Gender::Female);
    partner.birth_date = NaiveDate::from_ymd_opt(1951, 10, 16);
    partner.generation = Some(1);
    partner.spouse_id = Some(founder.id);
    partner.description = "Founder's spouse".to_string();
    store.create(partner);
}
