//! Admit predicate folding the three delivery modes into one fan-out path.

use crate::identity::SubscriberId;
use std::collections::HashSet;

/// Which registered identities a single publish delivers to.
#[derive(Clone, Debug)]
pub(crate) enum DeliveryFilter {
    /// Every registered subscriber.
    All,
    /// Only identities in the set; members without a registration are ignored.
    Include(HashSet<SubscriberId>),
    /// Every registered subscriber except identities in the set.
    Exclude(HashSet<SubscriberId>),
}

impl DeliveryFilter {
    pub(crate) fn admits(&self, id: &SubscriberId) -> bool {
        match self {
            DeliveryFilter::All => true,
            DeliveryFilter::Include(ids) => ids.contains(id),
            DeliveryFilter::Exclude(ids) => !ids.contains(id),
        }
    }
}
