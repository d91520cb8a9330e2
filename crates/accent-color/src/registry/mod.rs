//! Capacity-bounded color grouping
//!
//! Each worker folds its sampled pixels into a [`ColorRegistry`]: an ordered
//! list of perceptual [`ColorGroup`]s whose length is capped by a
//! [`BoundedList`]. The cap bounds both memory and the number of CIEDE2000
//! comparisons per sample.

mod bounded;
mod group;

mod registry;

pub use bounded::BoundedList;
pub use group::{ColorGroup, GroupMember, MAX_GROUP_MEMBERS};
pub use registry::{ColorRegistry, REGISTRY_CAPACITY};
