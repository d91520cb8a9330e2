use super::bounded::BoundedList;
use super::group::ColorGroup;
use crate::color::{rgb_to_lab, Lab, Rgb};

/// Number of groups a worker keeps before evicting.
pub const REGISTRY_CAPACITY: usize = 32;

/// Ordered, capacity-bounded collection of [`ColorGroup`]s.
///
/// Samples are merged into the first group (in insertion order) whose
/// founding color lies within `merge_distance` (CIEDE2000) of the sample.
/// Samples that match no group found a new one; when the group list reaches
/// its capacity, the newer half is discarded (see [`BoundedList`]).
///
/// # Example
///
/// ```
/// use accent_color::{ColorRegistry, Rgb};
///
/// let mut registry = ColorRegistry::new(32, 20.0);
/// registry.insert(Rgb::from_u8(255, 0, 0), 1.0);
/// registry.insert(Rgb::from_u8(250, 5, 5), 1.0);
/// registry.insert(Rgb::from_u8(0, 0, 255), 1.5);
///
/// assert_eq!(registry.len(), 2);
/// let best = registry.best().unwrap();
/// assert_eq!(best.top_color(), Rgb::from_u8(255, 0, 0));
/// assert_eq!(best.total_weight(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct ColorRegistry {
    groups: BoundedList<ColorGroup>,
    merge_distance: f64,
}

impl ColorRegistry {
    pub fn new(capacity: usize, merge_distance: f64) -> Self {
        Self {
            groups: BoundedList::new(capacity),
            merge_distance,
        }
    }

    /// Add one weighted sample.
    pub fn insert(&mut self, rgb: Rgb, weight: f64) {
        let lab = rgb_to_lab(rgb);
        self.insert_lab(rgb, lab, weight);
    }

    /// Add one weighted sample whose LAB value is already known.
    pub fn insert_lab(&mut self, rgb: Rgb, lab: Lab, weight: f64) {
        let merge_distance = self.merge_distance;
        if let Some(group) = self
            .groups
            .iter_mut()
            .find(|g| lab.distance(g.representative()) <= merge_distance)
        {
            group.absorb(rgb, weight);
            return;
        }
        self.groups.push(ColorGroup::new(rgb, lab, weight));
    }

    /// The group with the largest total weight; ties go to the earliest group.
    pub fn best(&self) -> Option<&ColorGroup> {
        self.best_index().and_then(|i| self.groups.get(i))
    }

    /// Consume the registry, returning its best group.
    pub fn into_best(self) -> Option<ColorGroup> {
        let index = self.best_index()?;
        self.groups.into_vec().into_iter().nth(index)
    }

    fn best_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, group) in self.groups.iter().enumerate() {
            match best {
                Some((_, weight)) if weight >= group.total_weight() => {}
                _ => best = Some((i, group.total_weight())),
            }
        }
        best.map(|(i, _)| i)
    }

    pub fn groups(&self) -> &[ColorGroup] {
        self.groups.as_slice()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[inline]
    pub fn merge_distance(&self) -> f64 {
        self.merge_distance
    }
}
