use super::bounded::BoundedList;
use crate::color::{Lab, Rgb};

/// Maximum number of distinct member colors tracked per group.
pub const MAX_GROUP_MEMBERS: usize = 4;

/// One exact color inside a [`ColorGroup`] and the weight folded into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupMember {
    pub rgb: Rgb,
    pub weight: f64,
}

/// A cluster of perceptually close colors.
///
/// The group's representative LAB value is the one of its founding color and
/// is never recomputed as other colors are folded in; every merge decision
/// is made against the founder.
///
/// `total_weight` is the sum of every weight ever absorbed. Member colors
/// are tracked in a [`BoundedList`], so a member evicted by the cap keeps
/// contributing to the total but can no longer be picked as the top color.
#[derive(Debug, Clone)]
pub struct ColorGroup {
    founder: Rgb,
    representative: Lab,
    total_weight: f64,
    members: BoundedList<GroupMember>,
}

impl ColorGroup {
    /// Found a new group from a single color.
    pub fn new(rgb: Rgb, lab: Lab, weight: f64) -> Self {
        let mut members = BoundedList::new(MAX_GROUP_MEMBERS);
        members.push(GroupMember { rgb, weight });
        Self {
            founder: rgb,
            representative: lab,
            total_weight: weight,
            members,
        }
    }

    /// Fold a color into the group.
    ///
    /// An exact RGB match increases that member's weight; any other color is
    /// appended as a new member carrying `weight`.
    pub fn absorb(&mut self, rgb: Rgb, weight: f64) {
        self.total_weight += weight;
        if let Some(member) = self.members.iter_mut().find(|m| m.rgb == rgb) {
            member.weight += weight;
            return;
        }
        self.members.push(GroupMember { rgb, weight });
    }

    /// The member with the highest weight. Ties go to the earliest member.
    pub fn top_color(&self) -> Rgb {
        self.members
            .iter()
            .fold(None::<&GroupMember>, |top, member| match top {
                Some(top) if top.weight >= member.weight => Some(top),
                _ => Some(member),
            })
            .map_or(self.founder, |top| top.rgb)
    }

    /// The color the group was founded with.
    #[inline]
    pub fn founder(&self) -> Rgb {
        self.founder
    }

    #[inline]
    pub fn representative(&self) -> Lab {
        self.representative
    }

    #[inline]
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn members(&self) -> &[GroupMember] {
        self.members.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::rgb_to_lab;

    fn group(rgb: Rgb, weight: f64) -> ColorGroup {
        ColorGroup::new(rgb, rgb_to_lab(rgb), weight)
    }

    #[test]
    fn test_new_group_has_founder_as_only_member() {
        let red = Rgb::from_u8(255, 0, 0);
        let g = group(red, 2.5);
        assert_eq!(g.total_weight(), 2.5);
        assert_eq!(g.members(), &[GroupMember { rgb: red, weight: 2.5 }]);
        assert_eq!(g.representative(), rgb_to_lab(red));
        assert_eq!(g.top_color(), red);
        assert_eq!(g.founder(), red);
    }

    #[test]
    fn test_absorb_exact_match_increments_member() {
        let red = Rgb::from_u8(255, 0, 0);
        let mut g = group(red, 1.0);
        g.absorb(red, 3.0);
        assert_eq!(g.members().len(), 1);
        assert_eq!(g.members()[0].weight, 4.0);
        assert_eq!(g.total_weight(), 4.0);
    }

    #[test]
    fn test_absorb_new_color_appends_with_incoming_weight() {
        let red = Rgb::from_u8(255, 0, 0);
        let dark_red = Rgb::from_u8(250, 0, 0);
        let mut g = group(red, 10.0);
        g.absorb(dark_red, 1.5);
        assert_eq!(g.members()[1], GroupMember { rgb: dark_red, weight: 1.5 });
        assert_eq!(g.total_weight(), 11.5);
    }

    #[test]
    fn test_representative_never_changes() {
        let red = Rgb::from_u8(255, 0, 0);
        let mut g = group(red, 1.0);
        for _ in 0..10 {
            g.absorb(Rgb::from_u8(240, 10, 10), 5.0);
        }
        assert_eq!(g.representative(), rgb_to_lab(red));
        assert_eq!(g.top_color(), Rgb::from_u8(240, 10, 10));
    }

    #[test]
    fn test_member_cap_truncates_but_total_keeps_weight() {
        let mut g = group(Rgb::from_u8(10, 10, 10), 1.0);
        g.absorb(Rgb::from_u8(11, 10, 10), 1.0);
        g.absorb(Rgb::from_u8(12, 10, 10), 1.0);
        // Fourth distinct member reaches the cap: members 2 and 3 are dropped
        g.absorb(Rgb::from_u8(13, 10, 10), 1.0);

        assert_eq!(g.members().len(), MAX_GROUP_MEMBERS / 2);
        assert_eq!(g.total_weight(), 4.0);
        let sum: f64 = g.members().iter().map(|m| m.weight).sum();
        assert_eq!(sum, 2.0);
    }

    #[test]
    fn test_top_color_ties_go_to_earliest_member() {
        let first = Rgb::from_u8(1, 2, 3);
        let second = Rgb::from_u8(3, 2, 1);
        let mut g = group(first, 2.0);
        g.absorb(second, 2.0);
        assert_eq!(g.top_color(), first);
    }
}
