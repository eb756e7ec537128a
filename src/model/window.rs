//! Visible window around the cursor and per-slot visual weighting

use serde::{Deserialize, Serialize};

use super::catalog::Item;
use super::cursor::Cursor;

const SCALE_STEP: f32 = 0.15;
const MIN_SCALE: f32 = 0.5;
const OPACITY_STEP: f32 = 0.25;
const MIN_OPACITY: f32 = 0.2;
const DEPTH_STEP: f32 = 120.0;
const ROTATION_STEP_DEG: f32 = 30.0;
const SHIFT_STEP: f32 = 140.0;

/// How slot weight falls off with distance from the center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightProfile {
    /// Gradual linear falloff over a wide row of large covers.
    #[default]
    CoverFlow,
    /// Enlarged center with two fixed tiers for the neighbours.
    Spotlight,
}

impl WeightProfile {
    /// Reference cover width that `SlotWeight::shift` is expressed in.
    pub fn cover_units(self) -> f32 {
        match self {
            WeightProfile::CoverFlow => 224.0,
            WeightProfile::Spotlight => 144.0,
        }
    }
}

/// Visual parameters of a slot, derived only from its offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotWeight {
    pub scale: f32,
    pub opacity: f32,
    /// Distance pushed back from the viewer (always <= 0).
    pub depth: f32,
    /// Rotation around the vertical axis in degrees, turned toward the center.
    pub rotation: f32,
    /// Horizontal displacement from the center slot.
    pub shift: f32,
}

impl SlotWeight {
    pub fn for_offset(offset: isize, profile: WeightProfile) -> Self {
        let distance = offset.unsigned_abs() as f32;
        match profile {
            WeightProfile::CoverFlow => Self {
                scale: if offset == 0 {
                    1.0
                } else {
                    (1.0 - distance * SCALE_STEP).max(MIN_SCALE)
                },
                opacity: (1.0 - distance * OPACITY_STEP).max(MIN_OPACITY),
                depth: -distance * DEPTH_STEP,
                rotation: -(offset as f32) * ROTATION_STEP_DEG,
                shift: offset as f32 * SHIFT_STEP,
            },
            WeightProfile::Spotlight => {
                let (scale, opacity) = match offset.unsigned_abs() {
                    0 => (1.2, 1.0),
                    1 => (0.85, 0.8),
                    _ => (0.6, 0.4),
                };
                Self {
                    scale,
                    opacity,
                    depth: -distance * 80.0,
                    rotation: -(offset as f32) * 25.0,
                    shift: offset as f32 * 80.0,
                }
            }
        }
    }
}

/// One renderable position in the visible window
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSlot {
    /// Index of `item` in the catalog.
    pub index: usize,
    pub item: Item,
    pub offset: isize,
    pub weight: SlotWeight,
}

impl RenderSlot {
    pub fn is_center(&self) -> bool {
        self.offset == 0
    }

    pub fn is_adjacent(&self) -> bool {
        self.offset.unsigned_abs() == 1
    }
}

/// Project `2 * radius + 1` slots for offsets `-radius..=radius`.
///
/// Small lists repeat items at different offsets.
pub fn project(
    cursor: Cursor,
    items: &[Item],
    radius: usize,
    profile: WeightProfile,
) -> Vec<RenderSlot> {
    debug_assert_eq!(cursor.len(), items.len());
    let r = radius as isize;
    (-r..=r)
        .filter_map(|offset| {
            let index = cursor.offset_index(offset);
            items.get(index).map(|item| RenderSlot {
                index,
                item: item.clone(),
                offset,
                weight: SlotWeight::for_offset(offset, profile),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: u32) -> Vec<Item> {
        (0..n)
            .map(|id| Item {
                id,
                title: format!("Album {id}"),
                artist: String::new(),
                year: String::new(),
                cover: String::new(),
                track: None,
            })
            .collect()
    }

    #[test]
    fn offsets_cover_radius_exactly_and_center_matches_cursor() {
        for n in 1..=8u32 {
            let list = items(n);
            for radius in 0..=4 {
                for start in 0..n as usize {
                    let mut cursor = Cursor::new(list.len());
                    cursor.set(start);
                    let slots = project(cursor, &list, radius, WeightProfile::CoverFlow);

                    let offsets: Vec<isize> = slots.iter().map(|s| s.offset).collect();
                    let expected: Vec<isize> = (-(radius as isize)..=radius as isize).collect();
                    assert_eq!(offsets, expected);

                    let center: Vec<&RenderSlot> = slots.iter().filter(|s| s.is_center()).collect();
                    assert_eq!(center.len(), 1);
                    assert_eq!(center[0].item, list[start]);
                }
            }
        }
    }

    #[test]
    fn wraps_around_list_edges() {
        let list = items(5);
        let slots = project(Cursor::new(5), &list, 2, WeightProfile::CoverFlow);
        let indices: Vec<usize> = slots.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![3, 4, 0, 1, 2]);
    }

    #[test]
    fn small_lists_repeat_items() {
        let list = items(2);
        let slots = project(Cursor::new(2), &list, 3, WeightProfile::Spotlight);
        let indices: Vec<usize> = slots.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn weight_decreases_with_distance_and_has_floor() {
        let center = SlotWeight::for_offset(0, WeightProfile::CoverFlow);
        assert_eq!(center.scale, 1.0);
        assert_eq!(center.opacity, 1.0);
        assert_eq!(center.rotation, 0.0);

        let mut prev = center;
        for distance in 1..10isize {
            let w = SlotWeight::for_offset(distance, WeightProfile::CoverFlow);
            assert!(w.scale <= prev.scale);
            assert!(w.opacity <= prev.opacity);
            assert!(w.scale >= MIN_SCALE);
            assert!(w.opacity >= MIN_OPACITY);
            prev = w;
        }
        assert_eq!(SlotWeight::for_offset(9, WeightProfile::CoverFlow).scale, MIN_SCALE);
        assert_eq!(SlotWeight::for_offset(9, WeightProfile::CoverFlow).opacity, MIN_OPACITY);
    }

    #[test]
    fn weight_is_symmetric_and_turns_toward_center() {
        let left = SlotWeight::for_offset(-1, WeightProfile::CoverFlow);
        let right = SlotWeight::for_offset(1, WeightProfile::CoverFlow);
        assert_eq!(left.scale, right.scale);
        assert_eq!(left.opacity, right.opacity);
        assert!(left.rotation > 0.0);
        assert!(right.rotation < 0.0);
        assert!(left.shift < 0.0 && right.shift > 0.0);
        assert!(right.depth < 0.0);
    }

    #[test]
    fn spotlight_enlarges_center_and_tiers_neighbours() {
        let w = |o| SlotWeight::for_offset(o, WeightProfile::Spotlight);
        assert_eq!((w(0).scale, w(0).opacity), (1.2, 1.0));
        assert_eq!((w(-1).scale, w(-1).opacity), (0.85, 0.8));
        assert_eq!((w(2).scale, w(2).opacity), (0.6, 0.4));
        assert_eq!(w(5).scale, w(2).scale);
        assert_eq!(w(1).rotation, -25.0);
        assert_eq!(w(-2).shift, -160.0);
        assert_eq!(w(2).depth, -160.0);
    }

    #[test]
    fn profiles_differ_only_in_weight() {
        let list = items(5);
        let flow = project(Cursor::new(5), &list, 2, WeightProfile::CoverFlow);
        let spot = project(Cursor::new(5), &list, 2, WeightProfile::Spotlight);
        let indices = |slots: &[RenderSlot]| slots.iter().map(|s| s.index).collect::<Vec<_>>();
        assert_eq!(indices(&flow), indices(&spot));
        assert_ne!(flow[2].weight, spot[2].weight);
    }
}
