//! Circular cursor over a fixed-length item list

/// Current index into a list of `len` items. Always in `[0, len)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    /// `len` must be at least 1; an empty list is rejected at catalog load.
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0, "cursor over an empty list");
        Self { index: 0, len: len.max(1) }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Move by `delta` positions, wrapping in both directions.
    pub fn advance(&mut self, delta: isize) {
        let len = self.len as isize;
        self.index = (self.index as isize + delta).rem_euclid(len) as usize;
    }

    /// Jump to `index`. Out-of-range input is ignored and reported as `false`.
    pub fn set(&mut self, index: usize) -> bool {
        if index >= self.len {
            tracing::warn!(index, len = self.len, "Cursor target out of range, ignoring");
            return false;
        }
        self.index = index;
        true
    }

    /// Shortest signed step count from the current index to `index`.
    ///
    /// When both directions are equally long the forward delta is returned.
    pub fn delta_to(&self, index: usize) -> isize {
        let len = self.len as isize;
        let forward = (index as isize - self.index as isize).rem_euclid(len);
        if forward * 2 > len { forward - len } else { forward }
    }

    /// Index of the item `offset` positions away from the cursor.
    pub fn offset_index(&self, offset: isize) -> usize {
        (self.index as isize + offset).rem_euclid(self.len as isize) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_in_both_directions() {
        let mut cursor = Cursor::new(5);
        cursor.advance(-1);
        assert_eq!(cursor.index(), 4);
        cursor.advance(1);
        assert_eq!(cursor.index(), 0);
        cursor.advance(-12);
        assert_eq!(cursor.index(), 3);
        cursor.advance(7);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn stays_in_range_for_any_step_sequence() {
        for len in 1..=9 {
            let mut cursor = Cursor::new(len);
            for step in [1, -1, -1, 3, -7, 1, 1, 1, -2, 11] {
                let before = cursor.index();
                cursor.advance(step);
                assert!(cursor.index() < len);
                cursor.advance(-step);
                assert_eq!(cursor.index(), before);
                cursor.advance(step);
            }
        }
    }

    #[test]
    fn set_ignores_out_of_range() {
        let mut cursor = Cursor::new(3);
        assert!(cursor.set(2));
        assert!(!cursor.set(3));
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn delta_to_picks_shortest_path() {
        let mut cursor = Cursor::new(8);
        assert_eq!(cursor.delta_to(0), 0);
        assert_eq!(cursor.delta_to(3), 3);
        assert_eq!(cursor.delta_to(4), 4);
        assert_eq!(cursor.delta_to(5), -3);
        assert_eq!(cursor.delta_to(7), -1);

        cursor.set(6);
        assert_eq!(cursor.delta_to(1), 3);
        for target in 0..8 {
            let mut c = cursor;
            c.advance(cursor.delta_to(target));
            assert_eq!(c.index(), target);
        }
    }

    #[test]
    fn single_item_list_never_moves() {
        let mut cursor = Cursor::new(1);
        cursor.advance(1);
        assert_eq!(cursor.index(), 0);
        cursor.advance(-5);
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.offset_index(-3), 0);
    }
}
