//! Ordered Cartesian products over named axes.
//!
//! Axis order is the declared order, never alphabetical: it drives case naming
//! and generated column suffixes. The last axis varies fastest.

/// A named sequence of values participating in a combination.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis<T> {
    pub name: String,
    pub values: Vec<T>,
}

impl<T> Axis<T> {
    pub fn new(name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Restartable Cartesian product generator.
///
/// Iteration borrows the axes, so the same `Combinations` can be walked any
/// number of times (e.g. once to count cases, once to drive them).
#[derive(Debug, Clone, PartialEq)]
pub struct Combinations<T> {
    axes: Vec<Axis<T>>,
}

impl<T: Clone> Combinations<T> {
    pub fn new(axes: Vec<Axis<T>>) -> Self {
        Self { axes }
    }

    /// One combination made of the given values, one axis per value.
    ///
    /// Used to fill axis groups that were not declared, so every group still
    /// yields a uniform combination sequence.
    pub fn fixed(names: &[&str], values: &[T]) -> Self {
        let axes = names
            .iter()
            .zip(values)
            .map(|(name, value)| Axis::new(*name, vec![value.clone()]))
            .collect();
        Self { axes }
    }

    pub fn axes(&self) -> &[Axis<T>] {
        &self.axes
    }

    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.iter().map(|a| a.name.as_str())
    }

    /// Total number of combinations (product of axis lengths).
    pub fn len(&self) -> usize {
        self.axes.iter().map(|a| a.values.len()).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> CombinationIter<'_, T> {
        CombinationIter {
            axes: &self.axes,
            cursor: vec![0; self.axes.len()],
            remaining: self.len(),
        }
    }
}

impl<'a, T: Clone> IntoIterator for &'a Combinations<T> {
    type Item = Vec<T>;
    type IntoIter = CombinationIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Odometer over the axes: the last index ticks first.
#[derive(Debug, Clone)]
pub struct CombinationIter<'a, T> {
    axes: &'a [Axis<T>],
    cursor: Vec<usize>,
    remaining: usize,
}

impl<T: Clone> Iterator for CombinationIter<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let current: Vec<T> = self
            .axes
            .iter()
            .zip(&self.cursor)
            .map(|(axis, &i)| axis.values[i].clone())
            .collect();

        self.remaining -= 1;
        for (slot, axis) in self.cursor.iter_mut().zip(self.axes).rev() {
            *slot += 1;
            if *slot < axis.values.len() {
                break;
            }
            *slot = 0;
        }

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for CombinationIter<'_, T> {}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn count_matches_product(lens in prop::collection::vec(0usize..4, 1..4)) {
            let axes = lens
                .iter()
                .enumerate()
                .map(|(i, &n)| Axis::new(format!("axis{i}"), (0..n).collect::<Vec<_>>()))
                .collect();
            let combos = Combinations::new(axes);
            let expected: usize = lens.iter().product();
            prop_assert_eq!(combos.iter().count(), expected);
        }
    }
}
