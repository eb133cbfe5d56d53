//! Ordered course container with set-membership operations

use std::collections::HashSet;
use std::fmt;
use std::ops::Sub;

use crate::domain::tiering::TieringProvenance;
use crate::domain::{Course, DomainError, Rank};

/// Ordered sequence of courses with no duplicate rank.
///
/// Lists built from a difference or from persisted data are sorted ascending
/// by rank; `add` and `remove` otherwise preserve insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseList {
    courses: Vec<Course>,
    tiering: Option<TieringProvenance>,
}

impl CourseList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list keeping the given order.
    ///
    /// # Errors
    /// `DomainError::DuplicateRank` if two courses share a rank.
    pub fn from_courses(courses: Vec<Course>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(courses.len());
        for course in &courses {
            if !seen.insert(course.rank) {
                return Err(DomainError::DuplicateRank(course.rank));
            }
        }
        Ok(Self {
            courses,
            tiering: None,
        })
    }

    /// Build a list sorted by rank, keeping the first course seen per rank.
    pub fn from_unsorted(courses: impl IntoIterator<Item = Course>) -> Self {
        let mut courses: Vec<Course> = courses.into_iter().collect();
        // stable sort keeps the first occurrence in front for dedup
        courses.sort_by_key(|c| c.rank);
        courses.dedup_by_key(|c| c.rank);
        Self {
            courses,
            tiering: None,
        }
    }

    /// Canonical courses of `registry` whose rank is in `ranks`, sorted by rank.
    ///
    /// Ranks absent from the registry are ignored.
    pub fn reconcile(registry: &CourseList, ranks: &[Rank]) -> Self {
        let wanted: HashSet<Rank> = ranks.iter().copied().collect();
        Self::from_unsorted(
            registry
                .iter()
                .filter(|c| wanted.contains(&c.rank))
                .cloned(),
        )
    }

    pub(crate) fn tiered(courses: Vec<Course>, provenance: TieringProvenance) -> Self {
        Self {
            courses,
            tiering: Some(provenance),
        }
    }

    /// Courses in `self` but not in `other`, sorted ascending by rank.
    pub fn difference(&self, other: &CourseList) -> CourseList {
        let excluded: HashSet<Rank> = other.iter().map(|c| c.rank).collect();
        Self::from_unsorted(
            self.courses
                .iter()
                .filter(|c| !excluded.contains(&c.rank))
                .cloned(),
        )
    }

    /// Append a course. Returns `false` if its rank is already present.
    pub fn add(&mut self, course: Course) -> bool {
        if self.contains(course.rank) {
            return false;
        }
        self.courses.push(course);
        true
    }

    /// Remove the course with the given rank.
    pub fn remove(&mut self, rank: Rank) -> Option<Course> {
        let index = self.courses.iter().position(|c| c.rank == rank)?;
        Some(self.courses.remove(index))
    }

    pub fn contains(&self, rank: Rank) -> bool {
        self.courses.iter().any(|c| c.rank == rank)
    }

    pub fn get(&self, rank: Rank) -> Option<&Course> {
        self.courses.iter().find(|c| c.rank == rank)
    }

    pub fn sort(&mut self) {
        self.courses.sort_by_key(|c| c.rank);
    }

    #[inline]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Course> {
        self.courses.iter()
    }

    pub fn ranks(&self) -> Vec<Rank> {
        self.courses.iter().map(|c| c.rank).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Whether this list was produced by tier construction.
    pub fn is_tiered(&self) -> bool {
        self.tiering.is_some()
    }

    /// How the tiers were derived, for tier-derived lists.
    pub fn tiering(&self) -> Option<&TieringProvenance> {
        self.tiering.as_ref()
    }
}

impl Sub for &CourseList {
    type Output = CourseList;

    fn sub(self, rhs: Self) -> CourseList {
        self.difference(rhs)
    }
}

impl FromIterator<Course> for CourseList {
    fn from_iter<T: IntoIterator<Item = Course>>(iter: T) -> Self {
        Self::from_unsorted(iter)
    }
}

impl<'a> IntoIterator for &'a CourseList {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.iter()
    }
}

impl fmt::Display for CourseList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for course in &self.courses {
            writeln!(f, "{course}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coord;

    fn list(ranks: &[Rank]) -> CourseList {
        CourseList::from_courses(
            ranks
                .iter()
                .map(|&r| Course::new(r, Coord::default(), format!("course {r}")))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn given_two_lists_when_subtracting_then_result_is_sorted_and_disjoint() {
        let a = list(&[5, 1, 3, 2, 4]);
        let b = list(&[2, 4, 9]);

        let diff = &a - &b;

        assert_eq!(diff.ranks(), vec![1, 3, 5]);
        assert!(diff.iter().all(|c| !b.contains(c.rank)));
    }

    #[test]
    fn given_same_inputs_when_subtracting_twice_then_results_equal() {
        let a = list(&[3, 1, 2]);
        let b = list(&[2]);

        let first = a.difference(&b);
        let second = a.difference(&b);

        assert_eq!(first, second);
        assert_eq!(a.ranks(), vec![3, 1, 2], "operands must not be mutated");
        assert_eq!(b.ranks(), vec![2]);
    }

    #[test]
    fn given_duplicate_ranks_when_building_then_errors() {
        let courses = vec![
            Course::new(1, Coord::default(), "a"),
            Course::new(1, Coord::default(), "b"),
        ];
        assert_eq!(
            CourseList::from_courses(courses),
            Err(DomainError::DuplicateRank(1))
        );
    }

    #[test]
    fn given_existing_rank_when_adding_then_noop() {
        let mut l = list(&[1, 2]);
        assert!(!l.add(Course::new(2, Coord::default(), "dup")));
        assert!(l.add(Course::new(7, Coord::default(), "new")));
        assert_eq!(l.ranks(), vec![1, 2, 7]);
    }

    #[test]
    fn given_rank_when_removing_then_returns_course_and_keeps_order() {
        let mut l = list(&[4, 2, 9]);
        let removed = l.remove(2).unwrap();
        assert_eq!(removed.rank, 2);
        assert_eq!(l.ranks(), vec![4, 9]);
        assert!(l.remove(2).is_none());
    }

    #[test]
    fn given_persisted_ranks_when_reconciling_then_uses_registry_courses_sorted() {
        let registry = list(&[1, 2, 3, 4, 5]);

        let active = CourseList::reconcile(&registry, &[4, 2, 42]);

        assert_eq!(active.ranks(), vec![2, 4]);
        assert_eq!(active.get(4).unwrap().name, "course 4");
    }
}
