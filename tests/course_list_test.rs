//! Tests for CourseList set operations and reconciliation

use rstest::{fixture, rstest};

use coursetier::domain::{Coord, Course, CourseList, DomainError, Rank};

fn course(rank: Rank) -> Course {
    Course::new(rank, Coord::new(1, 1, (rank % 4) as u8 + 1), format!("course {rank}"))
}

fn list(ranks: &[Rank]) -> CourseList {
    CourseList::from_courses(ranks.iter().copied().map(course).collect()).unwrap()
}

#[fixture]
fn registry() -> CourseList {
    list(&[1, 2, 3, 4, 5, 6])
}

// ============================================================
// difference()
// ============================================================

#[rstest]
#[case(&[1, 2, 3, 4, 5, 6], &[2, 5], &[1, 3, 4, 6])]
#[case(&[1, 2, 3, 4, 5, 6], &[], &[1, 2, 3, 4, 5, 6])]
#[case(&[1, 2, 3, 4, 5, 6], &[1, 2, 3, 4, 5, 6], &[])]
#[case(&[1, 2, 3, 4, 5, 6], &[7, 8], &[1, 2, 3, 4, 5, 6])]
fn given_two_lists_when_subtracting_then_sorted_remainder(
    #[case] left: &[Rank],
    #[case] right: &[Rank],
    #[case] expected: &[Rank],
) {
    let diff = list(left).difference(&list(right));
    assert_eq!(diff.ranks(), expected);
}

#[rstest]
fn given_unsorted_left_when_subtracting_then_result_sorted(registry: CourseList) {
    let left = list(&[6, 2, 4, 1]);
    let diff = &left - &list(&[4]);
    assert_eq!(diff.ranks(), vec![1, 2, 6]);

    // operator and method agree
    assert_eq!(&registry - &left, registry.difference(&left));
}

#[test]
fn given_same_rank_different_name_when_subtracting_then_identity_is_rank() {
    let left = list(&[1, 2]);
    let right = CourseList::from_courses(vec![Course::new(2, Coord::default(), "renamed")]).unwrap();
    assert_eq!(left.difference(&right).ranks(), vec![1]);
}

// ============================================================
// construction
// ============================================================

#[test]
fn given_duplicate_rank_when_building_then_rejected() {
    let err = CourseList::from_courses(vec![course(3), course(3)]).unwrap_err();
    assert_eq!(err, DomainError::DuplicateRank(3));
}

#[test]
fn given_unsorted_duplicates_when_collecting_then_sorted_and_deduplicated() {
    let collected: CourseList = [course(5), course(1), course(5), course(3)]
        .into_iter()
        .collect();
    assert_eq!(collected.ranks(), vec![1, 3, 5]);
    assert!(!collected.is_tiered());
}

// ============================================================
// reconcile()
// ============================================================

#[rstest]
fn given_persisted_ranks_when_reconciling_then_canonical_registry_courses(registry: CourseList) {
    let active = CourseList::reconcile(&registry, &[5, 2, 2, 99]);

    assert_eq!(active.ranks(), vec![2, 5]);
    assert_eq!(active.get(5).unwrap().name, "course 5");
}

#[rstest]
fn given_no_ranks_when_reconciling_then_empty(registry: CourseList) {
    assert!(CourseList::reconcile(&registry, &[]).is_empty());
}

// ============================================================
// add / remove
// ============================================================

#[rstest]
fn given_active_course_when_adding_again_then_no_op(mut registry: CourseList) {
    assert!(!registry.add(course(3)));
    assert_eq!(registry.len(), 6);

    assert!(registry.add(course(9)));
    assert_eq!(registry.ranks(), vec![1, 2, 3, 4, 5, 6, 9]);
}

#[rstest]
fn given_rank_when_removing_then_returns_course_once(mut registry: CourseList) {
    assert_eq!(registry.remove(4).map(|c| c.rank), Some(4));
    assert!(registry.remove(4).is_none());
    assert!(!registry.contains(4));
}

#[rstest]
fn given_list_when_displaying_then_one_course_per_line(registry: CourseList) {
    let shown = registry.to_string();
    assert_eq!(shown.lines().count(), 6);
    assert!(shown.lines().next().unwrap().contains("01"));
}
