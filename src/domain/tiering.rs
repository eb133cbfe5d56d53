//! Tier construction: split a course list into equal contiguous tiers and
//! draw one random representative from each.
//!
//! The pipeline runs `sized -> repaired -> chunked -> seeded` with no retries.
//! [`TierPlan::new`] performs the size check; [`TierPlan::build`] runs the rest
//! once the caller has decided whether a destructive repair is acceptable.

use std::fmt;

use tracing::debug;

use crate::domain::{Course, CourseList, DomainError, RandomSource, SizeError};

/// How a tier-derived list came to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieringProvenance {
    /// Input list captured before repair
    pub static_list: Vec<Course>,
    /// Courses dropped by the repair step, in removal order
    pub removed: Vec<Course>,
    pub tier_count: usize,
    pub chunk_size: usize,
    /// Contiguous chunks of the repaired list
    pub tiers: Vec<Vec<Course>>,
    /// One representative per tier, in tier order
    pub tiered_list: Vec<Course>,
}

/// Caller's answer to a repair request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairDecision {
    Confirmed,
    Declined,
}

/// Describes a list that does not divide evenly into the requested tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairNotice {
    pub len: usize,
    pub tier_count: usize,
    /// Number of courses the repair step would remove
    pub surplus: usize,
}

impl fmt::Display for RepairNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} courses cannot be split evenly into {} tiers; {} random course(s) will be dropped",
            self.len, self.tier_count, self.surplus
        )
    }
}

/// Result of running a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierOutcome {
    Built(CourseList),
    /// Repair was required and declined; the source is untouched.
    Declined(RepairNotice),
}

/// A size-checked tiering request.
#[derive(Debug, Clone, Copy)]
pub struct TierPlan<'a> {
    source: &'a CourseList,
    tier_count: usize,
}

impl<'a> TierPlan<'a> {
    /// Validate that `source` can be split into `tier_count` tiers.
    ///
    /// # Errors
    /// - `EmptyList` if `source` is empty or `tier_count` is zero.
    /// - `SizeError::NotEnoughCourses` if there are fewer courses than tiers.
    pub fn new(source: &'a CourseList, tier_count: usize) -> Result<Self, DomainError> {
        if tier_count == 0 {
            return Err(DomainError::EmptyList("tier count must be positive"));
        }
        if source.is_empty() {
            return Err(DomainError::EmptyList("no courses to tier"));
        }
        if source.len() < tier_count {
            return Err(SizeError::NotEnoughCourses {
                requested: tier_count,
                available: source.len(),
            }
            .into());
        }
        Ok(Self { source, tier_count })
    }

    pub fn tier_count(&self) -> usize {
        self.tier_count
    }

    /// `Some` when the source must be repaired before chunking.
    pub fn repair_notice(&self) -> Option<RepairNotice> {
        let surplus = self.source.len() % self.tier_count;
        (surplus != 0).then_some(RepairNotice {
            len: self.source.len(),
            tier_count: self.tier_count,
            surplus,
        })
    }

    /// Repair (if needed and confirmed), chunk and seed.
    ///
    /// `decision` is only consulted when [`Self::repair_notice`] is `Some`.
    pub fn build(
        self,
        decision: RepairDecision,
        rng: &mut dyn RandomSource,
    ) -> Result<TierOutcome, DomainError> {
        let static_list = self.source.courses().to_vec();
        let mut working = static_list.clone();

        let removed = match self.repair_notice() {
            Some(notice) if decision == RepairDecision::Declined => {
                debug!("build: repair declined ({notice})");
                return Ok(TierOutcome::Declined(notice));
            }
            Some(_) => repair(&mut working, self.tier_count, rng),
            None => Vec::new(),
        };

        let tiers = chunk(&working, self.tier_count)?;
        let tiered_list = seed(&tiers, rng);
        debug!(
            "build: {} tiers of {} from {} courses ({} dropped)",
            tiers.len(),
            tiers.first().map_or(0, Vec::len),
            static_list.len(),
            removed.len()
        );

        let provenance = TieringProvenance {
            static_list,
            removed,
            tier_count: self.tier_count,
            chunk_size: working.len() / self.tier_count,
            tiers,
            tiered_list: tiered_list.clone(),
        };
        Ok(TierOutcome::Built(CourseList::tiered(tiered_list, provenance)))
    }
}

/// Remove random courses until `courses.len()` is a multiple of `tier_count`.
///
/// Returns the removed courses in removal order.
pub fn repair(
    courses: &mut Vec<Course>,
    tier_count: usize,
    rng: &mut dyn RandomSource,
) -> Vec<Course> {
    let mut removed = Vec::new();
    if tier_count == 0 {
        return removed;
    }
    while !courses.is_empty() && courses.len() % tier_count != 0 {
        let index = rng.index(courses.len());
        removed.push(courses.remove(index));
    }
    removed
}

/// Split `courses` into `tier_count` contiguous, equal-size chunks.
///
/// # Errors
/// - `EmptyList` if `tier_count` is zero.
/// - `SizeError::NotEnoughCourses` if there are fewer courses than tiers.
/// - `SizeError::Indivisible` if the length is not a multiple of `tier_count`.
pub fn chunk(courses: &[Course], tier_count: usize) -> Result<Vec<Vec<Course>>, DomainError> {
    if tier_count == 0 {
        return Err(DomainError::EmptyList("tier count must be positive"));
    }
    if courses.len() < tier_count {
        return Err(SizeError::NotEnoughCourses {
            requested: tier_count,
            available: courses.len(),
        }
        .into());
    }
    if courses.len() % tier_count != 0 {
        return Err(SizeError::Indivisible {
            len: courses.len(),
            tier_count,
        }
        .into());
    }
    let chunk_size = courses.len() / tier_count;
    Ok(courses
        .chunks_exact(chunk_size)
        .map(<[Course]>::to_vec)
        .collect())
}

/// Draw one representative per tier, in tier order.
///
/// Every tier must be non-empty; [`chunk`] guarantees this.
pub fn seed(tiers: &[Vec<Course>], rng: &mut dyn RandomSource) -> Vec<Course> {
    debug_assert!(tiers.iter().all(|t| !t.is_empty()), "empty tier");
    tiers
        .iter()
        .map(|tier| tier[rng.index(tier.len())].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coord, Rank};

    /// Always returns the same offset, clamped into range.
    struct Fixed(usize);

    impl RandomSource for Fixed {
        fn index(&mut self, upper: usize) -> usize {
            self.0.min(upper - 1)
        }
    }

    fn courses(ranks: std::ops::RangeInclusive<Rank>) -> Vec<Course> {
        ranks
            .map(|r| Course::new(r, Coord::default(), format!("c{r}")))
            .collect()
    }

    fn ranks(courses: &[Course]) -> Vec<Rank> {
        courses.iter().map(|c| c.rank).collect()
    }

    #[test]
    fn given_divisible_list_when_chunking_then_contiguous_equal_chunks() {
        let tiers = chunk(&courses(1..=6), 3).unwrap();
        let got: Vec<Vec<Rank>> = tiers.iter().map(|t| ranks(t)).collect();
        assert_eq!(got, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
    }

    #[test]
    fn given_indivisible_list_when_chunking_then_size_error() {
        let err = chunk(&courses(1..=7), 3).unwrap_err();
        assert_eq!(
            err,
            DomainError::Size(SizeError::Indivisible {
                len: 7,
                tier_count: 3
            })
        );
    }

    #[test]
    fn given_zero_tiers_when_chunking_then_empty_list_error() {
        assert!(matches!(
            chunk(&courses(1..=4), 0),
            Err(DomainError::EmptyList(_))
        ));
    }

    #[test]
    fn given_surplus_when_repairing_then_removes_until_divisible() {
        let mut working = courses(1..=11);
        let removed = repair(&mut working, 4, &mut Fixed(0));
        assert_eq!(working.len(), 8);
        assert_eq!(ranks(&removed), vec![1, 2, 3]);
    }

    #[test]
    fn given_tiers_when_seeding_then_one_per_tier() {
        let tiers = chunk(&courses(1..=6), 2).unwrap();
        let picked = seed(&tiers, &mut Fixed(2));
        assert_eq!(ranks(&picked), vec![3, 6]);
    }

    #[test]
    fn given_chunked_tiers_when_seeding_then_pick_count_equals_tier_count() {
        for tier_count in [1, 2, 3, 4, 6, 12] {
            let tiers = chunk(&courses(1..=12), tier_count).unwrap();
            assert_eq!(seed(&tiers, &mut Fixed(0)).len(), tier_count);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "empty tier")]
    fn given_empty_tier_when_seeding_then_panics() {
        let tiers = vec![courses(1..=2), Vec::new()];
        seed(&tiers, &mut Fixed(0));
    }
}
