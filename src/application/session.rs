//! Interactive session state: registry, active list and edit history

use tracing::debug;

use crate::application::services::{SearchService, TierService};
use crate::application::ApplicationResult;
use crate::domain::{
    Action, Course, CourseList, DomainError, History, RandomSource, Rank, TierOutcome,
};

/// The registry plus the user's working subset of it.
///
/// Every edit of the active list goes through the session so it lands in
/// the history and marks the session dirty.
#[derive(Debug, Clone)]
pub struct Session {
    registry: CourseList,
    active: CourseList,
    history: History,
    dirty: bool,
}

impl Session {
    pub fn new(registry: CourseList, active: CourseList) -> Self {
        Self {
            registry,
            active,
            history: History::new(),
            dirty: false,
        }
    }

    pub fn registry(&self) -> &CourseList {
        &self.registry
    }

    pub fn active(&self) -> &CourseList {
        &self.active
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Registry courses not in the active list.
    pub fn removed(&self) -> CourseList {
        &self.registry - &self.active
    }

    /// Unsaved edits exist.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Add a course to the active list. Returns `false` if already active.
    pub fn add(&mut self, course: Course) -> bool {
        let added = self.active.add(course.clone());
        if added {
            self.record(Action::Add(course));
        }
        added
    }

    /// Remove an active course by rank.
    pub fn remove(&mut self, rank: Rank) -> ApplicationResult<Course> {
        let course = self
            .active
            .remove(rank)
            .ok_or(DomainError::UnknownRank(rank))?;
        self.record(Action::Remove(course.clone()));
        Ok(course)
    }

    /// Pick a random active course and remove it.
    pub fn draw(&mut self, rng: &mut dyn RandomSource) -> ApplicationResult<Course> {
        if self.active.is_empty() {
            return Err(DomainError::EmptyList("no active courses left").into());
        }
        let index = rng.index(self.active.len());
        let rank = self.active.courses()[index].rank;
        debug!("draw: index={} rank={}", index, rank);
        self.remove(rank)
    }

    /// Revert the most recent edit.
    pub fn undo(&mut self) -> ApplicationResult<Action> {
        let action = self
            .history
            .back()
            .ok_or(DomainError::HistoryExhausted("undo"))?;
        self.apply(&action.inverse());
        Ok(action)
    }

    /// Re-apply the most recently reverted edit.
    pub fn redo(&mut self) -> ApplicationResult<Action> {
        let action = self
            .history
            .forward()
            .ok_or(DomainError::HistoryExhausted("redo"))?;
        self.apply(&action);
        Ok(action)
    }

    /// Make every registry course active again and forget the history.
    pub fn reset(&mut self) {
        let mut active = self.registry.clone();
        active.sort();
        self.active = active;
        self.history.reset();
        self.dirty = true;
    }

    /// Interactive search among removed courses; selected ones become active.
    pub fn search_and_add(&mut self, search: &SearchService) -> ApplicationResult<Vec<Course>> {
        let reference = self.removed();
        let added = search.search_and_add(&mut self.active, &reference)?;
        self.record_all(added.iter().cloned().map(Action::Add));
        Ok(added)
    }

    /// Interactive search among active courses; selected ones are removed.
    pub fn search_and_remove(&mut self, search: &SearchService) -> ApplicationResult<Vec<Course>> {
        let removed = search.search_and_remove(&mut self.active)?;
        self.record_all(removed.iter().cloned().map(Action::Remove));
        Ok(removed)
    }

    /// Non-interactive search-and-add with a known selection token.
    pub fn add_matching(
        &mut self,
        search: &SearchService,
        key: &str,
        token: &str,
    ) -> ApplicationResult<Vec<Course>> {
        let reference = self.removed();
        let matches = search.find(&reference, key)?;
        let added = search.add_matches(&mut self.active, &matches, token)?;
        self.record_all(added.iter().cloned().map(Action::Add));
        Ok(added)
    }

    /// Non-interactive search-and-remove with a known selection token.
    pub fn remove_matching(
        &mut self,
        search: &SearchService,
        key: &str,
        token: &str,
    ) -> ApplicationResult<Vec<Course>> {
        let matches = search.find(&self.active, key)?;
        let removed = search.remove_matches(&mut self.active, &matches, token)?;
        self.record_all(removed.iter().cloned().map(Action::Remove));
        Ok(removed)
    }

    /// Build tiers from the active list. The active list is not modified.
    pub fn tier(
        &self,
        tiers: &TierService,
        tier_count: usize,
        rng: &mut dyn RandomSource,
    ) -> ApplicationResult<TierOutcome> {
        tiers.build(&self.active, tier_count, rng)
    }

    /// Remove courses used by a completed tiered draw.
    pub fn retire(&mut self, courses: &[Course]) {
        for course in courses {
            if let Some(c) = self.active.remove(course.rank) {
                self.record(Action::Remove(c));
            }
        }
    }

    fn apply(&mut self, action: &Action) {
        match action {
            Action::Add(c) => {
                self.active.add(c.clone());
            }
            Action::Remove(c) => {
                self.active.remove(c.rank);
            }
        }
        self.dirty = true;
    }

    fn record(&mut self, action: Action) {
        self.history.push(action);
        self.dirty = true;
    }

    fn record_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.record(action);
        }
    }
}
