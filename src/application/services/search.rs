//! Search-driven edits of the active list
//!
//! Both flows search a reference list, present the numbered matches, and apply
//! a selection token (`all` or one key). The active list is always passed in
//! explicitly; the service never holds list state.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{Course, CourseList, DomainError, Matches, Selection};
use crate::infrastructure::traits::{Prompt, Searcher};

const SEARCH_PROMPT: &str = "Search for a course (blank matches all):";

/// Service for search-and-add / search-and-remove.
pub struct SearchService {
    searcher: Arc<dyn Searcher>,
    prompt: Arc<dyn Prompt>,
}

impl SearchService {
    /// Create a new search service.
    pub fn new(searcher: Arc<dyn Searcher>, prompt: Arc<dyn Prompt>) -> Self {
        Self { searcher, prompt }
    }

    /// Search `reference` for `key`.
    ///
    /// # Errors
    /// - `EmptyList` if `reference` is empty.
    /// - `NoMatch` if nothing matches.
    pub fn find(&self, reference: &CourseList, key: &str) -> ApplicationResult<Matches> {
        if reference.is_empty() {
            return Err(DomainError::EmptyList("nothing to search").into());
        }
        let matches = self.searcher.search(reference, key);
        debug!("find: key={:?} matches={}", key, matches.len());
        if matches.is_empty() {
            return Err(DomainError::NoMatch {
                key: key.to_string(),
            }
            .into());
        }
        Ok(matches)
    }

    /// Add the courses selected by `token` to `active`.
    ///
    /// Returns the courses actually added (already present ones are skipped).
    pub fn add_matches(
        &self,
        active: &mut CourseList,
        matches: &Matches,
        token: &str,
    ) -> ApplicationResult<Vec<Course>> {
        let picked = Selection::parse(token)?.resolve(matches)?;
        let added: Vec<Course> = picked
            .into_iter()
            .filter(|c| active.add(c.clone()))
            .collect();
        info!("added {} course(s)", added.len());
        Ok(added)
    }

    /// Remove the courses selected by `token` from `active`.
    ///
    /// Returns the courses actually removed.
    pub fn remove_matches(
        &self,
        active: &mut CourseList,
        matches: &Matches,
        token: &str,
    ) -> ApplicationResult<Vec<Course>> {
        let picked = Selection::parse(token)?.resolve(matches)?;
        let removed: Vec<Course> = picked
            .into_iter()
            .filter_map(|c| active.remove(c.rank))
            .collect();
        info!("removed {} course(s)", removed.len());
        Ok(removed)
    }

    /// Interactive search of `reference`; selected matches are added to `active`.
    pub fn search_and_add(
        &self,
        active: &mut CourseList,
        reference: &CourseList,
    ) -> ApplicationResult<Vec<Course>> {
        let key = self.prompt.input(SEARCH_PROMPT).with_context("read search key")?;
        let matches = self.find(reference, &key)?;
        let token = self.present(&matches, "add")?;
        self.add_matches(active, &matches, &token)
    }

    /// Interactive search of `active` itself; selected matches are removed.
    pub fn search_and_remove(&self, active: &mut CourseList) -> ApplicationResult<Vec<Course>> {
        let key = self.prompt.input(SEARCH_PROMPT).with_context("read search key")?;
        let matches = self.find(active, &key)?;
        let token = self.present(&matches, "remove")?;
        self.remove_matches(active, &matches, &token)
    }

    fn present(&self, matches: &Matches, verb: &str) -> ApplicationResult<String> {
        for (key, course) in matches {
            self.prompt.show(&format!("{key}: {course}"));
        }
        self.prompt
            .input(&format!(
                "Key of the course to {verb} ('all' for every match):"
            ))
            .with_context("read selection")
    }
}
