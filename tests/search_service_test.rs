//! Tests for SearchService with a scripted prompt

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use rstest::{fixture, rstest};

use coursetier::application::services::SearchService;
use coursetier::application::ApplicationError;
use coursetier::domain::{Coord, Course, CourseList, DomainError, Rank};
use coursetier::infrastructure::traits::{NameSearch, Prompt};

/// Answers `input` from a script; EOF once the script runs out.
#[derive(Default)]
struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    shown: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    fn new(answers: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().map(|s| s.to_string()).collect()),
            shown: Mutex::default(),
        })
    }

    fn shown(&self) -> Vec<String> {
        self.shown.lock().unwrap().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn input(&self, _message: &str) -> io::Result<String> {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn confirm(&self, message: &str) -> io::Result<bool> {
        Ok(matches!(self.input(message)?.as_str(), "y" | "yes"))
    }

    fn show(&self, line: &str) {
        self.shown.lock().unwrap().push(line.to_string());
    }
}

fn course(rank: Rank, name: &str) -> Course {
    Course::new(rank, Coord::default(), name)
}

#[fixture]
fn reference() -> CourseList {
    CourseList::from_courses(vec![
        course(1, "Mario Kart Stadium"),
        course(4, "Mario Circuit"),
        course(7, "Rainbow Road"),
    ])
    .unwrap()
}

fn service(prompt: Arc<ScriptedPrompt>) -> SearchService {
    SearchService::new(Arc::new(NameSearch), prompt)
}

fn domain(err: &ApplicationError) -> &DomainError {
    err.as_domain().expect("domain error")
}

// ============================================================
// search_and_add()
// ============================================================

#[rstest]
fn given_empty_key_and_all_when_adding_then_every_reference_course_added(
    reference: CourseList,
) {
    let prompt = ScriptedPrompt::new(&["", "all"]);
    let mut active = CourseList::new();

    let added = service(prompt.clone())
        .search_and_add(&mut active, &reference)
        .unwrap();

    assert_eq!(added.len(), 3);
    assert_eq!(active.ranks(), vec![1, 4, 7]);
    assert_eq!(
        prompt.shown(),
        vec![
            "0: (0-0-0, 01) Mario Kart Stadium",
            "1: (0-0-0, 04) Mario Circuit",
            "2: (0-0-0, 07) Rainbow Road",
        ]
    );
}

#[rstest]
fn given_key_selection_when_adding_then_only_that_match_added(reference: CourseList) {
    let prompt = ScriptedPrompt::new(&["mario", "1"]);
    let mut active = CourseList::new();

    let added = service(prompt).search_and_add(&mut active, &reference).unwrap();

    assert_eq!(added.iter().map(|c| c.rank).collect::<Vec<_>>(), vec![4]);
    assert_eq!(active.ranks(), vec![4]);
}

#[rstest]
fn given_course_already_active_when_adding_then_skipped(reference: CourseList) {
    let prompt = ScriptedPrompt::new(&["road", "all"]);
    let mut active = CourseList::from_courses(vec![course(7, "Rainbow Road")]).unwrap();

    let added = service(prompt).search_and_add(&mut active, &reference).unwrap();

    assert!(added.is_empty());
    assert_eq!(active.len(), 1);
}

#[rstest]
fn given_unknown_key_when_adding_then_no_match_and_unchanged(reference: CourseList) {
    let prompt = ScriptedPrompt::new(&["bowser"]);
    let mut active = CourseList::new();

    let err = service(prompt)
        .search_and_add(&mut active, &reference)
        .unwrap_err();

    assert_eq!(
        domain(&err),
        &DomainError::NoMatch {
            key: "bowser".into()
        }
    );
    assert!(active.is_empty());
}

#[rstest]
#[case("7")]
#[case("x")]
#[case("")]
fn given_bad_selection_when_adding_then_selection_error_and_unchanged(
    reference: CourseList,
    #[case] token: &str,
) {
    let prompt = ScriptedPrompt::new(&["", token]);
    let mut active = CourseList::new();

    let err = service(prompt)
        .search_and_add(&mut active, &reference)
        .unwrap_err();

    assert!(matches!(domain(&err), DomainError::Selection(_)));
    assert!(active.is_empty());
}

#[test]
fn given_empty_reference_when_adding_then_empty_list_error() {
    let prompt = ScriptedPrompt::new(&[""]);
    let err = service(prompt)
        .search_and_add(&mut CourseList::new(), &CourseList::new())
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::EmptyList(_)));
}

#[rstest]
fn given_closed_input_when_adding_then_io_error(reference: CourseList) {
    let prompt = ScriptedPrompt::new(&[]);
    let err = service(prompt)
        .search_and_add(&mut CourseList::new(), &reference)
        .unwrap_err();
    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
}

// ============================================================
// search_and_remove()
// ============================================================

#[rstest]
fn given_key_selection_when_removing_then_only_that_course_removed(reference: CourseList) {
    let prompt = ScriptedPrompt::new(&["MARIO", "0"]);
    let mut active = reference;

    let removed = service(prompt).search_and_remove(&mut active).unwrap();

    assert_eq!(removed.iter().map(|c| c.rank).collect::<Vec<_>>(), vec![1]);
    assert_eq!(active.ranks(), vec![4, 7]);
}

#[rstest]
fn given_all_when_removing_then_every_match_removed(reference: CourseList) {
    let prompt = ScriptedPrompt::new(&["mario", "ALL"]);
    let mut active = reference;

    let removed = service(prompt).search_and_remove(&mut active).unwrap();

    assert_eq!(removed.len(), 2);
    assert_eq!(active.ranks(), vec![7]);
}

#[rstest]
fn given_no_match_when_removing_then_active_untouched(reference: CourseList) {
    let prompt = ScriptedPrompt::new(&["luigi"]);
    let mut active = reference.clone();

    let err = service(prompt).search_and_remove(&mut active).unwrap_err();

    assert!(matches!(domain(&err), DomainError::NoMatch { .. }));
    assert_eq!(active, reference);
}

// ============================================================
// non-interactive helpers
// ============================================================

#[rstest]
fn given_matches_when_token_applied_directly_then_same_semantics(reference: CourseList) {
    let svc = service(ScriptedPrompt::new(&[]));
    let matches = svc.find(&reference, "road").unwrap();
    assert_eq!(matches.len(), 1);

    let mut active = reference.clone();
    let removed = svc.remove_matches(&mut active, &matches, "0").unwrap();
    assert_eq!(removed[0].rank, 7);

    let added = svc.add_matches(&mut active, &matches, "all").unwrap();
    assert_eq!(added[0].rank, 7);
    assert_eq!(active.len(), 3);
}
