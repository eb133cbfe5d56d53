//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use termtree::Tree;

use crate::domain::{Course, CourseList};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print diff addition (green +)
pub fn diff_add(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "+".green(), msg);
}

/// Print diff removal (red -)
pub fn diff_remove(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {} {}", "-".red(), msg);
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print courses one per line with a count footer.
pub fn courses(list: &CourseList, empty: &str, footer: &str) {
    if list.is_empty() {
        info(empty);
        return;
    }
    for course in list {
        detail(course);
    }
    info(&format!("{} {}", list.len(), footer));
}

/// Render a tier-derived list as a tree: one branch per tier, the
/// representative marked with `*`.
pub fn tier_tree(list: &CourseList) -> String {
    let Some(provenance) = list.tiering() else {
        return list.to_string();
    };

    let mut root = Tree::new(format!(
        "{} tiers of {} ({} source courses, {} dropped)",
        provenance.tier_count,
        provenance.chunk_size,
        provenance.static_list.len(),
        provenance.removed.len()
    ));
    for (i, (tier, pick)) in provenance
        .tiers
        .iter()
        .zip(&provenance.tiered_list)
        .enumerate()
    {
        let leaves = tier.iter().map(|c| Tree::new(mark(c, pick)));
        root.push(Tree::new(format!("Tier {}", i + 1)).with_leaves(leaves));
    }
    root.to_string()
}

fn mark(course: &Course, pick: &Course) -> String {
    if course == pick {
        format!("* {course}")
    } else {
        format!("  {course}")
    }
}
