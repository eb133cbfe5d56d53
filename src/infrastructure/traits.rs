//! I/O boundary traits for testability
//!
//! These traits abstract external collaborators (filesystem, terminal,
//! search, snapshot storage), allowing services to be tested with mock
//! implementations.

use std::io;
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::domain::{number_matches, Course, CourseList, Matches, Rank};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;

    /// Entries of a directory, unsorted.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Blocking terminal interaction.
pub trait Prompt: Send + Sync {
    /// Show `message` and read one line (without the trailing newline).
    fn input(&self, message: &str) -> io::Result<String>;

    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&self, message: &str) -> io::Result<bool>;

    /// Print one line of output for the user.
    fn show(&self, line: &str);
}

/// Free-text course search.
pub trait Searcher: Send + Sync {
    /// Matches of `key` in `reference`; an empty key matches everything.
    fn search(&self, reference: &CourseList, key: &str) -> Matches;
}

/// Persistence of the active list.
pub trait SnapshotStore: Send + Sync {
    /// Persisted ranks, `None` if nothing has been saved yet.
    fn load(&self) -> io::Result<Option<Vec<Rank>>>;

    /// Persist the given courses.
    fn save(&self, courses: &[Course]) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect()
    }
}

/// Prompt reading from stdin, writing to stdout.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn input(&self, message: &str) -> io::Result<String> {
        use std::io::Write;

        print!("{} ", message.cyan());
        io::stdout().flush()?;

        let mut buf = String::new();
        if io::stdin().read_line(&mut buf)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        let len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(len);
        Ok(buf)
    }

    fn confirm(&self, message: &str) -> io::Result<bool> {
        let answer = self.input(&format!("{message} (y/N):"))?;
        Ok(matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes"
        ))
    }

    fn show(&self, line: &str) {
        println!("{line}");
    }
}

/// Case-insensitive substring search on course names.
#[derive(Debug, Default)]
pub struct NameSearch;

impl Searcher for NameSearch {
    fn search(&self, reference: &CourseList, key: &str) -> Matches {
        let key = key.trim().to_lowercase();
        number_matches(
            reference
                .iter()
                .filter(|c| c.name.to_lowercase().contains(&key)),
        )
    }
}
