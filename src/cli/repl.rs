//! Interactive session loop
//!
//! One command per line; errors are printed and the loop continues.

use std::io;

use tracing::{debug, info};

use crate::application::Session;
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use rand::rngs::StdRng;

use crate::domain::{Course, RandomSource, TierOutcome};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

const PROMPT: &str = ":>";

/// Run the REPL until the user quits or input closes.
pub fn run(container: &ServiceContainer) -> CliResult<()> {
    let session = container.open_session()?;
    let mut repl = Repl {
        container,
        session,
        rng: container.rng(),
    };
    repl.run()
}

struct Repl<'a> {
    container: &'a ServiceContainer,
    session: Session,
    rng: StdRng,
}

/// What the loop does after a command.
enum Flow {
    Continue,
    Quit,
}

impl Repl<'_> {
    fn run(&mut self) -> CliResult<()> {
        output::info("Running. Enter 'help' for help information.");
        loop {
            let line = match self.read(PROMPT) {
                Ok(line) => line,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    // nobody left to answer a prompt
                    info!("input closed");
                    if self.session.is_dirty() {
                        self.save()?;
                    }
                    output::info("Quitting...");
                    return Ok(());
                }
                Err(e) => return Err(InfraError::io("reading input", e).into()),
            };

            match self.dispatch(line.trim()) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => output::error(&e),
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, command: &str) -> CliResult<Flow> {
        debug!("dispatch: {:?}", command);
        match command.to_lowercase().as_str() {
            "" => self.draw()?,
            "q" | "quit" => return self.quit(),
            "help" => help(),
            "save" => self.save()?,
            "remaining" | "re" | "ls" => output::courses(
                self.session.active(),
                "The course list is empty.",
                "courses in the list",
            ),
            "used" => output::courses(
                &self.session.removed(),
                "No courses have been used.",
                "courses have been used",
            ),
            "history" => output::info(self.session.history()),
            "reset" => self.reset()?,
            "back" => {
                let action = self.session.undo()?;
                output::action("Undone", &action);
            }
            "forward" => {
                let action = self.session.redo()?;
                output::action("Redone", &action);
            }
            "add" => {
                for course in self.session.search_and_add(&self.container.search)? {
                    output::diff_add(&course);
                }
            }
            "remove" | "rm" | "pop" => {
                for course in self.session.search_and_remove(&self.container.search)? {
                    output::diff_remove(&course);
                }
            }
            "tier" => self.tier()?,
            _ => output::warning("Unrecognized command."),
        }
        Ok(Flow::Continue)
    }

    fn draw(&mut self) -> CliResult<()> {
        if self.session.active().is_empty() {
            output::info("No active courses left, restoring the full registry.");
            self.session.reset();
            return Ok(());
        }
        let course = self.session.draw(&mut self.rng)?;
        output::header(&course);
        Ok(())
    }

    fn save(&mut self) -> CliResult<()> {
        self.container.save_session(&mut self.session)?;
        output::success("Saved.");
        Ok(())
    }

    fn quit(&mut self) -> CliResult<Flow> {
        if self.session.is_dirty() && self.confirm("Save changes before quitting?")? {
            self.save()?;
        }
        output::info("Quitting...");
        Ok(Flow::Quit)
    }

    fn reset(&mut self) -> CliResult<()> {
        if self.confirm("Make every course active again and clear history?")? {
            self.session.reset();
            output::success("Course list reset.");
        } else {
            output::info("Cancelled reset.");
        }
        Ok(())
    }

    fn tier(&mut self) -> CliResult<()> {
        let input = self
            .read("Number of tiers:")
            .map_err(|e| InfraError::io("reading tier count", e))?;
        let count: usize = input
            .trim()
            .parse()
            .map_err(|_| CliError::InvalidArgs(format!("'{}' is not a number", input.trim())))?;

        match self
            .session
            .tier(&self.container.tier, count, &mut self.rng)?
        {
            TierOutcome::Built(list) => {
                output::info(&output::tier_tree(&list));
                if self.draw_tiered(list.courses().to_vec())? {
                    self.session.retire(list.courses());
                }
            }
            TierOutcome::Declined(notice) => {
                output::info(&format!("Tiering cancelled: {notice}"));
            }
        }
        Ok(())
    }

    /// Draw the tier representatives one by one in random order.
    ///
    /// Returns `true` when every representative was drawn, `false` on `back`.
    fn draw_tiered(&mut self, mut remaining: Vec<Course>) -> CliResult<bool> {
        output::info("Drawing from the tiered list (Enter to draw, 'ls' to list, 'back' to abort).");
        while !remaining.is_empty() {
            let line = self
                .read(PROMPT)
                .map_err(|e| InfraError::io("reading input", e))?;
            match line.trim().to_lowercase().as_str() {
                "" => {
                    let index = self.rng.index(remaining.len());
                    output::header(&remaining.remove(index));
                }
                "ls" => {
                    for course in &remaining {
                        output::detail(course);
                    }
                }
                "back" => {
                    output::info("Returning to main list...");
                    return Ok(false);
                }
                _ => output::warning("Unrecognized command."),
            }
        }
        output::info("Tiered list exhausted. Returning to main list...");
        Ok(true)
    }

    fn read(&self, message: &str) -> io::Result<String> {
        self.container.prompt.input(message)
    }

    fn confirm(&self, message: &str) -> CliResult<bool> {
        let ok = self
            .container
            .prompt
            .confirm(message)
            .map_err(|e| InfraError::io("reading confirmation", e))?;
        Ok(ok)
    }
}

fn help() {
    output::header("Commands");
    output::detail("<enter>            draw and remove a random course");
    output::detail("q, quit            exit (asks to save unsaved changes)");
    output::detail("<eof>              exit, saving unsaved changes");
    output::detail("help               show this text");
    output::detail("save               save the active list");
    output::detail("remaining, re, ls  list active courses");
    output::detail("used               list removed courses");
    output::detail("history            show undo/redo position");
    output::detail("reset              make every course active again");
    output::detail("back, forward      undo / redo");
    output::detail("add                search removed courses and add matches");
    output::detail("remove, rm, pop    search active courses and remove matches");
    output::detail("tier               build a tiered list and draw from it");
}
