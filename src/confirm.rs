/*!
 * Interactive confirmation before processing
 *
 * The structure view is shown first; the user may proceed, abort, or add
 * exclusion patterns with `exclude: pattern1 pattern2`, which re-renders
 * the structure with the extended pattern set.
 */

use std::io::{self, BufRead, Write};

use crate::matcher::PathMatcher;
use crate::scanner::Scanner;
use crate::tree::{render_structure, TreeStyle};

const PROMPT: &str =
    "Process these files? (y/n, or specify additional exclusions with 'exclude: pattern1 pattern2'): ";
const USAGE: &str =
    "Please enter 'y' to proceed, 'n' to abort, or 'exclude: pattern1 pattern2' to add exclusions.";

/// Outcome of the confirmation loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// Continue with the accumulated exclusion patterns
    Proceed(Vec<String>),
    /// Stop without writing anything
    Abort,
}

/// A single parsed reply
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reply {
    Yes,
    No,
    Exclude(Vec<String>),
    Unknown,
}

fn parse_reply(line: &str) -> Reply {
    const EXCLUDE: &str = "exclude:";
    let line = line.trim();

    if line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes") {
        Reply::Yes
    } else if line.eq_ignore_ascii_case("n") || line.eq_ignore_ascii_case("no") {
        Reply::No
    } else if let Some(rest) = line
        .get(..EXCLUDE.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(EXCLUDE))
        .map(|_| &line[EXCLUDE.len()..])
    {
        // Patterns keep their case; matching is case-sensitive
        let patterns = rest
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Reply::Exclude(patterns)
    } else {
        Reply::Unknown
    }
}

/// Show the structure view and loop until the user proceeds or aborts.
///
/// End of input counts as an abort.
pub fn confirm<R: BufRead, W: Write>(
    scanner: &Scanner,
    style: TreeStyle,
    mut patterns: Vec<String>,
    mut input: R,
    mut output: W,
) -> io::Result<Confirmation> {
    let root_name = scanner.root_name()?;

    let entries = scanner.walk(&PathMatcher::new(&patterns))?;
    writeln!(output, "Project Structure:")?;
    writeln!(output, "{}", render_structure(&root_name, &entries, style))?;

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(Confirmation::Abort);
        }

        match parse_reply(&line) {
            Reply::Yes => return Ok(Confirmation::Proceed(patterns)),
            Reply::No => return Ok(Confirmation::Abort),
            Reply::Exclude(added) => {
                writeln!(output, "Adding exclusions: {}", added.join(" "))?;
                log::debug!("Exclusions added during confirmation: {:?}", added);
                patterns.extend(added);

                let entries = scanner.walk(&PathMatcher::new(&patterns))?;
                writeln!(output, "\nUpdated Project Structure:")?;
                writeln!(output, "{}", render_structure(&root_name, &entries, style))?;
            }
            Reply::Unknown => writeln!(output, "{}", USAGE)?,
        }
    }
}
