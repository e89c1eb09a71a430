/*!
 * Folder structure rendering
 */

use clap::ValueEnum;
use strum::Display;

use crate::types::Entry;

/// Presentation of the structure view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TreeStyle {
    /// Box-drawing connectors (`├──`, `└──`)
    #[default]
    Connectors,
    /// Two spaces per level
    Indent,
}

const TEE: &str = "├── ";
const CORNER: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Render the walked entries as a tree headed by `root_name/`
pub fn render_structure(root_name: &str, entries: &[Entry], style: TreeStyle) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(format!("{}/", root_name));

    match style {
        TreeStyle::Indent => {
            for entry in entries {
                lines.push(format!("{}{}", "  ".repeat(entry.depth), label(entry)));
            }
        }
        TreeStyle::Connectors => {
            let last = last_sibling_flags(entries);
            // ancestors[d] is set when the ancestor at depth d + 1 was a last sibling
            let mut ancestors: Vec<bool> = Vec::new();

            for (entry, &is_last) in entries.iter().zip(&last) {
                let level = entry.depth.saturating_sub(1);
                ancestors.truncate(level);

                let mut line = String::new();
                for &ancestor_last in &ancestors {
                    line.push_str(if ancestor_last { BLANK } else { PIPE });
                }
                line.push_str(if is_last { CORNER } else { TEE });
                line.push_str(&label(entry));
                lines.push(line);

                ancestors.push(is_last);
            }
        }
    }

    lines.join("\n")
}

fn label(entry: &Entry) -> String {
    if entry.is_dir {
        format!("{}/", entry.name())
    } else {
        entry.name().to_string()
    }
}

/// For each entry, whether no later sibling follows it in the sequence.
fn last_sibling_flags(entries: &[Entry]) -> Vec<bool> {
    let mut flags = vec![false; entries.len()];
    let mut sibling_after: Vec<bool> = Vec::new();

    for (i, entry) in entries.iter().enumerate().rev() {
        let level = entry.depth.saturating_sub(1);
        sibling_after.resize(level + 1, false);
        flags[i] = !sibling_after[level];
        sibling_after[level] = true;
    }

    flags
}
