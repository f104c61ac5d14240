use super::Command;
use crate::flag::Flag;
use std::io::{self, Write};

const DESCRIPTION_WRAP_LIMIT: usize = 50;

// Space between table columns
const COLUMN_PADDING: usize = 4;

const HELP_FLAG_ROW: [&str; 3] = ["-h", "--help", "Print documentation for command"];

/// Writes the help for `command`, reached through `path` (command names from the root)
pub fn write_help(mut w: impl Write, command: &Command, path: &[String]) -> io::Result<()> {
    if !command.help.is_empty() {
        write!(&mut w, "{}\n\n", command.help)?;
    }

    writeln!(&mut w, "Usage:")?;
    writeln!(&mut w, "    {}", usage(command, path))?;
    writeln!(&mut w)?;

    if !command.commands.is_empty() {
        let rows = command
            .commands
            .iter()
            .map(|c| {
                [
                    c.alias.unwrap_or(" ").to_string(),
                    c.name.to_string(),
                    c.help.to_string(),
                ]
            })
            .collect::<Vec<_>>();
        write_table(&mut w, "Commands:", &rows)?;
    }

    if !command.required_flags.is_empty() {
        let rows = command
            .required_flags
            .iter()
            .map(|f| flag_row(&**f))
            .collect::<Vec<_>>();
        write_table(&mut w, "Required Flags:", &rows)?;
    }

    let mut rows = command
        .optional_flags
        .iter()
        .map(|f| flag_row(&**f))
        .collect::<Vec<_>>();
    rows.push(HELP_FLAG_ROW.map(String::from));
    write_table(&mut w, "Optional Flags:", &rows)?;

    w.flush()
}

fn usage(command: &Command, path: &[String]) -> String {
    let mut usage = path.join(" ");

    if !command.commands.is_empty() {
        usage.push_str(" [command]");
    }

    for arg in &command.args {
        usage.push_str(&format!(" <{arg}>"));
    }

    usage.push_str(" [flags]");
    usage
}

fn flag_row(flag: &dyn Flag) -> [String; 3] {
    let alias = match flag.alias() {
        Some(alias) => format!("-{alias}"),
        None => " ".to_string(),
    };
    [alias, format!("--{}", flag.name()), flag.description()]
}

// Rows are alias, name, description. Descriptions are wrapped, with continuation lines placed
// under the description column.
fn write_table(mut w: impl Write, title: &str, rows: &[[String; 3]]) -> io::Result<()> {
    writeln!(&mut w, "{title}")?;

    let mut lines = vec![];
    for [alias, name, description] in rows {
        let wrapped = wrap_text(description, DESCRIPTION_WRAP_LIMIT);
        for (i, line) in wrapped.into_iter().enumerate() {
            match i {
                0 => lines.push([alias.clone(), name.clone(), line]),
                _ => lines.push([String::new(), String::new(), line]),
            }
        }
    }

    let alias_width = calculate_col_width(lines.iter().map(|l| &l[0]));
    let name_width = calculate_col_width(lines.iter().map(|l| &l[1]));

    for line in &lines {
        let row = format!("    {:alias_width$}{:name_width$}{}", line[0], line[1], line[2]);
        writeln!(&mut w, "{}", row.trim_end())?;
    }

    writeln!(&mut w)
}

fn calculate_col_width<'a>(cells: impl Iterator<Item = &'a String>) -> usize {
    cells.map(|s| s.chars().count()).max().unwrap_or(0) + COLUMN_PADDING
}

/// Re-wraps multiline `text` so that no line is longer than `max_width` characters, breaking at
/// the last space that fits. Words longer than the limit are cut.
pub(crate) fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = vec![];

    for mut line in text.split('\n') {
        loop {
            if line.chars().count() <= max_width {
                lines.push(line.to_string());
                break;
            }

            let limit = line
                .char_indices()
                .nth(max_width)
                .map_or(line.len(), |(i, _)| i);

            let chop = match line[..limit].rfind(' ') {
                Some(0) => {
                    lines.push(line.to_string());
                    break;
                }
                Some(i) => i,
                None => limit,
            };

            lines.push(line[..chop].to_string());

            let rest = &line[chop..];
            line = rest.strip_prefix(' ').unwrap_or(rest);
            if line.is_empty() {
                break;
            }
        }
    }

    lines
}
