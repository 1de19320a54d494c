use crate::{error::ExtractError, ranges::CodepointRange};
use std::{fmt, fmt::Write, num::NonZeroUsize};

/// Width of a markdown table cell, not counting the leading `|`.
pub const TABLE_CELL_WIDTH: usize = 23;
/// Width a token is padded to inside a table cell or rule literal.
pub const TOKEN_WIDTH: usize = 19;
/// Column count used when none is given.
pub const DEFAULT_COLUMNS: usize = 4;

/// The layout of the generated text.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum OutputFormat {
    /// Every token on one line, separated by ` | `.
    #[default]
    Plain,
    /// A GitHub flavored markdown table.
    Table,
    /// A list literal for a rule file, terminated by `;`.
    Rule,
}
impl OutputFormat {
    /// Picks a format from command line switches. A table wins over a rule literal.
    pub fn from_flags(table: bool, rule: bool) -> OutputFormat {
        if table {
            OutputFormat::Table
        } else if rule {
            OutputFormat::Rule
        } else {
            OutputFormat::Plain
        }
    }
}

/// The token as it appears in a table cell or rule, with its spaces removed.
fn cell_text(range: &CodepointRange) -> String {
    range.to_string().replace(' ', "")
}

fn next_row(
    ranges: &mut impl Iterator<Item = CodepointRange>,
    cols: NonZeroUsize,
) -> Vec<CodepointRange> {
    ranges.take(cols.get()).collect()
}

pub fn write_plain(
    out: &mut impl Write,
    ranges: impl IntoIterator<Item = CodepointRange>,
) -> fmt::Result {
    for (i, range) in ranges.into_iter().enumerate() {
        if i != 0 {
            out.write_str(" | ")?;
        }
        write!(out, "{range}")?;
    }
    Ok(())
}

pub fn write_table(
    out: &mut impl Write,
    ranges: impl IntoIterator<Item = CodepointRange>,
    cols: NonZeroUsize,
) -> fmt::Result {
    let mut ranges = ranges.into_iter();

    for _ in 0..cols.get() {
        write!(out, "|{:1$}", "", TABLE_CELL_WIDTH)?;
    }
    out.write_str("|\n")?;
    for _ in 0..cols.get() {
        write!(out, "|{}", "-".repeat(TABLE_CELL_WIDTH))?;
    }
    out.write_str("|\n")?;

    loop {
        let row = next_row(&mut ranges, cols);
        if row.is_empty() {
            break;
        }

        for cell in &row {
            write!(out, "| `{:1$}` ", cell_text(cell), TOKEN_WIDTH)?;
        }
        for _ in row.len()..cols.get() {
            write!(out, "|{:1$}", "", TABLE_CELL_WIDTH)?;
        }
        out.write_str("|\n")?;
    }

    Ok(())
}

pub fn write_rule(
    out: &mut impl Write,
    ranges: impl IntoIterator<Item = CodepointRange>,
    cols: NonZeroUsize,
) -> fmt::Result {
    let mut ranges = ranges.into_iter();
    let mut buffer = String::new();

    loop {
        let row = next_row(&mut ranges, cols);
        if row.is_empty() {
            break;
        }

        for cell in &row {
            write!(buffer, " {:1$} |", cell_text(cell), TOKEN_WIDTH)?;
        }
        buffer.push('\n');
    }

    // the trailing "|\n" of the last row becomes the terminator
    buffer.truncate(buffer.len().saturating_sub(2));
    buffer.push_str(";\n");

    out.write_str(&buffer)
}

/// Renders a sequence of ranges in the given format.
pub fn render(
    format: OutputFormat,
    ranges: impl IntoIterator<Item = CodepointRange>,
    cols: usize,
) -> Result<String, ExtractError> {
    let mut out = String::new();
    match format {
        OutputFormat::Plain => write_plain(&mut out, ranges)?,
        OutputFormat::Table => {
            let cols = NonZeroUsize::new(cols).ok_or(ExtractError::InvalidColumns)?;
            write_table(&mut out, ranges, cols)?
        }
        OutputFormat::Rule => {
            let cols = NonZeroUsize::new(cols).ok_or(ExtractError::InvalidColumns)?;
            write_rule(&mut out, ranges, cols)?
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranges::collapse;

    fn render_codepoints(format: OutputFormat, codepoints: &[u32], cols: usize) -> String {
        render(format, collapse(codepoints.iter().copied()), cols).unwrap()
    }

    fn blank_row(cols: usize) -> String {
        format!("{}|\n", format!("|{}", " ".repeat(23)).repeat(cols))
    }

    fn rule_row(cols: usize) -> String {
        format!("{}|\n", format!("|{}", "-".repeat(23)).repeat(cols))
    }

    #[test]
    fn format_precedence() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Plain);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Table);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Rule);
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Table);
    }

    #[test]
    fn plain() {
        assert_eq!(
            render_codepoints(OutputFormat::Plain, &[65, 66, 67, 70, 72, 73], 4),
            "U+000041 ... U+000043 | U+000046 | U+000048 | U+000049"
        );
        assert_eq!(render_codepoints(OutputFormat::Plain, &[65], 4), "U+000041");
    }

    #[test]
    fn plain_empty() {
        assert_eq!(render_codepoints(OutputFormat::Plain, &[], 4), "");
    }

    #[test]
    fn table() {
        let table = render_codepoints(OutputFormat::Table, &[65, 66, 67, 70], 4);
        let expected = format!(
            "{}{}| `U+000041...U+000043` | `U+000046           ` |{}|{}|\n",
            blank_row(4),
            rule_row(4),
            " ".repeat(23),
            " ".repeat(23),
        );
        assert_eq!(table, expected);
    }

    #[test]
    fn table_multiple_rows() {
        let table = render_codepoints(OutputFormat::Table, &[1, 3, 5, 7, 9], 2);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "| `U+000001           ` | `U+000003           ` |");
        assert_eq!(lines[3], "| `U+000005           ` | `U+000007           ` |");
        assert_eq!(lines[4], format!("| `U+000009           ` |{}|", " ".repeat(23)));
        assert!(table.ends_with("|\n"));
    }

    #[test]
    fn table_empty() {
        let table = render_codepoints(OutputFormat::Table, &[], 3);
        assert_eq!(table, format!("{}{}", blank_row(3), rule_row(3)));
    }

    #[test]
    fn table_widths() {
        let codepoints: Vec<u32> = (0..200).filter(|x| x % 7 != 0 && x % 11 != 3).collect();
        for cols in 1..6 {
            let table = render_codepoints(OutputFormat::Table, &codepoints, cols);
            for line in table.lines() {
                let cells: Vec<_> = line.split('|').collect();
                assert_eq!(cells.len(), cols + 2, "{line:?}");
                assert!(cells[0].is_empty() && cells[cols + 1].is_empty());
                for cell in &cells[1..=cols] {
                    assert_eq!(cell.len(), TABLE_CELL_WIDTH, "{line:?}");
                }
            }
        }
    }

    #[test]
    fn rule_single_row() {
        let rule = render_codepoints(OutputFormat::Rule, &[65, 66], 2);
        assert_eq!(rule, " U+000041            | U+000042            ;\n");
    }

    #[test]
    fn rule_multiple_rows() {
        let rule = render_codepoints(OutputFormat::Rule, &[65, 66, 67, 70, 72], 2);
        assert_eq!(
            rule,
            " U+000041...U+000043 | U+000046            |\n U+000048            ;\n"
        );
    }

    #[test]
    fn rule_full_last_row() {
        let rule = render_codepoints(OutputFormat::Rule, &[1, 3, 5, 7], 2);
        let lines: Vec<_> = rule.split_inclusive('\n').collect();
        assert_eq!(
            lines,
            [
                " U+000001            | U+000003            |\n",
                " U+000005            | U+000007            ;\n",
            ]
        );
    }

    #[test]
    fn rule_empty() {
        assert_eq!(render_codepoints(OutputFormat::Rule, &[], 4), ";\n");
    }

    #[test]
    fn zero_columns() {
        for format in [OutputFormat::Table, OutputFormat::Rule] {
            assert!(matches!(
                render(format, collapse([65]), 0),
                Err(ExtractError::InvalidColumns)
            ));
        }
        assert_eq!(render(OutputFormat::Plain, collapse([65]), 0).unwrap(), "U+000041");
    }
}
