use crate::{
    category::{CategorySet, GeneralCategory},
    error::ExtractError,
};
use arcstr::ArcStr;
use tracing::debug;

/// The highest valid Unicode codepoint.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// One line of `UnicodeData.txt`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharacterRecord {
    /// The 1-based line of the database this record was read from.
    pub line: usize,
    pub codepoint: u32,
    pub name: ArcStr,
    pub category: GeneralCategory,
}

fn parse_line(line_no: usize, line: &str) -> Result<CharacterRecord, ExtractError> {
    let mut fields = line.split(';');
    let (Some(codepoint), Some(name), Some(category)) =
        (fields.next(), fields.next(), fields.next())
    else {
        return Err(ExtractError::malformed(line_no, "expected at least 3 fields"));
    };

    let codepoint = u32::from_str_radix(codepoint.trim(), 16)
        .map_err(|_| ExtractError::malformed(line_no, format!("bad codepoint '{codepoint}'")))?;
    if codepoint > MAX_CODEPOINT {
        return Err(ExtractError::malformed(
            line_no,
            format!("codepoint {codepoint:X} is out of range"),
        ));
    }

    let category = GeneralCategory::from_code(category.trim())
        .ok_or_else(|| ExtractError::malformed(line_no, format!("bad category '{category}'")))?;

    Ok(CharacterRecord { line: line_no, codepoint, name: ArcStr::from(name), category })
}

/// Parses the contents of `UnicodeData.txt`.
///
/// Any line that fails to parse aborts with [`ExtractError::MalformedRecord`], as does a
/// codepoint that is not strictly greater than the one before it. Blank lines are skipped.
pub fn parse_unicode_data(data: &str) -> Result<Vec<CharacterRecord>, ExtractError> {
    let mut records: Vec<CharacterRecord> = Vec::new();
    for (idx, line) in data.lines().enumerate() {
        let line = line.trim_start();
        if line.is_empty() {
            continue;
        }

        let record = parse_line(idx + 1, line)?;
        if let Some(last) = records.last() {
            if record.codepoint <= last.codepoint {
                return Err(ExtractError::malformed(
                    idx + 1,
                    format!(
                        "codepoint {:X} does not follow {:X} in ascending order",
                        record.codepoint, last.codepoint
                    ),
                ));
            }
        }
        records.push(record);
    }
    debug!("Parsed {} character records.", records.len());
    Ok(records)
}

fn block_name<'a>(name: &'a str, marker: &str) -> Option<&'a str> {
    name.strip_prefix('<')?.strip_suffix(marker)
}

/// Replaces each `<Name, First>` / `<Name, Last>` pair with one record per codepoint of the
/// block it stands for. Every generated record is named `<Name>`.
pub fn expand_blocks(records: Vec<CharacterRecord>) -> Result<Vec<CharacterRecord>, ExtractError> {
    let mut expanded = Vec::with_capacity(records.len());
    let mut iter = records.into_iter();
    while let Some(record) = iter.next() {
        let Some(block) = block_name(&record.name, ", First>") else {
            expanded.push(record);
            continue;
        };

        let last = match iter.next() {
            Some(last)
                if block_name(&last.name, ", Last>") == Some(block)
                    && last.category == record.category =>
            {
                last
            }
            _ => {
                return Err(ExtractError::malformed(
                    record.line,
                    format!("block '{block}' has no matching Last entry"),
                ))
            }
        };

        let name = ArcStr::from(format!("<{block}>"));
        debug!(
            "Expanding block {name} (U+{:04X}..U+{:04X})",
            record.codepoint, last.codepoint
        );
        for codepoint in record.codepoint..=last.codepoint {
            expanded.push(CharacterRecord {
                line: record.line,
                codepoint,
                name: name.clone(),
                category: record.category,
            });
        }
    }
    Ok(expanded)
}

/// Returns the codepoints of all records in one of the given categories, in database order.
pub fn select_codepoints(
    records: &[CharacterRecord],
    categories: CategorySet,
) -> impl Iterator<Item = u32> + '_ {
    records
        .iter()
        .filter(move |x| categories.contains(x.category))
        .map(|x| x.codepoint)
}
