//! Extracts the codepoints of selected Unicode general categories from `UnicodeData.txt` and
//! renders them as a compact list of ranges.

mod category;
mod data;
mod error;
mod extract;
mod ranges;
mod render;
mod ucd;

pub use category::{display_categories, parse_categories, CategorySet, GeneralCategory};
pub use data::{DataSource, UNICODE_DATA_URL};
pub use error::ExtractError;
pub use extract::RangeExtractor;
pub use ranges::{collapse, expand, Collapse, CodepointRange};
pub use render::{
    render, write_plain, write_rule, write_table, OutputFormat, DEFAULT_COLUMNS, TABLE_CELL_WIDTH,
    TOKEN_WIDTH,
};
pub use ucd::{expand_blocks, parse_unicode_data, select_codepoints, CharacterRecord, MAX_CODEPOINT};
