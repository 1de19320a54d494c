use crate::{
    category::{display_categories, parse_categories, CategorySet, GeneralCategory},
    data::DataSource,
    error::ExtractError,
    ranges::collapse,
    render::{render, OutputFormat, DEFAULT_COLUMNS},
    ucd::{expand_blocks, parse_unicode_data, select_codepoints, CharacterRecord},
};
use tracing::{debug, info};

/// Represents a configuration for extracting codepoint ranges.
#[derive(Clone, Debug)]
pub struct RangeExtractor {
    categories: CategorySet,
    format: OutputFormat,
    columns: usize,
    expand_blocks: bool,
}
impl Default for RangeExtractor {
    fn default() -> Self {
        RangeExtractor {
            categories: CategorySet::new(),
            format: OutputFormat::Plain,
            columns: DEFAULT_COLUMNS,
            expand_blocks: false,
        }
    }
}
impl RangeExtractor {
    pub fn new() -> RangeExtractor {
        Default::default()
    }

    /// Adds a category to extract.
    pub fn category(&mut self, category: GeneralCategory) -> &mut Self {
        self.categories.insert(category);
        self
    }

    /// Adds a set of categories to extract.
    pub fn categories(&mut self, categories: impl Into<CategorySet>) -> &mut Self {
        self.categories |= categories.into();
        self
    }

    /// Adds categories by their two-letter codes. Nothing is added if any code is unknown.
    pub fn category_codes<S: AsRef<str>>(
        &mut self,
        codes: impl IntoIterator<Item = S>,
    ) -> Result<&mut Self, ExtractError> {
        self.categories |= parse_categories(codes)?;
        Ok(self)
    }

    pub fn format(&mut self, format: OutputFormat) -> &mut Self {
        self.format = format;
        self
    }

    /// The number of columns in a table or rule literal. Ignored for plain output.
    pub fn columns(&mut self, columns: usize) -> &mut Self {
        self.columns = columns;
        self
    }

    /// Whether `<Name, First>`/`<Name, Last>` block records in the database stand for every
    /// codepoint between them. By default only the two endpoints are extracted.
    pub fn expand_blocks(&mut self, expand_blocks: bool) -> &mut Self {
        self.expand_blocks = expand_blocks;
        self
    }

    pub fn selected_categories(&self) -> CategorySet {
        self.categories
    }

    /// Renders the ranges of the selected categories in already loaded records.
    pub fn extract(&self, records: &[CharacterRecord]) -> Result<String, ExtractError> {
        info!(
            "Collecting codepoint ranges for the categories {}",
            display_categories(self.categories)
        );

        let mut count = 0usize;
        let ranges = collapse(select_codepoints(records, self.categories)).inspect(|_| count += 1);
        let result = render(self.format, ranges, self.columns)?;
        debug!("Rendered {count} ranges as {:?}.", self.format);

        Ok(result)
    }

    /// Parses the text of `UnicodeData.txt` and renders the ranges of the selected categories.
    pub fn extract_str(&self, data: &str) -> Result<String, ExtractError> {
        let mut records = parse_unicode_data(data)?;
        if self.expand_blocks {
            records = expand_blocks(records)?;
        }
        self.extract(&records)
    }

    /// Loads the database from a source and renders the ranges of the selected categories.
    pub fn extract_from(&self, source: &DataSource) -> Result<String, ExtractError> {
        if self.format != OutputFormat::Plain && self.columns == 0 {
            return Err(ExtractError::InvalidColumns);
        }
        let records = source.load(self.expand_blocks)?;
        info!("Loaded {} character records.", records.len());
        self.extract(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GeneralCategory::*;

    const SAMPLE: &str = "\
0020;SPACE;Zs;0;WS;;;;;N;;;;;
0021;EXCLAMATION MARK;Po;0;ON;;;;;N;;;;;
0030;DIGIT ZERO;Nd;0;EN;;;;0;N;;;;;
0031;DIGIT ONE;Nd;0;EN;;;;1;N;;;;;
0032;DIGIT TWO;Nd;0;EN;;;;2;N;;;;;
0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;
0042;LATIN CAPITAL LETTER B;Lu;0;L;;;;;N;;;;0062;
0043;LATIN CAPITAL LETTER C;Lu;0;L;;;;;N;;;;0063;
0045;LATIN CAPITAL LETTER E;Lu;0;L;;;;;N;;;;0065;
0061;LATIN SMALL LETTER A;Ll;0;L;;;;;N;;;0041;;0041
0062;LATIN SMALL LETTER B;Ll;0;L;;;;;N;;;0042;;0042
00A0;NO-BREAK SPACE;Zs;0;CS;<noBreak> 0020;;;;N;NON-BREAKING SPACE;;;;
AC00;<Hangul Syllable, First>;Lo;0;L;;;;;N;;;;;
D7A3;<Hangul Syllable, Last>;Lo;0;L;;;;;N;;;;;
";

    #[test]
    fn plain_letters() {
        let result = RangeExtractor::new()
            .category(UppercaseLetter)
            .category(LowercaseLetter)
            .extract_str(SAMPLE)
            .unwrap();
        assert_eq!(result, "U+000041 ... U+000043 | U+000045 | U+000061 | U+000062");
    }

    #[test]
    fn category_order_does_not_matter() {
        let a = RangeExtractor::new()
            .categories(DecimalNumber | SpaceSeparator)
            .extract_str(SAMPLE)
            .unwrap();
        let b = RangeExtractor::new()
            .category(SpaceSeparator)
            .category(DecimalNumber)
            .extract_str(SAMPLE)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "U+000020 | U+000030 ... U+000032 | U+0000A0");
    }

    #[test]
    fn empty_selection() {
        let mut extractor = RangeExtractor::new();
        extractor.category(MathSymbol);
        assert_eq!(extractor.extract_str(SAMPLE).unwrap(), "");
        assert_eq!(extractor.format(OutputFormat::Rule).extract_str(SAMPLE).unwrap(), ";\n");
    }

    #[test]
    fn table_output() {
        let result = RangeExtractor::new()
            .category(UppercaseLetter)
            .format(OutputFormat::Table)
            .columns(1)
            .extract_str(SAMPLE)
            .unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "| `U+000041...U+000043` |");
        assert_eq!(lines[3], "| `U+000045           ` |");
    }

    #[test]
    fn blocks() {
        let mut extractor = RangeExtractor::new();
        extractor.category(OtherLetter);
        assert_eq!(extractor.extract_str(SAMPLE).unwrap(), "U+00AC00 | U+00D7A3");
        assert_eq!(
            extractor.expand_blocks(true).extract_str(SAMPLE).unwrap(),
            "U+00AC00 ... U+00D7A3"
        );
    }

    #[test]
    fn zero_columns_fail_before_loading() {
        let source = DataSource::File("/nonexistent/UnicodeData.txt".into());
        let result = RangeExtractor::new()
            .category(UppercaseLetter)
            .format(OutputFormat::Table)
            .columns(0)
            .extract_from(&source);
        assert!(matches!(result, Err(ExtractError::InvalidColumns)));
    }

    #[test]
    fn builder_state() {
        let mut extractor = RangeExtractor::new();
        extractor.category(Control).categories(Format);
        assert_eq!(extractor.selected_categories(), Control | Format);
    }

    #[test]
    fn categories_by_code() {
        let result = RangeExtractor::new()
            .category_codes(["Nd", "Zs"])
            .unwrap()
            .extract_str(SAMPLE)
            .unwrap();
        assert_eq!(result, "U+000020 | U+000030 ... U+000032 | U+0000A0");

        let mut extractor = RangeExtractor::new();
        extractor.category(Control);
        assert!(matches!(
            extractor.category_codes(["Lu", "Xx"]),
            Err(ExtractError::InvalidCategory(x)) if x == "Xx"
        ));
        assert_eq!(extractor.selected_categories(), CategorySet::only(Control));
    }
}
