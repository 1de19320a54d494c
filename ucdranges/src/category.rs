use crate::error::ExtractError;
use enumset::{EnumSet, EnumSetType};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// A Unicode general category, as found in the third field of `UnicodeData.txt`.
///
/// `Cn` (unassigned) is deliberately absent, as it never appears in the database.
#[derive(EnumSetType, Debug, Hash, PartialOrd, Ord)]
pub enum GeneralCategory {
    Control,
    Format,
    PrivateUse,
    Surrogate,
    LowercaseLetter,
    ModifierLetter,
    OtherLetter,
    TitlecaseLetter,
    UppercaseLetter,
    SpacingMark,
    EnclosingMark,
    NonspacingMark,
    DecimalNumber,
    LetterNumber,
    OtherNumber,
    ConnectorPunctuation,
    DashPunctuation,
    ClosePunctuation,
    FinalPunctuation,
    InitialPunctuation,
    OtherPunctuation,
    OpenPunctuation,
    CurrencySymbol,
    ModifierSymbol,
    MathSymbol,
    OtherSymbol,
    LineSeparator,
    ParagraphSeparator,
    SpaceSeparator,
}

/// A set of general categories to extract.
pub type CategorySet = EnumSet<GeneralCategory>;

impl GeneralCategory {
    /// Every category, ordered by code.
    pub const ALL: [GeneralCategory; 29] = {
        use GeneralCategory::*;
        [
            Control,
            Format,
            PrivateUse,
            Surrogate,
            LowercaseLetter,
            ModifierLetter,
            OtherLetter,
            TitlecaseLetter,
            UppercaseLetter,
            SpacingMark,
            EnclosingMark,
            NonspacingMark,
            DecimalNumber,
            LetterNumber,
            OtherNumber,
            ConnectorPunctuation,
            DashPunctuation,
            ClosePunctuation,
            FinalPunctuation,
            InitialPunctuation,
            OtherPunctuation,
            OpenPunctuation,
            CurrencySymbol,
            ModifierSymbol,
            MathSymbol,
            OtherSymbol,
            LineSeparator,
            ParagraphSeparator,
            SpaceSeparator,
        ]
    };

    /// The two-letter code of this category.
    pub fn code(self) -> &'static str {
        use GeneralCategory::*;
        match self {
            Control => "Cc",
            Format => "Cf",
            PrivateUse => "Co",
            Surrogate => "Cs",
            LowercaseLetter => "Ll",
            ModifierLetter => "Lm",
            OtherLetter => "Lo",
            TitlecaseLetter => "Lt",
            UppercaseLetter => "Lu",
            SpacingMark => "Mc",
            EnclosingMark => "Me",
            NonspacingMark => "Mn",
            DecimalNumber => "Nd",
            LetterNumber => "Nl",
            OtherNumber => "No",
            ConnectorPunctuation => "Pc",
            DashPunctuation => "Pd",
            ClosePunctuation => "Pe",
            FinalPunctuation => "Pf",
            InitialPunctuation => "Pi",
            OtherPunctuation => "Po",
            OpenPunctuation => "Ps",
            CurrencySymbol => "Sc",
            ModifierSymbol => "Sk",
            MathSymbol => "Sm",
            OtherSymbol => "So",
            LineSeparator => "Zl",
            ParagraphSeparator => "Zp",
            SpaceSeparator => "Zs",
        }
    }

    pub fn description(self) -> &'static str {
        use GeneralCategory::*;
        match self {
            Control => "control character",
            Format => "format character",
            PrivateUse => "private use",
            Surrogate => "surrogate",
            LowercaseLetter => "lowercase letter",
            ModifierLetter => "modifier letter",
            OtherLetter => "other letter",
            TitlecaseLetter => "titlecase letter",
            UppercaseLetter => "uppercase letter",
            SpacingMark => "spacing combining mark",
            EnclosingMark => "enclosing mark",
            NonspacingMark => "nonspacing mark",
            DecimalNumber => "decimal digit",
            LetterNumber => "letter number",
            OtherNumber => "other number",
            ConnectorPunctuation => "connector punctuation",
            DashPunctuation => "dash punctuation",
            ClosePunctuation => "close punctuation",
            FinalPunctuation => "final quote",
            InitialPunctuation => "initial quote",
            OtherPunctuation => "other punctuation",
            OpenPunctuation => "open punctuation",
            CurrencySymbol => "currency symbol",
            ModifierSymbol => "modifier symbol",
            MathSymbol => "math symbol",
            OtherSymbol => "other symbol",
            LineSeparator => "line separator",
            ParagraphSeparator => "paragraph separator",
            SpaceSeparator => "space separator",
        }
    }

    /// Parses a two-letter category code. Matching is case-sensitive.
    pub fn from_code(code: &str) -> Option<GeneralCategory> {
        Self::ALL.into_iter().find(|x| x.code() == code)
    }
}
impl FromStr for GeneralCategory {
    type Err = ExtractError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| ExtractError::InvalidCategory(s.to_string()))
    }
}
impl Display for GeneralCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(feature = "binary")]
impl clap::ValueEnum for GeneralCategory {
    fn value_variants<'a>() -> &'a [Self] {
        &Self::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.code()).help(self.description()))
    }
}

/// Validates a list of category codes, failing on the first unknown one.
pub fn parse_categories<S: AsRef<str>>(
    codes: impl IntoIterator<Item = S>,
) -> Result<CategorySet, ExtractError> {
    let mut set = CategorySet::new();
    for code in codes {
        set.insert(code.as_ref().parse()?);
    }
    Ok(set)
}

/// Renders a category set as a comma separated list of codes.
pub fn display_categories(set: CategorySet) -> String {
    set.iter().map(GeneralCategory::code).collect::<Vec<_>>().join(", ")
}
