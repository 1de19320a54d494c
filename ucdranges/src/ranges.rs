use std::{
    fmt::{Display, Formatter},
    iter::{FusedIterator, Peekable},
    ops::RangeInclusive,
};

/// A collapsed run of codepoints.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CodepointRange {
    /// A single codepoint.
    Single(u32),
    /// A run of at least three contiguous codepoints, with both ends included.
    Span(u32, u32),
}
impl CodepointRange {
    pub fn low(&self) -> u32 {
        match *self {
            CodepointRange::Single(x) => x,
            CodepointRange::Span(low, _) => low,
        }
    }

    pub fn high(&self) -> u32 {
        match *self {
            CodepointRange::Single(x) => x,
            CodepointRange::Span(_, high) => high,
        }
    }

    /// The number of codepoints covered.
    pub fn size(&self) -> u32 {
        self.high() - self.low() + 1
    }

    pub fn codepoints(&self) -> RangeInclusive<u32> {
        self.low()..=self.high()
    }
}
impl Display for CodepointRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            CodepointRange::Single(x) => write!(f, "U+{x:06X}"),
            CodepointRange::Span(low, high) => write!(f, "U+{low:06X} ... U+{high:06X}"),
        }
    }
}

/// Iterator returned by [`collapse`].
#[derive(Clone, Debug)]
pub struct Collapse<I: Iterator<Item = u32>> {
    iter: Peekable<I>,
    pending: Option<u32>,
}
impl<I: Iterator<Item = u32>> Iterator for Collapse<I> {
    type Item = CodepointRange;

    fn next(&mut self) -> Option<CodepointRange> {
        if let Some(high) = self.pending.take() {
            return Some(CodepointRange::Single(high));
        }

        let low = self.iter.next()?;
        let mut high = low;
        while let Some(&next) = self.iter.peek() {
            if high.checked_add(1) != Some(next) {
                break;
            }
            high = next;
            self.iter.next();
        }

        match high - low {
            0 => Some(CodepointRange::Single(low)),
            // two codepoints are written out individually rather than as a span
            1 => {
                self.pending = Some(high);
                Some(CodepointRange::Single(low))
            }
            _ => Some(CodepointRange::Span(low, high)),
        }
    }
}
impl<I: Iterator<Item = u32>> FusedIterator for Collapse<I> {}

/// Collapses a strictly ascending sequence of codepoints into ranges.
///
/// Runs of three or more contiguous codepoints become a [`CodepointRange::Span`]. Everything
/// else, including runs of exactly two, is emitted as [`CodepointRange::Single`]s.
pub fn collapse<I: IntoIterator<Item = u32>>(codepoints: I) -> Collapse<I::IntoIter> {
    Collapse { iter: codepoints.into_iter().peekable(), pending: None }
}

/// Expands ranges back into the codepoints they cover.
pub fn expand<'a>(ranges: impl IntoIterator<Item = &'a CodepointRange>) -> Vec<u32> {
    ranges.into_iter().flat_map(|x| x.codepoints()).collect()
}
