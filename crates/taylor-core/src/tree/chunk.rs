//! Line-based splitting of large files for offset to line translation.

use super::offset::OffsetRange;
use crate::component::ComponentRange;

/// A contiguous run of lines of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    start_line: usize,
    start_offset: usize,
    end_offset: usize,
    line_starts: Vec<usize>,
}

impl Part {
    /// First line of the part (1-based).
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// Byte offset of the first byte of the part.
    #[must_use]
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Byte offset one past the last byte of the part.
    #[must_use]
    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    /// Number of lines in the part.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Slice of `text` covered by the part.
    #[must_use]
    pub fn text<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start_offset..self.end_offset).unwrap_or("")
    }

    fn line_of(&self, offset: usize) -> usize {
        let local = self.line_starts.partition_point(|&start| start <= offset);
        self.start_line + local.saturating_sub(1)
    }
}

/// Ordered, non-overlapping parts covering a whole file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunks {
    parts: Vec<Part>,
    line_count: usize,
}

impl Chunks {
    /// Splits `text` into parts sized by its line count.
    #[must_use]
    pub fn split(text: &str) -> Self {
        let starts = line_starts(text);
        let line_count = starts.len();
        let target = target_size(line_count, text.len());
        let wanted = if target == 0 { 1 } else { text.len() / target };

        if wanted <= 1 {
            return Self {
                parts: vec![Part {
                    start_line: 1,
                    start_offset: 0,
                    end_offset: text.len(),
                    line_starts: starts,
                }],
                line_count,
            };
        }

        let per_part = line_count.div_ceil(wanted);
        let groups: Vec<&[usize]> = starts.chunks(per_part).collect();
        let parts = groups
            .iter()
            .enumerate()
            .map(|(index, group)| Part {
                start_line: index * per_part + 1,
                start_offset: group[0],
                end_offset: groups.get(index + 1).map_or(text.len(), |next| next[0]),
                line_starts: group.to_vec(),
            })
            .collect();

        Self { parts, line_count }
    }

    /// All parts in file order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Total number of lines in the file.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// The last part whose start offset is at or before `offset`.
    #[must_use]
    pub fn part_for(&self, offset: usize) -> &Part {
        let index = self
            .parts
            .partition_point(|part| part.start_offset <= offset)
            .saturating_sub(1);
        &self.parts[index]
    }

    /// 1-based line containing `offset`. Offsets past the end map to the last line.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        self.part_for(offset).line_of(offset)
    }

    /// Translates a byte range into a line range.
    #[must_use]
    pub fn to_component_range(&self, range: OffsetRange) -> ComponentRange {
        ComponentRange::new(self.line_of(range.start), self.line_of(range.end))
    }
}

/// Target part size in bytes for a file with `lines` lines and `len` bytes.
fn target_size(lines: usize, len: usize) -> usize {
    match lines {
        0..=499 => len,
        500..=999 => 4 * lines - 500,
        1000..=1999 => 3 * lines / 2 + 2000,
        2000..=2999 => lines + 3000,
        _ => 3 * lines / 5 + 4200,
    }
}

fn line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    starts.extend(
        text.bytes()
            .enumerate()
            .filter(|&(index, byte)| byte == b'\n' && index + 1 < text.len())
            .map(|(index, _)| index + 1),
    );
    starts
}
