//! Tabular strategy: a delimited text table (usually Markdown) with a header
//! naming the time, event and note columns in any order.
//!
//! The scan is a single pass over the lines with two states. While seeking a
//! header, anything that is not a 3-role header is skipped. Once a header is
//! accepted, the rule line directly under it (`|---|---|`) is dropped, every
//! other delimited row becomes a record, and the first line that is not a
//! delimited row ends the table. A `| - | - |` row further down is data.

use crate::config::RolesConfig;
use crate::normalizer::ConfigError;
use crate::types::{FailureReason, Record, Role, Sequence};

/// Lower-cased header vocabulary per [`Role`], indexed by [`Role::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTable {
    words: [Vec<String>; 3],
}

impl RoleTable {
    pub fn from_config(roles: &RolesConfig) -> Result<Self, ConfigError> {
        let compile = |role: Role, list: &[String]| {
            let words: Vec<String> = list
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect();
            if words.is_empty() {
                Err(ConfigError::EmptyRole { role })
            } else {
                Ok(words)
            }
        };
        Ok(Self {
            words: [
                compile(Role::Time, &roles.time)?,
                compile(Role::Event, &roles.event)?,
                compile(Role::Note, &roles.note)?,
            ],
        })
    }

    /// Header words recognised for `role`.
    pub fn words(&self, role: Role) -> &[String] {
        &self.words[role.index()]
    }

    /// Map header cells to column indices. Cells equal to a role word are
    /// claimed first, so `| 流程時間 | 時間 | ... |` reads time from the
    /// second column. Remaining cells then go to the first free role, in
    /// [`Role::ALL`] order, with a word contained in the cell. Each cell
    /// takes at most one role. Returns `None` unless all three are found.
    pub fn classify(&self, cells: &[&str]) -> Option<Columns> {
        let cells: Vec<String> = cells.iter().map(|cell| cell.to_lowercase()).collect();
        let mut found: [Option<usize>; 3] = [None; 3];
        let mut claimed = vec![false; cells.len()];

        for exact in [true, false] {
            for (index, cell) in cells.iter().enumerate() {
                if claimed[index] {
                    continue;
                }
                let role = Role::ALL.into_iter().find(|role| {
                    found[role.index()].is_none()
                        && self.words(*role).iter().any(|w| {
                            if exact {
                                cell == w
                            } else {
                                cell.contains(w.as_str())
                            }
                        })
                });
                if let Some(role) = role {
                    found[role.index()] = Some(index);
                    claimed[index] = true;
                }
            }
        }
        match found {
            [Some(time), Some(event), Some(note)] => Some(Columns { time, event, note }),
            _ => None,
        }
    }
}

/// Column index of each role in an accepted header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub time: usize,
    pub event: usize,
    pub note: usize,
}

impl Columns {
    /// Minimum number of cells a row needs to fill a record.
    fn width(&self) -> usize {
        self.time.max(self.event).max(self.note) + 1
    }

    fn record(&self, cells: &[&str]) -> Record {
        Record::new(cells[self.time], cells[self.event], cells[self.note])
    }
}

enum ScanState {
    SeekingHeader { candidate_rows: usize },
    Collecting {
        columns: Columns,
        rows: Vec<Record>,
        /// Set until the first line after the header has been seen.
        under_header: bool,
    },
}

pub(crate) fn decode_table(
    text: &str,
    roles: &RoleTable,
    separators: &[char],
) -> Result<Sequence, FailureReason> {
    let mut state = ScanState::SeekingHeader { candidate_rows: 0 };

    for (line_no, line) in text.lines().enumerate() {
        let cells = split_row(line, separators);
        match &mut state {
            ScanState::SeekingHeader { candidate_rows } => {
                let Some(cells) = cells else { continue };
                if is_separator_row(&cells) {
                    continue;
                }
                *candidate_rows += 1;
                if cells.iter().filter(|c| !c.is_empty()).count() < 3 {
                    continue;
                }
                if let Some(columns) = roles.classify(&cells) {
                    tracing::debug!(line = line_no + 1, ?columns, "table header accepted");
                    state = ScanState::Collecting {
                        columns,
                        rows: Vec::new(),
                        under_header: true,
                    };
                }
            }
            ScanState::Collecting { columns, rows, under_header } => {
                let Some(cells) = cells else { break };
                if std::mem::take(under_header) && is_separator_row(&cells) {
                    continue;
                }
                if cells.len() < columns.width() {
                    tracing::trace!(line = line_no + 1, cells = cells.len(), "short table row skipped");
                    continue;
                }
                rows.push(columns.record(&cells));
            }
        }
    }

    match state {
        ScanState::SeekingHeader { candidate_rows } => {
            Err(FailureReason::NoHeaderFound { candidate_rows })
        }
        ScanState::Collecting { rows, .. } if rows.is_empty() => Err(FailureReason::NoRowsCollected),
        ScanState::Collecting { rows, .. } => Ok(Sequence::new(rows)),
    }
}

/// Split a delimited row into trimmed cells, keeping empty interior cells so
/// positions line up with the header. `None` if the trimmed line does not
/// start and end with a separator.
fn split_row<'a>(line: &'a str, separators: &[char]) -> Option<Vec<&'a str>> {
    let mut chars = line.trim().chars();
    let first = chars.next()?;
    let last = chars.next_back()?;
    if !separators.contains(&first) || !separators.contains(&last) {
        return None;
    }
    Some(
        chars
            .as_str()
            .split(|c: char| separators.contains(&c))
            .map(str::trim)
            .collect(),
    )
}

/// Rows like `|---|:--:|` or `| | |` that carry no content. Only skipped
/// before the header and directly under it.
fn is_separator_row(cells: &[&str]) -> bool {
    cells.iter().all(|cell| {
        cell.chars()
            .all(|c| matches!(c, '-' | '－' | ':' | '=' | '+') || c.is_whitespace())
    })
}
