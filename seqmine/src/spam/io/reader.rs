use super::{ITEMSET_END, SEQUENCE_END};
use crate::error::{Error, Result};
use crate::spam::database::{Item, Itemset, Sequence, SequenceDatabase};
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// Accumulates tokens of one sequence.
#[derive(Debug, Default)]
struct SequenceBuilder {
    sequence: Sequence,
    itemset: Itemset,
    closed: bool,
}

impl SequenceBuilder {
    fn push(&mut self, token: i64) -> std::result::Result<(), String> {
        if self.closed {
            return Err(format!("token {} after end of sequence", token));
        }
        match token {
            ITEMSET_END => {
                if self.itemset.is_empty() {
                    return Err("empty itemset".to_string());
                }
                self.sequence.push(std::mem::take(&mut self.itemset));
            }
            SEQUENCE_END => {
                if !self.itemset.is_empty() {
                    return Err("itemset not closed with -1 before -2".to_string());
                }
                self.closed = true;
            }
            item if item > 0 => {
                let item = Item::try_from(item).map_err(|_| format!("item {} out of range", item))?;
                self.itemset.push(item);
            }
            other => return Err(format!("invalid token {}", other)),
        }
        Ok(())
    }

    fn finish(self) -> std::result::Result<Sequence, String> {
        if self.closed {
            Ok(self.sequence)
        } else {
            Err("sequence not terminated with -2".to_string())
        }
    }
}

fn is_ignored(line: &str) -> bool {
    line.is_empty() || line.starts_with(['#', '%', '@'])
}

fn parse_line(line_number: usize, line: &str) -> Result<Sequence> {
    let mut builder = SequenceBuilder::default();
    for token in line.split_whitespace() {
        let value: i64 = token
            .parse()
            .map_err(|_| Error::parse(line_number, format!("not an integer: {:?}", token)))?;
        builder.push(value).map_err(|message| Error::parse(line_number, message))?;
    }
    builder.finish().map_err(|message| Error::parse(line_number, message))
}

impl SequenceDatabase {
    /// Parse a database in SPMF text format, one sequence per line.
    ///
    /// Empty lines and lines starting with `#`, `%` or `@` are skipped.
    /// Errors carry the 1-based line number.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !is_ignored(line))
            .collect();

        let sequences: Vec<Sequence> = lines
            .par_iter()
            .map(|&(line_number, line)| parse_line(line_number, line))
            .collect::<Result<_>>()?;

        tracing::debug!(sequences = sequences.len(), "parsed sequence database");
        Ok(Self::new(sequences))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Build a database from a flat token stream, e.g. a numpy array.
    ///
    /// Errors report the 1-based index of the offending sequence in place of
    /// a line number.
    pub fn from_tokens(tokens: &[i32]) -> Result<Self> {
        let mut sequences = Vec::new();
        let mut builder = SequenceBuilder::default();
        for &token in tokens {
            let sequence_number = sequences.len() + 1;
            builder
                .push(i64::from(token))
                .map_err(|message| Error::parse(sequence_number, message))?;
            if builder.closed {
                let sequence = std::mem::take(&mut builder)
                    .finish()
                    .map_err(|message| Error::parse(sequence_number, message))?;
                sequences.push(sequence);
            }
        }
        if !builder.sequence.is_empty() || !builder.itemset.is_empty() {
            return Err(Error::parse(sequences.len() + 1, "sequence not terminated with -2"));
        }
        Ok(Self::new(sequences))
    }
}
