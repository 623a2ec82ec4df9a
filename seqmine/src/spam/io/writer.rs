use crate::error::Result;
use crate::spam::pattern::Pattern;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// `1 2 -1 3 -1 #SUP: 2`, followed by ` #SID: 0 2` when sequence ids are
/// attached.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for itemset in self.itemsets() {
            for item in itemset {
                write!(f, "{} ", item)?;
            }
            write!(f, "-1 ")?;
        }
        write!(f, "#SUP: {}", self.support)?;
        if let Some(sequence_ids) = &self.sequence_ids {
            write!(f, " #SID:")?;
            for sid in sequence_ids {
                write!(f, " {}", sid)?;
            }
        }
        Ok(())
    }
}

/// Write one pattern per line.
pub fn write_patterns<W: Write>(mut writer: W, patterns: &[Pattern]) -> Result<()> {
    for pattern in patterns {
        writeln!(writer, "{}", pattern)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_patterns_to_path(path: impl AsRef<Path>, patterns: &[Pattern]) -> Result<()> {
    let file = File::create(path)?;
    write_patterns(BufWriter::new(file), patterns)?;
    Ok(())
}
