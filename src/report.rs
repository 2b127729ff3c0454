//! Aggregation, counting and report output
//!
//! Runs every template over every item of the corpus, canonicalizes the
//! instances to fixed-order delimited keys, counts distinct keys over the
//! sorted sequence, and renders the two report surfaces: an aligned table
//! of the two-node patterns and a delimited export of everything.

use crate::corpus::Corpus;
use crate::pattern::{FormIndex, PatternInstance, TEMPLATES};
use std::io::{self, Write};

/// Run every template over every item of every group.
///
/// Result order is group, then item, then template declaration order; it
/// carries no meaning, since aggregation sorts the canonical keys.
pub fn extract_all(corpus: &Corpus) -> Vec<PatternInstance> {
    let mut instances = Vec::new();
    for group in &corpus.items {
        for item in group {
            let index = FormIndex::build(&item.analysis);
            for template in TEMPLATES {
                instances.extend(template.matches(&item.analysis, &index));
            }
        }
    }
    tracing::debug!(groups = corpus.items.len(), instances = instances.len(), "patterns extracted");
    instances
}

/// Sort canonical keys and count each distinct pattern.
///
/// Keys sort in byte order, so the output sequence is stable across runs
/// and the counts are independent of extraction order.
pub fn tally(instances: &[PatternInstance]) -> Vec<(String, u64)> {
    let mut keys: Vec<String> = instances.iter().map(PatternInstance::canonical).collect();
    keys.sort();

    let mut counts: Vec<(String, u64)> = Vec::new();
    for key in keys {
        match counts.last_mut() {
            Some((last, n)) if *last == key => *n += 1,
            _ => counts.push((key, 1)),
        }
    }
    counts
}

/// Positional fields of a canonical key
fn split_key(key: &str) -> Vec<&str> {
    key.split(", ").collect()
}

/// Write every counted pattern as delimited rows.
///
/// Columns: dependent lemma, first governor lemma, first relation, second
/// governor lemma, second relation, count. The two governor-2 columns are
/// blank for two-node patterns.
pub fn write_export<W: Write>(counts: &[(String, u64)], mut writer: W) -> io::Result<()> {
    writeln!(writer, "dep,gouv,role1,gouverneur_du_gouverneur,role2,compte")?;
    for (key, count) in counts {
        let fields = split_key(key);
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            fields[1], fields[4], fields[2], fields[7], fields[5], count
        )?;
    }
    Ok(())
}

/// Render the two-node patterns as an aligned text table.
///
/// A pattern is two-node when its second relation field is empty; rows
/// from three-node templates never appear here.
pub fn simple_pattern_table(counts: &[(String, u64)]) -> String {
    const HEADERS: [&str; 6] = ["pred_cat", "pred_lemme", "pred_rel", "arg_cat", "arg_lemme", "freq"];

    let mut rows: Vec<[String; 6]> = Vec::new();
    for (key, count) in counts {
        let fields = split_key(key);
        if fields[5].is_empty() {
            rows.push([
                fields[0].to_string(),
                fields[1].to_string(),
                fields[2].to_string(),
                fields[3].to_string(),
                fields[4].to_string(),
                count.to_string(),
            ]);
        }
    }

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &HEADERS.map(String::from), &widths);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&"-".repeat(*width));
    }
    out.push('\n');
    for row in &rows {
        write_row(&mut out, row, &widths);
    }
    out
}

fn write_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        // pad by character count, not byte length
        let pad = width.saturating_sub(cell.chars().count());
        if i < 5 {
            out.push_str(&" ".repeat(pad));
        }
    }
    out.push('\n');
}
