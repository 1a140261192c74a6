//! Range arithmetic and mutation for paragraphs and documents
//!
//! Every mutating operation leaves the runs minimal: empty runs are dropped and adjacent
//! runs with equal styles are merged before returning.

use super::{Document, Paragraph, Run, Style, ZERO_WIDTH_SPACE};
use std::ops::Range;

/// Byte index of the char at `offset`, or the string length past the end.
fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

impl Paragraph {
    /// Drops empty runs and merges neighbours with identical styles.
    pub fn merge_runs(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.style == run.style => last.text.push_str(&run.text),
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }

    /// Ensures a run boundary at `offset` and returns the index of the run starting there.
    ///
    /// Splitting keeps every attribute of the original run on both halves.
    pub fn split_at(&mut self, offset: usize) -> usize {
        let mut start = 0;
        for index in 0..self.runs.len() {
            if offset == start {
                return index;
            }
            let len = self.runs[index].len();
            if offset < start + len {
                let run = &mut self.runs[index];
                let at = byte_index(&run.text, offset - start);
                let tail = run.text.split_off(at);
                let style = run.style.clone();
                self.runs.insert(index + 1, Run::new(tail, style));
                return index + 1;
            }
            start += len;
        }
        self.runs.len()
    }

    /// Styles of the runs overlapping `range`.
    pub fn styles_in(&self, range: Range<usize>) -> Vec<&Style> {
        let mut styles = Vec::new();
        let mut start = 0;
        for run in &self.runs {
            let end = start + run.len();
            if start < range.end && end > range.start {
                styles.push(&run.style);
            }
            start = end;
        }
        styles
    }

    /// Rewrites the style of every char in `range`.
    pub fn restyle<F: FnMut(&mut Style)>(&mut self, range: Range<usize>, mut f: F) {
        if range.start >= range.end {
            return;
        }
        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        for run in &mut self.runs[first..last] {
            f(&mut run.style);
        }
        self.merge_runs();
    }

    /// Rewrites the style of every run.
    pub fn restyle_all<F: FnMut(&mut Style)>(&mut self, mut f: F) {
        for run in &mut self.runs {
            f(&mut run.style);
        }
        self.merge_runs();
    }

    /// Inserts `text` (without line breaks) at `offset`.
    pub fn insert(&mut self, offset: usize, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        let index = self.split_at(offset);
        self.runs.insert(index, Run::new(text, style));
        self.merge_runs();
    }

    /// Removes the chars in `range`.
    pub fn remove(&mut self, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        self.runs.drain(first..last);
        self.merge_runs();
    }

    /// Splits the paragraph at `offset`, returning the tail.
    pub fn split_off(&mut self, offset: usize) -> Paragraph {
        let index = self.split_at(offset);
        let tail = self.runs.split_off(index);
        self.merge_runs();
        Paragraph::new(tail)
    }

    /// Appends the runs of `other`.
    pub fn append(&mut self, other: Paragraph) {
        self.runs.extend(other.runs);
        self.merge_runs();
    }

    /// Removes zero-width placeholder chars, returning their former offsets in ascending
    /// order.
    pub fn strip_placeholders(&mut self) -> Vec<usize> {
        let mut removed = Vec::new();
        let mut offset = 0;
        for run in &mut self.runs {
            let mut kept = String::with_capacity(run.text.len());
            for c in run.text.chars() {
                if c == ZERO_WIDTH_SPACE {
                    removed.push(offset);
                } else {
                    kept.push(c);
                }
                offset += 1;
            }
            run.text = kept;
        }
        self.merge_runs();
        removed
    }
}

impl Document {
    /// Rewrites the style of every char in `range`, across paragraphs.
    pub fn restyle<F: FnMut(&mut Style)>(&mut self, range: &Range<usize>, mut f: F) {
        for (index, local) in self.segments(range) {
            self.paragraphs[index].restyle(local, &mut f);
        }
    }

    /// Inserts `text` at `offset` in `style` and returns the offset just after it.
    ///
    /// Line breaks in `text` split paragraphs. Text typed into a non-empty paragraph takes
    /// that paragraph's block attributes, and text typed into a placeholder-only paragraph
    /// replaces the placeholder.
    pub fn insert_text(&mut self, offset: usize, text: &str, style: &Style) -> usize {
        let offset = offset.min(self.len());
        if text.is_empty() {
            return offset;
        }
        let (index, mut local) = self.locate(offset);
        let mut inserted = style.clone();
        let paragraph = &mut self.paragraphs[index];
        if paragraph.is_placeholder_only() {
            let block = paragraph.runs[0].style.clone();
            paragraph.runs.clear();
            local = 0;
            inserted.adopt_block(&block);
        } else if let Some(block) = paragraph.lead_style().cloned() {
            inserted.adopt_block(&block);
        }
        self.insert_lines(index, local, text, &inserted)
    }

    fn insert_lines(
        &mut self,
        mut index: usize,
        mut local: usize,
        text: &str,
        style: &Style,
    ) -> usize {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            let first = first.strip_suffix('\r').unwrap_or(first);
            self.paragraphs[index].insert(local, first, style.clone());
            local += first.chars().count();
        }
        for line in lines {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let tail = self.paragraphs[index].split_off(local);
            index += 1;
            self.paragraphs.insert(index, tail);
            self.paragraphs[index].insert(0, line, style.clone());
            local = line.chars().count();
        }
        self.paragraph_start(index) + local
    }

    /// Deletes the chars in `range` (line breaks join paragraphs) and returns the caret
    /// offset left behind.
    pub fn delete(&mut self, range: Range<usize>) -> usize {
        let range = self.clamp(range);
        if range.is_empty() {
            return range.start;
        }
        let (first, from) = self.locate(range.start);
        let (last, to) = self.locate(range.end);
        if first == last {
            self.paragraphs[first].remove(from..to);
            return range.start;
        }

        let first_len = self.paragraphs[first].len();
        self.paragraphs[first].remove(from..first_len);
        let mut tail = self.paragraphs[last].split_off(to);
        if let Some(block) = self.paragraphs[first].lead_style().cloned() {
            tail.restyle_all(|style| style.adopt_block(&block));
        }
        self.paragraphs[first].append(tail);
        self.paragraphs.drain(first + 1..=last);
        range.start
    }
}
