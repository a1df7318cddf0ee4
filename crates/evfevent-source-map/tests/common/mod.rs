/*
 * common/mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Builder for fixed-column listings used across the integration tests.

#![allow(dead_code)]

const MAX_NAME: usize = 255;

#[derive(Debug, Default, Clone)]
pub struct Listing {
    lines: Vec<String>,
}

impl Listing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processor(mut self) -> Self {
        self.lines.push("PROCESSOR  0 000 1".to_string());
        self
    }

    /// A `FILEID` starting at 1-based `line` of its parent (0 for roots).
    /// Names past 255 characters continue on `FILEIDCONT` records.
    pub fn file(mut self, id: u32, line: u32, name: &str) -> Self {
        let chars: Vec<char> = name.chars().collect();
        let (head, tail) = chars.split_at(chars.len().min(MAX_NAME));
        let head: String = head.iter().collect();
        self.lines.push(format!(
            "FILEID     0 {:03} {:06} {:03} {} 20230101120000 0",
            id,
            line,
            chars.len(),
            head
        ));
        for chunk in tail.chunks(MAX_NAME) {
            let fragment: String = chunk.iter().collect();
            self.lines.push(format!(
                "FILEIDCONT 0 {:03} {:<11}{} 20230101120000 0",
                id, "", fragment
            ));
        }
        self
    }

    pub fn end(mut self, id: u32, length: u32) -> Self {
        self.lines
            .push(format!("FILEEND    0 {:03} {:06}", id, length));
        self
    }

    /// An `EXPANSION` with raw 1-based bounds; 0 leaves an interval unused.
    pub fn expansion(
        mut self,
        id: u32,
        defined: (u32, u32),
        on: u32,
        range: (u32, u32),
    ) -> Self {
        self.lines.push(format!(
            "EXPANSION  0 {:03} {:06} {:06} {:03} {:06} {:06}",
            id, defined.0, defined.1, on, range.0, range.1
        ));
        self
    }

    pub fn error(self, id: u32, line: u32, code: &str, text: &str) -> Self {
        self.error_at(id, line, (1, 10), code, 30, text)
    }

    pub fn error_at(
        mut self,
        id: u32,
        line: u32,
        columns: (u32, u32),
        code: &str,
        severity: u32,
        text: &str,
    ) -> Self {
        self.lines.push(format!(
            "ERROR      0 {:03} 1 {:06} {:06} {:03} {:06} {:03} {:<7} S {:02} {:03} {}",
            id,
            line,
            line,
            columns.0,
            line,
            columns.1,
            code,
            severity,
            text.len(),
            text
        ));
        self
    }

    /// A hand-written record, for fields the builders always fill in.
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}
