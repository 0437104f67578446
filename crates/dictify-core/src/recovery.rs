//! Resynchronization after an unsupported member.
//!
//! `recover` scans forward over arbitrary code (calls, arrow functions,
//! spreads, computed keys, quoted and template text) until it finds a stop
//! character at the level it started on. Brackets, braces and parens opened
//! inside the skipped region are tracked with a local counter; quoted regions
//! make every character inert except their closing quote; a backslash always
//! skips the character after it.
//!
//! Brace and bracket characters also move the parse-wide [`DepthCounters`],
//! and the snapshot taken on entry is what identifies the recovering
//! container's own closer.
//!
//! [`DepthCounters`]: crate::parser::DepthCounters

use crate::parser::{Container, Parser};

/// Where recovery stopped. The stop character has been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resync {
    /// A stop character at the starting level (usually `,`).
    Separator(char),
    /// The closer of the container recovery was called in.
    ContainerEnd,
}

impl Parser<'_> {
    /// Skip forward to the next character in `stops` at the current level.
    ///
    /// `container` names the structure being recovered in, if any. Returns
    /// `None` when the input ends before a stop character is found.
    pub fn recover(&mut self, stops: &[char], container: Option<Container>) -> Option<Resync> {
        let entry_depth = container.map(|kind| (kind, self.depth.get(kind)));
        let mut depth = 0usize;
        let mut quote: Option<char> = None;

        while let Some(c) = self.cursor.current() {
            if c == '\\' {
                self.cursor.advance_by(2);
                continue;
            }

            if let Some(open) = quote {
                if c == open {
                    quote = None;
                }
                self.cursor.advance();
                continue;
            }

            match c {
                '"' | '\'' | '`' => quote = Some(c),
                '{' | '[' | '(' => {
                    depth += 1;
                    if let Some(kind) = Container::from_opener(c) {
                        self.depth.open(kind);
                    }
                }
                '}' | ']' | ')' if depth > 0 => {
                    depth -= 1;
                    if let Some(kind) = Container::from_closer(c) {
                        self.depth.close(kind);
                    }
                }
                '}' | ']' | ')' => {
                    let kind = Container::from_closer(c);
                    let exits_container = match (kind, entry_depth) {
                        (Some(kind), Some((current, entry))) if kind == current => {
                            self.depth.get(kind).saturating_sub(1) < entry
                        }
                        _ => false,
                    };
                    // The structure's own guard releases its level.
                    if exits_container {
                        self.cursor.advance();
                        return Some(Resync::ContainerEnd);
                    }
                    if let Some(kind) = kind {
                        self.depth.close(kind);
                    }
                    if stops.contains(&c) {
                        self.cursor.advance();
                        return Some(Resync::Separator(c));
                    }
                }
                c if depth == 0 && stops.contains(&c) => {
                    self.cursor.advance();
                    return Some(Resync::Separator(c));
                }
                _ => {}
            }
            self.cursor.advance();
        }
        None
    }
}
