//! Locating path elements within a document and rewriting them in place.
//!
//! The document is walked with an XML reader so that markup inside comments
//! or CDATA sections is never mistaken for an element. Every other byte of
//! the document is passed through untouched; only eligible elements with
//! more than one subpath are replaced, by one sibling element per subpath.

mod tag;

pub use tag::{RawAttribute, RawTag, SkipReason};

use std::ops::{ControlFlow, Range};

use log::{debug, info, warn};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::{Error, PathError, Result};
use crate::path::{split_path, FragmentAssembler};
use crate::SplitConfig;

/// Snapshot passed to a progress observer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    /// Index of the element being processed
    pub tag: usize,
    /// Number of candidate elements in the document
    pub tags: usize,
    /// Split points found so far across the whole document
    pub splits: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagStatus {
    /// Replaced by the given number of elements
    Split(usize),
    /// Path data has a single subpath
    Unchanged,
    Skipped(SkipReason),
    /// Path data is invalid; the element is left as-is
    Failed(PathError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagReport {
    /// 1-based line of the start of the element
    pub line: usize,
    pub status: TagStatus,
}

/// Result of processing a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Rewritten document, or `None` if no element was split
    pub output: Option<String>,
    /// One entry per candidate element, in document order
    pub tags: Vec<TagReport>,
}

impl SplitReport {
    /// Number of elements which were split.
    pub fn split_count(&self) -> usize {
        self.tags
            .iter()
            .filter(|t| matches!(t.status, TagStatus::Split(_)))
            .count()
    }

    /// Line and error of each element whose path data failed to parse.
    pub fn failures(&self) -> impl Iterator<Item = (usize, PathError)> + '_ {
        self.tags.iter().filter_map(|t| match t.status {
            TagStatus::Failed(err) => Some((t.line, err)),
            _ => None,
        })
    }
}

struct Candidate {
    span: Range<usize>,
    line: usize,
}

/// Tracks line numbers for increasing byte offsets.
struct LineCounter<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, pos: usize) -> usize {
        let pos = pos.min(self.input.len());
        if pos > self.pos {
            self.line += self.input.as_bytes()[self.pos..pos]
                .iter()
                .filter(|&&c| c == b'\n')
                .count();
            self.pos = pos;
        }
        self.line
    }
}

/// Find empty elements with one of the given names.
fn find_candidates<S: AsRef<str>>(input: &str, elements: &[S]) -> Result<Vec<Candidate>> {
    let mut reader = Reader::from_str(input);
    let mut lines = LineCounter::new(input);
    let mut candidates = Vec::new();

    loop {
        let ev = reader.read_event().map_err(|e| {
            let line = lines.line_at(reader.error_position() as usize);
            Error::Document(format!("XML error near line {line}: {e}"))
        })?;
        match ev {
            Event::Eof => break,
            Event::Empty(e) => {
                let name = e.name();
                if !elements.iter().any(|n| n.as_ref().as_bytes() == name.as_ref()) {
                    continue;
                }
                // element content excludes the surrounding '<' and '/>'
                let end = reader.buffer_position() as usize;
                let start = end
                    .checked_sub(e.len() + 3)
                    .filter(|&start| input.as_bytes().get(start) == Some(&b'<'))
                    .ok_or_else(|| {
                        Error::Document(format!("could not locate element ending at {end}"))
                    })?;
                candidates.push(Candidate {
                    span: start..end,
                    line: lines.line_at(start),
                });
            }
            _ => {}
        }
    }
    Ok(candidates)
}

/// Start of the text repeated for each new element: the start of the line
/// if only indentation precedes the element, otherwise the element itself.
fn fragment_start(input: &str, tag_start: usize) -> usize {
    let line_start = input[..tag_start].rfind('\n').map_or(0, |idx| idx + 1);
    if input[line_start..tag_start]
        .bytes()
        .all(|c| c == b' ' || c == b'\t')
    {
        line_start
    } else {
        tag_start
    }
}

/// Split each eligible element of `input` into one element per subpath.
///
/// `observer` is called before each candidate element and after each split
/// point is found; returning `ControlFlow::Break` abandons processing with
/// `Error::Cancelled`.
///
/// Elements with invalid path data are left unchanged and reported as
/// `TagStatus::Failed`; only a malformed document is an error.
pub fn split_document<F>(
    input: &str,
    config: &SplitConfig,
    mut observer: F,
) -> Result<SplitReport>
where
    F: FnMut(Progress) -> ControlFlow<()>,
{
    let candidates = find_candidates(input, config.elements.as_slice())?;
    let mut progress = Progress {
        tag: 0,
        tags: candidates.len(),
        splits: 0,
    };

    let mut output = String::with_capacity(input.len());
    let mut copied = 0;
    let mut reports = Vec::with_capacity(candidates.len());

    for (idx, Candidate { span, line }) in candidates.into_iter().enumerate() {
        progress.tag = idx;
        if observer(progress).is_break() {
            return Err(Error::Cancelled);
        }

        let tag = RawTag::parse(&input[span.clone()])?;
        let attr = match tag.path_data(config.attributes.as_slice()) {
            Ok(attr) => attr,
            Err(reason) => {
                debug!("line {line}: skipping <{}>: {reason}", tag.name());
                reports.push(TagReport {
                    line,
                    status: TagStatus::Skipped(reason),
                });
                continue;
            }
        };

        let start = fragment_start(input, span.start);
        let prefix = &input[start..span.start + attr.value_span.start];
        let suffix = &input[span.start + attr.value_span.end..span.end];
        let mut assembler = FragmentAssembler::new(prefix, attr.value, suffix);
        let mut failure = None;
        for split in split_path(attr.value) {
            match split {
                Ok(split) => {
                    assembler.push(&split);
                    progress.splits += 1;
                    if observer(progress).is_break() {
                        return Err(Error::Cancelled);
                    }
                }
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        let status = match (failure, assembler.finish()) {
            (Some(err), _) => {
                warn!("line {line}: invalid {}: {err}", attr.name);
                TagStatus::Failed(err)
            }
            (None, None) => {
                debug!("line {line}: single subpath");
                TagStatus::Unchanged
            }
            (None, Some((text, fragments))) => {
                debug!("line {line}: split into {fragments} elements");
                output.push_str(&input[copied..start]);
                output.push_str(&text);
                copied = span.end;
                TagStatus::Split(fragments)
            }
        };
        reports.push(TagReport { line, status });
    }

    let report = SplitReport {
        output: (copied > 0).then(|| {
            output.push_str(&input[copied..]);
            output
        }),
        tags: reports,
    };
    info!(
        "{} of {} path elements split",
        report.split_count(),
        report.tags.len()
    );
    Ok(report)
}
