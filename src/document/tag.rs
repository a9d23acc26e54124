use std::fmt;
use std::ops::Range;

use crate::errors::{Error, Result};

/// An attribute as written in the source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawAttribute<'a> {
    pub name: &'a str,
    pub value: &'a str,
    /// Byte range of `value` within the tag text, excluding quotes
    pub value_span: Range<usize>,
}

/// An element start (or empty element) tag as written in the source text.
///
/// Values are kept exactly as written, without entity expansion, so that
/// spans can be used to rewrite the original text.
#[derive(Clone, Debug)]
pub struct RawTag<'a> {
    name: &'a str,
    attributes: Vec<RawAttribute<'a>>,
}

/// Why an element was left untouched without parsing its path data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// None of the configured path data attributes are present
    NoPathData,
    /// Path data has no moveto or closepath commands
    NoSubpaths,
    /// Subpaths of an even-odd filled shape interact, so can't be separated
    EvenOddFill,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoPathData => write!(f, "no path data"),
            SkipReason::NoSubpaths => write!(f, "no subpath commands"),
            SkipReason::EvenOddFill => write!(f, "even-odd fill rule"),
        }
    }
}

const FILL_RULE_ATTRS: [&str; 2] = ["android:fillType", "fill-rule"];

fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n')
}

impl<'a> RawTag<'a> {
    /// Parse tag text such as `<path a="1" b='2'/>`.
    pub fn parse(text: &'a str) -> Result<Self> {
        let bytes = text.as_bytes();
        let err = |msg: &str, pos: usize| Error::Document(format!("{msg} at offset {pos} in tag"));

        if bytes.first() != Some(&b'<') {
            return Err(err("expected '<'", 0));
        }
        let mut pos = 1;
        let name_start = pos;
        while pos < bytes.len() && !is_space(bytes[pos]) && !matches!(bytes[pos], b'/' | b'>') {
            pos += 1;
        }
        if pos == name_start {
            return Err(err("missing element name", pos));
        }
        let name = &text[name_start..pos];

        let mut attributes = Vec::new();
        loop {
            while pos < bytes.len() && is_space(bytes[pos]) {
                pos += 1;
            }
            match bytes.get(pos) {
                None => return Err(err("unterminated tag", pos)),
                Some(b'/' | b'>') => break,
                Some(_) => {}
            }

            let attr_start = pos;
            while pos < bytes.len()
                && !is_space(bytes[pos])
                && !matches!(bytes[pos], b'=' | b'/' | b'>')
            {
                pos += 1;
            }
            let attr_name = &text[attr_start..pos];
            while pos < bytes.len() && is_space(bytes[pos]) {
                pos += 1;
            }
            if bytes.get(pos) != Some(&b'=') {
                return Err(err(&format!("expected '=' after '{attr_name}'"), pos));
            }
            pos += 1;
            while pos < bytes.len() && is_space(bytes[pos]) {
                pos += 1;
            }
            let quote = match bytes.get(pos) {
                Some(&q @ (b'"' | b'\'')) => q,
                _ => return Err(err(&format!("expected quoted value for '{attr_name}'"), pos)),
            };
            pos += 1;
            let value_start = pos;
            let Some(len) = bytes[value_start..].iter().position(|&c| c == quote) else {
                return Err(err("unterminated attribute value", value_start));
            };
            pos = value_start + len;
            attributes.push(RawAttribute {
                name: attr_name,
                value: &text[value_start..pos],
                value_span: value_start..pos,
            });
            pos += 1;
        }

        Ok(Self { name, attributes })
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn attributes(&self) -> &[RawAttribute<'a>] {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&RawAttribute<'a>> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// The first attribute whose name is one of `names`, in attribute order.
    pub fn find_any<S: AsRef<str>>(&self, names: &[S]) -> Option<&RawAttribute<'a>> {
        self.attributes
            .iter()
            .find(|a| names.iter().any(|n| n.as_ref() == a.name))
    }

    pub fn has_even_odd_fill(&self) -> bool {
        FILL_RULE_ATTRS.iter().any(|name| {
            self.get(name)
                .is_some_and(|a| a.value.trim().eq_ignore_ascii_case("evenodd"))
        })
    }

    /// Locate the path data attribute, or give the reason this tag can't
    /// be split.
    pub fn path_data<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> std::result::Result<&RawAttribute<'a>, SkipReason> {
        let attr = self.find_any(names).ok_or(SkipReason::NoPathData)?;
        if !attr.value.contains(['M', 'm', 'Z', 'z']) {
            return Err(SkipReason::NoSubpaths);
        }
        if self.has_even_odd_fill() {
            return Err(SkipReason::EvenOddFill);
        }
        Ok(attr)
    }
}
