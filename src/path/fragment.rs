use super::splitter::Split;

/// Builds sibling elements from a path and its split points.
///
/// Each fragment is written as `prefix + path fragment + suffix`, where
/// `prefix` and `suffix` are the literal element text either side of the
/// path data value. Fragments are separated by a single newline.
pub struct FragmentAssembler<'a> {
    prefix: &'a str,
    path: &'a str,
    suffix: &'a str,
    output: String,
    last_end: usize,
    pending_prefix: String,
    fragments: usize,
}

impl<'a> FragmentAssembler<'a> {
    pub fn new(prefix: &'a str, path: &'a str, suffix: &'a str) -> Self {
        Self {
            prefix,
            path,
            suffix,
            output: String::new(),
            last_end: 0,
            pending_prefix: String::new(),
            fragments: 0,
        }
    }

    /// Number of fragments completed so far.
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    pub fn push(&mut self, split: &Split) {
        let piece = self
            .path
            .get(self.last_end..split.skip_start)
            .unwrap_or_default();
        self.write_fragment(piece);
        self.output.push('\n');
        self.last_end = split.skip_end;
        self.pending_prefix = split.prefix.clone();
    }

    /// Complete the output along with its number of fragments; `None` if
    /// there were no split points.
    pub fn finish(mut self) -> Option<(String, usize)> {
        if self.fragments == 0 {
            return None;
        }
        let rest = self.path.get(self.last_end..).unwrap_or_default();
        if rest.is_empty() {
            // nothing follows the final split point
            self.output.pop();
        } else {
            self.write_fragment(rest);
        }
        Some((self.output, self.fragments))
    }

    fn write_fragment(&mut self, piece: &str) {
        self.output.push_str(self.prefix);
        self.output.push_str(&self.pending_prefix);
        self.output.push_str(piece);
        self.output.push_str(self.suffix);
        self.fragments += 1;
    }
}
