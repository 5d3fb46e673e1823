//! Splits raw config bytes into one slice per `Host` section.
//!
//! A section starts where a line's first non-blank text is the marker
//! (`host `, any case) and runs up to the next such line or the end of
//! input. Anything before the first marker is global configuration and is
//! not part of any section.

/// Marker that opens a Host section, compared case-insensitively.
pub const HOST_MARKER: &[u8] = b"host ";

/// Lazy iterator over Host sections. Created by [`split_host_sections`].
#[derive(Debug, Clone)]
pub struct HostSections<'a> {
    data: &'a [u8],
    marker: &'a [u8],
    next_start: Option<usize>,
    started: bool,
}

/// Iterate over the Host sections in `data`.
pub fn split_host_sections(data: &[u8]) -> HostSections<'_> {
    split_sections(data, HOST_MARKER)
}

/// Iterate over sections of `data` opened by `marker`.
pub fn split_sections<'a>(data: &'a [u8], marker: &'a [u8]) -> HostSections<'a> {
    HostSections {
        data,
        marker,
        next_start: None,
        started: false,
    }
}

impl<'a> Iterator for HostSections<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            self.next_start = find_marker(self.data, self.marker, 0);
        }

        let start = self.next_start?;
        let after_header = line_end(self.data, start);
        let end = find_marker(self.data, self.marker, after_header);
        self.next_start = end;

        Some(&self.data[start..end.unwrap_or(self.data.len())])
    }
}

impl std::iter::FusedIterator for HostSections<'_> {}

/// Index one past the newline ending the line that contains `from`.
fn line_end(data: &[u8], from: usize) -> usize {
    data[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(data.len(), |i| from + i + 1)
}

/// Offset of the first marker at the start of a line, at or after the line
/// beginning at `from`. Leading spaces and tabs on the line are skipped.
fn find_marker(data: &[u8], marker: &[u8], from: usize) -> Option<usize> {
    let mut line_start = from;
    while line_start < data.len() {
        let end = line_end(data, line_start);
        let line = &data[line_start..end];
        let indent = line
            .iter()
            .take_while(|&&b| b == b' ' || b == b'\t')
            .count();
        let rest = &line[indent..];
        if rest.len() >= marker.len() && rest[..marker.len()].eq_ignore_ascii_case(marker) {
            return Some(line_start + indent);
        }
        line_start = end;
    }
    None
}
