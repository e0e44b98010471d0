//! Decoded view of a raw link target.

use percent_encoding::percent_decode_str;

/// A raw href plus the decoded forms the classifiers match against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Href {
    raw: String,
    decoded: String,
    location: String,
    file_name: String,
}

impl Href {
    pub fn new(raw: &str) -> Self {
        let decoded = decode(raw);
        let location = strip_authority(&decoded).to_lowercase();
        let path = decoded
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        let file_name = path
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or_default()
            .to_string();

        Self {
            raw: raw.to_string(),
            decoded,
            location,
            file_name,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Percent-decoded href, original case.
    pub fn decoded(&self) -> &str {
        &self.decoded
    }

    /// Lowercased, decoded path and query with scheme and host removed.
    ///
    /// Keyword signals are matched here so that the portal's own host name
    /// never contributes to classification.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Last path segment, decoded, without query or fragment.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        match extension_start(&self.file_name) {
            Some(pos) => &self.file_name[..pos],
            None => &self.file_name,
        }
    }

    /// Extension including the leading dot, or an empty string.
    pub fn extension(&self) -> &str {
        match extension_start(&self.file_name) {
            Some(pos) => &self.file_name[pos..],
            None => "",
        }
    }
}

/// Percent-decodes a string, replacing invalid UTF-8 sequences.
pub fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

fn strip_authority(decoded: &str) -> &str {
    match decoded.find("://") {
        Some(idx) => {
            let rest = &decoded[idx + 3..];
            match rest.find('/') {
                Some(slash) => &rest[slash..],
                None => "",
            }
        }
        None => decoded,
    }
}

// A leading dot (".hidden") is not an extension.
fn extension_start(file_name: &str) -> Option<usize> {
    match file_name.rfind('.') {
        Some(0) | None => None,
        Some(pos) => Some(pos),
    }
}
