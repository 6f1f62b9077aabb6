//! Candidate Text Formats
//!
//! Input files carry no declared schema, so delimited text is parsed by
//! trying an ordered list of candidate (encoding, delimiter) formats until
//! one yields numeric data. On ambiguous files the first match in trial
//! order wins.

use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;

/// Character encodings tried, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Windows1252,
}

impl TextEncoding {
    /// Trial order.
    pub const ALL: [TextEncoding; 3] = [
        TextEncoding::Utf8,
        TextEncoding::Latin1,
        TextEncoding::Windows1252,
    ];

    /// Decode raw bytes, or `None` when the bytes are invalid for this
    /// encoding. Latin-1 maps every byte and never fails.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            TextEncoding::Utf8 => {
                let (text, _, had_errors) = UTF_8.decode(bytes);
                if had_errors {
                    None
                } else {
                    Some(text)
                }
            }
            // encoding_rs follows the WHATWG registry, where the latin1
            // label aliases windows-1252; true ISO-8859-1 is the identity
            // byte-to-code-point mapping.
            TextEncoding::Latin1 => Some(Cow::Owned(bytes.iter().map(|&b| b as char).collect())),
            TextEncoding::Windows1252 => {
                let (text, _, had_errors) = WINDOWS_1252.decode(bytes);
                if had_errors {
                    None
                } else {
                    Some(text)
                }
            }
        }
    }
}

/// Field delimiters tried, in order.
pub const DELIMITERS: [u8; 3] = [b';', b',', b'\t'];

/// One candidate parsing strategy: a (encoding, delimiter) pair.
#[derive(Debug, Clone, Copy)]
pub struct CandidateFormat {
    pub encoding: TextEncoding,
    pub delimiter: u8,
}

impl CandidateFormat {
    /// All candidates in trial order: encoding-major, delimiter-minor.
    pub fn all() -> impl Iterator<Item = CandidateFormat> {
        TextEncoding::ALL.into_iter().flat_map(|encoding| {
            DELIMITERS
                .into_iter()
                .map(move |delimiter| CandidateFormat {
                    encoding,
                    delimiter,
                })
        })
    }

    /// Try to extract numeric samples under this format. Returns `None`
    /// when the encoding rejects the bytes or no row yields a number.
    ///
    /// A header row is assumed when the first field of the first line does
    /// not parse as a number; it is skipped. Each remaining row contributes
    /// the first of its fields that parses as a number.
    pub fn extract(&self, bytes: &[u8]) -> Option<Vec<f64>> {
        let text = self.encoding.decode(bytes)?;

        let delim_char = self.delimiter as char;
        let first_field = text
            .lines()
            .next()
            .and_then(|line| line.split(delim_char).next())
            .unwrap_or("");
        let has_header = parse_numeric(first_field).is_none();

        let body: &str = if has_header {
            text.splitn(2, '\n').nth(1).unwrap_or("")
        } else {
            &text
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(body.as_bytes());

        let mut values = Vec::new();
        for record in reader.records() {
            let Ok(record) = record else { continue };
            if let Some(value) = record.iter().find_map(parse_numeric) {
                values.push(value);
            }
        }

        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }
}

/// Parse one field as a number: trim whitespace, convert a comma decimal
/// separator to a period.
pub(crate) fn parse_numeric(field: &str) -> Option<f64> {
    field.trim().replace(',', ".").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trial_order_is_encoding_major() {
        let candidates: Vec<_> = CandidateFormat::all().collect();
        assert_eq!(candidates.len(), 9);
        assert_eq!(candidates[0].encoding, TextEncoding::Utf8);
        assert_eq!(candidates[0].delimiter, b';');
        assert_eq!(candidates[1].delimiter, b',');
        assert_eq!(candidates[3].encoding, TextEncoding::Latin1);
    }

    #[test]
    fn test_comma_decimal_with_semicolon_delimiter() {
        let format = CandidateFormat {
            encoding: TextEncoding::Utf8,
            delimiter: b';',
        };
        let values = format.extract(b"1,5;9,9\n2,5;8,8\n3,5;7,7\n").unwrap();
        assert_eq!(values, vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_header_row_is_skipped() {
        let format = CandidateFormat {
            encoding: TextEncoding::Utf8,
            delimiter: b',',
        };
        let values = format.extract(b"amplitude,time\n0.1,0\n0.2,1\n").unwrap();
        assert_eq!(values, vec![0.1, 0.2]);
    }

    #[test]
    fn test_first_numeric_field_wins() {
        let format = CandidateFormat {
            encoding: TextEncoding::Utf8,
            delimiter: b',',
        };
        let values = format.extract(b"9.0,1.0\nx,2.0\ny,3.0\n").unwrap();
        assert_eq!(values, vec![9.0, 2.0, 3.0]);
    }

    #[test]
    fn test_no_numeric_data_is_none() {
        let format = CandidateFormat {
            encoding: TextEncoding::Utf8,
            delimiter: b',',
        };
        assert!(format.extract(b"a,b\nc,d\n").is_none());
    }

    #[test]
    fn test_invalid_utf8_rejected_latin1_accepts() {
        let bytes = b"1.5\n2.5\xff\n3.5\n";
        assert!(TextEncoding::Utf8.decode(bytes).is_none());
        assert!(TextEncoding::Latin1.decode(bytes).is_some());
    }

    #[test]
    fn test_parse_numeric_normalization() {
        assert_eq!(parse_numeric("  1,25 "), Some(1.25));
        assert_eq!(parse_numeric("3.5"), Some(3.5));
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric(""), None);
    }
}
