use serde::{Deserialize, Serialize};

use crate::contract::{MovieInfo, MovieRecord};
use crate::error::IngestError;

pub const CSV_FIELD_COUNT: usize = 4;

/// One parsed line of an uploaded object, fields in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRow {
    pub identifier: String,
    pub title: String,
    pub plot: String,
    pub rating: String,
}

impl CsvRow {
    /// Positional mapping onto the stored item: field 0 becomes the
    /// partition key, fields 1..=3 become `title`, `info.plot`, `info.rating`.
    /// Same order as `put_movie(data[0], data[1], data[2], data[3])` with
    /// parameters `(moviename, title, plot, rating)`.
    pub fn into_record(self) -> MovieRecord {
        MovieRecord {
            movie_name: self.identifier,
            title: self.title,
            info: MovieInfo {
                plot: self.plot,
                rating: self.rating,
            },
        }
    }
}

/// Splits an object body on `\n`.
///
/// Every segment is kept, so a trailing newline yields a trailing empty
/// line. An empty body has no lines at all.
pub fn split_object_lines(body: &[u8]) -> Vec<&[u8]> {
    if body.is_empty() {
        return Vec::new();
    }
    body.split(|byte| *byte == b'\n').collect()
}

/// Parses one line. `line_number` is 1-based and only used for errors.
///
/// There is no quoting support: the line is trimmed and split on every
/// comma. Fields past the fourth are ignored.
pub fn parse_row(line_number: usize, line: &[u8]) -> Result<CsvRow, IngestError> {
    let text = std::str::from_utf8(line).map_err(|_| IngestError::Decode { line: line_number })?;
    let fields: Vec<&str> = text.trim().split(',').collect();

    if fields.len() < CSV_FIELD_COUNT {
        return Err(IngestError::MalformedRow {
            line: line_number,
            fields: fields.len(),
        });
    }

    Ok(CsvRow {
        identifier: fields[0].to_string(),
        title: fields[1].to_string(),
        plot: fields[2].to_string(),
        rating: fields[3].to_string(),
    })
}
