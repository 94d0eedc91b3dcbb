//! Parse [Well-Known Text] into [Geometry] values.
//!
//! [Well-Known Text]: https://en.wikipedia.org/wiki/Well-known_text_representation_of_geometry

mod scanner;

use std::str::FromStr;

use crate::error::{WktError, WktResult};
use crate::geometry::Geometry;
use scanner::Scanner;

/// Parse one WKT geometry from a byte buffer.
///
/// Recognizes the `POINT`, `MULTIPOINT`, `LINESTRING`, `POLYGON`, and
/// `MULTIPOLYGON` keywords with an optional `Z`/`M`/`ZM` dimension
/// suffix, all case-insensitive. The input is walked once; the first
/// error encountered is returned and no partial geometry is ever
/// surfaced.
///
/// ```
/// use wkt_reader::{parse, Geometry};
///
/// let geom = parse(b"LINESTRING(30 10, 10 30, 40 40)").unwrap();
/// match geom {
///     Geometry::LineString(line) => assert_eq!(line.coords.len(), 3),
///     _ => unreachable!(),
/// }
/// ```
pub fn parse(data: &[u8]) -> WktResult<Geometry> {
    Scanner::new(data).scan_geometry()
}

impl FromStr for Geometry {
    type Err = WktError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse(s.as_bytes())
    }
}
