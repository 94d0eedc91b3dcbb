//! Parser for [Well-Known Text] geometries.
//!
//! This crate reads the `POINT`, `MULTIPOINT`, `LINESTRING`, `POLYGON`,
//! and `MULTIPOLYGON` text forms, including the optional `Z`/`M`/`ZM`
//! dimension suffix, into owned [Geometry] values. Parsing is a single
//! left-to-right pass over the input bytes; the first error wins and no
//! partial geometry is ever returned. The parsed types implement the
//! [geo_traits] traits, so they plug into anything else in the georust
//! ecosystem that consumes geometries generically.
//!
//! ```
//! use wkt_reader::{parse, Dimension, Geometry};
//!
//! let geom = parse(b"POINT ZM(1 2 3 4)").unwrap();
//! assert_eq!(geom.dim(), Dimension::XYZM);
//! match geom {
//!     Geometry::Point(point) => {
//!         assert_eq!(point.coord.x, 1.0);
//!         assert_eq!(point.coord.m, 4.0);
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! [Well-Known Text]: https://en.wikipedia.org/wiki/Well-known_text_representation_of_geometry

#![warn(missing_docs)]

mod dimension;
pub mod error;
mod geometry;
mod reader;
mod traits;

pub use dimension::Dimension;
pub use error::{WktError, WktResult};
pub use geometry::{Coord, Geometry, LineString, MultiPoint, MultiPolygon, Point, Polygon};
pub use reader::parse;
pub use traits::{CoordRef, PolygonRef, RingRef};
