//! The geometry value model produced by [`parse`](crate::parse).
//!
//! All types here are plain owned values: a successful parse hands the
//! caller a [Geometry] and keeps no state behind. Equality is structural
//! and exact (same variant, same [Dimension], element-wise equal
//! coordinates in the same order, no epsilon tolerance).

use serde::{Deserialize, Serialize};

use crate::Dimension;

/// A single location in coordinate space.
///
/// The `z` and `m` fields are only meaningful when the owning geometry's
/// [Dimension] declares those channels; otherwise they hold zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    /// X value (easting/longitude).
    pub x: f64,
    /// Y value (northing/latitude).
    pub y: f64,
    /// Z value (elevation), zero unless the dimension has z.
    pub z: f64,
    /// M value (measure), zero unless the dimension has m.
    pub m: f64,
}

impl Coord {
    /// Construct a 2D coordinate with zeroed z and m channels.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0., m: 0. }
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Coord::new(x, y)
    }
}

/// A single point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// The point's location.
    pub coord: Coord,
    /// Declared coordinate dimension.
    pub dim: Dimension,
}

/// An unconnected list of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPoint {
    /// The member points, in input order.
    pub coords: Vec<Coord>,
    /// Declared coordinate dimension.
    pub dim: Dimension,
}

/// A connected path of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    /// The path's vertices, in input order.
    pub coords: Vec<Coord>,
    /// Declared coordinate dimension.
    pub dim: Dimension,
}

/// A list of rings where the first ring is the exterior boundary and any
/// following rings are holes.
///
/// Every ring is closed (first coordinate equals the last) and has at
/// least 4 coordinates; the parser rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Exterior ring followed by interior rings.
    pub rings: Vec<Vec<Coord>>,
    /// Declared coordinate dimension.
    pub dim: Dimension,
}

/// A list of polygon ring lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygon {
    /// One ring list per member polygon.
    pub polygons: Vec<Vec<Vec<Coord>>>,
    /// Declared coordinate dimension.
    pub dim: Dimension,
}

/// One of the geometry types supported by this crate.
///
/// This is a closed sum over the five WKT keywords the parser
/// recognizes, so matching on it is exhaustive and an unknown variant
/// cannot exist at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// A parsed `POINT`.
    Point(Point),
    /// A parsed `MULTIPOINT`.
    MultiPoint(MultiPoint),
    /// A parsed `LINESTRING`.
    LineString(LineString),
    /// A parsed `POLYGON`.
    Polygon(Polygon),
    /// A parsed `MULTIPOLYGON`.
    MultiPolygon(MultiPolygon),
}

impl Geometry {
    /// The declared coordinate dimension of this geometry.
    pub fn dim(&self) -> Dimension {
        match self {
            Geometry::Point(g) => g.dim,
            Geometry::MultiPoint(g) => g.dim,
            Geometry::LineString(g) => g.dim,
            Geometry::Polygon(g) => g.dim,
            Geometry::MultiPolygon(g) => g.dim,
        }
    }

    /// Whether the z channel is declared, as in `POINT Z(1 2 3)`.
    pub fn has_z(&self) -> bool {
        self.dim().has_z()
    }

    /// Whether the m channel is declared, as in `POINT M(1 2 4)`.
    pub fn has_m(&self) -> bool {
        self.dim().has_m()
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Geometry::Point(value)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(value: MultiPoint) -> Self {
        Geometry::MultiPoint(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Geometry::LineString(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Geometry::Polygon(value)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(value: MultiPolygon) -> Self {
        Geometry::MultiPolygon(value)
    }
}
