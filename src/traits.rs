//! [geo_traits] implementations for the parsed geometry types.
//!
//! Parsed coordinates are plain `f64` fields and rings are plain
//! `Vec<Coord>`, so neither carries its geometry's [Dimension] on its
//! own. The borrowed view structs here ([CoordRef], [RingRef],
//! [PolygonRef]) pair a borrow of the underlying data with that
//! dimension, which is what the traits need to answer `dim()` and
//! `nth_or_panic()`.

use core::marker::PhantomData;

use geo_traits::{
    CoordTrait, GeometryCollectionTrait, GeometryTrait, GeometryType, LineStringTrait,
    MultiPointTrait, MultiPolygonTrait, PointTrait, PolygonTrait, UnimplementedLine,
    UnimplementedMultiLineString, UnimplementedRect, UnimplementedTriangle,
};

use crate::geometry::{Coord, Geometry, LineString, MultiPoint, MultiPolygon, Point, Polygon};
use crate::Dimension;

/// A [Coord] borrowed together with its geometry's [Dimension].
#[derive(Debug, Clone, Copy)]
pub struct CoordRef<'a> {
    coord: &'a Coord,
    dim: Dimension,
}

/// One polygon ring borrowed together with its geometry's [Dimension].
#[derive(Debug, Clone, Copy)]
pub struct RingRef<'a> {
    coords: &'a [Coord],
    dim: Dimension,
}

/// One member polygon of a [MultiPolygon].
#[derive(Debug, Clone, Copy)]
pub struct PolygonRef<'a> {
    rings: &'a [Vec<Coord>],
    dim: Dimension,
}

impl CoordTrait for CoordRef<'_> {
    type T = f64;

    fn dim(&self) -> geo_traits::Dimensions {
        self.dim.into()
    }

    fn x(&self) -> Self::T {
        self.coord.x
    }

    fn y(&self) -> Self::T {
        self.coord.y
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.coord.x,
            1 => self.coord.y,
            2 if self.dim.has_z() => self.coord.z,
            2 if self.dim.has_m() => self.coord.m,
            3 if self.dim == Dimension::XYZM => self.coord.m,
            _ => panic!("n out of range"),
        }
    }
}

// A MultiPoint member is just a coordinate, so the coordinate view also
// stands in as the point view.
impl PointTrait for CoordRef<'_> {
    type T = f64;
    type CoordType<'b>
        = CoordRef<'b>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        self.dim.into()
    }

    fn coord(&self) -> Option<Self::CoordType<'_>> {
        Some(*self)
    }
}

impl LineStringTrait for RingRef<'_> {
    type T = f64;
    type CoordType<'b>
        = CoordRef<'b>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        self.dim.into()
    }

    fn num_coords(&self) -> usize {
        self.coords.len()
    }

    unsafe fn coord_unchecked(&self, i: usize) -> Self::CoordType<'_> {
        CoordRef {
            coord: &self.coords[i],
            dim: self.dim,
        }
    }
}

impl PolygonTrait for PolygonRef<'_> {
    type T = f64;
    type RingType<'b>
        = RingRef<'b>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        self.dim.into()
    }

    fn exterior(&self) -> Option<Self::RingType<'_>> {
        self.rings.first().map(|ring| RingRef {
            coords: ring,
            dim: self.dim,
        })
    }

    fn num_interiors(&self) -> usize {
        self.rings.len().saturating_sub(1)
    }

    unsafe fn interior_unchecked(&self, i: usize) -> Self::RingType<'_> {
        RingRef {
            coords: &self.rings[i + 1],
            dim: self.dim,
        }
    }
}

impl PointTrait for Point {
    type T = f64;
    type CoordType<'b>
        = CoordRef<'b>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        self.dim.into()
    }

    fn coord(&self) -> Option<Self::CoordType<'_>> {
        Some(CoordRef {
            coord: &self.coord,
            dim: self.dim,
        })
    }
}

impl PointTrait for &Point {
    type T = f64;
    type CoordType<'b>
        = CoordRef<'b>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        self.dim.into()
    }

    fn coord(&self) -> Option<Self::CoordType<'_>> {
        Some(CoordRef {
            coord: &self.coord,
            dim: self.dim,
        })
    }
}

impl MultiPointTrait for MultiPoint {
    type T = f64;
    type PointType<'b>
        = CoordRef<'b>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        self.dim.into()
    }

    fn num_points(&self) -> usize {
        self.coords.len()
    }

    unsafe fn point_unchecked(&self, i: usize) -> Self::PointType<'_> {
        CoordRef {
            coord: &self.coords[i],
            dim: self.dim,
        }
    }
}

impl LineStringTrait for LineString {
    type T = f64;
    type CoordType<'b>
        = CoordRef<'b>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        self.dim.into()
    }

    fn num_coords(&self) -> usize {
        self.coords.len()
    }

    unsafe fn coord_unchecked(&self, i: usize) -> Self::CoordType<'_> {
        CoordRef {
            coord: &self.coords[i],
            dim: self.dim,
        }
    }
}

impl PolygonTrait for Polygon {
    type T = f64;
    type RingType<'b>
        = RingRef<'b>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        self.dim.into()
    }

    fn exterior(&self) -> Option<Self::RingType<'_>> {
        self.rings.first().map(|ring| RingRef {
            coords: ring,
            dim: self.dim,
        })
    }

    fn num_interiors(&self) -> usize {
        self.rings.len().saturating_sub(1)
    }

    unsafe fn interior_unchecked(&self, i: usize) -> Self::RingType<'_> {
        RingRef {
            coords: &self.rings[i + 1],
            dim: self.dim,
        }
    }
}

impl MultiPolygonTrait for MultiPolygon {
    type T = f64;
    type PolygonType<'b>
        = PolygonRef<'b>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        self.dim.into()
    }

    fn num_polygons(&self) -> usize {
        self.polygons.len()
    }

    unsafe fn polygon_unchecked(&self, i: usize) -> Self::PolygonType<'_> {
        PolygonRef {
            rings: &self.polygons[i],
            dim: self.dim,
        }
    }
}

/// Placeholder for the geometry-collection slot of [GeometryTrait].
///
/// geo-traits 0.2 does not ship `UnimplementedGeometryCollection`; this
/// mirrors the upstream placeholder and is never constructed because
/// [Geometry] has no collection variant.
#[derive(Debug, Clone, Copy)]
pub struct UnimplementedGeometryCollection<T>(PhantomData<T>);

impl GeometryCollectionTrait for UnimplementedGeometryCollection<f64> {
    type T = f64;
    type GeometryType<'b>
        = Geometry
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        unimplemented!()
    }

    fn num_geometries(&self) -> usize {
        unimplemented!()
    }

    unsafe fn geometry_unchecked(&self, _i: usize) -> Self::GeometryType<'_> {
        unimplemented!()
    }
}

impl GeometryTrait for Geometry {
    type T = f64;
    type PointType<'b>
        = Point
    where
        Self: 'b;
    type LineStringType<'b>
        = LineString
    where
        Self: 'b;
    type PolygonType<'b>
        = Polygon
    where
        Self: 'b;
    type MultiPointType<'b>
        = MultiPoint
    where
        Self: 'b;
    type MultiLineStringType<'b>
        = UnimplementedMultiLineString<f64>
    where
        Self: 'b;
    type MultiPolygonType<'b>
        = MultiPolygon
    where
        Self: 'b;
    type GeometryCollectionType<'b>
        = UnimplementedGeometryCollection<f64>
    where
        Self: 'b;
    type RectType<'b>
        = UnimplementedRect<f64>
    where
        Self: 'b;
    type LineType<'b>
        = UnimplementedLine<f64>
    where
        Self: 'b;
    type TriangleType<'b>
        = UnimplementedTriangle<f64>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        Geometry::dim(self).into()
    }

    fn as_type(
        &self,
    ) -> GeometryType<
        '_,
        Point,
        LineString,
        Polygon,
        MultiPoint,
        UnimplementedMultiLineString<f64>,
        MultiPolygon,
        UnimplementedGeometryCollection<f64>,
        UnimplementedRect<f64>,
        UnimplementedTriangle<f64>,
        UnimplementedLine<f64>,
    > {
        match self {
            Geometry::Point(g) => GeometryType::Point(g),
            Geometry::MultiPoint(g) => GeometryType::MultiPoint(g),
            Geometry::LineString(g) => GeometryType::LineString(g),
            Geometry::Polygon(g) => GeometryType::Polygon(g),
            Geometry::MultiPolygon(g) => GeometryType::MultiPolygon(g),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parse;

    #[test]
    fn point_through_traits() {
        let geom = parse(b"POINT ZM(1 2 3 4)").unwrap();
        match geom.as_type() {
            GeometryType::Point(point) => {
                assert_eq!(PointTrait::dim(point), geo_traits::Dimensions::Xyzm);
                let coord = point.coord().unwrap();
                assert_eq!(coord.x(), 1.);
                assert_eq!(coord.y(), 2.);
                assert_eq!(coord.nth_or_panic(2), 3.);
                assert_eq!(coord.nth_or_panic(3), 4.);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn xym_third_ordinate_is_m() {
        let geom = parse(b"POINT M(1 2 4)").unwrap();
        match geom.as_type() {
            GeometryType::Point(point) => {
                let coord = point.coord().unwrap();
                assert_eq!(CoordTrait::dim(&coord), geo_traits::Dimensions::Xym);
                assert_eq!(coord.nth_or_panic(2), 4.);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn linestring_coords() {
        let geom = parse(b"LINESTRING(30 10, 10 30, 40 40)").unwrap();
        match geom.as_type() {
            GeometryType::LineString(line) => {
                assert_eq!(line.num_coords(), 3);
                let xs: Vec<f64> = line.coords().map(|c| c.x()).collect();
                assert_eq!(xs, vec![30., 10., 40.]);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn multipoint_points() {
        let geom = parse(b"MULTIPOINT((30 10), (10 30))").unwrap();
        match geom.as_type() {
            GeometryType::MultiPoint(multi) => {
                assert_eq!(multi.num_points(), 2);
                let point = multi.point(1).unwrap();
                assert_eq!(point.coord().unwrap().y(), 30.);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn polygon_rings() {
        let geom = parse(
            b"POLYGON((35 10, 10 20, 15 40, 45 45, 35 10),(20 30, 35 35, 30 20, 20 30))",
        )
        .unwrap();
        match geom.as_type() {
            GeometryType::Polygon(polygon) => {
                let exterior = polygon.exterior().unwrap();
                assert_eq!(exterior.num_coords(), 5);
                assert_eq!(polygon.num_interiors(), 1);
                let hole = polygon.interior(0).unwrap();
                assert_eq!(hole.num_coords(), 4);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn multipolygon_polygons() {
        let geom = parse(
            b"MULTIPOLYGON(((30 10,10 20,20 40,40 40,30 10)),\
              ((35 10,10 20,15 40,45 45,35 10),(20 30,35 35,30 20,20 30)))",
        )
        .unwrap();
        match geom.as_type() {
            GeometryType::MultiPolygon(multi) => {
                assert_eq!(multi.num_polygons(), 2);
                let second = multi.polygon(1).unwrap();
                assert_eq!(second.num_interiors(), 1);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn empty_polygon_view_has_no_exterior() {
        let polygon = Polygon {
            rings: vec![],
            dim: Dimension::XY,
        };
        assert!(polygon.exterior().is_none());
        assert_eq!(polygon.num_interiors(), 0);
    }
}
