use crate::error::{WktError, WktResult};
use crate::geometry::{Coord, Geometry, LineString, MultiPoint, MultiPolygon, Point, Polygon};
use crate::Dimension;

const WHITESPACE: [u8; 4] = [b' ', b'\t', b'\n', b'\r'];

/// A cursor over one WKT input buffer.
///
/// Holds a read-only view of the caller's bytes and a single read
/// position; one scanner is created per parse call and walks the buffer
/// left to right. The only backtracking is the bounded MULTIPOINT
/// lookahead in [`Self::scan_coords`], which snapshots and restores the
/// position around a trial `(`.
pub(crate) struct Scanner<'a> {
    raw: &'a [u8],
    pos: usize,
    dim: Dimension,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(raw: &'a [u8]) -> Self {
        Self {
            raw,
            pos: 0,
            dim: Dimension::XY,
        }
    }

    /// The byte at the current position, without advancing.
    fn peek(&self) -> WktResult<u8> {
        if self.pos >= self.raw.len() {
            return Err(WktError::UnexpectedEof);
        }
        Ok(self.raw[self.pos])
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.raw.len() && WHITESPACE.contains(&self.raw[self.pos]) {
            self.pos += 1;
        }
    }

    /// Require and consume an opening `(`, skipping leading whitespace.
    ///
    /// Consumes nothing beyond whitespace on failure.
    fn expect_open(&mut self) -> WktResult<()> {
        self.skip_whitespace();
        let b = self.peek()?;
        if b != b'(' {
            return Err(WktError::UnexpectedByte {
                expected: "'('",
                found: b as char,
            });
        }
        self.pos += 1;
        Ok(())
    }

    /// Require and consume `,` or `)`; returns whether it was a comma
    /// (the list continues).
    fn expect_comma_or_close(&mut self) -> WktResult<bool> {
        self.skip_whitespace();
        let b = self.peek()?;
        let comma = b == b',';
        if !comma && b != b')' {
            return Err(WktError::UnexpectedByte {
                expected: "',' or ')'",
                found: b as char,
            });
        }
        self.pos += 1;
        Ok(comma)
    }

    /// Consume a maximal run of ASCII letters, folding each to uppercase
    /// as it goes.
    ///
    /// The first non-letter byte (including `(` or whitespace) ends the
    /// run without being consumed, so a failed call leaves the position
    /// where it was apart from skipped whitespace.
    fn scan_identifier(&mut self) -> WktResult<String> {
        self.skip_whitespace();
        let mut ident = String::new();
        while self.pos < self.raw.len() {
            let b = self.raw[self.pos];
            if !b.is_ascii_alphabetic() {
                break;
            }
            ident.push(b.to_ascii_uppercase() as char);
            self.pos += 1;
        }
        if ident.is_empty() {
            let found = self.peek()?;
            return Err(WktError::UnexpectedByte {
                expected: "an identifier",
                found: found as char,
            });
        }
        Ok(ident)
    }

    /// Consume one numeric literal (optional sign, integer/fractional
    /// part, optional exponent).
    fn scan_number(&mut self) -> WktResult<f64> {
        self.skip_whitespace();
        let start = self.pos;
        while self.pos < self.raw.len()
            && matches!(self.raw[self.pos], b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E')
        {
            self.pos += 1;
        }
        if self.pos == start {
            let found = self.peek()?;
            return Err(WktError::MalformedNumber((found as char).to_string()));
        }
        let token = &self.raw[start..self.pos];
        lexical_core::parse::<f64>(token)
            .map_err(|_| WktError::MalformedNumber(String::from_utf8_lossy(token).into_owned()))
    }

    fn assign_component(&self, coord: &mut Coord, index: usize, value: f64) {
        // Field order is fixed: x, y, then z and/or m per the declared
        // dimension. Components beyond the declared count are dropped.
        match index {
            0 => coord.x = value,
            1 => coord.y = value,
            2 if self.dim.has_z() => coord.z = value,
            2 if self.dim.has_m() => coord.m = value,
            3 if self.dim.has_z() && self.dim.has_m() => coord.m = value,
            _ => {}
        }
    }

    /// Scan one coordinate tuple up to and including its trailing `,` or
    /// `)`; returns the coordinate and whether a comma signalled more
    /// coordinates to follow.
    ///
    /// Components are separated by whitespace only. The tuple ends at the
    /// first delimiter, so a tuple may carry fewer components than the
    /// dimension declares (the rest stay zero) or more (the excess is
    /// dropped).
    fn scan_coord(&mut self) -> WktResult<(Coord, bool)> {
        let mut coord = Coord::default();
        let mut index = 0;
        loop {
            let value = self.scan_number()?;
            self.assign_component(&mut coord, index, value);
            index += 1;
            self.skip_whitespace();
            let b = self.peek()?;
            if b == b',' || b == b')' {
                self.pos += 1;
                return Ok((coord, b == b','));
            }
        }
    }

    /// Scan a parenthesized coordinate list.
    ///
    /// With `nested_per_point` (MULTIPOINT only), a trial `(` right after
    /// the outer one selects the nested form `((x y), (x y))`; if the
    /// trial fails the cursor is restored and the flat form `(x y, x y)`
    /// is used. The two forms cannot be mixed within one list.
    fn scan_coords(&mut self, nested_per_point: bool) -> WktResult<Vec<Coord>> {
        self.expect_open()?;
        let mut nested = false;
        if nested_per_point {
            let checkpoint = self.pos;
            match self.expect_open() {
                Ok(()) => nested = true,
                Err(_) => self.pos = checkpoint,
            }
        }
        let mut coords = Vec::new();
        loop {
            let (coord, comma) = self.scan_coord()?;
            coords.push(coord);
            if comma {
                if nested {
                    // a nested singleton must end with ')'
                    return Err(WktError::UnexpectedByte {
                        expected: "')'",
                        found: ',',
                    });
                }
                continue;
            }
            if nested {
                if self.expect_comma_or_close()? {
                    self.expect_open()?;
                    continue;
                }
            }
            return Ok(coords);
        }
    }

    /// Scan a polygon body: a parenthesized list of rings, each validated
    /// for length and closure.
    fn scan_rings(&mut self) -> WktResult<Vec<Vec<Coord>>> {
        self.expect_open()?;
        let mut rings = Vec::new();
        loop {
            let ring = self.scan_coords(false)?;
            if ring.len() < 4 {
                return Err(WktError::RingTooShort(ring.len()));
            }
            if ring.first() != ring.last() {
                return Err(WktError::RingNotClosed);
            }
            rings.push(ring);
            if self.expect_comma_or_close()? {
                continue;
            }
            return Ok(rings);
        }
    }

    /// Scan a multi-polygon body: a parenthesized list of polygon bodies.
    fn scan_multi_polygon(&mut self) -> WktResult<Vec<Vec<Vec<Coord>>>> {
        self.expect_open()?;
        let mut polygons = Vec::new();
        loop {
            polygons.push(self.scan_rings()?);
            if self.expect_comma_or_close()? {
                continue;
            }
            return Ok(polygons);
        }
    }

    /// Scan one complete geometry: keyword, optional dimension suffix,
    /// body.
    pub(crate) fn scan_geometry(&mut self) -> WktResult<Geometry> {
        let keyword = self.scan_identifier()?;
        // Optional Z/M/ZM suffix. scan_identifier consumes nothing when
        // the next token is '(', so the failed lookahead needs no
        // restoration; any other identifier here is consumed and treated
        // as no suffix.
        self.dim = match self.scan_identifier().ok().as_deref() {
            Some("Z") => Dimension::XYZ,
            Some("M") => Dimension::XYM,
            Some("ZM") => Dimension::XYZM,
            _ => Dimension::XY,
        };
        match keyword.as_str() {
            "POINT" => {
                let coords = self.scan_coords(false)?;
                if coords.len() != 1 {
                    return Err(WktError::InvalidPointCount(coords.len()));
                }
                Ok(Geometry::Point(Point {
                    coord: coords[0],
                    dim: self.dim,
                }))
            }
            "MULTIPOINT" => Ok(Geometry::MultiPoint(MultiPoint {
                coords: self.scan_coords(true)?,
                dim: self.dim,
            })),
            "LINESTRING" => Ok(Geometry::LineString(LineString {
                coords: self.scan_coords(false)?,
                dim: self.dim,
            })),
            "POLYGON" => Ok(Geometry::Polygon(Polygon {
                rings: self.scan_rings()?,
                dim: self.dim,
            })),
            "MULTIPOLYGON" => Ok(Geometry::MultiPolygon(MultiPolygon {
                polygons: self.scan_multi_polygon()?,
                dim: self.dim,
            })),
            _ => Err(WktError::UnknownGeometryType(keyword)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn peek_does_not_advance() {
        let scanner = Scanner::new(b"ab");
        assert_eq!(scanner.peek().unwrap(), b'a');
        assert_eq!(scanner.peek().unwrap(), b'a');
    }

    #[test]
    fn peek_at_end() {
        let scanner = Scanner::new(b"");
        assert_eq!(scanner.peek(), Err(WktError::UnexpectedEof));
    }

    #[test]
    fn skip_whitespace_runs() {
        let mut scanner = Scanner::new(b" \t\r\n x");
        scanner.skip_whitespace();
        assert_eq!(scanner.peek().unwrap(), b'x');

        // no-op at end of input
        let mut scanner = Scanner::new(b"   ");
        scanner.skip_whitespace();
        assert_eq!(scanner.peek(), Err(WktError::UnexpectedEof));
    }

    #[test]
    fn expect_open_consumes() {
        let mut scanner = Scanner::new(b"  (x");
        scanner.expect_open().unwrap();
        assert_eq!(scanner.peek().unwrap(), b'x');
    }

    #[test]
    fn expect_open_names_the_byte() {
        let mut scanner = Scanner::new(b"#");
        assert_eq!(
            scanner.expect_open(),
            Err(WktError::UnexpectedByte {
                expected: "'('",
                found: '#'
            })
        );
        // failure consumes nothing
        assert_eq!(scanner.peek().unwrap(), b'#');
    }

    #[test]
    fn expect_comma_or_close() {
        let mut scanner = Scanner::new(b", ) x");
        assert!(scanner.expect_comma_or_close().unwrap());
        assert!(!scanner.expect_comma_or_close().unwrap());
        assert_eq!(
            scanner.expect_comma_or_close(),
            Err(WktError::UnexpectedByte {
                expected: "',' or ')'",
                found: 'x'
            })
        );
    }

    #[test]
    fn identifier_case_folds() {
        let mut scanner = Scanner::new(b"  multiPolygon(");
        assert_eq!(scanner.scan_identifier().unwrap(), "MULTIPOLYGON");
        // terminator not consumed
        assert_eq!(scanner.peek().unwrap(), b'(');
    }

    #[test]
    fn identifier_requires_a_letter() {
        let mut scanner = Scanner::new(b"(1 2)");
        assert_eq!(
            scanner.scan_identifier(),
            Err(WktError::UnexpectedByte {
                expected: "an identifier",
                found: '('
            })
        );
        assert_eq!(scanner.peek().unwrap(), b'(');

        let mut scanner = Scanner::new(b"   ");
        assert_eq!(scanner.scan_identifier(), Err(WktError::UnexpectedEof));
    }

    #[test]
    fn numbers() {
        let mut scanner = Scanner::new(b"-7.927002 71.15 1e3 2.5E-2 +4 .5)");
        assert_eq!(scanner.scan_number().unwrap(), -7.927002);
        assert_eq!(scanner.scan_number().unwrap(), 71.15);
        assert_eq!(scanner.scan_number().unwrap(), 1000.0);
        assert_eq!(scanner.scan_number().unwrap(), 0.025);
        assert_eq!(scanner.scan_number().unwrap(), 4.0);
        assert_eq!(scanner.scan_number().unwrap(), 0.5);
    }

    #[test]
    fn malformed_numbers() {
        let mut scanner = Scanner::new(b"#");
        assert_eq!(
            scanner.scan_number(),
            Err(WktError::MalformedNumber("#".to_string()))
        );

        let mut scanner = Scanner::new(b"1.2.3 ");
        assert_eq!(
            scanner.scan_number(),
            Err(WktError::MalformedNumber("1.2.3".to_string()))
        );

        let mut scanner = Scanner::new(b"");
        assert_eq!(scanner.scan_number(), Err(WktError::UnexpectedEof));
    }

    #[test]
    fn coord_xy() {
        let mut scanner = Scanner::new(b"30 10, ");
        let (coord, comma) = scanner.scan_coord().unwrap();
        assert_eq!(coord, Coord::new(30., 10.));
        assert!(comma);

        let mut scanner = Scanner::new(b"30 10)");
        let (coord, comma) = scanner.scan_coord().unwrap();
        assert_eq!(coord, Coord::new(30., 10.));
        assert!(!comma);
    }

    #[test]
    fn coord_third_component_follows_dimension() {
        // XYZ: third literal fills z
        let mut scanner = Scanner::new(b"1 2 3)");
        scanner.dim = Dimension::XYZ;
        let (coord, _) = scanner.scan_coord().unwrap();
        assert_eq!(
            coord,
            Coord {
                x: 1.,
                y: 2.,
                z: 3.,
                m: 0.
            }
        );

        // XYM: third literal fills m, not z
        let mut scanner = Scanner::new(b"1 2 4)");
        scanner.dim = Dimension::XYM;
        let (coord, _) = scanner.scan_coord().unwrap();
        assert_eq!(
            coord,
            Coord {
                x: 1.,
                y: 2.,
                z: 0.,
                m: 4.
            }
        );

        // XYZM: third fills z, fourth fills m
        let mut scanner = Scanner::new(b"1 2 3 4)");
        scanner.dim = Dimension::XYZM;
        let (coord, _) = scanner.scan_coord().unwrap();
        assert_eq!(
            coord,
            Coord {
                x: 1.,
                y: 2.,
                z: 3.,
                m: 4.
            }
        );
    }

    #[test]
    fn coord_excess_components_are_dropped() {
        let mut scanner = Scanner::new(b"1 2 3 4)");
        let (coord, _) = scanner.scan_coord().unwrap();
        assert_eq!(coord, Coord::new(1., 2.));
    }

    #[test]
    fn coords_flat_and_nested() {
        let mut scanner = Scanner::new(b"(30 10, 10 30)");
        let coords = scanner.scan_coords(false).unwrap();
        assert_eq!(coords, vec![Coord::new(30., 10.), Coord::new(10., 30.)]);

        let mut scanner = Scanner::new(b"((30 10), (10 30))");
        let coords = scanner.scan_coords(true).unwrap();
        assert_eq!(coords, vec![Coord::new(30., 10.), Coord::new(10., 30.)]);
    }

    #[test]
    fn nested_lookahead_restores_cursor() {
        // flat list behind a nested_per_point=true call
        let mut scanner = Scanner::new(b"( 30 10, 10 30)");
        let coords = scanner.scan_coords(true).unwrap();
        assert_eq!(coords, vec![Coord::new(30., 10.), Coord::new(10., 30.)]);
    }

    #[test]
    fn nested_rejects_flat_elements() {
        let mut scanner = Scanner::new(b"((30 10), 10 30)");
        assert_eq!(
            scanner.scan_coords(true),
            Err(WktError::UnexpectedByte {
                expected: "'('",
                found: '1'
            })
        );
    }

    #[test]
    fn nested_singleton_must_close() {
        let mut scanner = Scanner::new(b"((30 10, 10 30))");
        assert_eq!(
            scanner.scan_coords(true),
            Err(WktError::UnexpectedByte {
                expected: "')'",
                found: ','
            })
        );
    }

    #[test]
    fn rings_validate_length_and_closure() {
        let mut scanner = Scanner::new(b"((30 10, 10 20, 20 40))");
        assert_eq!(scanner.scan_rings(), Err(WktError::RingTooShort(3)));

        let mut scanner = Scanner::new(b"((30 10, 10 20, 20 40, 30 11))");
        assert_eq!(scanner.scan_rings(), Err(WktError::RingNotClosed));

        let mut scanner = Scanner::new(b"((30 10, 10 20, 20 40, 40 40, 30 10))");
        let rings = scanner.scan_rings().unwrap();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 5);
        assert_eq!(rings[0][0], rings[0][4]);
    }
}
