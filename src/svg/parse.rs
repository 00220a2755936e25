//! SVG path-data parser driving the construction API.

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{MathAnimError, MathAnimResult};
use crate::svg::object::SvgObject;

struct Scanner<'a> {
    input: &'a str,
    bytes: &'a [u8],
    i: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            i: 0,
        }
    }

    fn skip_separators(&mut self) {
        while self.i < self.bytes.len() {
            let c = self.bytes[self.i];
            if c.is_ascii_whitespace() || c == b',' {
                self.i += 1;
            } else {
                break;
            }
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_separators();
        self.i >= self.bytes.len()
    }

    fn at_number(&mut self) -> bool {
        self.skip_separators();
        match self.bytes.get(self.i) {
            Some(c) => c.is_ascii_digit() || matches!(c, b'-' | b'+' | b'.'),
            None => false,
        }
    }

    fn command(&mut self) -> MathAnimResult<(usize, u8)> {
        self.skip_separators();
        let start = self.i;
        let c = self.bytes[self.i];
        if !c.is_ascii_alphabetic() {
            return Err(MathAnimError::parse(
                start,
                format!("expected path command, found '{}'", c as char),
            ));
        }
        self.i += 1;
        Ok((start, c))
    }

    // [+-]?([0-9]+(.[0-9]*)?|.[0-9]+)([eE][+-]?[0-9]+)?
    fn number(&mut self) -> MathAnimResult<f64> {
        self.skip_separators();
        let start = self.i;
        let b = self.bytes;
        if self.i < b.len() && matches!(b[self.i], b'+' | b'-') {
            self.i += 1;
        }
        let int_start = self.i;
        while self.i < b.len() && b[self.i].is_ascii_digit() {
            self.i += 1;
        }
        let mut digits = self.i - int_start;
        if self.i < b.len() && b[self.i] == b'.' {
            self.i += 1;
            let frac_start = self.i;
            while self.i < b.len() && b[self.i].is_ascii_digit() {
                self.i += 1;
            }
            digits += self.i - frac_start;
        }
        if digits == 0 {
            return Err(MathAnimError::parse(start, "expected number"));
        }
        if self.i < b.len() && matches!(b[self.i], b'e' | b'E') {
            let e_pos = self.i;
            self.i += 1;
            if self.i < b.len() && matches!(b[self.i], b'+' | b'-') {
                self.i += 1;
            }
            let exp_start = self.i;
            while self.i < b.len() && b[self.i].is_ascii_digit() {
                self.i += 1;
            }
            if exp_start == self.i {
                return Err(MathAnimError::parse(
                    e_pos,
                    "invalid number exponent (expected digits)",
                ));
            }
        }
        let s = &self.input[start..self.i];
        let v: f64 = s
            .parse()
            .map_err(|_| MathAnimError::parse(start, format!("invalid number '{s}'")))?;
        if !v.is_finite() {
            return Err(MathAnimError::parse(start, "number is not finite"));
        }
        Ok(v)
    }

    fn point(&mut self) -> MathAnimResult<Point> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Point::new(x, y))
    }

    /// Arc flags are a single `0` or `1` and may run into the next number.
    fn flag(&mut self) -> MathAnimResult<bool> {
        self.skip_separators();
        match self.bytes.get(self.i) {
            Some(b'0') => {
                self.i += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.i += 1;
                Ok(true)
            }
            _ => Err(MathAnimError::parse(self.i, "expected arc flag '0' or '1'")),
        }
    }
}

/// Parse SVG path data into a new finalized object.
pub fn parse_path(d: &str) -> MathAnimResult<SvgObject> {
    let mut obj = SvgObject::create_default();
    parse_path_into(&mut obj, d)?;
    obj.finalize();
    Ok(obj)
}

/// Parse SVG path data, appending contours to `obj`.
///
/// Supports `M L H V C S Q T A Z` in both cases with implicit command repetition. The first
/// command must be a move.
pub fn parse_path_into(obj: &mut SvgObject, d: &str) -> MathAnimResult<()> {
    let mut s = Scanner::new(d);
    let mut first = true;

    while !s.at_end() {
        let (offset, cmd) = s.command()?;
        if first && !matches!(cmd, b'M' | b'm') {
            return Err(MathAnimError::parse(
                offset,
                "path data must start with a move command",
            ));
        }
        first = false;

        let abs = cmd.is_ascii_uppercase();
        match cmd.to_ascii_uppercase() {
            b'M' => {
                let p = s.point()?;
                obj.move_to(p, abs);
                while s.at_number() {
                    let p = s.point()?;
                    obj.line_to(p, abs);
                }
            }
            b'Z' => {
                let has_curves = obj.path_open && obj.paths.last().is_some_and(|p| !p.is_empty());
                if has_curves {
                    let is_hole = obj.paths.len() > 1;
                    obj.close_path(true, is_hole);
                }
            }
            b'L' => loop {
                let p = s.point()?;
                obj.line_to(p, abs);
                if !s.at_number() {
                    break;
                }
            },
            b'H' => loop {
                let x = s.number()?;
                obj.hz_line_to(x, abs);
                if !s.at_number() {
                    break;
                }
            },
            b'V' => loop {
                let y = s.number()?;
                obj.vt_line_to(y, abs);
                if !s.at_number() {
                    break;
                }
            },
            b'C' => loop {
                let p1 = s.point()?;
                let p2 = s.point()?;
                let p3 = s.point()?;
                obj.bezier3_to(p1, p2, p3, abs);
                if !s.at_number() {
                    break;
                }
            },
            b'S' => loop {
                let p2 = s.point()?;
                let p3 = s.point()?;
                obj.smooth_bezier3_to(p2, p3, abs);
                if !s.at_number() {
                    break;
                }
            },
            b'Q' => loop {
                let p1 = s.point()?;
                let p2 = s.point()?;
                obj.bezier2_to(p1, p2, abs);
                if !s.at_number() {
                    break;
                }
            },
            b'T' => loop {
                let p2 = s.point()?;
                obj.smooth_bezier2_to(p2, abs);
                if !s.at_number() {
                    break;
                }
            },
            b'A' => loop {
                let rx = s.number()?;
                let ry = s.number()?;
                let rotation = s.number()?;
                let large_arc = s.flag()?;
                let sweep = s.flag()?;
                let dst = s.point()?;
                obj.arc_to(Vec2::new(rx, ry), rotation, large_arc, sweep, dst, abs);
                if !s.at_number() {
                    break;
                }
            },
            _ => {
                return Err(MathAnimError::parse(
                    offset,
                    format!("unknown path command '{}'", cmd as char),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/svg/parse.rs"]
mod tests;
