//! Atomic positions.

use std::str::FromStr;

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
/// A three-dimensional carthesian coordinate.
///
/// Serialized as a plain `[x, y, z]` array.
///
/// # Examples
/// ```
/// # use molspec::coord::Coord;
/// let coord: Coord = "0.1 1.0 -2.0".parse().unwrap();
/// assert_eq!(Coord::new(0.1, 1.0, -2.0), coord);
/// ```
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coord {
    /// A coordinate at origo.
    pub const ORIGO: Self = Coord { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Coord {
        Coord { x, y, z }
    }

    /// Whether all components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Coord {
    fn from(xyz: [f64; 3]) -> Coord {
        Coord::new(xyz[0], xyz[1], xyz[2])
    }
}

impl From<Coord> for [f64; 3] {
    fn from(coord: Coord) -> [f64; 3] {
        [coord.x, coord.y, coord.z]
    }
}

impl FromStr for Coord {
    type Err = String;

    /// Parse the first three whitespace separated values of a string. Anything
    /// after them is ignored.
    ///
    /// # Errors
    /// Raises an error if three floating point values could not be parsed.
    fn from_str(input: &str) -> Result<Coord, Self::Err> {
        let parse_opt_value = |value: Option<&str>| {
            value.ok_or("not enough values to parse".to_string())
                 .and_then(|v| v.parse::<f64>().map_err(|err| format!("'{}': {}", v, err)))
        };

        let mut split = input.split_whitespace();
        let x = parse_opt_value(split.next())?;
        let y = parse_opt_value(split.next())?;
        let z = parse_opt_value(split.next())?;

        Ok(Coord { x, y, z })
    }
}

// Positions are read from text, so equality allows for rounding.
impl PartialEq for Coord {
    fn eq(&self, other: &Coord) -> bool {
        let atol = 1e-9;
        (self.x - other.x).abs() < atol
            && (self.y - other.y).abs() < atol
            && (self.z - other.z).abs() < atol
    }
}
