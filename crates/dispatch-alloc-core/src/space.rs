// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Space Primitives
//!
//! Jobs happen at a [`Location`] on a flat map measured in meters. Moving
//! between two locations takes `distance / speed` minutes at the single,
//! instance-wide [`TravelSpeed`].

use crate::time::TimeDelta;
use serde::Serialize;
use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

/// A point on the map, in meters.
///
/// Equality and hashing use the exact coordinate pair; `-0.0` and `0.0`
/// are treated as the same coordinate.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Location {
    x: f64,
    y: f64,
}

impl Location {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance in meters.
    #[inline]
    pub fn distance(&self, other: &Location) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[inline]
    fn key(&self) -> (u64, u64) {
        // 0.0 == -0.0 must hash identically.
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidTravelSpeedError {
    meters_per_minute: f64,
}

impl InvalidTravelSpeedError {
    #[inline]
    pub fn new(meters_per_minute: f64) -> Self {
        Self { meters_per_minute }
    }

    #[inline]
    pub fn meters_per_minute(&self) -> f64 {
        self.meters_per_minute
    }
}

impl Display for InvalidTravelSpeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Travel speed must be positive and finite, got {} m/min",
            self.meters_per_minute
        )
    }
}

impl std::error::Error for InvalidTravelSpeedError {}

/// Operator travel speed in meters per minute.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct TravelSpeed(f64);

impl TravelSpeed {
    pub fn new(meters_per_minute: f64) -> Result<Self, InvalidTravelSpeedError> {
        if meters_per_minute.is_finite() && meters_per_minute > 0.0 {
            Ok(Self(meters_per_minute))
        } else {
            Err(InvalidTravelSpeedError::new(meters_per_minute))
        }
    }

    #[inline]
    pub const fn meters_per_minute(&self) -> f64 {
        self.0
    }

    /// Time needed to cover `meters`, rounded to the nearest millisecond.
    #[inline]
    pub fn travel_time(&self, meters: f64) -> TimeDelta<i64> {
        TimeDelta::from_minutes_f64(meters / self.0)
    }

    #[inline]
    pub fn travel_time_between(&self, from: &Location, to: &Location) -> TimeDelta<i64> {
        self.travel_time(from.distance(to))
    }
}

impl Display for TravelSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m/min", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_distance_is_euclidean() {
        let a = Location::new(0.0, 0.0);
        let b = Location::new(300.0, 400.0);
        assert_eq!(a.distance(&b), 500.0);
        assert_eq!(b.distance(&a), 500.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_location_equality_and_hash() {
        let mut set = HashSet::new();
        set.insert(Location::new(0.0, 1000.0));
        set.insert(Location::new(-0.0, 1000.0));
        set.insert(Location::new(1000.0, 0.0));
        assert_eq!(set.len(), 2);
        assert_eq!(Location::new(0.0, 0.0), Location::new(-0.0, 0.0));
    }

    #[test]
    fn test_location_display() {
        assert_eq!(format!("{}", Location::new(1.5, 2.0)), "(1.5, 2)");
    }

    #[test]
    fn test_travel_speed_rejects_invalid() {
        assert!(TravelSpeed::new(0.0).is_err());
        assert!(TravelSpeed::new(-1.0).is_err());
        assert!(TravelSpeed::new(f64::NAN).is_err());
        assert!(TravelSpeed::new(f64::INFINITY).is_err());
        assert!(TravelSpeed::new(250.0).is_ok());
    }

    #[test]
    fn test_travel_time() {
        let speed = TravelSpeed::new(250.0).unwrap();
        assert_eq!(speed.travel_time(1000.0), TimeDelta::from_minutes(4));
        let a = Location::new(0.0, 0.0);
        let b = Location::new(1000.0, 1000.0);
        assert_eq!(speed.travel_time_between(&a, &b).value(), 339_411);
    }
}
