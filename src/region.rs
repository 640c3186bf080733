use std::{borrow::Borrow, fmt, sync::Arc};

use ahash::AHashMap;
use geo::Coord;
use serde::{Serialize, Serializer};

/// Stable key for an energy region, e.g. "ET3002".
/// Cheap to clone; rows of the same region share the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionCode(Arc<str>);

impl RegionCode {
    pub fn new(code: &str) -> Self { Self(Arc::from(code)) }

    #[inline] pub fn as_str(&self) -> &str { &self.0 }
}

impl Borrow<str> for RegionCode {
    fn borrow(&self) -> &str { &self.0 }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl Serialize for RegionCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A region code that has no entry in the coordinate table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[region] no map coordinates for region '{0}'")]
pub struct UnknownRegion(pub RegionCode);

/// Pixel position of every region on the background map.
/// Origin is the bottom-left corner of the image, y grows upwards.
const REGION_COORDINATES: [(&str, f64, f64); 40] = [
    ("ET3002", 560.0,  48.0),
    ("ET3001", 600.0,  68.0),
    ("ET3003", 570.0,  98.0),
    ("ET2901", 600.0, 200.0),
    ("ET2601", 500.0, 250.0),
    ("ET2701", 500.0, 340.0),
    ("ET2501", 405.0, 300.0),
    ("ET2801", 300.0, 300.0),
    ("ET2401", 125.0, 275.0),
    ("ET1901", 200.0, 365.0),
    ("ET2001", 265.0, 380.0),
    ("ET1801", 320.0, 390.0),
    ("ET1701", 355.0, 420.0),
    ("ET2301", 240.0, 440.0),
    ("ET2201", 325.0, 450.0),
    ("ET1101", 450.0, 405.0),
    ("ET1401", 400.0, 465.0),
    ("ET0902", 513.0, 458.0),
    ("ET0801", 580.0, 420.0),
    ("ET0701", 700.0, 450.0),
    ("ET1201", 610.0, 525.0),
    ("ET0901", 540.0, 490.0),
    ("ET1001", 530.0, 550.0),
    ("ET1301", 470.0, 510.0),
    ("ET1604", 420.0, 540.0),
    ("ET1601", 360.0, 590.0),
    ("ET1606", 355.0, 560.0),
    ("ET1605", 325.0, 570.0),
    ("ET2101", 300.0, 515.0),
    ("ET1602", 300.0, 600.0),
    ("ET1603", 370.0, 630.0),
    ("ET0601", 490.0, 600.0),
    ("ET0501", 670.0, 650.0),
    ("ET0401", 760.0, 575.0),
    ("ET1503", 400.0, 705.0),
    ("ET1502", 330.0, 675.0),
    ("ET1501", 360.0, 750.0),
    ("ET0301", 740.0, 770.0),
    ("ET0201", 575.0, 840.0),
    ("ET0101", 760.0, 910.0),
];

/// Read-only lookup from region code to map position.
#[derive(Debug, Clone)]
pub struct CoordinateTable {
    positions: AHashMap<RegionCode, Coord<f64>>,
}

impl Default for CoordinateTable {
    fn default() -> Self {
        Self {
            positions: REGION_COORDINATES.iter()
                .map(|&(code, x, y)| (RegionCode::new(code), Coord { x, y }))
                .collect(),
        }
    }
}

impl CoordinateTable {
    /// A table holding only the given regions.
    #[cfg(test)]
    pub(crate) fn with_regions(entries: &[(&str, f64, f64)]) -> Self {
        Self {
            positions: entries.iter()
                .map(|&(code, x, y)| (RegionCode::new(code), Coord { x, y }))
                .collect(),
        }
    }

    /// Number of known regions.
    #[inline] pub fn len(&self) -> usize { self.positions.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.positions.is_empty() }

    #[inline] pub fn contains(&self, code: &str) -> bool { self.positions.contains_key(code) }

    /// Position of a region. Unknown codes are an error, never a default.
    pub fn position(&self, code: &RegionCode) -> Result<Coord<f64>, UnknownRegion> {
        self.positions.get(code.as_str())
            .copied()
            .ok_or_else(|| UnknownRegion(code.clone()))
    }

    /// Look up a raw code, returning the shared `RegionCode` key on success.
    pub fn resolve(&self, code: &str) -> Result<RegionCode, UnknownRegion> {
        self.positions.get_key_value(code)
            .map(|(key, _)| key.clone())
            .ok_or_else(|| UnknownRegion(RegionCode::new(code)))
    }

    /// All regions with their positions, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&RegionCode, &Coord<f64>)> + '_ {
        self.positions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_forty_distinct_regions() {
        let table = CoordinateTable::default();
        assert_eq!(table.len(), 40);
        assert_eq!(table.len(), REGION_COORDINATES.len());
    }

    #[test]
    fn known_region_positions() {
        let table = CoordinateTable::default();
        assert_eq!(table.position(&RegionCode::new("ET3002")).unwrap(), Coord { x: 560.0, y: 48.0 });
        assert_eq!(table.position(&RegionCode::new("ET0101")).unwrap(), Coord { x: 760.0, y: 910.0 });
        assert_eq!(table.position(&RegionCode::new("ET0902")).unwrap(), Coord { x: 513.0, y: 458.0 });
    }

    #[test]
    fn unknown_region_is_an_error() {
        let table = CoordinateTable::default();
        let err = table.position(&RegionCode::new("ET9999")).unwrap_err();
        assert_eq!(err, UnknownRegion(RegionCode::new("ET9999")));
        assert!(err.to_string().contains("ET9999"));
        assert!(table.resolve("et3002").is_err());
    }

    #[test]
    fn resolve_shares_the_table_key() {
        let table = CoordinateTable::default();
        let code = table.resolve("ET1604").unwrap();
        assert_eq!(code.as_str(), "ET1604");
        assert!(table.contains("ET1604"));
    }

    #[test]
    fn positions_lie_on_the_canvas() {
        let table = CoordinateTable::default();
        for (code, pos) in table.iter() {
            assert!((0.0..=898.0).contains(&pos.x), "{code} x out of range");
            assert!((0.0..=1032.0).contains(&pos.y), "{code} y out of range");
        }
    }
}
