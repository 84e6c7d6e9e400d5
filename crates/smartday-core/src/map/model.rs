//! Map data types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Default map center used at construction (Seoul City Hall).
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: 37.566826,
    lng: 126.9786567,
};

/// Default zoom level used at construction.
pub const DEFAULT_ZOOM: u8 = 7;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Backend point-of-interest datasets, one per map filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum MapDataset {
    #[strum(serialize = "Parks")]
    Parks,
    #[strum(serialize = "Restaurants")]
    Restaurants,
}

impl MapDataset {
    /// URL path segment under `/map/`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Parks => "parks",
            Self::Restaurants => "restaurants",
        }
    }

    /// The dataset loaded right after map construction.
    pub fn default_dataset() -> Self {
        Self::Parks
    }
}

/// A point of interest as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
}

impl PointOfInterest {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lng: self.lng,
        }
    }

    /// Phone line for the info window, with a placeholder for missing data.
    pub fn phone_display(&self) -> &str {
        self.tel.as_deref().unwrap_or("not available")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_path_segments() {
        assert_eq!(MapDataset::Parks.path_segment(), "parks");
        assert_eq!(MapDataset::Restaurants.path_segment(), "restaurants");
        assert_eq!(MapDataset::default_dataset(), MapDataset::Parks);
    }

    #[test]
    fn point_parses_without_tel() {
        let point: PointOfInterest =
            serde_json::from_str(r#"{"name":"Han River Park","lat":37.5,"lng":127.0}"#).unwrap();
        assert_eq!(point.tel, None);
        assert_eq!(point.phone_display(), "not available");
    }

    #[test]
    fn point_parses_with_tel() {
        let point: PointOfInterest = serde_json::from_str(
            r#"{"name":"Somewhere","lat":37.5,"lng":127.0,"tel":"02-120"}"#,
        )
        .unwrap();
        assert_eq!(point.phone_display(), "02-120");
    }
}
