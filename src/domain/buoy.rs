// Buoy domain model
use serde::{Deserialize, Serialize};

/// A buoy as listed for the map layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buoy {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Site tag naming the dashboard deployment this buoy belongs to.
    #[serde(default)]
    pub site: String,
}

impl Buoy {
    pub fn matches_site(&self, site: &str) -> bool {
        self.site.eq_ignore_ascii_case(site)
    }
}

/// Operator logo shown next to a buoy's detail panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuoyLogo {
    pub path: String,
    pub buoy_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_site_ignores_case() {
        let buoy = Buoy {
            id: 8,
            name: "Offshore 8".to_string(),
            lat: 35.2,
            lon: 139.6,
            site: "Domestic".to_string(),
        };
        assert!(buoy.matches_site("domestic"));
        assert!(buoy.matches_site("DOMESTIC"));
        assert!(!buoy.matches_site("global"));
    }
}
