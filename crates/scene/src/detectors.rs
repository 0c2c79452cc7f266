use serde::Serialize;

/// A roadside traffic detector shown on the map overlay.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Detector {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

/// Placeholder detector set until the route service publishes real sites.
pub const DEMO_DETECTORS: [Detector; 8] = [
    Detector { id: "D001", name: "Xinyi Detector", lat: 25.0330, lng: 121.5654 },
    Detector { id: "D002", name: "Taipei Main Station Detector", lat: 25.0478, lng: 121.5170 },
    Detector { id: "D003", name: "Taipei 101 Detector", lat: 25.0375, lng: 121.5637 },
    Detector { id: "D004", name: "Zhongshan Detector", lat: 25.0520, lng: 121.5435 },
    Detector { id: "D005", name: "Daan Detector", lat: 25.0419, lng: 121.5358 },
    Detector { id: "D006", name: "Shilin Detector", lat: 25.0620, lng: 121.5250 },
    Detector { id: "D007", name: "Wanhua Detector", lat: 25.0282, lng: 121.5142 },
    Detector { id: "D008", name: "Songshan Detector", lat: 25.0510, lng: 121.5567 },
];

#[cfg(test)]
mod tests {
    use super::DEMO_DETECTORS;

    #[test]
    fn detector_ids_are_unique() {
        let mut ids: Vec<_> = DEMO_DETECTORS.iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), DEMO_DETECTORS.len());
    }
}
