//! Axis-order helpers.
//!
//! GeoJSON geometry arrives as `[lng, lat]`; the 2D renderer consumes
//! `[lat, lng]`. Conversions are explicit so the swap happens in one place.

/// Swap one `[lng, lat]` pair to `[lat, lng]`.
#[inline]
pub fn lng_lat_to_lat_lng(p: [f64; 2]) -> [f64; 2] {
    [p[1], p[0]]
}

/// Swap every pair of a GeoJSON coordinate sequence, preserving order.
pub fn swap_axes(coords: &[[f64; 2]]) -> Vec<[f64; 2]> {
    coords.iter().copied().map(lng_lat_to_lat_lng).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_every_pair_in_order() {
        let input = [[121.50, 25.03], [121.52, 25.04]];
        assert_eq!(swap_axes(&input), vec![[25.03, 121.50], [25.04, 121.52]]);
    }

    #[test]
    fn empty_sequence_stays_empty() {
        assert!(swap_axes(&[]).is_empty());
    }
}
