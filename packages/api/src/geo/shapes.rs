use super::LatLng;

pub const CIRCLE_POINTS: usize = 64;
const EARTH_RADIUS_KM: f64 = 6371.0;
const KM_PER_MILE: f64 = 1.60934;

/// Closed ring approximating a circle of `radius_miles` around `center`.
///
/// Offsets are applied in degrees without latitude correction, matching how
/// the destination radius is drawn everywhere else in the product. The last
/// point repeats the first.
pub fn circle_polygon(center: LatLng, radius_miles: f64) -> Vec<LatLng> {
    let radius_km = radius_miles * KM_PER_MILE;
    let angular = radius_km / EARTH_RADIUS_KM;
    let mut ring: Vec<LatLng> = (0..CIRCLE_POINTS)
        .map(|i| {
            let angle = (i as f64 / CIRCLE_POINTS as f64) * std::f64::consts::TAU;
            let dx = angular * angle.cos();
            let dy = angular * angle.sin();
            LatLng::new(center.lat + dy.to_degrees(), center.lng + dx.to_degrees())
        })
        .collect();
    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }
    ring
}

/// Encoded polyline (precision 5) for static map path overlays.
pub fn encode_polyline(points: &[LatLng]) -> String {
    let mut out = String::new();
    let (mut prev_lat, mut prev_lng) = (0i64, 0i64);
    for point in points {
        let lat = (point.lat * 1e5).round() as i64;
        let lng = (point.lng * 1e5).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }
    out
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };
    while v >= 0x20 {
        out.push((((0x20 | (v & 0x1f)) + 63) as u8) as char);
        v >>= 5;
    }
    out.push(((v + 63) as u8) as char);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_is_closed_and_sized() {
        let center = LatLng::new(29.6436, -82.3549);
        let ring = circle_polygon(center, 5.0);
        assert_eq!(ring.len(), CIRCLE_POINTS + 1);
        assert_eq!(ring.first(), ring.last());

        // First point sits due east at radius/R radians.
        let expected = (5.0 * 1.60934 / 6371.0_f64).to_degrees();
        assert!((ring[0].lng - center.lng - expected).abs() < 1e-12);
        assert!((ring[0].lat - center.lat).abs() < 1e-12);
        // Quarter turn is due north.
        assert!((ring[16].lat - center.lat - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_radius_collapses() {
        let center = LatLng::new(1.0, 2.0);
        assert!(circle_polygon(center, 0.0).iter().all(|p| *p == center));
    }

    #[test]
    fn test_polyline_reference_vector() {
        let points = [
            LatLng::new(38.5, -120.2),
            LatLng::new(40.7, -120.95),
            LatLng::new(43.252, -126.453),
        ];
        assert_eq!(encode_polyline(&points), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
        assert_eq!(encode_polyline(&[]), "");
    }
}
