//! Route densification tests

use std::f64::consts::PI;

use green_wave::simulation::{PathInterpolator, Waypoint, EARTH_RADIUS_M};

/// Degrees of latitude covering `meters` along a meridian
fn lat_deg(meters: f64) -> f64 {
    meters / (EARTH_RADIUS_M * PI / 180.0)
}

fn origin() -> Waypoint {
    Waypoint::new(30.7270, 76.7651)
}

fn north_of(point: Waypoint, meters: f64) -> Waypoint {
    Waypoint::new(point.lat + lat_deg(meters), point.lon)
}

fn max_gap(points: &[Waypoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .fold(0.0, f64::max)
}

#[test]
fn test_haversine_distance_along_meridian() {
    let a = origin();
    let b = north_of(a, 130.0);
    assert!((a.distance(&b) - 130.0).abs() < 1e-6);
    assert_eq!(a.distance(&a), 0.0);
}

#[test]
fn test_two_points_130m_apart() {
    let a = origin();
    let b = north_of(a, 130.0);
    let path = PathInterpolator::new(15.0, 50, 300).interpolate(&[a, b]);

    // ceil(130 / 15) = 9 parts
    assert_eq!(path.len(), 10);
    assert_eq!(path.points()[0], a);
    assert_eq!(*path.points().last().unwrap(), b);
    assert!(max_gap(path.points()) <= 15.0 + 1e-6);
}

#[test]
fn test_short_segment_kept_verbatim() {
    let a = origin();
    let b = north_of(a, 10.0);
    let path = PathInterpolator::new(15.0, 50, 300).interpolate(&[a, b]);
    assert_eq!(path.points(), &[a, b]);
}

#[test]
fn test_consecutive_points_within_spacing() {
    let a = origin();
    let b = north_of(a, 340.0);
    let c = Waypoint::new(b.lat, b.lon + 0.003);
    let d = north_of(c, 7.0);
    let raw = [a, b, c, d];

    for spacing in [5.0, 12.5, 15.0, 40.0, 100.0] {
        let path = PathInterpolator::new(spacing, 500, 5000).interpolate(&raw);
        assert_eq!(path.points()[0], a);
        assert_eq!(*path.points().last().unwrap(), d);
        assert!(
            max_gap(path.points()) <= spacing + 1e-3,
            "gap above {} m",
            spacing
        );
    }
}

#[test]
fn test_original_waypoints_preserved_without_duplicates() {
    let a = origin();
    let b = north_of(a, 60.0);
    let c = north_of(b, 60.0);
    let path = PathInterpolator::new(15.0, 50, 300).interpolate(&[a, b, c]);

    assert!(path.points().contains(&b));
    assert_eq!(path.points().iter().filter(|p| **p == b).count(), 1);
    assert!(path.points().windows(2).all(|pair| pair[0] != pair[1]));
}

#[test]
fn test_segment_cap_limits_points() {
    let a = origin();
    let b = north_of(a, 1000.0);
    let path = PathInterpolator::new(10.0, 20, 300).interpolate(&[a, b]);
    assert_eq!(path.len(), 21);
    assert_eq!(*path.points().last().unwrap(), b);
}

#[test]
fn test_total_cap_truncates_on_original_waypoint() {
    let mut raw = vec![origin()];
    for _ in 0..20 {
        let last = *raw.last().unwrap();
        raw.push(north_of(last, 100.0));
    }

    // 9 parts per 100 m segment: 11 segments fit in 100 points, a 12th would overflow
    let path = PathInterpolator::new(12.0, 50, 105).interpolate(&raw);
    assert!(path.len() <= 105);
    assert_eq!(path.len(), 100);
    assert_eq!(*path.points().last().unwrap(), raw[11]);
}

#[test]
fn test_degenerate_inputs() {
    let interpolator = PathInterpolator::new(15.0, 50, 300);
    assert!(interpolator.interpolate(&[]).is_empty());

    let single = interpolator.interpolate(&[origin()]);
    assert_eq!(single.points(), &[origin()]);
}

#[test]
fn test_interpolation_is_deterministic() {
    let raw = [origin(), north_of(origin(), 250.0)];
    let interpolator = PathInterpolator::new(15.0, 50, 300);
    assert_eq!(interpolator.interpolate(&raw), interpolator.interpolate(&raw));
}
