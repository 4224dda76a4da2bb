use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use geo::{Point, line_string};
use spotmap_core::{
    algo::{RadiusScale, correlate},
    model::{Direction, RouteGroup, RouteKey, Spot, StopRecord},
    render::SiteMap,
    routing::StraightLine,
};

const ROUTES: usize = 200;
const STOPS_PER_ROUTE: usize = 40;
const SPOTS: usize = 60;

#[allow(clippy::cast_precision_loss)]
fn synthetic_groups() -> Vec<RouteGroup> {
    (0..ROUTES)
        .map(|r| {
            let name = format!("{r}");
            let stops = (0..STOPS_PER_ROUTE)
                .map(|s| StopRecord {
                    route_name: name.clone(),
                    direction: Direction::OUTBOUND,
                    sequence: u32::try_from(s).ok(),
                    stop_name: Some(format!("{name}-{s}")),
                    location: Point::new(
                        120.5 + (r as f64 * 0.0017) % 0.4,
                        24.05 + s as f64 * 0.009,
                    ),
                })
                .collect();
            RouteGroup::new(
                RouteKey {
                    route_name: name,
                    direction: Direction::OUTBOUND,
                },
                stops,
            )
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn synthetic_spots() -> Vec<Spot> {
    (0..SPOTS)
        .map(|i| {
            let mut spot = Spot::new(
                format!("spot {i}"),
                10_000 * (i as u64 + 1),
                Some(Point::new(120.5 + i as f64 * 0.006, 24.1 + i as f64 * 0.005)),
            );
            if i % 10 == 0 {
                let (x, y) = (120.5 + i as f64 * 0.006, 24.1 + i as f64 * 0.005);
                spot.set_line(line_string![
                    (x: x - 0.01, y: y),
                    (x: x, y: y),
                    (x: x + 0.01, y: y)
                ]);
            }
            spot
        })
        .collect()
}

fn bench_correlate(c: &mut Criterion) {
    let groups = synthetic_groups();
    let spots = synthetic_spots();

    c.bench_function("correlate", |b| {
        b.iter(|| correlate(black_box(&spots), black_box(&groups), 0.5));
    });

    c.bench_function("site_map_offline", |b| {
        b.iter(|| {
            let correlations = correlate(&spots, &groups, 0.5);
            SiteMap::build(&correlations, &RadiusScale::from_spots(&spots), &StraightLine)
        });
    });
}

criterion_group!(benches, bench_correlate);
criterion_main!(benches);
