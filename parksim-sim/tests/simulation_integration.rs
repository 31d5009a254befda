//! End-to-end simulation runs through the public API.

use parksim_core::{CarType, LotLayout, ParkingLot, SimulationConfig};
use parksim_sim::{ParkingSimulation, SimulationReport};
use proptest::prelude::*;

fn run(layout: &str, config: SimulationConfig) -> SimulationReport {
    let lot = ParkingLot::new(LotLayout::parse(layout).unwrap());
    ParkingSimulation::new(lot, config).unwrap().run().unwrap()
}

#[test]
fn test_report_serializes_to_json() {
    let config = SimulationConfig {
        hourly_arrival_rate: 30,
        steps: 2 * 3600,
        deterministic_seed: Some(7),
        ..Default::default()
    };
    let report = run("E, S, R, L\n", config);

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["seed"], 7);
    assert_eq!(json["steps"], 7200);
    assert_eq!(json["capacity"], 4);
    assert_eq!(json["incoming_backlog"], report.incoming_backlog);
    assert!(json["metrics"]["events_by_type"].is_object());
}

#[test]
fn test_summary_mentions_backlog() {
    let config = SimulationConfig {
        hourly_arrival_rate: 600,
        steps: 3600,
        deterministic_seed: Some(3),
        ..Default::default()
    };
    let report = run("R, R\n", config);

    assert!(report.incoming_backlog > 0);
    let summary = report.summary();
    assert!(summary.contains("Simulation Report (seed: 3)"));
    assert!(summary.contains(&format!("Incoming queue: {}", report.incoming_backlog)));
}

#[test]
fn test_no_arrivals_keeps_lot_empty() {
    let config = SimulationConfig {
        hourly_arrival_rate: 0,
        steps: 3600,
        deterministic_seed: Some(11),
        ..Default::default()
    };
    let report = run("E, S\nR, L\n", config);

    assert_eq!(report.metrics.events_processed, 0);
    assert_eq!(report.final_occupancy, 0);
    assert_eq!(report.incoming_backlog, 0);
}

#[test]
fn test_stepwise_driving_matches_run() {
    let config = SimulationConfig {
        hourly_arrival_rate: 90,
        steps: 3 * 3600,
        deterministic_seed: Some(2024),
        ..Default::default()
    };
    let layout = "S, R, L\nE, N, R\n";
    let expected = run(layout, config.clone());

    let lot = ParkingLot::new(LotLayout::parse(layout).unwrap());
    let mut sim = ParkingSimulation::new(lot, config).unwrap();
    let mut entered_types = Vec::new();
    while !sim.is_finished() {
        for event in sim.tick().unwrap() {
            if event.as_str() == "Entered" {
                entered_types.push(event.car().car_type());
            }
        }
    }

    assert_eq!(entered_types.len() as u64, expected.metrics.entries);
    assert!(entered_types.iter().all(|&t| t != CarType::Na));
    assert_eq!(sim.report().final_occupancy, expected.final_occupancy);
}

fn layout_strategy() -> impl Strategy<Value = String> {
    let label = prop::sample::select(vec!["N", "E", "S", "R", "L"]);
    prop::collection::vec(prop::collection::vec(label, 4), 1..4).prop_map(|rows| {
        rows.into_iter()
            .map(|row| row.join(", "))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_seeded_runs_keep_books_balanced(
        layout in layout_strategy(),
        seed in any::<u64>(),
        rate in 0u32..400,
    ) {
        let config = SimulationConfig {
            hourly_arrival_rate: rate,
            steps: 2 * 3600,
            max_parking_duration: 3600,
            deterministic_seed: Some(seed),
            ..Default::default()
        };
        let report = run(&layout, config);
        let metrics = &report.metrics;

        prop_assert!(report.success);
        prop_assert_eq!(metrics.entries + report.incoming_backlog as u64, metrics.arrivals);
        prop_assert_eq!(report.final_occupancy as u64 + metrics.departures(), metrics.entries);
        prop_assert!(report.final_occupancy <= report.capacity);
    }
}
