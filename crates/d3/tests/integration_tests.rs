//! Integration tests for u-stacking-d3.

use rand::prelude::*;
use u_stacking_d3::{
    find_position, BoxSpec, Config, OrderingPolicy, Origin, PlacementOutcome, RejectReason,
    RobotPlacer, Room, Solver, StabilityAnalyzer,
};

fn random_boxes(rng: &mut StdRng, count: usize) -> Vec<BoxSpec> {
    (0..count)
        .map(|i| {
            let w = rng.gen_range(1..=3);
            let d = rng.gen_range(1..=3);
            let h = rng.gen_range(1..=3);
            let weight = (rng.gen_range(1.0..15.0_f64) * 10.0).round() / 10.0;
            BoxSpec::new(format!("box_{}x{}x{}_{}", w, d, h, i + 1), w, d, h)
                .with_weight(weight)
                .with_accessible(rng.gen_bool(0.5))
        })
        .collect()
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_scenario_a_first_box_at_far_wall() {
        let mut placer = RobotPlacer::default_config(Room::cube(10)).unwrap();
        let outcome = placer.simulate_placement(&BoxSpec::cube("A", 3)).unwrap();
        assert_eq!(outcome, PlacementOutcome::Placed(Origin::new(7, 0, 0)));
    }

    #[test]
    fn test_scenario_b_second_box_does_not_overlap() {
        let mut placer = RobotPlacer::default_config(Room::cube(10)).unwrap();
        placer.simulate_placement(&BoxSpec::cube("A", 3)).unwrap();
        let outcome = placer.simulate_placement(&BoxSpec::cube("B", 3)).unwrap();

        // The scan reaches z=3 on top of A before it moves along y or x.
        assert_eq!(outcome, PlacementOutcome::Placed(Origin::new(7, 0, 3)));

        let report = StabilityAnalyzer::default().analyze(placer.room(), placer.placed());
        assert!(report.is_valid(), "{:?}", report.violations);
        assert_eq!(report.results[1].supported_by, vec!["A".to_string()]);
    }

    #[test]
    fn test_scenario_c_too_heavy() {
        let mut placer = RobotPlacer::default_config(Room::cube(2)).unwrap();
        let outcome = placer
            .simulate_placement(&BoxSpec::cube("heavy", 1).with_weight(11.0))
            .unwrap();

        assert_eq!(outcome, PlacementOutcome::Rejected(RejectReason::TooHeavy));
        assert!(placer.grid().is_empty());
        assert_eq!(placer.grid().occupied_cells(), 0);
        assert!(placer.reporter().ledger().is_empty());
    }

    #[test]
    fn test_scenario_d_full_room() {
        let mut placer = RobotPlacer::default_config(Room::cube(1)).unwrap();
        assert!(placer
            .simulate_placement(&BoxSpec::cube("first", 1))
            .unwrap()
            .is_placed());

        let outcome = placer
            .simulate_placement(&BoxSpec::cube("second", 1))
            .unwrap();
        assert_eq!(
            outcome,
            PlacementOutcome::Rejected(RejectReason::NoValidPosition)
        );
        assert_eq!(placer.placed().len(), 1);
    }

    #[test]
    fn test_scenario_e_stack_on_slab() {
        let mut placer = RobotPlacer::default_config(Room::cube(2)).unwrap();
        let slab = placer
            .simulate_placement(&BoxSpec::new("slab", 2, 2, 1))
            .unwrap();
        assert_eq!(slab, PlacementOutcome::Placed(Origin::new(0, 0, 0)));

        let cube = placer.simulate_placement(&BoxSpec::cube("cube", 1)).unwrap();
        assert_eq!(cube, PlacementOutcome::Placed(Origin::new(1, 0, 1)));
        assert_eq!(
            placer.grid().cell(1, 0, 0).unwrap().map(String::as_str),
            Some("slab")
        );
    }
}

mod property_tests {
    use super::*;

    const ROOMS: [Room; 4] = [
        Room::new(10, 10, 10),
        Room::new(5, 5, 5),
        Room::new(7, 3, 4),
        Room::new(2, 6, 3),
    ];

    #[test]
    fn test_random_sessions_keep_invariants() {
        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let room = ROOMS[seed as usize % ROOMS.len()];
            let boxes = random_boxes(&mut rng, 40);

            let mut placer = RobotPlacer::default_config(room).unwrap();
            let result = placer.run(&boxes).unwrap();

            let report = StabilityAnalyzer::default().analyze(&room, placer.placed());
            assert!(
                report.is_valid(),
                "seed {} broke invariants: {:?}",
                seed,
                report.violations
            );
            assert_eq!(result.outcomes.len(), boxes.len());
            assert_eq!(
                result.placed_count() + result.rejected_count(),
                boxes.len()
            );
        }
    }

    #[test]
    fn test_grid_matches_ledger() {
        let mut rng = StdRng::seed_from_u64(7);
        let room = Room::new(6, 5, 4);
        let boxes = random_boxes(&mut rng, 30);

        let mut placer = RobotPlacer::default_config(room).unwrap();
        placer.run(&boxes).unwrap();

        let mut expected_cells = 0;
        for x in 0..room.width {
            for y in 0..room.depth {
                for z in 0..room.height {
                    let owner = placer
                        .placed()
                        .iter()
                        .find(|p| p.footprint().contains_cell(x, y, z))
                        .map(|p| p.id());
                    if owner.is_some() {
                        expected_cells += 1;
                    }
                    assert_eq!(placer.grid().cell(x, y, z).unwrap(), owner);
                }
            }
        }
        assert_eq!(placer.grid().occupied_cells(), expected_cells);
    }

    #[test]
    fn test_weight_gate_ignores_grid_state() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut placer = RobotPlacer::default_config(Room::cube(6)).unwrap();

        for (i, item) in random_boxes(&mut rng, 25).into_iter().enumerate() {
            let before = placer.grid().occupied_cells();
            let heavy = BoxSpec::cube(format!("heavy_{}", i), 1).with_weight(10.5);
            assert_eq!(
                placer.simulate_placement(&heavy).unwrap(),
                PlacementOutcome::Rejected(RejectReason::TooHeavy)
            );
            assert_eq!(placer.grid().occupied_cells(), before);

            placer.simulate_placement(&item).unwrap();
        }
    }

    #[test]
    fn test_sessions_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(3);
        let boxes = random_boxes(&mut rng, 50);

        let run = |boxes: &[BoxSpec]| {
            let mut placer = RobotPlacer::default_config(Room::cube(8)).unwrap();
            placer.run(boxes).unwrap();
            placer.reporter().ledger()
        };

        assert_eq!(run(&boxes), run(&boxes));
    }

    #[test]
    fn test_search_does_not_mutate() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut placer = RobotPlacer::default_config(Room::cube(5)).unwrap();
        placer.run(&random_boxes(&mut rng, 15)).unwrap();

        let probe = BoxSpec::new("probe", 2, 1, 1);
        let first = find_position(placer.grid(), &probe);
        let occupied = placer.grid().occupied_cells();
        assert_eq!(find_position(placer.grid(), &probe), first);
        assert_eq!(placer.grid().occupied_cells(), occupied);
    }

    #[test]
    fn test_any_order_is_accepted() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut boxes = random_boxes(&mut rng, 30);
        boxes.shuffle(&mut rng);

        let config = Config::new().with_ordering(OrderingPolicy::AsGiven);
        let mut placer = RobotPlacer::new(Room::cube(6), config).unwrap();
        let result = placer.run(&boxes).unwrap();

        let processed: Vec<&str> = result.outcomes.iter().map(|(id, _)| id.as_str()).collect();
        let given: Vec<&str> = boxes.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(processed, given);

        let report = StabilityAnalyzer::default().analyze(placer.room(), placer.placed());
        assert!(report.is_valid());
    }
}

mod session_tests {
    use super::*;

    #[test]
    fn test_sessions_accumulate_in_one_room() {
        let mut placer = RobotPlacer::default_config(Room::new(2, 1, 1)).unwrap();

        let first = placer.run(&[BoxSpec::cube("a", 1)]).unwrap();
        assert_eq!(first.placed_count(), 1);

        let second = placer
            .run(&[BoxSpec::cube("b", 1), BoxSpec::cube("c", 1)])
            .unwrap();
        assert_eq!(second.placed_count(), 1);
        assert_eq!(second.placements[0].id(), "b");
        assert_eq!(second.rejected_count(), 1);
        assert_eq!(placer.reporter().len(), 2);
    }

    #[test]
    fn test_reused_id_across_sessions_is_rejected() {
        let mut placer = RobotPlacer::default_config(Room::cube(3)).unwrap();
        placer.run(&[BoxSpec::cube("a", 1)]).unwrap();
        assert!(placer.run(&[BoxSpec::cube("a", 1)]).is_err());
        assert_eq!(placer.reporter().len(), 1);
    }

    #[test]
    fn test_utilization_matches_reporter() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut placer = RobotPlacer::default_config(Room::cube(5)).unwrap();
        let result = placer.run(&random_boxes(&mut rng, 20)).unwrap();

        assert!((result.utilization - placer.reporter().utilization()).abs() < 1e-9);
        assert!(result.utilization > 0.0 && result.utilization <= 1.0);
    }
}
