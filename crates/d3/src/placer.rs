//! Robot placement sessions.

use crate::grid::SpatialGrid;
use crate::report::RoomStateReporter;
use crate::search::find_position;
use u_stacking_core::solver::{Config, ProgressCallback, ProgressInfo, Solver};
use u_stacking_core::{
    BoxSpec, Error, PlacedBox, PlacementOutcome, RejectReason, Result, Room, SessionResult,
};

use std::collections::HashSet;
use std::time::Instant;

/// Places boxes into a room one at a time, the way a single robot arm would.
///
/// The placer owns the grid and the append-only ledger of committed boxes.
/// Every attempt either commits the box at the first legal origin or leaves
/// the room untouched.
#[derive(Debug, Clone)]
pub struct RobotPlacer {
    config: Config,
    grid: SpatialGrid,
    ledger: Vec<PlacedBox>,
    placed_ids: HashSet<String>,
}

impl RobotPlacer {
    /// Creates a placer for an empty room.
    pub fn new(room: Room, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            grid: SpatialGrid::new(room)?,
            ledger: Vec::new(),
            placed_ids: HashSet::new(),
        })
    }

    /// Creates a placer with default configuration.
    pub fn default_config(room: Room) -> Result<Self> {
        Self::new(room, Config::default())
    }

    /// Returns the room being filled.
    pub fn room(&self) -> &Room {
        self.grid.room()
    }

    /// Returns the occupancy grid.
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Committed boxes in commit order.
    pub fn placed(&self) -> &[PlacedBox] {
        &self.ledger
    }

    /// Read-only view of the ledger for reporting.
    pub fn reporter(&self) -> RoomStateReporter<'_> {
        RoomStateReporter::new(self.grid.room(), &self.ledger)
    }

    /// Attempts to place a single box.
    ///
    /// Boxes over the lift limit are rejected before any search. Otherwise the
    /// box goes to the first legal origin, or is rejected if there is none.
    /// Errors are reserved for malformed boxes and, for liftable boxes, ids
    /// already in the room.
    pub fn simulate_placement(&mut self, item: &BoxSpec) -> Result<PlacementOutcome> {
        item.validate()?;

        if item.weight > self.config.max_lift_weight {
            log::debug!(
                "box '{}' is too heavy to lift ({} > {})",
                item.id,
                item.weight,
                self.config.max_lift_weight
            );
            return Ok(PlacementOutcome::Rejected(RejectReason::TooHeavy));
        }

        if self.placed_ids.contains(&item.id) {
            return Err(Error::DuplicateId(item.id.clone()));
        }

        let Some(origin) = find_position(&self.grid, item) else {
            log::debug!("no valid position for box '{}'", item.id);
            return Ok(PlacementOutcome::Rejected(RejectReason::NoValidPosition));
        };

        self.grid.occupy(origin, item)?;
        self.placed_ids.insert(item.id.clone());
        self.ledger.push(PlacedBox::new(item.clone(), origin));
        log::debug!("placed box '{}' at {}", item.id, origin);

        Ok(PlacementOutcome::Placed(origin))
    }

    /// Validates the whole sequence before anything touches the grid.
    fn prepare(&self, items: &[BoxSpec]) -> Result<Vec<BoxSpec>> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(items.len());
        for item in items {
            item.validate()?;
            if !seen.insert(item.id.as_str()) || self.placed_ids.contains(&item.id) {
                return Err(Error::DuplicateId(item.id.clone()));
            }
        }

        let mut ordered = items.to_vec();
        self.config.ordering.apply(&mut ordered);
        Ok(ordered)
    }

    fn run_session(
        &mut self,
        items: &[BoxSpec],
        callback: Option<&ProgressCallback>,
    ) -> Result<SessionResult> {
        let start = Instant::now();
        let ordered = self.prepare(items)?;
        let ledger_start = self.ledger.len();
        let total = ordered.len();

        let mut result = SessionResult::new();
        result.ordering = Some(self.config.ordering.name().to_string());

        if let Some(callback) = callback {
            callback(
                ProgressInfo::new()
                    .with_phase("Placing")
                    .with_items(0, 0, total)
                    .with_utilization(self.grid.fill_ratio()),
            );
        }

        for (processed, item) in ordered.into_iter().enumerate() {
            let outcome = self.simulate_placement(&item)?;
            result.record(item.id, outcome);

            if let Some(callback) = callback {
                callback(
                    ProgressInfo::new()
                        .with_phase("Placing")
                        .with_items(
                            processed + 1,
                            self.ledger.len() - ledger_start,
                            total,
                        )
                        .with_utilization(self.grid.fill_ratio())
                        .with_elapsed(start.elapsed().as_millis() as u64),
                );
            }
        }

        result.placements = self.ledger[ledger_start..].to_vec();
        result.utilization = self.grid.fill_ratio();
        result.computation_time_ms = start.elapsed().as_millis() as u64;

        log::info!(
            "session finished: {} placed, {} rejected, utilization {}",
            result.placed_count(),
            result.rejected_count(),
            result.utilization_percent()
        );

        if let Some(callback) = callback {
            callback(
                ProgressInfo::new()
                    .with_phase("Complete")
                    .with_items(total, result.placed_count(), total)
                    .with_utilization(result.utilization)
                    .with_elapsed(result.computation_time_ms)
                    .finished(),
            );
        }

        Ok(result)
    }
}

impl Solver for RobotPlacer {
    fn config(&self) -> &Config {
        &self.config
    }

    fn run(&mut self, items: &[BoxSpec]) -> Result<SessionResult> {
        self.run_session(items, None)
    }

    fn run_with_progress(
        &mut self,
        items: &[BoxSpec],
        callback: ProgressCallback,
    ) -> Result<SessionResult> {
        self.run_session(items, Some(&callback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use u_stacking_core::{OrderingPolicy, Origin, MAX_LIFT_WEIGHT};

    #[test]
    fn test_place_single_box() {
        let mut placer = RobotPlacer::default_config(Room::cube(10)).unwrap();
        let outcome = placer
            .simulate_placement(&BoxSpec::cube("B1", 3).with_weight(5.0))
            .unwrap();

        assert_eq!(outcome, PlacementOutcome::Placed(Origin::new(7, 0, 0)));
        assert_eq!(placer.placed().len(), 1);
        assert_eq!(placer.grid().occupied_cells(), 27);
    }

    #[test]
    fn test_weight_limit_is_strict() {
        let mut placer = RobotPlacer::default_config(Room::cube(2)).unwrap();
        let at_limit = BoxSpec::cube("at_limit", 1).with_weight(MAX_LIFT_WEIGHT);
        let over = BoxSpec::cube("over", 1).with_weight(MAX_LIFT_WEIGHT + 0.1);

        assert!(placer.simulate_placement(&at_limit).unwrap().is_placed());
        assert_eq!(
            placer.simulate_placement(&over).unwrap(),
            PlacementOutcome::Rejected(RejectReason::TooHeavy)
        );
        assert_eq!(placer.placed().len(), 1);
    }

    #[test]
    fn test_custom_lift_limit() {
        let config = Config::new().with_max_lift_weight(20.0);
        let mut placer = RobotPlacer::new(Room::cube(2), config).unwrap();
        let outcome = placer
            .simulate_placement(&BoxSpec::cube("B", 1).with_weight(15.0))
            .unwrap();
        assert!(outcome.is_placed());
    }

    #[test]
    fn test_unusable_lift_limit_is_error() {
        for bad in [f64::NAN, -1.0] {
            let config = Config::new().with_max_lift_weight(bad);
            assert!(matches!(
                RobotPlacer::new(Room::cube(2), config),
                Err(Error::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_too_heavy_wins_over_placed_id() {
        let mut placer = RobotPlacer::default_config(Room::cube(2)).unwrap();
        placer.simulate_placement(&BoxSpec::cube("a", 1)).unwrap();

        let heavy = BoxSpec::cube("a", 1).with_weight(11.0);
        assert_eq!(
            placer.simulate_placement(&heavy),
            Ok(PlacementOutcome::Rejected(RejectReason::TooHeavy))
        );
        assert_eq!(placer.placed().len(), 1);
    }

    #[test]
    fn test_malformed_box_is_error() {
        let mut placer = RobotPlacer::default_config(Room::cube(2)).unwrap();
        let result = placer.simulate_placement(&BoxSpec::new("bad", 0, 1, 1));
        assert!(matches!(result, Err(Error::InvalidBox(_))));
        assert!(placer.grid().is_empty());
    }

    #[test]
    fn test_duplicate_id_after_commit() {
        let mut placer = RobotPlacer::default_config(Room::cube(3)).unwrap();
        placer.simulate_placement(&BoxSpec::cube("B", 1)).unwrap();
        assert_eq!(
            placer.simulate_placement(&BoxSpec::cube("B", 1)),
            Err(Error::DuplicateId("B".to_string()))
        );
    }

    #[test]
    fn test_rejected_box_can_retry_under_same_id() {
        let mut placer = RobotPlacer::default_config(Room::cube(2)).unwrap();
        let heavy = BoxSpec::cube("B", 1).with_weight(50.0);
        assert!(!placer.simulate_placement(&heavy).unwrap().is_placed());
        assert!(placer
            .simulate_placement(&heavy.with_weight(1.0))
            .unwrap()
            .is_placed());
    }

    #[test]
    fn test_run_orders_and_reports() {
        let items = vec![
            BoxSpec::cube("light", 1).with_weight(1.0),
            BoxSpec::cube("heavy", 1).with_weight(9.0),
            BoxSpec::cube("open", 1).with_weight(2.0).with_accessible(true),
            BoxSpec::cube("too_heavy", 1).with_weight(12.0),
        ];

        let mut placer = RobotPlacer::default_config(Room::new(2, 1, 1)).unwrap();
        let result = placer.run(&items).unwrap();

        let order: Vec<&str> = result.outcomes.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["open", "too_heavy", "heavy", "light"]);
        assert_eq!(result.placed_count(), 2);
        assert_eq!(result.rejected_for(RejectReason::TooHeavy), 1);
        assert_eq!(result.rejected_for(RejectReason::NoValidPosition), 1);
        assert_eq!(
            result.outcome_of("light"),
            Some(PlacementOutcome::Rejected(RejectReason::NoValidPosition))
        );
        assert!((result.utilization - 1.0).abs() < 1e-9);
        assert_eq!(result.ordering.as_deref(), Some("accessible_then_heaviest"));
    }

    #[test]
    fn test_run_as_given() {
        let items = vec![
            BoxSpec::cube("first", 1).with_weight(1.0),
            BoxSpec::cube("second", 1).with_weight(9.0),
        ];
        let config = Config::new().with_ordering(OrderingPolicy::AsGiven);
        let mut placer = RobotPlacer::new(Room::new(1, 1, 1), config).unwrap();
        let result = placer.run(&items).unwrap();

        assert_eq!(result.placements[0].id(), "first");
        assert_eq!(
            result.outcome_of("second"),
            Some(PlacementOutcome::Rejected(RejectReason::NoValidPosition))
        );
    }

    #[test]
    fn test_run_rejects_duplicates_up_front() {
        let items = vec![BoxSpec::cube("same", 1), BoxSpec::cube("same", 1)];
        let mut placer = RobotPlacer::default_config(Room::cube(3)).unwrap();

        assert_eq!(
            placer.run(&items).unwrap_err(),
            Error::DuplicateId("same".to_string())
        );
        assert!(placer.grid().is_empty());
    }

    #[test]
    fn test_run_validates_before_placing() {
        let items = vec![BoxSpec::cube("ok", 1), BoxSpec::new("bad", 1, 1, 0)];
        let mut placer = RobotPlacer::default_config(Room::cube(3)).unwrap();

        assert!(placer.run(&items).is_err());
        assert!(placer.placed().is_empty());
    }

    #[test]
    fn test_run_with_progress() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let items: Vec<BoxSpec> = (0..4).map(|i| BoxSpec::cube(format!("B{}", i), 1)).collect();

        let mut placer = RobotPlacer::default_config(Room::cube(2)).unwrap();
        let result = placer
            .run_with_progress(
                &items,
                Box::new(move |_info| {
                    counter.fetch_add(1, Ordering::Relaxed);
                }),
            )
            .unwrap();

        assert_eq!(result.placed_count(), 4);
        // Initial + one per box + final.
        assert_eq!(calls.load(Ordering::Relaxed), 6);
    }
}
