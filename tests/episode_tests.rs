use elevator_dispatch::{
    run_episode, BuildingConfig, DispatchError, DispatchPolicy, JointAction, MonteCarloPlanner,
    PlannerConfig, RandomPolicy, State,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_episode_runs_for_tick_budget() {
    init_logging();
    let building = BuildingConfig::new(2, 6, 4, 0.3);
    let mut policy = RandomPolicy::new();
    let mut rng = ChaCha8Rng::seed_from_u64(10);

    let report = run_episode(&building, &mut policy, 40, &mut rng).unwrap();

    assert_eq!(report.ticks(), 40);
    assert_eq!(report.actions.len(), 40);
    assert!(report.score() <= 0.0);
    assert!(report.actions.iter().all(|a| a.len() == 2));
}

#[test]
fn test_quiet_building_costs_nothing() {
    let building = BuildingConfig::new(3, 8, 5, 0.0);
    let mut policy = RandomPolicy::new();
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let report = run_episode(&building, &mut policy, 25, &mut rng).unwrap();

    assert_eq!(report.score(), 0.0);
    assert_eq!(report.final_state.total_waiting(), 0);
}

#[test]
fn test_planner_episode_is_reproducible() {
    init_logging();
    let building = BuildingConfig::new(2, 5, 4, 0.25);
    let run = |seed: u64| {
        let config = PlannerConfig::default().with_rollouts(20).with_horizon(5);
        let mut planner = MonteCarloPlanner::new(config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let report = run_episode(&building, &mut planner, 20, &mut rng).unwrap();
        assert_eq!(planner.statistics().decisions, 20);
        report
    };

    let a = run(182);
    let b = run(182);
    assert_eq!(a.score(), b.score());
    assert_eq!(a.actions, b.actions);
    assert_eq!(a.final_state, b.final_state);
}

#[test]
fn test_boxed_policies_drive_episodes() {
    let building = BuildingConfig::new(1, 4, 3, 0.2);
    let mut policies: Vec<Box<dyn DispatchPolicy>> = vec![
        Box::new(RandomPolicy::new()),
        Box::new(MonteCarloPlanner::new(PlannerConfig::default().with_rollouts(10)).unwrap()),
    ];

    for policy in policies.iter_mut() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let report = run_episode(&building, policy, 10, &mut rng).unwrap();
        assert_eq!(report.ticks(), 10, "{} should run the full budget", policy.name());
    }
}

#[test]
fn test_zero_tick_budget_returns_initial_state() {
    let building = BuildingConfig::default();
    let mut policy = RandomPolicy::new();
    let mut rng = ChaCha8Rng::seed_from_u64(13);

    let report = run_episode(&building, &mut policy, 0, &mut rng).unwrap();
    assert_eq!(report.ticks(), 0);
    assert!(report.actions.is_empty());
}

#[test]
fn test_invalid_building_is_rejected() {
    let building = BuildingConfig::default().with_elevators(0);
    let mut policy = RandomPolicy::new();
    let mut rng = ChaCha8Rng::seed_from_u64(14);

    let result = run_episode(&building, &mut policy, 10, &mut rng);
    assert!(matches!(result, Err(DispatchError::InvalidConfiguration(_))));
}

/// Plays randomly for a few ticks, then gives up
struct GivesUp {
    inner: RandomPolicy,
    remaining: u32,
}

impl DispatchPolicy for GivesUp {
    fn choose_action(
        &mut self,
        state: &State,
        rng: &mut dyn RngCore,
    ) -> Result<JointAction, DispatchError> {
        if self.remaining == 0 {
            return Err(DispatchError::NoLegalActions);
        }
        self.remaining -= 1;
        self.inner.choose_action(state, rng)
    }

    fn name(&self) -> &str {
        "gives-up"
    }
}

#[test]
fn test_huge_tick_budget_does_not_preallocate() {
    let building = BuildingConfig::new(1, 2, 1, 0.0);
    let mut policy = GivesUp {
        inner: RandomPolicy::new(),
        remaining: 3,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(15);

    // The episode stops at the policy's error, not at an allocation failure
    let result = run_episode(&building, &mut policy, u64::MAX, &mut rng);
    assert!(matches!(result, Err(DispatchError::NoLegalActions)));
}
