use elevator_dispatch::{
    action::{elevator_actions, legal_elevator_actions},
    legal_actions, Action, BuildingConfig, DispatchError, Elevator, JointAction, Rider, State,
};

fn scenario(
    floors: usize,
    capacity: usize,
    elevators: Vec<Elevator>,
    waiting: Vec<Vec<Rider>>,
) -> State {
    let config = BuildingConfig::new(elevators.len(), floors, capacity, 0.0);
    State::from_parts(config, 0, 0, elevators, waiting).unwrap()
}

fn empty_queues(floors: usize) -> Vec<Vec<Rider>> {
    vec![Vec::new(); floors]
}

#[test]
fn test_empty_elevator_moves_within_bounds() {
    let floors = 5;
    for floor in 0..floors {
        let actions = elevator_actions(&Elevator::new(floor), &[], floors);

        assert!(
            actions.contains(&Action::Stall),
            "an empty car may always stall (floor {})",
            floor
        );
        assert_eq!(actions.contains(&Action::Up), floor < floors - 1);
        assert_eq!(actions.contains(&Action::Down), floor > 0);
        assert!(
            !actions.iter().any(|a| a.is_open()),
            "nobody to serve at floor {}, doors stay shut",
            floor
        );
    }
}

#[test]
fn test_single_rider_heading_up_forces_up() {
    // 1 elevator, 2 floors, rider for floor 1 on board at floor 0
    let state = scenario(
        2,
        1,
        vec![Elevator::with_riders(0, vec![Rider::new(1)])],
        empty_queues(2),
    );

    let legal = legal_actions(&state).unwrap();
    assert_eq!(legal, vec![JointAction::new(vec![Action::Up])]);
}

#[test]
fn test_rider_at_destination_forces_open() {
    let state = scenario(
        2,
        1,
        vec![Elevator::with_riders(1, vec![Rider::new(1)])],
        empty_queues(2),
    );

    let actions = legal_elevator_actions(&state, 0).unwrap();
    assert!(!actions.contains(&Action::Up));
    assert!(!actions.contains(&Action::Down));
    assert!(!actions.contains(&Action::Stall));
    assert!(actions.contains(&Action::OpenUp) || actions.contains(&Action::OpenDown));
    assert_eq!(actions, vec![Action::OpenDown]);
}

#[test]
fn test_must_open_mid_building_follows_remaining_riders() {
    // Riders for floors 2 (here) and 4: the car must open and may only
    // advertise the direction it can keep travelling in.
    let elevator = Elevator::with_riders(2, vec![Rider::new(2), Rider::new(4)]);
    let actions = elevator_actions(&elevator, &[], 5);
    assert_eq!(actions, vec![Action::OpenUp]);

    // Only the rider for this floor: both doors are on offer
    let elevator = Elevator::with_riders(2, vec![Rider::new(2)]);
    let actions = elevator_actions(&elevator, &[], 5);
    assert_eq!(actions, vec![Action::OpenDown, Action::OpenUp]);
}

#[test]
fn test_occupied_elevator_never_stalls_or_reverses() {
    let elevator = Elevator::with_riders(2, vec![Rider::new(0)]);
    let actions = elevator_actions(&elevator, &[], 5);
    assert_eq!(actions, vec![Action::Down]);

    let elevator = Elevator::with_riders(2, vec![Rider::new(4), Rider::new(3)]);
    let actions = elevator_actions(&elevator, &[], 5);
    assert_eq!(actions, vec![Action::Up]);
}

#[test]
fn test_waiting_riders_enable_matching_doors() {
    let waiting = [Rider::new(0), Rider::new(4)];
    let actions = elevator_actions(&Elevator::new(2), &waiting, 5);
    assert_eq!(
        actions,
        vec![
            Action::Stall,
            Action::Down,
            Action::OpenDown,
            Action::Up,
            Action::OpenUp
        ]
    );

    let waiting = [Rider::new(4)];
    let actions = elevator_actions(&Elevator::new(2), &waiting, 5);
    assert!(actions.contains(&Action::OpenUp));
    assert!(!actions.contains(&Action::OpenDown));

    // A car carrying someone upward does not open for riders going down
    let waiting = [Rider::new(0)];
    let elevator = Elevator::with_riders(2, vec![Rider::new(4)]);
    let actions = elevator_actions(&elevator, &waiting, 5);
    assert_eq!(actions, vec![Action::Up]);
}

#[test]
fn test_joint_actions_are_the_product_in_order() {
    // Elevator 0 at the ground floor, elevator 1 at the top
    let state = scenario(
        3,
        2,
        vec![Elevator::new(0), Elevator::new(2)],
        empty_queues(3),
    );

    let legal = state.legal_actions().unwrap();
    let expected: Vec<JointAction> = vec![
        vec![Action::Stall, Action::Stall],
        vec![Action::Stall, Action::Down],
        vec![Action::Up, Action::Stall],
        vec![Action::Up, Action::Down],
    ]
    .into_iter()
    .map(JointAction::new)
    .collect();

    assert_eq!(legal, expected, "first elevator should vary slowest");
}

#[test]
fn test_joint_action_count_matches_per_elevator_sets() {
    let waiting = vec![
        vec![Rider::new(3)],
        Vec::new(),
        vec![Rider::new(0), Rider::new(3)],
        Vec::new(),
    ];
    let state = scenario(
        4,
        3,
        vec![
            Elevator::new(0),
            Elevator::new(2),
            Elevator::with_riders(1, vec![Rider::new(3)]),
        ],
        waiting,
    );

    let sizes: Vec<usize> = (0..3)
        .map(|i| legal_elevator_actions(&state, i).unwrap().len())
        .collect();
    let legal = state.legal_actions().unwrap();

    assert_eq!(legal.len(), sizes.iter().product::<usize>());
    assert!(legal.iter().all(|a| a.len() == 3));
}

#[test]
fn test_conflicting_riders_are_rejected() {
    // A car with riders headed both ways has no legal action at all
    let elevator = Elevator::with_riders(2, vec![Rider::new(0), Rider::new(4)]);
    assert!(elevator_actions(&elevator, &[], 5).is_empty());

    let result = State::from_parts(
        BuildingConfig::new(1, 5, 4, 0.0),
        0,
        0,
        vec![elevator],
        empty_queues(5),
    );
    assert!(
        matches!(result, Err(DispatchError::InvalidState(_))),
        "such a car must be refused when the state is assembled"
    );
}

#[test]
fn test_elevator_index_out_of_range() {
    let state = scenario(3, 2, vec![Elevator::new(0)], empty_queues(3));
    assert_eq!(
        legal_elevator_actions(&state, 1),
        Err(DispatchError::ElevatorOutOfRange {
            index: 1,
            num_elevators: 1
        })
    );
}

#[test]
fn test_action_display() {
    let action = JointAction::from(vec![Action::OpenUp, Action::Stall, Action::Down]);
    assert_eq!(action.to_string(), "(OPEN_UP, STALL, DOWN)");
    assert_eq!(action[0], Action::OpenUp);
    assert_eq!(action.get(3), None);
    assert!(Action::Up.is_move() && !Action::Up.is_open());
    assert!(Action::OpenDown.is_open() && !Action::OpenDown.is_move());
}
