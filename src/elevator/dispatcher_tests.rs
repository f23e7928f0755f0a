/*
 * Unit tests for the dispatcher state machine
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - request handling: idempotent duplicates, self-request, out-of-range floors
 * - motion: monotonic approach, arrival snap, FIFO legs, fixed leg direction
 * - passenger exchange at arrival and the overload policy
 * - return-to-base arming and firing
 * - shaft resize
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod dispatcher_tests {
    use crate::config::Config;
    use crate::elevator::{Dispatcher, PassengerCounters, TimerCommand};
    use crate::shared::Behaviour::{Idle, Moving};
    use crate::shared::Direction::{Down, Up};

    const MAX_TICKS: usize = 10_000;

    fn setup_dispatcher() -> (Dispatcher, PassengerCounters) {
        // Default configuration: 6 floors, 100 px per floor, 3 px per tick
        let config = Config::default();
        (
            Dispatcher::new(&config.elevator, &config.motion),
            PassengerCounters::new(config.elevator.n_floors),
        )
    }

    /// Ticks until the current leg ends and returns the commands emitted on arrival.
    fn run_leg(dispatcher: &mut Dispatcher, counters: &PassengerCounters) -> Vec<TimerCommand> {
        for _ in 0..MAX_TICKS {
            let commands = dispatcher.advance(counters);
            if !commands.is_empty() {
                return commands;
            }
        }
        panic!("Leg did not finish within {} ticks", MAX_TICKS);
    }

    #[test]
    fn test_dispatcher_init() {
        // Purpose: Verify that the car starts idle and empty at floor 0

        // Arrange
        let (dispatcher, _counters) = setup_dispatcher();

        // Act
        let state = dispatcher.snapshot();

        // Assert
        assert_eq!(state.behaviour, Idle);
        assert_eq!(state.floor, 0);
        assert_eq!(state.direction, None);
        assert_eq!(state.passengers, 0);
        assert_eq!(state.position, dispatcher.geometry().floor_to_position(0));
        assert!(state.pending_stops.is_empty());
    }

    #[test]
    fn test_request_starts_leg_upwards() {
        // Arrange
        let (mut dispatcher, _counters) = setup_dispatcher();

        // Act
        let commands = dispatcher.request_floor(3);

        // Assert
        assert_eq!(commands, vec![TimerCommand::CancelReturn, TimerCommand::StartMovement]);
        assert!(dispatcher.is_moving());
        assert_eq!(dispatcher.direction(), Some(Up));
        assert_eq!(dispatcher.pending_stops(), vec![3]);
    }

    #[test]
    fn test_duplicate_request_is_idempotent() {
        // Purpose: Verify that requesting the same floor twice queues it once

        // Arrange
        let (mut dispatcher, _counters) = setup_dispatcher();
        dispatcher.request_floor(4);
        let after_first = dispatcher.pending_stops();

        // Act
        let commands = dispatcher.request_floor(4);

        // Assert
        assert!(commands.is_empty());
        assert_eq!(dispatcher.pending_stops(), after_first);
    }

    #[test]
    fn test_self_request_while_idle_is_noop() {
        // Arrange
        let (mut dispatcher, _counters) = setup_dispatcher();

        // Act
        let commands = dispatcher.request_floor(0);

        // Assert
        assert!(commands.is_empty());
        assert!(!dispatcher.is_moving());
        assert!(dispatcher.pending_stops().is_empty());
    }

    #[test]
    fn test_out_of_range_request_is_ignored() {
        // Arrange
        let (mut dispatcher, _counters) = setup_dispatcher();

        // Act
        let below = dispatcher.request_floor(-1);
        let above = dispatcher.request_floor(6);
        let far_above = dispatcher.request_floor(1_000);

        // Assert
        assert!(below.is_empty() && above.is_empty() && far_above.is_empty());
        assert!(!dispatcher.is_moving());
        assert!(dispatcher.pending_stops().is_empty());
    }

    #[test]
    fn test_advance_while_idle_does_nothing() {
        // Arrange
        let (mut dispatcher, counters) = setup_dispatcher();
        let position = dispatcher.position();

        // Act
        let commands = dispatcher.advance(&counters);

        // Assert
        assert!(commands.is_empty());
        assert_eq!(dispatcher.position(), position);
    }

    #[test]
    fn test_scenario_a_travel_to_floor_three() {
        // Purpose: Verify a complete upward leg from floor 0 to floor 3

        // Arrange
        let (mut dispatcher, counters) = setup_dispatcher();
        dispatcher.request_floor(3);

        // Act
        let commands = run_leg(&mut dispatcher, &counters);

        // Assert
        assert_eq!(commands, vec![TimerCommand::StopMovement, TimerCommand::ArmReturn]);
        assert_eq!(dispatcher.current_floor(), 3);
        assert!(!dispatcher.is_moving());
        assert!(dispatcher.pending_stops().is_empty());
        assert_eq!(dispatcher.position(), dispatcher.geometry().floor_to_position(3));
    }

    #[test]
    fn test_monotonic_approach_up_and_down() {
        // Purpose: Verify the position never moves against the direction of travel

        // Arrange
        let (mut dispatcher, counters) = setup_dispatcher();
        dispatcher.request_floor(5);

        // Act & Assert (up: non-increasing)
        let mut last = dispatcher.position();
        while dispatcher.is_moving() {
            dispatcher.advance(&counters);
            assert!(dispatcher.position() <= last);
            last = dispatcher.position();
        }

        // Act & Assert (down: non-decreasing)
        dispatcher.request_floor(1);
        assert_eq!(dispatcher.direction(), Some(Down));
        let mut last = dispatcher.position();
        while dispatcher.is_moving() {
            dispatcher.advance(&counters);
            assert!(dispatcher.position() >= last);
            last = dispatcher.position();
        }
        assert_eq!(dispatcher.current_floor(), 1);
    }

    #[test]
    fn test_arrive_snaps_to_floor() {
        // Purpose: Verify the cab is snapped to the exact floor position even after overshooting

        // Arrange: 100 px per floor is not a multiple of the 3 px step
        let (mut dispatcher, counters) = setup_dispatcher();
        dispatcher.request_floor(1);

        // Act
        run_leg(&mut dispatcher, &counters);

        // Assert
        assert_eq!(dispatcher.position(), dispatcher.geometry().floor_to_position(1));
        assert!(!dispatcher.is_moving());
    }

    #[test]
    fn test_explicit_arrive() {
        // Arrange
        let (mut dispatcher, counters) = setup_dispatcher();
        dispatcher.request_floor(2);
        dispatcher.advance(&counters);

        // Act
        let commands = dispatcher.arrive(2, &counters);

        // Assert
        assert_eq!(commands[0], TimerCommand::StopMovement);
        assert_eq!(dispatcher.current_floor(), 2);
        assert_eq!(dispatcher.position(), dispatcher.geometry().floor_to_position(2));
        assert!(!dispatcher.is_moving());
        assert!(dispatcher.pending_stops().is_empty());
    }

    #[test]
    fn test_stops_served_in_request_order() {
        // Purpose: Verify FIFO service, with no reordering by proximity

        // Arrange
        let (mut dispatcher, counters) = setup_dispatcher();
        dispatcher.request_floor(4);
        dispatcher.request_floor(1);
        dispatcher.request_floor(5);

        // Act
        let mut visited = Vec::new();
        for _ in 0..3 {
            run_leg(&mut dispatcher, &counters);
            visited.push(dispatcher.current_floor());
        }

        // Assert
        assert_eq!(visited, vec![4, 1, 5]);
        assert!(dispatcher.pending_stops().is_empty());
    }

    #[test]
    fn test_next_leg_starts_immediately() {
        // Arrange
        let (mut dispatcher, counters) = setup_dispatcher();
        dispatcher.request_floor(2);
        dispatcher.request_floor(1);

        // Act
        let commands = run_leg(&mut dispatcher, &counters);

        // Assert
        assert_eq!(
            commands,
            vec![
                TimerCommand::StopMovement,
                TimerCommand::CancelReturn,
                TimerCommand::StartMovement,
            ]
        );
        assert!(dispatcher.is_moving());
        assert_eq!(dispatcher.direction(), Some(Down));
        assert_eq!(dispatcher.current_floor(), 2);
    }

    #[test]
    fn test_mid_leg_request_does_not_reverse() {
        // Purpose: Verify a request behind the car is appended without changing the leg direction

        // Arrange
        let (mut dispatcher, counters) = setup_dispatcher();
        dispatcher.request_floor(4);
        for _ in 0..10 {
            dispatcher.advance(&counters);
        }

        // Act
        let commands = dispatcher.request_floor(0);

        // Assert
        assert!(commands.is_empty());
        assert_eq!(dispatcher.direction(), Some(Up));
        assert_eq!(dispatcher.pending_stops(), vec![4, 0]);
    }

    #[test]
    fn test_passengers_exchanged_on_arrival() {
        // Arrange
        let (mut dispatcher, mut counters) = setup_dispatcher();
        counters.set_enter_count(2, 5);
        dispatcher.request_floor(2);
        run_leg(&mut dispatcher, &counters);

        counters.set_exit_count(4, 7);
        counters.set_enter_count(4, 1);
        dispatcher.request_floor(4);

        // Act
        run_leg(&mut dispatcher, &counters);

        // Assert: exit clamped to the 5 aboard, then 1 boards
        assert_eq!(dispatcher.passenger_count(), 1);
        assert_eq!(dispatcher.load(), 70.0);
    }

    #[test]
    fn test_scenario_b_boarding_refused_when_overloading() {
        // Purpose: Verify that (8 + 1) * 70 kg > 600 kg refuses the whole boarding group

        // Arrange
        let (mut dispatcher, mut counters) = setup_dispatcher();
        counters.set_enter_count(2, 8);
        dispatcher.request_floor(2);
        run_leg(&mut dispatcher, &counters);
        assert_eq!(dispatcher.passenger_count(), 8);
        assert_eq!(dispatcher.load(), 560.0);

        counters.set_enter_count(3, 1);
        dispatcher.request_floor(3);

        // Act
        run_leg(&mut dispatcher, &counters);

        // Assert
        assert_eq!(dispatcher.current_floor(), 3);
        assert_eq!(dispatcher.passenger_count(), 8);
        assert!(!dispatcher.is_overloaded());
    }

    #[test]
    fn test_counters_read_only_at_arrival() {
        // Purpose: Verify that counters changed after an arrival do not affect that stop

        // Arrange
        let (mut dispatcher, mut counters) = setup_dispatcher();
        counters.set_enter_count(1, 2);
        dispatcher.request_floor(1);
        run_leg(&mut dispatcher, &counters);

        // Act
        counters.set_enter_count(1, 6);

        // Assert
        assert_eq!(dispatcher.passenger_count(), 2);
    }

    #[test]
    fn test_occupied_car_does_not_arm_return() {
        // Arrange
        let (mut dispatcher, mut counters) = setup_dispatcher();
        counters.set_enter_count(3, 1);
        dispatcher.request_floor(3);

        // Act
        let commands = run_leg(&mut dispatcher, &counters);

        // Assert
        assert_eq!(commands, vec![TimerCommand::StopMovement]);
    }

    #[test]
    fn test_return_timer_sends_empty_car_home() {
        // Arrange
        let (mut dispatcher, counters) = setup_dispatcher();
        dispatcher.request_floor(4);
        run_leg(&mut dispatcher, &counters);

        // Act
        let commands = dispatcher.on_return_timer();

        // Assert
        assert_eq!(commands, vec![TimerCommand::CancelReturn, TimerCommand::StartMovement]);
        assert_eq!(dispatcher.direction(), Some(Down));
        assert_eq!(dispatcher.pending_stops(), vec![0]);
    }

    #[test]
    fn test_request_during_dwell_cancels_return() {
        // Purpose: Verify a leg started while the return timer is armed disarms it

        // Arrange
        let (mut dispatcher, counters) = setup_dispatcher();
        dispatcher.request_floor(4);
        let arrival = run_leg(&mut dispatcher, &counters);

        // Act
        let commands = dispatcher.request_floor(5);

        // Assert
        assert_eq!(arrival, vec![TimerCommand::StopMovement, TimerCommand::ArmReturn]);
        assert_eq!(commands, vec![TimerCommand::CancelReturn, TimerCommand::StartMovement]);
        assert!(dispatcher.is_moving());
    }

    #[test]
    fn test_return_timer_ignored_when_occupied() {
        // Arrange
        let (mut dispatcher, mut counters) = setup_dispatcher();
        counters.set_enter_count(4, 2);
        dispatcher.request_floor(4);
        run_leg(&mut dispatcher, &counters);

        // Act
        let commands = dispatcher.on_return_timer();

        // Assert
        assert!(commands.is_empty());
        assert!(!dispatcher.is_moving());
        assert_eq!(dispatcher.current_floor(), 4);
    }

    #[test]
    fn test_home_arrival_does_not_arm_return() {
        // Arrange
        let (mut dispatcher, counters) = setup_dispatcher();
        dispatcher.request_floor(2);
        run_leg(&mut dispatcher, &counters);
        dispatcher.request_floor(0);

        // Act
        let commands = run_leg(&mut dispatcher, &counters);

        // Assert
        assert_eq!(commands, vec![TimerCommand::StopMovement]);
        assert_eq!(dispatcher.current_floor(), 0);
    }

    #[test]
    fn test_resize_resnaps_idle_car() {
        // Arrange
        let (mut dispatcher, counters) = setup_dispatcher();
        dispatcher.request_floor(2);
        run_leg(&mut dispatcher, &counters);

        // Act
        dispatcher.resize_shaft(1200.0);

        // Assert
        assert_eq!(dispatcher.geometry().floor_height(), 200.0);
        assert_eq!(dispatcher.position(), 600.0);
        assert_eq!(dispatcher.snapshot().behaviour, Idle);
    }

    #[test]
    fn test_resize_scales_moving_car_and_ignores_bad_height() {
        // Arrange
        let (mut dispatcher, counters) = setup_dispatcher();
        dispatcher.request_floor(5);
        for _ in 0..10 {
            dispatcher.advance(&counters);
        }
        let position = dispatcher.position();

        // Act
        dispatcher.resize_shaft(0.0);
        dispatcher.resize_shaft(300.0);

        // Assert
        assert_eq!(dispatcher.position(), position / 2.0);
        assert_eq!(dispatcher.snapshot().behaviour, Moving);
    }
}
