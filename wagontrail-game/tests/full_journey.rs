use wagontrail_game::crossings::CrossingMode;
use wagontrail_game::store::Cart;
use wagontrail_game::{
    Ending, InputSnapshot, JourneyConfig, JourneySetup, Key, LANDMARKS, LogKind, Profession,
    RngBundle, Screen, ScreenKind, Session, StateController, SupplyKind,
};

fn quiet_config() -> JourneyConfig {
    JourneyConfig {
        event_chance: 0.0,
        disease_chance: 0.0,
        weather_chance: 0.0,
        ..JourneyConfig::default()
    }
}

fn outfitted_session(cfg: &JourneyConfig) -> Session {
    let mut cart = Cart::new();
    let budget = Profession::Banker.starting_cents();
    cart.set_quantity(SupplyKind::Oxen, 6, budget).unwrap();
    cart.set_quantity(SupplyKind::Food, 2000, budget).unwrap();
    cart.set_quantity(SupplyKind::Clothing, 8, budget).unwrap();
    cart.set_quantity(SupplyKind::Ammunition, 10, budget).unwrap();
    cart.set_quantity(SupplyKind::Wheels, 2, budget).unwrap();
    cart.set_quantity(SupplyKind::Axles, 2, budget).unwrap();
    cart.set_quantity(SupplyKind::Tongues, 2, budget).unwrap();
    JourneySetup::new("Ezra", &["Ada", "Bo", "Cy", "Di"], Profession::Banker)
        .with_departure_month(4)
        .with_cart(cart)
        .embark(cfg)
        .unwrap()
}

/// Minimal driver: ford every river, confirm every result, leave every fort.
fn input_for(controller: &StateController) -> InputSnapshot {
    match controller.active() {
        Some(Screen::RiverCrossing(crossing)) if crossing.mode() == CrossingMode::Crossing => {
            InputSnapshot::idle()
        }
        Some(Screen::RiverCrossing(_) | Screen::Rest(_)) => InputSnapshot::pressed(Key::Enter),
        Some(Screen::Hunting(hunt)) if hunt.is_complete() => InputSnapshot::pressed(Key::Enter),
        Some(Screen::TradePost(_) | Screen::TravelMenu(_)) => InputSnapshot::pressed(Key::Escape),
        _ => InputSnapshot::idle(),
    }
}

fn drive(controller: &mut StateController, dt: f32, max_ticks: u32) {
    for _ in 0..max_ticks {
        if controller.is_finished() {
            break;
        }
        let input = input_for(controller);
        controller.update(dt, &input);
    }
}

#[test]
fn well_supplied_party_finishes_the_trail() {
    let cfg = quiet_config();
    let session = outfitted_session(&cfg);
    let mut controller = StateController::on_trail(session, RngBundle::from_user_seed(2024), cfg);
    drive(&mut controller, 1.0, 20_000);

    assert!(controller.is_finished());
    let session = controller.session();
    if controller.ending() == Some(Ending::Reached) {
        assert!(session.trail.miles_traveled() >= 2040);
        assert_eq!(session.trail.visited_landmarks().len(), LANDMARKS.len());
    }
    assert!(session.log.count_of(LogKind::Landmark) >= 1);
}

#[test]
fn reaching_oregon_city_ends_travel() {
    let cfg = quiet_config();
    let mut session = outfitted_session(&cfg);
    session.trail.advance_miles(2030);
    for index in 0..LANDMARKS.len() - 1 {
        session.trail.mark_visited(index);
    }
    let mut controller = StateController::on_trail(session, RngBundle::from_user_seed(7), cfg);
    controller.update(2.0, &InputSnapshot::idle());

    assert_eq!(controller.ending(), Some(Ending::Reached));
    assert_eq!(controller.session().trail.days_elapsed, 1);
    for _ in 0..10 {
        controller.update(2.0, &InputSnapshot::idle());
    }
    assert_eq!(controller.session().trail.days_elapsed, 1);
    let view = controller.render().unwrap();
    assert_eq!(view.kind, ScreenKind::GameOver);
}

#[test]
fn wipeout_preempts_a_landmark_reached_the_same_day() {
    let cfg = quiet_config();
    let mut session = outfitted_session(&cfg);
    session.ledger.supplies.set(SupplyKind::Food, 0);
    session.trail.advance_miles(95);
    for member in session.party.members_mut() {
        member.apply_health_delta(-95.0);
    }
    let mut controller = StateController::on_trail(session, RngBundle::from_user_seed(8), cfg);
    controller.update(2.0, &InputSnapshot::idle());

    assert_eq!(controller.ending(), Some(Ending::Death));
    assert_eq!(controller.depth(), 0);
    assert!(controller.session().trail.is_visited(0));
}

#[test]
fn river_landmark_opens_the_crossing_then_returns_to_travel() {
    let cfg = quiet_config();
    let mut session = outfitted_session(&cfg);
    session.trail.advance_miles(95);
    let mut controller = StateController::on_trail(session, RngBundle::from_user_seed(9), cfg);
    controller.update(2.0, &InputSnapshot::idle());
    assert_eq!(controller.active_kind(), Some(ScreenKind::RiverCrossing));
    assert_eq!(controller.suspended_kinds(), vec![ScreenKind::Travel]);

    // Ferry is the third option.
    controller.update(0.0, &InputSnapshot::pressed(Key::Down));
    controller.update(0.0, &InputSnapshot::pressed(Key::Down));
    let money = controller.session().ledger.money_cents();
    controller.update(0.0, &InputSnapshot::pressed(Key::Enter));
    assert_eq!(controller.session().ledger.money_cents(), money - 500);
    for _ in 0..6 {
        controller.update(1.0, &InputSnapshot::idle());
    }
    let Some(Screen::RiverCrossing(crossing)) = controller.active() else {
        panic!("still crossing");
    };
    assert!(crossing.outcome().unwrap().success);
    controller.update(0.0, &InputSnapshot::pressed(Key::Space));
    assert_eq!(controller.active_kind(), Some(ScreenKind::Travel));
}

#[test]
fn menu_rest_runs_days_and_returns_to_menu() {
    let cfg = quiet_config();
    let session = outfitted_session(&cfg);
    let mut controller = StateController::on_trail(session, RngBundle::from_user_seed(10), cfg);
    controller.update(0.0, &InputSnapshot::pressed(Key::Enter));
    assert_eq!(controller.active_kind(), Some(ScreenKind::TravelMenu));
    for _ in 0..4 {
        controller.update(0.0, &InputSnapshot::pressed(Key::Down));
    }
    controller.update(0.0, &InputSnapshot::pressed(Key::Enter));
    controller.update(0.0, &InputSnapshot::pressed(Key::Right));
    controller.update(0.0, &InputSnapshot::pressed(Key::Enter));
    assert_eq!(controller.active_kind(), Some(ScreenKind::Rest));
    assert_eq!(
        controller.suspended_kinds(),
        vec![ScreenKind::Travel, ScreenKind::TravelMenu]
    );
    for _ in 0..4 {
        controller.update(2.0, &InputSnapshot::idle());
    }
    assert_eq!(controller.session().trail.days_elapsed, 2);
    assert_eq!(controller.session().trail.miles_traveled(), 0);
    controller.update(0.0, &InputSnapshot::pressed(Key::Enter));
    assert_eq!(controller.active_kind(), Some(ScreenKind::TravelMenu));
    controller.update(0.0, &InputSnapshot::pressed(Key::Escape));
    assert_eq!(controller.active_kind(), Some(ScreenKind::Travel));
}

#[test]
fn starting_party_snapshot_matches_setup() {
    let cfg = JourneyConfig::default();
    let session = outfitted_session(&cfg);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.date, "April 1, 1848");
    assert_eq!(snapshot.roster.len(), 4);
    assert_eq!(snapshot.supplies.food, 2000);
    assert_eq!(snapshot.next_landmark.as_deref(), Some("Kansas River Crossing"));
}
