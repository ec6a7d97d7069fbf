//! Full battle loop driven through `BattleSession`.

use tactics_core::{
    ActionKind, Attributes, BattleConfig, BattleEvent, BattleOutcome, BattleSession,
    BattleStatus, BehaviorKind, CharacterRecord, DamageKind, EconomyError, GameError,
    IntentError, InitiativeScheduler, ReloadError, SchedulerStep, ScriptedDice, Side,
    StanceKind, UnitId, Weapon, WeaponProfile,
};

const VEX: UnitId = UnitId(0);
const RAIDER: UnitId = UnitId(1);

fn dagger() -> Weapon {
    Weapon::melee(
        WeaponProfile::new("Dagger", 2, 4)
            .with_hit_bonus(2)
            .with_extra_damage(1)
            .with_damage_kind(DamageKind::Piercing),
    )
}

fn club() -> Weapon {
    Weapon::melee(WeaponProfile::new("Club", 2, 2).with_damage_kind(DamageKind::Blunt))
}

/// Fast player with a dagger against a slow idle raider.
fn duel() -> Vec<CharacterRecord> {
    vec![
        CharacterRecord::new("Vex", Side::Player, Attributes::new(3, 5, 4)).with_weapon(dagger()),
        CharacterRecord::new("Raider", Side::Enemy, Attributes::new(3, 1, 3))
            .with_weapon(club())
            .with_behavior(BehaviorKind::Idle),
    ]
}

fn session(config: BattleConfig, records: &[CharacterRecord], rolls: &[i32]) -> BattleSession {
    BattleSession::initialize(
        config,
        records,
        Box::new(ScriptedDice::new(rolls.iter().copied())),
    )
}

/// Runs ticks until a player unit must act or the battle ends.
fn run_until_settled(session: &mut BattleSession) -> BattleStatus {
    for _ in 0..1_000 {
        match session.run() {
            BattleStatus::TickElapsed(_) => continue,
            status => return status,
        }
    }
    panic!("battle loop never settled");
}

fn rejections(events: &[BattleEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match e {
            BattleEvent::IntentRejected { code, .. } => Some(code.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn two_units_threshold_fifty() {
    let mut scheduler = InitiativeScheduler::new(50);
    scheduler.register(UnitId(0), 25);
    scheduler.register(UnitId(1), 60);
    scheduler.start();

    assert_eq!(scheduler.advance(|_| true), SchedulerStep::Act(UnitId(1)));
    scheduler.finish_activation();
    assert_eq!(scheduler.advance(|_| true), SchedulerStep::TickComplete(1));

    assert_eq!(scheduler.unit(UnitId(1)).map(|u| u.gauge), Some(10));
    assert_eq!(scheduler.unit(UnitId(0)).map(|u| u.gauge), Some(25));
}

#[test]
fn intents_outside_the_player_turn_are_rejected() {
    let mut session = session(BattleConfig::new(), &duel(), &[]);

    assert_eq!(session.use_move_action(), Err(IntentError::NotStarted));

    assert_eq!(session.run(), BattleStatus::TickElapsed(1));
    assert_eq!(session.end_turn(), Err(IntentError::NotPlayerTurn));
    assert_eq!(
        rejections(session.events()),
        vec!["INTENT_NOT_STARTED", "INTENT_NOT_PLAYER_TURN"]
    );
}

#[test]
fn faster_player_acts_first() {
    let mut session = session(BattleConfig::new(), &duel(), &[]);

    // 20 initiative per tick against a threshold of 100
    for tick in 1..=4 {
        assert_eq!(session.run(), BattleStatus::TickElapsed(tick));
    }
    assert_eq!(session.run(), BattleStatus::AwaitingInput(VEX));
    assert!(session.is_player_turn());
    assert_eq!(session.economy().remaining(ActionKind::Major), 1);
    assert_eq!(session.enemy_count(), 1);
}

#[test]
fn killing_the_last_enemy_is_a_victory() {
    let mut records = duel();
    records[1] = records[1].clone().with_hp(5);
    let mut session = session(BattleConfig::new(), &records, &[15, 4]);

    assert_eq!(run_until_settled(&mut session), BattleStatus::AwaitingInput(VEX));
    let report = session.attack(RAIDER, 0, None).unwrap();

    assert_eq!(report.total_damage(), 7);
    assert!(report.target_defeated());
    assert_eq!(session.outcome(), Some(BattleOutcome::Victory));
    assert!(!session.is_player_turn());
    assert_eq!(session.run(), BattleStatus::Ended(BattleOutcome::Victory));
    assert_eq!(session.end_turn(), Err(IntentError::BattleOver));
    assert!(session.events().iter().any(|e| matches!(
        e,
        BattleEvent::BattleEnded {
            outcome: BattleOutcome::Victory
        }
    )));

    assert_eq!(session.write_back(&mut records), 2);
    assert_eq!(records[0].hp, Some(22));
    assert_eq!(records[1].hp, Some(0));
}

#[test]
fn losing_every_player_unit_is_a_defeat() {
    let records = vec![
        CharacterRecord::new("Vex", Side::Player, Attributes::new(3, 1, 3))
            .with_hp(1)
            .with_weapon(dagger()),
        CharacterRecord::new("Raider", Side::Enemy, Attributes::new(3, 9, 3))
            .with_weapon(club())
            .with_behavior(BehaviorKind::Brute),
    ];
    let mut session = session(BattleConfig::new(), &records, &[20, 2]);

    assert_eq!(
        run_until_settled(&mut session),
        BattleStatus::Ended(BattleOutcome::Defeat)
    );
    assert!(session.events().iter().any(|e| matches!(
        e,
        BattleEvent::UnitAction { name, .. } if name == "Raider"
    )));
    assert_eq!(session.participant(VEX).map(|p| p.is_alive()), Some(false));
}

#[test]
fn rejected_intents_leave_the_turn_untouched() {
    let mut session = session(BattleConfig::new(), &duel(), &[]);
    assert_eq!(run_until_settled(&mut session), BattleStatus::AwaitingInput(VEX));
    session.drain_events();

    assert_eq!(
        session.switch_stance(StanceKind::Neutral),
        Err(IntentError::StanceUnchanged(StanceKind::Neutral))
    );
    assert!(matches!(
        session.attack(VEX, 0, None),
        Err(IntentError::InvalidTarget(_))
    ));
    assert_eq!(
        session.attack(UnitId(9), 0, None),
        Err(IntentError::UnknownUnit(UnitId(9)))
    );
    assert_eq!(
        session.attack(RAIDER, 4, None),
        Err(IntentError::UnknownWeapon(4))
    );
    assert_eq!(
        session.reload(0),
        Err(IntentError::Reload(ReloadError::NotRanged))
    );

    let economy = session.economy();
    assert_eq!(economy.remaining(ActionKind::Movement), 1);
    assert_eq!(economy.remaining(ActionKind::Major), 1);
    assert_eq!(economy.remaining(ActionKind::Minor), 2);
    assert_eq!(session.active_unit(), Some(VEX));
    assert_eq!(rejections(session.events()).len(), 5);
}

#[test]
fn exhausting_the_pool_ends_the_turn() {
    // Focused stance: 1 + 2 + 2 + 2 = 7 misses the raider's AC of 8.
    let mut session = session(BattleConfig::new(), &duel(), &[1]);
    assert_eq!(run_until_settled(&mut session), BattleStatus::AwaitingInput(VEX));

    session.use_move_action().unwrap();
    let err = session.use_move_action().unwrap_err();
    assert_eq!(err, IntentError::Economy(EconomyError::Depleted(ActionKind::Movement)));
    assert_eq!(err.error_code(), "ECONOMY_DEPLETED");

    assert_eq!(session.switch_stance(StanceKind::Defensive), Ok(StanceKind::Neutral));
    assert_eq!(session.switch_stance(StanceKind::Focused), Ok(StanceKind::Defensive));
    assert_eq!(session.active_unit(), Some(VEX));

    let report = session.attack(RAIDER, 0, None).unwrap();
    assert_eq!(report.hits(), 0);

    assert!(!session.is_player_turn());
    let events = session.events();
    let exhausted = events
        .iter()
        .position(|e| matches!(e, BattleEvent::ActionPoolExhausted { unit } if *unit == VEX));
    let ended = events
        .iter()
        .position(|e| matches!(e, BattleEvent::TurnEnded { unit, .. } if *unit == VEX));
    assert!(exhausted.is_some() && exhausted < ended);
}

#[test]
fn manual_end_turn_when_auto_end_is_off() {
    let config = BattleConfig {
        auto_end_turn: false,
        ..BattleConfig::new()
    };
    let mut session = session(config, &duel(), &[1]);
    assert_eq!(run_until_settled(&mut session), BattleStatus::AwaitingInput(VEX));

    session.use_move_action().unwrap();
    session.switch_stance(StanceKind::Aggressive).unwrap();
    session.switch_stance(StanceKind::Evasive).unwrap();
    session.attack(RAIDER, 0, None).unwrap();

    assert!(session.economy().is_exhausted());
    assert_eq!(session.active_unit(), Some(VEX));
    assert_eq!(session.run(), BattleStatus::AwaitingInput(VEX));

    session.end_turn().unwrap();
    assert!(!session.is_player_turn());
}

#[test]
fn idle_enemy_turn_is_a_no_op() {
    let mut session = session(BattleConfig::new(), &duel(), &[]);
    assert_eq!(run_until_settled(&mut session), BattleStatus::AwaitingInput(VEX));
    session.end_turn().unwrap();
    session.drain_events();

    // Vex acts again at tick 10; the raider has its turn at tick 9.
    assert_eq!(run_until_settled(&mut session), BattleStatus::AwaitingInput(VEX));
    let events = session.drain_events();

    assert!(events.iter().any(|e| matches!(
        e,
        BattleEvent::TurnStarted { unit, .. } if *unit == RAIDER
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        BattleEvent::TurnEnded { unit, .. } if *unit == RAIDER
    )));
    assert!(!events.iter().any(|e| matches!(e, BattleEvent::UnitAction { .. })));
    assert_eq!(session.scheduler().ticks_elapsed(), 9);
}
