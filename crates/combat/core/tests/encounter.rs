use std::collections::HashMap;

use combat_core::{
    Ability, AbilityId, AbilityKind, AbilityOracle, ActionCard, Advance, Archetype, Awaiting,
    CardError, CardId, CardOracle, CombatEnv, CombatEvent, CombatSession, EnemyAction,
    EnemyPolicy, Env, FixedSeniority, Inventory, ItemId, MessageKind, NullSink, OracleError,
    Outcome, PcgRng, Phase, RngOracle, Roster, SessionError, Side, StatusEffectKind,
    TurnScheduler, Unit, UnitId, UnitStats,
};
use combat_core::card::DamageOverTime;

const KNIGHT: UnitId = UnitId(1);
const CLERIC: UnitId = UnitId(2);
const GOBLIN: UnitId = UnitId(10);
const ORC: UnitId = UnitId(11);

#[test]
fn basic_attack_subtracts_mitigated_damage() {
    let cards = Cards::standard();
    let mut roster = Roster::new(vec![knight(KNIGHT, &["slash"])], vec![goblin(GOBLIN)]);
    let mut session = CombatSession::default();
    let mut events: Vec<CombatEvent> = Vec::new();

    session.start(&mut roster, &mut events).expect("start");
    let result = session
        .play_card(&CardId::from("slash"), GOBLIN, &mut roster, &env(&cards), &mut events)
        .expect("slash resolves");

    // 30 - max(1, 15 + 25/5 - 5 - 0)
    assert_eq!(result.damage_dealt, 15);
    assert_eq!(hp(&roster, GOBLIN), 15);
    assert_eq!(roster.unit(KNIGHT).map(|u| u.action_points), Some(2));
}

#[test]
fn turn_rotation_wraps_into_round_two() {
    let roster = Roster::new(
        vec![knight(KNIGHT, &[]), knight(CLERIC, &[])],
        vec![goblin(GOBLIN), goblin(ORC)],
    );
    let mut scheduler = TurnScheduler::new();
    let mut events: Vec<CombatEvent> = Vec::new();

    let mut visited = vec![active(scheduler.start_combat(&roster, &FixedSeniority, &mut events))];
    for _ in 0..4 {
        visited.push(active(scheduler.advance(&roster, &mut events)));
    }

    assert_eq!(
        visited,
        vec![Some(KNIGHT), Some(CLERIC), Some(GOBLIN), Some(ORC), Some(KNIGHT)]
    );
    assert_eq!(scheduler.round(), 2);
    assert_eq!(
        events.iter().filter(|e| matches!(e, CombatEvent::RoundStart { .. })).count(),
        1
    );
}

#[test]
fn dead_units_are_skipped_without_turn_start() {
    let mut roster = Roster::new(
        vec![knight(KNIGHT, &[]), knight(CLERIC, &[])],
        vec![goblin(GOBLIN), goblin(ORC)],
    );
    let mut scheduler = TurnScheduler::new();
    let mut events: Vec<CombatEvent> = Vec::new();
    scheduler.start_combat(&roster, &FixedSeniority, &mut events);
    scheduler.kill_unit(&mut roster, CLERIC);

    assert_eq!(active(scheduler.advance(&roster, &mut events)), Some(GOBLIN));
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, CombatEvent::TurnStart { unit, .. } if *unit == CLERIC))
    );
}

#[test]
fn mutual_wipe_resolves_as_defeat() {
    let mut roster = Roster::new(vec![knight(KNIGHT, &[])], vec![goblin(GOBLIN)]);
    let mut scheduler = TurnScheduler::new();
    scheduler.start_combat(&roster, &FixedSeniority, &mut NullSink);
    scheduler.kill_unit(&mut roster, KNIGHT);
    scheduler.kill_unit(&mut roster, GOBLIN);

    let mut events: Vec<CombatEvent> = Vec::new();
    assert_eq!(scheduler.advance(&roster, &mut events), Advance::Ended(Outcome::Defeat));
    assert!(events.is_empty());

    let mut wiped = Roster::new(
        vec![knight(KNIGHT, &[]).with_hp(0)],
        vec![goblin(GOBLIN).with_hp(0)],
    );
    let mut session = CombatSession::default();
    let mut events: Vec<CombatEvent> = Vec::new();
    assert_eq!(session.start(&mut wiped, &mut events), Ok(Awaiting::Nothing));
    assert_eq!(session.outcome(), Outcome::Defeat);
    assert!(events.contains(&CombatEvent::CombatEnd { victory: false }));
}

#[test]
fn victory_ends_combat_exactly_once() {
    let cards = Cards::standard();
    let mut roster = Roster::new(
        vec![knight(KNIGHT, &["slash", "slash", "quake"])],
        vec![goblin(GOBLIN), goblin(ORC)],
    );
    let env = env(&cards);
    let mut session = CombatSession::default();
    let mut events: Vec<CombatEvent> = Vec::new();

    assert_eq!(session.start(&mut roster, &mut events), Ok(Awaiting::HeroInput(KNIGHT)));
    session
        .play_card(&CardId::from("quake"), GOBLIN, &mut roster, &env, &mut events)
        .expect("quake");
    assert_eq!((hp(&roster, GOBLIN), hp(&roster, ORC)), (10, 10));
    session
        .play_card(&CardId::from("slash"), GOBLIN, &mut roster, &env, &mut events)
        .expect("slash");
    assert!(roster.unit(GOBLIN).is_some_and(Unit::is_dead));

    // The dead goblin is skipped; the orc hits back for 10 - 2.
    assert_eq!(session.pass_turn(&mut roster, &mut events), Ok(Awaiting::EnemyAction(ORC)));
    assert_eq!(
        session.take_enemy_turn(&mut roster, &env, &mut events),
        Ok(Awaiting::HeroInput(KNIGHT))
    );
    assert_eq!(hp(&roster, KNIGHT), 32);
    assert_eq!(session.round(), 2);

    session
        .play_card(&CardId::from("slash"), ORC, &mut roster, &env, &mut events)
        .expect("finishing blow");
    assert_eq!(session.phase(), Phase::Ended);
    assert_eq!(session.outcome(), Outcome::Victory);

    assert_eq!(session.pass_turn(&mut roster, &mut events), Ok(Awaiting::Nothing));
    assert_eq!(
        session.take_enemy_turn(&mut roster, &env, &mut events),
        Ok(Awaiting::Nothing)
    );

    let ends: Vec<_> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, CombatEvent::CombatEnd { .. }))
        .collect();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].1, &CombatEvent::CombatEnd { victory: true });
    assert!(!events[ends[0].0..]
        .iter()
        .any(|e| matches!(e, CombatEvent::TurnStart { .. })));
}

#[test]
fn rejected_card_changes_nothing_and_is_narrated() {
    let cards = Cards::standard();
    let mut roster = Roster::new(vec![knight(KNIGHT, &["quake", "quake"])], vec![goblin(GOBLIN)]);
    let env = env(&cards);
    let mut session = CombatSession::default();
    session.start(&mut roster, &mut NullSink).expect("start");
    session
        .play_card(&CardId::from("quake"), GOBLIN, &mut roster, &env, &mut NullSink)
        .expect("first quake");

    let mut events: Vec<CombatEvent> = Vec::new();
    let err = session
        .play_card(&CardId::from("quake"), GOBLIN, &mut roster, &env, &mut events)
        .expect_err("only one action point left");

    assert!(matches!(
        err,
        SessionError::Card(CardError::InsufficientActionPoints { required: 2, available: 1, .. })
    ));
    assert_eq!(hp(&roster, GOBLIN), 10);
    assert!(matches!(events.as_slice(), [CombatEvent::ShowMessage { .. }]));

    let err = session
        .play_card(&CardId::from("slash"), GOBLIN, &mut roster, &env, &mut NullSink)
        .expect_err("slash is not in the deck");
    assert_eq!(
        err,
        SessionError::CardNotInDeck {
            unit: KNIGHT,
            card: CardId::from("slash"),
        }
    );
}

#[test]
fn consumable_card_spends_deck_copy_and_item() {
    let cards = Cards::standard();
    let flask = ItemId::from("flask");
    let mut roster = Roster::new(
        vec![knight(KNIGHT, &["potion", "potion"]).with_hp(20)],
        vec![goblin(GOBLIN)],
    )
    .with_inventory(Inventory::new().with_item(flask.clone(), 2));
    let mut session = CombatSession::default();
    session.start(&mut roster, &mut NullSink).expect("start");

    session
        .play_card(&CardId::from("potion"), KNIGHT, &mut roster, &env(&cards), &mut NullSink)
        .expect("potion");

    assert_eq!(hp(&roster, KNIGHT), 30);
    assert_eq!(roster.unit(KNIGHT).and_then(Unit::deck).map(<[CardId]>::len), Some(1));
    assert_eq!(roster.inventory.quantity(&flask), 1);
}

#[test]
fn stunned_hero_cannot_play_and_must_pass() {
    let cards = Cards::standard();
    let mut roster = Roster::new(vec![knight(KNIGHT, &["slash"])], vec![goblin(GOBLIN)]);
    if let Some(unit) = roster.unit_mut(KNIGHT) {
        unit.statuses.upsert(StatusEffectKind::Stun, 1, 0);
    }
    let mut session = CombatSession::default();
    let mut events: Vec<CombatEvent> = Vec::new();

    assert_eq!(session.start(&mut roster, &mut events), Ok(Awaiting::SkippedTurn(KNIGHT)));
    assert_eq!(
        session.play_card(&CardId::from("slash"), GOBLIN, &mut roster, &env(&cards), &mut events),
        Err(SessionError::UnitCannotAct(KNIGHT))
    );
    assert_eq!(session.pass_turn(&mut roster, &mut events), Ok(Awaiting::EnemyAction(GOBLIN)));
    assert!(events.contains(&CombatEvent::StatusExpired {
        unit: KNIGHT,
        kind: StatusEffectKind::Stun,
    }));
}

#[test]
fn stunned_enemy_turn_belongs_to_the_driver() {
    let mut roster = Roster::new(vec![knight(KNIGHT, &[])], vec![goblin(GOBLIN)]);
    if let Some(unit) = roster.unit_mut(GOBLIN) {
        unit.statuses.upsert(StatusEffectKind::Stun, 1, 0);
    }
    let mut session = CombatSession::default();
    session.start(&mut roster, &mut NullSink).expect("start");
    assert_eq!(session.pass_turn(&mut roster, &mut NullSink), Ok(Awaiting::SkippedTurn(GOBLIN)));

    let mut events: Vec<CombatEvent> = Vec::new();
    assert_eq!(session.pass_turn(&mut roster, &mut events), Err(SessionError::NotHeroTurn));
    assert!(matches!(
        events.as_slice(),
        [CombatEvent::ShowMessage { kind: MessageKind::Warning, .. }]
    ));
    assert_eq!(session.awaiting(), Awaiting::SkippedTurn(GOBLIN));
    assert_eq!(session.round(), 1);

    assert_eq!(
        session.end_skipped_turn(&mut roster, &mut NullSink),
        Ok(Awaiting::HeroInput(KNIGHT))
    );
    assert_eq!(session.round(), 2);
    assert_eq!(hp(&roster, KNIGHT), 40);
    assert_eq!(
        session.end_skipped_turn(&mut roster, &mut NullSink),
        Err(SessionError::NotSkippedTurn)
    );
}

#[test]
fn missing_card_table_is_narrated() {
    let mut roster = Roster::new(vec![knight(KNIGHT, &["slash"])], vec![goblin(GOBLIN)]);
    let mut session = CombatSession::default();
    session.start(&mut roster, &mut NullSink).expect("start");

    let mut events: Vec<CombatEvent> = Vec::new();
    let err = session
        .play_card(&CardId::from("slash"), GOBLIN, &mut roster, &CombatEnv::empty(), &mut events)
        .expect_err("no card table");

    assert_eq!(err, SessionError::Oracle(OracleError::CardsNotAvailable));
    assert!(matches!(
        events.as_slice(),
        [CombatEvent::ShowMessage { kind: MessageKind::Warning, .. }]
    ));
    assert_eq!(hp(&roster, GOBLIN), 30);
    assert_eq!(session.awaiting(), Awaiting::HeroInput(KNIGHT));
}

#[test]
fn healer_mends_the_most_wounded_ally() {
    let cards = Cards::standard();
    let abilities = Abilities::standard();
    let shaman = Unit::enemy(
        ORC,
        "Shaman",
        UnitStats::new(30, 6, 2),
        Archetype::Healer,
        vec![AbilityId::from("mend")],
    );
    let mut roster = Roster::new(
        vec![knight(KNIGHT, &[])],
        vec![goblin(GOBLIN).with_hp(10), shaman],
    );
    let env = env_with_abilities(&cards, &abilities);
    let mut session = CombatSession::default();
    session.start(&mut roster, &mut NullSink).expect("start");
    session.pass_turn(&mut roster, &mut NullSink).expect("pass");
    assert_eq!(
        session.take_enemy_turn(&mut roster, &env, &mut NullSink),
        Ok(Awaiting::EnemyAction(ORC))
    );

    let mut events: Vec<CombatEvent> = Vec::new();
    assert_eq!(
        session.take_enemy_turn(&mut roster, &env, &mut events),
        Ok(Awaiting::HeroInput(KNIGHT))
    );

    assert_eq!(hp(&roster, GOBLIN), 22);
    assert_eq!(hp(&roster, KNIGHT), 32);
    assert!(events.contains(&CombatEvent::DamageTaken {
        target: GOBLIN,
        amount: -12,
        current_hp: 22,
    }));
}

#[test]
fn tactical_enemy_poisons_a_clean_hero() {
    let cards = Cards::standard();
    let abilities = Abilities::standard();
    let witch = Unit::enemy(
        GOBLIN,
        "Witch",
        UnitStats::new(30, 10, 5),
        Archetype::Tactical,
        vec![AbilityId::from("hex")],
    );
    let mut roster = Roster::new(vec![knight(KNIGHT, &[])], vec![witch]);
    let env = env_with_abilities(&cards, &abilities);
    let mut session = CombatSession::default();
    session.start(&mut roster, &mut NullSink).expect("start");
    session.pass_turn(&mut roster, &mut NullSink).expect("pass");

    let mut events: Vec<CombatEvent> = Vec::new();
    assert_eq!(
        session.take_enemy_turn(&mut roster, &env, &mut events),
        Ok(Awaiting::HeroInput(KNIGHT))
    );

    assert!(events.contains(&CombatEvent::StatusApplied {
        unit: KNIGHT,
        kind: StatusEffectKind::Poison,
        duration: 3,
        magnitude: 2,
    }));
    // The first tick lands at the knight's next turn start.
    assert_eq!(hp(&roster, KNIGHT), 38);
    let poison = roster
        .unit(KNIGHT)
        .and_then(|unit| unit.statuses.get(StatusEffectKind::Poison))
        .map(|effect| effect.remaining);
    assert_eq!(poison, Some(2));
}

#[test]
fn defend_stacks_until_the_next_hit() {
    let cards = Cards::standard();
    let mut roster = Roster::new(vec![knight(KNIGHT, &["slash"])], vec![goblin(GOBLIN)]);
    if let Some(unit) = roster.unit_mut(GOBLIN) {
        unit.temporary_defense = 2;
    }
    let mut session = CombatSession::default();
    session.start(&mut roster, &mut NullSink).expect("start");
    session.pass_turn(&mut roster, &mut NullSink).expect("pass");

    let defend = EnemyAction::Defend {
        source: GOBLIN,
        bonus: 6,
    };
    assert_eq!(
        session.apply_enemy_action(defend, &mut roster, &mut NullSink),
        Ok(Awaiting::HeroInput(KNIGHT))
    );
    assert_eq!(roster.unit(GOBLIN).map(|u| u.temporary_defense), Some(8));

    let result = session
        .play_card(&CardId::from("slash"), GOBLIN, &mut roster, &env(&cards), &mut NullSink)
        .expect("slash");

    // 15 + 25/5 - 5 - 8
    assert_eq!(result.damage_dealt, 7);
    assert_eq!(hp(&roster, GOBLIN), 23);
    assert_eq!(roster.unit(GOBLIN).map(|u| u.temporary_defense), Some(0));
}

#[test]
fn action_from_an_idle_enemy_is_rejected() {
    let mut roster = Roster::new(vec![knight(KNIGHT, &[])], vec![goblin(GOBLIN), goblin(ORC)]);
    let mut session = CombatSession::default();
    session.start(&mut roster, &mut NullSink).expect("start");
    assert_eq!(session.pass_turn(&mut roster, &mut NullSink), Ok(Awaiting::EnemyAction(GOBLIN)));

    let mut events: Vec<CombatEvent> = Vec::new();
    let out_of_turn = EnemyAction::Attack {
        source: ORC,
        target: KNIGHT,
        damage: 10,
    };
    assert_eq!(
        session.apply_enemy_action(out_of_turn, &mut roster, &mut events),
        Err(SessionError::NotActiveEnemy(ORC))
    );

    assert!(events.is_empty());
    assert_eq!(hp(&roster, KNIGHT), 40);
    assert_eq!(session.phase(), Phase::ActiveTurn);
    assert_eq!(session.awaiting(), Awaiting::EnemyAction(GOBLIN));
}

#[test]
fn poison_can_finish_the_last_enemy_at_its_turn_start() {
    let cards = Cards::standard();
    let mut roster = Roster::new(vec![knight(KNIGHT, &["venom"])], vec![goblin(GOBLIN)]);
    let mut session = CombatSession::default();
    let mut events: Vec<CombatEvent> = Vec::new();
    session.start(&mut roster, &mut events).expect("start");
    session
        .play_card(&CardId::from("venom"), GOBLIN, &mut roster, &env(&cards), &mut events)
        .expect("venom");

    assert_eq!(session.pass_turn(&mut roster, &mut events), Ok(Awaiting::Nothing));
    assert_eq!(session.outcome(), Outcome::Victory);
    assert!(events.contains(&CombatEvent::UnitDefeated { unit: GOBLIN }));
    assert!(events.contains(&CombatEvent::CombatEnd { victory: true }));
}

#[test]
fn exit_is_silent_idempotent_and_drops_pending_actions() {
    let mut roster = Roster::new(vec![knight(KNIGHT, &[])], vec![goblin(GOBLIN)]);
    let mut session = CombatSession::default();
    let mut events: Vec<CombatEvent> = Vec::new();
    session.start(&mut roster, &mut events).expect("start");
    session.pass_turn(&mut roster, &mut events).expect("pass");
    let pending = EnemyAction::Attack {
        source: GOBLIN,
        target: KNIGHT,
        damage: 10,
    };

    session.exit();
    session.exit();

    assert_eq!(session.phase(), Phase::Ended);
    assert_eq!(session.outcome(), Outcome::Undetermined);
    assert_eq!(
        session.apply_enemy_action(pending, &mut roster, &mut events),
        Ok(Awaiting::Nothing)
    );
    assert_eq!(hp(&roster, KNIGHT), 40);
    assert!(!events.iter().any(|e| matches!(e, CombatEvent::CombatEnd { .. })));
}

#[test]
fn berserker_below_thirty_percent_hits_for_one_and_a_half() {
    let enemy = Unit::enemy(
        ORC,
        "Berserker",
        UnitStats::new(100, 20, 0),
        Archetype::Berserker,
        Vec::new(),
    )
    .with_hp(29);
    let hero = knight(KNIGHT, &[]);
    let env = CombatEnv::empty();

    let action = EnemyPolicy::default().decide(&enemy, &[&hero], &[&enemy], &env, 1);
    assert_eq!(
        action,
        Some(EnemyAction::Attack {
            source: ORC,
            target: KNIGHT,
            damage: 30,
        })
    );
}

#[test]
fn view_reflects_session_state() {
    let mut roster = Roster::new(vec![knight(KNIGHT, &[])], vec![goblin(GOBLIN)]);
    let mut session = CombatSession::default();
    session.start(&mut roster, &mut NullSink).expect("start");

    let view = session.view(&roster);
    assert_eq!(view.round, 1);
    assert_eq!(view.active, Some(KNIGHT));
    assert_eq!(view.awaiting, Awaiting::HeroInput(KNIGHT));
    assert_eq!(view.units.len(), 2);
    assert_eq!(view.unit(GOBLIN).map(|u| u.side), Some(Side::Enemy));
}

// ============================================================================
// Fixtures
// ============================================================================

struct Cards(HashMap<CardId, ActionCard>);

impl Cards {
    fn standard() -> Self {
        let cards = [
            ActionCard::new("slash", "Slash", 1).with_damage(15),
            ActionCard::new("quake", "Quake", 2).with_damage(20).area(),
            ActionCard::new("potion", "Potion", 0)
                .with_heal(10)
                .consumable(Some(ItemId::from("flask"))),
            ActionCard::new("venom", "Venom", 1).with_dot(DamageOverTime::poison(40, 2)),
        ];
        Self(cards.into_iter().map(|card| (card.id.clone(), card)).collect())
    }
}

impl CardOracle for Cards {
    fn card(&self, id: &CardId) -> Option<ActionCard> {
        self.0.get(id).cloned()
    }
}

struct Abilities(HashMap<AbilityId, Ability>);

impl Abilities {
    fn standard() -> Self {
        let rows = [
            ("mend", AbilityKind::Heal { amount: 12 }),
            (
                "hex",
                AbilityKind::Debuff {
                    kind: StatusEffectKind::Poison,
                    duration: 3,
                    magnitude: 2,
                },
            ),
        ];
        Self(
            rows.into_iter()
                .map(|(id, kind)| {
                    let id = AbilityId::from(id);
                    (id.clone(), Ability { id, name: String::new(), kind })
                })
                .collect(),
        )
    }
}

impl AbilityOracle for Abilities {
    fn ability(&self, id: &AbilityId) -> Option<Ability> {
        self.0.get(id).cloned()
    }
}

fn env(cards: &Cards) -> CombatEnv<'_> {
    Env::new(Some(cards as &dyn CardOracle), None, Some(&PcgRng as &dyn RngOracle))
}

fn env_with_abilities<'a>(cards: &'a Cards, abilities: &'a Abilities) -> CombatEnv<'a> {
    Env::new(
        Some(cards as &dyn CardOracle),
        Some(abilities as &dyn AbilityOracle),
        Some(&PcgRng as &dyn RngOracle),
    )
}

fn knight(id: UnitId, deck: &[&str]) -> Unit {
    Unit::hero(
        id,
        "Knight",
        UnitStats::new(40, 25, 2),
        deck.iter().map(|card| CardId::from(*card)).collect(),
    )
}

fn goblin(id: UnitId) -> Unit {
    Unit::enemy(id, "Goblin", UnitStats::new(30, 10, 5), Archetype::Aggressive, Vec::new())
}

fn hp(roster: &Roster, id: UnitId) -> u32 {
    roster.unit(id).map_or(0, |unit| unit.hp)
}

fn active(advance: Advance) -> Option<UnitId> {
    match advance {
        Advance::Turn(participant) => Some(participant.unit),
        _ => None,
    }
}
