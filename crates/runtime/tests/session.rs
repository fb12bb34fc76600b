//! Whole-session scenarios: floors, stairs, death and replay.

use delve_content::{ContentBundle, FloorLayout, SpawnTables};
use delve_core::{
    ActionError, ActorTemplate, AiBehavior, Command, DiceSpec, Direction, EntityId, GameConfig,
    Position, SpawnEntry, StairDirection,
};
use delve_runtime::{RuntimeError, Session, SessionConfig};

fn quiet_config() -> GameConfig {
    GameConfig {
        spawn_chance: 0,
        regen_chance: 0,
        ..GameConfig::default()
    }
}

fn player(max_hp: u32) -> ActorTemplate {
    ActorTemplate::builder("you", '@')
        .hp(max_hp)
        .ac(7)
        .attacks(vec![DiceSpec::new(1, 4)])
        .build()
}

fn two_floors() -> Vec<FloorLayout> {
    let upper = FloorLayout::from_rows("upper", &["######", "#..>.#", "######"])
        .unwrap()
        .with_depths(1, Some(1))
        .with_start(Position::new(1, 1))
        .unwrap();
    let lower = FloorLayout::from_rows("lower", &["######", "#<...#", "######"])
        .unwrap()
        .with_depths(2, None);
    vec![upper, lower]
}

fn bundle(actors: Vec<(String, ActorTemplate)>, spawns: SpawnTables) -> ContentBundle {
    ContentBundle {
        config: quiet_config(),
        actors,
        items: Vec::new(),
        spawns,
        floors: two_floors(),
    }
}

fn empty_bundle() -> ContentBundle {
    bundle(vec![("player".into(), player(20))], SpawnTables::default())
}

#[test]
fn walking_costs_one_tick_per_step() {
    let mut session = Session::from_content(empty_bundle(), 1, 16).unwrap();
    assert_eq!(session.floor_name(), "upper");
    assert_eq!(session.player().unwrap().position, Position::new(1, 1));

    let report = session
        .submit(Command::bump(EntityId::PLAYER, Direction::East))
        .unwrap();
    assert!(report.consumed_turn);
    assert_eq!(report.ticks, 1);
    assert_eq!(session.player().unwrap().position, Position::new(2, 1));
    assert_eq!(session.state().turn.turn, 1);
}

#[test]
fn walking_into_a_wall_costs_nothing() {
    let mut session = Session::from_content(empty_bundle(), 1, 16).unwrap();
    let report = session
        .submit(Command::bump(EntityId::PLAYER, Direction::North))
        .unwrap();
    assert!(!report.consumed_turn);
    assert_eq!(report.ticks, 0);
    assert_eq!(session.state().turn.turn, 0);
    assert!(report.failure.is_some());
    assert_eq!(session.messages().len(), 1);
}

#[test]
fn stairs_swap_floors_both_ways() {
    let mut session = Session::from_content(empty_bundle(), 5, 16).unwrap();
    for _ in 0..2 {
        session
            .submit(Command::bump(EntityId::PLAYER, Direction::East))
            .unwrap();
    }
    assert_eq!(session.player().unwrap().position, Position::new(3, 1));

    let report = session
        .submit(Command::take_stairs(EntityId::PLAYER))
        .unwrap();
    let change = report.floor_change.unwrap();
    assert_eq!(change.to_depth, 2);
    assert_eq!(change.direction, StairDirection::Down);
    assert_eq!(session.depth(), 2);
    assert_eq!(session.floor_name(), "lower");
    assert_eq!(session.player().unwrap().position, Position::new(1, 1));
    assert!(session.state().world.pending_floor.is_none());
    assert!(session.state().world.is_visible(Position::new(2, 1)));

    let report = session
        .submit(Command::take_stairs(EntityId::PLAYER))
        .unwrap();
    assert_eq!(report.floor_change.map(|change| change.to_depth), Some(1));
    assert_eq!(session.floor_name(), "upper");
    assert_eq!(session.player().unwrap().position, Position::new(3, 1));
}

#[test]
fn stairs_need_a_staircase() {
    let mut session = Session::from_content(empty_bundle(), 5, 16).unwrap();
    let report = session
        .submit(Command::take_stairs(EntityId::PLAYER))
        .unwrap();
    assert!(report.floor_change.is_none());
    let failure = report.failure.unwrap();
    assert_eq!(failure.error, ActionError::NoStairsHere);
    assert_eq!(session.depth(), 1);
}

#[test]
fn a_hunter_kills_a_frail_player_and_the_game_ends() {
    let brute = ActorTemplate::builder("brute", 'B')
        .hp(50)
        .power(40)
        .attacks(vec![DiceSpec::new(2, 6)])
        .behavior(AiBehavior::Approach)
        .build();
    let spawns = SpawnTables {
        monsters: vec![SpawnEntry {
            key: "brute".into(),
            weight: 1,
            min_depth: 1,
            max_depth: None,
        }],
        monsters_per_floor: 1,
        ..SpawnTables::default()
    };
    let content = bundle(
        vec![("player".into(), player(1)), ("brute".into(), brute)],
        spawns,
    );
    let mut session = Session::from_content(content, 9, 64).unwrap();
    assert_eq!(session.state().entities.living_actor_ids().len(), 2);

    let mut died = false;
    for _ in 0..200 {
        let report = session.submit(Command::wait(EntityId::PLAYER)).unwrap();
        if report.player_dead {
            died = true;
            break;
        }
    }
    assert!(died);
    assert!(session.is_over());

    let error = session
        .submit(Command::wait(EntityId::PLAYER))
        .unwrap_err();
    assert!(error.is_game_over());
}

#[test]
fn the_same_seed_replays_the_same_game() {
    let script = [
        Direction::East,
        Direction::South,
        Direction::East,
        Direction::East,
        Direction::North,
        Direction::Here,
        Direction::West,
        Direction::SouthEast,
    ];
    let play = || {
        let mut session = Session::load(&SessionConfig {
            seed: 77,
            ..SessionConfig::default()
        })
        .unwrap();
        for direction in script.iter().cycle().take(40) {
            if session.is_over() {
                break;
            }
            session
                .submit(Command::bump(EntityId::PLAYER, *direction))
                .unwrap();
        }
        let log: Vec<String> = session.messages().iter().map(ToString::to_string).collect();
        (session.state().clone(), log)
    };

    let (first_state, first_log) = play();
    let (second_state, second_log) = play();
    assert_eq!(first_state, second_state);
    assert_eq!(first_log, second_log);
}

#[test]
fn different_seeds_populate_differently() {
    let positions = |seed| {
        let session = Session::load(&SessionConfig {
            seed,
            ..SessionConfig::default()
        })
        .unwrap();
        session
            .state()
            .entities
            .actors()
            .map(|actor| actor.position)
            .collect::<Vec<_>>()
    };
    let seeds = [1, 2, 3, 4];
    let layouts: Vec<_> = seeds.iter().map(|seed| positions(*seed)).collect();
    assert!(layouts.windows(2).any(|pair| pair[0] != pair[1]));
}

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let write = |name: &str, content: &str| std::fs::write(dir.path().join(name), content).unwrap();
    write("config.toml", "spawn_chance = 0\n");
    write(
        "actors.ron",
        r#"[("player", (name: "you", glyph: '@', max_hp: 12, ac: 7, attacks: [(count: 1, sides: 4)]))]"#,
    );
    write("items.ron", "(items: [])");
    write("spawns.ron", "(monsters: [])");
    std::fs::create_dir(dir.path().join("floors")).unwrap();
    write("floors/cellar.ron", r#"(name: "cellar", rows: ["<...>"], start: Some((1, 0)))"#);
    dir
}

#[test]
fn a_session_loads_from_a_data_directory() {
    let dir = data_dir();
    let config = SessionConfig {
        data_dir: dir.path().to_path_buf(),
        seed: 5,
        message_capacity: 8,
    };
    let mut session = Session::load(&config).unwrap();
    assert_eq!(session.floor_name(), "cellar");
    assert_eq!(session.depth(), 1);
    assert_eq!(session.player().unwrap().position, Position::new(1, 0));

    session
        .submit(Command::bump(EntityId::PLAYER, Direction::East))
        .unwrap();
    assert_eq!(session.player().unwrap().position, Position::new(2, 0));
}

#[test]
fn an_empty_data_directory_is_a_content_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = SessionConfig {
        data_dir: dir.path().to_path_buf(),
        ..SessionConfig::default()
    };
    assert!(matches!(Session::load(&config), Err(RuntimeError::Content(_))));
}
