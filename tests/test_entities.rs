use invaders::compute::init_state;
use invaders::config::GameConfig;
use invaders::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(AlienKind::Squid, AlienKind::Squid);
    assert_ne!(AlienKind::Squid, AlienKind::Octopus);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_ne!(BeamStatus::Idle, BeamStatus::InFlight);
    assert_ne!(
        AlienStatus::Exploding { frames_left: 1 },
        AlienStatus::Exploding { frames_left: 2 }
    );
}

#[test]
fn rows_map_to_kinds_and_points() {
    assert_eq!(AlienKind::for_row(0), AlienKind::Squid);
    assert_eq!(AlienKind::for_row(1), AlienKind::Crab);
    assert_eq!(AlienKind::for_row(2), AlienKind::Crab);
    assert_eq!(AlienKind::for_row(3), AlienKind::Octopus);
    assert_eq!(AlienKind::for_row(9), AlienKind::Octopus);

    assert_eq!(AlienKind::Squid.points(), 30);
    assert_eq!(AlienKind::Crab.points(), 20);
    assert_eq!(AlienKind::Octopus.points(), 10);
}

#[test]
fn rects_follow_positions() {
    let alien = Alien {
        x: 10,
        y: 20,
        kind: AlienKind::Squid,
        status: AlienStatus::Alive,
    };
    let r = alien.rect();
    assert_eq!((r.x, r.y, r.w, r.h), (10, 20, 20, 14));
    assert_eq!((r.right(), r.bottom()), (30, 34));

    let bomb = Bomb { x: 5, y: 6 };
    assert_eq!(bomb.rect(), Rect { x: 5, y: 6, w: 10, h: 9 });
}

#[test]
fn only_alive_aliens_count_as_alive() {
    let mut alien = Alien {
        x: 0,
        y: 0,
        kind: AlienKind::Crab,
        status: AlienStatus::Alive,
    };
    assert!(alien.is_alive());
    alien.status = AlienStatus::Exploding { frames_left: 3 };
    assert!(!alien.is_alive());
    alien.status = AlienStatus::Dead;
    assert!(!alien.is_alive());
}

#[test]
fn barrier_stands_until_out_of_hits() {
    let mut barrier = Barrier {
        x: 0,
        y: 0,
        hits_left: 1,
    };
    assert!(barrier.is_standing());
    barrier.hits_left = 0;
    assert!(!barrier.is_standing());
}

#[test]
fn default_input_presses_nothing() {
    let input = FrameInput::default();
    assert!(!(input.left || input.right || input.up || input.down));
    assert!(!(input.fire || input.pause || input.quit || input.restart));
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(GameConfig::default());
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.cannon.x = 99;
    cloned.score = 999;
    cloned.aliens.clear();
    cloned.bombs.push(Bomb { x: 5, y: 5 });

    assert_eq!(original.cannon.x, 50);
    assert_eq!(original.score, 0);
    assert_eq!(original.aliens.len(), 60);
    assert!(original.bombs.is_empty());
}

#[test]
fn alive_aliens_skips_the_fallen() {
    let mut s = init_state(GameConfig::default());
    s.aliens[0].status = AlienStatus::Dead;
    s.aliens[1].status = AlienStatus::Exploding { frames_left: 2 };
    assert_eq!(s.alive_aliens().count(), 58);
}
