use dungeon_crawler_core::{
    Coordinate, Dungeon, EnemyId, EnemySpawn, EnemyState, EnemyType, Event, Grid, Rect,
    Room, RoomId,
};
use dungeon_crawler_system_enemy_ai::{AiConfig, EnemyAi};
use dungeon_crawler_world::{self as world, query, World};

fn corridor_world(enemy_at: Coordinate) -> World {
    let bounds = Rect::new(Coordinate::new(0, 0), 12, 3);
    let dungeon = Dungeon::new(Grid::open(12, 3), vec![Room::new(RoomId::new(0), bounds)])
        .expect("room present");
    World::new(
        dungeon,
        vec![EnemySpawn {
            id: EnemyId::new(0),
            kind: EnemyType::Goblin,
            position: enemy_at,
            room: RoomId::new(0),
        }],
    )
}

fn run_ai(ai: &mut EnemyAi, world: &mut World) -> Vec<Event> {
    let mut commands = Vec::new();
    let player = query::player(world).position;
    ai.handle(
        player,
        &query::enemy_view(world),
        query::dungeon(world).grid(),
        &mut commands,
    );

    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn chasing_enemy_closes_in_one_cell_per_tick() {
    let mut world = corridor_world(Coordinate::new(10, 1));
    let mut ai = EnemyAi::new(AiConfig::default(), 7);
    let player = query::player(&world).position;
    assert_eq!(player, Coordinate::new(6, 1));

    let events = run_ai(&mut ai, &mut world);

    assert!(events.contains(&Event::EnemyStateChanged {
        enemy: EnemyId::new(0),
        from: EnemyState::Patrolling,
        to: EnemyState::Chasing,
    }));
    assert!(events.contains(&Event::EnemyMoved {
        enemy: EnemyId::new(0),
        from: Coordinate::new(10, 1),
        to: Coordinate::new(9, 1),
    }));

    let mut ticks = 1;
    while query::enemy_view(&world)
        .iter()
        .all(|enemy| enemy.position != player)
    {
        let _ = run_ai(&mut ai, &mut world);
        ticks += 1;
        assert!(ticks <= 4, "enemy failed to reach the player");
    }
    assert_eq!(ticks, 4);
}

#[test]
fn out_of_sight_enemy_never_moves() {
    let mut world = corridor_world(Coordinate::new(0, 0));
    let mut ai = EnemyAi::new(AiConfig::new(3, 0.5), 7);

    for _ in 0..10 {
        assert!(run_ai(&mut ai, &mut world).is_empty());
    }

    let enemy = query::enemy_view(&world).into_vec().remove(0);
    assert_eq!(enemy.position, Coordinate::new(0, 0));
    assert_eq!(enemy.state, EnemyState::Patrolling);
}

#[test]
fn identical_seeds_produce_identical_commands() {
    let mut first = EnemyAi::new(AiConfig::new(20, 0.5), 99);
    let mut second = EnemyAi::new(AiConfig::new(20, 0.5), 99);
    let mut first_world = corridor_world(Coordinate::new(11, 2));
    let mut second_world = corridor_world(Coordinate::new(11, 2));

    for _ in 0..6 {
        assert_eq!(
            run_ai(&mut first, &mut first_world),
            run_ai(&mut second, &mut second_world)
        );
    }
}
