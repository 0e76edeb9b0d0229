use cgmath::{Point3, Rad};
use voxel_world::{
    BlockEdit, BlockType, Camera, EngineConfig, EngineState, PlayerAction, PlayerController,
    PlayerState, World,
};

const DT: f32 = 1.0 / 60.0;

fn flat_world() -> World {
    let mut world = World::new(EngineConfig::default().world);
    world.stream_chunks(Point3::new(8.0, 3.0, 8.0));
    world
}

fn step(
    controller: &PlayerController,
    player: &mut PlayerState,
    world: &World,
    camera: &Camera,
    actions: &PlayerAction,
    ticks: usize,
) {
    for _ in 0..ticks {
        controller.update_player(player, world, camera, actions, DT);
    }
}

#[test]
fn sprinting_covers_more_ground() {
    let world = flat_world();
    let controller = PlayerController::new(EngineConfig::default().player);
    let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));

    let mut walker = PlayerState::new(Point3::new(4.5, 2.001, -20.5));
    let mut sprinter = walker;
    let walk = PlayerAction {
        move_forward: 1.0,
        ..PlayerAction::default()
    };
    let sprint = PlayerAction {
        sprint: true,
        ..walk.clone()
    };

    step(&controller, &mut walker, &world, &camera, &walk, 30);
    step(&controller, &mut sprinter, &world, &camera, &sprint, 30);
    let walked = walker.position.z + 20.5;
    let sprinted = sprinter.position.z + 20.5;
    assert!((walked - 3.0).abs() < 1e-3);
    assert!((sprinted - 3.0 * 1.7).abs() < 1e-3);
}

#[test]
fn diagonal_input_is_normalised() {
    let world = flat_world();
    let controller = PlayerController::new(EngineConfig::default().player);
    let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
    let mut player = PlayerState::new(Point3::new(8.5, 2.001, 8.5));

    let diagonal = PlayerAction {
        move_forward: 1.0,
        move_right: 1.0,
        ..PlayerAction::default()
    };
    step(&controller, &mut player, &world, &camera, &diagonal, 1);
    let horizontal = (player.velocity.x.powi(2) + player.velocity.z.powi(2)).sqrt();
    assert!((horizontal - 6.0).abs() < 1e-4);
    assert!(player.velocity.x > 0.0 && player.velocity.z > 0.0);
}

#[test]
fn player_walks_into_a_hole_and_cannot_walk_out() {
    let mut world = flat_world();
    for z in 10..13 {
        for y in 1..4 {
            world.set_block(8, y, z, BlockType::AIR);
        }
    }
    world.set_block(8, 2, 13, BlockType::STONE);
    world.set_block(8, 3, 13, BlockType::STONE);

    let controller = PlayerController::new(EngineConfig::default().player);
    let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
    let mut player = PlayerState::new(Point3::new(8.5, 2.001, 8.5));
    let forward = PlayerAction {
        move_forward: 1.0,
        ..PlayerAction::default()
    };

    step(&controller, &mut player, &world, &camera, &forward, 90);
    assert!(player.on_ground);
    assert!((player.position.y - 1.001).abs() < 1e-2);
    assert!(player.position.z < 13.0);
}

#[test]
fn placing_into_the_player_is_refused() {
    let mut config = EngineConfig::default();
    config.player.spawn_position = [8.5, 4.0, 8.5];
    let mut engine = EngineState::new(config);
    for _ in 0..60 {
        engine.tick(DT, &PlayerAction::default());
    }

    let dig = PlayerAction {
        look_delta: (0.0, 10_000.0),
        break_block: true,
        ..PlayerAction::default()
    };
    assert_eq!(
        engine.tick(DT, &dig).edit,
        Some(BlockEdit::Broken {
            cell: Point3::new(8, 1, 8),
            block: BlockType::GRASS
        })
    );

    for _ in 0..30 {
        engine.tick(DT, &PlayerAction::default());
    }
    assert!(engine.player().on_ground);
    assert!((engine.player().position.y - 1.001).abs() < 1e-2);

    let hover = engine.hover().expect("hole floor in reach");
    assert_eq!(hover.block, Point3::new(8, 0, 8));
    assert_eq!(hover.previous, Point3::new(8, 1, 8));

    let place = PlayerAction {
        place_block: true,
        ..PlayerAction::default()
    };
    assert_eq!(engine.tick(DT, &place).edit, None);
    assert_eq!(engine.world().get_block(8, 1, 8), BlockType::AIR);
}
