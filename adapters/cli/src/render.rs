use dungeon_crawler_core::{Coordinate, EnemyType};
use dungeon_crawler_world::{query, World};

const WALL: char = '#';
const FLOOR: char = '.';
const ITEM: char = '!';
const EXIT: char = '>';
const PLAYER: char = '@';

/// Draws the dungeon as text, one line per grid row.
///
/// Later layers win when they share a cell: items, then the exit, then
/// enemies, then the player.
pub(crate) fn render_ascii(world: &World) -> String {
    let dungeon = query::dungeon(world);
    let grid = dungeon.grid();
    let width = grid.width() as usize;
    let mut canvas: Vec<Vec<char>> = (0..grid.height() as i32)
        .map(|y| {
            (0..grid.width() as i32)
                .map(|x| {
                    if grid.is_passable(Coordinate::new(x, y)) {
                        FLOOR
                    } else {
                        WALL
                    }
                })
                .collect()
        })
        .collect();

    let mut plot = |cell: Coordinate, glyph: char| {
        if let (Ok(x), Ok(y)) = (usize::try_from(cell.x()), usize::try_from(cell.y())) {
            if let Some(slot) = canvas.get_mut(y).and_then(|row| row.get_mut(x)) {
                *slot = glyph;
            }
        }
    };

    for item in dungeon.rooms().iter().flat_map(|room| room.items()) {
        plot(item.position(), ITEM);
    }
    plot(dungeon.exit(), EXIT);
    for enemy in query::enemy_view(world).iter() {
        plot(enemy.position, enemy_glyph(enemy.kind));
    }
    plot(query::player(world).position, PLAYER);

    let mut out = String::with_capacity((width + 1) * canvas.len());
    for row in canvas {
        out.extend(row);
        out.push('\n');
    }
    out
}

const fn enemy_glyph(kind: EnemyType) -> char {
    match kind {
        EnemyType::Goblin => 'g',
        EnemyType::Orc => 'o',
        EnemyType::Troll => 'T',
    }
}
