//! Built-in arena layout used when no `--map` file is given.
//!
//! `#` is a wall, `.` is floor. Row index is Z, column index is X; with the
//! default origin the player spawns in column 16, row 6.

pub const DEFAULT_ARENA: [&str; 16] = [
    "################################",
    "#..............................#",
    "#...##.....................##..#",
    "#...##.....................##..#",
    "#..............................#",
    "#.........#..........#.........#",
    "#.........#..........#.........#",
    "#.........####....####.........#",
    "#..............................#",
    "#..............................#",
    "#....###..............###......#",
    "#..............................#",
    "#..............##..............#",
    "#..............##..............#",
    "#..............................#",
    "################################",
];

/// Split a text layout into rows, dropping blank lines and trailing spaces.
pub fn parse_layout(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
