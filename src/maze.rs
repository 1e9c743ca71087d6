//! Maze generation: a randomized depth-first carve over a grid of wall flags.

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

/// Wall flags for one cell. `true` means the passage in that direction is
/// blocked. Flags stay mirrored across adjacent cells: opening a passage
/// clears the flag on both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Cell {
    const WALLED: Cell = Cell {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Maze {
    pub(crate) fn fully_walled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![Cell::WALLED; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y][x]
    }

    pub(crate) fn open_between(&mut self, a: Pos, b: Pos) {
        if b.x == a.x + 1 && b.y == a.y {
            self.cells[a.y][a.x].right = false;
            self.cells[b.y][b.x].left = false;
        } else if a.x == b.x + 1 && a.y == b.y {
            self.cells[a.y][a.x].left = false;
            self.cells[b.y][b.x].right = false;
        } else if b.y == a.y + 1 && b.x == a.x {
            self.cells[a.y][a.x].bottom = false;
            self.cells[b.y][b.x].top = false;
        } else if a.y == b.y + 1 && a.x == b.x {
            self.cells[a.y][a.x].top = false;
            self.cells[b.y][b.x].bottom = false;
        }
    }
}

/// Carves a perfect maze: every cell reachable, no cycles, exactly
/// `width * height - 1` open passages. Walls toward the outside of the grid
/// are never opened.
pub fn generate(rng: &mut impl Rng, width: usize, height: usize) -> Maze {
    assert!(width > 0 && height > 0, "maze dimensions must be positive");

    let mut maze = Maze::fully_walled(width, height);
    let mut visited = vec![vec![false; width]; height];
    let mut stack = vec![Pos { x: 0, y: 0 }];
    visited[0][0] = true;

    while let Some(&pos) = stack.last() {
        let mut neighbors = Vec::new();
        if pos.y > 0 && !visited[pos.y - 1][pos.x] {
            neighbors.push(Pos {
                x: pos.x,
                y: pos.y - 1,
            });
        }
        if pos.y + 1 < height && !visited[pos.y + 1][pos.x] {
            neighbors.push(Pos {
                x: pos.x,
                y: pos.y + 1,
            });
        }
        if pos.x > 0 && !visited[pos.y][pos.x - 1] {
            neighbors.push(Pos {
                x: pos.x - 1,
                y: pos.y,
            });
        }
        if pos.x + 1 < width && !visited[pos.y][pos.x + 1] {
            neighbors.push(Pos {
                x: pos.x + 1,
                y: pos.y,
            });
        }

        if neighbors.is_empty() {
            stack.pop();
            continue;
        }

        let next = *neighbors.choose(rng).unwrap();
        maze.open_between(pos, next);
        visited[next.y][next.x] = true;
        stack.push(next);
    }

    maze
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn open_edges(maze: &Maze) -> usize {
        let mut edges = 0;
        for y in 0..maze.height() {
            for x in 0..maze.width() {
                if x + 1 < maze.width() && !maze.cell(x, y).right {
                    edges += 1;
                }
                if y + 1 < maze.height() && !maze.cell(x, y).bottom {
                    edges += 1;
                }
            }
        }
        edges
    }

    fn reachable_cells(maze: &Maze) -> usize {
        let mut seen = vec![vec![false; maze.width()]; maze.height()];
        let mut stack = vec![Pos { x: 0, y: 0 }];
        seen[0][0] = true;
        let mut count = 0;

        while let Some(pos) = stack.pop() {
            count += 1;
            let cell = maze.cell(pos.x, pos.y);
            if pos.y > 0 && !cell.top && !seen[pos.y - 1][pos.x] {
                seen[pos.y - 1][pos.x] = true;
                stack.push(Pos {
                    x: pos.x,
                    y: pos.y - 1,
                });
            }
            if pos.y + 1 < maze.height() && !cell.bottom && !seen[pos.y + 1][pos.x] {
                seen[pos.y + 1][pos.x] = true;
                stack.push(Pos {
                    x: pos.x,
                    y: pos.y + 1,
                });
            }
            if pos.x > 0 && !cell.left && !seen[pos.y][pos.x - 1] {
                seen[pos.y][pos.x - 1] = true;
                stack.push(Pos {
                    x: pos.x - 1,
                    y: pos.y,
                });
            }
            if pos.x + 1 < maze.width() && !cell.right && !seen[pos.y][pos.x + 1] {
                seen[pos.y][pos.x + 1] = true;
                stack.push(Pos {
                    x: pos.x + 1,
                    y: pos.y,
                });
            }
        }
        count
    }

    #[test]
    fn generates_a_spanning_tree() {
        let mut rng = StdRng::seed_from_u64(7);
        for (width, height) in [(1, 1), (2, 1), (1, 5), (4, 4), (10, 10), (13, 7)] {
            let maze = generate(&mut rng, width, height);
            assert_eq!(open_edges(&maze), width * height - 1);
            assert_eq!(reachable_cells(&maze), width * height);
        }
    }

    #[test]
    fn wall_flags_mirror_between_neighbors() {
        let mut rng = StdRng::seed_from_u64(11);
        let maze = generate(&mut rng, 9, 6);
        for y in 0..maze.height() {
            for x in 0..maze.width() {
                if x + 1 < maze.width() {
                    assert_eq!(maze.cell(x, y).right, maze.cell(x + 1, y).left);
                }
                if y + 1 < maze.height() {
                    assert_eq!(maze.cell(x, y).bottom, maze.cell(x, y + 1).top);
                }
            }
        }
    }

    #[test]
    fn border_walls_stay_closed() {
        let mut rng = StdRng::seed_from_u64(23);
        let maze = generate(&mut rng, 8, 8);
        for x in 0..maze.width() {
            assert!(maze.cell(x, 0).top);
            assert!(maze.cell(x, maze.height() - 1).bottom);
        }
        for y in 0..maze.height() {
            assert!(maze.cell(0, y).left);
            assert!(maze.cell(maze.width() - 1, y).right);
        }
    }

    #[test]
    fn single_cell_maze_is_fully_walled() {
        let mut rng = StdRng::seed_from_u64(1);
        let maze = generate(&mut rng, 1, 1);
        assert_eq!(maze.cell(0, 0), Cell::WALLED);
    }

    #[test]
    fn two_cell_maze_opens_the_only_edge() {
        let mut rng = StdRng::seed_from_u64(5);
        let maze = generate(&mut rng, 2, 1);
        let left = maze.cell(0, 0);
        let right = maze.cell(1, 0);
        assert!(!left.right);
        assert!(!right.left);
        assert!(left.top && left.bottom && left.left);
        assert!(right.top && right.bottom && right.right);
    }

    #[test]
    fn same_seed_reproduces_the_maze() {
        let a = generate(&mut StdRng::seed_from_u64(42), 12, 9);
        let b = generate(&mut StdRng::seed_from_u64(42), 12, 9);
        assert_eq!(a, b);

        let c = generate(&mut StdRng::seed_from_u64(43), 12, 9);
        assert_ne!(a, c);
    }
}
