use crate::layout::{LayoutProvider, LayoutWord, RawLayout, RawPlacement, BLOCKED_SENTINEL};
use crate::types::{Difficulty, Orientation, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// Configuration for layout generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Side of the square working canvas; the result is cropped
    pub canvas_size: usize,
    /// Word orders tried before keeping the best layout
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            canvas_size: 48,
            max_attempts: 12,
        }
    }
}

impl GeneratorConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                canvas_size: 32,
                max_attempts: 8,
            },
            Difficulty::Normal => Self::default(),
            Difficulty::Hard => Self {
                canvas_size: 64,
                max_attempts: 20,
            },
        }
    }
}

/// Greedy crossing-word layout generator.
///
/// The first word goes across the middle of the canvas; every further word
/// must cross at least one letter already placed and may not touch another
/// word side by side. Words that do not fit are left out.
pub struct GreedyLayout {
    config: Option<GeneratorConfig>,
    rng: StdRng,
}

impl Default for GreedyLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl GreedyLayout {
    /// Create a generator sized per difficulty
    pub fn new() -> Self {
        Self {
            config: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a fixed configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config: Some(config),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Lay out `words`, keeping the attempt that places the most of them
    pub fn generate(&mut self, words: &[LayoutWord], config: &GeneratorConfig) -> RawLayout {
        let mut order: Vec<Vec<char>> = words
            .iter()
            .map(|w| w.answer.to_lowercase().chars().collect::<Vec<char>>())
            .filter(|w| !w.is_empty() && w.len() <= config.canvas_size)
            .collect();
        if order.is_empty() {
            return RawLayout::default();
        }

        // First attempt: longest words first, they give later words more to cross
        order.sort_by(|a, b| b.len().cmp(&a.len()));

        let mut best: Option<Canvas> = None;
        for attempt in 0..config.max_attempts.max(1) {
            if attempt > 0 {
                order.shuffle(&mut self.rng);
            }
            let canvas = self.attempt(&order, config.canvas_size);
            let better = match &best {
                None => true,
                Some(current) => {
                    canvas.placed.len() > current.placed.len()
                        || (canvas.placed.len() == current.placed.len()
                            && canvas.area() < current.area())
                }
            };
            if better {
                best = Some(canvas);
            }
            if best.as_ref().is_some_and(|c| c.placed.len() == order.len()) {
                break;
            }
        }

        best.map(|canvas| canvas.into_layout()).unwrap_or_default()
    }

    fn attempt(&mut self, order: &[Vec<char>], size: usize) -> Canvas {
        let mut canvas = Canvas::new(size);
        let mut iter = order.iter();

        if let Some(first) = iter.next() {
            let origin = Position::new(size / 2, (size - first.len()) / 2);
            canvas.place(first, origin, Orientation::Across);
        }

        for word in iter {
            let candidates = canvas.candidates(word);
            if let Some(&(origin, orientation)) = candidates.choose(&mut self.rng) {
                canvas.place(word, origin, orientation);
            }
        }

        canvas
    }
}

impl LayoutProvider for GreedyLayout {
    fn generate_layout(&mut self, words: &[LayoutWord], difficulty: Difficulty) -> RawLayout {
        let config = self
            .config
            .clone()
            .unwrap_or_else(|| GeneratorConfig::for_difficulty(difficulty));
        self.generate(words, &config)
    }
}

struct Placed {
    word: Vec<char>,
    origin: Position,
    orientation: Orientation,
}

/// Square working area. Each cell remembers which orientations cover it
/// so two words never overlap along the same line.
struct Canvas {
    size: usize,
    letters: Vec<Option<char>>,
    across: Vec<bool>,
    down: Vec<bool>,
    placed: Vec<Placed>,
}

impl Canvas {
    fn new(size: usize) -> Self {
        Self {
            size,
            letters: vec![None; size * size],
            across: vec![false; size * size],
            down: vec![false; size * size],
            placed: Vec::new(),
        }
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    fn letter(&self, row: isize, col: isize) -> Option<char> {
        if row < 0 || col < 0 || row as usize >= self.size || col as usize >= self.size {
            return None;
        }
        self.letters[row as usize * self.size + col as usize]
    }

    fn place(&mut self, word: &[char], origin: Position, orientation: Orientation) {
        for (i, &c) in word.iter().enumerate() {
            let idx = self.index(orientation.cell(origin, i));
            self.letters[idx] = Some(c);
            match orientation {
                Orientation::Across => self.across[idx] = true,
                Orientation::Down => self.down[idx] = true,
            }
        }
        self.placed.push(Placed {
            word: word.to_vec(),
            origin,
            orientation,
        });
    }

    /// Every legal placement of `word` crossing an existing letter
    fn candidates(&self, word: &[char]) -> Vec<(Position, Orientation)> {
        let mut found = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let Some(existing) = self.letters[row * self.size + col] else {
                    continue;
                };
                for (i, &c) in word.iter().enumerate() {
                    if c != existing {
                        continue;
                    }
                    for orientation in [Orientation::Across, Orientation::Down] {
                        let origin = match orientation {
                            Orientation::Across if col >= i => Position::new(row, col - i),
                            Orientation::Down if row >= i => Position::new(row - i, col),
                            _ => continue,
                        };
                        let candidate = (origin, orientation);
                        if !found.contains(&candidate) && self.fits(word, origin, orientation) {
                            found.push(candidate);
                        }
                    }
                }
            }
        }
        found
    }

    fn fits(&self, word: &[char], origin: Position, orientation: Orientation) -> bool {
        let last = orientation.cell(origin, word.len() - 1);
        if last.row >= self.size || last.col >= self.size {
            return false;
        }

        let (dr, dc): (isize, isize) = match orientation {
            Orientation::Across => (0, 1),
            Orientation::Down => (1, 0),
        };
        let (r0, c0) = (origin.row as isize, origin.col as isize);

        // Nothing directly before the first letter or after the last
        if self.letter(r0 - dr, c0 - dc).is_some() {
            return false;
        }
        let len = word.len() as isize;
        if self.letter(r0 + dr * len, c0 + dc * len).is_some() {
            return false;
        }

        let mut crossings = 0;
        for (i, &c) in word.iter().enumerate() {
            let (r, col) = (r0 + dr * i as isize, c0 + dc * i as isize);
            let idx = r as usize * self.size + col as usize;
            match self.letters[idx] {
                Some(existing) => {
                    let same_line = match orientation {
                        Orientation::Across => self.across[idx],
                        Orientation::Down => self.down[idx],
                    };
                    if existing != c || same_line {
                        return false;
                    }
                    crossings += 1;
                }
                None => {
                    // No side-by-side contact with a parallel neighbour
                    if self.letter(r + dc, col + dr).is_some()
                        || self.letter(r - dc, col - dr).is_some()
                    {
                        return false;
                    }
                }
            }
        }

        crossings > 0 && crossings < word.len()
    }

    /// Bounding-box area of the placed letters
    fn area(&self) -> usize {
        match self.bounds() {
            Some((top, left, bottom, right)) => (bottom - top + 1) * (right - left + 1),
            None => 0,
        }
    }

    fn bounds(&self) -> Option<(usize, usize, usize, usize)> {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for placed in &self.placed {
            let end = placed.orientation.cell(placed.origin, placed.word.len() - 1);
            bounds = Some(match bounds {
                None => (placed.origin.row, placed.origin.col, end.row, end.col),
                Some((t, l, b, r)) => (
                    t.min(placed.origin.row),
                    l.min(placed.origin.col),
                    b.max(end.row),
                    r.max(end.col),
                ),
            });
        }
        bounds
    }

    /// Crop to the bounding box and emit provider records, numbered in
    /// reading order with 1-based coordinates.
    fn into_layout(self) -> RawLayout {
        let Some((top, left, bottom, right)) = self.bounds() else {
            return RawLayout::default();
        };

        let table = (top..=bottom)
            .map(|row| {
                (left..=right)
                    .map(|col| match self.letters[row * self.size + col] {
                        Some(c) => c.to_string(),
                        None => BLOCKED_SENTINEL.to_string(),
                    })
                    .collect()
            })
            .collect();

        let mut numbers: BTreeMap<Position, u32> = BTreeMap::new();
        for placed in &self.placed {
            numbers.insert(placed.origin, 0);
        }
        for (n, number) in numbers.values_mut().enumerate() {
            *number = n as u32 + 1;
        }

        let result = self
            .placed
            .iter()
            .map(|placed| RawPlacement {
                answer: placed.word.iter().collect(),
                startx: placed.origin.col - left + 1,
                starty: placed.origin.row - top + 1,
                orientation: placed.orientation.as_str().to_string(),
                position: numbers.get(&placed.origin).copied(),
            })
            .collect();

        RawLayout { table, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<LayoutWord> {
        list.iter().map(|w| LayoutWord::new(w)).collect()
    }

    #[test]
    fn test_single_word() {
        let mut generator = GreedyLayout::with_seed(1);
        let layout = generator.generate_layout(&words(&["cat"]), Difficulty::Easy);
        assert_eq!(layout.table, vec![vec!["c", "a", "t"]]);
        assert_eq!(layout.result.len(), 1);
        assert_eq!(layout.result[0].startx, 1);
        assert_eq!(layout.result[0].starty, 1);
        assert_eq!(layout.result[0].position, Some(1));
    }

    #[test]
    fn test_crossing_words_agree_with_table() {
        let mut generator = GreedyLayout::with_seed(42);
        let layout =
            generator.generate_layout(&words(&["planet", "apple", "lemon", "tent"]), Difficulty::Easy);
        assert!(layout.result.len() >= 2);

        for record in &layout.result {
            let placement = record
                .to_placement(layout.rows(), layout.cols())
                .expect("generated record should be valid");
            for (pos, letter) in placement.letters() {
                assert_eq!(layout.letter_at(pos), Some(letter));
            }
        }
    }

    #[test]
    fn test_unplaceable_word_is_skipped() {
        let mut generator = GreedyLayout::with_seed(3);
        let layout = generator.generate_layout(&words(&["abc", "xyz"]), Difficulty::Easy);
        assert_eq!(layout.result.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let mut generator = GreedyLayout::with_seed(3);
        let layout = generator.generate_layout(&[], Difficulty::Hard);
        assert!(layout.table.is_empty());
        assert!(layout.result.is_empty());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let list = words(&["castle", "forest", "river", "stone", "rocket"]);
        let a = GreedyLayout::with_seed(11).generate_layout(&list, Difficulty::Normal);
        let b = GreedyLayout::with_seed(11).generate_layout(&list, Difficulty::Normal);
        assert_eq!(a, b);
    }
}
