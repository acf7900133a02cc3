
use super::Rgb;



pub const MAX_COLORS: usize = 256;


/// Palette positions that at least one pixel of the current frame maps to.
#[derive(Clone, Debug)]
pub struct UsedEntrySet {
    used: [bool; MAX_COLORS],
}


impl UsedEntrySet {
    pub fn new() -> Self {
        UsedEntrySet { used: [false; MAX_COLORS] }
    }

    pub fn from_indices(indices: &[u8]) -> Self {
        let mut result = Self::new();
        for index in indices {
            result.mark(*index);
        }
        result
    }

    pub fn mark(&mut self, index: u8) {
        self.used[index as usize] = true;
    }

    pub fn contains(&self, index: u8) -> bool {
        self.used[index as usize]
    }

    pub fn len(&self) -> usize {
        self.used.iter().filter(|it| **it).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.used.iter().any(|it| *it)
    }
}

impl Default for UsedEntrySet {
    fn default() -> Self {
        Self::new()
    }
}


pub fn color_count(palette: &[u8]) -> usize {
    palette.len() / 3
}

/// Index of the used palette entry nearest to `color` (squared RGB distance, lowest index on ties).
pub fn closest_used(palette: &[u8], used: &UsedEntrySet, color: Rgb) -> Option<u8> {
    let mut best: Option<(u8, u32)> = None;

    for (index, entry) in palette.chunks_exact(3).enumerate().take(MAX_COLORS) {
        let index = index as u8;
        if !used.contains(index) {
            continue;
        }
        let distance = distance(color, Rgb::new(entry[0], entry[1], entry[2]));
        match best {
            Some((_, min)) if min <= distance => (),
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index)
}

fn distance(a: Rgb, b: Rgb) -> u32 {
    let d = |x: u8, y: u8| {
        let d = i32::from(x) - i32::from(y);
        (d * d) as u32
    };
    d(a.red, b.red) + d(a.green, b.green) + d(a.blue, b.blue)
}
