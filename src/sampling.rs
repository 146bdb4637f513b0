use crate::template::SizeRange;

use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

/// The pseudorandom stream for one generation run. Concurrent runs must each build their own.
pub fn small_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Draws from the half-open `range`. Callers validate the range first.
pub fn sample_size<R: Rng>(rng: &mut R, range: &SizeRange) -> i32 {
    Uniform::from(range.min..range.max).sample(rng)
}

/// Draws from `[min, max]`.
pub fn sample_inclusive<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    Uniform::from(min..=max).sample(rng)
}

/// Origin along one axis for a room of `room_dim` inside a level of `level_dim`, so the room sits
/// in the middle half of the level. A room wider than half the level starts at the quarter line,
/// pulled back far enough to keep it off the level border.
///
/// `room_dim` must be at most `level_dim - 2`.
pub fn sample_centered_origin<R: Rng>(rng: &mut R, level_dim: i32, room_dim: i32) -> i32 {
    let available = (level_dim / 2 - room_dim).max(1);
    let origin = Uniform::from(0..available).sample(rng) + level_dim / 4;

    origin.min(level_dim - 1 - room_dim).max(1)
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
