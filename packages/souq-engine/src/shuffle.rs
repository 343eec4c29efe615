//! Windowed fairness shuffle. The ranked feed is cut into fixed-size windows
//! and each window is shuffled in place, so exposure varies between refreshes
//! while no listing moves farther than one window from its ranked position.

use rand::{Rng, seq::SliceRandom};

/// Shuffles each `window_size` chunk of `items` independently, including the
/// short tail chunk. A window size of zero or one leaves the order untouched.
pub fn windowed_shuffle<T, R>(items: &mut [T], window_size: usize, rng: &mut R)
where
	R: Rng + ?Sized,
{
	if window_size < 2 {
		return;
	}

	for window in items.chunks_mut(window_size) {
		window.shuffle(rng);
	}
}
