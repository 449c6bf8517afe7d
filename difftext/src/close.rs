//! Close matches - "did you mean" ranking over a list of candidates.

use crate::error::DiffError;
use crate::heap::nlargest;
use crate::matcher::SequenceMatcher;

/// Default number of matches returned by [`get_close_matches`].
pub const DEFAULT_MATCH_COUNT: usize = 3;

/// Default similarity a candidate must reach.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Returns up to `n` of `possibilities` that are at least `cutoff` similar
/// to `word`, most similar first.
///
/// Similarity is the character-level [`SequenceMatcher::ratio`]. Ties are
/// ordered by the candidate itself, larger first.
///
/// # Errors
///
/// Returns [`DiffError::InvalidMatchCount`] when `n` is zero and
/// [`DiffError::InvalidCutoff`] when `cutoff` is outside `[0.0, 1.0]`.
///
/// # Example
///
/// ```
/// use difftext::get_close_matches;
///
/// let found = get_close_matches("appel", &["ape", "apple", "peach", "puppy"], 3, 0.6)?;
/// assert_eq!(found, ["apple", "ape"]);
/// # Ok::<(), difftext::DiffError>(())
/// ```
pub fn get_close_matches<'p>(
    word: &str,
    possibilities: &[&'p str],
    n: usize,
    cutoff: f64,
) -> Result<Vec<&'p str>, DiffError> {
    if n == 0 {
        return Err(DiffError::InvalidMatchCount { n });
    }
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(DiffError::InvalidCutoff { cutoff });
    }

    let word: Vec<char> = word.chars().collect();
    let candidates: Vec<Vec<char>> = possibilities.iter().map(|x| x.chars().collect()).collect();

    // The word is the indexed side so its index is built once.
    let mut matcher = SequenceMatcher::new(&[], word.as_slice());
    let mut scored = Vec::new();
    for (candidate, chars) in possibilities.iter().zip(&candidates) {
        matcher.set_seq1(chars);
        if matcher.real_quick_ratio() >= cutoff
            && matcher.quick_ratio() >= cutoff
            && matcher.ratio() >= cutoff
        {
            scored.push((matcher.ratio(), *candidate));
        }
    }

    let best = nlargest(scored, n, |x, y| {
        x.0.total_cmp(&y.0).then_with(|| x.1.cmp(y.1))
    });
    Ok(best.into_iter().map(|(_, candidate)| candidate).collect())
}
