use std::collections::HashSet;
use std::hash::Hash;

/// Emojis offered when the ranked histories come up short.
pub const FALLBACK_EMOJIS: [&str; 12] = [
    "😊", "😂", "❤️", "🙏", "😍", "🥰", "😘", "👍", "✨", "🎉", "🔥", "💕",
];

/// Glyph stored on bouquets posted without an emoji.
pub const PLACEHOLDER_EMOJI: &str = "⚪️";

/// Merges ranked sources into at most `limit` distinct values.
///
/// Sources are consumed whole in the order given, each in its own recency
/// order; they are never interleaved. Values in `excluded` are skipped
/// everywhere. If the sources run dry before `limit`, `fallback` pads the
/// result in its fixed order.
pub fn aggregate<V, S>(sources: &[S], excluded: &HashSet<V>, fallback: &[V], limit: usize) -> Vec<V>
where
    V: Eq + Hash + Clone,
    S: AsRef<[V]>,
{
    let mut merged = RecencyAggregator::new(limit);
    for source in sources {
        if merged.is_full() {
            break;
        }
        merged.extend(source.as_ref(), excluded);
    }
    merged.extend(fallback, excluded);
    merged.finish()
}

/// Incremental form of [`aggregate`], keeping first-come order.
#[derive(Debug, Clone)]
pub struct RecencyAggregator<V> {
    limit: usize,
    seen: HashSet<V>,
    output: Vec<V>,
}

impl<V: Eq + Hash + Clone> RecencyAggregator<V> {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: HashSet::with_capacity(limit),
            output: Vec::with_capacity(limit),
        }
    }

    pub fn is_full(&self) -> bool {
        self.output.len() >= self.limit
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Appends novel candidates until full. Returns how many were taken.
    pub fn extend(&mut self, candidates: &[V], excluded: &HashSet<V>) -> usize {
        let before = self.output.len();
        for candidate in candidates {
            if self.is_full() {
                break;
            }
            if excluded.contains(candidate) || self.seen.contains(candidate) {
                continue;
            }
            self.seen.insert(candidate.clone());
            self.output.push(candidate.clone());
        }
        self.output.len() - before
    }

    pub fn finish(self) -> Vec<V> {
        self.output
    }
}

/// Maps a caller-supplied signed limit onto the aggregator's domain.
pub fn clamp_limit(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}
