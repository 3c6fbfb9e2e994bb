//! Delivered words and the corruption applied to them by hostile arrivals.

use rand::Rng;

/// Fallback symbol used if the corruption alphabet is empty.
const FALLBACK_SYMBOL: char = '#';

/// A word that reached the hub, possibly overwritten since.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DeliveredEntry {
    pub(crate) text: String,
    pub(crate) corrupted: bool,
}

/// Ordered words that completed the delivery route.
#[derive(Clone, Debug, Default)]
pub(crate) struct DeliveredData {
    entries: Vec<DeliveredEntry>,
}

impl DeliveredData {
    /// Appends a delivered word and returns its position.
    pub(crate) fn push(&mut self, word: String) -> usize {
        self.entries.push(DeliveredEntry {
            text: word,
            corrupted: false,
        });
        self.entries.len() - 1
    }

    /// Overwrites one uniformly chosen entry with a same-length corruption string.
    ///
    /// Returns the position of the overwritten entry, or `None` when nothing
    /// has been delivered yet.
    pub(crate) fn corrupt_random<R>(&mut self, rng: &mut R, symbols: &[char]) -> Option<usize>
    where
        R: Rng + ?Sized,
    {
        if self.entries.is_empty() {
            return None;
        }

        let index = rng.gen_range(0..self.entries.len());
        let entry = &mut self.entries[index];
        let length = entry.text.chars().count();
        entry.text = corruption_string(length, symbols, rng);
        entry.corrupted = true;
        Some(index)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn corrupted(&self) -> usize {
        self.entries.iter().filter(|entry| entry.corrupted).count()
    }

    pub(crate) fn entries(&self) -> &[DeliveredEntry] {
        &self.entries
    }

    /// Delivered entries joined by single spaces.
    pub(crate) fn join(&self) -> String {
        let words: Vec<&str> = self.entries.iter().map(|entry| entry.text.as_str()).collect();
        words.join(" ")
    }
}

fn corruption_string<R>(length: usize, symbols: &[char], rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    (0..length)
        .map(|_| {
            if symbols.is_empty() {
                FALLBACK_SYMBOL
            } else {
                symbols[rng.gen_range(0..symbols.len())]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SYMBOLS: [char; 4] = ['#', '@', '$', '%'];

    #[test]
    fn corruption_preserves_length_and_uses_alphabet() {
        let mut data = DeliveredData::default();
        let _ = data.push("alpha".to_owned());
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let index = data.corrupt_random(&mut rng, &SYMBOLS);

        assert_eq!(index, Some(0));
        assert_eq!(data.len(), 1);
        let entry = &data.entries()[0];
        assert!(entry.corrupted);
        assert_eq!(entry.text.chars().count(), 5);
        assert!(entry.text.chars().all(|symbol| SYMBOLS.contains(&symbol)));
    }

    #[test]
    fn corruption_counts_characters_not_bytes() {
        let mut data = DeliveredData::default();
        let _ = data.push("naïve".to_owned());
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let _ = data.corrupt_random(&mut rng, &SYMBOLS);

        assert_eq!(data.entries()[0].text.chars().count(), 5);
    }

    #[test]
    fn corruption_without_deliveries_is_a_no_op() {
        let mut data = DeliveredData::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert_eq!(data.corrupt_random(&mut rng, &SYMBOLS), None);
        assert_eq!(data.len(), 0);
    }

    #[test]
    fn join_uses_single_spaces() {
        let mut data = DeliveredData::default();
        let _ = data.push("one".to_owned());
        let _ = data.push("two".to_owned());
        assert_eq!(data.join(), "one two");
        assert_eq!(data.corrupted(), 0);
    }

    #[test]
    fn empty_alphabet_falls_back_to_a_fixed_symbol() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(corruption_string(3, &[], &mut rng), "###");
    }
}
