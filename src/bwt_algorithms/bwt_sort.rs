use log::{debug, info};

use crate::error::{Error, Result};
use crate::tools::symbol_map::{compare_rows, sort_key, SENTINEL};

/*
The forward transform never builds the rotation matrix. Because the sentinel occurs exactly
once and sorts below everything, comparing two rotations gives the same answer as comparing
the two suffixes that start at the same offsets: one of them reaches the sentinel first and
the comparison ends there. So we sort an index of start offsets and only materialize a row
when somebody asks to see it.
*/

/// Uppercase the sequence, validate it and append the sentinel.
fn terminate(sequence: &str) -> Result<Vec<char>> {
    let upper = sequence.to_uppercase();
    if upper.is_empty() {
        return Err(Error::invalid("cannot transform an empty sequence"));
    }
    if let Some(pos) = upper.chars().position(|c| c == SENTINEL) {
        return Err(Error::invalid(format!(
            "sequence contains the sentinel '{}' at position {}",
            SENTINEL, pos
        )));
    }
    let mut text: Vec<char> = upper.chars().collect();
    text.push(SENTINEL);
    Ok(text)
}

/// The rotation matrix of a sentinel-terminated sequence, held as the terminated text plus
/// the sorted order of the rotation start offsets. Rows are produced on demand, and every
/// call to `steps` or `sorted_rows` starts a fresh pass.
#[derive(Debug, Clone)]
pub struct Rotations {
    text: Vec<char>,
    index: Vec<usize>,
}

impl Rotations {
    /// Validate the sequence and sort its rotations.
    pub fn new(sequence: &str) -> Result<Self> {
        let text = terminate(sequence)?;
        let mut index = (0..text.len()).collect::<Vec<usize>>();
        index.sort_unstable_by(|&a, &b| compare_rows(&text[a..], &text[b..]));
        Ok(Self { text, index })
    }

    /// Number of rows (and columns): sequence length + 1.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Never true, a terminated sequence holds at least the sentinel.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The rotation that starts at `offset` of the terminated text.
    fn row(&self, offset: usize) -> String {
        self.text[offset..]
            .iter()
            .chain(self.text[..offset].iter())
            .collect()
    }

    /// Rows in the order they are generated: the terminated sequence first, then each row
    /// made by moving the last character of the previous row to the front.
    pub fn steps(&self) -> impl Iterator<Item = String> + '_ {
        let len = self.text.len();
        (0..len).map(move |k| self.row((len - k) % len))
    }

    /// Rows of the sorted matrix, top to bottom.
    pub fn sorted_rows(&self) -> impl Iterator<Item = String> + '_ {
        self.index.iter().map(move |&offset| self.row(offset))
    }

    /// Last column of the sorted matrix.
    pub fn bwt(&self) -> String {
        let len = self.text.len();
        self.index
            .iter()
            .map(|&offset| self.text[(offset + len - 1) % len])
            .collect()
    }
}

/// Burrows-Wheeler Transform of a nucleotide sequence. The input is uppercased, must be
/// non-empty and must not contain the sentinel. The result is one character longer than the
/// input.
pub fn bwt_encode(sequence: &str) -> Result<String> {
    let rotations = Rotations::new(sequence)?;
    let bwt = rotations.bwt();
    info!("Transformed {} characters.", rotations.len() - 1);
    debug!("BWT is: {}", bwt);
    Ok(bwt)
}

/// Reverse a Burrows-Wheeler Transform.
///
/// This walks the last-to-first mapping instead of rebuilding the matrix column by column,
/// which gives the same result as `Reconstruction::finish` for every real transform in
/// linear space. A string that is not the transform of anything (the mapping closes a cycle
/// before visiting every row) is reported as corrupt.
pub fn bwt_decode(bwt: &str) -> Result<String> {
    let last: Vec<char> = bwt.chars().collect();
    if last.is_empty() {
        return Err(Error::invalid("cannot reverse an empty transform"));
    }
    let key = match sentinel_positions(&last).as_slice() {
        [key] => *key,
        found => {
            return Err(Error::corrupt(format!(
                "transform must contain exactly one '{}', found {}",
                SENTINEL,
                found.len()
            )))
        }
    };

    // Stable sort of the last column gives the first column. order[j] is the position in the
    // last column of the character that sits in row j of the first column.
    let mut order = (0..last.len()).collect::<Vec<usize>>();
    order.sort_by(|&a, &b| sort_key(last[a]).cmp(&sort_key(last[b])));

    let mut sequence = String::with_capacity(last.len() - 1);
    let mut row = order[key];
    for _ in 1..last.len() {
        if last[row] == SENTINEL {
            return Err(Error::corrupt(
                "transform does not describe a single rotation cycle",
            ));
        }
        sequence.push(last[row]);
        row = order[row];
    }
    if last[row] != SENTINEL {
        return Err(Error::corrupt("transform does not end its cycle on the sentinel"));
    }
    info!("Reconstructed {} characters.", sequence.chars().count());
    Ok(sequence)
}

fn sentinel_positions(chars: &[char]) -> Vec<usize> {
    chars
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c == SENTINEL)
        .map(|(i, _)| i)
        .collect()
}

/// Column-by-column reconstruction of a transform: start with the transform as a column of
/// single characters, then repeatedly prepend it to the rows and re-sort. Each round is
/// available as a step for display.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    last: Vec<char>,
}

impl Reconstruction {
    pub fn new(bwt: &str) -> Result<Self> {
        if bwt.is_empty() {
            return Err(Error::invalid("cannot reverse an empty transform"));
        }
        Ok(Self {
            last: bwt.chars().collect(),
        })
    }

    /// A fresh pass over the rounds. Yields one sorted set of rows per round: the initial
    /// single-character sort, then each of the n-1 prepend-and-sort rounds.
    pub fn steps(&self) -> ReconstructionSteps<'_> {
        ReconstructionSteps {
            last: &self.last,
            rows: Vec::with_capacity(self.last.len()),
            round: 0,
        }
    }

    /// Run every round and return the row that ends in the sentinel, without the sentinel.
    pub fn finish(&self) -> Result<String> {
        let mut steps = self.steps();
        while steps.advance() {}

        let mut ends_in_sentinel = steps
            .rows
            .iter()
            .filter(|row| row.last() == Some(&SENTINEL));
        match (ends_in_sentinel.next(), ends_in_sentinel.next()) {
            (Some(row), None) => Ok(row[..row.len() - 1].iter().collect()),
            (None, _) => Err(Error::corrupt("no reconstructed row ends in the sentinel")),
            (Some(_), Some(_)) => Err(Error::corrupt(
                "more than one reconstructed row ends in the sentinel",
            )),
        }
    }
}

/// Iterator over the rounds of a `Reconstruction`.
#[derive(Debug, Clone)]
pub struct ReconstructionSteps<'a> {
    last: &'a [char],
    rows: Vec<Vec<char>>,
    round: usize,
}

impl ReconstructionSteps<'_> {
    /// Run the next round. Returns false once all rounds are done.
    fn advance(&mut self) -> bool {
        if self.round == self.last.len() {
            return false;
        }
        if self.round == 0 {
            self.rows = self.last.iter().map(|&c| vec![c]).collect();
        } else {
            for (row, &c) in self.rows.iter_mut().zip(self.last) {
                row.insert(0, c);
            }
        }
        self.rows.sort_by(|a, b| compare_rows(a, b));
        self.round += 1;
        true
    }
}

impl Iterator for ReconstructionSteps<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.advance() {
            return None;
        }
        Some(self.rows.iter().map(|row| row.iter().collect()).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.last.len() - self.round;
        (left, Some(left))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encode_acgt_test() {
        assert_eq!(bwt_encode("ACGT").unwrap(), "T$ACG");
        assert_eq!(bwt_encode("acgt").unwrap(), "T$ACG");
    }

    #[test]
    fn encode_single_symbol_test() {
        // Sorted matrix is "$A", "A$"
        let rot = Rotations::new("A").unwrap();
        assert_eq!(rot.sorted_rows().collect::<Vec<_>>(), vec!["$A", "A$"]);
        assert_eq!(rot.bwt(), "A$");
        assert_eq!(bwt_decode("A$").unwrap(), "A");
    }

    #[test]
    fn sorted_rows_test() {
        let rot = Rotations::new("ACGT").unwrap();
        assert_eq!(
            rot.sorted_rows().collect::<Vec<_>>(),
            vec!["$ACGT", "ACGT$", "CGT$A", "GT$AC", "T$ACG"]
        );
    }

    #[test]
    fn steps_test() {
        let rot = Rotations::new("ACGT").unwrap();
        let steps = rot.steps().collect::<Vec<_>>();
        assert_eq!(steps, vec!["ACGT$", "$ACGT", "T$ACG", "GT$AC", "CGT$A"]);
        // Restartable
        assert_eq!(rot.steps().collect::<Vec<_>>(), steps);
    }

    #[test]
    fn sentinel_below_low_characters_test() {
        // ' ' has a lower code point than '$' but must still sort after it.
        let rot = Rotations::new("A A").unwrap();
        assert_eq!(rot.sorted_rows().next().unwrap(), "$A A");
        assert_eq!(bwt_decode(&rot.bwt()).unwrap(), "A A");
    }

    #[test]
    fn encode_rejects_test() {
        assert!(matches!(bwt_encode(""), Err(Error::InvalidInput(_))));
        assert!(matches!(bwt_encode("AC$GT"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn decode_acgt_test() {
        assert_eq!(bwt_decode("T$ACG").unwrap(), "ACGT");
    }

    #[test]
    fn decode_rejects_test() {
        assert!(matches!(bwt_decode(""), Err(Error::InvalidInput(_))));
        assert!(matches!(bwt_decode("TACG"), Err(Error::CorruptInput(_))));
        assert!(matches!(bwt_decode("T$A$G"), Err(Error::CorruptInput(_))));
        // "$A" and "$AC" close a cycle early
        assert!(matches!(bwt_decode("$A"), Err(Error::CorruptInput(_))));
        assert!(matches!(bwt_decode("$AC"), Err(Error::CorruptInput(_))));
    }

    #[test]
    fn decode_sentinel_only_test() {
        assert_eq!(bwt_decode("$").unwrap(), "");
        assert_eq!(Reconstruction::new("$").unwrap().finish().unwrap(), "");
    }

    #[test]
    fn reconstruction_steps_test() {
        let recon = Reconstruction::new("T$ACG").unwrap();
        let steps = recon.steps().collect::<Vec<_>>();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0], vec!["$", "A", "C", "G", "T"]);
        assert_eq!(steps[1], vec!["$A", "AC", "CG", "GT", "T$"]);
        assert_eq!(steps[4], vec!["$ACGT", "ACGT$", "CGT$A", "GT$AC", "T$ACG"]);
        assert_eq!(recon.finish().unwrap(), "ACGT");
        // Restartable
        assert_eq!(recon.steps().collect::<Vec<_>>(), steps);
    }

    #[test]
    fn reconstruction_rejects_test() {
        assert!(matches!(Reconstruction::new(""), Err(Error::InvalidInput(_))));
        let none = Reconstruction::new("TACG").unwrap();
        assert!(matches!(none.finish(), Err(Error::CorruptInput(_))));
        let two = Reconstruction::new("T$$CG").unwrap();
        assert!(matches!(two.finish(), Err(Error::CorruptInput(_))));
    }

    proptest! {
        #[test]
        fn round_trip_property(seq in "[ACGTNacgtn]{1,60}") {
            let bwt = bwt_encode(&seq)?;
            prop_assert_eq!(bwt.chars().count(), seq.chars().count() + 1);
            prop_assert_eq!(bwt_decode(&bwt)?, seq.to_uppercase());
        }

        #[test]
        fn round_trip_printable_property(seq in "[ -#%-~]{1,30}") {
            let bwt = bwt_encode(&seq)?;
            prop_assert_eq!(bwt_decode(&bwt)?, seq.to_uppercase());
        }

        #[test]
        fn reconstruction_agrees_property(seq in "[ACGTN]{1,24}") {
            let bwt = bwt_encode(&seq)?;
            let recon = Reconstruction::new(&bwt)?;
            prop_assert_eq!(recon.finish()?, bwt_decode(&bwt)?);
            let last_round = recon.steps().last().unwrap();
            let sorted = Rotations::new(&seq)?.sorted_rows().collect::<Vec<_>>();
            prop_assert_eq!(last_round, sorted);
        }
    }
}
