//! # Reorder and Join
//!
//! A sequence labeler emits street names and street numbers as two separate
//! lists, which loses their interleaving. [`reorder_and_join`] restores it by
//! walking a reference address and picking, word by word, the words that
//! appear in either list.
//!
//! ```rust
//! use geoparse_core::reorder::reorder_and_join;
//!
//! let joined = reorder_and_join(
//!     &["Μελισίων", "Μουργκάνας", "Μαρούσι"],
//!     &["&", "18", "1"],
//!     "Μελισίων 18 & Μουργκάνας 1 Μαρούσι",
//! );
//! assert_eq!(joined, "Μελισίων 18 & Μουργκάνας 1 Μαρούσι");
//! ```

/// Joins the labeled names and numbers in the order they occur in `reference`.
///
/// Each list element is consumed at most once, so a word repeated in the
/// reference is kept only as many times as the lists hold it. Reference words
/// in neither list are skipped, as are list elements absent from the
/// reference.
pub fn reorder_and_join<N, M>(names: &[N], numbers: &[M], reference: &str) -> String
where
    N: AsRef<str>,
    M: AsRef<str>,
{
    let mut pool: Vec<&str> = names
        .iter()
        .map(N::as_ref)
        .chain(numbers.iter().map(M::as_ref))
        .collect();

    let mut kept = Vec::new();
    for word in reference.split_whitespace() {
        if let Some(pos) = pool.iter().position(|candidate| *candidate == word) {
            pool.remove(pos);
            kept.push(word);
        }
    }
    kept.join(" ")
}
