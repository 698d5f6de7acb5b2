//! Operations over an ordered sequence of strings
//!
//! Every function here is pure apart from [`random_element`], which draws
//! from the thread-local generator. Inputs are borrowed slices of anything
//! string-like; sequence results are freshly allocated.
//!
//! Ordering is byte-wise and locale-independent, so `sort` gives the same
//! answer on every host.

use std::collections::HashSet;

use rand::Rng;

use super::error::UtilError;

/// Returns true if any element equals `needle` exactly
pub fn contains<S: AsRef<str>>(needle: &str, items: &[S]) -> bool {
    items.iter().any(|item| item.as_ref() == needle)
}

/// Removes duplicates, keeping the first occurrence of each element
///
/// Empty strings are dropped entirely.
pub fn dedupe<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(AsRef::as_ref)
        .filter(|item| !item.is_empty() && seen.insert(*item))
        .map(str::to_string)
        .collect()
}

pub fn is_empty<S>(items: &[S]) -> bool {
    items.is_empty()
}

/// Concatenates elements with `glue` between neighbours
pub fn join<S: AsRef<str>>(glue: &str, items: &[S]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(glue);
        }
        out.push_str(item.as_ref());
    }
    out
}

pub fn reverse<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    let mut out = to_owned(items);
    reverse_in_place(&mut out);
    out
}

/// Swaps elements pairwise from both ends toward the middle
pub fn reverse_in_place<T>(items: &mut [T]) {
    let len = items.len();
    for i in 0..len / 2 {
        items.swap(i, len - 1 - i);
    }
}

/// Picks one element uniformly at random
pub fn random_element<S: AsRef<str>>(items: &[S]) -> Result<String, UtilError> {
    if items.is_empty() {
        return Err(UtilError::invalid("random_element needs at least one element"));
    }
    let index = rand::rng().random_range(0..items.len());
    Ok(items[index].as_ref().to_string())
}

/// Ascending byte-wise sort (stable)
pub fn sort<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    let mut out = to_owned(items);
    out.sort();
    out
}

/// Descending byte-wise sort (stable)
pub fn rsort<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    let mut out = to_owned(items);
    out.sort_by(|a, b| b.cmp(a));
    out
}

/// Ascending numeric sort of integer elements
///
/// Elements keep their original spelling (`"007"` stays `"007"`); only the
/// comparison is numeric. Any element that is not an integer is rejected
/// before sorting starts.
pub fn bsort<S: AsRef<str>>(items: &[S]) -> Result<Vec<String>, UtilError> {
    let mut keyed = items
        .iter()
        .map(|item| {
            let item = item.as_ref();
            item.trim()
                .parse::<i64>()
                .map(|value| (value, item.to_string()))
                .map_err(|_| UtilError::invalid(format!("bsort expects integers, got '{}'", item)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by_key(|(value, _)| *value);
    Ok(keyed.into_iter().map(|(_, item)| item).collect())
}

/// Concatenates two sequences, keeping order and duplicates
pub fn merge<A: AsRef<str>, B: AsRef<str>>(first: &[A], second: &[B]) -> Vec<String> {
    first
        .iter()
        .map(|item| item.as_ref().to_string())
        .chain(second.iter().map(|item| item.as_ref().to_string()))
        .collect()
}

fn to_owned<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items.iter().map(|item| item.as_ref().to_string()).collect()
}
