//! Higher-order iteration over a sequence of lines
//!
//! All operations walk their input strictly in order and hand each element to
//! a caller-supplied callback. Callbacks are fallible: a callback returning
//! `Err` aborts the walk and surfaces as [`UtilError::CallbackFailed`] with
//! the failing element recorded in the context. This holds for `filter` and
//! `reject` too: only a clean `Ok(false)` counts as a filtering decision.
//!
//! | Operation | Result | Stops early |
//! |-----------|--------|-------------|
//! | [`each`] | number of elements visited | on first callback error |
//! | [`every`] | `true` if all pass | on first `false` |
//! | [`some`] | `true` if any passes | on first `true` |
//! | [`find`] | first passing element, else `NotFound` | on first `true` |
//! | [`filter`] / [`reject`] | kept elements | never |
//! | [`map`] | transformed elements | on first callback error |
//! | [`invoke`] | whatever the target returns | n/a |
//!
//! Infallible closures can be adapted with [`total`]:
//!
//! ```
//! use shkit::domain::collection::{filter, total};
//!
//! let numbers = filter(["1", "x", "2"], total(|s: &str| s.parse::<i64>().is_ok())).unwrap();
//! assert_eq!(numbers, vec!["1", "2"]);
//! ```

use std::convert::Infallible;
use std::ops::ControlFlow;

use super::error::{BoxError, UtilError};

/// Adapts an infallible closure to the fallible callback shape
pub fn total<T, F>(mut f: F) -> impl FnMut(&str) -> Result<T, Infallible>
where
    F: FnMut(&str) -> T,
{
    move |item: &str| Ok(f(item))
}

/// Drives `step` over `items` until it breaks or the input ends
fn walk<I, F>(items: I, mut step: F) -> Result<(), UtilError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    F: FnMut(usize, &str) -> Result<ControlFlow<()>, UtilError>,
{
    for (index, item) in items.into_iter().enumerate() {
        if step(index, item.as_ref())?.is_break() {
            break;
        }
    }
    Ok(())
}

fn call<T, E, F>(f: &mut F, index: usize, item: &str) -> Result<T, UtilError>
where
    F: FnMut(&str) -> Result<T, E>,
    E: Into<BoxError>,
{
    f(item).map_err(|e| UtilError::callback(format!("element {} ('{}')", index, item), e))
}

/// Runs `f` on every element for its side effect
pub fn each<I, F, E>(items: I, mut f: F) -> Result<usize, UtilError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    F: FnMut(&str) -> Result<(), E>,
    E: Into<BoxError>,
{
    let mut visited = 0;
    walk(items, |index, item| {
        call(&mut f, index, item)?;
        visited += 1;
        Ok(ControlFlow::Continue(()))
    })?;
    Ok(visited)
}

/// True if `predicate` holds for every element (vacuously true when empty)
pub fn every<I, F, E>(items: I, mut predicate: F) -> Result<bool, UtilError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    F: FnMut(&str) -> Result<bool, E>,
    E: Into<BoxError>,
{
    let mut all = true;
    walk(items, |index, item| {
        if call(&mut predicate, index, item)? {
            Ok(ControlFlow::Continue(()))
        } else {
            all = false;
            Ok(ControlFlow::Break(()))
        }
    })?;
    Ok(all)
}

/// True if `predicate` holds for at least one element
pub fn some<I, F, E>(items: I, mut predicate: F) -> Result<bool, UtilError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    F: FnMut(&str) -> Result<bool, E>,
    E: Into<BoxError>,
{
    let mut any = false;
    walk(items, |index, item| {
        if call(&mut predicate, index, item)? {
            any = true;
            Ok(ControlFlow::Break(()))
        } else {
            Ok(ControlFlow::Continue(()))
        }
    })?;
    Ok(any)
}

/// Returns the first element for which `predicate` holds
pub fn find<I, F, E>(items: I, mut predicate: F) -> Result<String, UtilError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    F: FnMut(&str) -> Result<bool, E>,
    E: Into<BoxError>,
{
    let mut found = None;
    walk(items, |index, item| {
        if call(&mut predicate, index, item)? {
            found = Some(item.to_string());
            Ok(ControlFlow::Break(()))
        } else {
            Ok(ControlFlow::Continue(()))
        }
    })?;
    found.ok_or_else(|| UtilError::NotFound("no element matched the predicate".to_string()))
}

/// Keeps the elements for which `predicate` holds
pub fn filter<I, F, E>(items: I, predicate: F) -> Result<Vec<String>, UtilError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    F: FnMut(&str) -> Result<bool, E>,
    E: Into<BoxError>,
{
    partition_by(items, predicate, true)
}

/// Keeps the elements for which `predicate` does not hold
pub fn reject<I, F, E>(items: I, predicate: F) -> Result<Vec<String>, UtilError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    F: FnMut(&str) -> Result<bool, E>,
    E: Into<BoxError>,
{
    partition_by(items, predicate, false)
}

fn partition_by<I, F, E>(items: I, mut predicate: F, keep: bool) -> Result<Vec<String>, UtilError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    F: FnMut(&str) -> Result<bool, E>,
    E: Into<BoxError>,
{
    let mut kept = Vec::new();
    walk(items, |index, item| {
        if call(&mut predicate, index, item)? == keep {
            kept.push(item.to_string());
        }
        Ok(ControlFlow::Continue(()))
    })?;
    Ok(kept)
}

/// Applies `transform` to every element, preserving order
pub fn map<I, F, T, E>(items: I, mut transform: F) -> Result<Vec<T>, UtilError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    F: FnMut(&str) -> Result<T, E>,
    E: Into<BoxError>,
{
    let mut mapped = Vec::new();
    walk(items, |index, item| {
        mapped.push(call(&mut transform, index, item)?);
        Ok(ControlFlow::Continue(()))
    })?;
    Ok(mapped)
}

/// Collects the whole input, then calls `target` once with all of it
pub fn invoke<I, F, T, E>(items: I, target: F) -> Result<T, UtilError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    F: FnOnce(Vec<String>) -> Result<T, E>,
    E: Into<BoxError>,
{
    let collected: Vec<String> = items
        .into_iter()
        .map(|item| item.as_ref().to_string())
        .collect();
    let count = collected.len();
    target(collected).map_err(|e| UtilError::callback(format!("{} collected elements", count), e))
}
