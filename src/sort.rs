use regex::Regex;
use std::{cmp::Ordering, path::Path, sync::LazyLock};

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]+").expect("valid regex"));

/// One run of a file name. Numbers order before text at the same position,
/// and compare by magnitude without parsing, so runs of any length work.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Chunk {
    Number { width: usize, digits: String },
    Text(String),
}

fn number(run: &str) -> Chunk {
    let digits = run.trim_start_matches('0');
    Chunk::Number {
        width: digits.len(),
        digits: digits.to_string(),
    }
}

/// Alternating text and number chunks, always starting with (possibly
/// empty) text, so chunks at the same index are of the same kind.
fn natural_key(name: &str) -> Vec<Chunk> {
    let mut key = Vec::new();
    let mut rest = 0;
    for run in DIGITS.find_iter(name) {
        key.push(Chunk::Text(name[rest..run.start()].to_lowercase()));
        key.push(number(run.as_str()));
        rest = run.end();
    }
    key.push(Chunk::Text(name[rest..].to_lowercase()));
    key
}

/// Orders `frame9` before `frame10`. Names equal under natural ordering
/// (`7` vs `007`, `A` vs `a`) fall back to plain comparison.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a)
        .cmp(&natural_key(b))
        .then_with(|| a.cmp(b))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Sorts paths by the natural order of their file names.
pub fn sort_naturally<P: AsRef<Path>>(paths: &mut [P]) {
    paths.sort_by_cached_key(|path| {
        let name = file_name(path.as_ref());
        (natural_key(&name), name)
    });
}
