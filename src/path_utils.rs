//! Pure, UNIX-style path string utilities (spec §4.A).
//!
//! Every function here operates on plain `&str`/`String`; none of them touch the filesystem or
//! know anything about SUNs. Backslashes are never treated as separators — this is what keeps
//! results identical across platforms, which is the entire point of the VFS.

/// Collapses `./` segments, cancels internal `../` segments against their preceding segment, and
/// squashes runs of `/` into one. A leading `../` with nothing to cancel is left untouched.
/// Absoluteness (a leading `/`) is preserved, as is a trailing `/` iff the last logical segment is
/// empty after collapsing.
pub fn normalize(p: &str) -> String {
    let absolute = p.starts_with('/');
    // `split('/')` on "a//b" yields ["a", "", "b"]; on "/a" yields ["", "a"]; on "a/" yields
    // ["a", ""]. We special-case the artifacts of leading/trailing slashes below.
    let mut segments = p.split('/').peekable();
    if absolute {
        segments.next(); // drop the empty string produced by the leading '/'
    }

    let mut out: Vec<&str> = Vec::new();
    let mut trailing_empty = false;
    let raw: Vec<&str> = segments.collect();
    for (i, seg) in raw.iter().enumerate() {
        let is_last = i + 1 == raw.len();
        match *seg {
            "" => {
                if is_last {
                    trailing_empty = true;
                }
                // internal empty segments are runs of '/': squash, i.e. ignore.
            }
            "." => {
                if is_last {
                    trailing_empty = true;
                }
            }
            ".." => match out.last() {
                Some(prev) if *prev != ".." => {
                    out.pop();
                }
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }

    let mut result = String::new();
    if absolute {
        result.push('/');
    }
    result.push_str(&out.join("/"));
    if trailing_empty && !result.ends_with('/') {
        result.push('/');
    }
    result
}

/// Removes everything after (and including) the last `/`, then strips all trailing `/`s from
/// what remains. Returns the empty string if `p` contains no `/` at all.
///
/// ```text
/// strip_last_segment("a/b//c.sol") == "a/b"
/// strip_last_segment("a")          == ""
/// strip_last_segment("/a")         == ""
/// strip_last_segment("/")          == ""
/// ```
pub fn strip_last_segment(p: &str) -> String {
    match p.rfind('/') {
        None => String::new(),
        Some(idx) => p[..=idx].trim_end_matches('/').to_string(),
    }
}

/// Counts consecutive leading `../` segments in an already-[`normalize`]d path, returning the
/// count and the remainder after them.
pub fn count_leading_parent(p_norm: &str) -> (usize, &str) {
    let mut k = 0;
    let mut rest = p_norm;
    loop {
        if let Some(stripped) = rest.strip_prefix("../") {
            k += 1;
            rest = stripped;
        } else if rest == ".." {
            // A bare trailing `..` with no following segment still counts as one parent hop.
            k += 1;
            rest = "";
            break;
        } else {
            break;
        }
    }
    (k, rest)
}

/// Classifies an import path literal as relative (`./` or `../`-prefixed) or direct.
pub fn is_relative_import(p: &str) -> bool {
    p.starts_with("./") || p.starts_with("../")
}

/// Joins a non-empty prefix and a remainder with exactly one `/`, or returns the remainder
/// unchanged if the prefix is empty (spec §4.D step 4).
pub fn join_non_empty(prefix: &str, remainder: &str) -> String {
    if prefix.is_empty() {
        remainder.to_string()
    } else {
        format!("{prefix}/{remainder}")
    }
}
