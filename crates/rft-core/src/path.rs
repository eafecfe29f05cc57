// Conversion between the backslash paths stored in .gen/.scn files and the
// forward-slash form used everywhere else in this crate.

pub const NATIVE_SEP: char = '\\';
pub const PORTABLE_SEP: char = '/';

const PLACEHOLDERS: [&str; 2] = ["<VEHDIR>", "<TEAMDIR>"];

/// Portable form to the on-disk form. Separators only.
pub fn to_native(path: &str) -> String {
    path.replace(PORTABLE_SEP, "\\")
}

/// On-disk form to portable form.
///
/// The first `<VEHDIR>` and first `<TEAMDIR>` (any case) get a separator
/// after them, runs of separators collapse to one and a single trailing
/// separator is removed. `..` segments are kept, so `<TEAMDIR>/..` survives.
pub fn to_portable(path: &str) -> String {
    let mut out = path.replace(NATIVE_SEP, "/");
    for token in PLACEHOLDERS {
        if let Some(end) = find_ignore_ascii_case(&out, token).map(|i| i + token.len())
            && !out[end..].starts_with(PORTABLE_SEP)
        {
            out.insert(end, PORTABLE_SEP);
        }
    }
    let mut collapsed = collapse_separators(&out);
    if collapsed.ends_with(PORTABLE_SEP) {
        collapsed.pop();
    }
    collapsed
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets stable
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_sep = false;
    for ch in path.chars() {
        let is_sep = ch == PORTABLE_SEP;
        if !(is_sep && prev_sep) {
            out.push(ch);
        }
        prev_sep = is_sep;
    }
    out
}

/// Drop one leading separator, turning `/foo.mas` into `foo.mas`.
pub fn strip_root(path: &str) -> &str {
    path.strip_prefix(PORTABLE_SEP).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portable_basic() {
        assert_eq!(to_portable(r"..\vehicles"), "../vehicles");
        assert_eq!(to_portable(r"a\\b\"), "a/b");
        assert_eq!(to_portable(r"<VEHDIR>F1\Team"), "<VEHDIR>/F1/Team");
        assert_eq!(to_portable(r"<teamdir>\.."), "<teamdir>/..");
        assert_eq!(to_portable("<VEHDIR>"), "<VEHDIR>");
    }

    #[test]
    fn portable_only_first_placeholder_gets_separator() {
        assert_eq!(to_portable("<VEHDIR>a<VEHDIR>b"), "<VEHDIR>/a<VEHDIR>b");
        assert_eq!(
            to_portable("<TEAMDIR>x<VehDir>y"),
            "<TEAMDIR>/x<VehDir>/y"
        );
    }

    #[test]
    fn portable_is_idempotent() {
        for p in [
            r"..\vehicles",
            r"<VEHDIR>F1\\Team\",
            "<teamdir><vehdir>",
            "/abs//path/",
            "<VEHDIR>a<VEHDIR>b",
            "",
            "/",
        ] {
            let once = to_portable(p);
            assert_eq!(to_portable(&once), once, "input {p:?}");
        }
    }

    #[test]
    fn native_is_idempotent() {
        let once = to_native("<VEHDIR>/F1/Team");
        assert_eq!(once, r"<VEHDIR>\F1\Team");
        assert_eq!(to_native(&once), once);
    }

    #[test]
    fn strip_root_once() {
        assert_eq!(strip_root("/a.mas"), "a.mas");
        assert_eq!(strip_root("a.mas"), "a.mas");
    }
}
