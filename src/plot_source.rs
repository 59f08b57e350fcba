use once_cell::sync::Lazy;
use regex::Regex;

/// An (x, y) pair in pitch-relative meters. Not bounds-checked here; the
/// zone counters filter against the pitch rectangle.
pub type Point = (f64, f64);

/// Everything worth extracting from one plot-source blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotSource {
    pub goals: Vec<Point>,
    pub assists: Vec<Point>,
    pub title: Option<String>,
}

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"title\(\s*["'](.+?)["']\s*\)"#).expect("title pattern"));

/// Extracts goals, assists and the title from one blob. Pure; parsing the
/// same text twice yields identical results.
pub fn parse_plot_source(src: &str) -> PlotSource {
    PlotSource {
        goals: extract_vector_list(src, "goals"),
        assists: extract_vector_list(src, "assists"),
        title: extract_title(src),
    }
}

/// Locates `<ident> = [ ... ]` (ident match case-insensitive, the literal
/// may span lines) and parses the bracketed literal as a list of numeric
/// pairs. This is data parsing only; the blob is never executed. A missing
/// ident or an unusable literal yields an empty list, and a single bad
/// pair is skipped without poisoning the rest.
pub fn extract_vector_list(src: &str, ident: &str) -> Vec<Point> {
    let pattern = format!(r"(?i){}\s*=\s*\[", regex::escape(ident));
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };
    let Some(found) = re.find(src) else {
        return Vec::new();
    };
    // `found` ends on the opening bracket.
    let Some(body) = bracketed(&src[found.end() - 1..]) else {
        return Vec::new();
    };
    parse_pairs(body)
}

/// First `title("...")` / `title('...')` call in the blob, with literal
/// `\n` sequences turned into real newlines.
pub fn extract_title(src: &str) -> Option<String> {
    let caps = TITLE_RE.captures(src)?;
    Some(caps[1].replace("\\n", "\n"))
}

/// Body of the bracketed literal starting at `text[0] == '['`, matching
/// brackets by depth so inner `[x, y]` pairs do not cut the list short.
fn bracketed(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[1..idx]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Scans the list body for `( .. )` / `[ .. ]` groups and keeps the ones
/// that coerce to exactly two floats.
fn parse_pairs(body: &str) -> Vec<Point> {
    let mut out = Vec::new();
    let mut rest = body;
    while let Some(start) = rest.find(['(', '[']) {
        let close = if rest.as_bytes()[start] == b'(' { ')' } else { ']' };
        let Some(len) = rest[start + 1..].find(close) else {
            break;
        };
        if let Some(pair) = parse_pair(&rest[start + 1..start + 1 + len]) {
            out.push(pair);
        }
        rest = &rest[start + 1 + len + 1..];
    }
    out
}

fn parse_pair(inner: &str) -> Option<Point> {
    let mut parts = inner.split(',');
    let x = parts.next()?.trim().parse::<f64>().ok()?;
    let y = parts.next()?.trim().parse::<f64>().ok()?;
    if parts.next().is_some() {
        // Not a 2-element pair.
        return None;
    }
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketed_matches_depth() {
        assert_eq!(bracketed("[(1,2),(3,4)] rest"), Some("(1,2),(3,4)"));
        assert_eq!(bracketed("[[1,2],[3,4]]"), Some("[1,2],[3,4]"));
        assert_eq!(bracketed("[unterminated"), None);
    }

    #[test]
    fn pair_arity_is_enforced() {
        assert_eq!(parse_pair("35, 95"), Some((35.0, 95.0)));
        assert_eq!(parse_pair("35"), None);
        assert_eq!(parse_pair("35, 95, 1"), None);
        assert_eq!(parse_pair("35, neun"), None);
    }
}
