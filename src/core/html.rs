// src/core/html.rs
//
// Tolerant, allocation-light HTML scanning. No DOM: callers walk tags in
// document order and slice the source string. Indices are byte offsets
// into the original document; `to_lower` only touches ASCII so offsets
// in the lowered copy line up with the source.

use super::sanitize::{normalize_entities, normalize_ws};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

// Content is text, not markup.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// One `<...>` tag as found in the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Offset of `<`.
    pub start: usize,
    /// Offset just past `>`.
    pub end: usize,
    pub name: &'a str,
    /// Everything between the name and `>`.
    pub attrs: &'a str,
    pub closing: bool,
    pub self_closing: bool,
}

impl Tag<'_> {
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn is_void(&self) -> bool {
        self.self_closing || VOID_TAGS.iter().any(|v| self.is(v))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        attr_value(self.attrs, name)
    }

    /// Class list contains `class` (whole token, ASCII case-insensitive).
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|v| v.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
    }
}

/// Next element tag at or after `from`. Comments, doctypes and
/// processing instructions are skipped; so is a `<` in text that does not
/// start a tag. `<script>` and `<style>` are skipped together with their
/// contents and are never returned.
pub fn next_tag(s: &str, from: usize) -> Option<Tag<'_>> {
    let mut pos = from;
    loop {
        let m = next_markup(s, pos)?;
        if let Some(tag) = m.tag {
            return Some(tag);
        }
        pos = m.end;
    }
}

/// A span of markup. `tag` is `None` for spans dropped as a whole:
/// comments, doctypes, raw-text elements.
struct Markup<'a> {
    start: usize,
    end: usize,
    tag: Option<Tag<'a>>,
}

fn next_markup(s: &str, from: usize) -> Option<Markup<'_>> {
    let b = s.as_bytes();
    let mut i = from;
    loop {
        let lt = i + s.get(i..)?.find('<')?;
        let rest = &s[lt..];

        if rest.starts_with("<!--") {
            let end = rest[4..].find("-->").map_or(s.len(), |n| lt + 4 + n + 3);
            return Some(Markup { start: lt, end, tag: None });
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            let end = rest.find('>').map_or(s.len(), |n| lt + n + 1);
            return Some(Markup { start: lt, end, tag: None });
        }

        // "a < b", "x<=y": not a tag
        let name_at = if b.get(lt + 1) == Some(&b'/') { lt + 2 } else { lt + 1 };
        if !b.get(name_at).is_some_and(|c| c.is_ascii_alphabetic()) {
            i = lt + 1;
            continue;
        }
        let Some(end) = skip_tag(b, lt) else {
            i = lt + 1;
            continue;
        };

        let inner = &s[lt + 1..end - 1];
        let (closing, inner) = match inner.strip_prefix('/') {
            Some(r) => (true, r),
            None => (false, inner),
        };
        let name_len = inner.bytes().take_while(|c| c.is_ascii_alphanumeric()).count();
        let name = &inner[..name_len];
        let attrs = &inner[name_len..];
        let self_closing = attrs.trim_end().ends_with('/');

        if RAW_TEXT_TAGS.iter().any(|r| name.eq_ignore_ascii_case(r)) {
            let end = if closing || self_closing { end } else { raw_text_end(s, end, name) };
            return Some(Markup { start: lt, end, tag: None });
        }

        let tag = Tag { start: lt, end, name, attrs, closing, self_closing };
        return Some(Markup { start: lt, end, tag: Some(tag) });
    }
}

/// Offset just past `</name>` closing a raw-text element whose content
/// starts at `from`; end of input if it is never closed.
fn raw_text_end(s: &str, from: usize, name: &str) -> usize {
    let lc = to_lower(&s[from..]);
    let close = join!("</", &to_lower(name));
    match lc.find(&close) {
        Some(at) => {
            let after = at + close.len();
            lc[after..].find('>').map_or(s.len(), |gt| from + after + gt + 1)
        }
        None => s.len(),
    }
}

// Quote-aware: a '>' inside an attribute value does not end the tag.
fn skip_tag(b: &[u8], lt: usize) -> Option<usize> {
    let mut in_s = false; // '
    let mut in_d = false; // "
    let mut i = lt + 1;
    while i < b.len() {
        match b[i] {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return Some(i + 1),
            _ => {}
        }
        i += 1;
    }
    None
}

/// First opening tag at or after `from` satisfying `pred`.
pub fn find_element<'a>(s: &'a str, from: usize, pred: impl Fn(&Tag<'a>) -> bool) -> Option<Tag<'a>> {
    let mut pos = from;
    while let Some(tag) = next_tag(s, pos) {
        if !tag.closing && pred(&tag) {
            return Some(tag);
        }
        pos = tag.end;
    }
    None
}

/// `(inner_end, outer_end)` of the element opened by `tag`.
/// Nested elements of the same name are not balanced.
pub fn element_bounds(s: &str, tag: &Tag<'_>) -> Option<(usize, usize)> {
    if tag.is_void() {
        return Some((tag.end, tag.end));
    }
    let lc = to_lower(s.get(tag.end..)?);
    let close = join!("</", &to_lower(tag.name));
    let mut from = 0;
    while let Some(rel) = lc[from..].find(&close) {
        let at = from + rel;
        let after = at + close.len();
        // "</h1" must not match "</h10"
        if lc.as_bytes().get(after).is_none_or(|c| !c.is_ascii_alphanumeric()) {
            let gt = lc[after..].find('>')? + after + 1;
            return Some((tag.end + at, tag.end + gt));
        }
        from = after;
    }
    None
}

/// Visible text of the element opened by `tag`: child tags become
/// separators, entities decoded, whitespace collapsed and trimmed.
pub fn element_text(s: &str, tag: &Tag<'_>) -> Option<String> {
    let (inner_end, _) = element_bounds(s, tag)?;
    Some(strip_tags(&s[tag.end..inner_end]))
}

/// Opening tag of the next sibling element of the element opened by `tag`.
/// `None` when the parent closes first.
pub fn next_sibling<'a>(s: &'a str, tag: &Tag<'_>) -> Option<Tag<'a>> {
    let (_, outer_end) = element_bounds(s, tag)?;
    next_tag(s, outer_end).filter(|t| !t.closing)
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut pos = 0usize;
    while let Some(m) = next_markup(s, pos) {
        out.push_str(&s[pos..m.start]);
        out.push(' ');
        pos = m.end;
    }
    out.push_str(&s[pos..]);
    normalize_ws(&normalize_entities(&out))
}

/// Value of attribute `name` inside a tag's attribute text. Attributes are
/// read one at a time, so text inside another attribute's quoted value
/// never matches. A bare attribute has the value `""`.
pub fn attr_value<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let b = attrs.as_bytes();
    let skip_ws = |mut j: usize| {
        while b.get(j).is_some_and(|c| c.is_ascii_whitespace()) {
            j += 1;
        }
        j
    };

    let mut i = 0usize;
    while i < b.len() {
        if b[i].is_ascii_whitespace() || b[i] == b'/' {
            i += 1;
            continue;
        }

        let key_start = i;
        while i < b.len() && !b[i].is_ascii_whitespace() && !matches!(b[i], b'=' | b'/') {
            i += 1;
        }
        let key = &attrs[key_start..i];

        let mut value = "";
        let eq = skip_ws(i);
        if b.get(eq) == Some(&b'=') {
            let v = skip_ws(eq + 1);
            match b.get(v) {
                Some(&q @ (b'"' | b'\'')) => {
                    let body = v + 1;
                    let close = attrs[body..].find(q as char).map_or(b.len(), |n| body + n);
                    value = &attrs[body..close];
                    i = (close + 1).min(b.len());
                }
                _ => {
                    let mut j = v;
                    while j < b.len() && !b[j].is_ascii_whitespace() {
                        j += 1;
                    }
                    value = &attrs[v..j];
                    i = j;
                }
            }
        }

        if !key.is_empty() && key.eq_ignore_ascii_case(name) {
            return Some(value);
        }
    }
    None
}
