//! Utility functions: tracing and text sanitization.

use tracing_subscriber::{EnvFilter, fmt};

/// Initialize pretty CLI logging.
pub fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  fmt()
    .with_env_filter(filter)
    .with_target(false)
    .pretty()
    .init();
}

/// Reduce caller-supplied text to a single clean line for storage.
///
/// Drops `<script>`/`<style>` elements with their contents, any other `<...>`
/// tag, and percent-encoded octets (repeatedly, until none are left). Control
/// characters become spaces, whitespace runs collapse and the result is trimmed.
pub fn sanitize_text_field(s: &str) -> String {
  let untagged = strip_tags(&strip_script_and_style(s));
  let decoded = strip_percent_octets(&untagged);

  let mut out = String::with_capacity(decoded.len());
  for c in decoded.chars() {
    if c.is_whitespace() || c.is_control() {
      if !out.ends_with(' ') {
        out.push(' ');
      }
    } else {
      out.push(c);
    }
  }
  out.trim().to_string()
}

/// Remove `<script ...>...</script>` and `<style ...>...</style>`, case-insensitively.
/// An element without its closing tag is left for [`strip_tags`].
fn strip_script_and_style(s: &str) -> String {
  // ASCII lowercasing keeps byte offsets aligned with `s`.
  let lower = s.to_ascii_lowercase();
  let mut out = String::with_capacity(s.len());
  let mut pos = 0;
  loop {
    let next = ["script", "style"]
      .iter()
      .filter_map(|name| {
        lower[pos..]
          .find(&format!("<{name}"))
          .map(|at| (pos + at, *name))
      })
      .min_by_key(|(at, _)| *at);
    let Some((open, name)) = next else {
      break;
    };
    let element_end = lower[open..].find('>').and_then(|gt| {
      let body = open + gt + 1;
      let close = format!("</{name}>");
      lower[body..].find(&close).map(|at| body + at + close.len())
    });
    match element_end {
      Some(end) => {
        out.push_str(&s[pos..open]);
        pos = end;
      }
      None => {
        let skip = open + 1;
        out.push_str(&s[pos..skip]);
        pos = skip;
      }
    }
  }
  out.push_str(&s[pos..]);
  out
}

/// Remove `<...>` sequences. A `<` with no closing `>` is kept.
fn strip_tags(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut rest = s;
  while let Some(start) = rest.find('<') {
    match rest[start..].find('>') {
      Some(end) => {
        out.push_str(&rest[..start]);
        rest = &rest[start + end + 1..];
      }
      None => break,
    }
  }
  out.push_str(rest);
  out
}

/// Remove `%XX` octets until none remain, so `%%4141` does not leave `%41` behind.
fn strip_percent_octets(s: &str) -> String {
  let mut current = s.to_string();
  loop {
    let bytes = current.as_bytes();
    let mut out = String::with_capacity(current.len());
    let mut removed = false;
    let mut i = 0;
    while i < bytes.len() {
      if bytes[i] == b'%'
        && i + 2 < bytes.len()
        && bytes[i + 1].is_ascii_hexdigit()
        && bytes[i + 2].is_ascii_hexdigit()
      {
        removed = true;
        i += 3;
        continue;
      }
      let ch_len = current[i..].chars().next().map_or(1, char::len_utf8);
      out.push_str(&current[i..i + ch_len]);
      i += ch_len;
    }
    if !removed {
      return out;
    }
    current = out;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_text_is_kept() {
    assert_eq!(sanitize_text_field("ORD-123"), "ORD-123");
    assert_eq!(sanitize_text_field("Mozilla/5.0 (X11; Linux)"), "Mozilla/5.0 (X11; Linux)");
  }

  #[test]
  fn control_characters_and_padding_are_removed() {
    assert_eq!(sanitize_text_field("  ORD-1\r\n"), "ORD-1");
    assert_eq!(sanitize_text_field("a\tb\n\nc"), "a b c");
    assert_eq!(sanitize_text_field("x\u{0}y"), "x y");
  }

  #[test]
  fn tags_are_stripped() {
    assert_eq!(sanitize_text_field("<b>X1</b>"), "X1");
    assert_eq!(sanitize_text_field("a < b"), "a < b");
  }

  #[test]
  fn percent_octets_are_stripped() {
    assert_eq!(sanitize_text_field("ORD%0A-9"), "ORD-9");
    assert_eq!(sanitize_text_field("100%"), "100%");
    assert_eq!(sanitize_text_field("50%OFF"), "50%OFF");
  }

  #[test]
  fn nested_percent_octets_are_stripped_until_none_remain() {
    assert_eq!(sanitize_text_field("%%4141"), "");
    assert_eq!(sanitize_text_field("ORD-%%4141-7"), "ORD--7");
  }

  #[test]
  fn script_and_style_contents_are_dropped() {
    assert_eq!(sanitize_text_field("<script>alert(1)</script>id"), "id");
    assert_eq!(sanitize_text_field("<SCRIPT type=\"x\">a</Script>X1"), "X1");
    assert_eq!(sanitize_text_field("A<style>b{}</style>B<i>C</i>"), "ABC");
    assert_eq!(sanitize_text_field("<script>never closed"), "never closed");
  }
}
