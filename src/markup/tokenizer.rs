use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::entities::decode_html;

static MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<bold_open><Text style=\{styles\.bold\}>)",
        r"|(?P<bold_close></Text>)",
        r"|(?P<italic_open><Text style=\{styles\.italic\}>)",
        r"|(?P<link_open><a href=)",
        r"|(?P<link_close></a>)",
    ))
    .expect("marker pattern compiles")
});

/// One run of text with the single style applied to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", content = "text", rename_all = "snake_case")]
pub enum StyledSegment {
    Plain(String),
    Bold(String),
    Italic(String),
    /// `label` is the whole token captured after `<a href=`, quotes and
    /// anchor text included. `url` is the href cut out of it.
    Link { url: String, label: String },
}

impl StyledSegment {
    fn link(token: &str) -> Self {
        Self::Link {
            url: extract_href(token).to_string(),
            label: token.to_string(),
        }
    }

    /// Visible text of the segment
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Bold(text) | Self::Italic(text) => text,
            Self::Link { label, .. } => label,
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    BoldOpen,
    BoldClose,
    ItalicOpen,
    LinkOpen,
    LinkClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Marker(Marker),
}

/// Split into alternating text and marker tokens. The result always starts
/// and ends with a (possibly empty) text token.
fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in MARKERS.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        let marker = if caps.name("bold_open").is_some() {
            Marker::BoldOpen
        } else if caps.name("bold_close").is_some() {
            Marker::BoldClose
        } else if caps.name("italic_open").is_some() {
            Marker::ItalicOpen
        } else if caps.name("link_open").is_some() {
            Marker::LinkOpen
        } else {
            Marker::LinkClose
        };

        tokens.push(Token::Text(&input[last..whole.start()]));
        tokens.push(Token::Marker(marker));
        last = whole.end();
    }
    tokens.push(Token::Text(&input[last..]));
    tokens
}

/// Pull the link target out of the token following `<a href=`.
///
/// `"https://x.test" class="ext">label` gives `https://x.test`;
/// `https://x.test>label` gives `https://x.test`.
fn extract_href(token: &str) -> &str {
    let token = token.trim_start();
    if let Some(quote) = token.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let rest = &token[1..];
        return rest.find(quote).map_or(rest, |end| &rest[..end]);
    }
    let end = token
        .find(|c: char| c == '>' || c.is_whitespace())
        .unwrap_or(token.len());
    &token[..end]
}

#[derive(Debug, Default)]
struct StyleFlags {
    bold: bool,
    italic: bool,
    link: bool,
}

/// Decode HTML entities, then split `text` into styled segments.
pub fn render(text: &str) -> Vec<StyledSegment> {
    let decoded = decode_html(text);
    render_decoded(&decoded)
}

/// Split already-decoded markup into styled segments.
///
/// Flags toggle only on markers and never nest. There is no italic-close
/// marker, so an italic span runs to the end of the input; `</Text>` only
/// clears bold.
pub fn render_decoded(text: &str) -> Vec<StyledSegment> {
    let tokens = tokenize(text);
    let mut flags = StyleFlags::default();
    let mut link_url: Option<&str> = None;
    let mut segments = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        match *token {
            Token::Marker(Marker::BoldOpen) => flags.bold = true,
            Token::Marker(Marker::BoldClose) => flags.bold = false,
            Token::Marker(Marker::ItalicOpen) => flags.italic = true,
            Token::Marker(Marker::LinkOpen) => {
                link_url = match tokens.get(index + 1) {
                    Some(Token::Text(url)) if !url.is_empty() => Some(*url),
                    _ => None,
                };
                flags.link = link_url.is_some();
                if !flags.link {
                    tracing::debug!("link marker at token {} has no URL, dropping it", index);
                }
            }
            Token::Marker(Marker::LinkClose) => flags.link = false,
            Token::Text("") => {}
            Token::Text(part) => {
                let segment = if flags.link {
                    flags.link = false;
                    StyledSegment::link(link_url.take().unwrap_or(part))
                } else if flags.bold {
                    StyledSegment::Bold(part.to_string())
                } else if flags.italic {
                    StyledSegment::Italic(part.to_string())
                } else {
                    StyledSegment::Plain(part.to_string())
                };
                segments.push(segment);
            }
        }
    }

    segments
}

/// Concatenate the visible text of `segments`.
pub fn plain_text(segments: &[StyledSegment]) -> String {
    segments.iter().map(StyledSegment::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(text: &str) -> StyledSegment {
        StyledSegment::Plain(text.to_string())
    }

    fn bold(text: &str) -> StyledSegment {
        StyledSegment::Bold(text.to_string())
    }

    fn italic(text: &str) -> StyledSegment {
        StyledSegment::Italic(text.to_string())
    }

    #[test]
    fn test_plain_input_is_one_segment() {
        assert_eq!(render("Opening keynote"), vec![plain("Opening keynote")]);
    }

    #[test]
    fn test_empty_input_has_no_segments() {
        assert!(render("").is_empty());
    }

    #[test]
    fn test_bold_span_between_plain_text() {
        let segments = render("Join <Text style={styles.bold}>us</Text> today");
        assert_eq!(segments, vec![plain("Join "), bold("us"), plain(" today")]);
    }

    #[test]
    fn test_unterminated_bold_runs_to_end() {
        let segments = render("a <Text style={styles.bold}>b </a> c");
        assert_eq!(segments, vec![plain("a "), bold("b "), bold(" c")]);
    }

    #[test]
    fn test_italic_is_never_closed() {
        let segments = render("<Text style={styles.italic}>x</Text> y");
        assert_eq!(segments, vec![italic("x"), italic(" y")]);
    }

    #[test]
    fn test_bold_wins_over_italic() {
        let segments = render("<Text style={styles.italic}>a<Text style={styles.bold}>b</Text>c");
        assert_eq!(segments, vec![italic("a"), bold("b"), italic("c")]);
    }

    #[test]
    fn test_repeated_open_is_noop() {
        let segments = render(
            "<Text style={styles.bold}>a<Text style={styles.bold}>b</Text>c",
        );
        assert_eq!(segments, vec![bold("a"), bold("b"), plain("c")]);
    }

    #[test]
    fn test_link_label_is_captured_token() {
        let segments = render("<a href=https://x.test>ignored</a>");
        assert_eq!(
            segments,
            vec![StyledSegment::Link {
                url: "https://x.test".to_string(),
                label: "https://x.test>ignored".to_string(),
            }]
        );
        assert_ne!(segments[0].text(), "ignored");
    }

    #[test]
    fn test_link_takes_priority_over_bold() {
        let segments = render("<Text style={styles.bold}>see <a href=\"https://s.test\">site</a> now");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], bold("see "));
        assert_eq!(
            segments[1],
            StyledSegment::Link {
                url: "https://s.test".to_string(),
                label: "\"https://s.test\">site".to_string(),
            }
        );
        assert_eq!(segments[2], bold(" now"));
    }

    #[test]
    fn test_link_without_url_is_dropped() {
        let segments = render("before <a href=</a>after");
        assert_eq!(segments, vec![plain("before "), plain("after")]);
        assert!(render("trailing <a href=").iter().all(|s| !s.is_link()));
    }

    #[test]
    fn test_entities_decoded_before_tokenizing() {
        let segments = render("R&amp;D &lt;Text style={styles.bold}&gt;now&lt;/Text&gt;");
        assert_eq!(segments, vec![plain("R&D "), bold("now")]);
    }

    #[test]
    fn test_unknown_tags_stay_as_text() {
        let segments = render("<p>para</p>");
        assert_eq!(segments, vec![plain("<p>para</p>")]);
    }

    #[test]
    fn test_extract_href_variants() {
        assert_eq!(extract_href("https://a.test>x"), "https://a.test");
        assert_eq!(extract_href("'https://a.test'>x"), "https://a.test");
        assert_eq!(extract_href("\"https://a.test\" target=\"_blank\">x"), "https://a.test");
        assert_eq!(extract_href("https://a.test rel=x>y"), "https://a.test");
        assert_eq!(extract_href("\"unterminated"), "unterminated");
    }

    #[test]
    fn test_plain_text_concatenates_labels() {
        let segments = render("A <Text style={styles.bold}>B</Text> C");
        assert_eq!(plain_text(&segments), "A B C");
    }

    #[test]
    fn test_segment_serializes_with_style_tag() {
        let json = serde_json::to_value(bold("x")).unwrap();
        assert_eq!(json, serde_json::json!({"style": "bold", "text": "x"}));
    }
}
