//! # Session Description Markup
//!
//! Session descriptions arrive from the conference backend as a small
//! HTML-like dialect. This module turns them into styled text segments that a
//! view layer can draw directly.
//!
//! ## Grammar
//!
//! - `<Text style={styles.bold}>` ... `</Text>` - bold span
//! - `<Text style={styles.italic}>` - italic from here to the end of the text
//! - `<a href=URL>` ... `</a>` - link
//!
//! Anything else is plain text. HTML entities are decoded first, so escaped
//! markers (`&lt;/Text&gt;`) are recognised too.
//!
//! ## Usage
//!
//! ```rust
//! use opencon_client::markup::{render, StyledSegment};
//!
//! let segments = render("Meet <Text style={styles.bold}>Ferris</Text>!");
//! assert_eq!(segments[1], StyledSegment::Bold("Ferris".to_string()));
//! ```

mod entities;
mod tokenizer;

pub use entities::decode_html;
pub use tokenizer::{plain_text, render, render_decoded, StyledSegment};
