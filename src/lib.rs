//! OpenCon Client - Core Library
//!
//! Client-side core of the OpenCon conference companion: rendering of session
//! description markup and authorized access to the conference API.
//!
//! # Module Structure
//!
//! - **`markup`** - Session description markup
//!   - HTML entity decoding
//!   - Bold / italic / link tokenization into styled segments
//!
//! - **`client`** - Conference API access
//!   - Bearer-token injection and backup-server failover
//!   - Start-up authorization flow with dummy-token fallback
//!   - Token storage backends
//!   - Deferred conference data refresh
//!
//! - **`store`** - Client state and the reducer that applies dispatched actions
//!
//! - **`shared`** - Configuration and error types
//!
//! # Usage
//!
//! ```rust
//! use opencon_client::markup::{plain_text, render};
//!
//! let segments = render("Talk by <Text style={styles.bold}>Ferris</Text> &amp; friends");
//! assert_eq!(plain_text(&segments), "Talk by Ferris & friends");
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, ApiError>` for API calls; errors are never swallowed by the gateway
//! - The authorization flow always resolves to an `AuthOutcome`
//! - Markup rendering cannot fail; malformed markup degrades to plain text

/// Configuration and error types
pub mod shared;

/// Session description markup
pub mod markup;

/// Conference API access
pub mod client;

/// Client state and reducer
pub mod store;
