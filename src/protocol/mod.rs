//! Protocol Module
//!
//! RESP (REdis Serialization Protocol) codec.
//!
//! ## Wire Format
//!
//! Every value starts with a one-byte type marker and every line ends with
//! `\r\n`:
//!
//! ```text
//! ┌────────┬───────────────┬──────────────────────────────────────┐
//! │ Marker │ Type          │ Layout                               │
//! ├────────┼───────────────┼──────────────────────────────────────┤
//! │   +    │ Simple string │ +<text>\r\n                          │
//! │   -    │ Error         │ -<message>\r\n                       │
//! │   :    │ Integer       │ :<i64>\r\n                           │
//! │   $    │ Bulk string   │ $<len>\r\n<bytes>\r\n   ($-1 = null) │
//! │   *    │ Array         │ *<count>\r\n<values...> (*-1 = null) │
//! └────────┴───────────────┴──────────────────────────────────────┘
//! ```
//!
//! ### Requests
//! A request is always an array of bulk strings:
//! ```text
//! *3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n
//! ```

mod wire_type;
mod value;
mod encoder;
mod parser;

pub use wire_type::WireType;
pub use value::{ErrorValue, Value};
pub use encoder::Encoder;
pub use parser::Parser;

/// Line terminator used by every RESP value
pub const CRLF: &[u8] = b"\r\n";

/// Maximum bulk string length allowed by the protocol (512 MiB)
pub const MAX_BULK_LEN: usize = 512 * 1024 * 1024;

/// Default limit on a single header, simple string or error line (64 MiB)
pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024 * 1024;

/// Default limit on array nesting
pub const DEFAULT_MAX_DEPTH: usize = 128;
