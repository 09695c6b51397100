//! # Session Module
//!
//! Time-boxed unlock state.
//!
//! ```text
//! manager.rs SessionManager: start, refresh, lazy expiry, lock
//! clock.rs   Clock trait; SystemClock and a ManualClock for tests
//! ticker.rs  Ticker trait; TokioTicker for the auto-lock poll, ManualTicker
//! ```

pub mod clock;
pub mod manager;
pub mod ticker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{Session, SessionManager};
pub use ticker::{ManualTicker, TickCallback, Ticker, TokioTicker};
