//! Pure rule evaluation for N-by-N boards.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::check_winner;
