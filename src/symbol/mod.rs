// Wed Feb 04 2026 - Alex

pub mod arity;
pub mod filter;
pub mod record;
pub mod scanner;
pub mod token;
pub mod trace;

pub use arity::ArityResolver;
pub use filter::{NameFilter, Rejection};
pub use record::{Arity, SymbolRecord};
pub use scanner::{ScanReport, SymbolScanner};
pub use token::Token;
pub use trace::{ScanObserver, TraceHook};
