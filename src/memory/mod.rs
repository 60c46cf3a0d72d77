// Tue Feb 03 2026 - Alex

pub mod access;
pub mod arrays;
pub mod builder;
pub mod dump;
pub mod error;
pub mod heap;
pub mod range;
pub mod traits;
pub mod word;

pub use access::ImageAccess;
pub use arrays::{ImageArrays, IndexedArray};
pub use builder::{ImageBuilder, NULL_LINK};
pub use dump::ImageDump;
pub use error::{MemoryError, Table};
pub use heap::{HeapGlobals, HeapImage, HeapLayout};
pub use range::IndexRange;
pub use traits::ImageReader;
pub use word::{EqEntry, HashSlot, ImageBounds, MemNode, StringSpan};
