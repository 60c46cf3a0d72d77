// Tue Feb 03 2026 - Alex

use crate::memory::{EqEntry, HashSlot, ImageBounds, MemNode, MemoryError};

/// Raw read access to the engine tables. Implementations check every index
/// against the physical extent of their backing storage and never write.
pub trait ImageReader {
    fn hash_slot(&self, index: i32) -> Result<HashSlot, MemoryError>;
    fn str_start(&self, id: i32) -> Result<i32, MemoryError>;
    fn pool_byte(&self, offset: i32) -> Result<u8, MemoryError>;
    fn eq_entry(&self, index: i32) -> Result<EqEntry, MemoryError>;
    fn mem_node(&self, index: i32) -> Result<MemNode, MemoryError>;
    fn bounds(&self) -> ImageBounds;
}
