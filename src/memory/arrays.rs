// Wed Feb 04 2026 - Alex

use crate::memory::{
    EqEntry, HashSlot, ImageBounds, ImageReader, IndexRange, MemNode, MemoryError, Table,
};

/// Vector whose first element sits at engine index `origin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedArray<T> {
    origin: i32,
    items: Vec<T>,
}

impl<T: Copy> IndexedArray<T> {
    pub fn new(origin: i32, items: Vec<T>) -> Self {
        Self { origin, items }
    }

    pub fn origin(&self) -> i32 {
        self.origin
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn range(&self) -> IndexRange {
        IndexRange::from_start_len(self.origin, self.items.len())
    }

    pub fn get(&self, index: i32) -> Option<T> {
        self.range()
            .position(index)
            .and_then(|pos| self.items.get(pos).copied())
    }

    fn read(&self, table: Table, index: i32) -> Result<T, MemoryError> {
        self.get(index)
            .ok_or_else(|| MemoryError::out_of_bounds(table, index, self.range()))
    }
}

/// Owned copy of the engine tables, e.g. replayed from an [`ImageDump`].
///
/// [`ImageDump`]: crate::memory::ImageDump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArrays {
    hash: IndexedArray<HashSlot>,
    str_start: IndexedArray<i32>,
    str_pool: IndexedArray<u8>,
    eqtb: IndexedArray<EqEntry>,
    mem: IndexedArray<MemNode>,
    bounds: ImageBounds,
}

impl ImageArrays {
    pub fn new(
        hash: IndexedArray<HashSlot>,
        str_start: Vec<i32>,
        str_pool: Vec<u8>,
        eqtb: IndexedArray<EqEntry>,
        mem: IndexedArray<MemNode>,
        bounds: ImageBounds,
    ) -> Self {
        Self {
            hash,
            str_start: IndexedArray::new(0, str_start),
            str_pool: IndexedArray::new(0, str_pool),
            eqtb,
            mem,
            bounds,
        }
    }

    pub fn hash(&self) -> &IndexedArray<HashSlot> {
        &self.hash
    }

    pub fn str_start_table(&self) -> &[i32] {
        self.str_start.items()
    }

    pub fn str_pool_bytes(&self) -> &[u8] {
        self.str_pool.items()
    }

    pub fn eqtb(&self) -> &IndexedArray<EqEntry> {
        &self.eqtb
    }

    pub fn mem(&self) -> &IndexedArray<MemNode> {
        &self.mem
    }

    pub fn with_bounds(mut self, bounds: ImageBounds) -> Self {
        self.bounds = bounds;
        self
    }
}

impl ImageReader for ImageArrays {
    fn hash_slot(&self, index: i32) -> Result<HashSlot, MemoryError> {
        self.hash.read(Table::Hash, index)
    }

    fn str_start(&self, id: i32) -> Result<i32, MemoryError> {
        self.str_start.read(Table::StrStart, id)
    }

    fn pool_byte(&self, offset: i32) -> Result<u8, MemoryError> {
        self.str_pool.read(Table::StrPool, offset)
    }

    fn eq_entry(&self, index: i32) -> Result<EqEntry, MemoryError> {
        self.eqtb.read(Table::Eqtb, index)
    }

    fn mem_node(&self, index: i32) -> Result<MemNode, MemoryError> {
        self.mem.read(Table::Mem, index)
    }

    fn bounds(&self) -> ImageBounds {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_array_offsets_by_origin() {
        let array = IndexedArray::new(514, vec![10, 20, 30]);
        assert_eq!(array.get(514), Some(10));
        assert_eq!(array.get(516), Some(30));
        assert_eq!(array.get(513), None);
        assert_eq!(array.get(517), None);
        assert_eq!(array.range(), IndexRange::new(514, 516));
    }

    #[test]
    fn test_physical_reads_past_storage_fail() {
        let image = ImageArrays::new(
            IndexedArray::new(514, vec![HashSlot { next: 0, text: 1 }]),
            vec![0, 3],
            b"abc".to_vec(),
            IndexedArray::new(514, vec![EqEntry { category: 111, operand: 0 }]),
            IndexedArray::new(0, vec![MemNode::default()]),
            // Deliberately larger than the storage behind it.
            ImageBounds {
                slot_top: 600,
                next_free_string: 40,
                arena_min: 0,
                arena_max: 90,
            },
        );

        assert!(image.hash_slot(514).is_ok());
        assert!(image.hash_slot(515).is_err());
        assert!(image.str_start(2).is_err());
        assert_eq!(image.pool_byte(2).unwrap(), b'c');
        assert!(image.pool_byte(3).is_err());
        assert!(image.mem_node(1).is_err());
    }
}
