// Tue Feb 03 2026 - Alex

use crate::memory::{
    EqEntry, HashSlot, ImageReader, IndexRange, MemNode, MemoryError, StringSpan, Table,
};

/// Checked view over an engine image. Every read is validated against the
/// logical bounds the engine published for this run before it reaches the
/// reader.
pub struct ImageAccess<'a> {
    reader: &'a dyn ImageReader,
    slots: IndexRange,
    strings: IndexRange,
    arena: IndexRange,
}

impl<'a> ImageAccess<'a> {
    pub fn new(reader: &'a dyn ImageReader, slot_base: i32) -> Self {
        let bounds = reader.bounds();
        Self {
            reader,
            slots: IndexRange::new(slot_base, bounds.slot_top),
            strings: IndexRange::new(0, bounds.next_free_string.saturating_sub(1)),
            arena: IndexRange::new(bounds.arena_min, bounds.arena_max),
        }
    }

    pub fn slot_range(&self) -> IndexRange {
        self.slots
    }

    pub fn string_range(&self) -> IndexRange {
        self.strings
    }

    pub fn arena_range(&self) -> IndexRange {
        self.arena
    }

    pub fn next_free_string(&self) -> i32 {
        self.strings.last().saturating_add(1)
    }

    pub fn read_slot(&self, index: i32) -> Result<HashSlot, MemoryError> {
        if !self.slots.contains(index) {
            return Err(MemoryError::out_of_bounds(Table::Hash, index, self.slots));
        }
        self.reader.hash_slot(index)
    }

    /// Category entries share the slot index space.
    pub fn read_eq_entry(&self, slot: i32) -> Result<EqEntry, MemoryError> {
        if !self.slots.contains(slot) {
            return Err(MemoryError::out_of_bounds(Table::Eqtb, slot, self.slots));
        }
        self.reader.eq_entry(slot)
    }

    /// Used part of the pool: `[0, str_start[next_free_string])`.
    pub fn pool_range(&self) -> Result<IndexRange, MemoryError> {
        let end = self.reader.str_start(self.next_free_string())?;
        Ok(IndexRange::new(0, end.saturating_sub(1)))
    }

    /// Offsets come straight from the engine; a span that starts below 0 or
    /// ends past the used pool is refused.
    pub fn read_string_span(&self, id: i32) -> Result<StringSpan, MemoryError> {
        if !self.strings.contains(id) {
            return Err(MemoryError::out_of_bounds(Table::StrStart, id, self.strings));
        }
        let start = self.reader.str_start(id)?;
        let end = self.reader.str_start(id + 1)?;
        if end < start {
            return Err(MemoryError::CorruptSpan { id, start, end });
        }

        let pool = self.pool_range()?;
        if start < pool.first() {
            return Err(MemoryError::out_of_bounds(Table::StrPool, start, pool));
        }
        if end > pool.last().saturating_add(1) {
            return Err(MemoryError::out_of_bounds(Table::StrPool, end, pool));
        }
        Ok(StringSpan { start, end })
    }

    pub fn read_pool_byte(&self, offset: i32) -> Result<u8, MemoryError> {
        let pool = self.pool_range()?;
        if !pool.contains(offset) {
            return Err(MemoryError::out_of_bounds(Table::StrPool, offset, pool));
        }
        self.reader.pool_byte(offset)
    }

    /// Copies the bytes of a span returned by [`read_string_span`], stopping
    /// at the first unreadable offset.
    ///
    /// [`read_string_span`]: ImageAccess::read_string_span
    pub fn read_string_bytes(&self, span: StringSpan) -> Result<Vec<u8>, MemoryError> {
        let mut bytes = Vec::with_capacity(span.len().max(0) as usize);
        for offset in span.start..span.end {
            bytes.push(self.reader.pool_byte(offset)?);
        }
        Ok(bytes)
    }

    pub fn read_mem_node(&self, index: i32) -> Result<MemNode, MemoryError> {
        if !self.arena.contains(index) {
            return Err(MemoryError::out_of_bounds(Table::Mem, index, self.arena));
        }
        self.reader.mem_node(index)
    }
}
