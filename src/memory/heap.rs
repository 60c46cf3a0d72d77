// Thu Feb 05 2026 - Alex

use crate::memory::{
    EqEntry, HashSlot, ImageBounds, ImageReader, IndexRange, MemNode, MemoryError, Table,
};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

const TWO_HALVES_SIZE: u32 = 8;
const MEMORY_WORD_SIZE: u32 = 8;
const POOL_POINTER_SIZE: u32 = 4;

/// Heap addresses of the engine globals that describe its tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapGlobals {
    pub hash: u32,
    pub hashtop: u32,
    pub strpool: u32,
    pub strstart: u32,
    pub strptr: u32,
    pub zeqtb: u32,
    pub zmem: u32,
    pub memmin: u32,
    pub memmax: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapLayout {
    /// Heap address of the first byte in the dump.
    #[serde(default)]
    pub heap_base: u32,
    pub globals: HeapGlobals,
}

impl HeapLayout {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MemoryError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }
}

enum HeapBytes {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl HeapBytes {
    fn as_slice(&self) -> &[u8] {
        match self {
            HeapBytes::Mapped(mmap) => mmap.as_ref(),
            HeapBytes::Owned(data) => data.as_slice(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TableBases {
    hash: u32,
    str_pool: u32,
    str_start: u32,
    eqtb: u32,
    mem: u32,
}

/// Little-endian 32-bit engine heap (e.g. a WebAssembly linear memory
/// snapshot). Array bases are resolved from the pointer globals once; every
/// element read is checked against the end of the dump.
pub struct HeapImage {
    bytes: HeapBytes,
    heap_base: u32,
    tables: TableBases,
    bounds: ImageBounds,
}

impl HeapImage {
    pub fn open<P: AsRef<Path>>(path: P, layout: HeapLayout) -> Result<Self, MemoryError> {
        let file = File::open(path.as_ref())?;
        // Read-only private mapping; the dump file is never written through it.
        let mmap = unsafe { Mmap::map(&file) }?;
        Self::resolve(HeapBytes::Mapped(mmap), layout)
    }

    pub fn from_bytes(data: Vec<u8>, layout: HeapLayout) -> Result<Self, MemoryError> {
        Self::resolve(HeapBytes::Owned(data), layout)
    }

    fn resolve(bytes: HeapBytes, layout: HeapLayout) -> Result<Self, MemoryError> {
        let mut image = Self {
            bytes,
            heap_base: layout.heap_base,
            tables: TableBases {
                hash: 0,
                str_pool: 0,
                str_start: 0,
                eqtb: 0,
                mem: 0,
            },
            bounds: ImageBounds::default(),
        };

        let globals = layout.globals;
        image.tables = TableBases {
            hash: image.read_u32(globals.hash)?,
            str_pool: image.read_u32(globals.strpool)?,
            str_start: image.read_u32(globals.strstart)?,
            eqtb: image.read_u32(globals.zeqtb)?,
            mem: image.read_u32(globals.zmem)?,
        };
        image.bounds = ImageBounds {
            slot_top: image.read_i32(globals.hashtop)?,
            next_free_string: image.read_i32(globals.strptr)?,
            arena_min: image.read_i32(globals.memmin)?,
            arena_max: image.read_i32(globals.memmax)?,
        };

        if image.bounds.arena_max < image.bounds.arena_min {
            return Err(MemoryError::InvalidLayout(format!(
                "memmax {} below memmin {}",
                image.bounds.arena_max, image.bounds.arena_min
            )));
        }

        log::debug!(
            "Resolved heap tables: hash=0x{:x} strpool=0x{:x} strstart=0x{:x} eqtb=0x{:x} mem=0x{:x}",
            image.tables.hash,
            image.tables.str_pool,
            image.tables.str_start,
            image.tables.eqtb,
            image.tables.mem
        );

        Ok(image)
    }

    pub fn size(&self) -> usize {
        self.bytes.as_slice().len()
    }

    fn slice(&self, addr: u32, len: u32) -> Result<&[u8], MemoryError> {
        let data = self.bytes.as_slice();
        let offset = addr
            .checked_sub(self.heap_base)
            .ok_or(MemoryError::ReadFailed(u64::from(addr)))? as usize;
        let end = offset
            .checked_add(len as usize)
            .ok_or(MemoryError::ReadFailed(u64::from(addr)))?;
        data.get(offset..end)
            .ok_or(MemoryError::ReadFailed(u64::from(addr)))
    }

    fn read_u32(&self, addr: u32) -> Result<u32, MemoryError> {
        let bytes = self.slice(addr, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_i32(&self, addr: u32) -> Result<i32, MemoryError> {
        Ok(self.read_u32(addr)? as i32)
    }

    /// Address of `base[index]`, wrapping like 32-bit pointer arithmetic.
    fn element(base: u32, index: i32, size: u32) -> u32 {
        base.wrapping_add((index as u32).wrapping_mul(size))
    }

    fn read_halves(&self, table: Table, base: u32, index: i32, size: u32) -> Result<(i32, i32), MemoryError> {
        let addr = Self::element(base, index, size);
        let bytes = self.slice(addr, size).map_err(|_| {
            MemoryError::out_of_bounds(table, index, IndexRange::empty())
        })?;
        let lh = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let rh = i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        Ok((lh, rh))
    }
}

impl ImageReader for HeapImage {
    fn hash_slot(&self, index: i32) -> Result<HashSlot, MemoryError> {
        let (next, text) = self.read_halves(Table::Hash, self.tables.hash, index, TWO_HALVES_SIZE)?;
        Ok(HashSlot { next, text })
    }

    fn str_start(&self, id: i32) -> Result<i32, MemoryError> {
        let addr = Self::element(self.tables.str_start, id, POOL_POINTER_SIZE);
        self.read_i32(addr)
            .map_err(|_| MemoryError::out_of_bounds(Table::StrStart, id, IndexRange::empty()))
    }

    fn pool_byte(&self, offset: i32) -> Result<u8, MemoryError> {
        let addr = Self::element(self.tables.str_pool, offset, 1);
        self.slice(addr, 1)
            .map(|bytes| bytes[0])
            .map_err(|_| MemoryError::out_of_bounds(Table::StrPool, offset, IndexRange::empty()))
    }

    fn eq_entry(&self, index: i32) -> Result<EqEntry, MemoryError> {
        let (lh, rh) = self.read_halves(Table::Eqtb, self.tables.eqtb, index, MEMORY_WORD_SIZE)?;
        // The category is the signed quarter in the high half of LH.
        let category = i32::from((lh >> 16) as i16);
        Ok(EqEntry {
            category,
            operand: rh,
        })
    }

    fn mem_node(&self, index: i32) -> Result<MemNode, MemoryError> {
        let (info, link) = self.read_halves(Table::Mem, self.tables.mem, index, MEMORY_WORD_SIZE)?;
        Ok(MemNode { info, link })
    }

    fn bounds(&self) -> ImageBounds {
        self.bounds
    }
}
