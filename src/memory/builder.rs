// Wed Feb 04 2026 - Alex

use crate::config::{DEFAULT_FROZEN_SLOT, DEFAULT_SLOT_BASE};
use crate::memory::{
    EqEntry, HashSlot, ImageArrays, ImageBounds, IndexedArray, MemNode,
};
use crate::symbol::token::Token;

/// `null` pointer of a web2c engine (`min_halfword`).
pub const NULL_LINK: i32 = -0x0FFF_FFFF;

pub const CALL: i32 = 111;
pub const LONG_CALL: i32 = 112;

/// Builds engine images in memory: defines commands, interns their names and
/// allocates token lists the same way the engine lays them out.
pub struct ImageBuilder {
    slot_base: i32,
    hash: Vec<HashSlot>,
    eqtb: Vec<EqEntry>,
    str_start: Vec<i32>,
    str_pool: Vec<u8>,
    mem_origin: i32,
    mem: Vec<MemNode>,
    bounds: Option<ImageBounds>,
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self::with_slot_base(DEFAULT_SLOT_BASE)
    }

    pub fn with_slot_base(slot_base: i32) -> Self {
        Self {
            slot_base,
            hash: Vec::new(),
            eqtb: Vec::new(),
            // String 0 is the empty string; real names start at 1.
            str_start: vec![0, 0],
            str_pool: Vec::new(),
            mem_origin: 0,
            mem: Vec::new(),
            bounds: None,
        }
    }

    pub fn with_mem_origin(mut self, origin: i32) -> Self {
        self.mem_origin = origin;
        self
    }

    pub fn intern(&mut self, name: &[u8]) -> i32 {
        self.str_pool.extend_from_slice(name);
        self.str_start.push(self.str_pool.len() as i32);
        self.str_start.len() as i32 - 2
    }

    pub fn next_slot(&self) -> i32 {
        self.slot_base + self.hash.len() as i32
    }

    /// Writes a raw slot, padding any gap with empty slots.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is below the builder's slot base.
    pub fn set_slot(&mut self, slot: i32, entry: HashSlot, eq: EqEntry) {
        assert!(slot >= self.slot_base, "slot below base");
        let pos = (slot - self.slot_base) as usize;
        if pos >= self.hash.len() {
            self.hash.resize(pos + 1, HashSlot::default());
            self.eqtb.resize(pos + 1, EqEntry::default());
        }
        self.hash[pos] = entry;
        self.eqtb[pos] = eq;
    }

    pub fn define_at(&mut self, slot: i32, name: &str, category: i32, operand: i32) -> i32 {
        let text = self.intern(name.as_bytes());
        self.set_slot(
            slot,
            HashSlot { next: 0, text },
            EqEntry { category, operand },
        );
        slot
    }

    pub fn define(&mut self, name: &str, category: i32, operand: i32) -> i32 {
        let slot = self.next_slot();
        self.define_at(slot, name, category, operand)
    }

    pub fn define_bytes(&mut self, name: &[u8], category: i32, operand: i32) -> i32 {
        let slot = self.next_slot();
        let text = self.intern(name);
        self.set_slot(
            slot,
            HashSlot { next: 0, text },
            EqEntry { category, operand },
        );
        slot
    }

    /// Defines `\name` as a macro taking `params` arguments with a short body.
    pub fn define_macro(&mut self, name: &str, params: u8) -> i32 {
        let mut tokens: Vec<i32> = (1..=params).map(|n| Token::parameter(n).encode()).collect();
        tokens.push(Token::end_parameters().encode());
        tokens.extend(b"body".iter().map(|&ch| Token::letter(ch).encode()));
        let head = self.token_list(&tokens);
        self.define(name, CALL, head)
    }

    pub fn undefine_frozen(&mut self) -> i32 {
        self.define_at(DEFAULT_FROZEN_SLOT, "undefined", 101, 0)
    }

    pub fn push_node(&mut self, info: i32, link: i32) -> i32 {
        let index = self.mem_origin + self.mem.len() as i32;
        self.mem.push(MemNode { info, link });
        index
    }

    /// # Panics
    ///
    /// Panics if `index` is not a node allocated by this builder.
    pub fn set_link(&mut self, index: i32, link: i32) {
        let node = index
            .checked_sub(self.mem_origin)
            .and_then(|pos| usize::try_from(pos).ok())
            .and_then(|pos| self.mem.get_mut(pos));
        match node {
            Some(node) => node.link = link,
            None => panic!("node {} was not allocated", index),
        }
    }

    /// Allocates a reference-counted token list and returns its head.
    pub fn token_list(&mut self, tokens: &[i32]) -> i32 {
        let head = self.push_node(0, NULL_LINK);
        let mut tail = head;
        for &token in tokens {
            let node = self.push_node(token, NULL_LINK);
            self.set_link(tail, node);
            tail = node;
        }
        head
    }

    pub fn with_bounds(mut self, bounds: ImageBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn natural_bounds(&self) -> ImageBounds {
        ImageBounds {
            slot_top: self.slot_base + self.hash.len() as i32 - 1,
            next_free_string: self.str_start.len() as i32 - 1,
            arena_min: self.mem_origin,
            arena_max: self.mem_origin + self.mem.len() as i32 - 1,
        }
    }

    pub fn build(self) -> ImageArrays {
        let bounds = self.bounds.unwrap_or_else(|| self.natural_bounds());
        ImageArrays::new(
            IndexedArray::new(self.slot_base, self.hash),
            self.str_start,
            self.str_pool,
            IndexedArray::new(self.slot_base, self.eqtb),
            IndexedArray::new(self.mem_origin, self.mem),
            bounds,
        )
    }
}

impl Default for ImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::ImageReader;

    #[test]
    fn test_intern_assigns_sequential_ids() {
        let mut builder = ImageBuilder::new();
        assert_eq!(builder.intern(b"alpha"), 1);
        assert_eq!(builder.intern(b"be"), 2);
        let image = builder.build();
        assert_eq!(image.str_start_table(), &[0, 0, 5, 7]);
        assert_eq!(image.bounds().next_free_string, 3);
    }

    #[test]
    fn test_set_slot_pads_gaps() {
        let mut builder = ImageBuilder::new();
        builder.define_at(520, "gap", 1, 0);
        let image = builder.build();
        assert_eq!(image.bounds().slot_top, 520);
        assert_eq!(image.hash_slot(515).unwrap().text, 0);
        assert_eq!(image.eq_entry(520).unwrap().category, 1);
    }

    #[test]
    #[should_panic(expected = "slot below base")]
    fn test_set_slot_below_base_panics() {
        ImageBuilder::new().set_slot(513, HashSlot::default(), EqEntry::default());
    }

    #[test]
    #[should_panic(expected = "was not allocated")]
    fn test_set_link_outside_arena_panics() {
        let mut builder = ImageBuilder::new();
        let head = builder.token_list(&[]);
        builder.set_link(head + 1, NULL_LINK);
    }

    #[test]
    fn test_token_list_links_through_head() {
        let mut builder = ImageBuilder::new();
        let head = builder.token_list(&[100, 200]);
        let image = builder.build();

        let first = image.mem_node(head).unwrap().link;
        assert_eq!(image.mem_node(first).unwrap().info, 100);
        let second = image.mem_node(first).unwrap().link;
        assert_eq!(image.mem_node(second).unwrap().info, 200);
        assert_eq!(image.mem_node(second).unwrap().link, NULL_LINK);
    }
}
