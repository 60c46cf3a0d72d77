// Wed Feb 04 2026 - Alex

use crate::config::ScanConfig;
use crate::memory::{ImageAccess, IndexRange};
use crate::symbol::record::Arity;
use crate::symbol::token::Token;

/// Counts the formal parameters of a macro by walking its token list.
///
/// The category operand points at the reference-count node of the list; its
/// link is the first real token. Parameter markers are counted until the
/// end-of-parameters marker. The walk never follows more than
/// `walk_limit` links and never leaves the arena, so malformed or cyclic
/// lists resolve to [`Arity::Unknown`] instead of looping.
#[derive(Debug, Clone)]
pub struct ArityResolver {
    macro_categories: IndexRange,
    match_command: i32,
    end_match_command: i32,
    walk_limit: usize,
    max_arity: u8,
}

impl ArityResolver {
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            macro_categories: config.macro_categories,
            match_command: config.match_command,
            end_match_command: config.end_match_command,
            walk_limit: config.arity_walk_limit,
            max_arity: config.max_arity,
        }
    }

    pub fn with_walk_limit(mut self, limit: usize) -> Self {
        self.walk_limit = limit;
        self
    }

    pub fn is_macro(&self, category: i32) -> bool {
        self.macro_categories.contains(category)
    }

    pub fn resolve(&self, access: &ImageAccess<'_>, category: i32, operand: i32) -> Arity {
        if !self.is_macro(category) {
            return Arity::NotApplicable;
        }
        self.walk(access, operand)
    }

    fn walk(&self, access: &ImageAccess<'_>, head: i32) -> Arity {
        let head_node = match access.read_mem_node(head) {
            Ok(node) => node,
            Err(e) => {
                log::debug!("Token list head unreadable: {}", e);
                return Arity::Unknown;
            }
        };

        let mut cursor = head_node.link;
        let mut params: usize = 0;

        for _ in 0..self.walk_limit {
            let node = match access.read_mem_node(cursor) {
                Ok(node) => node,
                Err(e) => {
                    log::debug!("Token list from {} left the arena: {}", head, e);
                    return Arity::Unknown;
                }
            };

            let token = Token::decode(node.info);
            if token.command == self.end_match_command {
                return Arity::Count(self.clamp(head, params));
            }
            if token.command == self.match_command {
                params += 1;
            }
            cursor = node.link;
        }

        log::debug!(
            "Token list from {} has no end marker within {} nodes",
            head,
            self.walk_limit
        );
        Arity::Unknown
    }

    fn clamp(&self, head: i32, params: usize) -> u8 {
        let max = usize::from(self.max_arity);
        if params > max {
            log::warn!(
                "Token list from {} decoded {} parameters, clamping to {}",
                head,
                params,
                max
            );
            return self.max_arity;
        }
        params as u8
    }
}

impl Default for ArityResolver {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}
