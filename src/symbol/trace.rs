// Thu Feb 05 2026 - Alex

use crate::symbol::filter::Rejection;
use crate::symbol::record::SymbolRecord;
use std::collections::HashSet;

/// Receives per-slot scan decisions.
pub trait ScanObserver {
    fn on_accept(&mut self, record: &SymbolRecord);

    /// `name` is present once the slot's bytes could be read.
    fn on_reject(&mut self, slot: i32, name: Option<&[u8]>, reason: Rejection);
}

/// Logs scan decisions for the names a predicate selects.
pub struct TraceHook<P>
where
    P: Fn(&[u8]) -> bool,
{
    predicate: P,
    hits: usize,
}

impl<P> TraceHook<P>
where
    P: Fn(&[u8]) -> bool,
{
    pub fn new(predicate: P) -> Self {
        Self { predicate, hits: 0 }
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}

impl TraceHook<Box<dyn Fn(&[u8]) -> bool>> {
    pub fn for_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: HashSet<Vec<u8>> = names
            .into_iter()
            .map(|name| name.as_ref().trim_start_matches('\\').as_bytes().to_vec())
            .collect();
        Self::new(Box::new(move |name: &[u8]| wanted.contains(name)))
    }
}

impl<P> ScanObserver for TraceHook<P>
where
    P: Fn(&[u8]) -> bool,
{
    fn on_accept(&mut self, record: &SymbolRecord) {
        if (self.predicate)(&record.name) {
            self.hits += 1;
            log::info!(target: "csname_scanner::trace", "accepted {}", record);
        }
    }

    fn on_reject(&mut self, slot: i32, name: Option<&[u8]>, reason: Rejection) {
        if let Some(name) = name {
            if (self.predicate)(name) {
                self.hits += 1;
                log::info!(
                    target: "csname_scanner::trace",
                    "rejected \\{} (slot {}): {}",
                    String::from_utf8_lossy(name),
                    slot,
                    reason
                );
            }
        }
    }
}
