// Thu Feb 05 2026 - Alex

use crate::config::ScanConfig;
use crate::memory::{ImageAccess, ImageReader};
use crate::symbol::arity::ArityResolver;
use crate::symbol::filter::{NameFilter, Rejection};
use crate::symbol::record::{Arity, SymbolRecord};
use crate::symbol::trace::ScanObserver;
use std::collections::BTreeMap;
use std::convert::Infallible;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub slots_visited: usize,
    pub accepted: usize,
    pub macros: usize,
    pub unknown_arity: usize,
    pub rejected: BTreeMap<Rejection, usize>,
}

impl ScanReport {
    pub fn total_rejected(&self) -> usize {
        self.rejected.values().sum()
    }

    pub fn rejected_for(&self, reason: Rejection) -> usize {
        self.rejected.get(&reason).copied().unwrap_or(0)
    }

    fn record_accept(&mut self, record: &SymbolRecord) {
        self.accepted += 1;
        match record.arity {
            Arity::Count(_) => self.macros += 1,
            Arity::Unknown => {
                self.macros += 1;
                self.unknown_arity += 1;
            }
            Arity::NotApplicable => {}
        }
    }

    fn record_reject(&mut self, reason: Rejection) {
        *self.rejected.entry(reason).or_insert(0) += 1;
    }
}

/// Walks the symbol table of one completed run in ascending slot order.
pub struct SymbolScanner<'a> {
    access: ImageAccess<'a>,
    frozen_slot: i32,
    filter: NameFilter,
    arity: ArityResolver,
    observer: Option<&'a mut dyn ScanObserver>,
}

impl<'a> SymbolScanner<'a> {
    pub fn new(image: &'a dyn ImageReader, config: &ScanConfig) -> Self {
        Self {
            access: ImageAccess::new(image, config.slot_base),
            frozen_slot: config.frozen_slot,
            filter: NameFilter::from_config(config),
            arity: ArityResolver::from_config(config),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: &'a mut dyn ScanObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn access(&self) -> &ImageAccess<'a> {
        &self.access
    }

    /// Scans every slot, handing each accepted record to `emit`. Only an
    /// error from `emit` stops the scan early.
    pub fn scan_with<E, F>(&mut self, mut emit: F) -> Result<ScanReport, E>
    where
        F: FnMut(&SymbolRecord) -> Result<(), E>,
    {
        let mut report = ScanReport::default();

        for slot in self.access.slot_range().indices() {
            report.slots_visited += 1;
            match self.inspect_slot(slot) {
                Ok(record) => {
                    report.record_accept(&record);
                    if let Some(observer) = self.observer.as_mut() {
                        observer.on_accept(&record);
                    }
                    emit(&record)?;
                }
                Err((reason, name)) => {
                    report.record_reject(reason);
                    if let Some(observer) = self.observer.as_mut() {
                        observer.on_reject(slot, name.as_deref(), reason);
                    }
                }
            }
        }

        log::debug!(
            "Scanned {} slots: {} accepted, {} rejected",
            report.slots_visited,
            report.accepted,
            report.total_rejected()
        );
        Ok(report)
    }

    pub fn collect(&mut self) -> (Vec<SymbolRecord>, ScanReport) {
        let mut records = Vec::new();
        let report = self
            .scan_with(|record| {
                records.push(record.clone());
                Ok::<(), Infallible>(())
            })
            .unwrap_or_else(|never| match never {});
        (records, report)
    }

    /// Applies the inclusion rules to one slot. On rejection the name bytes
    /// are returned when they were read.
    pub fn inspect_slot(&self, slot: i32) -> Result<SymbolRecord, (Rejection, Option<Vec<u8>>)> {
        if slot == self.frozen_slot {
            return Err((Rejection::FrozenSlot, None));
        }

        let entry = self
            .access
            .read_slot(slot)
            .map_err(|_| (Rejection::Unreadable, None))?;
        let id = entry.text;
        if id <= 0 {
            return Err((Rejection::EmptySlot, None));
        }

        let eq = self
            .access
            .read_eq_entry(slot)
            .map_err(|_| (Rejection::Unreadable, None))?;
        if eq.is_undefined() {
            return Err((Rejection::Undefined, None));
        }

        if id >= self.access.next_free_string() {
            return Err((Rejection::StaleStringId, None));
        }

        let span = self
            .access
            .read_string_span(id)
            .map_err(|_| (Rejection::Unreadable, None))?;
        self.filter.check_len(span.len()).map_err(|r| (r, None))?;

        let name = match self.access.read_string_bytes(span) {
            Ok(name) => name,
            Err(_) => return Err((Rejection::Unreadable, None)),
        };
        if let Err(reason) = self.filter.check_bytes(&name) {
            return Err((reason, Some(name)));
        }

        let arity = self.arity.resolve(&self.access, eq.category, eq.operand);
        Ok(SymbolRecord::new(slot, name, eq.category).with_arity(arity))
    }
}
