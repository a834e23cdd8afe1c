//! # Register trace simulator
//!
//! [TraceBus] is an in-memory register file implementing [RegisterBus]. Every access is recorded
//! into a shared [TraceLog], together with named markers which collaborators outside the register
//! space (memory zeroing, control transfer) can insert. Tests then assert ordering properties over
//! the recorded trace.
use alloc::{collections::BTreeMap, rc::Rc, vec::Vec};
use core::cell::RefCell;

use imx7::{Register, RegisterBus};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    Read(Register, u32),
    Write(Register, u32),
    Marker(&'static str),
}

impl Access {
    #[inline]
    pub fn is_write_to(&self, reg: Register) -> bool {
        matches!(self, Access::Write(r, _) if *r == reg)
    }
}

/// Shared, cloneable handle to a recorded access trace.
#[derive(Debug, Clone, Default)]
pub struct TraceLog(Rc<RefCell<Vec<Access>>>);

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, access: Access) {
        self.0.borrow_mut().push(access);
    }

    /// Insert a named marker into the trace.
    pub fn mark(&self, marker: &'static str) {
        self.record(Access::Marker(marker));
    }

    pub fn accesses(&self) -> Vec<Access> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All writes in trace order.
    pub fn writes(&self) -> Vec<(Register, u32)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|access| match access {
                Access::Write(reg, value) => Some((*reg, *value)),
                _ => None,
            })
            .collect()
    }

    /// Values written to one register in trace order.
    pub fn writes_to(&self, reg: Register) -> Vec<u32> {
        self.writes()
            .into_iter()
            .filter(|(r, _)| *r == reg)
            .map(|(_, value)| value)
            .collect()
    }

    /// Trace index of the first access matching the predicate.
    pub fn position<P: Fn(&Access) -> bool>(&self, pred: P) -> Option<usize> {
        self.0.borrow().iter().position(pred)
    }

    /// Trace index of the last access matching the predicate.
    pub fn rposition<P: Fn(&Access) -> bool>(&self, pred: P) -> Option<usize> {
        self.0.borrow().iter().rposition(pred)
    }

    pub fn marker_position(&self, marker: &'static str) -> Option<usize> {
        self.position(|access| *access == Access::Marker(marker))
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Recording register bus.
///
/// Registers read back the last value written to them, a preset value, or zero. Pinned registers
/// always read back their pinned value, which models hardware status registers.
#[derive(Debug, Default)]
pub struct TraceBus {
    regs: BTreeMap<Register, u32>,
    pinned: BTreeMap<Register, u32>,
    log: TraceLog,
}

impl TraceBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bus which records into an existing log.
    pub fn with_log(log: TraceLog) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    /// Set the initial value of a register without recording an access.
    pub fn preset(&mut self, reg: Register, value: u32) -> &mut Self {
        self.regs.insert(reg, value);
        self
    }

    /// Make every read of the register return the given value.
    pub fn pin(&mut self, reg: Register, value: u32) -> &mut Self {
        self.pinned.insert(reg, value);
        self
    }

    pub fn unpin(&mut self, reg: Register) -> &mut Self {
        self.pinned.remove(&reg);
        self
    }

    /// Current value of a register without recording an access.
    pub fn value(&self, reg: Register) -> u32 {
        self.pinned
            .get(&reg)
            .or_else(|| self.regs.get(&reg))
            .copied()
            .unwrap_or(0)
    }

    pub fn log(&self) -> TraceLog {
        self.log.clone()
    }
}

impl RegisterBus for TraceBus {
    fn read(&mut self, reg: Register) -> u32 {
        let value = self.value(reg);
        self.log.record(Access::Read(reg, value));
        value
    }

    fn write(&mut self, reg: Register, value: u32) {
        self.regs.insert(reg, value);
        self.log.record(Access::Write(reg, value));
    }
}

/// Delay provider which returns immediately.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Training check which passes on one scripted attempt.
#[derive(Debug, Default)]
pub struct ScriptedCheck {
    pass_on: Option<usize>,
    attempts: usize,
}

impl ScriptedCheck {
    /// Pass on the attempt with the given zero-based index.
    pub const fn pass_on(index: usize) -> Self {
        Self {
            pass_on: Some(index),
            attempts: 0,
        }
    }

    pub const fn never() -> Self {
        Self {
            pass_on: None,
            attempts: 0,
        }
    }

    /// Number of checks performed so far.
    pub const fn attempts(&self) -> usize {
        self.attempts
    }
}

impl crate::ddr::TrainingCheck for ScriptedCheck {
    fn passed<B: RegisterBus>(&mut self, _bus: &mut B, _code: u32) -> bool {
        let index = self.attempts;
        self.attempts += 1;
        self.pass_on == Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REG_A: Register = Register::new(0x1000);
    const REG_B: Register = Register::new(0x1004);

    #[test]
    fn test_reads_return_last_write() {
        let mut bus = TraceBus::new();
        assert_eq!(bus.read(REG_A), 0);
        bus.write(REG_A, 0xdead_beef);
        assert_eq!(bus.read(REG_A), 0xdead_beef);
    }

    #[test]
    fn test_pinned_register_ignores_writes() {
        let mut bus = TraceBus::new();
        bus.pin(REG_B, 0x1);
        bus.write(REG_B, 0x0);
        assert_eq!(bus.read(REG_B), 0x1);
        assert_eq!(bus.log().writes_to(REG_B), [0x0]);
    }

    #[test]
    fn test_modify_is_one_read_and_one_write() {
        let mut bus = TraceBus::new();
        bus.preset(REG_A, 0b10);
        bus.modify(REG_A, |val| val | 0b1);
        assert_eq!(
            bus.log().accesses(),
            [Access::Read(REG_A, 0b10), Access::Write(REG_A, 0b11)]
        );
    }

    #[test]
    fn test_markers_are_ordered_with_accesses() {
        let mut bus = TraceBus::new();
        let log = bus.log();
        bus.write(REG_A, 1);
        log.mark("between");
        bus.write(REG_B, 2);
        assert_eq!(log.marker_position("between"), Some(1));
        assert_eq!(log.position(|a| a.is_write_to(REG_B)), Some(2));
    }
}
