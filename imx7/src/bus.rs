use vcell::VolatileCell;

/// Physical address of a single 32-bit memory-mapped register.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Register(usize);

impl Register {
    #[inline]
    pub const fn new(addr: usize) -> Self {
        Self(addr)
    }

    #[inline]
    pub const fn addr(self) -> usize {
        self.0
    }

    /// Register located `offset` bytes after this one.
    #[inline]
    pub const fn offset(self, offset: usize) -> Self {
        Self(self.0 + offset)
    }
}

/// Width-correct, ordered access to memory-mapped registers.
///
/// Every call maps to exactly one bus access. Implementations must not batch, cache or reorder
/// accesses.
pub trait RegisterBus {
    fn read(&mut self, reg: Register) -> u32;

    fn write(&mut self, reg: Register, value: u32);

    /// Read-modify-write helper. Performs exactly one read followed by one write.
    #[inline]
    fn modify<F: FnOnce(u32) -> u32>(&mut self, reg: Register, f: F) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    #[inline]
    fn read(&mut self, reg: Register) -> u32 {
        (**self).read(reg)
    }

    #[inline]
    fn write(&mut self, reg: Register, value: u32) {
        (**self).write(reg, value)
    }
}

/// Volatile access to the physical register space.
#[derive(Debug)]
pub struct Mmio(());

impl Mmio {
    /// Create a handle to the physical register space.
    ///
    /// # Safety
    ///
    /// This handle can access every register of the SoC. Multiple handles may exist at the same
    /// time, the user is responsible for ensuring that accesses through them do not interfere
    /// with each other.
    #[inline]
    pub const unsafe fn steal() -> Self {
        Self(())
    }

    #[inline]
    fn cell(reg: Register) -> &'static VolatileCell<u32> {
        // Safety: Register addresses are only created from the fixed register tables of this
        // crate, which are all 4-byte aligned device addresses.
        unsafe { &*(reg.addr() as *const VolatileCell<u32>) }
    }
}

impl RegisterBus for Mmio {
    #[inline]
    fn read(&mut self, reg: Register) -> u32 {
        Self::cell(reg).get()
    }

    #[inline]
    fn write(&mut self, reg: Register, value: u32) {
        Self::cell(reg).set(value)
    }
}
