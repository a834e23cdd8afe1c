//! Low-level DDR configuration module.
use arbitrary_int::u4;
use imx7::{
    Register, RegisterBus,
    ccm::{self, Gate, GateIndex, GateSetting},
    ddr_phy::{self, regs::CmdSdllCon0},
    ddrc::{self, regs::PortControl},
    iomuxc::{gpr, regs::Gpr8},
    src::{self, DdrcResetControl},
};

/// Controller register values for one DRAM part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdrcConfigSet {
    pub mstr: u32,
    pub init0: u32,
    pub init1: u32,
    pub init3: u32,
    pub init4: u32,
    pub init5: u32,
    pub rankctl: u32,
    pub dramtmg0: u32,
    pub dramtmg1: u32,
    pub dramtmg2: u32,
    pub dramtmg3: u32,
    pub dramtmg4: u32,
    pub dramtmg5: u32,
    pub dramtmg8: u32,
    pub zqctl0: u32,
    pub zqctl1: u32,
    pub dfitmg0: u32,
    pub dfitmg1: u32,
    pub dfiupd0: u32,
    pub dfiupd1: u32,
    pub dfiupd2: u32,
    pub odtcfg: u32,
    pub odtmap: u32,
    pub rfshtmg: u32,
    pub addrmap0: u32,
    pub addrmap1: u32,
    pub addrmap5: u32,
    pub addrmap6: u32,
}

impl DdrcConfigSet {
    pub const REGISTER_COUNT: usize = 28;

    /// Register and value pairs in programming order.
    pub const fn register_writes(&self) -> [(Register, u32); Self::REGISTER_COUNT] {
        [
            (ddrc::MSTR, self.mstr),
            (ddrc::INIT0, self.init0),
            (ddrc::INIT1, self.init1),
            (ddrc::INIT3, self.init3),
            (ddrc::INIT4, self.init4),
            (ddrc::INIT5, self.init5),
            (ddrc::RANKCTL, self.rankctl),
            (ddrc::DRAMTMG0, self.dramtmg0),
            (ddrc::DRAMTMG1, self.dramtmg1),
            (ddrc::DRAMTMG2, self.dramtmg2),
            (ddrc::DRAMTMG3, self.dramtmg3),
            (ddrc::DRAMTMG4, self.dramtmg4),
            (ddrc::DRAMTMG5, self.dramtmg5),
            (ddrc::DRAMTMG8, self.dramtmg8),
            (ddrc::ZQCTL0, self.zqctl0),
            (ddrc::ZQCTL1, self.zqctl1),
            (ddrc::DFITMG0, self.dfitmg0),
            (ddrc::DFITMG1, self.dfitmg1),
            (ddrc::DFIUPD0, self.dfiupd0),
            (ddrc::DFIUPD1, self.dfiupd1),
            (ddrc::DFIUPD2, self.dfiupd2),
            (ddrc::ODTCFG, self.odtcfg),
            (ddrc::ODTMAP, self.odtmap),
            (ddrc::RFSHTMG, self.rfshtmg),
            (ddrc::ADDRMAP0, self.addrmap0),
            (ddrc::ADDRMAP1, self.addrmap1),
            (ddrc::ADDRMAP5, self.addrmap5),
            (ddrc::ADDRMAP6, self.addrmap6),
        ]
    }
}

/// Multi-port (AXI port) register values. Writing them activates the ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdrcMpConfigSet {
    pub pctrl_0: PortControl,
}

impl DdrcMpConfigSet {
    pub const REGISTER_COUNT: usize = 1;

    pub const fn register_writes(&self) -> [(Register, u32); Self::REGISTER_COUNT] {
        [(ddrc::PCTRL_0, self.pctrl_0.raw_value())]
    }
}

/// PHY register values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdrPhyConfigSet {
    pub phy_con0: u32,
    pub phy_con1: u32,
    pub phy_con4: u32,
    pub mdll_con0: u32,
    pub drvds_con0: u32,
    pub cmd_sdll_con0: u32,
    pub offset_lp_con0: u32,
    pub offset_rd_con0: u32,
    pub offset_wr_con0: u32,
}

impl DdrPhyConfigSet {
    pub const REGISTER_COUNT: usize = 9;

    pub const fn register_writes(&self) -> [(Register, u32); Self::REGISTER_COUNT] {
        [
            (ddr_phy::PHY_CON0, self.phy_con0),
            (ddr_phy::PHY_CON1, self.phy_con1),
            (ddr_phy::PHY_CON4, self.phy_con4),
            (ddr_phy::MDLL_CON0, self.mdll_con0),
            (ddr_phy::DRVDS_CON0, self.drvds_con0),
            (ddr_phy::CMD_SDLL_CON0, self.cmd_sdll_con0),
            (ddr_phy::OFFSET_LP_CON0, self.offset_lp_con0),
            (ddr_phy::OFFSET_RD_CON0, self.offset_rd_con0),
            (ddr_phy::OFFSET_WR_CON0, self.offset_wr_con0),
        ]
    }
}

/// Hold the controller core and the PHY in reset. The register interface stays accessible.
pub fn assert_core_reset<B: RegisterBus>(bus: &mut B) {
    bus.write(
        src::DDRC_RCR,
        DdrcResetControl::builder()
            .with_ddrc_core_rst(true)
            .with_ddrc_prst(false)
            .build()
            .raw_value(),
    );
}

pub fn release_core_reset<B: RegisterBus>(bus: &mut B) {
    bus.write(src::DDRC_RCR, DdrcResetControl::DEFAULT.raw_value());
}

pub fn configure_ddr_config<B: RegisterBus>(bus: &mut B, cfg_set: &DdrcConfigSet) {
    for (reg, value) in cfg_set.register_writes() {
        bus.write(reg, value);
    }
}

pub fn configure_phy<B: RegisterBus>(bus: &mut B, cfg_set: &DdrPhyConfigSet) {
    for (reg, value) in cfg_set.register_writes() {
        bus.write(reg, value);
    }
}

pub fn configure_ports<B: RegisterBus>(bus: &mut B, cfg_set: &DdrcMpConfigSet) {
    for (reg, value) in cfg_set.register_writes() {
        bus.write(reg, value);
    }
}

/// Re-lock the command slave delay line to the master DLL.
pub fn resync_command_delay_line<B: RegisterBus>(bus: &mut B) {
    bus.modify(ddr_phy::CMD_SDLL_CON0, |val| {
        CmdSdllCon0::new_with_raw_value(val)
            .with_ctrl_resync(true)
            .raw_value()
    });
    bus.modify(ddr_phy::CMD_SDLL_CON0, |val| {
        CmdSdllCon0::new_with_raw_value(val)
            .with_ctrl_resync(false)
            .raw_value()
    });
}

/// Release the PHY DFI reset and wake the PHY control logic.
///
/// The DDR clock gate is closed while the GPR is changed.
pub fn wake_phy<B: RegisterBus>(bus: &mut B) {
    let gate = ccm::ccgr(GateIndex::DDR);
    bus.write(gate, gate_domain0(GateSetting::NotNeeded));
    bus.write(
        gpr(8),
        Gpr8::builder()
            .with_ddr_phy_dfi_reset_n_din(true)
            .with_ddr_phy_ctrl_wake_up(u4::new(0xF))
            .build()
            .raw_value(),
    );
    bus.write(gate, gate_domain0(GateSetting::RunAndWait));
}

const fn gate_domain0(setting: GateSetting) -> u32 {
    Gate::DEFAULT.with_domain0(setting).raw_value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_writes_are_unique() {
        let cfg = DdrcConfigSet {
            mstr: 1,
            init0: 2,
            init1: 3,
            init3: 4,
            init4: 5,
            init5: 6,
            rankctl: 7,
            dramtmg0: 8,
            dramtmg1: 9,
            dramtmg2: 10,
            dramtmg3: 11,
            dramtmg4: 12,
            dramtmg5: 13,
            dramtmg8: 14,
            zqctl0: 15,
            zqctl1: 16,
            dfitmg0: 17,
            dfitmg1: 18,
            dfiupd0: 19,
            dfiupd1: 20,
            dfiupd2: 21,
            odtcfg: 22,
            odtmap: 23,
            rfshtmg: 24,
            addrmap0: 25,
            addrmap1: 26,
            addrmap5: 27,
            addrmap6: 28,
        };
        let writes = cfg.register_writes();
        for (i, (reg, value)) in writes.iter().enumerate() {
            assert_eq!(*value, i as u32 + 1);
            assert_eq!(writes.iter().filter(|(r, _)| r == reg).count(), 1);
        }
    }

    #[test]
    fn test_gpr8_wake_value() {
        let gpr8 = Gpr8::builder()
            .with_ddr_phy_dfi_reset_n_din(true)
            .with_ddr_phy_ctrl_wake_up(u4::new(0xF))
            .build();
        assert_eq!(gpr8.raw_value(), 0x178);
    }
}
