//! DDR3L configuration of the Colibri iMX7 module.
use imx7::ddrc::regs::PortControl;
use imx7_hal::ddr::{
    CalibrationTable, DdrPhyConfigSet, DdrcConfigSet, DdrcMpConfigSet, DramConfig,
    memtest::TestRegion,
};

pub const DDRC: DdrcConfigSet = DdrcConfigSet {
    mstr: 0x0104_0001,
    init0: 0x0002_0083,
    init1: 0x0069_0000,
    init3: 0x0930_0004,
    init4: 0x0448_0000,
    init5: 0x0010_0004,
    rankctl: 0x0000_033f,
    dramtmg0: 0x0910_090a,
    dramtmg1: 0x000d_020e,
    dramtmg2: 0x0304_0307,
    dramtmg3: 0x0000_2006,
    dramtmg4: 0x0402_0204,
    dramtmg5: 0x0303_0202,
    dramtmg8: 0x0000_0803,
    zqctl0: 0x0080_0020,
    zqctl1: 0x0200_1000,
    dfitmg0: 0x0209_8204,
    dfitmg1: 0x0003_0303,
    dfiupd0: 0x8040_0003,
    dfiupd1: 0x0010_0020,
    dfiupd2: 0x8010_0004,
    odtcfg: 0x0600_0601,
    odtmap: 0x0000_0001,
    rfshtmg: 0x0040_0046,
    addrmap0: 0x0000_001f,
    addrmap1: 0x0008_0808,
    addrmap5: 0x0707_0707,
    addrmap6: 0x0707_0707,
};

pub const DDRC_MP: DdrcMpConfigSet = DdrcMpConfigSet {
    pctrl_0: PortControl::builder().with_port_en(true).build(),
};

pub const DDR_PHY: DdrPhyConfigSet = DdrPhyConfigSet {
    phy_con0: 0x1742_0f40,
    phy_con1: 0x1021_0100,
    phy_con4: 0x0006_0807,
    mdll_con0: 0x1010_007e,
    drvds_con0: 0x0000_0d6e,
    cmd_sdll_con0: 0x0000_0010,
    offset_lp_con0: 0x0000_000f,
    offset_rd_con0: 0x0808_0808,
    offset_wr_con0: 0x0808_0808,
};

/// ZQ calibration candidates, tried in this order.
pub const CALIBRATION_CODES: [u32; 5] = [
    0x0e40_7304,
    0x0e44_7304,
    0x0e44_7306,
    0x0e44_7304,
    0x0e40_7304,
];

pub const DRAM_CONFIG: DramConfig<'static> = DramConfig {
    ddrc: DDRC,
    ddrc_mp: DDRC_MP,
    phy: DDR_PHY,
    calibration: CalibrationTable::new(&CALIBRATION_CODES),
};

static_assertions::const_assert_eq!(DDRC_MP.pctrl_0.raw_value(), 0x0000_0001);

/// DRAM window checked by the optional memory test, the first MiB.
pub const MEMTEST_REGION: TestRegion = TestRegion::new(imx7::DRAM_BASE_ADDR, 0x10_0000 / 4);
