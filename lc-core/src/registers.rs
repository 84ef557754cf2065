//! CC2500 Register-Adressen, Strobes und LivingColors-Konfiguration
//!
//! Werte laut CC2500 Datenblatt; die Konfigurationstabelle entspricht den
//! Funk-Einstellungen der Original-Fernbedienung (Kanal, Modulation,
//! Paketformat mit variabler Länge, CRC und angehängtem RSSI/LQI).

// ============================================================================
// Zugriffs-Flags für das Header-Byte
// ============================================================================

pub const WRITE_BURST: u8 = 0x40;
pub const READ_SINGLE: u8 = 0x80;
pub const READ_BURST: u8 = 0xC0;

// ============================================================================
// Konfigurations-Register
// ============================================================================

pub const IOCFG2: u8 = 0x00;
pub const IOCFG0: u8 = 0x02;
pub const PKTLEN: u8 = 0x06;
pub const PKTCTRL1: u8 = 0x07;
pub const PKTCTRL0: u8 = 0x08;
pub const ADDR: u8 = 0x09;
pub const CHANNR: u8 = 0x0A;
pub const FSCTRL1: u8 = 0x0B;
pub const FSCTRL0: u8 = 0x0C;
pub const FREQ2: u8 = 0x0D;
pub const FREQ1: u8 = 0x0E;
pub const FREQ0: u8 = 0x0F;
pub const MDMCFG4: u8 = 0x10;
pub const MDMCFG3: u8 = 0x11;
pub const MDMCFG2: u8 = 0x12;
pub const MDMCFG1: u8 = 0x13;
pub const MDMCFG0: u8 = 0x14;
pub const DEVIATN: u8 = 0x15;
pub const MCSM2: u8 = 0x16;
pub const MCSM1: u8 = 0x17;
pub const MCSM0: u8 = 0x18;
pub const FOCCFG: u8 = 0x19;
pub const BSCFG: u8 = 0x1A;
pub const AGCCTRL2: u8 = 0x1B;
pub const AGCCTRL1: u8 = 0x1C;
pub const AGCCTRL0: u8 = 0x1D;
pub const FREND1: u8 = 0x21;
pub const FREND0: u8 = 0x22;
pub const FSCAL3: u8 = 0x23;
pub const FSCAL2: u8 = 0x24;
pub const FSCAL1: u8 = 0x25;
pub const FSCAL0: u8 = 0x26;

// ============================================================================
// Strobe-Kommandos
// ============================================================================

pub const SRES: u8 = 0x30;
pub const SRX: u8 = 0x34;
pub const STX: u8 = 0x35;
pub const SIDLE: u8 = 0x36;
pub const SFRX: u8 = 0x3A;
pub const SFTX: u8 = 0x3B;
pub const SNOP: u8 = 0x3D;

// ============================================================================
// Status-Register (nur mit READ_BURST lesbar), FIFOs und PATABLE
// ============================================================================

pub const TXBYTES: u8 = 0x3A;
pub const RXBYTES: u8 = 0x3B;
pub const PATABLE: u8 = 0x3E;
pub const FIFO: u8 = 0x3F;

/// Bit 7 in RXBYTES/TXBYTES: FIFO über- bzw. unterlaufen
pub const FIFO_OVERFLOW: u8 = 0x80;
/// Maske für die Byte-Anzahl in RXBYTES/TXBYTES
pub const FIFO_BYTES_MASK: u8 = 0x7F;
/// Bit 7 im angehängten LQI-Byte: CRC korrekt
pub const LQI_CRC_OK: u8 = 0x80;

/// Ausgangsleistung (PATABLE-Eintrag 0), maximale Leistung
pub const PA_POWER_MAX: u8 = 0xFF;

/// Register-Tabelle, die der Transport bei `init()` schreibt
pub const LIVINGCOLORS_CONFIG: &[(u8, u8)] = &[
    (IOCFG2, 0x29), // GDO2 = CHIP_RDYn
    (IOCFG0, 0x06), // GDO0 = Sync Word gesendet/empfangen
    (PKTLEN, 0xFF),
    (PKTCTRL1, 0x04), // RSSI/LQI anhängen
    (PKTCTRL0, 0x05), // variable Länge, CRC an
    (ADDR, 0x00),
    (CHANNR, 0x03),
    (FSCTRL1, 0x09),
    (FSCTRL0, 0x00),
    (FREQ2, 0x5D),
    (FREQ1, 0x93),
    (FREQ0, 0xB1),
    (MDMCFG4, 0x2D),
    (MDMCFG3, 0x3B),
    (MDMCFG2, 0x73),
    (MDMCFG1, 0x22),
    (MDMCFG0, 0xF8),
    (DEVIATN, 0x00),
    (MCSM2, 0x07),
    (MCSM1, 0x30), // nach RX und TX zurück nach IDLE
    (MCSM0, 0x18),
    (FOCCFG, 0x1D),
    (BSCFG, 0x1C),
    (AGCCTRL2, 0xC7),
    (AGCCTRL1, 0x00),
    (AGCCTRL0, 0xB2),
    (FREND1, 0xB6),
    (FREND0, 0x10),
    (FSCAL3, 0xEA),
    (FSCAL2, 0x0A),
    (FSCAL1, 0x00),
    (FSCAL0, 0x11),
];
