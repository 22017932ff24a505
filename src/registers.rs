//! Register map of the DuPPa I2C Encoder v2.1.
//!
//! Registers are addressed with a single byte. Four-byte registers (counter
//! value, limits and step) are transferred most significant byte first.
//!
//! The board has been shipped with two incompatible register layouts. This
//! crate follows the big-endian layout in which `GP3CONF` and `INTCONF`
//! share address `0x03`; the other layout is not supported.

use crate::field::{Encoding, FieldDescriptor};

use Encoding::{FloatBe32, SignedBe32};

// ---------------------------------------------------------------------------
// Configuration registers
// ---------------------------------------------------------------------------

/// General configuration.
pub const REG_GCONF: u8 = 0x00;
/// GP1 pin configuration.
pub const REG_GP1CONF: u8 = 0x01;
/// GP2 pin configuration.
pub const REG_GP2CONF: u8 = 0x02;
/// GP3 pin configuration.
pub const REG_GP3CONF: u8 = 0x03;
/// Interrupt configuration. Shares its address with [`REG_GP3CONF`].
pub const REG_INTCONF: u8 = 0x03;
/// Secondary general configuration.
pub const REG_GCONF2: u8 = 0x30;

// ---------------------------------------------------------------------------
// Status registers (read-only)
// ---------------------------------------------------------------------------

pub const REG_ESTATUS: u8 = 0x05;
pub const REG_I2STATUS: u8 = 0x06;
pub const REG_FSTATUS: u8 = 0x07;

// ---------------------------------------------------------------------------
// Counter registers (4 bytes, big-endian)
// ---------------------------------------------------------------------------

/// Counter value.
pub const REG_CVAL: u8 = 0x08;
/// Counter maximum.
pub const REG_CMAX: u8 = 0x0C;
/// Counter minimum.
pub const REG_CMIN: u8 = 0x10;
/// Increment step.
pub const REG_ISTEP: u8 = 0x14;

// ---------------------------------------------------------------------------
// Output, timing and gamma registers
// ---------------------------------------------------------------------------

pub const REG_RLED: u8 = 0x18;
pub const REG_GLED: u8 = 0x19;
pub const REG_BLED: u8 = 0x1A;
pub const REG_GP1: u8 = 0x1B;
pub const REG_GP2: u8 = 0x1C;
pub const REG_GP3: u8 = 0x1D;
/// Anti-bounce period.
pub const REG_ANTBOUNC: u8 = 0x1E;
/// Double-push period.
pub const REG_DPPERIOD: u8 = 0x1F;
pub const REG_FADERGB: u8 = 0x20;
pub const REG_FADEGP: u8 = 0x21;
pub const REG_GAMRLED: u8 = 0x27;
pub const REG_GAMGLED: u8 = 0x28;
pub const REG_GAMBLED: u8 = 0x29;
pub const REG_GAMMAGP1: u8 = 0x2A;
pub const REG_GAMMAGP2: u8 = 0x2B;
pub const REG_GAMMAGP3: u8 = 0x2C;

// ---------------------------------------------------------------------------
// Identification and storage
// ---------------------------------------------------------------------------

pub const REG_IDCODE: u8 = 0x70;
pub const REG_VERSION: u8 = 0x71;
/// Start of the 128-byte persistent storage region.
pub const REG_EEPROM: u8 = 0x80;

// ---------------------------------------------------------------------------
// Field table
// ---------------------------------------------------------------------------

const fn bit(name: &'static str, register: u8, offset: u8) -> FieldDescriptor {
    FieldDescriptor::bit(name, register, offset)
}

const fn bits(name: &'static str, register: u8, offset: u8, width: u16) -> FieldDescriptor {
    FieldDescriptor::bits(name, register, offset, width)
}

const fn byte(name: &'static str, register: u8) -> FieldDescriptor {
    FieldDescriptor::bits(name, register, 0, 8)
}

const fn word(name: &'static str, register: u8, encoding: Encoding) -> FieldDescriptor {
    FieldDescriptor::word(name, register, encoding)
}

/// Every named field of the device.
///
/// Several fields alias the same register (all GCONF bits live at `0x00`;
/// `gp1conf` covers the same byte as `gp1conf_mode`, `gp1conf_pul` and
/// `gp1conf_int`; the counter registers have both a float and an integer
/// view). Writes through any of them leave the other bits of the byte
/// intact.
pub static FIELDS: [FieldDescriptor; 60] = [
    // GCONF
    bit("gconf_dtype", REG_GCONF, 0),
    bit("gconf_wrape", REG_GCONF, 1),
    bit("gconf_dire", REG_GCONF, 2),
    bit("gconf_ipud", REG_GCONF, 3),
    bit("gconf_rmod", REG_GCONF, 4),
    bit("gconf_etype", REG_GCONF, 5),
    bit("gconf_mbank", REG_GCONF, 6),
    bit("gconf_rst", REG_GCONF, 7),
    // GCONF2
    bit("gconf2_cksrc", REG_GCONF2, 0),
    bit("gconf2_relmod", REG_GCONF2, 1),
    // GP1CONF
    byte("gp1conf", REG_GP1CONF),
    bits("gp1conf_mode", REG_GP1CONF, 0, 2),
    bit("gp1conf_pul", REG_GP1CONF, 2),
    bits("gp1conf_int", REG_GP1CONF, 3, 2),
    // GP2CONF
    byte("gp2conf", REG_GP2CONF),
    bits("gp2conf_mode", REG_GP2CONF, 0, 2),
    bit("gp2conf_pul", REG_GP2CONF, 2),
    bits("gp2conf_int", REG_GP2CONF, 3, 2),
    // GP3CONF
    byte("gp3conf", REG_GP3CONF),
    bits("gp3conf_mode", REG_GP3CONF, 0, 2),
    bit("gp3conf_pul", REG_GP3CONF, 2),
    bits("gp3conf_int", REG_GP3CONF, 3, 2),
    // INTCONF
    bit("intconf_ipushr", REG_INTCONF, 0),
    bit("intconf_ipushp", REG_INTCONF, 1),
    bit("intconf_ipushd", REG_INTCONF, 2),
    bit("intconf_irinc", REG_INTCONF, 3),
    bit("intconf_irdec", REG_INTCONF, 4),
    bit("intconf_irmax", REG_INTCONF, 5),
    bit("intconf_irmin", REG_INTCONF, 6),
    bit("intconf_int2", REG_INTCONF, 7),
    // Status
    FieldDescriptor::ro_byte("estatus", REG_ESTATUS),
    FieldDescriptor::ro_byte("i2status", REG_I2STATUS),
    FieldDescriptor::ro_byte("fstatus", REG_FSTATUS),
    // Counter
    word("cval_float", REG_CVAL, FloatBe32),
    word("cval_long", REG_CVAL, SignedBe32),
    word("cmax_float", REG_CMAX, FloatBe32),
    word("cmax_long", REG_CMAX, SignedBe32),
    word("cmin_float", REG_CMIN, FloatBe32),
    word("cmin_long", REG_CMIN, SignedBe32),
    word("istep_float", REG_ISTEP, FloatBe32),
    word("istep_long", REG_ISTEP, SignedBe32),
    // LEDs and GP outputs
    byte("rled", REG_RLED),
    byte("gled", REG_GLED),
    byte("bled", REG_BLED),
    byte("gp1", REG_GP1),
    byte("gp2", REG_GP2),
    byte("gp3", REG_GP3),
    // Timing
    byte("antbounc", REG_ANTBOUNC),
    byte("dpperiod", REG_DPPERIOD),
    byte("fadergb", REG_FADERGB),
    byte("fadegp", REG_FADEGP),
    // Gamma
    bits("gamrled", REG_GAMRLED, 0, 3),
    bits("gamgled", REG_GAMGLED, 0, 3),
    bits("gambled", REG_GAMBLED, 0, 3),
    bits("gammagp1", REG_GAMMAGP1, 0, 3),
    bits("gammagp2", REG_GAMMAGP2, 0, 3),
    bits("gammagp3", REG_GAMMAGP3, 0, 3),
    // Identification
    FieldDescriptor::ro_byte("idcode", REG_IDCODE),
    FieldDescriptor::ro_byte("version", REG_VERSION),
    // Storage
    FieldDescriptor::ro_region("eeprom", REG_EEPROM, 1024),
];

/// Find a field by name.
///
/// Names are the lower-case register mnemonic, optionally followed by the
/// field mnemonic (`"gconf_dtype"`, `"cval_long"`, `"idcode"`).
pub fn lookup(name: &str) -> Option<&'static FieldDescriptor> {
    FIELDS.iter().find(|field| field.name == name)
}
