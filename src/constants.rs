//! HydroClima Protocol Constants
//!
//! This module defines the constants used by the HydroClima manufacturer
//! payload decoder: detection codes, the month length table and the packed
//! time encoding granularity.

/// FLAG-encoded manufacturer id for B METERS ("BMP")
pub const MANUFACTURER_BMP: u16 = 0x09B0;

/// wM-Bus media byte for heat cost allocators
pub const MEDIA_HEAT_COST_ALLOCATOR: u8 = 0x08;

/// Device version byte reported by HydroClima units
pub const HYDROCLIMA_VERSION: u8 = 0x33;

/// Base year of the packed date encoding
pub const BASE_YEAR: u32 = 2000;

/// Day counts per month, January first, February in a non-leap year
pub const DAYS_IN_MONTHS: [u16; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Packed time ticks per hour (one tick is 1/30 minute)
pub const TICKS_PER_HOUR: u16 = 1800;

/// Packed time ticks per minute
pub const TICKS_PER_MINUTE: u16 = 30;
