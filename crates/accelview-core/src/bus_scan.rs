//! One-shot I2C bus discovery scan.
//!
//! Startup diagnostic: probes every 7-bit address outside the reserved
//! ranges with a 1-byte read and reports the ones that ack. A nack is the
//! expected majority case, not an error; nothing is retried.

use embedded_hal::i2c::I2c;
use heapless::Vec;
use log::{info, warn};

use crate::devices::DeviceReady;

/// First probed address (below are reserved).
pub const FIRST_ADDR: u8 = 0x08;
/// Last probed address (above are reserved).
pub const LAST_ADDR: u8 = 0x77;
/// Number of probed addresses.
pub const ADDR_COUNT: usize = (LAST_ADDR - FIRST_ADDR + 1) as usize;

/// Probe `[FIRST_ADDR, LAST_ADDR]` and return the addresses that responded,
/// in ascending order.
///
/// Runs in time bounded by the address range times the per-probe transport
/// latency, and never mutates bus state beyond what a generic read implies.
pub fn scan<I: I2c>(bus: &mut I) -> Vec<u8, ADDR_COUNT> {
    let mut found = Vec::new();
    let mut scratch = [0u8; 1];

    info!("I2C scan...");
    for addr in FIRST_ADDR..=LAST_ADDR {
        if bus.read(addr, &mut scratch).is_ok() {
            info!("  found device at 0x{:02X}", addr);
            // Capacity equals the range size, so this push cannot fail.
            let _ = found.push(addr);
        }
    }
    info!("I2C scan done, {} device(s) found", found.len());

    found
}

/// Run [`scan`] if the bus handle is ready; otherwise log and skip.
///
/// A missing bus is non-fatal, the scan is purely informational.
pub fn scan_if_ready<I: I2c + DeviceReady>(bus: &mut I) -> Option<Vec<u8, ADDR_COUNT>> {
    if !bus.is_ready() {
        warn!("I2C bus not ready, skipping scan");
        return None;
    }
    Some(scan(bus))
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation, SevenBitAddress};

    /// Bus stub that acks a fixed set of addresses and records every probe.
    struct StubBus {
        present: std::vec::Vec<u8>,
        probed: std::vec::Vec<u8>,
        ready: bool,
    }

    impl ErrorType for StubBus {
        type Error = ErrorKind;
    }

    impl I2c for StubBus {
        fn transaction(
            &mut self,
            address: SevenBitAddress,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.probed.push(address);
            if !self.present.contains(&address) {
                return Err(ErrorKind::NoAcknowledge(
                    embedded_hal::i2c::NoAcknowledgeSource::Address,
                ));
            }
            for op in operations {
                if let Operation::Read(buf) = op {
                    buf.fill(0);
                }
            }
            Ok(())
        }
    }

    impl DeviceReady for StubBus {
        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    #[test]
    fn test_scan_probes_exactly_112_addresses() {
        let mut bus = StubBus {
            present: vec![],
            probed: vec![],
            ready: true,
        };

        let found = scan(&mut bus);
        assert!(found.is_empty());
        assert_eq!(bus.probed.len(), ADDR_COUNT);
        assert_eq!(ADDR_COUNT, 112);
        assert_eq!(bus.probed.first(), Some(&FIRST_ADDR));
        assert_eq!(bus.probed.last(), Some(&LAST_ADDR));
        assert!(!bus.probed.contains(&0x07));
        assert!(!bus.probed.contains(&0x78));
    }

    #[test]
    fn test_scan_reports_responding_addresses_in_order() {
        let mut bus = StubBus {
            present: vec![0x53, 0x1D, 0x68],
            probed: vec![],
            ready: true,
        };

        let found = scan(&mut bus);
        assert_eq!(found.as_slice(), &[0x1D, 0x53, 0x68]);
    }

    #[test]
    fn test_scan_if_ready_short_circuits_when_bus_missing() {
        let mut bus = StubBus {
            present: vec![0x1D],
            probed: vec![],
            ready: false,
        };

        assert!(scan_if_ready(&mut bus).is_none());
        assert!(bus.probed.is_empty());
    }
}
