// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — TWP Witness Signature
// ─────────────────────────────────────────────────────────────────────
//! Compact textual witness of a layer's post-tick state:
//!
//!   {STATE_OK|ANOMALY_FLAGGED}:0x{II}{CC}{HH}:C{tick:04}
//!
//! Each axis is rounded to the nearest integer and printed as two hex
//! digits. Equal inputs always give an equal signature.

use uaca_types::{clamp_axis, Anomaly, AxisState};

pub const STATUS_OK: &str = "STATE_OK";
pub const STATUS_ANOMALY: &str = "ANOMALY_FLAGGED";

#[inline]
fn axis_byte(value: f64) -> u8 {
    clamp_axis(value).round() as u8
}

/// `0x` followed by the three rounded axes as hex pairs.
pub fn state_hash(state: &AxisState) -> String {
    format!(
        "0x{:02x}{:02x}{:02x}",
        axis_byte(state.information),
        axis_byte(state.complexity),
        axis_byte(state.coherence)
    )
}

pub fn witness_signature(state: &AxisState, anomaly: Option<&Anomaly>, tick: u64) -> String {
    let status = if anomaly.is_some() {
        STATUS_ANOMALY
    } else {
        STATUS_OK
    };
    format!("{status}:{}:C{tick:04}", state_hash(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_ok() {
        let sig = witness_signature(&AxisState::new(100.0, 0.0, 15.0), None, 7);
        assert_eq!(sig, "STATE_OK:0x64000f:C0007");
    }

    #[test]
    fn test_signature_anomaly() {
        let sig = witness_signature(&AxisState::new(16.0, 32.0, 48.0), Some(&Anomaly::Forced), 123);
        assert_eq!(sig, "ANOMALY_FLAGGED:0x102030:C0123");
    }

    #[test]
    fn test_signature_rounds() {
        let sig = witness_signature(&AxisState::new(10.5, 10.49, 99.6), None, 1);
        assert_eq!(sig, "STATE_OK:0x0b0a64:C0001");
    }

    #[test]
    fn test_signature_wide_tick() {
        let sig = witness_signature(&AxisState::new(0.0, 0.0, 0.0), None, 12345);
        assert_eq!(sig, "STATE_OK:0x000000:C12345");
    }

    #[test]
    fn test_signature_deterministic() {
        let state = AxisState::new(63.2, 41.7, 77.9);
        let critical = Anomaly::CoherenceCritical {
            measured: 3.0,
            threshold: 20.0,
        };
        assert_eq!(
            witness_signature(&state, Some(&critical), 42),
            witness_signature(&state, Some(&critical), 42)
        );
        assert_ne!(
            witness_signature(&state, None, 42),
            witness_signature(&state, None, 43)
        );
    }
}
